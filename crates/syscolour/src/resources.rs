//! Packaged resources: bundled schemes and the stylesheet template.
//!
//! Resources are looked up by a fixed logical name. The embedded set is
//! compiled into the binary; applications can add or override entries, or
//! start from an empty set in tests.
//!
//! ```rust
//! use syscolour::resources::{Resources, STYLESHEET_TEMPLATE};
//!
//! let resources = Resources::embedded()
//!     .with_entry(STYLESHEET_TEMPLATE, ".root { -fx-accent: %controlAccentColor; }");
//! assert!(resources.get(STYLESHEET_TEMPLATE).unwrap().contains("%controlAccentColor"));
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

/// Logical name of the bundled light scheme.
pub const LIGHT_SCHEME: &str = "light.json";

/// Logical name of the bundled dark scheme.
pub const DARK_SCHEME: &str = "dark.json";

/// Logical name of the stylesheet template.
pub const STYLESHEET_TEMPLATE: &str = "theme.css";

static EMBEDDED: &[(&str, &str)] = &[
    (LIGHT_SCHEME, include_str!("../resources/light.json")),
    (DARK_SCHEME, include_str!("../resources/dark.json")),
    (STYLESHEET_TEMPLATE, include_str!("../resources/theme.css")),
];

/// A set of named text resources.
#[derive(Debug, Clone, Default)]
pub struct Resources {
    entries: HashMap<String, Cow<'static, str>>,
}

impl Resources {
    /// An empty resource set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The resources compiled into this crate.
    pub fn embedded() -> Self {
        Self::from_entries(EMBEDDED)
    }

    /// Builds a set from `(name, content)` pairs baked in at compile time.
    pub fn from_entries(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(name, content)| (name.to_string(), Cow::Borrowed(*content)))
                .collect(),
        }
    }

    /// Adds or replaces an entry.
    pub fn with_entry(
        mut self,
        name: impl Into<String>,
        content: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.entries.insert(name.into(), content.into());
        self
    }

    /// Removes an entry.
    pub fn without(mut self, name: &str) -> Self {
        self.entries.remove(name);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|content| content.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
