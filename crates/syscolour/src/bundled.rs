//! Bundled fallback schemes.
//!
//! [`BundledSchemes`] parses the packaged light and dark schemes on first
//! use and keeps them for its own lifetime. Build one at application start
//! and pass it by reference to whatever needs a fallback scheme.
//!
//! ```rust
//! use syscolour::{BundledSchemes, Variant};
//!
//! let bundled = BundledSchemes::embedded();
//! let dark = bundled.get(Variant::Dark).unwrap();
//! assert!(dark.is_dark_theme());
//! ```

use std::fmt;
use std::str::FromStr;

use dark_light::Mode as OsThemeMode;
use once_cell::sync::OnceCell;

use crate::error::SchemeError;
use crate::resources::{Resources, DARK_SCHEME, LIGHT_SCHEME};
use crate::scheme::ColourScheme;

/// Which bundled scheme to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Light,
    Dark,
}

impl Variant {
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            Variant::Dark
        } else {
            Variant::Light
        }
    }

    /// The user's OS light/dark preference, via `dark-light`.
    ///
    /// Falls back to [`Variant::Light`] when the OS gives no answer.
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(OsThemeMode::Dark) => Variant::Dark,
            Ok(OsThemeMode::Light) | Ok(OsThemeMode::Unspecified) => Variant::Light,
            Err(e) => {
                tracing::warn!(error = %e, "OS theme detection failed, assuming light");
                Variant::Light
            }
        }
    }

    /// Logical name of the resource holding this variant.
    pub fn resource_name(self) -> &'static str {
        match self {
            Variant::Light => LIGHT_SCHEME,
            Variant::Dark => DARK_SCHEME,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Light => f.write_str("light"),
            Variant::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Variant::Light),
            "dark" => Ok(Variant::Dark),
            other => Err(format!("unknown scheme variant '{}' (expected light or dark)", other)),
        }
    }
}

/// Lazily parsed bundled schemes, one per [`Variant`].
#[derive(Debug)]
pub struct BundledSchemes {
    resources: Resources,
    light: OnceCell<ColourScheme>,
    dark: OnceCell<ColourScheme>,
}

impl Default for BundledSchemes {
    fn default() -> Self {
        Self::embedded()
    }
}

impl BundledSchemes {
    pub fn new(resources: Resources) -> Self {
        Self {
            resources,
            light: OnceCell::new(),
            dark: OnceCell::new(),
        }
    }

    /// Schemes from the resources compiled into this crate.
    pub fn embedded() -> Self {
        Self::new(Resources::embedded())
    }

    /// Returns the scheme for `variant`, parsing it on first access.
    ///
    /// An error means the application was packaged without a usable scheme
    /// document; it will not succeed on retry.
    pub fn get(&self, variant: Variant) -> Result<&ColourScheme, SchemeError> {
        let cell = match variant {
            Variant::Light => &self.light,
            Variant::Dark => &self.dark,
        };
        cell.get_or_try_init(|| self.load(variant))
    }

    pub fn light(&self) -> Result<&ColourScheme, SchemeError> {
        self.get(Variant::Light)
    }

    pub fn dark(&self) -> Result<&ColourScheme, SchemeError> {
        self.get(Variant::Dark)
    }

    fn load(&self, variant: Variant) -> Result<ColourScheme, SchemeError> {
        let name = variant.resource_name();
        let document = self
            .resources
            .get(name)
            .ok_or_else(|| SchemeError::MissingResource(name.to_string()))?;
        let scheme = ColourScheme::from_json(document.as_bytes())?;
        tracing::debug!(%variant, resource = name, "loaded bundled scheme");
        Ok(scheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::Colour;

    #[test]
    fn embedded_light_is_light() {
        let bundled = BundledSchemes::embedded();
        let light = bundled.light().unwrap();
        assert_eq!(light.dark_theme_flag(), Some(false));
        assert!(light.label_color.is_some());
    }

    #[test]
    fn embedded_dark_is_dark() {
        let bundled = BundledSchemes::embedded();
        let dark = bundled.dark().unwrap();
        assert_eq!(dark.dark_theme_flag(), Some(true));
        assert_eq!(dark.knob_color, Some(Colour::from_rgb_hex(0x6b6b6b)));
    }

    #[test]
    fn repeated_access_returns_cached_instance() {
        let bundled = BundledSchemes::embedded();
        let first = bundled.get(Variant::Dark).unwrap() as *const ColourScheme;
        let second = bundled.get(Variant::Dark).unwrap() as *const ColourScheme;
        assert_eq!(first, second);
    }

    #[test]
    fn missing_resource_is_error() {
        let bundled = BundledSchemes::new(Resources::embedded().without(DARK_SCHEME));
        assert!(bundled.light().is_ok());
        assert!(matches!(
            bundled.dark(),
            Err(SchemeError::MissingResource(name)) if name == DARK_SCHEME
        ));
    }

    #[test]
    fn unparseable_resource_is_error() {
        let bundled =
            BundledSchemes::new(Resources::empty().with_entry(LIGHT_SCHEME, "not json"));
        assert!(matches!(bundled.light(), Err(SchemeError::Json(_))));
    }

    #[test]
    fn variant_parses_and_displays() {
        assert_eq!("Dark".parse::<Variant>(), Ok(Variant::Dark));
        assert_eq!(" light ".parse::<Variant>(), Ok(Variant::Light));
        assert!("sepia".parse::<Variant>().is_err());
        assert_eq!(Variant::Dark.to_string(), "dark");
    }

    #[test]
    fn variant_from_flag() {
        assert_eq!(Variant::from_dark_flag(true), Variant::Dark);
        assert_eq!(Variant::from_dark_flag(false), Variant::Light);
    }
}
