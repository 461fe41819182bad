//! # syscolour
//!
//! Reads the operating system's appearance colours and turns them into a
//! stylesheet.
//!
//! ## Loading a scheme
//!
//! [`SystemLoader`] asks the OS for its current [`ColourScheme`] through an
//! external helper. When the live scheme is unavailable (wrong OS, old
//! release, broken helper) it recovers to `None`, and
//! [`SystemLoader::load_or_bundled`] falls back to one of the packaged
//! [`BundledSchemes`].
//!
//! ```rust,no_run
//! use syscolour::{BundledSchemes, ProbeSettings, SystemLoader};
//!
//! let bundled = BundledSchemes::embedded();
//! let loader = SystemLoader::real(&ProbeSettings::default());
//! let scheme = loader.load_or_bundled(&bundled)?;
//! println!("dark: {}", scheme.is_dark_theme());
//! # Ok::<(), syscolour::SchemeError>(())
//! ```
//!
//! ## Binding a stylesheet
//!
//! [`TemplateBinder`] fills the `%name` placeholders of a stylesheet
//! template with colours from a scheme, writes the result to a temporary
//! `.css` file and hands its URL to a [`StylesheetHost`]:
//!
//! ```rust
//! use syscolour::{BundledSchemes, TemplateBinder};
//!
//! let bundled = BundledSchemes::embedded();
//! let mut stylesheets: Vec<String> = Vec::new();
//!
//! let reference = TemplateBinder::embedded()
//!     .apply(bundled.light()?, &mut stylesheets)?
//!     .expect("bundled template");
//! assert_eq!(stylesheets, vec![reference.url().to_string()]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`colour`]: the colour value and its wire/display formats
//! - [`scheme`]: the scheme record and its JSON mapping
//! - [`system`]: live loading from the OS
//! - [`bundled`]: packaged fallback schemes
//! - [`binder`]: stylesheet template binding
//! - [`resources`]: packaged resource lookup
//! - [`config`]: YAML settings

pub mod binder;
pub mod bundled;
pub mod colour;
pub mod config;
mod error;
pub mod resources;
pub mod scheme;
pub mod system;
mod wire;

pub use binder::{
    render_template, Placeholder, StylesheetHost, StylesheetReference, TemplateBinder,
    PLACEHOLDERS,
};
pub use bundled::{BundledSchemes, Variant};
pub use colour::Colour;
pub use config::Settings;
pub use error::{BindError, ColourParseError, ConfigError, SchemeError};
pub use resources::Resources;
pub use scheme::ColourScheme;
pub use system::SystemLoader;

pub use syscolour_probe::{self as probe, HelperSource, ProbeSettings};
