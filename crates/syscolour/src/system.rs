//! Loading the live colour scheme from the OS.
//!
//! [`SystemLoader`] runs the colour helper through a [`SystemProbe`] and maps
//! its output onto a [`ColourScheme`]. Every failure along the way (wrong OS,
//! OS too old, helper missing, garbage output) recovers to `None`, so
//! callers fall back to a bundled scheme:
//!
//! ```rust
//! use syscolour::{BundledSchemes, SystemLoader, Variant};
//! use syscolour::probe::{MockOs, MockProbe};
//!
//! let loader = SystemLoader::new(MockOs::new("linux", None), MockProbe::new());
//! assert!(loader.load().is_none());
//!
//! let bundled = BundledSchemes::embedded();
//! let scheme = loader.load_or(&bundled, || Variant::Dark).unwrap();
//! assert!(scheme.is_dark_theme());
//! ```

use syscolour_probe::{OsInfo, OsVersion, ProbeSettings, ProcessProbe, RealOs, SystemProbe};

use crate::bundled::{BundledSchemes, Variant};
use crate::error::SchemeError;
use crate::scheme::ColourScheme;

/// Marker the OS name must contain, compared case-insensitively.
const SUPPORTED_OS_MARKER: &str = "mac";

/// Loads a [`ColourScheme`] from the running OS.
pub struct SystemLoader<O, P> {
    os: O,
    probe: P,
    minimum_version: OsVersion,
}

impl SystemLoader<RealOs, ProcessProbe> {
    /// A loader backed by the real OS and subprocesses.
    pub fn real(settings: &ProbeSettings) -> Self {
        Self::new(RealOs, ProcessProbe::new(settings))
            .with_minimum_version(settings.minimum_version)
    }
}

impl<O: OsInfo, P: SystemProbe> SystemLoader<O, P> {
    pub fn new(os: O, probe: P) -> Self {
        Self {
            os,
            probe,
            minimum_version: syscolour_probe::DEFAULT_MINIMUM_VERSION,
        }
    }

    pub fn with_minimum_version(mut self, version: OsVersion) -> Self {
        self.minimum_version = version;
        self
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Whether the OS is one the colour helper supports.
    pub fn is_supported(&self) -> bool {
        let name = self.os.name();
        if !name.to_lowercase().contains(SUPPORTED_OS_MARKER) {
            tracing::debug!(os = %name, "unsupported OS");
            return false;
        }

        let raw = self.os.version().unwrap_or_default();
        match OsVersion::parse(&raw) {
            Some(version) if version >= self.minimum_version => true,
            _ => {
                tracing::debug!(
                    version = %raw,
                    minimum = %self.minimum_version,
                    "OS version below minimum"
                );
                false
            }
        }
    }

    /// Queries the OS for its current colour scheme.
    ///
    /// Returns `None` when the OS is unsupported or the helper's output cannot
    /// be mapped onto a scheme. When the helper leaves the dark flag
    /// unresolved, the interface-style preference decides it.
    pub fn load(&self) -> Option<ColourScheme> {
        if !self.is_supported() {
            return None;
        }

        let output = match self.probe.query_colour_scheme() {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(error = %e, "colour helper failed");
                return None;
            }
        };

        let mut scheme = match ColourScheme::from_json(&output) {
            Ok(scheme) => scheme,
            Err(e) => {
                tracing::warn!(error = %e, bytes = output.len(), "colour helper output rejected");
                return None;
            }
        };

        if scheme.dark_theme_flag().is_none() {
            let dark = self.query_dark_style();
            tracing::debug!(dark, "resolved dark flag from interface style");
            scheme.set_dark_theme(dark);
        }

        Some(scheme)
    }

    /// The live scheme, or the bundled variant matching the OS preference.
    pub fn load_or_bundled(&self, bundled: &BundledSchemes) -> Result<ColourScheme, SchemeError> {
        self.load_or(bundled, Variant::detect)
    }

    /// The live scheme, or the bundled variant chosen by `fallback`.
    ///
    /// `fallback` only runs when the live scheme is unavailable.
    pub fn load_or(
        &self,
        bundled: &BundledSchemes,
        fallback: impl FnOnce() -> Variant,
    ) -> Result<ColourScheme, SchemeError> {
        if let Some(scheme) = self.load() {
            return Ok(scheme);
        }
        let variant = fallback();
        tracing::debug!(%variant, "using bundled scheme");
        bundled.get(variant).cloned()
    }

    fn query_dark_style(&self) -> bool {
        match self.probe.query_interface_style() {
            Ok(style) => is_dark_style(&style),
            Err(e) => {
                // `defaults` exits non-zero when the key is unset, i.e. light mode
                tracing::debug!(error = %e, "interface style unavailable");
                false
            }
        }
    }
}

fn is_dark_style(style: &str) -> bool {
    style.trim().eq_ignore_ascii_case("dark")
}
