//! Operating system identification.
//!
//! [`OsInfo`] abstracts over the OS name and version so support checks can
//! be tested on any host with [`MockOs`].

use std::fmt;

/// Abstraction over OS identification.
pub trait OsInfo: Send + Sync {
    /// Lower-level OS name, e.g. `macos` or `linux`.
    fn name(&self) -> String;

    /// Product version string, e.g. `14.4.1`. `None` when unknown.
    fn version(&self) -> Option<String>;
}

/// The running operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealOs;

impl OsInfo for RealOs {
    fn name(&self) -> String {
        std::env::consts::OS.to_string()
    }

    fn version(&self) -> Option<String> {
        product_version()
    }
}

#[cfg(target_os = "macos")]
fn product_version() -> Option<String> {
    let out = crate::shell::run_captured(
        "sw_vers",
        ["-productVersion"],
        std::time::Duration::from_secs(1),
    )
    .map_err(|e| tracing::warn!(error = %e, "sw_vers failed"))
    .ok()?;
    if !out.success() {
        return None;
    }
    let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!version.is_empty()).then_some(version)
}

#[cfg(not(target_os = "macos"))]
fn product_version() -> Option<String> {
    None
}

/// Fixed OS identity for tests.
#[derive(Debug, Clone)]
pub struct MockOs {
    name: String,
    version: Option<String>,
}

impl MockOs {
    pub fn new(name: impl Into<String>, version: Option<&str>) -> Self {
        Self {
            name: name.into(),
            version: version.map(str::to_string),
        }
    }

    /// A macOS host reporting `version`.
    pub fn macos(version: &str) -> Self {
        Self::new("macos", Some(version))
    }
}

impl OsInfo for MockOs {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn version(&self) -> Option<String> {
        self.version.clone()
    }
}

/// A `major.minor` OS version. Ordering is lexicographic on the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
}

impl OsVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parses the leading `major[.minor]` of a version string.
    ///
    /// Patch and later components are ignored; a missing minor is `0`.
    /// Returns `None` when either leading component is not a number.
    pub fn parse(version: &str) -> Option<Self> {
        let mut parts = version.trim().split('.');
        let major = parts.next()?.trim().parse().ok()?;
        let minor = match parts.next() {
            Some(part) => part.trim().parse().ok()?,
            None => 0,
        };
        Some(Self { major, minor })
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_patch() {
        assert_eq!(OsVersion::parse("10.13.6"), Some(OsVersion::new(10, 13)));
        assert_eq!(OsVersion::parse("14.4.1"), Some(OsVersion::new(14, 4)));
    }

    #[test]
    fn parse_defaults_minor() {
        assert_eq!(OsVersion::parse("11"), Some(OsVersion::new(11, 0)));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(OsVersion::parse(""), None);
        assert_eq!(OsVersion::parse("ten.14"), None);
        assert_eq!(OsVersion::parse("10.x"), None);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let min = OsVersion::new(10, 14);
        assert!(OsVersion::new(10, 13) < min);
        assert!(OsVersion::new(10, 14) >= min);
        assert!(OsVersion::new(11, 0) > min);
        assert!(OsVersion::new(9, 20) < min);
    }

    #[test]
    fn display_is_major_dot_minor() {
        assert_eq!(OsVersion::new(10, 14).to_string(), "10.14");
    }

    #[test]
    fn mock_os_reports_what_it_was_given() {
        let os = MockOs::macos("10.15.7");
        assert_eq!(os.name(), "macos");
        assert_eq!(os.version().as_deref(), Some("10.15.7"));

        let os = MockOs::new("linux", None);
        assert_eq!(os.version(), None);
    }

    #[test]
    fn real_os_name_is_nonempty() {
        assert!(!RealOs.name().is_empty());
    }
}
