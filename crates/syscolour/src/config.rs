//! YAML settings file.
//!
//! Every key is optional; an empty document yields the defaults.
//!
//! ```yaml
//! helper_path: /usr/local/libexec/syscolour-helper
//! scheme_timeout_ms: 3000
//! style_timeout_ms: 500
//! minimum_version: "10.14"
//! template: /etc/syscolour/custom.css
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use syscolour_probe::{HelperSource, OsVersion, ProbeSettings};

use crate::error::ConfigError;

/// Settings read from a YAML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Installed colour helper executable.
    #[serde(default)]
    pub helper_path: Option<PathBuf>,

    #[serde(default)]
    pub scheme_timeout_ms: Option<u64>,

    #[serde(default)]
    pub style_timeout_ms: Option<u64>,

    /// Oldest supported OS release, as `major.minor`.
    #[serde(default)]
    pub minimum_version: Option<String>,

    /// Stylesheet template used instead of the bundled one. `~` is not expanded.
    #[serde(default)]
    pub template: Option<PathBuf>,
}

impl Settings {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "read settings");
        Self::from_yaml(&text)
    }

    /// Probe settings with these values layered over the defaults.
    pub fn probe_settings(&self) -> Result<ProbeSettings, ConfigError> {
        let mut settings = ProbeSettings::default();
        if let Some(path) = &self.helper_path {
            settings.helper = HelperSource::Path(path.clone());
        }
        if let Some(ms) = self.scheme_timeout_ms {
            settings = settings.with_scheme_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = self.style_timeout_ms {
            settings = settings.with_style_timeout(Duration::from_millis(ms));
        }
        if let Some(raw) = &self.minimum_version {
            let version =
                OsVersion::parse(raw).ok_or_else(|| ConfigError::InvalidVersion(raw.clone()))?;
            settings = settings.with_minimum_version(version);
        }
        Ok(settings)
    }

    pub fn template_path(&self) -> Option<&Path> {
        self.template.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Settings::from_yaml("").unwrap(), Settings::default());
        assert_eq!(Settings::from_yaml("  \n").unwrap(), Settings::default());
    }

    #[test]
    fn parses_all_keys() {
        let yaml = r#"
helper_path: /opt/helper
scheme_timeout_ms: 2500
style_timeout_ms: 250
minimum_version: "11.0"
template: /tmp/theme.css
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.helper_path, Some(PathBuf::from("/opt/helper")));
        assert_eq!(settings.template_path(), Some(Path::new("/tmp/theme.css")));

        let probe = settings.probe_settings().unwrap();
        assert_eq!(probe.scheme_timeout, Duration::from_millis(2500));
        assert_eq!(probe.style_timeout, Duration::from_millis(250));
        assert_eq!(probe.minimum_version, OsVersion::new(11, 0));
        assert!(matches!(probe.helper, HelperSource::Path(p) if p == Path::new("/opt/helper")));
    }

    #[test]
    fn module_example_paths_are_absolute() {
        let yaml = r#"
helper_path: /usr/local/libexec/syscolour-helper
scheme_timeout_ms: 3000
style_timeout_ms: 500
minimum_version: "10.14"
template: /etc/syscolour/custom.css
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert!(settings.template_path().unwrap().is_absolute());
        assert!(settings.helper_path.as_deref().unwrap().is_absolute());
        assert!(settings.probe_settings().is_ok());
    }

    #[test]
    fn template_path_is_taken_literally() {
        let settings = Settings::from_yaml("template: ~/themes/custom.css\n").unwrap();
        assert_eq!(
            settings.template_path(),
            Some(Path::new("~/themes/custom.css"))
        );
    }

    #[test]
    fn defaults_fill_missing_keys() {
        let probe = Settings::default().probe_settings().unwrap();
        assert_eq!(probe.scheme_timeout, syscolour_probe::DEFAULT_SCHEME_TIMEOUT);
        assert_eq!(probe.style_timeout, syscolour_probe::DEFAULT_STYLE_TIMEOUT);
        assert_eq!(probe.minimum_version, syscolour_probe::DEFAULT_MINIMUM_VERSION);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = Settings::from_yaml("colour: red\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_version_is_rejected() {
        let settings = Settings::from_yaml("minimum_version: soon\n").unwrap();
        assert!(matches!(
            settings.probe_settings(),
            Err(ConfigError::InvalidVersion(v)) if v == "soon"
        ));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "style_timeout_ms: 10").unwrap();
        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.style_timeout_ms, Some(10));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        assert!(matches!(
            Settings::from_file(&path),
            Err(ConfigError::Io { path: p, .. }) if p == path
        ));
    }
}
