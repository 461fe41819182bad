//! Error types for scheme loading, template binding and configuration.

use std::path::PathBuf;

/// A string that is not a wire-format colour.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColourParseError {
    #[error("expected rgba(r,g,b,a), got '{0}'")]
    NotRgba(String),

    #[error("rgba() takes exactly 4 components, got {0}")]
    ComponentCount(usize),

    #[error("invalid colour channel '{0}' (expected an integer 0-255)")]
    InvalidChannel(String),
}

/// Errors raised while loading or saving a [`ColourScheme`](crate::ColourScheme).
#[derive(Debug, thiserror::Error)]
pub enum SchemeError {
    /// A bundled resource is not in the resource set.
    #[error("bundled resource not found: {0}")]
    MissingResource(String),

    /// The document is not a colour scheme.
    #[error("invalid colour scheme document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while binding a scheme into a stylesheet template.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// A placeholder used by the template has no colour in the scheme.
    #[error("no colour for placeholder {placeholder}")]
    MissingColour { placeholder: &'static str },

    /// The template file or rendered stylesheet could not be read or written.
    #[error("stylesheet I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The rendered stylesheet path cannot be expressed as a `file://` URL.
    #[error("stylesheet path is not absolute: {0}")]
    NotAbsolute(PathBuf),
}

/// Errors raised while reading [`Settings`](crate::Settings).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid minimum_version '{0}' (expected major.minor)")]
    InvalidVersion(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_colour_names_placeholder() {
        let err = BindError::MissingColour {
            placeholder: "%labelColor",
        };
        assert_eq!(err.to_string(), "no colour for placeholder %labelColor");
    }

    #[test]
    fn json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SchemeError = json_err.into();
        assert!(matches!(err, SchemeError::Json(_)));
    }

    #[test]
    fn config_io_error_names_path() {
        let err = ConfigError::Io {
            path: PathBuf::from("/etc/syscolour.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/etc/syscolour.yaml"));
    }
}
