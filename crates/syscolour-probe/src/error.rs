//! Error types for OS queries.

/// Errors raised while running an OS query subprocess.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The bundled helper could not be written out as an executable file.
    #[error("Failed to materialize helper executable: {0}")]
    Materialize(#[source] std::io::Error),

    #[error("Command `{0}` failed with status {1}")]
    CommandFailed(String, std::process::ExitStatus),

    #[error("Command output was not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A mock was asked for an answer it was not given.
    #[error("No response configured for {0}")]
    NoResponse(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_response_display_names_query() {
        let err = ProbeError::NoResponse("interface style");
        assert!(err.to_string().contains("interface style"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ProbeError = io_err.into();
        assert!(matches!(err, ProbeError::Io(_)));
    }
}
