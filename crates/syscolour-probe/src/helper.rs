//! The colour-reporting helper executable.
//!
//! Applications either ship the helper inside their own binary (its bytes are
//! written to a temporary executable for each query) or point at an installed
//! copy on disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

use crate::error::ProbeError;

/// Where the colour-reporting helper comes from.
#[derive(Debug, Clone)]
pub enum HelperSource {
    /// Helper bytes compiled into the application, e.g. via `include_bytes!`.
    Embedded(&'static [u8]),
    /// An executable already present on disk.
    Path(PathBuf),
}

impl HelperSource {
    /// Makes the helper runnable and returns a guard holding its location.
    ///
    /// Embedded helpers are written to a uniquely named temporary file marked
    /// executable. The file is closed before this returns and removed when
    /// the guard drops.
    pub fn materialize(&self) -> Result<HelperGuard, ProbeError> {
        self.materialize_in(&std::env::temp_dir())
    }

    /// Like [`materialize`](Self::materialize), writing temporary copies to `dir`.
    pub fn materialize_in(&self, dir: &Path) -> Result<HelperGuard, ProbeError> {
        match self {
            HelperSource::Path(path) => Ok(HelperGuard::InPlace(path.clone())),
            HelperSource::Embedded(bytes) => {
                let mut file = tempfile::Builder::new()
                    .prefix("syscolour-helper-")
                    .tempfile_in(dir)
                    .map_err(ProbeError::Materialize)?;
                file.write_all(bytes).map_err(ProbeError::Materialize)?;
                file.flush().map_err(ProbeError::Materialize)?;
                make_executable(file.path())?;

                let path = file.into_temp_path();
                tracing::debug!(path = %path.display(), bytes = bytes.len(), "materialized helper");
                Ok(HelperGuard::Temporary(path))
            }
        }
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), ProbeError> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(ProbeError::Materialize)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), ProbeError> {
    Ok(())
}

/// A runnable helper. Temporary copies are deleted on drop.
#[derive(Debug)]
pub enum HelperGuard {
    Temporary(TempPath),
    InPlace(PathBuf),
}

impl HelperGuard {
    pub fn path(&self) -> &Path {
        match self {
            HelperGuard::Temporary(path) => path,
            HelperGuard::InPlace(path) => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_source_runs_in_place() {
        let source = HelperSource::Path(PathBuf::from("/opt/helper"));
        let guard = source.materialize().unwrap();
        assert_eq!(guard.path(), Path::new("/opt/helper"));
    }

    #[test]
    fn embedded_source_is_removed_on_drop() {
        let source = HelperSource::Embedded(b"#!/bin/sh\necho hi\n");
        let guard = source.materialize().unwrap();
        let path = guard.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"#!/bin/sh\necho hi\n");

        drop(guard);
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn embedded_source_is_executable() {
        use crate::shell::run_captured;
        use std::os::unix::fs::PermissionsExt;
        use std::time::Duration;

        let source = HelperSource::Embedded(b"#!/bin/sh\necho '{\"labelColor\":\"nil\"}'\n");
        let guard = source.materialize().unwrap();
        let mode = std::fs::metadata(guard.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);

        let out = run_captured(guard.path(), Vec::<&str>::new(), Duration::from_secs(5)).unwrap();
        assert_eq!(
            String::from_utf8(out.stdout).unwrap().trim(),
            r#"{"labelColor":"nil"}"#
        );
    }
}
