//! The two OS appearance queries.
//!
//! [`SystemProbe`] is the seam between colour-scheme loading and the
//! processes that answer it: [`ProcessProbe`] spawns the real helper and
//! `defaults`, [`MockProbe`] replays canned answers.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::ProbeError;
use crate::helper::HelperSource;
use crate::os::OsVersion;
use crate::shell::run_captured;

/// How long the colour helper may run.
pub const DEFAULT_SCHEME_TIMEOUT: Duration = Duration::from_secs(5);

/// How long the interface-style lookup may run.
pub const DEFAULT_STYLE_TIMEOUT: Duration = Duration::from_secs(1);

/// Oldest OS release whose appearance API the helper understands.
pub const DEFAULT_MINIMUM_VERSION: OsVersion = OsVersion::new(10, 14);

const STYLE_PROGRAM: &str = "defaults";
const STYLE_ARGS: [&str; 3] = ["read", "-g", "AppleInterfaceStyle"];

/// Source of raw appearance data.
pub trait SystemProbe: Send + Sync {
    /// Runs the colour helper and returns its stdout, expected to be a JSON
    /// colour scheme document.
    fn query_colour_scheme(&self) -> Result<Vec<u8>, ProbeError>;

    /// Reads the global interface style preference (`Dark` when dark mode is
    /// on; unset in light mode).
    fn query_interface_style(&self) -> Result<String, ProbeError>;
}

/// Settings for [`ProcessProbe`] and the OS support check.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub helper: HelperSource,
    /// Where embedded helpers are written. `None` is the system temp dir.
    pub helper_dir: Option<PathBuf>,
    pub scheme_timeout: Duration,
    pub style_timeout: Duration,
    pub minimum_version: OsVersion,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self::new(HelperSource::Path(PathBuf::from("syscolour-helper")))
    }
}

impl ProbeSettings {
    pub fn new(helper: HelperSource) -> Self {
        Self {
            helper,
            helper_dir: None,
            scheme_timeout: DEFAULT_SCHEME_TIMEOUT,
            style_timeout: DEFAULT_STYLE_TIMEOUT,
            minimum_version: DEFAULT_MINIMUM_VERSION,
        }
    }

    pub fn with_helper_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.helper_dir = Some(dir.into());
        self
    }

    pub fn with_scheme_timeout(mut self, timeout: Duration) -> Self {
        self.scheme_timeout = timeout;
        self
    }

    pub fn with_style_timeout(mut self, timeout: Duration) -> Self {
        self.style_timeout = timeout;
        self
    }

    pub fn with_minimum_version(mut self, version: OsVersion) -> Self {
        self.minimum_version = version;
        self
    }
}

/// Answers both queries by spawning processes.
#[derive(Debug, Clone)]
pub struct ProcessProbe {
    helper: HelperSource,
    helper_dir: PathBuf,
    scheme_timeout: Duration,
    style_timeout: Duration,
}

impl ProcessProbe {
    pub fn new(settings: &ProbeSettings) -> Self {
        Self {
            helper: settings.helper.clone(),
            helper_dir: settings
                .helper_dir
                .clone()
                .unwrap_or_else(std::env::temp_dir),
            scheme_timeout: settings.scheme_timeout,
            style_timeout: settings.style_timeout,
        }
    }
}

impl SystemProbe for ProcessProbe {
    fn query_colour_scheme(&self) -> Result<Vec<u8>, ProbeError> {
        // dropped at the end of this call, which deletes a temporary copy
        let helper = self.helper.materialize_in(&self.helper_dir)?;
        let out = run_captured(helper.path(), Vec::<&str>::new(), self.scheme_timeout)?;
        if !out.success() && !out.timed_out() {
            tracing::warn!(status = ?out.status, "colour helper exited unsuccessfully");
        }
        Ok(out.stdout)
    }

    fn query_interface_style(&self) -> Result<String, ProbeError> {
        let out = run_captured(STYLE_PROGRAM, STYLE_ARGS, self.style_timeout)?;
        if let Some(status) = out.status.filter(|status| !status.success()) {
            return Err(ProbeError::CommandFailed(
                format!("{} {}", STYLE_PROGRAM, STYLE_ARGS.join(" ")),
                status,
            ));
        }
        Ok(String::from_utf8(out.stdout)?)
    }
}

/// Canned answers for tests. Counts how often each query is asked.
#[derive(Debug, Default)]
pub struct MockProbe {
    scheme: Option<Vec<u8>>,
    style: Option<String>,
    scheme_calls: AtomicUsize,
    style_calls: AtomicUsize,
}

impl MockProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the helper's stdout.
    pub fn with_scheme(mut self, output: impl Into<Vec<u8>>) -> Self {
        self.scheme = Some(output.into());
        self
    }

    /// Sets the interface-style answer.
    pub fn with_interface_style(mut self, output: impl Into<String>) -> Self {
        self.style = Some(output.into());
        self
    }

    pub fn scheme_calls(&self) -> usize {
        self.scheme_calls.load(Ordering::SeqCst)
    }

    pub fn style_calls(&self) -> usize {
        self.style_calls.load(Ordering::SeqCst)
    }
}

impl SystemProbe for MockProbe {
    fn query_colour_scheme(&self) -> Result<Vec<u8>, ProbeError> {
        self.scheme_calls.fetch_add(1, Ordering::SeqCst);
        self.scheme
            .clone()
            .ok_or(ProbeError::NoResponse("colour scheme"))
    }

    fn query_interface_style(&self) -> Result<String, ProbeError> {
        self.style_calls.fetch_add(1, Ordering::SeqCst);
        self.style
            .clone()
            .ok_or(ProbeError::NoResponse("interface style"))
    }
}
