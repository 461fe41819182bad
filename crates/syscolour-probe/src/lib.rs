//! OS appearance queries for `syscolour`.
//!
//! This crate holds the process plumbing behind live colour-scheme loading:
//!
//! - [`SystemProbe`]: runs the colour helper and the interface-style lookup
//! - [`OsInfo`]: reports the OS name and version for the support check
//! - [`run_captured`]: a bounded-wait subprocess runner
//!
//! Both traits have mock implementations ([`MockProbe`], [`MockOs`]) so code
//! built on them can be tested without spawning anything.

mod error;
pub mod helper;
pub mod os;
pub mod probe;
pub mod shell;

pub use error::ProbeError;
pub use helper::{HelperGuard, HelperSource};
pub use os::{MockOs, OsInfo, OsVersion, RealOs};
pub use probe::{
    MockProbe, ProbeSettings, ProcessProbe, SystemProbe, DEFAULT_MINIMUM_VERSION,
    DEFAULT_SCHEME_TIMEOUT, DEFAULT_STYLE_TIMEOUT,
};
pub use shell::{run_captured, Captured};
