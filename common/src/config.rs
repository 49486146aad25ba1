//! # Session Configuration
//!
//! Query parameters for one discovery session.
//!
//! The defaults reproduce the classic invocation (`dns-sd -B _rfb._tcp local.`
//! with a hard five second window); every field can be overridden from the
//! command line.

use std::time::Duration;

/// Service type queried when none is given.
pub const DEFAULT_SERVICE_TYPE: &str = "_rfb._tcp";

/// Browse domain queried when none is given.
pub const DEFAULT_DOMAIN: &str = "local.";

/// Hard session window in milliseconds when none is given.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Number of banner lines the browse tool prints before the first data row.
pub const DEFAULT_HEADER_LINES: usize = 4;

/// External browse binary invoked when none is given.
pub const DEFAULT_COMMAND: &str = "dns-sd";

#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// mDNS service type to browse for, e.g. `_rfb._tcp`.
    pub service_type: String,
    /// Browse domain, e.g. `local.`.
    pub domain: String,
    /// Hard upper bound on how long the session may run.
    ///
    /// The browse tool never emits an end-of-batch marker, so this is the
    /// only guaranteed termination signal.
    pub timeout: Duration,
    /// Leading non-data lines discarded without field inspection.
    pub header_lines: usize,
    /// The external browse binary.
    pub command: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            service_type: DEFAULT_SERVICE_TYPE.to_string(),
            domain: DEFAULT_DOMAIN.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            header_lines: DEFAULT_HEADER_LINES,
            command: DEFAULT_COMMAND.to_string(),
        }
    }
}
