pub mod browse;

use std::time::Duration;

use clap::Parser;
use findr_common::config::{
    DEFAULT_COMMAND, DEFAULT_DOMAIN, DEFAULT_HEADER_LINES, DEFAULT_SERVICE_TYPE,
    DEFAULT_TIMEOUT_MS, SessionConfig,
};

#[derive(Parser)]
#[command(name = "findr")]
#[command(about = "A bounded mDNS service discovery tool.")]
pub struct CommandLine {
    /// Service type to browse for
    #[arg(short = 't', long, default_value = DEFAULT_SERVICE_TYPE)]
    pub service_type: String,

    /// Browse domain
    #[arg(short, long, default_value = DEFAULT_DOMAIN)]
    pub domain: String,

    /// Hard session window in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Banner lines the browse tool prints before the first data row
    #[arg(long, default_value_t = DEFAULT_HEADER_LINES)]
    pub header_lines: usize,

    /// External browse binary
    #[arg(long, default_value = DEFAULT_COMMAND)]
    pub command: String,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn into_config(self) -> SessionConfig {
        SessionConfig {
            service_type: self.service_type,
            domain: self.domain,
            timeout: Duration::from_millis(self.timeout_ms),
            header_lines: self.header_lines,
            command: self.command,
        }
    }
}
