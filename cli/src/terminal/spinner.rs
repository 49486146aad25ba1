use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use findr_common::config::SessionConfig;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Starts the browse activity spinner on stderr.
///
/// The caller clears it with `finish_and_clear` once the session returns.
pub fn start(cfg: &SessionConfig) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap()
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    pb.set_style(style);
    pb.enable_steady_tick(TICK_INTERVAL);
    pb.set_message(format!(
        "Browsing for {}...",
        cfg.service_type.as_str().bold()
    ));

    pb
}
