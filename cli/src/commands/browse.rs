use std::time::{Duration, Instant};

use colored::*;
use tracing::{debug, info};

use crate::terminal::{print, spinner};
use findr_common::config::SessionConfig;
use findr_common::record::DiscoveryRecord;
use findr_core::session::{self, SessionResult, TerminationReason};

/// Runs one discovery session and reports whatever it gathered.
///
/// Discovered records go to stdout in a stable one-per-line form;
/// everything decorative (header, spinner, log lines) stays on stderr.
/// Every completion path exits 0 except a browse process that could not
/// be started.
pub async fn browse(cfg: SessionConfig) -> anyhow::Result<()> {
    print::header(&format!("browsing {} in {}", cfg.service_type, cfg.domain));

    let progress = spinner::start(&cfg);
    let start_time: Instant = Instant::now();

    let result = session::run(&cfg, shutdown_signal()).await;

    progress.finish_and_clear();
    session_ends(&result, start_time.elapsed());

    if result.reason == TerminationReason::ProcessError {
        anyhow::bail!("the browse process could not be started");
    }
    Ok(())
}

/// External cancellation source for the session: ctrl-c.
///
/// If the handler cannot be installed the watchdog still bounds the
/// session, so this degrades to never resolving.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        debug!("could not listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}

fn session_ends(result: &SessionResult, total_time: Duration) {
    if result.records.is_empty() {
        println!("{}", no_hosts_line(result.reason));
    } else {
        for record in &result.records {
            println!("{}", render_record(record));
        }
        println!("{}", summary_line(result.records.len()).bold().green());
    }

    info!(
        "session over after {:.2}s ({:?})",
        total_time.as_secs_f64(),
        result.reason
    );
}

/// One stable, parseable line per record.
fn render_record(record: &DiscoveryRecord) -> String {
    format!(
        "{} {} {} {} {}",
        record.change_type,
        record.interface_index,
        record.domain,
        record.service_type,
        record.instance_name
    )
}

fn summary_line(count: usize) -> String {
    format!("{count} host(s) found.")
}

fn no_hosts_line(reason: TerminationReason) -> &'static str {
    match reason {
        TerminationReason::HeuristicSatisfied => "No hosts found.",
        TerminationReason::Timeout => "No hosts found before the timeout expired.",
        TerminationReason::StreamClosed => "The browse stream ended without reporting any hosts.",
        TerminationReason::ProcessError => "No hosts found; the browse process could not be started.",
        TerminationReason::Interrupted => "Interrupted before any hosts were found.",
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
