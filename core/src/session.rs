//! # Bounded Discovery Session
//!
//! The state machine tying discovery together: spawn the browse process,
//! stream its stdout line by line, stop the moment the termination
//! heuristic fires, race everything against a hard timeout, and always
//! tear the child down before handing back whatever was collected.
//!
//! The browse tool has no end-of-batch marker. It streams the batch of
//! currently known instances with the more-coming flag set on all but the
//! last, then may go silent forever, so "done" has to be inferred from the
//! flag transitioning and the timeout is the only guaranteed way out.

use std::future::Future;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, info};

use findr_common::config::SessionConfig;
use findr_common::record::{self, DiscoveryRecord, ParsedLine};

use crate::browse::{self, BrowseChild};

/// Why a session stopped consuming the stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminationReason {
    /// A record without the more-coming flag arrived; the batch is complete.
    HeuristicSatisfied,
    /// The watchdog fired before the heuristic did.
    Timeout,
    /// The child closed its stdout (it exited or was killed externally).
    StreamClosed,
    /// The browse process could not be started.
    ProcessError,
    /// The surrounding program asked the session to shut down.
    Interrupted,
}

/// The single outcome of one session.
///
/// Produced exactly once, on every termination path. `records` preserves
/// the order in which lines were received and is frozen from here on.
#[derive(Debug)]
pub struct SessionResult {
    pub records: Vec<DiscoveryRecord>,
    pub reason: TerminationReason,
}

impl SessionResult {
    fn empty(reason: TerminationReason) -> Self {
        Self {
            records: Vec::new(),
            reason,
        }
    }
}

/// One line of raw browse output at a time; `Ok(None)` means the stream
/// closed.
#[async_trait]
pub trait LineSource {
    async fn next_line(&mut self) -> std::io::Result<Option<String>>;
}

/// Runs one bounded session with the configured browse invocation.
///
/// `shutdown` is the external cancellation signal (the CLI passes ctrl-c);
/// when it resolves the session drains and still returns its partial
/// results. A failed spawn is reported, not retried.
pub async fn run(cfg: &SessionConfig, shutdown: impl Future<Output = ()>) -> SessionResult {
    run_with(browse::browse_command(cfg), cfg, shutdown).await
}

/// Runs one bounded session around an explicit browse command.
///
/// Split out from [`run`] so callers (and the integration tests) can
/// substitute the producer without touching the session logic.
pub async fn run_with(
    cmd: Command,
    cfg: &SessionConfig,
    shutdown: impl Future<Output = ()>,
) -> SessionResult {
    let mut child = match BrowseChild::spawn(cmd) {
        Ok(child) => child,
        Err(e) => {
            error!("{e}");
            return SessionResult::empty(TerminationReason::ProcessError);
        }
    };

    info!("browsing for {} in {}", cfg.service_type, cfg.domain);

    let (records, reason) = consume_stream(&mut child, cfg, shutdown).await;
    child.shutdown().await;

    SessionResult { records, reason }
}

/// The streaming loop.
///
/// Blocks on whichever of "next line ready", "deadline elapsed" or
/// "shutdown requested" happens first; there is no other suspension point
/// and no polling. The buffer is owned here alone and only ever appended
/// to.
async fn consume_stream<S: LineSource>(
    source: &mut S,
    cfg: &SessionConfig,
    shutdown: impl Future<Output = ()>,
) -> (Vec<DiscoveryRecord>, TerminationReason) {
    let deadline = tokio::time::sleep(cfg.timeout);
    tokio::pin!(deadline);
    tokio::pin!(shutdown);

    let mut records: Vec<DiscoveryRecord> = Vec::new();
    let mut line_index: usize = 0;

    let reason = loop {
        tokio::select! {
            line = source.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        consume_line(&line, line_index, cfg, &mut records);
                        line_index += 1;
                        // Checked after the append, so the record that ends
                        // the batch is always kept.
                        if should_stop(&records) {
                            break TerminationReason::HeuristicSatisfied;
                        }
                    }
                    Ok(None) => break TerminationReason::StreamClosed,
                    Err(e) => {
                        debug!("browse stream read failed: {e}");
                        break TerminationReason::StreamClosed;
                    }
                }
            }

            _ = &mut deadline => {
                break TerminationReason::Timeout;
            }

            _ = &mut shutdown => {
                break TerminationReason::Interrupted;
            }
        }
    };

    (records, reason)
}

fn consume_line(
    line: &str,
    index: usize,
    cfg: &SessionConfig,
    records: &mut Vec<DiscoveryRecord>,
) {
    match record::parse_line(line, index, cfg.header_lines) {
        ParsedLine::Record(record) => records.push(record),
        ParsedLine::Skip => {}
        ParsedLine::Malformed => debug!("skipping malformed browse line: {line:?}"),
    }
}

/// The termination heuristic: the most recent record closing its batch
/// means no further results should be expected. Never fires before the
/// first record arrives.
fn should_stop(records: &[DiscoveryRecord]) -> bool {
    records.last().is_some_and(|record| !record.more_coming)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
