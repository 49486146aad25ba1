//! End-to-end session runs against real child processes.
//!
//! A scripted `sh -c` producer stands in for the browse tool, so these
//! tests exercise the actual spawn / stream / kill path, including
//! producers that keep running after the batch is complete.

use std::future::pending;
use std::time::{Duration, Instant};

use findr_common::config::SessionConfig;
use findr_core::session::{self, TerminationReason};
use tokio::process::Command;

/// Four banner lines, matching the default header count.
const HEADER_SCRIPT: &str = r"printf 'h1\nh2\nh3\nh4\n'";

fn shell(script: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(script);
    cmd
}

fn config(timeout: Duration) -> SessionConfig {
    SessionConfig {
        timeout,
        ..SessionConfig::default()
    }
}

#[tokio::test]
async fn heuristic_stops_a_live_producer() {
    // The producer keeps running after the batch; only the kill ends it.
    let script = format!(
        r"{HEADER_SCRIPT}; \
        printf '10:00:01.000 Add 3 4 local. _rfb._tcp. Brainbug\n'; \
        printf '10:00:01.001 Add 2 4 local. _rfb._tcp. Tesla\n'; \
        sleep 30"
    );
    let cfg = config(Duration::from_secs(10));

    let start = Instant::now();
    let result = session::run_with(shell(&script), &cfg, pending()).await;

    assert!(
        start.elapsed() < Duration::from_secs(5),
        "session waited on a producer it should have killed"
    );
    assert_eq!(result.reason, TerminationReason::HeuristicSatisfied);
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0].instance_name, "Brainbug");
    assert!(result.records[0].more_coming);
    assert_eq!(result.records[1].instance_name, "Tesla");
    assert!(!result.records[1].more_coming);
}

#[tokio::test]
async fn silent_producer_times_out() {
    let script = format!("{HEADER_SCRIPT}; sleep 30");
    let cfg = config(Duration::from_millis(500));

    let start = Instant::now();
    let result = session::run_with(shell(&script), &cfg, pending()).await;
    let elapsed = start.elapsed();

    assert_eq!(result.reason, TerminationReason::Timeout);
    assert!(result.records.is_empty());
    assert!(elapsed >= Duration::from_millis(400), "timed out early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(3), "timed out late: {elapsed:?}");
}

#[tokio::test]
async fn partial_batch_survives_the_timeout() {
    let script = format!(
        r"{HEADER_SCRIPT}; \
        printf '10:00:01.000 Add 3 4 local. _rfb._tcp. Brainbug\n'; \
        sleep 30"
    );
    let cfg = config(Duration::from_millis(500));

    let result = session::run_with(shell(&script), &cfg, pending()).await;

    assert_eq!(result.reason, TerminationReason::Timeout);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].instance_name, "Brainbug");
}

#[tokio::test]
async fn header_only_stream_closes_without_records() {
    let cfg = config(Duration::from_secs(10));

    let result = session::run_with(shell(HEADER_SCRIPT), &cfg, pending()).await;

    assert_eq!(result.reason, TerminationReason::StreamClosed);
    assert!(result.records.is_empty());
}

#[tokio::test]
async fn missing_binary_is_a_process_error() {
    let cfg = config(Duration::from_secs(1));
    let cmd = Command::new("/definitely/not/a/browse-tool");

    let result = session::run_with(cmd, &cfg, pending()).await;

    assert_eq!(result.reason, TerminationReason::ProcessError);
    assert!(result.records.is_empty());
}

#[tokio::test]
async fn external_shutdown_kills_a_live_producer() {
    // The batch never completes, so only the shutdown signal ends the
    // session; the record gathered before it must survive.
    let script = format!(
        r"{HEADER_SCRIPT}; \
        printf '10:00:01.000 Add 3 4 local. _rfb._tcp. Brainbug\n'; \
        sleep 30"
    );
    let cfg = config(Duration::from_secs(10));
    let shutdown = async {
        tokio::time::sleep(Duration::from_millis(300)).await;
    };

    let start = Instant::now();
    let result = session::run_with(shell(&script), &cfg, shutdown).await;

    assert!(
        start.elapsed() < Duration::from_secs(5),
        "shutdown did not end the session promptly"
    );
    assert_eq!(result.reason, TerminationReason::Interrupted);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].instance_name, "Brainbug");
}

#[tokio::test]
async fn malformed_rows_do_not_abort_the_session() {
    let script = format!(
        r"{HEADER_SCRIPT}; \
        printf '10:00:01.000 Add 3 4 local. _rfb._tcp. Brainbug\n'; \
        printf 'garbled\n'; \
        printf '10:00:01.002 Add 2 4 local. _rfb._tcp. Tesla\n'; \
        sleep 30"
    );
    let cfg = config(Duration::from_secs(10));

    let result = session::run_with(shell(&script), &cfg, pending()).await;

    assert_eq!(result.reason, TerminationReason::HeuristicSatisfied);
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[1].instance_name, "Tesla");
}
