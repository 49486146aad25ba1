//! Construction and supervision of the external browse process.
//!
//! The browse tool is an external collaborator: we invoke it, stream its
//! stdout, and guarantee it is torn down on every exit path. The handle is
//! spawned with `kill_on_drop`, so even a session future that is dropped
//! mid-stream (the whole program being cancelled, say) still takes the
//! child with it.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};
use tracing::debug;

use findr_common::config::SessionConfig;
use findr_common::error::SessionError;

use crate::session::LineSource;

/// Builds the browse invocation: `<command> -B <service-type> <domain>`.
pub fn browse_command(cfg: &SessionConfig) -> Command {
    let mut cmd = Command::new(&cfg.command);
    cmd.arg("-B").arg(&cfg.service_type).arg(&cfg.domain);
    cmd
}

/// A running browse process and its line-buffered stdout.
pub struct BrowseChild {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
}

impl BrowseChild {
    /// Spawns `cmd` with piped stdout.
    pub fn spawn(mut cmd: Command) -> Result<Self, SessionError> {
        let command = cmd.as_std().get_program().to_string_lossy().into_owned();

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .map_err(|source| SessionError::Spawn { command, source })?;

        let stdout = child.stdout.take().ok_or(SessionError::MissingStdout)?;
        let lines = BufReader::new(stdout).lines();

        Ok(Self { child, lines })
    }

    /// Terminates and reaps the child.
    ///
    /// Runs exactly once per session. A child that already exited is not an
    /// error; nothing here may stand between the caller and its results.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.child.start_kill() {
            debug!("browse process already gone: {e}");
        }
        if let Err(e) = self.child.wait().await {
            debug!("failed to reap browse process: {e}");
        }
    }
}

#[async_trait]
impl LineSource for BrowseChild {
    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.lines.next_line().await
    }
}
