use thiserror::Error;

/// Failures a discovery session can surface.
///
/// Only a failed spawn is fatal: everything else a browse stream can throw
/// at us (garbled rows, an early close, a child that refuses to die) is
/// absorbed into the session outcome, because partial results are still
/// worth reporting.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to start browse process '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("browse process started without a stdout handle")]
    MissingStdout,
}
