//! Warning sink used by the cursor

use tracing::warn;

/// Receives warnings raised while selecting files to sync
pub trait SyncLogger: Send + Sync {
    fn warning(&self, message: &str);
}

/// Forwards warnings to `tracing`, tagged with the stream name
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    stream: String,
}

impl TracingLogger {
    pub fn new(stream: impl Into<String>) -> Self {
        Self {
            stream: stream.into(),
        }
    }
}

impl SyncLogger for TracingLogger {
    fn warning(&self, message: &str) {
        warn!(stream = %self.stream, "{message}");
    }
}
