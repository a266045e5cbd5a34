//! Application service: best-effort staging log copy.
//!
//! The copy is a future the start use-case drives alongside instance polling,
//! so neither opening nor reading the log can hold polling up. Open and read
//! failures are traced and otherwise dropped.

use std::future::Future;
use std::time::Duration;

use futures_util::StreamExt as _;
use tracing::debug;

use crate::application::ports::{StagingLogRepository, StartReporter};

/// Open the staging log at `log_url` and copy it to `reporter` until it ends.
///
/// Resolves once the stream is exhausted, fails, or could not be opened.
pub async fn follow<R>(logs: &impl StagingLogRepository, log_url: &str, reporter: &R)
where
    R: StartReporter + ?Sized,
{
    let mut stream = match logs.stream_log(log_url).await {
        Ok(stream) => stream,
        Err(err) => {
            debug!(log_url, error = %err, "staging log unavailable");
            return;
        }
    };
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => reporter.log(&bytes),
            Err(err) => {
                debug!(error = %err, "staging log stream interrupted");
                break;
            }
        }
    }
}

/// Drive a log copy for at most `grace`, then drop it.
///
/// Returns `true` if the copy finished in time.
pub async fn settle(copy: impl Future<Output = ()>, grace: Duration) -> bool {
    let finished = tokio::time::timeout(grace, copy).await.is_ok();
    if !finished {
        debug!("staging log still streaming, giving up on it");
    }
    finished
}
