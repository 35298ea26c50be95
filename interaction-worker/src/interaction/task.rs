use crate::Error;
use futures::future::BoxFuture;
use model::Snowflake;
use std::future::Future;
use tokio::task::JoinHandle;
use tracing::{debug, error, info_span, Instrument};

/// Work queued by a command to run after the acknowledgement has been produced.
pub struct BackgroundTask {
    command: Box<str>,
    interaction_id: Snowflake,
    future: BoxFuture<'static, Result<(), Error>>,
}

impl BackgroundTask {
    pub fn new<F>(command: &str, interaction_id: Snowflake, future: F) -> BackgroundTask
    where
        F: Future<Output = Result<(), Error>> + Send + 'static,
    {
        BackgroundTask {
            command: Box::from(command),
            interaction_id,
            future: Box::pin(future),
        }
    }

    /// Detaches the task. Failures cannot affect the acknowledgement, so they are logged.
    pub fn spawn(self) -> JoinHandle<()> {
        let span = info_span!(
            "background_task",
            command = %self.command,
            interaction_id = %self.interaction_id
        );

        tokio::spawn(
            async move {
                match self.future.await {
                    Ok(()) => debug!("Background task finished"),
                    Err(e) => error!(error = %e, "Background task failed"),
                }
            }
            .instrument(span),
        )
    }
}
