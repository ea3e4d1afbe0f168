//! Profile submission as a cancellable future.
//!
//! The app builds the task synchronously while handling a key press; the
//! event loop then spawns it and feeds the outcome back through a channel.

use crate::domain::{ProviderResult, SubmitOutcome};
use futures::future::{AbortHandle, Abortable, Aborted, BoxFuture};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

/// A provider submission that can be aborted through its [`AbortHandle`].
pub type SubmitTask = Abortable<BoxFuture<'static, ProviderResult<()>>>;

/// Submission started by the app but not yet finished.
pub(crate) struct PendingSubmit {
    pub(crate) handle: AbortHandle,
    /// Present until the event loop takes it to spawn.
    pub(crate) task: Option<SubmitTask>,
}

impl PendingSubmit {
    pub(crate) fn new(future: BoxFuture<'static, ProviderResult<()>>) -> Self {
        let (handle, registration) = AbortHandle::new_pair();
        Self {
            handle,
            task: Some(Abortable::new(future, registration)),
        }
    }
}

/// Awaits a submission and folds its result into a [`SubmitOutcome`].
pub async fn drive_submit(task: SubmitTask) -> SubmitOutcome {
    match task.await {
        Ok(Ok(())) => SubmitOutcome::Succeeded,
        Ok(Err(err)) => SubmitOutcome::Failed(err.to_string()),
        Err(Aborted) => SubmitOutcome::Cancelled,
    }
}

/// Spawns a submission on the current runtime and reports its outcome on `outcomes`.
pub fn spawn_submit(task: SubmitTask, outcomes: UnboundedSender<SubmitOutcome>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = drive_submit(task).await;
        if outcomes.send(outcome).is_err() {
            debug!("submission finished after the event loop stopped");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProviderError;
    use futures::future::FutureExt;
    use std::time::Duration;

    #[tokio::test]
    async fn test_drive_submit_success() {
        let mut pending = PendingSubmit::new(async { Ok(()) }.boxed());
        let task = pending.task.take().unwrap();
        assert_eq!(drive_submit(task).await, SubmitOutcome::Succeeded);
    }

    #[tokio::test]
    async fn test_drive_submit_failure() {
        let mut pending =
            PendingSubmit::new(async { Err(ProviderError::Rejected("quota".to_string())) }.boxed());
        let task = pending.task.take().unwrap();
        assert_eq!(
            drive_submit(task).await,
            SubmitOutcome::Failed("Submission rejected: quota".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_cancels_pending_submit() {
        let mut pending = PendingSubmit::new(
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            }
            .boxed(),
        );
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let join = spawn_submit(pending.task.take().unwrap(), tx);

        pending.handle.abort();
        join.await.unwrap();
        assert_eq!(rx.recv().await, Some(SubmitOutcome::Cancelled));
    }
}
