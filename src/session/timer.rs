use std::future::Future;
use tokio::task::JoinHandle;
use tracing::debug;

/// Handle to the one scheduled reveal of the current round
///
/// Arming aborts whatever was armed before, so at most one timer task is
/// alive at a time. Dropping the handle aborts the task.
#[derive(Debug, Default)]
pub struct DeadlineTimer {
    handle: Option<(u64, JoinHandle<()>)>,
}

impl DeadlineTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `task` as the timer for `round`, cancelling any previous one
    pub fn arm<F>(&mut self, round: u64, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        debug!(round, "Arming deadline timer");
        self.handle = Some((round, tokio::spawn(task)));
    }

    /// Abort the armed task, if any. Must be called while holding the
    /// session lock so the task cannot be mid-transition.
    pub fn cancel(&mut self) {
        if let Some((round, handle)) = self.handle.take() {
            debug!(round, finished = handle.is_finished(), "Cancelling deadline timer");
            handle.abort();
        }
    }

    /// Forget the handle without aborting. Called by the timer task itself
    /// once it fires, so finishing the round does not cancel the caller.
    pub fn detach(&mut self, round: u64) {
        if matches!(&self.handle, Some((armed, _)) if *armed == round) {
            self.handle = None;
        }
    }

    /// Round of the currently armed task, if it has not finished yet
    pub fn armed_round(&self) -> Option<u64> {
        self.handle
            .as_ref()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(round, _)| *round)
    }
}

impl Drop for DeadlineTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
