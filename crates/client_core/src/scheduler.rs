//! One-shot and periodic timer tasks that stop when their handle is cancelled or dropped.

use std::{future::Future, time::Duration};

use tokio::{
    runtime::{Handle, TryCurrentError},
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Scheduler {
    runtime: Handle,
}

impl Scheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Binds to the runtime driving the caller.
    pub fn from_current() -> Result<Self, TryCurrentError> {
        Handle::try_current().map(Self::new)
    }

    pub fn once<F>(&self, name: &'static str, delay: Duration, task: F) -> ScheduledTask
    where
        F: FnOnce() + Send + 'static,
    {
        let (alive, done) = watch::channel(());
        let handle = self.runtime.spawn(async move {
            let _alive = alive;
            time::sleep(delay).await;
            debug!(task = name, "scheduled task firing");
            task();
        });
        ScheduledTask::new(name, handle, done)
    }

    /// Runs `task` every `period`; the first run happens one full period after scheduling.
    pub fn every<F>(&self, name: &'static str, period: Duration, mut task: F) -> ScheduledTask
    where
        F: FnMut() + Send + 'static,
    {
        let (alive, done) = watch::channel(());
        let handle = self.runtime.spawn(async move {
            let _alive = alive;
            let mut ticker = time::interval_at(time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                task();
            }
        });
        ScheduledTask::new(name, handle, done)
    }
}

/// Handle to a scheduled task. Dropping it cancels the task.
#[derive(Debug)]
pub struct ScheduledTask {
    name: &'static str,
    handle: Option<JoinHandle<()>>,
    // Closed when the task body is dropped, whether it ran or was aborted.
    done: watch::Receiver<()>,
}

impl ScheduledTask {
    fn new(name: &'static str, handle: JoinHandle<()>, done: watch::Receiver<()>) -> Self {
        Self {
            name,
            handle: Some(handle),
            done,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn cancel(&self) {
        if let Some(handle) = &self.handle {
            if !handle.is_finished() {
                debug!(task = self.name, "cancelling scheduled task");
            }
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map(JoinHandle::is_finished)
            .unwrap_or(true)
    }

    /// Resolves once the task has run or was cancelled. Unlike [`ScheduledTask::join`]
    /// this leaves the handle in place, so the task can still be cancelled meanwhile.
    pub fn completion(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut done = self.done.clone();
        async move { while done.changed().await.is_ok() {} }
    }

    /// Waits until the task has run or was cancelled.
    pub async fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
