//! Scheduler for repeating crawl passes
//!
//! Passes run one after another on a single task, separated by a fixed
//! pause. A stop request is honoured only between passes: a running pass
//! always finishes first.

use crate::crawler::Coordinator;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Requests the scheduler loop to stop
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }
}

/// Outcome of a scheduler run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleSummary {
    pub completed: u32,
    pub aborted: u32,
}

impl ScheduleSummary {
    pub fn total(&self) -> u32 {
        self.completed + self.aborted
    }
}

/// Drives a [`Coordinator`] in a pass / pause loop
pub struct Scheduler {
    coordinator: Coordinator,
    pause: Duration,
    stop_tx: Arc<watch::Sender<bool>>,
    stop_rx: watch::Receiver<bool>,
}

impl Scheduler {
    pub fn new(coordinator: Coordinator, pause: Duration) -> Self {
        let (stop_tx, stop_rx) = watch::channel(false);
        Self {
            coordinator,
            pause,
            stop_tx: Arc::new(stop_tx),
            stop_rx,
        }
    }

    /// Handle that stops the loop before its next pass
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            tx: self.stop_tx.clone(),
        }
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    fn stop_requested(&self) -> bool {
        *self.stop_rx.borrow()
    }

    /// Runs passes until stopped, or until `max_passes` passes have run
    ///
    /// An aborted pass is logged and the loop carries on after the usual
    /// pause; there is no backoff.
    pub async fn run(&mut self, max_passes: Option<u32>) -> ScheduleSummary {
        let mut summary = ScheduleSummary::default();

        loop {
            if self.stop_requested() {
                tracing::info!("Stop requested, not starting another pass");
                break;
            }

            tracing::info!("Crawler pass {} starting", summary.total() + 1);
            match self.coordinator.run_pass().await {
                Ok(stats) => {
                    stats.log_summary();
                    summary.completed += 1;
                }
                Err(e) => {
                    tracing::error!("Crawler pass aborted: {}", e);
                    summary.aborted += 1;
                }
            }
            tracing::info!("Crawler pass {} ended", summary.total());

            if max_passes.is_some_and(|max| summary.total() >= max) {
                break;
            }

            tracing::debug!("Sleeping {:?} before next pass", self.pause);
            tokio::select! {
                _ = tokio::time::sleep(self.pause) => {}
                _ = self.stop_rx.changed() => {}
            }
        }

        summary
    }
}
