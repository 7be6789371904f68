//! Foreground-app poller use case

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::domain::foreground::{decide, PollDecision};

use super::ports::ForegroundInspector;

/// Recurring foreground poll.
///
/// Every tick takes a foreground snapshot, combines it with the current
/// overlay visibility, and dispatches the resulting decision over the
/// channel so all overlay mutations happen on the task that owns the
/// overlay. Ticks where the inspector fails are skipped.
pub struct ForegroundPoller;

/// Handle to a running poller. Stopping is idempotent.
pub struct PollerHandle {
    stopped: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl ForegroundPoller {
    /// Spawn the poll loop.
    ///
    /// `visible` is the overlay's showing flag, written by the overlay
    /// owner and only read here.
    pub fn spawn<I>(
        inspector: Arc<I>,
        period: Duration,
        visible: Arc<AtomicBool>,
        tx: mpsc::Sender<PollDecision>,
    ) -> PollerHandle
    where
        I: ForegroundInspector + 'static,
    {
        let stopped = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stopped);

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            loop {
                ticker.tick().await;
                if stop_flag.load(Ordering::SeqCst) {
                    break;
                }

                let snapshot = match inspector.snapshot().await {
                    Ok(snapshot) => snapshot,
                    Err(_) => continue,
                };

                let decision = decide(snapshot.is_home, visible.load(Ordering::SeqCst));
                if decision == PollDecision::Ignore {
                    continue;
                }
                if tx.send(decision).await.is_err() {
                    // Receiver gone: the service is shutting down.
                    break;
                }
            }
        });

        PollerHandle { stopped, task }
    }
}

impl PollerHandle {
    /// Stop the poller. Returns true the first time, false on repeat
    /// calls; stopping twice is a defined no-op.
    pub fn stop(&self) -> bool {
        !self.stopped.swap(true, Ordering::SeqCst)
    }

    /// Check whether the poller has been asked to stop
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Wait for the poll loop to wind down after `stop`
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::ForegroundError;
    use crate::domain::foreground::ForegroundSnapshot;
    use async_trait::async_trait;
    use tokio::time::timeout;

    struct ScriptedInspector {
        is_home: AtomicBool,
        fail: AtomicBool,
    }

    impl ScriptedInspector {
        fn new(is_home: bool) -> Self {
            Self {
                is_home: AtomicBool::new(is_home),
                fail: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl ForegroundInspector for ScriptedInspector {
        async fn snapshot(&self) -> Result<ForegroundSnapshot, ForegroundError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(ForegroundError::QueryFailed("scripted".to_string()));
            }
            Ok(ForegroundSnapshot::new(
                "scripted",
                self.is_home.load(Ordering::SeqCst),
            ))
        }
    }

    const TICK: Duration = Duration::from_millis(10);
    const WAIT: Duration = Duration::from_secs(2);

    #[tokio::test]
    async fn dispatches_show_when_home_and_hidden() {
        let inspector = Arc::new(ScriptedInspector::new(true));
        let visible = Arc::new(AtomicBool::new(false));
        let (tx, mut rx) = mpsc::channel(8);

        let handle = ForegroundPoller::spawn(inspector, TICK, visible, tx);
        let decision = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(decision, PollDecision::Show);

        handle.stop();
        handle.join().await;
    }

    #[tokio::test]
    async fn dispatches_hide_when_foreground_leaves_home() {
        let inspector = Arc::new(ScriptedInspector::new(false));
        let visible = Arc::new(AtomicBool::new(true));
        let (tx, mut rx) = mpsc::channel(8);

        let handle = ForegroundPoller::spawn(inspector, TICK, visible, tx);
        let decision = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(decision, PollDecision::Hide);

        handle.stop();
        handle.join().await;
    }

    #[tokio::test]
    async fn dispatches_refresh_when_home_and_visible() {
        let inspector = Arc::new(ScriptedInspector::new(true));
        let visible = Arc::new(AtomicBool::new(true));
        let (tx, mut rx) = mpsc::channel(8);

        let handle = ForegroundPoller::spawn(inspector, TICK, visible, tx);
        let decision = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(decision, PollDecision::Refresh);

        handle.stop();
        handle.join().await;
    }

    #[tokio::test]
    async fn inspector_failures_skip_the_tick() {
        let inspector = Arc::new(ScriptedInspector::new(true));
        inspector.fail.store(true, Ordering::SeqCst);
        let visible = Arc::new(AtomicBool::new(false));
        let (tx, mut rx) = mpsc::channel(8);

        let handle = ForegroundPoller::spawn(Arc::clone(&inspector), TICK, visible, tx);

        // Nothing arrives while the inspector is failing.
        assert!(timeout(Duration::from_millis(100), rx.recv()).await.is_err());

        // First healthy tick produces a decision again.
        inspector.fail.store(false, Ordering::SeqCst);
        let decision = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(decision, PollDecision::Show);

        handle.stop();
        handle.join().await;
    }

    #[tokio::test]
    async fn stop_is_idempotent() {
        let inspector = Arc::new(ScriptedInspector::new(false));
        let visible = Arc::new(AtomicBool::new(false));
        let (tx, _rx) = mpsc::channel(8);

        let handle = ForegroundPoller::spawn(inspector, TICK, visible, tx);
        assert!(handle.stop());
        assert!(!handle.stop());
        assert!(handle.is_stopped());
        handle.join().await;
    }
}
