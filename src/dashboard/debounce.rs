//! Debounced filter dispatcher.
//!
//! Raw filter input is pushed on every keystroke; a committed value is emitted
//! on the returned channel only once no further input arrived for the quiet
//! period. Each push cancels the armed timer and re-arms a new one.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Quiet period applied to filter input unless configured otherwise.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebounceState {
    /// No emission is pending.
    Idle,
    /// A timer is armed and will emit unless superseded or cancelled.
    Pending,
}

struct ArmedTimer {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ArmedTimer {
    fn disarm(self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

/// Coalesces rapid updates into a single delayed commit.
///
/// Must be used from within a tokio runtime. Dropping the debouncer cancels
/// any pending emission.
pub struct Debouncer<T> {
    quiet: Duration,
    sender: mpsc::UnboundedSender<T>,
    armed: Option<ArmedTimer>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer and the receiver on which committed values arrive.
    pub fn new(quiet: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                quiet,
                sender,
                armed: None,
            },
            receiver,
        )
    }

    /// Records a raw update, restarting the quiet period.
    pub fn push(&mut self, raw: T) {
        self.cancel();

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let sender = self.sender.clone();
        let quiet = self.quiet;

        let task = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(quiet) => {
                    // The token may have fired while this task waited to be polled.
                    if token.is_cancelled() {
                        return;
                    }
                    if sender.send(raw).is_err() {
                        log::debug!("Debounced value dropped: receiver is gone");
                    }
                }
            }
        });

        self.armed = Some(ArmedTimer { cancel, task });
    }

    /// Cancels the pending emission, if any.
    pub fn cancel(&mut self) {
        if let Some(armed) = self.armed.take() {
            armed.disarm();
        }
    }

    pub fn state(&self) -> DebounceState {
        match &self.armed {
            Some(armed) if !armed.task.is_finished() => DebounceState::Pending,
            _ => DebounceState::Idle,
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(armed) = self.armed.take() {
            armed.disarm();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::error::TryRecvError;

    #[tokio::test(start_paused = true)]
    async fn rapid_updates_commit_once_with_the_last_value() {
        let (mut debouncer, mut committed) = Debouncer::new(Duration::from_millis(500));

        for value in 1..=5 {
            debouncer.push(value);
            assert_eq!(debouncer.state(), DebounceState::Pending);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(committed.recv().await, Some(5));
        assert_eq!(committed.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(debouncer.state(), DebounceState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn separated_updates_commit_individually() {
        let (mut debouncer, mut committed) = Debouncer::new(Duration::from_millis(500));

        debouncer.push("a");
        tokio::time::sleep(Duration::from_millis(700)).await;
        debouncer.push("b");
        tokio::time::sleep(Duration::from_millis(700)).await;

        assert_eq!(committed.recv().await, Some("a"));
        assert_eq!(committed.recv().await, Some("b"));
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_suppresses_pending_emission() {
        let (mut debouncer, mut committed) = Debouncer::new(Duration::from_millis(500));

        debouncer.push(42);
        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(debouncer);
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(committed.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_at_the_deadline_emits_nothing() {
        for _ in 0..50 {
            let (mut debouncer, mut committed) = Debouncer::new(Duration::from_millis(500));

            debouncer.push(42);
            tokio::time::sleep(Duration::from_millis(500)).await;
            assert_eq!(committed.try_recv(), Err(TryRecvError::Empty));

            drop(debouncer);
            tokio::time::sleep(Duration::from_millis(10)).await;

            assert!(committed.try_recv().is_err());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn push_at_the_deadline_supersedes_the_armed_value() {
        for _ in 0..50 {
            let (mut debouncer, mut committed) = Debouncer::new(Duration::from_millis(500));

            debouncer.push(1);
            tokio::time::sleep(Duration::from_millis(500)).await;
            assert_eq!(committed.try_recv(), Err(TryRecvError::Empty));

            debouncer.push(2);
            tokio::time::sleep(Duration::from_millis(600)).await;

            assert_eq!(committed.try_recv(), Ok(2));
            assert_eq!(committed.try_recv(), Err(TryRecvError::Empty));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_returns_to_idle() {
        let (mut debouncer, mut committed) = Debouncer::new(Duration::from_millis(500));

        debouncer.push(1);
        debouncer.cancel();
        assert_eq!(debouncer.state(), DebounceState::Idle);
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(committed.try_recv(), Err(TryRecvError::Empty));
    }
}
