//! Expiry Controller: a bounded wait for one qualifying interaction.
//!
//! The timer and the event listener race inside one `select!`; the losing
//! branch is dropped before any side effect runs, so at most one terminal
//! transition is observable per window.

use std::future;
use std::time::Duration;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use tracing::{debug, info, warn};

/// Default lifetime of an invite button.
pub const DEFAULT_EXPIRY: Duration = Duration::from_millis(300_000);

/// An interaction on the invite message, reduced to what the controller needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentEvent {
    pub user_id: String,
}

impl ComponentEvent {
    pub fn from_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// Waiting window scoped to one message and one requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryWindow {
    requester_id: String,
    duration: Duration,
}

impl ExpiryWindow {
    pub fn new(requester_id: impl Into<String>, duration: Duration) -> Self {
        Self {
            requester_id: requester_id.into(),
            duration,
        }
    }

    /// Window for a command invocation. Only an explicit `never_expire = true`
    /// opts out; `false` and an absent option both arm the timer.
    pub fn for_request(
        requester_id: impl Into<String>,
        never_expire: Option<bool>,
        duration: Duration,
    ) -> Option<Self> {
        if never_expire == Some(true) {
            return None;
        }
        Some(Self::new(requester_id, duration))
    }

    pub fn requester_id(&self) -> &str {
        &self.requester_id
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn duration_ms(&self) -> u128 {
        self.duration.as_millis()
    }

    /// An event qualifies only when it comes from the original requester.
    pub fn qualifies(&self, event: &ComponentEvent) -> bool {
        event.user_id == self.requester_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryState {
    Armed,
    /// A qualifying event arrived before the deadline.
    Fired,
    /// The deadline passed; the message was marked expired.
    Expired,
}

impl ExpiryState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExpiryState::Armed)
    }
}

/// Visible side effect of an expired window.
#[async_trait]
pub trait ExpiryEffect: Send + Sync {
    /// Show the expired state on the message and remove its components.
    async fn expire(&self) -> anyhow::Result<()>;
}

/// Drives one [`ExpiryWindow`] from `Armed` to a terminal state.
#[derive(Debug)]
pub struct ExpiryController {
    window: ExpiryWindow,
    state: ExpiryState,
}

impl ExpiryController {
    pub fn arm(window: ExpiryWindow) -> Self {
        debug!(
            requester = window.requester_id(),
            duration_ms = window.duration_ms() as u64,
            "Expiry window armed"
        );
        Self {
            window,
            state: ExpiryState::Armed,
        }
    }

    pub fn window(&self) -> &ExpiryWindow {
        &self.window
    }

    pub fn state(&self) -> ExpiryState {
        self.state
    }

    /// Wait for the first qualifying event or the deadline, whichever comes
    /// first. On `Expired` the effect runs exactly once; a closed event
    /// stream just leaves the timer to run out.
    ///
    /// Calling `run` on a controller that already reached a terminal state
    /// returns that state without waiting or touching the effect.
    pub async fn run<S>(&mut self, events: S, effect: &dyn ExpiryEffect) -> ExpiryState
    where
        S: Stream<Item = ComponentEvent> + Send,
    {
        if self.state.is_terminal() {
            return self.state;
        }

        let window = self.window.clone();
        let first_qualifying = async move {
            let qualifying = events.filter(|event| future::ready(window.qualifies(event)));
            futures::pin_mut!(qualifying);
            match qualifying.next().await {
                Some(event) => event,
                None => future::pending().await,
            }
        };

        let state = tokio::select! {
            biased;
            event = first_qualifying => {
                debug!(user = %event.user_id, "Qualifying interaction received");
                ExpiryState::Fired
            }
            _ = tokio::time::sleep(self.window.duration) => ExpiryState::Expired,
        };
        self.state = state;

        if state == ExpiryState::Expired {
            info!(requester = self.window.requester_id(), "Invite expired");
            if let Err(e) = effect.expire().await {
                warn!(error = %e, "Failed to mark invite as expired");
            }
        }

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::mpsc;
    use tokio_stream::wrappers::ReceiverStream;

    #[derive(Default)]
    struct CountingEffect {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingEffect {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ExpiryEffect for CountingEffect {
        async fn expire(&self) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("message was deleted");
            }
            Ok(())
        }
    }

    fn window() -> ExpiryWindow {
        ExpiryWindow::new("requester", DEFAULT_EXPIRY)
    }

    #[test]
    fn never_expire_only_opts_out_when_true() {
        assert!(ExpiryWindow::for_request("u", Some(true), DEFAULT_EXPIRY).is_none());
        assert!(ExpiryWindow::for_request("u", Some(false), DEFAULT_EXPIRY).is_some());
        assert!(ExpiryWindow::for_request("u", None, DEFAULT_EXPIRY).is_some());
    }

    #[test]
    fn default_window_is_five_minutes() {
        assert_eq!(window().duration_ms(), 300_000);
    }

    #[tokio::test(start_paused = true)]
    async fn expires_once_without_events() {
        let effect = CountingEffect::default();
        let (_tx, rx) = mpsc::channel::<ComponentEvent>(4);
        let mut controller = ExpiryController::arm(window());

        let started = tokio::time::Instant::now();
        let state = controller.run(ReceiverStream::new(rx), &effect).await;

        assert_eq!(state, ExpiryState::Expired);
        assert_eq!(controller.state(), ExpiryState::Expired);
        assert_eq!(effect.calls(), 1);
        assert!(started.elapsed() >= DEFAULT_EXPIRY);
    }

    #[tokio::test(start_paused = true)]
    async fn qualifying_event_fires_and_never_expires_afterwards() {
        let effect = CountingEffect::default();
        let (tx, rx) = mpsc::channel(4);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(10)).await;
            let _ = tx.send(ComponentEvent::from_user("requester")).await;
        });

        let mut controller = ExpiryController::arm(window());
        let state = controller.run(ReceiverStream::new(rx), &effect).await;
        assert_eq!(state, ExpiryState::Fired);

        tokio::time::sleep(DEFAULT_EXPIRY * 2).await;
        assert_eq!(effect.calls(), 0);
        assert_eq!(controller.state(), ExpiryState::Fired);
    }

    #[tokio::test(start_paused = true)]
    async fn events_from_other_users_are_ignored() {
        let effect = CountingEffect::default();
        let (tx, rx) = mpsc::channel(4);
        tx.send(ComponentEvent::from_user("someone-else")).await.unwrap();
        tx.send(ComponentEvent::from_user("another")).await.unwrap();

        let mut controller = ExpiryController::arm(window());
        let state = controller.run(ReceiverStream::new(rx), &effect).await;

        assert_eq!(state, ExpiryState::Expired);
        assert_eq!(effect.calls(), 1);
        drop(tx);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_event_stream_still_waits_for_deadline() {
        let effect = CountingEffect::default();
        let (tx, rx) = mpsc::channel::<ComponentEvent>(1);
        drop(tx);

        let started = tokio::time::Instant::now();
        let mut controller = ExpiryController::arm(window());
        let state = controller.run(ReceiverStream::new(rx), &effect).await;

        assert_eq!(state, ExpiryState::Expired);
        assert!(started.elapsed() >= DEFAULT_EXPIRY);
        assert_eq!(effect.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn terminal_controller_does_not_rerun() {
        let effect = Arc::new(CountingEffect::default());
        let (_tx, rx) = mpsc::channel::<ComponentEvent>(1);
        let mut controller = ExpiryController::arm(window());
        controller.run(ReceiverStream::new(rx), effect.as_ref()).await;

        let (tx, rx) = mpsc::channel(1);
        tx.send(ComponentEvent::from_user("requester")).await.unwrap();
        let state = controller.run(ReceiverStream::new(rx), effect.as_ref()).await;

        assert_eq!(state, ExpiryState::Expired);
        assert_eq!(effect.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_effect_still_expires() {
        let effect = CountingEffect {
            fail: true,
            ..Default::default()
        };
        let (_tx, rx) = mpsc::channel::<ComponentEvent>(1);
        let mut controller = ExpiryController::arm(ExpiryWindow::new("r", Duration::from_secs(1)));
        let state = controller.run(ReceiverStream::new(rx), &effect).await;
        assert_eq!(state, ExpiryState::Expired);
        assert_eq!(effect.calls(), 1);
    }
}
