//! Coalesces bursts of input into a single dispatch.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::Dispatch;

/// Quiescence window when at most one provider is enabled.
pub const SINGLE_PROVIDER_WINDOW: Duration = Duration::from_millis(500);

/// Quiescence window when several providers run concurrently.
pub const MULTI_PROVIDER_WINDOW: Duration = Duration::from_millis(1000);

/// Picks the default window for the number of enabled providers.
pub const fn default_window(enabled_providers: usize) -> Duration {
    if enabled_providers > 1 {
        MULTI_PROVIDER_WINDOW
    } else {
        SINGLE_PROVIDER_WINDOW
    }
}

/// Trailing-edge debouncer in front of a [`Dispatch`] target.
///
/// At most one timer is live at any time. Each [`notify`](Self::notify)
/// aborts the previous timer and starts a new one; only a timer that runs out
/// undisturbed dispatches, and only if its text is not blank.
pub struct Debouncer<D: Dispatch> {
    target: Arc<D>,
    window: Duration,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<D: Dispatch> Debouncer<D> {
    pub fn new(target: Arc<D>, window: Duration) -> Self {
        Self {
            target,
            window,
            timer: Mutex::new(None),
        }
    }

    pub const fn window(&self) -> Duration {
        self.window
    }

    pub fn target(&self) -> &Arc<D> {
        &self.target
    }

    /// Records `text` as the latest input and restarts the quiescence timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn notify(&self, text: &str) {
        let target = Arc::clone(&self.target);
        let window = self.window;
        let text = text.to_string();

        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = timer.take() {
            previous.abort();
        }
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if text.trim().is_empty() {
                debug!("debounced input is blank, not dispatching");
                return;
            }
            target.dispatch(&text);
        }));
    }

    /// Drops the pending firing, if any.
    pub fn cancel(&self) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = timer.take() {
            previous.abort();
        }
    }

    /// Lets the pending timer, if any, run out and fire.
    pub async fn finish(&self) {
        let pending = self
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = pending
            && let Err(e) = handle.await
        {
            debug!(error = %e, "debounce timer did not complete");
        }
    }

    /// Whether a timer is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<D: Dispatch> Drop for Debouncer<D> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        texts: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn texts(&self) -> Vec<String> {
            self.texts.lock().unwrap().clone()
        }
    }

    impl Dispatch for Recorder {
        fn dispatch(&self, text: &str) {
            self.texts.lock().unwrap().push(text.to_string());
        }
    }

    const WINDOW: Duration = Duration::from_millis(1000);

    fn debouncer() -> (Arc<Recorder>, Debouncer<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let debouncer = Debouncer::new(Arc::clone(&recorder), WINDOW);
        (recorder, debouncer)
    }

    async fn sleep_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_notifies_collapse_into_last_text() {
        let (recorder, debouncer) = debouncer();

        for text in ["h", "he", "hel", "hell", "hello"] {
            debouncer.notify(text);
            sleep_ms(200).await;
        }
        assert!(recorder.texts().is_empty());

        sleep_ms(1000).await;
        assert_eq!(recorder.texts(), vec!["hello"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_only_after_full_window() {
        let (recorder, debouncer) = debouncer();

        debouncer.notify("hello");
        sleep_ms(999).await;
        assert!(recorder.texts().is_empty());
        assert!(debouncer.is_pending());

        sleep_ms(2).await;
        assert_eq!(recorder.texts(), vec!["hello"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_dispatch_separately() {
        let (recorder, debouncer) = debouncer();

        debouncer.notify("first");
        sleep_ms(1500).await;
        debouncer.notify("second");
        sleep_ms(1500).await;

        assert_eq!(recorder.texts(), vec!["first", "second"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_text_is_suppressed() {
        let (recorder, debouncer) = debouncer();

        debouncer.notify("   \t");
        sleep_ms(1500).await;
        assert!(recorder.texts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_text_supersedes_pending_text() {
        let (recorder, debouncer) = debouncer();

        debouncer.notify("hello");
        sleep_ms(300).await;
        debouncer.notify("");
        sleep_ms(1500).await;

        assert!(recorder.texts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_firing() {
        let (recorder, debouncer) = debouncer();

        debouncer.notify("hello");
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        sleep_ms(1500).await;

        assert!(recorder.texts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let (recorder, debouncer) = debouncer();

        debouncer.notify("hello");
        drop(debouncer);
        sleep_ms(1500).await;

        assert!(recorder.texts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_finish_waits_for_pending_firing() {
        let (recorder, debouncer) = debouncer();

        debouncer.notify("hel");
        debouncer.notify("hello");
        debouncer.finish().await;

        assert_eq!(recorder.texts(), vec!["hello"]);
        assert!(!debouncer.is_pending());

        // nothing pending: returns immediately
        debouncer.finish().await;
        assert_eq!(recorder.texts().len(), 1);
    }

    #[test]
    fn test_default_window_by_provider_count() {
        assert_eq!(default_window(0), SINGLE_PROVIDER_WINDOW);
        assert_eq!(default_window(1), SINGLE_PROVIDER_WINDOW);
        assert_eq!(default_window(5), MULTI_PROVIDER_WINDOW);
    }
}
