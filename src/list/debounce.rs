//! Debounced search input.
//!
//! Keystrokes are forwarded to a background task that waits for the input to
//! go quiet for the configured window before emitting the latest value. The
//! task is owned by the [`DebouncedInput`]; dropping it aborts the task along
//! with any pending timer.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default quiescence window for list search boxes.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug)]
enum InputEvent {
    Keystroke(String),
    Clear,
}

/// Search box that emits values only after typing pauses.
pub struct DebouncedInput {
    events: mpsc::UnboundedSender<InputEvent>,
    emitted: mpsc::UnboundedReceiver<String>,
    value: String,
    last_emitted: String,
    task: JoinHandle<()>,
}

impl DebouncedInput {
    /// Mount the input. Mounting never emits, even with a non-empty
    /// `initial_value`.
    pub fn mount(initial_value: impl Into<String>, window: Duration) -> Self {
        let value = initial_value.into();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (emitted_tx, emitted_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(run_debounce_loop(
            events_rx,
            emitted_tx,
            value.clone(),
            window,
        ));

        Self {
            events: events_tx,
            emitted: emitted_rx,
            last_emitted: value.clone(),
            value,
            task,
        }
    }

    /// Current text of the box, including keystrokes not yet emitted.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Record a keystroke; `value` is the full text after the keystroke.
    pub fn input(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.value.clone_from(&value);
        let _ = self.events.send(InputEvent::Keystroke(value));
    }

    /// Clear the box and emit `""` without waiting for the window.
    pub fn clear(&mut self) {
        self.value.clear();
        let _ = self.events.send(InputEvent::Clear);
    }

    /// Whether every keystroke has been emitted (or suppressed as a repeat).
    pub fn is_settled(&self) -> bool {
        self.value == self.last_emitted
    }

    /// Wait for the next emitted search value.
    ///
    /// Cancel-safe: usable as a `tokio::select!` branch.
    pub async fn next_search(&mut self) -> Option<String> {
        let value = self.emitted.recv().await?;
        self.last_emitted.clone_from(&value);
        Some(value)
    }

    /// Unmount the input, cancelling any pending emission. Afterwards
    /// [`next_search`](Self::next_search) resolves to `None`.
    pub fn unmount(&mut self) {
        self.task.abort();
    }
}

impl Drop for DebouncedInput {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Background loop: waits for a first keystroke, then drains further
/// keystrokes until the window elapses with no input.
async fn run_debounce_loop(
    mut events: mpsc::UnboundedReceiver<InputEvent>,
    emitted: mpsc::UnboundedSender<String>,
    initial_value: String,
    window: Duration,
) {
    let mut last_emitted = initial_value;

    loop {
        let mut latest = match events.recv().await {
            Some(InputEvent::Keystroke(value)) => value,
            Some(InputEvent::Clear) => {
                last_emitted.clear();
                if emitted.send(String::new()).is_err() {
                    return;
                }
                continue;
            }
            None => return,
        };

        let mut cleared = false;
        loop {
            match tokio::time::timeout(window, events.recv()).await {
                Ok(Some(InputEvent::Keystroke(value))) => latest = value,
                Ok(Some(InputEvent::Clear)) => {
                    cleared = true;
                    break;
                }
                // Input dropped. Pending keystrokes die with it.
                Ok(None) => return,
                Err(_) => break,
            }
        }

        let value = if cleared { String::new() } else { latest };
        if !cleared && value == last_emitted {
            continue;
        }
        last_emitted.clone_from(&value);
        if emitted.send(value).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);
    const WAIT: Duration = Duration::from_secs(10);

    async fn next(input: &mut DebouncedInput) -> Option<String> {
        tokio::time::timeout(WAIT, input.next_search()).await.ok().flatten()
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_emits_once_with_final_value() {
        let mut input = DebouncedInput::mount("", WINDOW);
        input.input("a");
        tokio::time::sleep(Duration::from_millis(100)).await;
        input.input("ab");
        tokio::time::sleep(Duration::from_millis(100)).await;
        input.input("abc");

        assert_eq!(next(&mut input).await.as_deref(), Some("abc"));
        assert_eq!(next(&mut input).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_does_not_emit() {
        let mut input = DebouncedInput::mount("deluxe", WINDOW);
        assert_eq!(input.value(), "deluxe");
        assert_eq!(next(&mut input).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pauses_longer_than_window_emit_each_value() {
        let mut input = DebouncedInput::mount("", Duration::from_millis(200));
        input.input("su");
        tokio::time::sleep(Duration::from_millis(300)).await;
        input.input("suite");

        assert_eq!(next(&mut input).await.as_deref(), Some("su"));
        assert_eq!(next(&mut input).await.as_deref(), Some("suite"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_bypasses_window() {
        let mut input = DebouncedInput::mount("", WINDOW);
        input.input("smi");
        input.clear();
        assert_eq!(input.value(), "");

        let started = tokio::time::Instant::now();
        assert_eq!(next(&mut input).await.as_deref(), Some(""));
        assert!(started.elapsed() < WINDOW);
        // The pending "smi" never fires.
        assert_eq!(next(&mut input).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settles_once_value_is_emitted() {
        let mut input = DebouncedInput::mount("", WINDOW);
        assert!(input.is_settled());
        input.input("ro");
        assert!(!input.is_settled());
        assert_eq!(next(&mut input).await.as_deref(), Some("ro"));
        assert!(input.is_settled());

        input.input("r");
        input.input("ro");
        assert!(input.is_settled());
        input.clear();
        assert!(!input.is_settled());
        assert_eq!(next(&mut input).await.as_deref(), Some(""));
        assert!(input.is_settled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_value_not_reemitted() {
        let mut input = DebouncedInput::mount("ana", WINDOW);
        input.input("an");
        input.input("ana");
        assert_eq!(next(&mut input).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_cancels_pending_emission() {
        let mut input = DebouncedInput::mount("", WINDOW);
        input.input("late");
        input.unmount();

        // The emitter closes with the task instead of timing out.
        let started = tokio::time::Instant::now();
        assert_eq!(input.next_search().await, None);
        assert!(started.elapsed() < WINDOW);
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_after_unmount_is_ignored() {
        let mut input = DebouncedInput::mount("", WINDOW);
        input.unmount();
        input.input("ignored");
        input.clear();
        assert_eq!(next(&mut input).await, None);
    }
}
