//! Poller: fetches homework statuses, relays changes, and reports failures

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::homework::{format_status, validate};
use crate::notifier::Notifier;
use crate::practicum::HomeworkApi;
use crate::HomeworkBotError;

/// Prefix of every failure report sent to the chat
pub const FAILURE_PREFIX: &str = "Сбой в работе программы: ";

/// Mutable state carried from one polling cycle to the next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// Lower bound passed as `from_date` on the next request
    pub current_timestamp: i64,
    /// Text of the last failure report that reached the chat
    pub last_error_message: String,
}

impl PollState {
    pub fn new(current_timestamp: i64) -> Self {
        Self {
            current_timestamp,
            last_error_message: String::new(),
        }
    }

    /// State starting from the current wall-clock time
    pub fn starting_now() -> Self {
        Self::new(current_epoch_secs())
    }
}

/// The poller runs the fetch, validate, notify cycle on a fixed interval
pub struct Poller {
    api: Arc<dyn HomeworkApi>,
    notifier: Arc<dyn Notifier>,
    interval: Duration,
}

impl Poller {
    pub fn new(api: Arc<dyn HomeworkApi>, notifier: Arc<dyn Notifier>, interval: Duration) -> Self {
        Self {
            api,
            notifier,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll until the cancellation token is triggered.
    ///
    /// Cancellation is only observed between cycles.
    pub async fn run(&self, state: &mut PollState, cancel: CancellationToken) {
        loop {
            self.run_cycle(state).await;

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }

    /// Run one cycle; errors are logged and reported, never returned
    pub async fn run_cycle(&self, state: &mut PollState) {
        if let Err(e) = self.check_homeworks(state).await {
            self.report_failure(state, &e).await;
        }
    }

    async fn check_homeworks(&self, state: &mut PollState) -> crate::Result<()> {
        let requested_at = current_epoch_secs();
        tracing::debug!("Polling homework statuses from {}", state.current_timestamp);

        let response = self.api.fetch(state.current_timestamp).await?;
        let homeworks = validate(&response)?;

        if homeworks.is_empty() {
            tracing::debug!("No new homework statuses");
        }

        for homework in homeworks {
            let message = format_status(homework)?;
            self.deliver(&message).await;
        }

        state.current_timestamp = response
            .get("current_date")
            .and_then(Value::as_i64)
            .unwrap_or(requested_at);
        Ok(())
    }

    async fn report_failure(&self, state: &mut PollState, error: &HomeworkBotError) {
        let message = format!("{}{}", FAILURE_PREFIX, error);
        tracing::error!("{}", message);

        if message == state.last_error_message {
            tracing::debug!("Failure already reported, not notifying again");
            return;
        }

        if self.deliver(&message).await {
            state.last_error_message = message;
        }
    }

    /// Send a message, logging the outcome. Returns whether it was delivered.
    async fn deliver(&self, message: &str) -> bool {
        match self.notifier.notify(message).await {
            Ok(()) => {
                tracing::info!(
                    "Message sent via '{}': {}",
                    self.notifier.type_name(),
                    message
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    "Message via '{}' failed: {} ({})",
                    self.notifier.type_name(),
                    message,
                    e
                );
                false
            }
        }
    }
}

fn current_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
