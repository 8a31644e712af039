//! Homework bot - homework review status notifications
//!
//! Polls the Practicum homework statuses API and relays status changes to a Telegram chat.

pub mod config;
pub mod error;
pub mod homework;
pub mod io;
pub mod logging;
pub mod notifier;
pub mod poller;
pub mod practicum;
pub mod status;
pub mod telegram;

pub use config::{load_config, Config, Secrets};
pub use error::{HomeworkBotError, Result};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::poller::{PollState, Poller};
use crate::practicum::{HomeworkApi, PracticumClient};
use crate::telegram::TelegramNotifier;

/// Wires the bot's collaborators, allowing any of them to be injected
pub struct HomeworkBotBuilder {
    config: Config,
    http: Option<Arc<dyn HttpClient>>,
    api: Option<Arc<dyn HomeworkApi>>,
    notifier: Option<Arc<dyn Notifier>>,
    cancel: Option<CancellationToken>,
    initial_state: Option<PollState>,
}

impl HomeworkBotBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: None,
            api: None,
            notifier: None,
            cancel: None,
            initial_state: None,
        }
    }

    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    pub fn with_api(mut self, api: Arc<dyn HomeworkApi>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_cancellation_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Start from a fixed `from_date` instead of the current time
    pub fn with_initial_state(mut self, state: PollState) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Build the bot. Fails if the secrets have not been resolved.
    pub fn build(self) -> Result<HomeworkBot> {
        let secrets = self.config.secrets.clone().ok_or_else(|| {
            HomeworkBotError::Config("Отсутствуют переменные окружения".to_string())
        })?;

        let http: Arc<dyn HttpClient> = match self.http {
            Some(http) => http,
            None => Arc::new(ReqwestHttpClient::with_timeout(Duration::from_secs(
                self.config.request_timeout_seconds,
            ))?),
        };

        let api: Arc<dyn HomeworkApi> = match self.api {
            Some(api) => api,
            None => Arc::new(PracticumClient::new(
                &self.config.endpoint,
                &secrets.practicum_token,
                Arc::clone(&http),
            )),
        };

        let notifier: Arc<dyn Notifier> = match self.notifier {
            Some(notifier) => notifier,
            None => Arc::new(TelegramNotifier::new(
                &self.config.telegram_api_url,
                &secrets.telegram_token,
                &secrets.telegram_chat_id,
                Arc::clone(&http),
            )),
        };

        let interval = Duration::from_secs(self.config.retry_interval_seconds);
        tracing::debug!(
            "Built homework bot: endpoint={}, notifier={}, interval={:?}",
            self.config.endpoint,
            notifier.type_name(),
            interval
        );

        Ok(HomeworkBot {
            poller: Poller::new(api, notifier, interval),
            state: self.initial_state.unwrap_or_else(PollState::starting_now),
            cancel: self.cancel.unwrap_or_else(CancellationToken::new),
        })
    }
}

/// A fully wired bot, ready to start polling
pub struct HomeworkBot {
    poller: Poller,
    state: PollState,
    cancel: CancellationToken,
}

impl HomeworkBot {
    /// Run until cancelled or interrupted with Ctrl-C. Returns the final poll state.
    pub async fn start(self) -> Result<PollState> {
        let HomeworkBot {
            poller,
            mut state,
            cancel,
        } = self;

        let cancel_for_signal = cancel.clone();
        let signal_task = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                    cancel_for_signal.cancel();
                }
                Err(e) => tracing::warn!("Failed to listen for ctrl-c: {}", e),
            }
        });

        tracing::info!(
            "Homework bot started, polling every {:?}",
            poller.interval()
        );
        poller.run(&mut state, cancel).await;
        signal_task.abort();
        tracing::info!("Homework bot stopped");

        Ok(state)
    }
}
