//! The long-running poll loop.
//!
//! Each cycle fetches the status list, validates it, renders the most recent
//! submission and notifies only when the rendered text differs from the last
//! one sent. Every error inside a cycle is contained here: it is notified once
//! per distinct rendering and then retried after the fixed interval.

use std::future::Future;
use std::time::Duration;

use homework_common::error::PollError;
use homework_common::types::NotificationState;
use homework_notifier::{MessageChannel, Notifier};

use crate::client::ApiClient;
use crate::{extractor, validator};

/// What a single cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Status text changed and a notification was attempted.
    Notified,
    /// Status text matched the baseline; nothing sent.
    Unchanged,
    /// A new error was observed and a notification was attempted.
    ErrorNotified,
    /// Same error as last time; logged only.
    ErrorSuppressed,
}

pub struct PollLoop<C> {
    client: ApiClient,
    notifier: Notifier<C>,
    anchor_timestamp: i64,
    interval: Duration,
    state: NotificationState,
}

impl<C: MessageChannel> PollLoop<C> {
    pub fn new(
        client: ApiClient,
        notifier: Notifier<C>,
        anchor_timestamp: i64,
        interval: Duration,
    ) -> Self {
        Self {
            client,
            notifier,
            anchor_timestamp,
            interval,
            state: NotificationState::default(),
        }
    }

    pub fn state(&self) -> &NotificationState {
        &self.state
    }

    /// Run cycles until `shutdown` resolves. An in-flight cycle is abandoned
    /// when shutdown fires.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        tracing::info!(
            endpoint = %self.client.endpoint(),
            anchor = self.anchor_timestamp,
            interval_secs = self.interval.as_secs(),
            "Poll loop started"
        );

        loop {
            tokio::select! {
                outcome = self.run_cycle() => {
                    tracing::debug!(?outcome, "Cycle finished");
                }
                _ = &mut shutdown => break,
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = &mut shutdown => break,
            }
        }

        tracing::info!("Poll loop stopped");
    }

    /// Execute one cycle: poll, compare against the baseline, notify.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll_latest().await {
            Ok(text) if text != self.state.last_status_text => {
                self.notifier.notify(&text).await;
                self.state.last_status_text = text;
                CycleOutcome::Notified
            }
            Ok(_) => {
                tracing::info!("Homework status unchanged");
                CycleOutcome::Unchanged
            }
            Err(e) => self.handle_error(e).await,
        }
    }

    /// Fetch, validate and render the most recent submission.
    async fn poll_latest(&self) -> Result<String, PollError> {
        let payload = self.client.fetch(self.anchor_timestamp).await?;
        let homeworks = validator::validate(payload)?;
        let latest = homeworks.first().ok_or(PollError::NoSubmissions)?;
        extractor::extract(latest)
    }

    async fn handle_error(&mut self, error: PollError) -> CycleOutcome {
        let rendered = error.to_string();

        if self.state.last_error_text.as_deref() == Some(rendered.as_str()) {
            tracing::error!(
                kind = %error.kind(),
                error = %rendered,
                "Poll cycle failed again, not re-notifying"
            );
            return CycleOutcome::ErrorSuppressed;
        }

        tracing::error!(kind = %error.kind(), error = %rendered, "Poll cycle failed");
        self.notifier
            .notify(&format!("Program failure: {rendered}"))
            .await;
        self.state.last_error_text = Some(rendered);
        CycleOutcome::ErrorNotified
    }
}
