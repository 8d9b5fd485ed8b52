//! Best-effort notification delivery.
//!
//! A [`MessageChannel`] knows how to put text in front of the user. The
//! [`Notifier`] wraps one and never lets a delivery failure escape: failures
//! are logged and the caller carries on.

pub mod telegram;

use std::future::Future;

use homework_common::error::PollError;

pub use telegram::TelegramChannel;

/// A destination that accepts plain-text messages.
pub trait MessageChannel {
    fn send(&self, text: &str) -> impl Future<Output = Result<(), PollError>> + Send;

    /// Short name used in log fields (e.g., "telegram").
    fn name(&self) -> &'static str;
}

/// Wraps a channel; delivery is best-effort.
pub struct Notifier<C> {
    channel: C,
}

impl<C: MessageChannel> Notifier<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    /// Send `text`, logging the outcome. Returns whether delivery succeeded.
    pub async fn notify(&self, text: &str) -> bool {
        match self.channel.send(text).await {
            Ok(()) => {
                tracing::info!(channel = self.channel.name(), "Notification sent");
                true
            }
            Err(e) => {
                tracing::error!(
                    channel = self.channel.name(),
                    error = %e,
                    "Failed to send notification"
                );
                false
            }
        }
    }
}
