use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::Recipient;

use homework_common::error::PollError;

use crate::MessageChannel;

/// Sends messages to a single chat through the Telegram Bot API.
pub struct TelegramChannel {
    bot: Bot,
    token: String,
    chat_id: String,
    recipient: Recipient,
}

impl TelegramChannel {
    /// Build a bot for `chat_id`. Fails if the HTTP client cannot be built or
    /// `api_url` is not a valid URL.
    pub fn new(
        api_url: &str,
        token: &str,
        chat_id: &str,
        timeout: Duration,
    ) -> Result<Self, PollError> {
        let client = teloxide::net::default_reqwest_settings()
            .timeout(timeout)
            .build()
            .map_err(|e| PollError::Channel(format!("failed to build Telegram client: {e}")))?;

        let api_url = reqwest::Url::parse(api_url)
            .map_err(|e| PollError::Channel(format!("invalid Telegram API URL: {e}")))?;

        Ok(Self {
            bot: Bot::with_client(token, client).set_api_url(api_url),
            token: token.to_string(),
            chat_id: chat_id.to_string(),
            recipient: recipient(chat_id),
        })
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

/// Numeric ids address chats directly; anything else is a `@channel` name.
fn recipient(chat_id: &str) -> Recipient {
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.to_string()),
    }
}

impl MessageChannel for TelegramChannel {
    async fn send(&self, text: &str) -> Result<(), PollError> {
        self.bot
            .send_message(self.recipient.clone(), text)
            .await
            .map(|_| ())
            .map_err(|e| {
                // Network errors embed the request URL, which carries the token.
                let message = e.to_string().replace(&self.token, "<redacted>");
                PollError::Channel(message)
            })
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_chat_id_is_chat() {
        assert_eq!(recipient("42"), Recipient::Id(ChatId(42)));
        assert_eq!(recipient("-1001234"), Recipient::Id(ChatId(-1001234)));
    }

    #[test]
    fn test_named_chat_id_is_channel() {
        assert_eq!(
            recipient("@homework_alerts"),
            Recipient::ChannelUsername("@homework_alerts".to_string())
        );
    }

    #[test]
    fn test_invalid_api_url_rejected() {
        let err = TelegramChannel::new("not a url", "123:abc", "42", Duration::from_secs(5))
            .err()
            .unwrap();
        assert!(err.to_string().contains("invalid Telegram API URL"));
    }
}
