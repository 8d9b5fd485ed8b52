use homework_common::config::AppConfig;
use homework_notifier::{Notifier, TelegramChannel};
use homework_poller::client::ApiClient;
use homework_poller::poll_loop::PollLoop;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homework_poller=info,homework_notifier=info".into()),
        )
        .json()
        .init();

    tracing::info!("Homework status notifier starting...");

    // Missing credentials end the process before any polling.
    let config = AppConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration, notifier stopped");
    })?;

    let channel = TelegramChannel::new(
        &config.telegram_api_url,
        &config.credentials.telegram_token,
        &config.credentials.telegram_chat_id,
        config.request_timeout,
    )
    .inspect_err(|e| {
        tracing::error!(error = %e, "Failed to create Telegram bot, notifier stopped");
    })?;

    let client = ApiClient::new(
        config.practicum_endpoint.clone(),
        config.credentials.practicum_token.clone(),
        config.request_timeout,
    )?;

    let anchor = chrono::DateTime::from_timestamp(config.anchor_timestamp, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| config.anchor_timestamp.to_string());
    tracing::info!(
        chat_id = %channel.chat_id(),
        anchor = %anchor,
        "Watching homework submissions"
    );

    let mut poll_loop = PollLoop::new(
        client,
        Notifier::new(channel),
        config.anchor_timestamp,
        config.poll_interval,
    );

    // Run until Ctrl+C
    poll_loop
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal, stopping gracefully...");
        })
        .await;

    tracing::info!("Homework status notifier stopped.");
    Ok(())
}
