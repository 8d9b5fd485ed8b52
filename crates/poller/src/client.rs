use std::time::Duration;

use homework_common::error::PollError;

/// HTTP client for the homework status endpoint.
///
/// Performs no retries; the poll loop decides when to try again.
pub struct ApiClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl ApiClient {
    pub fn new(endpoint: String, token: String, timeout: Duration) -> Result<Self, PollError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PollError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request all homework statuses since `from_timestamp` and decode the body.
    ///
    /// The payload is returned as-is; shape checks belong to the validator.
    pub async fn fetch(&self, from_timestamp: i64) -> Result<serde_json::Value, PollError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_timestamp)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(endpoint = %self.endpoint, error = %e, "Review API request failed");
                PollError::Transport(e.to_string())
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::error!(
                endpoint = %self.endpoint,
                status = status.as_u16(),
                "Review API unavailable"
            );
            return Err(PollError::UnexpectedHttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            tracing::error!(endpoint = %self.endpoint, error = %e, "Failed to read review API body");
            PollError::Transport(e.to_string())
        })?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(endpoint = %self.endpoint, error = %e, "Review API returned invalid JSON");
            PollError::InvalidPayload(e.to_string())
        })
    }
}
