//! Clipdrop API client implementation.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Timeout for generation requests. Rendering takes longer than a
/// typical API round trip, so this is looser than the gateway timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Error type for Clipdrop operations.
#[derive(Debug, thiserror::Error)]
pub enum ClipdropError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Clipdrop API returned an error.
    #[error("Clipdrop API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },
}

/// Clipdrop error response body.
#[derive(Debug, Deserialize)]
struct ClipdropErrorResponse {
    error: String,
}

/// Clipdrop API client.
#[derive(Debug, Clone)]
pub struct ClipdropClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ClipdropClient {
    /// Create a new Clipdrop client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Clipdrop API URL (e.g., `"https://clipdrop-api.co"`)
    /// * `api_key` - Clipdrop API key
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Render an image from a text prompt.
    ///
    /// Returns the raw PNG bytes on success.
    pub async fn text_to_image(&self, prompt: &str) -> Result<Vec<u8>, ClipdropError> {
        let url = format!("{}/text-to-image/v1", self.base_url);

        let form = reqwest::multipart::Form::new().text("prompt", prompt.to_string());

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<ClipdropErrorResponse>().await {
                Ok(body) => body.error,
                Err(_) => format!("HTTP {status}"),
            };
            return Err(ClipdropError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client = ClipdropClient::new("https://clipdrop-api.co/", "key").unwrap();
        assert_eq!(client.base_url, "https://clipdrop-api.co");
    }
}
