//! HTTP completion backend for insights

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use fit_core::error::DomainError;
use fit_core::services::InsightsProvider;
use fit_shared::config::InsightsSettings;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    max_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    text: String,
}

pub struct HttpInsightsProvider {
    client: Client,
    base_url: String,
}

impl HttpInsightsProvider {
    pub fn new(settings: &InsightsSettings) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| DomainError::InternalError(e.to_string()))?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl InsightsProvider for HttpInsightsProvider {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        let url = format!("{}/v1/completions", self.base_url);
        debug!(%url, "requesting insight completion");

        let response = self
            .client
            .post(&url)
            .json(&CompletionRequest {
                prompt,
                max_tokens: 256,
            })
            .send()
            .await
            .map_err(|e| DomainError::InsightsError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::InsightsError(format!(
                "completion endpoint returned {}",
                response.status()
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| DomainError::InsightsError(e.to_string()))?;

        Ok(completion.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(base_url: String) -> InsightsSettings {
        InsightsSettings {
            base_url,
            timeout_seconds: 5,
            requests_per_minute: 6,
        }
    }

    #[tokio::test]
    async fn test_complete_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "text": "eat more protein"
                })),
            )
            .mount(&server)
            .await;

        let provider = HttpInsightsProvider::new(&settings(server.uri())).unwrap();
        let text = provider.complete("prompt").await.unwrap();
        assert_eq!(text, "eat more protein");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let provider = HttpInsightsProvider::new(&settings(server.uri())).unwrap();
        let result = provider.complete("prompt").await;
        assert!(matches!(result, Err(DomainError::InsightsError(_))));
    }
}
