use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;

use crate::core::config::Settings;

#[derive(Debug, Error)]
pub(crate) enum TallyError {
    #[error("Tally form fetch failed: {0}")]
    RemoteFetch(String),
}

/// Client for the Tally "get form" endpoint. Without an API key it serves a
/// fixed mock form so exam creation works in local development.
#[derive(Debug, Clone)]
pub(crate) struct TallyService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl TallyService {
    pub(crate) fn from_settings(settings: &Settings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.tally().timeout_seconds);
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(20))
            .timeout(timeout)
            .build()
            .context("Failed to build Tally HTTP client")?;

        Ok(Self {
            client,
            api_key: settings.tally().api_key.clone(),
            base_url: settings.tally().base_url.trim_end_matches('/').to_string(),
        })
    }

    /// One fetch per call: no retry, no caching. The returned document is
    /// stored verbatim as the exam's schema snapshot.
    pub(crate) async fn fetch_form(&self, form_id: &str) -> Result<Value, TallyError> {
        let Some(api_key) = &self.api_key else {
            tracing::warn!(form_id, "No Tally API key configured, returning mock form");
            return Ok(mock_form(form_id));
        };

        let endpoint = format!("{}/forms/{}", self.base_url, form_id);
        let response = self
            .client
            .get(&endpoint)
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(|err| TallyError::RemoteFetch(format!("transport error: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TallyError::RemoteFetch(format!(
                "Tally returned {status} for form {form_id}"
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| TallyError::RemoteFetch(format!("non-JSON body: {err}")))
    }
}

fn mock_form(form_id: &str) -> Value {
    json!({
        "id": form_id,
        "name": "Mock Exam",
        "fields": [
            {
                "key": "question_1",
                "label": "What is the capital of France?",
                "type": "MULTIPLE_CHOICE",
                "options": [
                    { "id": "opt_1", "text": "Paris" },
                    { "id": "opt_2", "text": "London" },
                    { "id": "opt_3", "text": "Berlin" }
                ]
            },
            {
                "key": "question_2",
                "label": "What is 2 + 2?",
                "type": "MULTIPLE_CHOICE",
                "options": [
                    { "id": "opt_4", "text": "3" },
                    { "id": "opt_5", "text": "4" },
                    { "id": "opt_6", "text": "5" }
                ]
            },
            {
                "key": "email",
                "label": "Email",
                "type": "EMAIL"
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_without_key() -> TallyService {
        TallyService {
            client: Client::new(),
            api_key: None,
            base_url: "https://api.tally.so".to_string(),
        }
    }

    #[tokio::test]
    async fn fetch_form_without_key_returns_mock() {
        let service = service_without_key();
        let form = service.fetch_form("form123").await.expect("mock form");
        assert_eq!(form["id"], "form123");
        assert_eq!(form["name"], "Mock Exam");
        assert_eq!(form["fields"].as_array().expect("fields").len(), 3);
    }

    #[tokio::test]
    async fn mock_form_is_deterministic() {
        let service = service_without_key();
        let first = service.fetch_form("abc").await.expect("mock form");
        let second = service.fetch_form("abc").await.expect("mock form");
        assert_eq!(first, second);
    }

    #[test]
    fn mock_form_has_email_field() {
        let form = mock_form("abc");
        let fields = form["fields"].as_array().expect("fields");
        assert!(fields.iter().any(|field| field["type"] == "EMAIL"));
        assert_eq!(
            fields.iter().filter(|field| field["type"] == "MULTIPLE_CHOICE").count(),
            2
        );
    }
}
