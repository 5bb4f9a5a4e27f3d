use crate::adapters::http::{build_client, ensure_success};
use crate::config::agent_config::AgentConfig;
use crate::domain::ports::SuggestionSource;
use crate::utils::error::{AgentError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const SERVICE: &str = "SerpApi";

/// Google autocomplete suggestions through SerpApi.
pub struct SerpApiSuggestionSource {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    suggestions: Vec<Suggestion>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Suggestion {
    value: Option<String>,
}

impl SerpApiSuggestionSource {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(&config.http)?,
            endpoint: config.serpapi.endpoint.trim_end_matches('/').to_string(),
            api_key: config.require_serpapi_key()?.to_string(),
        })
    }
}

#[async_trait]
impl SuggestionSource for SerpApiSuggestionSource {
    async fn suggest(&self, keyword: &str) -> Result<Vec<String>> {
        tracing::debug!("Requesting autocomplete suggestions for '{}'", keyword);

        let response = self
            .client
            .get(format!("{}/search", self.endpoint))
            .query(&[
                ("engine", "google_autocomplete"),
                ("q", keyword),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;
        let response = ensure_success(SERVICE, response).await?;
        let payload: AutocompleteResponse = response.json().await?;

        if let Some(message) = payload.error {
            return Err(AgentError::RemoteResponseError {
                service: SERVICE.to_string(),
                message,
            });
        }

        Ok(payload
            .suggestions
            .into_iter()
            .filter_map(|suggestion| suggestion.value)
            .collect())
    }
}
