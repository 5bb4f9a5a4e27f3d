use crate::adapters::http::{build_client, ensure_success};
use crate::config::agent_config::AgentConfig;
use crate::domain::ports::KeywordSource;
use crate::utils::error::{AgentError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const SERVICE: &str = "Gemini";

/// Keyword brainstorming through the Gemini `generateContent` REST API.
pub struct GeminiKeywordSource {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiKeywordSource {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(&config.http)?,
            endpoint: config.gemini.endpoint.trim_end_matches('/').to_string(),
            model: config.gemini.model.clone(),
            api_key: config.require_gemini_key()?.to_string(),
        })
    }

    pub fn prompt(seed: &str, count: usize) -> String {
        format!(
            "Generate a list of {} SEO keywords related to '{}'. Return only the keywords, comma-separated.",
            count, seed
        )
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }
}

/// Splits the model's reply into keywords (commas or line breaks), dropping blanks.
pub fn parse_keyword_list(text: &str) -> Vec<String> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl KeywordSource for GeminiKeywordSource {
    async fn generate(&self, seed: &str, count: usize) -> Result<Vec<String>> {
        let prompt = Self::prompt(seed, count);
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &prompt }],
            }],
        };

        tracing::info!("🤖 Generating keywords using {} ({})", SERVICE, self.model);
        tracing::debug!("Making API request to: {}", self.url());

        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(SERVICE, response).await?;
        let payload: GenerateContentResponse = response.json().await?;

        let candidate = payload.candidates.into_iter().next().ok_or_else(|| {
            AgentError::RemoteResponseError {
                service: SERVICE.to_string(),
                message: "response contained no candidates".to_string(),
            }
        })?;

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let keywords = parse_keyword_list(&text);
        tracing::info!("{} returned {} keywords", SERVICE, keywords.len());
        Ok(keywords)
    }
}
