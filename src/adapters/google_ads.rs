//! Keyword metrics from the Google Ads `KeywordPlanIdeaService`.
//!
//! Every failure is caught here and turned into a [`MetricsOutcome`], so the
//! pipeline can fall back to unmeasured keywords instead of aborting.

use crate::adapters::http::{build_client, ensure_success, json_number};
use crate::config::agent_config::AgentConfig;
use crate::domain::model::{KeywordRecord, MetricsOutcome};
use crate::domain::ports::MetricsSource;
use crate::utils::error::{AgentError, Result};
use crate::utils::validation::normalize_customer_id;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const SERVICE: &str = "Google Ads";

/// The API accepts at most this many seed keywords per request.
pub const MAX_SEED_KEYWORDS: usize = 20;

const MAX_PAGES_PER_REQUEST: usize = 10;

pub struct GoogleAdsMetricsSource {
    client: Client,
    endpoint: String,
    api_version: String,
    developer_token: String,
    access_token: String,
    login_customer_id: Option<String>,
    geo_target_id: u32,
    language_id: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateKeywordIdeasRequest<'a> {
    language: String,
    geo_target_constants: Vec<String>,
    keyword_plan_network: &'static str,
    keyword_seed: KeywordSeed<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct KeywordSeed<'a> {
    keywords: &'a [String],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateKeywordIdeasResponse {
    #[serde(default)]
    results: Vec<KeywordIdea>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeywordIdea {
    #[serde(default)]
    text: String,
    keyword_idea_metrics: Option<KeywordIdeaMetrics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeywordIdeaMetrics {
    avg_monthly_searches: Option<serde_json::Value>,
    competition_index: Option<serde_json::Value>,
}

impl GoogleAdsMetricsSource {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        let developer_token = config
            .ads_developer_token()
            .ok_or_else(|| AgentError::MissingConfigError {
                field: crate::config::agent_config::ADS_DEVELOPER_TOKEN_VAR.to_string(),
            })?
            .to_string();
        let access_token = config
            .ads_access_token()
            .ok_or_else(|| AgentError::MissingConfigError {
                field: crate::config::agent_config::ADS_ACCESS_TOKEN_VAR.to_string(),
            })?
            .to_string();
        let login_customer_id = config
            .ads_login_customer_id()
            .map(|id| normalize_customer_id("google_ads.login_customer_id", id))
            .transpose()?;

        Ok(Self {
            client: build_client(&config.http)?,
            endpoint: config.google_ads.endpoint.trim_end_matches('/').to_string(),
            api_version: config.google_ads.api_version.clone(),
            developer_token,
            access_token,
            login_customer_id,
            geo_target_id: config.google_ads.geo_target_id,
            language_id: config.google_ads.language_id,
        })
    }

    fn url(&self, customer_id: &str) -> String {
        format!(
            "{}/{}/customers/{}:generateKeywordIdeas",
            self.endpoint, self.api_version, customer_id
        )
    }

    async fn request_page(
        &self,
        customer_id: &str,
        seeds: &[String],
        page_token: Option<String>,
    ) -> Result<GenerateKeywordIdeasResponse> {
        let body = GenerateKeywordIdeasRequest {
            language: format!("languageConstants/{}", self.language_id),
            geo_target_constants: vec![format!("geoTargetConstants/{}", self.geo_target_id)],
            keyword_plan_network: "GOOGLE_SEARCH_AND_PARTNERS",
            keyword_seed: KeywordSeed { keywords: seeds },
            page_token,
        };

        let mut request = self
            .client
            .post(self.url(customer_id))
            .bearer_auth(&self.access_token)
            .header("developer-token", &self.developer_token)
            .json(&body);
        if let Some(login) = &self.login_customer_id {
            request = request.header("login-customer-id", login);
        }

        let response = ensure_success(SERVICE, request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// 取得一組種子關鍵字的所有分頁結果
    async fn ideas_for_chunk(&self, customer_id: &str, seeds: &[String]) -> Result<Vec<KeywordRecord>> {
        let mut records = Vec::new();
        let mut page_token = None;

        for _ in 0..MAX_PAGES_PER_REQUEST {
            let page = self.request_page(customer_id, seeds, page_token).await?;
            records.extend(page.results.into_iter().filter_map(idea_to_record));

            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => page_token = Some(token),
                None => return Ok(records),
            }
        }

        tracing::warn!(
            "Stopped after {} pages of keyword ideas",
            MAX_PAGES_PER_REQUEST
        );
        Ok(records)
    }
}

fn idea_to_record(idea: KeywordIdea) -> Option<KeywordRecord> {
    let keyword = idea.text.trim().to_string();
    if keyword.is_empty() {
        return None;
    }
    let metrics = idea.keyword_idea_metrics.unwrap_or_default();

    let search_volume = match metrics.avg_monthly_searches.as_ref() {
        None | Some(serde_json::Value::Null) => 0,
        Some(raw) => match json_number(raw).filter(|volume| *volume >= 0.0) {
            Some(volume) => volume as u64,
            None => {
                tracing::warn!(
                    "Could not convert search volume for '{}' ({}), using 0",
                    keyword,
                    raw
                );
                0
            }
        },
    };

    let competition = match metrics.competition_index.as_ref().and_then(json_number) {
        Some(index) => index / 100.0,
        None => {
            // 無法解析的競爭度一律視為 0.0
            tracing::warn!(
                "Could not convert competition for '{}' ({:?}), using 0.0",
                keyword,
                metrics.competition_index
            );
            0.0
        }
    };

    Some(KeywordRecord::new(keyword, search_volume, competition))
}

#[async_trait]
impl MetricsSource for GoogleAdsMetricsSource {
    async fn fetch_metrics(&self, keywords: &[String], account_id: &str) -> MetricsOutcome {
        let customer_id = match normalize_customer_id("customer_id", account_id) {
            Ok(id) => id,
            Err(e) => return MetricsOutcome::Failed(e.to_string()),
        };

        tracing::info!("📈 Fetching keyword metrics from {}", SERVICE);

        let mut records = Vec::new();
        let mut failures = Vec::new();
        for (index, chunk) in keywords.chunks(MAX_SEED_KEYWORDS).enumerate() {
            match self.ideas_for_chunk(&customer_id, chunk).await {
                Ok(ideas) => {
                    tracing::debug!("Chunk {} returned {} keyword ideas", index + 1, ideas.len());
                    records.extend(ideas);
                }
                Err(e) => {
                    tracing::error!("❌ {} API error for chunk {}: {}", SERVICE, index + 1, e);
                    failures.push(e.to_string());
                }
            }
        }

        tracing::info!("Retrieved {} keyword ideas from {}", records.len(), SERVICE);
        if records.is_empty() && !failures.is_empty() {
            return MetricsOutcome::Failed(failures.join("; "));
        }
        MetricsOutcome::from_records(records)
    }
}
