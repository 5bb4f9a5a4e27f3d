use crate::core::aggregate::KeywordSet;
use crate::domain::model::{ExportReport, MetricsOutcome, ScoreWeights, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Run settings shared by both pipelines.
pub trait ConfigProvider: Send + Sync {
    fn seed_keyword(&self) -> &str;
    fn keyword_count(&self) -> usize;
    fn output_path(&self) -> &str;
    fn export_limit(&self) -> usize;
    fn score_weights(&self) -> ScoreWeights;
    fn keywords_only_fallback(&self) -> bool {
        false
    }
}

/// Generates candidate keywords from a seed phrase.
#[async_trait]
pub trait KeywordSource: Send + Sync {
    async fn generate(&self, seed: &str, count: usize) -> Result<Vec<String>>;
}

/// Looks up search volume and competition for keywords.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn fetch_metrics(&self, keywords: &[String], account_id: &str) -> MetricsOutcome;
}

/// Autocomplete-style suggestions for a single keyword.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn suggest(&self, keyword: &str) -> Result<Vec<String>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<KeywordSet>;
    async fn transform(&self, keywords: KeywordSet) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<ExportReport>;

    /// Where `load` writes its output.
    fn output_path(&self) -> &str;
}
