use super::require_keywords;
use crate::core::aggregate::{aggregate, KeywordSet};
use crate::core::export::{export_csv, ExportOptions};
use crate::core::scoring::{merge_metrics, score_keywords};
use crate::core::{ConfigProvider, KeywordSource, MetricsSource, Pipeline, Storage, TransformResult};
use crate::domain::model::{ExportReport, MetricsOutcome, MetricsProvenance};
use crate::utils::error::Result;

/// Generated keywords ranked with metrics from an advertising API.
///
/// When the metrics source fails or returns nothing, every generated keyword
/// is still exported with zero metrics.
pub struct AdsPipeline<K, M, S, C>
where
    K: KeywordSource,
    M: MetricsSource,
    S: Storage,
    C: ConfigProvider,
{
    keywords: K,
    metrics: M,
    storage: S,
    config: C,
    account_id: String,
}

impl<K, M, S, C> AdsPipeline<K, M, S, C>
where
    K: KeywordSource,
    M: MetricsSource,
    S: Storage,
    C: ConfigProvider,
{
    pub fn new(keywords: K, metrics: M, storage: S, config: C, account_id: String) -> Self {
        Self {
            keywords,
            metrics,
            storage,
            config,
            account_id,
        }
    }
}

#[async_trait::async_trait]
impl<K, M, S, C> Pipeline for AdsPipeline<K, M, S, C>
where
    K: KeywordSource,
    M: MetricsSource,
    S: Storage,
    C: ConfigProvider,
{
    async fn extract(&self) -> Result<KeywordSet> {
        let seed = self.config.seed_keyword();
        tracing::info!("Generating keywords for: {}", seed);

        let generated = self
            .keywords
            .generate(seed, self.config.keyword_count())
            .await?;

        require_keywords(seed, aggregate([generated]))
    }

    async fn transform(&self, keywords: KeywordSet) -> Result<TransformResult> {
        let candidates = keywords.sorted();
        let outcome = self.metrics.fetch_metrics(&candidates, &self.account_id).await;

        let provenance = match &outcome {
            MetricsOutcome::Measured(records) => {
                tracing::info!("Received metrics for {} keywords", records.len());
                MetricsProvenance::Measured
            }
            MetricsOutcome::Empty => {
                tracing::warn!("⚠️ No keyword metrics found, saving generated keywords with zero metrics");
                MetricsProvenance::Unavailable
            }
            MetricsOutcome::Failed(reason) => {
                tracing::warn!("⚠️ Metrics lookup failed ({}), saving generated keywords with zero metrics", reason);
                MetricsProvenance::Unavailable
            }
        };

        let records = merge_metrics(&keywords, outcome);
        let ranked = score_keywords(&records, self.config.score_weights());

        Ok(TransformResult { ranked, provenance })
    }

    async fn load(&self, result: TransformResult) -> Result<ExportReport> {
        let options = ExportOptions {
            limit: self.config.export_limit(),
            keywords_only_fallback: self.config.keywords_only_fallback(),
        };
        export_csv(&self.storage, self.config.output_path(), &result, options).await
    }

    fn output_path(&self) -> &str {
        self.config.output_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipelines::test_support::{MockConfig, MockStorage, StaticKeywords, StaticMetrics};
    use crate::core::etl::KeywordEngine;
    use crate::domain::model::{ExportStatus, KeywordRecord};
    use crate::utils::error::AgentError;

    fn pipeline(
        keywords: StaticKeywords,
        metrics: MetricsOutcome,
        storage: MockStorage,
        config: MockConfig,
    ) -> AdsPipeline<StaticKeywords, StaticMetrics, MockStorage, MockConfig> {
        AdsPipeline::new(keywords, StaticMetrics(metrics), storage, config, "1234567890".to_string())
    }

    fn data_rows(csv: &str) -> Vec<Vec<String>> {
        csv.lines()
            .skip(1)
            .map(|line| line.split(',').map(str::to_string).collect())
            .collect()
    }

    #[tokio::test]
    async fn test_extract_deduplicates_generated_keywords() {
        let pipeline = pipeline(
            StaticKeywords::of(&["seo", "seo", " seo ", "SEO", ""]),
            MetricsOutcome::Empty,
            MockStorage::default(),
            MockConfig::new("seo"),
        );

        let keywords = pipeline.extract().await.unwrap();
        assert_eq!(keywords.sorted(), vec!["SEO", "seo"]);
    }

    #[tokio::test]
    async fn test_extract_with_no_keywords_is_fatal() {
        let pipeline = pipeline(
            StaticKeywords::of(&[" ", ""]),
            MetricsOutcome::Empty,
            MockStorage::default(),
            MockConfig::new("nothing"),
        );

        let result = pipeline.extract().await;
        assert!(matches!(result, Err(AgentError::NoKeywords { seed }) if seed == "nothing"));
    }

    #[tokio::test]
    async fn test_keyword_source_failure_is_fatal() {
        let storage = MockStorage::default();
        let engine = KeywordEngine::new(pipeline(
            StaticKeywords(None),
            MetricsOutcome::Empty,
            storage.clone(),
            MockConfig::new("coffee"),
        ));

        assert!(engine.run().await.is_err());
        assert!(storage.get_file("keywords.csv").await.is_none());
    }

    #[tokio::test]
    async fn test_empty_metrics_exports_every_keyword_with_zero_metrics() {
        let storage = MockStorage::default();
        let engine = KeywordEngine::new(pipeline(
            StaticKeywords::numbered(60),
            MetricsOutcome::Empty,
            storage.clone(),
            MockConfig::new("coffee"),
        ));

        let summary = engine.run().await.unwrap();
        assert_eq!(summary.provenance, MetricsProvenance::Unavailable);

        let csv = storage.get_file("keywords.csv").await.unwrap();
        let rows = data_rows(&csv);
        assert_eq!(rows.len(), 60);
        for row in &rows {
            assert_eq!(row[1], "0");
            assert_eq!(row[2], "0.0");
        }
    }

    #[tokio::test]
    async fn test_failed_metrics_with_keywords_only_layout() {
        let storage = MockStorage::default();
        let mut config = MockConfig::new("coffee");
        config.keywords_only_fallback = true;
        let engine = KeywordEngine::new(pipeline(
            StaticKeywords::of(&["latte", "mocha"]),
            MetricsOutcome::Failed("401 unauthenticated".to_string()),
            storage.clone(),
            config,
        ));

        engine.run().await.unwrap();

        let csv = storage.get_file("keywords.csv").await.unwrap();
        assert_eq!(csv, "keyword\nlatte\nmocha\n");
    }

    #[tokio::test]
    async fn test_measured_metrics_are_ranked_and_truncated() {
        let generated: Vec<String> = (0..120).map(|i| format!("kw{:03}", i)).collect();
        let measured: Vec<KeywordRecord> = (0..120u64)
            .map(|i| KeywordRecord::new(format!("kw{:03}", i), 1000 + i, 0.5))
            .collect();
        let storage = MockStorage::default();
        let engine = KeywordEngine::new(pipeline(
            StaticKeywords(Some(generated)),
            MetricsOutcome::Measured(measured),
            storage.clone(),
            MockConfig::new("coffee"),
        ));

        let summary = engine.run().await.unwrap();
        assert_eq!(summary.provenance, MetricsProvenance::Measured);

        let csv = storage.get_file("keywords.csv").await.unwrap();
        let rows = data_rows(&csv);
        assert_eq!(rows.len(), 50);
        assert_eq!(rows[0], vec!["kw119", "1119", "0.5", "619.0"]);
        assert_eq!(rows[49][0], "kw070");
    }

    #[tokio::test]
    async fn test_write_failure_does_not_fail_the_run() {
        let engine = KeywordEngine::new(pipeline(
            StaticKeywords::of(&["latte"]),
            MetricsOutcome::Measured(vec![KeywordRecord::new("latte", 900, 0.4)]),
            MockStorage::failing(),
            MockConfig::new("coffee"),
        ));

        let summary = engine.run().await.unwrap();
        assert!(matches!(summary.export, ExportStatus::Failed { .. }));
    }
}
