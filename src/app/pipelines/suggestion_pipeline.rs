use super::require_keywords;
use crate::core::aggregate::{aggregate, KeywordSet};
use crate::core::export::{export_csv, ExportOptions};
use crate::core::scoring::score_keywords;
use crate::core::synthetic::SyntheticMetrics;
use crate::core::{ConfigProvider, KeywordSource, Pipeline, Storage, SuggestionSource, TransformResult};
use crate::domain::model::{ExportReport, MetricsProvenance};
use crate::utils::error::Result;

/// Generated keywords expanded with autocomplete suggestions and ranked on
/// synthetic metrics.
pub struct SuggestionPipeline<K, G, S, C>
where
    K: KeywordSource,
    G: SuggestionSource,
    S: Storage,
    C: ConfigProvider,
{
    keywords: K,
    suggestions: G,
    storage: S,
    config: C,
    metrics: SyntheticMetrics,
}

impl<K, G, S, C> SuggestionPipeline<K, G, S, C>
where
    K: KeywordSource,
    G: SuggestionSource,
    S: Storage,
    C: ConfigProvider,
{
    pub fn new(keywords: K, suggestions: G, storage: S, config: C, metrics: SyntheticMetrics) -> Self {
        Self {
            keywords,
            suggestions,
            storage,
            config,
            metrics,
        }
    }
}

#[async_trait::async_trait]
impl<K, G, S, C> Pipeline for SuggestionPipeline<K, G, S, C>
where
    K: KeywordSource,
    G: SuggestionSource,
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
        let mut keywords = require_keywords(seed, aggregate([generated]))?;

        // 依字母順序查詢，讓請求順序固定
        for keyword in keywords.sorted() {
            match self.suggestions.suggest(&keyword).await {
                Ok(suggestions) => {
                    let added = keywords.extend_from(&suggestions);
                    tracing::debug!(
                        "'{}': {} suggestions, {} new",
                        keyword,
                        suggestions.len(),
                        added
                    );
                }
                Err(e) => {
                    tracing::warn!("⚠️ Skipping suggestions for '{}': {}", keyword, e);
                }
            }
        }

        Ok(keywords)
    }

    async fn transform(&self, keywords: KeywordSet) -> Result<TransformResult> {
        if let Some(seed) = self.metrics.seed() {
            tracing::info!("🎲 Assigning synthetic metrics (seed {})", seed);
        } else {
            tracing::info!("🎲 Assigning synthetic metrics");
        }

        let records = self.metrics.assign(&keywords);
        let ranked = score_keywords(&records, self.config.score_weights());

        Ok(TransformResult {
            ranked,
            provenance: MetricsProvenance::Synthetic,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<ExportReport> {
        let options = ExportOptions {
            limit: self.config.export_limit(),
            keywords_only_fallback: false,
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
    use crate::app::pipelines::test_support::{MapSuggestions, MockConfig, MockStorage, StaticKeywords};
    use crate::core::etl::KeywordEngine;
    use crate::domain::model::ExportStatus;

    fn pipeline(
        keywords: StaticKeywords,
        suggestions: MapSuggestions,
        storage: MockStorage,
        seed: Option<u64>,
    ) -> SuggestionPipeline<StaticKeywords, MapSuggestions, MockStorage, MockConfig> {
        let mut config = MockConfig::new("coffee");
        config.output_path = "top_keywords.csv".to_string();
        SuggestionPipeline::new(
            keywords,
            suggestions,
            storage,
            config,
            SyntheticMetrics::new(seed),
        )
    }

    #[tokio::test]
    async fn test_suggestions_are_merged_into_generated_keywords() {
        let suggestions = MapSuggestions::default()
            .with("espresso", &["espresso machine", "espresso martini", "latte"])
            .with("latte", &["latte art"]);
        let pipeline = pipeline(
            StaticKeywords::of(&["espresso", "latte"]),
            suggestions,
            MockStorage::default(),
            Some(1),
        );

        let keywords = pipeline.extract().await.unwrap();

        assert_eq!(
            keywords.sorted(),
            vec!["espresso", "espresso machine", "espresso martini", "latte", "latte art"]
        );
    }

    #[tokio::test]
    async fn test_failing_suggestion_is_skipped() {
        let suggestions = MapSuggestions::default()
            .with("espresso", &["espresso machine"])
            .with("mocha", &["mocha recipe"])
            .failing_on("latte");
        let pipeline = pipeline(
            StaticKeywords::of(&["espresso", "latte", "mocha"]),
            suggestions,
            MockStorage::default(),
            Some(1),
        );

        let keywords = pipeline.extract().await.unwrap();

        assert_eq!(keywords.len(), 5);
        assert!(keywords.contains("espresso machine"));
        assert!(keywords.contains("mocha recipe"));
        assert!(keywords.contains("latte"));
    }

    #[tokio::test]
    async fn test_fixed_seed_gives_identical_rankings() {
        let make = |storage: MockStorage| {
            pipeline(
                StaticKeywords::of(&["espresso", "latte", "mocha", "cortado"]),
                MapSuggestions::default().with("latte", &["latte art", "oat latte"]),
                storage,
                Some(2024),
            )
        };

        let first = MockStorage::default();
        let second = MockStorage::default();
        KeywordEngine::new(make(first.clone())).run().await.unwrap();
        KeywordEngine::new(make(second.clone())).run().await.unwrap();

        let first_csv = first.get_file("top_keywords.csv").await.unwrap();
        let second_csv = second.get_file("top_keywords.csv").await.unwrap();
        assert_eq!(first_csv, second_csv);
        assert_eq!(first_csv.lines().count(), 7);
    }

    #[tokio::test]
    async fn test_synthetic_metrics_are_in_range_and_ranked() {
        let storage = MockStorage::default();
        let engine = KeywordEngine::new(pipeline(
            StaticKeywords::numbered(80),
            MapSuggestions::default(),
            storage.clone(),
            Some(7),
        ));

        let summary = engine.run().await.unwrap();

        assert_eq!(summary.provenance, MetricsProvenance::Synthetic);
        assert!(matches!(summary.export, ExportStatus::Written(ref r) if r.rows == 50));

        let csv = storage.get_file("top_keywords.csv").await.unwrap();
        let mut previous = f64::INFINITY;
        for line in csv.lines().skip(1) {
            let fields: Vec<&str> = line.split(',').collect();
            let volume: u64 = fields[1].parse().unwrap();
            let competition: f64 = fields[2].parse().unwrap();
            let score: f64 = fields[3].parse().unwrap();
            assert!((100..=10_000).contains(&volume));
            assert!((0.0..=1.0).contains(&competition));
            assert!(score <= previous);
            previous = score;
        }
    }
}
