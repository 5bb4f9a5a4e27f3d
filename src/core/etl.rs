use crate::domain::model::{ExportStatus, RunSummary};
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct KeywordEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> KeywordEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract, transform and load in order.
    ///
    /// Extract and transform errors abort the run. A failed export is
    /// logged and reported in the summary instead.
    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("🚀 Starting keyword research run");

        let keywords = self.pipeline.extract().await?;
        tracing::info!("🔑 Collected {} unique keywords", keywords.len());
        let keyword_count = keywords.len();

        let result = self.pipeline.transform(keywords).await?;
        tracing::info!(
            "📊 Ranked {} keywords (metrics: {:?})",
            result.ranked.len(),
            result.provenance
        );
        let provenance = result.provenance;

        let export = match self.pipeline.load(result).await {
            Ok(report) => {
                tracing::info!("📁 Saved {} rows to {}", report.rows, report.path);
                ExportStatus::Written(report)
            }
            Err(e) => {
                let path = self.pipeline.output_path().to_string();
                tracing::error!("❌ Failed to save CSV to {}: {}", path, e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                ExportStatus::Failed {
                    path,
                    reason: e.to_string(),
                }
            }
        };

        Ok(RunSummary {
            keywords: keyword_count,
            provenance,
            export,
        })
    }
}
