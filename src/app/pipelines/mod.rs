pub mod ads_pipeline;
pub mod suggestion_pipeline;

pub use ads_pipeline::AdsPipeline;
pub use suggestion_pipeline::SuggestionPipeline;

use crate::core::aggregate::KeywordSet;
use crate::utils::error::{AgentError, Result};

/// Zero keywords from the keyword source ends the run.
fn require_keywords(seed: &str, keywords: KeywordSet) -> Result<KeywordSet> {
    if keywords.is_empty() {
        tracing::error!("❌ No keywords generated for '{}'", seed);
        return Err(AgentError::NoKeywords {
            seed: seed.to_string(),
        });
    }
    Ok(keywords)
}
