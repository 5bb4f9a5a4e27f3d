pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, SuggestConfig};
pub use config::{AgentConfig, LocalStorage};

pub use app::pipelines::{AdsPipeline, SuggestionPipeline};
pub use crate::core::{etl::KeywordEngine, synthetic::SyntheticMetrics};
pub use utils::error::{AgentError, Result};
