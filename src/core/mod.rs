pub mod aggregate;
pub mod etl;
pub mod export;
pub mod scoring;
pub mod synthetic;

pub use crate::domain::model::{KeywordRecord, RankedTable, ScoredRecord, TransformResult};
pub use crate::domain::ports::{
    ConfigProvider, KeywordSource, MetricsSource, Pipeline, Storage, SuggestionSource,
};
pub use crate::utils::error::Result;
