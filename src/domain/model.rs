use serde::{Deserialize, Serialize};

/// One keyword together with the metrics used to rank it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub keyword: String,
    pub search_volume: u64,
    pub competition: f64,
}

impl KeywordRecord {
    pub fn new(keyword: impl Into<String>, search_volume: u64, competition: f64) -> Self {
        Self {
            keyword: keyword.into(),
            search_volume,
            competition,
        }
    }

    /// 沒有指標資料時的預設值 (search_volume=0, competition=0.0)
    pub fn unmeasured(keyword: impl Into<String>) -> Self {
        Self::new(keyword, 0, 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub record: KeywordRecord,
    pub score: f64,
}

impl ScoredRecord {
    pub fn keyword(&self) -> &str {
        &self.record.keyword
    }
}

/// Scored keywords, highest score first.
pub type RankedTable = Vec<ScoredRecord>;

/// Weights of the linear scoring formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub sv_weight: f64,
    pub comp_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            sv_weight: 1.0,
            comp_weight: 1000.0,
        }
    }
}

/// Outcome of asking the enrichment source for metrics.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricsOutcome {
    Measured(Vec<KeywordRecord>),
    Empty,
    Failed(String),
}

impl MetricsOutcome {
    pub fn from_records(records: Vec<KeywordRecord>) -> Self {
        if records.is_empty() {
            MetricsOutcome::Empty
        } else {
            MetricsOutcome::Measured(records)
        }
    }
}

/// Where the metrics in a ranked table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsProvenance {
    Measured,
    Synthetic,
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub ranked: RankedTable,
    pub provenance: MetricsProvenance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub path: String,
    pub rows: usize,
}

/// What happened when the ranked table was written out.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportStatus {
    Written(ExportReport),
    Failed { path: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub keywords: usize,
    pub provenance: MetricsProvenance,
    pub export: ExportStatus,
}
