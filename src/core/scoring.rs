//! Linear keyword scoring.
//!
//! ```text
//! score = search_volume * sv_weight - competition * comp_weight
//! ```
//!
//! With the default weights (`1.0`, `1000.0`) competition dominates for
//! ordinary search volumes in the hundreds to low thousands.

use std::collections::HashSet;

use crate::core::aggregate::KeywordSet;
use crate::domain::model::{KeywordRecord, MetricsOutcome, RankedTable, ScoreWeights, ScoredRecord};

pub fn score_record(record: &KeywordRecord, weights: ScoreWeights) -> f64 {
    record.search_volume as f64 * weights.sv_weight - record.competition * weights.comp_weight
}

/// Scores every record and sorts by score, highest first.
///
/// The sort is stable, so records with equal scores keep their input order.
/// The input slice is left untouched.
pub fn score_keywords(records: &[KeywordRecord], weights: ScoreWeights) -> RankedTable {
    let mut ranked: RankedTable = records
        .iter()
        .map(|record| ScoredRecord {
            record: record.clone(),
            score: score_record(record, weights),
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Builds the records to score from the candidate set and the enrichment outcome.
///
/// Candidates the enrichment source did not measure are kept with zero
/// metrics instead of being dropped.
pub fn merge_metrics(candidates: &KeywordSet, outcome: MetricsOutcome) -> Vec<KeywordRecord> {
    match outcome {
        MetricsOutcome::Measured(measured) => {
            let mut seen = HashSet::new();
            let mut records = Vec::with_capacity(measured.len() + candidates.len());

            for record in measured {
                let keyword = record.keyword.trim();
                if keyword.is_empty() || !seen.insert(keyword.to_string()) {
                    continue;
                }
                records.push(KeywordRecord {
                    keyword: keyword.to_string(),
                    ..record
                });
            }

            let unmeasured: Vec<KeywordRecord> = candidates
                .sorted()
                .into_iter()
                .filter(|keyword| !seen.contains(keyword))
                .map(KeywordRecord::unmeasured)
                .collect();
            if !unmeasured.is_empty() {
                tracing::debug!(
                    "{} candidate keywords had no metrics, scoring them as zero",
                    unmeasured.len()
                );
            }
            records.extend(unmeasured);
            records
        }
        MetricsOutcome::Empty | MetricsOutcome::Failed(_) => candidates
            .sorted()
            .into_iter()
            .map(KeywordRecord::unmeasured)
            .collect(),
    }
}
