use crate::domain::model::{ExportReport, MetricsProvenance, ScoredRecord, TransformResult};
use crate::domain::ports::Storage;
use crate::utils::error::{AgentError, Result};

pub const DEFAULT_EXPORT_LIMIT: usize = 50;

pub const RANKED_HEADER: [&str; 4] = ["keyword", "search_volume", "competition", "score"];

#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    pub limit: usize,
    /// 無指標時只輸出 keyword 欄位
    pub keywords_only_fallback: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_EXPORT_LIMIT,
            keywords_only_fallback: false,
        }
    }
}

/// Floats keep a decimal point (`0.0`, `300.0`) so metric columns read as numbers.
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

/// Rows that end up in the file: the top `limit` when metrics exist, every row otherwise.
pub fn select_rows(result: &TransformResult, limit: usize) -> &[ScoredRecord] {
    match result.provenance {
        MetricsProvenance::Unavailable => &result.ranked,
        MetricsProvenance::Measured | MetricsProvenance::Synthetic => {
            &result.ranked[..limit.min(result.ranked.len())]
        }
    }
}

pub fn render_ranked_csv(rows: &[ScoredRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(RANKED_HEADER)?;

    for row in rows {
        writer.write_record([
            row.record.keyword.clone(),
            row.record.search_volume.to_string(),
            format_float(row.record.competition),
            format_float(row.score),
        ])?;
    }

    writer.into_inner().map_err(|e| AgentError::ProcessingError {
        message: format!("Failed to flush CSV buffer: {}", e),
    })
}

pub fn render_keyword_csv<'a, I>(keywords: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["keyword"])?;
    for keyword in keywords {
        writer.write_record([keyword])?;
    }

    writer.into_inner().map_err(|e| AgentError::ProcessingError {
        message: format!("Failed to flush CSV buffer: {}", e),
    })
}

/// Writes the ranked keywords to `path` through `storage`, replacing any existing file.
pub async fn export_csv<S: Storage>(
    storage: &S,
    path: &str,
    result: &TransformResult,
    options: ExportOptions,
) -> Result<ExportReport> {
    if result.ranked.is_empty() {
        return Err(AgentError::ProcessingError {
            message: "Refusing to export an empty keyword table".to_string(),
        });
    }

    let rows = select_rows(result, options.limit);
    let data = if result.provenance == MetricsProvenance::Unavailable
        && options.keywords_only_fallback
    {
        render_keyword_csv(rows.iter().map(|row| row.keyword()))?
    } else {
        render_ranked_csv(rows)?
    };

    tracing::debug!("Writing {} rows ({} bytes) to {}", rows.len(), data.len(), path);
    let written_to = storage.write_file(path, &data).await?;

    Ok(ExportReport {
        path: written_to,
        rows: rows.len(),
    })
}
