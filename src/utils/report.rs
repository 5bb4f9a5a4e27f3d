use crate::domain::model::{ExportStatus, MetricsProvenance, RunSummary};
use crate::utils::error::AgentError;
use std::path::{Path, PathBuf};

/// Result of loading a `.env` file, kept until the logger is up.
#[derive(Debug, PartialEq, Eq)]
pub enum DotenvStatus {
    Loaded(PathBuf),
    NotFound,
    Failed(String),
}

impl DotenvStatus {
    fn from_result(result: std::result::Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => DotenvStatus::Loaded(path),
            Err(e) if e.not_found() => DotenvStatus::NotFound,
            Err(e) => DotenvStatus::Failed(e.to_string()),
        }
    }

    pub fn log(&self) {
        match self {
            DotenvStatus::Loaded(path) => tracing::info!("Loaded .env file from {}", path.display()),
            DotenvStatus::NotFound => tracing::debug!("No .env file found"),
            DotenvStatus::Failed(reason) => tracing::warn!("⚠️ Failed to load .env file: {}", reason),
        }
    }
}

/// 載入工作目錄下的 .env (不存在時略過)；須在初始化日誌前呼叫
pub fn load_dotenv() -> DotenvStatus {
    DotenvStatus::from_result(dotenvy::dotenv())
}

pub fn load_dotenv_from(path: &Path) -> DotenvStatus {
    DotenvStatus::from_result(dotenvy::from_path(path).map(|_| path.to_path_buf()))
}

pub fn print_summary(summary: &RunSummary) {
    match &summary.export {
        ExportStatus::Written(report) => {
            let what = match summary.provenance {
                MetricsProvenance::Unavailable => "All generated keywords",
                MetricsProvenance::Measured | MetricsProvenance::Synthetic => "Top keywords",
            };
            println!("✅ {} ({} rows) saved to {}", what, report.rows, report.path);
        }
        ExportStatus::Failed { path, reason } => {
            eprintln!("❌ Failed to save CSV to {}: {}", path, reason);
        }
    }
}

/// Logs and prints a fatal error, returning the process exit code.
pub fn report_failure(e: &AgentError) -> i32 {
    tracing::error!(
        "❌ Keyword research failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    e.exit_code()
}
