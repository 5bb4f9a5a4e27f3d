use crate::core::ConfigProvider;
use crate::core::export::DEFAULT_EXPORT_LIMIT;
use crate::domain::model::ScoreWeights;
use crate::utils::error::{AgentError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Gemini keyword generation ranked with Google Ads metrics.
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "keyword-agent")]
#[command(about = "AI SEO keyword research agent")]
pub struct CliConfig {
    /// Seed keyword
    pub seed: String,

    /// Output CSV file
    #[arg(long, default_value = "keywords.csv")]
    pub output: String,

    /// Google Ads customer ID (digits only, dashes are stripped)
    #[arg(long, alias = "customer_id")]
    pub customer_id: String,

    /// Number of keywords to request from Gemini
    #[arg(long, default_value_t = 100)]
    pub count: usize,

    /// Number of ranked rows written to the CSV
    #[arg(long, default_value_t = DEFAULT_EXPORT_LIMIT)]
    pub limit: usize,

    #[arg(long, default_value_t = 1.0)]
    pub sv_weight: f64,

    #[arg(long, default_value_t = 1000.0)]
    pub comp_weight: f64,

    /// Write only the keyword column when Google Ads returns no metrics
    #[arg(long)]
    pub keywords_only_fallback: bool,

    /// Optional TOML file with API credentials and endpoints
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

/// Gemini keyword generation merged with SerpApi autocomplete suggestions.
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "suggest-keywords")]
#[command(about = "Expand Gemini keywords with autocomplete suggestions")]
pub struct SuggestConfig {
    /// Seed keyword (prompted for when omitted)
    pub seed: Option<String>,

    #[arg(long, default_value = "top_keywords.csv")]
    pub output: String,

    #[arg(long, default_value_t = 20)]
    pub count: usize,

    #[arg(long, default_value_t = DEFAULT_EXPORT_LIMIT)]
    pub limit: usize,

    /// Seed for the synthetic metrics generator
    #[arg(long)]
    pub random_seed: Option<u64>,

    #[arg(long, default_value_t = 1.0)]
    pub sv_weight: f64,

    #[arg(long, default_value_t = 1000.0)]
    pub comp_weight: f64,

    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

fn validate_run_settings(
    seed: &str,
    count: usize,
    limit: usize,
    output: &str,
    weights: ScoreWeights,
) -> Result<()> {
    validation::validate_non_empty_string("seed", seed)?;
    validation::validate_range("count", count, 1, 500)?;
    validation::validate_positive_number("limit", limit, 1)?;
    validation::validate_path("output", output)?;

    if !weights.sv_weight.is_finite() || !weights.comp_weight.is_finite() {
        return Err(AgentError::InvalidConfigValueError {
            field: "weights".to_string(),
            value: format!("{}/{}", weights.sv_weight, weights.comp_weight),
            reason: "Weights must be finite numbers".to_string(),
        });
    }
    Ok(())
}

impl CliConfig {
    /// Customer ID with dashes removed.
    pub fn normalized_customer_id(&self) -> Result<String> {
        validation::normalize_customer_id("customer_id", &self.customer_id)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_run_settings(
            &self.seed,
            self.count,
            self.limit,
            &self.output,
            self.score_weights(),
        )?;
        self.normalized_customer_id()?;
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn seed_keyword(&self) -> &str {
        self.seed.trim()
    }

    fn keyword_count(&self) -> usize {
        self.count
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn export_limit(&self) -> usize {
        self.limit
    }

    fn score_weights(&self) -> ScoreWeights {
        ScoreWeights {
            sv_weight: self.sv_weight,
            comp_weight: self.comp_weight,
        }
    }

    fn keywords_only_fallback(&self) -> bool {
        self.keywords_only_fallback
    }
}

impl Validate for SuggestConfig {
    fn validate(&self) -> Result<()> {
        let seed = validation::validate_required_field("seed", &self.seed)?;
        validate_run_settings(
            seed,
            self.count,
            self.limit,
            &self.output,
            self.score_weights(),
        )
    }
}

impl ConfigProvider for SuggestConfig {
    fn seed_keyword(&self) -> &str {
        self.seed.as_deref().map(str::trim).unwrap_or_default()
    }

    fn keyword_count(&self) -> usize {
        self.count
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn export_limit(&self) -> usize {
        self.limit
    }

    fn score_weights(&self) -> ScoreWeights {
        ScoreWeights {
            sv_weight: self.sv_weight,
            comp_weight: self.comp_weight,
        }
    }
}
