use clap::Parser;
use keyword_agent::adapters::{GeminiKeywordSource, GoogleAdsMetricsSource};
use keyword_agent::utils::{logger, report, validation::Validate};
use keyword_agent::{
    AdsPipeline, AgentConfig, CliConfig, KeywordEngine, LocalStorage, Result,
};

type Engine = KeywordEngine<
    AdsPipeline<GeminiKeywordSource, GoogleAdsMetricsSource, LocalStorage, CliConfig>,
>;

/// 驗證設定並組裝整條管線
fn build_engine(config: CliConfig) -> Result<Engine> {
    config.validate()?;

    let api_config = AgentConfig::load(config.config.as_deref())?;
    api_config.validate_for_ads()?;

    let customer_id = config.normalized_customer_id()?;
    let keyword_source = GeminiKeywordSource::new(&api_config)?;
    let metrics_source = GoogleAdsMetricsSource::new(&api_config)?;

    println!("Generating keywords for: {}", config.seed.trim());
    let pipeline = AdsPipeline::new(
        keyword_source,
        metrics_source,
        LocalStorage::default(),
        config,
        customer_id,
    );
    Ok(KeywordEngine::new(pipeline))
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // .env 可能帶有 RUST_LOG，需先於日誌初始化載入
    let dotenv = report::load_dotenv();
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    dotenv.log();

    tracing::info!("Starting keyword-agent");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let engine = match build_engine(config) {
        Ok(engine) => engine,
        Err(e) => std::process::exit(report::report_failure(&e)),
    };

    match engine.run().await {
        Ok(summary) => report::print_summary(&summary),
        Err(e) => std::process::exit(report::report_failure(&e)),
    }
}
