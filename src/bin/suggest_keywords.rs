use clap::Parser;
use keyword_agent::adapters::{GeminiKeywordSource, SerpApiSuggestionSource};
use keyword_agent::config::prompt::fill_from_stdin;
use keyword_agent::utils::{logger, report, validation::Validate};
use keyword_agent::{
    AgentConfig, KeywordEngine, LocalStorage, Result, SuggestConfig, SuggestionPipeline,
    SyntheticMetrics,
};

type Engine = KeywordEngine<
    SuggestionPipeline<GeminiKeywordSource, SerpApiSuggestionSource, LocalStorage, SuggestConfig>,
>;

fn build_engine(mut config: SuggestConfig) -> Result<Engine> {
    // 缺少的種子關鍵字與 API 金鑰改用互動輸入
    let mut api_config = AgentConfig::load(config.config.as_deref())?;
    config.seed = Some(fill_from_stdin(config.seed.as_deref(), "Enter a seed keyword")?);
    let serpapi_key = fill_from_stdin(api_config.serpapi_key(), "Enter your SerpApi API key")?;
    api_config.serpapi.api_key = Some(serpapi_key);
    let gemini_key = fill_from_stdin(api_config.gemini_api_key(), "Enter your Gemini API key")?;
    api_config.gemini.api_key = Some(gemini_key);

    config.validate()?;
    api_config.validate_for_suggestions()?;

    let synthetic = SyntheticMetrics::new(config.random_seed);
    let pipeline = SuggestionPipeline::new(
        GeminiKeywordSource::new(&api_config)?,
        SerpApiSuggestionSource::new(&api_config)?,
        LocalStorage::default(),
        config,
        synthetic,
    );
    Ok(KeywordEngine::new(pipeline))
}

#[tokio::main]
async fn main() {
    let config = SuggestConfig::parse();

    let dotenv = report::load_dotenv();
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    dotenv.log();

    let engine = match build_engine(config) {
        Ok(engine) => engine,
        Err(e) => std::process::exit(report::report_failure(&e)),
    };

    match engine.run().await {
        Ok(summary) => report::print_summary(&summary),
        Err(e) => std::process::exit(report::report_failure(&e)),
    }
}
