// Adapters layer: HTTP clients for the remote keyword, metrics and suggestion services.

pub mod gemini;
pub mod google_ads;
pub mod http;
pub mod serpapi;

pub use gemini::GeminiKeywordSource;
pub use google_ads::GoogleAdsMetricsSource;
pub use serpapi::SerpApiSuggestionSource;
