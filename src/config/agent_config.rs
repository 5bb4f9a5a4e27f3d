use crate::utils::error::{AgentError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const GEMINI_API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const SERPAPI_KEY_VAR: &str = "SERPAPI_KEY";
pub const ADS_DEVELOPER_TOKEN_VAR: &str = "GOOGLE_ADS_DEVELOPER_TOKEN";
pub const ADS_ACCESS_TOKEN_VAR: &str = "GOOGLE_ADS_ACCESS_TOKEN";
pub const ADS_LOGIN_CUSTOMER_ID_VAR: &str = "GOOGLE_ADS_LOGIN_CUSTOMER_ID";

/// API credentials and endpoints for the remote collaborators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub google_ads: GoogleAdsConfig,
    #[serde(default)]
    pub serpapi: SerpApiConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_gemini_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleAdsConfig {
    pub developer_token: Option<String>,
    pub access_token: Option<String>,
    pub login_customer_id: Option<String>,
    #[serde(default = "default_ads_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_ads_api_version")]
    pub api_version: String,
    /// 2840 = United States
    #[serde(default = "default_geo_target_id")]
    pub geo_target_id: u32,
    /// 1000 = English
    #[serde(default = "default_language_id")]
    pub language_id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerpApiConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_serpapi_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_ads_endpoint() -> String {
    "https://googleads.googleapis.com".to_string()
}

fn default_ads_api_version() -> String {
    "v17".to_string()
}

fn default_geo_target_id() -> u32 {
    2840
}

fn default_language_id() -> u32 {
    1000
}

fn default_serpapi_endpoint() -> String {
    "https://serpapi.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_gemini_endpoint(),
            model: default_gemini_model(),
        }
    }
}

impl Default for GoogleAdsConfig {
    fn default() -> Self {
        Self {
            developer_token: None,
            access_token: None,
            login_customer_id: None,
            endpoint: default_ads_endpoint(),
            api_version: default_ads_api_version(),
            geo_target_id: default_geo_target_id(),
            language_id: default_language_id(),
        }
    }
}

impl Default for SerpApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_serpapi_endpoint(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// 未設定、空字串或未替換的 `${VAR}` 都視為缺少
fn usable(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !(v.starts_with("${") && v.ends_with('}')))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl AgentConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AgentError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AgentError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Loads `path` when given, then fills any missing credential from the environment.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                tracing::info!("📁 Loading API configuration from: {}", path);
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.fill_from_env();
        Ok(config)
    }

    fn fill_from_env(&mut self) {
        fn fill(slot: &mut Option<String>, var: &str) {
            if usable(slot).is_none() {
                if let Some(value) = env_value(var) {
                    *slot = Some(value);
                }
            }
        }

        fill(&mut self.gemini.api_key, GEMINI_API_KEY_VAR);
        fill(&mut self.serpapi.api_key, SERPAPI_KEY_VAR);
        fill(&mut self.google_ads.developer_token, ADS_DEVELOPER_TOKEN_VAR);
        fill(&mut self.google_ads.access_token, ADS_ACCESS_TOKEN_VAR);
        fill(&mut self.google_ads.login_customer_id, ADS_LOGIN_CUSTOMER_ID_VAR);
    }

    /// 替換環境變數 (例如 ${GOOGLE_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| AgentError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn gemini_api_key(&self) -> Option<&str> {
        usable(&self.gemini.api_key)
    }

    pub fn serpapi_key(&self) -> Option<&str> {
        usable(&self.serpapi.api_key)
    }

    pub fn ads_developer_token(&self) -> Option<&str> {
        usable(&self.google_ads.developer_token)
    }

    pub fn ads_access_token(&self) -> Option<&str> {
        usable(&self.google_ads.access_token)
    }

    pub fn ads_login_customer_id(&self) -> Option<&str> {
        usable(&self.google_ads.login_customer_id)
    }

    pub fn require_gemini_key(&self) -> Result<&str> {
        self.gemini_api_key()
            .ok_or_else(|| AgentError::MissingConfigError {
                field: GEMINI_API_KEY_VAR.to_string(),
            })
    }

    pub fn require_serpapi_key(&self) -> Result<&str> {
        self.serpapi_key().ok_or_else(|| AgentError::MissingConfigError {
            field: SERPAPI_KEY_VAR.to_string(),
        })
    }

    /// Credentials needed by the Gemini + Google Ads pipeline.
    pub fn validate_for_ads(&self) -> Result<()> {
        self.validate()?;
        self.require_gemini_key()?;
        if self.ads_developer_token().is_none() {
            return Err(AgentError::MissingConfigError {
                field: ADS_DEVELOPER_TOKEN_VAR.to_string(),
            });
        }
        if self.ads_access_token().is_none() {
            return Err(AgentError::MissingConfigError {
                field: ADS_ACCESS_TOKEN_VAR.to_string(),
            });
        }
        if let Some(login) = self.ads_login_customer_id() {
            validation::normalize_customer_id("google_ads.login_customer_id", login)?;
        }
        Ok(())
    }

    /// Credentials needed by the Gemini + SerpApi pipeline.
    pub fn validate_for_suggestions(&self) -> Result<()> {
        self.validate()?;
        self.require_gemini_key()?;
        self.require_serpapi_key()?;
        Ok(())
    }
}

impl Validate for AgentConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("gemini.endpoint", &self.gemini.endpoint)?;
        validation::validate_non_empty_string("gemini.model", &self.gemini.model)?;
        validation::validate_url("google_ads.endpoint", &self.google_ads.endpoint)?;
        validation::validate_non_empty_string("google_ads.api_version", &self.google_ads.api_version)?;
        validation::validate_url("serpapi.endpoint", &self.serpapi.endpoint)?;
        validation::validate_range("http.timeout_seconds", self.http.timeout_seconds, 1, 600)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_point_at_public_endpoints() {
        let config = AgentConfig::default();

        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert_eq!(config.google_ads.geo_target_id, 2840);
        assert_eq!(config.google_ads.language_id, 1000);
        assert_eq!(config.http.timeout_seconds, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let toml_content = r#"
[gemini]
api_key = "gemini-key"
model = "gemini-1.5-pro"

[serpapi]
api_key = "serp-key"
endpoint = "http://localhost:9000"
"#;

        let config = AgentConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.gemini_api_key(), Some("gemini-key"));
        assert_eq!(config.gemini.model, "gemini-1.5-pro");
        assert_eq!(config.serpapi.endpoint, "http://localhost:9000");
        assert_eq!(config.google_ads.api_version, "v17");
        assert!(config.validate_for_suggestions().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("KEYWORD_AGENT_TEST_GEMINI_KEY", "substituted-key");

        let toml_content = r#"
[gemini]
api_key = "${KEYWORD_AGENT_TEST_GEMINI_KEY}"
"#;

        let config = AgentConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.gemini_api_key(), Some("substituted-key"));

        std::env::remove_var("KEYWORD_AGENT_TEST_GEMINI_KEY");
    }

    #[test]
    fn test_unresolved_placeholder_counts_as_missing() {
        let toml_content = r#"
[serpapi]
api_key = "${KEYWORD_AGENT_TEST_UNSET_VARIABLE}"
"#;

        let config = AgentConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.serpapi_key(), None);
        assert!(matches!(
            config.require_serpapi_key(),
            Err(AgentError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_endpoint_fails_validation() {
        let toml_content = r#"
[google_ads]
endpoint = "not-a-url"
"#;

        let config = AgentConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ads_pipeline_needs_tokens() {
        let mut config = AgentConfig::default();
        config.gemini.api_key = Some("gemini-key".to_string());
        config.google_ads.developer_token = Some("dev-token".to_string());

        let err = config.validate_for_ads().unwrap_err();
        assert!(err.to_string().contains(ADS_ACCESS_TOKEN_VAR));

        config.google_ads.access_token = Some("access-token".to_string());
        assert!(config.validate_for_ads().is_ok());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[http]
timeout_seconds = 5
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = AgentConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.http.timeout_seconds, 5);
    }

    #[test]
    fn test_malformed_toml_is_a_config_error() {
        let err = AgentConfig::from_toml_str("[gemini\napi_key = 1").unwrap_err();
        assert!(matches!(err, AgentError::ConfigValidationError { .. }));
    }
}
