use crate::config::agent_config::HttpConfig;
use crate::utils::error::{AgentError, Result};
use reqwest::{Client, Response};
use std::time::Duration;

const USER_AGENT: &str = concat!("keyword-agent/", env!("CARGO_PKG_VERSION"));

/// 錯誤訊息中保留的回應字元數上限
const MAX_ERROR_BODY: usize = 512;

pub fn build_client(config: &HttpConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Turns a non-success status into [`AgentError::RemoteStatusError`].
pub async fn ensure_success(service: &str, response: Response) -> Result<Response> {
    let status = response.status();
    tracing::debug!("{} response status: {}", service, status);
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AgentError::RemoteStatusError {
        service: service.to_string(),
        status: status.as_u16(),
        body: truncate(&body, MAX_ERROR_BODY),
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

/// Reads a JSON value that may be encoded as a number or a numeric string.
///
/// Non-finite strings such as `"NaN"` or `"inf"` are rejected.
pub fn json_number(value: &serde_json::Value) -> Option<f64> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("咖啡豆研磨", 2), "咖啡…");
    }

    #[test]
    fn test_json_number_accepts_strings_and_numbers() {
        assert_eq!(json_number(&json!(1900)), Some(1900.0));
        assert_eq!(json_number(&json!("1900")), Some(1900.0));
        assert_eq!(json_number(&json!("HIGH")), None);
        assert_eq!(json_number(&json!(null)), None);
    }

    #[test]
    fn test_json_number_rejects_non_finite_strings() {
        for raw in ["NaN", "inf", "-inf", " infinity "] {
            assert_eq!(json_number(&json!(raw)), None, "{} should be rejected", raw);
        }
    }

    #[test]
    fn test_build_client_with_default_config() {
        assert!(build_client(&HttpConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_ensure_success_maps_error_status() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/broken");
            then.status(503).body("upstream unavailable");
        });

        let client = build_client(&HttpConfig::default()).unwrap();
        let response = client.get(server.url("/broken")).send().await.unwrap();
        let err = ensure_success("Test", response).await.unwrap_err();

        api_mock.assert();
        match err {
            AgentError::RemoteStatusError { service, status, body } => {
                assert_eq!(service, "Test");
                assert_eq!(status, 503);
                assert_eq!(body, "upstream unavailable");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
