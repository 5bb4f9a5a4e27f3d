use crate::utils::error::{AgentError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> AgentError {
    AgentError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| AgentError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// Google Ads 帳號 ID 只保留數字 (允許 123-456-7890 這種寫法)
pub fn normalize_customer_id(field_name: &str, raw: &str) -> Result<String> {
    let digits: String = raw.chars().filter(|c| *c != '-' && !c.is_whitespace()).collect();

    if digits.is_empty() {
        return Err(invalid(field_name, raw, "Customer ID cannot be empty"));
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(
            field_name,
            raw,
            "Customer ID must contain digits only",
        ));
    }
    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("gemini.endpoint", "https://example.com").is_ok());
        assert!(validate_url("gemini.endpoint", "http://example.com").is_ok());
        assert!(validate_url("gemini.endpoint", "").is_err());
        assert!(validate_url("gemini.endpoint", "invalid-url").is_err());
        assert!(validate_url("gemini.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("count", 5, 1).is_ok());
        assert!(validate_positive_number("count", 0, 1).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("seed", "coffee beans").is_ok());
        assert!(validate_non_empty_string("seed", "   ").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("key".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("api_key", &present).unwrap(), "key");
        assert!(matches!(
            validate_required_field("api_key", &missing),
            Err(AgentError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_normalize_customer_id() {
        assert_eq!(
            normalize_customer_id("customer_id", "123-456-7890").unwrap(),
            "1234567890"
        );
        assert_eq!(
            normalize_customer_id("customer_id", "1234567890").unwrap(),
            "1234567890"
        );
        assert!(normalize_customer_id("customer_id", "12a-456").is_err());
        assert!(normalize_customer_id("customer_id", " - ").is_err());
    }
}
