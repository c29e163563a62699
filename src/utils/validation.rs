use crate::utils::error::{Result, SmsError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SmsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SmsError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SmsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| SmsError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SmsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 只允許數字、連字號與空白，例如 010-1234-5678
pub fn validate_phone_number(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    if let Some(bad) = value
        .chars()
        .find(|c| !(c.is_ascii_digit() || *c == '-' || *c == ' '))
    {
        return Err(SmsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unexpected character '{}' in phone number", bad),
        });
    }

    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !(8..=15).contains(&digits) {
        return Err(SmsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Phone number must have 8 to 15 digits, found {}", digits),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("solapi.base_url", "https://api.solapi.com").is_ok());
        assert!(validate_url("solapi.base_url", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("solapi.base_url", "").is_err());
        assert!(validate_url("solapi.base_url", "invalid-url").is_err());
        assert!(validate_url("solapi.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("sender.number", "01012345678").is_ok());
        assert!(validate_phone_number("sender.number", "010-1234-5678").is_ok());
        assert!(validate_phone_number("sender.number", "").is_err());
        assert!(validate_phone_number("sender.number", "010-CALL-ME").is_err());
        assert!(validate_phone_number("sender.number", "1234").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("key".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("solapi.api_key", &present).unwrap(), "key");
        assert!(matches!(
            validate_required_field("solapi.api_key", &missing),
            Err(SmsError::MissingConfigError { .. })
        ));
    }
}
