//! Solapi SMS API adapter.
//!
//! Every request carries
//! `Authorization: HMAC-SHA256 apiKey=<key>, date=<ISO-8601>, salt=<nonce>, signature=<hex>`
//! where the signature is HMAC-SHA256(date + salt) keyed with the API secret.

use crate::domain::ports::MessageSender;
use crate::utils::error::{Result, SmsError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.solapi.com";
const SEND_PATH: &str = "/messages/v4/send";
const REQUEST_TIMEOUT_SECS: u64 = 30;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct SolapiAuth {
    api_key: String,
    api_secret: String,
}

impl std::fmt::Debug for SolapiAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolapiAuth")
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .finish()
    }
}

impl SolapiAuth {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// HMAC-SHA256(date + salt)，小寫十六進位
    pub fn signature(&self, date: &str, salt: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.api_secret.as_bytes()).map_err(|e| {
            SmsError::ConfigError {
                message: format!("invalid Solapi API secret: {}", e),
            }
        })?;
        mac.update(date.as_bytes());
        mac.update(salt.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    pub fn authorization_header(&self, date: &str, salt: &str) -> Result<String> {
        Ok(format!(
            "HMAC-SHA256 apiKey={}, date={}, salt={}, signature={}",
            self.api_key,
            date,
            salt,
            self.signature(date, salt)?
        ))
    }

    /// 以目前時間與新的隨機 salt 產生標頭
    pub fn authorization_now(&self) -> Result<String> {
        self.authorization_header(&format_date(Utc::now()), &generate_salt())
    }
}

pub fn format_date(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// 32 個小寫十六進位字元
pub fn generate_salt() -> String {
    let bytes: [u8; 16] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// 只保留數字 (010-1234-5678 -> 01012345678)
pub fn normalize_number(number: &str) -> String {
    number.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    message: OutgoingMessage<'a>,
}

#[derive(Debug, Serialize)]
struct OutgoingMessage<'a> {
    to: &'a str,
    from: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendResponse {
    message_id: String,
    status_code: Option<String>,
    status_message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error_code: Option<String>,
    error_message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SolapiSender {
    client: Client,
    auth: SolapiAuth,
    base_url: String,
}

impl SolapiSender {
    pub fn new(auth: SolapiAuth) -> Result<Self> {
        Self::with_base_url(auth, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(auth: SolapiAuth, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            auth,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn send_url(&self) -> String {
        format!("{}{}", self.base_url, SEND_PATH)
    }
}

#[async_trait]
impl MessageSender for SolapiSender {
    async fn send(&self, sender_id: &str, destination: &str, body: &str) -> Result<String> {
        let to = normalize_number(destination);
        let from = normalize_number(sender_id);
        if to.is_empty() {
            return Err(SmsError::EmptyContact);
        }

        let request = SendRequest {
            message: OutgoingMessage {
                to: &to,
                from: &from,
                text: body,
            },
        };

        tracing::debug!("Making Solapi request to: {}", self.send_url());
        let response = self
            .client
            .post(self.send_url())
            .header("Authorization", self.auth.authorization_now()?)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Solapi response status: {}", status);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let (code, message) = match serde_json::from_str::<ErrorResponse>(&text) {
                Ok(err) => (
                    err.error_code.unwrap_or_default(),
                    err.error_message.unwrap_or(text),
                ),
                Err(_) => (String::new(), text),
            };
            return Err(SmsError::ProviderError {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let sent: SendResponse = serde_json::from_str(&response.text().await?)?;
        tracing::debug!(
            "Solapi accepted message {} ({} {})",
            sent.message_id,
            sent.status_code.as_deref().unwrap_or("-"),
            sent.status_message.as_deref().unwrap_or("-")
        );
        Ok(sent.message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_signature_matches_reference_hmac() {
        let auth = SolapiAuth::new("NCSAYU7YDBXYORXC", "test-secret");
        let signature = auth
            .signature("2024-03-04T05:00:00Z", "abcdef0123456789")
            .unwrap();
        assert_eq!(
            signature,
            "55b67d05034b3ff269dcce13c6cc4be0b8c551e9aab2aeb0f58b773e78af85df"
        );
    }

    #[test]
    fn test_authorization_header_layout() {
        let auth = SolapiAuth::new("KEY", "NCSAYU7YDBXYORXC");
        let header = auth
            .authorization_header("2019-07-01T00:41:48Z", "jqsba2jxjnrjor")
            .unwrap();
        assert_eq!(
            header,
            "HMAC-SHA256 apiKey=KEY, date=2019-07-01T00:41:48Z, salt=jqsba2jxjnrjor, \
             signature=bbb4956c270113b810a630f38feddb83fab4cd3787fe826ac21c168f0b42aae2"
        );
    }

    #[test]
    fn test_generate_salt_is_random_hex() {
        let a = generate_salt();
        let b = generate_salt();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(format_date(date), "2024-03-04T05:06:07Z");
    }

    #[test]
    fn test_normalize_number() {
        assert_eq!(normalize_number("010-1234-5678"), "01012345678");
        assert_eq!(normalize_number(" 010 9999 0000 "), "01099990000");
        assert_eq!(normalize_number("---"), "");
    }

    #[test]
    fn test_debug_hides_secret() {
        let auth = SolapiAuth::new("KEY", "super-secret");
        assert!(!format!("{:?}", auth).contains("super-secret"));
    }
}
