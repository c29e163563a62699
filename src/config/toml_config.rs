use crate::adapters::{gemini, solapi, GeminiRewriter, SolapiAuth, SolapiSender};
use crate::utils::error::{Result, SmsError};
use crate::utils::validation::{
    validate_phone_number, validate_required_field, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "recruit-sms.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sender: SenderConfig,
    #[serde(default)]
    pub solapi: SolapiConfig,
    #[serde(default)]
    pub rewrite: RewriteConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub templates: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SenderConfig {
    pub number: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolapiConfig {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewriteConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// "compact" (預設) 或 "json"
    pub format: Option<String>,
    /// trace / debug / info / warn / error
    pub level: Option<String>,
}

/// 空字串與未替換的 ${VAR} 都視為未設定
fn resolved(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.contains("${"))
        .map(str::to_string)
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SmsError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SmsError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 只從環境變數建立配置
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_fallbacks();
        config
    }

    /// 有設定檔時讀檔，缺少的欄位再從環境變數補上；沒有設定檔時只用環境變數
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(
                "Config file {} not found, using environment variables",
                path.display()
            );
            return Ok(Self::from_env());
        }

        tracing::debug!("Loading configuration from: {}", path.display());
        let mut config = Self::from_file(path)?;
        config.apply_env_fallbacks();
        Ok(config)
    }

    /// 替換環境變數 (例如 ${SOLAPI_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SmsError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn apply_env_fallbacks(&mut self) {
        let fallbacks: [(&mut Option<String>, &str); 4] = [
            (&mut self.sender.number, "SENDER_NUMBER"),
            (&mut self.solapi.api_key, "SOLAPI_API_KEY"),
            (&mut self.solapi.api_secret, "SOLAPI_API_SECRET"),
            (&mut self.rewrite.api_key, "GEMINI_API_KEY"),
        ];

        for (slot, var) in fallbacks {
            if resolved(slot).is_none() {
                if let Some(value) = env_value(var) {
                    *slot = Some(value);
                }
            }
        }
    }

    pub fn sender_number(&self) -> Option<String> {
        resolved(&self.sender.number)
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }

    pub fn log_level(&self) -> Option<String> {
        resolved(&self.logging.level)
    }

    /// `send` 需要的 Solapi 憑證
    pub fn solapi_sender(&self) -> Result<SolapiSender> {
        let api_key = resolved(&self.solapi.api_key);
        let api_secret = resolved(&self.solapi.api_secret);
        let auth = SolapiAuth::new(
            validate_required_field("solapi.api_key (SOLAPI_API_KEY)", &api_key)?.clone(),
            validate_required_field("solapi.api_secret (SOLAPI_API_SECRET)", &api_secret)?.clone(),
        );

        let base_url =
            resolved(&self.solapi.base_url).unwrap_or_else(|| solapi::DEFAULT_BASE_URL.to_string());
        SolapiSender::with_base_url(auth, base_url)
    }

    /// `rewrite` 需要的 Gemini 金鑰
    pub fn gemini_rewriter(&self) -> Result<GeminiRewriter> {
        let api_key = resolved(&self.rewrite.api_key);
        let api_key = validate_required_field("rewrite.api_key (GEMINI_API_KEY)", &api_key)?;

        GeminiRewriter::with_endpoint(
            api_key.clone(),
            resolved(&self.rewrite.model).unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string()),
            resolved(&self.rewrite.base_url).unwrap_or_else(|| gemini::DEFAULT_BASE_URL.to_string()),
        )
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(url) = resolved(&self.solapi.base_url) {
            validate_url("solapi.base_url", &url)?;
        }

        if let Some(url) = resolved(&self.rewrite.base_url) {
            validate_url("rewrite.base_url", &url)?;
        }

        if let Some(number) = self.sender_number() {
            validate_phone_number("sender.number", &number)?;
        }

        let valid_formats = ["compact", "json"];
        if let Some(format) = &self.logging.format {
            if !valid_formats.contains(&format.to_ascii_lowercase().as_str()) {
                return Err(SmsError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if let Some(level) = self.log_level() {
            if !valid_levels.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(SmsError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level,
                    reason: format!(
                        "Unsupported level. Valid levels: {}",
                        valid_levels.join(", ")
                    ),
                });
            }
        }

        for (name, body) in &self.templates {
            if name.trim().is_empty() || body.trim().is_empty() {
                return Err(SmsError::InvalidConfigValueError {
                    field: "templates".to_string(),
                    value: name.clone(),
                    reason: "Template name and body cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
