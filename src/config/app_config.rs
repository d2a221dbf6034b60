use crate::core::checkout::DEFAULT_CURRENCY_CODE;
use crate::core::pagination::{total_pages, DEFAULT_MAX_VISIBLE_PAGES};
use crate::core::search::DEFAULT_SEARCH_DELAY;
use crate::utils::error::{CreationaryError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_positive_number, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_VAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

const MAX_DEBOUNCE_MS: u64 = 60_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub pagination: PaginationConfig,
    pub checkout: CheckoutConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub path: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_SEARCH_DELAY.as_millis() as u64,
            path: "/explore".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub max_visible_pages: u32,
    pub per_page: u32,
}

impl PaginationConfig {
    /// Page count for a catalog of `total_items` at `per_page` items per page.
    pub fn total_pages_for(&self, total_items: u64) -> u32 {
        total_pages(total_items, self.per_page)
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            per_page: 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    pub currency_code: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            currency_code: DEFAULT_CURRENCY_CODE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| CreationaryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CURRENCY}), 未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    pub fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.logging.format).unwrap_or_default()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_range("search.debounce_ms", self.search.debounce_ms, 0, MAX_DEBOUNCE_MS)?;

        if !self.search.path.starts_with('/') {
            return Err(CreationaryError::InvalidConfigValueError {
                field: "search.path".to_string(),
                value: self.search.path.clone(),
                reason: "Path must start with '/'".to_string(),
            });
        }

        validate_positive_number(
            "pagination.max_visible_pages",
            self.pagination.max_visible_pages as usize,
            1,
        )?;
        validate_positive_number("pagination.per_page", self.pagination.per_page as usize, 1)?;

        let code = &self.checkout.currency_code;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(CreationaryError::InvalidConfigValueError {
                field: "checkout.currency_code".to_string(),
                value: code.clone(),
                reason: "Expected a 3-letter ISO 4217 code such as NGN".to_string(),
            });
        }

        if LogFormat::parse(&self.logging.format).is_none() {
            return Err(CreationaryError::InvalidConfigValueError {
                field: "logging.format".to_string(),
                value: self.logging.format.clone(),
                reason: "Valid formats: compact, json".to_string(),
            });
        }

        Ok(())
    }
}
