use crate::config::ProviderSettings;
use crate::core::materializer::DecodePolicy;
use crate::utils::error::{ForgeError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub provider: Option<ProviderSection>,
    pub generation: Option<GenerationSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSection {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationSection {
    pub lenient: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ForgeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ForgeError::ConfigError {
            message: format!("TOML parsing error: {e}"),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ForgeError::ConfigError {
            message: format!("invalid substitution pattern: {e}"),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{var_name}}}"))
        });

        Ok(result.to_string())
    }

    pub fn decode_policy(&self) -> Option<DecodePolicy> {
        self.generation
            .as_ref()
            .and_then(|g| g.lenient)
            .map(|lenient| {
                if lenient {
                    DecodePolicy::Lenient
                } else {
                    DecodePolicy::Strict
                }
            })
    }

    /// 將 [provider] 區段覆蓋到既有設定上
    pub fn apply_to(&self, settings: &mut ProviderSettings) {
        let Some(provider) = &self.provider else {
            return;
        };

        if let Some(model) = &provider.model {
            settings.model = model.clone();
        }
        if let Some(base_url) = &provider.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(api_key) = &provider.api_key {
            if api_key.contains("${") {
                tracing::warn!("provider.api_key references an unset environment variable, ignoring it");
            } else {
                settings.api_key = Some(api_key.clone());
            }
        }
        if let Some(timeout) = provider.timeout_seconds {
            settings.timeout_seconds = Some(timeout);
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(provider) = &self.provider {
            if let Some(base_url) = &provider.base_url {
                validate_url("provider.base_url", base_url)?;
            }
            if let Some(model) = &provider.model {
                validate_non_empty_string("provider.model", model)?;
            }
            if let Some(timeout) = provider.timeout_seconds {
                validate_range("provider.timeout_seconds", timeout, 1, 600)?;
            }
        }
        Ok(())
    }
}
