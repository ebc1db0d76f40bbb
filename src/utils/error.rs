use thiserror::Error;

/// 使用者看到的固定訊息：AI 回傳內容無法解析
pub const INVALID_CURRICULUM_MESSAGE: &str = "Invalid curriculum data received from AI.";

/// 沒有 provider 訊息時的通用訊息
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate curriculum. Please try again.";

/// 主題欄位空白時的提示
pub const EMPTY_SUBJECT_MESSAGE: &str = "Please specify a subject.";

/// 本地驗證錯誤，發生在任何網路請求之前
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 遠端或解析錯誤。Display 帶有診斷細節，只寫進日誌；
/// 對使用者顯示請用 `user_message()`
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Transport failure: {detail}")]
    Transport { detail: String },

    #[error("Provider returned {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Provider {
        status: u16,
        message: Option<String>,
    },

    #[error("Invalid curriculum data: {detail}")]
    InvalidResponse { detail: String },
}

impl GenerationError {
    pub fn user_message(&self) -> &str {
        match self {
            GenerationError::Transport { .. } => GENERIC_FAILURE_MESSAGE,
            GenerationError::Provider { message, .. } => message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(GENERIC_FAILURE_MESSAGE),
            GenerationError::InvalidResponse { .. } => INVALID_CURRICULUM_MESSAGE,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        GenerationError::Transport {
            detail: e.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ForgeError {
    pub fn user_message(&self) -> String {
        match self {
            ForgeError::Validation(e) => e.message.clone(),
            ForgeError::Generation(e) => e.user_message().to_string(),
            other => other.to_string(),
        }
    }

    /// 依錯誤類型決定 CLI 退出碼
    pub fn exit_code(&self) -> i32 {
        match self {
            ForgeError::Generation(_) => 1,
            ForgeError::Validation(_)
            | ForgeError::ConfigError { .. }
            | ForgeError::InvalidConfigValueError { .. } => 2,
            ForgeError::IoError(_) | ForgeError::SerializationError(_) => 3,
        }
    }
}

/// 介面層 (表單送出) 的錯誤
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("A curriculum generation is already in progress")]
    Busy,

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Validation(e) => e.message.clone(),
            SessionError::Busy => self.to_string(),
            SessionError::Generation(e) => e.user_message().to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            SessionError::Generation(_) => 1,
            SessionError::Validation(_) | SessionError::Busy => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, ForgeError>;
