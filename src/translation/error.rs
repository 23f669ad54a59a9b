//! 翻译模块统一错误处理
//!
//! 所有 `TranslationError` 都是“硬失败”：一旦出现，整个翻译运行立即中止，
//! 不会产生任何输出。响应格式异常但可解析的情况不属于错误，
//! 由 [`UnitOutcome::Unavailable`](crate::translation::core::UnitOutcome) 在单元级别吸收。

use std::fmt;

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone)]
pub enum TranslationError {
    /// 不支持的输入格式
    #[error("不支持的文件格式: {0}")]
    UnsupportedFormat(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 网络错误
    #[error("网络错误: {0}")]
    NetworkError(String),

    /// 输入验证错误
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// 响应解析错误
    #[error("解析错误: {0}")]
    ParseError(String),

    /// 文档结构错误
    #[error("文档结构错误: {0}")]
    DocumentError(String),

    /// IO错误
    #[error("IO错误: {0}")]
    IoError(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl TranslationError {
    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::UnsupportedFormat(_) => ErrorSeverity::Info,
            TranslationError::InvalidInput(_) => ErrorSeverity::Info,
            TranslationError::NetworkError(_) => ErrorSeverity::Warning,
            TranslationError::ParseError(_) => ErrorSeverity::Error,
            TranslationError::IoError(_) => ErrorSeverity::Error,
            TranslationError::DocumentError(_) => ErrorSeverity::Error,
            TranslationError::ConfigError(_) => ErrorSeverity::Critical,
            TranslationError::InternalError(_) => ErrorSeverity::Critical,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslationError::UnsupportedFormat(_) => ErrorCategory::Input,
            TranslationError::InvalidInput(_) => ErrorCategory::Input,
            TranslationError::ConfigError(_) => ErrorCategory::Configuration,
            TranslationError::NetworkError(_) => ErrorCategory::Network,
            TranslationError::ParseError(_) => ErrorCategory::Parsing,
            TranslationError::DocumentError(_) => ErrorCategory::Document,
            TranslationError::IoError(_) => ErrorCategory::Io,
            TranslationError::InternalError(_) => ErrorCategory::Internal,
        }
    }

    /// 是否是远程调用失败（网络或响应解析）
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::Parsing
        )
    }

    /// 创建带上下文的错误
    pub fn with_context<T: fmt::Display>(mut self, context: T) -> Self {
        let new_msg = match &self {
            TranslationError::UnsupportedFormat(msg)
            | TranslationError::ConfigError(msg)
            | TranslationError::NetworkError(msg)
            | TranslationError::InvalidInput(msg)
            | TranslationError::ParseError(msg)
            | TranslationError::DocumentError(msg)
            | TranslationError::IoError(msg)
            | TranslationError::InternalError(msg) => format!("{} (上下文: {})", msg, context),
        };

        match &mut self {
            TranslationError::UnsupportedFormat(msg)
            | TranslationError::ConfigError(msg)
            | TranslationError::NetworkError(msg)
            | TranslationError::InvalidInput(msg)
            | TranslationError::ParseError(msg)
            | TranslationError::DocumentError(msg)
            | TranslationError::IoError(msg)
            | TranslationError::InternalError(msg) => *msg = new_msg,
        }

        self
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Input,
    Parsing,
    Document,
    Io,
    Internal,
}

impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::ParseError(format!("响应不是有效的JSON: {}", error))
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TranslationError::NetworkError(format!("请求超时: {}", error))
        } else {
            TranslationError::NetworkError(error.to_string())
        }
    }
}

impl From<config::ConfigError> for TranslationError {
    fn from(error: config::ConfigError) -> Self {
        TranslationError::ConfigError(error.to_string())
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 创建网络错误
    pub fn network_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::NetworkError(msg.to_string())
    }

    /// 创建配置错误
    pub fn config_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::ConfigError(msg.to_string())
    }

    /// 创建输入验证错误
    pub fn validation_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::InvalidInput(msg.to_string())
    }

    /// 创建文档结构错误
    pub fn document_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::DocumentError(msg.to_string())
    }
}
