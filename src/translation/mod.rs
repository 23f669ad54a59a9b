//! 翻译模块
//!
//! 采用清晰的模块化架构：
//! - **core**: 翻译客户端、响应解析和翻译服务
//! - **pipeline**: 文本处理管道（分类、收集、批次、回写）
//! - **progress**: 进度报告
//! - **config**: 配置管理
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use turjuman::core::Document;
//! use turjuman::translation::{NoProgress, TranslationConfig, TranslationService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = TranslationService::from_config(TranslationConfig::default())?;
//! let document = Document::new("notes.txt", "Hola mundo".to_string())?;
//! let translated = service.translate_document(&document, &NoProgress).await?;
//! println!("{}: {}", translated.file_name, translated.content);
//! # Ok(())
//! # }
//! ```

/// 配置管理模块
pub mod config;

/// 翻译客户端与服务
pub mod core;

/// 错误处理模块
pub mod error;

/// 文本处理管道模块
pub mod pipeline;

/// 进度报告
pub mod progress;

// 核心API导出
pub use core::{
    HttpTranslator, LanguagePair, RunStats, TranslatedDocument, TranslationService, Translator,
    UnitOutcome,
};

pub use config::{constants, ConfigManager, TranslationConfig};

pub use error::{ErrorCategory, ErrorSeverity, TranslationError, TranslationResult};

pub use progress::{NoProgress, Progress, ProgressSink, ProgressStage, TracingProgress};

/// 检查翻译配置文件是否存在
pub fn config_file_exists() -> bool {
    config::config_file_exists()
}

/// 加载翻译配置，失败时回退到默认配置
pub fn load_translation_config() -> TranslationConfig {
    config::load_translation_config()
}
