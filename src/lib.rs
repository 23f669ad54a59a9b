//! # Turjuman Library
//!
//! 将纯文本、Markdown 和 HTML 文档逐段送往翻译代理，并按原结构重组译文。
//!
//! ## 模块组织
//!
//! - `core` - 文档模型、格式判定与输出命名
//! - `env` - 类型安全的环境变量
//! - `parsers` - HTML 解析与序列化
//! - `translation` - 翻译客户端、管道与服务
//! - `web` - 翻译代理与文档翻译服务器（可选）

pub mod core;
pub mod env;
pub mod parsers;
pub mod translation;
#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used items for convenience
pub use core::{translated_file_name, Document, DocumentFormat, DocumentKind};
pub use translation::{
    LanguagePair, TranslatedDocument, TranslationConfig, TranslationError, TranslationResult,
    TranslationService,
};
