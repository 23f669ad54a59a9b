//! 翻译系统核心模块
//!
//! - **客户端** (`client.rs`): `Translator` 抽象与访问翻译代理的 HTTP 实现
//! - **响应** (`response.rs`): 嵌套数组响应的解析与 `UnitOutcome`
//! - **服务** (`service.rs`): 按文档类型分派、并发调度、进度与统计

pub mod client;
pub mod response;
pub mod service;

pub use client::{HttpTranslator, LanguagePair, Translator};
pub use response::{extract_translation, parse_translation_payload, UnitOutcome};
pub use service::{RunStats, TranslatedDocument, TranslationService};
