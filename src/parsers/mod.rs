//! # 解析器模块
//!
//! 目前只包含 HTML 解析与序列化。纯文本与 Markdown 不需要结构化解析，
//! 由 `translation::pipeline::batch` 按行处理。

pub mod html;

pub use html::{html_to_dom, serialize_document};
