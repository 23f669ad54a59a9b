//! API 处理器

pub mod documents;
pub mod translation;

pub use documents::*;
pub use translation::*;
