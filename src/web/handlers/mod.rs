//! Web 路由处理器

pub mod api;
pub mod pages;

pub use api::*;
pub use pages::*;
