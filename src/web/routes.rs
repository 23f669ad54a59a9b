//! Web 路由定义

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::web::{handlers::*, types::AppState};

/// 创建路由结构
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        // 翻译代理，只转发不改写
        .route("/api/translate", get(translate_proxy))
        // 整个文档的翻译
        .route("/api/documents", post(translate_document))
}
