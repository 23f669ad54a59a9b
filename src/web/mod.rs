//! Web 服务器模块
//!
//! 提供同源翻译代理（`/api/translate`）和整文档翻译接口（`/api/documents`）

pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use handlers::*;
pub use routes::*;
pub use types::*;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::translation::{
    load_translation_config, TranslationError, TranslationResult, TranslationService,
};

/// 上传文档的大小上限
pub const MAX_DOCUMENT_BYTES: usize = 16 * 1024 * 1024;

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    /// 构建应用状态
    pub fn build_state(&self) -> TranslationResult<AppState> {
        let upstream_url = url::Url::parse(&self.config.upstream_url).map_err(|e| {
            TranslationError::ConfigError(format!(
                "无效的上游地址 '{}': {}",
                self.config.upstream_url, e
            ))
        })?;

        let mut translation_config = load_translation_config();
        translation_config.proxy_url = self.config.effective_proxy_url();
        let translation_service = TranslationService::from_config(translation_config)?;

        let http_client = reqwest::Client::builder()
            .timeout(translation_service.config().request_timeout())
            .build()
            .map_err(|e| TranslationError::NetworkError(format!("无法创建HTTP客户端: {}", e)))?;

        Ok(AppState {
            http_client,
            upstream_url,
            translation_service,
        })
    }

    /// 创建路由器
    pub fn router(&self) -> TranslationResult<Router> {
        let state = Arc::new(self.build_state()?);
        Ok(create_router(state, self.config.static_dir.as_deref()))
    }

    /// 启动 Web 服务器
    pub async fn start(&self) -> TranslationResult<()> {
        let app = self.router()?;

        let listener = tokio::net::TcpListener::bind(self.config.listen_addr())
            .await
            .map_err(|e| TranslationError::IoError(format!("无法绑定 {}: {}", self.config.listen_addr(), e)))?;

        tracing::info!("Web server starting at http://{}", self.config.listen_addr());
        tracing::info!("文档翻译经由代理 {}", self.config.effective_proxy_url());

        axum::serve(listener, app)
            .await
            .map_err(|e| TranslationError::IoError(format!("Server error: {}", e)))?;

        Ok(())
    }
}

/// 创建路由器
pub fn create_router(app_state: Arc<AppState>, static_dir: Option<&str>) -> Router {
    let mut app = create_routes()
        .layer(DefaultBodyLimit::max(MAX_DOCUMENT_BYTES))
        .with_state(app_state);

    // 添加CORS支持
    app = app.layer(CorsLayer::permissive());

    // 添加静态文件服务（如果配置了）
    if let Some(static_dir) = static_dir {
        app = app.nest_service("/static", ServeDir::new(static_dir));
    }

    app
}
