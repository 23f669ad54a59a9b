//! Web 模块的数据类型定义

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::translation::TranslationService;

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    /// 访问上游翻译接口的客户端
    pub http_client: reqwest::Client,
    pub upstream_url: url::Url,
    /// 文档翻译服务，经由代理发起请求
    pub translation_service: TranslationService,
}

/// 翻译代理查询参数
#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    pub sl: Option<String>,
    pub tl: Option<String>,
    pub q: Option<String>,
}

/// 文档翻译查询参数
#[derive(Debug, Deserialize)]
pub struct DocumentQuery {
    pub file_name: String,
    pub sl: Option<String>,
    pub tl: Option<String>,
    /// 输入字符编码，默认 UTF-8
    pub encoding: Option<String>,
}

/// 错误响应
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// 带状态码的错误响应
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, body: ErrorResponse) -> ApiError {
    (status, Json(body))
}

/// 便于在处理器中直接返回
pub fn error_response(status: StatusCode, body: ErrorResponse) -> axum::response::Response {
    api_error(status, body).into_response()
}
