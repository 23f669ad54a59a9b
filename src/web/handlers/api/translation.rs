//! 翻译代理处理器
//!
//! 把 `sl`、`tl`、`q` 转发给上游翻译接口并原样返回其 JSON，不改写文本。

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;

use crate::translation::constants::{DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG};
use crate::web::types::{api_error, ApiError, AppState, ErrorResponse, ProxyQuery};

/// 构造上游请求地址
pub fn upstream_request_url(upstream: &url::Url, sl: &str, tl: &str, q: &str) -> url::Url {
    let mut url = upstream.clone();
    url.query_pairs_mut()
        .append_pair("client", "gtx")
        .append_pair("sl", sl)
        .append_pair("tl", tl)
        .append_pair("dt", "t")
        .append_pair("dt", "sp")
        .append_pair("q", q);
    url
}

/// `GET /api/translate`
pub async fn translate_proxy(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProxyQuery>,
) -> Result<Json<Value>, ApiError> {
    let text = match query.q.as_deref() {
        Some(q) if !q.is_empty() => q,
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Missing query text"),
            ))
        }
    };

    let sl = non_empty(query.sl.as_deref()).unwrap_or(DEFAULT_SOURCE_LANG);
    let tl = non_empty(query.tl.as_deref()).unwrap_or(DEFAULT_TARGET_LANG);
    let url = upstream_request_url(&state.upstream_url, sl, tl, text);

    tracing::debug!("转发翻译请求 {} -> {} ({} 字符)", sl, tl, text.chars().count());

    let body = fetch_text(&state.http_client, url).await.map_err(|e| {
        tracing::error!("翻译代理连接失败: {}", e);
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::with_details("Translation proxy connection error", e.to_string()),
        )
    })?;

    let payload: Value = serde_json::from_str(&body).map_err(|e| {
        tracing::warn!("上游返回的不是JSON: {}", e);
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::with_details("Invalid response from upstream", e.to_string()),
        )
    })?;

    Ok(Json(payload))
}

async fn fetch_text(client: &reqwest::Client, url: url::Url) -> Result<String, reqwest::Error> {
    let response = client.get(url).send().await?;
    response.text().await
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
