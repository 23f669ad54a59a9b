//! 文档翻译处理器
//!
//! 请求体为原始文件字节，成功时以附件形式返回译文；失败时不返回任何附件。

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::core::Document;
use crate::translation::{ErrorCategory, LanguagePair, TracingProgress, TranslationError};
use crate::web::types::{error_response, AppState, DocumentQuery, ErrorResponse};

/// `POST /api/documents?file_name=..&sl=..&tl=..`
pub async fn translate_document(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DocumentQuery>,
    body: Bytes,
) -> Response {
    let document = match Document::from_bytes(&query.file_name, &body, query.encoding.as_deref())
    {
        Ok(document) => document,
        Err(e) => return rejection(e),
    };

    let defaults = state.translation_service.languages();
    let languages = LanguagePair::new(
        query.sl.filter(|s| !s.trim().is_empty()).unwrap_or(defaults.source),
        query.tl.filter(|s| !s.trim().is_empty()).unwrap_or(defaults.target),
    );

    let translated = match state
        .translation_service
        .translate_document_with(&document, &languages, &TracingProgress)
        .await
    {
        Ok(translated) => translated,
        Err(e) => {
            return error_response(
                status_for(&e),
                ErrorResponse::with_details("Translation failed", e.to_string()),
            )
        }
    };

    let disposition = content_disposition(&translated.file_name);
    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static(translated.media_type()),
        ),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    (StatusCode::OK, headers, translated.content).into_response()
}

/// 翻译开始前的输入错误
fn rejection(error: TranslationError) -> Response {
    tracing::warn!("拒绝文档: {}", error);
    error_response(
        status_for(&error),
        ErrorResponse::with_details("Unsupported input", error.to_string()),
    )
}

/// 按错误类别选择响应状态码；远程调用失败对客户端而言是网关错误
pub fn status_for(error: &TranslationError) -> StatusCode {
    match error.category() {
        ErrorCategory::Input => match error {
            TranslationError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        },
        ErrorCategory::Network | ErrorCategory::Parsing => StatusCode::BAD_GATEWAY,
        ErrorCategory::Configuration
        | ErrorCategory::Document
        | ErrorCategory::Io
        | ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `attachment; filename="..."`，非 ASCII 名称附加 `filename*`
pub fn content_disposition(file_name: &str) -> HeaderValue {
    let ascii_name: String = file_name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let mut value = format!("attachment; filename=\"{}\"", ascii_name);
    if !file_name.is_ascii() {
        value.push_str("; filename*=UTF-8''");
        for byte in file_name.bytes() {
            if byte.is_ascii_alphanumeric() || b"-._~".contains(&byte) {
                value.push(byte as char);
            } else {
                value.push_str(&format!("%{:02X}", byte));
            }
        }
    }

    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
