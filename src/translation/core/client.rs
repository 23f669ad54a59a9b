//! 翻译客户端
//!
//! `Translator` 抽象一次远程翻译调用；`HttpTranslator` 通过
//! `GET <proxy>/translate?sl=&tl=&q=` 访问翻译代理。

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::translation::config::TranslationConfig;
use crate::translation::core::response::{parse_translation_payload, UnitOutcome};
use crate::translation::error::helpers::{network_error, validation_error};
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::pipeline::is_blank;

/// 源语言与目标语言，原样传给翻译接口
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// 远程翻译能力
///
/// 每次调用恰好对应一次远程请求。调用方保证 `text` 去除空白后非空。
/// 传输错误或非 JSON 响应返回 `Err`，结构不符的响应返回
/// [`UnitOutcome::Unavailable`]。
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, languages: &LanguagePair)
        -> TranslationResult<UnitOutcome>;
}

/// 基于 HTTP 的翻译客户端
#[derive(Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: url::Url,
}

impl HttpTranslator {
    /// 以 `<proxy_url>/translate` 为端点创建客户端
    pub fn new(proxy_url: &str, timeout: Duration) -> TranslationResult<Self> {
        let endpoint = format!("{}/translate", proxy_url.trim_end_matches('/'));
        Self::with_endpoint(&endpoint, timeout)
    }

    /// 使用配置中的代理地址与超时
    pub fn from_config(config: &TranslationConfig) -> TranslationResult<Self> {
        Self::with_endpoint(&config.translate_endpoint(), config.request_timeout())
    }

    fn with_endpoint(endpoint: &str, timeout: Duration) -> TranslationResult<Self> {
        let endpoint = url::Url::parse(endpoint).map_err(|e| {
            TranslationError::ConfigError(format!("无效的翻译端点 '{}': {}", endpoint, e))
        })?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| network_error(format!("无法创建HTTP客户端: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }

    fn request_url(&self, text: &str, languages: &LanguagePair) -> url::Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("sl", &languages.source)
            .append_pair("tl", &languages.target)
            .append_pair("q", text);
        url
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        languages: &LanguagePair,
    ) -> TranslationResult<UnitOutcome> {
        if is_blank(text) {
            return Err(validation_error("不能翻译空白文本"));
        }

        let url = self.request_url(text, languages);
        tracing::debug!("翻译请求 {} 字符 ({})", text.chars().count(), languages);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!("翻译代理返回状态 {}", status);
        }

        parse_translation_payload(&body, text)
    }
}
