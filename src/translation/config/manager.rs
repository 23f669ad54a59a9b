//! 配置管理器
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值

use std::path::Path;
use std::time::Duration;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use super::constants;
use crate::translation::error::{TranslationError, TranslationResult};

/// 翻译配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslationConfig {
    // 语言
    pub source_lang: String,
    pub target_lang: String,

    /// 翻译代理基地址，请求发往 `<proxy_url>/translate`
    pub proxy_url: String,

    // 性能配置
    pub batch_size: usize,
    pub max_concurrent_requests: usize,
    pub request_timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            source_lang: constants::DEFAULT_SOURCE_LANG.to_string(),
            target_lang: constants::DEFAULT_TARGET_LANG.to_string(),
            proxy_url: constants::DEFAULT_PROXY_URL.to_string(),
            batch_size: constants::DEFAULT_BATCH_SIZE,
            max_concurrent_requests: constants::DEFAULT_MAX_CONCURRENT_REQUESTS,
            request_timeout_secs: constants::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl TranslationConfig {
    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if self.batch_size == 0 {
            return Err(TranslationError::ConfigError("批次大小不能为0".to_string()));
        }

        if self.max_concurrent_requests == 0 {
            return Err(TranslationError::ConfigError("最大并发数不能为0".to_string()));
        }

        if self.max_concurrent_requests > constants::MAX_CONCURRENT_REQUESTS_LIMIT {
            return Err(TranslationError::ConfigError(format!(
                "最大并发数不能超过{}",
                constants::MAX_CONCURRENT_REQUESTS_LIMIT
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(TranslationError::ConfigError("请求超时不能为0".to_string()));
        }

        if self.source_lang.trim().is_empty() || self.target_lang.trim().is_empty() {
            return Err(TranslationError::ConfigError("语言代码不能为空".to_string()));
        }

        match url::Url::parse(&self.proxy_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(TranslationError::ConfigError(format!(
                    "代理地址必须使用 http 或 https: {}",
                    url
                )))
            }
            Err(e) => {
                return Err(TranslationError::ConfigError(format!(
                    "无效的代理地址 '{}': {}",
                    self.proxy_url, e
                )))
            }
        }

        Ok(())
    }

    /// 应用环境变量覆盖
    ///
    /// 只有已设置的变量才会覆盖，设置了但无法解析的变量视为配置错误。
    pub fn apply_env_overrides(&mut self) -> TranslationResult<()> {
        use crate::env::{translation, EnvError, EnvVar};
        use crate::translation::error::helpers::config_error;

        let to_config_error = |e: EnvError| config_error(e);

        if let Some(source_lang) = translation::SourceLang::get_optional().map_err(to_config_error)? {
            self.source_lang = source_lang;
        }

        if let Some(target_lang) = translation::TargetLang::get_optional().map_err(to_config_error)? {
            self.target_lang = target_lang;
        }

        if let Some(proxy_url) = translation::ProxyUrl::get_optional().map_err(to_config_error)? {
            tracing::info!("环境变量覆盖代理地址: {}", proxy_url);
            self.proxy_url = proxy_url;
        }

        if let Some(batch_size) = translation::BatchSize::get_optional().map_err(to_config_error)? {
            self.batch_size = batch_size;
        }

        if let Some(max_concurrent) =
            translation::MaxConcurrentRequests::get_optional().map_err(to_config_error)?
        {
            self.max_concurrent_requests = max_concurrent;
        }

        if let Some(timeout) = translation::RequestTimeout::get_optional().map_err(to_config_error)? {
            self.request_timeout_secs = timeout.as_secs();
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// 翻译端点地址
    pub fn translate_endpoint(&self) -> String {
        format!("{}/translate", self.proxy_url.trim_end_matches('/'))
    }
}

/// 配置管理器
pub struct ConfigManager {
    config: TranslationConfig,
    source_path: Option<String>,
}

impl ConfigManager {
    /// 按默认搜索路径创建配置管理器
    pub fn new() -> TranslationResult<Self> {
        Self::load(None)
    }

    /// 使用指定的配置文件创建配置管理器
    pub fn from_file(path: &str) -> TranslationResult<Self> {
        Self::load(Some(path))
    }

    fn load(explicit_path: Option<&str>) -> TranslationResult<Self> {
        Self::load_dotenv();

        let source_path = match explicit_path {
            Some(path) => {
                let expanded = shellexpand::tilde(path).to_string();
                if !Path::new(&expanded).exists() {
                    return Err(TranslationError::ConfigError(format!(
                        "配置文件不存在: {}",
                        expanded
                    )));
                }
                Some(expanded)
            }
            None => Self::find_config_file(),
        };

        let mut config = Self::load_config(source_path.as_deref())?;
        config.apply_env_overrides()?;
        config.validate()?;

        tracing::debug!(
            "翻译配置: {} -> {}, 代理 {}, 批次 {}, 并发 {}",
            config.source_lang,
            config.target_lang,
            config.proxy_url,
            config.batch_size,
            config.max_concurrent_requests
        );

        Ok(Self {
            config,
            source_path,
        })
    }

    /// 获取配置
    pub fn get_config(&self) -> &TranslationConfig {
        &self.config
    }

    pub fn into_config(self) -> TranslationConfig {
        self.config
    }

    /// 实际加载的配置文件路径
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    fn find_config_file() -> Option<String> {
        for path in constants::CONFIG_PATHS {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(expanded_path.as_ref()).exists() {
                return Some(expanded_path.to_string());
            }
        }
        None
    }

    /// 叠加默认值与配置文件
    fn load_config(path: Option<&str>) -> TranslationResult<TranslationConfig> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&TranslationConfig::default())
                .map_err(|e| TranslationError::ConfigError(format!("默认配置错误: {}", e)))?,
        );

        match path {
            Some(path) => {
                tracing::info!("加载配置文件: {}", path);
                builder = builder.add_source(File::with_name(path).required(true));
            }
            None => tracing::debug!("未找到配置文件，使用默认配置"),
        }

        let config = builder
            .build()
            .map_err(|e| TranslationError::ConfigError(format!("构建配置失败: {}", e)))?;

        config
            .try_deserialize()
            .map_err(|e| TranslationError::ConfigError(format!("反序列化配置失败: {}", e)))
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        let env_files = [".env.local", ".env"];

        for env_file in &env_files {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::debug!("已加载环境变量文件: {}", env_file);
                break;
            }
        }
    }
}
