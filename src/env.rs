//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问。所有变量以 `TURJUMAN_` 为前缀。

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    /// 仅在变量已设置时解析，未设置返回 `None`（忽略默认值）
    fn get_optional() -> EnvResult<Option<T>> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value).map(Some),
            Err(_) => Ok(None),
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "TURJUMAN_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.trim().to_lowercase().as_str() {
                level @ ("trace" | "debug" | "info" | "warn" | "error") => Ok(level.to_string()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    /// 禁用颜色输出
    pub struct NoColor;
    impl EnvVar<bool> for NoColor {
        const NAME: &'static str = "NO_COLOR";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Disable colored output when set to any value";

        fn parse(value: &str) -> EnvResult<bool> {
            // NO_COLOR 遵循标准：任何非空值都表示禁用颜色
            Ok(!value.is_empty())
        }
    }
}

/// 翻译相关环境变量
///
/// 这些变量没有默认值：未设置时不覆盖配置文件中的值。
pub mod translation {
    use super::*;

    /// 源语言
    pub struct SourceLang;
    impl EnvVar<String> for SourceLang {
        const NAME: &'static str = "TURJUMAN_TRANSLATION_SOURCE_LANG";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Source language passed to the translation endpoint ('auto' for detection)";

        fn parse(value: &str) -> EnvResult<String> {
            parse_language(value, Self::NAME)
        }
    }

    /// 目标语言
    pub struct TargetLang;
    impl EnvVar<String> for TargetLang {
        const NAME: &'static str = "TURJUMAN_TRANSLATION_TARGET_LANG";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Target language passed to the translation endpoint";

        fn parse(value: &str) -> EnvResult<String> {
            parse_language(value, Self::NAME)
        }
    }

    /// 翻译代理地址
    pub struct ProxyUrl;
    impl EnvVar<String> for ProxyUrl {
        const NAME: &'static str = "TURJUMAN_TRANSLATION_PROXY_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Base URL of the translation proxy (requests go to <url>/translate)";

        fn parse(value: &str) -> EnvResult<String> {
            parse_http_url(value, Self::NAME)
        }
    }

    /// 纯文本每批行数
    pub struct BatchSize;
    impl EnvVar<usize> for BatchSize {
        const NAME: &'static str = "TURJUMAN_TRANSLATION_BATCH_SIZE";
        const DEFAULT: Option<usize> = None;
        const DESCRIPTION: &'static str = "Lines per plain-text translation batch";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 1, 1000)
        }
    }

    /// 最大并发请求数
    pub struct MaxConcurrentRequests;
    impl EnvVar<usize> for MaxConcurrentRequests {
        const NAME: &'static str = "TURJUMAN_TRANSLATION_MAX_CONCURRENT_REQUESTS";
        const DEFAULT: Option<usize> = None;
        const DESCRIPTION: &'static str = "Maximum translation requests in flight per run";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 1, 32)
        }
    }

    /// 请求超时
    pub struct RequestTimeout;
    impl EnvVar<Duration> for RequestTimeout {
        const NAME: &'static str = "TURJUMAN_TRANSLATION_REQUEST_TIMEOUT";
        const DEFAULT: Option<Duration> = None;
        const DESCRIPTION: &'static str = "Per-request timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            let seconds = parse_positive_usize(value, Self::NAME, 1, 600)?;
            Ok(Duration::from_secs(seconds as u64))
        }
    }
}

/// Web服务器相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "TURJUMAN_WEB_BIND_ADDRESS";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Web server bind address";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("127.0.0.1".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            let addr = value.trim();
            if addr.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Address cannot be empty".to_string(),
                });
            }
            Ok(addr.to_string())
        }
    }

    /// 端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "TURJUMAN_WEB_PORT";
        const DEFAULT: Option<u16> = Some(7080);
        const DESCRIPTION: &'static str = "Web server port";

        fn parse(value: &str) -> EnvResult<u16> {
            value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid port number (0-65535)".to_string(),
            })
        }
    }

    /// 静态文件目录，空字符串表示不提供静态文件
    pub struct StaticDir;
    impl EnvVar<String> for StaticDir {
        const NAME: &'static str = "TURJUMAN_WEB_STATIC_DIR";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Static files directory served under /static (empty = none)";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(String::new()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }

    /// 上游翻译接口
    pub struct UpstreamUrl;
    impl EnvVar<String> for UpstreamUrl {
        const NAME: &'static str = "TURJUMAN_UPSTREAM_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Upstream translation endpoint the proxy forwards to";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(crate::translation::constants::DEFAULT_UPSTREAM_URL.to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            parse_http_url(value, Self::NAME)
        }
    }
}

/// 辅助函数
fn parse_language(value: &str, var_name: &str) -> EnvResult<String> {
    let lang = value.trim();
    if lang.is_empty() {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: "Language code cannot be empty".to_string(),
        });
    }
    Ok(lang.to_string())
}

fn parse_http_url(value: &str, var_name: &str) -> EnvResult<String> {
    let url = value.trim();
    match url::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(url.to_string()),
        Ok(_) => Err(EnvError {
            variable: var_name.to_string(),
            message: "URL must use http or https".to_string(),
        }),
        Err(e) => Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Invalid URL: {}", e),
        }),
    }
}

fn parse_positive_usize(value: &str, var_name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let num: usize = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid positive number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

/// 服务器进程的环境变量汇总
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub log_level: String,
    pub no_color: bool,

    pub web_bind_address: String,
    pub web_port: u16,
    pub web_static_dir: String,
    pub upstream_url: String,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            log_level: core::LogLevel::get()?,
            no_color: core::NoColor::get()?,

            web_bind_address: web::BindAddress::get()?,
            web_port: web::Port::get()?,
            web_static_dir: web::StaticDir::get()?,
            upstream_url: web::UpstreamUrl::get()?,
        })
    }

    /// 输出配置摘要
    pub fn log_summary(&self) {
        tracing::info!("日志级别: {}", self.log_level);
        tracing::info!("监听地址: {}:{}", self.web_bind_address, self.web_port);
        tracing::info!("上游翻译接口: {}", self.upstream_url);
        if !self.web_static_dir.is_empty() {
            tracing::info!("静态文件目录: {}", self.web_static_dir);
        }
    }
}
