//! Web 服务器配置
//!
//! 使用类型安全的环境变量系统进行配置管理

use crate::env::{EnvError, EnvResult, EnvVar};

/// Web 服务器配置
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// 绑定地址
    pub bind_addr: String,
    /// 端口
    pub port: u16,
    /// 静态文件目录
    pub static_dir: Option<String>,
    /// 代理转发的上游翻译接口
    pub upstream_url: String,
    /// 文档翻译使用的代理地址，未设置时指向本服务器的 `/api`
    pub proxy_url: Option<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 7080,
            static_dir: None,
            upstream_url: crate::translation::constants::DEFAULT_UPSTREAM_URL.to_string(),
            proxy_url: None,
        }
    }
}

impl WebConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        use crate::env::{translation, web};

        let static_dir_str = web::StaticDir::get()?;
        let static_dir = if static_dir_str.is_empty() {
            None
        } else {
            Some(static_dir_str)
        };

        Ok(Self {
            bind_addr: web::BindAddress::get()?,
            port: web::Port::get()?,
            static_dir,
            upstream_url: web::UpstreamUrl::get()?,
            proxy_url: translation::ProxyUrl::get_optional()?,
        })
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        if self.bind_addr.is_empty() {
            return Err(EnvError {
                variable: "bind_addr".to_string(),
                message: "Bind address cannot be empty".to_string(),
            });
        }

        if let Some(ref static_dir) = self.static_dir {
            if !std::path::Path::new(static_dir).is_dir() {
                return Err(EnvError {
                    variable: "static_dir".to_string(),
                    message: format!("Static directory '{}' does not exist", static_dir),
                });
            }
        }

        Ok(())
    }

    /// 监听地址
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// 文档翻译时使用的代理地址
    ///
    /// 未显式配置时指向本服务器自身的 `/api`，`0.0.0.0` 替换为回环地址。
    pub fn effective_proxy_url(&self) -> String {
        if let Some(ref url) = self.proxy_url {
            return url.clone();
        }

        let host = match self.bind_addr.as_str() {
            "0.0.0.0" => "127.0.0.1",
            "::" | "[::]" => "[::1]",
            other => other,
        };
        format!("http://{}:{}/api", host, self.port)
    }
}
