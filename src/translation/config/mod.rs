//! 翻译配置管理模块
//!
//! 配置按以下顺序叠加：内置默认值 → 配置文件 → 环境变量 → 命令行参数

pub mod manager;

// 重新导出主要类型
pub use manager::{ConfigManager, TranslationConfig};

/// 配置常量
pub mod constants {
    /// 纯文本每批行数
    pub const DEFAULT_BATCH_SIZE: usize = 5;

    /// 默认同时进行的翻译请求数（1 表示严格串行）
    pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 1;
    pub const MAX_CONCURRENT_REQUESTS_LIMIT: usize = 32;

    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    pub const DEFAULT_SOURCE_LANG: &str = "auto";
    pub const DEFAULT_TARGET_LANG: &str = "en";

    /// 翻译代理地址，客户端请求 `<proxy>/translate`
    pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:7080/api";

    /// 代理转发的上游翻译接口
    pub const DEFAULT_UPSTREAM_URL: &str = "https://translate.googleapis.com/translate_a/single";

    // 进度百分比
    pub const PROGRESS_START: u8 = 10;
    pub const PROGRESS_SPAN: u8 = 80;
    pub const PROGRESS_DONE: u8 = 100;

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "turjuman.toml",
        ".turjuman.toml",
        "~/.config/turjuman/config.toml",
    ];
}

/// 检查是否存在配置文件
pub fn config_file_exists() -> bool {
    constants::CONFIG_PATHS
        .iter()
        .any(|path| std::path::Path::new(shellexpand::tilde(path).as_ref()).exists())
}

/// 加载翻译配置，失败时回退到默认配置
pub fn load_translation_config() -> TranslationConfig {
    match ConfigManager::new() {
        Ok(manager) => manager.get_config().clone(),
        Err(e) => {
            tracing::warn!("配置加载失败，使用默认配置: {}", e);
            TranslationConfig::default()
        }
    }
}
