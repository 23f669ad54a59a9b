//! 页面处理器

/// 运行状态横幅
pub const BANNER: &str = "Turjuman File Translator API is running...";

/// 主页处理器
pub async fn index() -> &'static str {
    BANNER
}
