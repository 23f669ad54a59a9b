/// 内容不可翻译的元素：其后代文本原样保留
pub const OPAQUE_ELEMENTS: &[&str] = &["script", "style", "code", "pre"];

/// 检查元素名是否属于不可翻译元素
pub fn is_opaque_element(name: &str) -> bool {
    OPAQUE_ELEMENTS
        .iter()
        .any(|opaque| opaque.eq_ignore_ascii_case(name))
}
