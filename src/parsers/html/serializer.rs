use html5ever::serialize::{serialize, SerializeOpts};
use markup5ever_rcdom::{RcDom, SerializableHandle};

use crate::translation::error::{TranslationError, TranslationResult};

/// 序列化文档
///
/// 从文档根节点开始输出，保留 doctype、注释以及 head/body 结构。
/// 与解析时一致地禁用脚本，`<noscript>` 内的文本按普通文本转义。
pub fn serialize_document(dom: &RcDom) -> TranslationResult<String> {
    let mut buf: Vec<u8> = Vec::new();

    let opts = SerializeOpts {
        scripting_enabled: false,
        ..Default::default()
    };
    let serializable: SerializableHandle = dom.document.clone().into();
    serialize(&mut buf, &serializable, opts)
        .map_err(|e| TranslationError::DocumentError(format!("无法序列化DOM: {}", e)))?;

    String::from_utf8(buf)
        .map_err(|e| TranslationError::DocumentError(format!("序列化结果不是UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::html_to_dom;

    #[test]
    fn keeps_doctype_and_comments() {
        let dom =
            html_to_dom("<!DOCTYPE html><html><head><title>T</title></head><body><!-- c --><p class=\"x\">Hi</p></body></html>")
                .unwrap();
        let output = serialize_document(&dom).unwrap();

        assert!(output.starts_with("<!DOCTYPE html>"));
        assert!(output.contains("<!-- c -->"));
        assert!(output.contains("<p class=\"x\">Hi</p>"));
        assert!(output.contains("<title>T</title>"));
    }

    #[test]
    fn noscript_text_is_escaped() {
        let dom = html_to_dom("<body><noscript>a &lt;b&gt; c</noscript></body>").unwrap();
        let output = serialize_document(&dom).unwrap();
        assert!(output.contains("<noscript>a &lt;b&gt; c</noscript>"));
    }

    #[test]
    fn script_content_is_not_escaped() {
        let dom = html_to_dom("<body><script>if (a < b) { x = 1; }</script></body>").unwrap();
        let output = serialize_document(&dom).unwrap();
        assert!(output.contains("<script>if (a < b) { x = 1; }</script>"));
    }
}
