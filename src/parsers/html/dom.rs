use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::translation::error::{TranslationError, TranslationResult};

/// 将 HTML 文本解析为 DOM
///
/// 以禁用脚本的方式解析（与离线文档解析器一致），
/// 因此 `<noscript>` 的内容会作为普通元素进入 DOM。
pub fn html_to_dom(html: &str) -> TranslationResult<RcDom> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };

    parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| TranslationError::DocumentError(format!("HTML解析失败: {}", e)))
}

/// 根据名称获取子节点
pub fn get_child_node_by_name(parent: &Handle, node_name: &str) -> Option<Handle> {
    let children = parent.children.borrow();
    let matching_children = children.iter().find(|child| match child.data {
        NodeData::Element { ref name, .. } => &*name.local == node_name,
        _ => false,
    });
    matching_children.cloned()
}

/// 获取子节点在父节点中的位置
pub fn get_child_index_by_name(parent: &Handle, node_name: &str) -> Option<usize> {
    parent
        .children
        .borrow()
        .iter()
        .position(|child| get_node_name(child) == Some(node_name))
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 获取文本节点的内容，非文本节点返回 None
pub fn get_text_content(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Text { contents } => Some(contents.borrow().to_string()),
        _ => None,
    }
}

/// 替换文本节点的内容
pub fn set_text_content(node: &Handle, text: &str) -> TranslationResult<()> {
    match &node.data {
        NodeData::Text { contents } => {
            let mut contents = contents.borrow_mut();
            contents.clear();
            contents.push_slice(text);
            Ok(())
        }
        _ => Err(TranslationError::DocumentError(
            "目标节点不是文本节点".to_string(),
        )),
    }
}
