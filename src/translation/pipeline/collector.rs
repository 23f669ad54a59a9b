//! 文本叶子收集器
//!
//! 以先序遍历收集 `<body>` 子树中可翻译的文本节点。每个叶子记录
//! 从文档根开始的子节点下标路径（槽位），回写时在重新解析的
//! DOM 上按同一路径定位，DOM 本身不跨越异步等待点。

use std::fmt;

use markup5ever_rcdom::{Handle, RcDom};

use crate::parsers::html::{get_child_index_by_name, get_child_node_by_name, get_text_content};
use crate::translation::pipeline::filters::{classify, NodeClass};

/// 文本叶子在文档树中的位置：从文档根开始逐层的子节点下标
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot(Vec<usize>);

impl Slot {
    pub fn new(path: Vec<usize>) -> Self {
        Slot(path)
    }

    pub fn path(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "/{}", parts.join("/"))
    }
}

/// 待翻译的文本叶子
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLeaf {
    pub slot: Slot,
    /// 叶子的原始文本（未裁剪）
    pub text: String,
}

/// 定位 `<body>` 节点及其槽位路径
pub fn locate_body(dom: &RcDom) -> Option<(Handle, Vec<usize>)> {
    let html_index = get_child_index_by_name(&dom.document, "html")?;
    let html = get_child_node_by_name(&dom.document, "html")?;
    let body_index = get_child_index_by_name(&html, "body")?;
    let body = get_child_node_by_name(&html, "body")?;

    Some((body, vec![html_index, body_index]))
}

/// 按文档顺序收集所有可翻译叶子
pub fn collect_text_leaves(dom: &RcDom) -> Vec<TextLeaf> {
    let Some((body, body_path)) = locate_body(dom) else {
        tracing::debug!("文档没有 body 元素，不收集文本");
        return Vec::new();
    };

    let mut leaves = Vec::new();
    let mut stack: Vec<(Handle, Vec<usize>)> = vec![(body, body_path)];

    while let Some((node, path)) = stack.pop() {
        match classify(&node) {
            NodeClass::Include => {
                if let Some(text) = get_text_content(&node) {
                    leaves.push(TextLeaf {
                        slot: Slot::new(path),
                        text,
                    });
                }
            }
            NodeClass::ExcludeSubtree => {}
            NodeClass::ExcludeNode => {
                // 逆序入栈，保证弹出顺序为先序
                let children = node.children.borrow();
                for (index, child) in children.iter().enumerate().rev() {
                    let mut child_path = path.clone();
                    child_path.push(index);
                    stack.push((child.clone(), child_path));
                }
            }
        }
    }

    tracing::debug!("收集到 {} 个文本叶子", leaves.len());
    leaves
}
