//! 节点分类
//!
//! 判断 DOM 节点是否产生翻译单元。判断只取决于节点自身：
//! 不透明元素排除整棵子树，空白文本排除自身，其余文本纳入。

use markup5ever_rcdom::{Handle, NodeData};

use crate::parsers::html::is_opaque_element;

/// 节点分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    /// 文本叶子，产生一个翻译单元
    Include,
    /// 不透明元素（script/style/code/pre），跳过全部后代
    ExcludeSubtree,
    /// 自身不产生单元，但继续遍历子节点
    ExcludeNode,
}

/// 对单个节点分类
pub fn classify(node: &Handle) -> NodeClass {
    match &node.data {
        NodeData::Text { contents } => {
            if is_blank(&contents.borrow()) {
                NodeClass::ExcludeNode
            } else {
                NodeClass::Include
            }
        }
        NodeData::Element { name, .. } if is_opaque_element(&name.local) => {
            NodeClass::ExcludeSubtree
        }
        _ => NodeClass::ExcludeNode,
    }
}

/// 去除首尾空白后是否为空
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::{get_child_node_by_name, html_to_dom};

    fn body_of(html: &str) -> Handle {
        let dom = html_to_dom(html).unwrap();
        let html_node = get_child_node_by_name(&dom.document, "html").unwrap();
        get_child_node_by_name(&html_node, "body").unwrap()
    }

    #[test]
    fn classifies_nodes() {
        let body = body_of("<body><p>Hi</p><script>x</script><CODE>y</CODE>  </body>");
        let children = body.children.borrow();

        assert_eq!(classify(&children[0]), NodeClass::ExcludeNode);
        let text = children[0].children.borrow()[0].clone();
        assert_eq!(classify(&text), NodeClass::Include);
        assert_eq!(classify(&children[1]), NodeClass::ExcludeSubtree);
        assert_eq!(classify(&children[2]), NodeClass::ExcludeSubtree);
        assert_eq!(classify(&children[3]), NodeClass::ExcludeNode);
    }

    #[test]
    fn blank_text() {
        assert!(is_blank(" \n\t "));
        assert!(is_blank(""));
        assert!(!is_blank(" a "));
    }
}
