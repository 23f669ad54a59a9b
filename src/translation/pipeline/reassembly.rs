//! 译文回写
//!
//! 重新解析源文档，按槽位路径找到每个文本叶子并写入译文，
//! 最后从文档根序列化。槽位必须解析到与收集时文本相同的文本节点，
//! 否则视为文档结构错误。

use markup5ever_rcdom::{Handle, RcDom};

use crate::parsers::html::{get_text_content, html_to_dom, serialize_document, set_text_content};
use crate::translation::core::UnitOutcome;
use crate::translation::error::helpers::document_error;
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::pipeline::collector::{Slot, TextLeaf};

/// 按路径定位节点
pub fn resolve_slot(dom: &RcDom, slot: &Slot) -> TranslationResult<Handle> {
    let mut node = dom.document.clone();

    for &index in slot.path() {
        let child = node.children.borrow().get(index).cloned();
        node = child.ok_or_else(|| document_error(format!("无法定位文本节点 {}", slot)))?;
    }

    Ok(node)
}

/// 将翻译结果写回文档并序列化
///
/// `Unavailable` 的叶子保持原文。
pub fn apply_translations(
    source: &str,
    leaves: &[TextLeaf],
    outcomes: &[UnitOutcome],
) -> TranslationResult<String> {
    if leaves.len() != outcomes.len() {
        return Err(TranslationError::InternalError(format!(
            "翻译结果数量 {} 与文本叶子数量 {} 不一致",
            outcomes.len(),
            leaves.len()
        )));
    }

    let dom = html_to_dom(source)?;

    for (leaf, outcome) in leaves.iter().zip(outcomes) {
        let node = resolve_slot(&dom, &leaf.slot)?;

        match get_text_content(&node) {
            Some(current) if current == leaf.text => {}
            _ => {
                return Err(document_error(format!(
                    "槽位 {} 不再指向原文本节点",
                    leaf.slot
                )))
            }
        }

        if let UnitOutcome::Translated(text) = outcome {
            set_text_content(&node, text)?;
        }
    }

    serialize_document(&dom)
}
