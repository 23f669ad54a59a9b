//! 翻译管道模块
//!
//! 提供文本处理管道：节点分类、叶子收集、纯文本批次和译文回写

pub mod batch;
pub mod collector;
pub mod filters;
pub mod reassembly;

// 重新导出主要类型
pub use batch::{count_strides, join_results, split_into_batches, LineBatch};
pub use collector::{collect_text_leaves, locate_body, Slot, TextLeaf};
pub use filters::{classify, is_blank, NodeClass};
pub use reassembly::{apply_translations, resolve_slot};
