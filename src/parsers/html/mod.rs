//! HTML解析和处理模块
//!
//! - `utils`: 常量与元素分类
//! - `dom`: DOM 解析与基础节点操作
//! - `serializer`: 序列化功能

pub mod dom;
pub mod serializer;
pub mod utils;

pub use dom::{
    get_child_index_by_name, get_child_node_by_name, get_node_name, get_text_content,
    html_to_dom, set_text_content,
};
pub use serializer::serialize_document;
pub use utils::{is_opaque_element, OPAQUE_ELEMENTS};
