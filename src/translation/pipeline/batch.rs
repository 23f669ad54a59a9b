//! 纯文本批次划分
//!
//! 按 `\n` 切分行，以固定行数为步长分组。各批次的行区间首尾相接、
//! 不重叠地覆盖全部行；批次内的换行随整段文本一起翻译。

use std::ops::Range;

use crate::translation::pipeline::filters::is_blank;

/// 一个纯文本批次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBatch {
    /// 批次序号（从 0 开始）
    pub index: usize,
    /// 覆盖的行下标区间
    pub lines: Range<usize>,
    /// 以 `\n` 连接的批次文本
    pub text: String,
}

impl LineBatch {
    /// 空白批次原样输出，不发起请求
    pub fn is_blank(&self) -> bool {
        is_blank(&self.text)
    }
}

/// 步长数：`ceil(line_count / batch_size)`
pub fn count_strides(line_count: usize, batch_size: usize) -> usize {
    if batch_size == 0 {
        return 0;
    }
    line_count.div_ceil(batch_size)
}

/// 将内容划分为批次
///
/// 空内容也产生一个空白批次，使输出与输入一致。
pub fn split_into_batches(content: &str, batch_size: usize) -> Vec<LineBatch> {
    let batch_size = batch_size.max(1);
    let lines: Vec<&str> = content.split('\n').collect();

    lines
        .chunks(batch_size)
        .enumerate()
        .map(|(index, chunk)| {
            let start = index * batch_size;
            LineBatch {
                index,
                lines: start..start + chunk.len(),
                text: chunk.join("\n"),
            }
        })
        .collect()
}

/// 按原顺序以 `\n` 连接各批次结果
pub fn join_results<S: AsRef<str>>(results: &[S]) -> String {
    let parts: Vec<&str> = results.iter().map(|s| s.as_ref()).collect();
    parts.join("\n")
}
