//! 翻译进度报告
//!
//! 进度从读取阶段的 10% 开始，每完成一个单元推进到
//! `10 + floor(i / n * 80)`，成功结束时为 100%。

use std::fmt;

use crate::translation::config::constants::{PROGRESS_DONE, PROGRESS_SPAN, PROGRESS_START};

/// 运行阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStage {
    Reading,
    Translating,
    Completed,
}

impl fmt::Display for ProgressStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProgressStage::Reading => "reading",
            ProgressStage::Translating => "translating",
            ProgressStage::Completed => "completed",
        };
        write!(f, "{}", name)
    }
}

/// 单次进度事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub percent: u8,
    pub stage: ProgressStage,
    /// 尚未翻译的单元数
    pub remaining: usize,
    pub total: usize,
}

impl Progress {
    pub fn reading(total: usize) -> Self {
        Self {
            percent: PROGRESS_START,
            stage: ProgressStage::Reading,
            remaining: total,
            total,
        }
    }

    /// 下标为 `index`（从 0 开始）的单元完成后的进度
    ///
    /// 剩余数按 `total - index` 计算，包含刚完成的单元。
    pub fn translating(index: usize, total: usize) -> Self {
        Self {
            percent: progress_percent(index, total),
            stage: ProgressStage::Translating,
            remaining: total.saturating_sub(index),
            total,
        }
    }

    pub fn completed(total: usize) -> Self {
        Self {
            percent: PROGRESS_DONE,
            stage: ProgressStage::Completed,
            remaining: 0,
            total,
        }
    }
}

/// `10 + floor(index / total * 80)`，`total` 为 0 时视为已完成
pub fn progress_percent(index: usize, total: usize) -> u8 {
    if total == 0 {
        return PROGRESS_START + PROGRESS_SPAN;
    }
    let index = index.min(total);
    let span = (index * PROGRESS_SPAN as usize) / total;
    PROGRESS_START + span as u8
}

/// 进度接收方
pub trait ProgressSink: Send + Sync {
    fn report(&self, progress: Progress);
}

impl<F> ProgressSink for F
where
    F: Fn(Progress) + Send + Sync,
{
    fn report(&self, progress: Progress) {
        self(progress)
    }
}

/// 丢弃所有进度事件
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _progress: Progress) {}
}

/// 以 debug 日志输出进度
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn report(&self, progress: Progress) {
        tracing::debug!(
            "进度 {}% ({}，剩余 {} / {})",
            progress.percent,
            progress.stage,
            progress.remaining,
            progress.total
        );
    }
}
