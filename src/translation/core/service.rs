//! 翻译服务核心实现
//!
//! `TranslationService` 持有翻译客户端与配置，可被多个请求共享；
//! 每次翻译创建一个独立的 `TranslationRun`，它独占本次运行的文档、
//! 翻译单元和输出，运行结束后即被丢弃。
//!
//! ## 执行模型
//!
//! - 单元按文档顺序提交，最多 `max_concurrent_requests` 个请求同时进行
//! - 结果按单元顺序收集，与完成顺序无关
//! - 第一个硬失败立即结束运行，不再发起新的请求，也不产生输出
//! - HTML 的 DOM 不跨越等待点：先收集叶子，翻译完成后在重新解析的 DOM 上回写

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};

use crate::core::{Document, DocumentFormat, DocumentKind};
use crate::parsers::html::html_to_dom;
use crate::translation::config::TranslationConfig;
use crate::translation::core::client::{HttpTranslator, LanguagePair, Translator};
use crate::translation::core::response::UnitOutcome;
use crate::translation::error::TranslationResult;
use crate::translation::pipeline::{
    apply_translations, collect_text_leaves, join_results, split_into_batches, TextLeaf,
};
use crate::translation::progress::{Progress, ProgressSink};

/// 单次运行的统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// 翻译单元总数（纯文本为批次数，HTML 为叶子数）
    pub units: usize,
    pub translated: usize,
    /// 响应结构不符、保留原文的单元数
    pub unavailable: usize,
    /// 未发请求的空白批次数
    pub skipped: usize,
    pub elapsed: Duration,
}

impl RunStats {
    /// 实际发出的请求数
    pub fn requests(&self) -> usize {
        self.translated + self.unavailable
    }

    fn record(&mut self, outcome: &UnitOutcome) {
        match outcome {
            UnitOutcome::Translated(_) => self.translated += 1,
            UnitOutcome::Unavailable(_) => self.unavailable += 1,
        }
    }
}

/// 翻译完成的文档
#[derive(Debug, Clone)]
pub struct TranslatedDocument {
    pub file_name: String,
    pub format: DocumentFormat,
    pub content: String,
    pub stats: RunStats,
}

impl TranslatedDocument {
    pub fn media_type(&self) -> &'static str {
        self.format.media_type()
    }
}

/// 统一的翻译服务
#[derive(Clone)]
pub struct TranslationService {
    translator: Arc<dyn Translator>,
    config: TranslationConfig,
}

impl TranslationService {
    /// 使用指定的翻译客户端创建服务
    pub fn new(translator: Arc<dyn Translator>, config: TranslationConfig) -> Self {
        Self { translator, config }
    }

    /// 根据配置创建访问翻译代理的服务
    pub fn from_config(config: TranslationConfig) -> TranslationResult<Self> {
        config.validate()?;
        let translator = HttpTranslator::from_config(&config)?;
        tracing::debug!("翻译端点: {}", translator.endpoint());
        Ok(Self::new(Arc::new(translator), config))
    }

    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    /// 配置中的语言对
    pub fn languages(&self) -> LanguagePair {
        LanguagePair::new(&self.config.source_lang, &self.config.target_lang)
    }

    /// 使用配置中的语言对翻译文档
    pub async fn translate_document(
        &self,
        document: &Document,
        progress: &dyn ProgressSink,
    ) -> TranslationResult<TranslatedDocument> {
        self.translate_document_with(document, &self.languages(), progress)
            .await
    }

    /// 使用指定的语言对翻译文档
    pub async fn translate_document_with(
        &self,
        document: &Document,
        languages: &LanguagePair,
        progress: &dyn ProgressSink,
    ) -> TranslationResult<TranslatedDocument> {
        let run = TranslationRun {
            translator: self.translator.as_ref(),
            document,
            languages,
            progress,
            batch_size: self.config.batch_size.max(1),
            concurrency: self.config.max_concurrent_requests.max(1),
            stats: RunStats::default(),
            started: Instant::now(),
        };

        tracing::info!(
            "开始翻译 {} ({}, {})",
            document.file_name(),
            document.format(),
            languages
        );

        let result = run.execute().await;
        match &result {
            Ok(translated) => tracing::info!(
                "翻译完成 {}: {} 个单元，{} 个已翻译，{} 个保留原文，{} 个空白跳过，用时 {:?}",
                translated.file_name,
                translated.stats.units,
                translated.stats.translated,
                translated.stats.unavailable,
                translated.stats.skipped,
                translated.stats.elapsed
            ),
            Err(e) => tracing::error!("翻译 {} 失败: {}", document.file_name(), e),
        }
        result
    }
}

/// 一次翻译运行的上下文，运行结束即丢弃
struct TranslationRun<'a> {
    translator: &'a dyn Translator,
    document: &'a Document,
    languages: &'a LanguagePair,
    progress: &'a dyn ProgressSink,
    batch_size: usize,
    concurrency: usize,
    stats: RunStats,
    started: Instant,
}

impl<'a> TranslationRun<'a> {
    async fn execute(mut self) -> TranslationResult<TranslatedDocument> {
        let content = match self.document.kind() {
            DocumentKind::Plain => self.run_plain().await?,
            DocumentKind::Structured => self.run_structured().await?,
        };

        self.stats.elapsed = self.started.elapsed();
        self.progress.report(Progress::completed(self.stats.units));

        Ok(TranslatedDocument {
            file_name: self.document.translated_file_name(),
            format: self.document.format(),
            content,
            stats: self.stats,
        })
    }

    /// 纯文本：固定行数批次，空白批次原样保留
    async fn run_plain(&mut self) -> TranslationResult<String> {
        let batches = split_into_batches(self.document.content(), self.batch_size);
        let total = batches.len();
        self.stats.units = total;
        self.progress.report(Progress::reading(total));

        let translator = self.translator;
        let languages = self.languages;
        let mut results = stream::iter(batches.iter())
            .map(|batch| async move {
                if batch.is_blank() {
                    return Ok(None);
                }
                tracing::debug!("翻译第 {} 批 (行 {:?})", batch.index + 1, batch.lines);
                translator.translate(&batch.text, languages).await.map(Some)
            })
            .buffered(self.concurrency)
            .boxed();

        let mut outputs = Vec::with_capacity(total);
        let mut index = 0;
        while let Some(result) = results.next().await {
            let batch = &batches[index];
            let result = result.map_err(|e| e.with_context(format!("第 {} 批", index + 1)));
            match result? {
                Some(outcome) => {
                    self.stats.record(&outcome);
                    outputs.push(outcome.into_text());
                }
                None => {
                    self.stats.skipped += 1;
                    outputs.push(batch.text.clone());
                }
            }
            self.progress.report(Progress::translating(index, total));
            index += 1;
        }

        Ok(join_results(&outputs))
    }

    /// HTML：逐叶子翻译后回写
    async fn run_structured(&mut self) -> TranslationResult<String> {
        let source = self.document.content();
        let leaves = segment(source)?;
        let total = leaves.len();
        self.stats.units = total;
        self.progress.report(Progress::reading(total));

        if leaves.is_empty() {
            tracing::debug!("没有可翻译的文本叶子");
        }

        let translator = self.translator;
        let languages = self.languages;
        let mut results = stream::iter(leaves.iter())
            .map(|leaf| translator.translate(&leaf.text, languages))
            .buffered(self.concurrency)
            .boxed();

        let mut outcomes = Vec::with_capacity(total);
        while let Some(result) = results.next().await {
            let position = outcomes.len();
            let outcome =
                result.map_err(|e| e.with_context(format!("第 {} 个文本叶子", position + 1)))?;
            self.stats.record(&outcome);
            self.progress
                .report(Progress::translating(position, total));
            outcomes.push(outcome);
        }

        apply_translations(source, &leaves, &outcomes)
    }
}

/// 解析文档并收集叶子；DOM 在返回前释放
fn segment(source: &str) -> TranslationResult<Vec<TextLeaf>> {
    let dom = html_to_dom(source)?;
    Ok(collect_text_leaves(&dom))
}
