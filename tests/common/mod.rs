// 集成测试公共模块
//
// 提供模拟翻译客户端、HTML 辅助函数和进度记录

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use markup5ever_rcdom::{Handle, NodeData};

use turjuman::parsers::html_to_dom;
use turjuman::translation::{
    LanguagePair, Progress, ProgressSink, TranslationConfig, TranslationError,
    TranslationResult, TranslationService, Translator, UnitOutcome,
};

/// 模拟翻译模式
#[derive(Debug, Clone)]
pub enum MockMode {
    /// `text` → `[tl] text`
    Prefix,
    /// 指定的原文得到结构不符的响应，其余同 `Prefix`
    UnavailableFor(HashSet<String>),
    /// 第 n 次调用（从 1 开始）返回传输错误
    FailOnCall(usize),
    /// 除 `except` 中的原文外，一律译为 `replacement`
    Replace {
        replacement: String,
        except: HashSet<String>,
    },
}

/// 记录每次调用的模拟翻译客户端
pub struct MockTranslator {
    mode: MockMode,
    calls: Mutex<Vec<String>>,
    /// 越早的调用延迟越长，用于打乱完成顺序
    stagger: Option<Duration>,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            calls: Mutex::new(Vec::new()),
            stagger: None,
        }
    }

    pub fn prefix() -> Self {
        Self::new(MockMode::Prefix)
    }

    pub fn with_stagger(mut self, step: Duration) -> Self {
        self.stagger = Some(step);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

pub fn prefixed(text: &str, languages: &LanguagePair) -> String {
    format!("[{}] {}", languages.target, text)
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        languages: &LanguagePair,
    ) -> TranslationResult<UnitOutcome> {
        assert!(!text.trim().is_empty(), "blank text must never be sent");

        let call_number = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(text.to_string());
            calls.len()
        };

        if let Some(step) = self.stagger {
            let factor = 10u32.saturating_sub(call_number as u32 % 10);
            tokio::time::sleep(step * factor).await;
        }

        match &self.mode {
            MockMode::Prefix => Ok(UnitOutcome::Translated(prefixed(text, languages))),
            MockMode::UnavailableFor(texts) if texts.contains(text) => {
                Ok(UnitOutcome::Unavailable(text.to_string()))
            }
            MockMode::UnavailableFor(_) => Ok(UnitOutcome::Translated(prefixed(text, languages))),
            MockMode::FailOnCall(n) if *n == call_number => Err(TranslationError::NetworkError(
                "connection reset by peer".to_string(),
            )),
            MockMode::FailOnCall(_) => Ok(UnitOutcome::Translated(prefixed(text, languages))),
            MockMode::Replace { except, .. } if except.contains(text) => {
                Ok(UnitOutcome::Translated(text.to_string()))
            }
            MockMode::Replace { replacement, .. } => {
                Ok(UnitOutcome::Translated(replacement.clone()))
            }
        }
    }
}

/// 使用模拟客户端的翻译服务
pub fn service_with(
    translator: Arc<MockTranslator>,
    batch_size: usize,
    concurrency: usize,
) -> TranslationService {
    let config = TranslationConfig {
        source_lang: "auto".to_string(),
        target_lang: "fr".to_string(),
        batch_size,
        max_concurrent_requests: concurrency,
        ..TranslationConfig::default()
    };
    TranslationService::new(translator, config)
}

/// 记录所有进度事件
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<Progress>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<Progress> {
        self.events.lock().unwrap().clone()
    }

    pub fn percents(&self) -> Vec<u8> {
        self.events().iter().map(|p| p.percent).collect()
    }

    pub fn assert_monotonic_to_100(&self) {
        let percents = self.percents();
        assert!(!percents.is_empty(), "no progress reported");
        assert!(
            percents.windows(2).all(|w| w[0] <= w[1]),
            "progress went backwards: {:?}",
            percents
        );
        assert_eq!(*percents.last().unwrap(), 100);
    }
}

impl ProgressSink for RecordingProgress {
    fn report(&self, progress: Progress) {
        self.events.lock().unwrap().push(progress);
    }
}

/// HTML 辅助函数
pub struct HtmlTestHelper;

impl HtmlTestHelper {
    /// 文档树形状：元素名、属性、子节点结构，文本只记为 `#text`
    pub fn tree_signature(html: &str) -> String {
        let dom = html_to_dom(html).expect("html should parse");
        let mut out = String::new();
        Self::write_signature(&dom.document, &mut out);
        out
    }

    fn write_signature(node: &Handle, out: &mut String) {
        match &node.data {
            NodeData::Document => out.push_str("#document"),
            NodeData::Doctype { name, .. } => out.push_str(&format!("#doctype({})", name)),
            NodeData::Text { .. } => out.push_str("#text"),
            NodeData::Comment { contents } => out.push_str(&format!("#comment({})", contents)),
            NodeData::Element { name, attrs, .. } => {
                let mut attrs: Vec<String> = attrs
                    .borrow()
                    .iter()
                    .map(|a| format!("{}={}", a.name.local, a.value))
                    .collect();
                attrs.sort();
                out.push_str(&format!("<{} {}>", name.local, attrs.join(" ")));
            }
            NodeData::ProcessingInstruction { target, .. } => {
                out.push_str(&format!("#pi({})", target))
            }
        }

        let children = node.children.borrow();
        if !children.is_empty() {
            out.push('(');
            for child in children.iter() {
                Self::write_signature(child, out);
                out.push(',');
            }
            out.push(')');
        }
    }

    /// 所有元素数量
    pub fn element_count(html: &str) -> usize {
        Self::tree_signature(html).matches('<').count()
    }

    pub fn sample_page() -> String {
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Sample page</title>
    <style>body { color: #333; }</style>
</head>
<body class="main">
    <!-- navigation -->
    <nav><a href="/home" title="Home page">Home</a> | <a href="/about">About us</a></nav>
    <h1 id="top">Welcome to the sample</h1>
    <p>This is a <strong>test</strong> paragraph with <em>inline</em> markup.</p>
    <pre>fn main() { println!("keep"); }</pre>
    <p>Use <code>cargo run</code> to start.</p>
    <script>var greeting = "Hello";</script>
    <ul><li>First item</li><li>Second item</li><li>   </li></ul>
    <img src="a.png" alt="An image">
</body>
</html>"#
            .to_string()
    }
}

/// 在随机端口上运行 axum 路由
#[cfg(feature = "web")]
pub async fn spawn_router(router: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    addr
}

/// 模拟上游翻译接口的响应：`[[["<tl>:<q>", "<q>", null, null, 1]], null, "<sl>"]`
#[cfg(feature = "web")]
pub fn fake_upstream_router() -> axum::Router {
    use axum::extract::Query;
    use axum::routing::get;
    use std::collections::HashMap;

    async fn single(Query(params): Query<HashMap<String, String>>) -> axum::Json<serde_json::Value> {
        let q = params.get("q").cloned().unwrap_or_default();
        let tl = params.get("tl").cloned().unwrap_or_default();
        let sl = params.get("sl").cloned().unwrap_or_default();
        axum::Json(serde_json::json!([[[format!("{}:{}", tl, q), q, null, null, 1]], null, sl]))
    }

    async fn broken() -> &'static str {
        "<html><body>Service Unavailable</body></html>"
    }

    async fn echo_params(
        Query(params): Query<Vec<(String, String)>>,
    ) -> axum::Json<serde_json::Value> {
        axum::Json(serde_json::json!({ "params": params }))
    }

    axum::Router::new()
        .route("/translate_a/single", get(single))
        .route("/broken/single", get(broken))
        .route("/echo/single", get(echo_params))
}
