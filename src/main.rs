use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use turjuman::core::{print_error_message, print_info_message, Document, DocumentFormat};
use turjuman::env::{core as core_env, EnvVar};
use turjuman::translation::{
    ConfigManager, ErrorSeverity, Progress, ProgressStage, TranslationConfig, TranslationError,
    TranslationResult, TranslationService,
};

/// Turjuman - translate plain-text, Markdown and HTML files
///
/// Text is sent through a translation proxy (`<proxy>/translate?sl&tl&q`)
/// and reassembled into a file of the same format, written next to the
/// input as `<name>_translated.<ext>`.
#[derive(Parser, Debug)]
#[command(name = "turjuman")]
#[command(version)]
#[command(about = "Translate plain-text, Markdown and HTML files")]
#[command(long_about = "Translate plain-text, Markdown and HTML files through a translation proxy.

Plain text and Markdown are translated in batches of lines; HTML is translated
text node by text node, leaving markup, scripts, styles and code untouched.

EXAMPLES:
    turjuman notes.txt                        # auto -> en
    turjuman -s en -t ar page.html            # English to Arabic
    turjuman -t fr -o out.md README.md        # Explicit output path
    turjuman -p http://localhost:7080/api -j 4 book.txt")]
struct Cli {
    /// Input file (.txt, .md, .html or .htm)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Source language code, or 'auto'
    #[arg(short, long)]
    source_lang: Option<String>,

    /// Target language code
    #[arg(short, long)]
    target_lang: Option<String>,

    /// Output file [default: <name>_translated.<ext> next to the input]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Translation proxy base URL
    #[arg(short, long)]
    proxy_url: Option<String>,

    /// Lines per plain-text batch
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Translation requests in flight at once
    #[arg(short = 'j', long)]
    concurrency: Option<usize>,

    /// Input character encoding [default: BOM or UTF-8]
    #[arg(short, long)]
    encoding: Option<String>,

    /// Configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "silent")]
    verbose: bool,

    /// Suppress progress and informational output
    #[arg(short = 'q', long)]
    silent: bool,
}

impl Cli {
    fn log_level(&self) -> tracing::Level {
        if self.verbose {
            return tracing::Level::DEBUG;
        }
        if self.silent {
            return tracing::Level::ERROR;
        }
        core_env::LogLevel::get()
            .ok()
            .and_then(|level| level.parse().ok())
            .unwrap_or(tracing::Level::INFO)
    }

    fn load_config(&self) -> TranslationResult<TranslationConfig> {
        let manager = match &self.config {
            Some(path) => ConfigManager::from_file(path)?,
            None => ConfigManager::new()?,
        };
        if let Some(path) = manager.source_path() {
            tracing::info!("使用配置文件: {}", path);
        }
        let mut config = manager.into_config();

        if let Some(ref source_lang) = self.source_lang {
            config.source_lang = source_lang.clone();
        }
        if let Some(ref target_lang) = self.target_lang {
            config.target_lang = target_lang.clone();
        }
        if let Some(ref proxy_url) = self.proxy_url {
            config.proxy_url = proxy_url.clone();
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrent_requests = concurrency;
        }

        config.validate()?;
        Ok(config)
    }

    fn output_path(&self, document: &Document) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => {
                let dir = self.input.parent().unwrap_or_else(|| Path::new(""));
                dir.join(document.translated_file_name())
            }
        }
    }
}

fn init_logging(level: tracing::Level) {
    let no_color = core_env::NoColor::get_or_default(false);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(!no_color)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn progress_bar(silent: bool) -> ProgressBar {
    if silent {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(100);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}")
        .or_else(|_| ProgressStyle::default_bar().template("[{bar:40}] {pos}% {msg}"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style.progress_chars("=> "));
    bar
}

async fn run(cli: &Cli) -> TranslationResult<PathBuf> {
    let input_name = cli.input.to_string_lossy();

    // 先检查扩展名，不支持的格式不读取文件
    DocumentFormat::from_file_name(&input_name)?;

    let config = cli.load_config()?;
    let data = fs::read(&cli.input)?;
    let document = Document::from_bytes(&input_name, &data, cli.encoding.as_deref())?;
    let service = TranslationService::from_config(config)?;

    let bar = progress_bar(cli.silent);
    let sink_bar = bar.clone();
    let sink = move |progress: Progress| {
        sink_bar.set_position(progress.percent as u64);
        match progress.stage {
            ProgressStage::Reading => sink_bar.set_message("reading"),
            ProgressStage::Translating => {
                sink_bar.set_message(format!("{} part(s) remaining", progress.remaining))
            }
            ProgressStage::Completed => sink_bar.set_message("done"),
        }
    };

    let result = service.translate_document(&document, &sink).await;
    match &result {
        Ok(_) => bar.finish(),
        Err(_) => bar.abandon_with_message("failed"),
    }
    let translated = result?;

    let output = cli.output_path(&document);
    fs::write(&output, translated.content.as_bytes())?;

    Ok(output)
}

/// 按严重程度记录失败，并把错误写到 stderr
fn report_failure(error: &TranslationError) {
    match error.severity() {
        ErrorSeverity::Info | ErrorSeverity::Warning => {
            tracing::warn!(category = ?error.category(), "翻译失败: {}", error)
        }
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            tracing::error!(category = ?error.category(), "翻译失败: {}", error)
        }
    }

    print_error_message(&format!("Error: {}", error));
    if error.is_transport_failure() {
        print_error_message("Check that the translation proxy is running and reachable.");
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    match run(&cli).await {
        Ok(output) => {
            if !cli.silent {
                print_info_message(&format!("Saved translation to {}", output.display()));
            }
        }
        Err(e) => {
            report_failure(&e);
            process::exit(1);
        }
    }
}
