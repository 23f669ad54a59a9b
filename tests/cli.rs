//! 命令行集成测试

#![cfg(feature = "cli")]

use std::fs;
use std::path::Path;

use assert_cmd::Command;

#[allow(dead_code)]
mod common {
    include!("common/mod.rs");
}

const ENV_VARS: &[&str] = &[
    "TURJUMAN_TRANSLATION_SOURCE_LANG",
    "TURJUMAN_TRANSLATION_TARGET_LANG",
    "TURJUMAN_TRANSLATION_PROXY_URL",
    "TURJUMAN_TRANSLATION_BATCH_SIZE",
    "TURJUMAN_TRANSLATION_MAX_CONCURRENT_REQUESTS",
    "TURJUMAN_TRANSLATION_REQUEST_TIMEOUT",
];

/// 在指定目录中运行 CLI，清除会影响配置的环境变量
fn turjuman(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("turjuman").expect("turjuman binary");
    cmd.current_dir(dir);
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    listener.local_addr().expect("free port addr").port()
}

#[test]
fn test_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = turjuman(dir.path()).arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();

    assert!(stdout.contains("Translate plain-text, Markdown and HTML files"));
    assert!(stdout.contains("--target-lang"));
    assert!(stdout.contains("--proxy-url"));
}

#[test]
fn test_unsupported_extension_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("report.pdf"), "%PDF-1.7").unwrap();

    let output = turjuman(dir.path())
        .arg("report.pdf")
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8_lossy(&output.get_output().stderr).to_string();

    assert!(stderr.contains("report.pdf"));
    assert!(!stderr.contains("translation proxy"));
    assert!(!dir.path().join("report_translated.pdf").exists());
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();

    turjuman(dir.path())
        .arg("absent.txt")
        .assert()
        .failure()
        .code(1);
    assert!(!dir.path().join("absent_translated.txt").exists());
}

#[test]
fn test_unreachable_proxy_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "Hello\nWorld").unwrap();

    let output = turjuman(dir.path())
        .args([
            "-q",
            "-p",
            &format!("http://127.0.0.1:{}/api", closed_port()),
            "notes.txt",
        ])
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8_lossy(&output.get_output().stderr).to_string();

    assert!(stderr.contains("translation proxy is running"));
    assert!(!dir.path().join("notes_translated.txt").exists());
}

#[test]
fn test_invalid_options_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "Hello").unwrap();

    turjuman(dir.path())
        .args(["-b", "0", "notes.txt"])
        .assert()
        .failure()
        .code(1);

    turjuman(dir.path())
        .args(["-v", "-q", "notes.txt"])
        .assert()
        .failure();

    assert!(!dir.path().join("notes_translated.txt").exists());
}

#[cfg(feature = "web")]
mod end_to_end {
    use std::sync::Arc;

    use turjuman::translation::{TranslationConfig, TranslationService};
    use turjuman::web::{create_router, AppState};

    use super::common::{fake_upstream_router, spawn_router};
    use super::*;

    /// 启动一个转发到模拟上游的代理，返回其 `/api` 地址
    async fn spawn_proxy() -> String {
        let upstream = spawn_router(fake_upstream_router()).await;
        let state = AppState {
            http_client: reqwest::Client::new(),
            upstream_url: url::Url::parse(&format!("http://{}/translate_a/single", upstream))
                .unwrap(),
            translation_service: TranslationService::from_config(TranslationConfig::default())
                .unwrap(),
        };
        let app = spawn_router(create_router(Arc::new(state), None)).await;
        format!("http://{}/api", app)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_translates_text_file() {
        let proxy = spawn_proxy().await;
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "Hello\nWorld").unwrap();

        let dir_path = dir.path().to_path_buf();
        let output = tokio::task::spawn_blocking(move || {
            turjuman(&dir_path)
                .args(["-t", "fr", "-p", &proxy, "notes.txt"])
                .assert()
                .success()
                .get_output()
                .clone()
        })
        .await
        .unwrap();

        let translated = fs::read_to_string(dir.path().join("notes_translated.txt")).unwrap();
        assert_eq!(translated, "fr:Hello\nWorld");

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("notes_translated.txt"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_translates_html_to_explicit_output() {
        let proxy = spawn_proxy().await;
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("page.htm"),
            "<html><body><h1>Title</h1><code>x()</code></body></html>",
        )
        .unwrap();

        let dir_path = dir.path().to_path_buf();
        let output = tokio::task::spawn_blocking(move || {
            turjuman(&dir_path)
                .args(["-q", "-s", "en", "-t", "de", "-p", &proxy, "-o", "out.htm", "page.htm"])
                .assert()
                .success()
                .get_output()
                .clone()
        })
        .await
        .unwrap();

        assert!(output.stdout.is_empty());
        assert!(!dir.path().join("page_translated.htm").exists());

        let translated = fs::read_to_string(dir.path().join("out.htm")).unwrap();
        assert!(translated.contains("<h1>de:Title</h1>"));
        assert!(translated.contains("<code>x()</code>"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_decodes_legacy_encoding() {
        let proxy = spawn_proxy().await;
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cafe.txt"), b"caf\xE9").unwrap();

        let dir_path = dir.path().to_path_buf();
        tokio::task::spawn_blocking(move || {
            turjuman(&dir_path)
                .args(["-q", "-e", "windows-1252", "-t", "en", "-p", &proxy, "cafe.txt"])
                .assert()
                .success();
        })
        .await
        .unwrap();

        let translated = fs::read_to_string(dir.path().join("cafe_translated.txt")).unwrap();
        assert_eq!(translated, "en:café");
    }
}
