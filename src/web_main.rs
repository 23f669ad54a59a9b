//! Web 服务器主程序入口

#[cfg(feature = "web")]
use turjuman::env::EnvConfig;
#[cfg(feature = "web")]
use turjuman::web::{WebConfig, WebServer};

#[cfg(feature = "web")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_config = EnvConfig::from_env()?;
    init_logging(&env_config);

    let mut web_config = WebConfig::from_env()?;

    // 简单的命令行参数解析
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    web_config.bind_addr = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("Error: --bind requires an address");
                    std::process::exit(1);
                }
            }
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    web_config.port = args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: Invalid port number");
                        std::process::exit(1);
                    });
                    i += 2;
                } else {
                    eprintln!("Error: --port requires a port number");
                    std::process::exit(1);
                }
            }
            "--static-dir" => {
                if i + 1 < args.len() {
                    web_config.static_dir = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --static-dir requires a directory");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Error: Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    web_config.validate()?;
    env_config.log_summary();
    if !turjuman::translation::config_file_exists() {
        tracing::info!("未找到翻译配置文件，文档翻译使用默认配置");
    }

    let server = WebServer::new(web_config);
    server.start().await?;

    Ok(())
}

#[cfg(feature = "web")]
fn init_logging(env_config: &EnvConfig) {
    let level = env_config
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(!env_config.no_color)
        .with_target(false)
        .init();
}

#[cfg(feature = "web")]
fn print_help() {
    println!("Turjuman Web Server");
    println!();
    println!("USAGE:");
    println!("    turjuman-web [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -b, --bind <ADDRESS>       Bind address [default: 127.0.0.1]");
    println!("    -p, --port <PORT>          Port number [default: 7080]");
    println!("        --static-dir <DIR>     Serve static files under /static");
    println!("    -h, --help                 Print help information");
    println!();
    println!("ENDPOINTS:");
    println!("    GET  /api/translate?sl=..&tl=..&q=..   Translation proxy");
    println!("    POST /api/documents?file_name=..       Translate a whole document");
    println!();
    println!("EXAMPLES:");
    println!("    turjuman-web");
    println!("    turjuman-web --bind 0.0.0.0 --port 3000");
}

#[cfg(not(feature = "web"))]
fn main() {
    eprintln!("Error: Web feature not enabled. Please compile with --features web");
    std::process::exit(1);
}
