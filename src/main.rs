use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use chatbox::connector::api::http::{self, AppState};
use chatbox::connector::api::{Container, ContainerConfig, Router};
use chatbox::connector::terminal::run_chat;
use chatbox::{Commands, ProviderConfig};

#[derive(Parser)]
#[command(name = "chatbox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true, default_value = "~/.chatbox")]
    data_dir: String,

    #[arg(long, global = true)]
    memory_storage: bool,

    /// Overrides AI_GATEWAY_MODEL
    #[arg(long, global = true)]
    model: Option<String>,

    /// Overrides AI_GATEWAY_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut provider = ProviderConfig::from_env();
    if let Some(model) = cli.model {
        provider.model = model;
    }
    if let Some(base_url) = cli.base_url {
        provider.base_url = base_url;
    }

    let container = Container::new(ContainerConfig {
        data_dir: expand_tilde(&cli.data_dir),
        memory_storage: cli.memory_storage,
        provider,
    })?;

    match cli.command {
        Commands::Serve { port, public } => {
            let ip = if public {
                IpAddr::V4(Ipv4Addr::UNSPECIFIED)
            } else {
                IpAddr::V4(Ipv4Addr::LOCALHOST)
            };
            info!("Model: {}", container.model());
            let state = Arc::new(AppState::new(container.chat_backend(None)));
            http::serve(state, SocketAddr::new(ip, port)).await?;
        }
        Commands::Chat { remote } => {
            let mut session = container.chat_session(remote.as_deref());
            let mut stdout = tokio::io::stdout();
            run_chat(&mut session, BufReader::new(tokio::io::stdin()), &mut stdout).await?;
        }
        command => {
            let router = Router::new(&container);
            let output = router.route(command).await?;
            println!("{}", output);
        }
    }

    Ok(())
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn serve_defaults_to_port_8080_on_localhost() {
        let cli = Cli::try_parse_from(["chatbox", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { port, public } => {
                assert_eq!(port, 8080);
                assert!(!public);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "chatbox",
            "ask",
            "What is a closure?",
            "--memory-storage",
            "--model",
            "openai/gpt-5-mini",
        ])
        .unwrap();
        assert!(cli.memory_storage);
        assert_eq!(cli.model.as_deref(), Some("openai/gpt-5-mini"));
    }

    #[test]
    fn ask_requires_a_question() {
        assert!(Cli::try_parse_from(["chatbox", "ask"]).is_err());
    }

    #[test]
    fn expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/tmp/chatbox"), "/tmp/chatbox");
    }
}
