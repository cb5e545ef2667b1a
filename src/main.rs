use anyhow::Result;
use avatar_proxy::app::App;
use avatar_proxy::models::Config;
use clap::Parser;
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "avatar-proxy")]
#[command(about = "Proxy avatar generation requests to the poehali.dev image API")]
struct CliArgs {
    /// Optional listen address override, e.g. 127.0.0.1:3000.
    #[arg(long, value_name = "ADDR", value_parser = parse_bind_arg)]
    bind: Option<SocketAddr>,
}

fn parse_bind_arg(input: &str) -> std::result::Result<SocketAddr, String> {
    input
        .parse()
        .map_err(|_| format!("Invalid address '{}'. Expected format: host:port", input))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "avatar_proxy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting avatar-proxy");

    let args = CliArgs::parse();

    let mut config = Config::from_env();
    if let Some(bind) = args.bind {
        config.bind_addr = bind.to_string();
    }

    match App::from_config(config).run().await {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("Server failed: {}", e);
            std::process::exit(1);
        }
    }
}
