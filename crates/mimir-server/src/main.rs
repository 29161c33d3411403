use clap::Parser;
use mimir_server::cli::{Cli, Commands};
use mimir_server::app::run_server;
use mimir_server::state::{AppState, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            address,
            threshold,
            train_file,
            verbose,
        } => {
            init_logging(verbose);

            let config = ServerConfig {
                threshold,
                train_file,
            };
            let state = AppState::new(&config)?;

            let addr: SocketAddr = format!("{}:{}", address, port).parse()?;
            run_server(state, addr).await?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "mimir_server=debug,mimir_classifiers=debug,mimir_media=debug,tower_http=debug"
    } else {
        "mimir_server=info,mimir_classifiers=info,mimir_media=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
