//! LiveView host daemon
//!
//! Listens for a LiveView device (directly or through a serial bridge) and
//! answers its requests until interrupted.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info, Instrument, Level, Span};

use openliveview::config::{LiveViewConfig, ServerConfig, TransportKind};
#[cfg(not(unix))]
use openliveview::error::ProtocolError;
use openliveview::error::Result;
use openliveview::protocol::Dispatcher;
use openliveview::service::LiveViewService;
use openliveview::transport::{Acceptor, TcpAcceptor};
use openliveview::utils::{assets, logging};

#[derive(Parser, Debug)]
#[command(name = "liveview-host")]
#[command(author, version, about = "Host service for LiveView wearable displays", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Menu icon image, overrides the configured path
    #[arg(long)]
    icon: Option<PathBuf>,

    /// Listen address, overrides the configured one
    #[arg(short, long)]
    address: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the host service (default)
    Run,

    /// Print a configuration file with every default value
    GenerateConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Logging may not be up yet
            error!("Fatal error: {e}");
            eprintln!("liveview-host: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::GenerateConfig) = cli.command {
        println!("{}", LiveViewConfig::example_config());
        return Ok(());
    }

    let config = load_config(&cli)?;
    logging::init_logging(&config.logging)?;
    config.validate_strict()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        transport = ?config.server.transport,
        address = %config.server.address,
        "Starting LiveView host"
    );

    let span = logging::app_span(&config.logging);
    let icon = assets::load_menu_icon(&config.assets.menu_icon_path)?;
    let dispatcher = Dispatcher::new(config.protocol.clone(), icon);

    match config.server.transport {
        TransportKind::Tcp => {
            let acceptor = TcpAcceptor::bind(config.server.address.as_str()).await?;
            serve(acceptor, dispatcher, config.server, span).await
        }
        #[cfg(unix)]
        TransportKind::Unix => {
            let acceptor = openliveview::transport::UnixAcceptor::bind(&config.server.address)?;
            serve(acceptor, dispatcher, config.server, span).await
        }
        #[cfg(not(unix))]
        TransportKind::Unix => Err(ProtocolError::ConfigError(
            "Unix socket transport is not supported on this platform".to_string(),
        )),
    }
}

/// File (or defaults), then environment, then command line.
fn load_config(cli: &Cli) -> Result<LiveViewConfig> {
    let mut config = match &cli.config {
        Some(path) => LiveViewConfig::from_file(path)?,
        None => LiveViewConfig::default(),
    }
    .with_env_overrides();

    if let Some(icon) = &cli.icon {
        config.assets.menu_icon_path = icon.clone();
    }
    if let Some(address) = &cli.address {
        config.server.address = address.clone();
    }
    if cli.verbose {
        config.logging.log_level = Level::DEBUG;
    }

    Ok(config)
}

async fn serve<A: Acceptor>(
    acceptor: A,
    dispatcher: Dispatcher,
    server: ServerConfig,
    span: Span,
) -> Result<()> {
    let (service, handle) = LiveViewService::new(acceptor, dispatcher, server);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received CTRL+C signal, shutting down");
                handle.stop();
            }
            Err(e) => error!(error = %e, "Failed to listen for CTRL+C"),
        }
    });

    service.run().instrument(span).await;
    Ok(())
}
