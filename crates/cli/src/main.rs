use clap::{Parser, Subcommand};
use ghl_mcp_cli::{build_registry, check_required, tool_catalog};
use ghl_mcp_core::config::AppConfig;
use ghl_mcp_core::{SERVER_NAME, VERSION};
use ghl_mcp_server::gateway::Gateway;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

#[derive(Parser)]
#[command(name = "ghl-mcp-server")]
#[command(version = VERSION)]
#[command(about = "Relay server exposing GoHighLevel CRM operations as HTTP tools")]
struct Cli {
    /// Optional config file layered under environment variables
    #[arg(long, global = true, env = "GHL_MCP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Override MCP_SERVER_HOST
        #[arg(long)]
        host: Option<String>,
        /// Override MCP_SERVER_PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the registered tools as JSON and exit
    Tools,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let stdout_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(Level::INFO.into());

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_filter(stdout_filter);

    tracing_subscriber::registry().with(stdout_layer).init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.clone())?;

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Tools => {
            let registry = build_registry(&config)?;
            println!("{}", serde_json::to_string_pretty(&tool_catalog(&registry))?);
            Ok(())
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.mcp_server_host = host;
            }
            if let Some(port) = port {
                config.mcp_server_port = port;
            }
            check_required(&config)?;

            info!("Starting {} v{}", SERVER_NAME, VERSION);
            info!("Host: {}", config.mcp_server_host);
            info!("Port: {}", config.mcp_server_port);
            info!("Sub-account: {}", config.ghl_sub_account_id);

            let registry = Arc::new(build_registry(&config)?);
            let gateway = Gateway::new(&config, registry);
            if let Err(e) = gateway.start().await {
                error!("Gateway error: {}", e);
                return Err(e);
            }
            Ok(())
        }
    }
}
