use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// relaydesk - support tickets and orders relayed to chat and email
#[derive(Parser)]
#[command(name = "relaydesk")]
#[command(about = "Relay ticket and order submissions to a chat webhook and email", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Fill in and submit a form from the terminal
    Submit(cli::SubmitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = relaydesk::Config::load(cli.config.clone())?;

    relaydesk::observability::init_observability(
        "relaydesk",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        config.observability.log_format,
    )?;

    match cli.command {
        Commands::Serve { host, port } => {
            config.validate().map_err(|e| anyhow::anyhow!(e))?;
            cli::serve(config, host, port).await
        }
        // The client only needs the endpoint, server secrets stay optional.
        Commands::Submit(args) => cli::submit(args, config.http.timeout()).await,
    }
}
