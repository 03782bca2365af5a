pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};

use crate::config::ServiceConfig;

#[derive(Parser)]
#[command(name = "docreset")]
#[command(about = "Reset a document or collection to its default values")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        help = "Database URL (overrides DATABASE_URL)"
    )]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the configured reset once (scheduled entry point)")]
    Run,

    #[command(about = "Serve the authenticated manual reset endpoint")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides DOCRESET_PORT / PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Mint a bearer token for the manual reset endpoint")]
    Token {
        #[arg(help = "Token subject")]
        subject: String,
        #[arg(long, help = "Grant the admin claim")]
        admin: bool,
        #[arg(long, default_value_t = 1, help = "Validity in hours")]
        hours: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let mut config = ServiceConfig::from_env();
    if let Some(url) = cli.database_url {
        config.database_url = Some(url);
    }

    match cli.command {
        Commands::Run => commands::run::handle(config, output_format).await,
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            commands::serve::handle(config).await
        }
        Commands::Token {
            subject,
            admin,
            hours,
        } => commands::token::handle(&config, &subject, admin, hours, output_format),
    }
}
