//! CLI entry point for bulletin

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bulletin")]
#[command(version)]
#[command(about = "Tag-filtered article and event pages served from a headless CMS", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = "_config.yml")]
    config: PathBuf,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the site
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to server.port from the config)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to server.ip from the config)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List content from the CMS
    List {
        /// Type of content to list (articles, events, tags)
        #[arg(default_value = "articles")]
        r#type: String,
    },

    /// Show a single article or event
    Show {
        /// Type of content (article, event)
        r#type: String,

        /// Slug of the item
        slug: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "bulletin=debug,info"
    } else {
        "bulletin=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { port, ip } => {
            let site = bulletin::Bulletin::new(&cli.config)?;
            let ip = ip.unwrap_or_else(|| site.config.server.ip.clone());
            let port = port.unwrap_or(site.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            site.serve(&ip, port).await?;
        }

        Commands::List { r#type } => {
            let site = bulletin::Bulletin::new(&cli.config)?;
            bulletin::commands::list::run(&site, &r#type).await?;
        }

        Commands::Show { r#type, slug } => {
            let site = bulletin::Bulletin::new(&cli.config)?;
            bulletin::commands::show::run(&site, &r#type, &slug).await?;
        }

        Commands::Version => {
            println!("bulletin version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
