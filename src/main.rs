//! omutsu-checker - Compare diaper unit prices across Japanese marketplaces.

use anyhow::Result;
use clap::{Parser, Subcommand};
use omutsu_checker::commands::search::parse_brand;
use omutsu_checker::commands::{SearchCommand, Size};
use omutsu_checker::config::{Config, OutputFormat};
use omutsu_checker::models::{ProductType, OTHER_BRAND};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "omutsu-checker",
    version,
    about = "Compare diaper unit prices across Amazon, Rakuten and Yahoo! Shopping",
    long_about = "Searches Amazon.co.jp, Rakuten Ichiba and Yahoo! Shopping at once and ranks \
                  diaper listings by price per diaper."
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "OMUTSU_PROXY")]
    proxy: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search all marketplaces and rank listings by unit price
    #[command(alias = "s")]
    Search {
        /// Diaper size (newborn, s, m, l)
        #[arg(short, long, default_value = "m")]
        size: Size,

        /// Product type (pants, tape)
        #[arg(short = 't', long = "type")]
        product_type: Option<ProductType>,

        /// Brand name, or "other" for listings of no known brand
        #[arg(short, long)]
        brand: Option<String>,

        /// Raw search keyword, replacing the one built from the size
        #[arg(short, long)]
        keyword: Option<String>,
    },

    /// List the brands recognized in listing titles
    Brands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Search { size, product_type, brand, keyword } => {
            let cmd = SearchCommand::new(config)
                .product_type(product_type)
                .brand(brand.as_deref().map(parse_brand));

            let keyword = keyword.unwrap_or_else(|| cmd.keyword_for(size));
            let output = cmd.execute(&keyword).await?;
            println!("{}", output);
        }

        Commands::Brands => {
            println!("Recognized brands (first match wins):\n");
            for brand in &config.keywords.brands {
                println!("  {}", brand);
            }
            println!("  {} (no brand above found in the title)", OTHER_BRAND);
        }
    }

    Ok(())
}
