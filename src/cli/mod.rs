pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::scraper::EngineKind;

#[derive(Parser)]
#[command(name = "pagesnap")]
#[command(about = "Capture a snapshot of one web page and serve it as JSON", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/pagesnap/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape one page and overwrite the artifact
    Scrape {
        /// Page to scrape
        #[arg(env = "SCRAPE_URL")]
        url: Option<String>,

        /// Extraction engine (default from config: chrome)
        #[arg(short, long, value_enum)]
        engine: Option<EngineKind>,

        /// Artifact path, overriding config and PAGESNAP_ARTIFACT
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Serve the latest artifact over HTTP
    Serve {
        /// Address to bind (default 0.0.0.0, or HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (default 5000, or PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
