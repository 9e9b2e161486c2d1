use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use menu::{model::MENU_ENDPOINT, store::MenuStore, sync::sync_once};
use reqwest::Client;
use tracing_subscriber::{fmt, EnvFilter};

/// Runs one fetch-decode-replace cycle against the remote menu source.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Remote menu document URL.
    #[arg(long, default_value = MENU_ENDPOINT)]
    url: String,

    /// Local snapshot file.
    #[arg(long, default_value = "menu.json")]
    store: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let store = MenuStore::open(&args.store)?;
    println!("Cached dishes: {}", store.len());

    let count = sync_once(&Client::new(), &args.url, &store).await?;
    println!("Synchronized dishes: {}", count);

    Ok(())
}
