use anyhow::{Context, Result};
use clap::Parser;
use feedfinder::config::Config;
use feedfinder::FeedFinder;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "feedfinder",
    version,
    about = "Discover RSS/Atom/RDF feeds for a website"
)]
struct Args {
    /// Website addresses to search (scheme optional, feed:// accepted)
    #[arg(required = true, value_name = "URL")]
    urls: Vec<String>,

    /// Run every discovery stage instead of stopping at the first hit
    #[arg(long)]
    check_all: bool,

    /// User agent sent with every request
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Config file (defaults to ~/.config/feedfinder/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print results as JSON, one object per input URL
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    url: &'a str,
    feeds: &'a [String],
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only results
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match args.config.as_deref() {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config file '{}'", path.display()))?,
        None => match Config::default_path() {
            Some(path) => Config::load(&path).context("Failed to load config file")?,
            None => Config::default(),
        },
    };

    let mut options = config.into_options();
    if args.check_all {
        options.check_all = true;
    }
    if args.user_agent.is_some() {
        options.user_agent = args.user_agent;
    }
    if let Some(secs) = args.timeout {
        options.timeout = Some(Duration::from_secs(secs));
    }

    let finder = FeedFinder::new(options);

    for url in &args.urls {
        let feeds = finder.find(url).await;
        tracing::info!(url = %url, count = feeds.len(), "Discovery finished");

        if args.json {
            let line = serde_json::to_string(&Report { url, feeds: &feeds })
                .context("Failed to serialize results")?;
            println!("{line}");
        } else {
            for feed in &feeds {
                println!("{feed}");
            }
        }
    }

    Ok(())
}
