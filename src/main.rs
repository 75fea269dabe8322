//! Command-line front end: print the streams of an XSPF playlist as JSON

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use xspf_streams::config::FetchConfig;
use xspf_streams::fetch;

/// Command-line arguments for xspf-streams
#[derive(Parser, Debug)]
#[command(name = "xspf-streams")]
#[command(about = "List the playable streams of an XSPF playlist")]
#[command(version)]
struct Args {
    /// Playlist file path or HTTP(S) URL
    source: String,

    /// Override the configured User-Agent for remote playlists
    #[arg(long, env = "XSPF_STREAMS_USER_AGENT")]
    user_agent: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Store the effective settings (including --user-agent) as the new defaults
    #[arg(long)]
    save_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = FetchConfig::load();
    if let Some(user_agent) = args.user_agent {
        config.user_agent = user_agent;
    }
    if args.save_config {
        let path = config.save().context("Failed to save configuration")?;
        info!("Saved configuration to {}", path.display());
    }

    let loaded = if fetch::is_remote(&args.source) {
        fetch::download_and_parse(args.source.trim(), &config)
    } else {
        fetch::parse_file(&args.source)
    };
    let streams = loaded.with_context(|| format!("Failed to load playlist {}", args.source))?;

    info!("Found {} streams in {}", streams.len(), args.source);

    let json = if args.pretty {
        serde_json::to_string_pretty(&streams)?
    } else {
        serde_json::to_string(&streams)?
    };
    println!("{}", json);

    Ok(())
}
