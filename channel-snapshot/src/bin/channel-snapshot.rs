use channel_snapshot::config::{DEFAULT_CONFIG_PATH, load_api_key};
use channel_snapshot::snapshot::{self, DEFAULT_MAX_RESULTS};
use channel_snapshot::youtube_api::{ChannelRef, YouTubeClient, build_http_client};
use clap::{Parser, Subcommand};
use eyre::Context;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Save YouTube channel and video metadata as local JSON snapshots.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// TOML file with a `YOUTUBE_API_KEY` entry; the environment variable of the same name wins.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Snapshots go to `<OUTPUT_DIR>/<CHANNEL>/`.
    #[arg(long, global = true, default_value = "output")]
    output_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Save channel details (title, description, statistics, content details) to
    /// `channel_data.json`. Costs one quota unit per call.
    Channel {
        /// Channel ID (`UC...`) or handle.
        channel: ChannelRef,
    },
    /// Save metadata of the channel's most recent uploads to `videos_data.json`.
    Videos {
        /// Channel ID (`UC...`) or handle.
        channel: ChannelRef,
        /// Only fetch this many of the newest uploads.
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS, conflicts_with = "all")]
        max_results: usize,
        /// Fetch every upload. Quota cost grows with the size of the channel.
        #[arg(long)]
        all: bool,
    },
    /// Check that the API key works by fetching a single channel.
    Check {
        #[arg(default_value = "UC7cs8q-gJRlGwj4A8OmCmXg")]
        channel_id: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    let api_key = load_api_key(&cli.config).context("load API key")?;
    let http = build_http_client().context("build HTTP client")?;
    let yt = YouTubeClient::new(api_key, http);

    match cli.command {
        Command::Channel { channel } => {
            snapshot::snapshot_channel(&yt, &channel, &cli.output_dir).await?;
        }
        Command::Videos {
            channel,
            max_results,
            all,
        } => {
            let limit = (!all).then_some(max_results);
            snapshot::snapshot_videos(&yt, &channel, limit, &cli.output_dir).await?;
        }
        Command::Check { channel_id } => {
            snapshot::check_connection(&yt, &channel_id).await?;
        }
    }

    Ok(())
}
