//! The three snapshot commands: channel details, recent videos, and an API connectivity check.

use crate::output::{output_label, save_json};
use crate::youtube_api::{Channel, ChannelRef, YouTubeClient};
use eyre::Context;
use std::path::{Path, PathBuf};

/// Parts fetched for a channel snapshot. All of them are free for `channels.list`.
pub const CHANNEL_PARTS: &str = "snippet,statistics,contentDetails,topicDetails";

/// Parts fetched by the connectivity check.
pub const CHECK_PARTS: &str = "snippet,statistics";

pub const CHANNEL_FILE: &str = "channel_data.json";
pub const VIDEOS_FILE: &str = "videos_data.json";

/// How many videos `videos` fetches unless told otherwise.
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Characters of the channel description shown in the report.
const DESCRIPTION_PREVIEW: usize = 80;

/// Fetches the details of one channel and writes them to `<output_dir>/<label>/channel_data.json`.
///
/// Returns the path written, or `None` if the API returned no channel, in which case nothing is
/// written.
#[tracing::instrument(skip(client))]
pub async fn snapshot_channel(
    client: &YouTubeClient,
    reference: &ChannelRef,
    output_dir: &Path,
) -> eyre::Result<Option<PathBuf>> {
    let channel_id = client
        .resolve_channel_id(reference)
        .await
        .wrap_err_with(|| format!("resolve channel {reference}"))?;

    let Some(channel) = client
        .get_channel(&channel_id, CHANNEL_PARTS)
        .await
        .wrap_err_with(|| format!("fetch channel {channel_id}"))?
    else {
        println!("No data returned.");
        return Ok(None);
    };

    print!("{}", channel_report(&channel));

    let path = save_json(
        output_dir,
        &output_label(reference.as_str()),
        CHANNEL_FILE,
        &channel,
    )
    .await?;
    println!("Saved {}", path.display());
    tracing::info!(channel_id, path = %path.display(), "saved channel snapshot");

    Ok(Some(path))
}

/// Fetches metadata for the most recent uploads of a channel and writes them to
/// `<output_dir>/<label>/videos_data.json`.
///
/// `limit` caps how many uploads are considered, newest first; `None` fetches every upload,
/// which costs quota proportional to the size of the channel.
#[tracing::instrument(skip(client))]
pub async fn snapshot_videos(
    client: &YouTubeClient,
    reference: &ChannelRef,
    limit: Option<usize>,
    output_dir: &Path,
) -> eyre::Result<PathBuf> {
    let channel_id = client
        .resolve_channel_id(reference)
        .await
        .wrap_err_with(|| format!("resolve channel {reference}"))?;
    let playlist_id = client
        .get_uploads_playlist_id(&channel_id)
        .await
        .wrap_err_with(|| format!("look up uploads playlist of {channel_id}"))?;
    let video_ids = client
        .collect_video_ids(&playlist_id, limit)
        .await
        .wrap_err_with(|| format!("list videos in {playlist_id}"))?;

    println!(
        "Found {} videos (limit = {})",
        video_ids.len(),
        limit.map_or_else(|| "all".to_string(), |limit| limit.to_string())
    );

    let videos = client
        .get_videos(&video_ids)
        .await
        .context("fetch video metadata")?;
    if videos.len() < video_ids.len() {
        tracing::info!(
            requested = video_ids.len(),
            returned = videos.len(),
            "some videos were not returned by the API"
        );
    }

    let path = save_json(
        output_dir,
        &output_label(reference.as_str()),
        VIDEOS_FILE,
        &videos,
    )
    .await?;
    println!("Saved {}", path.display());
    tracing::info!(videos = videos.len(), path = %path.display(), "saved video snapshot");

    Ok(path)
}

/// Makes one cheap request to confirm the API key works, and prints what came back.
#[tracing::instrument(skip(client))]
pub async fn check_connection(client: &YouTubeClient, channel_id: &str) -> eyre::Result<Channel> {
    let channel = client
        .get_channel(channel_id, CHECK_PARTS)
        .await
        .context("call YouTube API")?
        .ok_or_else(|| eyre::eyre!("no data returned, check that {channel_id} is a valid channel ID"))?;

    print!("{}", check_report(&channel));
    Ok(channel)
}

/// The human-readable summary printed after fetching a channel.
pub fn channel_report(channel: &Channel) -> String {
    let snippet = channel.snippet.as_ref();
    let stats = channel.statistics.as_ref();
    let description = snippet
        .and_then(|s| s.description.as_deref())
        .unwrap_or_default();

    format!(
        "Channel Info\n\
         ------------\n\
         Title:           {title}\n\
         Description:     {description}...\n\
         Subscribers:     {subscribers}\n\
         Total Videos:    {videos}\n\
         Total Views:     {views}\n",
        title = or_na(snippet.and_then(|s| s.title.as_deref())),
        description = preview(description, DESCRIPTION_PREVIEW),
        subscribers = or_na(stats.and_then(|s| s.subscriber_count.as_deref())),
        videos = or_na(stats.and_then(|s| s.video_count.as_deref())),
        views = or_na(stats.and_then(|s| s.view_count.as_deref())),
    )
}

fn check_report(channel: &Channel) -> String {
    let snippet = channel.snippet.as_ref();
    let stats = channel.statistics.as_ref();

    format!(
        "Connected to YouTube API\n\
         Channel Title: {title}\n\
         Handle:        {handle}\n\
         Subscribers:   {subscribers}\n\
         Total Videos:  {videos}\n",
        title = or_na(snippet.and_then(|s| s.title.as_deref())),
        handle = or_na(snippet.and_then(|s| s.custom_url.as_deref())),
        subscribers = or_na(stats.and_then(|s| s.subscriber_count.as_deref())),
        videos = or_na(stats.and_then(|s| s.video_count.as_deref())),
    )
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

/// The first `max_chars` characters of `text`, never splitting a character.
fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
