//! YouTube Data API v3 client library.
//!
//! Only the read-only, key-authorized endpoints needed to snapshot a channel are covered:
//!
//! - `channels.list` to resolve a handle and to fetch channel details
//! - `playlistItems.list` to walk the channel's uploads playlist
//! - `videos.list` to fetch video metadata in batches of 50
//!
//! # Pagination
//!
//! List endpoints are exposed as lazy [`PagedStream`]s. A page is only requested once every item
//! of the previous page has been consumed, so `stream.take(n)` never fetches more pages than it
//! needs to produce `n` items.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use channel_snapshot::config::ApiKey;
//! use channel_snapshot::youtube_api::{ChannelRef, YouTubeClient, build_http_client};
//!
//! # async fn example() -> eyre::Result<()> {
//! let client = YouTubeClient::new(ApiKey::new("AIza...")?, build_http_client()?);
//!
//! let channel_id = client
//!     .resolve_channel_id(&ChannelRef::parse("alextheanalyst"))
//!     .await?;
//! let uploads = client.get_uploads_playlist_id(&channel_id).await?;
//! let video_ids = client.collect_video_ids(&uploads, Some(120)).await?;
//! let videos = client.get_videos(&video_ids).await?;
//! println!("fetched {} of {} videos", videos.len(), video_ids.len());
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod client;
pub mod playlist_items;
pub mod types;
pub mod videos;

pub use client::{
    API_BASE, MAX_IDS_PER_LOOKUP, MAX_PAGE_SIZE, REQUEST_TIMEOUT, YouTubeClient,
    build_http_client,
};
pub use types::{PageInfo, PagedStream};

pub use channels::{Channel, ChannelRef, ChannelSnippet, ChannelStatistics};

pub use videos::{Video, VideoStatistics};
