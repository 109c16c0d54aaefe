//! Core YouTube API client functionality.

use crate::config::ApiKey;
use crate::error::{Error, TransportError};
use crate::youtube_api::{
    channels::{Channel, ChannelListResponse, ChannelRef},
    playlist_items::PlaylistItemListResponse,
    types::PagedStream,
    videos::{Video, VideoListResponse},
};
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::time::Duration;
use tokio_stream::{Stream, StreamExt};
use tracing::instrument;

/// Root of the YouTube Data API v3.
pub const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Largest page `playlistItems.list` will return.
pub const MAX_PAGE_SIZE: usize = 50;

/// Most IDs `videos.list` accepts in a single call.
pub const MAX_IDS_PER_LOOKUP: usize = 50;

/// Default upper bound on any single request, connect time included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Parts requested for every video in [`YouTubeClient::get_videos`].
///
/// Each part costs quota per video, so keep this list short.
pub const VIDEO_PARTS: &str = "snippet,statistics,contentDetails";

/// Builds the HTTP client every request goes through.
///
/// The timeout is set per request by [`YouTubeClient`], not here.
pub fn build_http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().build()
}

/// Client for the read-only parts of the YouTube Data API v3.
///
/// Requests are authorized with a plain API key sent as the `key` query parameter. Every method
/// performs its requests one after another; nothing is retried.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    api_key: ApiKey,
    /// HTTP client for API requests
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl YouTubeClient {
    /// Creates a client talking to the public API endpoint.
    ///
    /// Every request is bounded by [`REQUEST_TIMEOUT`] unless [`Self::with_timeout`] says otherwise.
    pub fn new(api_key: ApiKey, client: reqwest::Client) -> Self {
        Self {
            api_key,
            client,
            base_url: API_BASE.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Points the client at a different API root, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How long a single request may take before it fails with [`TransportError::Send`].
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends a GET request to `endpoint` and decodes the JSON body.
    ///
    /// The API key is appended to `query_params`. Errors never include the full request URL so
    /// the key does not end up in logs.
    #[instrument(skip(self), level = tracing::Level::TRACE)]
    pub(crate) async fn make_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<T, Error> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .query(query_params)
            .query(&[("key", self.api_key.expose())])
            .send()
            .await
            .map_err(|source| TransportError::Send {
                url: url.clone(),
                source: source.without_url(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TransportError::Status { url, status, body }.into());
        }

        let decoded = response
            .json()
            .await
            .map_err(|source| TransportError::Decode {
                url,
                source: source.without_url(),
            })?;
        Ok(decoded)
    }

    /// Maps a channel reference to its canonical channel ID.
    ///
    /// A reference that already is a channel ID is returned as-is without touching the API.
    /// A handle costs exactly one `channels.list` call with `part=id`.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self), ret)]
    pub async fn resolve_channel_id(&self, reference: &ChannelRef) -> Result<String, Error> {
        let handle = match reference {
            ChannelRef::Id(id) => {
                tracing::debug!("reference is already a channel ID");
                return Ok(id.clone());
            }
            ChannelRef::Handle(handle) => handle,
        };

        let query_params = [("part", "id"), ("forHandle", handle.as_str())];
        let mut channels: ChannelListResponse =
            self.make_request("channels", &query_params).await?;

        tracing::debug!(
            returned_items = channels.items.len(),
            "looked up channel handle"
        );

        channels
            .items
            .pop_front()
            .map(|channel| channel.id)
            .ok_or_else(|| Error::NotFound {
                reference: handle.clone(),
            })
    }

    /// Fetches a single channel with the given comma-separated `parts`.
    ///
    /// Returns `None` when the API knows no channel with that ID.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self))]
    pub async fn get_channel(
        &self,
        channel_id: &str,
        parts: &str,
    ) -> Result<Option<Channel>, Error> {
        let query_params = [("part", parts), ("id", channel_id)];
        let mut channels: ChannelListResponse =
            self.make_request("channels", &query_params).await?;

        tracing::debug!(
            total_results = channels.page_info.total_results,
            returned_items = channels.items.len(),
            "fetched channel"
        );

        Ok(channels.items.pop_front())
    }

    /// Returns the ID of the playlist that lists every upload of the channel.
    #[instrument(skip(self), ret)]
    pub async fn get_uploads_playlist_id(&self, channel_id: &str) -> Result<String, Error> {
        let channel = self
            .get_channel(channel_id, "contentDetails")
            .await?
            .ok_or_else(|| Error::NotFound {
                reference: channel_id.to_string(),
            })?;

        channel
            .uploads_playlist_id()
            .map(str::to_string)
            .ok_or_else(|| Error::NoUploadsPlaylist {
                channel_id: channel_id.to_string(),
            })
    }

    /// Returns a lazy stream of the video IDs in a playlist, in playlist order.
    ///
    /// Pages of up to `page_size` entries (clamped to `1..=50`) are requested only as the stream
    /// is consumed. For the uploads playlist the order is newest first.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlistItems/list>
    #[instrument(skip(self))]
    pub fn list_playlist_video_ids(
        &self,
        playlist_id: &str,
        page_size: usize,
    ) -> impl Stream<Item = Result<String, Error>> + use<'_> {
        let playlist_id = playlist_id.to_string();
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        PagedStream::new(move |page_token| {
            let playlist_id = playlist_id.clone();
            async move {
                let response = self
                    .list_playlist_items_internal(&playlist_id, page_size, page_token)
                    .await?;
                let ids: VecDeque<String> = response
                    .items
                    .into_iter()
                    .map(|item| item.content_details.video_id)
                    .collect();
                Ok((ids, response.next_page_token))
            }
        })
    }

    /// Collects the video IDs of a playlist, stopping after `limit` IDs if one is given.
    ///
    /// With a limit of `n` the result holds exactly `min(n, playlist length)` IDs, and no page is
    /// requested after the `n`th ID has been seen. Without a limit every page is fetched.
    ///
    /// A failed page request fails the whole call; IDs gathered up to that point are dropped.
    #[instrument(skip(self))]
    pub async fn collect_video_ids(
        &self,
        playlist_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<String>, Error> {
        let page_size = limit.map_or(MAX_PAGE_SIZE, |limit| limit.min(MAX_PAGE_SIZE));
        let stream = self
            .list_playlist_video_ids(playlist_id, page_size)
            .take(limit.unwrap_or(usize::MAX));
        let mut stream = std::pin::pin!(stream);

        let mut video_ids = Vec::new();
        while let Some(video_id) = stream.next().await {
            video_ids.push(video_id?);
        }

        tracing::debug!(collected = video_ids.len(), "collected video ids");
        Ok(video_ids)
    }

    /// Fetches full metadata for every ID in `video_ids`.
    ///
    /// IDs are sent in consecutive batches of at most 50, one `videos.list` call per batch, and
    /// the results are concatenated in batch order. Videos that no longer exist are silently left
    /// out by the API, so the result can be shorter than the input. If any batch fails the whole
    /// call fails.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self, video_ids), fields(requested = video_ids.len()))]
    pub async fn get_videos(&self, video_ids: &[String]) -> Result<Vec<Video>, Error> {
        let mut videos = Vec::with_capacity(video_ids.len());

        for (batch, chunk) in video_ids.chunks(MAX_IDS_PER_LOOKUP).enumerate() {
            let ids = chunk.join(",");
            let query_params = [("part", VIDEO_PARTS), ("id", ids.as_str())];
            let response: VideoListResponse = self.make_request("videos", &query_params).await?;

            tracing::debug!(
                batch,
                requested = chunk.len(),
                returned_items = response.items.len(),
                "fetched video batch"
            );

            videos.extend(response.items);
        }

        Ok(videos)
    }

    /// Internal method to call the `playlistItems.list` API for one page.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - The playlist to list
    /// * `max_results` - Maximum number of entries to return (1-50)
    /// * `page_token` - Optional page token for pagination
    async fn list_playlist_items_internal(
        &self,
        playlist_id: &str,
        max_results: usize,
        page_token: Option<String>,
    ) -> Result<PlaylistItemListResponse, Error> {
        let max_results_string = max_results.to_string();
        let mut query_params = vec![
            ("part", "contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", max_results_string.as_str()),
        ];

        if let Some(ref token) = page_token {
            query_params.push(("pageToken", token.as_str()));
        }

        let page: PlaylistItemListResponse =
            self.make_request("playlistItems", &query_params).await?;

        tracing::debug!(
            total_results = page.page_info.total_results,
            returned_items = page.items.len(),
            has_next_page = page.next_page_token.is_some(),
            "fetched playlist page"
        );

        Ok(page)
    }
}
