//! YouTube Channels API types and functionality.

use crate::youtube_api::types::PageInfo;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Every channel ID starts with this prefix; handles never do.
pub const CHANNEL_ID_PREFIX: &str = "UC";

/// A user-supplied reference to a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    /// A canonical channel ID such as `UC7cs8q-gJRlGwj4A8OmCmXg`.
    Id(String),
    /// A handle such as `alextheanalyst` or `@alextheanalyst`, which needs a lookup.
    Handle(String),
}

impl ChannelRef {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.starts_with(CHANNEL_ID_PREFIX) {
            ChannelRef::Id(input.to_string())
        } else {
            ChannelRef::Handle(input.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ChannelRef::Id(id) => id,
            ChannelRef::Handle(handle) => handle,
        }
    }
}

impl FromStr for ChannelRef {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response structure for the `channels.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelListResponse {
    /// The value will be `youtube#channelListResponse`.
    #[serde(default)]
    pub kind: String,
    /// Channels matching the request. The API omits this field when nothing matched.
    #[serde(default)]
    pub items: VecDeque<Channel>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
}

/// A `channel` resource.
///
/// Only the parts requested are present. Fields this crate does not model are kept in `extra` so
/// that a serialized channel matches what the API sent.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#resource>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    /// The ID that YouTube uses to uniquely identify the channel.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<ChannelSnippet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ChannelStatistics>,
    #[serde(rename = "contentDetails", skip_serializing_if = "Option::is_none")]
    pub content_details: Option<ChannelContentDetails>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Channel {
    /// The ID of the playlist holding every public upload, if `contentDetails` was requested.
    pub fn uploads_playlist_id(&self) -> Option<&str> {
        self.content_details
            .as_ref()?
            .related_playlists
            .as_ref()?
            .uploads
            .as_deref()
    }
}

/// See: <https://developers.google.com/youtube/v3/docs/channels#snippet>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSnippet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The channel's handle, e.g. `@alextheanalyst`.
    #[serde(rename = "customUrl", skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<String>,
    /// RFC 3339 text, kept exactly as sent.
    #[serde(rename = "publishedAt", skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Channel counters. YouTube encodes these as decimal strings.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#statistics>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelStatistics {
    #[serde(rename = "viewCount", skip_serializing_if = "Option::is_none")]
    pub view_count: Option<String>,
    /// Rounded down to three significant figures by the API.
    #[serde(rename = "subscriberCount", skip_serializing_if = "Option::is_none")]
    pub subscriber_count: Option<String>,
    #[serde(rename = "hiddenSubscriberCount", skip_serializing_if = "Option::is_none")]
    pub hidden_subscriber_count: Option<bool>,
    #[serde(rename = "videoCount", skip_serializing_if = "Option::is_none")]
    pub video_count: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists", skip_serializing_if = "Option::is_none")]
    pub related_playlists: Option<RelatedPlaylists>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedPlaylists {
    /// The uploads playlist, in reverse-chronological order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploads: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
