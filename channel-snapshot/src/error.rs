//! Error types shared by the API client and the configuration loader.

use reqwest::StatusCode;

/// Errors surfaced by the snapshot library.
///
/// None of these are retried internally: every failure aborts the step that raised it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Credentials are missing or unreadable.
    #[error("configuration error: {0}")]
    Config(String),

    /// The API returned no channel for the given reference.
    #[error("no channel found for `{reference}`")]
    NotFound { reference: String },

    /// The channel exists but its details name no uploads playlist.
    #[error("channel {channel_id} has no uploads playlist")]
    NoUploadsPlaylist { channel_id: String },

    /// An HTTP round trip did not complete successfully.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Ways a single request to the YouTube API can fail.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response (connection failure, timeout, ...).
    #[error("send request to YouTube API: {url}")]
    Send {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("YouTube API request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The response body was not the JSON we expected.
    #[error("parse YouTube API response from {url} as JSON")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl Error {
    /// True when an HTTP round trip failed, whatever the reason.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}
