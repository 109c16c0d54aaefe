//! Local JSON snapshots of a YouTube channel's public metadata.
//!
//! A run resolves a channel reference to its channel ID, walks the channel's uploads playlist
//! page by page, and fetches video details in batches of 50 IDs. Results are written as plain
//! JSON files; nothing is cached between runs.

pub mod config;
pub mod error;
pub mod output;
pub mod snapshot;
pub mod youtube_api;

pub use error::{Error, TransportError};
