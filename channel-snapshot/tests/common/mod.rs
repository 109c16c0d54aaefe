#![allow(dead_code)]

use channel_snapshot::config::ApiKey;
use channel_snapshot::youtube_api::{YouTubeClient, build_http_client};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

pub const TEST_KEY: &str = "test-key";

pub fn client_for(server: &MockServer) -> YouTubeClient {
    YouTubeClient::new(ApiKey::new(TEST_KEY).unwrap(), build_http_client().unwrap())
        .with_base_url(server.uri())
}

pub fn query(request: &Request, name: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Requests the server received for `endpoint`, in arrival order.
pub async fn requests_to(server: &MockServer, endpoint: &str) -> Vec<Request> {
    let path = format!("/{endpoint}");
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .into_iter()
        .filter(|request| request.url.path() == path)
        .collect()
}

/// Video IDs `v0`, `v1`, ... split into pages of the given sizes, linked by `page-<n>` tokens.
pub struct PlaylistPages {
    pub page_sizes: Vec<usize>,
}

impl PlaylistPages {
    pub fn new(page_sizes: &[usize]) -> Self {
        Self {
            page_sizes: page_sizes.to_vec(),
        }
    }
}

impl Respond for PlaylistPages {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let index = query(request, "pageToken")
            .map(|token| token.trim_start_matches("page-").parse::<usize>().unwrap())
            .unwrap_or(0);
        let start: usize = self.page_sizes[..index].iter().sum();
        let items: Vec<_> = (start..start + self.page_sizes[index])
            .map(|n| json!({ "contentDetails": { "videoId": format!("v{n}") } }))
            .collect();

        let mut body = json!({
            "kind": "youtube#playlistItemListResponse",
            "items": items,
            "pageInfo": {
                "totalResults": self.page_sizes.iter().sum::<usize>(),
                "resultsPerPage": 50
            }
        });
        if index + 1 < self.page_sizes.len() {
            body["nextPageToken"] = json!(format!("page-{}", index + 1));
        }
        ResponseTemplate::new(200).set_body_json(body)
    }
}

/// Answers `videos.list` with one record per requested ID, except for IDs in `missing`.
#[derive(Default)]
pub struct VideoEcho {
    pub missing: Vec<String>,
}

impl Respond for VideoEcho {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let ids = query(request, "id").unwrap_or_default();
        let items: Vec<_> = ids
            .split(',')
            .filter(|id| !id.is_empty() && !self.missing.iter().any(|m| m == id))
            .map(|id| {
                json!({
                    "kind": "youtube#video",
                    "id": id,
                    "snippet": { "title": format!("title of {id}"), "publishedAt": "2024-05-01T12:00:00Z" },
                    "statistics": { "viewCount": "10", "likeCount": "1" },
                    "contentDetails": { "duration": "PT1M" }
                })
            })
            .collect();
        let count = items.len();
        ResponseTemplate::new(200).set_body_json(json!({
            "kind": "youtube#videoListResponse",
            "items": items,
            "pageInfo": { "totalResults": count, "resultsPerPage": count }
        }))
    }
}

/// Delegates to `inner`, except that call number `fail_on` (zero-based) gets a 500.
pub struct FailOnCall<R> {
    pub inner: R,
    pub fail_on: usize,
    pub calls: AtomicUsize,
}

impl<R> FailOnCall<R> {
    pub fn new(inner: R, fail_on: usize) -> Self {
        Self {
            inner,
            fail_on,
            calls: AtomicUsize::new(0),
        }
    }
}

impl<R: Respond> Respond for FailOnCall<R> {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        if self.calls.fetch_add(1, Ordering::SeqCst) == self.fail_on {
            ResponseTemplate::new(500).set_body_string("backend error")
        } else {
            self.inner.respond(request)
        }
    }
}

pub fn video_ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("v{i}")).collect()
}
