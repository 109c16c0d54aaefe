mod common;

use channel_snapshot::snapshot::{
    CHANNEL_FILE, VIDEOS_FILE, check_connection, snapshot_channel, snapshot_videos,
};
use channel_snapshot::youtube_api::ChannelRef;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_handle(server: &MockServer, handle: &str, channel_id: &str) {
    Mock::given(path("/channels"))
        .and(query_param("part", "id"))
        .and(query_param("forHandle", handle))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "items": [{ "id": channel_id }] })),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn videos_snapshot_runs_the_whole_pipeline() {
    let server = MockServer::start().await;
    mount_handle(&server, "somehandle", "UCabc123").await;
    Mock::given(path("/channels"))
        .and(query_param("part", "contentDetails"))
        .and(query_param("id", "UCabc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "UCabc123",
                "contentDetails": { "relatedPlaylists": { "uploads": "UUabc123" } }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/playlistItems"))
        .and(query_param("playlistId", "UUabc123"))
        .respond_with(PlaylistPages::new(&[50, 50, 50]))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(path("/videos"))
        .respond_with(VideoEcho::default())
        .expect(2)
        .mount(&server)
        .await;

    let out = tempfile::tempdir().unwrap();
    let path = snapshot_videos(
        &client_for(&server),
        &ChannelRef::parse("somehandle"),
        Some(60),
        out.path(),
    )
    .await
    .unwrap();

    assert_eq!(path, out.path().join("somehandle").join(VIDEOS_FILE));
    let written = read_json(&path);
    let ids: Vec<_> = written
        .as_array()
        .unwrap()
        .iter()
        .map(|video| video["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, video_ids(60));
    assert_eq!(written[0]["snippet"]["title"], "title of v0");
}

#[tokio::test]
async fn failed_enrichment_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "UCabc123",
                "contentDetails": { "relatedPlaylists": { "uploads": "UUabc123" } }
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(path("/playlistItems"))
        .respond_with(PlaylistPages::new(&[10]))
        .mount(&server)
        .await;
    Mock::given(path("/videos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
        .mount(&server)
        .await;

    let out = tempfile::tempdir().unwrap();
    let result = snapshot_videos(
        &client_for(&server),
        &ChannelRef::parse("UCabc123"),
        None,
        out.path(),
    )
    .await;

    assert!(result.is_err());
    assert!(!out.path().join("UCabc123").join(VIDEOS_FILE).exists());
}

#[tokio::test]
async fn channel_snapshot_saves_the_full_channel() {
    let server = MockServer::start().await;
    let channel = json!({
        "kind": "youtube#channel",
        "id": "UCabc123",
        "snippet": {
            "title": "Alex The Analyst",
            "description": "Data analytics tutorials",
            "customUrl": "@alextheanalyst",
            "publishedAt": "2020-01-13T00:32:09Z"
        },
        "statistics": { "viewCount": "1000", "subscriberCount": "42", "videoCount": "7" },
        "contentDetails": { "relatedPlaylists": { "uploads": "UUabc123" } },
        "topicDetails": { "topicCategories": [] }
    });
    mount_handle(&server, "alextheanalyst", "UCabc123").await;
    Mock::given(path("/channels"))
        .and(query_param("part", "snippet,statistics,contentDetails,topicDetails"))
        .and(query_param("id", "UCabc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [channel.clone()] })))
        .expect(1)
        .mount(&server)
        .await;

    let out = tempfile::tempdir().unwrap();
    let path = snapshot_channel(
        &client_for(&server),
        &ChannelRef::parse("alextheanalyst"),
        out.path(),
    )
    .await
    .unwrap()
    .expect("channel was returned");

    assert_eq!(path, out.path().join("alextheanalyst").join(CHANNEL_FILE));
    assert_eq!(read_json(&path), channel);
}

#[tokio::test]
async fn empty_channel_response_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let out = tempfile::tempdir().unwrap();
    let written = snapshot_channel(
        &client_for(&server),
        &ChannelRef::parse("UCgone"),
        out.path(),
    )
    .await
    .unwrap();

    assert_eq!(written, None);
    assert!(!out.path().join("UCgone").exists());
}

#[tokio::test]
async fn connectivity_check_requests_snippet_and_statistics() {
    let server = MockServer::start().await;
    Mock::given(path("/channels"))
        .and(query_param("part", "snippet,statistics"))
        .and(query_param("id", "UCabc123"))
        .and(query_param("key", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "UCabc123",
                "snippet": { "title": "Alex The Analyst", "customUrl": "@alextheanalyst" },
                "statistics": { "subscriberCount": "42", "videoCount": "7" }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let channel = check_connection(&client_for(&server), "UCabc123")
        .await
        .unwrap();
    assert_eq!(
        channel.snippet.unwrap().title.as_deref(),
        Some("Alex The Analyst")
    );
}

#[tokio::test]
async fn connectivity_check_fails_on_empty_response() {
    let server = MockServer::start().await;
    Mock::given(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let err = check_connection(&client_for(&server), "UCgone")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no data returned"), "{err}");
}
