mod common;

use common::{session, SessionResponder};
use movie_summary::{
    summarize_movie, summary_path, write_summary, MovieId, SessionResult, SummaryError, SummaryJob,
};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use wiremock::{MockServer, ResponseTemplate};

fn job(movie_id: &str, output_dir: &Path) -> SummaryJob {
    SummaryJob {
        movie_id: MovieId::parse(movie_id).unwrap(),
        output_dir: output_dir.to_path_buf(),
        language: "en".to_string(),
    }
}

#[tokio::test]
async fn test_stagnant_session_is_saved() {
    let server = MockServer::start().await;
    let start = session("s1", "pending", json!([]));
    let pending = session("s1", "pending", json!([]));
    common::mount_session(&server, SessionResponder::new(start, vec![pending])).await;

    let dir = tempfile::tempdir().unwrap();
    let client = common::client(&server);
    let written = summarize_movie(&client, &job("abc123", dir.path()), &common::fast_poll(50, 3))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(written, dir.path().join("abc123-summary.json"));
    let saved: Value = serde_json::from_str(&fs::read_to_string(&written).unwrap()).unwrap();
    assert_eq!(
        saved,
        json!({ "sessionId": "s1", "status": "pending", "chapters": [] })
    );
    assert_eq!(common::poll_requests(&server).await, 4);
}

#[tokio::test]
async fn test_numeric_status_is_saved() {
    let server = MockServer::start().await;
    let start = ResponseTemplate::new(200).set_body_json(json!({
        "sessionId": "s1",
        "status": 1,
        "chapters": []
    }));
    let poll = ResponseTemplate::new(200).set_body_json(json!({
        "sessionId": "s1",
        "status": 2,
        "chapters": [{ "content": "Intro" }]
    }));
    common::mount_session(&server, SessionResponder::new(start, vec![poll])).await;

    let dir = tempfile::tempdir().unwrap();
    let client = common::client(&server);
    let written = summarize_movie(&client, &job("abc123", dir.path()), &common::fast_poll(5, 3))
        .await
        .unwrap()
        .unwrap();

    let saved: Value = serde_json::from_str(&fs::read_to_string(&written).unwrap()).unwrap();
    assert_eq!(
        saved,
        json!({ "sessionId": "s1", "status": 2, "chapters": [{ "content": "Intro" }] })
    );
    // Three grace rounds, then the unchanged chapters end polling.
    assert_eq!(common::poll_requests(&server).await, 4);
}

#[tokio::test]
async fn test_missing_session_aborts_without_file() {
    let server = MockServer::start().await;
    let start = ResponseTemplate::new(200).set_body_json(json!({ "status": "pending" }));
    common::mount_session(&server, SessionResponder::new(start, vec![])).await;

    let dir = tempfile::tempdir().unwrap();
    let client = common::client(&server);
    let err = summarize_movie(&client, &job("abc123", dir.path()), &common::fast_poll(50, 3))
        .await
        .unwrap_err();

    assert!(matches!(err, SummaryError::MissingSession));
    assert_eq!(common::poll_requests(&server).await, 0);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_no_result_skips_file() {
    let server = MockServer::start().await;
    let start = session("s1", "pending", json!([]));
    let failure = ResponseTemplate::new(500);
    common::mount_session(&server, SessionResponder::new(start, vec![failure])).await;

    let dir = tempfile::tempdir().unwrap();
    let client = common::client(&server);
    let written = summarize_movie(&client, &job("abc123", dir.path()), &common::fast_poll(4, 3))
        .await
        .unwrap();

    assert_eq!(written, None);
    assert_eq!(common::poll_requests(&server).await, 4);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_written_summary_reads_back_identically() {
    let result: SessionResult = serde_json::from_value(json!({
        "sessionId": "s1",
        "status": "done",
        "chapters": [
            {
                "content": "Intro",
                "startTime": 0,
                "theses": [{ "content": "Why it matters", "links": ["https://example.com"] }]
            },
            { "content": "Outro", "startTime": 315 }
        ],
        "title": "A talk",
        "thumbnail": null
    }))
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let movie_id = MovieId::parse("abc123").unwrap();
    let written = write_summary(Some(&result), dir.path(), &movie_id)
        .await
        .unwrap()
        .unwrap();

    let text = fs::read_to_string(&written).unwrap();
    assert!(text.starts_with("{\n  \""));
    let reread: SessionResult = serde_json::from_str(&text).unwrap();
    assert_eq!(reread, result);
    assert_eq!(text, serde_json::to_string_pretty(&result).unwrap());
}

#[tokio::test]
async fn test_write_summary_creates_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("nested").join("summaries");
    let movie_id = MovieId::parse("abc123").unwrap();
    let result: SessionResult =
        serde_json::from_value(json!({ "sessionId": "s1", "status": "done" })).unwrap();

    let written = write_summary(Some(&result), &output_dir, &movie_id)
        .await
        .unwrap();

    assert_eq!(written, Some(summary_path(&output_dir, &movie_id)));
    assert!(output_dir.join("abc123-summary.json").is_file());
}

#[tokio::test]
async fn test_write_summary_without_result() {
    let dir = tempfile::tempdir().unwrap();
    let movie_id = MovieId::parse("abc123").unwrap();
    let (logs, _guard) = common::capture_logs();

    let written = write_summary(None, dir.path(), &movie_id).await.unwrap();

    assert_eq!(written, None);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    let logs = logs.contents();
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("no result to save, skipping summary file"), "{logs}");
    assert!(logs.contains("movie_id=abc123"), "{logs}");
}
