// ABOUTME: Tests for TrunkClient against a mock Trunk API.
// ABOUTME: Checks request shape, auth header, response decoding, and error mapping.

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

async fn client_for(server: &MockServer) -> TrunkClient {
    let config = TrunkConfig::new("secret-token", "acme/widgets")
        .unwrap()
        .with_api_url(format!("{}/v1", server.uri()));
    TrunkClient::new(config).unwrap()
}

#[tokio::test]
async fn test_queue_status_request_and_decode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/getQueue"))
        .and(header("x-api-token", "secret-token"))
        .and(body_json(serde_json::json!({
            "repo": { "host": "github.com", "owner": "acme", "name": "widgets" },
            "targetBranch": "main"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "state": "RUNNING",
            "branch": "main",
            "concurrency": 2,
            "enqueuedPullRequests": [
                {
                    "state": "TESTING",
                    "priorityName": "high",
                    "pr": { "number": 7, "title": "Fix flake", "author": "sam" }
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let snapshot = client.queue_status("main").await.unwrap();

    assert_eq!(snapshot.state, Some(QueueState::Running));
    assert_eq!(snapshot.concurrency, Some(2));
    assert_eq!(snapshot.enqueued_pull_requests.len(), 1);
    assert_eq!(snapshot.enqueued_pull_requests[0].pr.number, 7);
}

#[tokio::test]
async fn test_queue_status_fills_missing_branch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/getQueue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "state": "PAUSED"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let snapshot = client.queue_status("release").await.unwrap();
    assert_eq!(snapshot.branch, "release");
    assert!(snapshot.enqueued_pull_requests.is_empty());
}

#[tokio::test]
async fn test_pull_request_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/getSubmittedPullRequest"))
        .and(body_json(serde_json::json!({
            "repo": { "host": "github.com", "owner": "acme", "name": "widgets" },
            "pr": { "number": 9 },
            "targetBranch": "main"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "state": "PENDING",
            "isCurrentlySubmittedToQueue": true,
            "prTitle": "Add widget"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let status = client.pull_request_status(9, "main").await.unwrap();
    assert_eq!(status.state, "PENDING");
    assert_eq!(status.pr_number, 9);
    assert!(status.is_currently_submitted_to_queue);
}

#[tokio::test]
async fn test_submit_sends_priority() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/submitPullRequest"))
        .and(body_json(serde_json::json!({
            "repo": { "host": "github.com", "owner": "acme", "name": "widgets" },
            "pr": { "number": 42 },
            "targetBranch": "main",
            "priority": "urgent"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .submit(42, "main", Some(Priority::Named(PriorityName::Urgent)))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_queue_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/updateQueue"))
        .and(body_json(serde_json::json!({
            "repo": { "host": "github.com", "owner": "acme", "name": "widgets" },
            "targetBranch": "main",
            "state": "PAUSED"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.set_state(QueueState::Paused, "main").await.unwrap();
}

#[tokio::test]
async fn test_not_found_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/cancelPullRequest"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "message": "PR 99999 is not in the queue" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.cancel(99999, "main").await.unwrap_err();
    match err {
        MergeQueueError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "PR 99999 is not in the queue");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_garbage_body_is_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/getQueue"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.queue_status("main").await.unwrap_err();
    assert!(matches!(err, MergeQueueError::Deserialize(_)));
}
