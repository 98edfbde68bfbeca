//! End-to-end tests for the upload controller over HTTP.
//!
//! Tests verify:
//! - The multipart form carries file, city and orientation
//! - A relay answer lands as text, scores and four indicators
//! - A non-OK status shows the prefixed response body
//! - An incomplete form never reaches the relay
//!
//! Test Pattern:
//! - wiremock stands in for the relay
//! - The real `HttpAnalysisTransport` drives it

use std::sync::Arc;

use plancritic_client::{
    score_indicators, ClientConfig, FileBlob, HttpAnalysisTransport, ObjectUrlStore, Phase,
    UploadController,
};
use plancritic_core::Orientation;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn plan() -> FileBlob {
    FileBlob::new(
        "plan.png",
        Some("image/png".to_string()),
        // Body matchers need the multipart payload to be valid UTF-8.
        b"plan-image-bytes".to_vec(),
    )
}

fn controller_for(server: &MockServer) -> (UploadController, Arc<ObjectUrlStore>) {
    let config = ClientConfig::default().with_base_url(server.uri());
    let transport = HttpAnalysisTransport::new(config).unwrap();
    let previews = Arc::new(ObjectUrlStore::new());
    (
        UploadController::new(Arc::new(transport), previews.clone()),
        previews,
    )
}

#[tokio::test]
async fn test_submission_renders_scores() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .and(header_exists("content-type"))
        .and(body_string_contains("name=\"file\"; filename=\"plan.png\""))
        .and(body_string_contains("name=\"city\""))
        .and(body_string_contains("مشهد"))
        .and(body_string_contains("south"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "تحلیل کامل",
            "scores": {"mabhas": 80, "overall": 75, "standards": 40, "structural": 60}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (controller, _previews) = controller_for(&server);
    controller.select_file(Some(plan()));
    controller.set_city("مشهد");
    controller.set_orientation(Some(Orientation::South));

    let phase = controller.submit().await.unwrap();

    assert_eq!(phase, Phase::Done);
    assert_eq!(controller.result_text(), "تحلیل کامل");
    let scores = controller.scores().unwrap();
    let shown: Vec<u8> = score_indicators(&scores).iter().map(|i| i.value).collect();
    assert_eq!(shown, vec![80, 75, 40, 60]);
}

#[tokio::test]
async fn test_null_scores_render_text_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "بدون نمره",
            "scores": null
        })))
        .mount(&server)
        .await;

    let (controller, _previews) = controller_for(&server);
    controller.select_file(Some(plan()));

    assert_eq!(controller.submit().await.unwrap(), Phase::Done);
    assert_eq!(controller.result_text(), "بدون نمره");
    assert!(controller.scores().is_none());
}

#[tokio::test]
async fn test_error_status_shows_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("{\"error\":\"Provider error: quota\"}"),
        )
        .mount(&server)
        .await;

    let (controller, _previews) = controller_for(&server);
    controller.select_file(Some(plan()));

    assert_eq!(controller.submit().await.unwrap(), Phase::Error);
    assert_eq!(
        controller.result_text(),
        "خطا در درخواست: {\"error\":\"Provider error: quota\"}"
    );
    assert!(controller.scores().is_none());
    assert!(controller.loading_caption().is_none());
}

#[tokio::test]
async fn test_incomplete_form_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (controller, _previews) = controller_for(&server);

    assert!(!controller.can_submit());
    assert!(controller.submit().await.is_err());
    assert_eq!(controller.phase(), Phase::Idle);
}

#[tokio::test]
async fn test_unreachable_relay_is_inline_error() {
    let config = ClientConfig::default().with_base_url("http://127.0.0.1:1");
    let transport = HttpAnalysisTransport::new(config).unwrap();
    let controller = UploadController::new(Arc::new(transport), Arc::new(ObjectUrlStore::new()));
    controller.select_file(Some(plan()));

    assert_eq!(controller.submit().await.unwrap(), Phase::Error);
    assert!(controller.result_text().starts_with("خطا در درخواست: "));
}

#[tokio::test]
async fn test_empty_error_body_shows_status_line() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let (controller, _previews) = controller_for(&server);
    controller.select_file(Some(plan()));

    assert_eq!(controller.submit().await.unwrap(), Phase::Error);
    assert_eq!(controller.result_text(), "خطا در درخواست: 502 Bad Gateway");
}

#[tokio::test]
async fn test_out_of_range_scores_are_clamped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "t",
            "scores": {"mabhas": 150, "overall": 75, "standards": -3, "structural": 60}
        })))
        .mount(&server)
        .await;

    let (controller, _previews) = controller_for(&server);
    controller.select_file(Some(plan()));

    assert_eq!(controller.submit().await.unwrap(), Phase::Done);
    assert_eq!(controller.scores().unwrap().as_array(), [100, 75, 0, 60]);
}
