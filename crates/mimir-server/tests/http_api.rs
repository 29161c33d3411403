//! HTTP contract tests for the Mimir route surface

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use image::{DynamicImage, ImageFormat, RgbImage};
use mimir_classifiers::{HeuristicFrameClassifier, IntentRegistry};
use mimir_media::AggregationPolicy;
use mimir_server::{build_app, AppState, ResponsePool};
use mimir_core::Intent;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::io::Cursor;
use std::sync::Arc;
use tower::ServiceExt;

fn test_app(threshold: f32) -> (Router, AppState) {
    let state = AppState::from_parts(
        Arc::new(IntentRegistry::new(&IntentRegistry::default_seed()).unwrap()),
        Arc::new(HeuristicFrameClassifier::new()),
        Arc::new(ResponsePool::builtin().unwrap()),
        AggregationPolicy::new(threshold),
        StdRng::seed_from_u64(42),
    );
    (build_app(state.clone()), state)
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_file(app: &Router, uri: &str, file: &[u8]) -> (StatusCode, Value) {
    let boundary = "mimir-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"upload.bin\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(file);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn jpeg_bytes(rgb: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(8, 8, image::Rgb(rgb));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageFormat::Jpeg)
        .unwrap();
    out.into_inner()
}

#[tokio::test]
async fn health_reports_running() {
    let (app, _) = test_app(0.3);
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "running");
}

#[tokio::test]
async fn chat_empty_message_is_a_friendly_prompt() {
    let (app, _) = test_app(0.3);
    let (status, body) = post_json(&app, "/chat", json!({ "message": "   " })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Bạn chưa nhập tin nhắn nào cả.");
}

#[tokio::test]
async fn chat_greeting_replies_from_greeting_pool() {
    let (app, state) = test_app(0.3);
    let greetings: Vec<String> = state
        .responses
        .candidates(Intent::Greeting)
        .unwrap()
        .to_vec();

    let (status, body) = post_json(&app, "/chat", json!({ "message": "Chào bạn" })).await;
    assert_eq!(status, StatusCode::OK);
    let reply = body["reply"].as_str().unwrap();
    assert!(
        greetings.iter().any(|g| g.as_str() == reply),
        "unexpected reply: {reply}"
    );
}

#[tokio::test]
async fn train_empty_data_is_benign() {
    let (app, _) = test_app(0.3);
    let (status, body) = post_json(&app, "/train", json!({ "data": [] })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No data provided");
}

#[tokio::test]
async fn train_unknown_label_is_rejected_without_swapping() {
    let (app, state) = test_app(0.3);
    let before = state.registry.snapshot().label_set().len();

    let (status, body) = post_json(
        &app,
        "/train",
        json!({ "data": [{ "text": "hello", "label": "sarcasm" }] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Invalid label"));
    assert_eq!(state.registry.snapshot().label_set().len(), before);
}

#[tokio::test]
async fn train_then_chat_reflects_new_model() {
    let (app, state) = test_app(0.3);

    let (status, body) = post_json(
        &app,
        "/train",
        json!({ "data": [
            { "text": "cảm ơn", "label": "end" },
            { "text": "tạm biệt", "label": "end" }
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Model trained successfully");

    let endings: Vec<String> = state.responses.candidates(Intent::End).unwrap().to_vec();
    for message in ["chào bạn", "mình bị đánh", "whatever"] {
        let (_, body) = post_json(&app, "/chat", json!({ "message": message })).await;
        let reply = body["reply"].as_str().unwrap();
        assert!(
            endings.iter().any(|e| e.as_str() == reply),
            "unexpected reply: {reply}"
        );
    }
}

#[tokio::test]
async fn detect_image_without_file_is_400() {
    let (app, _) = test_app(0.3);
    let (status, body) = post_file(&app, "/detect-image", &[]).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn detect_image_garbage_is_400() {
    let (app, _) = test_app(0.3);
    let (status, body) = post_file(&app, "/detect-image", &[1, 2, 3, 4, 5]).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn detect_image_scores_red_frame_violent() {
    let (app, _) = test_app(0.3);
    let (status, body) = post_file(&app, "/detect-image", &jpeg_bytes([255, 0, 0])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["violent"], true);
    let prob = body["prob_violent"].as_f64().unwrap();
    let nonviolent = body["prob_nonviolent"].as_f64().unwrap();
    assert!(prob > 0.5);
    assert!((prob + nonviolent - 1.0).abs() < 1e-4);
}

#[tokio::test]
async fn detect_image_scores_gray_frame_nonviolent() {
    let (app, _) = test_app(0.3);
    let (status, body) = post_file(&app, "/detect-image", &jpeg_bytes([120, 120, 120])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["violent"], false);
}

#[tokio::test]
async fn detect_video_garbage_is_400() {
    let (app, _) = test_app(0.3);
    let (status, body) = post_file(&app, "/detect-video", &[0u8; 32]).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn detect_video_reports_ratio_and_per_frame_scores() {
    let (app, _) = test_app(0.3);

    // Three concatenated JPEG frames; no fps metadata, so every frame is
    // analyzed. Two red frames out of three push the ratio past 0.3.
    let mut clip = jpeg_bytes([255, 0, 0]);
    clip.extend(jpeg_bytes([120, 120, 120]));
    clip.extend(jpeg_bytes([255, 0, 0]));

    let (status, body) = post_file(&app, "/detect-video", &clip).await;
    assert_eq!(status, StatusCode::OK);

    let frames = body["frames"].as_array().unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0]["frame"], 0);
    assert_eq!(frames[1]["frame"], 1);
    assert_eq!(frames[2]["frame"], 2);

    let ratio = body["ratio"].as_f64().unwrap();
    assert!((ratio - 2.0 / 3.0).abs() < 1e-4);
    assert_eq!(body["violent"], true);
}

#[tokio::test]
async fn contact_logs_and_acknowledges() {
    let (app, _) = test_app(0.3);
    let (status, body) = post_json(
        &app,
        "/contact",
        json!({ "name": "An", "email": "an@example.com", "message": "xin chào" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "ok");
}
