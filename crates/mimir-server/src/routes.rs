//! Route handlers
//!
//! Error mapping follows the taxonomy: empty chat input and malformed
//! retrain payloads are benign 200-with-message responses, unreadable media
//! is a 400, and a failing classifier capability is a 503. Classifier
//! failures never propagate as uncaught faults.

use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mimir_core::{Error, Intent, LabeledExample};
use mimir_media::{aggregate_single, decode_image, scan_video, MjpegSource};
use serde::Deserialize;
use tracing::{info, warn};

const EMPTY_MESSAGE_REPLY: &str = "Bạn chưa nhập tin nhắn nào cả.";

// ============================================================================
// Health
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "running" }))
}

// ============================================================================
// Chat
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

pub async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    match state.registry.classify(&req.message) {
        Ok(result) => {
            let reply = {
                let mut rng = state.rng.lock();
                state.responses.select(result.label, &mut *rng).to_string()
            };
            info!(label = %result.label, confidence = result.confidence, "chat classified");
            Json(serde_json::json!({ "reply": reply })).into_response()
        }
        Err(Error::EmptyInput) => {
            Json(serde_json::json!({ "reply": EMPTY_MESSAGE_REPLY })).into_response()
        }
        Err(e) => classifier_down(e),
    }
}

// ============================================================================
// Train
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TrainExample {
    pub text: String,
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct TrainRequest {
    #[serde(default)]
    pub data: Vec<TrainExample>,
}

pub async fn train(State(state): State<AppState>, Json(req): Json<TrainRequest>) -> Response {
    if req.data.is_empty() {
        return Json(serde_json::json!({ "message": "No data provided" })).into_response();
    }

    // Parse every label up front so a bad batch never reaches the fit.
    let mut examples = Vec::with_capacity(req.data.len());
    for entry in &req.data {
        match entry.label.parse::<Intent>() {
            Ok(label) => examples.push(LabeledExample::new(entry.text.clone(), label)),
            Err(_) => {
                return Json(serde_json::json!({
                    "message": format!("Invalid label: {}", entry.label)
                }))
                .into_response();
            }
        }
    }

    match state.registry.retrain(&examples) {
        Ok(()) => {
            Json(serde_json::json!({ "message": "Model trained successfully" })).into_response()
        }
        Err(Error::NoData) => {
            Json(serde_json::json!({ "message": "No data provided" })).into_response()
        }
        Err(Error::InvalidLabel(msg)) => {
            Json(serde_json::json!({ "message": format!("Invalid label: {msg}") }))
                .into_response()
        }
        Err(e) => {
            warn!(error = %e, "retrain failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Media detection
// ============================================================================

pub async fn detect_image(State(state): State<AppState>, multipart: Multipart) -> Response {
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(resp) => return resp,
    };

    let frame = match decode_image(&upload.file) {
        Ok(frame) => frame,
        Err(e) => return bad_request(e),
    };

    match state.frame_classifier.score_frame(&frame).await {
        Ok(dist) => Json(aggregate_single(dist)).into_response(),
        Err(e) => classifier_down(e),
    }
}

pub async fn detect_video(State(state): State<AppState>, multipart: Multipart) -> Response {
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(resp) => return resp,
    };

    let source = match MjpegSource::new(upload.file, upload.fps) {
        Ok(source) => source,
        Err(e) => return bad_request(e),
    };

    match scan_video(source, state.frame_classifier.as_ref(), state.policy, None).await {
        Ok(verdict) => {
            info!(
                frames = verdict.total_sampled_frames,
                ratio = verdict.ratio,
                violent = verdict.violent,
                "video scanned"
            );
            Json(verdict).into_response()
        }
        Err(e @ Error::UnreadableSource(_)) => bad_request(e),
        Err(e) => classifier_down(e),
    }
}

/// Parsed multipart upload: the file bytes plus an optional fps hint
struct Upload {
    file: Vec<u8>,
    fps: Option<f32>,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, Response> {
    let mut file: Option<Vec<u8>> = None;
    let mut fps: Option<f32> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(bad_request(Error::unreadable_source(e.to_string()))),
        };

        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => match field.bytes().await {
                Ok(bytes) => file = Some(bytes.to_vec()),
                Err(e) => return Err(bad_request(Error::unreadable_source(e.to_string()))),
            },
            Some("fps") => {
                if let Ok(text) = field.text().await {
                    fps = text.trim().parse::<f32>().ok();
                }
            }
            _ => {}
        }
    }

    match file {
        Some(file) if !file.is_empty() => Ok(Upload { file, fps }),
        _ => Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "No file" })),
        )
            .into_response()),
    }
}

// ============================================================================
// Contact
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

pub async fn contact(Json(req): Json<ContactRequest>) -> impl IntoResponse {
    info!(
        name = %req.name,
        email = %req.email,
        message = %req.message,
        "contact form submission"
    );
    Json(serde_json::json!({ "message": "ok" }))
}

// ============================================================================
// Error responses
// ============================================================================

fn bad_request(e: Error) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": e.to_string() })),
    )
        .into_response()
}

fn classifier_down(e: Error) -> Response {
    warn!(error = %e, "classifier capability failure");
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(serde_json::json!({ "error": e.to_string() })),
    )
        .into_response()
}
