use axum::{Extension, Json, http::StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::clients::pico_client::{PicoClient, PicoError};
use crate::utils::response::{ApiResponse, HandlerResult};

#[derive(Deserialize, Debug)]
pub struct ControlRequest {
    pub led: u8,
}

#[derive(Deserialize, Debug)]
pub struct TextRequest {
    pub text: String,
}

fn device_unreachable(e: PicoError) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    tracing::warn!("{}", e);
    let response = ApiResponse::error("Device unavailable", json!({ "error": "Pico device did not respond" }));
    (StatusCode::BAD_GATEWAY, Json(response))
}

pub async fn status(Extension(pico): Extension<PicoClient>) -> HandlerResult {
    let status = pico.status().await.map_err(device_unreachable)?;
    let response = ApiResponse::ok("Device status", json!(status));
    Ok((StatusCode::OK, Json(response)))
}

pub async fn control(
    Extension(pico): Extension<PicoClient>,
    Json(payload): Json<ControlRequest>,
) -> HandlerResult {
    pico.set_led(payload.led).await.map_err(device_unreachable)?;
    let response = ApiResponse::ok("LED command queued", json!({ "led": payload.led }));
    Ok((StatusCode::OK, Json(response)))
}

pub async fn text(
    Extension(pico): Extension<PicoClient>,
    Json(payload): Json<TextRequest>,
) -> HandlerResult {
    let sent = pico.send_text(&payload.text).await.map_err(device_unreachable)?;
    let response = ApiResponse::ok("Text queued", json!({ "text": sent }));
    Ok((StatusCode::OK, Json(response)))
}
