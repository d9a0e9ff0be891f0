use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::{
    EstimateRequest, EstimateResponse, HealthResponse, QualityInfo, SpeakRequest, VoicesResponse,
};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::pricing::calculate_costs;
use crate::text;
use crate::tts::{Quality, Voice, VoiceInfo};

const DOWNLOAD_DISPOSITION: &str = "attachment; filename=\"speech.mp3\"";

pub async fn speak(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SpeakRequest>,
) -> Result<Response, AppError> {
    let voice: Voice = request
        .voice
        .parse()
        .map_err(|v| AppError::BadRequest(format!("Unknown voice '{}'", v)))?;

    let quality: Quality = match request.quality.as_deref() {
        Some(q) => q
            .parse()
            .map_err(|q| AppError::BadRequest(format!("Unknown quality '{}'", q)))?,
        None => Quality::default(),
    };

    let audio = state
        .speech
        .speak(request.api_key, &request.text, voice, quality)
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, audio.mime_type),
            (header::CONTENT_DISPOSITION, DOWNLOAD_DISPOSITION),
        ],
        audio.bytes,
    )
        .into_response())
}

/// Character count, segment count and per-tier cost for a draft text.
pub async fn estimate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, AppError> {
    let text = request.text.trim();
    let characters = text::char_count(text);
    let max_chars = state.speech.max_chars();
    let segments = text::split(text, max_chars)?.len();

    Ok(Json(EstimateResponse {
        characters,
        max_chars,
        segments,
        costs: calculate_costs(characters, &state.prices),
    }))
}

pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<VoicesResponse> {
    let voices = Voice::ALL.into_iter().map(VoiceInfo::from).collect();
    let qualities = Quality::ALL
        .into_iter()
        .map(|quality| QualityInfo {
            id: quality,
            model: state.models.model_for(quality).to_string(),
            price_per_1k: state.prices.rate(quality),
        })
        .collect();

    Json(VoicesResponse { voices, qualities })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
