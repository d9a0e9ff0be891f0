pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

use crate::pricing::CostEstimate;
use crate::tts::{ApiKey, Quality, VoiceInfo};

#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    pub api_key: ApiKey,
    pub text: String,
    pub voice: String,
    #[serde(default)]
    pub quality: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub characters: usize,
    pub max_chars: usize,
    pub segments: usize,
    pub costs: CostEstimate,
}

#[derive(Debug, Serialize)]
pub struct QualityInfo {
    pub id: Quality,
    pub model: String,
    pub price_per_1k: f64,
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceInfo>,
    pub qualities: Vec<QualityInfo>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
