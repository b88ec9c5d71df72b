use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSuspect {
    pub timestamp: u32,
    pub confidence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub real: u32,
    pub fake: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_suspects: Option<Vec<FrameSuspect>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_length: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionMetrics {
    pub face_manipulation: f64,
    pub background_inconsistency: f64,
    pub texture_analysis: f64,
    pub metadata_analysis: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("analysis failed: {0}")]
    Failed(String),
}
