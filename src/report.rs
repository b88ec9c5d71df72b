use crate::{
    engine::{DetectionMetrics, DetectionResult},
    media::{MediaInput, MediaKind},
    policy::LabelDecision,
    preview::Preview,
    util::{format_megabytes, format_timestamp},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: String,
    pub started: String,
    pub finished: String,
    pub input: InputReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<Preview>,
    pub result: DetectionResult,
    pub decision: LabelDecision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<DetectionMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputReport {
    pub name: String,
    pub mime_type: String,
    pub kind: MediaKind,
    pub size_bytes: u64,
    pub size_label: String,
}

impl InputReport {
    pub fn new(input: &MediaInput, kind: MediaKind) -> Self {
        Self {
            name: input.name.clone(),
            mime_type: input.mime_type.clone(),
            kind,
            size_bytes: input.size_bytes,
            size_label: format_megabytes(input.size_bytes),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    pub video_length: u32,
    pub video_length_label: String,
    pub markers: Vec<TimelineMarker>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineMarker {
    pub timestamp: u32,
    pub label: String,
    /// Offset along the timeline, 0..100.
    pub position_pct: f64,
    pub confidence: u32,
}

impl Timeline {
    /// `None` for image results.
    pub fn from_result(result: &DetectionResult) -> Option<Self> {
        let video_length = result.video_length?;
        let suspects = result.frame_suspects.as_deref()?;

        let markers = suspects
            .iter()
            .map(|s| TimelineMarker {
                timestamp: s.timestamp,
                label: format_timestamp(s.timestamp),
                position_pct: f64::from(s.timestamp) / f64::from(video_length) * 100.0,
                confidence: s.confidence,
            })
            .collect();

        Some(Self {
            video_length,
            video_length_label: format_timestamp(video_length),
            markers,
        })
    }
}
