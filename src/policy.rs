use crate::{config::Labeling, engine::DetectionResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Fake,
    Real,
}

const FAKE_EXPLANATION: &str = "Our system has detected patterns consistent with AI-generated or \
manipulated content. The analysis suggests this media has likely been created or altered using \
deepfake technology.";

const REAL_EXPLANATION: &str = "Our analysis shows this content displays characteristics \
consistent with authentic media. While no detection system is perfect, this media appears to be \
genuine based on our current analysis methods.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelDecision {
    pub verdict: Verdict,
    /// The percentage shown next to the verdict: fake% for fakes, real% otherwise.
    pub headline_score: u32,
    pub headline: String,
    pub detail: String,
    pub summary: String,
    pub explanation: String,
}

pub fn decide(labeling: &Labeling, result: &DetectionResult) -> LabelDecision {
    let verdict = if result.fake > labeling.fake_threshold {
        Verdict::Fake
    } else {
        Verdict::Real
    };

    let (headline_score, headline, detail, explanation) = match verdict {
        Verdict::Fake => (
            result.fake,
            "Likely AI-Generated",
            "High probability of manipulation",
            FAKE_EXPLANATION,
        ),
        Verdict::Real => (
            result.real,
            "Likely Authentic",
            "Low probability of manipulation",
            REAL_EXPLANATION,
        ),
    };

    // the alert threshold is separate from the verdict threshold
    let summary = if result.fake > labeling.alert_threshold {
        "This media has a high probability of being AI-generated."
    } else {
        "This media appears to be authentic."
    };

    LabelDecision {
        verdict,
        headline_score,
        headline: headline.into(),
        detail: detail.into(),
        summary: summary.into(),
        explanation: explanation.into(),
    }
}
