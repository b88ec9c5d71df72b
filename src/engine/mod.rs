pub mod random;
pub mod simulated;
pub mod types;

use crate::media::MediaInput;

pub use random::RandomSource;
pub use simulated::SimulatedDetector;
pub use types::{AnalysisError, DetectionMetrics, DetectionResult, FrameSuspect};

/// Backend that scores a validated input. Implementations must not return
/// partial results: any internal failure maps to [`AnalysisError`].
pub trait Detector {
    fn detect(&mut self, input: &MediaInput) -> Result<DetectionResult, AnalysisError>;
    fn metrics(&mut self, analysis_id: &str) -> Result<DetectionMetrics, AnalysisError>;
}
