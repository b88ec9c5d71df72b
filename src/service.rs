use crate::{
    config::Config,
    engine::{AnalysisError, DetectionMetrics, DetectionResult, Detector},
    media::MediaInput,
};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Wraps a [`Detector`] with the artificial processing delay. One analysis is
/// in flight per instance; separate instances are fully independent.
pub struct AnalysisService<D: Detector> {
    detector: D,
    delay: Duration,
}

impl<D: Detector> AnalysisService<D> {
    pub fn new(cfg: &Config, detector: D) -> Self {
        Self::with_delay(detector, Duration::from_millis(cfg.analysis.delay_ms))
    }

    pub fn with_delay(detector: D, delay: Duration) -> Self {
        Self { detector, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Resolves after the configured delay. Results are never cached: the
    /// same input analyzed twice gets two independent draws.
    pub async fn analyze(&mut self, input: &MediaInput) -> Result<DetectionResult, AnalysisError> {
        info!(name = %input.name, mime = %input.mime_type, "analyzing file");
        let started = Instant::now();

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = self.detector.detect(input)?;
        info!(
            real = result.real,
            fake = result.fake,
            video_length = ?result.video_length,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis complete"
        );
        Ok(result)
    }

    pub async fn metrics(&mut self, analysis_id: &str) -> Result<DetectionMetrics, AnalysisError> {
        let metrics = self.detector.metrics(analysis_id)?;
        debug!(?metrics, "metrics ready");
        Ok(metrics)
    }
}
