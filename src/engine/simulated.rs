use super::{
    Detector,
    random::{RandomSource, draw},
    types::{AnalysisError, DetectionMetrics, DetectionResult, FrameSuspect},
};
use crate::{
    config::{Analysis, Config},
    media::MediaInput,
};
use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

/// Produces pseudo-random scores weighted by the file name. Nothing here
/// looks at the media content.
pub struct SimulatedDetector<R: RandomSource = fastrand::Rng> {
    analysis: Analysis,
    fake_name: Regex,
    rng: R,
}

impl<R: RandomSource> SimulatedDetector<R> {
    pub fn new(cfg: &Config, rng: R) -> Result<Self> {
        cfg.validate()?;
        let fake_name = Regex::new(&cfg.analysis.fake_name_pattern).with_context(|| {
            format!(
                "compiling analysis.fake_name_pattern: {}",
                cfg.analysis.fake_name_pattern
            )
        })?;
        Ok(Self {
            analysis: cfg.analysis.clone(),
            fake_name,
            rng,
        })
    }

    pub fn name_is_flagged(&self, name: &str) -> bool {
        self.fake_name.is_match(name)
    }

    /// Draw order is fixed: fake score, then for videos the length, the
    /// suspect count, and a (timestamp, confidence) pair per suspect.
    pub fn score(&mut self, input: &MediaInput) -> DetectionResult {
        let a = &self.analysis;
        let range = if self.fake_name.is_match(&input.name) {
            a.flagged_fake_range
        } else {
            a.unflagged_fake_range
        };
        let fake = draw(&mut self.rng, range.min, range.span());
        let real = 100 - fake;

        if !input.is_video() {
            return DetectionResult {
                real,
                fake,
                frame_suspects: None,
                video_length: None,
            };
        }

        let video_length = draw(
            &mut self.rng,
            a.video_length_range.min,
            a.video_length_range.span(),
        );
        let count = draw(
            &mut self.rng,
            a.suspect_count_range.min,
            a.suspect_count_range.span(),
        );

        let mut suspects = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let timestamp = draw(&mut self.rng, 0, video_length);
            let confidence = draw(
                &mut self.rng,
                a.confidence_range.min,
                a.confidence_range.span(),
            );
            suspects.push(FrameSuspect {
                timestamp,
                confidence,
            });
        }
        // sort_by_key is stable: equal timestamps keep generation order
        suspects.sort_by_key(|s| s.timestamp);

        debug!(video_length, suspects = suspects.len(), "generated frame suspects");

        DetectionResult {
            real,
            fake,
            frame_suspects: Some(suspects),
            video_length: Some(video_length),
        }
    }
}

impl<R: RandomSource> Detector for SimulatedDetector<R> {
    fn detect(&mut self, input: &MediaInput) -> Result<DetectionResult, AnalysisError> {
        Ok(self.score(input))
    }

    fn metrics(&mut self, analysis_id: &str) -> Result<DetectionMetrics, AnalysisError> {
        debug!(analysis_id, "generating detection metrics");
        Ok(DetectionMetrics {
            face_manipulation: self.rng.next_unit() * 100.0,
            background_inconsistency: self.rng.next_unit() * 100.0,
            texture_analysis: self.rng.next_unit() * 100.0,
            metadata_analysis: self.rng.next_unit() * 100.0,
        })
    }
}
