use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub global: Global,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub analysis: Analysis,
    #[serde(default)]
    pub labeling: Labeling,
    #[serde(default)]
    pub metrics: Metrics,
    #[serde(default)]
    pub hashing: Hashing,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub debug: Debug,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        cfg.validate()
            .with_context(|| format!("invalid config: {}", path.display()))?;
        Ok(cfg)
    }

    /// Rejects inverted ranges, percentages above 100 and unparsable patterns.
    pub fn validate(&self) -> Result<()> {
        let a = &self.analysis;
        for (name, range, ceiling) in [
            ("flagged_fake_range", a.flagged_fake_range, 100),
            ("unflagged_fake_range", a.unflagged_fake_range, 100),
            ("confidence_range", a.confidence_range, 100),
            ("video_length_range", a.video_length_range, 24 * 60 * 60),
            ("suspect_count_range", a.suspect_count_range, 1000),
        ] {
            if range.min > range.max {
                anyhow::bail!("analysis.{name}: min {} > max {}", range.min, range.max);
            }
            if range.max > ceiling {
                anyhow::bail!("analysis.{name}: max {} exceeds {ceiling}", range.max);
            }
        }
        if a.video_length_range.min == 0 {
            anyhow::bail!("analysis.video_length_range: min must be at least 1 second");
        }
        regex::Regex::new(&a.fake_name_pattern)
            .with_context(|| format!("analysis.fake_name_pattern: {}", a.fake_name_pattern))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Global {
    pub print_summary: bool,
    /// Fixed seed for the random source; unset means a fresh seed per run.
    pub seed: Option<u64>,
}
impl Default for Global {
    fn default() -> Self {
        Self {
            print_summary: true,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_input_file_bytes: u64,
}
impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_file_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: u32,
    pub max: u32,
}

impl ScoreRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: u32) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn span(&self) -> u32 {
        self.max - self.min + 1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Analysis {
    pub delay_ms: u64,
    pub fake_name_pattern: String,
    pub flagged_fake_range: ScoreRange,
    pub unflagged_fake_range: ScoreRange,
    pub video_length_range: ScoreRange,
    pub suspect_count_range: ScoreRange,
    pub confidence_range: ScoreRange,
}
impl Default for Analysis {
    fn default() -> Self {
        Self {
            delay_ms: 3000,
            fake_name_pattern: "(?i)fake".into(),
            flagged_fake_range: ScoreRange::new(70, 99),
            unflagged_fake_range: ScoreRange::new(0, 49),
            video_length_range: ScoreRange::new(10, 59),
            suspect_count_range: ScoreRange::new(3, 7),
            confidence_range: ScoreRange::new(0, 99),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Labeling {
    /// A result is labeled fake when its fake score is strictly above this.
    pub fake_threshold: u32,
    /// Fake scores strictly above this get the "AI-generated" summary.
    pub alert_threshold: u32,
}
impl Default for Labeling {
    fn default() -> Self {
        Self {
            fake_threshold: 70,
            alert_threshold: 80,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub enabled: bool,
}
impl Default for Metrics {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Hashing {
    pub mode: String,
    pub fast_window_bytes: u64,
}
impl Default for Hashing {
    fn default() -> Self {
        Self {
            mode: "fast_2x1mb".into(),
            fast_window_bytes: 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub out_dir: String,
    pub write_report_json: bool,
    pub report_filename: String,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            out_dir: "out".into(),
            write_report_json: false,
            report_filename: "report.json".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Debug {
    pub dump_effective_config: bool,
}
impl Default for Debug {
    fn default() -> Self {
        Self {
            dump_effective_config: false,
        }
    }
}
