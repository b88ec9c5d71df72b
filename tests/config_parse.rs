use deepfake_check::config::{Config, ScoreRange};

#[test]
fn parse_example_config() {
    let raw = include_str!("../deepfake-check.example.toml");
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    cfg.validate().expect("example config is valid");
    assert_eq!(cfg.limits.max_input_file_bytes, 10 * 1024 * 1024);
    assert_eq!(cfg.analysis.delay_ms, 3000);
    assert_eq!(cfg.analysis.flagged_fake_range, ScoreRange::new(70, 99));
    assert_eq!(cfg.labeling.fake_threshold, 70);
    assert!(!cfg.output.out_dir.is_empty());
}

#[test]
fn partial_sections_fall_back_to_defaults() {
    let cfg: Config = toml::from_str("[analysis]\ndelay_ms = 0\n").expect("parse TOML");
    assert_eq!(cfg.analysis.delay_ms, 0);
    assert_eq!(cfg.analysis.unflagged_fake_range, ScoreRange::new(0, 49));
    assert_eq!(cfg.labeling.alert_threshold, 80);
    assert!(cfg.global.seed.is_none());
}

#[test]
fn inverted_range_is_rejected() {
    let mut cfg = Config::default();
    cfg.analysis.suspect_count_range = ScoreRange::new(7, 3);
    assert!(cfg.validate().is_err());
}

#[test]
fn percentage_above_hundred_is_rejected() {
    let mut cfg = Config::default();
    cfg.analysis.flagged_fake_range = ScoreRange::new(90, 120);
    assert!(cfg.validate().is_err());
}

#[test]
fn bad_name_pattern_is_rejected() {
    let mut cfg = Config::default();
    cfg.analysis.fake_name_pattern = "(unclosed".into();
    assert!(cfg.validate().is_err());
}
