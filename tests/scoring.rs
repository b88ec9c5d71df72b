use deepfake_check::{
    config::Config,
    engine::{Detector, FrameSuspect, RandomSource, SimulatedDetector},
    media::MediaInput,
};
use std::collections::VecDeque;

/// Replays a fixed sequence of unit draws.
struct Script(VecDeque<f64>);

impl Script {
    fn new(values: &[f64]) -> Self {
        Self(values.iter().copied().collect())
    }
}

impl RandomSource for Script {
    fn next_unit(&mut self) -> f64 {
        self.0.pop_front().expect("script exhausted")
    }
}

fn image(name: &str) -> MediaInput {
    MediaInput::new(name, "image/png", 1024)
}

fn video(name: &str) -> MediaInput {
    MediaInput::new(name, "video/mp4", 1024)
}

#[test]
fn flagged_name_uses_high_range() {
    let cfg = Config::default();
    let mut det = SimulatedDetector::new(&cfg, Script::new(&[0.0, 0.9999])).unwrap();

    let r = det.detect(&image("my_fake.png")).unwrap();
    assert_eq!((r.fake, r.real), (70, 30));
    let r = det.detect(&image("FAKE.png")).unwrap();
    assert_eq!((r.fake, r.real), (99, 1));
    assert!(r.frame_suspects.is_none());
    assert!(r.video_length.is_none());
}

#[test]
fn unflagged_name_uses_low_range() {
    let cfg = Config::default();
    let mut det = SimulatedDetector::new(&cfg, Script::new(&[0.0, 0.9999, 0.5])).unwrap();

    assert_eq!(det.detect(&image("cat.png")).unwrap().fake, 0);
    assert_eq!(det.detect(&image("f-a-k-e.png")).unwrap().fake, 49);
    let r = det.detect(&image("portrait.png")).unwrap();
    assert_eq!((r.fake, r.real), (25, 75));
}

#[test]
fn name_match_is_case_insensitive() {
    let det = SimulatedDetector::new(&Config::default(), fastrand::Rng::with_seed(1)).unwrap();
    assert!(det.name_is_flagged("DeepFaKe_interview.mov"));
    assert!(det.name_is_flagged("fake"));
    assert!(!det.name_is_flagged("fa ke.png"));
}

#[test]
fn video_draw_order_and_stable_sort() {
    let cfg = Config::default();
    let script = Script::new(&[
        0.5, // fake = 25
        0.0, // video_length = 10
        0.5, // count = 3 + 2 = 5
        0.9, 0.10, // (9, 10)
        0.1, 0.20, // (1, 20)
        0.1, 0.30, // (1, 30)
        0.5, 0.40, // (5, 40)
        0.0, 0.50, // (0, 50)
    ]);
    let mut det = SimulatedDetector::new(&cfg, script).unwrap();

    let r = det.detect(&video("clip.mp4")).unwrap();
    assert_eq!((r.fake, r.real), (25, 75));
    assert_eq!(r.video_length, Some(10));
    let expected = [(0, 50), (1, 20), (1, 30), (5, 40), (9, 10)]
        .map(|(timestamp, confidence)| FrameSuspect {
            timestamp,
            confidence,
        })
        .to_vec();
    assert_eq!(r.frame_suspects, Some(expected));
}

#[test]
fn generated_results_hold_invariants() {
    let cfg = Config::default();
    let mut det = SimulatedDetector::new(&cfg, fastrand::Rng::with_seed(0xdecaf)).unwrap();
    let inputs = [
        image("holiday.jpg"),
        image("Fake_Face.webp"),
        video("interview.mov"),
        video("deepFAKE.mp4"),
    ];

    for i in 0..2000 {
        let input = &inputs[i % inputs.len()];
        let r = det.detect(input).unwrap();

        assert_eq!(r.real + r.fake, 100);
        assert!(r.real <= 100 && r.fake <= 100);
        if input.name.to_lowercase().contains("fake") {
            assert!((70..=99).contains(&r.fake), "fake={}", r.fake);
        } else {
            assert!(cfg.analysis.unflagged_fake_range.contains(r.fake), "fake={}", r.fake);
        }

        if input.is_video() {
            let len = r.video_length.expect("video length");
            assert!((10..=59).contains(&len));
            let suspects = r.frame_suspects.as_ref().expect("frame suspects");
            assert!((3..=7).contains(&suspects.len()));
            assert!(suspects.iter().all(|s| s.timestamp < len && s.confidence <= 99));
            assert!(suspects.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        } else {
            assert!(r.video_length.is_none());
            assert!(r.frame_suspects.is_none());
        }
    }
}

#[test]
fn repeated_calls_are_independent() {
    let cfg = Config::default();
    let mut det = SimulatedDetector::new(&cfg, fastrand::Rng::with_seed(42)).unwrap();
    let input = image("same.png");

    let results: Vec<u32> = (0..50).map(|_| det.detect(&input).unwrap().fake).collect();
    assert!(results.iter().any(|&f| f != results[0]));
}

#[test]
fn same_seed_reproduces_results() {
    let cfg = Config::default();
    let input = video("clip.mp4");
    let mut a = SimulatedDetector::new(&cfg, fastrand::Rng::with_seed(9)).unwrap();
    let mut b = SimulatedDetector::new(&cfg, fastrand::Rng::with_seed(9)).unwrap();
    assert_eq!(a.detect(&input).unwrap(), b.detect(&input).unwrap());
}

#[test]
fn metrics_are_percentages() {
    let cfg = Config::default();
    let mut det = SimulatedDetector::new(&cfg, fastrand::Rng::with_seed(3)).unwrap();
    for _ in 0..200 {
        let m = det.metrics("demo-analysis").unwrap();
        for v in [
            m.face_manipulation,
            m.background_inconsistency,
            m.texture_analysis,
            m.metadata_analysis,
        ] {
            assert!((0.0..100.0).contains(&v), "{v}");
        }
    }
}

#[test]
fn serialized_shape_matches_contract() {
    let cfg = Config::default();
    let mut det = SimulatedDetector::new(&cfg, fastrand::Rng::with_seed(5)).unwrap();

    let img = serde_json::to_value(det.detect(&image("a.png")).unwrap()).unwrap();
    assert!(img.get("frameSuspects").is_none());
    assert!(img.get("videoLength").is_none());

    let vid = serde_json::to_value(det.detect(&video("a.mp4")).unwrap()).unwrap();
    assert!(vid["frameSuspects"].is_array());
    assert!(vid["videoLength"].is_u64());
    assert!(vid["frameSuspects"][0]["timestamp"].is_u64());
}
