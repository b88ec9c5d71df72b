//! Simulated deepfake detection: input validation, a name-weighted scoring
//! policy, synthetic video frame suspects and a report for the CLI.

pub mod cli;
pub mod config;
pub mod engine;
pub mod media;
pub mod policy;
pub mod preview;
pub mod report;
pub mod service;
pub mod util;
pub mod validate;
