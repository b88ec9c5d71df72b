use crate::{
    config::Config,
    engine::{AnalysisError, Detector, SimulatedDetector, random::seeded},
    media::{MediaInput, MediaKind},
    policy,
    preview::{self, Preview},
    report::{AnalysisReport, InputReport, Timeline},
    service::AnalysisService,
    util::{ensure_dir, format_timestamp, now_rfc3339, sha256_hex},
    validate::{ValidationError, validate},
};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG: &str = "deepfake-check.toml";

#[derive(Parser, Debug)]
#[command(name = "deepfake-check")]
#[command(about = "Simulated deepfake detection for images and videos")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./deepfake-check.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the effective configuration.
    ShowConfig {},
    /// Validate a file and print its preview handle.
    Check {
        #[arg(long)]
        input: PathBuf,
    },
    /// Validate and analyze a file on disk.
    Analyze {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        /// Skip the simulated processing delay.
        #[arg(long)]
        no_delay: bool,
    },
    /// Analyze an explicit file descriptor without reading the disk.
    Describe {
        #[arg(long)]
        name: String,
        #[arg(long)]
        mime: String,
        #[arg(long)]
        size: u64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        no_delay: bool,
    },
    /// Print the decorative detection metrics.
    Metrics {
        #[arg(long, default_value = "demo-analysis")]
        id: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Format a number of seconds as M:SS.
    Timestamp { seconds: u32 },
}

struct RunOptions {
    seed: Option<u64>,
    no_delay: bool,
}

pub async fn dispatch(args: Args) -> Result<()> {
    let cfg = resolve_config(args.config.as_deref())?;

    match &args.cmd {
        Command::ShowConfig {} => {
            println!("{}", toml::to_string(&cfg)?);
            Ok(())
        }
        Command::Check { input } => {
            let _guard = init_logging(&args, &cfg, resolve_log_path(&cfg, None).as_deref())?;
            check(&cfg, input)
        }
        Command::Analyze {
            input,
            out_dir,
            seed,
            no_delay,
        } => {
            let opts = RunOptions {
                seed: *seed,
                no_delay: *no_delay,
            };
            analyze_path(&args, &cfg, input, out_dir.as_deref(), &opts).await
        }
        Command::Describe {
            name,
            mime,
            size,
            seed,
            no_delay,
        } => {
            let _guard = init_logging(&args, &cfg, resolve_log_path(&cfg, None).as_deref())?;
            let opts = RunOptions {
                seed: *seed,
                no_delay: *no_delay,
            };
            describe(&cfg, MediaInput::new(name, mime, *size), &opts).await
        }
        Command::Metrics { id, seed } => {
            let _guard = init_logging(&args, &cfg, resolve_log_path(&cfg, None).as_deref())?;
            let opts = RunOptions {
                seed: *seed,
                no_delay: true,
            };
            let mut service = build_service(&cfg, &opts)?;
            let metrics = service.metrics(id).await?;
            println!("{}", serde_json::to_string_pretty(&metrics)?);
            Ok(())
        }
        Command::Timestamp { seconds } => {
            println!("{}", format_timestamp(*seconds));
            Ok(())
        }
    }
}

fn resolve_config(user: Option<&Path>) -> Result<Config> {
    if let Some(p) = user {
        return Config::load(p);
    }
    let default = PathBuf::from(DEFAULT_CONFIG);
    if default.exists() {
        Config::load(&default)
    } else {
        Ok(Config::default())
    }
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries the JSON results, so log lines go to stderr
    let stderr_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn resolve_log_path(cfg: &Config, job_dir: Option<&Path>) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    if let Some(job_dir) = job_dir {
        return Some(job_dir.join("deepfake-check.log"));
    }

    Some(PathBuf::from(&cfg.output.out_dir).join("deepfake-check.log"))
}

fn build_service(cfg: &Config, opts: &RunOptions) -> Result<AnalysisService<SimulatedDetector>> {
    let rng = seeded(opts.seed.or(cfg.global.seed));
    let detector = SimulatedDetector::new(cfg, rng)?;
    let service = if opts.no_delay {
        AnalysisService::with_delay(detector, Duration::ZERO)
    } else {
        AnalysisService::new(cfg, detector)
    };
    Ok(service)
}

fn rejection_json(input: &MediaInput, err: &ValidationError) -> serde_json::Value {
    serde_json::json!({
        "status": "rejected",
        "name": input.name,
        "title": err.title(),
        "message": err.user_message(),
        "reason": err.to_string(),
    })
}

/// Backend errors surface as one user-facing outcome, never a partial report.
fn failure_json(input: &MediaInput, err: &AnalysisError) -> serde_json::Value {
    serde_json::json!({
        "status": "failed",
        "name": input.name,
        "title": "Analysis failed",
        "message": "We encountered an error while analyzing the media.",
        "reason": err.to_string(),
    })
}

fn print_rejection(input: &MediaInput, err: &ValidationError) -> Result<()> {
    warn!(name = %input.name, "rejected input: {err}");
    println!("{}", serde_json::to_string_pretty(&rejection_json(input, err))?);
    Ok(())
}

fn check(cfg: &Config, path: &Path) -> Result<()> {
    let input = MediaInput::from_path(path)?;
    let kind = match validate(&cfg.limits, &input) {
        Ok(kind) => kind,
        Err(err) => return print_rejection(&input, &err),
    };
    let preview = preview::build(&cfg.hashing, path, &input, kind)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "status": "ok",
            "input": InputReport::new(&input, kind),
            "preview": preview,
        }))?
    );
    Ok(())
}

/// A validated input waiting to be analyzed.
pub(crate) struct Job {
    input: MediaInput,
    kind: MediaKind,
    preview: Option<Preview>,
    analysis_id: String,
    started: String,
    job_dir: Option<PathBuf>,
}

pub(crate) enum Prepared {
    Rejected(MediaInput, ValidationError),
    Ready(Job),
}

pub(crate) enum Outcome {
    Completed(Box<AnalysisReport>),
    Failed(MediaInput, AnalysisError),
}

/// Validates a file on disk and, when a report is to be written, creates
/// `<out_dir>/<analysis_id>/`. Rejected inputs never get a job dir.
pub(crate) fn prepare_path(cfg: &Config, path: &Path, out_override: Option<&Path>) -> Result<Prepared> {
    let input = MediaInput::from_path(path)?;
    let kind = match validate(&cfg.limits, &input) {
        Ok(kind) => kind,
        Err(err) => return Ok(Prepared::Rejected(input, err)),
    };
    let preview = preview::build(&cfg.hashing, path, &input, kind)?;

    let started = now_rfc3339();
    let analysis_id = sha256_hex(format!("{}:{}", preview.fingerprint, started).as_bytes());

    let job_dir = if out_override.is_some() || cfg.output.write_report_json {
        let out_root = out_override
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&cfg.output.out_dir));
        let dir = out_root.join(&analysis_id);
        ensure_dir(&dir)?;
        Some(dir)
    } else {
        None
    };

    Ok(Prepared::Ready(Job {
        input,
        kind,
        preview: Some(preview),
        analysis_id,
        started,
        job_dir,
    }))
}

pub(crate) fn prepare_descriptor(cfg: &Config, input: MediaInput) -> Prepared {
    let kind = match validate(&cfg.limits, &input) {
        Ok(kind) => kind,
        Err(err) => return Prepared::Rejected(input, err),
    };
    let started = now_rfc3339();
    let analysis_id = sha256_hex(
        format!(
            "{}:{}:{}:{}",
            input.name, input.mime_type, input.size_bytes, started
        )
        .as_bytes(),
    );
    Prepared::Ready(Job {
        input,
        kind,
        preview: None,
        analysis_id,
        started,
        job_dir: None,
    })
}

/// Runs the analysis and writes the report into the job dir if there is one.
pub(crate) async fn execute<D: Detector>(
    cfg: &Config,
    job: Job,
    service: &mut AnalysisService<D>,
) -> Result<Outcome> {
    let result = match service.analyze(&job.input).await {
        Ok(result) => result,
        Err(err) => return Ok(Outcome::Failed(job.input, err)),
    };
    let decision = policy::decide(&cfg.labeling, &result);
    info!(
        "verdict={:?} score={} summary={:?}",
        decision.verdict, decision.headline_score, decision.summary
    );

    let metrics = if cfg.metrics.enabled {
        match service.metrics(&job.analysis_id).await {
            Ok(metrics) => Some(metrics),
            Err(err) => return Ok(Outcome::Failed(job.input, err)),
        }
    } else {
        None
    };
    let timeline = Timeline::from_result(&result);

    let report = AnalysisReport {
        analysis_id: job.analysis_id,
        started: job.started,
        finished: now_rfc3339(),
        input: InputReport::new(&job.input, job.kind),
        preview: job.preview,
        result,
        decision,
        metrics,
        timeline,
    };

    if let Some(dir) = &job.job_dir {
        std::fs::write(
            dir.join(&cfg.output.report_filename),
            serde_json::to_string_pretty(&report)?,
        )?;
        if cfg.debug.dump_effective_config {
            let raw = toml::to_string(cfg).unwrap_or_default();
            std::fs::write(dir.join("effective-config.toml"), raw)?;
        }
        info!("report written to {}", dir.display());
    }

    Ok(Outcome::Completed(Box::new(report)))
}

fn print_outcome(cfg: &Config, outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Completed(report) => {
            if cfg.global.print_summary {
                println!("{}", serde_json::to_string_pretty(report)?);
            }
        }
        Outcome::Failed(input, err) => {
            error!(name = %input.name, "analysis failed: {err}");
            println!("{}", serde_json::to_string_pretty(&failure_json(input, err))?);
        }
    }
    Ok(())
}

async fn analyze_path(
    args: &Args,
    cfg: &Config,
    path: &Path,
    out_override: Option<&Path>,
    opts: &RunOptions,
) -> Result<()> {
    let job = match prepare_path(cfg, path, out_override)? {
        Prepared::Ready(job) => job,
        Prepared::Rejected(input, err) => {
            let _guard = init_logging(args, cfg, resolve_log_path(cfg, None).as_deref())?;
            return print_rejection(&input, &err);
        }
    };

    let log_path = resolve_log_path(cfg, job.job_dir.as_deref());
    let _guard = init_logging(args, cfg, log_path.as_deref())?;
    info!("analysis_id={} input={}", job.analysis_id, path.display());

    let mut service = build_service(cfg, opts)?;
    let outcome = execute(cfg, job, &mut service).await?;
    print_outcome(cfg, &outcome)
}

async fn describe(cfg: &Config, input: MediaInput, opts: &RunOptions) -> Result<()> {
    let job = match prepare_descriptor(cfg, input) {
        Prepared::Ready(job) => job,
        Prepared::Rejected(input, err) => return print_rejection(&input, &err),
    };
    let mut service = build_service(cfg, opts)?;
    let outcome = execute(cfg, job, &mut service).await?;
    print_outcome(cfg, &outcome)
}
