//! Generate command implementation.
//!
//! Merges flags with iconsmith.yaml and runs the pipeline.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::{default_jobs, Config, ResizeFilter};
use crate::error::{IconError, Result};
use crate::output::Printer;
use crate::paths::Layout;
use crate::pipeline::{self, PipelineOptions};

/// Generate Android and iOS icon sets from a square image
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Square source image
    #[arg(required = true)]
    pub source: PathBuf,

    /// Existing output directory (default: current directory)
    pub output: Option<PathBuf>,

    /// Directory of mask images, one variant per mask
    #[arg(long, short)]
    pub masks: Option<PathBuf>,

    /// Accepted mask file extension (repeatable, default: png)
    #[arg(long = "extension", short = 'e')]
    pub extensions: Vec<String>,

    /// Write into an existing React Native project instead of a standalone tree
    #[arg(long)]
    pub project: bool,

    /// Maximum concurrent resize operations (default: number of CPUs)
    #[arg(long, short)]
    pub jobs: Option<usize>,

    /// Resize filter
    #[arg(long, value_enum)]
    pub filter: Option<ResizeFilter>,

    /// Configuration file (default: ./iconsmith.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: GenerateArgs, printer: &Printer) -> Result<()> {
    let config = Config::discover(args.config.as_deref(), Path::new("."))?;
    let options = resolve_options(args, config)?;

    let summary = pipeline::run(&options, printer)?;

    if summary.is_success() {
        Ok(())
    } else {
        Err(IconError::Export {
            failed: summary.report.failures.len(),
            total: summary.expected,
        })
    }
}

/// Combine flags and configuration; flags win.
pub fn resolve_options(args: GenerateArgs, config: Config) -> Result<PipelineOptions> {
    let jobs = args.jobs.or(config.jobs).unwrap_or_else(default_jobs);
    if jobs == 0 {
        return Err(IconError::Parse {
            message: "jobs must be at least 1".to_string(),
            help: None,
        });
    }

    let extensions = if args.extensions.is_empty() {
        config.extensions
    } else {
        args.extensions
    };

    let layout = if args.project || config.project.unwrap_or(false) {
        Layout::Project
    } else {
        Layout::Standalone
    };

    Ok(PipelineOptions {
        source: args.source,
        masks: args.masks.or(config.masks),
        extensions,
        output: args
            .output
            .or(config.output)
            .unwrap_or_else(|| PathBuf::from(".")),
        layout,
        jobs,
        filter: args.filter.or(config.filter).unwrap_or_default().filter_type(),
    })
}
