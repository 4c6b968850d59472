//! The icon generation pipeline.
//!
//! Load, validate, compose, export, finish. Every check that can fail the
//! whole run happens before the first file is written.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::GenericImageView;

use crate::catalog::{outputs_per_variant, Platform};
use crate::compose::{build_variants, check_variant_names, variant_names};
use crate::error::{IconError, Result};
use crate::export::{ExportReport, Exporter};
use crate::masks::{decode_image, decode_masks, normalize_extensions, scan_masks, MaskEntry};
use crate::output::{display_path, plural, Printer, Progress};
use crate::paths::{Layout, PathResolver};

/// Inputs for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Square source image.
    pub source: PathBuf,
    /// Directory of mask overlays, if any.
    pub masks: Option<PathBuf>,
    /// Accepted mask extensions, without the dot.
    pub extensions: Vec<String>,
    /// Existing output root.
    pub output: PathBuf,
    pub layout: Layout,
    /// Size of the worker pool.
    pub jobs: usize,
    pub filter: FilterType,
}

impl PipelineOptions {
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            masks: None,
            extensions: vec!["png".to_string()],
            output: output.into(),
            layout: Layout::Standalone,
            jobs: crate::config::default_jobs(),
            filter: FilterType::Lanczos3,
        }
    }
}

/// What a finished run produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Variant names in export order.
    pub variants: Vec<String>,
    /// Number of image files the run was expected to write.
    pub expected: usize,
    pub report: ExportReport,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.report.is_success()
    }
}

/// Run the whole pipeline against the platforms in `platforms`.
pub fn run_with_platforms(
    options: &PipelineOptions,
    platforms: &[Platform],
    printer: &Printer,
) -> Result<RunSummary> {
    check_output_root(&options.output)?;

    let resolver = PathResolver::new(&options.output, options.layout);
    if options.layout == Layout::Project {
        let project = resolver.project_name()?;
        printer.info("Project", project);
    }

    let entries = match &options.masks {
        Some(dir) => scan_masks(dir, &normalize_extensions(&options.extensions))?,
        None => Vec::new(),
    };
    check_variant_names(&variant_names(&entries, options.layout))?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs.max(1))
        .build()
        .map_err(|e| IconError::Configuration {
            message: format!("Failed to start worker pool: {}", e),
            help: None,
        })?;

    // Load
    printer.status("Loading", &display_path(&options.source));
    if !entries.is_empty() {
        printer.info("Masks", &mask_list(&entries));
    }
    let (source, masks) = pool.install(|| {
        rayon::join(
            || decode_image(&options.source),
            || decode_masks(&entries),
        )
    });
    let source = source?;
    let masks = masks?;

    // Validate
    let (width, height) = source.dimensions();
    if width != height {
        return Err(IconError::Validation {
            message: format!(
                "Source image {} is {}x{}, expected a square image",
                display_path(&options.source),
                width,
                height
            ),
            help: Some("Crop or pad the source so width equals height".to_string()),
        });
    }

    // Compose
    printer.status(
        "Composing",
        &plural(masks.len() + 1, "variant", "variants"),
    );
    let variants = pool.install(|| build_variants(&source, &masks, options.layout, options.filter));
    drop(masks);

    // Export
    let per_variant = outputs_per_variant(platforms);
    let progress = Progress::new(variants.len() * per_variant);
    let exporter = Exporter::new(&resolver, platforms, &progress)
        .with_filter(options.filter)
        .with_printer(printer);

    let mut report = ExportReport::new();
    for variant in &variants {
        let variant_report = pool.install(|| exporter.export_variant(variant))?;
        let verb = if variant_report.is_success() { "Exporting" } else { "Failed" };
        let message = format!("{} {}", variant.name, progress.label());
        if variant_report.is_success() {
            printer.status(verb, &message);
        } else {
            printer.error(verb, &message);
        }
        report.merge(variant_report);
    }

    // Finish
    let summary = RunSummary {
        variants: variants.iter().map(|v| v.name.to_string()).collect(),
        expected: progress.total(),
        report,
    };

    for failure in &summary.report.failures {
        printer.error("Failed", &failure.to_string());
    }

    let written = plural(summary.report.written.len(), "file", "files");
    let target = printer.cyan(&display_path(&options.output));
    if summary.is_success() {
        printer.status("Finished", &format!("{} to {}", written, target));
    } else {
        printer.warning(
            "Finished",
            &format!(
                "{} to {}, {}",
                written,
                target,
                plural(summary.report.failures.len(), "failure", "failures")
            ),
        );
    }

    Ok(summary)
}

/// Run the pipeline for every supported platform.
pub fn run(options: &PipelineOptions, printer: &Printer) -> Result<RunSummary> {
    run_with_platforms(options, &Platform::all(), printer)
}

fn check_output_root(output: &Path) -> Result<()> {
    if output.is_dir() {
        return Ok(());
    }

    Err(IconError::Configuration {
        message: format!("Output directory {} does not exist", display_path(output)),
        help: Some("Create the directory first or pass an existing one".to_string()),
    })
}

fn mask_list(entries: &[MaskEntry]) -> String {
    entries
        .iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
