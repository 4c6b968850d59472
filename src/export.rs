//! Icon export.
//!
//! For one variant, every output of every platform is an independent job:
//! resize a fresh copy of the variant image and write it. Jobs run on the
//! current rayon pool. A failed job is recorded and the others carry on.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::DynamicImage;
use rayon::prelude::*;

use crate::catalog::{OutputSpec, Platform, PlatformKind, StaticFile};
use crate::compose::Variant;
use crate::error::Result;
use crate::output::{Printer, Progress};
use crate::paths::PathResolver;

/// One export unit that could not be completed.
#[derive(Debug, Clone)]
pub struct ExportFailure {
    pub variant: String,
    pub platform: PlatformKind,
    /// Output label, or the manifest file name.
    pub label: String,
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for ExportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}: {} ({})",
            self.variant,
            self.platform,
            self.label,
            self.message,
            self.path.display()
        )
    }
}

/// Outcome of exporting one or more variants.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Files written, in catalog order.
    pub written: Vec<PathBuf>,
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn merge(&mut self, other: ExportReport) {
        self.written.extend(other.written);
        self.failures.extend(other.failures);
    }
}

/// A platform directory for one variant, with the outputs that can be written.
struct PreparedDir<'a> {
    platform: &'a Platform,
    dir: PathBuf,
    ready: Vec<&'a OutputSpec>,
    /// Left out when the platform directory itself could not be created.
    manifest: Option<StaticFile>,
}

/// Writes variants to disk for a set of platforms.
pub struct Exporter<'a> {
    resolver: &'a PathResolver,
    platforms: &'a [Platform],
    progress: &'a Progress,
    filter: FilterType,
    printer: Option<&'a Printer>,
}

impl<'a> Exporter<'a> {
    pub fn new(
        resolver: &'a PathResolver,
        platforms: &'a [Platform],
        progress: &'a Progress,
    ) -> Self {
        Self {
            resolver,
            platforms,
            progress,
            filter: FilterType::Lanczos3,
            printer: None,
        }
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Report each written file through `printer` (verbose detail lines).
    pub fn with_printer(mut self, printer: &'a Printer) -> Self {
        self.printer = Some(printer);
        self
    }

    /// Export every output of every platform for `variant`.
    ///
    /// Returns `Err` only when a destination directory cannot be resolved;
    /// write failures are collected in the report.
    pub fn export_variant(&self, variant: &Variant) -> Result<ExportReport> {
        let variant_name = variant.name.to_string();
        let mut report = ExportReport::new();

        let prepared = self.prepare_dirs(variant, &variant_name, &mut report)?;

        let jobs: Vec<(&PreparedDir, &OutputSpec)> = prepared
            .iter()
            .flat_map(|p| p.ready.iter().map(move |spec| (p, *spec)))
            .collect();

        let results: Vec<std::result::Result<PathBuf, ExportFailure>> = jobs
            .par_iter()
            .map(|(prepared, spec)| {
                let path = prepared.dir.join(&spec.file);
                match write_resized(&variant.image, spec.pixels, &path, self.filter) {
                    Ok(()) => {
                        let done = self.progress.advance();
                        if let Some(printer) = self.printer {
                            printer.detail(
                                "Wrote",
                                &format!("[{}/{}] {}", done, self.progress.total(), path.display()),
                            );
                        }
                        Ok(path)
                    }
                    Err(message) => Err(ExportFailure {
                        variant: variant_name.clone(),
                        platform: prepared.platform.kind,
                        label: spec.label.clone(),
                        path,
                        message,
                    }),
                }
            })
            .collect();

        for result in results {
            match result {
                Ok(path) => report.written.push(path),
                Err(failure) => report.failures.push(failure),
            }
        }

        // Manifests go in once every image of the set has been attempted
        for p in &prepared {
            if let Some(manifest) = p.manifest {
                if let Err(message) = write_static(&p.dir, manifest) {
                    report.failures.push(ExportFailure {
                        variant: variant_name.clone(),
                        platform: p.platform.kind,
                        label: manifest.filename.to_string(),
                        path: p.dir.join(manifest.filename),
                        message,
                    });
                }
            }
        }

        Ok(report)
    }

    /// Create every directory the variant's files will land in.
    ///
    /// Each output only depends on its own directory. An output whose
    /// directory cannot be created is recorded as a failure and left out of
    /// the write jobs; the rest of the platform still goes ahead.
    fn prepare_dirs(
        &self,
        variant: &Variant,
        variant_name: &str,
        report: &mut ExportReport,
    ) -> Result<Vec<PreparedDir<'a>>> {
        let mut prepared = Vec::with_capacity(self.platforms.len());
        let mut created: HashMap<PathBuf, std::result::Result<(), String>> = HashMap::new();

        for platform in self.platforms {
            let dir = platform.directory(self.resolver, &variant.name)?;
            let mut ready = Vec::with_capacity(platform.outputs.len());

            for spec in &platform.outputs {
                let path = dir.join(&spec.file);
                let parent = path.parent().unwrap_or(dir.as_path());

                match ensure_dir(&mut created, parent) {
                    Ok(()) => ready.push(spec),
                    Err(message) => report.failures.push(ExportFailure {
                        variant: variant_name.to_string(),
                        platform: platform.kind,
                        label: spec.label.clone(),
                        path,
                        message,
                    }),
                }
            }

            let manifest = platform
                .manifest
                .filter(|_| ensure_dir(&mut created, &dir).is_ok());

            prepared.push(PreparedDir {
                platform,
                dir,
                ready,
                manifest,
            });
        }

        Ok(prepared)
    }
}

/// Create `dir` once, remembering the outcome for later outputs.
fn ensure_dir(
    created: &mut HashMap<PathBuf, std::result::Result<(), String>>,
    dir: &Path,
) -> std::result::Result<(), String> {
    created
        .entry(dir.to_path_buf())
        .or_insert_with(|| {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))
        })
        .clone()
}

/// Resize a copy of `image` to a `pixels` square and encode it to `path`.
///
/// The format follows the file extension.
pub fn write_resized(
    image: &DynamicImage,
    pixels: u32,
    path: &Path,
    filter: FilterType,
) -> std::result::Result<(), String> {
    let resized = image.resize_exact(pixels, pixels, filter);
    resized
        .save(path)
        .map_err(|e| format!("Failed to write image: {}", e))
}

fn write_static(dir: &Path, file: StaticFile) -> std::result::Result<(), String> {
    fs::write(dir.join(file.filename), file.contents)
        .map_err(|e| format!("Failed to write {}: {}", file.filename, e))
}
