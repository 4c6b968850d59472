//! iconsmith - App icon set generator
//!
//! A library for turning one square image, plus optional mask overlays,
//! into Android mipmap and iOS app icon sets.

pub mod catalog;
pub mod cli;
pub mod compose;
pub mod config;
pub mod error;
pub mod export;
pub mod masks;
pub mod output;
pub mod paths;
pub mod pipeline;

pub use catalog::{
    AndroidResolution, IosResolution, OutputSpec, Platform, PlatformKind, ANDROID_RESOLUTIONS,
    IOS_RESOLUTIONS,
};
pub use compose::{build_variants, composite_mask, Variant, VariantName};
pub use config::{Config, ResizeFilter};
pub use error::{IconError, Result};
pub use export::{ExportFailure, ExportReport, Exporter};
pub use masks::{decode_masks, scan_masks, DecodedMask, MaskEntry};
pub use output::{Printer, Progress};
pub use paths::{Layout, PathResolver};
pub use pipeline::{run, run_with_platforms, PipelineOptions, RunSummary};
