//! Mask discovery and decoding.
//!
//! Masks are overlay images kept in one flat directory. Each mask becomes
//! one icon variant named after its file.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::{IconError, Result};

/// Extensions accepted when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["png"];

/// A mask file found on disk, not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskEntry {
    /// File name without its extension.
    pub name: String,
    pub path: PathBuf,
}

/// A mask ready for compositing.
#[derive(Debug, Clone)]
pub struct DecodedMask {
    pub name: String,
    pub image: DynamicImage,
}

/// Strip a leading dot from each extension and drop empty ones.
///
/// Falls back to [`DEFAULT_EXTENSIONS`] when nothing is left.
pub fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    let normalized: Vec<String> = extensions
        .iter()
        .map(|e| e.strip_prefix('.').unwrap_or(e).to_string())
        .filter(|e| !e.is_empty())
        .collect();

    if normalized.is_empty() {
        DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    } else {
        normalized
    }
}

/// List the mask files directly inside `dir`.
///
/// Only regular files whose name ends in `.{ext}` for one of `extensions`
/// are kept. The match is case-sensitive. Results are ordered by file name.
pub fn scan_masks(dir: &Path, extensions: &[String]) -> Result<Vec<MaskEntry>> {
    if !dir.is_dir() {
        return Err(IconError::Directory {
            path: dir.to_path_buf(),
            message: "not found or not a directory".to_string(),
        });
    }

    let suffixes: Vec<String> = extensions.iter().map(|e| format!(".{}", e)).collect();
    let mut masks = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| IconError::Directory {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(filename) = entry.file_name().to_str() else {
            continue;
        };

        let stem = suffixes
            .iter()
            .find_map(|suffix| filename.strip_suffix(suffix.as_str()));

        if let Some(name) = stem.filter(|n| !n.is_empty()) {
            masks.push(MaskEntry {
                name: name.to_string(),
                path: entry.path().to_path_buf(),
            });
        }
    }

    Ok(masks)
}

/// Decode one raster image from disk.
///
/// The format is sniffed from the file contents, so a PNG saved with a
/// `.jpg` name still decodes.
pub fn decode_image(path: &Path) -> Result<DynamicImage> {
    let io_error = |message: String| IconError::Io {
        path: path.to_path_buf(),
        message,
    };

    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| io_error(format!("Failed to read image: {}", e)))?
        .decode()
        .map_err(|e| io_error(format!("Failed to decode image: {}", e)))
}

/// Decode every mask in parallel, keeping discovery order.
///
/// Any single failure fails the whole batch.
pub fn decode_masks(entries: &[MaskEntry]) -> Result<Vec<DecodedMask>> {
    entries
        .par_iter()
        .map(|entry| -> Result<DecodedMask> {
            Ok(DecodedMask {
                name: entry.name.clone(),
                image: decode_image(&entry.path)?,
            })
        })
        .collect()
}
