//! Variant composition.
//!
//! The unmasked source is always the first variant. Each mask adds one more:
//! the mask is stretched to the source size and drawn over a copy of it.

use std::collections::HashMap;
use std::fmt;

use image::imageops::{self, FilterType};
use image::DynamicImage;

use crate::error::{IconError, Result};
use crate::masks::{DecodedMask, MaskEntry};
use crate::paths::{android_case, pascal_case, Layout};

/// Variant name of the unmasked source in standalone layout.
pub const DEFAULT_VARIANT: &str = "default";
/// Android source set of the unmasked source in project layout.
pub const PROJECT_ANDROID_DEFAULT: &str = "main";
/// iOS image set of the unmasked source in project layout.
pub const PROJECT_IOS_DEFAULT: &str = "AppIcon";

/// Per-platform name of a variant.
///
/// Masked variants use one name everywhere. The unmasked source in project
/// layout maps onto the names the host project already uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantName {
    android: String,
    ios: String,
}

impl VariantName {
    pub fn uniform(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            android: name.clone(),
            ios: name,
        }
    }

    pub fn split(android: impl Into<String>, ios: impl Into<String>) -> Self {
        Self {
            android: android.into(),
            ios: ios.into(),
        }
    }

    /// Name of the unmasked variant for a layout.
    pub fn default_for(layout: Layout) -> Self {
        match layout {
            Layout::Standalone => Self::uniform(DEFAULT_VARIANT),
            Layout::Project => Self::split(PROJECT_ANDROID_DEFAULT, PROJECT_IOS_DEFAULT),
        }
    }

    pub fn android(&self) -> &str {
        &self.android
    }

    pub fn ios(&self) -> &str {
        &self.ios
    }
}

impl fmt::Display for VariantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.android == self.ios {
            f.write_str(&self.android)
        } else {
            write!(f, "{}/{}", self.android, self.ios)
        }
    }
}

/// One named icon image to export.
#[derive(Debug, Clone)]
pub struct Variant {
    pub name: VariantName,
    pub image: DynamicImage,
}

/// Names of every variant a run will produce, in export order.
pub fn variant_names(masks: &[MaskEntry], layout: Layout) -> Vec<VariantName> {
    std::iter::once(VariantName::default_for(layout))
        .chain(masks.iter().map(|m| VariantName::uniform(m.name.as_str())))
        .collect()
}

/// Reject variant names that would land in the same output directory.
///
/// Android directories are lowercased and iOS image sets PascalCased, so
/// `Star` and `star` collide, as does a mask called `default`. Image sets
/// are compared case-insensitively because macOS file systems are, which
/// makes `appicon` clash with the host project's `AppIcon`. Names with no
/// letters or digits are rejected outright.
pub fn check_variant_names(names: &[VariantName]) -> Result<()> {
    let mut android: HashMap<String, &VariantName> = HashMap::new();
    let mut ios: HashMap<String, &VariantName> = HashMap::new();

    for name in names {
        let ios_dir = pascal_case(name.ios());
        if ios_dir.is_empty() {
            return Err(IconError::Validation {
                message: format!("Variant name '{}' has no letters or digits", name),
                help: Some("Rename the mask file".to_string()),
            });
        }

        let clash = android
            .insert(android_case(name.android()), name)
            .or_else(|| ios.insert(ios_dir.to_lowercase(), name));

        if let Some(previous) = clash {
            return Err(IconError::Validation {
                message: format!(
                    "Variants '{}' and '{}' would be written to the same directory",
                    previous, name
                ),
                help: Some("Rename one of the mask files".to_string()),
            });
        }
    }

    Ok(())
}

/// Draw `mask` over a copy of `source`.
///
/// The mask is resized to the source's `width x width` square and placed at
/// the origin. Neither input is modified.
pub fn composite_mask(
    source: &DynamicImage,
    mask: &DynamicImage,
    filter: FilterType,
) -> DynamicImage {
    let size = source.width();
    let overlay = mask.resize_exact(size, size, filter).to_rgba8();

    let mut base = source.to_rgba8();
    imageops::overlay(&mut base, &overlay, 0, 0);

    DynamicImage::ImageRgba8(base)
}

/// Build the ordered list of variants: the unmasked source, then one per mask.
pub fn build_variants(
    source: &DynamicImage,
    masks: &[DecodedMask],
    layout: Layout,
    filter: FilterType,
) -> Vec<Variant> {
    let mut variants = Vec::with_capacity(masks.len() + 1);

    variants.push(Variant {
        name: VariantName::default_for(layout),
        image: source.clone(),
    });

    for mask in masks {
        variants.push(Variant {
            name: VariantName::uniform(mask.name.as_str()),
            image: composite_mask(source, &mask.image, filter),
        });
    }

    variants
}
