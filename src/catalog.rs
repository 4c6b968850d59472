//! Target resolutions for each platform.
//!
//! The tables here are plain data. A [`Platform`] bundles one table with the
//! rules for where its files go, so the exporter can treat Android and iOS
//! the same way: resize, then write.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::compose::VariantName;
use crate::error::Result;
use crate::paths::PathResolver;

/// File name used for every Android launcher density.
pub const ANDROID_LAUNCHER_FILENAME: &str = "ic_launcher.png";

/// An Android mipmap density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AndroidResolution {
    /// Density directory, e.g. `mipmap-hdpi`.
    pub directory: &'static str,
    /// Edge length in pixels.
    pub size: u32,
}

/// An iOS app icon slot.
///
/// `size` is in points and may be fractional (83.5 for the iPad Pro icon);
/// the rendered edge is `size * scale` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IosResolution {
    pub size: f64,
    pub scale: u32,
    pub filename: &'static str,
}

impl AndroidResolution {
    pub const fn new(directory: &'static str, size: u32) -> Self {
        Self { directory, size }
    }
}

impl IosResolution {
    pub const fn new(size: f64, scale: u32, filename: &'static str) -> Self {
        Self {
            size,
            scale,
            filename,
        }
    }

    /// Rendered edge length in pixels.
    pub fn pixels(&self) -> u32 {
        (self.size * f64::from(self.scale)).round() as u32
    }
}

pub const ANDROID_RESOLUTIONS: [AndroidResolution; 6] = [
    AndroidResolution::new("mipmap-ldpi", 36),
    AndroidResolution::new("mipmap-mdpi", 48),
    AndroidResolution::new("mipmap-hdpi", 72),
    AndroidResolution::new("mipmap-xhdpi", 96),
    AndroidResolution::new("mipmap-xxhdpi", 144),
    AndroidResolution::new("mipmap-xxxhdpi", 192),
];

pub const IOS_RESOLUTIONS: [IosResolution; 18] = [
    IosResolution::new(20.0, 1, "Icon-App-20x20@1x.png"),
    IosResolution::new(20.0, 2, "Icon-App-20x20@2x.png"),
    IosResolution::new(20.0, 3, "Icon-App-20x20@3x.png"),
    IosResolution::new(29.0, 1, "Icon-App-29x29@1x.png"),
    IosResolution::new(29.0, 2, "Icon-App-29x29@2x.png"),
    IosResolution::new(29.0, 3, "Icon-App-29x29@3x.png"),
    IosResolution::new(40.0, 1, "Icon-App-40x40@1x.png"),
    IosResolution::new(40.0, 2, "Icon-App-40x40@2x.png"),
    IosResolution::new(40.0, 3, "Icon-App-40x40@3x.png"),
    IosResolution::new(50.0, 2, "Icon-App-50x50@2x.png"),
    IosResolution::new(57.0, 2, "Icon-App-57x57@2x.png"),
    IosResolution::new(60.0, 2, "Icon-App-60x60@2x.png"),
    IosResolution::new(60.0, 3, "Icon-App-60x60@3x.png"),
    IosResolution::new(72.0, 2, "Icon-App-72x72@2x.png"),
    IosResolution::new(76.0, 1, "Icon-App-76x76@1x.png"),
    IosResolution::new(76.0, 2, "Icon-App-76x76@2x.png"),
    IosResolution::new(83.5, 2, "Icon-App-83.5x83.5@2x.png"),
    IosResolution::new(1024.0, 1, "Icon-App-1024x1024@1x.png"),
];

/// A file copied verbatim into a platform directory.
#[derive(Debug, Clone, Copy)]
pub struct StaticFile {
    pub filename: &'static str,
    pub contents: &'static str,
}

/// Asset catalog manifest written next to every iOS image set.
pub const IOS_MANIFEST: StaticFile = StaticFile {
    filename: "Contents.json",
    contents: include_str!("../assets/ios/Contents.json"),
};

/// One file a platform produces for every variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    /// Short name used in listings and failure reports.
    pub label: String,
    /// Edge length of the square output in pixels.
    pub pixels: u32,
    /// Path relative to the platform directory of the variant.
    pub file: PathBuf,
}

/// Which platform a descriptor targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformKind {
    Android,
    Ios,
}

impl PlatformKind {
    pub fn name(self) -> &'static str {
        match self {
            PlatformKind::Android => "android",
            PlatformKind::Ios => "ios",
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type DirectoryFn = fn(&PathResolver, &VariantName) -> Result<PathBuf>;

/// Everything the exporter needs to know about one platform.
#[derive(Clone)]
pub struct Platform {
    pub kind: PlatformKind,
    pub outputs: Vec<OutputSpec>,
    pub manifest: Option<StaticFile>,
    directory: DirectoryFn,
}

impl Platform {
    /// Android launcher icons, one per mipmap density.
    pub fn android() -> Self {
        let outputs = ANDROID_RESOLUTIONS
            .iter()
            .map(|r| OutputSpec {
                label: r.directory.to_string(),
                pixels: r.size,
                file: Path::new(r.directory).join(ANDROID_LAUNCHER_FILENAME),
            })
            .collect();

        Self {
            kind: PlatformKind::Android,
            outputs,
            manifest: None,
            directory: |resolver, name| Ok(resolver.android_dir(name.android())),
        }
    }

    /// iOS app icon set entries plus the `Contents.json` manifest.
    pub fn ios() -> Self {
        let outputs = IOS_RESOLUTIONS
            .iter()
            .map(|r| OutputSpec {
                label: r.filename.trim_end_matches(".png").to_string(),
                pixels: r.pixels(),
                file: PathBuf::from(r.filename),
            })
            .collect();

        Self {
            kind: PlatformKind::Ios,
            outputs,
            manifest: Some(IOS_MANIFEST),
            directory: |resolver, name| resolver.ios_dir(name.ios()),
        }
    }

    /// All supported platforms, in export order.
    pub fn all() -> Vec<Platform> {
        vec![Platform::android(), Platform::ios()]
    }

    /// Look up a platform by its command line name.
    pub fn by_name(name: &str) -> Option<Platform> {
        match name {
            "android" => Some(Platform::android()),
            "ios" => Some(Platform::ios()),
            _ => None,
        }
    }

    /// Directory that holds this platform's files for `variant`.
    pub fn directory(&self, resolver: &PathResolver, variant: &VariantName) -> Result<PathBuf> {
        (self.directory)(resolver, variant)
    }
}

impl fmt::Debug for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Platform")
            .field("kind", &self.kind)
            .field("outputs", &self.outputs)
            .field("manifest", &self.manifest.map(|m| m.filename))
            .finish()
    }
}

/// Number of files every variant produces across `platforms`.
pub fn outputs_per_variant(platforms: &[Platform]) -> usize {
    platforms.iter().map(|p| p.outputs.len()).sum()
}
