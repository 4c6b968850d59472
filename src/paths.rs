//! Output path resolution.
//!
//! Icons are written either into a fresh standalone tree or straight into an
//! existing mobile project. The two layouts only differ in where each
//! platform's directory lives, so everything path-related is answered here.
//!
//! Standalone:
//!
//! ```text
//! {root}/android/{variant}/res/
//! {root}/ios/{Variant}.appiconset/
//! ```
//!
//! Project:
//!
//! ```text
//! {root}/android/app/src/{variant}/res/
//! {root}/ios/{Project}/Images.xcassets/{Variant}.appiconset/
//! ```

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use walkdir::WalkDir;

use crate::error::{IconError, Result};

/// Extension of an Xcode project bundle.
pub const XCODE_PROJECT_EXTENSION: &str = ".xcodeproj";

/// How the output root is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// A fresh tree with one directory per platform and variant.
    #[default]
    Standalone,
    /// The output root is an existing React Native style project.
    Project,
}

/// Computes destination directories for a run.
///
/// Constructed once per run. In project layout the Xcode project name is
/// looked up on first use and reused afterwards, including across worker
/// threads.
#[derive(Debug)]
pub struct PathResolver {
    root: PathBuf,
    layout: Layout,
    project_name: OnceCell<String>,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>, layout: Layout) -> Self {
        Self {
            root: root.into(),
            layout,
            project_name: OnceCell::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Android resource directory for a variant.
    pub fn android_dir(&self, variant: &str) -> PathBuf {
        let android = self.root.join("android");
        let flavor = android_case(variant);

        match self.layout {
            Layout::Standalone => android.join(flavor).join("res"),
            Layout::Project => android.join("app").join("src").join(flavor).join("res"),
        }
    }

    /// iOS `.appiconset` directory for a variant.
    ///
    /// Fails in project layout when the host project cannot be identified.
    pub fn ios_dir(&self, variant: &str) -> Result<PathBuf> {
        let ios = self.root.join("ios");
        let icon_set = format!("{}.appiconset", pascal_case(variant));

        match self.layout {
            Layout::Standalone => Ok(ios.join(icon_set)),
            Layout::Project => Ok(ios
                .join(self.project_name()?)
                .join("Images.xcassets")
                .join(icon_set)),
        }
    }

    /// Name of the Xcode project under `{root}/ios`, discovered once.
    pub fn project_name(&self) -> Result<&str> {
        self.project_name
            .get_or_try_init(|| discover_project_name(&self.root))
            .map(String::as_str)
    }
}

/// Find the single `*.xcodeproj` entry in `{root}/ios` and return its base name.
pub fn discover_project_name(root: &Path) -> Result<String> {
    let ios = root.join("ios");

    if !ios.is_dir() {
        return Err(IconError::Configuration {
            message: format!("{} is not a directory", ios.display()),
            help: Some(
                "Project mode expects the output directory to be a mobile project root"
                    .to_string(),
            ),
        });
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(&ios)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| IconError::Configuration {
            message: format!("Failed to read {}: {}", ios.display(), e),
            help: None,
        })?;

        if let Some(name) = entry
            .file_name()
            .to_str()
            .and_then(|n| n.strip_suffix(XCODE_PROJECT_EXTENSION))
        {
            if !name.is_empty() {
                names.push(name.to_string());
            }
        }
    }

    match names.len() {
        1 => Ok(names.remove(0)),
        0 => Err(IconError::Configuration {
            message: format!("No {} found in {}", XCODE_PROJECT_EXTENSION, ios.display()),
            help: Some("Run without --project to write a standalone icon tree".to_string()),
        }),
        _ => Err(IconError::Configuration {
            message: format!(
                "Multiple Xcode projects found in {}: {}",
                ios.display(),
                names.join(", ")
            ),
            help: None,
        }),
    }
}

/// Directory name of a variant on Android (build flavor names are lowercase).
pub fn android_case(name: &str) -> String {
    name.to_lowercase()
}

/// Image set name of a variant on iOS: `dark-mode` becomes `DarkMode`.
pub fn pascal_case(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
