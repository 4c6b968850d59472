//! End-to-end runs of the icon pipeline.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};
use walkdir::WalkDir;

use iconsmith::catalog::{ANDROID_RESOLUTIONS, IOS_RESOLUTIONS};
use iconsmith::{run, IconError, Layout, PathResolver, PipelineOptions, Printer};

fn quiet() -> Printer {
    Printer::new().with_quiet(true)
}

fn solid(path: &Path, width: u32, height: u32, colour: [u8; 4]) {
    RgbaImage::from_pixel(width, height, Rgba(colour))
        .save(path)
        .unwrap();
}

/// Workspace with a 64px source, a `masks/` directory and an `out/` root.
fn workspace() -> (TempDir, PipelineOptions) {
    let dir = tempdir().unwrap();
    let source = dir.path().join("icon.png");
    solid(&source, 64, 64, [255, 0, 0, 255]);

    fs::create_dir(dir.path().join("masks")).unwrap();
    fs::create_dir(dir.path().join("out")).unwrap();

    let mut options = PipelineOptions::new(source, dir.path().join("out"));
    options.masks = Some(dir.path().join("masks"));
    options.jobs = 4;
    (dir, options)
}

fn files_under(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

#[test]
fn masks_add_one_variant_each() {
    let (dir, options) = workspace();
    let masks = dir.path().join("masks");
    solid(&masks.join("star.png"), 16, 16, [0, 0, 255, 255]);
    fs::write(masks.join("star.txt"), "not a mask").unwrap();
    solid(&masks.join("heart.png"), 16, 16, [0, 255, 0, 128]);

    let summary = run(&options, &quiet()).unwrap();

    assert!(summary.is_success());
    assert_eq!(summary.variants, vec!["default", "heart", "star"]);
    let per_variant = ANDROID_RESOLUTIONS.len() + IOS_RESOLUTIONS.len();
    assert_eq!(summary.expected, 3 * per_variant);
    assert_eq!(summary.report.written.len(), summary.expected);
}

#[test]
fn every_file_lands_where_the_resolver_says() {
    let (dir, options) = workspace();
    solid(&dir.path().join("masks/winter.png"), 64, 64, [255, 255, 255, 64]);

    run(&options, &quiet()).unwrap();

    let resolver = PathResolver::new(&options.output, Layout::Standalone);
    let mut expected = BTreeSet::new();
    for (android, ios) in [("default", "default"), ("winter", "winter")] {
        for r in &ANDROID_RESOLUTIONS {
            expected.insert(
                resolver
                    .android_dir(android)
                    .join(r.directory)
                    .join("ic_launcher.png"),
            );
        }
        let ios_dir = resolver.ios_dir(ios).unwrap();
        for r in &IOS_RESOLUTIONS {
            expected.insert(ios_dir.join(r.filename));
        }
        expected.insert(ios_dir.join("Contents.json"));
    }
    let expected: BTreeSet<PathBuf> = expected
        .into_iter()
        .map(|p| p.strip_prefix(&options.output).unwrap().to_path_buf())
        .collect();

    assert_eq!(files_under(&options.output), expected);
}

#[test]
fn written_dimensions_match_catalog() {
    let (_dir, options) = workspace();

    run(&options, &quiet()).unwrap();

    let android = options.output.join("android/default/res");
    for r in &ANDROID_RESOLUTIONS {
        let img = image::open(android.join(r.directory).join("ic_launcher.png")).unwrap();
        assert_eq!((img.width(), img.height()), (r.size, r.size));
    }

    let ios = options.output.join("ios/Default.appiconset");
    for r in &IOS_RESOLUTIONS {
        let img = image::open(ios.join(r.filename)).unwrap();
        assert_eq!((img.width(), img.height()), (r.pixels(), r.pixels()));
    }
}

#[test]
fn rerun_produces_same_tree() {
    let (dir, options) = workspace();
    solid(&dir.path().join("masks/promo.png"), 8, 8, [0, 0, 0, 255]);

    run(&options, &quiet()).unwrap();
    let first = files_under(&options.output);

    fs::remove_dir_all(&options.output).unwrap();
    fs::create_dir(&options.output).unwrap();

    run(&options, &quiet()).unwrap();
    assert_eq!(files_under(&options.output), first);
}

#[test]
fn non_square_source_aborts_before_writing() {
    let (dir, mut options) = workspace();
    let wide = dir.path().join("wide.png");
    solid(&wide, 100, 50, [0, 0, 0, 255]);
    options.source = wide;

    let err = run(&options, &quiet()).unwrap_err();

    assert!(matches!(err, IconError::Validation { .. }));
    assert!(files_under(&options.output).is_empty());
}

#[test]
fn mask_overlays_source_pixels() {
    let (dir, options) = workspace();
    // Top half opaque blue, bottom half transparent
    let mask = RgbaImage::from_fn(16, 16, |_, y| {
        if y < 8 {
            Rgba([0, 0, 255, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    mask.save(dir.path().join("masks/split.png")).unwrap();

    run(&options, &quiet()).unwrap();

    let split = options.output.join("ios/Split.appiconset/Icon-App-1024x1024@1x.png");
    let icon = image::open(split).unwrap().to_rgba8();
    assert_eq!(*icon.get_pixel(512, 100), Rgba([0, 0, 255, 255]));
    assert_eq!(*icon.get_pixel(512, 900), Rgba([255, 0, 0, 255]));

    // The default variant never sees the mask
    let default = options.output.join("ios/Default.appiconset/Icon-App-1024x1024@1x.png");
    let plain = image::open(default).unwrap().to_rgba8();
    assert_eq!(*plain.get_pixel(512, 100), Rgba([255, 0, 0, 255]));
}

#[test]
fn project_mode_writes_into_host_project() {
    let (dir, mut options) = workspace();
    solid(&dir.path().join("masks/beta.png"), 16, 16, [0, 0, 0, 255]);
    fs::create_dir_all(options.output.join("ios/MyApp.xcodeproj")).unwrap();
    options.layout = Layout::Project;

    let summary = run(&options, &quiet()).unwrap();

    assert!(summary.is_success());
    assert_eq!(summary.variants, vec!["main/AppIcon", "beta"]);

    let out = &options.output;
    assert!(out
        .join("android/app/src/main/res/mipmap-hdpi/ic_launcher.png")
        .exists());
    assert!(out
        .join("android/app/src/beta/res/mipmap-hdpi/ic_launcher.png")
        .exists());
    assert!(out
        .join("ios/MyApp/Images.xcassets/AppIcon.appiconset/Icon-App-60x60@3x.png")
        .exists());
    assert!(out
        .join("ios/MyApp/Images.xcassets/Beta.appiconset/Contents.json")
        .exists());
}

#[test]
fn project_mode_without_xcodeproj_aborts() {
    let (_dir, mut options) = workspace();
    fs::create_dir_all(options.output.join("ios/Pods")).unwrap();
    options.layout = Layout::Project;

    let before = files_under(&options.output);
    let err = run(&options, &quiet()).unwrap_err();

    assert!(matches!(err, IconError::Configuration { .. }));
    assert_eq!(files_under(&options.output), before);
    assert!(!options.output.join("android").exists());
}

#[test]
fn undecodable_mask_aborts() {
    let (dir, options) = workspace();
    fs::write(dir.path().join("masks/broken.png"), "garbage").unwrap();

    let err = run(&options, &quiet()).unwrap_err();

    assert!(matches!(err, IconError::Io { .. }));
    assert!(files_under(&options.output).is_empty());
}

#[test]
fn write_failures_are_reported_not_fatal() {
    let (dir, options) = workspace();
    solid(&dir.path().join("masks/late.png"), 16, 16, [0, 0, 0, 255]);

    // Block the default variant's iOS image set with a plain file
    fs::create_dir_all(options.output.join("ios")).unwrap();
    fs::write(options.output.join("ios/Default.appiconset"), "").unwrap();

    let summary = run(&options, &quiet()).unwrap();

    assert!(!summary.is_success());
    assert_eq!(summary.report.failures.len(), IOS_RESOLUTIONS.len());
    assert!(summary.report.failures.iter().all(|f| f.variant == "default"));
    // Everything else was still written
    assert_eq!(
        summary.report.written.len(),
        summary.expected - IOS_RESOLUTIONS.len()
    );
    assert!(options
        .output
        .join("ios/Late.appiconset/Contents.json")
        .exists());
}

#[test]
fn mask_named_like_host_icon_set_aborts() {
    let (dir, mut options) = workspace();
    solid(&dir.path().join("masks/appicon.png"), 16, 16, [0, 0, 0, 255]);
    fs::create_dir_all(options.output.join("ios/MyApp.xcodeproj")).unwrap();
    options.layout = Layout::Project;

    let err = run(&options, &quiet()).unwrap_err();

    assert!(matches!(err, IconError::Validation { .. }));
    assert!(!options.output.join("ios/MyApp/Images.xcassets").exists());
}
