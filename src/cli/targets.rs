//! Targets command implementation.
//!
//! Prints the resolution catalog as a plain table on stdout.

use clap::Args;

use crate::catalog::Platform;
use crate::error::{IconError, Result};

/// List the resolutions generated for each platform
#[derive(Args, Debug)]
pub struct TargetsArgs {
    /// Only list one platform (android or ios)
    #[arg(long)]
    pub platform: Option<String>,
}

pub fn run(args: TargetsArgs) -> Result<()> {
    let platforms = match &args.platform {
        Some(name) => vec![Platform::by_name(name).ok_or_else(|| IconError::Parse {
            message: format!("Unknown platform: {}", name),
            help: Some("Expected 'android' or 'ios'".to_string()),
        })?],
        None => Platform::all(),
    };

    println!("{}", render_table(&platforms));
    Ok(())
}

/// One line per output: platform, label, pixel size, relative file.
pub fn render_table(platforms: &[Platform]) -> String {
    platforms
        .iter()
        .flat_map(|platform| {
            platform.outputs.iter().map(move |spec| {
                format!(
                    "{:<8} {:<24} {:>5}  {}",
                    platform.kind.name(),
                    spec.label,
                    spec.pixels,
                    spec.file.display()
                )
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}
