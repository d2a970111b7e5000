//! Template resolution, parsing, rendering, and copying
//!
//! This module provides:
//! - Template manifest types (RootManifest, TemplateManifest)
//! - Template root resolution (CLI flag, environment, product default)
//! - Placeholder rendering and layered copying
//! - Version compatibility checking

pub mod copier;
pub mod manifest;
pub mod renderer;
pub mod source;
pub mod version;

use crate::product::ProductConfig;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

pub use copier::copy_template;
pub use manifest::{RootManifest, TemplateManifest};
pub use renderer::{sanitize_app_name, RenderVars, TemplateRenderer};
pub use source::TemplateSource;
pub use version::check_compatibility;

/// Dry-run every template in a directory into scratch space
pub async fn smoke_templates<C: ProductConfig>(
    config: &C,
    template_dir: &Option<PathBuf>,
) -> Result<()> {
    let source = TemplateSource::resolve(config, template_dir)?;
    let root_manifest = source.root_manifest()?;

    println!(
        "{}",
        format!("Checking {} templates...", config.display_name())
            .cyan()
            .bold()
    );
    println!();

    let vars = RenderVars::new(config.default_app_name(), config.default_port());
    let mut checked = 0;
    let mut failed = 0;
    for template_name in &root_manifest.templates {
        print!("  {} {}...", "->".blue(), template_name);

        match smoke_one(&source, &root_manifest, template_name, &vars).await {
            Ok(count) => {
                println!(" {} ({} files)", "done".green(), count);
                checked += 1;
            }
            Err(e) => {
                println!(" {}", "failed".red());
                eprintln!("    Error: {}", e);
                failed += 1;
            }
        }
    }

    println!();
    println!(
        "{} {} template(s) in {}",
        "Checked".green().bold(),
        checked,
        source.root().display()
    );

    if failed > 0 {
        anyhow::bail!("{} template(s) failed the smoke check", failed);
    }

    Ok(())
}

async fn smoke_one(
    source: &TemplateSource,
    root_manifest: &RootManifest,
    template_name: &str,
    vars: &RenderVars,
) -> Result<usize> {
    // Parse the manifest even though the dry run doesn't display it
    source.template_manifest(template_name)?;

    let layers = source.layer_dirs(root_manifest, template_name)?;
    let scratch = tempfile::tempdir()?;
    let copied = copy_template(&layers, scratch.path(), vars).await?;
    Ok(copied.len())
}
