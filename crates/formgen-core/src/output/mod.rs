//! Delivering generated artifacts
//!
//! - Writing the artifact set to disk ([`writer`])
//! - Setup steps printed after generation ([`instructions`])
//! - Non-interactive regeneration from a saved snapshot

pub mod instructions;
pub mod writer;

pub use instructions::setup_steps;
pub use writer::{write_artifacts, WrittenFile};

use crate::config::{load_snapshot, OutputSettings};
use crate::generator::generate;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Regenerate a form from a saved snapshot without prompting
pub async fn generate_from_snapshot(path: &Path, settings: &OutputSettings) -> Result<()> {
    println!(
        "{} {}",
        "Loading configuration from".cyan(),
        path.display().to_string().bold()
    );

    let loaded = load_snapshot(path)?;
    if let Some(warning) = loaded.compatibility_warning() {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }

    let artifacts = generate(&loaded.spec)
        .with_context(|| format!("Failed to generate form '{}'", loaded.spec.name))?;
    let written = write_artifacts(&artifacts, settings)
        .await
        .context("Failed to write generated files")?;

    let verb = if settings.dry_run { "Would write" } else { "Wrote" };
    for file in &written {
        println!(
            "  {} {} {}",
            verb.green(),
            file.path.display(),
            format!("({}, {} bytes)", file.role, file.bytes).dimmed()
        );
    }

    let summary = if settings.dry_run { "Planned" } else { "Generated" };
    println!();
    println!(
        "{} {} files for {}",
        summary.green().bold(),
        written.len(),
        loaded.spec.name.bold()
    );

    println!();
    println!("{}", "Next steps:".cyan().bold());
    for (i, step) in setup_steps(&loaded.spec).iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }

    Ok(())
}
