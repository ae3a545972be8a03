//! Init command - write an example config

use anyhow::{Context, Result};
use console::style;
use slangtrack::config::{CONFIG_FILE_NAME, EXAMPLE_CONFIG};
use std::path::Path;

pub fn run(dir: &Path, force: bool) -> Result<()> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        println!(
            "{} {} already exists (use --force to overwrite)",
            style("•").dim(),
            style(path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{} Created {}", style("✓").green(), style(path.display()).cyan());
    Ok(())
}
