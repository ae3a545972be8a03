//! Status command - vault location and contents

use anyhow::Result;
use console::style;
use slangtrack::models::Classification;
use slangtrack::SlangEngine;
use std::path::Path;

pub fn run(engine: &SlangEngine, path: &Path) -> Result<()> {
    println!("\nslangtrack status\n");
    println!("  Vault: {}", style(path.display()).cyan());

    let records = engine.vault().records()?;
    let count = |c: Classification| records.iter().filter(|r| r.classification == c).count();
    println!("  {} words", style(records.len()).cyan());
    println!("      {} standard", count(Classification::Standard));
    println!("      {} established slang", count(Classification::EstablishedSlang));
    println!("      {} emerging slang", count(Classification::EmergingSlang));
    println!("      {} unknown", count(Classification::UnknownNeologism));

    let config = engine.config();
    println!();
    println!("  Niche sources:      {}", config.sources.niche_sources.join(", "));
    println!("  Mainstream sources: {}", config.sources.mainstream_sources.join(", "));
    println!(
        "  Global fallback:    {}",
        config.sources.global().unwrap_or("disabled")
    );
    println!(
        "  Cringe alert:       mainstream > {} × niche (or > {} with a dying niche)",
        config.alert.alert_multiplier, config.alert.dying_niche_threshold
    );

    if records.is_empty() {
        println!(
            "\n  {} Empty vault. Try {}",
            style("[--]").dim(),
            style("slangtrack seed").cyan()
        );
    }
    println!();
    Ok(())
}
