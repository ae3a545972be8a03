//! Collect command - pull live mentions into the vault

use anyhow::Result;
use console::style;
use slangtrack::SlangEngine;

pub fn run(engine: &SlangEngine, word: &str) -> Result<()> {
    let sources = &engine.config().sources;
    let bar = super::spinner(format!(
        "Searching {} sources for '{}'...",
        sources.niche_sources.len() + sources.mainstream_sources.len(),
        word
    ));
    let summary = engine.collect(word);
    bar.finish_and_clear();
    let summary = summary?;

    println!(
        "{} {} mentions of '{}' ({} new), {} daily counts updated",
        style("✓").green(),
        style(summary.fetched).cyan(),
        word,
        summary.new_mentions,
        summary.counts_updated
    );
    Ok(())
}
