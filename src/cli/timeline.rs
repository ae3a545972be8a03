//! Timeline command - word vs. historical anchors

use anyhow::Result;
use console::style;
use slangtrack::timeline::AnchorRole;
use slangtrack::SlangEngine;

pub fn run(engine: &SlangEngine, word: &str, json: bool) -> Result<()> {
    let Some(timeline) = engine.get_timeline(word)? else {
        println!(
            "\n  '{}' is not in the vault. Run {} first.\n",
            word,
            style(format!("slangtrack classify {}", word)).cyan()
        );
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&timeline)?);
        return Ok(());
    }

    println!();
    for entry in timeline.sorted() {
        match entry.role {
            AnchorRole::Target => println!(
                "  {}  {}  {}",
                style(entry.year).bold(),
                style("●").red(),
                style(&entry.word).bold()
            ),
            AnchorRole::Anchor => println!(
                "  {}  {}  {}",
                style(entry.year).dim(),
                style("○").dim(),
                entry.word
            ),
        }
    }
    if timeline.anchors.is_empty() {
        println!(
            "\n  No anchors yet. Run {} to load historical slang.",
            style("slangtrack seed").cyan()
        );
    }
    println!();
    Ok(())
}
