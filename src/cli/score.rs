//! Score command - heuristic slang score for one mention

use anyhow::Result;
use console::style;
use slangtrack::SlangEngine;

pub fn run(engine: &SlangEngine, word: &str, context: &str, source: &str, json: bool) -> Result<()> {
    let verdict = engine.score(word, context, source);

    if json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
        return Ok(());
    }

    let label = if verdict.is_slang {
        style("SLANG").green().bold()
    } else {
        style("NOT SLANG").dim().bold()
    };
    println!("\n  {}  {}  (score {:.2})\n", style(word).bold(), label, verdict.score);
    for reason in &verdict.reasons {
        println!("    {} {}", style("+").cyan(), reason);
    }
    if verdict.reasons.is_empty() {
        println!("    {}", style("no slang signals").dim());
    }
    println!();
    Ok(())
}
