//! Classify command - run the cascade for one word

use anyhow::Result;
use console::style;
use slangtrack::models::{Classification, DataSource, WordRecord};
use slangtrack::SlangEngine;

pub fn run(engine: &SlangEngine, word: &str, json: bool) -> Result<()> {
    // Only the dynamic layer is slow enough to need feedback
    let known = engine.vault().get(word)?.is_some();
    let spinner = (!known && !json).then(|| super::spinner(format!("Classifying '{}'...", word)));

    let record = engine.classify(word);
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let record = record?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    print_record(&record);
    Ok(())
}

fn print_record(record: &WordRecord) {
    let label = match record.classification {
        Classification::Standard => style("STANDARD").dim(),
        Classification::EstablishedSlang => style("ESTABLISHED SLANG").green(),
        Classification::EmergingSlang => style("EMERGING SLANG").yellow(),
        Classification::UnknownNeologism => style("UNKNOWN").red(),
    };

    println!("\n  {}  {}\n", style(&record.display).bold(), label.bold());
    println!("  Source:      {}", source_label(record.data_source));
    println!("  Slang ratio: {:.2}", record.slang_ratio);
    println!("  Sentiment:   {:+.2}", record.average_sentiment);
    if let Some(era) = &record.origin_era {
        println!("  Era:         {}", style(era).cyan());
    }
    if let Some(meaning) = &record.meaning {
        println!("  Meaning:     {}", meaning);
    }
    if record.data_source == DataSource::DynamicScrape {
        println!("  Mentions:    {}", record.mention_count);
        if let Some(score) = record.slang_score {
            println!("  Slang score: {:.2}", score);
        }
    }
    println!(
        "  Analyzed:    {}",
        style(record.last_analyzed.format("%Y-%m-%d %H:%M:%S UTC")).dim()
    );
    println!();
}

fn source_label(source: DataSource) -> &'static str {
    match source {
        DataSource::Lexicon => "standard lexicon",
        DataSource::SlangArchive => "slang archive",
        DataSource::DynamicScrape => "live mentions",
        DataSource::NotFound => "not found anywhere",
    }
}
