//! Mock command - synthetic history for demo words

use anyhow::Result;
use console::style;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slangtrack::engine::MOCK_WORDS;
use slangtrack::SlangEngine;

pub fn run(engine: &SlangEngine, days: u32, seed: Option<u64>) -> Result<()> {
    if days == 0 {
        anyhow::bail!("--days must be at least 1");
    }
    let written = match seed {
        Some(seed) => engine.generate_mock_history(days, &mut ChaCha8Rng::seed_from_u64(seed))?,
        None => engine.generate_mock_history(days, &mut rand::rng())?,
    };

    let words: Vec<&str> = MOCK_WORDS.iter().map(|(w, _)| *w).collect();
    println!(
        "{} Wrote {} daily counts ({} days) for {}",
        style("✓").green(),
        style(written).cyan(),
        days,
        words.join(", ")
    );
    Ok(())
}
