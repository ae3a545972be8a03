//! Trend command - forecast and cringe alert for one word

use anyhow::Result;
use console::style;
use slangtrack::trend::{LifecycleStage, TrendReport};
use slangtrack::SlangEngine;

pub fn run(engine: &SlangEngine, word: &str, json: bool) -> Result<()> {
    let Some(report) = engine.analyze_trend(word)? else {
        if json {
            println!("null");
        } else {
            println!(
                "\n  No mention history for '{}'. Run {} or {} first.\n",
                word,
                style(format!("slangtrack collect {}", word)).cyan(),
                style("slangtrack mock").cyan()
            );
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &TrendReport) {
    let verdict = match report.verdict {
        LifecycleStage::Cringe => style(report.verdict.as_str()).red(),
        LifecycleStage::Niche => style(report.verdict.as_str()).green(),
        LifecycleStage::Peak => style(report.verdict.as_str()).yellow(),
        LifecycleStage::Mainstream => style(report.verdict.as_str()).magenta(),
        LifecycleStage::Unknown => style(report.verdict.as_str()).dim(),
    };
    println!(
        "\n  {}  {} ({})\n",
        style(&report.word).bold(),
        verdict.bold(),
        report.verdict.description()
    );

    let days = report.historical.len();
    if let (Some(first), Some(last)) = (report.historical.points().first(), report.historical.last()) {
        println!("  History:  {} days ({} → {})", days, first.date, last.date);
    }
    println!(
        "  Mentions: {} niche, {} mainstream",
        report.historical.total_niche(),
        report.historical.total_mainstream()
    );

    if report.trend_available() {
        println!(
            "  Velocity over {} days ({}): mainstream {:+.1}%, niche {:+.1}%",
            report.horizon_days,
            report.model,
            report.mainstream_growth * 100.0,
            report.niche_growth * 100.0
        );
    } else {
        println!("  Velocity: {}", style("trend unavailable (need 2+ days)").dim());
    }
    println!(
        "  Ratio {:.2}, saturation {:.2}",
        report.current_ratio, report.saturation
    );

    if report.cringe_alert {
        println!("\n  {} Going mainstream too fast", style("⚠ CRINGE ALERT").red().bold());
    }
    println!();
}
