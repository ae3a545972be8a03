//! CLI command definitions and handlers

mod classify;
mod collect;
mod init;
mod mock;
mod score;
mod status;
mod timeline;
mod trend;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use slangtrack::collector::{RedditCollector, SignalCollector, StaticCollector};
use slangtrack::config::{load_config, TrackerConfig};
use slangtrack::lexicon::LexicalResources;
use slangtrack::vault::RedbVault;
use slangtrack::SlangEngine;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// slangtrack - where is this word in its slang lifecycle?
#[derive(Parser, Debug)]
#[command(name = "slangtrack")]
#[command(
    version,
    about = "Classify words along the slang lifecycle and forecast how fast they are going mainstream",
    after_help = "\
Examples:
  slangtrack classify rizz             Standard, established, emerging or unknown?
  slangtrack score rizz --context \"This guy has insane rizz\" --source ukdrill
  slangtrack mock && slangtrack trend aura
  slangtrack seed && slangtrack timeline peng
  slangtrack --offline classify florbly"
)]
pub struct Cli {
    /// Vault database file (default: <data dir>/slangtrack/vault.redb)
    #[arg(long, global = true, env = "SLANGTRACK_DB")]
    pub db: Option<PathBuf>,

    /// Config file (default: ./slangtrack.toml or ./.slangtrackrc.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Never touch the network; the dynamic layer finds no mentions
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a word through vault, lexicon, archive and live sources
    Classify {
        word: String,

        /// Print the stored record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Heuristic slang score for one usage of a word
    Score {
        word: String,

        /// Text the word appeared in
        #[arg(long, short = 'c', default_value = "")]
        context: String,

        /// Community the text came from (e.g. a subreddit)
        #[arg(long, short = 's', default_value = "")]
        source: String,

        #[arg(long)]
        json: bool,
    },

    /// Forecast niche and mainstream usage and check the cringe alert
    Trend {
        word: String,

        #[arg(long)]
        json: bool,
    },

    /// Place a vaulted word on the timeline next to historical anchors
    Timeline {
        word: String,

        #[arg(long)]
        json: bool,
    },

    /// Fetch live mentions into the mention log and daily counts
    Collect { word: String },

    /// Store every archive entry the vault does not know yet
    Seed,

    /// Show the approximate year for an era description
    Era { text: String },

    /// Generate synthetic history for the demo words (aura, cooked, peng)
    Mock {
        /// Days of history ending today
        #[arg(long, default_value = "60")]
        days: u32,

        /// Seed for reproducible noise
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Write an example slangtrack.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show vault location and contents summary
    Status,
}

pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Init { force } => init::run(Path::new("."), *force),
        Commands::Era { text } => {
            println!("{}", slangtrack::timeline::era_to_year(text));
            Ok(())
        }
        Commands::Score {
            word,
            context,
            source,
            json,
        } => score::run(&open_engine(&cli)?, word, context, source, *json),
        Commands::Classify { word, json } => classify::run(&open_engine(&cli)?, word, *json),
        Commands::Trend { word, json } => trend::run(&open_engine(&cli)?, word, *json),
        Commands::Timeline { word, json } => timeline::run(&open_engine(&cli)?, word, *json),
        Commands::Collect { word } => collect::run(&open_engine(&cli)?, word),
        Commands::Seed => run_seed(&open_engine(&cli)?),
        Commands::Mock { days, seed } => mock::run(&open_engine(&cli)?, *days, *seed),
        Commands::Status => status::run(&open_engine(&cli)?, &vault_path(&cli)),
    }
}

fn run_seed(engine: &SlangEngine) -> Result<()> {
    let written = engine.seed_archive()?;
    println!(
        "{} Seeded {} archive records",
        style("✓").green(),
        style(written).cyan()
    );
    Ok(())
}

/// `--db`/`SLANGTRACK_DB`, else the per-user data directory
fn vault_path(cli: &Cli) -> PathBuf {
    cli.db.clone().unwrap_or_else(default_vault_path)
}

pub(crate) fn default_vault_path() -> PathBuf {
    dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("slangtrack")
        .join("vault.redb")
}

fn load(cli: &Cli) -> TrackerConfig {
    load_config(cli.config.as_deref(), Path::new("."))
}

fn open_engine(cli: &Cli) -> Result<SlangEngine> {
    let config = load(cli);

    let resources = LexicalResources::load(&config.resources)
        .context("Failed to load lexical resources")?
        .shared();

    let path = vault_path(cli);
    let vault = RedbVault::open(&path)
        .with_context(|| format!("Failed to open vault at {}", path.display()))?;

    let collector: Box<dyn SignalCollector> = if cli.offline {
        Box::new(StaticCollector::new())
    } else {
        Box::new(RedditCollector::new(config.collector.clone()))
    };

    Ok(SlangEngine::new(config, resources, Arc::new(vault), collector))
}

/// Spinner on stderr for slow, network-bound steps
pub(crate) fn spinner(message: String) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let bar = ProgressBar::new_spinner();
    bar.set_style(style);
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
