use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use strata_editor::{read_log, Dispatcher, EntityStore, ReplaySummary};

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// JSON file holding an array of transitions
    pub log: PathBuf,

    /// Write the final store here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print compact JSON (overrides config)
    #[arg(long)]
    pub compact: bool,
}

pub fn replay(args: ReplayArgs, cwd: &str, config: &Config) -> Result<()> {
    let log_path = resolve(cwd, &args.log);
    if !log_path.exists() {
        return Err(anyhow!("Transition log does not exist: {}", log_path.display()));
    }

    let (store, summary) = replay_file(&log_path)?;

    eprintln!(
        "{} {} transitions ({} applied, {} skipped)",
        "Replayed".green().bold(),
        summary.applied + summary.skipped,
        summary.applied,
        summary.skipped
    );
    eprintln!(
        "   Layers: {}, cache {}",
        store.len(),
        if store.is_cache_dirty() { "dirty" } else { "fresh" }
    );

    let pretty = config.pretty && !args.compact;
    let json = if pretty {
        serde_json::to_string_pretty(&store)?
    } else {
        serde_json::to_string(&store)?
    };

    match args.out {
        Some(out) => {
            let out_path = resolve(cwd, &out);
            fs::write(&out_path, json)?;
            eprintln!("   {} {}", "✓".green(), out_path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Replay a log file against an empty store
fn replay_file(path: &Path) -> Result<(EntityStore, ReplaySummary)> {
    let transitions = read_log(path)?;
    tracing::info!(path = %path.display(), count = transitions.len(), "replaying transition log");

    let mut dispatcher = Dispatcher::new();
    let summary = dispatcher.replay(transitions);
    Ok((dispatcher.into_store(), summary))
}

fn resolve(cwd: &str, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        PathBuf::from(cwd).join(path)
    }
}
