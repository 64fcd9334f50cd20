use clap::Parser;
use homedir::my_home;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod errors;
mod export;
mod jobs;
mod matcher;
mod semantic;
#[cfg(test)]
mod tests;
mod web;

use config::Config;
use jobs::{api_key_from_env, JSearchSource};
use matcher::JobMatcher;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Data directory holding config.yaml and the model cache
fn base_path() -> anyhow::Result<PathBuf> {
    if let Ok(path) = std::env::var("JOBMATCH_BASE_PATH") {
        return Ok(PathBuf::from(path));
    }

    let home = my_home()?.ok_or_else(|| anyhow::anyhow!("Home directory path is empty"))?;
    Ok(home.join(".local/share/jobmatch"))
}

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    init_logging();

    // nothing runs without provider credentials
    let api_key = api_key_from_env()?;

    let config = Config::load_with(base_path()?)?;
    log::debug!("data directory: {}", config.base_path().display());

    let source = JSearchSource::new(api_key, config.jsearch.clone())?;
    let matcher = JobMatcher::new(
        Box::new(source),
        config.locations.clone(),
        &config.model,
        config.models_dir(),
    );

    match args.command {
        cli::Command::Daemon { listen } => commands::cmd_daemon(matcher, config, listen)?,

        cli::Command::Match {
            resume,
            keywords,
            csv,
            json,
        } => commands::cmd_match(&matcher, resume, &keywords, csv, json)?,

        cli::Command::Fetch { keywords, count } => {
            commands::cmd_fetch(&matcher, &keywords, count)?
        }
    }

    Ok(())
}
