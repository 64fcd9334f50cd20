use crate::{
    config::Config,
    errors::AppError,
    export::{render_table, write_csv},
    matcher::{JobMatcher, MatchProgress, MatchReport},
    semantic::split_keywords,
    web,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    io::Read,
    path::{Path, PathBuf},
};

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl MatchProgress for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn jobs_fetched(&self, count: usize) {
        self.spinner.println(format!("{count} jobs fetched. Scoring now..."));
    }

    fn job_scored(&self, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Scoring jobs [{current}/{total}]"));
    }

    fn done(&self, _report: &MatchReport) {
        self.spinner.finish_and_clear();
    }
}

fn read_resume(path: Option<&Path>) -> Result<String, AppError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut resume = String::new();
            std::io::stdin().read_to_string(&mut resume)?;
            Ok(resume)
        }
    }
}

pub fn cmd_match(
    matcher: &JobMatcher,
    resume: Option<PathBuf>,
    keywords: &str,
    csv: Option<PathBuf>,
    json: bool,
) -> Result<(), AppError> {
    let resume = read_resume(resume.as_deref())?;

    let progress = CliProgress::new();
    let report = match matcher.run(&resume, keywords, &progress) {
        Ok(report) => report,
        Err(AppError::EmptyInput) => {
            progress.spinner.finish_and_clear();
            eprintln!("{}", AppError::EmptyInput);
            return Ok(());
        }
        Err(err) => {
            progress.spinner.finish_and_clear();
            return Err(err);
        }
    };

    if let Some(path) = csv {
        let file = std::fs::File::create(&path)?;
        write_csv(file, &report.results)?;
        log::info!("wrote {} rows to {}", report.results.len(), path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", summary_message(&report));
    if !report.results.is_empty() {
        println!("{}", render_table(&report.results));
    }

    Ok(())
}

fn summary_message(report: &MatchReport) -> String {
    if report.results.is_empty() {
        return "No jobs matched your resume above the threshold.".to_string();
    }

    format!(
        "{} jobs matched above {:.1}% threshold.",
        report.results.len(),
        report.threshold
    )
}

pub fn cmd_fetch(matcher: &JobMatcher, keywords: &str, count: bool) -> Result<(), AppError> {
    let keywords = split_keywords(keywords);
    if keywords.is_empty() {
        eprintln!("Please enter at least one job title.");
        return Ok(());
    }

    let jobs = matcher.fetch(&keywords);

    if count {
        println!("{} jobs fetched", jobs.len());
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&jobs)?);
    Ok(())
}

pub fn cmd_daemon(matcher: JobMatcher, config: Config, listen: Option<String>) -> Result<(), AppError> {
    let listen = listen.unwrap_or_else(|| config.listen.clone());
    web::start_daemon(matcher, config, listen)
}
