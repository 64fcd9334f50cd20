//! Resume-to-jobs matching pipeline.
//!
//! collect input -> fetch jobs -> score -> filter/sort
//!
//! The embedding model is loaded lazily on the first run that has jobs to
//! score and kept for the lifetime of the matcher.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::{fetch_jobs, JobPosting, JobSource};
use crate::semantic::{
    chunk_resume, relevant_job_text, split_keywords, Embedder, EmbeddingModel, ResumeScorer,
    SIMILARITY_THRESHOLD,
};

/// A job that scored at or above the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Similarity percentage, 0.0 to 100.0
    pub score: f64,
    pub apply_link: String,
    pub posted_at: String,
    pub source_keyword: String,
}

impl MatchResult {
    pub fn from_posting(job: JobPosting, score: f64) -> Self {
        Self {
            title: job.title,
            company: job.company,
            location: job.location,
            score,
            apply_link: job.apply_link,
            posted_at: job.posted_at,
            source_keyword: job.source_keyword,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Number of postings fetched before scoring
    pub fetched: usize,
    pub threshold: f64,
    /// Matches, highest score first
    pub results: Vec<MatchResult>,
}

/// Receives pipeline progress. Every method defaults to a no-op.
pub trait MatchProgress {
    fn phase(&self, _name: &str) {}
    fn jobs_fetched(&self, _count: usize) {}
    fn job_scored(&self, _current: usize, _total: usize) {}
    fn done(&self, _report: &MatchReport) {}
}

/// Progress reporter that ignores everything.
pub struct NoProgress;

impl MatchProgress for NoProgress {}

/// Keep results scoring at or above `threshold`, highest score first.
/// Equal scores keep their original order.
pub fn rank_matches(results: Vec<MatchResult>, threshold: f64) -> Vec<MatchResult> {
    let mut ranked: Vec<MatchResult> = results
        .into_iter()
        .filter(|result| result.score >= threshold)
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    ranked
}

pub struct JobMatcher {
    source: Box<dyn JobSource>,
    locations: Vec<String>,
    model_name: String,
    models_dir: PathBuf,
    /// Lazily-loaded model. Uses Mutex<Option<_>> because get_or_try_init is unstable.
    embedder: Mutex<Option<Arc<dyn Embedder>>>,
}

impl JobMatcher {
    /// Create a matcher that loads `model_name` from `models_dir` on first use.
    pub fn new(
        source: Box<dyn JobSource>,
        locations: Vec<String>,
        model_name: &str,
        models_dir: PathBuf,
    ) -> Self {
        Self {
            source,
            locations,
            model_name: model_name.to_string(),
            models_dir,
            embedder: Mutex::new(None),
        }
    }

    /// Create a matcher around an already-loaded embedder.
    #[cfg(test)]
    pub fn with_embedder(
        source: Box<dyn JobSource>,
        locations: Vec<String>,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        Self {
            source,
            locations,
            model_name: String::new(),
            models_dir: PathBuf::new(),
            embedder: Mutex::new(Some(embedder)),
        }
    }

    /// Fetch postings for every keyword in every configured location.
    pub fn fetch(&self, keywords: &[String]) -> Vec<JobPosting> {
        fetch_jobs(self.source.as_ref(), keywords, &self.locations)
    }

    /// Run the whole pipeline for one request.
    ///
    /// Returns `AppError::EmptyInput` without touching the network when the
    /// resume has no chunks or no keyword survives splitting.
    pub fn run(
        &self,
        resume: &str,
        keywords: &str,
        progress: &dyn MatchProgress,
    ) -> Result<MatchReport, AppError> {
        let chunks = chunk_resume(resume);
        let keywords = split_keywords(keywords);

        if chunks.is_empty() || keywords.is_empty() {
            return Err(AppError::EmptyInput);
        }

        log::info!(
            "matching {} resume chunks against {} keywords in {} locations",
            chunks.len(),
            keywords.len(),
            self.locations.len()
        );

        progress.phase("Fetching jobs");
        let jobs = self.fetch(&keywords);
        let fetched = jobs.len();
        progress.jobs_fetched(fetched);
        log::info!("{fetched} jobs fetched");

        let mut scored = Vec::with_capacity(fetched);
        if fetched > 0 {
            progress.phase("Loading model");
            let embedder = self.embedder()?;

            progress.phase("Scoring jobs");
            let scorer = ResumeScorer::new(embedder.as_ref(), &chunks);
            for (idx, job) in jobs.into_iter().enumerate() {
                let score = scorer.score(&relevant_job_text(&job.description));
                log::debug!("score={score} title={:?} company={:?}", job.title, job.company);
                scored.push(MatchResult::from_posting(job, score));
                progress.job_scored(idx + 1, fetched);
            }
        }

        let report = MatchReport {
            fetched,
            threshold: SIMILARITY_THRESHOLD,
            results: rank_matches(scored, SIMILARITY_THRESHOLD),
        };

        log::info!(
            "{} jobs matched above {:.1}% threshold",
            report.results.len(),
            report.threshold
        );
        progress.done(&report);

        Ok(report)
    }

    /// Get the embedder, loading the model on first call.
    fn embedder(&self) -> Result<Arc<dyn Embedder>, AppError> {
        let mut guard = self
            .embedder
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {}", e))?;

        if let Some(embedder) = guard.as_ref() {
            return Ok(embedder.clone());
        }

        let model = EmbeddingModel::new(&self.model_name, self.models_dir.clone())?;
        log::info!(
            "embedding model {} ready, {} dimensions",
            model.name(),
            model.dimensions()
        );

        let model: Arc<dyn Embedder> = Arc::new(model);
        *guard = Some(model.clone());

        Ok(model)
    }
}
