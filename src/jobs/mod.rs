pub mod jsearch;

use serde::{Deserialize, Serialize};

pub use jsearch::{api_key_from_env, JSearchSource};

/// A posting returned by a job-search provider. Fetched per request, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub description: String,
    pub apply_link: String,
    /// Provider timestamp (UTC), empty when unknown
    pub posted_at: String,
    /// Keyword of the query that returned this posting
    pub source_keyword: String,
    /// Location string of the query that returned this posting
    pub location: String,
}

/// A job-search provider queried once per (keyword, location) pair.
pub trait JobSource: Send + Sync {
    /// Search postings for a single keyword in a single location.
    /// Errors are reported to the caller, which decides whether to skip them.
    fn search(&self, keyword: &str, location: &str) -> anyhow::Result<Vec<JobPosting>>;

    /// Get the name of this source for logging
    fn name(&self) -> &'static str;
}

/// Query `source` for every keyword in every location, sequentially.
///
/// Best effort: a failed query is logged and contributes nothing.
pub fn fetch_jobs(source: &dyn JobSource, keywords: &[String], locations: &[String]) -> Vec<JobPosting> {
    let name = source.name();
    let mut jobs = vec![];

    for keyword in keywords {
        for location in locations {
            match source.search(keyword, location) {
                Ok(found) => {
                    log::info!(
                        "source={name} keyword={keyword:?} location={location:?} outcome=success count={}",
                        found.len()
                    );
                    jobs.extend(found);
                }
                Err(err) => {
                    log::warn!(
                        "source={name} keyword={keyword:?} location={location:?} outcome=error err={err}"
                    );
                }
            }
        }
    }

    jobs
}
