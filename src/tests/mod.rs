
use crate::jobs::{JobPosting, JobSource};
use crate::matcher::JobMatcher;
use crate::semantic::{Embedder, EmbeddingError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Job source serving canned postings per keyword and recording every query.
#[derive(Default)]
pub struct FakeSource {
    pub postings: HashMap<String, Vec<JobPosting>>,
    pub failing_locations: Vec<String>,
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeSource {
    pub fn with_job(mut self, keyword: &str, title: &str, description: &str) -> Self {
        self.postings
            .entry(keyword.to_string())
            .or_default()
            .push(JobPosting {
                title: title.to_string(),
                company: format!("{title} Inc"),
                description: description.to_string(),
                apply_link: format!("https://jobs.example/{}", title.replace(' ', "-")),
                ..Default::default()
            });
        self
    }
}

impl JobSource for FakeSource {
    fn search(&self, keyword: &str, location: &str) -> anyhow::Result<Vec<JobPosting>> {
        self.calls
            .lock()
            .unwrap()
            .push((keyword.to_string(), location.to_string()));

        if self.failing_locations.iter().any(|l| l == location) {
            anyhow::bail!("connection refused");
        }

        Ok(self
            .postings
            .get(keyword)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|job| JobPosting {
                source_keyword: keyword.to_string(),
                location: location.to_string(),
                ..job
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "Fake"
    }
}

/// Bag-of-words embedder over a fixed vocabulary.
///
/// Text containing "explode" fails to embed.
pub struct VocabEmbedder {
    vocab: Vec<&'static str>,
    pub calls: AtomicUsize,
}

impl VocabEmbedder {
    pub fn new() -> Self {
        Self {
            vocab: vec!["rust", "python", "kubernetes", "cooking", "sales", "skills"],
            calls: AtomicUsize::new(0),
        }
    }
}

impl Embedder for VocabEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        texts
            .iter()
            .map(|text| {
                let lower = text.to_lowercase();
                if lower.contains("explode") {
                    return Err(EmbeddingError::EmbeddingFailed("boom".to_string()));
                }
                Ok(self
                    .vocab
                    .iter()
                    .map(|word| lower.matches(word).count() as f32)
                    .collect())
            })
            .collect()
    }
}

pub fn locations() -> Vec<String> {
    vec!["United States".to_string(), "Remote United States".to_string()]
}

/// Matcher over a fake source and vocabulary embedder; returns the shared call log.
pub fn create_matcher(
    source: FakeSource,
    embedder: Arc<VocabEmbedder>,
) -> (JobMatcher, Arc<Mutex<Vec<(String, String)>>>) {
    let calls = source.calls.clone();
    let matcher = JobMatcher::with_embedder(Box::new(source), locations(), embedder);
    (matcher, calls)
}
