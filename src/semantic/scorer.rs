//! Resume-to-job similarity scoring.
//!
//! A job's score is the best cosine similarity between any resume chunk and
//! the job's relevant text, as a percentage rounded to two decimals. Any
//! embedding failure scores the job 0.

use crate::semantic::embeddings::Embedder;
use crate::semantic::similarity::cosine_similarity;

/// Resume chunks embedded once, reused for every job in a run.
pub struct ResumeScorer<'a> {
    embedder: &'a dyn Embedder,
    chunk_embeddings: Vec<Vec<f32>>,
}

impl<'a> ResumeScorer<'a> {
    /// Embed `chunks` up front. If that fails every job will score 0.
    pub fn new(embedder: &'a dyn Embedder, chunks: &[String]) -> Self {
        let chunk_embeddings = match embedder.embed_batch(chunks) {
            Ok(embeddings) if embeddings.len() == chunks.len() => embeddings,
            Ok(embeddings) => {
                log::warn!(
                    "embedder returned {} vectors for {} resume chunks",
                    embeddings.len(),
                    chunks.len()
                );
                vec![]
            }
            Err(err) => {
                log::warn!("failed to embed resume chunks: {err}");
                vec![]
            }
        };

        Self {
            embedder,
            chunk_embeddings,
        }
    }

    /// Score already-filtered job text against the resume, 0.0 to 100.0.
    pub fn score(&self, job_text: &str) -> f64 {
        if self.chunk_embeddings.is_empty() {
            return 0.0;
        }

        let job_embedding = match self.embedder.embed(job_text) {
            Ok(embedding) => embedding,
            Err(err) => {
                log::warn!("failed to embed job text: {err}");
                return 0.0;
            }
        };

        let best = self
            .chunk_embeddings
            .iter()
            .map(|chunk| cosine_similarity(chunk, &job_embedding))
            .fold(f32::NEG_INFINITY, f32::max);

        to_percentage(best)
    }
}

fn to_percentage(similarity: f32) -> f64 {
    if !similarity.is_finite() {
        return 0.0;
    }
    let percent = (similarity.clamp(0.0, 1.0) as f64) * 100.0;
    (percent * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::EmbeddingError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Looks texts up in a fixed table; unknown text is an embedding failure.
    struct TableEmbedder {
        table: HashMap<String, Vec<f32>>,
        calls: AtomicUsize,
    }

    impl TableEmbedder {
        fn new(entries: &[(&str, Vec<f32>)]) -> Self {
            Self {
                table: entries
                    .iter()
                    .map(|(text, v)| (text.to_string(), v.clone()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Embedder for TableEmbedder {
        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            texts
                .iter()
                .map(|text| {
                    self.table
                        .get(text)
                        .cloned()
                        .ok_or_else(|| EmbeddingError::EmbeddingFailed(format!("unknown: {text}")))
                })
                .collect()
        }
    }

    fn chunks(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn best_chunk_score(embedder: &dyn Embedder, chunks: &[String], job_text: &str) -> f64 {
        ResumeScorer::new(embedder, chunks).score(job_text)
    }

    #[test]
    fn test_best_chunk_wins() {
        let embedder = TableEmbedder::new(&[
            ("rust", vec![1.0, 0.0]),
            ("cooking", vec![0.0, 1.0]),
            ("job", vec![1.0, 0.0]),
        ]);

        let score = best_chunk_score(&embedder, &chunks(&["cooking", "rust"]), "job");
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_score_is_rounded_percentage() {
        // cos = 0.8 / 1.0
        let embedder = TableEmbedder::new(&[("a", vec![0.8, 0.6]), ("job", vec![1.0, 0.0])]);
        let score = best_chunk_score(&embedder, &chunks(&["a"]), "job");
        assert!((score - 80.0).abs() < 1e-9);

        // cos = 1/sqrt(3) = 0.57735...
        let embedder =
            TableEmbedder::new(&[("b", vec![1.0, 1.0, 1.0]), ("job", vec![1.0, 0.0, 0.0])]);
        let score = best_chunk_score(&embedder, &chunks(&["b"]), "job");
        assert!((score - 57.74).abs() < 1e-9);
    }

    #[test]
    fn test_negative_similarity_clamps_to_zero() {
        let embedder = TableEmbedder::new(&[("a", vec![-1.0, 0.0]), ("job", vec![1.0, 0.0])]);
        assert_eq!(best_chunk_score(&embedder, &chunks(&["a"]), "job"), 0.0);
    }

    #[test]
    fn test_job_embedding_failure_scores_zero() {
        let embedder = TableEmbedder::new(&[("a", vec![1.0, 0.0])]);
        assert_eq!(best_chunk_score(&embedder, &chunks(&["a"]), "missing"), 0.0);
    }

    #[test]
    fn test_chunk_embedding_failure_scores_zero() {
        let embedder = TableEmbedder::new(&[("a", vec![1.0, 0.0]), ("job", vec![1.0, 0.0])]);
        assert_eq!(
            best_chunk_score(&embedder, &chunks(&["a", "missing"]), "job"),
            0.0
        );
    }

    #[test]
    fn test_no_chunks_scores_zero_without_embedding_job() {
        let embedder = TableEmbedder::new(&[("job", vec![1.0, 0.0])]);
        let scorer = ResumeScorer::new(&embedder, &[]);
        let calls_after_chunks = embedder.calls.load(Ordering::SeqCst);

        assert_eq!(scorer.score("job"), 0.0);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), calls_after_chunks);
    }

    #[test]
    fn test_empty_job_text_is_embedded_and_scored() {
        // boilerplate-only descriptions filter down to ""
        let embedder = TableEmbedder::new(&[("a", vec![1.0, 0.2]), ("", vec![1.0, 0.2])]);
        let scorer = ResumeScorer::new(&embedder, &chunks(&["a"]));

        assert_eq!(scorer.score(""), 100.0);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_chunks_embedded_once_per_scorer() {
        let embedder = TableEmbedder::new(&[
            ("a", vec![1.0, 0.0]),
            ("job one", vec![1.0, 0.0]),
            ("job two", vec![0.0, 1.0]),
        ]);
        let scorer = ResumeScorer::new(&embedder, &chunks(&["a"]));

        assert_eq!(scorer.score("job one"), 100.0);
        assert_eq!(scorer.score("job two"), 0.0);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 3);
    }
}
