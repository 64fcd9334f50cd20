//! Semantic matching infrastructure.
//!
//! This module provides local embedding-based scoring of resumes against job
//! descriptions, using fastembed-rs for generating embeddings.
//!
//! # Architecture
//!
//! - `embeddings`: Wraps fastembed behind the `Embedder` trait
//! - `preprocess`: Resume chunking, keyword splitting, job text filtering
//! - `similarity`: Cosine similarity
//! - `scorer`: Best-chunk scoring of a job against a resume

pub mod embeddings;
mod preprocess;
mod scorer;
mod similarity;

pub use embeddings::{Embedder, EmbeddingError, EmbeddingModel};
pub use preprocess::{chunk_resume, relevant_job_text, split_keywords};
pub use scorer::ResumeScorer;

/// Minimum score (percent) for a job to be reported as a match
pub const SIMILARITY_THRESHOLD: f64 = 60.0;
