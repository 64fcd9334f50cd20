//! Text preprocessing for embedding input.
//!
//! - Resume text is split into paragraph chunks
//! - Keyword input is split on commas
//! - Job descriptions are reduced to lines that look like requirements

/// Lines containing one of these stems (case-insensitive) are kept
const RELEVANT_STEMS: [&str; 4] = ["responsib", "require", "skill", "qualif"];

/// Lines longer than this (in characters) are kept regardless of content
const MIN_RELEVANT_LINE_LEN: usize = 60;

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Split resume text into trimmed, non-empty paragraph chunks.
pub fn chunk_resume(resume: &str) -> Vec<String> {
    resume
        .split(PARAGRAPH_SEPARATOR)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split comma-separated job titles into trimmed, non-empty keywords.
pub fn split_keywords(keywords: &str) -> Vec<String> {
    keywords
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keep only description lines likely to carry requirements, joined by spaces.
pub fn relevant_job_text(description: &str) -> String {
    description
        .split('\n')
        .filter(|line| is_relevant_line(line))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_relevant_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    RELEVANT_STEMS.iter().any(|stem| lower.contains(stem))
        || line.chars().count() > MIN_RELEVANT_LINE_LEN
}
