use crate::config::JSearchConfig;
use crate::errors::AppError;
use crate::jobs::{JobPosting, JobSource};
use anyhow::Context;
use serde_json::Value;
use std::time::Duration;

/// Environment variable holding the RapidAPI key
pub const API_KEY_VAR: &str = "JSEARCH_API_KEY";

/// JSearch (RapidAPI) job-search provider.
pub struct JSearchSource {
    client: reqwest::blocking::Client,
    api_key: String,
    config: JSearchConfig,
}

impl JSearchSource {
    pub fn new(api_key: String, config: JSearchConfig) -> Result<Self, AppError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    fn query_params<'a>(&'a self, query: &'a str) -> [(&'static str, &'a str); 5] {
        [
            ("query", query),
            ("page", "1"),
            ("num_pages", "1"),
            ("date_posted", self.config.date_posted.as_str()),
            ("employment_types", self.config.employment_types.as_str()),
        ]
    }
}

/// Read `JSEARCH_API_KEY`. A missing or blank key is fatal.
pub fn api_key_from_env() -> Result<String, AppError> {
    read_api_key(std::env::var(API_KEY_VAR).ok())
}

fn read_api_key(value: Option<String>) -> Result<String, AppError> {
    value
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(AppError::MissingApiKey)
}

impl JobSource for JSearchSource {
    fn search(&self, keyword: &str, location: &str) -> anyhow::Result<Vec<JobPosting>> {
        let query = format!("{keyword} in {location}");

        let resp = self
            .client
            .get(&self.config.endpoint)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.config.host)
            .query(&self.query_params(&query))
            .send()
            .context("failed to send jsearch request")?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("HTTP error: {status}");
        }

        let body = resp
            .json::<Value>()
            .context("failed to parse jsearch response")?;

        Ok(extract_jsearch_postings(&body, keyword, location))
    }

    fn name(&self) -> &'static str {
        "JSearch"
    }
}

/// Map a JSearch response body to postings. Missing fields become empty strings.
fn extract_jsearch_postings(body: &Value, keyword: &str, location: &str) -> Vec<JobPosting> {
    let Some(data) = body.get("data").and_then(|v| v.as_array()) else {
        return vec![];
    };

    let field = |job: &Value, name: &str| {
        job.get(name)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };

    data.iter()
        .map(|job| JobPosting {
            title: field(job, "job_title"),
            company: field(job, "employer_name"),
            description: field(job, "job_description"),
            apply_link: field(job, "job_apply_link"),
            posted_at: field(job, "job_posted_at_datetime_utc"),
            source_keyword: keyword.to_string(),
            location: location.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_full_posting() {
        let body = serde_json::json!({
            "status": "OK",
            "data": [{
                "job_title": "Backend Engineer",
                "employer_name": "Acme",
                "job_description": "Build services.\nRequirements: Rust",
                "job_apply_link": "https://acme.example/apply",
                "job_posted_at_datetime_utc": "2024-05-01T12:00:00.000Z"
            }]
        });

        let jobs = extract_jsearch_postings(&body, "backend engineer", "United States");
        assert_eq!(jobs.len(), 1);
        assert_eq!(
            jobs[0],
            JobPosting {
                title: "Backend Engineer".to_string(),
                company: "Acme".to_string(),
                description: "Build services.\nRequirements: Rust".to_string(),
                apply_link: "https://acme.example/apply".to_string(),
                posted_at: "2024-05-01T12:00:00.000Z".to_string(),
                source_keyword: "backend engineer".to_string(),
                location: "United States".to_string(),
            }
        );
    }

    #[test]
    fn test_extract_missing_and_null_fields() {
        let body = serde_json::json!({
            "data": [{ "job_title": "Intern", "employer_name": null }]
        });

        let jobs = extract_jsearch_postings(&body, "intern", "Remote United States");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Intern");
        assert_eq!(jobs[0].company, "");
        assert_eq!(jobs[0].apply_link, "");
        assert_eq!(jobs[0].location, "Remote United States");
    }

    #[test]
    fn test_extract_without_data() {
        let body = serde_json::json!({"message": "You are not subscribed to this API."});
        assert!(extract_jsearch_postings(&body, "rust", "Canada").is_empty());

        let body = serde_json::json!({"data": "unexpected"});
        assert!(extract_jsearch_postings(&body, "rust", "Canada").is_empty());
    }

    #[test]
    fn test_api_key_required() {
        assert!(matches!(read_api_key(None), Err(AppError::MissingApiKey)));
        assert!(matches!(
            read_api_key(Some("   ".to_string())),
            Err(AppError::MissingApiKey)
        ));
        assert_eq!(read_api_key(Some(" abc ".to_string())).unwrap(), "abc");
    }

    #[test]
    fn test_query_params() {
        let source = JSearchSource::new("key".to_string(), JSearchConfig::default()).unwrap();
        let params = source.query_params("rust developer in United States");
        assert_eq!(
            params,
            [
                ("query", "rust developer in United States"),
                ("page", "1"),
                ("num_pages", "1"),
                ("date_posted", "week"),
                ("employment_types", "intern,fulltime"),
            ]
        );
    }
}
