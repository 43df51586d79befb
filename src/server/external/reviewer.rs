use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Findings returned by the semantic compliance reviewer. The issue count
/// drives the external contribution to the weighted compliance score.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReviewerFindings {
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Serialize)]
struct ReviewRequest {
    text: String,
}

#[derive(Clone)]
pub struct ReviewerClient {
    http: reqwest::Client,
    base_url: String,
}

impl ReviewerClient {
    /// Creates a new instance of [`ReviewerClient`]
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submits extracted document text for semantic compliance review.
    pub async fn check_compliance(&self, text: &str) -> Result<ReviewerFindings, reqwest::Error> {
        let request = ReviewRequest {
            text: text.to_string(),
        };

        let response = self
            .http
            .post(format!("{}/check", self.base_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        response.json::<ReviewerFindings>().await
    }
}
