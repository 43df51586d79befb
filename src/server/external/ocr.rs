use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// Text extraction result returned by the OCR collaborator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextExtraction {
    pub text: String,
    pub confidence: f64,
    pub error: Option<String>,
}

#[derive(Serialize)]
struct ExtractRequest {
    mime_type: String,
    data: String,
}

#[derive(Clone)]
pub struct OcrClient {
    http: reqwest::Client,
    base_url: String,
}

impl OcrClient {
    /// Creates a new instance of [`OcrClient`]
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submits document bytes for text extraction.
    ///
    /// Extraction failures the collaborator can describe come back inside
    /// [`TextExtraction::error`]; transport failures surface as `Err` and are
    /// downgraded by the caller to an empty extraction.
    pub async fn extract_text(
        &self,
        file_bytes: &[u8],
        mime_type: &str,
    ) -> Result<TextExtraction, reqwest::Error> {
        let request = ExtractRequest {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(file_bytes),
        };

        let response = self
            .http
            .post(format!("{}/extract", self.base_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        response.json::<TextExtraction>().await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{OcrClient, TextExtraction};

    /// Expect the decoded extraction when the collaborator responds
    #[tokio::test]
    async fn test_extract_text_success() {
        let mut server = mockito::Server::new_async().await;

        let body = serde_json::to_string(&TextExtraction {
            text: "floor plan with ceiling height 2.5m".to_string(),
            confidence: 0.9,
            error: None,
        })
        .unwrap();

        let endpoint = server
            .mock("POST", "/extract")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(1)
            .create_async()
            .await;

        let client = OcrClient::new(&server.url(), Duration::from_secs(2)).unwrap();
        let result = client.extract_text(b"%PDF-1.4", "application/pdf").await;

        assert!(result.is_ok());
        let extraction = result.unwrap();
        assert_eq!(extraction.text, "floor plan with ceiling height 2.5m");
        assert!(extraction.error.is_none());

        endpoint.assert_async().await;
    }

    /// Expect Err when the collaborator returns a server error
    #[tokio::test]
    async fn test_extract_text_error() {
        let mut server = mockito::Server::new_async().await;

        let endpoint = server
            .mock("POST", "/extract")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let client = OcrClient::new(&server.url(), Duration::from_secs(2)).unwrap();
        let result = client.extract_text(b"bytes", "image/png").await;

        assert!(result.is_err());

        endpoint.assert_async().await;
    }
}
