use mockito::{Mock, ServerGuard};

use crate::server::external::{ocr::TextExtraction, reviewer::ReviewerFindings};

/// Provides a mock endpoint for the semantic compliance reviewer
pub async fn mock_reviewer_endpoint(
    server: &mut ServerGuard,
    findings: ReviewerFindings,
    expected_requests: usize,
) -> Mock {
    server
        .mock("POST", "/check")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::to_string(&findings).unwrap())
        .expect(expected_requests)
        .create_async()
        .await
}

/// Provides a reviewer endpoint that always fails, for degradation tests
pub async fn mock_reviewer_failure(server: &mut ServerGuard, expected_requests: usize) -> Mock {
    server
        .mock("POST", "/check")
        .with_status(503)
        .expect(expected_requests)
        .create_async()
        .await
}

/// Provides a mock endpoint for the OCR text-extraction collaborator
pub async fn mock_ocr_endpoint(
    server: &mut ServerGuard,
    extraction: TextExtraction,
    expected_requests: usize,
) -> Mock {
    server
        .mock("POST", "/extract")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::to_string(&extraction).unwrap())
        .expect(expected_requests)
        .create_async()
        .await
}
