//! HTTP clients for the external collaborators: the OCR text-extraction
//! service and the semantic compliance reviewer. Both carry their own request
//! timeout; callers degrade gracefully when a collaborator fails.

pub mod ocr;
pub mod reviewer;
