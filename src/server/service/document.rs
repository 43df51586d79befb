//! Document intake and review-status management. Upload runs the OCR
//! collaborator and stores the extraction alongside the blob reference; an
//! extraction failure is recorded on the row rather than failing the upload.

use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::model::status::DocumentStatus;
use crate::server::{
    data::document::{DocumentRepository, NewDocumentRecord},
    error::Error,
    external::ocr::OcrClient,
};

#[derive(Clone, Debug)]
pub struct NewDocument {
    pub user_id: i32,
    pub application_id: Option<i32>,
    pub file_name: String,
    pub file_type: String,
    pub storage_key: String,
    pub data: Vec<u8>,
}

pub struct DocumentService<'a> {
    db: &'a DatabaseConnection,
    ocr: &'a OcrClient,
}

impl<'a> DocumentService<'a> {
    /// Creates a new instance of [`DocumentService`]
    pub fn new(db: &'a DatabaseConnection, ocr: &'a OcrClient) -> Self {
        Self { db, ocr }
    }

    /// Stores a document record, extracting its text through the OCR
    /// collaborator first. The raw bytes live in the external blob store
    /// under `storage_key`; only the extraction is kept here.
    pub async fn create_document(
        &self,
        new_document: NewDocument,
    ) -> Result<entity::document::Model, Error> {
        let (extracted_text, confidence) = match self
            .ocr
            .extract_text(&new_document.data, &new_document.file_type)
            .await
        {
            Ok(extraction) => {
                if let Some(error) = &extraction.error {
                    warn!(
                        "Text extraction degraded for {}: {}",
                        new_document.file_name, error
                    );
                }
                (extraction.text, extraction.confidence)
            }
            Err(e) => {
                warn!(
                    "Text extraction failed for {}: {}",
                    new_document.file_name, e
                );
                (String::new(), 0.0)
            }
        };

        let document = DocumentRepository::new(self.db)
            .insert(NewDocumentRecord {
                user_id: new_document.user_id,
                application_id: new_document.application_id,
                file_name: &new_document.file_name,
                file_type: &new_document.file_type,
                file_size: new_document.data.len() as i64,
                storage_key: &new_document.storage_key,
                extracted_text: Some(&extracted_text),
                text_confidence: Some(confidence),
                status: DocumentStatus::Pending.as_str(),
            })
            .await?;

        Ok(document)
    }

    pub async fn get_document(&self, document_id: i32) -> Result<entity::document::Model, Error> {
        DocumentRepository::new(self.db)
            .find_by_id(document_id)
            .await?
            .ok_or(Error::DocumentNotFound(document_id))
    }

    pub async fn list_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<entity::document::Model>, Error> {
        Ok(DocumentRepository::new(self.db)
            .list_by_user(user_id)
            .await?)
    }

    /// Manual review decision on a document
    pub async fn update_status(
        &self,
        document_id: i32,
        status: DocumentStatus,
        rejection_reason: Option<&str>,
    ) -> Result<entity::document::Model, Error> {
        let document_repo = DocumentRepository::new(self.db);

        let document = document_repo
            .find_by_id(document_id)
            .await?
            .ok_or(Error::DocumentNotFound(document_id))?;

        Ok(document_repo
            .update_status(document, status.as_str(), rejection_reason)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use crate::model::status::DocumentStatus;
    use crate::server::{
        error::Error,
        external::ocr::TextExtraction,
        service::document::{DocumentService, NewDocument},
        util::test::{
            mockito::mock_ocr_endpoint,
            setup::{create_document_tables, test_setup},
        },
    };

    fn upload() -> NewDocument {
        NewDocument {
            user_id: 2,
            application_id: None,
            file_name: "site-plan.pdf".to_string(),
            file_type: "application/pdf".to_string(),
            storage_key: "documents/2/site-plan.pdf".to_string(),
            data: b"%PDF-1.4 mock bytes".to_vec(),
        }
    }

    mod create_document_tests {
        use super::*;

        /// Expect the extraction to be stored alongside the blob reference
        #[tokio::test]
        async fn test_create_stores_extraction() -> Result<(), DbErr> {
            let mut test = test_setup().await;
            let db = test.state.db.clone();
            create_document_tables(&db).await?;

            let extraction = TextExtraction {
                text: "floor plan with ceiling height 2.5m and room areas".to_string(),
                confidence: 0.87,
                error: None,
            };
            let endpoint = mock_ocr_endpoint(&mut test.server, extraction, 1).await;

            let service = DocumentService::new(&db, &test.state.ocr);
            let document = service.create_document(upload()).await.unwrap();

            assert_eq!(document.status, DocumentStatus::Pending.as_str());
            assert_eq!(
                document.extracted_text.as_deref(),
                Some("floor plan with ceiling height 2.5m and room areas")
            );
            assert_eq!(document.text_confidence, Some(0.87));
            assert_eq!(document.storage_key, "documents/2/site-plan.pdf");

            endpoint.assert_async().await;

            Ok(())
        }

        /// Expect an OCR transport failure to degrade to an empty extraction
        /// instead of failing the upload
        #[tokio::test]
        async fn test_create_survives_ocr_failure() -> Result<(), DbErr> {
            let mut test = test_setup().await;
            let db = test.state.db.clone();
            create_document_tables(&db).await?;

            let endpoint = test
                .server
                .mock("POST", "/extract")
                .with_status(500)
                .expect(1)
                .create_async()
                .await;

            let service = DocumentService::new(&db, &test.state.ocr);
            let document = service.create_document(upload()).await.unwrap();

            assert_eq!(document.extracted_text.as_deref(), Some(""));
            assert_eq!(document.text_confidence, Some(0.0));

            endpoint.assert_async().await;

            Ok(())
        }
    }

    mod update_status_tests {
        use super::*;

        #[tokio::test]
        async fn test_update_status_with_rejection_reason() -> Result<(), DbErr> {
            let mut test = test_setup().await;
            let db = test.state.db.clone();
            create_document_tables(&db).await?;

            let extraction = TextExtraction {
                text: "plan".to_string(),
                confidence: 0.4,
                error: None,
            };
            mock_ocr_endpoint(&mut test.server, extraction, 1).await;

            let service = DocumentService::new(&db, &test.state.ocr);
            let document = service.create_document(upload()).await.unwrap();

            let rejected = service
                .update_status(
                    document.id,
                    DocumentStatus::Rejected,
                    Some("plan is illegible"),
                )
                .await
                .unwrap();

            assert_eq!(rejected.status, DocumentStatus::Rejected.as_str());
            assert_eq!(rejected.rejection_reason.as_deref(), Some("plan is illegible"));

            Ok(())
        }

        /// Expect DocumentNotFound for an unknown id
        #[tokio::test]
        async fn test_update_status_not_found() -> Result<(), DbErr> {
            let test = test_setup().await;
            let db = test.state.db.clone();
            create_document_tables(&db).await?;

            let service = DocumentService::new(&db, &test.state.ocr);
            let result = service
                .update_status(404, DocumentStatus::Approved, None)
                .await;

            assert!(matches!(result, Err(Error::DocumentNotFound(404))));

            Ok(())
        }
    }

    mod list_by_user_tests {
        use super::*;

        #[tokio::test]
        async fn test_list_by_user() -> Result<(), DbErr> {
            let mut test = test_setup().await;
            let db = test.state.db.clone();
            create_document_tables(&db).await?;

            let extraction = TextExtraction {
                text: "plan".to_string(),
                confidence: 0.4,
                error: None,
            };
            mock_ocr_endpoint(&mut test.server, extraction, 2).await;

            let service = DocumentService::new(&db, &test.state.ocr);
            service.create_document(upload()).await.unwrap();
            service.create_document(upload()).await.unwrap();

            let documents = service.list_by_user(2).await.unwrap();
            assert_eq!(documents.len(), 2);

            let none = service.list_by_user(3).await.unwrap();
            assert!(none.is_empty());

            Ok(())
        }
    }
}
