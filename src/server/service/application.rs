//! Application lifecycle orchestration: creation (seeding the first stage on
//! submission), dashboard reads, status updates, and deletion.

use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::model::status::{ApplicationStatus, RequirementStatus};
use crate::server::{
    data::{
        application::{ApplicationRepository, NewApplicationRecord},
        requirement::RequirementCompletionRepository,
        stage::StageRepository,
    },
    error::Error,
    service::workflow::progression::StageProgressionService,
};

#[derive(Clone, Debug)]
pub struct NewApplication {
    pub user_id: i32,
    pub stand_number: String,
    pub district: Option<String>,
    pub construction_type: Option<String>,
    pub project_description: Option<String>,
    pub owner_name: String,
    pub submit: bool,
}

/// An application joined with its current stage and the requirement tally
/// behind the applicant dashboard.
#[derive(Clone, Debug)]
pub struct ApplicationOverview {
    pub application: entity::application::Model,
    pub current_stage: Option<entity::stage::Model>,
    pub completed_requirements: u64,
    pub total_requirements: u64,
}

pub struct ApplicationLifecycleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApplicationLifecycleService<'a> {
    /// Creates a new instance of [`ApplicationLifecycleService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an application. Submitted applications are atomically placed
    /// in the first workflow stage with their requirement rows seeded; if no
    /// stages are configured the application is stored without a current
    /// stage.
    pub async fn create_application(
        &self,
        new_application: NewApplication,
    ) -> Result<entity::application::Model, Error> {
        let status = if new_application.submit {
            ApplicationStatus::Submitted
        } else {
            ApplicationStatus::Pending
        };

        let txn = self.db.begin().await?;

        let application_repo = ApplicationRepository::new(&txn);
        let mut application = application_repo
            .create(NewApplicationRecord {
                user_id: new_application.user_id,
                status: status.as_str(),
                stand_number: &new_application.stand_number,
                district: new_application.district.as_deref(),
                construction_type: new_application.construction_type.as_deref(),
                project_description: new_application.project_description.as_deref(),
                owner_name: &new_application.owner_name,
            })
            .await?;

        if status == ApplicationStatus::Submitted {
            let progression = StageProgressionService::new(self.db);
            let sequence = progression.load_sequence(&txn).await?;

            if let Some(first_stage) = sequence.first() {
                let first_stage_id = first_stage.id;

                application = application_repo
                    .set_current_stage(application, Some(first_stage_id))
                    .await?;
                progression
                    .enter_stage(&txn, application.id, first_stage_id)
                    .await?;
            }
        }

        txn.commit().await?;

        info!(
            "Created application {} for user {} with status {}",
            application.id, application.user_id, application.status
        );

        Ok(application)
    }

    pub async fn get_application(
        &self,
        application_id: i32,
    ) -> Result<entity::application::Model, Error> {
        ApplicationRepository::new(self.db)
            .get_by_id(application_id)
            .await?
            .ok_or(Error::ApplicationNotFound(application_id))
    }

    /// Lists a user's applications with their current stage and the
    /// requirement progress counts for it.
    pub async fn list_by_user(&self, user_id: i32) -> Result<Vec<ApplicationOverview>, Error> {
        let application_repo = ApplicationRepository::new(self.db);
        let stage_repo = StageRepository::new(self.db);
        let completion_repo = RequirementCompletionRepository::new(self.db);

        let applications = application_repo.list_by_user(user_id).await?;

        let mut overviews = Vec::with_capacity(applications.len());

        for application in applications {
            let (current_stage, completed, total) = match application.current_stage_id {
                Some(stage_id) => {
                    let stage = stage_repo.get_by_id(stage_id).await?;
                    let requirements = stage_repo.requirements_for_stage(stage_id).await?;
                    let requirement_ids: Vec<i32> = requirements.iter().map(|r| r.id).collect();
                    let total = requirement_ids.len() as u64;

                    let completed = completion_repo
                        .find_for_requirements(application.id, requirement_ids)
                        .await?
                        .iter()
                        .filter(|c| c.status == RequirementStatus::Completed.as_str())
                        .count() as u64;

                    (stage, completed, total)
                }
                None => (None, 0, 0),
            };

            overviews.push(ApplicationOverview {
                application,
                current_stage,
                completed_requirements: completed,
                total_requirements: total,
            });
        }

        Ok(overviews)
    }

    pub async fn update_status(
        &self,
        application_id: i32,
        status: ApplicationStatus,
    ) -> Result<entity::application::Model, Error> {
        let application_repo = ApplicationRepository::new(self.db);

        let application = application_repo
            .get_by_id(application_id)
            .await?
            .ok_or(Error::ApplicationNotFound(application_id))?;

        Ok(application_repo
            .update_status(application, status.as_str())
            .await?)
    }

    /// Deletes an application and, by cascade, its owned workflow rows
    pub async fn delete_application(&self, application_id: i32) -> Result<(), Error> {
        let result = ApplicationRepository::new(self.db)
            .delete(application_id)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::ApplicationNotFound(application_id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseConnection, DbErr};

    use crate::model::status::{ApplicationStatus, ProgressStatus, RequirementStatus};
    use crate::server::{
        data::{progress::ProgressRepository, requirement::RequirementCompletionRepository},
        error::Error,
        service::{
            application::{ApplicationLifecycleService, NewApplication},
            workflow::ledger::{RequirementLedgerService, UpdateRequirement},
        },
        util::test::{
            seed::{seed_requirement, seed_stage},
            setup::{create_workflow_tables, test_setup},
        },
    };

    async fn setup() -> Result<DatabaseConnection, DbErr> {
        let test = test_setup().await;
        create_workflow_tables(&test.state.db).await?;
        Ok(test.state.db)
    }

    fn new_application(submit: bool) -> NewApplication {
        NewApplication {
            user_id: 4,
            stand_number: "312".to_string(),
            district: Some("Belvedere".to_string()),
            construction_type: Some("residential".to_string()),
            project_description: Some("Double storey dwelling".to_string()),
            owner_name: "K. Marufu".to_string(),
            submit,
        }
    }

    mod create_application_tests {
        use super::*;

        /// Expect a pending application to stay outside the workflow
        #[tokio::test]
        async fn test_pending_application_has_no_stage() -> Result<(), DbErr> {
            let db = setup().await?;
            let lifecycle = ApplicationLifecycleService::new(&db);

            seed_stage(&db, 1, "Application Submission").await?;

            let application = lifecycle
                .create_application(new_application(false))
                .await
                .unwrap();

            assert_eq!(application.status, ApplicationStatus::Pending.as_str());
            assert!(application.current_stage_id.is_none());

            let progress = ProgressRepository::new(&db)
                .find_by_application(application.id)
                .await?;
            assert!(progress.is_empty());

            Ok(())
        }

        /// Expect submission to seed the first stage and its requirement rows
        #[tokio::test]
        async fn test_submission_seeds_first_stage() -> Result<(), DbErr> {
            let db = setup().await?;
            let lifecycle = ApplicationLifecycleService::new(&db);

            let first = seed_stage(&db, 1, "Application Submission").await?;
            seed_stage(&db, 2, "Document Verification").await?;
            seed_requirement(&db, first.id, "form", "Application Form", true).await?;
            seed_requirement(&db, first.id, "document", "Property Deed", true).await?;

            let application = lifecycle
                .create_application(new_application(true))
                .await
                .unwrap();

            assert_eq!(application.status, ApplicationStatus::Submitted.as_str());
            assert_eq!(application.current_stage_id, Some(first.id));

            let progress = ProgressRepository::new(&db)
                .find_by_application(application.id)
                .await?;
            assert_eq!(progress.len(), 1);
            assert_eq!(progress[0].stage_id, first.id);
            assert_eq!(progress[0].status, ProgressStatus::InProgress.as_str());

            let completions = RequirementCompletionRepository::new(&db)
                .find_by_application(application.id)
                .await?;
            assert_eq!(completions.len(), 2);
            assert!(completions
                .iter()
                .all(|c| c.status == RequirementStatus::Pending.as_str()));

            Ok(())
        }

        /// Expect submission with an empty stage catalog to leave the
        /// application without a current stage
        #[tokio::test]
        async fn test_submission_without_stages() -> Result<(), DbErr> {
            let db = setup().await?;
            let lifecycle = ApplicationLifecycleService::new(&db);

            let application = lifecycle
                .create_application(new_application(true))
                .await
                .unwrap();

            assert_eq!(application.status, ApplicationStatus::Submitted.as_str());
            assert!(application.current_stage_id.is_none());

            Ok(())
        }
    }

    mod list_by_user_tests {
        use super::*;

        /// Expect the overview to carry current-stage and requirement counts
        #[tokio::test]
        async fn test_overview_counts() -> Result<(), DbErr> {
            let db = setup().await?;
            let lifecycle = ApplicationLifecycleService::new(&db);
            let ledger = RequirementLedgerService::new(&db);

            let first = seed_stage(&db, 1, "Application Submission").await?;
            let form = seed_requirement(&db, first.id, "form", "Application Form", true).await?;
            seed_requirement(&db, first.id, "document", "Property Deed", true).await?;

            let application = lifecycle
                .create_application(new_application(true))
                .await
                .unwrap();

            ledger
                .update_requirement_status(UpdateRequirement {
                    application_id: application.id,
                    requirement_id: form.id,
                    status: RequirementStatus::Completed,
                    notes: None,
                    reference_id: None,
                    verified_by: None,
                })
                .await
                .unwrap();

            let overviews = lifecycle.list_by_user(4).await.unwrap();

            assert_eq!(overviews.len(), 1);
            let overview = &overviews[0];
            assert_eq!(
                overview.current_stage.as_ref().map(|s| s.id),
                Some(first.id)
            );
            assert_eq!(overview.completed_requirements, 1);
            assert_eq!(overview.total_requirements, 2);

            Ok(())
        }
    }

    mod update_status_tests {
        use super::*;

        #[tokio::test]
        async fn test_update_status() -> Result<(), DbErr> {
            let db = setup().await?;
            let lifecycle = ApplicationLifecycleService::new(&db);

            let application = lifecycle
                .create_application(new_application(false))
                .await
                .unwrap();

            let updated = lifecycle
                .update_status(application.id, ApplicationStatus::Rejected)
                .await
                .unwrap();

            assert_eq!(updated.status, ApplicationStatus::Rejected.as_str());

            Ok(())
        }

        /// Expect ApplicationNotFound for an unknown id
        #[tokio::test]
        async fn test_update_status_not_found() -> Result<(), DbErr> {
            let db = setup().await?;
            let lifecycle = ApplicationLifecycleService::new(&db);

            let result = lifecycle
                .update_status(404, ApplicationStatus::Rejected)
                .await;

            assert!(matches!(result, Err(Error::ApplicationNotFound(404))));

            Ok(())
        }
    }

    mod delete_application_tests {
        use super::*;

        #[tokio::test]
        async fn test_delete_application() -> Result<(), DbErr> {
            let db = setup().await?;
            let lifecycle = ApplicationLifecycleService::new(&db);

            let application = lifecycle
                .create_application(new_application(false))
                .await
                .unwrap();

            lifecycle.delete_application(application.id).await.unwrap();

            let result = lifecycle.get_application(application.id).await;
            assert!(matches!(result, Err(Error::ApplicationNotFound(_))));

            Ok(())
        }

        /// Expect NotFound when deleting an application that does not exist
        #[tokio::test]
        async fn test_delete_missing_application() -> Result<(), DbErr> {
            let db = setup().await?;
            let lifecycle = ApplicationLifecycleService::new(&db);

            let result = lifecycle.delete_application(404).await;

            assert!(matches!(result, Err(Error::ApplicationNotFound(404))));

            Ok(())
        }
    }
}
