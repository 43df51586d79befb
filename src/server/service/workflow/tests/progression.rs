use sea_orm::{DatabaseConnection, DbErr};

use crate::model::status::{ApplicationStatus, ProgressStatus, RequirementStatus};
use crate::server::{
    data::{progress::ProgressRepository, requirement::RequirementCompletionRepository},
    error::Error,
    service::{
        application::{ApplicationLifecycleService, NewApplication},
        workflow::{
            ledger::{RequirementLedgerService, UpdateRequirement},
            progression::{AdvanceOutcome, StageProgressionService},
        },
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

fn new_application(user_id: i32, submit: bool) -> NewApplication {
    NewApplication {
        user_id,
        stand_number: "2048".to_string(),
        district: Some("Mabelreign".to_string()),
        construction_type: Some("residential".to_string()),
        project_description: Some("Four-roomed dwelling house".to_string()),
        owner_name: "R. Chikafu".to_string(),
        submit,
    }
}

fn complete(application_id: i32, requirement_id: i32) -> UpdateRequirement {
    UpdateRequirement {
        application_id,
        requirement_id,
        status: RequirementStatus::Completed,
        notes: None,
        reference_id: None,
        verified_by: Some(7),
    }
}

/// Inserts an application directly, bypassing lifecycle submission
async fn seed_submitted(db: &DatabaseConnection) -> entity::application::Model {
    crate::server::util::test::seed::seed_application(db, 1)
        .await
        .unwrap()
}

mod enter_stage_tests {
    use super::*;

    /// Expect entering a stage twice to keep one progress row and one
    /// completion row per requirement
    #[tokio::test]
    async fn test_enter_stage_idempotent() -> Result<(), DbErr> {
        let db = setup().await?;
        let progression = StageProgressionService::new(&db);

        let stage = seed_stage(&db, 1, "Application Submission").await?;
        seed_requirement(&db, stage.id, "form", "Application Form", true).await?;
        seed_requirement(&db, stage.id, "document", "Property Deed", true).await?;

        let application = super::seed_submitted(&db).await;

        progression
            .enter_stage(&db, application.id, stage.id)
            .await
            .unwrap();
        progression
            .enter_stage(&db, application.id, stage.id)
            .await
            .unwrap();

        let progress_rows = ProgressRepository::new(&db)
            .find_by_application(application.id)
            .await?;
        let completion_rows = RequirementCompletionRepository::new(&db)
            .find_by_application(application.id)
            .await?;

        assert_eq!(progress_rows.len(), 1);
        assert_eq!(progress_rows[0].status, ProgressStatus::InProgress.as_str());
        assert_eq!(completion_rows.len(), 2);

        Ok(())
    }
}

mod evaluate_stage_completion_tests {
    use super::*;

    /// Expect a stage with zero mandatory requirements to be trivially
    /// complete
    #[tokio::test]
    async fn test_zero_mandatory_is_complete() -> Result<(), DbErr> {
        let db = setup().await?;
        let progression = StageProgressionService::new(&db);

        let stage = seed_stage(&db, 1, "Approval").await?;
        seed_requirement(&db, stage.id, "document", "Optional Letter", false).await?;

        let application = seed_submitted(&db).await;

        let completion = progression
            .evaluate_stage_completion(&db, application.id, stage.id)
            .await
            .unwrap();

        assert!(completion.is_complete);
        assert_eq!(completion.total_mandatory, 0);

        Ok(())
    }

    /// Expect mandatory counts to reflect only mandatory requirements
    #[tokio::test]
    async fn test_counts_mandatory_only() -> Result<(), DbErr> {
        let db = setup().await?;
        let progression = StageProgressionService::new(&db);

        let stage = seed_stage(&db, 1, "Application Submission").await?;
        seed_requirement(&db, stage.id, "form", "Application Form", true).await?;
        seed_requirement(&db, stage.id, "document", "Property Deed", true).await?;
        seed_requirement(&db, stage.id, "document", "Impact Assessment", false).await?;

        let application = seed_submitted(&db).await;
        progression
            .enter_stage(&db, application.id, stage.id)
            .await
            .unwrap();

        let completion = progression
            .evaluate_stage_completion(&db, application.id, stage.id)
            .await
            .unwrap();

        assert!(!completion.is_complete);
        assert_eq!(completion.total_mandatory, 2);
        assert_eq!(completion.completed_mandatory, 0);

        Ok(())
    }
}

mod gating_tests {
    use super::*;

    /// Scenario from the workflow requirements: two mandatory plus one
    /// optional requirement. Completing only the optional one leaves the
    /// stage and `current_stage_id` unchanged; completing both mandatory
    /// ones advances to stage 2 and seeds its completion rows.
    #[tokio::test]
    async fn test_optional_does_not_advance_mandatory_does() -> Result<(), DbErr> {
        let db = setup().await?;
        let lifecycle = ApplicationLifecycleService::new(&db);
        let ledger = RequirementLedgerService::new(&db);

        let first = seed_stage(&db, 1, "Application Submission").await?;
        let second = seed_stage(&db, 2, "Document Verification").await?;
        let mandatory_a = seed_requirement(&db, first.id, "form", "Application Form", true).await?;
        let mandatory_b = seed_requirement(&db, first.id, "document", "Property Deed", true).await?;
        let optional = seed_requirement(&db, first.id, "document", "Site Photos", false).await?;
        seed_requirement(&db, second.id, "document", "Building Plans", true).await?;

        let application = lifecycle
            .create_application(new_application(1, true))
            .await
            .unwrap();
        assert_eq!(application.current_stage_id, Some(first.id));

        // Optional requirement alone must not advance the stage.
        let (_, outcome) = ledger
            .update_requirement_status(complete(application.id, optional.id))
            .await
            .unwrap();
        assert!(matches!(outcome, AdvanceOutcome::Incomplete(_)));

        let unchanged = lifecycle.get_application(application.id).await.unwrap();
        assert_eq!(unchanged.current_stage_id, Some(first.id));

        // First mandatory requirement: still gated.
        let (_, outcome) = ledger
            .update_requirement_status(complete(application.id, mandatory_a.id))
            .await
            .unwrap();
        assert!(matches!(outcome, AdvanceOutcome::Incomplete(_)));

        // Second mandatory requirement completes the stage and advances.
        let (_, outcome) = ledger
            .update_requirement_status(complete(application.id, mandatory_b.id))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            AdvanceOutcome::Advanced {
                next_stage_id: second.id
            }
        );

        let advanced = lifecycle.get_application(application.id).await.unwrap();
        assert_eq!(advanced.current_stage_id, Some(second.id));
        assert_eq!(advanced.status, ApplicationStatus::Submitted.as_str());

        // Stage 2's requirement rows were seeded on entry.
        let completions = RequirementCompletionRepository::new(&db)
            .find_by_application(application.id)
            .await?;
        assert_eq!(completions.len(), 4);

        Ok(())
    }

    /// Expect the ordering invariant: progress rows sorted by stage order
    /// match the order the stages were entered
    #[tokio::test]
    async fn test_progress_rows_follow_stage_order() -> Result<(), DbErr> {
        let db = setup().await?;
        let lifecycle = ApplicationLifecycleService::new(&db);
        let ledger = RequirementLedgerService::new(&db);

        let first = seed_stage(&db, 1, "Application Submission").await?;
        let second = seed_stage(&db, 2, "Document Verification").await?;
        let third = seed_stage(&db, 3, "Plan Review").await?;
        let req_a = seed_requirement(&db, first.id, "form", "Application Form", true).await?;
        let req_b = seed_requirement(&db, second.id, "document", "Building Plans", true).await?;
        seed_requirement(&db, third.id, "approval", "Zoning Compliance", true).await?;

        let application = lifecycle
            .create_application(new_application(1, true))
            .await
            .unwrap();

        ledger
            .update_requirement_status(complete(application.id, req_a.id))
            .await
            .unwrap();
        ledger
            .update_requirement_status(complete(application.id, req_b.id))
            .await
            .unwrap();

        let mut progress = ProgressRepository::new(&db)
            .find_by_application(application.id)
            .await?;
        progress.sort_by_key(|p| p.stage_id);

        let entered: Vec<i32> = progress.iter().map(|p| p.stage_id).collect();
        assert_eq!(entered, vec![first.id, second.id, third.id]);

        let mut by_start = progress.clone();
        by_start.sort_by_key(|p| (p.started_at, p.stage_id));
        let started_order: Vec<i32> = by_start.iter().map(|p| p.stage_id).collect();
        assert_eq!(started_order, entered);

        Ok(())
    }

    /// Expect the terminal invariant: finishing the last stage completes the
    /// application, keeps `current_stage_id` on the final stage, and enters
    /// nothing further
    #[tokio::test]
    async fn test_terminal_stage_completes_application() -> Result<(), DbErr> {
        let db = setup().await?;
        let lifecycle = ApplicationLifecycleService::new(&db);
        let ledger = RequirementLedgerService::new(&db);

        let first = seed_stage(&db, 1, "Final Inspection").await?;
        let last = seed_stage(&db, 2, "Certificate of Occupancy").await?;
        let req_a = seed_requirement(&db, first.id, "inspection", "Final Inspection", true).await?;
        let req_b = seed_requirement(&db, last.id, "approval", "Certificate Approval", true).await?;

        let application = lifecycle
            .create_application(new_application(1, true))
            .await
            .unwrap();

        ledger
            .update_requirement_status(complete(application.id, req_a.id))
            .await
            .unwrap();
        let (_, outcome) = ledger
            .update_requirement_status(complete(application.id, req_b.id))
            .await
            .unwrap();

        assert_eq!(outcome, AdvanceOutcome::ApplicationCompleted);

        let finished = lifecycle.get_application(application.id).await.unwrap();
        assert_eq!(finished.status, ApplicationStatus::Completed.as_str());
        assert_eq!(finished.current_stage_id, Some(last.id));

        let progress = ProgressRepository::new(&db)
            .find_by_application(application.id)
            .await?;
        assert_eq!(progress.len(), 2);
        assert!(progress
            .iter()
            .all(|p| p.status == ProgressStatus::Completed.as_str()));

        Ok(())
    }

    /// Expect re-evaluating an already-closed stage to be a safe no-op (the
    /// losing side of a concurrent completion race)
    #[tokio::test]
    async fn test_reevaluation_after_advance_is_noop() -> Result<(), DbErr> {
        let db = setup().await?;
        let lifecycle = ApplicationLifecycleService::new(&db);
        let ledger = RequirementLedgerService::new(&db);
        let progression = StageProgressionService::new(&db);

        let first = seed_stage(&db, 1, "Application Submission").await?;
        let second = seed_stage(&db, 2, "Document Verification").await?;
        let requirement = seed_requirement(&db, first.id, "form", "Application Form", true).await?;
        seed_requirement(&db, second.id, "document", "Building Plans", true).await?;

        let application = lifecycle
            .create_application(new_application(1, true))
            .await
            .unwrap();

        ledger
            .update_requirement_status(complete(application.id, requirement.id))
            .await
            .unwrap();

        let outcome = progression
            .advance_if_complete(&db, application.id, first.id)
            .await
            .unwrap();
        assert_eq!(outcome, AdvanceOutcome::StageClosed);

        let unchanged = lifecycle.get_application(application.id).await.unwrap();
        assert_eq!(unchanged.current_stage_id, Some(second.id));

        Ok(())
    }

    /// Expect a late correction to an earlier stage's requirement to never
    /// move the application backwards
    #[tokio::test]
    async fn test_late_correction_does_not_move_pointer() -> Result<(), DbErr> {
        let db = setup().await?;
        let lifecycle = ApplicationLifecycleService::new(&db);
        let ledger = RequirementLedgerService::new(&db);
        let progression = StageProgressionService::new(&db);

        let first = seed_stage(&db, 1, "Application Submission").await?;
        seed_stage(&db, 2, "Document Verification").await?;
        let third = seed_stage(&db, 3, "Plan Review").await?;
        let early = seed_requirement(&db, first.id, "form", "Application Form", true).await?;
        seed_requirement(&db, third.id, "approval", "Zoning Compliance", true).await?;

        let application = lifecycle
            .create_application(new_application(1, true))
            .await
            .unwrap();

        // Push the application to stage 3 through the override path.
        progression
            .advance_stage_manually(application.id, Some(99), Some("fees waived"))
            .await
            .unwrap();
        progression
            .advance_stage_manually(application.id, Some(99), None)
            .await
            .unwrap();

        let ahead = lifecycle.get_application(application.id).await.unwrap();
        assert_eq!(ahead.current_stage_id, Some(third.id));

        // Correct the stage-1 requirement afterwards.
        let (_, outcome) = ledger
            .update_requirement_status(complete(application.id, early.id))
            .await
            .unwrap();
        assert_eq!(outcome, AdvanceOutcome::StageClosed);

        let unmoved = lifecycle.get_application(application.id).await.unwrap();
        assert_eq!(unmoved.current_stage_id, Some(third.id));

        Ok(())
    }
}

mod advance_stage_manually_tests {
    use super::*;

    /// Expect the override to close the stage with attribution and advance
    /// without requirement gating
    #[tokio::test]
    async fn test_manual_advance_bypasses_gating() -> Result<(), DbErr> {
        let db = setup().await?;
        let lifecycle = ApplicationLifecycleService::new(&db);
        let progression = StageProgressionService::new(&db);

        let first = seed_stage(&db, 1, "Application Submission").await?;
        let second = seed_stage(&db, 2, "Document Verification").await?;
        seed_requirement(&db, first.id, "form", "Application Form", true).await?;

        let application = lifecycle
            .create_application(new_application(1, true))
            .await
            .unwrap();

        let outcome = progression
            .advance_stage_manually(application.id, Some(42), Some("documents sighted in person"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AdvanceOutcome::Advanced {
                next_stage_id: second.id
            }
        );

        let progress = ProgressRepository::new(&db)
            .find_pair(application.id, first.id)
            .await?
            .unwrap();
        assert_eq!(progress.status, ProgressStatus::Completed.as_str());
        assert_eq!(progress.completed_by, Some(42));
        assert_eq!(
            progress.notes.as_deref(),
            Some("documents sighted in person")
        );

        Ok(())
    }

    /// Expect NoCurrentStage for an application that was never submitted
    #[tokio::test]
    async fn test_manual_advance_requires_current_stage() -> Result<(), DbErr> {
        let db = setup().await?;
        let progression = StageProgressionService::new(&db);

        seed_stage(&db, 1, "Application Submission").await?;
        let application = seed_submitted(&db).await;

        let result = progression
            .advance_stage_manually(application.id, None, None)
            .await;

        assert!(matches!(result, Err(Error::NoCurrentStage(_))));

        Ok(())
    }
}
