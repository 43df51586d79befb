//! The stage progression state machine.
//!
//! An application's active state is its `current_stage_id`: null before
//! submission, then strictly forward along the stage sequence, and still
//! pointing at the final stage after completion. Advancement is gated on the
//! requirement ledger: a stage closes only when every mandatory requirement
//! is `completed`. The administrative override bypasses gating and records
//! who forced the move.

use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::model::status::{ApplicationStatus, ProgressStatus, RequirementStatus};
use crate::server::{
    data::{
        application::ApplicationRepository, progress::ProgressRepository,
        requirement::RequirementCompletionRepository, stage::StageRepository,
    },
    error::Error,
    service::workflow::sequence::StageSequence,
};

/// Result of comparing a stage's mandatory requirements against the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageCompletion {
    pub is_complete: bool,
    pub total_mandatory: usize,
    pub completed_mandatory: usize,
}

/// What a (possibly attempted) advancement did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Mandatory requirements outstanding; nothing changed.
    Incomplete(StageCompletion),
    /// The stage closed, but the application pointer was elsewhere (a late
    /// correction to an earlier stage, or a concurrent caller already
    /// advanced it). No pointer movement.
    StageClosed,
    /// The application moved to the next stage and its requirements were
    /// seeded.
    Advanced { next_stage_id: i32 },
    /// The final stage closed; the application is complete.
    ApplicationCompleted,
}

pub struct StageProgressionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StageProgressionService<'a> {
    /// Creates a new instance of [`StageProgressionService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the stage catalog into an immutable ordered sequence
    pub async fn load_sequence<C: ConnectionTrait>(
        &self,
        conn: &C,
    ) -> Result<StageSequence, Error> {
        let stages = StageRepository::new(conn).get_all_ordered().await?;
        Ok(StageSequence::new(stages))
    }

    /// Places an application in a stage.
    ///
    /// Idempotent: an existing progress row is reset to `in_progress` and
    /// re-stamped rather than duplicated, and requirement completion rows are
    /// seeded only for requirements that do not already have one.
    pub async fn enter_stage<C: ConnectionTrait>(
        &self,
        conn: &C,
        application_id: i32,
        stage_id: i32,
    ) -> Result<entity::application_progress::Model, Error> {
        let progress_repo = ProgressRepository::new(conn);

        let progress = match progress_repo.find_pair(application_id, stage_id).await? {
            Some(existing) => progress_repo.reset_in_progress(existing).await?,
            None => {
                progress_repo
                    .insert_in_progress(application_id, stage_id)
                    .await?
            }
        };

        let stage_repo = StageRepository::new(conn);
        let completion_repo = RequirementCompletionRepository::new(conn);

        let requirements = stage_repo.requirements_for_stage(stage_id).await?;
        let requirement_ids: Vec<i32> = requirements.iter().map(|r| r.id).collect();

        let existing = completion_repo
            .find_for_requirements(application_id, requirement_ids)
            .await?;

        for requirement in &requirements {
            let already_seeded = existing.iter().any(|c| c.requirement_id == requirement.id);
            if !already_seeded {
                completion_repo
                    .insert_pending(application_id, requirement.id)
                    .await?;
            }
        }

        Ok(progress)
    }

    /// Compares the stage's mandatory requirements against their completion
    /// rows. A stage with zero mandatory requirements is trivially complete.
    pub async fn evaluate_stage_completion<C: ConnectionTrait>(
        &self,
        conn: &C,
        application_id: i32,
        stage_id: i32,
    ) -> Result<StageCompletion, Error> {
        let stage_repo = StageRepository::new(conn);
        let completion_repo = RequirementCompletionRepository::new(conn);

        let mandatory: Vec<entity::stage_requirement::Model> = stage_repo
            .requirements_for_stage(stage_id)
            .await?
            .into_iter()
            .filter(|r| r.is_mandatory)
            .collect();

        let mandatory_ids: Vec<i32> = mandatory.iter().map(|r| r.id).collect();
        let total_mandatory = mandatory_ids.len();

        let completed_mandatory = completion_repo
            .find_for_requirements(application_id, mandatory_ids)
            .await?
            .iter()
            .filter(|c| c.status == RequirementStatus::Completed.as_str())
            .count();

        Ok(StageCompletion {
            is_complete: completed_mandatory >= total_mandatory,
            total_mandatory,
            completed_mandatory,
        })
    }

    /// Closes the stage and moves the application forward when every
    /// mandatory requirement is complete.
    ///
    /// The pointer only moves when the evaluated stage is the application's
    /// current stage; closing an earlier stage (late correction) or a stage a
    /// concurrent caller already advanced past records the closure and
    /// nothing else, so re-evaluation is a safe no-op.
    pub async fn advance_if_complete<C: ConnectionTrait>(
        &self,
        conn: &C,
        application_id: i32,
        stage_id: i32,
    ) -> Result<AdvanceOutcome, Error> {
        let completion = self
            .evaluate_stage_completion(conn, application_id, stage_id)
            .await?;

        if !completion.is_complete {
            return Ok(AdvanceOutcome::Incomplete(completion));
        }

        let application_repo = ApplicationRepository::new(conn);
        let application = application_repo
            .get_by_id(application_id)
            .await?
            .ok_or(Error::ApplicationNotFound(application_id))?;

        let progress_repo = ProgressRepository::new(conn);
        if let Some(progress) = progress_repo.find_pair(application_id, stage_id).await? {
            if progress.status != ProgressStatus::Completed.as_str() {
                progress_repo.mark_completed(progress, None, None).await?;
            }
        }

        if application.current_stage_id != Some(stage_id) {
            return Ok(AdvanceOutcome::StageClosed);
        }

        let sequence = self.load_sequence(conn).await?;

        match sequence.next_after(stage_id) {
            Some(next) => {
                let next_stage_id = next.id;

                application_repo
                    .set_current_stage(application, Some(next_stage_id))
                    .await?;
                self.enter_stage(conn, application_id, next_stage_id).await?;

                info!(
                    "Application {} advanced from stage {} to stage {}",
                    application_id, stage_id, next_stage_id
                );

                Ok(AdvanceOutcome::Advanced { next_stage_id })
            }
            None => {
                // Final stage: the pointer stays on it.
                application_repo
                    .update_status(application, ApplicationStatus::Completed.as_str())
                    .await?;

                info!(
                    "Application {} completed the final stage {}",
                    application_id, stage_id
                );

                Ok(AdvanceOutcome::ApplicationCompleted)
            }
        }
    }

    /// The requirement-change trigger: resolves the requirement's owning
    /// stage and re-evaluates only that stage, looking forward from it.
    pub async fn on_requirement_changed<C: ConnectionTrait>(
        &self,
        conn: &C,
        application_id: i32,
        requirement_id: i32,
    ) -> Result<AdvanceOutcome, Error> {
        let requirement = StageRepository::new(conn)
            .requirement_by_id(requirement_id)
            .await?
            .ok_or(Error::RequirementNotFound {
                application_id,
                requirement_id,
            })?;

        self.advance_if_complete(conn, application_id, requirement.stage_id)
            .await
    }

    /// Administrative override: closes the current stage without requirement
    /// gating, recording who forced it and why, then performs the same
    /// next-stage move as the gated path.
    pub async fn advance_stage_manually(
        &self,
        application_id: i32,
        completed_by: Option<i32>,
        notes: Option<&str>,
    ) -> Result<AdvanceOutcome, Error> {
        let txn = self.db.begin().await?;

        let application_repo = ApplicationRepository::new(&txn);
        let application = application_repo
            .get_by_id(application_id)
            .await?
            .ok_or(Error::ApplicationNotFound(application_id))?;

        let current_stage_id = application
            .current_stage_id
            .ok_or(Error::NoCurrentStage(application_id))?;

        let progress_repo = ProgressRepository::new(&txn);
        match progress_repo
            .find_pair(application_id, current_stage_id)
            .await?
        {
            Some(progress) => {
                progress_repo
                    .mark_completed(progress, completed_by, notes)
                    .await?;
            }
            None => {
                let progress = progress_repo
                    .insert_in_progress(application_id, current_stage_id)
                    .await?;
                progress_repo
                    .mark_completed(progress, completed_by, notes)
                    .await?;
            }
        }

        let sequence = self.load_sequence(&txn).await?;

        let outcome = match sequence.next_after(current_stage_id) {
            Some(next) => {
                let next_stage_id = next.id;

                application_repo
                    .set_current_stage(application, Some(next_stage_id))
                    .await?;
                self.enter_stage(&txn, application_id, next_stage_id).await?;

                AdvanceOutcome::Advanced { next_stage_id }
            }
            None => {
                application_repo
                    .update_status(application, ApplicationStatus::Completed.as_str())
                    .await?;

                AdvanceOutcome::ApplicationCompleted
            }
        };

        txn.commit().await?;

        info!(
            "Application {} stage {} manually closed by {:?} at {}",
            application_id,
            current_stage_id,
            completed_by,
            Utc::now()
        );

        Ok(outcome)
    }
}
