//! The requirement ledger: the only writer of requirement completion status.
//!
//! Every update runs the requirement-change trigger inside the same
//! transaction, so a requirement update either leaves the stage untouched or
//! atomically advances the application.

use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::model::status::RequirementStatus;
use crate::server::{
    data::requirement::{RequirementCompletionRepository, RequirementUpdate},
    error::Error,
    service::workflow::progression::{AdvanceOutcome, StageProgressionService},
};

/// One requirement status change.
#[derive(Clone, Debug)]
pub struct UpdateRequirement {
    pub application_id: i32,
    pub requirement_id: i32,
    pub status: RequirementStatus,
    pub notes: Option<String>,
    pub reference_id: Option<i32>,
    pub verified_by: Option<i32>,
}

pub struct RequirementLedgerService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RequirementLedgerService<'a> {
    /// Creates a new instance of [`RequirementLedgerService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Updates one requirement completion row and re-evaluates its owning
    /// stage, all in a single transaction.
    pub async fn update_requirement_status(
        &self,
        update: UpdateRequirement,
    ) -> Result<(entity::requirement_completion::Model, AdvanceOutcome), Error> {
        let txn = self.db.begin().await?;

        let result = self.apply(&txn, update).await?;

        txn.commit().await?;

        Ok(result)
    }

    /// The ledger write itself, for callers that already hold a transaction
    /// (inspection completion writes through here).
    pub async fn apply<C: ConnectionTrait>(
        &self,
        conn: &C,
        update: UpdateRequirement,
    ) -> Result<(entity::requirement_completion::Model, AdvanceOutcome), Error> {
        let completion_repo = RequirementCompletionRepository::new(conn);

        let completion = completion_repo
            .find_pair(update.application_id, update.requirement_id)
            .await?
            .ok_or(Error::RequirementNotFound {
                application_id: update.application_id,
                requirement_id: update.requirement_id,
            })?;

        let completed_at = match update.status {
            RequirementStatus::Completed => Some(Utc::now().naive_utc()),
            _ => None,
        };

        let updated = completion_repo
            .apply_update(
                completion,
                RequirementUpdate {
                    status: update.status.as_str(),
                    notes: update.notes.as_deref(),
                    reference_id: update.reference_id,
                    verified_by: update.verified_by,
                    completed_at,
                },
            )
            .await?;

        let progression = StageProgressionService::new(self.db);
        let outcome = progression
            .on_requirement_changed(conn, update.application_id, update.requirement_id)
            .await?;

        Ok((updated, outcome))
    }
}
