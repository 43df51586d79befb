//! Inspector assignment and inspection schedule lifecycle.
//!
//! Selection is load-balancing, not booking: the least-loaded qualified
//! inspector for the requested date wins, ties broken by name. Completing an
//! inspection writes through the requirement ledger so the stage machine can
//! advance in the same transaction.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DatabaseConnection, IntoActiveModel,
    TransactionTrait,
};
use tracing::info;

use crate::model::status::{RequirementStatus, ScheduleStatus};
use crate::server::{
    data::{
        application::ApplicationRepository,
        inspection::{InspectionScheduleRepository, NewScheduleRecord},
        inspector::{InspectionTypeRepository, InspectorRepository},
        requirement::RequirementCompletionRepository,
        stage::StageRepository,
    },
    error::Error,
    service::workflow::{
        ledger::{RequirementLedgerService, UpdateRequirement},
        progression::StageProgressionService,
    },
};

/// Requirement type completed automatically when a stage's inspection is
/// conducted.
static INSPECTION_REQUIREMENT_TYPE: &str = "inspection";

/// An inspector paired with their same-day assignment count.
#[derive(Clone, Debug)]
pub struct InspectorLoad {
    pub inspector: entity::inspector::Model,
    pub scheduled_count: u64,
}

#[derive(Clone, Debug)]
pub struct NewSchedule {
    pub application_id: i32,
    pub inspector_id: i32,
    pub stage_id: Option<i32>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub notes: Option<String>,
    pub created_by: Option<i32>,
}

#[derive(Clone, Debug, Default)]
pub struct UpdateSchedule {
    pub inspector_id: Option<i32>,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<NaiveTime>,
    pub status: Option<ScheduleStatus>,
    pub notes: Option<String>,
}

pub struct InspectionSchedulingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InspectionSchedulingService<'a> {
    /// Creates a new instance of [`InspectionSchedulingService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Picks the least-loaded available inspector for a date.
    ///
    /// Optional filters narrow candidates to a district and an inspection
    /// type (resolved once from its id). When the filters eliminate every
    /// candidate the result is `None`; an unqualified inspector is never
    /// assigned as a fallback. The count-then-pick is read-then-write under
    /// concurrency: two simultaneous callers may pick the same inspector,
    /// which is accepted soft fairness.
    pub async fn find_available_inspector(
        &self,
        date: NaiveDate,
        district: Option<&str>,
        inspection_type_id: Option<i32>,
    ) -> Result<Option<InspectorLoad>, Error> {
        let type_name = match inspection_type_id {
            Some(type_id) => {
                let inspection_type = InspectionTypeRepository::new(self.db)
                    .get_by_id(type_id)
                    .await?
                    .ok_or(Error::InspectionTypeNotFound(type_id))?;
                Some(inspection_type.name)
            }
            None => None,
        };

        let candidates = InspectorRepository::new(self.db)
            .list_candidates(district, type_name.as_deref())
            .await?;

        if candidates.is_empty() {
            return Ok(None);
        }

        let schedules = InspectionScheduleRepository::new(self.db)
            .active_on_date(date)
            .await?;

        let mut counts: HashMap<i32, u64> = HashMap::new();
        for schedule in &schedules {
            *counts.entry(schedule.inspector_id).or_insert(0) += 1;
        }

        let selected = candidates
            .into_iter()
            .map(|inspector| {
                let scheduled_count = counts.get(&inspector.id).copied().unwrap_or(0);
                InspectorLoad {
                    inspector,
                    scheduled_count,
                }
            })
            .min_by(|a, b| {
                a.scheduled_count
                    .cmp(&b.scheduled_count)
                    .then_with(|| a.inspector.name.cmp(&b.inspector.name))
            });

        Ok(selected)
    }

    /// Creates a schedule. When no stage is given, the lowest-ordered stage
    /// without a `scheduled` or `completed` visit for the application is
    /// inferred, falling back to the first stage of the sequence.
    pub async fn create_schedule(
        &self,
        new_schedule: NewSchedule,
    ) -> Result<entity::inspection_schedule::Model, Error> {
        let txn = self.db.begin().await?;

        let stage_id = match new_schedule.stage_id {
            Some(stage_id) => stage_id,
            None => {
                self.infer_stage(&txn, new_schedule.application_id)
                    .await?
            }
        };

        let schedule = InspectionScheduleRepository::new(&txn)
            .insert(NewScheduleRecord {
                application_id: new_schedule.application_id,
                inspector_id: new_schedule.inspector_id,
                stage_id,
                scheduled_date: new_schedule.scheduled_date,
                scheduled_time: new_schedule.scheduled_time,
                status: ScheduleStatus::Scheduled.as_str(),
                notes: new_schedule.notes.as_deref(),
                created_by: new_schedule.created_by,
            })
            .await?;

        txn.commit().await?;

        info!(
            "Scheduled inspection {} for application {} (stage {}) with inspector {}",
            schedule.id, schedule.application_id, schedule.stage_id, schedule.inspector_id
        );

        Ok(schedule)
    }

    async fn infer_stage<C: ConnectionTrait>(
        &self,
        conn: &C,
        application_id: i32,
    ) -> Result<i32, Error> {
        let sequence = StageProgressionService::new(self.db)
            .load_sequence(conn)
            .await?;

        if sequence.is_empty() {
            return Err(Error::NoStagesConfigured);
        }

        let occupied = InspectionScheduleRepository::new(conn)
            .occupied_stage_ids(application_id)
            .await?;

        let next_free = sequence
            .stages()
            .iter()
            .find(|stage| !occupied.contains(&stage.id));

        match next_free.or_else(|| sequence.first()) {
            Some(stage) => Ok(stage.id),
            None => Err(Error::NoStagesConfigured),
        }
    }

    /// Partial update of a schedule row
    pub async fn update_schedule(
        &self,
        schedule_id: i32,
        update: UpdateSchedule,
    ) -> Result<entity::inspection_schedule::Model, Error> {
        let schedule = InspectionScheduleRepository::new(self.db)
            .find_by_id(schedule_id)
            .await?
            .ok_or(Error::ScheduleNotFound(schedule_id))?;

        let mut active = schedule.into_active_model();

        if let Some(inspector_id) = update.inspector_id {
            active.inspector_id = ActiveValue::Set(inspector_id);
        }
        if let Some(date) = update.scheduled_date {
            active.scheduled_date = ActiveValue::Set(date);
        }
        if let Some(time) = update.scheduled_time {
            active.scheduled_time = ActiveValue::Set(time);
        }
        if let Some(status) = update.status {
            active.status = ActiveValue::Set(status.as_str().to_string());
        }
        if let Some(notes) = update.notes {
            active.notes = ActiveValue::Set(Some(notes));
        }
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(active.update(self.db).await?)
    }

    /// Marks a visit conducted and feeds the result into the requirement
    /// ledger.
    ///
    /// The id is normalized first: if it is not a schedule id it is treated
    /// as a legacy stage id and resolved to that stage's most recent
    /// schedule. Every `inspection`-type requirement of the schedule's stage
    /// that the application holds a completion row for is completed with the
    /// schedule as its reference, inside the same transaction, which may
    /// advance the stage machine.
    pub async fn complete_inspection(
        &self,
        schedule_id: i32,
        inspector_id: i32,
        comments: Option<&str>,
    ) -> Result<entity::inspection_schedule::Model, Error> {
        let txn = self.db.begin().await?;

        let schedule_repo = InspectionScheduleRepository::new(&txn);

        let schedule = match schedule_repo.find_by_id(schedule_id).await? {
            Some(schedule) => schedule,
            None => schedule_repo
                .latest_for_stage(schedule_id)
                .await?
                .ok_or(Error::ScheduleNotFound(schedule_id))?,
        };

        if schedule.status == ScheduleStatus::Completed.as_str() {
            return Err(Error::InspectionAlreadyCompleted(schedule.id));
        }

        let resolved_id = schedule.id;
        let application_id = schedule.application_id;
        let stage_id = schedule.stage_id;

        let mut active = schedule.into_active_model();
        active.status = ActiveValue::Set(ScheduleStatus::Completed.as_str().to_string());
        if let Some(comments) = comments {
            active.notes = ActiveValue::Set(Some(comments.to_string()));
        }
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let completed = active.update(&txn).await?;

        let inspection_requirements = StageRepository::new(&txn)
            .requirements_of_type(stage_id, INSPECTION_REQUIREMENT_TYPE)
            .await?;

        let completion_repo = RequirementCompletionRepository::new(&txn);
        let ledger = RequirementLedgerService::new(self.db);

        for requirement in inspection_requirements {
            // Only requirements already seeded for this application are
            // touched; the stage may not have been entered yet.
            let seeded = completion_repo
                .find_pair(application_id, requirement.id)
                .await?
                .is_some();

            if seeded {
                ledger
                    .apply(
                        &txn,
                        UpdateRequirement {
                            application_id,
                            requirement_id: requirement.id,
                            status: RequirementStatus::Completed,
                            notes: comments.map(str::to_string),
                            reference_id: Some(resolved_id),
                            verified_by: Some(inspector_id),
                        },
                    )
                    .await?;
            }
        }

        txn.commit().await?;

        info!(
            "Inspection schedule {} completed by inspector {}",
            resolved_id, inspector_id
        );

        Ok(completed)
    }

    pub async fn delete_schedule(&self, schedule_id: i32) -> Result<(), Error> {
        let result = InspectionScheduleRepository::new(self.db)
            .delete(schedule_id)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::ScheduleNotFound(schedule_id));
        }

        Ok(())
    }

    pub async fn list_by_application(
        &self,
        application_id: i32,
    ) -> Result<Vec<entity::inspection_schedule::Model>, Error> {
        Ok(InspectionScheduleRepository::new(self.db)
            .list_by_application(application_id)
            .await?)
    }

    pub async fn list_by_inspector(
        &self,
        inspector_id: i32,
    ) -> Result<Vec<entity::inspection_schedule::Model>, Error> {
        Ok(InspectionScheduleRepository::new(self.db)
            .list_by_inspector(inspector_id)
            .await?)
    }

    /// Schedules across every application a user owns
    pub async fn list_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<entity::inspection_schedule::Model>, Error> {
        let applications = ApplicationRepository::new(self.db)
            .list_by_user(user_id)
            .await?;

        let application_ids: Vec<i32> = applications.iter().map(|a| a.id).collect();

        if application_ids.is_empty() {
            return Ok(vec![]);
        }

        Ok(InspectionScheduleRepository::new(self.db)
            .list_by_applications(application_ids)
            .await?)
    }
}
