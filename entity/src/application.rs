//! A single building permit application and its position in the approval
//! workflow. `current_stage_id` is null before submission; after final
//! completion it keeps pointing at the last stage.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "application")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Applicant account reference (user management is external).
    pub user_id: i32,
    /// `pending`, `submitted`, `completed` or `rejected`.
    pub status: String,
    pub current_stage_id: Option<i32>,
    /// Municipal stand (site) identifier.
    pub stand_number: String,
    pub district: Option<String>,
    pub construction_type: Option<String>,
    pub project_description: Option<String>,
    pub owner_name: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stage::Entity",
        from = "Column::CurrentStageId",
        to = "super::stage::Column::Id"
    )]
    CurrentStage,
    #[sea_orm(has_many = "super::application_progress::Entity")]
    Progress,
    #[sea_orm(has_many = "super::requirement_completion::Entity")]
    RequirementCompletion,
    #[sea_orm(has_many = "super::inspection_schedule::Entity")]
    InspectionSchedule,
}

impl Related<super::stage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CurrentStage.def()
    }
}

impl Related<super::application_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Progress.def()
    }
}

impl Related<super::requirement_completion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RequirementCompletion.def()
    }
}

impl Related<super::inspection_schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InspectionSchedule.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
