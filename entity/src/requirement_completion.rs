//! Completion state of one stage requirement for one application. Rows are
//! seeded `pending` when the application enters the owning stage.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "requirement_completion")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub application_id: i32,
    pub requirement_id: i32,
    /// `pending`, `completed` or `rejected`.
    pub status: String,
    pub completed_at: Option<DateTime>,
    pub verified_by: Option<i32>,
    pub notes: Option<String>,
    /// Receipt, schedule or document id backing the completion.
    pub reference_id: Option<i32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::application::Entity",
        from = "Column::ApplicationId",
        to = "super::application::Column::Id"
    )]
    Application,
    #[sea_orm(
        belongs_to = "super::stage_requirement::Entity",
        from = "Column::RequirementId",
        to = "super::stage_requirement::Column::Id"
    )]
    Requirement,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl Related<super::stage_requirement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requirement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
