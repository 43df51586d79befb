//! A field inspector qualified for one inspection type and assigned to a
//! district. Only `available` inspectors are candidates for scheduling.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "inspector")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Qualification, matched by name against `inspection_type`.
    pub inspection_type: String,
    pub assigned_district: String,
    pub available: bool,
    pub work_id: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inspection_schedule::Entity")]
    Schedules,
}

impl Related<super::inspection_schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
