pub use sea_orm_migration::prelude::*;

mod m20260115_000001_stage;
mod m20260115_000002_stage_requirement;
mod m20260115_000003_application;
mod m20260115_000004_application_progress;
mod m20260115_000005_requirement_completion;
mod m20260115_000006_inspection_type;
mod m20260115_000007_inspector;
mod m20260115_000008_inspection_schedule;
mod m20260115_000009_document;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260115_000001_stage::Migration),
            Box::new(m20260115_000002_stage_requirement::Migration),
            Box::new(m20260115_000003_application::Migration),
            Box::new(m20260115_000004_application_progress::Migration),
            Box::new(m20260115_000005_requirement_completion::Migration),
            Box::new(m20260115_000006_inspection_type::Migration),
            Box::new(m20260115_000007_inspector::Migration),
            Box::new(m20260115_000008_inspection_schedule::Migration),
            Box::new(m20260115_000009_document::Migration),
        ]
    }
}
