pub mod application;
pub mod application_progress;
pub mod document;
pub mod inspection_schedule;
pub mod inspection_type;
pub mod inspector;
pub mod requirement_completion;
pub mod stage;
pub mod stage_requirement;

pub mod prelude {
    pub use super::application::Entity as Application;
    pub use super::application_progress::Entity as ApplicationProgress;
    pub use super::document::Entity as Document;
    pub use super::inspection_schedule::Entity as InspectionSchedule;
    pub use super::inspection_type::Entity as InspectionType;
    pub use super::inspector::Entity as Inspector;
    pub use super::requirement_completion::Entity as RequirementCompletion;
    pub use super::stage::Entity as Stage;
    pub use super::stage_requirement::Entity as StageRequirement;
}
