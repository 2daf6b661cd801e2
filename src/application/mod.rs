//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the clinic workflows: admission, assisted diagnosis, login,
//! dashboards and patient search.

mod dashboard;
mod diagnosis;
mod patients;
mod registration;
mod session;

pub use dashboard::{
    percentage, AdminStats, AdmissionsStats, DashboardService, DoctorStats, MonthlyFigure,
    PendingTask, Share, TaskPriority,
};
pub use diagnosis::{DiagnosisService, FOLLOW_UP_RECOMMENDATIONS};
pub use patients::{PatientFilter, PatientQuery};
pub use registration::{split_list, RegistrationForm, RegistrationService};
pub use session::{name_from_email, SessionService, DEFAULT_ROLE};
