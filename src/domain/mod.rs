//! Domain layer: Core clinic types.
//!
//! Plain data with serde support and no I/O.

mod diagnosis;
mod patient;
mod symptoms;
mod user;

pub use diagnosis::{AlternativeDiagnosis, DiagnosisResult, NewDiagnosis, HIGH_CONFIDENCE_THRESHOLD};
pub use patient::{
    DocumentType, EmergencyContact, Gender, NewPatient, Patient, PatientStatus, PatientUpdate,
    BLOOD_TYPES, CITIES, EPS_OPTIONS,
};
pub use symptoms::{SymptomSelection, COMMON_SYMPTOMS};
pub use user::{Role, User, View};

#[cfg(test)]
pub(crate) use diagnosis::sample_new_diagnosis;
#[cfg(test)]
pub(crate) use patient::sample_new_patient;

/// Today's date as `YYYY-MM-DD` (UTC), the format used on every record.
#[must_use]
pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
