//! Store port: The session's patient and diagnosis lists.
//!
//! This trait abstracts the state container from the use cases. One store
//! instance lives for the whole session and is handed to consumers by
//! reference (`Arc<S>`); there is no global instance.

use crate::domain::{DiagnosisResult, NewDiagnosis, NewPatient, Patient, PatientUpdate};

/// Trait for the clinic's in-session state.
///
/// Every operation is total. Unknown ids are ignored and reported through
/// the boolean return values, never as errors.
pub trait ClinicStore: Send + Sync {
    /// Snapshot of all patients in insertion order.
    fn patients(&self) -> Vec<Patient>;

    /// Snapshot of all diagnoses in insertion order.
    fn diagnoses(&self) -> Vec<DiagnosisResult>;

    /// Look up a patient by id.
    fn find_patient(&self, id: &str) -> Option<Patient>;

    /// Append a patient under a freshly assigned id.
    ///
    /// # Returns
    /// The assigned id. Callers that only fire-and-forget may ignore it.
    fn add_patient(&self, patient: NewPatient) -> String;

    /// Append a diagnosis under a freshly assigned id.
    ///
    /// Never replaces an existing record.
    fn add_diagnosis(&self, diagnosis: NewDiagnosis) -> String;

    /// Merge `update` into the patient with `id`.
    ///
    /// # Returns
    /// `false` if no patient has that id (the list is left unchanged).
    fn update_patient(&self, id: &str, update: &PatientUpdate) -> bool;

    /// Remove the patient with `id`.
    ///
    /// # Returns
    /// `false` if no patient has that id.
    fn delete_patient(&self, id: &str) -> bool;

    /// Number of patients.
    fn patient_count(&self) -> usize {
        self.patients().len()
    }

    /// Number of diagnoses.
    fn diagnosis_count(&self) -> usize {
        self.diagnoses().len()
    }
}
