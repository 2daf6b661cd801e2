//! In-memory adapter: Implementation of ClinicStore.
//!
//! Holds the session's patients and diagnoses for the lifetime of the
//! process. Nothing is written to disk.
//!
//! # Mutex Behavior
//!
//! State is protected by a `Mutex` so the store can be shared with the
//! background worker. A poisoned lock is recovered (the lists are plain
//! vectors and stay consistent), which keeps every operation total.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::adapters::seed::SeedData;
use crate::domain::{DiagnosisResult, NewDiagnosis, NewPatient, Patient, PatientUpdate};
use crate::ports::ClinicStore;

/// Timestamp-based id generator.
///
/// Ids are Unix milliseconds, bumped past the previous id when two requests
/// land in the same millisecond, so they are unique and strictly increasing
/// within one source.
#[derive(Debug, Default)]
pub struct IdSource {
    last: u64,
}

impl IdSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next id.
    pub fn next_id(&mut self) -> String {
        let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        self.next_at(now)
    }

    fn next_at(&mut self, now_ms: u64) -> String {
        let id = now_ms.max(self.last.saturating_add(1));
        self.last = id;
        id.to_string()
    }
}

#[derive(Debug, Default)]
struct State {
    patients: Vec<Patient>,
    diagnoses: Vec<DiagnosisResult>,
    patient_ids: IdSource,
    diagnosis_ids: IdSource,
}

/// In-memory clinic store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with `seed`, keeping the seed ids.
    #[must_use]
    pub fn with_seed(seed: SeedData) -> Self {
        tracing::debug!(
            "Seeding store with {} patients and {} diagnoses",
            seed.patients.len(),
            seed.diagnoses.len()
        );
        Self {
            state: Mutex::new(State {
                patients: seed.patients,
                diagnoses: seed.diagnoses,
                ..State::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ClinicStore for InMemoryStore {
    fn patients(&self) -> Vec<Patient> {
        self.lock().patients.clone()
    }

    fn diagnoses(&self) -> Vec<DiagnosisResult> {
        self.lock().diagnoses.clone()
    }

    fn find_patient(&self, id: &str) -> Option<Patient> {
        self.lock().patients.iter().find(|p| p.id == id).cloned()
    }

    fn add_patient(&self, patient: NewPatient) -> String {
        let mut state = self.lock();
        let mut id = state.patient_ids.next_id();
        // Seeded records may carry arbitrary ids.
        while state.patients.iter().any(|p| p.id == id) {
            id = state.patient_ids.next_id();
        }
        state.patients.push(patient.with_id(id.clone()));
        tracing::debug!("Patient added ({} total)", state.patients.len());
        id
    }

    fn add_diagnosis(&self, diagnosis: NewDiagnosis) -> String {
        let mut state = self.lock();
        let mut id = state.diagnosis_ids.next_id();
        while state.diagnoses.iter().any(|d| d.id == id) {
            id = state.diagnosis_ids.next_id();
        }
        state.diagnoses.push(diagnosis.with_id(id.clone()));
        tracing::debug!("Diagnosis added ({} total)", state.diagnoses.len());
        id
    }

    fn update_patient(&self, id: &str, update: &PatientUpdate) -> bool {
        let mut state = self.lock();
        if update.is_empty() {
            tracing::debug!("Empty patient update ignored");
            return state.patients.iter().any(|p| p.id == id);
        }
        match state.patients.iter_mut().find(|p| p.id == id) {
            Some(patient) => {
                patient.apply(update);
                true
            }
            None => false,
        }
    }

    fn delete_patient(&self, id: &str) -> bool {
        let mut state = self.lock();
        let before = state.patients.len();
        state.patients.retain(|p| p.id != id);
        state.patients.len() != before
    }

    fn patient_count(&self) -> usize {
        self.lock().patients.len()
    }

    fn diagnosis_count(&self) -> usize {
        self.lock().diagnoses.len()
    }
}
