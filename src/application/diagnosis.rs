//! Diagnosis service: Turns a symptom selection into a stored diagnosis.
//!
//! Pipeline:
//! 1. Check the selection and the patient
//! 2. Ask the suggester
//! 3. Build the record (patient name copied in, follow-up recommendations)
//! 4. Append it to the store

use std::sync::Arc;

use crate::domain::{today, DiagnosisResult, NewDiagnosis, Patient, SymptomSelection};
use crate::ports::{ClinicStore, DiagnosisSuggester};
use crate::MeddiagError;

/// Follow-up recommendations attached to every assisted diagnosis.
pub const FOLLOW_UP_RECOMMENDATIONS: [&str; 3] = [
    "Realizar seguimiento en 2 semanas",
    "Monitoreo continuo de síntomas",
    "Exámenes complementarios si persisten síntomas",
];

/// Service for the symptom-to-diagnosis flow.
pub struct DiagnosisService<S, G>
where
    S: ClinicStore,
    G: DiagnosisSuggester,
{
    store: Arc<S>,
    suggester: Arc<G>,
}

impl<S, G> DiagnosisService<S, G>
where
    S: ClinicStore,
    G: DiagnosisSuggester,
{
    pub fn new(store: Arc<S>, suggester: Arc<G>) -> Self {
        Self { store, suggester }
    }

    /// Patients that can be picked on the diagnosis form.
    #[must_use]
    pub fn active_patients(&self) -> Vec<Patient> {
        self.store
            .patients()
            .into_iter()
            .filter(Patient::is_active)
            .collect()
    }

    #[must_use]
    pub fn suggester_name(&self) -> &str {
        self.suggester.name()
    }

    /// Produce and store a diagnosis for `patient_id`.
    ///
    /// Exactly one record is appended on success.
    ///
    /// # Errors
    /// Returns `Validation` if no symptoms are selected or the patient is
    /// inactive, `PatientNotFound` if the id is unknown.
    pub fn submit(
        &self,
        patient_id: &str,
        symptoms: &SymptomSelection,
    ) -> Result<DiagnosisResult, MeddiagError> {
        if symptoms.is_empty() {
            return Err(MeddiagError::Validation(
                "Selecciona al menos un síntoma".to_string(),
            ));
        }

        let patient = self
            .store
            .find_patient(patient_id)
            .ok_or_else(|| MeddiagError::PatientNotFound(patient_id.to_string()))?;

        if !patient.is_active() {
            return Err(MeddiagError::Validation(
                "El paciente no está activo".to_string(),
            ));
        }

        tracing::debug!("Requesting suggestion from {}", self.suggester.name());
        let suggestion = self.suggester.suggest(symptoms.as_slice());

        let record = NewDiagnosis {
            patient_id: patient.id.clone(),
            patient_name: patient.name.clone(),
            symptoms: symptoms.as_slice().to_vec(),
            primary_diagnosis: suggestion.primary_diagnosis,
            confidence: suggestion.confidence,
            alternatives: suggestion.alternatives,
            recommendations: FOLLOW_UP_RECOMMENDATIONS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            date: today(),
        };

        let id = self.store.add_diagnosis(record.clone());

        tracing::info!(
            "Diagnosis stored: confidence={:.0}%, {} symptoms, {} alternatives",
            record.confidence * 100.0,
            record.symptoms.len(),
            record.alternatives.len()
        );

        Ok(record.with_id(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryStore, RandomSuggester, SeedData};
    use crate::domain::{AlternativeDiagnosis, PatientStatus, PatientUpdate};
    use crate::ports::Suggestion;

    struct FixedSuggester;

    impl DiagnosisSuggester for FixedSuggester {
        fn suggest(&self, _symptoms: &[String]) -> Suggestion {
            Suggestion {
                primary_diagnosis: "Gripe".to_string(),
                confidence: 0.7,
                alternatives: vec![AlternativeDiagnosis::new("Resfriado", 0.5)],
            }
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn create_test_service() -> (DiagnosisService<InMemoryStore, RandomSuggester>, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::with_seed(
            SeedData::demo().expect("Seed should parse"),
        ));
        let suggester = Arc::new(RandomSuggester::with_seed(1));
        (DiagnosisService::new(store.clone(), suggester), store)
    }

    #[test]
    fn test_ana_lopez_scenario() {
        let (service, store) = create_test_service();
        let before = store.diagnosis_count();

        let mut symptoms = SymptomSelection::new();
        symptoms.add("Fiebre");
        symptoms.add("Tos");

        let result = service.submit("1", &symptoms).expect("Should diagnose");

        assert_eq!(store.diagnosis_count(), before + 1);
        let stored = store.diagnoses().pop().expect("Should have a diagnosis");
        assert_eq!(stored, result);
        assert_eq!(stored.patient_id, "1");
        assert_eq!(stored.patient_name, "Ana López");
        assert_eq!(stored.symptoms, vec!["Fiebre".to_string(), "Tos".to_string()]);
        assert_eq!(stored.recommendations.len(), 3);
        assert_eq!(stored.date, today());
    }

    #[test]
    fn test_duplicate_symptoms_are_stored_once_in_order() {
        let (service, _store) = create_test_service();
        let symptoms: SymptomSelection = ["Tos", "Fiebre", "Tos", "Mareos"].into_iter().collect();

        let result = service.submit("2", &symptoms).expect("Should diagnose");
        assert_eq!(result.symptoms, vec!["Tos", "Fiebre", "Mareos"]);
    }

    #[test]
    fn test_suggestion_is_copied_verbatim() {
        let store = Arc::new(InMemoryStore::with_seed(
            SeedData::demo().expect("Seed should parse"),
        ));
        let service = DiagnosisService::new(store, Arc::new(FixedSuggester));
        let symptoms: SymptomSelection = ["Fiebre"].into_iter().collect();

        let result = service.submit("3", &symptoms).expect("Should diagnose");
        assert_eq!(result.primary_diagnosis, "Gripe");
        assert!((result.confidence - 0.7).abs() < f64::EPSILON);
        assert_eq!(result.alternatives[0].diagnosis, "Resfriado");
        assert_eq!(service.suggester_name(), "fixed");
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let (service, store) = create_test_service();
        let before = store.diagnosis_count();

        let result = service.submit("1", &SymptomSelection::new());
        assert!(matches!(result, Err(MeddiagError::Validation(_))));
        assert_eq!(store.diagnosis_count(), before);
    }

    #[test]
    fn test_unknown_patient_is_rejected() {
        let (service, store) = create_test_service();
        let symptoms: SymptomSelection = ["Fiebre"].into_iter().collect();

        let result = service.submit("999", &symptoms);
        assert!(matches!(result, Err(MeddiagError::PatientNotFound(_))));
        assert_eq!(store.diagnosis_count(), 1);
    }

    #[test]
    fn test_inactive_patient_is_rejected_and_hidden() {
        let (service, store) = create_test_service();
        store.update_patient("3", &PatientUpdate::status(PatientStatus::Inactivo));

        let symptoms: SymptomSelection = ["Fiebre"].into_iter().collect();
        assert!(matches!(
            service.submit("3", &symptoms),
            Err(MeddiagError::Validation(_))
        ));
        assert!(service.active_patients().iter().all(|p| p.id != "3"));
        assert_eq!(service.active_patients().len(), 2);
    }
}
