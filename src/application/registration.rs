//! Registration service: Admits new patients from the admissions form.
//!
//! Only required-field checks are performed here, mirroring the form.
//! Field contents are otherwise taken as entered.

use std::sync::Arc;

use crate::domain::{
    today, DocumentType, EmergencyContact, Gender, NewPatient, PatientStatus,
};
use crate::ports::ClinicStore;
use crate::MeddiagError;

/// Raw registration form values, as typed by the clerk.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationForm {
    pub name: String,
    pub age: String,
    pub gender: Gender,
    pub document_type: DocumentType,
    pub document_number: String,
    pub birth_date: String,
    pub address: String,
    pub city: String,
    pub eps: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub emergency_contact_relationship: String,
    pub blood_type: String,
    /// Comma-separated
    pub allergies: String,
    /// Comma-separated
    pub medications: String,
    pub phone: String,
    pub email: String,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            gender: Gender::M,
            document_type: DocumentType::CC,
            document_number: String::new(),
            birth_date: String::new(),
            address: String::new(),
            city: String::new(),
            eps: String::new(),
            emergency_contact_name: String::new(),
            emergency_contact_phone: String::new(),
            emergency_contact_relationship: String::new(),
            blood_type: String::new(),
            allergies: String::new(),
            medications: String::new(),
            phone: String::new(),
            email: String::new(),
        }
    }
}

/// Split a comma-separated list, trimming entries and dropping blanks.
///
/// # Returns
/// `None` for an empty input.
#[must_use]
pub fn split_list(input: &str) -> Option<Vec<String>> {
    if input.trim().is_empty() {
        return None;
    }
    Some(
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl RegistrationForm {
    /// Label of the first required field left blank, in form order.
    #[must_use]
    pub fn first_missing_field(&self) -> Option<&'static str> {
        let required: [(&'static str, &str); 11] = [
            ("Nombre completo", &self.name),
            ("Edad", &self.age),
            ("Número de documento", &self.document_number),
            ("Fecha de nacimiento", &self.birth_date),
            ("Dirección", &self.address),
            ("Ciudad", &self.city),
            ("EPS", &self.eps),
            ("Contacto de emergencia", &self.emergency_contact_name),
            ("Teléfono de emergencia", &self.emergency_contact_phone),
            ("Parentesco", &self.emergency_contact_relationship),
            ("Teléfono", &self.phone),
        ];
        required
            .iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| *label)
    }

    /// Convert the form into a new patient record dated `date`.
    ///
    /// # Errors
    /// Returns `Validation` if a required field is blank or the age is not
    /// a non-negative integer.
    pub fn into_new_patient(self, date: &str) -> Result<NewPatient, MeddiagError> {
        if let Some(field) = self.first_missing_field() {
            return Err(MeddiagError::Validation(format!("{field} es obligatorio")));
        }

        let age: u32 = self
            .age
            .trim()
            .parse()
            .map_err(|_| MeddiagError::Validation(format!("Edad inválida: {}", self.age.trim())))?;

        Ok(NewPatient {
            name: self.name.trim().to_string(),
            age,
            gender: self.gender,
            document_type: self.document_type,
            document_number: self.document_number.trim().to_string(),
            birth_date: self.birth_date.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            eps: self.eps.trim().to_string(),
            emergency_contact: EmergencyContact {
                name: self.emergency_contact_name.trim().to_string(),
                phone: self.emergency_contact_phone.trim().to_string(),
                relationship: self.emergency_contact_relationship.trim().to_string(),
            },
            blood_type: optional(&self.blood_type),
            allergies: split_list(&self.allergies),
            medications: split_list(&self.medications),
            phone: self.phone.trim().to_string(),
            email: optional(&self.email),
            registration_date: date.to_string(),
            last_visit: date.to_string(),
            diagnosis: None,
            symptoms: None,
            status: PatientStatus::Activo,
        })
    }
}

/// Service for admitting patients.
pub struct RegistrationService<S>
where
    S: ClinicStore,
{
    store: Arc<S>,
}

impl<S> RegistrationService<S>
where
    S: ClinicStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a patient from the form, dated today.
    ///
    /// The new record is always `activo`.
    ///
    /// # Errors
    /// Returns `Validation` if the form is incomplete.
    pub fn register(&self, form: RegistrationForm) -> Result<String, MeddiagError> {
        let patient = form.into_new_patient(&today())?;
        let id = self.store.add_patient(patient);

        tracing::info!("Patient registered ({} on file)", self.store.patient_count());
        Ok(id)
    }
}

#[cfg(test)]
pub(crate) fn complete_form(name: &str) -> RegistrationForm {
    RegistrationForm {
        name: name.to_string(),
        age: "30".to_string(),
        gender: Gender::F,
        document_type: DocumentType::CC,
        document_number: "999".to_string(),
        birth_date: "1994-02-10".to_string(),
        address: "Calle 10 #5-20".to_string(),
        city: "Bogotá".to_string(),
        eps: "Sura EPS".to_string(),
        emergency_contact_name: "Luz Pérez".to_string(),
        emergency_contact_phone: "3001112233".to_string(),
        emergency_contact_relationship: "Madre".to_string(),
        phone: "3004445566".to_string(),
        ..RegistrationForm::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryStore, SeedData};

    fn create_test_service() -> (RegistrationService<InMemoryStore>, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::with_seed(
            SeedData::demo().expect("Seed should parse"),
        ));
        (RegistrationService::new(store.clone()), store)
    }

    #[test]
    fn test_register_sets_defaults() {
        let (service, store) = create_test_service();
        let before = store.patient_count();

        let id = service
            .register(complete_form("Test User"))
            .expect("Should register");

        assert_eq!(store.patient_count(), before + 1);
        let patient = store.find_patient(&id).expect("Should find patient");
        assert_eq!(patient.name, "Test User");
        assert_eq!(patient.age, 30);
        assert_eq!(patient.gender, Gender::F);
        assert_eq!(patient.document_number, "999");
        assert_eq!(patient.eps, "Sura EPS");
        assert_eq!(patient.status, PatientStatus::Activo);
        assert_eq!(patient.registration_date, today());
        assert_eq!(patient.last_visit, today());
        assert!(patient.blood_type.is_none());
        assert!(patient.email.is_none());
    }

    #[test]
    fn test_lists_are_split_and_trimmed() {
        let mut form = complete_form("Listas");
        form.allergies = " Penicilina, Mariscos ,, ".to_string();
        form.medications = String::new();
        form.blood_type = "O+".to_string();

        let patient = form.into_new_patient("2024-01-20").expect("Should convert");
        assert_eq!(
            patient.allergies,
            Some(vec!["Penicilina".to_string(), "Mariscos".to_string()])
        );
        assert!(patient.medications.is_none());
        assert_eq!(patient.blood_type.as_deref(), Some("O+"));
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let (service, store) = create_test_service();
        let before = store.patient_count();

        let mut form = complete_form("Sin EPS");
        form.eps = "  ".to_string();

        match service.register(form) {
            Err(MeddiagError::Validation(msg)) => assert!(msg.contains("EPS")),
            other => panic!("Expected validation error, got {other:?}"),
        }
        assert_eq!(store.patient_count(), before);
    }

    #[test]
    fn test_invalid_age_is_rejected() {
        let mut form = complete_form("Edad Rara");
        form.age = "-3".to_string();
        assert!(matches!(
            form.into_new_patient("2024-01-20"),
            Err(MeddiagError::Validation(_))
        ));
    }

    #[test]
    fn test_split_list_empty() {
        assert_eq!(split_list("   "), None);
        assert_eq!(split_list("a"), Some(vec!["a".to_string()]));
    }
}
