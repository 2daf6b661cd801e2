//! Patient records for the admissions desk.
//!
//! Field names serialize in camelCase to match the clinic's JSON records
//! (`documentType`, `emergencyContact`, ...).

use serde::{Deserialize, Serialize};

/// Insurers offered on the registration form.
pub const EPS_OPTIONS: [&str; 10] = [
    "Sura EPS",
    "Compensar EPS",
    "Sanitas EPS",
    "Nueva EPS",
    "Famisanar",
    "Salud Total",
    "Coomeva EPS",
    "Aliansalud EPS",
    "Medimás EPS",
    "Capital Salud",
];

/// Cities offered on the registration form.
pub const CITIES: [&str; 10] = [
    "Bogotá",
    "Medellín",
    "Cali",
    "Barranquilla",
    "Cartagena",
    "Bucaramanga",
    "Pereira",
    "Manizales",
    "Ibagué",
    "Villavicencio",
];

pub const BLOOD_TYPES: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    /// Spanish label used across the UI.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::M => "Masculino",
            Self::F => "Femenino",
        }
    }
}

/// Colombian identity document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Cédula de ciudadanía
    CC,
    /// Tarjeta de identidad
    TI,
    /// Cédula de extranjería
    CE,
    /// Pasaporte
    PP,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [Self::CC, Self::TI, Self::CE, Self::PP];

    /// Next kind in form order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::CC => Self::TI,
            Self::TI => Self::CE,
            Self::CE => Self::PP,
            Self::PP => Self::CC,
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Self::CC => "CC",
            Self::TI => "TI",
            Self::CE => "CE",
            Self::PP => "PP",
        };
        write!(f, "{code}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    #[default]
    Activo,
    Inactivo,
}

impl std::fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Activo => write!(f, "activo"),
            Self::Inactivo => write!(f, "inactivo"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Assigned by the store; never changes afterwards.
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub document_type: DocumentType,
    pub document_number: String,
    pub birth_date: String,
    pub address: String,
    pub city: String,
    /// Insurer name (see [`EPS_OPTIONS`]).
    pub eps: String,
    pub emergency_contact: EmergencyContact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<Vec<String>>,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub registration_date: String,
    pub last_visit: String,
    /// Last known diagnosis, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Vec<String>>,
    #[serde(default)]
    pub status: PatientStatus,
}

/// Patient fields as supplied to registration, before an id exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub document_type: DocumentType,
    pub document_number: String,
    pub birth_date: String,
    pub address: String,
    pub city: String,
    pub eps: String,
    pub emergency_contact: EmergencyContact,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub allergies: Option<Vec<String>>,
    #[serde(default)]
    pub medications: Option<Vec<String>>,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub registration_date: String,
    pub last_visit: String,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub symptoms: Option<Vec<String>>,
    #[serde(default)]
    pub status: PatientStatus,
}

impl NewPatient {
    /// Attach an id, producing the stored record.
    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Patient {
        Patient {
            id: id.into(),
            name: self.name,
            age: self.age,
            gender: self.gender,
            document_type: self.document_type,
            document_number: self.document_number,
            birth_date: self.birth_date,
            address: self.address,
            city: self.city,
            eps: self.eps,
            emergency_contact: self.emergency_contact,
            blood_type: self.blood_type,
            allergies: self.allergies,
            medications: self.medications,
            phone: self.phone,
            email: self.email,
            registration_date: self.registration_date,
            last_visit: self.last_visit,
            diagnosis: self.diagnosis,
            symptoms: self.symptoms,
            status: self.status,
        }
    }
}

/// Partial update merged into an existing patient.
///
/// `None` leaves a field untouched. Optional patient fields take
/// `Some(None)` to clear them. The id is not part of the update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub document_type: Option<DocumentType>,
    pub document_number: Option<String>,
    pub birth_date: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub eps: Option<String>,
    pub emergency_contact: Option<EmergencyContact>,
    pub blood_type: Option<Option<String>>,
    pub allergies: Option<Option<Vec<String>>>,
    pub medications: Option<Option<Vec<String>>>,
    pub phone: Option<String>,
    pub email: Option<Option<String>>,
    pub registration_date: Option<String>,
    pub last_visit: Option<String>,
    pub diagnosis: Option<Option<String>>,
    pub symptoms: Option<Option<Vec<String>>>,
    pub status: Option<PatientStatus>,
}

impl PatientUpdate {
    #[must_use]
    pub fn status(status: PatientStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn merge<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

impl Patient {
    /// Merge the fields present in `update`.
    pub fn apply(&mut self, update: &PatientUpdate) {
        merge(&mut self.name, &update.name);
        merge(&mut self.age, &update.age);
        merge(&mut self.gender, &update.gender);
        merge(&mut self.document_type, &update.document_type);
        merge(&mut self.document_number, &update.document_number);
        merge(&mut self.birth_date, &update.birth_date);
        merge(&mut self.address, &update.address);
        merge(&mut self.city, &update.city);
        merge(&mut self.eps, &update.eps);
        merge(&mut self.emergency_contact, &update.emergency_contact);
        merge(&mut self.blood_type, &update.blood_type);
        merge(&mut self.allergies, &update.allergies);
        merge(&mut self.medications, &update.medications);
        merge(&mut self.phone, &update.phone);
        merge(&mut self.email, &update.email);
        merge(&mut self.registration_date, &update.registration_date);
        merge(&mut self.last_visit, &update.last_visit);
        merge(&mut self.diagnosis, &update.diagnosis);
        merge(&mut self.symptoms, &update.symptoms);
        merge(&mut self.status, &update.status);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == PatientStatus::Activo
    }

    /// First letter of each word of the name ("Ana López" -> "AL").
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn sample_new_patient(name: &str) -> NewPatient {
    NewPatient {
        name: name.to_string(),
        age: 30,
        gender: Gender::F,
        document_type: DocumentType::CC,
        document_number: "999".to_string(),
        birth_date: "1994-05-01".to_string(),
        address: "Calle 1 #2-3".to_string(),
        city: "Bogotá".to_string(),
        eps: "Sura EPS".to_string(),
        emergency_contact: EmergencyContact {
            name: "Contacto".to_string(),
            phone: "3001234567".to_string(),
            relationship: "Hermana".to_string(),
        },
        blood_type: None,
        allergies: None,
        medications: None,
        phone: "3007654321".to_string(),
        email: None,
        registration_date: "2024-01-20".to_string(),
        last_visit: "2024-01-20".to_string(),
        diagnosis: None,
        symptoms: None,
        status: PatientStatus::Activo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_changes_only_given_fields() {
        let mut patient = sample_new_patient("Test User").with_id("42");
        let before = patient.clone();

        let update = PatientUpdate {
            city: Some("Cali".to_string()),
            blood_type: Some(Some("O+".to_string())),
            ..Default::default()
        };
        patient.apply(&update);

        assert_eq!(patient.city, "Cali");
        assert_eq!(patient.blood_type.as_deref(), Some("O+"));
        assert_eq!(patient.id, before.id);
        assert_eq!(patient.name, before.name);
        assert_eq!(patient.eps, before.eps);
        assert_eq!(patient.status, before.status);
    }

    #[test]
    fn test_apply_can_clear_optional_field() {
        let mut new = sample_new_patient("Test User");
        new.allergies = Some(vec!["Penicilina".to_string()]);
        let mut patient = new.with_id("7");

        patient.apply(&PatientUpdate {
            allergies: Some(None),
            ..Default::default()
        });
        assert!(patient.allergies.is_none());
    }

    #[test]
    fn test_initials_and_labels() {
        let patient = sample_new_patient("Ana López").with_id("1");
        assert_eq!(patient.initials(), "AL");
        assert_eq!(patient.gender.label(), "Femenino");
        assert_eq!(DocumentType::PP.next(), DocumentType::CC);
    }

    #[test]
    fn test_serde_uses_clinic_field_names() {
        let patient = sample_new_patient("Ana López").with_id("1");
        let json = serde_json::to_value(&patient).expect("Should serialize");

        assert_eq!(json["documentType"], "CC");
        assert_eq!(json["status"], "activo");
        assert_eq!(json["emergencyContact"]["relationship"], "Hermana");
        assert!(json.get("bloodType").is_none());
    }

    #[test]
    fn test_status_defaults_to_activo() {
        assert_eq!(PatientStatus::default(), PatientStatus::Activo);
        assert!(PatientUpdate::default().is_empty());
        assert!(!PatientUpdate::status(PatientStatus::Inactivo).is_empty());
    }
}
