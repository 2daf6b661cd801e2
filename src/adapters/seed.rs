//! Demo records loaded into a fresh session.
//!
//! The data ships inside the binary (`data/seed.json`) so the front desk
//! has something to work with immediately after login.

use serde::Deserialize;

use crate::domain::{DiagnosisResult, Patient};

const DEMO_JSON: &str = include_str!("../../data/seed.json");

/// Records to preload into a store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub diagnoses: Vec<DiagnosisResult>,
}

impl SeedData {
    /// The bundled demo patients and diagnosis.
    ///
    /// # Errors
    /// Returns error if the bundled JSON does not match the record types.
    pub fn demo() -> Result<Self, serde_json::Error> {
        Self::from_json(DEMO_JSON)
    }

    /// Parse seed data from a JSON document.
    ///
    /// # Errors
    /// Returns error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// No records; the store starts blank.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PatientStatus;

    #[test]
    fn test_demo_data_parses() {
        let seed = SeedData::demo().expect("Bundled seed should parse");
        assert_eq!(seed.patients.len(), 3);
        assert_eq!(seed.diagnoses.len(), 1);

        let ana = &seed.patients[0];
        assert_eq!(ana.id, "1");
        assert_eq!(ana.name, "Ana López");
        assert_eq!(ana.allergies.as_deref(), Some(&["Penicilina".to_string()][..]));
        assert!(seed.patients.iter().all(|p| p.status == PatientStatus::Activo));

        assert_eq!(seed.diagnoses[0].patient_id, "1");
        assert_eq!(seed.diagnoses[0].alternatives.len(), 2);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let seed = SeedData::from_json("{}").expect("Empty object should parse");
        assert!(seed.patients.is_empty());
        assert!(seed.diagnoses.is_empty());
    }

    #[test]
    fn test_empty_seed_has_no_records() {
        let seed = SeedData::empty();
        assert!(seed.patients.is_empty());
        assert!(seed.diagnoses.is_empty());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(SeedData::from_json("{\"patients\": [42]}").is_err());
    }
}
