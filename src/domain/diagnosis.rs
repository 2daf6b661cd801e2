//! Diagnosis records produced by the assisted-diagnosis flow.

use serde::{Deserialize, Serialize};

/// Confidence above which a diagnosis counts as "high confidence".
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// A runner-up diagnosis with its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeDiagnosis {
    pub diagnosis: String,
    pub confidence: f64,
}

impl AlternativeDiagnosis {
    #[must_use]
    pub fn new(diagnosis: impl Into<String>, confidence: f64) -> Self {
        Self {
            diagnosis: diagnosis.into(),
            confidence,
        }
    }
}

/// One completed diagnosis session.
///
/// `patient_name` is a copy taken at creation time, not a live reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    /// In entry order, without duplicates.
    pub symptoms: Vec<String>,
    pub primary_diagnosis: String,
    /// 0.0 to 1.0
    pub confidence: f64,
    pub alternatives: Vec<AlternativeDiagnosis>,
    pub recommendations: Vec<String>,
    pub date: String,
}

impl DiagnosisResult {
    #[must_use]
    pub fn is_high_confidence(&self) -> bool {
        self.confidence > HIGH_CONFIDENCE_THRESHOLD
    }
}

/// Diagnosis fields before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDiagnosis {
    pub patient_id: String,
    pub patient_name: String,
    pub symptoms: Vec<String>,
    pub primary_diagnosis: String,
    pub confidence: f64,
    pub alternatives: Vec<AlternativeDiagnosis>,
    pub recommendations: Vec<String>,
    pub date: String,
}

impl NewDiagnosis {
    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> DiagnosisResult {
        DiagnosisResult {
            id: id.into(),
            patient_id: self.patient_id,
            patient_name: self.patient_name,
            symptoms: self.symptoms,
            primary_diagnosis: self.primary_diagnosis,
            confidence: self.confidence,
            alternatives: self.alternatives,
            recommendations: self.recommendations,
            date: self.date,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_new_diagnosis(patient_id: &str, confidence: f64) -> NewDiagnosis {
    NewDiagnosis {
        patient_id: patient_id.to_string(),
        patient_name: "Ana López".to_string(),
        symptoms: vec!["Fiebre".to_string()],
        primary_diagnosis: "Migraña".to_string(),
        confidence,
        alternatives: vec![AlternativeDiagnosis::new("Sinusitis", 0.43)],
        recommendations: vec!["Realizar seguimiento en 2 semanas".to_string()],
        date: "2024-01-20".to_string(),
    }
}
