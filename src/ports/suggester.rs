//! Suggester port: Trait for producing a diagnosis suggestion from symptoms.
//!
//! The shipped implementation is a random stub (`adapters::mock`). A real
//! model plugs in here without touching the diagnosis use case.

use crate::domain::AlternativeDiagnosis;

/// Output of a suggester, before it is tied to a patient.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub primary_diagnosis: String,
    /// 0.0 to 1.0
    pub confidence: f64,
    pub alternatives: Vec<AlternativeDiagnosis>,
}

/// Trait for diagnosis suggestion strategies.
pub trait DiagnosisSuggester: Send + Sync {
    /// Suggest a diagnosis for the given symptoms.
    ///
    /// # Arguments
    /// * `symptoms` - Selected symptoms in entry order (never empty)
    fn suggest(&self, symptoms: &[String]) -> Suggestion;

    /// Short name used in logs and on the diagnosis screen.
    fn name(&self) -> &str;
}
