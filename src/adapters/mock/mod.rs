//! Mock adapter: Random implementation of DiagnosisSuggester.
//!
//! Picks one of three canned results uniformly at random. The symptoms are
//! not inspected; this is a placeholder until a real model is plugged in
//! behind the same port.
//!
//! # Mutex Behavior
//!
//! The RNG sits behind a `Mutex`. A poisoned lock is recovered, since the
//! generator state cannot be left half-updated in a way that matters here.

use std::sync::{Mutex, PoisonError};

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::domain::AlternativeDiagnosis;
use crate::ports::{DiagnosisSuggester, Suggestion};

/// A canned diagnosis result.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub diagnosis: &'static str,
    pub confidence: f64,
    pub alternatives: [(&'static str, f64); 2],
}

impl Template {
    fn to_suggestion(self) -> Suggestion {
        Suggestion {
            primary_diagnosis: self.diagnosis.to_string(),
            confidence: self.confidence,
            alternatives: self
                .alternatives
                .iter()
                .map(|(name, confidence)| AlternativeDiagnosis::new(*name, *confidence))
                .collect(),
        }
    }
}

pub const TEMPLATES: [Template; 3] = [
    Template {
        diagnosis: "Hipertensión arterial",
        confidence: 0.89,
        alternatives: [("Migraña", 0.65), ("Tensión ocular", 0.42)],
    },
    Template {
        diagnosis: "Diabetes tipo 2",
        confidence: 0.85,
        alternatives: [
            ("Síndrome metabólico", 0.71),
            ("Resistencia a la insulina", 0.58),
        ],
    },
    Template {
        diagnosis: "Migraña",
        confidence: 0.92,
        alternatives: [("Cefalea tensional", 0.76), ("Sinusitis", 0.43)],
    },
];

/// Random suggester over [`TEMPLATES`].
pub struct RandomSuggester {
    rng: Mutex<ChaCha20Rng>,
}

impl RandomSuggester {
    /// Create a suggester seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::from_entropy()),
        }
    }

    /// Create a deterministic suggester (repeatable demos and tests).
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }

    fn pick(&self) -> Template {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        TEMPLATES[rng.gen_range(0..TEMPLATES.len())]
    }
}

impl Default for RandomSuggester {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosisSuggester for RandomSuggester {
    fn suggest(&self, symptoms: &[String]) -> Suggestion {
        let template = self.pick();
        tracing::debug!(
            "Mock suggester picked a template ({} symptoms ignored)",
            symptoms.len()
        );
        template.to_suggestion()
    }

    fn name(&self) -> &str {
        "mock-random v2.1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn symptoms() -> Vec<String> {
        vec!["Fiebre".to_string(), "Tos".to_string()]
    }

    #[test]
    fn test_suggestion_is_one_of_the_templates() {
        let suggester = RandomSuggester::new();
        for _ in 0..20 {
            let s = suggester.suggest(&symptoms());
            assert!(TEMPLATES.iter().any(|t| t.diagnosis == s.primary_diagnosis
                && (t.confidence - s.confidence).abs() < f64::EPSILON));
            assert_eq!(s.alternatives.len(), 2);
        }
    }

    #[test]
    fn test_all_templates_are_reachable() {
        let suggester = RandomSuggester::with_seed(7);
        let seen: HashSet<String> = (0..200)
            .map(|_| suggester.suggest(&symptoms()).primary_diagnosis)
            .collect();
        assert_eq!(seen.len(), TEMPLATES.len());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = RandomSuggester::with_seed(42);
        let b = RandomSuggester::with_seed(42);
        for _ in 0..10 {
            assert_eq!(a.suggest(&symptoms()), b.suggest(&symptoms()));
        }
    }

    #[test]
    fn test_symptoms_do_not_matter() {
        let a = RandomSuggester::with_seed(3);
        let b = RandomSuggester::with_seed(3);
        let other = vec!["Insomnio".to_string()];
        assert_eq!(a.suggest(&symptoms()), b.suggest(&other));
    }
}
