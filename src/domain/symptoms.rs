//! Symptom selection for the diagnosis form.

use serde::{Deserialize, Serialize};

/// Quick-pick symptoms offered on the diagnosis form.
pub const COMMON_SYMPTOMS: [&str; 16] = [
    "Dolor de cabeza",
    "Fiebre",
    "Tos",
    "Fatiga",
    "Náuseas",
    "Mareos",
    "Dolor abdominal",
    "Dificultad para respirar",
    "Dolor en el pecho",
    "Pérdida de apetito",
    "Dolor muscular",
    "Visión borrosa",
    "Sed excesiva",
    "Palpitaciones",
    "Insomnio",
    "Dolor de garganta",
];

/// Ordered symptom list; duplicates are dropped when entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomSelection {
    items: Vec<String>,
}

impl SymptomSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symptom. Returns `false` if it was blank or already present.
    pub fn add(&mut self, symptom: &str) -> bool {
        let symptom = symptom.trim();
        if symptom.is_empty() || self.contains(symptom) {
            return false;
        }
        self.items.push(symptom.to_string());
        true
    }

    /// Remove a symptom. Returns `false` if it was not selected.
    pub fn remove(&mut self, symptom: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|s| s != symptom);
        self.items.len() != before
    }

    #[must_use]
    pub fn contains(&self, symptom: &str) -> bool {
        self.items.iter().any(|s| s == symptom)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<S: AsRef<str>> FromIterator<S> for SymptomSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for s in iter {
            selection.add(s.as_ref());
        }
        selection
    }
}
