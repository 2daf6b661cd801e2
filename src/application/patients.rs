//! Patient list search and filter options.

use crate::domain::Patient;

/// Search box plus the two dropdown filters. Empty means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientFilter {
    pub search: String,
    pub eps: String,
    pub city: String,
}

impl PatientFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.eps.is_empty() && self.city.is_empty()
    }

    /// Whether `patient` passes every active filter.
    #[must_use]
    pub fn matches(&self, patient: &Patient) -> bool {
        let search = self.search.trim();
        let matches_search = search.is_empty()
            || patient
                .name
                .to_lowercase()
                .contains(&search.to_lowercase())
            || patient.document_number.contains(search);
        let matches_eps = self.eps.is_empty() || patient.eps == self.eps;
        let matches_city = self.city.is_empty() || patient.city == self.city;

        matches_search && matches_eps && matches_city
    }
}

/// Stateless queries over a patient list snapshot.
pub struct PatientQuery;

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|v| v == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

impl PatientQuery {
    /// Patients passing `filter`, in list order.
    #[must_use]
    pub fn filter(patients: &[Patient], filter: &PatientFilter) -> Vec<Patient> {
        if filter.is_empty() {
            return patients.to_vec();
        }
        patients
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    /// EPS values present in the list, first-seen order.
    #[must_use]
    pub fn distinct_eps(patients: &[Patient]) -> Vec<String> {
        distinct(patients.iter().map(|p| p.eps.as_str()))
    }

    /// Cities present in the list, first-seen order.
    #[must_use]
    pub fn distinct_cities(patients: &[Patient]) -> Vec<String> {
        distinct(patients.iter().map(|p| p.city.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::SeedData;

    fn seed_patients() -> Vec<Patient> {
        SeedData::demo().expect("Seed should parse").patients
    }

    fn names(patients: &[Patient]) -> Vec<&str> {
        patients.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_all() {
        let patients = seed_patients();
        let filter = PatientFilter::default();
        assert!(filter.is_empty());
        assert_eq!(PatientQuery::filter(&patients, &filter).len(), 3);
    }

    #[test]
    fn test_search_by_name_is_case_insensitive() {
        let patients = seed_patients();
        let filter = PatientFilter {
            search: "  ana LÓ ".to_string(),
            ..PatientFilter::default()
        };
        assert_eq!(names(&PatientQuery::filter(&patients, &filter)), vec!["Ana López"]);
    }

    #[test]
    fn test_search_by_document() {
        let patients = seed_patients();
        let filter = PatientFilter {
            search: "87654".to_string(),
            ..PatientFilter::default()
        };
        assert_eq!(names(&PatientQuery::filter(&patients, &filter)), vec!["Carlos Ruiz"]);
    }

    #[test]
    fn test_eps_and_city_are_exact() {
        let patients = seed_patients();

        let by_city = PatientFilter {
            city: "Cali".to_string(),
            ..PatientFilter::default()
        };
        assert_eq!(names(&PatientQuery::filter(&patients, &by_city)), vec!["Elena García"]);

        let partial_eps = PatientFilter {
            eps: "Sura".to_string(),
            ..PatientFilter::default()
        };
        assert!(PatientQuery::filter(&patients, &partial_eps).is_empty());

        let combined = PatientFilter {
            search: "ruiz".to_string(),
            eps: "Sura EPS".to_string(),
            city: String::new(),
        };
        assert!(PatientQuery::filter(&patients, &combined).is_empty());
    }

    #[test]
    fn test_distinct_options_keep_first_seen_order() {
        let mut patients = seed_patients();
        let mut dup = patients[0].clone();
        dup.id = "9".to_string();
        patients.push(dup);

        assert_eq!(
            PatientQuery::distinct_eps(&patients),
            vec!["Sura EPS", "Compensar EPS", "Sanitas EPS"]
        );
        assert_eq!(
            PatientQuery::distinct_cities(&patients),
            vec!["Bogotá", "Medellín", "Cali"]
        );
    }
}
