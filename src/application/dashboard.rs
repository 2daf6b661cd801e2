//! Dashboard service: Per-role summary figures.
//!
//! Counts come from the store. Trend figures, charts and task lists are
//! fixed demo values until a reporting backend exists.

use std::sync::Arc;

use crate::domain::{today, DiagnosisResult, Patient};
use crate::ports::ClinicStore;

/// Recent-activity lists show this many entries.
pub const RECENT_LIMIT: usize = 3;

/// Chart scale for the monthly diagnosis bars.
pub const MONTHLY_DIAGNOSES_SCALE: u32 = 70;
/// Chart scale for the monthly patient bars.
pub const MONTHLY_PATIENTS_SCALE: u32 = 25;

const MONTHLY_SERIES: [(&str, u32, u32); 6] = [
    ("Ene", 45, 12),
    ("Feb", 52, 15),
    ("Mar", 38, 8),
    ("Abr", 61, 18),
    ("May", 55, 16),
    ("Jun", 67, 22),
];

const DIAGNOSIS_TYPES: [(&str, u32); 5] = [
    ("Cardiovascular", 23),
    ("Respiratorio", 18),
    ("Digestivo", 15),
    ("Neurológico", 12),
    ("Otros", 8),
];

const EPS_DISTRIBUTION: [(&str, u32); 5] = [
    ("Sura EPS", 45),
    ("Compensar EPS", 38),
    ("Sanitas EPS", 32),
    ("Nueva EPS", 28),
    ("Famisanar", 22),
];

const PENDING_TASKS: [(&str, TaskPriority, &str); 3] = [
    ("Verificar documentos - Ana López", TaskPriority::Alta, "10:30 AM"),
    ("Actualizar EPS - Carlos Ruiz", TaskPriority::Media, "11:15 AM"),
    ("Contacto emergencia - Elena García", TaskPriority::Baja, "2:00 PM"),
];

/// `part / total` as a percentage, 0 when `total` is 0.
#[must_use]
pub fn percentage(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        part / total * 100.0
    }
}

/// One labelled bar with its share of the whole.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub label: String,
    pub count: u32,
    pub percentage: f64,
}

fn shares(rows: &[(&str, u32)]) -> Vec<Share> {
    let total: u32 = rows.iter().map(|(_, count)| count).sum();
    rows.iter()
        .map(|(label, count)| Share {
            label: (*label).to_string(),
            count: *count,
            percentage: percentage(f64::from(*count), f64::from(total)),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyFigure {
    pub month: String,
    pub diagnoses: u32,
    pub patients: u32,
    /// Bar length against [`MONTHLY_DIAGNOSES_SCALE`].
    pub diagnoses_pct: f64,
    /// Bar length against [`MONTHLY_PATIENTS_SCALE`].
    pub patients_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPriority {
    Alta,
    Media,
    Baja,
}

impl TaskPriority {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Alta => "alta",
            Self::Media => "media",
            Self::Baja => "baja",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingTask {
    pub task: String,
    pub priority: TaskPriority,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoctorStats {
    pub active_patients: usize,
    pub total_diagnoses: usize,
    pub high_confidence: usize,
    pub this_week: u32,
    pub model_accuracy: u32,
    pub system_uptime: u32,
    pub recent_patients: Vec<Patient>,
    /// Newest first.
    pub recent_diagnoses: Vec<DiagnosisResult>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminStats {
    pub total_users: usize,
    pub active_patients: usize,
    pub total_diagnoses: usize,
    /// `None` until a diagnosis exists.
    pub average_confidence: Option<f64>,
    pub uptime: String,
    pub monthly: Vec<MonthlyFigure>,
    pub diagnosis_types: Vec<Share>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdmissionsStats {
    pub today_registrations: usize,
    pub this_week: u32,
    pub pending_documents: u32,
    pub active_patients: usize,
    /// Newest first.
    pub recent_registrations: Vec<Patient>,
    pub eps_distribution: Vec<Share>,
    pub pending_tasks: Vec<PendingTask>,
    pub documents_complete: u32,
    pub contacts_verified: u32,
}

/// Service computing the role dashboards.
pub struct DashboardService<S>
where
    S: ClinicStore,
{
    store: Arc<S>,
}

fn last_newest_first<T: Clone>(items: &[T]) -> Vec<T> {
    items.iter().rev().take(RECENT_LIMIT).cloned().collect()
}

fn count_active(patients: &[Patient]) -> usize {
    patients.iter().filter(|p| p.is_active()).count()
}

impl<S> DashboardService<S>
where
    S: ClinicStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn doctor(&self) -> DoctorStats {
        let patients = self.store.patients();
        let diagnoses = self.store.diagnoses();

        DoctorStats {
            active_patients: count_active(&patients),
            total_diagnoses: diagnoses.len(),
            high_confidence: diagnoses.iter().filter(|d| d.is_high_confidence()).count(),
            this_week: 12,
            model_accuracy: 89,
            system_uptime: 94,
            recent_patients: patients.iter().take(RECENT_LIMIT).cloned().collect(),
            recent_diagnoses: last_newest_first(&diagnoses),
        }
    }

    #[must_use]
    pub fn admin(&self) -> AdminStats {
        let patients = self.store.patients();
        let diagnoses = self.store.diagnoses();

        let average_confidence = if diagnoses.is_empty() {
            None
        } else {
            let sum: f64 = diagnoses.iter().map(|d| d.confidence).sum();
            Some(sum / diagnoses.len() as f64)
        };

        let monthly = MONTHLY_SERIES
            .iter()
            .map(|(month, diagnoses, patients)| MonthlyFigure {
                month: (*month).to_string(),
                diagnoses: *diagnoses,
                patients: *patients,
                diagnoses_pct: percentage(
                    f64::from(*diagnoses),
                    f64::from(MONTHLY_DIAGNOSES_SCALE),
                ),
                patients_pct: percentage(f64::from(*patients), f64::from(MONTHLY_PATIENTS_SCALE)),
            })
            .collect();

        AdminStats {
            // Patients plus the two staff accounts
            total_users: patients.len() + 2,
            active_patients: count_active(&patients),
            total_diagnoses: diagnoses.len(),
            average_confidence,
            uptime: "99.9%".to_string(),
            monthly,
            diagnosis_types: shares(&DIAGNOSIS_TYPES),
        }
    }

    #[must_use]
    pub fn admissions(&self) -> AdmissionsStats {
        self.admissions_on(&today())
    }

    /// Admissions figures with `date` as the current day.
    #[must_use]
    pub fn admissions_on(&self, date: &str) -> AdmissionsStats {
        let patients = self.store.patients();

        AdmissionsStats {
            today_registrations: patients
                .iter()
                .filter(|p| p.registration_date == date)
                .count(),
            this_week: 12,
            pending_documents: 3,
            active_patients: count_active(&patients),
            recent_registrations: last_newest_first(&patients),
            eps_distribution: shares(&EPS_DISTRIBUTION),
            pending_tasks: PENDING_TASKS
                .iter()
                .map(|(task, priority, time)| PendingTask {
                    task: (*task).to_string(),
                    priority: *priority,
                    time: (*time).to_string(),
                })
                .collect(),
            documents_complete: 96,
            contacts_verified: 89,
        }
    }
}
