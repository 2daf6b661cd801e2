//! Staff identity and role-gated navigation.

use serde::{Deserialize, Serialize};

/// Staff role; decides which views are reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Medico,
    Admin,
    Admisiones,
}

/// Screens reachable from the role menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    DoctorDashboard,
    Symptoms,
    Patients,
    History,
    AdminDashboard,
    UserManagement,
    Statistics,
    Settings,
    AdmissionsDashboard,
    PatientRegistration,
    PatientList,
    EpsManagement,
}

impl View {
    /// Menu label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::DoctorDashboard | Self::AdminDashboard | Self::AdmissionsDashboard => {
                "Dashboard"
            }
            Self::Symptoms => "Diagnóstico",
            Self::Patients => "Pacientes",
            Self::History => "Historial",
            Self::UserManagement => "Usuarios",
            Self::Statistics => "Estadísticas",
            Self::Settings => "Configuración",
            Self::PatientRegistration => "Registrar Paciente",
            Self::PatientList => "Lista de Pacientes",
            Self::EpsManagement => "Gestión EPS",
        }
    }

    /// Title for views that only show an "in development" notice.
    #[must_use]
    pub fn placeholder_title(&self) -> Option<&'static str> {
        match self {
            Self::Patients => Some("Gestión de Pacientes"),
            Self::History => Some("Historial Médico"),
            Self::UserManagement => Some("Gestión de Usuarios"),
            Self::Statistics => Some("Estadísticas Avanzadas"),
            Self::Settings => Some("Configuración del Sistema"),
            Self::EpsManagement => Some("Gestión EPS"),
            _ => None,
        }
    }
}

impl Role {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Medico => "medico",
            Self::Admin => "admin",
            Self::Admisiones => "admisiones",
        }
    }

    /// Landing view after login.
    #[must_use]
    pub fn home(&self) -> View {
        match self {
            Self::Medico => View::DoctorDashboard,
            Self::Admin => View::AdminDashboard,
            Self::Admisiones => View::AdmissionsDashboard,
        }
    }

    /// Views in menu order.
    #[must_use]
    pub fn menu(&self) -> &'static [View] {
        match self {
            Self::Medico => &[
                View::DoctorDashboard,
                View::Symptoms,
                View::Patients,
                View::History,
            ],
            Self::Admin => &[
                View::AdminDashboard,
                View::UserManagement,
                View::Statistics,
                View::Settings,
            ],
            Self::Admisiones => &[
                View::AdmissionsDashboard,
                View::PatientRegistration,
                View::PatientList,
                View::EpsManagement,
            ],
        }
    }

    #[must_use]
    pub fn can_access(&self, view: View) -> bool {
        self.menu().contains(&view)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A logged-in staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
    pub role: Role,
}
