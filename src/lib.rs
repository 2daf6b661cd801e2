//! # MedDiag
//!
//! Clinic front-desk and assisted-diagnosis workflow in the terminal.
//!
//! This crate provides:
//! - Patient registration and search for admissions staff
//! - Symptom entry with a pluggable diagnosis suggester (mock by default)
//! - Role-based dashboards for doctors, admins and admissions
//!
//! All state lives in memory for the session; nothing is persisted.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core clinic types (Patient, DiagnosisResult, Role)
//! - `ports`: Trait definitions at the seams (store, suggester, directory)
//! - `adapters`: Concrete implementations (in-memory store, mock suggester)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::AppConfig;
pub use domain::{DiagnosisResult, Patient, Role};

/// Result type for MedDiag operations
pub type Result<T> = std::result::Result<T, MeddiagError>;

/// Login failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Email y contraseña son obligatorios")]
    MissingCredentials,

    /// Never produced by the demo directory, which accepts any email.
    #[error("Credenciales inválidas")]
    InvalidCredentials,
}

/// Main error type for MedDiag
#[derive(Debug, thiserror::Error)]
pub enum MeddiagError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
