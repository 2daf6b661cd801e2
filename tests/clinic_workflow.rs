//! End-to-end workflows over the public services, without the terminal.

use std::sync::{Arc, Mutex};

use meddiag::adapters::sanitize::SanitizingMakeWriter;
use meddiag::adapters::{InMemoryStore, RandomSuggester, SeedData, StaticDirectory};
use meddiag::application::{
    DashboardService, DiagnosisService, PatientFilter, PatientQuery, RegistrationForm,
    RegistrationService, SessionService,
};
use meddiag::domain::{today, PatientStatus, Role, SymptomSelection};
use meddiag::ports::ClinicStore;
use meddiag::MeddiagError;

fn seeded_store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::with_seed(
        SeedData::demo().expect("Demo seed should parse"),
    ))
}

fn test_user_form() -> RegistrationForm {
    RegistrationForm {
        name: "Test User".to_string(),
        age: "41".to_string(),
        document_number: "55667788".to_string(),
        birth_date: "1984-07-19".to_string(),
        address: "Carrera 7 # 45-10".to_string(),
        city: "Barranquilla".to_string(),
        eps: "Nueva EPS".to_string(),
        emergency_contact_name: "Rosa User".to_string(),
        emergency_contact_phone: "3009876543".to_string(),
        emergency_contact_relationship: "Hermana".to_string(),
        allergies: "Polen, ".to_string(),
        phone: "3001234567".to_string(),
        ..RegistrationForm::default()
    }
}

#[test]
fn admissions_then_diagnosis_updates_dashboards() {
    let store = seeded_store();
    let session = SessionService::new(Arc::new(StaticDirectory::demo()));
    let registration = RegistrationService::new(store.clone());
    let diagnosis = DiagnosisService::new(store.clone(), Arc::new(RandomSuggester::with_seed(11)));
    let dashboard = DashboardService::new(store.clone());

    let clerk = session
        .login("admisiones@hospital.com", "demo")
        .expect("Login should succeed");
    assert_eq!(clerk.role, Role::Admisiones);

    let id = registration
        .register(test_user_form())
        .expect("Complete form should register");
    let added = store.find_patient(&id).expect("New patient should be stored");
    assert_eq!(added.registration_date, today());
    assert_eq!(added.status, PatientStatus::Activo);
    assert_eq!(added.allergies, Some(vec!["Polen".to_string()]));

    let admissions = dashboard.admissions();
    assert_eq!(admissions.today_registrations, 1);
    assert_eq!(admissions.active_patients, 4);
    assert_eq!(
        admissions.recent_registrations.first().map(|p| p.name.as_str()),
        Some("Test User")
    );

    session.logout();
    let doctor = session
        .login("maria@hospital.com", "demo")
        .expect("Login should succeed");
    assert_eq!(doctor.role, Role::Medico);

    let mut symptoms = SymptomSelection::new();
    symptoms.add("Fiebre");
    symptoms.add("Tos");
    let result = diagnosis
        .submit(&id, &symptoms)
        .expect("Diagnosis should be produced");
    assert_eq!(result.patient_name, "Test User");
    assert_eq!(result.symptoms, vec!["Fiebre".to_string(), "Tos".to_string()]);
    assert_eq!(result.alternatives.len(), 2);

    let stats = dashboard.doctor();
    assert_eq!(stats.total_diagnoses, 2);
    assert_eq!(stats.active_patients, 4);

    let admin = dashboard.admin();
    assert!(admin.average_confidence.is_some());
}

#[test]
fn invalid_registration_leaves_store_unchanged() {
    let store = seeded_store();
    let registration = RegistrationService::new(store.clone());

    let form = RegistrationForm {
        phone: String::new(),
        ..test_user_form()
    };
    let err = registration
        .register(form)
        .expect_err("Missing phone should be rejected");

    assert!(matches!(err, MeddiagError::Validation(_)));
    assert_eq!(store.patient_count(), 3);
}

#[test]
fn deactivated_patient_drops_out_of_diagnosis_picker() {
    let store = seeded_store();
    let diagnosis = DiagnosisService::new(store.clone(), Arc::new(RandomSuggester::with_seed(5)));

    assert!(store.update_patient("2", &meddiag::domain::PatientUpdate::status(PatientStatus::Inactivo)));

    let ids: Vec<String> = diagnosis.active_patients().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["1".to_string(), "3".to_string()]);

    let mut symptoms = SymptomSelection::new();
    symptoms.add("Fatiga");
    assert!(diagnosis.submit("2", &symptoms).is_err());
    assert_eq!(store.diagnosis_count(), 1);
}

#[test]
fn patient_search_combines_filters() {
    let store = seeded_store();
    let patients = store.patients();

    let by_name = PatientFilter {
        search: "ana".to_string(),
        ..PatientFilter::default()
    };
    let found = PatientQuery::filter(&patients, &by_name);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Ana López");

    let by_document = PatientFilter {
        search: "8765".to_string(),
        ..PatientFilter::default()
    };
    assert_eq!(PatientQuery::filter(&patients, &by_document)[0].name, "Carlos Ruiz");

    let mismatched = PatientFilter {
        search: "ana".to_string(),
        city: "Cali".to_string(),
        ..PatientFilter::default()
    };
    assert!(PatientQuery::filter(&patients, &mismatched).is_empty());
}

#[test]
fn file_log_output_is_sanitized() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let path = dir.path().join("meddiag.log");
    let file = std::fs::File::create(&path).expect("Should create log file");

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(SanitizingMakeWriter::new(Mutex::new(file)))
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("Contact ana.lopez@email.com, CC 12345678, tel 3001234567");
    });

    let written = std::fs::read_to_string(&path).expect("Should read log file");
    assert!(written.contains("[REDACTED-EMAIL]"));
    assert!(written.contains("[REDACTED-DOC]"));
    assert!(written.contains("[REDACTED-PHONE]"));
    assert!(!written.contains("12345678"));
    assert!(!written.contains("ana.lopez"));
}
