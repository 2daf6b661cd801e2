//! Main TUI application state machine.
//!
//! Handles:
//! - Login and role-gated navigation
//! - Input event handling per view
//! - Service integration
//! - Simulated latency via the background worker

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};

use crate::adapters::{InMemoryStore, RandomSuggester, SeedData, StaticDirectory};
use crate::application::{DashboardService, DiagnosisService, RegistrationService, SessionService};
use crate::config::AppConfig;
use crate::domain::{today, DiagnosisResult, PatientStatus, PatientUpdate, Role, User, View};
use crate::ports::ClinicStore;

use super::ui::{
    dashboard::{render_admin_dashboard, render_admissions_dashboard, render_doctor_dashboard},
    login::{render_login, LoginState},
    patient_list::{render_patient_list, ListFocus, PatientListState},
    placeholder::render_placeholder,
    registration::{render_registration, RegistrationFormState, RegistrationPhase},
    render_disclaimer, render_menu_keys, render_sidebar,
    symptoms::{render_symptoms, DiagnosisPhase, SymptomsFocus, SymptomsFormState},
};
use super::worker::{DelayedWorker, TaskHandle, TaskProgress};

/// Current screen in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Main,
}

/// Which pane receives keys on the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Menu,
    Content,
}

/// Main application state
pub struct App {
    config: AppConfig,

    screen: Screen,
    should_quit: bool,

    store: Arc<InMemoryStore>,
    session: SessionService<StaticDirectory>,
    registration: Arc<RegistrationService<InMemoryStore>>,
    diagnosis: Arc<DiagnosisService<InMemoryStore, RandomSuggester>>,
    dashboard: DashboardService<InMemoryStore>,

    login_state: LoginState,
    view: View,
    menu_index: usize,
    focus: Focus,

    symptoms_state: SymptomsFormState,
    registration_state: RegistrationFormState,
    patient_list_state: PatientListState,

    /// Pending diagnosis (if running)
    diagnosis_worker: Option<TaskHandle<DiagnosisResult>>,
    /// Pending registration (if running)
    registration_worker: Option<TaskHandle<String>>,
}

impl App {
    /// Create the application with default adapters for `config`.
    ///
    /// # Errors
    /// Returns error if the bundled demo data cannot be parsed.
    pub fn new(config: AppConfig) -> Result<Self> {
        let seed = if config.seed_demo {
            SeedData::demo()?
        } else {
            SeedData::empty()
        };
        let store = InMemoryStore::with_seed(seed);
        let suggester = match config.suggester_seed {
            Some(seed) => RandomSuggester::with_seed(seed),
            None => RandomSuggester::new(),
        };

        Ok(Self::with_dependencies(
            config,
            Arc::new(store),
            Arc::new(suggester),
            Arc::new(StaticDirectory::demo()),
        ))
    }

    /// Create application with injected dependencies (Composition Root pattern).
    pub fn with_dependencies(
        config: AppConfig,
        store: Arc<InMemoryStore>,
        suggester: Arc<RandomSuggester>,
        directory: Arc<StaticDirectory>,
    ) -> Self {
        Self {
            config,
            screen: Screen::Login,
            should_quit: false,
            session: SessionService::new(directory),
            registration: Arc::new(RegistrationService::new(store.clone())),
            diagnosis: Arc::new(DiagnosisService::new(store.clone(), suggester)),
            dashboard: DashboardService::new(store.clone()),
            store,
            login_state: LoginState::default(),
            view: View::DoctorDashboard,
            menu_index: 0,
            focus: Focus::Menu,
            symptoms_state: SymptomsFormState::default(),
            registration_state: RegistrationFormState::default(),
            patient_list_state: PatientListState::default(),
            diagnosis_worker: None,
            registration_worker: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.tick();

            terminal.draw(|f| self.render(f))?;

            // Short poll to stay responsive
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.session.current()
    }

    // === Rendering ===

    fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        match (self.screen, self.session.current()) {
            (Screen::Main, Some(user)) => self.render_main(f, chunks[0], &user),
            _ => render_login(f, chunks[0], &self.login_state),
        }

        render_disclaimer(f, chunks[1]);
    }

    fn render_main(&self, f: &mut Frame, area: Rect, user: &User) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(26), Constraint::Min(0)])
            .split(area);

        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(5)])
            .split(columns[0]);

        render_sidebar(
            f,
            sidebar[0],
            user,
            user.role.menu(),
            self.menu_index,
            self.focus == Focus::Menu,
        );
        render_menu_keys(f, sidebar[1]);

        let content = columns[1];
        match self.view {
            View::DoctorDashboard => {
                render_doctor_dashboard(f, content, &user.name, &self.dashboard.doctor());
            }
            View::AdminDashboard => render_admin_dashboard(f, content, &self.dashboard.admin()),
            View::AdmissionsDashboard => {
                render_admissions_dashboard(f, content, &self.dashboard.admissions());
            }
            View::Symptoms => render_symptoms(
                f,
                content,
                &self.symptoms_state,
                self.diagnosis.suggester_name(),
            ),
            View::PatientRegistration => {
                render_registration(f, content, &self.registration_state);
            }
            View::PatientList => render_patient_list(
                f,
                content,
                &self.patient_list_state,
                &self.store.patients(),
            ),
            other => render_placeholder(f, content, other.placeholder_title().unwrap_or("")),
        }
    }

    // === Background work ===

    /// Poll workers, advance progress bars and expire the success banner.
    pub fn tick(&mut self) {
        self.poll_diagnosis_worker();
        self.poll_registration_worker();

        if let RegistrationPhase::Success { since } = self.registration_state.phase {
            if since.elapsed() >= self.config.success_reset {
                self.registration_state.reset();
            }
        }
    }

    fn poll_diagnosis_worker(&mut self) {
        let Some(worker) = self.diagnosis_worker.as_ref() else {
            return;
        };

        if self.symptoms_state.is_processing() {
            self.symptoms_state.phase = DiagnosisPhase::Processing {
                progress: worker.fraction_elapsed(),
            };
        }

        while let Some(progress) = self.diagnosis_worker.as_ref().and_then(TaskHandle::try_recv) {
            match progress {
                TaskProgress::Started => {}
                TaskProgress::Complete(result) => {
                    self.symptoms_state.phase = DiagnosisPhase::Complete { result };
                    self.diagnosis_worker = None;
                }
                TaskProgress::Error(message) => {
                    self.symptoms_state.phase = DiagnosisPhase::Error { message };
                    self.diagnosis_worker = None;
                }
            }
        }
    }

    fn poll_registration_worker(&mut self) {
        let Some(worker) = self.registration_worker.as_ref() else {
            return;
        };

        if let RegistrationPhase::Saving { .. } = self.registration_state.phase {
            self.registration_state.phase = RegistrationPhase::Saving {
                progress: worker.fraction_elapsed(),
            };
        }

        while let Some(progress) = self
            .registration_worker
            .as_ref()
            .and_then(TaskHandle::try_recv)
        {
            match progress {
                TaskProgress::Started => {}
                TaskProgress::Complete(_id) => {
                    self.registration_state.phase = RegistrationPhase::Success {
                        since: std::time::Instant::now(),
                    };
                    self.registration_worker = None;
                }
                TaskProgress::Error(message) => {
                    self.registration_state.phase = RegistrationPhase::Editing;
                    self.registration_state.error_message = Some(message);
                    self.registration_worker = None;
                }
            }
        }
    }

    // === Input ===

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Main => match self.focus {
                Focus::Menu => self.handle_menu_key(key),
                Focus::Content => self.handle_content_key(key),
            },
        }
    }

    fn handle_login_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login_state.next_field();
            }
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => self.login_state.delete_char(),
            KeyCode::Char(c) => self.login_state.input_char(c),
            _ => {}
        }
    }

    fn submit_login(&mut self) {
        match self
            .session
            .login(&self.login_state.email, &self.login_state.password)
        {
            Ok(user) => {
                self.login_state.reset();
                self.screen = Screen::Main;
                self.menu_index = 0;
                self.focus = Focus::Menu;
                self.view = user.role.home();
            }
            Err(e) => {
                self.login_state.clear_sensitive();
                self.login_state.error = Some(e.to_string());
            }
        }
    }

    fn role(&self) -> Option<Role> {
        self.session.current().map(|u| u.role)
    }

    fn handle_menu_key(&mut self, key: KeyCode) {
        let Some(role) = self.role() else {
            self.screen = Screen::Login;
            return;
        };
        let menu = role.menu();

        match key {
            KeyCode::Up => {
                self.menu_index = self.menu_index.checked_sub(1).unwrap_or(menu.len() - 1);
            }
            KeyCode::Down => {
                self.menu_index = (self.menu_index + 1) % menu.len();
            }
            KeyCode::Enter | KeyCode::Right => {
                if let Some(view) = menu.get(self.menu_index).copied() {
                    self.open_view(view);
                }
            }
            KeyCode::Char('l') | KeyCode::Char('L') => self.logout(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
    }

    /// Switch to `view` if the current role may see it.
    pub fn open_view(&mut self, view: View) {
        let Some(role) = self.role() else {
            return;
        };
        if !role.can_access(view) {
            tracing::warn!("View {:?} not available for role {}", view, role);
            return;
        }

        if let Some(index) = role.menu().iter().position(|v| *v == view) {
            self.menu_index = index;
        }
        self.view = view;
        self.focus = Focus::Content;
        tracing::debug!("Opened view {:?}", view);

        if view == View::Symptoms && matches!(self.symptoms_state.phase, DiagnosisPhase::Editing) {
            self.refresh_symptom_patients();
        }
    }

    /// Reload the active patients, keeping the current pick when still present.
    fn refresh_symptom_patients(&mut self) {
        let picked = self.symptoms_state.selected_patient().map(|p| p.id.clone());
        self.symptoms_state.patients = self.diagnosis.active_patients();
        self.symptoms_state.patient_index = picked.and_then(|id| {
            self.symptoms_state
                .patients
                .iter()
                .position(|p| p.id == id)
        });
    }

    fn logout(&mut self) {
        self.session.logout();
        self.screen = Screen::Login;
        self.focus = Focus::Menu;
        self.menu_index = 0;
        self.symptoms_state = SymptomsFormState::default();
        self.registration_state = RegistrationFormState::default();
        self.patient_list_state = PatientListState::default();
        self.diagnosis_worker = None;
        self.registration_worker = None;
    }

    fn handle_content_key(&mut self, key: KeyCode) {
        match self.view {
            View::Symptoms => self.handle_symptoms_key(key),
            View::PatientRegistration => self.handle_registration_key(key),
            View::PatientList => self.handle_patient_list_key(key),
            _ => {
                if matches!(key, KeyCode::Esc | KeyCode::Left) {
                    self.focus = Focus::Menu;
                }
            }
        }
    }

    fn handle_symptoms_key(&mut self, key: KeyCode) {
        if key == KeyCode::Esc {
            self.focus = Focus::Menu;
            return;
        }

        let state = &mut self.symptoms_state;
        match state.phase {
            DiagnosisPhase::Processing { .. } => {}
            DiagnosisPhase::Complete { .. } | DiagnosisPhase::Error { .. } => {
                if key == KeyCode::Enter {
                    state.reset();
                    self.refresh_symptom_patients();
                }
            }
            DiagnosisPhase::Editing => match key {
                KeyCode::Tab => state.next_focus(),
                KeyCode::Left => state.move_horizontal(false),
                KeyCode::Right => state.move_horizontal(true),
                KeyCode::Backspace | KeyCode::Delete => state.delete_char(),
                KeyCode::Char(c) => state.input_char(c),
                KeyCode::Enter => match state.focus {
                    SymptomsFocus::Input => state.add_typed(),
                    SymptomsFocus::QuickPick => state.toggle_quick_pick(),
                    SymptomsFocus::Selected => state.remove_selected(),
                    SymptomsFocus::Patient | SymptomsFocus::Submit => self.submit_diagnosis(),
                },
                _ => {}
            },
        }
    }

    fn submit_diagnosis(&mut self) {
        let patient_id = match self.symptoms_state.ready_to_submit() {
            Ok(id) => id,
            Err(message) => {
                self.symptoms_state.error_message = Some(message);
                return;
            }
        };

        let symptoms = self.symptoms_state.selection.clone();
        let service = Arc::clone(&self.diagnosis);

        self.symptoms_state.phase = DiagnosisPhase::Processing { progress: 0.0 };
        self.symptoms_state.error_message = None;
        self.diagnosis_worker = Some(DelayedWorker::spawn(
            self.config.diagnosis_delay,
            move || service.submit(&patient_id, &symptoms),
        ));
    }

    fn handle_registration_key(&mut self, key: KeyCode) {
        if key == KeyCode::Esc {
            self.focus = Focus::Menu;
            return;
        }

        let state = &mut self.registration_state;
        if !state.is_editing() {
            return;
        }

        match key {
            KeyCode::Up | KeyCode::BackTab => state.prev_field(),
            KeyCode::Down | KeyCode::Tab => state.next_field(),
            KeyCode::Left => state.cycle_choice(false),
            KeyCode::Right => state.cycle_choice(true),
            KeyCode::Backspace => state.delete_char(),
            KeyCode::Char(c) => state.input_char(c),
            KeyCode::Enter => self.submit_registration(),
            _ => {}
        }
    }

    fn submit_registration(&mut self) {
        let form = self.registration_state.to_form();

        // Same checks the service runs, surfaced before the wait
        if let Err(e) = form.clone().into_new_patient(&today()) {
            self.registration_state.error_message = Some(e.to_string());
            return;
        }

        let service = Arc::clone(&self.registration);
        self.registration_state.phase = RegistrationPhase::Saving { progress: 0.0 };
        self.registration_state.error_message = None;
        self.registration_worker = Some(DelayedWorker::spawn(
            self.config.registration_delay,
            move || service.register(form),
        ));
    }

    fn handle_patient_list_key(&mut self, key: KeyCode) {
        let patients = self.store.patients();
        let state = &mut self.patient_list_state;
        state.notice = None;

        if state.confirm_delete {
            match key {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    if let Some(id) = state.selected_id(&patients) {
                        if self.store.delete_patient(&id) {
                            state.notice = Some("Paciente eliminado".to_string());
                            if state.detail.as_deref() == Some(id.as_str()) {
                                state.detail = None;
                            }
                        }
                    }
                    state.confirm_delete = false;
                    let remaining = state.visible(&self.store.patients()).len();
                    state.clamp(remaining);
                }
                _ => state.confirm_delete = false,
            }
            return;
        }

        match key {
            KeyCode::Esc => {
                if state.detail.take().is_none() {
                    self.focus = Focus::Menu;
                }
            }
            KeyCode::Tab => state.next_focus(),
            KeyCode::Left => state.cycle_filter(&patients, false),
            KeyCode::Right => state.cycle_filter(&patients, true),
            KeyCode::Backspace => state.delete_char(),
            KeyCode::Up => state.move_selection(state.visible(&patients).len(), false),
            KeyCode::Down => state.move_selection(state.visible(&patients).len(), true),
            KeyCode::Enter if state.focus == ListFocus::Table => {
                let id = state.selected_id(&patients);
                state.detail = if state.detail == id { None } else { id };
            }
            KeyCode::Char(c) if state.focus == ListFocus::Search => state.input_char(c),
            KeyCode::Char('d') | KeyCode::Char('D') if state.focus == ListFocus::Table => {
                state.confirm_delete = state.selected_id(&patients).is_some();
            }
            KeyCode::Char('e') | KeyCode::Char('E') if state.focus == ListFocus::Table => {
                if let Some(id) = state.selected_id(&patients) {
                    let next = match patients.iter().find(|p| p.id == id).map(|p| p.status) {
                        Some(PatientStatus::Activo) => PatientStatus::Inactivo,
                        _ => PatientStatus::Activo,
                    };
                    if self.store.update_patient(&id, &PatientUpdate::status(next)) {
                        state.notice = Some(format!("Estado actualizado: {next}"));
                    }
                    let remaining = state.visible(&self.store.patients()).len();
                    state.clamp(remaining);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn create_test_app() -> App {
        let config = AppConfig {
            diagnosis_delay: Duration::ZERO,
            registration_delay: Duration::ZERO,
            success_reset: Duration::ZERO,
            ..AppConfig::default()
        };
        let store = Arc::new(InMemoryStore::with_seed(
            SeedData::demo().expect("Seed should parse"),
        ));
        App::with_dependencies(
            config,
            store,
            Arc::new(RandomSuggester::with_seed(3)),
            Arc::new(StaticDirectory::demo()),
        )
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        text.chars().for_each(|c| press(app, KeyCode::Char(c)));
    }

    fn login(app: &mut App, email: &str) {
        type_text(app, email);
        press(app, KeyCode::Tab);
        type_text(app, "demo");
        press(app, KeyCode::Enter);
    }

    fn pump_until(app: &mut App, done: impl Fn(&App) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(app) {
            assert!(Instant::now() < deadline, "Worker should finish in time");
            app.tick();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_new_without_demo_data_starts_blank() {
        let config = AppConfig {
            seed_demo: false,
            suggester_seed: Some(1),
            ..AppConfig::default()
        };
        let app = App::new(config).expect("App should build");
        assert_eq!(app.store.patient_count(), 0);
        assert_eq!(app.store.diagnosis_count(), 0);
    }

    #[test]
    fn test_login_routes_to_role_home() {
        let mut app = create_test_app();
        login(&mut app, "maria@hospital.com");

        assert_eq!(app.screen(), Screen::Main);
        assert_eq!(app.view(), View::DoctorDashboard);
        assert_eq!(app.current_user().map(|u| u.role), Some(Role::Medico));
        assert!(app.login_state.password.is_empty());
    }

    #[test]
    fn test_blank_password_shows_error() {
        let mut app = create_test_app();
        type_text(&mut app, "maria@hospital.com");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(
            app.login_state.error.as_deref(),
            Some("Email y contraseña son obligatorios")
        );
    }

    #[test]
    fn test_menu_navigation_and_logout() {
        let mut app = create_test_app();
        login(&mut app, "admin@hospital.com");

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view(), View::Settings);
        assert_eq!(app.focus, Focus::Content);

        // Admin cannot reach doctor views
        app.open_view(View::Symptoms);
        assert_eq!(app.view(), View::Settings);

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.screen(), Screen::Login);
        assert!(app.current_user().is_none());
    }

    #[test]
    fn test_doctor_diagnosis_flow() {
        let mut app = create_test_app();
        login(&mut app, "maria@hospital.com");

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view(), View::Symptoms);

        // Pick Ana López, then type two symptoms
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Fiebre");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Tos");
        press(&mut app, KeyCode::Enter);

        // Input -> QuickPick -> Selected -> Submit
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        assert!(app.symptoms_state.is_processing());

        pump_until(&mut app, |a| {
            matches!(a.symptoms_state.phase, DiagnosisPhase::Complete { .. })
        });

        let stored = app.store.diagnoses();
        assert_eq!(stored.len(), 2);
        let latest = stored.last().expect("Should have a new diagnosis");
        assert_eq!(latest.patient_id, "1");
        assert_eq!(latest.symptoms, vec!["Fiebre".to_string(), "Tos".to_string()]);

        press(&mut app, KeyCode::Enter);
        assert!(app.symptoms_state.selection.is_empty());
        assert_eq!(app.symptoms_state.patients.len(), 3);
    }

    #[test]
    fn test_submit_without_patient_is_blocked() {
        let mut app = create_test_app();
        login(&mut app, "maria@hospital.com");
        app.open_view(View::Symptoms);

        press(&mut app, KeyCode::Enter);
        assert!(app.diagnosis_worker.is_none());
        assert_eq!(
            app.symptoms_state.error_message.as_deref(),
            Some("Selecciona un paciente")
        );
    }

    #[test]
    fn test_registration_flow_resets_after_success() {
        let mut app = create_test_app();
        login(&mut app, "admisiones@hospital.com");
        app.open_view(View::PatientRegistration);

        let values = [
            (0, "Test User"),
            (1, "30"),
            (2, "F"),
            (4, "999"),
            (5, "1994-02-10"),
            (6, "3004445566"),
            (8, "Calle 10"),
            (9, "Bogotá"),
            (10, "Sura EPS"),
            (12, "Luz Pérez"),
            (13, "3001112233"),
            (14, "Madre"),
        ];
        for (index, value) in values {
            app.registration_state.fields[index].value = value.to_string();
        }

        press(&mut app, KeyCode::Enter);
        assert!(app.registration_worker.is_some());

        pump_until(&mut app, |a| {
            a.registration_worker.is_none() && a.registration_state.is_editing()
        });

        let patients = app.store.patients();
        assert_eq!(patients.len(), 4);
        let added = patients.last().expect("Should have the new patient");
        assert_eq!(added.name, "Test User");
        assert_eq!(added.status, PatientStatus::Activo);
        assert!(app.registration_state.fields[0].value.is_empty());
    }

    #[test]
    fn test_incomplete_registration_is_not_submitted() {
        let mut app = create_test_app();
        login(&mut app, "admisiones@hospital.com");
        app.open_view(View::PatientRegistration);

        type_text(&mut app, "Solo Nombre");
        press(&mut app, KeyCode::Enter);

        assert!(app.registration_worker.is_none());
        assert!(app.registration_state.error_message.is_some());
        assert_eq!(app.store.patients().len(), 3);
    }

    #[test]
    fn test_patient_list_delete_and_status() {
        let mut app = create_test_app();
        login(&mut app, "admisiones@hospital.com");
        app.open_view(View::PatientList);

        // Search -> Eps -> City -> Table
        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(
            app.store.find_patient("1").map(|p| p.status),
            Some(PatientStatus::Inactivo)
        );

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));
        assert!(app.patient_list_state.confirm_delete);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.store.patients().len(), 3);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.store.patients().len(), 2);
        assert!(app.store.find_patient("2").is_none());
    }

    #[test]
    fn test_ctrl_q_quits_anywhere() {
        let mut app = create_test_app();
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit());
    }
}
