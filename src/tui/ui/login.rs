//! Login card with the demo credentials.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::adapters::directory::DEMO_ACCOUNTS;
use crate::tui::styles::{MedicalTheme, LOGO};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// Login form state
#[derive(Debug, Default)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub field: LoginField,
    pub error: Option<String>,
}

impl LoginState {
    pub fn next_field(&mut self) {
        self.field = match self.field {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn input_char(&mut self, c: char) {
        match self.field {
            LoginField::Email => self.email.push(c),
            LoginField::Password => self.password.push(c),
        }
        self.error = None;
    }

    pub fn delete_char(&mut self) {
        match self.field {
            LoginField::Email => self.email.pop(),
            LoginField::Password => self.password.pop(),
        };
    }

    /// Wipe the password buffer; the email is kept for a retry.
    pub fn clear_sensitive(&mut self) {
        self.password.zeroize();
    }

    /// Full reset after logout.
    pub fn reset(&mut self) {
        self.clear_sensitive();
        self.email.clear();
        self.field = LoginField::Email;
        self.error = None;
    }
}

pub fn render_login(f: &mut Frame, area: Rect, state: &LoginState) {
    let [card] = Layout::horizontal([Constraint::Length(60)])
        .flex(Flex::Center)
        .areas(area);
    let [card] = Layout::vertical([Constraint::Length(24)])
        .flex(Flex::Center)
        .areas(card);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());
    let inner = block.inner(card);
    f.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Logo
            Constraint::Length(6), // Demo accounts
            Constraint::Length(3), // Email
            Constraint::Length(3), // Password
            Constraint::Length(2), // Error
            Constraint::Min(0),    // Keys
        ])
        .margin(1)
        .split(inner);

    let mut logo: Vec<Line> = LOGO
        .lines()
        .filter(|l| !l.is_empty())
        .map(|l| Line::from(Span::styled(l, MedicalTheme::subtitle())))
        .collect();
    logo.push(Line::from(Span::styled(
        "Sistema de Apoyo Diagnóstico Médico",
        MedicalTheme::text_secondary(),
    )));
    f.render_widget(Paragraph::new(logo).alignment(Alignment::Center), chunks[0]);

    let mut demo = vec![Line::from(Span::styled(
        "Credenciales de demostración:",
        MedicalTheme::info(),
    ))];
    for (email, _, role) in DEMO_ACCOUNTS {
        demo.push(Line::from(vec![
            Span::styled(format!("  {:<11}", role.label()), MedicalTheme::text_secondary()),
            Span::styled(email, MedicalTheme::text()),
        ]));
    }
    demo.push(Line::from(Span::styled(
        "  Contraseña: cualquier texto",
        MedicalTheme::text_muted(),
    )));
    f.render_widget(Paragraph::new(demo), chunks[1]);

    let masked = "•".repeat(state.password.chars().count());
    render_input(
        f,
        chunks[2],
        "Email",
        &state.email,
        "tu.email@hospital.com",
        state.field == LoginField::Email,
    );
    render_input(
        f,
        chunks[3],
        "Contraseña",
        &masked,
        "",
        state.field == LoginField::Password,
    );

    if let Some(err) = &state.error {
        let error = Paragraph::new(Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.as_str(), MedicalTheme::danger()),
        ]));
        f.render_widget(error, chunks[4]);
    }

    let keys = Paragraph::new(Line::from(vec![
        Span::styled("[Tab] ", MedicalTheme::key_hint()),
        Span::styled("Campo ", MedicalTheme::key_desc()),
        Span::styled("[Enter] ", MedicalTheme::key_hint()),
        Span::styled("Iniciar sesión ", MedicalTheme::key_desc()),
        Span::styled("[Ctrl+Q] ", MedicalTheme::key_hint()),
        Span::styled("Salir", MedicalTheme::key_desc()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(keys, chunks[5]);
}

fn render_input(f: &mut Frame, area: Rect, label: &str, value: &str, hint: &str, focused: bool) {
    let (border, title) = if focused {
        (MedicalTheme::border_focused(), MedicalTheme::focused())
    } else {
        (MedicalTheme::border(), MedicalTheme::text_secondary())
    };

    let shown = if value.is_empty() {
        Span::styled(hint.to_string(), MedicalTheme::text_muted())
    } else {
        Span::styled(value.to_string(), MedicalTheme::text())
    };

    let input = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        shown,
        if focused {
            Span::styled("▌", MedicalTheme::cursor())
        } else {
            Span::raw("")
        },
    ]))
    .block(
        Block::default()
            .title(Span::styled(format!(" {label} "), title))
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(input, area);
}
