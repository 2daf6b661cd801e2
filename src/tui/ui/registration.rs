//! Patient registration form (admissions).

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::application::RegistrationForm;
use crate::domain::{DocumentType, Gender, BLOOD_TYPES, CITIES, EPS_OPTIONS};
use crate::tui::styles::MedicalTheme;

/// How a field takes input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Digits,
    /// Cycled with ←/→. `optional` adds a blank entry.
    Choice {
        options: &'static [&'static str],
        optional: bool,
    },
}

const GENDERS: [&str; 2] = ["M", "F"];
const DOCUMENT_TYPES: [&str; 4] = ["CC", "TI", "CE", "PP"];

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub value: String,
    pub kind: FieldKind,
}

impl FormField {
    fn text(label: &'static str, hint: &'static str) -> Self {
        Self {
            label,
            hint,
            value: String::new(),
            kind: FieldKind::Text,
        }
    }

    fn choice(label: &'static str, options: &'static [&'static str], optional: bool) -> Self {
        let value = if optional {
            String::new()
        } else {
            options.first().map(|s| (*s).to_string()).unwrap_or_default()
        };
        Self {
            label,
            hint: "←/→ para elegir",
            value,
            kind: FieldKind::Choice { options, optional },
        }
    }

    /// Step a choice field one position, wrapping around.
    fn cycle(&mut self, forward: bool) {
        let FieldKind::Choice { options, optional } = self.kind else {
            return;
        };

        // Slot 0 is the blank entry when optional
        let offset = usize::from(optional);
        let slots = options.len() + offset;
        if slots == 0 {
            return;
        }

        let current = options
            .iter()
            .position(|o| *o == self.value)
            .map_or(0, |i| i + offset);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };

        self.value = if next < offset {
            String::new()
        } else {
            options[next - offset].to_string()
        };
    }
}

/// Field order in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
enum Field {
    Name,
    Age,
    Gender,
    DocumentType,
    DocumentNumber,
    BirthDate,
    Phone,
    Email,
    Address,
    City,
    Eps,
    BloodType,
    ContactName,
    ContactPhone,
    ContactRelationship,
    Allergies,
    Medications,
}

/// Submission lifecycle of the form.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationPhase {
    Editing,
    Saving { progress: f64 },
    Success { since: Instant },
}

/// Registration form state
pub struct RegistrationFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
    pub phase: RegistrationPhase,
}

impl Default for RegistrationFormState {
    fn default() -> Self {
        let mut age = FormField::text("Edad", "años");
        age.kind = FieldKind::Digits;

        Self {
            fields: vec![
                FormField::text("Nombre completo", "Nombre y apellidos"),
                age,
                FormField::choice("Género", &GENDERS, false),
                FormField::choice("Tipo de documento", &DOCUMENT_TYPES, false),
                FormField::text("Número de documento", "Sin puntos"),
                FormField::text("Fecha de nacimiento", "AAAA-MM-DD"),
                FormField::text("Teléfono", "+57 300 123 4567"),
                FormField::text("Email", "opcional"),
                FormField::text("Dirección", "Calle, número"),
                FormField::choice("Ciudad", &CITIES, true),
                FormField::choice("EPS", &EPS_OPTIONS, true),
                FormField::choice("Tipo de sangre", &BLOOD_TYPES, true),
                FormField::text("Contacto de emergencia", "Nombre"),
                FormField::text("Teléfono de emergencia", "+57 ..."),
                FormField::text("Parentesco", "Esposo/a, Madre, ..."),
                FormField::text("Alergias", "Separadas por comas"),
                FormField::text("Medicamentos", "Separados por comas"),
            ],
            selected_field: 0,
            error_message: None,
            phase: RegistrationPhase::Editing,
        }
    }
}

impl RegistrationFormState {
    fn value(&self, field: Field) -> &str {
        &self.fields[field as usize].value
    }

    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    pub fn input_char(&mut self, c: char) {
        let field = &mut self.fields[self.selected_field];
        match field.kind {
            FieldKind::Text => field.value.push(c),
            FieldKind::Digits if c.is_ascii_digit() => field.value.push(c),
            _ => return,
        }
        self.error_message = None;
    }

    pub fn delete_char(&mut self) {
        let field = &mut self.fields[self.selected_field];
        if !matches!(field.kind, FieldKind::Choice { .. }) {
            field.value.pop();
        }
    }

    /// Step the selected choice field; no-op on text fields.
    pub fn cycle_choice(&mut self, forward: bool) {
        self.fields[self.selected_field].cycle(forward);
        self.error_message = None;
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.phase == RegistrationPhase::Editing
    }

    /// Collect the field values into a registration form.
    #[must_use]
    pub fn to_form(&self) -> RegistrationForm {
        let gender = if self.value(Field::Gender) == "F" {
            Gender::F
        } else {
            Gender::M
        };
        let document_type = DocumentType::ALL
            .into_iter()
            .find(|d| d.to_string() == self.value(Field::DocumentType))
            .unwrap_or(DocumentType::CC);

        RegistrationForm {
            name: self.value(Field::Name).to_string(),
            age: self.value(Field::Age).to_string(),
            gender,
            document_type,
            document_number: self.value(Field::DocumentNumber).to_string(),
            birth_date: self.value(Field::BirthDate).to_string(),
            address: self.value(Field::Address).to_string(),
            city: self.value(Field::City).to_string(),
            eps: self.value(Field::Eps).to_string(),
            emergency_contact_name: self.value(Field::ContactName).to_string(),
            emergency_contact_phone: self.value(Field::ContactPhone).to_string(),
            emergency_contact_relationship: self.value(Field::ContactRelationship).to_string(),
            blood_type: self.value(Field::BloodType).to_string(),
            allergies: self.value(Field::Allergies).to_string(),
            medications: self.value(Field::Medications).to_string(),
            phone: self.value(Field::Phone).to_string(),
            email: self.value(Field::Email).to_string(),
        }
    }

    /// Back to a blank form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub fn render_registration(f: &mut Frame, area: Rect, state: &RegistrationFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Registrar Paciente", MedicalTheme::title()),
        Span::styled(" │ Datos de admisión", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(header, chunks[0]);

    match &state.phase {
        RegistrationPhase::Editing => render_fields(f, chunks[1], state),
        RegistrationPhase::Saving { progress } => {
            let [_, bar, _] = Layout::vertical([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .areas(chunks[1]);
            let gauge = Gauge::default()
                .block(
                    Block::default()
                        .title(Span::styled(" Registrando paciente... ", MedicalTheme::focused()))
                        .borders(Borders::ALL)
                        .border_style(MedicalTheme::border()),
                )
                .gauge_style(MedicalTheme::info())
                .ratio(progress.clamp(0.0, 1.0));
            f.render_widget(gauge, bar);
        }
        RegistrationPhase::Success { .. } => {
            let done = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "✓ Paciente registrado exitosamente",
                    MedicalTheme::success(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "El formulario se reiniciará en un momento",
                    MedicalTheme::text_muted(),
                )),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(MedicalTheme::success()),
            );
            f.render_widget(done, chunks[1]);
        }
    }

    let footer_line = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Campo ", MedicalTheme::key_desc()),
            Span::styled("[←→] ", MedicalTheme::key_hint()),
            Span::styled("Opción ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Registrar ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Menú", MedicalTheme::key_desc()),
        ])
    };
    let footer = Paragraph::new(footer_line).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(footer, chunks[2]);
}

fn render_fields(f: &mut Frame, area: Rect, state: &RegistrationFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;
    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(f, columns[1], &state.fields[mid..], mid, state.selected_field);
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (MedicalTheme::border_focused(), MedicalTheme::focused())
        } else {
            (MedicalTheme::border(), MedicalTheme::text_secondary())
        };

        let value_display = if field.value.is_empty() {
            Span::styled(field.hint, MedicalTheme::text_muted())
        } else {
            Span::styled(field.value.as_str(), MedicalTheme::text())
        };

        let marker = match (is_selected, field.kind) {
            (true, FieldKind::Choice { .. }) => Span::styled(" ◂▸", MedicalTheme::cursor()),
            (true, _) => Span::styled("▌", MedicalTheme::cursor()),
            _ => Span::raw(""),
        };

        let content = Paragraph::new(Line::from(vec![Span::raw(" "), value_display, marker])).block(
            Block::default()
                .title(Span::styled(format!(" {} ", field.label), title_style))
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        f.render_widget(content, chunks[i]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(state: &mut RegistrationFormState, field: Field, text: &str) {
        state.selected_field = field as usize;
        text.chars().for_each(|c| state.input_char(c));
    }

    #[test]
    fn test_age_accepts_digits_only() {
        let mut state = RegistrationFormState::default();
        type_into(&mut state, Field::Age, "3a0");
        assert_eq!(state.value(Field::Age), "30");
    }

    #[test]
    fn test_choice_cycles_with_blank_slot() {
        let mut state = RegistrationFormState::default();
        state.selected_field = Field::Eps as usize;
        assert_eq!(state.value(Field::Eps), "");

        state.cycle_choice(true);
        assert_eq!(state.value(Field::Eps), EPS_OPTIONS[0]);

        state.cycle_choice(false);
        assert_eq!(state.value(Field::Eps), "");

        state.cycle_choice(false);
        assert_eq!(state.value(Field::Eps), EPS_OPTIONS[EPS_OPTIONS.len() - 1]);
    }

    #[test]
    fn test_required_choice_has_no_blank() {
        let mut state = RegistrationFormState::default();
        state.selected_field = Field::Gender as usize;
        assert_eq!(state.value(Field::Gender), "M");
        state.cycle_choice(true);
        assert_eq!(state.value(Field::Gender), "F");
        state.cycle_choice(true);
        assert_eq!(state.value(Field::Gender), "M");

        // Typing into a choice does nothing
        state.input_char('x');
        state.delete_char();
        assert_eq!(state.value(Field::Gender), "M");
    }

    #[test]
    fn test_to_form_maps_fields() {
        let mut state = RegistrationFormState::default();
        type_into(&mut state, Field::Name, "Test User");
        type_into(&mut state, Field::Age, "30");
        state.selected_field = Field::Gender as usize;
        state.cycle_choice(true);
        state.selected_field = Field::DocumentType as usize;
        state.cycle_choice(true);
        type_into(&mut state, Field::Allergies, "Polen, Látex");

        let form = state.to_form();
        assert_eq!(form.name, "Test User");
        assert_eq!(form.age, "30");
        assert_eq!(form.gender, Gender::F);
        assert_eq!(form.document_type, DocumentType::TI);
        assert_eq!(form.allergies, "Polen, Látex");
        assert!(form.eps.is_empty());
    }

    #[test]
    fn test_navigation_wraps() {
        let mut state = RegistrationFormState::default();
        state.prev_field();
        assert_eq!(state.selected_field, state.fields.len() - 1);
        state.next_field();
        assert_eq!(state.selected_field, 0);
    }
}
