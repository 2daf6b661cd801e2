//! Patient list with search, EPS and city filters, and a detail panel.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::application::{PatientFilter, PatientQuery};
use crate::domain::Patient;
use crate::tui::styles::MedicalTheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFocus {
    #[default]
    Search,
    Eps,
    City,
    Table,
}

impl ListFocus {
    fn next(self) -> Self {
        match self {
            Self::Search => Self::Eps,
            Self::Eps => Self::City,
            Self::City => Self::Table,
            Self::Table => Self::Search,
        }
    }
}

/// Patient list state
#[derive(Debug, Default)]
pub struct PatientListState {
    pub filter: PatientFilter,
    pub focus: ListFocus,
    /// Row within the filtered list
    pub selected: usize,
    /// Patient shown in the detail panel
    pub detail: Option<String>,
    /// Delete awaiting a `y` confirmation
    pub confirm_delete: bool,
    pub notice: Option<String>,
}

/// Step through `options` with a leading "any" slot (empty string).
fn cycle_option(current: &str, options: &[String], forward: bool) -> String {
    let slots = options.len() + 1;
    let index = options
        .iter()
        .position(|o| o == current)
        .map_or(0, |i| i + 1);
    let next = if forward {
        (index + 1) % slots
    } else {
        (index + slots - 1) % slots
    };
    if next == 0 {
        String::new()
    } else {
        options[next - 1].clone()
    }
}

impl PatientListState {
    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
        self.confirm_delete = false;
    }

    pub fn input_char(&mut self, c: char) {
        if self.focus == ListFocus::Search {
            self.filter.search.push(c);
            self.selected = 0;
        }
    }

    pub fn delete_char(&mut self) {
        if self.focus == ListFocus::Search {
            self.filter.search.pop();
            self.selected = 0;
        }
    }

    /// ←/→ on a dropdown filter, options drawn from `patients`.
    pub fn cycle_filter(&mut self, patients: &[Patient], forward: bool) {
        match self.focus {
            ListFocus::Eps => {
                let options = PatientQuery::distinct_eps(patients);
                self.filter.eps = cycle_option(&self.filter.eps, &options, forward);
            }
            ListFocus::City => {
                let options = PatientQuery::distinct_cities(patients);
                self.filter.city = cycle_option(&self.filter.city, &options, forward);
            }
            ListFocus::Search | ListFocus::Table => return,
        }
        self.selected = 0;
    }

    /// ↑/↓ in the table.
    pub fn move_selection(&mut self, visible: usize, forward: bool) {
        if visible == 0 {
            self.selected = 0;
            return;
        }
        self.selected = if forward {
            (self.selected + 1).min(visible - 1)
        } else {
            self.selected.saturating_sub(1)
        };
        self.confirm_delete = false;
    }

    #[must_use]
    pub fn visible(&self, patients: &[Patient]) -> Vec<Patient> {
        PatientQuery::filter(patients, &self.filter)
    }

    /// Id of the highlighted row.
    #[must_use]
    pub fn selected_id(&self, patients: &[Patient]) -> Option<String> {
        self.visible(patients)
            .get(self.selected)
            .map(|p| p.id.clone())
    }

    /// Keep the highlight inside the list after it shrinks.
    pub fn clamp(&mut self, visible: usize) {
        if self.selected >= visible {
            self.selected = visible.saturating_sub(1);
        }
    }
}

pub fn render_patient_list(f: &mut Frame, area: Rect, state: &PatientListState, patients: &[Patient]) {
    let visible = state.visible(patients);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Filters
            Constraint::Min(0),    // Table + detail
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let summary = if state.filter.is_empty() {
        format!(" │ {} pacientes registrados", patients.len())
    } else {
        format!(" │ Mostrando {} de {} pacientes", visible.len(), patients.len())
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Lista de Pacientes", MedicalTheme::title()),
        Span::styled(summary, MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(header, chunks[0]);

    render_filters(f, chunks[1], state);

    let body = if state.detail.is_some() {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[2])
    } else {
        Layout::default()
            .constraints([Constraint::Percentage(100)])
            .split(chunks[2])
    };

    render_table(f, body[0], state, &visible);

    if let Some(id) = &state.detail {
        if let Some(patient) = patients.iter().find(|p| &p.id == id) {
            render_detail(f, body[1], patient);
        }
    }

    render_footer(f, chunks[3], state, patients);
}

fn render_filters(f: &mut Frame, area: Rect, state: &PatientListState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let filters = [
        (
            ListFocus::Search,
            "Buscar",
            state.filter.search.as_str(),
            "Nombre o documento...",
        ),
        (ListFocus::Eps, "EPS", state.filter.eps.as_str(), "Todas las EPS"),
        (ListFocus::City, "Ciudad", state.filter.city.as_str(), "Todas las ciudades"),
    ];

    for (i, (focus, label, value, hint)) in filters.into_iter().enumerate() {
        let focused = state.focus == focus;
        let (border, title) = if focused {
            (MedicalTheme::border_focused(), MedicalTheme::focused())
        } else {
            (MedicalTheme::border(), MedicalTheme::text_secondary())
        };
        let shown = if value.is_empty() {
            Span::styled(hint, MedicalTheme::text_muted())
        } else {
            Span::styled(value, MedicalTheme::text())
        };
        let widget = Paragraph::new(Line::from(vec![Span::raw(" "), shown])).block(
            Block::default()
                .title(Span::styled(format!(" {label} "), title))
                .borders(Borders::ALL)
                .border_style(border),
        );
        f.render_widget(widget, cols[i]);
    }
}

fn render_table(f: &mut Frame, area: Rect, state: &PatientListState, visible: &[Patient]) {
    let header = Row::new(["Paciente", "Documento", "Edad", "Ciudad", "EPS", "Estado"])
        .style(MedicalTheme::header());

    let rows: Vec<Row> = visible
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.name.clone()),
                Cell::from(format!("{} {}", p.document_type, p.document_number)),
                Cell::from(p.age.to_string()),
                Cell::from(p.city.clone()),
                Cell::from(p.eps.clone()),
                Cell::from(Span::styled(p.status.to_string(), MedicalTheme::status(p.status))),
            ])
        })
        .collect();

    let table_focused = state.focus == ListFocus::Table;
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(26),
            Constraint::Percentage(18),
            Constraint::Length(5),
            Constraint::Percentage(16),
            Constraint::Percentage(18),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .row_highlight_style(if table_focused {
        MedicalTheme::selected()
    } else {
        MedicalTheme::focused()
    })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if table_focused {
                MedicalTheme::border_focused()
            } else {
                MedicalTheme::border()
            }),
    );

    let mut table_state = TableState::default();
    if !visible.is_empty() {
        table_state.select(Some(state.selected));
    }
    f.render_stateful_widget(table, area, &mut table_state);
}

fn labelled(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label}: "), MedicalTheme::text_secondary()),
        Span::styled(value, MedicalTheme::text()),
    ])
}

fn render_detail(f: &mut Frame, area: Rect, patient: &Patient) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", patient.initials()), MedicalTheme::selected()),
            Span::styled(format!(" {}", patient.name), MedicalTheme::title()),
        ]),
        Line::from(""),
        labelled(
            "Documento",
            format!("{} {}", patient.document_type, patient.document_number),
        ),
        labelled(
            "Edad",
            format!("{} años · {}", patient.age, patient.gender.label()),
        ),
        labelled("Nacimiento", patient.birth_date.clone()),
        labelled("Teléfono", patient.phone.clone()),
        labelled("Email", patient.email.clone().unwrap_or_else(|| "—".to_string())),
        labelled("Dirección", format!("{}, {}", patient.address, patient.city)),
        labelled("EPS", patient.eps.clone()),
        labelled(
            "Tipo de sangre",
            patient.blood_type.clone().unwrap_or_else(|| "—".to_string()),
        ),
        labelled(
            "Alergias",
            patient
                .allergies
                .as_ref()
                .map_or_else(|| "Ninguna".to_string(), |a| a.join(", ")),
        ),
        labelled(
            "Medicamentos",
            patient
                .medications
                .as_ref()
                .map_or_else(|| "Ninguno".to_string(), |m| m.join(", ")),
        ),
        Line::from(""),
        Line::from(Span::styled(" Contacto de emergencia", MedicalTheme::subtitle())),
        labelled(
            "Nombre",
            format!(
                "{} ({})",
                patient.emergency_contact.name, patient.emergency_contact.relationship
            ),
        ),
        labelled("Teléfono", patient.emergency_contact.phone.clone()),
        Line::from(""),
        labelled("Registro", patient.registration_date.clone()),
        labelled("Última visita", patient.last_visit.clone()),
    ];
    if let Some(diagnosis) = &patient.diagnosis {
        lines.push(labelled("Diagnóstico", diagnosis.clone()));
    }

    let detail = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Detalle del Paciente ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border_focused()),
    );
    f.render_widget(detail, area);
}

fn render_footer(f: &mut Frame, area: Rect, state: &PatientListState, patients: &[Patient]) {
    let active = patients.iter().filter(|p| p.is_active()).count();
    let eps_count = PatientQuery::distinct_eps(patients).len();

    let content = if state.confirm_delete {
        Line::from(vec![
            Span::styled("¿Eliminar paciente? ", MedicalTheme::danger()),
            Span::styled("[y] ", MedicalTheme::key_hint()),
            Span::styled("Confirmar ", MedicalTheme::key_desc()),
            Span::styled("[n] ", MedicalTheme::key_hint()),
            Span::styled("Cancelar", MedicalTheme::key_desc()),
        ])
    } else if let Some(notice) = &state.notice {
        Line::from(Span::styled(notice.clone(), MedicalTheme::info()))
    } else {
        Line::from(vec![
            Span::styled(
                format!("Total {} · Activos {} · EPS {}  ", patients.len(), active, eps_count),
                MedicalTheme::text_secondary(),
            ),
            Span::styled("[Tab] ", MedicalTheme::key_hint()),
            Span::styled("Filtro ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Detalle ", MedicalTheme::key_desc()),
            Span::styled("[e] ", MedicalTheme::key_hint()),
            Span::styled("Estado ", MedicalTheme::key_desc()),
            Span::styled("[d] ", MedicalTheme::key_hint()),
            Span::styled("Eliminar ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Menú", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(footer, area);
}
