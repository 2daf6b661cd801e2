//! Assisted diagnosis: patient pick, symptom entry, progress and result.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{DiagnosisResult, Patient, SymptomSelection, COMMON_SYMPTOMS};
use crate::tui::styles::MedicalTheme;

/// Which part of the form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymptomsFocus {
    #[default]
    Patient,
    Input,
    QuickPick,
    Selected,
    Submit,
}

impl SymptomsFocus {
    fn next(self) -> Self {
        match self {
            Self::Patient => Self::Input,
            Self::Input => Self::QuickPick,
            Self::QuickPick => Self::Selected,
            Self::Selected => Self::Submit,
            Self::Submit => Self::Patient,
        }
    }
}

/// Diagnosis flow state
#[derive(Debug, Clone, Default)]
pub enum DiagnosisPhase {
    #[default]
    Editing,
    Processing { progress: f64 },
    Complete { result: DiagnosisResult },
    Error { message: String },
}

/// Symptom form state
#[derive(Debug, Default)]
pub struct SymptomsFormState {
    /// Selectable (active) patients
    pub patients: Vec<Patient>,
    pub patient_index: Option<usize>,
    pub selection: SymptomSelection,
    pub input: String,
    pub quick_index: usize,
    pub selected_index: usize,
    pub focus: SymptomsFocus,
    pub phase: DiagnosisPhase,
    pub error_message: Option<String>,
}

fn step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        0
    } else if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

impl SymptomsFormState {
    /// Fresh form over the given patient list.
    #[must_use]
    pub fn with_patients(patients: Vec<Patient>) -> Self {
        Self {
            patients,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn selected_patient(&self) -> Option<&Patient> {
        self.patient_index.and_then(|i| self.patients.get(i))
    }

    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// ←/→ on the focused widget.
    pub fn move_horizontal(&mut self, forward: bool) {
        match self.focus {
            SymptomsFocus::Patient => {
                if self.patients.is_empty() {
                    return;
                }
                self.patient_index = Some(match self.patient_index {
                    None if forward => 0,
                    None => self.patients.len() - 1,
                    Some(i) => step(i, self.patients.len(), forward),
                });
                self.error_message = None;
            }
            SymptomsFocus::QuickPick => {
                self.quick_index = step(self.quick_index, COMMON_SYMPTOMS.len(), forward);
            }
            SymptomsFocus::Selected => {
                self.selected_index = step(self.selected_index, self.selection.len(), forward);
            }
            SymptomsFocus::Input | SymptomsFocus::Submit => {}
        }
    }

    pub fn input_char(&mut self, c: char) {
        if self.focus == SymptomsFocus::Input {
            self.input.push(c);
            self.error_message = None;
        }
    }

    pub fn delete_char(&mut self) {
        match self.focus {
            SymptomsFocus::Input => {
                self.input.pop();
            }
            SymptomsFocus::Selected => self.remove_selected(),
            _ => {}
        }
    }

    /// Add the typed symptom and clear the input.
    pub fn add_typed(&mut self) {
        let typed = std::mem::take(&mut self.input);
        self.selection.add(&typed);
    }

    /// Toggle the highlighted quick-pick symptom.
    pub fn toggle_quick_pick(&mut self) {
        let symptom = COMMON_SYMPTOMS[self.quick_index];
        if !self.selection.remove(symptom) {
            self.selection.add(symptom);
        }
        self.clamp_selected();
        self.error_message = None;
    }

    pub fn remove_selected(&mut self) {
        if let Some(symptom) = self.selection.as_slice().get(self.selected_index).cloned() {
            self.selection.remove(&symptom);
            self.clamp_selected();
        }
    }

    fn clamp_selected(&mut self) {
        if self.selected_index >= self.selection.len() {
            self.selected_index = self.selection.len().saturating_sub(1);
        }
    }

    /// Patient id to submit, or a message explaining what is missing.
    ///
    /// # Errors
    /// Returns a user-facing message when no patient or symptom is set.
    pub fn ready_to_submit(&self) -> Result<String, String> {
        let patient = self
            .selected_patient()
            .ok_or_else(|| "Selecciona un paciente".to_string())?;
        if self.selection.is_empty() {
            return Err("Agrega al menos un síntoma".to_string());
        }
        Ok(patient.id.clone())
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        matches!(self.phase, DiagnosisPhase::Processing { .. })
    }

    /// Clear symptoms and result; keeps the patient list.
    pub fn reset(&mut self) {
        let patients = std::mem::take(&mut self.patients);
        *self = Self::with_patients(patients);
    }
}

/// `model` names the suggester shown with the result.
pub fn render_symptoms(f: &mut Frame, area: Rect, state: &SymptomsFormState, model: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Diagnóstico Asistido", MedicalTheme::title()),
        Span::styled(" │ Análisis de síntomas", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(header, chunks[0]);

    match &state.phase {
        DiagnosisPhase::Editing => render_form(f, chunks[1], state),
        DiagnosisPhase::Processing { progress } => render_progress(f, chunks[1], *progress),
        DiagnosisPhase::Complete { result } => render_result(f, chunks[1], result, model),
        DiagnosisPhase::Error { message } => render_error(f, chunks[1], message),
    }

    render_footer(f, chunks[2], state);
}

fn focus_block(title: &str, focused: bool) -> Block<'static> {
    let (border, style) = if focused {
        (MedicalTheme::border_focused(), MedicalTheme::focused())
    } else {
        (MedicalTheme::border(), MedicalTheme::text_secondary())
    };
    Block::default()
        .title(Span::styled(format!(" {title} "), style))
        .borders(Borders::ALL)
        .border_style(border)
}

fn render_form(f: &mut Frame, area: Rect, state: &SymptomsFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Patient
            Constraint::Length(3), // Typed symptom
            Constraint::Min(6),    // Quick picks
            Constraint::Length(3), // Submit
        ])
        .split(columns[0]);

    let patient_line = match state.selected_patient() {
        Some(p) => Line::from(vec![
            Span::styled(format!(" {}", p.name), MedicalTheme::text()),
            Span::styled(
                format!("  {} años · {} {}", p.age, p.document_type, p.document_number),
                MedicalTheme::text_muted(),
            ),
        ]),
        None if state.patients.is_empty() => Line::from(Span::styled(
            " No hay pacientes activos",
            MedicalTheme::text_muted(),
        )),
        None => Line::from(Span::styled(
            " Seleccionar paciente (←/→)",
            MedicalTheme::text_muted(),
        )),
    };
    f.render_widget(
        Paragraph::new(patient_line)
            .block(focus_block("Paciente", state.focus == SymptomsFocus::Patient)),
        left[0],
    );

    let input_focused = state.focus == SymptomsFocus::Input;
    let typed = if state.input.is_empty() && !input_focused {
        Span::styled("Escribe un síntoma y presiona Enter", MedicalTheme::text_muted())
    } else {
        Span::styled(state.input.as_str(), MedicalTheme::text())
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            typed,
            if input_focused {
                Span::styled("▌", MedicalTheme::cursor())
            } else {
                Span::raw("")
            },
        ]))
        .block(focus_block("Agregar síntoma", input_focused)),
        left[1],
    );

    let quick_focused = state.focus == SymptomsFocus::QuickPick;
    let picks: Vec<Span> = COMMON_SYMPTOMS
        .iter()
        .enumerate()
        .flat_map(|(i, s)| {
            let style = if quick_focused && i == state.quick_index {
                MedicalTheme::selected()
            } else if state.selection.contains(s) {
                MedicalTheme::success()
            } else {
                MedicalTheme::text_secondary()
            };
            [Span::styled(format!(" {s} "), style), Span::raw(" ")]
        })
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(picks))
            .wrap(Wrap { trim: false })
            .block(focus_block("Síntomas comunes", quick_focused)),
        left[2],
    );

    let submit_focused = state.focus == SymptomsFocus::Submit;
    let submit_style = if submit_focused {
        MedicalTheme::selected()
    } else {
        MedicalTheme::focused()
    };
    f.render_widget(
        Paragraph::new(Span::styled(" Analizar Síntomas ", submit_style))
            .alignment(Alignment::Center)
            .block(focus_block("", submit_focused)),
        left[3],
    );

    let selected_focused = state.focus == SymptomsFocus::Selected;
    let mut selected: Vec<Line> = state
        .selection
        .as_slice()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let style = if selected_focused && i == state.selected_index {
                MedicalTheme::selected()
            } else {
                MedicalTheme::text()
            };
            Line::from(Span::styled(format!(" • {s}"), style))
        })
        .collect();
    if selected.is_empty() {
        selected.push(Line::from(Span::styled(
            " Ningún síntoma seleccionado",
            MedicalTheme::text_muted(),
        )));
    }
    selected.push(Line::from(""));
    selected.push(Line::from(Span::styled(
        " Los resultados de la IA son sugerencias de apoyo.",
        MedicalTheme::warning(),
    )));
    selected.push(Line::from(Span::styled(
        " Use siempre su criterio médico profesional.",
        MedicalTheme::text_muted(),
    )));
    f.render_widget(
        Paragraph::new(selected)
            .wrap(Wrap { trim: true })
            .block(focus_block(
                &format!("Seleccionados ({})", state.selection.len()),
                selected_focused,
            )),
        columns[1],
    );
}

fn render_progress(f: &mut Frame, area: Rect, progress: f64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .margin(2)
        .split(area);

    let label = Paragraph::new(Line::from(Span::styled(
        "Analizando síntomas...",
        MedicalTheme::focused(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(label, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::info())
        .ratio(progress.clamp(0.0, 1.0))
        .label(format!("{:.0}%", progress * 100.0));
    f.render_widget(gauge, chunks[1]);
}

fn render_result(f: &mut Frame, area: Rect, result: &DiagnosisResult, model: &str) {
    let block = Block::default()
        .title(Span::styled(" Resultado del Diagnóstico ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Primary
            Constraint::Length(3), // Confidence
            Constraint::Min(0),    // Details
        ])
        .margin(1)
        .split(inner);

    let primary = Paragraph::new(vec![
        Line::from(Span::styled(
            result.primary_diagnosis.clone(),
            MedicalTheme::title(),
        )),
        Line::from(Span::styled(
            format!("Paciente: {} · {}", result.patient_name, result.date),
            MedicalTheme::text_secondary(),
        )),
        Line::from(Span::styled(
            format!("Modelo: {model}"),
            MedicalTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(primary, chunks[0]);

    let confidence = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Confianza ", MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::confidence(result.confidence))
        .ratio(result.confidence.clamp(0.0, 1.0))
        .label(format!("{:.0}%", result.confidence * 100.0));
    f.render_widget(confidence, chunks[1]);

    let mut details = vec![Line::from(Span::styled(
        "Diagnósticos alternativos",
        MedicalTheme::subtitle(),
    ))];
    for alt in &result.alternatives {
        details.push(Line::from(vec![
            Span::styled(format!("  {}", alt.diagnosis), MedicalTheme::text()),
            Span::styled(
                format!("  {:.0}%", alt.confidence * 100.0),
                MedicalTheme::confidence(alt.confidence),
            ),
        ]));
    }
    details.push(Line::from(""));
    details.push(Line::from(Span::styled(
        "Recomendaciones",
        MedicalTheme::subtitle(),
    )));
    for rec in &result.recommendations {
        details.push(Line::from(Span::styled(
            format!("  • {rec}"),
            MedicalTheme::text(),
        )));
    }
    details.push(Line::from(""));
    details.push(Line::from(Span::styled(
        format!("Síntomas: {}", result.symptoms.join(", ")),
        MedicalTheme::text_muted(),
    )));
    f.render_widget(Paragraph::new(details).wrap(Wrap { trim: true }), chunks[2]);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Error", MedicalTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, MedicalTheme::text())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::danger()),
    );
    f.render_widget(content, area);
}

fn render_footer(f: &mut Frame, area: Rect, state: &SymptomsFormState) {
    let content = match (&state.phase, &state.error_message) {
        (DiagnosisPhase::Editing, Some(err)) => Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ]),
        (DiagnosisPhase::Editing, None) => Line::from(vec![
            Span::styled("[Tab] ", MedicalTheme::key_hint()),
            Span::styled("Sección ", MedicalTheme::key_desc()),
            Span::styled("[←→] ", MedicalTheme::key_hint()),
            Span::styled("Elegir ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Agregar/Analizar ", MedicalTheme::key_desc()),
            Span::styled("[Supr] ", MedicalTheme::key_hint()),
            Span::styled("Quitar ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Menú", MedicalTheme::key_desc()),
        ]),
        (DiagnosisPhase::Complete { .. } | DiagnosisPhase::Error { .. }, _) => Line::from(vec![
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Nuevo diagnóstico ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Menú", MedicalTheme::key_desc()),
        ]),
        (DiagnosisPhase::Processing { .. }, _) => Line::from(Span::styled(
            "Procesando...",
            MedicalTheme::text_muted(),
        )),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(footer, area);
}
