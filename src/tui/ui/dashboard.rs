//! Role dashboards: doctor, admin and admissions overviews.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::application::{AdminStats, AdmissionsStats, DoctorStats, Share};
use crate::tui::styles::MedicalTheme;

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .title(Span::styled(format!(" {title} "), MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border())
}

/// Row of headline figures, one box each.
fn render_stat_cards(f: &mut Frame, area: Rect, cards: &[(&str, String, Style)]) {
    let constraints: Vec<Constraint> = cards
        .iter()
        .map(|_| Constraint::Ratio(1, cards.len() as u32))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, (label, value, style)) in cards.iter().enumerate() {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(*label, MedicalTheme::text_secondary())),
            Line::from(Span::styled(value.clone(), style.add_modifier(ratatui::style::Modifier::BOLD))),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );
        f.render_widget(card, chunks[i]);
    }
}

fn render_header(f: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(title.to_string(), MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled(subtitle.to_string(), MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(header, area);
}

fn render_shares(f: &mut Frame, area: Rect, title: &str, shares: &[Share], style: Style) {
    let block = panel(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let constraints: Vec<Constraint> = shares
        .iter()
        .map(|_| Constraint::Length(2))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(inner);

    for (i, share) in shares.iter().enumerate() {
        let gauge = Gauge::default()
            .gauge_style(style)
            .ratio((share.percentage / 100.0).clamp(0.0, 1.0))
            .label(format!(
                "{} {} ({:.0}%)",
                share.label, share.count, share.percentage
            ));
        f.render_widget(gauge, rows[i]);
    }
}

/// Doctor overview.
pub fn render_doctor_dashboard(f: &mut Frame, area: Rect, user_name: &str, stats: &DoctorStats) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Cards
            Constraint::Min(0),    // Recent activity
        ])
        .split(area);

    render_header(
        f,
        chunks[0],
        &format!("Bienvenido, {user_name}"),
        "Resumen de actividad médica",
    );

    render_stat_cards(
        f,
        chunks[1],
        &[
            ("Pacientes Activos", stats.active_patients.to_string(), MedicalTheme::info()),
            ("Diagnósticos", stats.total_diagnoses.to_string(), MedicalTheme::success()),
            ("Alta Confianza", stats.high_confidence.to_string(), MedicalTheme::accent()),
            ("Esta Semana", stats.this_week.to_string(), MedicalTheme::warning()),
        ],
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);

    let mut patients: Vec<Line> = stats
        .recent_patients
        .iter()
        .map(|p| {
            Line::from(vec![
                Span::styled(format!(" {:<3}", p.initials()), MedicalTheme::focused()),
                Span::styled(p.name.clone(), MedicalTheme::text()),
                Span::styled(
                    format!("  {} años · {}", p.age, p.last_visit),
                    MedicalTheme::text_muted(),
                ),
            ])
        })
        .collect();
    if patients.is_empty() {
        patients.push(Line::from(Span::styled(
            " Sin pacientes",
            MedicalTheme::text_muted(),
        )));
    }
    patients.push(Line::from(""));
    patients.push(Line::from(vec![
        Span::styled(" Precisión del modelo: ", MedicalTheme::text_secondary()),
        Span::styled(format!("{}%", stats.model_accuracy), MedicalTheme::success()),
    ]));
    patients.push(Line::from(vec![
        Span::styled(" Tiempo de actividad: ", MedicalTheme::text_secondary()),
        Span::styled(format!("{}%", stats.system_uptime), MedicalTheme::info()),
    ]));
    f.render_widget(
        Paragraph::new(patients).block(panel("Pacientes Recientes")),
        body[0],
    );

    let mut diagnoses: Vec<Line> = Vec::new();
    for d in &stats.recent_diagnoses {
        diagnoses.push(Line::from(vec![
            Span::styled(format!(" {}", d.patient_name), MedicalTheme::text()),
            Span::styled(format!("  {}", d.date), MedicalTheme::text_muted()),
        ]));
        diagnoses.push(Line::from(vec![
            Span::styled(format!("   {}", d.primary_diagnosis), MedicalTheme::text_secondary()),
            Span::styled(
                format!("  {:.0}%", d.confidence * 100.0),
                MedicalTheme::confidence(d.confidence),
            ),
        ]));
    }
    if diagnoses.is_empty() {
        diagnoses.push(Line::from(Span::styled(
            " Sin diagnósticos",
            MedicalTheme::text_muted(),
        )));
    }
    f.render_widget(
        Paragraph::new(diagnoses).block(panel("Diagnósticos Recientes")),
        body[1],
    );
}

/// Admin overview.
pub fn render_admin_dashboard(f: &mut Frame, area: Rect, stats: &AdminStats) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    render_header(f, chunks[0], "Panel de Administración", "Estado general del sistema");

    let average = stats
        .average_confidence
        .map_or_else(|| "—".to_string(), |c| format!("{:.1}%", c * 100.0));

    render_stat_cards(
        f,
        chunks[1],
        &[
            ("Usuarios Totales", stats.total_users.to_string(), MedicalTheme::info()),
            ("Pacientes Activos", stats.active_patients.to_string(), MedicalTheme::success()),
            ("Diagnósticos", stats.total_diagnoses.to_string(), MedicalTheme::accent()),
            ("Confianza Promedio", average, MedicalTheme::warning()),
            ("Uptime", stats.uptime.clone(), MedicalTheme::success()),
        ],
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    let block = panel("Actividad Mensual");
    let inner = block.inner(body[0]);
    f.render_widget(block, body[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            stats
                .monthly
                .iter()
                .map(|_| Constraint::Length(2))
                .chain(std::iter::once(Constraint::Min(0)))
                .collect::<Vec<_>>(),
        )
        .margin(1)
        .split(inner);

    for (i, month) in stats.monthly.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(5),
                Constraint::Percentage(50),
                Constraint::Percentage(50),
            ])
            .split(rows[i]);
        f.render_widget(
            Paragraph::new(Span::styled(month.month.clone(), MedicalTheme::text_secondary())),
            cols[0],
        );
        f.render_widget(
            Gauge::default()
                .gauge_style(MedicalTheme::info())
                .ratio((month.diagnoses_pct / 100.0).clamp(0.0, 1.0))
                .label(format!("{} diag.", month.diagnoses)),
            cols[1],
        );
        f.render_widget(
            Gauge::default()
                .gauge_style(MedicalTheme::success())
                .ratio((month.patients_pct / 100.0).clamp(0.0, 1.0))
                .label(format!("{} pac.", month.patients)),
            cols[2],
        );
    }

    render_shares(
        f,
        body[1],
        "Tipos de Diagnóstico",
        &stats.diagnosis_types,
        MedicalTheme::accent(),
    );
}

/// Admissions overview.
pub fn render_admissions_dashboard(f: &mut Frame, area: Rect, stats: &AdmissionsStats) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    render_header(f, chunks[0], "Panel de Admisiones", "Registro y gestión de pacientes");

    render_stat_cards(
        f,
        chunks[1],
        &[
            ("Registros Hoy", stats.today_registrations.to_string(), MedicalTheme::info()),
            ("Esta Semana", stats.this_week.to_string(), MedicalTheme::success()),
            ("Docs. Pendientes", stats.pending_documents.to_string(), MedicalTheme::warning()),
            ("Pacientes Activos", stats.active_patients.to_string(), MedicalTheme::accent()),
        ],
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(chunks[2]);

    let mut recent: Vec<Line> = Vec::new();
    for p in &stats.recent_registrations {
        recent.push(Line::from(vec![
            Span::styled(format!(" {:<3}", p.initials()), MedicalTheme::focused()),
            Span::styled(p.name.clone(), MedicalTheme::text()),
        ]));
        recent.push(Line::from(Span::styled(
            format!("    {} · {}", p.eps, p.registration_date),
            MedicalTheme::text_muted(),
        )));
    }
    f.render_widget(
        Paragraph::new(recent).block(panel("Registros Recientes")),
        body[0],
    );

    render_shares(
        f,
        body[1],
        "Distribución por EPS",
        &stats.eps_distribution,
        MedicalTheme::info(),
    );

    let mut tasks: Vec<Line> = Vec::new();
    for task in &stats.pending_tasks {
        tasks.push(Line::from(vec![
            Span::styled(format!(" [{}] ", task.priority.label()), MedicalTheme::priority(task.priority)),
            Span::styled(task.task.clone(), MedicalTheme::text()),
        ]));
        tasks.push(Line::from(Span::styled(
            format!("    {}", task.time),
            MedicalTheme::text_muted(),
        )));
    }
    tasks.push(Line::from(""));
    tasks.push(Line::from(vec![
        Span::styled(" Documentos completos: ", MedicalTheme::text_secondary()),
        Span::styled(format!("{}%", stats.documents_complete), MedicalTheme::success()),
    ]));
    tasks.push(Line::from(vec![
        Span::styled(" Contactos verificados: ", MedicalTheme::text_secondary()),
        Span::styled(format!("{}%", stats.contacts_verified), MedicalTheme::info()),
    ]));
    f.render_widget(
        Paragraph::new(tasks).block(panel("Tareas Pendientes")),
        body[2],
    );
}
