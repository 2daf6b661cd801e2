//! UI module: View components for the TUI.

pub mod dashboard;
pub mod login;
pub mod patient_list;
pub mod placeholder;
pub mod registration;
pub mod symptoms;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::domain::{User, View};
use crate::tui::styles::MedicalTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "AVISO: Los resultados son sugerencias de apoyo generadas por un modelo de demostración y no reemplazan la evaluación médica profesional.",
            MedicalTheme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Role menu with the logged-in user on top.
pub fn render_sidebar(
    f: &mut Frame,
    area: Rect,
    user: &User,
    menu: &[View],
    selected: usize,
    focused: bool,
) {
    let items: Vec<ListItem> = menu
        .iter()
        .map(|view| ListItem::new(Line::from(format!(" {}", view.label()))))
        .collect();

    let title = Line::from(vec![
        Span::styled(" MedDiag ", MedicalTheme::subtitle()),
        Span::styled(format!("· {} ", user.role), MedicalTheme::text_muted()),
    ]);

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .title_bottom(Line::from(Span::styled(
                    format!(" {} ", user.name),
                    MedicalTheme::text_secondary(),
                )))
                .borders(Borders::ALL)
                .border_style(if focused {
                    MedicalTheme::border_focused()
                } else {
                    MedicalTheme::border()
                }),
        )
        .style(MedicalTheme::text())
        .highlight_style(if focused {
            MedicalTheme::selected()
        } else {
            MedicalTheme::focused()
        })
        .highlight_symbol("▸");

    let mut state = ListState::default();
    state.select(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}

/// Bottom key strip for the menu.
pub fn render_menu_keys(f: &mut Frame, area: Rect) {
    let keys = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(" [↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navegar", MedicalTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled(" [Enter] ", MedicalTheme::key_hint()),
            Span::styled("Abrir", MedicalTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled(" [L] ", MedicalTheme::key_hint()),
            Span::styled("Cerrar sesión", MedicalTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled(" [Q] ", MedicalTheme::key_hint()),
            Span::styled("Salir", MedicalTheme::key_desc()),
        ]),
    ]);
    f.render_widget(keys, area);
}
