//! Views that are listed in the menu but not built yet.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::styles::MedicalTheme;

pub fn render_placeholder(f: &mut Frame, area: Rect, title: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(title.to_string(), MedicalTheme::title())),
        Line::from(""),
        Line::from(Span::styled(
            "Esta sección está en desarrollo",
            MedicalTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, area);
}
