//! Clinic color palette and styles.
//!
//! Blue primary over slate, with one color per confidence band.

use ratatui::style::{Color, Modifier, Style};

use crate::application::TaskPriority;
use crate::domain::PatientStatus;

/// Clinic palette: hospital blue on slate, green/orange/red for status.
pub struct MedicalTheme;

impl MedicalTheme {
    pub const PRIMARY: Color = Color::Rgb(37, 99, 235); // #2563EB
    pub const PRIMARY_LIGHT: Color = Color::Rgb(96, 165, 250); // #60A5FA
    pub const PRIMARY_DARK: Color = Color::Rgb(30, 64, 175); // #1E40AF

    pub const BORDER: Color = Color::Rgb(71, 85, 105); // #475569

    pub const SUCCESS: Color = Color::Rgb(22, 163, 74); // #16A34A
    pub const WARNING: Color = Color::Rgb(249, 115, 22); // #F97316
    pub const DANGER: Color = Color::Rgb(220, 38, 38); // #DC2626
    pub const INFO: Color = Color::Rgb(14, 165, 233); // #0EA5E9
    /// Admin charts
    pub const ACCENT: Color = Color::Rgb(147, 51, 234); // #9333EA

    pub const SURFACE: Color = Color::Rgb(2, 6, 23); // #020617

    pub const TEXT_PRIMARY: Color = Color::Rgb(241, 245, 249); // #F1F5F9
    pub const TEXT_SECONDARY: Color = Color::Rgb(203, 213, 225); // #CBD5E1
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    #[must_use]
    pub fn accent() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Style for selected items
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::SURFACE)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for focused elements
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    #[must_use]
    pub fn header() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Confidence colouring: high above 0.8, moderate above 0.6.
    #[must_use]
    pub fn confidence(confidence: f64) -> Style {
        if confidence > 0.8 {
            Self::success()
        } else if confidence > 0.6 {
            Self::warning()
        } else {
            Self::danger()
        }
    }

    #[must_use]
    pub fn status(status: PatientStatus) -> Style {
        match status {
            PatientStatus::Activo => Self::success(),
            PatientStatus::Inactivo => Self::text_muted(),
        }
    }

    #[must_use]
    pub fn priority(priority: TaskPriority) -> Style {
        match priority {
            TaskPriority::Alta => Self::danger(),
            TaskPriority::Media => Self::warning(),
            TaskPriority::Baja => Self::success(),
        }
    }
}

/// Logo shown on the login card
pub const LOGO: &str = r"
╔╦╗┌─┐┌┬┐╔╦╗┬┌─┐┌─┐
║║║├┤  ││ ║║│├─┤│ ┬
╩ ╩└─┘─┴┘═╩╝┴┴ ┴└─┘
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_bands() {
        assert_eq!(MedicalTheme::confidence(0.92), MedicalTheme::success());
        assert_eq!(MedicalTheme::confidence(0.8), MedicalTheme::warning());
        assert_eq!(MedicalTheme::confidence(0.42), MedicalTheme::danger());
    }
}
