//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides the clinic workstation screens:
//! - Login and role menus
//! - Role dashboards
//! - Symptom entry with suggested diagnosis
//! - Patient admission and search

mod app;
mod styles;
mod ui;
mod worker;

pub use app::{App, Focus, Screen};
pub use styles::MedicalTheme;
pub use worker::{DelayedWorker, TaskHandle, TaskProgress};
