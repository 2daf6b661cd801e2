//! Static staff directory: Implementation of UserDirectory.

use crate::domain::{Role, User};
use crate::ports::UserDirectory;

/// Fixed demo accounts shown on the login screen.
pub const DEMO_ACCOUNTS: [(&str, &str, Role); 3] = [
    ("maria@hospital.com", "Dr. María González", Role::Medico),
    ("admin@hospital.com", "Administrador", Role::Admin),
    ("admisiones@hospital.com", "Admisiones", Role::Admisiones),
];

/// Directory backed by a fixed table.
#[derive(Debug, Clone)]
pub struct StaticDirectory {
    entries: Vec<User>,
}

impl StaticDirectory {
    /// Directory with the three demo accounts.
    #[must_use]
    pub fn demo() -> Self {
        Self::from_entries(
            DEMO_ACCOUNTS
                .iter()
                .map(|(email, name, role)| User {
                    email: (*email).to_string(),
                    name: (*name).to_string(),
                    role: *role,
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn from_entries(entries: Vec<User>) -> Self {
        Self { entries }
    }
}

impl UserDirectory for StaticDirectory {
    fn lookup(&self, email: &str) -> Option<User> {
        let email = email.trim();
        self.entries
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_accounts_resolve() {
        let dir = StaticDirectory::demo();
        assert_eq!(dir.lookup("maria@hospital.com").map(|u| u.role), Some(Role::Medico));
        assert_eq!(dir.lookup("admin@hospital.com").map(|u| u.role), Some(Role::Admin));
        assert_eq!(
            dir.lookup("admisiones@hospital.com").map(|u| u.role),
            Some(Role::Admisiones)
        );
    }

    #[test]
    fn test_lookup_ignores_case_and_whitespace() {
        let dir = StaticDirectory::demo();
        let user = dir.lookup("  Maria@Hospital.COM ").expect("Should match");
        assert_eq!(user.email, "maria@hospital.com");
    }

    #[test]
    fn test_unknown_email() {
        assert!(StaticDirectory::demo().lookup("otro@clinica.co").is_none());
    }
}
