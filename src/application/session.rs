//! Session service: Mock login against the staff directory.
//!
//! Any non-empty password is accepted. Unknown emails fall back to the
//! admissions role.

use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::{Role, User};
use crate::ports::UserDirectory;
use crate::AuthError;

/// Role given to emails the directory does not know.
pub const DEFAULT_ROLE: Role = Role::Admisiones;

/// Display name derived from an email's local part.
///
/// `juan.perez@x.com` becomes `Juan Perez`.
#[must_use]
pub fn name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let words: Vec<String> = local
        .split(['.', '_', '-'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        email.to_string()
    } else {
        words.join(" ")
    }
}

/// Holds the single logged-in user.
pub struct SessionService<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
    current: Mutex<Option<User>>,
}

impl<D> SessionService<D>
where
    D: UserDirectory,
{
    pub fn new(directory: Arc<D>) -> Self {
        Self {
            directory,
            current: Mutex::new(None),
        }
    }

    /// Log in and make the user current.
    ///
    /// # Errors
    /// Returns `MissingCredentials` if either field is blank.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let user = match self.directory.lookup(email) {
            Some(user) => user,
            None => {
                tracing::debug!("Unknown account, using default role");
                User {
                    email: email.to_string(),
                    name: name_from_email(email),
                    role: DEFAULT_ROLE,
                }
            }
        };

        tracing::info!("Session started (role={})", user.role);
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());
        Ok(user)
    }

    pub fn logout(&self) {
        let previous = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(user) = previous {
            tracing::info!("Session ended (role={})", user.role);
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<User> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::StaticDirectory;

    fn create_test_service() -> SessionService<StaticDirectory> {
        SessionService::new(Arc::new(StaticDirectory::demo()))
    }

    #[test]
    fn test_demo_accounts_get_their_roles() {
        let service = create_test_service();

        let doctor = service
            .login("maria@hospital.com", "x")
            .expect("Should log in");
        assert_eq!(doctor.role, Role::Medico);
        assert_eq!(doctor.name, "Dr. María González");

        let admin = service.login("admin@hospital.com", "x").expect("Should log in");
        assert_eq!(admin.role, Role::Admin);

        let admissions = service
            .login("admisiones@hospital.com", "x")
            .expect("Should log in");
        assert_eq!(admissions.role, Role::Admisiones);
        assert_eq!(service.current(), Some(admissions));
    }

    #[test]
    fn test_unknown_email_defaults_to_admissions() {
        let service = create_test_service();
        let user = service
            .login("juan.perez@clinica.co", "secreto")
            .expect("Should log in");

        assert_eq!(user.role, DEFAULT_ROLE);
        assert_eq!(user.name, "Juan Perez");
        assert_eq!(user.email, "juan.perez@clinica.co");
    }

    #[test]
    fn test_blank_credentials_are_rejected() {
        let service = create_test_service();
        assert_eq!(
            service.login("", "x"),
            Err(AuthError::MissingCredentials)
        );
        assert_eq!(
            service.login("maria@hospital.com", ""),
            Err(AuthError::MissingCredentials)
        );
        assert!(service.current().is_none());
    }

    #[test]
    fn test_logout_clears_session() {
        let service = create_test_service();
        service.login("admin@hospital.com", "x").expect("Should log in");
        service.logout();
        assert!(service.current().is_none());
        // Second logout is a no-op
        service.logout();
    }

    #[test]
    fn test_name_from_email() {
        assert_eq!(name_from_email("ana_maria-ruiz@x.co"), "Ana Maria Ruiz");
        assert_eq!(name_from_email("@x.co"), "@x.co");
    }
}
