//! Directory port: Email-to-staff lookup used at login.

use crate::domain::User;

pub trait UserDirectory: Send + Sync {
    /// Find the staff member registered under `email`.
    ///
    /// # Returns
    /// `None` when the email is not in the directory.
    fn lookup(&self, email: &str) -> Option<User>;
}
