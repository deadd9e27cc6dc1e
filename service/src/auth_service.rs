//! Session handling for the admin console.
//!
//! The backend has no login endpoint yet, so authentication is a local
//! check against the built-in admin account. A successful login is
//! persisted as a marker file in the application data directory so the
//! session survives between invocations.

use std::fs;
use std::path::PathBuf;

use directories_next::ProjectDirs;

use crate::error::Error;

// TODO: replace the built-in account with a backend login endpoint once
// the API grows one.
const ADMIN_EMAIL: &str = "admin@test.com";
const ADMIN_PASSWORD: &str = "123456";

const SESSION_MARKER: &str = "true";

pub struct AuthService {
    session_file: PathBuf,
}

impl AuthService {
    pub fn new() -> Self {
        Self {
            session_file: default_session_file(),
        }
    }

    /// Uses the given file instead of the per-user data directory.
    pub fn with_session_file(session_file: PathBuf) -> Self {
        Self { session_file }
    }

    /// Checks the credentials and persists the session on success.
    /// Returns false for wrong credentials without touching the session.
    pub fn login(&self, email: &str, password: &str) -> Result<bool, Error> {
        if email != ADMIN_EMAIL || password != ADMIN_PASSWORD {
            return Ok(false);
        }
        if let Some(parent) = self.session_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.session_file, SESSION_MARKER)?;
        tracing::info!(email, "login succeeded");
        Ok(true)
    }

    pub fn logout(&self) -> Result<(), Error> {
        match fs::remove_file(&self.session_file) {
            Ok(()) => {
                tracing::info!("session cleared");
                Ok(())
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        match fs::read_to_string(&self.session_file) {
            Ok(content) => content.trim() == SESSION_MARKER,
            Err(_) => false,
        }
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

fn default_session_file() -> PathBuf {
    let project_dirs =
        ProjectDirs::from("", "", "quote-admin").expect("could not determine project directory");
    project_dirs.data_local_dir().join("session")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_in(dir: &tempfile::TempDir) -> AuthService {
        AuthService::with_session_file(dir.path().join("session"))
    }

    #[test]
    fn login_with_the_admin_account_persists_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let auth = service_in(&dir);

        assert!(!auth.is_authenticated());
        assert!(auth.login("admin@test.com", "123456").unwrap());
        assert!(auth.is_authenticated());
    }

    #[test]
    fn wrong_credentials_are_rejected_without_a_session() {
        let dir = tempfile::tempdir().unwrap();
        let auth = service_in(&dir);

        assert!(!auth.login("admin@test.com", "wrong").unwrap());
        assert!(!auth.login("someone@test.com", "123456").unwrap());
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn logout_clears_the_session_and_tolerates_a_missing_one() {
        let dir = tempfile::tempdir().unwrap();
        let auth = service_in(&dir);

        auth.logout().unwrap();

        assert!(auth.login("admin@test.com", "123456").unwrap());
        auth.logout().unwrap();
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn tampered_session_file_does_not_authenticate() {
        let dir = tempfile::tempdir().unwrap();
        let auth = service_in(&dir);

        std::fs::write(dir.path().join("session"), "yes please").unwrap();
        assert!(!auth.is_authenticated());
    }
}
