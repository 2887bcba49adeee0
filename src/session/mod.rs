//! Local session persistence.
//!
//! The session file is the only state kept on the device. It is written at
//! login and removed on logout or when the backend rejects the token.

use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::models::Session;

/// File-backed store for the logged-in session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the session, replacing any previous one.
    pub async fn save(&self, session: &Session) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec_pretty(session)?;
        tokio::fs::write(&self.path, json).await?;
        restrict_permissions(&self.path).await?;

        tracing::debug!("Session saved to {:?}", self.path);
        Ok(())
    }

    /// Load the stored session, if any.
    ///
    /// A corrupt file is treated as no session and removed.
    pub async fn load(&self) -> Result<Option<Session>, AppError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Session>(&bytes) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!("Discarding unreadable session file: {}", e);
                self.clear().await?;
                Ok(None)
            }
        }
    }

    /// Load the stored session or fail with `Unauthorized`.
    pub async fn require(&self) -> Result<Session, AppError> {
        self.load()
            .await?
            .ok_or_else(|| AppError::Unauthorized("No user is logged in".to_string()))
    }

    /// Remove the stored session. Missing files are not an error.
    pub async fn clear(&self) -> Result<(), AppError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::info!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<(), AppError> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<(), AppError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use tempfile::TempDir;

    fn driver_session() -> Session {
        Session {
            user_id: 9,
            role: Role::Driver,
            patent: Some("ABCD12".to_string()),
            access_token: "token-9".to_string(),
            token_type: "bearer".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Rojas".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path().join("nested/session.json"));

        assert!(store.load().await.unwrap().is_none());

        store.save(&driver_session()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(driver_session()));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        // Clearing twice is fine
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_discarded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let store = SessionStore::new(&path);
        assert!(store.load().await.unwrap().is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_require_without_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path().join("session.json"));
        let err = store.require().await.unwrap_err();
        assert_eq!(err.error_code(), "UNAUTHORIZED");
    }
}
