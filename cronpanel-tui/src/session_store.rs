use anyhow::{Context, Result};
use cronpanel_client::Credential;
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

use crate::config;

/// Persists the bearer credential across runs.
///
/// No expiry is tracked locally; a stale token only shows up as an
/// authorization failure from the server.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

impl SessionStore {
    pub fn default_location() -> Result<Self> {
        Ok(Self::at(config::root_dir()?.join("session")))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path).context("Failed to read session file")?;
        Ok(Credential::new(&raw))
    }

    pub fn save(&self, credential: &Credential) -> Result<()> {
        secure_write(&self.path, credential.expose())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_clear_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("nested").join("session"));

        assert!(store.load().unwrap().is_none());

        store.save(&Credential::new("tok-1").unwrap()).unwrap();
        assert_eq!(store.load().unwrap(), Credential::new("tok-1"));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn blank_file_means_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");
        std::fs::write(&path, "\n  \n").unwrap();

        assert!(SessionStore::at(path).load().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("session"));
        store.save(&Credential::new("tok").unwrap()).unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
