//! API key storage
//!
//! Stores the key in ~/.config/clippy-chat/key with restricted permissions (0o600).
//! `CLIPPY_API_KEY` takes precedence when set.

use clippy_core::{KeyError, KeyService};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Environment variable checked before the key file
pub const API_KEY_ENV: &str = "CLIPPY_API_KEY";

/// File-backed key store
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    path: PathBuf,
    env_var: Option<&'static str>,
}

impl FileKeyStore {
    /// Store at `path`, ignoring the environment
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            env_var: None,
        }
    }

    /// Store in the config directory, with the env var override
    pub fn default_location() -> Self {
        Self {
            env_var: Some(API_KEY_ENV),
            ..Self::new(crate::config::config_dir().join("key"))
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save the key, restricting permissions on unix
    pub fn save(&self, key: &str) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
                #[cfg(unix)]
                fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
            }
        }

        fs::write(&self.path, key.trim())?;

        #[cfg(unix)]
        fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;

        Ok(())
    }

    /// Delete the stored key; a missing file is not an error
    pub fn remove(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    fn read_file(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content.trim().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl KeyService for FileKeyStore {
    fn get_key(&self) -> Result<Option<String>, KeyError> {
        if let Some(var) = self.env_var {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    return Ok(Some(key));
                }
            }
        }
        Ok(self.read_file()?)
    }
}
