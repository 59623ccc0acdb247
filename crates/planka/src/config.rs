//! Credential store and connection configuration

use std::fs;
use std::path::{Path, PathBuf};

use planka_core::credentials::{
    resolve_credentials, upsert_env_keys, Credentials, CredentialsError, PLANKA_PASSWORD,
    PLANKA_URL, PLANKA_USERNAME,
};

use crate::prelude::*;

/// File name of the credential store inside the config directory
pub const CREDENTIALS_FILE_NAME: &str = "credentials.env";

/// Dotenv file holding the Planka URL, username and password
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use `path` when given, otherwise the default location
    pub fn resolve(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Ok(Self::new(path)),
            None => Ok(Self::new(Self::default_path()?)),
        }
    }

    /// `<config_dir>/planka/credentials.env`, or `.env` next to the executable
    pub fn default_path() -> Result<PathBuf> {
        if let Some(config_dir) = dirs_next::config_dir() {
            return Ok(config_dir.join("planka").join(CREDENTIALS_FILE_NAME));
        }

        let exe = std::env::current_exe()
            .map_err(|e| eyre!("Failed to locate the planka executable: {}", e))?;
        exe.parent()
            .map(|dir| dir.join(".env"))
            .ok_or_eyre("Failed to locate a directory for the credential file")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Current file contents; a missing file reads as empty
    fn contents(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(eyre!("Failed to read {}: {}", self.path.display(), e)),
        }
    }

    /// `(key, value)` pairs of the file in file order
    fn entries(&self) -> Result<Vec<(String, String)>> {
        read_entries(self.contents()?.as_bytes())
            .map_err(|e| eyre!("Failed to read {}: {}", self.path.display(), e))
    }

    /// Resolve credentials from the process environment and this file
    pub fn load(&self) -> Result<Credentials> {
        let entries = self.entries()?;
        log::debug!(
            "Read {} entries from {}",
            entries.len(),
            self.path.display()
        );

        resolve_credentials(|key| std::env::var(key).ok(), &entries).map_err(|err| match err {
            CredentialsError::MissingKeys(missing) => Error::MissingCredentials {
                path: self.path.display().to_string(),
                missing: missing.join(", "),
            }
            .into(),
        })
    }

    /// Write the three credential keys, keeping any other lines of the file
    pub fn save(&self, url: &str, username: &str, password: &str) -> Result<()> {
        let store_error = |reason: String| Error::CredentialStore {
            path: self.path.display().to_string(),
            reason,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| store_error(e.to_string()))?;
        }

        let contents = self.contents()?;
        let updated = upsert_env_keys(
            &contents,
            &[
                (PLANKA_URL, url),
                (PLANKA_USERNAME, username),
                (PLANKA_PASSWORD, password),
            ],
        );
        fs::write(&self.path, updated).map_err(|e| store_error(e.to_string()))?;
        log::info!("Saved credentials to {}", self.path.display());

        restrict_permissions(&self.path);
        Ok(())
    }

    /// Delete the file; `false` when there was nothing to delete
    pub fn remove(&self) -> Result<bool> {
        if !self.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .map_err(|e| eyre!("Could not delete {}: {}", self.path.display(), e))?;
        log::info!("Removed {}", self.path.display());
        Ok(true)
    }
}

/// Parse dotenv `source`, skipping lines that are not valid assignments
fn read_entries<R: std::io::Read>(source: R) -> Result<Vec<(String, String)>, dotenvy::Error> {
    let mut entries = Vec::new();

    for item in dotenvy::from_read_iter(source) {
        match item {
            Ok(entry) => entries.push(entry),
            Err(dotenvy::Error::LineParse(line, index)) => {
                log::warn!("Skipping unparsable line {:?} at offset {}", line, index)
            }
            Err(e) => return Err(e),
        }
    }

    Ok(entries)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        log::warn!("Failed to restrict permissions on {}: {}", path.display(), e);
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}
