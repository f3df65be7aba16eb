//! Bearer token persistence.
//!
//! Stores the token in `<home>/auth.json` with restricted permissions (0600).
//! Tokens are never logged or displayed in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// On-disk shape: a single slot under the fixed `access_token` key.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct TokenFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
}

/// Scoped local store holding a single bearer token.
///
/// Each successful login overwrites the slot; nothing in this crate deletes
/// it.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store rooted at an explicit file path (used by tests and embedders
    /// with their own storage scope).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path this store writes to.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Saves the token, overwriting any prior value.
    ///
    /// Writes with restricted permissions (0600) on Unix.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let file = TokenFile {
            access_token: Some(token.to_string()),
        };
        let contents =
            serde_json::to_string_pretty(&file).context("Failed to serialize token file")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Loads the stored token.
    ///
    /// Returns `None` if the file or the slot doesn't exist. Not used by the
    /// login flow (sessions are not restored across runs), provided as the
    /// dual of `save`.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read token file from {}", self.path.display()))?;
        let file: TokenFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse token file from {}", self.path.display()))?;

        Ok(file.access_token)
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::at(paths::token_path())
    }
}

/// Returns a masked version of a token for display (first 12 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 16 {
        return "***".to_string();
    }
    format!("{}...", &token[..12])
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    /// Test: save-then-load round trip.
    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("auth.json"));

        store.save("tok123").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("tok123"));
    }

    /// Test: a second save overwrites the slot.
    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("auth.json"));

        store.save("old-token-value").unwrap();
        store.save("new-token-value").unwrap();

        assert_eq!(store.load().unwrap().as_deref(), Some("new-token-value"));
        let contents = fs::read_to_string(store.path()).unwrap();
        assert!(!contents.contains("old-token-value"));
    }

    /// Test: missing file loads as None.
    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("auth.json"));

        assert_eq!(store.load().unwrap(), None);
    }

    /// Test: save creates missing parent directories.
    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("nested").join("auth.json"));

        store.save("tok123").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("tok123"));
    }

    /// Test: token file has restricted permissions on Unix.
    #[cfg(unix)]
    #[test]
    fn test_token_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("auth.json"));
        store.save("tok123").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    /// Test: token masking.
    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("tok-long-value-1234567890"), "tok-long-val...");
        assert_eq!(mask_token("short"), "***");
    }
}
