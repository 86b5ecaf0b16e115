use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::config::{self, Config};

/// Durable session entry stored in ~/.config/mailmind/session.json.
/// Holds at most one opaque token; presence is the whole auth signal.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    auth_token: Option<String>,
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn open(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Ok(Self::open(config::resolve_session_path(cfg)?))
    }

    /// Persist `token`, overwriting any prior value. Fails only when the
    /// underlying storage is unavailable.
    pub fn set_token(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let entry = SessionFile {
            auth_token: Some(token.to_string()),
        };
        let s = serde_json::to_string_pretty(&entry)?;
        fs::write(&self.path, s)?;
        Ok(())
    }

    /// The stored token, if any. Missing or unreadable storage degrades to
    /// `None` rather than an error.
    pub fn token(&self) -> Option<String> {
        let s = fs::read_to_string(&self.path).ok()?;
        let entry: SessionFile = serde_json::from_str(&s).ok()?;
        entry.auth_token
    }

    /// Forget the stored token. Idempotent: clearing an absent session is
    /// not an error.
    pub fn clear_token(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|t| !t.is_empty())
    }

    /// Header map to merge into outbound requests. Empty when no token is
    /// stored, never absent.
    pub fn auth_header(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        if let Some(token) = self.token()
            && !token.is_empty()
        {
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }
        headers
    }
}
