use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub login_url: Option<String>,
    pub redirect_uri: Option<String>,
    pub session_path: Option<String>,
}

impl Config {
    /// URL the browser is sent to for sign-in. Defaults to the backend's
    /// Google login route.
    pub fn login_url(&self) -> String {
        self.login_url
            .clone()
            .unwrap_or_else(|| format!("{}/auth/google/login", self.api_base_url))
    }

    /// Where the backend redirects the browser after sign-in; the token
    /// listener binds here.
    pub fn redirect_uri(&self) -> String {
        self.redirect_uri
            .clone()
            .unwrap_or_else(|| "http://127.0.0.1:3000/callback".to_string())
    }
}

fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("no config dir available"))?
        .join("mailmind"))
}

pub fn config_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("config.toml");
    Ok(p)
}

pub fn default_session_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("session.json");
    Ok(p)
}

pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        // create a template config for users to edit
        let sample = Config {
            api_base_url: "http://localhost:8000".to_string(),
            login_url: None,
            redirect_uri: Some("http://127.0.0.1:3000/callback".to_string()),
            session_path: None,
        };
        let tom = toml::to_string_pretty(&sample)?;
        fs::write(&path, tom)?;
        return Err(anyhow::anyhow!(
            "Created template config at {} — edit it and run again",
            path.display()
        ));
    }
    let s = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&s)?;
    Ok(cfg)
}

pub fn resolve_session_path(cfg: &Config) -> Result<PathBuf> {
    if let Some(p) = &cfg.session_path {
        Ok(PathBuf::from(p))
    } else {
        default_session_path()
    }
}
