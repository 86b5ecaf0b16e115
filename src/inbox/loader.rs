use anyhow::Result;
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::inbox::email::Email;
use crate::session::SessionStore;

/// The one user-visible fetch failure message. The underlying cause is never
/// surfaced.
pub const LOAD_ERROR: &str = "Could not load emails";

/// Load state of one inbox mount. Transitions are one-directional: `Loading`
/// resolves into `Loaded` or `Failed` exactly once and stays there.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Loaded(Vec<Email>),
    Failed(String),
}

/// Issues the single fetch for one inbox mount on a background thread and
/// hands the outcome back over a channel. There is no retry, no timeout and
/// no cancellation: dropping the loader just leaves a late response
/// unobserved.
pub struct InboxLoader {
    status: LoadStatus,
    rx: Receiver<LoadStatus>,
}

impl InboxLoader {
    pub fn start(base_url: &str, session: &SessionStore) -> Self {
        let endpoint = format!("{}/emails", base_url.trim_end_matches('/'));
        let headers = session.auth_header();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let resolved = match fetch_emails(&endpoint, &headers) {
                Ok(emails) => LoadStatus::Loaded(emails),
                Err(e) => {
                    log::debug!("inbox fetch failed: {e:#}");
                    LoadStatus::Failed(LOAD_ERROR.to_string())
                }
            };
            // receiver may be gone if the view went away; discard then
            let _ = tx.send(resolved);
        });

        Self {
            status: LoadStatus::Loading,
            rx,
        }
    }

    /// Non-blocking: absorb the fetch outcome if it has arrived. A no-op
    /// once the status has left `Loading`.
    pub fn poll(&mut self) -> &LoadStatus {
        if matches!(self.status, LoadStatus::Loading) {
            match self.rx.try_recv() {
                Ok(resolved) => self.status = resolved,
                Err(TryRecvError::Empty) => {}
                // fetch thread died without an answer
                Err(TryRecvError::Disconnected) => {
                    self.status = LoadStatus::Failed(LOAD_ERROR.to_string());
                }
            }
        }
        &self.status
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }
}

fn fetch_emails(endpoint: &str, headers: &HashMap<String, String>) -> Result<Vec<Email>> {
    let client = reqwest::blocking::Client::new();
    let mut request = client.get(endpoint);
    for (name, value) in headers {
        request = request.header(name.as_str(), value.as_str());
    }

    let response = request.send()?;
    if !response.status().is_success() {
        anyhow::bail!("unexpected status {}", response.status());
    }

    Ok(response.json()?)
}
