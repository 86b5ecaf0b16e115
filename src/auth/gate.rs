use anyhow::Result;
use url::Url;

use crate::session::SessionStore;

/// Where a view transition lands after a gate decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Inbox,
    Login,
}

/// Per-view auth decisions. The session is handed in explicitly; there is no
/// ambient "am I logged in" global.
pub struct AuthGate<'a> {
    session: &'a SessionStore,
}

impl<'a> AuthGate<'a> {
    pub fn new(session: &'a SessionStore) -> Self {
        Self { session }
    }

    /// Protected-view entry: checked once at mount time. A denied mount does
    /// no further work, in particular no fetch.
    pub fn admit(&self) -> Destination {
        if self.session.is_authenticated() {
            Destination::Inbox
        } else {
            log::debug!("no session token; redirecting to login");
            Destination::Login
        }
    }

    /// Callback entry: consume the one-shot `token` query parameter from the
    /// redirect URL. Present and non-empty: store it and head for the inbox.
    /// Absent: a normal "go log in" outcome, nothing stored, no error.
    ///
    /// Every URL handed in is a fresh evaluation; a later callback with a
    /// different token simply overwrites the session.
    pub fn accept_callback(&self, url: &Url) -> Result<Destination> {
        let token = url
            .query_pairs()
            .find(|(k, _)| k == "token")
            .map(|(_, v)| v.into_owned());

        match token {
            Some(t) if !t.is_empty() => {
                self.session.set_token(&t)?;
                Ok(Destination::Inbox)
            }
            _ => Ok(Destination::Login),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::open(dir.path().join("session.json"))
    }

    #[test]
    fn admit_without_session_redirects_to_login() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(AuthGate::new(&store).admit(), Destination::Login);
    }

    #[test]
    fn admit_with_session_proceeds() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.set_token("tok").unwrap();
        assert_eq!(AuthGate::new(&store).admit(), Destination::Inbox);
    }

    #[test]
    fn callback_with_token_stores_it_and_targets_inbox() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let gate = AuthGate::new(&store);

        let url = Url::parse("http://127.0.0.1:3000/callback?token=abc123").unwrap();
        assert_eq!(gate.accept_callback(&url).unwrap(), Destination::Inbox);
        assert_eq!(store.token().as_deref(), Some("abc123"));
    }

    #[test]
    fn callback_without_token_targets_login_and_stores_nothing() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let gate = AuthGate::new(&store);

        let url = Url::parse("http://127.0.0.1:3000/callback").unwrap();
        assert_eq!(gate.accept_callback(&url).unwrap(), Destination::Login);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn callback_with_empty_token_counts_as_absent() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let gate = AuthGate::new(&store);

        let url = Url::parse("http://127.0.0.1:3000/callback?token=").unwrap();
        assert_eq!(gate.accept_callback(&url).unwrap(), Destination::Login);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn later_callback_reevaluates_and_overwrites() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let gate = AuthGate::new(&store);

        let first = Url::parse("http://127.0.0.1:3000/callback?token=first").unwrap();
        let second = Url::parse("http://127.0.0.1:3000/callback?token=second").unwrap();
        gate.accept_callback(&first).unwrap();
        gate.accept_callback(&second).unwrap();
        assert_eq!(store.token().as_deref(), Some("second"));
    }
}
