use ratatui::widgets::ListState;

use crate::auth::gate::{AuthGate, Destination};
use crate::inbox::loader::{InboxLoader, LoadStatus};
use crate::inbox::render::{EmailCard, render_cards};
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Inbox,
}

pub struct AppState {
    pub screen: Screen,

    /// The in-flight or settled fetch of the current inbox mount.
    /// `None` outside the inbox screen.
    pub loader: Option<InboxLoader>,
    pub cards: Vec<EmailCard>,
    pub list_state: ListState,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Login,
            loader: None,
            cards: vec![],
            list_state: ListState::default(),
        }
    }

    /// Entry point of the protected screen. The gate runs once per mount;
    /// when admitted the single fetch for this mount starts, otherwise no
    /// further work happens and the login screen takes over.
    pub fn mount_inbox(&mut self, base_url: &str, session: &SessionStore) {
        match AuthGate::new(session).admit() {
            Destination::Inbox => {
                self.screen = Screen::Inbox;
                self.loader = Some(InboxLoader::start(base_url, session));
                self.cards.clear();
                self.list_state.select(None);
            }
            Destination::Login => self.mount_login(),
        }
    }

    pub fn mount_login(&mut self) {
        self.screen = Screen::Login;
        self.loader = None;
        self.cards.clear();
        self.list_state.select(None);
    }

    /// Absorb the fetch outcome if it arrived. Records are projected into
    /// display cards exactly once, at the Loading -> Loaded transition.
    pub fn tick(&mut self) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };
        if !matches!(loader.status(), LoadStatus::Loading) {
            return;
        }
        if let LoadStatus::Loaded(emails) = loader.poll() {
            self.cards = render_cards(emails);
            if !self.cards.is_empty() {
                self.list_state.select(Some(0));
            }
        }
    }

    pub fn move_selection(&mut self, delta: i32) {
        if self.cards.is_empty() {
            self.list_state.select(None);
            return;
        }
        let cur = self.list_state.selected().unwrap_or(0) as i32;
        let len = self.cards.len() as i32;
        let next = (cur + delta).clamp(0, len - 1) as usize;
        self.list_state.select(Some(next));
    }

    /// The original dashboard's Logout button: forget the token, back to
    /// the login screen.
    pub fn logout(&mut self, session: &SessionStore) -> anyhow::Result<()> {
        session.clear_token()?;
        self.mount_login();
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn unauthenticated_mount_redirects_and_issues_no_fetch() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));

        let mut state = AppState::new();
        state.mount_inbox("http://127.0.0.1:1", &store);

        assert_eq!(state.screen, Screen::Login);
        assert!(state.loader.is_none());
    }

    #[test]
    fn authenticated_mount_enters_inbox_loading() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));
        store.set_token("tok").unwrap();

        let mut state = AppState::new();
        // nothing listens on this port; the fetch will settle as Failed,
        // which is fine: mount semantics are what is under test
        state.mount_inbox("http://127.0.0.1:1", &store);

        assert_eq!(state.screen, Screen::Inbox);
        let loader = state.loader.as_ref().unwrap();
        assert!(matches!(
            loader.status(),
            LoadStatus::Loading | LoadStatus::Failed(_)
        ));
    }

    #[test]
    fn logout_clears_token_and_returns_to_login() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));
        store.set_token("tok").unwrap();

        let mut state = AppState::new();
        state.mount_inbox("http://127.0.0.1:1", &store);
        state.logout(&store).unwrap();

        assert_eq!(state.screen, Screen::Login);
        assert!(state.loader.is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn selection_clamps_to_list_bounds() {
        let mut state = AppState::new();
        state.cards = vec![
            crate::inbox::render::EmailCard {
                sender: "a@example.com".into(),
                preview: "a…".into(),
                type_label: "SUPPORT".into(),
                confidence_label: "50%".into(),
                needs_review: false,
            },
            crate::inbox::render::EmailCard {
                sender: "b@example.com".into(),
                preview: "b…".into(),
                type_label: "SUPPORT".into(),
                confidence_label: "50%".into(),
                needs_review: false,
            },
        ];
        state.list_state.select(Some(0));

        state.move_selection(5);
        assert_eq!(state.list_state.selected(), Some(1));
        state.move_selection(-5);
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn selection_on_empty_list_stays_empty() {
        let mut state = AppState::new();
        state.move_selection(1);
        assert_eq!(state.list_state.selected(), None);
    }
}
