use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::session::SessionStore;
use crate::terminal::state::{AppState, Screen};

/// What the run loop should do after a keypress. Sign-in bubbles up because
/// it has to suspend the terminal for the browser round-trip.
pub enum Action {
    Continue,
    Quit,
    SignIn,
}

pub fn handle_key(key: KeyEvent, state: &mut AppState, session: &SessionStore) -> Result<Action> {
    if key.code == KeyCode::Char('q') {
        return Ok(Action::Quit);
    }

    match state.screen {
        Screen::Login => handle_login_keys(key),
        Screen::Inbox => handle_inbox_keys(key, state, session),
    }
}

fn handle_login_keys(key: KeyEvent) -> Result<Action> {
    match key.code {
        KeyCode::Enter | KeyCode::Char('s') => Ok(Action::SignIn),
        KeyCode::Esc => Ok(Action::Quit),
        _ => Ok(Action::Continue),
    }
}

fn handle_inbox_keys(key: KeyEvent, state: &mut AppState, session: &SessionStore) -> Result<Action> {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => state.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => state.move_selection(-1),
        KeyCode::Home => {
            if !state.cards.is_empty() {
                state.list_state.select(Some(0));
            }
        }
        KeyCode::End => {
            if !state.cards.is_empty() {
                state.list_state.select(Some(state.cards.len() - 1));
            }
        }
        KeyCode::Char('l') => state.logout(session)?,
        KeyCode::Esc => return Ok(Action::Quit),
        _ => {}
    }
    Ok(Action::Continue)
}
