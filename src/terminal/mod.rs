pub mod events;
pub mod state;
pub mod ui;

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use std::time::Duration;

use crate::auth::callback::run_login_flow;
use crate::auth::gate::{AuthGate, Destination};
use crate::config::Config;
use crate::session::SessionStore;
use crate::terminal::events::Action;
use crate::terminal::state::AppState;

pub fn run_tui(cfg: &Config, session: &SessionStore) -> Result<()> {
    let mut state = AppState::new();
    // straight to the protected screen; the gate bounces us to login if
    // there is no session
    state.mount_inbox(&cfg.api_base_url, session);

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &mut state, cfg, session);
    ratatui::restore();
    result
}

fn run(
    terminal: &mut DefaultTerminal,
    state: &mut AppState,
    cfg: &Config,
    session: &SessionStore,
) -> Result<()> {
    loop {
        state.tick();
        terminal.draw(|f| ui::render(f, state))?;

        // short poll so an in-flight fetch can resolve between keystrokes
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        match events::handle_key(key, state, session)? {
            Action::Quit => return Ok(()),
            Action::SignIn => sign_in(terminal, state, cfg, session)?,
            Action::Continue => {}
        }
    }
}

/// Suspend the TUI for the browser round-trip, then remount whichever
/// screen the gate decided on.
fn sign_in(
    terminal: &mut DefaultTerminal,
    state: &mut AppState,
    cfg: &Config,
    session: &SessionStore,
) -> Result<()> {
    ratatui::restore();
    let gate = AuthGate::new(session);
    let outcome = run_login_flow(&cfg.login_url(), &cfg.redirect_uri(), &gate);
    *terminal = ratatui::init();
    terminal.clear()?;

    match outcome? {
        Destination::Inbox => state.mount_inbox(&cfg.api_base_url, session),
        Destination::Login => state.mount_login(),
    }
    Ok(())
}
