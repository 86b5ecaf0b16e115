use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

use mailmind_client::auth::callback::run_login_flow;
use mailmind_client::auth::gate::{AuthGate, Destination};
use mailmind_client::config::load_config;
use mailmind_client::session::SessionStore;
use mailmind_client::terminal::run_tui;

#[derive(Parser)]
#[command(name = "mailmind")]
#[command(about = "Terminal client for the MailMind inbox", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the TUI (default)
    Tui,

    /// Sign in via the browser and store the session token
    Login,

    /// Forget the stored session token
    Logout,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;
    let session = SessionStore::from_config(&cfg)?;

    match cli.cmd.unwrap_or(Command::Tui) {
        Command::Tui => run_tui(&cfg, &session),

        Command::Login => {
            let gate = AuthGate::new(&session);
            match run_login_flow(&cfg.login_url(), &cfg.redirect_uri(), &gate)? {
                Destination::Inbox => {
                    println!("Signed in.");
                    Ok(())
                }
                Destination::Login => {
                    println!("No token received; not signed in.");
                    Ok(())
                }
            }
        }

        Command::Logout => {
            session.clear_token()?;
            println!("Signed out.");
            Ok(())
        }
    }
}
