pub mod auth;
pub mod config;
pub mod inbox;
pub mod session;
pub mod terminal;
