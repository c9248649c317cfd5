//! One module per page plus the shared run context.

pub mod comics;
pub mod contact;
pub mod explore;
pub mod loader;
pub mod open;
pub mod realms;
pub mod session;
pub mod sphere;
pub mod visualize;

use std::io::IsTerminal;

use crate::config::Config;
use crate::session::Session;

/// Everything a page needs besides its own arguments.
pub struct AppContext {
    pub config: Config,
    pub session: Session,
    /// No animations, no colors.
    pub plain: bool,
}

impl AppContext {
    pub fn new(config: Config, session: Session, plain: bool) -> Self {
        Self { config, session, plain }
    }

    /// Animations only make sense on a real terminal.
    pub fn animate(&self) -> bool {
        !self.plain && std::io::stdout().is_terminal()
    }

    pub fn accent(&self) -> (u8, u8, u8) {
        let [r, g, b] = self.config.theme.accent;
        (r, g, b)
    }
}
