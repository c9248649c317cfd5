// Library crate behind the `myriad` binary; integration tests and the TUI
// reach everything through `crate::...` / `myriad::...`.
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod render;
pub mod session;
pub mod tui;
