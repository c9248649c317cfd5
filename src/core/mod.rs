//! Core module tree: circuit reader, quantum engine, puzzle and page logic.
//! Nothing in here prints except `debug_log!`.

#[macro_use]
pub mod debug; // gated debug logging (MYRIAD_DEBUG=1) provides debug_log! macro
pub mod circuit;
pub mod diagnostics;
pub mod error;
pub mod explorer;
pub mod pages;
pub mod qasm;
pub mod quantum;
pub mod realms;
