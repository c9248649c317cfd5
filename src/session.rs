//! Per-terminal UI flags kept between invocations (JSON).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::core::realms::RealmsBoard;
use crate::io::atomic::atomic_write;

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub version: u32,
    pub loader_shown: bool,
    pub realms: RealmsBoard,
    pub selected_comic: Option<String>,
    pub updated_at: Option<String>,
}

/// A session bound to a file; `path == None` keeps everything in memory.
#[derive(Debug)]
pub struct Session {
    path: Option<PathBuf>,
    pub state: SessionState,
}

impl Session {
    pub fn in_memory() -> Self {
        Self { path: None, state: SessionState { version: 1, ..Default::default() } }
    }

    /// Missing file → fresh session. Unreadable JSON → fresh session and a
    /// warning; the bad file is overwritten on the next save.
    pub fn load(path: Option<PathBuf>) -> Self {
        let Some(p) = path else {
            return Self::in_memory();
        };
        let state = match Self::read_state(&p) {
            Ok(Some(s)) => s,
            Ok(None) => SessionState { version: 1, ..Default::default() },
            Err(e) => {
                eprintln!("{} ignoring session file: {e:#}", "warn:".yellow().bold());
                SessionState { version: 1, ..Default::default() }
            }
        };
        Self { path: Some(p), state }
    }

    fn read_state(path: &Path) -> Result<Option<SessionState>> {
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("read session {}", path.display()))?;
        let state: SessionState = serde_json::from_str(&data)
            .with_context(|| format!("parse session {}", path.display()))?;
        Ok(Some(state))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn save(&mut self) -> Result<()> {
        self.state.updated_at = Some(current_timestamp());
        let Some(p) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.state)?;
        atomic_write(p, json).with_context(|| format!("write session {}", p.display()))?;
        crate::debug_log!("session saved to {}", p.display());
        Ok(())
    }

    pub fn reset(&mut self) -> Result<()> {
        self.state = SessionState { version: 1, ..Default::default() };
        if let Some(p) = &self.path {
            if p.exists() {
                fs::remove_file(p).with_context(|| format!("remove session {}", p.display()))?;
            }
        }
        Ok(())
    }
}
