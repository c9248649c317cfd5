use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::quantum::simulator::{MAX_QUBITS, QUBIT_CEILING};

pub fn myriad_home() -> Option<PathBuf> {
    // ~\Users\you\.myriad on Windows; ~/.myriad elsewhere
    dirs_next::home_dir().map(|h| h.join(".myriad"))
}

pub fn default_config_path() -> Option<PathBuf> {
    myriad_home().map(|h| h.join("myriad.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    pub message: String,
    pub duration_ms: u64,
    pub enabled: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            message: "Initializing quantum state…".into(),
            duration_ms: 1500,
            enabled: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisualizeConfig {
    pub default_backend: String,
    /// Decimals printed for purity values.
    pub precision: usize,
}

impl Default for VisualizeConfig {
    fn default() -> Self {
        Self { default_backend: "native".into(), precision: 4 }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub accent: [u8; 3],
}

impl Default for ThemeConfig {
    fn default() -> Self {
        // IBM blue, as on the landing sphere
        Self { accent: [15, 98, 254] }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub max_qubits: usize,
    pub comics_dir: PathBuf,
    pub session_file: Option<PathBuf>,
    pub loader: LoaderConfig,
    pub visualize: VisualizeConfig,
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_qubits: MAX_QUBITS,
            comics_dir: PathBuf::from("assets/comics"),
            session_file: None,
            loader: LoaderConfig::default(),
            visualize: VisualizeConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(src).context("Parse myriad config")?;
        if cfg.max_qubits == 0 || cfg.max_qubits > QUBIT_CEILING {
            anyhow::bail!("max_qubits must be between 1 and {QUBIT_CEILING}, got {}", cfg.max_qubits);
        }
        Ok(cfg)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("Read config {}", path.display()))?;
        Self::from_toml_str(&src).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Missing file → defaults; a file that exists but does not parse is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => Self::from_toml_file(p),
            _ => Ok(Self::default()),
        }
    }

    pub fn session_path(&self) -> Option<PathBuf> {
        self.session_file
            .clone()
            .or_else(|| myriad_home().map(|h| h.join("session.json")))
    }
}
