use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    #[clap(alias = "titan")]
    Native,
    #[clap(alias = "qiskit")]
    Aer,
}

impl BackendKind {
    pub fn name(self) -> &'static str {
        match self {
            BackendKind::Native => "native",
            BackendKind::Aer => "aer",
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "myriad",
    about = "Myriad — quantum circuit state visualizer: Bloch spheres, purity, Realms puzzle",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct MyriadCli {
    /// Global: path to config (TOML); default: ~/.myriad/myriad.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Global: skip the loader animation
    #[arg(long = "no-loader", action = ArgAction::SetTrue, global = true)]
    pub no_loader: bool,

    /// Global: enable simulator debug output (same as MYRIAD_DEBUG=1)
    #[arg(long = "debug-sim", action = ArgAction::SetTrue, global = true)]
    pub debug_sim: bool,

    /// Global: no colors, no animations
    #[arg(long = "plain", action = ArgAction::SetTrue, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Route a query string to a page
    ///
    /// Examples:
    ///   myriad open "?page=realms"
    ///   myriad open "http://localhost:8501/?page=visualization"
    Open {
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// Landing page with the rotating sphere
    Sphere {
        /// Number of animation frames (0 = static)
        #[arg(long = "frames", value_name = "N")]
        frames: Option<u64>,
    },

    /// Simulate OpenQASM and show each qubit's reduced state
    ///
    /// Examples:
    ///   myriad visualize                 (Bell demo)
    ///   myriad visualize ghz.qasm --json
    ///   cat c.qasm | myriad visualize -
    Visualize {
        /// QASM file, `-` for stdin; omitted → built-in demo
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
        /// Simulation backend (default from config)
        #[arg(long = "backend", value_enum)]
        backend: Option<BackendKind>,
        /// Emit the analysis as JSON
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
        /// Skip the circuit diagram
        #[arg(long = "no-diagram", action = ArgAction::SetTrue)]
        no_diagram: bool,
    },

    /// Single-qubit Bloch explorer
    Explore {
        /// Polar angle in radians, clamped to [0, π]
        #[arg(long = "theta", default_value_t = 0.0, allow_negative_numbers = true)]
        theta: f64,
        /// Azimuth in radians, wrapped into [0, 2π)
        #[arg(long = "phi", default_value_t = 0.0, allow_negative_numbers = true)]
        phi: f64,
        /// Sample N measurements in the Z basis
        #[arg(long = "shots", value_name = "N")]
        shots: Option<usize>,
        /// Interactive sliders
        #[arg(long = "tui", action = ArgAction::SetTrue)]
        tui: bool,
    },

    /// Bell-state puzzle (board persists in the session)
    Realms {
        #[command(subcommand)]
        action: Option<RealmsCmd>,
    },

    /// Comics gallery
    Comics {
        /// Folder with PDF comics (default from config)
        #[arg(long = "dir", value_name = "DIR")]
        dir: Option<PathBuf>,
        /// Select a comic by title
        #[arg(long = "view", value_name = "TITLE")]
        view: Option<String>,
        /// Write a self-contained HTML gallery
        #[arg(long = "export", value_name = "FILE")]
        export: Option<PathBuf>,
    },

    /// Contact form (prompts for missing fields on a terminal)
    Contact {
        #[arg(long = "name")]
        name: Option<String>,
        #[arg(long = "email")]
        email: Option<String>,
        #[arg(long = "message")]
        message: Option<String>,
    },

    /// Inspect or clear session flags
    Session {
        #[command(subcommand)]
        action: Option<SessionCmd>,
    },
}

#[derive(Debug, Subcommand)]
pub enum RealmsCmd {
    /// Print the board, citizens and mission status
    Show,
    /// Pick a palette gate: h | x | cnot-c | cnot-t
    Select {
        #[arg(value_name = "GATE")]
        gate: String,
    },
    /// Place the selected gate at (citizen, step)
    Place {
        #[arg(value_name = "CITIZEN")]
        citizen: usize,
        #[arg(value_name = "STEP")]
        step: usize,
    },
    /// Empty a slot
    Clear {
        #[arg(value_name = "CITIZEN")]
        citizen: usize,
        #[arg(value_name = "STEP")]
        step: usize,
    },
    /// Empty the board and the mission flag
    Reset,
    /// Interactive board
    Play,
}

#[derive(Debug, Subcommand)]
pub enum SessionCmd {
    Show,
    Reset,
}
