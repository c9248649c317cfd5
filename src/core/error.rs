use std::fmt;

/// Everything that can go wrong between circuit text and a statevector.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Malformed circuit text, with a 1-based source position.
    Parse { line: usize, col: usize, message: String },
    UnsupportedGate { name: String, line: usize, col: usize },
    QubitOutOfRange { index: usize, num_qubits: usize },
    TooManyQubits { requested: usize, limit: usize },
    Dimension(String),
    NotNormalized(f64),
    Backend(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Parse { line, col, message } => {
                write!(f, "Parse Error ({}:{}): {}", line, col, message)
            }
            SimulationError::UnsupportedGate { name, line, col } => {
                write!(f, "Unsupported Gate ({}:{}): '{}'", line, col, name)
            }
            SimulationError::QubitOutOfRange { index, num_qubits } => write!(
                f,
                "Qubit Out Of Range: q{} (circuit has {} qubits)",
                index, num_qubits
            ),
            SimulationError::TooManyQubits { requested, limit } => write!(
                f,
                "Too Many Qubits: {} requested, limit is {}",
                requested, limit
            ),
            SimulationError::Dimension(msg) => write!(f, "Dimension Error: {}", msg),
            SimulationError::NotNormalized(norm) => {
                write!(f, "State Error: not normalized (||ψ|| = {})", norm)
            }
            SimulationError::Backend(msg) => write!(f, "Backend Error: {}", msg),
        }
    }
}

impl std::error::Error for SimulationError {}

impl SimulationError {
    pub fn parse(line: usize, col: usize, message: impl Into<String>) -> Self {
        SimulationError::Parse { line, col, message: message.into() }
    }
    pub fn dimension(message: impl Into<String>) -> Self {
        SimulationError::Dimension(message.into())
    }
    pub fn backend(message: impl Into<String>) -> Self {
        SimulationError::Backend(message.into())
    }

    /// Source position, when the error points into the circuit text.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            SimulationError::Parse { line, col, .. }
            | SimulationError::UnsupportedGate { line, col, .. } => Some((*line, *col)),
            _ => None,
        }
    }
}
