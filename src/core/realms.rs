//! Quantum Realms: a 2-citizen × 3-step circuit puzzle whose mission is to
//! prepare the Bell state (|00⟩ + |11⟩)/√2.

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64 as C64;
use serde::{Deserialize, Serialize};

use crate::core::circuit::{Circuit, GateKind};
use crate::core::error::SimulationError;
use crate::core::quantum::analysis::{QubitClass, POLE_BAND};
use crate::core::quantum::simulator::{NativeSimulator, Simulator};
use crate::core::quantum::types::QState;

pub const CITIZENS: usize = 2;
pub const STEPS: usize = 3;

pub const MISSION_TITLE: &str = "Mission 01: Create a Bell State";
pub const MISSION_BRIEFING: &str =
    "Professor Qubit explains the spooky link between two particles. \
     Construct a circuit to entangle the two Quantum Citizens.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaletteGate {
    #[serde(rename = "H")]
    H,
    #[serde(rename = "X")]
    X,
    #[serde(rename = "CNOT_C")]
    CnotControl,
    #[serde(rename = "CNOT_T")]
    CnotTarget,
}

impl PaletteGate {
    pub const ALL: [PaletteGate; 4] = [
        PaletteGate::H,
        PaletteGate::X,
        PaletteGate::CnotControl,
        PaletteGate::CnotTarget,
    ];

    /// Palette button text.
    pub fn title(self) -> &'static str {
        match self {
            PaletteGate::H => "Hadamard (H)",
            PaletteGate::X => "Pauli-X (X)",
            PaletteGate::CnotControl => "CNOT (Control)",
            PaletteGate::CnotTarget => "CNOT (Target)",
        }
    }

    /// Text shown inside a grid slot.
    pub fn cell(self) -> &'static str {
        match self {
            PaletteGate::H => "H",
            PaletteGate::X => "X",
            PaletteGate::CnotControl => "CNOT ●",
            PaletteGate::CnotTarget => "CNOT ⊕",
        }
    }
}

impl fmt::Display for PaletteGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaletteGate::H => "H",
            PaletteGate::X => "X",
            PaletteGate::CnotControl => "CNOT_C",
            PaletteGate::CnotTarget => "CNOT_T",
        };
        f.write_str(s)
    }
}

impl FromStr for PaletteGate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "h" | "hadamard" => Ok(PaletteGate::H),
            "x" | "pauli_x" | "not" => Ok(PaletteGate::X),
            "c" | "cnot_c" | "control" | "cnot_control" => Ok(PaletteGate::CnotControl),
            "t" | "cnot_t" | "target" | "cnot_target" => Ok(PaletteGate::CnotTarget),
            other => Err(format!("unknown palette gate '{other}' (h | x | cnot-c | cnot-t)")),
        }
    }
}

pub type Grid = [[Option<PaletteGate>; STEPS]; CITIZENS];

/// Puzzle state that survives between invocations (stored in the session).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RealmsBoard {
    pub grid: Grid,
    pub selected: Option<PaletteGate>,
    pub mission_complete: bool,
}

/// Result of simulating the current grid.
#[derive(Clone, Debug)]
pub struct RealmsOutcome {
    pub circuit: Circuit,
    pub state: QState,
    pub labels: [QubitClass; CITIZENS],
    /// Mission flipped to complete on this evaluation.
    pub just_completed: bool,
}

fn check_slot(citizen: usize, step: usize) -> Result<(), SimulationError> {
    if citizen >= CITIZENS {
        return Err(SimulationError::QubitOutOfRange { index: citizen, num_qubits: CITIZENS });
    }
    if step >= STEPS {
        return Err(SimulationError::dimension(format!(
            "step {step} is outside the canvas (0..{STEPS})"
        )));
    }
    Ok(())
}

impl RealmsBoard {
    pub fn select(&mut self, gate: PaletteGate) {
        self.selected = Some(gate);
    }

    /// Put the selected gate in a slot. With nothing selected the slot is
    /// cleared, like clicking a slot with an empty palette.
    pub fn place(&mut self, citizen: usize, step: usize) -> Result<(), SimulationError> {
        check_slot(citizen, step)?;
        self.grid[citizen][step] = self.selected;
        Ok(())
    }

    pub fn clear(&mut self, citizen: usize, step: usize) -> Result<(), SimulationError> {
        check_slot(citizen, step)?;
        self.grid[citizen][step] = None;
        Ok(())
    }

    /// Empty grid and drop the mission flag; the palette selection stays.
    pub fn reset(&mut self) {
        self.grid = Grid::default();
        self.mission_complete = false;
    }

    pub fn is_empty(&self) -> bool {
        self.grid.iter().flatten().all(Option::is_none)
    }

    pub fn circuit(&self) -> Circuit {
        build_circuit(&self.grid)
    }

    /// Simulate and update the sticky mission flag.
    pub fn evaluate(&mut self) -> Result<RealmsOutcome, SimulationError> {
        let circuit = build_circuit(&self.grid);
        let state = NativeSimulator::default().statevector(&circuit)?;
        let labels = citizen_labels(&state);
        let just_completed = is_target_bell(&state) && !self.mission_complete;
        if just_completed {
            self.mission_complete = true;
            crate::debug_log!("realms: mission complete");
        }
        Ok(RealmsOutcome { circuit, state, labels, just_completed })
    }
}

/// Per step: single-qubit gates on q0 then q1, then a CNOT if the two slots
/// hold a matching control/target pair. Lone CNOT halves do nothing.
pub fn build_circuit(grid: &Grid) -> Circuit {
    let mut c = Circuit::new(CITIZENS);
    c.cregs.push(crate::core::circuit::Register { name: "c".into(), size: CITIZENS, offset: 0 });
    for step in 0..STEPS {
        for (q, row) in grid.iter().enumerate() {
            match row[step] {
                Some(PaletteGate::H) => {
                    c.gate(GateKind::H, &[q]);
                }
                Some(PaletteGate::X) => {
                    c.gate(GateKind::X, &[q]);
                }
                _ => {}
            }
        }
        match (grid[0][step], grid[1][step]) {
            (Some(PaletteGate::CnotControl), Some(PaletteGate::CnotTarget)) => {
                c.gate(GateKind::Cx, &[0, 1]);
            }
            (Some(PaletteGate::CnotTarget), Some(PaletteGate::CnotControl)) => {
                c.gate(GateKind::Cx, &[1, 0]);
            }
            _ => {}
        }
    }
    c
}

fn bell_phi_plus() -> [C64; 4] {
    let s = C64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    let z = C64::new(0.0, 0.0);
    [s, z, z, s]
}

fn bell_psi_plus() -> [C64; 4] {
    let s = C64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    let z = C64::new(0.0, 0.0);
    [z, s, s, z]
}

pub fn is_target_bell(state: &QState) -> bool {
    state.len() == 4 && state.allclose(&bell_phi_plus())
}

/// Both citizens are entangled on either Bell state the puzzle can reach;
/// otherwise each is judged by its own P(|0⟩).
pub fn citizen_labels(state: &QState) -> [QubitClass; CITIZENS] {
    if state.len() == 4 && (state.allclose(&bell_phi_plus()) || state.allclose(&bell_psi_plus())) {
        return [QubitClass::Entangled; CITIZENS];
    }
    let label = |q: usize| {
        let p0 = state.prob_zero(q);
        if p0 > POLE_BAND.0 && p0 < POLE_BAND.1 {
            QubitClass::Superposition
        } else {
            QubitClass::Idle
        }
    };
    [label(0), label(1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cells: &[(usize, usize, PaletteGate)]) -> RealmsBoard {
        let mut b = RealmsBoard::default();
        for &(q, s, g) in cells {
            b.select(g);
            b.place(q, s).unwrap();
        }
        b
    }

    #[test]
    fn h_then_cnot_completes_mission() {
        let mut b = board(&[
            (0, 0, PaletteGate::H),
            (0, 1, PaletteGate::CnotControl),
            (1, 1, PaletteGate::CnotTarget),
        ]);
        let out = b.evaluate().unwrap();
        assert!(out.just_completed);
        assert!(b.mission_complete);
        assert_eq!(out.labels, [QubitClass::Entangled, QubitClass::Entangled]);

        // sticky: a second evaluation does not fire again
        assert!(!b.evaluate().unwrap().just_completed);
        assert!(b.mission_complete);

        b.reset();
        assert!(!b.mission_complete);
        assert!(b.is_empty());
    }

    #[test]
    fn psi_plus_is_entangled_but_not_the_mission() {
        let mut b = board(&[
            (0, 0, PaletteGate::H),
            (1, 0, PaletteGate::X),
            (0, 1, PaletteGate::CnotControl),
            (1, 1, PaletteGate::CnotTarget),
        ]);
        let out = b.evaluate().unwrap();
        assert_eq!(out.labels, [QubitClass::Entangled; 2]);
        assert!(!b.mission_complete);
    }

    #[test]
    fn mirrored_cnot() {
        let b = board(&[
            (1, 0, PaletteGate::H),
            (0, 1, PaletteGate::CnotTarget),
            (1, 1, PaletteGate::CnotControl),
        ]);
        let c = b.circuit();
        assert_eq!(c.ops.last().map(|o| o.qubits.clone()), Some(vec![1, 0]));
    }

    #[test]
    fn lone_cnot_half_is_ignored() {
        let b = board(&[(0, 2, PaletteGate::CnotControl)]);
        assert!(b.circuit().ops.is_empty());
    }

    #[test]
    fn labels_use_each_citizens_marginal() {
        let mut b = board(&[(1, 0, PaletteGate::H)]);
        let out = b.evaluate().unwrap();
        assert_eq!(out.labels, [QubitClass::Idle, QubitClass::Superposition]);
    }

    #[test]
    fn place_without_selection_clears() {
        let mut b = board(&[(0, 0, PaletteGate::X)]);
        b.selected = None;
        b.place(0, 0).unwrap();
        assert!(b.is_empty());
        assert!(b.place(2, 0).is_err());
        assert!(b.clear(0, 3).is_err());
    }

    #[test]
    fn palette_names_parse() {
        assert_eq!("cnot-c".parse::<PaletteGate>(), Ok(PaletteGate::CnotControl));
        assert_eq!("T".parse::<PaletteGate>(), Ok(PaletteGate::CnotTarget));
        assert!("y".parse::<PaletteGate>().is_err());
    }
}
