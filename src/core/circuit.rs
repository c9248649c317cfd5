//! Circuit model shared by the QASM reader, the simulators and the renderers.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GateKind {
    Id,
    X,
    Y,
    Z,
    H,
    S,
    Sdg,
    T,
    Tdg,
    Sx,
    Rx,
    Ry,
    Rz,
    P,
    U2,
    U3,
    Cx,
    Cy,
    Cz,
    Ch,
    Swap,
    Crz,
    Cp,
    Ccx,
}

impl GateKind {
    /// Resolve an OpenQASM gate name (qelib1 spelling, plus the common aliases).
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "id" | "i" => GateKind::Id,
            "x" => GateKind::X,
            "y" => GateKind::Y,
            "z" => GateKind::Z,
            "h" => GateKind::H,
            "s" => GateKind::S,
            "sdg" => GateKind::Sdg,
            "t" => GateKind::T,
            "tdg" => GateKind::Tdg,
            "sx" => GateKind::Sx,
            "rx" => GateKind::Rx,
            "ry" => GateKind::Ry,
            "rz" => GateKind::Rz,
            "p" | "u1" => GateKind::P,
            "u2" => GateKind::U2,
            "u3" | "u" | "U" => GateKind::U3,
            "cx" | "CX" | "cnot" => GateKind::Cx,
            "cy" => GateKind::Cy,
            "cz" => GateKind::Cz,
            "ch" => GateKind::Ch,
            "swap" => GateKind::Swap,
            "crz" => GateKind::Crz,
            "cp" | "cu1" => GateKind::Cp,
            "ccx" | "toffoli" => GateKind::Ccx,
            _ => return None,
        };
        Some(kind)
    }

    pub fn qasm_name(self) -> &'static str {
        match self {
            GateKind::Id => "id",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::H => "h",
            GateKind::S => "s",
            GateKind::Sdg => "sdg",
            GateKind::T => "t",
            GateKind::Tdg => "tdg",
            GateKind::Sx => "sx",
            GateKind::Rx => "rx",
            GateKind::Ry => "ry",
            GateKind::Rz => "rz",
            GateKind::P => "p",
            GateKind::U2 => "u2",
            GateKind::U3 => "u3",
            GateKind::Cx => "cx",
            GateKind::Cy => "cy",
            GateKind::Cz => "cz",
            GateKind::Ch => "ch",
            GateKind::Swap => "swap",
            GateKind::Crz => "crz",
            GateKind::Cp => "cp",
            GateKind::Ccx => "ccx",
        }
    }

    pub fn num_qubits(self) -> usize {
        match self {
            GateKind::Cx
            | GateKind::Cy
            | GateKind::Cz
            | GateKind::Ch
            | GateKind::Swap
            | GateKind::Crz
            | GateKind::Cp => 2,
            GateKind::Ccx => 3,
            _ => 1,
        }
    }

    pub fn num_params(self) -> usize {
        match self {
            GateKind::Rx | GateKind::Ry | GateKind::Rz | GateKind::P | GateKind::Crz | GateKind::Cp => 1,
            GateKind::U2 => 2,
            GateKind::U3 => 3,
            _ => 0,
        }
    }

    /// Number of leading operands that act as controls.
    pub fn num_controls(self) -> usize {
        match self {
            GateKind::Ccx => 2,
            GateKind::Swap => 0,
            k if k.num_qubits() == 2 => 1,
            _ => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Op {
    pub kind: GateKind,
    pub qubits: Vec<usize>,
    pub params: Vec<f64>,
    /// 1-based source line (0 when built programmatically).
    #[serde(skip)]
    pub line: usize,
}

impl Op {
    pub fn new(kind: GateKind, qubits: Vec<usize>, params: Vec<f64>) -> Self {
        Self { kind, qubits, params, line: 0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Register {
    pub name: String,
    pub size: usize,
    /// First flat qubit index of this register.
    pub offset: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Circuit {
    pub n_qubits: usize,
    pub ops: Vec<Op>,
    pub qregs: Vec<Register>,
    pub cregs: Vec<Register>,
    /// `measure` statements seen and skipped (the display is pre-measurement).
    pub skipped_measurements: usize,
}

impl Circuit {
    /// Circuit over a single register named `q`.
    pub fn new(n_qubits: usize) -> Self {
        Self {
            n_qubits,
            qregs: vec![Register { name: "q".into(), size: n_qubits, offset: 0 }],
            ..Self::default()
        }
    }

    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    pub fn gate(&mut self, kind: GateKind, qubits: &[usize]) -> &mut Self {
        self.push(Op::new(kind, qubits.to_vec(), Vec::new()));
        self
    }

    pub fn gate_p(&mut self, kind: GateKind, params: &[f64], qubits: &[usize]) -> &mut Self {
        self.push(Op::new(kind, qubits.to_vec(), params.to_vec()));
        self
    }

    /// Display label for a flat qubit index, e.g. `q[1]` or `anc[0]`.
    pub fn qubit_label(&self, flat: usize) -> String {
        self.qregs
            .iter()
            .find(|r| flat >= r.offset && flat < r.offset + r.size)
            .map(|r| format!("{}[{}]", r.name, flat - r.offset))
            .unwrap_or_else(|| format!("q{}", flat))
    }

    /// Canonical OpenQASM 2.0 text for this circuit.
    pub fn to_qasm(&self) -> String {
        let mut out = String::from("OPENQASM 2.0;\ninclude \"qelib1.inc\";\n");
        for r in &self.qregs {
            out.push_str(&format!("qreg {}[{}];\n", r.name, r.size));
        }
        for r in &self.cregs {
            out.push_str(&format!("creg {}[{}];\n", r.name, r.size));
        }
        for op in &self.ops {
            out.push_str(op.kind.qasm_name());
            if !op.params.is_empty() {
                let ps: Vec<String> = op.params.iter().map(|p| format!("{p}")).collect();
                out.push_str(&format!("({})", ps.join(",")));
            }
            let qs: Vec<String> = op.qubits.iter().map(|&q| self.qubit_label(q)).collect();
            out.push_str(&format!(" {};\n", qs.join(",")));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve() {
        assert_eq!(GateKind::from_name("u1"), Some(GateKind::P));
        assert_eq!(GateKind::from_name("CX"), Some(GateKind::Cx));
        assert_eq!(GateKind::from_name("rxx"), None);
    }

    #[test]
    fn qasm_text_for_bell() {
        let mut c = Circuit::new(2);
        c.gate(GateKind::H, &[0]).gate(GateKind::Cx, &[0, 1]);
        let text = c.to_qasm();
        assert!(text.contains("qreg q[2];"));
        assert!(text.contains("h q[0];"));
        assert!(text.contains("cx q[0],q[1];"));
    }
}
