//! Text circuit diagrams, one wire per qubit.
//!
//! Ops are packed greedily into layers: an op lands in the first layer after
//! every wire between its lowest and highest qubit is free.

use crate::core::circuit::{Circuit, GateKind, Op};

/// Symbol drawn on `qubit` for `op` (which must touch `qubit`).
fn symbol(op: &Op, qubit: usize) -> String {
    let pos = op.qubits.iter().position(|&q| q == qubit).unwrap_or(0);
    if op.kind == GateKind::Swap {
        return "x".into();
    }
    // cz is symmetric, draw both ends as dots
    if op.kind == GateKind::Cz || pos < op.kind.num_controls() {
        return "■".into();
    }
    match op.kind {
        GateKind::Cx | GateKind::Ccx => "⊕".into(),
        _ => gate_label(op),
    }
}

/// `H`, `Rx(1.57)`, `U3(0.50,0.00,3.14)`; controls dropped from controlled names.
pub fn gate_label(op: &Op) -> String {
    let base = match op.kind {
        GateKind::Cy => "y",
        GateKind::Ch => "h",
        GateKind::Crz => "rz",
        GateKind::Cp => "p",
        GateKind::Cz => "z",
        GateKind::Cx | GateKind::Ccx => "x",
        k => k.qasm_name(),
    };
    let mut chars = base.chars();
    let mut name: String = match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    if !op.params.is_empty() {
        let ps: Vec<String> = op.params.iter().map(|p| format!("{p:.2}")).collect();
        name.push_str(&format!("({})", ps.join(",")));
    }
    name
}

fn centered(label: &str, width: usize) -> String {
    let len = label.chars().count();
    let left = (width - len.min(width)) / 2;
    let right = width - len.min(width) - left;
    format!("─{}{}{}─", "─".repeat(left), label, "─".repeat(right))
}

/// Assign every op to a layer.
pub fn layers(circuit: &Circuit) -> Vec<Vec<&Op>> {
    let mut out: Vec<Vec<&Op>> = Vec::new();
    let mut next_free = vec![0usize; circuit.n_qubits];
    for op in &circuit.ops {
        let (lo, hi) = match (op.qubits.iter().min(), op.qubits.iter().max()) {
            (Some(&lo), Some(&hi)) if hi < circuit.n_qubits => (lo, hi),
            _ => continue,
        };
        let layer = next_free[lo..=hi].iter().copied().max().unwrap_or(0);
        if out.len() <= layer {
            out.resize_with(layer + 1, Vec::new);
        }
        out[layer].push(op);
        for slot in &mut next_free[lo..=hi] {
            *slot = layer + 1;
        }
    }
    out
}

pub fn render_circuit(circuit: &Circuit) -> String {
    let labels: Vec<String> = (0..circuit.n_qubits).map(|q| circuit.qubit_label(q)).collect();
    let gutter = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let mut rows: Vec<String> = labels.iter().map(|l| format!("{l:>gutter$}: ")).collect();

    for layer in layers(circuit) {
        let mut cells: Vec<Option<String>> = vec![None; circuit.n_qubits];
        for op in &layer {
            let lo = op.qubits.iter().copied().min().unwrap_or(0);
            let hi = op.qubits.iter().copied().max().unwrap_or(0);
            for q in lo..=hi {
                cells[q] = Some(if op.qubits.contains(&q) { symbol(op, q) } else { "┼".into() });
            }
        }
        let width = cells.iter().flatten().map(|c| c.chars().count()).max().unwrap_or(1);
        for (row, cell) in rows.iter_mut().zip(cells) {
            match cell {
                Some(c) => row.push_str(&centered(&c, width)),
                None => row.push_str(&"─".repeat(width + 2)),
            }
        }
    }
    let mut out = rows.join("\n");
    out.push('\n');
    out
}
