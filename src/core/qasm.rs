//! OpenQASM 2.0 reader for the subset the visualizer understands.
//!
//! Accepted statements (each `;`-terminated, free-form whitespace):
//!   OPENQASM 2.0;            optional header
//!   include "qelib1.inc";    ignored
//!   qreg q[2]; creg c[2];    registers, flattened in declaration order
//!   h q[0]; cx q[0],q[1];    gate applications (see `GateKind::from_name`)
//!   rz(pi/4) q;              parameters are real expressions; a bare register broadcasts
//!   barrier q;               no-op
//!   measure q -> c;          skipped (the display shows the pre-measurement state)
//! Line comments start with `//`.

use std::collections::HashMap;
use std::f64::consts::PI;

use crate::core::circuit::{Circuit, GateKind, Op, Register};
use crate::core::error::SimulationError;
use crate::core::quantum::simulator::MAX_QUBITS;

/// Parenthesis/unary nesting allowed inside a gate parameter.
const MAX_EXPR_DEPTH: usize = 256;
/// Largest integer accepted for a register size or index.
const MAX_INDEX: f64 = 1_048_576.0;

type PResult<T> = Result<T, SimulationError>;

#[derive(Clone, Debug, PartialEq)]
enum Tok {
    Ident(String),
    Number(f64),
    Str(String),
    Sym(char),
    Arrow,
    Eof,
}

#[derive(Clone, Debug)]
struct Spanned {
    tok: Tok,
    line: usize,
    col: usize,
}

fn tokenize(src: &str) -> PResult<Vec<Spanned>> {
    let chars: Vec<char> = src.chars().collect();
    let mut out = Vec::new();
    let (mut i, mut line, mut col) = (0usize, 1usize, 1usize);

    while i < chars.len() {
        let ch = chars[i];
        let (start_line, start_col) = (line, col);
        let bump = |i: &mut usize, col: &mut usize| {
            *i += 1;
            *col += 1;
        };

        if ch == '\n' {
            i += 1;
            line += 1;
            col = 1;
            continue;
        }
        if ch.is_whitespace() {
            bump(&mut i, &mut col);
            continue;
        }
        if ch == '/' && chars.get(i + 1) == Some(&'/') {
            while i < chars.len() && chars[i] != '\n' {
                bump(&mut i, &mut col);
            }
            continue;
        }
        if ch == '-' && chars.get(i + 1) == Some(&'>') {
            i += 2;
            col += 2;
            out.push(Spanned { tok: Tok::Arrow, line: start_line, col: start_col });
            continue;
        }
        if ch.is_ascii_alphabetic() || ch == '_' {
            let mut s = String::new();
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                s.push(chars[i]);
                bump(&mut i, &mut col);
            }
            out.push(Spanned { tok: Tok::Ident(s), line: start_line, col: start_col });
            continue;
        }
        if ch.is_ascii_digit() || (ch == '.' && chars.get(i + 1).map_or(false, |c| c.is_ascii_digit())) {
            let mut s = String::new();
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                s.push(chars[i]);
                bump(&mut i, &mut col);
            }
            // exponent part: 1e-3, 2.5E+2
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let sign = chars.get(i + 1).copied();
                let digit_at = if matches!(sign, Some('+') | Some('-')) { i + 2 } else { i + 1 };
                if chars.get(digit_at).map_or(false, |c| c.is_ascii_digit()) {
                    while i < digit_at {
                        s.push(chars[i]);
                        bump(&mut i, &mut col);
                    }
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        s.push(chars[i]);
                        bump(&mut i, &mut col);
                    }
                }
            }
            let n: f64 = s
                .parse()
                .map_err(|_| SimulationError::parse(start_line, start_col, format!("invalid number '{s}'")))?;
            out.push(Spanned { tok: Tok::Number(n), line: start_line, col: start_col });
            continue;
        }
        if ch == '"' {
            let mut s = String::new();
            bump(&mut i, &mut col);
            loop {
                match chars.get(i) {
                    None | Some('\n') => {
                        return Err(SimulationError::parse(start_line, start_col, "unterminated string"))
                    }
                    Some('"') => {
                        bump(&mut i, &mut col);
                        break;
                    }
                    Some(&c) => {
                        s.push(c);
                        bump(&mut i, &mut col);
                    }
                }
            }
            out.push(Spanned { tok: Tok::Str(s), line: start_line, col: start_col });
            continue;
        }
        if ";,()[]+-*/^{}".contains(ch) {
            bump(&mut i, &mut col);
            out.push(Spanned { tok: Tok::Sym(ch), line: start_line, col: start_col });
            continue;
        }
        return Err(SimulationError::parse(line, col, format!("unexpected character '{ch}'")));
    }
    out.push(Spanned { tok: Tok::Eof, line, col });
    Ok(out)
}

/// One gate operand before broadcasting: `q[1]` or the whole register `q`.
#[derive(Clone, Debug)]
enum Operand {
    Bit(usize),
    Whole(Register),
}

struct Reader {
    toks: Vec<Spanned>,
    pos: usize,
    qregs: HashMap<String, Register>,
    cregs: HashMap<String, Register>,
    circuit: Circuit,
    /// Current expression nesting.
    depth: usize,
    max_qubits: usize,
}

impl Reader {
    fn peek(&self) -> &Spanned {
        &self.toks[self.pos.min(self.toks.len() - 1)]
    }

    fn next(&mut self) -> Spanned {
        let t = self.peek().clone();
        if self.pos < self.toks.len() {
            self.pos += 1;
        }
        t
    }

    fn err_here(&self, msg: impl Into<String>) -> SimulationError {
        let t = self.peek();
        SimulationError::parse(t.line, t.col, msg)
    }

    fn expect_sym(&mut self, c: char) -> PResult<()> {
        if self.peek().tok == Tok::Sym(c) {
            self.next();
            Ok(())
        } else {
            Err(self.err_here(format!("expected '{c}'")))
        }
    }

    fn eat_sym(&mut self, c: char) -> bool {
        if self.peek().tok == Tok::Sym(c) {
            self.next();
            true
        } else {
            false
        }
    }

    fn expect_ident(&mut self, what: &str) -> PResult<String> {
        match self.next() {
            Spanned { tok: Tok::Ident(s), .. } => Ok(s),
            t => Err(SimulationError::parse(t.line, t.col, format!("expected {what}"))),
        }
    }

    fn expect_index(&mut self) -> PResult<usize> {
        match self.next() {
            Spanned { tok: Tok::Number(n), .. } if n >= 0.0 && n.fract() == 0.0 && n <= MAX_INDEX => {
                Ok(n as usize)
            }
            Spanned { tok: Tok::Number(n), line, col } if n > MAX_INDEX => {
                Err(SimulationError::parse(line, col, format!("integer {n} is too large")))
            }
            t => Err(SimulationError::parse(t.line, t.col, "expected a non-negative integer")),
        }
    }

    fn program(mut self) -> PResult<Circuit> {
        loop {
            let head = self.peek().clone();
            match &head.tok {
                Tok::Eof => break,
                Tok::Ident(kw) => {
                    let kw = kw.clone();
                    self.statement(&kw, head.line, head.col)?;
                }
                _ => return Err(self.err_here("expected a statement")),
            }
        }
        if self.circuit.qregs.is_empty() {
            return Err(SimulationError::parse(1, 1, "no quantum registers declared"));
        }
        Ok(self.circuit)
    }

    fn statement(&mut self, kw: &str, line: usize, col: usize) -> PResult<()> {
        match kw {
            "OPENQASM" => {
                self.next();
                match self.next() {
                    Spanned { tok: Tok::Number(v), .. } if (v - 2.0).abs() < 1e-9 => {}
                    t => {
                        return Err(SimulationError::parse(
                            t.line,
                            t.col,
                            "unsupported OPENQASM version (expected 2.0)",
                        ))
                    }
                }
                self.expect_sym(';')
            }
            "include" => {
                self.next();
                match self.next() {
                    Spanned { tok: Tok::Str(_), .. } => {}
                    t => return Err(SimulationError::parse(t.line, t.col, "expected a file name string")),
                }
                self.expect_sym(';')
            }
            "qreg" | "creg" => {
                self.next();
                let name = self.expect_ident("a register name")?;
                self.expect_sym('[')?;
                let size = self.expect_index()?;
                self.expect_sym(']')?;
                self.expect_sym(';')?;
                if size == 0 {
                    return Err(SimulationError::parse(line, col, format!("register '{name}' has size 0")));
                }
                if self.qregs.contains_key(&name) || self.cregs.contains_key(&name) {
                    return Err(SimulationError::parse(line, col, format!("register '{name}' declared twice")));
                }
                if kw == "qreg" {
                    let width = self.circuit.n_qubits.checked_add(size).filter(|&w| w <= self.max_qubits);
                    let Some(width) = width else {
                        return Err(SimulationError::TooManyQubits {
                            requested: self.circuit.n_qubits.saturating_add(size),
                            limit: self.max_qubits,
                        });
                    };
                    let reg = Register { name: name.clone(), size, offset: self.circuit.n_qubits };
                    self.circuit.n_qubits = width;
                    self.circuit.qregs.push(reg.clone());
                    self.qregs.insert(name, reg);
                } else {
                    let offset = self.circuit.cregs.iter().map(|r| r.size).sum();
                    let reg = Register { name: name.clone(), size, offset };
                    self.circuit.cregs.push(reg.clone());
                    self.cregs.insert(name, reg);
                }
                Ok(())
            }
            "barrier" => {
                self.next();
                self.operand_list()?;
                self.expect_sym(';')
            }
            "measure" => {
                self.next();
                self.operand()?;
                if self.next().tok != Tok::Arrow {
                    return Err(SimulationError::parse(line, col, "expected '->' in measure"));
                }
                let creg = self.expect_ident("a classical register")?;
                if !self.cregs.contains_key(&creg) {
                    return Err(SimulationError::parse(line, col, format!("unknown classical register '{creg}'")));
                }
                if self.eat_sym('[') {
                    self.expect_index()?;
                    self.expect_sym(']')?;
                }
                self.expect_sym(';')?;
                self.circuit.skipped_measurements += 1;
                Ok(())
            }
            "gate" | "opaque" | "if" | "reset" => Err(SimulationError::UnsupportedGate {
                name: kw.to_string(),
                line,
                col,
            }),
            _ => self.gate_call(kw, line, col),
        }
    }

    fn gate_call(&mut self, name: &str, line: usize, col: usize) -> PResult<()> {
        let kind = GateKind::from_name(name).ok_or_else(|| SimulationError::UnsupportedGate {
            name: name.to_string(),
            line,
            col,
        })?;
        self.next();

        let mut params = Vec::new();
        if self.eat_sym('(') {
            if !self.eat_sym(')') {
                loop {
                    params.push(self.expr()?);
                    if self.eat_sym(')') {
                        break;
                    }
                    self.expect_sym(',')?;
                }
            }
        }
        if params.len() != kind.num_params() {
            return Err(SimulationError::parse(
                line,
                col,
                format!("'{name}' takes {} parameter(s), got {}", kind.num_params(), params.len()),
            ));
        }

        let operands = self.operand_list()?;
        self.expect_sym(';')?;
        if operands.len() != kind.num_qubits() {
            return Err(SimulationError::parse(
                line,
                col,
                format!("'{name}' acts on {} qubit(s), got {}", kind.num_qubits(), operands.len()),
            ));
        }

        // Broadcast whole-register operands (all must share one size).
        let width = operands.iter().find_map(|o| match o {
            Operand::Whole(r) => Some(r.size),
            Operand::Bit(_) => None,
        });
        let repeats = width.unwrap_or(1);
        for o in &operands {
            if let Operand::Whole(r) = o {
                if r.size != repeats {
                    return Err(SimulationError::parse(line, col, "broadcast registers differ in size"));
                }
            }
        }
        for k in 0..repeats {
            let qubits: Vec<usize> = operands
                .iter()
                .map(|o| match o {
                    Operand::Bit(q) => *q,
                    Operand::Whole(r) => r.offset + k,
                })
                .collect();
            let mut seen = qubits.clone();
            seen.sort_unstable();
            seen.dedup();
            if seen.len() != qubits.len() {
                return Err(SimulationError::parse(line, col, format!("'{name}' repeats a qubit argument")));
            }
            self.circuit.push(Op { kind, qubits, params: params.clone(), line });
        }
        Ok(())
    }

    fn operand_list(&mut self) -> PResult<Vec<Operand>> {
        let mut out = vec![self.operand()?];
        while self.eat_sym(',') {
            out.push(self.operand()?);
        }
        Ok(out)
    }

    fn operand(&mut self) -> PResult<Operand> {
        let at = self.peek().clone();
        let name = self.expect_ident("a qubit operand")?;
        let reg = self
            .qregs
            .get(&name)
            .cloned()
            .ok_or_else(|| SimulationError::parse(at.line, at.col, format!("unknown quantum register '{name}'")))?;
        if self.eat_sym('[') {
            let idx = self.expect_index()?;
            self.expect_sym(']')?;
            if idx >= reg.size {
                return Err(SimulationError::parse(
                    at.line,
                    at.col,
                    format!("index {idx} out of range for qreg {}[{}]", reg.name, reg.size),
                ));
            }
            Ok(Operand::Bit(reg.offset + idx))
        } else {
            Ok(Operand::Whole(reg))
        }
    }

    // expr := term (('+'|'-') term)*
    fn expr(&mut self) -> PResult<f64> {
        let mut v = self.term()?;
        loop {
            if self.eat_sym('+') {
                v += self.term()?;
            } else if self.eat_sym('-') {
                v -= self.term()?;
            } else {
                return Ok(v);
            }
        }
    }

    fn term(&mut self) -> PResult<f64> {
        let mut v = self.power()?;
        loop {
            if self.eat_sym('*') {
                v *= self.power()?;
            } else if self.peek().tok == Tok::Sym('/') {
                let at = self.next();
                let d = self.power()?;
                if d == 0.0 {
                    return Err(SimulationError::parse(at.line, at.col, "division by zero"));
                }
                v /= d;
            } else {
                return Ok(v);
            }
        }
    }

    fn power(&mut self) -> PResult<f64> {
        let base = self.unary()?;
        if self.eat_sym('^') {
            Ok(base.powf(self.nested(Self::power)?))
        } else {
            Ok(base)
        }
    }

    /// Enter one nesting level of `f`; deep input is an error, not a stack overflow.
    fn nested(&mut self, f: impl FnOnce(&mut Self) -> PResult<f64>) -> PResult<f64> {
        if self.depth >= MAX_EXPR_DEPTH {
            return Err(self.err_here("expression nested too deeply"));
        }
        self.depth += 1;
        let v = f(self);
        self.depth -= 1;
        v
    }

    fn unary(&mut self) -> PResult<f64> {
        if self.eat_sym('-') {
            return Ok(-self.nested(Self::unary)?);
        }
        if self.eat_sym('+') {
            return self.nested(Self::unary);
        }
        self.primary()
    }

    fn primary(&mut self) -> PResult<f64> {
        let t = self.next();
        match t.tok {
            Tok::Number(n) => Ok(n),
            Tok::Ident(ref id) if id == "pi" => Ok(PI),
            Tok::Ident(ref id) => {
                let f: fn(f64) -> f64 = match id.as_str() {
                    "sin" => f64::sin,
                    "cos" => f64::cos,
                    "tan" => f64::tan,
                    "exp" => f64::exp,
                    "ln" => f64::ln,
                    "sqrt" => f64::sqrt,
                    _ => return Err(SimulationError::parse(t.line, t.col, format!("unknown identifier '{id}' in expression"))),
                };
                self.expect_sym('(')?;
                let v = self.nested(Self::expr)?;
                self.expect_sym(')')?;
                Ok(f(v))
            }
            Tok::Sym('(') => {
                let v = self.nested(Self::expr)?;
                self.expect_sym(')')?;
                Ok(v)
            }
            _ => Err(SimulationError::parse(t.line, t.col, "expected a number, 'pi' or '('")),
        }
    }
}

/// Parse OpenQASM 2.0 text into a flat-indexed `Circuit`, at most
/// `MAX_QUBITS` wide.
pub fn parse_qasm(src: &str) -> Result<Circuit, SimulationError> {
    parse_qasm_with_limit(src, MAX_QUBITS)
}

/// Like `parse_qasm`, but a `qreg` that takes the register past `max_qubits`
/// fails with `TooManyQubits` before any gate is read.
pub fn parse_qasm_with_limit(src: &str, max_qubits: usize) -> Result<Circuit, SimulationError> {
    let toks = tokenize(src)?;
    let reader = Reader {
        toks,
        pos: 0,
        qregs: HashMap::new(),
        cregs: HashMap::new(),
        circuit: Circuit::default(),
        depth: 0,
        max_qubits,
    };
    let circuit = reader.program()?;
    crate::debug_log!(
        "parsed circuit: {} qubits, {} ops, {} measurements skipped",
        circuit.n_qubits,
        circuit.ops.len(),
        circuit.skipped_measurements
    );
    Ok(circuit)
}

/// The two-qubit Bell-pair demo pre-filled on the visualization page.
pub const DEMO_QASM: &str = "OPENQASM 2.0;
include \"qelib1.inc\";
qreg q[2];
h q[0];
cx q[0],q[1];
";
