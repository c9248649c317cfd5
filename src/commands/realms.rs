//! Realms page; the board lives in the session between invocations.

use anyhow::Result;
use colored::Colorize;

use super::AppContext;
use crate::core::quantum::density::DensityMatrix;
use crate::core::quantum::bloch::BlochVector;
use crate::core::quantum::analysis::QubitClass;
use crate::core::realms::{PaletteGate, RealmsBoard, RealmsOutcome, CITIZENS, MISSION_BRIEFING, MISSION_TITLE, STEPS};
use crate::render::bloch::{render_bloch, BlochRenderConfig};
use crate::render::circuit::render_circuit;

#[derive(Clone, Debug)]
pub enum RealmsAction {
    Show,
    Select(PaletteGate),
    Place { citizen: usize, step: usize },
    Clear { citizen: usize, step: usize },
    Reset,
    Play,
}

pub fn grid_text(board: &RealmsBoard) -> String {
    let mut out = String::from("          ");
    for s in 0..STEPS {
        out.push_str(&format!("{:^10}", format!("step {s}")));
    }
    out.push('\n');
    for (q, row) in board.grid.iter().enumerate() {
        out.push_str(&format!("Citizen Q{q}"));
        for cell in row {
            let text = cell.map(|g| g.cell()).unwrap_or("·");
            out.push_str(&format!("{:^10}", format!("[{text}]")));
        }
        out.push('\n');
    }
    let selected = board.selected.map(|g| g.to_string()).unwrap_or_else(|| "None".into());
    out.push_str(&format!("Selected Gate: {selected}\n"));
    out
}

fn label_badge(class: QubitClass) -> String {
    match class {
        QubitClass::Idle => class.label().dimmed().to_string(),
        QubitClass::Superposition => class.label().cyan().to_string(),
        QubitClass::Entangled => class.label().magenta().bold().to_string(),
    }
}

pub fn render_page(board: &RealmsBoard, outcome: &RealmsOutcome) -> Result<String> {
    let mut out = String::new();
    out.push_str(&format!("{}\n{}\n\n", MISSION_TITLE.bold(), MISSION_BRIEFING));
    out.push_str(&grid_text(board));
    out.push('\n');
    out.push_str(&render_circuit(&outcome.circuit));
    out.push('\n');

    let cfg = BlochRenderConfig { size: 8, ..Default::default() };
    for q in 0..CITIZENS {
        let bloch = BlochVector::from_density(&DensityMatrix::reduced_from_state(&outcome.state, q)?)?;
        out.push_str(&format!("Citizen Q{q}  State: {}\n", label_badge(outcome.labels[q])));
        out.push_str(&render_bloch(&bloch, &cfg));
        out.push('\n');
    }
    if outcome.just_completed {
        out.push_str(&format!("{}\n", "🎉 BELL STATE CREATED! 🎉".green().bold()));
    }
    if board.mission_complete {
        out.push_str(&format!(
            "{}\nYou've successfully entangled two qubits and created a Bell State. Professor Qubit is proud!\n",
            "Mission Complete!".green().bold()
        ));
    }
    Ok(out)
}

pub fn run(ctx: &mut AppContext, action: RealmsAction) -> Result<()> {
    let board = &mut ctx.session.state.realms;
    match action {
        RealmsAction::Show => {}
        RealmsAction::Select(g) => board.select(g),
        RealmsAction::Place { citizen, step } => board.place(citizen, step)?,
        RealmsAction::Clear { citizen, step } => board.clear(citizen, step)?,
        RealmsAction::Reset => board.reset(),
        RealmsAction::Play => {
            let mut b = board.clone();
            crate::tui::realms::run_realms_tui(&mut b)?;
            ctx.session.state.realms = b;
            return ctx.session.save();
        }
    }
    let outcome = board.evaluate()?;
    print!("{}", render_page(board, &outcome)?);
    ctx.session.save()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::Session;

    #[test]
    fn actions_drive_the_mission() {
        colored::control::set_override(false);
        let mut ctx = AppContext::new(Config::default(), Session::in_memory(), true);
        run(&mut ctx, RealmsAction::Select(PaletteGate::H)).unwrap();
        run(&mut ctx, RealmsAction::Place { citizen: 0, step: 0 }).unwrap();
        run(&mut ctx, RealmsAction::Select(PaletteGate::CnotControl)).unwrap();
        run(&mut ctx, RealmsAction::Place { citizen: 0, step: 1 }).unwrap();
        run(&mut ctx, RealmsAction::Select(PaletteGate::CnotTarget)).unwrap();
        run(&mut ctx, RealmsAction::Place { citizen: 1, step: 1 }).unwrap();
        assert!(ctx.session.state.realms.mission_complete);

        run(&mut ctx, RealmsAction::Reset).unwrap();
        assert!(!ctx.session.state.realms.mission_complete);
        assert!(run(&mut ctx, RealmsAction::Place { citizen: 5, step: 0 }).is_err());
    }

    #[test]
    fn grid_shows_cnot_halves() {
        let mut b = RealmsBoard::default();
        b.select(PaletteGate::CnotControl);
        b.place(0, 2).unwrap();
        let text = grid_text(&b);
        assert!(text.contains("[CNOT ●]"));
        assert!(text.contains("Selected Gate: CNOT_C"));
    }
}
