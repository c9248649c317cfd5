use anyhow::Result;
use colored::Colorize;

use super::AppContext;

pub fn show(ctx: &AppContext) -> Result<()> {
    match ctx.session.path() {
        Some(p) => println!("{} {}", "session:".bold(), p.display()),
        None => println!("{} (in memory)", "session:".bold()),
    }
    println!("{}", serde_json::to_string_pretty(&ctx.session.state)?);
    Ok(())
}

pub fn reset(ctx: &mut AppContext) -> Result<()> {
    ctx.session.reset()?;
    println!("{} session cleared", "ok:".green().bold());
    Ok(())
}
