/// Myriad main — subcommands, landing page by default.
use clap::Parser; // trait import enables MyriadCli::parse()

use myriad::cli::{Command, MyriadCli, RealmsCmd, SessionCmd};
use myriad::commands::{self, AppContext};
use myriad::config::{resolve_config_path, Config};
use myriad::session::Session;

fn set_console_title() {
    use crossterm::{execute, terminal::SetTitle};
    let _ = execute!(std::io::stdout(), SetTitle("Myriad"));
}

fn main() -> anyhow::Result<()> {
    let args = MyriadCli::parse();

    if args.plain {
        colored::control::set_override(false);
    } else {
        set_console_title();
    }
    if args.debug_sim {
        myriad::core::debug::force_enable();
    }

    let cfg_path = resolve_config_path(&args.config);
    let config = Config::load(cfg_path.as_deref())?;
    myriad::debug_log!("config: {:?}", cfg_path);
    let session = Session::load(config.session_path());
    let mut ctx = AppContext::new(config, session, args.plain);

    // session management never shows the loader
    if let Some(Command::Session { action }) = &args.cmd {
        return match action {
            Some(SessionCmd::Reset) => commands::session::reset(&mut ctx),
            Some(SessionCmd::Show) | None => commands::session::show(&ctx),
        };
    }

    commands::loader::maybe_show(&mut ctx, args.no_loader)?;

    let code = match args.cmd {
        None => {
            commands::sphere::run(&ctx, None)?;
            0
        }
        Some(Command::Open { query }) => commands::open::run(&mut ctx, &query)?,
        Some(Command::Sphere { frames }) => {
            commands::sphere::run(&ctx, frames)?;
            0
        }
        Some(Command::Visualize { input, backend, json, no_diagram }) => commands::visualize::run(
            &ctx,
            commands::visualize::VisualizeOpts {
                input,
                backend: backend.map(|b| b.name().to_string()),
                json,
                no_diagram,
            },
        )?,
        Some(Command::Explore { theta, phi, shots, tui }) => {
            commands::explore::run(&ctx, commands::explore::ExploreOpts { theta, phi, shots, tui })?;
            0
        }
        Some(Command::Realms { action }) => {
            use commands::realms::RealmsAction;
            let action = match action {
                None | Some(RealmsCmd::Show) => RealmsAction::Show,
                Some(RealmsCmd::Select { gate }) => {
                    RealmsAction::Select(gate.parse().map_err(anyhow::Error::msg)?)
                }
                Some(RealmsCmd::Place { citizen, step }) => RealmsAction::Place { citizen, step },
                Some(RealmsCmd::Clear { citizen, step }) => RealmsAction::Clear { citizen, step },
                Some(RealmsCmd::Reset) => RealmsAction::Reset,
                Some(RealmsCmd::Play) => RealmsAction::Play,
            };
            commands::realms::run(&mut ctx, action)?;
            0
        }
        Some(Command::Comics { dir, view, export }) => {
            commands::comics::run(&mut ctx, commands::comics::ComicsOpts { dir, view, export })?;
            0
        }
        Some(Command::Contact { name, email, message }) => {
            commands::contact::run(name, email, message)?;
            0
        }
        Some(Command::Session { .. }) => 0,
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
