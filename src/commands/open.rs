//! `myriad open "?page=<name>"`: route a query string to a page with defaults.

use std::io::IsTerminal;

use anyhow::Result;
use colored::Colorize;

use super::{comics, contact, explore, realms, sphere, visualize, AppContext};
use crate::core::pages::Page;

pub fn run(ctx: &mut AppContext, query: &str) -> Result<i32> {
    let page = Page::from_query(query);
    crate::debug_log!("route '{query}' -> {page}");
    println!("{}\n", page.title().bold());
    match page {
        Page::Sphere => sphere::run(ctx, None)?,
        Page::Visualization => {
            return visualize::run(
                ctx,
                visualize::VisualizeOpts { input: None, backend: None, json: false, no_diagram: false },
            )
        }
        Page::Explorer => explore::run(
            ctx,
            explore::ExploreOpts { theta: 0.0, phi: 0.0, shots: None, tui: false },
        )?,
        Page::Realms => realms::run(ctx, realms::RealmsAction::Show)?,
        Page::Comics => comics::run(ctx, comics::ComicsOpts { dir: None, view: None, export: None })?,
        Page::Contact if std::io::stdin().is_terminal() => contact::run(None, None, None)?,
        Page::Contact => {
            println!("{}", contact::INTRO);
            println!("Send with: myriad contact --name <N> --email <E> --message <M>");
        }
    }
    Ok(0)
}
