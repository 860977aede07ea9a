use std::{io::Write, path::PathBuf};

use clap::Args;

use super::pizza::load_menu;

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// YAML file of named pizzas; the bundled menu is used when omitted
    #[arg(long, env = "PIZZA_MENU")]
    menu: Option<PathBuf>,
}

pub(crate) fn run(args: &MenuArgs, out: &mut dyn Write) -> Result<(), String> {
    let menu = load_menu(args.menu.as_deref())?;

    for name in menu.names() {
        let pizza = menu
            .pizza(name)
            .map_err(|error| format!("failed to read menu: {error}"))?;

        writeln!(out, "{name:<28} {}", pizza.label())
            .map_err(|error| format!("failed to write menu: {error}"))?;
    }

    Ok(())
}
