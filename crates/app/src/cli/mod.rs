use std::io::Write;

use clap::{Parser, Subcommand};
use pizzeria_app::{config::AppConfig, context::AppContext};

mod cart;
mod menu;
mod output;
mod pizza;

#[derive(Debug, Parser)]
#[command(name = "pizzeria-app", about = "Pizzeria cart CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Cart(cart::CartCommand),
    Menu(menu::MenuArgs),
}

impl Cli {
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) async fn run(self, context: &AppContext, out: &mut dyn Write) -> Result<(), String> {
        match self.command {
            Commands::Cart(command) => cart::run(command, context.carts.as_ref(), out).await,
            Commands::Menu(args) => menu::run(&args, out),
        }
    }
}
