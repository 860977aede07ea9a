//! Pizzeria cart CLI

use std::{io, process};

use pizzeria_app::{context::AppContext, observability};

use crate::cli::Cli;

mod cli;

#[tokio::main]
pub async fn main() {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = observability::init(&cli.config.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    let context = AppContext::from_config(&cli.config.store);

    if let Err(error) = cli.run(&context, &mut io::stdout().lock()).await {
        eprintln!("{error}");
        process::exit(1);
    }
}
