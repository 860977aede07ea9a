//! Cart Consolidation Example
//!
//! Adds menu pizzas to a cart in the order given and prints the consolidated cart.
//!
//! Use `-p` to add a pizza by menu name (repeatable, `name` or `name=quantity`)
//! Use `-i` to treat reordered topping lists as the same pizza

use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use pizzeria::prelude::*;

/// Cart Consolidation Example
#[derive(Debug, Parser)]
struct Args {
    /// Menu pizza to add, optionally with a quantity (`large-cheese=2`)
    #[arg(short, long = "pizza", default_values_t = [
        "large-supreme=1".to_string(),
        "large-supreme-reordered=2".to_string(),
        "large-cheese=1".to_string(),
        "large-supreme=1".to_string(),
    ])]
    pizzas: Vec<String>,

    /// Compare topping lists regardless of order
    #[arg(short, long)]
    insensitive: bool,
}

/// Cart Consolidation Example
pub fn main() -> Result<()> {
    let args = Args::parse();
    let menu = Fixture::menu()?;

    let topping_order = if args.insensitive {
        ToppingOrder::Insensitive
    } else {
        ToppingOrder::Significant
    };

    let items = args
        .pizzas
        .iter()
        .map(|entry| -> Result<NewCartItem> {
            let (name, quantity) = match entry.split_once('=') {
                Some((name, quantity)) => (
                    name,
                    quantity
                        .parse::<u32>()
                        .with_context(|| format!("invalid quantity in {entry:?}"))?,
                ),
                None => (entry.as_str(), 1),
            };

            Ok(menu.item(name, quantity)?)
        })
        .collect::<Result<Vec<_>>>()?;

    let cart = Cart::with_items(topping_order, items)?;

    write_cart(io::stdout().lock(), &cart)?;

    Ok(())
}
