//! Cart rendering for terminals.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    carts::{Cart, items::CartItem},
    pizzas::PizzaConfiguration,
};

/// Errors raised while writing a cart.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Output could not be written.
    #[error("failed to write cart: {0}")]
    Io(#[from] io::Error),
}

/// Write a cart as a table followed by its total quantity.
///
/// # Errors
///
/// Returns a `RenderError::Io` if writing to `out` fails.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> Result<(), RenderError> {
    if cart.is_empty() {
        writeln!(out, "Cart is empty")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Pizza", "Toppings", "Qty"]);

    for (idx, item) in cart.iter().enumerate() {
        builder.push_record(item_row(idx, item));
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Alignment::center());
    table.modify(Columns::new(4..5), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(
        out,
        "{} pizza(s) across {} item(s)",
        cart.total_quantity(),
        cart.len()
    )?;

    Ok(())
}

fn item_row(idx: usize, item: &CartItem) -> [String; 5] {
    let pizza = item.pizza();

    [
        format!("#{:<3}", idx + 1),
        item.uuid().to_string(),
        format!(
            "{}\n{} / {} sauce / {} cheese",
            pizza.label(),
            pizza.sauce,
            pizza.sauce_amount,
            pizza.cheese_amount
        ),
        toppings(pizza),
        item.quantity().to_string(),
    ]
}

fn toppings(pizza: &PizzaConfiguration) -> String {
    let meats = pizza.meats.iter().map(|topping| {
        format!(
            "{} ({}, {})",
            topping.topping_name, topping.amount, topping.portion
        )
    });

    let veggies = pizza.veggies.iter().map(|topping| {
        format!(
            "{} ({}, {})",
            topping.topping_name, topping.amount, topping.portion
        )
    });

    let lines: Vec<String> = meats.chain(veggies).collect();

    if lines.is_empty() {
        return "-".to_string();
    }

    lines.join("\n")
}
