use std::io::Write;

use clap::Args;
use pizzeria::render::write_cart;
use pizzeria_app::domain::carts::records::{CartItemUpdate, StoredCart};
use serde::Serialize;

#[derive(Debug, Args)]
pub(crate) struct OutputArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

impl OutputArgs {
    pub(crate) fn cart(&self, out: &mut dyn Write, stored: &StoredCart) -> Result<(), String> {
        if self.json {
            return write_json(out, stored);
        }

        writeln!(out, "cart {} (revision {})", stored.user, stored.revision)
            .map_err(|error| format!("failed to write cart: {error}"))?;

        write_cart(out, &stored.cart).map_err(|error| error.to_string())
    }

    pub(crate) fn item(&self, out: &mut dyn Write, update: &CartItemUpdate) -> Result<(), String> {
        if self.json {
            return write_json(out, update);
        }

        match update.item {
            Some(item) => writeln!(out, "item: {item}"),
            None => writeln!(out, "item removed"),
        }
        .map_err(|error| format!("failed to write cart: {error}"))?;

        self.cart(out, &update.cart)
    }
}

fn write_json(out: &mut dyn Write, value: &impl Serialize) -> Result<(), String> {
    serde_json::to_writer_pretty(&mut *out, value)
        .map_err(|error| format!("failed to encode cart: {error}"))?;

    writeln!(out).map_err(|error| format!("failed to write cart: {error}"))
}
