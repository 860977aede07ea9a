use std::io::Write;

use clap::{Args, Subcommand};
use pizzeria_app::domain::carts::{CartsService, records::UserUuid};

use super::output::OutputArgs;

mod items;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Create an empty cart
    Create(CartArgs),

    /// Show a cart
    Show(CartArgs),

    /// Add a pizza, merging with an existing row for the same pizza
    Add(items::AddArgs),

    /// Replace an item's pizza and quantity
    Replace(items::ReplaceArgs),

    /// Change an item's pizza or quantity
    Patch(items::PatchArgs),

    /// Remove an item
    Delete(items::DeleteArgs),

    /// Replace the whole cart with a JSON list of items
    Set(items::SetArgs),

    /// Empty the cart after its order is submitted
    Reset(CartArgs),
}

/// Selects the cart to work on.
#[derive(Debug, Args)]
pub(crate) struct CartArgs {
    /// Cart owner
    #[arg(long, env = "CART_USER")]
    pub(crate) user: UserUuid,

    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

pub(crate) async fn run(
    command: CartCommand,
    carts: &dyn CartsService,
    out: &mut dyn Write,
) -> Result<(), String> {
    match command.command {
        CartSubcommand::Create(args) => {
            let cart = carts
                .create_cart(args.user)
                .await
                .map_err(|error| format!("failed to create cart: {error}"))?;

            args.output.cart(out, &cart)
        }
        CartSubcommand::Show(args) => {
            let cart = carts
                .get_cart(args.user)
                .await
                .map_err(|error| format!("failed to load cart: {error}"))?;

            args.output.cart(out, &cart)
        }
        CartSubcommand::Add(args) => items::add(args, carts, out).await,
        CartSubcommand::Replace(args) => items::replace(args, carts, out).await,
        CartSubcommand::Patch(args) => items::patch(args, carts, out).await,
        CartSubcommand::Delete(args) => items::delete(args, carts, out).await,
        CartSubcommand::Set(args) => items::set(args, carts, out).await,
        CartSubcommand::Reset(args) => {
            let cart = carts
                .reset_cart(args.user)
                .await
                .map_err(|error| format!("failed to reset cart: {error}"))?;

            args.output.cart(out, &cart)
        }
    }
}
