use std::io::Write;

use clap::Args;
use pizzeria::carts::items::{CartItemPatch, CartItemUuid, NewCartItem};
use pizzeria_app::domain::carts::CartsService;

use super::CartArgs;
use crate::cli::pizza::PizzaArgs;

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    #[command(flatten)]
    cart: CartArgs,

    #[command(flatten)]
    pizza: PizzaArgs,

    /// How many to add
    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
pub(crate) struct ReplaceArgs {
    #[command(flatten)]
    cart: CartArgs,

    /// Item to replace
    #[arg(long)]
    item: CartItemUuid,

    #[command(flatten)]
    pizza: PizzaArgs,

    /// New quantity; 0 removes the item
    #[arg(long)]
    quantity: u32,
}

#[derive(Debug, Args)]
pub(crate) struct PatchArgs {
    #[command(flatten)]
    cart: CartArgs,

    /// Item to change
    #[arg(long)]
    item: CartItemUuid,

    #[command(flatten)]
    pizza: PizzaArgs,

    /// New quantity; 0 removes the item
    #[arg(long)]
    quantity: Option<u32>,
}

#[derive(Debug, Args)]
pub(crate) struct DeleteArgs {
    #[command(flatten)]
    cart: CartArgs,

    /// Item to remove
    #[arg(long)]
    item: CartItemUuid,
}

#[derive(Debug, Args)]
pub(crate) struct SetArgs {
    #[command(flatten)]
    cart: CartArgs,

    /// JSON list of `{"pizza": {...}, "quantity": n}` objects
    #[arg(long)]
    items: String,
}

pub(crate) async fn add(
    args: AddArgs,
    carts: &dyn CartsService,
    out: &mut dyn Write,
) -> Result<(), String> {
    let item = NewCartItem::new(args.pizza.required()?, args.quantity);

    let update = carts
        .add_item(args.cart.user, item)
        .await
        .map_err(|error| format!("failed to add item: {error}"))?;

    args.cart.output.item(out, &update)
}

pub(crate) async fn replace(
    args: ReplaceArgs,
    carts: &dyn CartsService,
    out: &mut dyn Write,
) -> Result<(), String> {
    let replacement = NewCartItem::new(args.pizza.required()?, args.quantity);

    let update = carts
        .replace_item(args.cart.user, args.item, replacement)
        .await
        .map_err(|error| format!("failed to replace item: {error}"))?;

    args.cart.output.item(out, &update)
}

pub(crate) async fn patch(
    args: PatchArgs,
    carts: &dyn CartsService,
    out: &mut dyn Write,
) -> Result<(), String> {
    let patch = CartItemPatch {
        pizza: args.pizza.optional()?,
        quantity: args.quantity,
    };

    if patch.is_empty() {
        return Err("nothing to change: pass --pizza, --fixture or --quantity".to_string());
    }

    let update = carts
        .patch_item(args.cart.user, args.item, patch)
        .await
        .map_err(|error| format!("failed to patch item: {error}"))?;

    args.cart.output.item(out, &update)
}

pub(crate) async fn delete(
    args: DeleteArgs,
    carts: &dyn CartsService,
    out: &mut dyn Write,
) -> Result<(), String> {
    let cart = carts
        .delete_item(args.cart.user, args.item)
        .await
        .map_err(|error| format!("failed to delete item: {error}"))?;

    args.cart.output.cart(out, &cart)
}

pub(crate) async fn set(
    args: SetArgs,
    carts: &dyn CartsService,
    out: &mut dyn Write,
) -> Result<(), String> {
    let items: Vec<NewCartItem> = serde_json::from_str(&args.items)
        .map_err(|error| format!("invalid items: {error}"))?;

    let cart = carts
        .replace_items(args.cart.user, items)
        .await
        .map_err(|error| format!("failed to replace items: {error}"))?;

    args.cart.output.cart(out, &cart)
}
