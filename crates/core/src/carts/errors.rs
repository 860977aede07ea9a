//! Cart Errors

use thiserror::Error;

use crate::{carts::items::CartItemUuid, fingerprint::Fingerprint};

/// Errors raised by cart operations. A failed operation leaves the cart untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantities must be at least one.
    #[error("invalid quantity {0}, must be at least 1")]
    InvalidQuantity(u32),

    /// No item with this identifier is in the cart.
    #[error("cart item {0} not found")]
    ItemNotFound(CartItemUuid),

    /// Adding the quantity would exceed the per-item limit.
    #[error("quantity for cart item {0} would overflow")]
    QuantityOverflow(CartItemUuid),

    /// A cart document lists the same item identifier twice.
    #[error("cart item {0} appears more than once")]
    DuplicateItem(CartItemUuid),

    /// A cart document holds two rows for the same pizza.
    #[error("cart items {first} and {second} share fingerprint {fingerprint}")]
    DuplicateFingerprint {
        /// Fingerprint held by both rows
        fingerprint: Fingerprint,
        /// Row that claimed the fingerprint first
        first: CartItemUuid,
        /// Row that repeated it
        second: CartItemUuid,
    },
}
