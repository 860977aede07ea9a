//! Cart Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use pizzeria::{
    carts::{Cart, CartDocument, CartError, items::CartItemUuid},
    fingerprint::ToppingOrder,
    uuids::TypedUuid,
};

/// Owner of a cart.
#[derive(Debug)]
pub enum User {}

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// A user's cart as held by a store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredCart {
    pub user: UserUuid,

    /// Bumped on every successful save.
    pub revision: u64,

    pub cart: Cart,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredCart {
    pub(crate) fn from_document(
        topping_order: ToppingOrder,
        document: StoredCartDocument,
    ) -> Result<Self, CartError> {
        Ok(Self {
            user: document.user,
            revision: document.revision,
            cart: Cart::from_document(topping_order, document.cart)?,
            created_at: document.created_at,
            updated_at: document.updated_at,
        })
    }
}

/// Persisted form of a [`StoredCart`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredCartDocument {
    pub user: UserUuid,
    pub revision: u64,
    pub cart: CartDocument,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredCartDocument {
    pub(crate) fn empty(user: UserUuid, now: Timestamp) -> Self {
        Self {
            user,
            revision: 1,
            cart: CartDocument::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Result of an item operation: the row now holding the quantity, and the saved cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItemUpdate {
    /// `None` when the operation removed the row.
    pub item: Option<CartItemUuid>,
    pub cart: StoredCart,
}
