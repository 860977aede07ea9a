//! Cart Items

use serde::{Deserialize, Serialize};

use crate::{fingerprint::Fingerprint, pizzas::PizzaConfiguration, uuids::TypedUuid};

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItem>;

/// One row of a cart: a pizza and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    pub(crate) uuid: CartItemUuid,
    pub(crate) pizza: PizzaConfiguration,
    pub(crate) quantity: u32,
    pub(crate) fingerprint: Fingerprint,
}

impl CartItem {
    /// Identifier of this row.
    pub fn uuid(&self) -> CartItemUuid {
        self.uuid
    }

    /// The pizza held by this row.
    pub fn pizza(&self) -> &PizzaConfiguration {
        &self.pizza
    }

    /// How many of the pizza are in the cart. Always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Fingerprint of [`Self::pizza`] under the owning cart's topping order.
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }
}

/// An item on its way into a cart. The cart decides which row it lands in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCartItem {
    /// Pizza to add
    pub pizza: PizzaConfiguration,

    /// How many to add
    pub quantity: u32,
}

impl NewCartItem {
    /// Create a new cart item request.
    pub fn new(pizza: PizzaConfiguration, quantity: u32) -> Self {
        Self { pizza, quantity }
    }
}

/// Partial update of a cart item. Present fields replace the item's values, absent fields keep
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemPatch {
    /// Replacement pizza
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pizza: Option<PizzaConfiguration>,

    /// Replacement quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl CartItemPatch {
    /// Patch that only changes the quantity.
    pub fn quantity(quantity: u32) -> Self {
        Self {
            pizza: None,
            quantity: Some(quantity),
        }
    }

    /// Patch that only changes the pizza.
    pub fn pizza(pizza: PizzaConfiguration) -> Self {
        Self {
            pizza: Some(pizza),
            quantity: None,
        }
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.pizza.is_none() && self.quantity.is_none()
    }
}
