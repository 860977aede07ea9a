//! Carts
//!
//! A [`Cart`] keeps at most one row per distinct pizza. Rows are found by fingerprint through an
//! index of `fingerprint -> item uuid`; positions are only resolved when a row is read or removed,
//! so removing a row never leaves stale index entries behind.
//!
//! Every mutating operation checks all of its failure conditions before writing, so a returned
//! error always means the cart is exactly as it was.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    fingerprint::{Fingerprint, ToppingOrder, fingerprint},
    pizzas::PizzaConfiguration,
};

pub mod errors;
pub mod items;

pub use errors::CartError;

use items::{CartItem, CartItemPatch, CartItemUuid, NewCartItem};

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
    index: FxHashMap<Fingerprint, CartItemUuid>,
    total_quantity: u64,
    topping_order: ToppingOrder,
}

impl Cart {
    /// Create an empty cart that treats topping order as significant.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cart with the given topping order policy.
    #[must_use]
    pub fn with_topping_order(topping_order: ToppingOrder) -> Self {
        Self {
            topping_order,
            ..Self::default()
        }
    }

    /// Create a cart from a full list of items, consolidating rows for identical pizzas.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if any item has an invalid quantity or a merged quantity overflows.
    pub fn with_items(
        topping_order: ToppingOrder,
        items: impl IntoIterator<Item = NewCartItem>,
    ) -> Result<Self, CartError> {
        let mut cart = Self::with_topping_order(topping_order);

        cart.add_items(items)?;

        Ok(cart)
    }

    /// Restore a cart from its persisted form.
    ///
    /// Fingerprints and the total quantity are recomputed; stored values are ignored. Rows are
    /// checked under exact structural identity, then rows that only differ in topping order are
    /// merged when `topping_order` is [`ToppingOrder::Insensitive`].
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if an item has a zero quantity, an item identifier repeats, or two
    /// rows hold the same pizza.
    pub fn from_document(
        topping_order: ToppingOrder,
        document: CartDocument,
    ) -> Result<Self, CartError> {
        let cart = Self::from_exact_document(document)?;

        if topping_order == ToppingOrder::Significant {
            return Ok(cart);
        }

        cart.rebuild(topping_order)
    }

    fn from_exact_document(document: CartDocument) -> Result<Self, CartError> {
        let mut cart = Self::with_topping_order(ToppingOrder::Significant);

        for item in document.items {
            let quantity = validate_quantity(item.quantity)?;
            let fingerprint = cart.fingerprint(&item.pizza);

            if cart.items.iter().any(|existing| existing.uuid == item.uuid) {
                return Err(CartError::DuplicateItem(item.uuid));
            }

            if let Some(&first) = cart.index.get(&fingerprint) {
                return Err(CartError::DuplicateFingerprint {
                    fingerprint,
                    first,
                    second: item.uuid,
                });
            }

            cart.push(item.uuid, item.pizza, quantity, fingerprint);
        }

        Ok(cart)
    }

    /// Persisted form of this cart.
    #[must_use]
    pub fn to_document(&self) -> CartDocument {
        CartDocument {
            items: self
                .items
                .iter()
                .map(|item| CartItemDocument {
                    uuid: item.uuid,
                    pizza: item.pizza.clone(),
                    quantity: item.quantity,
                    fingerprint: Some(item.fingerprint.to_string()),
                })
                .collect(),
            quantity: self.total_quantity,
        }
    }

    /// Re-derive every fingerprint under a different topping order policy.
    ///
    /// Rows that become identical are merged into the earliest of them.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::QuantityOverflow` if a merged quantity overflows.
    pub fn rebuild(&self, topping_order: ToppingOrder) -> Result<Self, CartError> {
        let mut cart = Self::with_topping_order(topping_order);

        for item in &self.items {
            cart.absorb(item.uuid, item.pizza.clone(), item.quantity)?;
        }

        Ok(cart)
    }

    /// Topping order policy used for fingerprints in this cart.
    pub fn topping_order(&self) -> ToppingOrder {
        self.topping_order
    }

    /// Fingerprint a pizza the way this cart does.
    pub fn fingerprint(&self, pizza: &PizzaConfiguration) -> Fingerprint {
        fingerprint(pizza, self.topping_order)
    }

    /// Sum of all item quantities.
    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    /// Number of distinct rows in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no rows.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Get a row by its identifier.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::ItemNotFound` if the item is not in the cart.
    pub fn get_item(&self, uuid: CartItemUuid) -> Result<&CartItem, CartError> {
        self.items
            .iter()
            .find(|item| item.uuid == uuid)
            .ok_or(CartError::ItemNotFound(uuid))
    }

    /// Find the row holding a pizza, if any.
    pub fn find_by_pizza(&self, pizza: &PizzaConfiguration) -> Option<&CartItem> {
        self.index
            .get(&self.fingerprint(pizza))
            .and_then(|uuid| self.get_item(*uuid).ok())
    }

    /// Add an item, merging it into the row for the same pizza when there is one.
    ///
    /// Returns the identifier of the row now holding the quantity.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::InvalidQuantity` for a zero quantity and
    /// `CartError::QuantityOverflow` if the merged quantity overflows.
    pub fn add_item(&mut self, item: NewCartItem) -> Result<CartItemUuid, CartError> {
        self.absorb(CartItemUuid::new(), item.pizza, item.quantity)
    }

    /// Add several items in order. Items for the same pizza merge with each other as well as with
    /// rows already in the cart.
    ///
    /// # Errors
    ///
    /// Returns the first `CartError` raised by any item; none of the batch is applied.
    pub fn add_items(
        &mut self,
        items: impl IntoIterator<Item = NewCartItem>,
    ) -> Result<Vec<CartItemUuid>, CartError> {
        let mut next = self.clone();

        let uuids = items
            .into_iter()
            .map(|item| next.add_item(item))
            .collect::<Result<Vec<_>, _>>()?;

        *self = next;

        Ok(uuids)
    }

    /// Replace a row's pizza and quantity.
    ///
    /// If the new pizza is already held by another row, the quantity moves to that row and this
    /// row is removed. A zero quantity removes the row as [`Self::delete_item`] does.
    ///
    /// Returns the identifier of the row now holding the quantity, or `None` if the row was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::ItemNotFound` if the item is not in the cart and
    /// `CartError::QuantityOverflow` if a merged quantity overflows.
    pub fn replace_item(
        &mut self,
        uuid: CartItemUuid,
        pizza: PizzaConfiguration,
        quantity: u32,
    ) -> Result<Option<CartItemUuid>, CartError> {
        let position = self.position(uuid)?;

        if quantity == 0 {
            self.delete_item(uuid)?;

            return Ok(None);
        }

        let new_fingerprint = self.fingerprint(&pizza);

        let (old_fingerprint, old_quantity) = self
            .items
            .get(position)
            .map(|item| (item.fingerprint, item.quantity))
            .ok_or(CartError::ItemNotFound(uuid))?;

        let total_quantity = self.total_quantity - u64::from(old_quantity) + u64::from(quantity);

        if new_fingerprint == old_fingerprint {
            let item = self.item_mut(uuid)?;

            item.pizza = pizza;
            item.quantity = quantity;
            self.total_quantity = total_quantity;

            return Ok(Some(uuid));
        }

        if let Some(&other) = self.index.get(&new_fingerprint) {
            let target = self.item_mut(other)?;

            target.quantity = target
                .quantity
                .checked_add(quantity)
                .ok_or(CartError::QuantityOverflow(other))?;

            self.items.remove(position);
            self.index.remove(&old_fingerprint);
            self.total_quantity = total_quantity;

            return Ok(Some(other));
        }

        let item = self.item_mut(uuid)?;

        item.pizza = pizza;
        item.quantity = quantity;
        item.fingerprint = new_fingerprint;

        self.index.remove(&old_fingerprint);
        self.index.insert(new_fingerprint, uuid);
        self.total_quantity = total_quantity;

        Ok(Some(uuid))
    }

    /// Apply a partial update to a row, then replace it as [`Self::replace_item`] does. Patching
    /// the quantity to zero removes the row.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::replace_item`].
    pub fn patch_item(
        &mut self,
        uuid: CartItemUuid,
        patch: CartItemPatch,
    ) -> Result<Option<CartItemUuid>, CartError> {
        let current = self.get_item(uuid)?;

        let quantity = patch.quantity.unwrap_or(current.quantity);
        let pizza = match patch.pizza {
            Some(pizza) => pizza,
            None => current.pizza.clone(),
        };

        self.replace_item(uuid, pizza, quantity)
    }

    /// Remove a row and return it.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::ItemNotFound` if the item is not in the cart.
    pub fn delete_item(&mut self, uuid: CartItemUuid) -> Result<CartItem, CartError> {
        let position = self.position(uuid)?;
        let item = self.items.remove(position);

        self.index.remove(&item.fingerprint);
        self.total_quantity -= u64::from(item.quantity);

        Ok(item)
    }

    /// Empty the cart, keeping its topping order policy.
    pub fn reset(&mut self) {
        self.items.clear();
        self.index.clear();
        self.total_quantity = 0;
    }

    fn absorb(
        &mut self,
        uuid: CartItemUuid,
        pizza: PizzaConfiguration,
        quantity: u32,
    ) -> Result<CartItemUuid, CartError> {
        let quantity = validate_quantity(quantity)?;
        let fingerprint = self.fingerprint(&pizza);

        let Some(&existing) = self.index.get(&fingerprint) else {
            self.push(uuid, pizza, quantity, fingerprint);

            return Ok(uuid);
        };

        let item = self.item_mut(existing)?;

        item.quantity = item
            .quantity
            .checked_add(quantity)
            .ok_or(CartError::QuantityOverflow(existing))?;

        self.total_quantity += u64::from(quantity);

        Ok(existing)
    }

    fn push(
        &mut self,
        uuid: CartItemUuid,
        pizza: PizzaConfiguration,
        quantity: u32,
        fingerprint: Fingerprint,
    ) {
        self.items.push(CartItem {
            uuid,
            pizza,
            quantity,
            fingerprint,
        });
        self.index.insert(fingerprint, uuid);
        self.total_quantity += u64::from(quantity);
    }

    fn position(&self, uuid: CartItemUuid) -> Result<usize, CartError> {
        self.items
            .iter()
            .position(|item| item.uuid == uuid)
            .ok_or(CartError::ItemNotFound(uuid))
    }

    fn item_mut(&mut self, uuid: CartItemUuid) -> Result<&mut CartItem, CartError> {
        self.items
            .iter_mut()
            .find(|item| item.uuid == uuid)
            .ok_or(CartError::ItemNotFound(uuid))
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Persisted form of a [`Cart`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartDocument {
    /// Rows in insertion order
    pub items: Vec<CartItemDocument>,

    /// Total quantity at the time of writing
    #[serde(default)]
    pub quantity: u64,
}

/// Persisted form of a [`CartItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemDocument {
    /// Row identifier
    pub uuid: CartItemUuid,

    /// Pizza held by the row
    pub pizza: PizzaConfiguration,

    /// Row quantity
    pub quantity: u32,

    /// Hex fingerprint at the time of writing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

fn validate_quantity(quantity: u32) -> Result<u32, CartError> {
    if quantity == 0 {
        return Err(CartError::InvalidQuantity(quantity));
    }

    Ok(quantity)
}
