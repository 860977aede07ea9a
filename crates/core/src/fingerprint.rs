//! Fingerprints
//!
//! A [`Fingerprint`] is the identity of a pizza inside a cart: two configurations with the same
//! fingerprint are the same pizza, however they were built.
//!
//! The digest is SHA-256 over a canonical encoding. Every scalar attribute is written as
//! `name 0x1f value 0x00` in a fixed field order, and each topping list is written as its name,
//! its length (little-endian `u64`) and then one `name/amount/portion` record per topping.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::pizzas::{MeatName, PizzaConfiguration, Topping, VeggieName};

const FIELD_SEPARATOR: &[u8] = &[0x1f];
const FIELD_TERMINATOR: &[u8] = &[0x00];

/// How topping list order affects identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToppingOrder {
    /// Toppings chosen in a different order make a different pizza.
    #[default]
    Significant,

    /// Toppings are compared as a multiset.
    Insensitive,
}

/// Structural identity of a [`PizzaConfiguration`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|byte| write!(f, "{byte:02x}"))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({self})")
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Compute the fingerprint of a pizza.
pub fn fingerprint(pizza: &PizzaConfiguration, order: ToppingOrder) -> Fingerprint {
    let mut hasher = Sha256::new();

    write_field(&mut hasher, "cheeseAmount", pizza.cheese_amount.as_str());
    write_field(&mut hasher, "comboName", pizza.combo_name.as_str());
    write_field(&mut hasher, "crust", pizza.crust.as_str());
    write_field(&mut hasher, "crustFlavor", pizza.crust_flavor.as_str());
    write_toppings(&mut hasher, "meats", pizza.meats.as_slice(), order, MeatName::as_str);
    write_toppings(
        &mut hasher,
        "veggies",
        pizza.veggies.as_slice(),
        order,
        VeggieName::as_str,
    );
    write_field(&mut hasher, "priceType", pizza.price_type.as_str());
    write_field(&mut hasher, "sauce", pizza.sauce.as_str());
    write_field(&mut hasher, "sauceAmount", pizza.sauce_amount.as_str());
    write_field(&mut hasher, "size", pizza.size.as_str());

    Fingerprint(hasher.finalize().into())
}

fn write_field(hasher: &mut Sha256, name: &str, value: &str) {
    hasher.update(name.as_bytes());
    hasher.update(FIELD_SEPARATOR);
    hasher.update(value.as_bytes());
    hasher.update(FIELD_TERMINATOR);
}

fn write_toppings<N: Copy + Ord>(
    hasher: &mut Sha256,
    name: &str,
    toppings: &[Topping<N>],
    order: ToppingOrder,
    topping_name: fn(N) -> &'static str,
) {
    hasher.update(name.as_bytes());
    hasher.update(FIELD_SEPARATOR);
    hasher.update((toppings.len() as u64).to_le_bytes());

    let mut write = |topping: &Topping<N>| {
        write_field(hasher, "toppingName", topping_name(topping.topping_name));
        write_field(hasher, "amount", topping.amount.as_str());
        write_field(hasher, "portion", topping.portion.as_str());
    };

    match order {
        ToppingOrder::Significant => toppings.iter().for_each(&mut write),
        ToppingOrder::Insensitive => {
            let mut sorted = toppings.to_vec();

            sorted.sort_unstable();
            sorted.iter().for_each(&mut write);
        }
    }

    hasher.update(FIELD_TERMINATOR);
}
