//! Pizzeria prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    carts::{
        Cart, CartDocument, CartError, CartItemDocument,
        items::{CartItem, CartItemPatch, CartItemUuid, NewCartItem},
    },
    fingerprint::{Fingerprint, ToppingOrder, fingerprint},
    fixtures::{Fixture, FixtureError},
    pizzas::{
        CheeseAmount, ComboName, Crust, CrustFlavor, MeatName, MeatTopping, PizzaConfiguration,
        PriceType, Sauce, SauceAmount, Size, Topping, ToppingAmount, ToppingPortion, VeggieName,
        VeggieTopping,
    },
    render::{RenderError, write_cart},
    uuids::TypedUuid,
};
