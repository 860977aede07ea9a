//! Pizzeria
//!
//! Cart consolidation engine for configurable pizzas. Items whose configurations are
//! structurally identical are folded into a single cart row, keyed by a content fingerprint.

pub mod carts;
pub mod fingerprint;
pub mod fixtures;
pub mod pizzas;
pub mod prelude;
pub mod render;
pub mod uuids;
