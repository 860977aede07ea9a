//! Domain

pub mod carts;
