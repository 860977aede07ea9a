//! Cart storage, services and runtime wiring for the pizzeria.

pub mod config;
pub mod context;
pub mod domain;
pub mod observability;

#[cfg(test)]
mod test;
