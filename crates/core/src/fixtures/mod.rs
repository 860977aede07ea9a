//! Fixtures
//!
//! Named pizza configurations loaded from YAML, for tests and for building carts from the
//! command line.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{carts::items::NewCartItem, pizzas::PizzaConfiguration};

const MENU_YAML: &str = include_str!("../../fixtures/menu.yaml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Pizza not found
    #[error("Pizza not found: {0}")]
    PizzaNotFound(String),
}

/// Fixture
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    pizzas: FxHashMap<String, PizzaConfiguration>,
}

impl Fixture {
    /// The bundled menu of pizzas.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError::Yaml` if the bundled menu fails to parse.
    pub fn menu() -> Result<Self, FixtureError> {
        Self::parse(MENU_YAML)
    }

    /// Parse a fixture from YAML text.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError::Yaml` if the text is not a valid fixture.
    pub fn parse(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Load a fixture from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError` if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Get a pizza by name.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError::PizzaNotFound` if no pizza has this name.
    pub fn pizza(&self, name: &str) -> Result<&PizzaConfiguration, FixtureError> {
        self.pizzas
            .get(name)
            .ok_or_else(|| FixtureError::PizzaNotFound(name.to_string()))
    }

    /// Build a cart item for a named pizza.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError::PizzaNotFound` if no pizza has this name.
    pub fn item(&self, name: &str, quantity: u32) -> Result<NewCartItem, FixtureError> {
        Ok(NewCartItem::new(self.pizza(name)?.clone(), quantity))
    }

    /// Pizza names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.pizzas.keys().map(String::as_str).collect();

        names.sort_unstable();

        names
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        fingerprint::{ToppingOrder, fingerprint},
        pizzas::{ComboName, MeatName, Size},
    };

    use super::*;

    #[test]
    fn menu_parses() -> TestResult {
        let fixture = Fixture::menu()?;

        assert_eq!(
            fixture.names(),
            vec![
                "large-cheese",
                "large-supreme",
                "large-supreme-reordered",
                "medium-pepperoni",
                "personal-bbq-chicken",
            ]
        );

        Ok(())
    }

    #[test]
    fn pizza_fields_are_read() -> TestResult {
        let fixture = Fixture::menu()?;
        let pizza = fixture.pizza("personal-bbq-chicken")?;

        assert_eq!(pizza.combo_name, ComboName::BbqChicken);
        assert_eq!(pizza.size, Size::Personal);
        assert_eq!(
            pizza.meats.first().map(|topping| topping.topping_name),
            Some(MeatName::GrilledChicken)
        );
        assert_eq!(pizza.topping_count(), 3);

        Ok(())
    }

    #[test]
    fn reordered_supreme_differs_only_in_topping_order() -> TestResult {
        let fixture = Fixture::menu()?;
        let supreme = fixture.pizza("large-supreme")?;
        let reordered = fixture.pizza("large-supreme-reordered")?;

        assert_ne!(supreme, reordered);
        assert_ne!(
            fingerprint(supreme, ToppingOrder::Significant),
            fingerprint(reordered, ToppingOrder::Significant)
        );
        assert_eq!(
            fingerprint(supreme, ToppingOrder::Insensitive),
            fingerprint(reordered, ToppingOrder::Insensitive)
        );

        Ok(())
    }

    #[test]
    fn unknown_pizza_errors() -> TestResult {
        let fixture = Fixture::menu()?;

        let result = fixture.item("hawaiian", 1);

        assert!(
            matches!(result, Err(FixtureError::PizzaNotFound(ref name)) if name == "hawaiian"),
            "expected PizzaNotFound, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn invalid_attribute_fails_to_parse() {
        let yaml = "pizzas:\n  odd:\n    cheeseAmount: Lots\n";

        assert!(matches!(Fixture::parse(yaml), Err(FixtureError::Yaml(_))));
    }
}
