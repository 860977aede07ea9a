use std::path::{Path, PathBuf};

use clap::Args;
use pizzeria::{fixtures::Fixture, pizzas::PizzaConfiguration};

/// Where a pizza configuration comes from: inline JSON or a named menu entry.
#[derive(Debug, Args)]
pub(crate) struct PizzaArgs {
    /// Pizza configuration as JSON
    #[arg(long, conflicts_with = "fixture")]
    pub(crate) pizza: Option<String>,

    /// Name of a pizza on the menu
    #[arg(long)]
    pub(crate) fixture: Option<String>,

    /// YAML file of named pizzas; the bundled menu is used when omitted
    #[arg(long, env = "PIZZA_MENU")]
    pub(crate) menu: Option<PathBuf>,
}

impl PizzaArgs {
    pub(crate) fn optional(&self) -> Result<Option<PizzaConfiguration>, String> {
        if let Some(json) = &self.pizza {
            return serde_json::from_str(json)
                .map(Some)
                .map_err(|error| format!("invalid pizza configuration: {error}"));
        }

        let Some(name) = &self.fixture else {
            return Ok(None);
        };

        load_menu(self.menu.as_deref())?
            .pizza(name)
            .cloned()
            .map(Some)
            .map_err(|error| error.to_string())
    }

    pub(crate) fn required(&self) -> Result<PizzaConfiguration, String> {
        self.optional()?
            .ok_or_else(|| "either --pizza or --fixture is required".to_string())
    }
}

pub(crate) fn load_menu(path: Option<&Path>) -> Result<Fixture, String> {
    match path {
        Some(path) => Fixture::from_path(path),
        None => Fixture::menu(),
    }
    .map_err(|error| format!("failed to load menu: {error}"))
}
