//! App Context

use std::sync::Arc;

use tracing::debug;

use pizzeria::fingerprint::ToppingOrder;

use crate::{
    config::StoreConfig,
    domain::carts::{
        CartsService, StoreCartsService,
        repositories::{FileCartsRepository, InMemoryCartsRepository},
    },
};

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
}

impl AppContext {
    /// Build application context backed by the configured cart directory.
    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        let repository = FileCartsRepository::new(&config.store_dir, config.topping_order.into());

        debug!(
            store_dir = %repository.dir().display(),
            topping_order = ?config.topping_order,
            "using file cart store"
        );

        Self {
            carts: Arc::new(StoreCartsService::new(Arc::new(repository))),
        }
    }

    /// Build application context that keeps carts in memory only.
    #[must_use]
    pub fn in_memory(topping_order: ToppingOrder) -> Self {
        Self {
            carts: Arc::new(StoreCartsService::new(Arc::new(
                InMemoryCartsRepository::new(topping_order),
            ))),
        }
    }
}
