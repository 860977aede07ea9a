//! Carts service errors.

use thiserror::Error;

use pizzeria::carts::{CartError, items::CartItemUuid};

use crate::domain::carts::repositories::RepositoryError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart already exists")]
    AlreadyExists,

    #[error("cart not found")]
    NotFound,

    #[error("cart item {0} not found")]
    ItemNotFound(CartItemUuid),

    #[error("invalid data")]
    InvalidData(#[source] CartError),

    #[error("cart was modified concurrently")]
    Conflict,

    #[error("storage error")]
    Storage(#[source] RepositoryError),
}

impl From<CartError> for CartsServiceError {
    fn from(error: CartError) -> Self {
        match error {
            CartError::ItemNotFound(uuid) => Self::ItemNotFound(uuid),
            error => Self::InvalidData(error),
        }
    }
}

impl From<RepositoryError> for CartsServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::AlreadyExists => Self::AlreadyExists,
            RepositoryError::Conflict { .. } => Self::Conflict,
            error => Self::Storage(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_item_maps_to_item_not_found() {
        let uuid = CartItemUuid::new();

        let error = CartsServiceError::from(CartError::ItemNotFound(uuid));

        assert!(
            matches!(error, CartsServiceError::ItemNotFound(found) if found == uuid),
            "expected ItemNotFound, got {error:?}"
        );
    }

    #[test]
    fn validation_failures_map_to_invalid_data() {
        let error = CartsServiceError::from(CartError::InvalidQuantity(0));

        assert!(
            matches!(error, CartsServiceError::InvalidData(CartError::InvalidQuantity(0))),
            "expected InvalidData, got {error:?}"
        );
    }

    #[test]
    fn revision_mismatch_maps_to_conflict() {
        let error = CartsServiceError::from(RepositoryError::Conflict {
            expected: 3,
            actual: 4,
        });

        assert!(
            matches!(error, CartsServiceError::Conflict),
            "expected Conflict, got {error:?}"
        );
    }

    #[test]
    fn io_failures_map_to_storage() {
        let error = CartsServiceError::from(RepositoryError::Io(std::io::Error::other("disk")));

        assert!(
            matches!(error, CartsServiceError::Storage(RepositoryError::Io(_))),
            "expected Storage, got {error:?}"
        );
    }
}
