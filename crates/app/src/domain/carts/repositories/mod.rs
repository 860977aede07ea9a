//! Cart Repositories

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use thiserror::Error;

use pizzeria::carts::{Cart, CartError};

use crate::domain::carts::records::{StoredCart, StoredCartDocument, UserUuid};

mod file;
mod in_memory;

pub use file::FileCartsRepository;
pub use in_memory::InMemoryCartsRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("cart not found")]
    NotFound,

    #[error("cart already exists")]
    AlreadyExists,

    #[error("cart was modified concurrently (expected revision {expected}, found {actual})")]
    Conflict { expected: u64, actual: u64 },

    #[error("stored cart is invalid")]
    InvalidDocument(#[source] CartError),

    #[error("cart storage unavailable")]
    Io(#[from] std::io::Error),

    #[error("failed to encode cart document")]
    Serde(#[from] serde_json::Error),
}

/// Storage collaborator holding one cart per user.
#[automock]
#[async_trait]
pub trait CartsRepository: Send + Sync {
    /// Store an empty cart for a user.
    async fn create_cart(&self, user: UserUuid) -> Result<StoredCart, RepositoryError>;

    /// Load a user's cart.
    async fn load_cart(&self, user: UserUuid) -> Result<StoredCart, RepositoryError>;

    /// Save a user's cart if the stored revision still matches `expected_revision`.
    async fn save_cart(
        &self,
        user: UserUuid,
        cart: Cart,
        expected_revision: u64,
    ) -> Result<StoredCart, RepositoryError>;
}

fn next_revision(
    current: &StoredCartDocument,
    cart: &Cart,
    expected_revision: u64,
) -> Result<StoredCartDocument, RepositoryError> {
    if current.revision != expected_revision {
        return Err(RepositoryError::Conflict {
            expected: expected_revision,
            actual: current.revision,
        });
    }

    Ok(StoredCartDocument {
        user: current.user,
        revision: current.revision + 1,
        cart: cart.to_document(),
        created_at: current.created_at,
        updated_at: Timestamp::now(),
    })
}
