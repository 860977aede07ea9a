//! In-memory cart store.

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use pizzeria::{carts::Cart, fingerprint::ToppingOrder};

use crate::domain::carts::records::{StoredCart, StoredCartDocument, UserUuid};

use super::{CartsRepository, RepositoryError, next_revision};

/// Keeps carts as encoded documents so every load goes through the same validation as a
/// persistent store.
#[derive(Debug, Default)]
pub struct InMemoryCartsRepository {
    topping_order: ToppingOrder,
    documents: RwLock<FxHashMap<UserUuid, Vec<u8>>>,
}

impl InMemoryCartsRepository {
    #[must_use]
    pub fn new(topping_order: ToppingOrder) -> Self {
        Self {
            topping_order,
            documents: RwLock::default(),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<StoredCart, RepositoryError> {
        let document: StoredCartDocument = serde_json::from_slice(bytes)?;

        StoredCart::from_document(self.topping_order, document)
            .map_err(RepositoryError::InvalidDocument)
    }
}

#[async_trait]
impl CartsRepository for InMemoryCartsRepository {
    async fn create_cart(&self, user: UserUuid) -> Result<StoredCart, RepositoryError> {
        let mut documents = self.documents.write().await;

        if documents.contains_key(&user) {
            return Err(RepositoryError::AlreadyExists);
        }

        let bytes = serde_json::to_vec(&StoredCartDocument::empty(user, Timestamp::now()))?;
        let stored = self.decode(&bytes)?;

        documents.insert(user, bytes);

        Ok(stored)
    }

    async fn load_cart(&self, user: UserUuid) -> Result<StoredCart, RepositoryError> {
        let documents = self.documents.read().await;
        let bytes = documents.get(&user).ok_or(RepositoryError::NotFound)?;

        self.decode(bytes)
    }

    async fn save_cart(
        &self,
        user: UserUuid,
        cart: Cart,
        expected_revision: u64,
    ) -> Result<StoredCart, RepositoryError> {
        let mut documents = self.documents.write().await;
        let current = documents.get(&user).ok_or(RepositoryError::NotFound)?;
        let current: StoredCartDocument = serde_json::from_slice(current)?;

        let bytes = serde_json::to_vec(&next_revision(&current, &cart, expected_revision)?)?;
        let stored = self.decode(&bytes)?;

        documents.insert(user, bytes);

        Ok(stored)
    }
}
