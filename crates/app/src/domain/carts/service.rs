//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{error, info, warn};

use pizzeria::carts::{
    Cart, CartError,
    items::{CartItemPatch, CartItemUuid, NewCartItem},
};

use crate::domain::carts::{
    errors::CartsServiceError,
    records::{CartItemUpdate, StoredCart, UserUuid},
    repositories::{CartsRepository, RepositoryError},
};

/// Runs cart operations against a [`CartsRepository`].
///
/// Each operation loads the user's cart, applies the change in memory and saves it with the
/// revision it loaded. Operations on the same user queue behind a per-user lock; a save that
/// still meets a newer revision fails with [`CartsServiceError::Conflict`].
#[derive(Clone)]
pub struct StoreCartsService {
    repository: Arc<dyn CartsRepository>,
    locks: Arc<Mutex<FxHashMap<UserUuid, Arc<Mutex<()>>>>>,
}

impl StoreCartsService {
    #[must_use]
    pub fn new(repository: Arc<dyn CartsRepository>) -> Self {
        Self {
            repository,
            locks: Arc::default(),
        }
    }

    async fn lock(&self, user: UserUuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;

            locks.retain(|_, lock| Arc::strong_count(lock) > 1);

            Arc::clone(locks.entry(user).or_default())
        };

        lock.lock_owned().await
    }

    async fn mutate<T, F>(
        &self,
        user: UserUuid,
        operation: &'static str,
        apply: F,
    ) -> Result<(T, StoredCart), CartsServiceError>
    where
        F: FnOnce(&mut Cart) -> Result<T, CartError> + Send,
        T: Send,
    {
        let _guard = self.lock(user).await;

        let stored = self
            .repository
            .load_cart(user)
            .await
            .map_err(|error| report(user, operation, error))?;

        let revision = stored.revision;
        let mut cart = stored.cart;
        let value = apply(&mut cart)?;

        let saved = self
            .repository
            .save_cart(user, cart, revision)
            .await
            .map_err(|error| report(user, operation, error))?;

        info!(
            user = %user,
            revision = saved.revision,
            items = saved.cart.len(),
            quantity = saved.cart.total_quantity(),
            "{operation}"
        );

        Ok((value, saved))
    }
}

fn report(user: UserUuid, operation: &'static str, error: RepositoryError) -> CartsServiceError {
    match &error {
        RepositoryError::Conflict { expected, actual } => {
            warn!(user = %user, expected, actual, "{operation}: cart revision conflict");
        }
        RepositoryError::NotFound | RepositoryError::AlreadyExists => {}
        source => error!(user = %user, "{operation}: cart storage failed: {source}"),
    }

    error.into()
}

#[async_trait]
impl CartsService for StoreCartsService {
    async fn create_cart(&self, user: UserUuid) -> Result<StoredCart, CartsServiceError> {
        let _guard = self.lock(user).await;

        let created = self
            .repository
            .create_cart(user)
            .await
            .map_err(|error| report(user, "created cart", error))?;

        info!(user = %user, "created cart");

        Ok(created)
    }

    async fn get_cart(&self, user: UserUuid) -> Result<StoredCart, CartsServiceError> {
        self.repository
            .load_cart(user)
            .await
            .map_err(|error| report(user, "loaded cart", error))
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemUpdate, CartsServiceError> {
        let (item, cart) = self
            .mutate(user, "added cart item", |cart| cart.add_item(item))
            .await?;

        Ok(CartItemUpdate {
            item: Some(item),
            cart,
        })
    }

    async fn add_items(
        &self,
        user: UserUuid,
        items: Vec<NewCartItem>,
    ) -> Result<StoredCart, CartsServiceError> {
        let ((), cart) = self
            .mutate(user, "added cart items", |cart| {
                cart.add_items(items).map(drop)
            })
            .await?;

        Ok(cart)
    }

    async fn replace_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        replacement: NewCartItem,
    ) -> Result<CartItemUpdate, CartsServiceError> {
        let (item, cart) = self
            .mutate(user, "replaced cart item", |cart| {
                cart.replace_item(item, replacement.pizza, replacement.quantity)
            })
            .await?;

        Ok(CartItemUpdate { item, cart })
    }

    async fn patch_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        patch: CartItemPatch,
    ) -> Result<CartItemUpdate, CartsServiceError> {
        if patch.is_empty() {
            let cart = self.get_cart(user).await?;

            cart.cart.get_item(item)?;

            return Ok(CartItemUpdate {
                item: Some(item),
                cart,
            });
        }

        let (item, cart) = self
            .mutate(user, "patched cart item", |cart| cart.patch_item(item, patch))
            .await?;

        Ok(CartItemUpdate { item, cart })
    }

    async fn delete_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<StoredCart, CartsServiceError> {
        let ((), cart) = self
            .mutate(user, "deleted cart item", |cart| {
                cart.delete_item(item).map(drop)
            })
            .await?;

        Ok(cart)
    }

    async fn replace_items(
        &self,
        user: UserUuid,
        items: Vec<NewCartItem>,
    ) -> Result<StoredCart, CartsServiceError> {
        let ((), cart) = self
            .mutate(user, "replaced cart items", |cart| {
                *cart = Cart::with_items(cart.topping_order(), items)?;

                Ok(())
            })
            .await?;

        Ok(cart)
    }

    async fn reset_cart(&self, user: UserUuid) -> Result<StoredCart, CartsServiceError> {
        let ((), cart) = self
            .mutate(user, "reset cart", |cart| {
                cart.reset();

                Ok(())
            })
            .await?;

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Create an empty cart for a user.
    async fn create_cart(&self, user: UserUuid) -> Result<StoredCart, CartsServiceError>;

    /// Retrieve a user's cart.
    async fn get_cart(&self, user: UserUuid) -> Result<StoredCart, CartsServiceError>;

    /// Add an item, merging it into an existing row for the same pizza.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemUpdate, CartsServiceError>;

    /// Add several items at once; either all of them land or none do.
    async fn add_items(
        &self,
        user: UserUuid,
        items: Vec<NewCartItem>,
    ) -> Result<StoredCart, CartsServiceError>;

    /// Replace an item's pizza and quantity. A zero quantity removes the item.
    async fn replace_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        replacement: NewCartItem,
    ) -> Result<CartItemUpdate, CartsServiceError>;

    /// Change some of an item's fields. An empty patch returns the stored cart without saving.
    async fn patch_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        patch: CartItemPatch,
    ) -> Result<CartItemUpdate, CartsServiceError>;

    /// Remove an item from the cart.
    async fn delete_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<StoredCart, CartsServiceError>;

    /// Replace the cart's contents, consolidating duplicates in the new list.
    async fn replace_items(
        &self,
        user: UserUuid,
        items: Vec<NewCartItem>,
    ) -> Result<StoredCart, CartsServiceError>;

    /// Empty the cart once its order has been submitted.
    async fn reset_cart(&self, user: UserUuid) -> Result<StoredCart, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use pizzeria::{fingerprint::ToppingOrder, fixtures::Fixture};

    use crate::{
        domain::carts::repositories::MockCartsRepository,
        test::{TestContext, helpers::stored_cart},
    };

    use super::*;

    #[tokio::test]
    async fn create_cart_returns_empty_cart() -> TestResult {
        let ctx = TestContext::new();

        let cart = ctx.carts.create_cart(ctx.user).await?;

        assert_eq!(cart.user, ctx.user);
        assert!(cart.cart.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn create_cart_twice_returns_already_exists() -> TestResult {
        let ctx = TestContext::new();

        ctx.carts.create_cart(ctx.user).await?;
        let result = ctx.carts.create_cart(ctx.user).await;

        assert!(
            matches!(result, Err(CartsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_unknown_user_returns_not_found() {
        let ctx = TestContext::new();

        let result = ctx.carts.get_cart(UserUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_item_merges_and_persists() -> TestResult {
        let ctx = TestContext::with_cart().await?;

        let first = ctx.carts.add_item(ctx.user, ctx.item("large-cheese", 2)?).await?;
        let second = ctx.carts.add_item(ctx.user, ctx.item("large-cheese", 3)?).await?;

        assert_eq!(first.item, second.item);
        assert_eq!(second.cart.cart.len(), 1);
        assert_eq!(second.cart.cart.total_quantity(), 5);
        assert_eq!(ctx.carts.get_cart(ctx.user).await?, second.cart);

        Ok(())
    }

    #[tokio::test]
    async fn replace_item_merges_into_existing_row() -> TestResult {
        let ctx = TestContext::with_cart().await?;

        let a = ctx.carts.add_item(ctx.user, ctx.item("large-cheese", 2)?).await?;
        let b = ctx
            .carts
            .add_item(ctx.user, ctx.item("medium-pepperoni", 3)?)
            .await?;

        let a = a.item.ok_or("added row missing")?;
        let b = b.item.ok_or("added row missing")?;

        let replaced = ctx
            .carts
            .replace_item(ctx.user, a, ctx.item("medium-pepperoni", 5)?)
            .await?;

        assert_eq!(replaced.item, Some(b));
        assert_eq!(replaced.cart.cart.len(), 1);
        assert_eq!(replaced.cart.cart.get_item(b)?.quantity(), 8);
        assert_eq!(replaced.cart.cart.total_quantity(), 8);

        Ok(())
    }

    #[tokio::test]
    async fn patch_item_changes_quantity_only() -> TestResult {
        let ctx = TestContext::with_cart().await?;

        let added = ctx
            .carts
            .add_item(ctx.user, ctx.item("large-supreme", 1)?)
            .await?;
        let added = added.item.ok_or("added row missing")?;
        let patched = ctx
            .carts
            .patch_item(ctx.user, added, CartItemPatch::quantity(4))
            .await?;

        let item = patched.cart.cart.get_item(added)?;

        assert_eq!(patched.item, Some(added));
        assert_eq!(item.quantity(), 4);
        assert_eq!(item.pizza(), ctx.menu.pizza("large-supreme")?);

        Ok(())
    }

    #[tokio::test]
    async fn patch_item_to_zero_removes_row() -> TestResult {
        let ctx = TestContext::with_cart().await?;

        ctx.carts.add_item(ctx.user, ctx.item("large-cheese", 2)?).await?;
        let added = ctx
            .carts
            .add_item(ctx.user, ctx.item("large-supreme", 3)?)
            .await?;
        let added = added.item.ok_or("added row missing")?;

        let patched = ctx
            .carts
            .patch_item(ctx.user, added, CartItemPatch::quantity(0))
            .await?;

        assert_eq!(patched.item, None);
        assert_eq!(patched.cart.cart.len(), 1);
        assert_eq!(patched.cart.cart.total_quantity(), 2);
        assert_eq!(ctx.carts.get_cart(ctx.user).await?, patched.cart);

        Ok(())
    }

    #[tokio::test]
    async fn replace_item_to_zero_removes_row() -> TestResult {
        let ctx = TestContext::with_cart().await?;

        let added = ctx
            .carts
            .add_item(ctx.user, ctx.item("large-cheese", 2)?)
            .await?;
        let added = added.item.ok_or("added row missing")?;

        let replaced = ctx
            .carts
            .replace_item(ctx.user, added, ctx.item("medium-pepperoni", 0)?)
            .await?;

        assert_eq!(replaced.item, None);
        assert!(replaced.cart.cart.is_empty());
        assert_eq!(replaced.cart.revision, 3);

        Ok(())
    }

    #[tokio::test]
    async fn empty_patch_returns_cart_without_saving() -> TestResult {
        let user = UserUuid::new();
        let menu = Fixture::menu()?;
        let mut stored = stored_cart(user, 4);
        let item = stored.cart.add_item(menu.item("large-cheese", 2)?)?;
        let mut repository = MockCartsRepository::new();

        let loaded = stored.clone();
        repository
            .expect_load_cart()
            .times(1)
            .returning(move |_| Ok(loaded.clone()));
        repository.expect_save_cart().never();

        let service = StoreCartsService::new(Arc::new(repository));
        let patched = service
            .patch_item(user, item, CartItemPatch::default())
            .await?;

        assert_eq!(patched.item, Some(item));
        assert_eq!(patched.cart, stored);
        assert_eq!(patched.cart.revision, 4);

        Ok(())
    }

    #[tokio::test]
    async fn empty_patch_on_unknown_item_is_item_not_found() -> TestResult {
        let ctx = TestContext::with_cart().await?;
        let missing = CartItemUuid::new();

        let result = ctx
            .carts
            .patch_item(ctx.user, missing, CartItemPatch::default())
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ItemNotFound(uuid)) if uuid == missing),
            "expected ItemNotFound, got {result:?}"
        );
        assert_eq!(ctx.carts.get_cart(ctx.user).await?.revision, 1);

        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_item_leaves_store_untouched() -> TestResult {
        let ctx = TestContext::with_cart().await?;
        ctx.carts.add_item(ctx.user, ctx.item("large-cheese", 2)?).await?;

        let before = ctx.carts.get_cart(ctx.user).await?;
        let missing = CartItemUuid::new();

        let result = ctx.carts.delete_item(ctx.user, missing).await;

        assert!(
            matches!(result, Err(CartsServiceError::ItemNotFound(uuid)) if uuid == missing),
            "expected ItemNotFound, got {result:?}"
        );
        assert_eq!(ctx.carts.get_cart(ctx.user).await?, before);

        Ok(())
    }

    #[tokio::test]
    async fn zero_quantity_is_invalid_data() -> TestResult {
        let ctx = TestContext::with_cart().await?;

        let result = ctx
            .carts
            .add_items(
                ctx.user,
                vec![ctx.item("large-cheese", 1)?, ctx.item("large-supreme", 0)?],
            )
            .await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::InvalidData(CartError::InvalidQuantity(0)))
            ),
            "expected InvalidData, got {result:?}"
        );
        assert!(ctx.carts.get_cart(ctx.user).await?.cart.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn replace_items_consolidates_new_contents() -> TestResult {
        let ctx = TestContext::with_cart().await?;
        ctx.carts
            .add_item(ctx.user, ctx.item("personal-bbq-chicken", 1)?)
            .await?;

        let cart = ctx
            .carts
            .replace_items(
                ctx.user,
                vec![
                    ctx.item("large-cheese", 1)?,
                    ctx.item("large-cheese", 2)?,
                    ctx.item("medium-pepperoni", 1)?,
                ],
            )
            .await?;

        assert_eq!(cart.cart.len(), 2);
        assert_eq!(cart.cart.total_quantity(), 4);
        assert!(
            cart.cart
                .find_by_pizza(ctx.menu.pizza("personal-bbq-chicken")?)
                .is_none(),
            "previous contents kept"
        );

        Ok(())
    }

    #[tokio::test]
    async fn reset_cart_empties_and_bumps_revision() -> TestResult {
        let ctx = TestContext::with_cart().await?;
        let added = ctx
            .carts
            .add_item(ctx.user, ctx.item("large-supreme", 2)?)
            .await?;

        let reset = ctx.carts.reset_cart(ctx.user).await?;

        assert!(reset.cart.is_empty());
        assert_eq!(reset.cart.total_quantity(), 0);
        assert_eq!(reset.revision, added.cart.revision + 1);

        Ok(())
    }

    #[tokio::test]
    async fn insensitive_service_merges_reordered_toppings() -> TestResult {
        let ctx = TestContext::with_topping_order(ToppingOrder::Insensitive);
        ctx.carts.create_cart(ctx.user).await?;

        let cart = ctx
            .carts
            .add_items(
                ctx.user,
                vec![
                    ctx.item("large-supreme", 1)?,
                    ctx.item("large-supreme-reordered", 1)?,
                ],
            )
            .await?;

        assert_eq!(cart.cart.len(), 1);
        assert_eq!(cart.cart.total_quantity(), 2);

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_adds_to_one_cart_are_serialised() -> TestResult {
        let ctx = TestContext::with_cart().await?;
        let pizza = ctx.menu.pizza("medium-pepperoni")?.clone();

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let carts = ctx.carts.clone();
                let item = NewCartItem::new(pizza.clone(), 1);
                let user = ctx.user;

                tokio::spawn(async move { carts.add_item(user, item).await })
            })
            .collect();

        for task in tasks {
            task.await??;
        }

        let cart = ctx.carts.get_cart(ctx.user).await?;

        assert_eq!(cart.cart.len(), 1);
        assert_eq!(cart.cart.total_quantity(), 16);
        assert_eq!(cart.revision, 17);

        Ok(())
    }

    #[tokio::test]
    async fn stale_save_surfaces_as_conflict() {
        let user = UserUuid::new();
        let mut repository = MockCartsRepository::new();

        repository
            .expect_load_cart()
            .returning(move |user| Ok(stored_cart(user, 3)));
        repository
            .expect_save_cart()
            .withf(|_, _, expected| *expected == 3)
            .returning(|_, _, expected| {
                Err(RepositoryError::Conflict {
                    expected,
                    actual: expected + 1,
                })
            });

        let service = StoreCartsService::new(Arc::new(repository));
        let result = service.reset_cart(user).await;

        assert!(
            matches!(result, Err(CartsServiceError::Conflict)),
            "expected Conflict, got {result:?}"
        );
    }

    #[tokio::test]
    async fn failed_validation_never_saves() -> TestResult {
        let user = UserUuid::new();
        let item = Fixture::menu()?.item("large-cheese", 0)?;
        let mut repository = MockCartsRepository::new();

        repository
            .expect_load_cart()
            .times(1)
            .returning(move |user| Ok(stored_cart(user, 1)));
        repository.expect_save_cart().never();

        let service = StoreCartsService::new(Arc::new(repository));
        let result = service.add_item(user, item).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidData(_))),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn storage_failure_surfaces_as_storage_error() {
        let user = UserUuid::new();
        let mut repository = MockCartsRepository::new();

        repository
            .expect_load_cart()
            .returning(|_| Err(RepositoryError::Io(std::io::Error::other("disk gone"))));

        let service = StoreCartsService::new(Arc::new(repository));
        let result = service.get_cart(user).await;

        assert!(
            matches!(result, Err(CartsServiceError::Storage(RepositoryError::Io(_)))),
            "expected Storage, got {result:?}"
        );
    }

    #[tokio::test]
    async fn saved_cart_keeps_creation_time() -> TestResult {
        let ctx = TestContext::with_cart().await?;
        let created = ctx.carts.get_cart(ctx.user).await?;

        let added = ctx
            .carts
            .add_item(ctx.user, ctx.item("large-cheese", 1)?)
            .await?;

        assert_eq!(added.cart.created_at, created.created_at);
        assert!(added.cart.updated_at >= created.updated_at);
        assert!(added.cart.updated_at <= Timestamp::now());

        Ok(())
    }
}
