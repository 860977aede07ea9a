//! Test Helpers

use jiff::Timestamp;

use pizzeria::carts::Cart;

use crate::domain::carts::records::{StoredCart, UserUuid};

pub(crate) fn stored_cart(user: UserUuid, revision: u64) -> StoredCart {
    let now = Timestamp::now();

    StoredCart {
        user,
        revision,
        cart: Cart::new(),
        created_at: now,
        updated_at: now,
    }
}
