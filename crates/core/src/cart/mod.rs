//! The shopping cart engine.
//!
//! A [`Cart`] owns the customer's pending line items. It merges additions of
//! an identical configuration into one row, derives totals on demand, and
//! after every change hands the new item list to a [`CartStore`] and a
//! [`CartEvent`] to a [`CartObserver`].
//!
//! # Concurrency
//!
//! Every mutation holds the cart's lock for its whole read-modify-write, so
//! the merge check in [`Cart::add_item`] never interleaves with another
//! mutation. The store is written while the lock is held, which keeps the
//! last saved list equal to the in-memory list. Observers run after the lock
//! is released.
//!
//! # Failure model
//!
//! Persistence failures are logged and swallowed. The in-memory cart stays
//! authoritative and is never rolled back because a save failed.

mod event;
mod line_item;
mod store;

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use tracing::{debug, warn};

pub use event::{CartEvent, CartObserver, NoopObserver, TracingObserver};
pub use line_item::LineItem;
pub use store::{CartStore, MemoryStore, StoreError};

use crate::types::{LineId, OptionSet, Price, ProductId, Size};

/// Contract violations reported by the cart.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// A quantity was outside the range the operation accepts.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// A unit price was negative.
    #[error("invalid price: {0}")]
    InvalidPrice(Decimal),

    /// The change would make the cart total too large to represent.
    #[error("cart total too large")]
    TotalOverflow,
}

/// Sum of line totals, or `None` if any step overflows.
fn checked_subtotal<'a>(rows: impl IntoIterator<Item = &'a LineItem>) -> Option<Price> {
    rows.into_iter()
        .try_fold(Price::ZERO, |total, row| total.checked_add(row.checked_line_total()?))
}

/// A customer's cart.
pub struct Cart {
    items: Mutex<Vec<LineItem>>,
    store: Arc<dyn CartStore>,
    observer: Arc<dyn CartObserver>,
}

impl std::fmt::Debug for Cart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cart")
            .field("items", &*self.lock())
            .finish_non_exhaustive()
    }
}

impl Cart {
    /// Create an empty cart. Nothing is read from `store`.
    #[must_use]
    pub fn new(store: Arc<dyn CartStore>, observer: Arc<dyn CartObserver>) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            store,
            observer,
        }
    }

    /// Create a cart holding whatever `store` last saved.
    ///
    /// A store that cannot be read yields an empty cart. Saved rows with a
    /// zero quantity are dropped.
    #[must_use]
    pub fn restore(store: Arc<dyn CartStore>, observer: Arc<dyn CartObserver>) -> Self {
        let items = match store.load() {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "Failed to load saved cart, starting empty");
                Vec::new()
            }
        };

        let loaded = items.len();
        let mut items: Vec<LineItem> = items
            .into_iter()
            .filter(|item| item.quantity > 0)
            .collect();
        if items.len() != loaded {
            warn!(
                dropped = loaded - items.len(),
                "Dropped saved cart rows with zero quantity"
            );
        }

        let mut seen = HashSet::new();
        for item in &mut items {
            if !seen.insert(item.id) {
                item.id = LineId::generate();
                warn!(line_id = %item.id, "Re-keyed saved cart row with a duplicate id");
            }
        }
        debug!(rows = items.len(), "Restored cart");

        Self {
            items: Mutex::new(items),
            store,
            observer,
        }
    }

    /// Add an item, merging it into an existing row with the same product,
    /// size and options.
    ///
    /// Returns the key of the row that now holds the item. When merged, that
    /// is the existing row's key, not `item.id`. A new row keeps `item.id`
    /// unless another row already uses that key, in which case it gets a
    /// fresh one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `item.quantity` is zero or
    /// the merged quantity does not fit a row, and
    /// [`CartError::TotalOverflow`] if the cart total would not be
    /// representable. The cart is unchanged in both cases.
    pub fn add_item(&self, mut item: LineItem) -> Result<LineId, CartError> {
        if item.quantity < 1 {
            return Err(CartError::InvalidQuantity(i64::from(item.quantity)));
        }

        let (line_id, event) = {
            let mut items = self.lock();
            let subtotal = checked_subtotal(items.iter()).ok_or(CartError::TotalOverflow)?;

            let outcome = if let Some(existing) =
                items.iter_mut().find(|row| row.same_configuration(&item))
            {
                let quantity = existing
                    .quantity
                    .checked_add(item.quantity)
                    .ok_or_else(|| {
                        CartError::InvalidQuantity(
                            i64::from(existing.quantity) + i64::from(item.quantity),
                        )
                    })?;
                existing
                    .unit_price
                    .checked_mul(quantity)
                    .and(existing.unit_price.checked_mul(item.quantity))
                    .and_then(|added| subtotal.checked_add(added))
                    .ok_or(CartError::TotalOverflow)?;

                existing.quantity = quantity;
                debug!(
                    line_id = %existing.id,
                    product_id = %existing.product_id,
                    quantity = existing.quantity,
                    "Merged item into existing cart row"
                );
                (
                    existing.id,
                    CartEvent::QuantityChanged {
                        name: item.name,
                        quantity: existing.quantity,
                    },
                )
            } else {
                item.checked_line_total()
                    .and_then(|added| subtotal.checked_add(added))
                    .ok_or(CartError::TotalOverflow)?;
                if items.iter().any(|row| row.id == item.id) {
                    item.id = LineId::generate();
                }

                let line_id = item.id;
                let name = item.name.clone();
                debug!(
                    line_id = %line_id,
                    product_id = %item.product_id,
                    quantity = item.quantity,
                    "Added cart row"
                );
                items.push(item);
                (line_id, CartEvent::Added { name })
            };

            self.persist(&items);
            outcome
        };

        self.observer.notify(&event);
        Ok(line_id)
    }

    /// Remove a row. Removing a row that is not in the cart does nothing.
    ///
    /// Returns the removed item, if any.
    pub fn remove_item(&self, line_id: LineId) -> Option<LineItem> {
        let removed = {
            let mut items = self.lock();
            let index = items.iter().position(|row| row.id == line_id)?;
            let removed = items.remove(index);
            debug!(line_id = %line_id, product_id = %removed.product_id, "Removed cart row");
            self.persist(&items);
            removed
        };

        self.observer.notify(&CartEvent::Removed {
            name: removed.name.clone(),
        });
        Some(removed)
    }

    /// Set a row's quantity.
    ///
    /// A quantity of zero or less removes the row. A positive quantity
    /// replaces the current one. No notification is sent.
    ///
    /// Returns true if a row was changed or removed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` does not fit a
    /// row's quantity and [`CartError::TotalOverflow`] if the cart total
    /// would not be representable. The row is unchanged in both cases.
    pub fn update_quantity(&self, line_id: LineId, quantity: i64) -> Result<bool, CartError> {
        let new_quantity = if quantity <= 0 {
            None
        } else {
            Some(u32::try_from(quantity).map_err(|_| CartError::InvalidQuantity(quantity))?)
        };

        let mut items = self.lock();
        let Some(index) = items.iter().position(|row| row.id == line_id) else {
            return Ok(false);
        };

        match new_quantity {
            None => {
                items.remove(index);
                debug!(line_id = %line_id, "Removed cart row by zero quantity");
            }
            Some(quantity) => {
                let others = checked_subtotal(items.iter().filter(|row| row.id != line_id));
                if let Some(row) = items.get_mut(index) {
                    row.unit_price
                        .checked_mul(quantity)
                        .zip(others)
                        .and_then(|(line, rest)| rest.checked_add(line))
                        .ok_or(CartError::TotalOverflow)?;
                    row.quantity = quantity;
                }
                debug!(line_id = %line_id, quantity, "Updated cart row quantity");
            }
        }

        self.persist(&items);
        Ok(true)
    }

    /// Remove every row.
    pub fn clear(&self) {
        {
            let mut items = self.lock();
            items.clear();
            debug!("Cleared cart");
            self.persist(&items);
        }
        self.observer.notify(&CartEvent::Cleared);
    }

    /// Sum of quantities over all rows.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lock()
            .iter()
            .map(|row| u64::from(row.quantity))
            .sum()
    }

    /// Sum of unit price times quantity over all rows, before tax and
    /// delivery.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lock().iter().map(LineItem::line_total).sum()
    }

    /// A copy of the rows in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<LineItem> {
        self.lock().clone()
    }

    /// A copy of one row.
    #[must_use]
    pub fn get(&self, line_id: LineId) -> Option<LineItem> {
        self.lock().iter().find(|row| row.id == line_id).cloned()
    }

    /// Key of the row holding a configuration, if any.
    #[must_use]
    pub fn find_line(
        &self,
        product_id: &ProductId,
        size: Size,
        options: &OptionSet,
    ) -> Option<LineId> {
        self.lock()
            .iter()
            .find(|row| row.matches(product_id, size, options))
            .map(|row| row.id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of rows (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // The item list is consistent after every statement that can panic, so a
    // poisoned lock still guards valid data.
    fn lock(&self) -> MutexGuard<'_, Vec<LineItem>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, items: &[LineItem]) {
        if let Err(e) = self.store.save(items) {
            warn!(error = %e, rows = items.len(), "Failed to persist cart");
        }
    }
}
