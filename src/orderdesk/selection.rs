//! Checked rows, tracked by identity pair.
//!
//! Keys outlive the page and query they were checked on: filtering a selected row out of
//! view keeps it selected. Keys of records that leave the store are pruned by the facade
//! (see [`crate::api::OrderDesk`]) unless pruning is switched off in the config.

use crate::model::{OrderKey, OrderRecord};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    keys: BTreeSet<OrderKey>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `key`. Returns true if the key is now selected.
    pub fn toggle(&mut self, key: OrderKey) -> bool {
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    pub fn contains(&self, key: &OrderKey) -> bool {
        self.keys.contains(key)
    }

    /// Header checkbox state: true when the page is non-empty and every key on it is
    /// selected.
    pub fn all_selected(&self, page_keys: &[OrderKey]) -> bool {
        !page_keys.is_empty() && page_keys.iter().all(|k| self.keys.contains(k))
    }

    /// Header checkbox toggle.
    ///
    /// When every key on the page is already selected, the *whole* selection is cleared
    /// (including keys on other pages). Otherwise the selection becomes exactly the page
    /// keys. Returns true if the page ended up selected.
    pub fn select_all(&mut self, page_keys: &[OrderKey]) -> bool {
        if self.all_selected(page_keys) {
            self.keys.clear();
            false
        } else {
            self.keys = page_keys.iter().cloned().collect();
            !self.keys.is_empty()
        }
    }

    /// Drops keys with no matching record in `orders`. Returns how many were dropped.
    pub fn retain_present(&mut self, orders: &[OrderRecord]) -> usize {
        let before = self.keys.len();
        self.keys
            .retain(|key| orders.iter().any(|o| o.matches_key(key)));
        before - self.keys.len()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrderKey> {
        self.keys.iter()
    }
}
