//! # Storage Layer
//!
//! This module defines the storage abstraction for orderdesk. The [`OrderStore`] trait
//! is the only write path to the order list: every mutation is an [`OrderAction`]
//! passed to [`OrderStore::dispatch`].
//!
//! ## Reducer + Owner
//!
//! The store is split in two:
//! 1. **Transition**: [`reducer::reduce`] is a pure `(orders, action) -> new orders`
//!    function. It never mutates its input and is tested on its own.
//! 2. **Owner**: an [`OrderStore`] implementation holds the current list, swaps in the
//!    reducer's output and notifies subscribers.
//!
//! ## Subscriptions
//!
//! Views do not patch themselves after a mutation. They [`OrderStore::subscribe`] a
//! listener, get told *that* something changed (plus the [`StoreChange`] describing it)
//! and recompute their derived data from the new list.
//!
//! - Listeners run synchronously, in subscription order, right after the swap.
//! - Dispatches that change nothing (update/delete of an unknown key) do not notify.
//!
//! ## Not-Found Is Not An Error
//!
//! Update and delete of a key that is not in the store are silent no-ops. Callers only
//! reference orders they read from the current list, so a miss means a stale UI, not a
//! fault. The returned [`StoreChange`] still tells the caller nothing matched.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: The only backend. Orders live for the process lifetime.

use crate::error::Result;
use crate::model::{OrderKey, OrderRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod memory;
pub mod reducer;

/// A mutation request for the order list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderAction {
    /// Insert at the head of the list
    Add(OrderRecord),
    /// Replace the first order matching `key`, keeping its original `date`
    Update { key: OrderKey, record: OrderRecord },
    /// Remove orders matching `key` (how many depends on the [`DeletePolicy`])
    Delete { key: OrderKey },
    /// Wholesale replacement, used for bulk loads
    ReplaceAll(Vec<OrderRecord>),
}

impl OrderAction {
    pub fn kind(&self) -> &'static str {
        match self {
            OrderAction::Add(_) => "add",
            OrderAction::Update { .. } => "update",
            OrderAction::Delete { .. } => "delete",
            OrderAction::ReplaceAll(_) => "replace_all",
        }
    }
}

/// What a dispatch actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Added(OrderKey),
    Updated { key: OrderKey, matched: bool },
    Deleted { key: OrderKey, removed: usize },
    Replaced { count: usize },
}

impl StoreChange {
    /// True when the list is unchanged.
    pub fn is_noop(&self) -> bool {
        matches!(
            self,
            StoreChange::Updated { matched: false, .. } | StoreChange::Deleted { removed: 0, .. }
        )
    }
}

impl fmt::Display for StoreChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreChange::Added(key) => write!(f, "added {}", key),
            StoreChange::Updated { key, matched } => {
                write!(f, "updated {} (matched: {})", key, matched)
            }
            StoreChange::Deleted { key, removed } => write!(f, "deleted {} x{}", key, removed),
            StoreChange::Replaced { count } => write!(f, "replaced with {} orders", count),
        }
    }
}

/// How many rows a delete removes when the identity pair appears more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeletePolicy {
    /// Remove every row sharing the pair (cleans up duplicated seed rows)
    #[default]
    #[serde(rename = "all")]
    AllMatches,
    /// Remove only the first row sharing the pair
    #[serde(rename = "first")]
    FirstMatch,
}

impl fmt::Display for DeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletePolicy::AllMatches => f.write_str("all"),
            DeletePolicy::FirstMatch => f.write_str("first"),
        }
    }
}

impl std::str::FromStr for DeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(DeletePolicy::AllMatches),
            "first" => Ok(DeletePolicy::FirstMatch),
            other => Err(format!(
                "Invalid delete policy: {} (expected all or first)",
                other
            )),
        }
    }
}

/// Identifies a subscription so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Called after every state-changing dispatch with the change and the new list.
pub type Listener = Box<dyn FnMut(&StoreChange, &[OrderRecord])>;

/// Abstract interface for the order list.
///
/// Implementations own the list; the only way to change it is `dispatch`.
pub trait OrderStore {
    /// The current list, most recent first
    fn orders(&self) -> &[OrderRecord];

    /// Apply an action and notify subscribers if anything changed
    fn dispatch(&mut self, action: OrderAction) -> Result<StoreChange>;

    /// Register a listener for state changes
    fn subscribe(&mut self, listener: Listener) -> SubscriptionId;

    /// Remove a listener. Returns false if it was not registered.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    /// How deletes treat duplicated identity pairs
    fn delete_policy(&self) -> DeletePolicy;

    fn set_delete_policy(&mut self, policy: DeletePolicy);

    /// First order matching the identity pair
    fn find(&self, key: &OrderKey) -> Option<&OrderRecord> {
        self.orders().iter().find(|o| o.matches_key(key))
    }
}
