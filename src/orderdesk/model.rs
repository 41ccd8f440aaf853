//! # Domain Model: Orders and Their Identity
//!
//! This module defines the core data structures for orderdesk: [`OrderRecord`], [`User`],
//! [`OrderStatus`] and the identity key [`OrderKey`].
//!
//! ## Identity
//!
//! An order's `id` is **not** unique on its own. Seed data and user input may carry the
//! same id for different users, and even the exact same `(id, user.name)` pair more than
//! once. Every lookup, update, delete and selection therefore goes through [`OrderKey`],
//! the `(id, user name)` pair:
//!
//! ```text
//! OrderKey { id: "#CM9801", user_name: "Natali Craig" }  →  "#CM9801-Natali Craig"
//! ```
//!
//! ## Wire Shape
//!
//! Records serialize to the same JSON shape the dashboard dataset uses, so seed files can
//! be loaded as-is:
//!
//! ```json
//! {
//!   "id": "CM9801",
//!   "user": { "name": "Natali Craig", "avatar": "NC" },
//!   "project": "Landing Page",
//!   "address": "Meadow Lane Oakland",
//!   "date": "2025-11-20T10:00:00Z",
//!   "status": "In Progress"
//! }
//! ```
//!
//! ## Key Functions
//!
//! - [`initials`]: Derives an avatar from a user name
//! - [`generate_order_id`]: Produces a fresh `#CM`-style id for new drafts

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum OrderStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Complete,
    Approved,
    Rejected,
}

impl OrderStatus {
    pub fn all() -> &'static [OrderStatus] {
        &[
            OrderStatus::Pending,
            OrderStatus::InProgress,
            OrderStatus::Complete,
            OrderStatus::Approved,
            OrderStatus::Rejected,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::InProgress => "In Progress",
            OrderStatus::Complete => "Complete",
            OrderStatus::Approved => "Approved",
            OrderStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    /// Accepts the display labels case-insensitively, plus the usual spellings of
    /// "In Progress" a terminal user would type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();

        match normalized.as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "inprogress" => Ok(OrderStatus::InProgress),
            "complete" => Ok(OrderStatus::Complete),
            "approved" => Ok(OrderStatus::Approved),
            "rejected" => Ok(OrderStatus::Rejected),
            _ => Err(format!(
                "Invalid status: {} (expected one of: {})",
                s,
                OrderStatus::all()
                    .iter()
                    .map(|st| st.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    /// Short initials shown in the avatar bubble
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub user: User,
    pub project: String,
    pub address: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub status: OrderStatus,
}

impl OrderRecord {
    pub fn new(
        id: impl Into<String>,
        user_name: impl Into<String>,
        project: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        let name = user_name.into();
        Self {
            id: id.into(),
            user: User {
                avatar: initials(&name),
                name,
            },
            project: project.into(),
            address: address.into(),
            date: Utc::now(),
            status: OrderStatus::Pending,
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn key(&self) -> OrderKey {
        OrderKey::new(self.id.clone(), self.user.name.clone())
    }

    pub fn matches_key(&self, key: &OrderKey) -> bool {
        self.id == key.id && self.user.name == key.user_name
    }
}

/// The identity pair of an order: `(id, user name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderKey {
    pub id: String,
    pub user_name: String,
}

impl OrderKey {
    pub fn new(id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_name: user_name.into(),
        }
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.id, self.user_name)
    }
}

/// First character of every space-separated token, concatenated.
///
/// Empty tokens (from repeated spaces) contribute nothing; case is left as typed.
pub fn initials(name: &str) -> String {
    name.split(' ').filter_map(|token| token.chars().next()).collect()
}

/// A fresh order id: `prefix` followed by a random four-digit number.
///
/// Collisions with existing orders are not checked; identity is the `(id, user)` pair.
pub fn generate_order_id(prefix: &str) -> String {
    let number: u32 = rand::thread_rng().gen_range(1000..10000);
    format!("{}{}", prefix, number)
}
