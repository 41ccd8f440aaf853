//! # Orderdesk Architecture
//!
//! Orderdesk is the **orders-list controller** of an admin dashboard, packaged as a
//! UI-agnostic library: record store, validator, search and pagination, selection and
//! the add/edit form. The bundled terminal client is one way to drive it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments and shell lines, renders the table      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - OrderDesk: store + query + page + selection + form       │
//! │  - Normalizes inputs (row numbers → OrderKeys)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - search, submit, delete, load                             │
//! │  - Returns CmdResult with leveled messages                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Pure reducer + OrderStore trait with subscriptions       │
//! │  - InMemoryStore                                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//!
//! Order ids are not unique. Everything that points at an order uses the
//! `(id, user name)` pair, see [`model::OrderKey`].
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never prints and never exits. Notifications ("Order created
//! successfully!") come back as [`commands::CmdMessage`]s, and the one blocking
//! interaction, delete confirmation, is a [`commands::delete::Confirm`] the caller
//! supplies.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for all operations
//! - [`commands`]: Business logic per operation
//! - [`store`]: Reducer, store trait and the in-memory implementation
//! - [`model`]: `OrderRecord`, `OrderStatus`, `OrderKey`
//! - [`validation`]: Draft validation rules
//! - [`form`]: Form state machine and draft
//! - [`selection`]: Checked rows
//! - [`view`]: Derived page view and page-window arithmetic
//! - [`seed`]: Built-in dataset and seed-file loading
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing, the interactive shell and table rendering for the binary
//!   (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod seed;
pub mod selection;
pub mod store;
pub mod validation;
pub mod view;
