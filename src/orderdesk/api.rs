//! # API Facade
//!
//! The single entry point for UI clients. [`OrderDesk`] owns the store plus the session
//! state a dashboard screen carries around: the search query, the current page, the
//! selection and the add/edit form.
//!
//! ## Role and Responsibilities
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (row numbers on the current page become [`OrderKey`]s)
//! - **Keeps session state consistent** (query changes reset the page, deletes prune
//!   the selection)
//! - **Returns structured types** (`Result<CmdResult>`, [`OrderView`])
//!
//! It does no I/O and formats nothing.
//!
//! ## Generic Over OrderStore
//!
//! `OrderDesk<S: OrderStore>` works with any backend. The binary and the tests both use
//! [`crate::store::memory::InMemoryStore`].
//!
//! ## Re-rendering
//!
//! [`OrderDesk::subscribe`] forwards to the store. A listener only learns that the list
//! changed; the UI then asks for a fresh [`OrderDesk::view`].

use crate::commands::{self, delete::Confirm, CmdResult};
use crate::config::OrderDeskConfig;
use crate::error::{OrderDeskError, Result};
use crate::form::{DraftField, FormController, FormState};
use crate::model::{generate_order_id, OrderKey, OrderRecord};
use crate::selection::Selection;
use crate::store::{Listener, OrderStore, SubscriptionId};
use crate::view::{clamp_page, OrderView};
use chrono::Utc;

pub struct OrderDesk<S: OrderStore> {
    store: S,
    config: OrderDeskConfig,
    query: String,
    page: usize,
    selection: Selection,
    form: FormController,
}

impl<S: OrderStore> OrderDesk<S> {
    /// Builds a desk over `store`. The config's delete policy replaces the store's.
    pub fn new(mut store: S, config: OrderDeskConfig) -> Self {
        store.set_delete_policy(config.delete_policy);
        Self {
            store,
            config,
            query: String::new(),
            page: 1,
            selection: Selection::new(),
            form: FormController::new(),
        }
    }

    pub fn orders(&self) -> &[OrderRecord] {
        self.store.orders()
    }

    pub fn config(&self) -> &OrderDeskConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Search & pagination ---

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// The current page of the filtered list.
    pub fn view(&self) -> OrderView {
        commands::search::build_view(
            self.store.orders(),
            &self.query,
            self.page,
            self.config.page_size,
            &self.selection,
        )
    }

    pub fn list(&self) -> Result<CmdResult> {
        commands::search::run(
            &self.store,
            &self.query,
            self.page,
            self.config.page_size,
            &self.selection,
        )
    }

    /// Sets the search query and goes back to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// Moves to `page`, clamped into the available range. Returns the page now shown.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.page = clamp_page(page, self.view().total_pages);
        self.page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> usize {
        self.go_to_page(self.page.saturating_sub(1))
    }

    // --- Selection ---

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Resolves a 1-based row number on the current page.
    pub fn row_key(&self, row: usize) -> Result<OrderKey> {
        self.view()
            .row(row)
            .map(|r| r.record.key())
            .ok_or_else(|| OrderDeskError::Api(format!("No order at row {}", row)))
    }

    /// Returns true if the key is now selected.
    pub fn toggle_selection(&mut self, key: OrderKey) -> bool {
        self.selection.toggle(key)
    }

    /// Header checkbox: select the current page, or clear everything if it already is.
    pub fn select_all_on_page(&mut self) -> bool {
        let page_keys = self.view().page_keys();
        self.selection.select_all(&page_keys)
    }

    // --- Form ---

    pub fn form(&self) -> &FormState {
        self.form.state()
    }

    /// Opens a blank draft with a generated id.
    pub fn open_for_add(&mut self) {
        self.form
            .open_for_add(generate_order_id(&self.config.id_prefix));
    }

    pub fn open_for_edit(&mut self, key: &OrderKey) -> Result<()> {
        let record = self
            .store
            .find(key)
            .ok_or_else(|| OrderDeskError::OrderNotFound(key.clone()))?;
        self.form.open_for_edit(record);
        Ok(())
    }

    pub fn update_field(&mut self, field: DraftField, value: impl Into<String>) -> Result<()> {
        self.form.update_field(field, value)
    }

    pub fn submit(&mut self) -> Result<CmdResult> {
        commands::submit::run(&mut self.store, &mut self.form, Utc::now())
    }

    /// Discards the draft. Returns true if a form was open.
    pub fn cancel(&mut self) -> bool {
        self.form.cancel()
    }

    // --- Store mutations ---

    pub fn request_delete<C: Confirm + ?Sized>(
        &mut self,
        key: &OrderKey,
        confirm: &mut C,
    ) -> Result<CmdResult> {
        let result = commands::delete::run(&mut self.store, key, confirm)?;
        if self.config.prune_selection && !result.affected_orders.is_empty() {
            self.selection.retain_present(self.store.orders());
        }
        Ok(result)
    }

    /// Replaces every order (bulk load).
    pub fn load(&mut self, records: Vec<OrderRecord>) -> Result<CmdResult> {
        let result = commands::load::run(&mut self.store, records)?;
        if self.config.prune_selection {
            self.selection.retain_present(self.store.orders());
        }
        Ok(result)
    }

    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }
}
