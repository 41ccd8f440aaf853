//! # Form Controller
//!
//! The add/edit form is a small state machine:
//!
//! ```text
//!            open_for_add()              submit() ok / cancel()
//!   Closed ─────────────────▶ Adding ──────────────────────────▶ Closed
//!      │
//!      │     open_for_edit(record)       submit() ok / cancel()
//!      └────────────────────▶ Editing ─────────────────────────▶ Closed
//! ```
//!
//! A failed `submit()` keeps the form open with its [`FieldErrors`] populated.
//!
//! The draft ([`DraftForm`]) only exists while the form is open. It is a flat bag of raw
//! strings: nothing is validated while the user types, only when they submit
//! (see [`crate::validation`]). Submission itself lives in [`crate::commands::submit`],
//! since it needs the store.

use crate::error::{OrderDeskError, Result};
use crate::model::{OrderRecord, OrderStatus};
use crate::validation::FieldErrors;
use std::fmt;
use std::str::FromStr;

/// Editable fields of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DraftField {
    Id,
    UserName,
    UserAvatar,
    Project,
    Address,
    Status,
}

impl DraftField {
    pub fn all() -> &'static [DraftField] {
        &[
            DraftField::Id,
            DraftField::UserName,
            DraftField::UserAvatar,
            DraftField::Project,
            DraftField::Address,
            DraftField::Status,
        ]
    }

    /// Name used on the command line (`set user-name Ann Lee`)
    pub fn name(&self) -> &'static str {
        match self {
            DraftField::Id => "id",
            DraftField::UserName => "user-name",
            DraftField::UserAvatar => "user-avatar",
            DraftField::Project => "project",
            DraftField::Address => "address",
            DraftField::Status => "status",
        }
    }

    /// Human label, also the subject of validation messages
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Id => "Order ID",
            DraftField::UserName => "User name",
            DraftField::UserAvatar => "User avatar",
            DraftField::Project => "Project name",
            DraftField::Address => "Address",
            DraftField::Status => "Status",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect();

        match normalized.as_str() {
            "id" => Ok(DraftField::Id),
            "username" | "user" | "name" => Ok(DraftField::UserName),
            "useravatar" | "avatar" => Ok(DraftField::UserAvatar),
            "project" => Ok(DraftField::Project),
            "address" => Ok(DraftField::Address),
            "status" => Ok(DraftField::Status),
            _ => Err(format!("Unknown field: {}", s)),
        }
    }
}

/// Unsaved form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftForm {
    pub id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub project: String,
    pub address: String,
    pub status: OrderStatus,
}

impl DraftForm {
    /// A blank draft carrying a pre-filled id.
    pub fn blank(id: String) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn from_record(record: &OrderRecord) -> Self {
        Self {
            id: record.id.clone(),
            user_name: record.user.name.clone(),
            user_avatar: record.user.avatar.clone(),
            project: record.project.clone(),
            address: record.address.clone(),
            status: record.status,
        }
    }

    pub fn get(&self, field: DraftField) -> String {
        match field {
            DraftField::Id => self.id.clone(),
            DraftField::UserName => self.user_name.clone(),
            DraftField::UserAvatar => self.user_avatar.clone(),
            DraftField::Project => self.project.clone(),
            DraftField::Address => self.address.clone(),
            DraftField::Status => self.status.to_string(),
        }
    }

    /// Sets a field from raw input. Only `status` can fail to parse; on failure the
    /// draft is left as it was.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        match field {
            DraftField::Id => self.id = value,
            DraftField::UserName => self.user_name = value,
            DraftField::UserAvatar => self.user_avatar = value,
            DraftField::Project => self.project = value,
            DraftField::Address => self.address = value,
            DraftField::Status => {
                self.status = value.parse().map_err(OrderDeskError::Form)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Closed,
    Adding {
        draft: DraftForm,
        errors: FieldErrors,
    },
    Editing {
        /// The record as it was when the form opened; its key drives the update
        original: OrderRecord,
        draft: DraftForm,
        errors: FieldErrors,
    },
}

impl FormState {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormState::Closed)
    }

    pub fn title(&self) -> Option<&'static str> {
        match self {
            FormState::Closed => None,
            FormState::Adding { .. } => Some("Add New Order"),
            FormState::Editing { .. } => Some("Edit Order"),
        }
    }

    pub fn draft(&self) -> Option<&DraftForm> {
        match self {
            FormState::Closed => None,
            FormState::Adding { draft, .. } | FormState::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            FormState::Closed => None,
            FormState::Adding { errors, .. } | FormState::Editing { errors, .. } => Some(errors),
        }
    }
}

/// Owns the form state; all transitions go through here.
#[derive(Debug, Default)]
pub struct FormController {
    state: FormState,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Opens a blank draft. Any open draft is discarded.
    pub fn open_for_add(&mut self, id: String) {
        self.state = FormState::Adding {
            draft: DraftForm::blank(id),
            errors: FieldErrors::default(),
        };
    }

    /// Opens a draft populated from `record`. Any open draft is discarded.
    pub fn open_for_edit(&mut self, record: &OrderRecord) {
        self.state = FormState::Editing {
            original: record.clone(),
            draft: DraftForm::from_record(record),
            errors: FieldErrors::default(),
        };
    }

    pub fn update_field(&mut self, field: DraftField, value: impl Into<String>) -> Result<()> {
        match &mut self.state {
            FormState::Closed => Err(OrderDeskError::Form(
                "No form is open (use add or edit first)".to_string(),
            )),
            FormState::Adding { draft, .. } | FormState::Editing { draft, .. } => {
                draft.set(field, value)
            }
        }
    }

    /// Stores the outcome of a failed validation; the form stays open.
    pub fn set_errors(&mut self, new_errors: FieldErrors) {
        match &mut self.state {
            FormState::Closed => {}
            FormState::Adding { errors, .. } | FormState::Editing { errors, .. } => {
                *errors = new_errors;
            }
        }
    }

    /// Closes the form, returning what was open.
    pub fn close(&mut self) -> FormState {
        std::mem::take(&mut self.state)
    }

    /// Discards the draft. Returns true if a form was open.
    pub fn cancel(&mut self) -> bool {
        self.close().is_open()
    }
}
