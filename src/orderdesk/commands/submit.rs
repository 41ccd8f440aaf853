use crate::commands::{CmdMessage, CmdResult};
use crate::error::{OrderDeskError, Result};
use crate::form::{DraftForm, FormController, FormState};
use crate::model::{initials, OrderRecord, User};
use crate::store::{OrderAction, OrderStore};
use crate::validation::validate_draft;
use chrono::{DateTime, Utc};

pub const INVALID_FORM_MESSAGE: &str = "Please fix the errors in the form";
pub const CREATED_MESSAGE: &str = "Order created successfully!";
pub const UPDATED_MESSAGE: &str = "Order updated successfully!";

/// Validates the open draft and, if it passes, writes it to the store.
///
/// An invalid draft is not an `Err`: its errors are stored on the form, which stays
/// open, and the result carries an error-level message.
pub fn run<S: OrderStore>(
    store: &mut S,
    form: &mut FormController,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let draft = form
        .state()
        .draft()
        .cloned()
        .ok_or_else(|| OrderDeskError::Form("No form is open".to_string()))?;

    let errors = validate_draft(&draft);
    if !errors.is_valid() {
        tracing::debug!(errors = errors.len(), "draft rejected by validation");
        form.set_errors(errors);
        return Ok(CmdResult::default().with_message(CmdMessage::error(INVALID_FORM_MESSAGE)));
    }

    let (record, action, message) = match form.close() {
        FormState::Adding { .. } => {
            let record = to_record(&draft, now);
            (record.clone(), OrderAction::Add(record), CREATED_MESSAGE)
        }
        FormState::Editing { original, .. } => {
            let record = to_record(&draft, original.date);
            let action = OrderAction::Update {
                key: original.key(),
                record: record.clone(),
            };
            (record, action, UPDATED_MESSAGE)
        }
        FormState::Closed => {
            return Err(OrderDeskError::Form("No form is open".to_string()));
        }
    };

    let change = store.dispatch(action)?;
    tracing::info!(order = %record.key(), change = %change, "order saved");

    Ok(CmdResult::default()
        .with_affected_orders(vec![record])
        .with_message(CmdMessage::success(message)))
}

fn to_record(draft: &DraftForm, date: DateTime<Utc>) -> OrderRecord {
    let avatar = if draft.user_avatar.is_empty() {
        initials(&draft.user_name)
    } else {
        draft.user_avatar.clone()
    };

    OrderRecord {
        id: draft.id.clone(),
        user: User {
            name: draft.user_name.clone(),
            avatar,
        },
        project: draft.project.clone(),
        address: draft.address.clone(),
        date,
        status: draft.status,
    }
}
