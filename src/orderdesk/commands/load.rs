use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::OrderRecord;
use crate::store::{OrderAction, OrderStore};

/// Replaces the whole list, e.g. from a seed file.
pub fn run<S: OrderStore>(store: &mut S, records: Vec<OrderRecord>) -> Result<CmdResult> {
    let count = records.len();
    store.dispatch(OrderAction::ReplaceAll(records))?;
    tracing::info!(count, "orders loaded");

    Ok(CmdResult::default().with_message(CmdMessage::info(format!("Loaded {} orders", count))))
}
