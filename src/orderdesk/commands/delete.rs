use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::OrderKey;
use crate::store::{OrderAction, OrderStore, StoreChange};

pub const DELETED_MESSAGE: &str = "Order deleted successfully!";

/// Blocking yes/no prompt shown before a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub fn prompt_for(key: &OrderKey) -> String {
    format!("Are you sure you want to delete order {}?", key.id)
}

/// Deletes the orders matching `key` once the user confirms.
///
/// Declining is not an error: the result is empty and the store is untouched.
pub fn run<S: OrderStore, C: Confirm + ?Sized>(
    store: &mut S,
    key: &OrderKey,
    confirm: &mut C,
) -> Result<CmdResult> {
    if !confirm.confirm(&prompt_for(key)) {
        tracing::debug!(order = %key, "delete declined");
        return Ok(CmdResult::default());
    }

    let removed: Vec<_> = store
        .orders()
        .iter()
        .filter(|o| o.matches_key(key))
        .cloned()
        .collect();

    let change = store.dispatch(OrderAction::Delete { key: key.clone() })?;
    tracing::info!(order = %key, change = %change, "order deleted");

    let mut result = CmdResult::default();
    if let StoreChange::Deleted { removed: count, .. } = change {
        result.affected_orders = removed.into_iter().take(count).collect();
    }
    result.add_message(CmdMessage::success(DELETED_MESSAGE));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::DeletePolicy;

    #[test]
    fn confirmed_delete_removes_exact_pair_and_duplicates() {
        let mut store = StoreFixture::new()
            .with_order("#CM5555", "User A")
            .with_order("#CM5555", "User B")
            .with_order("#CM5555", "User A")
            .store;

        let key = OrderKey::new("#CM5555", "User A");
        let result = run(&mut store, &key, &mut |_: &str| true).unwrap();

        assert_eq!(store.orders().len(), 1);
        assert_eq!(store.orders()[0].user.name, "User B");
        assert_eq!(result.affected_orders.len(), 2);
        assert_eq!(result.messages[0].content, "Order deleted successfully!");
    }

    #[test]
    fn declined_delete_changes_nothing() {
        let mut store = StoreFixture::new().with_orders(3).store;
        let key = store.orders()[0].key();

        let result = run(&mut store, &key, &mut |_: &str| false).unwrap();

        assert_eq!(store.orders().len(), 3);
        assert!(result.messages.is_empty());
        assert!(result.affected_orders.is_empty());
    }

    #[test]
    fn prompt_names_the_order_id() {
        let mut store = StoreFixture::new().with_order("CM9801", "Natali Craig").store;
        let mut asked = Vec::new();
        let key = OrderKey::new("CM9801", "Natali Craig");

        run(&mut store, &key, &mut |prompt: &str| {
            asked.push(prompt.to_string());
            false
        })
        .unwrap();

        assert_eq!(asked, vec!["Are you sure you want to delete order CM9801?"]);
    }

    #[test]
    fn first_match_policy_keeps_the_duplicate() {
        let mut store = StoreFixture::new()
            .with_order("#CM1", "A")
            .with_order("#CM1", "A")
            .with_policy(DeletePolicy::FirstMatch)
            .store;

        let result = run(&mut store, &OrderKey::new("#CM1", "A"), &mut |_: &str| true).unwrap();
        assert_eq!(store.orders().len(), 1);
        assert_eq!(result.affected_orders.len(), 1);
    }
}
