use super::{DeletePolicy, OrderAction, StoreChange};
use crate::model::OrderRecord;

/// Computes the list that results from applying `action` to `orders`.
///
/// Pure: the input slice is left untouched and a new list is returned along with a
/// description of the change.
pub fn reduce(
    orders: &[OrderRecord],
    action: OrderAction,
    policy: DeletePolicy,
) -> (Vec<OrderRecord>, StoreChange) {
    match action {
        OrderAction::Add(record) => {
            let key = record.key();
            let mut next = Vec::with_capacity(orders.len() + 1);
            next.push(record);
            next.extend_from_slice(orders);
            (next, StoreChange::Added(key))
        }
        OrderAction::Update { key, record } => {
            let mut next = orders.to_vec();
            let matched = match next.iter().position(|o| o.matches_key(&key)) {
                Some(pos) => {
                    let date = next[pos].date;
                    next[pos] = OrderRecord { date, ..record };
                    true
                }
                None => false,
            };
            (next, StoreChange::Updated { key, matched })
        }
        OrderAction::Delete { key } => {
            let next: Vec<OrderRecord> = match policy {
                DeletePolicy::AllMatches => orders
                    .iter()
                    .filter(|o| !o.matches_key(&key))
                    .cloned()
                    .collect(),
                DeletePolicy::FirstMatch => {
                    let mut next = orders.to_vec();
                    if let Some(pos) = next.iter().position(|o| o.matches_key(&key)) {
                        next.remove(pos);
                    }
                    next
                }
            };
            let removed = orders.len() - next.len();
            (next, StoreChange::Deleted { key, removed })
        }
        OrderAction::ReplaceAll(records) => {
            let count = records.len();
            (records, StoreChange::Replaced { count })
        }
    }
}
