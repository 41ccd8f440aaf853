use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::OrderRecord;
use crate::selection::Selection;
use crate::store::OrderStore;
use crate::view::{paginate, OrderView};

/// Case-insensitive substring match against id, user name, project and address.
///
/// An empty query matches everything.
pub fn matches_query(record: &OrderRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    [
        record.id.as_str(),
        record.user.name.as_str(),
        record.project.as_str(),
        record.address.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Matching records, in store order.
pub fn filter_orders(orders: &[OrderRecord], query: &str) -> Vec<OrderRecord> {
    orders
        .iter()
        .filter(|o| matches_query(o, query))
        .cloned()
        .collect()
}

/// Builds the derived view for `query` at `page`.
pub fn build_view(
    orders: &[OrderRecord],
    query: &str,
    page: usize,
    page_size: usize,
    selection: &Selection,
) -> OrderView {
    let filtered = filter_orders(orders, query);
    paginate(filtered, orders.len(), page, page_size, |record| {
        selection.contains(&record.key())
    })
}

pub fn run<S: OrderStore>(
    store: &S,
    query: &str,
    page: usize,
    page_size: usize,
    selection: &Selection,
) -> Result<CmdResult> {
    let view = build_view(store.orders(), query, page, page_size, selection);
    Ok(CmdResult::default().with_view(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn store_with(records: Vec<OrderRecord>) -> InMemoryStore {
        InMemoryStore::with_orders(records)
    }

    #[test]
    fn query_matching_nothing_yields_empty_view() {
        let store = StoreFixture::new().with_orders(15).store;
        let result = run(&store, "NonExistentQuery12345", 1, 10, &Selection::new()).unwrap();
        let view = result.view.unwrap();
        assert!(view.rows.is_empty());
        assert_eq!(view.total_pages, 0);
        assert!(view.pagination.is_none());
    }

    #[test]
    fn every_row_contains_the_query() {
        let store = store_with(vec![
            OrderRecord::new("#CM1", "Natali Craig", "Landing Page", "Meadow Lane Oakland"),
            OrderRecord::new("#CM2", "Kate Morrison", "CRM Admin pages", "Larry San Francisco"),
            OrderRecord::new("#CM3", "Drew Cano", "Client Project", "Bagwell Avenue Ocata"),
        ]);
        let view = build_view(store.orders(), "la", 1, 10, &Selection::new());

        assert!(view.filtered_count <= view.total_count);
        for row in &view.rows {
            let r = &row.record;
            assert!(
                matches_query(r, "la"),
                "row {} does not contain the query",
                r.id
            );
        }
        assert_eq!(view.filtered_count, 2);
    }

    #[test]
    fn matching_is_case_insensitive_on_each_field() {
        let record = OrderRecord::new("#CM9801", "Natali Craig", "Landing Page", "Meadow Lane");
        assert!(matches_query(&record, "cm98"));
        assert!(matches_query(&record, "NATALI"));
        assert!(matches_query(&record, "landing"));
        assert!(matches_query(&record, "meadow"));
        assert!(!matches_query(&record, "pending"));
        assert!(matches_query(&record, ""));
    }

    #[test]
    fn filtering_preserves_store_order() {
        let store = StoreFixture::new().with_orders(30).store;
        let view = build_view(store.orders(), "User 1", 1, 10, &Selection::new());
        let ids: Vec<&str> = view.rows.iter().map(|r| r.record.id.as_str()).collect();
        // User 1, then User 10..User 19
        assert_eq!(ids[0], "#CM1001");
        assert_eq!(ids[1], "#CM1010");
        assert_eq!(view.filtered_count, 11);
        assert_eq!(view.total_pages, 2);
    }

    #[test]
    fn selected_rows_are_flagged() {
        let store = StoreFixture::new().with_orders(3).store;
        let mut selection = Selection::new();
        selection.toggle(store.orders()[1].key());

        let view = build_view(store.orders(), "", 1, 10, &selection);
        assert!(!view.rows[0].selected);
        assert!(view.rows[1].selected);
    }
}
