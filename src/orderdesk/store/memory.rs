use super::reducer::reduce;
use super::{DeletePolicy, Listener, OrderAction, OrderStore, StoreChange, SubscriptionId};
use crate::error::Result;
use crate::model::OrderRecord;

/// In-memory order list. Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    orders: Vec<OrderRecord>,
    policy: DeletePolicy,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(orders: Vec<OrderRecord>) -> Self {
        Self {
            orders,
            ..Self::default()
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("orders", &self.orders.len())
            .field("policy", &self.policy)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl OrderStore for InMemoryStore {
    fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    fn dispatch(&mut self, action: OrderAction) -> Result<StoreChange> {
        let kind = action.kind();
        let (next, change) = reduce(&self.orders, action, self.policy);
        tracing::debug!(action = kind, change = %change, "store dispatch");

        if change.is_noop() {
            return Ok(change);
        }

        self.orders = next;
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change, &self.orders);
        }
        Ok(change)
    }

    fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn delete_policy(&self) -> DeletePolicy {
        self.policy
    }

    fn set_delete_policy(&mut self, policy: DeletePolicy) {
        self.policy = policy;
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::OrderStatus;
    use chrono::{Duration, Utc};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Appends `count` distinct orders, `#CM1001`.. with users `User 1`..
        pub fn with_orders(mut self, count: usize) -> Self {
            let base = Utc::now();
            for i in 0..count {
                let record = OrderRecord::new(
                    format!("#CM{}", 1001 + i),
                    format!("User {}", i + 1),
                    format!("Project {}", i + 1),
                    format!("{} Main Street", i + 1),
                )
                .with_date(base - Duration::minutes(i as i64));
                self.store.orders.push(record);
            }
            self
        }

        pub fn with_order(mut self, id: &str, user_name: &str) -> Self {
            self.store
                .orders
                .push(OrderRecord::new(id, user_name, "Test Project", "123 Test Street"));
            self
        }

        pub fn with_status_order(mut self, id: &str, user_name: &str, status: OrderStatus) -> Self {
            self.store.orders.push(
                OrderRecord::new(id, user_name, "Test Project", "123 Test Street")
                    .with_status(status),
            );
            self
        }

        pub fn with_policy(mut self, policy: DeletePolicy) -> Self {
            self.store.policy = policy;
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;
    use crate::model::{OrderKey, OrderStatus};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn dispatch_updates_orders() {
        let mut store = InMemoryStore::new();
        store
            .dispatch(OrderAction::Add(OrderRecord::new(
                "#CM9999",
                "Test User",
                "Test Project",
                "123 Test Street",
            )))
            .unwrap();
        assert_eq!(store.orders().len(), 1);
        assert_eq!(store.orders()[0].user.avatar, "TU");
    }

    #[test]
    fn listeners_see_new_state() {
        let mut store = StoreFixture::new().with_orders(2).store;
        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(Box::new(move |_: &StoreChange, orders: &[OrderRecord]| sink.borrow_mut().push(orders.len())));

        store
            .dispatch(OrderAction::Add(OrderRecord::new("#CM1", "A", "P", "Road 1")))
            .unwrap();
        store
            .dispatch(OrderAction::Delete {
                key: OrderKey::new("#CM1001", "User 1"),
            })
            .unwrap();

        assert_eq!(*seen.borrow(), vec![3, 2]);
    }

    #[test]
    fn noop_dispatch_does_not_notify() {
        let mut store = StoreFixture::new().with_orders(1).store;
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        store.subscribe(Box::new(move |_: &StoreChange, _: &[OrderRecord]| *sink.borrow_mut() += 1));

        let change = store
            .dispatch(OrderAction::Delete {
                key: OrderKey::new("#NOPE", "Nobody"),
            })
            .unwrap();

        assert!(change.is_noop());
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let mut store = InMemoryStore::new();
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&log);
        let second = Rc::clone(&log);
        store.subscribe(Box::new(move |_: &StoreChange, _: &[OrderRecord]| first.borrow_mut().push("first")));
        store.subscribe(Box::new(move |_: &StoreChange, _: &[OrderRecord]| second.borrow_mut().push("second")));

        store.dispatch(OrderAction::ReplaceAll(vec![])).unwrap();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = InMemoryStore::new();
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        let id = store.subscribe(Box::new(move |_: &StoreChange, _: &[OrderRecord]| *sink.borrow_mut() += 1));

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(OrderAction::ReplaceAll(vec![])).unwrap();
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn store_policy_applies_to_deletes() {
        let mut store = StoreFixture::new()
            .with_order("#CM1", "A")
            .with_order("#CM1", "A")
            .with_policy(DeletePolicy::FirstMatch)
            .store;
        store
            .dispatch(OrderAction::Delete {
                key: OrderKey::new("#CM1", "A"),
            })
            .unwrap();
        assert_eq!(store.orders().len(), 1);

        store.set_delete_policy(DeletePolicy::AllMatches);
        assert_eq!(store.delete_policy(), DeletePolicy::AllMatches);
    }

    #[test]
    fn find_uses_identity_pair() {
        let store = StoreFixture::new()
            .with_status_order("#CM1", "A", OrderStatus::Approved)
            .with_status_order("#CM1", "B", OrderStatus::Rejected)
            .store;
        let found = store.find(&OrderKey::new("#CM1", "B")).unwrap();
        assert_eq!(found.status, OrderStatus::Rejected);
        assert!(store.find(&OrderKey::new("#CM1", "C")).is_none());
    }

    #[test]
    fn test_fixtures_coverage() {
        let fixture = StoreFixture::default()
            .with_orders(3)
            .with_order("#CM1", "Dup")
            .with_order("#CM1", "Dup");
        let orders = fixture.store.orders();
        assert_eq!(orders.len(), 5);
        assert_eq!(orders[0].id, "#CM1001");
        assert!(orders[0].date > orders[1].date);
    }
}
