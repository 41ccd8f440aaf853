//! Starting data.
//!
//! The built-in set is five orders, each listed twice. The duplicates are deliberate:
//! they share the full identity pair, which is what exercises the delete-all-matches
//! behaviour of the store.

use crate::error::Result;
use crate::model::{OrderRecord, OrderStatus};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::fs;
use std::path::Path;

/// The built-in ten-row dataset, with dates relative to `now`.
pub fn default_orders(now: DateTime<Utc>) -> Vec<OrderRecord> {
    let fixed = Utc
        .with_ymd_and_hms(2023, 2, 2, 0, 0, 0)
        .single()
        .unwrap_or(now);

    let base = vec![
        OrderRecord::new("CM9801", "Natali Craig", "Landing Page", "Meadow Lane Oakland")
            .with_date(now)
            .with_status(OrderStatus::InProgress),
        OrderRecord::new("CM9802", "Kate Morrison", "CRM Admin pages", "Larry San Francisco")
            .with_date(now - Duration::minutes(1))
            .with_status(OrderStatus::Complete),
        OrderRecord::new("CM9803", "Drew Cano", "Client Project", "Bagwell Avenue Ocata")
            .with_date(now - Duration::hours(1))
            .with_status(OrderStatus::Pending),
        OrderRecord::new("CM9804", "Orlando Diggs", "Admin Dashboard", "Washburn Baton Rouge")
            .with_date(now - Duration::days(1))
            .with_status(OrderStatus::Approved),
        OrderRecord::new("CM9805", "Andi Lane", "App Landing Page", "Nest Lane Olivette")
            .with_date(fixed)
            .with_status(OrderStatus::Rejected),
    ];

    base.iter().chain(base.iter()).cloned().collect()
}

/// Reads a JSON array of orders.
pub fn load_seed_file<P: AsRef<Path>>(path: P) -> Result<Vec<OrderRecord>> {
    let content = fs::read_to_string(path.as_ref())?;
    let records: Vec<OrderRecord> = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.as_ref().display(), count = records.len(), "seed file read");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderKey;
    use std::io::Write;

    #[test]
    fn default_set_has_ten_rows_with_duplicated_pairs() {
        let orders = default_orders(Utc::now());
        assert_eq!(orders.len(), 10);
        assert_eq!(orders[0], orders[5]);

        let key = OrderKey::new("CM9801", "Natali Craig");
        assert_eq!(orders.iter().filter(|o| o.matches_key(&key)).count(), 2);
    }

    #[test]
    fn default_set_dates_are_relative_to_now() {
        let now = Utc::now();
        let orders = default_orders(now);
        assert_eq!(orders[0].date, now);
        assert_eq!(orders[1].date, now - Duration::minutes(1));
        assert_eq!(orders[4].date.format("%Y-%m-%d").to_string(), "2023-02-02");
        assert_eq!(orders[3].user.avatar, "OD");
    }

    #[test]
    fn loads_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"CM1","user":{{"name":"Ann Lee","avatar":"AL"}},"project":"X","address":"123 Road","date":"2024-01-01T00:00:00Z","status":"Approved"}}]"#
        )
        .unwrap();

        let records = load_seed_file(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, OrderStatus::Approved);
    }

    #[test]
    fn rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(load_seed_file(file.path()).is_err());
        assert!(load_seed_file("/nonexistent/orders.json").is_err());
    }
}
