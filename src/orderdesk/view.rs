//! # Derived View
//!
//! The table a UI shows is never stored. It is recomputed from the store's list, the
//! current query and the current page every time something changes:
//!
//! ```text
//! orders ──filter(query)──▶ filtered ──slice(page)──▶ rows (+ pagination)
//! ```
//!
//! Filtering lives in [`crate::commands::search`]; this module holds the output types and
//! the page arithmetic.
//!
//! ## Rows
//!
//! Each [`DisplayOrder`] carries its 1-based position on the current page. Row numbers
//! are what the terminal client uses to address orders (`edit 3`, `delete 3`), so they
//! are only meaningful against the view they came from.
//!
//! ## Page Window
//!
//! At most five page buttons are shown, centred on the current page where possible:
//!
//! ```text
//! total=3,  current=2   →  1 2 3
//! total=10, current=2   →  1 2 3 4 5
//! total=10, current=6   →  4 5 6 7 8
//! total=10, current=9   →  6 7 8 9 10
//! ```

use crate::model::{OrderKey, OrderRecord};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const PAGE_WINDOW: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOrder {
    pub record: OrderRecord,
    /// 1-based position on the current page
    pub row: usize,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current: usize,
    pub total_pages: usize,
    /// 1-based index of the first row on this page, across the filtered list
    pub start_item: usize,
    pub end_item: usize,
    pub total_items: usize,
    pub visible_pages: Vec<usize>,
}

impl Pagination {
    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    /// "Showing 1 to 10 of 23 results"
    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} results",
            self.start_item, self.end_item, self.total_items
        )
    }
}

/// One page of the filtered list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderView {
    pub rows: Vec<DisplayOrder>,
    pub filtered_count: usize,
    pub total_count: usize,
    pub total_pages: usize,
    /// The page actually shown, after clamping
    pub page: usize,
    /// `None` when nothing matches
    pub pagination: Option<Pagination>,
}

impl OrderView {
    pub fn page_keys(&self) -> Vec<OrderKey> {
        self.rows.iter().map(|r| r.record.key()).collect()
    }

    pub fn row(&self, row: usize) -> Option<&DisplayOrder> {
        self.rows.iter().find(|r| r.row == row)
    }

    pub fn all_selected(&self) -> bool {
        !self.rows.is_empty() && self.rows.iter().all(|r| r.selected)
    }
}

/// `ceil(items / page_size)`; zero items means zero pages.
pub fn total_pages(items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    items.div_ceil(page_size)
}

/// Clamps a requested page into `1..=max(total_pages, 1)`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// The page numbers to show as buttons.
pub fn visible_page_window(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages <= PAGE_WINDOW {
        return (1..=total_pages).collect();
    }
    let half = PAGE_WINDOW / 2;
    let start = if current <= half + 1 {
        1
    } else if current >= total_pages - half {
        total_pages - PAGE_WINDOW + 1
    } else {
        current - half
    };
    (start..start + PAGE_WINDOW).collect()
}

/// Slices `filtered` into the requested page and attaches pagination metadata.
pub fn paginate(
    filtered: Vec<OrderRecord>,
    total_count: usize,
    page: usize,
    page_size: usize,
    is_selected: impl Fn(&OrderRecord) -> bool,
) -> OrderView {
    let filtered_count = filtered.len();
    let pages = total_pages(filtered_count, page_size);
    let page = clamp_page(page, pages);

    if pages == 0 {
        return OrderView {
            rows: Vec::new(),
            filtered_count,
            total_count,
            total_pages: 0,
            page,
            pagination: None,
        };
    }

    let offset = (page - 1) * page_size;
    let rows: Vec<DisplayOrder> = filtered
        .into_iter()
        .skip(offset)
        .take(page_size)
        .enumerate()
        .map(|(i, record)| DisplayOrder {
            selected: is_selected(&record),
            record,
            row: i + 1,
        })
        .collect();

    let pagination = Pagination {
        current: page,
        total_pages: pages,
        start_item: offset + 1,
        end_item: (page * page_size).min(filtered_count),
        total_items: filtered_count,
        visible_pages: visible_page_window(page, pages),
    };

    OrderView {
        rows,
        filtered_count,
        total_count,
        total_pages: pages,
        page,
        pagination: Some(pagination),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders(n: usize) -> Vec<OrderRecord> {
        (0..n)
            .map(|i| OrderRecord::new(format!("#CM{}", i), format!("User {}", i), "P", "Road 1"))
            .collect()
    }

    #[test]
    fn window_shows_everything_when_short() {
        assert_eq!(visible_page_window(1, 1), vec![1]);
        assert_eq!(visible_page_window(2, 3), vec![1, 2, 3]);
        assert_eq!(visible_page_window(5, 5), vec![1, 2, 3, 4, 5]);
        assert!(visible_page_window(1, 0).is_empty());
    }

    #[test]
    fn window_pins_to_start() {
        assert_eq!(visible_page_window(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(visible_page_window(3, 10), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn window_pins_to_end() {
        assert_eq!(visible_page_window(8, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(visible_page_window(10, 10), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn window_centres_on_current() {
        assert_eq!(visible_page_window(4, 10), vec![2, 3, 4, 5, 6]);
        assert_eq!(visible_page_window(6, 10), vec![4, 5, 6, 7, 8]);
        assert_eq!(visible_page_window(4, 6), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(23, 10), 3);
    }

    #[test]
    fn paginate_slices_and_numbers_rows() {
        let view = paginate(orders(23), 23, 3, 10, |_| false);
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.rows[0].row, 1);
        assert_eq!(view.rows[0].record.id, "#CM20");

        let pagination = view.pagination.unwrap();
        assert_eq!(pagination.summary(), "Showing 21 to 23 of 23 results");
        assert!(pagination.has_prev());
        assert!(!pagination.has_next());
    }

    #[test]
    fn first_page_disables_prev() {
        let view = paginate(orders(23), 23, 1, 10, |_| false);
        let pagination = view.pagination.unwrap();
        assert_eq!(pagination.summary(), "Showing 1 to 10 of 23 results");
        assert!(!pagination.has_prev());
        assert!(pagination.has_next());
        assert_eq!(pagination.visible_pages, vec![1, 2, 3]);
    }

    #[test]
    fn stale_page_is_clamped() {
        let view = paginate(orders(5), 5, 4, 10, |_| false);
        assert_eq!(view.page, 1);
        assert_eq!(view.rows.len(), 5);
    }

    #[test]
    fn empty_input_has_no_pagination() {
        let view = paginate(Vec::new(), 10, 1, 10, |_| false);
        assert!(view.rows.is_empty());
        assert_eq!(view.total_pages, 0);
        assert!(view.pagination.is_none());
        assert_eq!(view.total_count, 10);
    }

    #[test]
    fn selection_flags_are_carried() {
        let view = paginate(orders(3), 3, 1, 10, |o| o.id == "#CM1");
        assert!(!view.rows[0].selected);
        assert!(view.rows[1].selected);
        assert!(!view.all_selected());
        assert_eq!(view.row(2).unwrap().record.id, "#CM1");
    }
}
