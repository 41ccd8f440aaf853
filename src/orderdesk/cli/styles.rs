use console::Style;
use once_cell::sync::Lazy;
use orderdesk::model::OrderStatus;

pub static HEADER: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().color256(246));
pub static SELECTED: Lazy<Style> = Lazy::new(|| Style::new().cyan());
pub static CURRENT_PAGE: Lazy<Style> = Lazy::new(|| Style::new().bold().reverse());
pub static FIELD_ERROR: Lazy<Style> = Lazy::new(|| Style::new().red());

static STATUS_IN_PROGRESS: Lazy<Style> = Lazy::new(|| Style::new().color256(105));
static STATUS_COMPLETE: Lazy<Style> = Lazy::new(|| Style::new().green());
static STATUS_PENDING: Lazy<Style> = Lazy::new(|| Style::new().blue());
static STATUS_APPROVED: Lazy<Style> = Lazy::new(|| Style::new().yellow());
static STATUS_REJECTED: Lazy<Style> = Lazy::new(|| Style::new().color256(246));

pub fn status_style(status: OrderStatus) -> &'static Style {
    match status {
        OrderStatus::InProgress => &*STATUS_IN_PROGRESS,
        OrderStatus::Complete => &*STATUS_COMPLETE,
        OrderStatus::Pending => &*STATUS_PENDING,
        OrderStatus::Approved => &*STATUS_APPROVED,
        OrderStatus::Rejected => &*STATUS_REJECTED,
    }
}
