//! # Rendering Module
//!
//! Turns library output into terminal text. Every `render_*` function returns a `String`
//! so it can be tested without a terminal; the `print_*` wrappers write it out.
//!
//! Layout (column widths, truncation, padding) is computed on display width, not byte
//! or char length, so names like "José María" or addresses in CJK line up.

use super::styles::{status_style, CURRENT_PAGE, FIELD_ERROR, HEADER, MUTED, SELECTED};
use chrono::{DateTime, Utc};
use colored::Colorize;
use orderdesk::commands::{CmdMessage, MessageLevel};
use orderdesk::config::OrderDeskConfig;
use orderdesk::form::{DraftField, FormState};
use orderdesk::model::OrderKey;
use orderdesk::view::{DisplayOrder, OrderView, Pagination};
use unicode_width::UnicodeWidthStr;

const ROW_WIDTH: usize = 3;
const CHECK_WIDTH: usize = 3;
const ID_WIDTH: usize = 10;
const USER_WIDTH: usize = 20;
const PROJECT_WIDTH: usize = 18;
const ADDRESS_WIDTH: usize = 22;
const DATE_WIDTH: usize = 14;

/// Renders command messages, one per line, colored by level.
pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            let line = match message.level {
                MessageLevel::Info => message.content.dimmed(),
                MessageLevel::Success => message.content.green(),
                MessageLevel::Warning => message.content.yellow(),
                MessageLevel::Error => message.content.red(),
            };
            format!("{}\n", line)
        })
        .collect()
}

pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}

/// Renders the current page as a table with its pagination footer.
pub fn render_view(view: &OrderView, query: &str, now: DateTime<Utc>) -> String {
    if view.rows.is_empty() {
        return if query.is_empty() {
            "No orders found.\n".to_string()
        } else {
            format!("No orders match \"{}\".\n", query)
        };
    }

    let mut output = String::new();
    let check_header = if view.all_selected() { "[x]" } else { "[ ]" };
    let header = format!(
        "{} {} {} {} {} {} {} {}",
        pad(" ", ROW_WIDTH),
        pad(check_header, CHECK_WIDTH),
        pad("Order ID", ID_WIDTH),
        pad("User", USER_WIDTH),
        pad("Project", PROJECT_WIDTH),
        pad("Address", ADDRESS_WIDTH),
        pad("Date", DATE_WIDTH),
        "Status"
    );
    output.push_str(&format!("{}\n", HEADER.apply_to(header.trim_end())));

    for row in &view.rows {
        output.push_str(&render_row(row, now));
        output.push('\n');
    }

    if let Some(pagination) = &view.pagination {
        output.push('\n');
        output.push_str(&render_pagination(pagination));
    }

    output
}

fn render_row(row: &DisplayOrder, now: DateTime<Utc>) -> String {
    let record = &row.record;
    let check = if row.selected { "[x]" } else { "[ ]" };
    let user = format!("{} {}", record.user.avatar, record.user.name);
    let line = format!(
        "{} {} {} {} {} {} {} ",
        pad(&format!("{:>2}.", row.row), ROW_WIDTH),
        pad(check, CHECK_WIDTH),
        pad(&record.id, ID_WIDTH),
        pad(&user, USER_WIDTH),
        pad(&record.project, PROJECT_WIDTH),
        pad(&record.address, ADDRESS_WIDTH),
        MUTED.apply_to(pad(&format_relative_date(record.date, now), DATE_WIDTH)),
    );
    let status = status_style(record.status).apply_to(record.status.label());

    if row.selected {
        format!("{}{}", SELECTED.apply_to(line), status)
    } else {
        format!("{}{}", line, status)
    }
}

/// "Showing 11 to 20 of 23 results" plus the page buttons, current page highlighted.
pub fn render_pagination(pagination: &Pagination) -> String {
    let prev = if pagination.has_prev() {
        "‹ Prev".to_string()
    } else {
        MUTED.apply_to("‹ Prev").to_string()
    };
    let next = if pagination.has_next() {
        "Next ›".to_string()
    } else {
        MUTED.apply_to("Next ›").to_string()
    };

    let pages: Vec<String> = pagination
        .visible_pages
        .iter()
        .map(|page| {
            if *page == pagination.current {
                CURRENT_PAGE.apply_to(format!("[{}]", page)).to_string()
            } else {
                format!(" {} ", page)
            }
        })
        .collect();

    format!(
        "{}\n{}  {}  {}\n",
        MUTED.apply_to(pagination.summary()),
        prev,
        pages.join(""),
        next
    )
}

/// Renders the open form with any validation errors under their fields.
pub fn render_form(state: &FormState) -> String {
    let (Some(title), Some(draft), Some(errors)) = (state.title(), state.draft(), state.errors())
    else {
        return "No form is open.\n".to_string();
    };

    let mut output = format!("{}\n", HEADER.apply_to(title));
    for field in DraftField::all() {
        let value = draft.get(*field);
        output.push_str(&format!("  {:<13} {}\n", format!("{}:", field.name()), value));
        if let Some(error) = errors.get(*field) {
            output.push_str(&format!("  {:<13} {}\n", "", FIELD_ERROR.apply_to(error)));
        }
    }
    output
}

pub fn render_selection<'a>(keys: impl Iterator<Item = &'a OrderKey>) -> String {
    let lines: Vec<String> = keys.map(|k| format!("  {}\n", k)).collect();
    if lines.is_empty() {
        return "No orders selected.\n".to_string();
    }
    format!("{} selected:\n{}", lines.len(), lines.concat())
}

pub fn render_config(config: &OrderDeskConfig) -> String {
    orderdesk::config::CONFIG_KEYS
        .iter()
        .filter_map(|key| config.get(key).map(|value| format!("{} = {}\n", key, value)))
        .collect()
}

/// Dashboard-style relative date.
///
/// "Just now", "N minute(s) ago", "N hour(s) ago", "Yesterday", "N days ago", then the
/// calendar date ("Feb 2, 2023") from 30 days on.
pub fn format_relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(date);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{} minute{} ago", minutes, if minutes > 1 { "s" } else { "" })
    } else if hours < 24 {
        format!("{} hour{} ago", hours, if hours > 1 { "s" } else { "" })
    } else if days == 1 {
        "Yesterday".to_string()
    } else if days < 30 {
        format!("{} days ago", days)
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

/// Pads (or truncates with an ellipsis) to exactly `width` display columns.
fn pad(s: &str, width: usize) -> String {
    let truncated = if s.width() > width {
        truncate_to_width(s, width)
    } else {
        s.to_string()
    };
    let padding = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
