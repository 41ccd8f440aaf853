//! Interactive session.
//!
//! Each stdin line is parsed as a [`ShellCommand`] and mapped to one facade call. The
//! table is reprinted whenever the store reports a change, through a store subscription,
//! and after commands that move the view (search, paging, selection).
//!
//! `delete` reads its y/N answer from the next input line, so scripted sessions can
//! answer prompts too.

use super::render::{print_messages, render_form, render_selection, render_view};
use super::setup::{shell_help, ShellCommand, ShellLine};
use chrono::Utc;
use orderdesk::api::OrderDesk;
use orderdesk::commands::CmdMessage;
use orderdesk::error::{OrderDeskError, Result};
use orderdesk::form::DraftField;
use orderdesk::model::OrderRecord;
use orderdesk::store::{OrderStore, StoreChange};
use std::cell::Cell;
use std::io::{self, BufRead, IsTerminal, Write};
use std::rc::Rc;

const PROMPT: &str = "orderdesk> ";

pub fn run<S: OrderStore, R: BufRead>(desk: &mut OrderDesk<S>, input: R) -> Result<()> {
    let interactive = io::stdin().is_terminal();

    let dirty = Rc::new(Cell::new(false));
    let flag = Rc::clone(&dirty);
    let subscription = desk.subscribe(Box::new(move |_: &StoreChange, _: &[OrderRecord]| {
        flag.set(true)
    }));

    print_view(desk);
    if interactive {
        println!("Type 'help' for commands.");
    }

    let mut lines = input.lines();
    loop {
        if interactive {
            print!("{}", PROMPT);
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match ShellLine::parse_line(line) {
            Ok(command) => command,
            Err(e) => {
                let rendered = e.to_string();
                eprintln!("{}", rendered.lines().next().unwrap_or("invalid command"));
                continue;
            }
        };

        if command == ShellCommand::Quit {
            break;
        }

        if let Err(e) = execute(desk, command, &mut lines, interactive) {
            eprintln!("Error: {}", e);
        }

        if dirty.replace(false) {
            print_view(desk);
        }
    }

    desk.unsubscribe(subscription);
    Ok(())
}

fn execute<S, I>(
    desk: &mut OrderDesk<S>,
    command: ShellCommand,
    lines: &mut I,
    interactive: bool,
) -> Result<()>
where
    S: OrderStore,
    I: Iterator<Item = io::Result<String>>,
{
    match command {
        ShellCommand::List => print_view(desk),
        ShellCommand::Search { query } => {
            desk.set_query(query.unwrap_or_default());
            print_view(desk);
        }
        ShellCommand::Page { number } => {
            desk.go_to_page(number);
            print_view(desk);
        }
        ShellCommand::Next => {
            desk.next_page();
            print_view(desk);
        }
        ShellCommand::Prev => {
            desk.prev_page();
            print_view(desk);
        }
        ShellCommand::Select { row } => {
            let key = desk.row_key(row)?;
            desk.toggle_selection(key);
            print_view(desk);
        }
        ShellCommand::SelectAll => {
            desk.select_all_on_page();
            print_view(desk);
        }
        ShellCommand::Selected => print!("{}", render_selection(desk.selection().iter())),
        ShellCommand::Add => {
            desk.open_for_add();
            print!("{}", render_form(desk.form()));
        }
        ShellCommand::Edit { row } => {
            let key = desk.row_key(row)?;
            desk.open_for_edit(&key)?;
            print!("{}", render_form(desk.form()));
        }
        ShellCommand::Set { field, value } => {
            let field: DraftField = field.parse().map_err(OrderDeskError::Form)?;
            desk.update_field(field, value.unwrap_or_default())?;
        }
        ShellCommand::Draft => print!("{}", render_form(desk.form())),
        ShellCommand::Submit => {
            let result = desk.submit()?;
            print_messages(&result.messages);
            if result.has_errors() {
                print!("{}", render_form(desk.form()));
            }
        }
        ShellCommand::Cancel => {
            let message = if desk.cancel() {
                CmdMessage::info("Form discarded")
            } else {
                CmdMessage::warning("No form is open")
            };
            print_messages(&[message]);
        }
        ShellCommand::Delete { row } => {
            let key = desk.row_key(row)?;
            let mut confirm = |prompt: &str| -> bool {
                print!("{} [y/N] ", prompt);
                let _ = io::stdout().flush();
                let answer = lines.next();
                if !interactive {
                    println!();
                }
                matches!(answer, Some(Ok(text)) if is_yes(&text))
            };
            let result = desk.request_delete(&key, &mut confirm)?;
            print_messages(&result.messages);
        }
        ShellCommand::Help => print!("{}", shell_help()),
        ShellCommand::Quit => {}
    }
    Ok(())
}

fn print_view<S: OrderStore>(desk: &OrderDesk<S>) {
    print!("{}", render_view(&desk.view(), desk.query(), Utc::now()));
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
