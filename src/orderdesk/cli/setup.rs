use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "orderdesk", bin_name = "orderdesk", version = get_version())]
#[command(about = "Browse, search and edit an orders list from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Load orders from a JSON file instead of the built-in set
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub seed: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one page of orders
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only show orders whose id, user, project or address contain this text
        #[arg(short, long)]
        search: Option<String>,

        /// Page to show (clamped to the available pages)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Interactive session reading commands from stdin (default)
    #[command(display_order = 2)]
    Shell,

    /// Get or set configuration
    #[command(display_order = 3)]
    Config {
        /// Configuration key (page-size, delete-policy, prune-selection, id-prefix)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

/// One line typed into the shell.
#[derive(Parser, Debug)]
#[command(
    name = "orderdesk",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    /// Show the current page
    #[command(alias = "ls")]
    List,

    /// Filter orders by the rest of the line (nothing clears the search)
    Search {
        #[arg(allow_hyphen_values = true)]
        query: Option<String>,
    },

    /// Jump to a page
    Page { number: usize },

    /// Next page
    Next,

    /// Previous page
    Prev,

    /// Toggle the checkbox of a row on the current page
    Select { row: usize },

    /// Toggle the header checkbox for the current page
    SelectAll,

    /// List checked orders
    Selected,

    /// Open a blank order form
    Add,

    /// Open the form for a row on the current page
    Edit { row: usize },

    /// Set a form field (id, user-name, user-avatar, project, address, status)
    Set {
        field: String,
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
    },

    /// Show the open form
    Draft,

    /// Validate and save the open form
    Submit,

    /// Discard the open form
    Cancel,

    /// Delete a row on the current page (asks for confirmation)
    #[command(alias = "rm")]
    Delete { row: usize },

    /// Show available commands
    Help,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

impl ShellLine {
    /// Parses one shell line.
    ///
    /// `search` and `set FIELD` take the remainder of the line as a single value, so
    /// inner whitespace survives. Everything else is split on whitespace.
    pub fn parse_line(line: &str) -> Result<ShellCommand, clap::Error> {
        let (name, rest) = split_word(line);
        let mut args = vec![name];
        match name {
            "search" => args.extend(non_empty(rest)),
            "set" => {
                let (field, value) = split_word(rest);
                args.extend(non_empty(field));
                args.extend(non_empty(value));
            }
            _ => args.extend(rest.split_whitespace()),
        }
        args.retain(|a| !a.is_empty());
        ShellLine::try_parse_from(args).map(|parsed| parsed.command)
    }
}

/// First whitespace-delimited word and the trimmed remainder.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

/// Help text for the shell, built from the command definitions.
pub fn shell_help() -> String {
    use clap::CommandFactory;

    let cmd = ShellLine::command();
    let mut output = String::from("Commands:\n");
    for sc in cmd.get_subcommands() {
        let args: Vec<String> = sc
            .get_positionals()
            .map(|arg| {
                let name = arg.get_id().as_str().to_uppercase();
                if arg.is_required_set() {
                    name
                } else {
                    format!("[{}]", name)
                }
            })
            .collect();
        let usage = if args.is_empty() {
            sc.get_name().to_string()
        } else {
            format!("{} {}", sc.get_name(), args.join(" "))
        };
        let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
        output.push_str(&format!("  {:<22} {}\n", usage, about));
    }
    output
}
