//! Help and error rendering for a command node.
//!
//! Layout:
//!
//! ```text
//! <description>
//!
//! Usage:
//!     tool remote [OPTIONS] COMMAND
//!
//! Options:
//!     -f, --force           Overwrite existing entries
//!         --name <value>    Remote name
//!
//! Commands:
//!     add       Add a remote
//!     remove    Remove a remote
//! ```

use crate::error::ErrorKind;
use crate::scope::CommandPath;
use crate::tree::CommandSpec;

const INDENT: &str = "    ";
const GUTTER: &str = "    ";
const ERROR_COLOR: &str = "\u{1b}[38;5;203m";
const RESET: &str = "\u{1b}[0m";
const HELP_HINT: &str = "For more information try --help";

/// `<path> <name> [OPTIONS] COMMAND <arg>...`
pub fn usage_line<T>(spec: &CommandSpec<T>, command: &CommandPath) -> String {
    let mut out = command.to_string();

    if spec.has_options() {
        out.push_str(" [OPTIONS]");
    }

    if !spec.is_leaf() {
        out.push_str(" COMMAND");
    }

    if spec.is_leaf() {
        if let Some(names) = spec.positional_names() {
            for name in names {
                out.push_str(&format!(" <{name}>"));
            }
        }
    }

    out
}

/// `Options:` heading followed by one aligned row per declared option.
pub fn options_block<T>(spec: &CommandSpec<T>) -> String {
    let rows: Vec<(String, &str)> = spec
        .options()
        .values()
        .map(|opt| {
            let left = if opt.alias.is_some() {
                opt.definition()
            } else {
                format!("{INDENT}{}", opt.definition())
            };
            (left, opt.description.as_deref().unwrap_or(""))
        })
        .collect();

    let mut out = String::from("Options:\n");
    push_rows(&mut out, &rows);
    out
}

/// `Commands:` heading followed by one aligned row per subcommand.
pub fn commands_block<T>(spec: &CommandSpec<T>) -> String {
    let rows: Vec<(String, &str)> = spec
        .children()
        .iter()
        .map(|(name, child)| (name.clone(), child.get_description().unwrap_or("")))
        .collect();

    let mut out = String::from("Commands:\n");
    push_rows(&mut out, &rows);
    out
}

fn push_rows(out: &mut String, rows: &[(String, &str)]) {
    let width = rows
        .iter()
        .map(|(left, _)| left.chars().count())
        .max()
        .unwrap_or(0);
    for (left, desc) in rows {
        if desc.is_empty() {
            out.push_str(&format!("{INDENT}{left}\n"));
        } else {
            out.push_str(&format!("{INDENT}{left:width$}{GUTTER}{desc}\n"));
        }
    }
}

/// Full help page for `spec`.
pub fn render_help<T>(spec: &CommandSpec<T>, command: &CommandPath) -> String {
    let mut out = String::from("\n");

    if let Some(description) = spec.get_description() {
        out.push_str(description);
        out.push_str("\n\n");
    }

    out.push_str(&format!(
        "Usage:\n{INDENT}{}\n\n",
        usage_line(spec, command)
    ));

    if spec.has_options() {
        out.push_str(&options_block(spec));
        out.push('\n');
    }

    if spec.has_children() {
        out.push_str(&commands_block(spec));
        out.push('\n');
    }

    out
}

/// Colored one-line message followed by the usage of the failing node.
///
/// `unknown-command` and `no-action` also list the available subcommands.
pub fn render_failure<T>(kind: &ErrorKind, spec: &CommandSpec<T>, command: &CommandPath) -> String {
    let mut out = format!("\n{ERROR_COLOR}{kind}{RESET}\n");

    out.push_str(&format!(
        "\nUsage:\n{INDENT}{}\n\n",
        usage_line(spec, command)
    ));

    if kind.shows_commands() && spec.has_children() {
        out.push_str(&commands_block(spec));
        out.push('\n');
    }

    if spec.help_enabled() {
        out.push_str(HELP_HINT);
        out.push('\n');
    }

    out
}
