use std::collections::VecDeque;

use crate::error::{ErrorKind, ParseError};
use crate::help;
use crate::invocation::Invocation;
use crate::scope::CommandPath;
use crate::tree::{CommandSpec, OptionSpec};

const HELP_LONG: &str = "--help";
const HELP_ALIAS: char = 'h';
const SEPARATOR: &str = "--";

pub type ParseResult<T> = Result<T, ParseError>;

/// Top-level entry point for parsing a token list against a command tree.
///
/// Parsing is silent by default; [`Parser::silent`]`(false)` prints the rendered
/// help or error text to stdout before returning it.
#[derive(Debug)]
pub struct Parser<'s, T> {
    name: String,
    spec: &'s CommandSpec<T>,
    silent: bool,
}

impl<'s, T> Parser<'s, T> {
    pub fn new(name: impl Into<String>, spec: &'s CommandSpec<T>) -> Self {
        Self {
            name: name.into(),
            spec,
            silent: true,
        }
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Parse `tokens` (program name already stripped) and run the matched action.
    pub fn parse<I, S>(&self, tokens: I) -> ParseResult<T>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens: VecDeque<String> = tokens.into_iter().map(Into::into).collect();
        let command = CommandPath::root(self.name.as_str());
        let input = Invocation::new(self.name.as_str(), None);

        tracing::debug!(command = %command, tokens = tokens.len(), "parsing command line");

        let result = parse_command(&mut tokens, self.spec, &command, input);
        if let Err(err) = &result {
            tracing::debug!(kind = err.code(), at = %err.command(), "parse stopped");
            if !self.silent {
                println!("{}", err.output());
            }
        }
        result
    }
}

/// Parse `tokens` against `spec` without printing anything.
pub fn parse<T, I, S>(name: &str, spec: &CommandSpec<T>, tokens: I) -> ParseResult<T>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Parser::new(name, spec).parse(tokens)
}

/// Parse the live process arguments, printing help/error text to stdout.
pub fn run<T>(name: &str, spec: &CommandSpec<T>) -> ParseResult<T> {
    Parser::new(name, spec)
        .silent(false)
        .parse(std::env::args().skip(1))
}

fn fail<T>(kind: ErrorKind, spec: &CommandSpec<T>, command: &CommandPath) -> ParseError {
    let output = help::render_failure(&kind, spec, command);
    ParseError::new(kind, command.clone(), output)
}

fn help_requested<T>(spec: &CommandSpec<T>, command: &CommandPath) -> ParseError {
    let output = help::render_help(spec, command);
    ParseError::new(ErrorKind::Help, command.clone(), output)
}

/// Short-option token (`-x` or `-xyz`), as opposed to `--long`, `--` or `-`.
///
/// A lone `-` is not an option; it falls through to command/positional handling.
fn is_short(token: &str) -> bool {
    token.starts_with('-') && !token.starts_with("--") && token.chars().count() > 1
}

fn parse_command<T>(
    tokens: &mut VecDeque<String>,
    spec: &CommandSpec<T>,
    command: &CommandPath,
    mut input: Invocation,
) -> ParseResult<T> {
    let help_enabled = spec.help_enabled();

    loop {
        let Some(token) = tokens.front() else {
            break;
        };

        if help_enabled && token == HELP_LONG {
            return Err(help_requested(spec, command));
        }

        if is_short(token) {
            if token.chars().count() > 2 {
                expand_group(tokens);
            } else {
                resolve_alias(tokens, spec, command)?;
            }
            continue;
        }

        if token.starts_with(SEPARATOR) && token != SEPARATOR {
            parse_option(tokens, spec, command, &mut input)?;
            continue;
        }

        if let Some(child) = spec.child(token) {
            let name = tokens.pop_front().unwrap_or_default();
            let child_command = command.child(name.as_str());
            tracing::trace!(command = %child_command, "entering subcommand");
            let child_input = Invocation::new(name, Some(input));
            return parse_command(tokens, child, &child_command, child_input);
        }

        if spec.has_children() && !spec.is_leaf() {
            return Err(fail(
                ErrorKind::UnknownCommand {
                    command: token.clone(),
                },
                spec,
                command,
            ));
        }

        if token == SEPARATOR {
            tokens.pop_front();
        }
        break;
    }

    if !spec.is_leaf() {
        return Err(fail(ErrorKind::NoAction, spec, command));
    }

    collect_args(tokens, spec, command, &mut input)?;

    tracing::trace!(command = %command, args = input.args().len(), "running action");
    spec.invoke(&input)
        .ok_or_else(|| fail(ErrorKind::NoAction, spec, command))
}

/// `-xyz` becomes `-x -y -z` at the front of the stream.
fn expand_group(tokens: &mut VecDeque<String>) {
    let Some(group) = tokens.pop_front() else {
        return;
    };
    for c in group.chars().skip(1).collect::<Vec<_>>().into_iter().rev() {
        tokens.push_front(format!("-{c}"));
    }
}

/// Rewrite `-x` into the `--name` of the option aliased `x`.
fn resolve_alias<T>(
    tokens: &mut VecDeque<String>,
    spec: &CommandSpec<T>,
    command: &CommandPath,
) -> ParseResult<()> {
    let Some(head) = tokens.front_mut() else {
        return Ok(());
    };
    let alias = head.chars().nth(1).unwrap_or_default();

    if alias == HELP_ALIAS && spec.help_enabled() {
        *head = HELP_LONG.to_string();
        return Ok(());
    }

    match spec.find_alias(alias) {
        Some(opt) => {
            *head = format!("--{}", opt.name);
            Ok(())
        }
        None => Err(fail(
            ErrorKind::UnknownAlias {
                alias: alias.to_string(),
            },
            spec,
            command,
        )),
    }
}

fn parse_option<T>(
    tokens: &mut VecDeque<String>,
    spec: &CommandSpec<T>,
    command: &CommandPath,
    input: &mut Invocation,
) -> ParseResult<()> {
    let Some(raw) = tokens.pop_front() else {
        return Ok(());
    };
    let body = &raw[SEPARATOR.len()..];
    let (name, inline) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value.to_string())),
        None => (body, None),
    };

    let Some(opt) = spec.get_option(name) else {
        return Err(fail(
            ErrorKind::UnknownOpt {
                token: name.to_string(),
            },
            spec,
            command,
        ));
    };

    if !opt.multi && input.is_set(name) {
        return Err(fail(ErrorKind::NotMulti { opt: opt.clone() }, spec, command));
    }

    if opt.flag {
        if let Some(value) = inline {
            return Err(fail(
                ErrorKind::FlagVal {
                    opt: opt.clone(),
                    value,
                },
                spec,
                command,
            ));
        }
        input.set_flag(name);
        return Ok(());
    }

    let value = match inline {
        Some(value) => value,
        None => take_value(tokens, opt).ok_or_else(|| {
            fail(ErrorKind::MissingVal { opt: opt.clone() }, spec, command)
        })?,
    };

    if opt.multi {
        input.push_value(name, value);
    } else {
        input.set_value(name, value);
    }
    Ok(())
}

/// The next token as an option value, unless it is missing or looks like an option.
fn take_value(tokens: &mut VecDeque<String>, opt: &OptionSpec) -> Option<String> {
    match tokens.front() {
        Some(next) if !next.starts_with('-') => {
            tracing::trace!(option = %opt.name, "consuming next token as value");
            tokens.pop_front()
        }
        _ => None,
    }
}

/// Drain every remaining token into `input.args` and check the declared arity.
fn collect_args<T>(
    tokens: &mut VecDeque<String>,
    spec: &CommandSpec<T>,
    command: &CommandPath,
    input: &mut Invocation,
) -> ParseResult<()> {
    let mut count = 0usize;
    while let Some(arg) = tokens.pop_front() {
        count += 1;
        input.push_arg(arg);
    }

    match spec.positional_names() {
        Some(expected) if expected.len() != count => Err(fail(
            ErrorKind::BadArgs {
                expected: expected.to_vec(),
                count,
            },
            spec,
            command,
        )),
        _ => Ok(()),
    }
}
