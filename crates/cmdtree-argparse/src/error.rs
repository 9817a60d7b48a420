use crate::scope::CommandPath;
use crate::tree::OptionSpec;

/// What went wrong (or `Help`, which is a request rather than a failure).
///
/// `Display` yields the one-line message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("Option --{token} does not exist in this context")]
    UnknownOpt { token: String },

    #[error("Option {} cannot be set more than once", .opt.definition())]
    NotMulti { opt: OptionSpec },

    #[error("Option {} cannot be assigned a value", .opt.definition())]
    FlagVal { opt: OptionSpec, value: String },

    #[error("Option {} requires a value but none was supplied", .opt.definition())]
    MissingVal { opt: OptionSpec },

    #[error("Option -{alias} does not exist in this context")]
    UnknownAlias { alias: String },

    #[error("Required {} arguments but {count} were supplied", .expected.len())]
    BadArgs { expected: Vec<String>, count: usize },

    #[error("Command '{command}' does not exist in this context")]
    UnknownCommand { command: String },

    #[error("You must choose one of the available commands")]
    NoAction,

    #[error("Help requested")]
    Help,
}

impl ErrorKind {
    /// Stable kebab-case identifier of the kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownOpt { .. } => "unknown-opt",
            Self::NotMulti { .. } => "not-multi",
            Self::FlagVal { .. } => "flag-val",
            Self::MissingVal { .. } => "missing-val",
            Self::UnknownAlias { .. } => "unknown-alias",
            Self::BadArgs { .. } => "bad-args",
            Self::UnknownCommand { .. } => "unknown-command",
            Self::NoAction => "no-action",
            Self::Help => "help",
        }
    }

    /// Whether the rendered failure should list the node's subcommands.
    pub(crate) fn shows_commands(&self) -> bool {
        matches!(self, Self::UnknownCommand { .. } | Self::NoAction)
    }
}

/// A parse that ended without running an action.
///
/// Carries the kind, the command at which parsing stopped, and the fully
/// rendered text (help page or colored error with usage) ready for printing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct ParseError {
    kind: ErrorKind,
    command: CommandPath,
    output: String,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, command: CommandPath, output: String) -> Self {
        Self {
            kind,
            command,
            output,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// The command node at which parsing stopped.
    pub fn command(&self) -> &CommandPath {
        &self.command
    }

    /// Rendered text for display.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// `false` for a help request, `true` for every genuine error.
    pub fn is_failure(&self) -> bool {
        !matches!(self.kind, ErrorKind::Help)
    }

    pub fn into_output(self) -> String {
        self.output
    }
}
