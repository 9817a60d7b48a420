use std::collections::HashMap;

use crate::scope::CommandPath;
use crate::tree::CommandSpec;

/// A command tree that cannot be parsed the way its author intended.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("schema error in '{command}': alias -{alias} maps to both --{first} and --{second}")]
    DuplicateAlias {
        command: String,
        alias: char,
        first: String,
        second: String,
    },

    #[error("schema error in '{command}': alias -h of --{option} is reserved for help")]
    ReservedAlias { command: String, option: String },

    #[error("schema error in '{command}': command has neither an action nor subcommands")]
    EmptyCommand { command: String },

    #[error("schema error in '{command}': invalid option name '{option}'")]
    InvalidOptionName { command: String, option: String },

    #[error("schema error in '{command}': invalid command name '{name}'")]
    InvalidCommandName { command: String, name: String },
}

impl<T> CommandSpec<T> {
    /// Check the whole tree below (and including) this node, which is named `name`.
    ///
    /// Parsing never calls this; it is meant for tests and startup checks.
    pub fn validate(&self, name: &str) -> Result<(), SchemaError> {
        validate_node(self, &CommandPath::root(name))
    }
}

fn validate_node<T>(spec: &CommandSpec<T>, command: &CommandPath) -> Result<(), SchemaError> {
    if !spec.is_leaf() && !spec.has_children() {
        return Err(SchemaError::EmptyCommand {
            command: command.to_string(),
        });
    }

    let mut aliases: HashMap<char, &str> = HashMap::new();
    for (name, opt) in spec.options() {
        if name.is_empty() || name.starts_with('-') || name.contains('=') {
            return Err(SchemaError::InvalidOptionName {
                command: command.to_string(),
                option: name.clone(),
            });
        }

        let Some(alias) = opt.alias else {
            continue;
        };
        if alias == 'h' && spec.help_enabled() {
            return Err(SchemaError::ReservedAlias {
                command: command.to_string(),
                option: name.clone(),
            });
        }
        if let Some(first) = aliases.insert(alias, name.as_str()) {
            return Err(SchemaError::DuplicateAlias {
                command: command.to_string(),
                alias,
                first: first.to_string(),
                second: name.clone(),
            });
        }
    }

    for (name, child) in spec.children() {
        if name.is_empty() || name.starts_with('-') {
            return Err(SchemaError::InvalidCommandName {
                command: command.to_string(),
                name: name.clone(),
            });
        }
        validate_node(child, &command.child(name.as_str()))?;
    }

    Ok(())
}
