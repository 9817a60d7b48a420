use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::invocation::Invocation;

/// Terminal handler attached to a leaf command.
pub type Action<T> = Box<dyn Fn(&Invocation) -> T + Send + Sync>;

const DEFAULT_VALUE_NAME: &str = "value";

/// Declaration of one named option accepted by a command node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionSpec {
    /// Canonical long name. Assigned from the key under which the option is
    /// registered with [`CommandSpec::option`].
    #[serde(skip)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<char>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub flag: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub multi: bool,
    /// Placeholder shown in help for the option's value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Suppresses the automatic `-h`/`--help` on the node declaring this option.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_help: bool,
}

impl OptionSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alias(mut self, alias: char) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn flag(mut self) -> Self {
        self.flag = true;
        self
    }

    pub fn multi(mut self) -> Self {
        self.multi = true;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn disable_help(mut self) -> Self {
        self.disable_help = true;
        self
    }

    /// Placeholder for the option's value (`value` when not declared).
    pub fn value_name(&self) -> &str {
        self.value.as_deref().unwrap_or(DEFAULT_VALUE_NAME)
    }

    /// The option as rendered in help and error messages, e.g. `-o, --output <file>`.
    pub fn definition(&self) -> String {
        let mut out = String::new();
        if let Some(alias) = self.alias {
            out.push_str(&format!("-{alias}, "));
        }
        out.push_str("--");
        out.push_str(&self.name);
        if !self.flag {
            out.push_str(&format!(" <{}>", self.value_name()));
        }
        out
    }
}

/// A node in the command tree.
///
/// A node with an action is a leaf command; a node without one is a branch and
/// is expected to have children. `T` is whatever the actions return, which
/// becomes the result of a successful parse.
pub struct CommandSpec<T> {
    description: Option<String>,
    action: Option<Action<T>>,
    children: IndexMap<String, CommandSpec<T>>,
    positional_names: Option<Vec<String>>,
    options: IndexMap<String, OptionSpec>,
    disable_help: bool,
}

impl<T> Default for CommandSpec<T> {
    fn default() -> Self {
        Self {
            description: None,
            action: None,
            children: IndexMap::new(),
            positional_names: None,
            options: IndexMap::new(),
            disable_help: false,
        }
    }
}

impl<T> fmt::Debug for CommandSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("description", &self.description)
            .field("action", &self.action.as_ref().map(|_| "<fn>"))
            .field("children", &self.children)
            .field("positional_names", &self.positional_names)
            .field("options", &self.options)
            .field("disable_help", &self.disable_help)
            .finish()
    }
}

impl<T> CommandSpec<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&Invocation) -> T + Send + Sync + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Register a subcommand. A later registration under the same name replaces
    /// the earlier one.
    pub fn command(mut self, name: impl Into<String>, spec: CommandSpec<T>) -> Self {
        self.children.insert(name.into(), spec);
        self
    }

    /// Register an option under its canonical long name.
    pub fn option(mut self, name: impl Into<String>, mut spec: OptionSpec) -> Self {
        let name = name.into();
        spec.name = name.clone();
        self.options.insert(name, spec);
        self
    }

    /// Declare the exact positional arguments this command takes.
    pub fn args<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.positional_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Turn off the automatic `-h`/`--help` for this node only.
    pub fn disable_help(mut self, disable: bool) -> Self {
        self.disable_help = disable;
        self
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.action.is_some()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    pub fn children(&self) -> &IndexMap<String, CommandSpec<T>> {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<&CommandSpec<T>> {
        self.children.get(name)
    }

    pub fn options(&self) -> &IndexMap<String, OptionSpec> {
        &self.options
    }

    pub fn get_option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.get(name)
    }

    /// The first declared option whose alias is `alias`.
    pub fn find_alias(&self, alias: char) -> Option<&OptionSpec> {
        self.options.values().find(|opt| opt.alias == Some(alias))
    }

    pub fn positional_names(&self) -> Option<&[String]> {
        self.positional_names.as_deref()
    }

    /// Whether `-h`/`--help` are intercepted on this node.
    ///
    /// Disabling is node-local: subcommands keep their own help unless they
    /// disable it themselves.
    pub fn help_enabled(&self) -> bool {
        !self.disable_help && !self.options.values().any(|opt| opt.disable_help)
    }

    pub(crate) fn invoke(&self, input: &Invocation) -> Option<T> {
        self.action.as_ref().map(|action| action(input))
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandSpec, OptionSpec};

    #[test]
    fn definition_includes_alias_and_placeholder() {
        let spec: CommandSpec<()> = CommandSpec::new()
            .option("output", OptionSpec::new().alias('o').value("file"))
            .option("count", OptionSpec::new())
            .option("verbose", OptionSpec::new().alias('v').flag());

        let defs: Vec<String> = spec.options().values().map(|o| o.definition()).collect();
        assert_eq!(
            defs,
            ["-o, --output <file>", "--count <value>", "-v, --verbose"]
        );
    }

    #[test]
    fn option_takes_its_name_from_the_key() {
        let spec: CommandSpec<()> = CommandSpec::new().option("depth", OptionSpec::new());
        assert_eq!(spec.get_option("depth").map(|o| o.name.as_str()), Some("depth"));
    }

    #[test]
    fn find_alias_returns_first_match() {
        let spec: CommandSpec<()> = CommandSpec::new()
            .option("first", OptionSpec::new().alias('x').flag())
            .option("second", OptionSpec::new().alias('x').flag());
        assert_eq!(spec.find_alias('x').map(|o| o.name.as_str()), Some("first"));
        assert!(spec.find_alias('y').is_none());
    }

    #[test]
    fn help_can_be_disabled_per_node_or_by_option() {
        let plain: CommandSpec<()> = CommandSpec::new();
        assert!(plain.help_enabled());

        let node_off: CommandSpec<()> = CommandSpec::new().disable_help(true);
        assert!(!node_off.help_enabled());

        let opt_off: CommandSpec<()> =
            CommandSpec::new().option("help", OptionSpec::new().flag().disable_help());
        assert!(!opt_off.help_enabled());
    }

    #[test]
    fn option_spec_deserializes_from_camel_case() {
        let opt: OptionSpec = serde_json::from_str(
            r#"{ "alias": "o", "multi": true, "value": "path", "disableHelp": true }"#,
        )
        .unwrap();
        assert_eq!(opt.alias, Some('o'));
        assert!(opt.multi);
        assert!(!opt.flag);
        assert_eq!(opt.value_name(), "path");
        assert!(opt.disable_help);
        assert!(opt.name.is_empty());
    }
}
