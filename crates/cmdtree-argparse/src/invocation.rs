use indexmap::IndexMap;
use serde::Serialize;

/// Value recorded for an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// A flag option was present.
    Flag(bool),
    Single(String),
    /// Every occurrence of a `multi` option, in the order given.
    Multi(Vec<String>),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Single(v) => Some(v.as_str()),
            Self::Flag(_) | Self::Multi(_) => None,
        }
    }

    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::Single(v) => std::slice::from_ref(v),
            Self::Multi(values) => values.as_slice(),
            Self::Flag(_) => &[],
        }
    }
}

/// The resolved result of parsing one command level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    name: String,
    options: IndexMap<String, OptionValue>,
    args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<Box<Invocation>>,
}

impl Invocation {
    pub(crate) fn new(name: impl Into<String>, parent: Option<Invocation>) -> Self {
        Self {
            name: name.into(),
            options: IndexMap::new(),
            args: Vec::new(),
            parent: parent.map(Box::new),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Options in the order they were first given.
    pub fn options(&self) -> &IndexMap<String, OptionValue> {
        &self.options
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The invocation of the enclosing command, if this is a subcommand.
    pub fn parent(&self) -> Option<&Invocation> {
        self.parent.as_deref()
    }

    /// Enclosing invocations, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = &Invocation> {
        std::iter::successors(self.parent(), |inv| inv.parent())
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// Whether the option was given at all (flag or value).
    pub fn is_set(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// The value of a single-valued option.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_str)
    }

    /// Every value given for an option (empty if absent or a flag).
    pub fn values(&self, name: &str) -> &[String] {
        self.get(name).map(OptionValue::as_slice).unwrap_or(&[])
    }

    pub(crate) fn set_flag(&mut self, name: &str) {
        self.options.insert(name.to_string(), OptionValue::Flag(true));
    }

    pub(crate) fn set_value(&mut self, name: &str, value: String) {
        self.options
            .insert(name.to_string(), OptionValue::Single(value));
    }

    pub(crate) fn push_value(&mut self, name: &str, value: String) {
        match self.options.get_mut(name) {
            Some(OptionValue::Multi(values)) => values.push(value),
            _ => {
                self.options
                    .insert(name.to_string(), OptionValue::Multi(vec![value]));
            }
        }
    }

    pub(crate) fn push_arg(&mut self, arg: String) {
        self.args.push(arg);
    }
}
