use std::fmt;

/// Name and ancestry of the command node currently being parsed.
///
/// Derived during traversal and carried alongside the tree reference; the
/// caller's [`CommandSpec`](crate::CommandSpec) is never annotated in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandPath {
    name: String,
    path: Vec<String>,
}

impl CommandPath {
    /// Path for the top-level command.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: Vec::new(),
        }
    }

    /// Path for a subcommand of `self`.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        path.push(self.name.clone());
        Self {
            name: name.into(),
            path,
        }
    }

    /// This node's own command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ancestor command names, outermost first.
    pub fn path(&self) -> &[String] {
        &self.path
    }
}

impl fmt::Display for CommandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ancestor in &self.path {
            write!(f, "{ancestor} ")?;
        }
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::CommandPath;

    #[test]
    fn child_appends_parent_name() {
        let root = CommandPath::root("tool");
        let remote = root.child("remote");
        let add = remote.child("add");

        assert!(root.path().is_empty());
        assert_eq!(remote.path(), ["tool"]);
        assert_eq!(add.path(), ["tool", "remote"]);
        assert_eq!(add.name(), "add");
        assert_eq!(add.to_string(), "tool remote add");
    }

    #[test]
    fn deriving_a_child_leaves_the_parent_untouched() {
        let root = CommandPath::root("tool");
        let _ = root.child("a");
        let _ = root.child("b");
        assert_eq!(root, CommandPath::root("tool"));
    }
}
