use cmdtree_argparse::CommandPath;
use serde::Serialize;

use crate::manifest::{CommandNode, LoadedManifest};

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub manifest: String,
    pub name: String,
    /// Every command in the tree by full path, depth-first in declaration order.
    pub commands: Vec<String>,
    pub leaf_commands: usize,
    pub options: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

pub fn check_manifest(loaded: &LoadedManifest) -> CheckReport {
    let manifest = &loaded.manifest;
    let root = CommandPath::root(manifest.name.as_str());

    let mut commands = Vec::new();
    let mut leaf_commands = 0;
    let mut options = 0;
    walk(
        &manifest.command,
        &root,
        &mut |path: &CommandPath, node: &CommandNode| {
            commands.push(path.to_string());
            if node.action {
                leaf_commands += 1;
            }
            options += node.options.len();
        },
    );

    let error = manifest
        .command
        .to_spec()
        .validate(&manifest.name)
        .err()
        .map(|e| e.to_string());

    CheckReport {
        manifest: loaded.path.display().to_string(),
        name: manifest.name.clone(),
        commands,
        leaf_commands,
        options,
        error,
    }
}

fn walk(node: &CommandNode, path: &CommandPath, visit: &mut dyn FnMut(&CommandPath, &CommandNode)) {
    visit(path, node);
    for (name, child) in &node.commands {
        walk(child, &path.child(name.as_str()), visit);
    }
}
