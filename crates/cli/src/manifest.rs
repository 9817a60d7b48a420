use anyhow::{Context, Result, bail};
use cmdtree_argparse::{CommandSpec, Invocation, OptionSpec};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MANIFEST_NAME: &str = "cmdtree.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,

    /// Top-level command name used in usage lines.
    pub name: String,

    #[serde(default)]
    pub command: CommandNode,
}

/// Declarative form of one command node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Leaf commands echo their invocation back as the parse result.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub action: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub options: IndexMap<String, OptionSpec>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub commands: IndexMap<String, CommandNode>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disable_help: bool,
}

impl CommandNode {
    /// Build the runtime command tree.
    pub fn to_spec(&self) -> CommandSpec<Invocation> {
        let mut spec = CommandSpec::new().disable_help(self.disable_help);

        if let Some(description) = &self.description {
            spec = spec.description(description.as_str());
        }
        if self.action {
            spec = spec.action(Invocation::clone);
        }
        if let Some(args) = &self.args {
            spec = spec.args(args.iter().cloned());
        }
        for (name, opt) in &self.options {
            spec = spec.option(name.as_str(), opt.clone());
        }
        for (name, child) in &self.commands {
            spec = spec.command(name.as_str(), child.to_spec());
        }

        spec
    }
}

#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub path: PathBuf,
    pub manifest: Manifest,
}

pub fn load_manifest(manifest_path: &Path) -> Result<LoadedManifest> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let path = resolve_against(&cwd, manifest_path);

    if !path.exists() {
        bail!("manifest not found: {}", path.display());
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read manifest: {}", path.display()))?;
    let manifest: Manifest = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse manifest JSON: {}", path.display()))?;

    if manifest.name.trim().is_empty() {
        bail!("manifest {} has an empty `name`", path.display());
    }

    tracing::debug!(path = %path.display(), name = %manifest.name, "loaded manifest");
    Ok(LoadedManifest { path, manifest })
}

/// Starter manifest with one branch and two leaf commands.
pub fn starter_manifest(name: &str) -> Manifest {
    let verbose = OptionSpec::new()
        .alias('v')
        .flag()
        .description("Print more output");

    let add = CommandNode {
        description: Some("Add a remote".to_string()),
        action: true,
        args: Some(vec!["name".to_string(), "url".to_string()]),
        options: IndexMap::from([(
            "tag".to_string(),
            OptionSpec::new()
                .alias('t')
                .multi()
                .value("tag")
                .description("Tag to attach (repeatable)"),
        )]),
        ..Default::default()
    };

    let remove = CommandNode {
        description: Some("Remove a remote".to_string()),
        action: true,
        args: Some(vec!["name".to_string()]),
        options: IndexMap::from([(
            "force".to_string(),
            OptionSpec::new()
                .alias('f')
                .flag()
                .description("Do not ask for confirmation"),
        )]),
        ..Default::default()
    };

    let remote = CommandNode {
        description: Some("Manage remotes".to_string()),
        commands: IndexMap::from([("add".to_string(), add), ("remove".to_string(), remove)]),
        ..Default::default()
    };

    Manifest {
        schema_version: Some(1),
        name: name.to_string(),
        command: CommandNode {
            description: Some(format!("{name} command line")),
            options: IndexMap::from([("verbose".to_string(), verbose)]),
            commands: IndexMap::from([("remote".to_string(), remote)]),
            ..Default::default()
        },
    }
}

/// Write the starter manifest into `project_dir`, refusing to overwrite.
pub fn write_starter_manifest(project_dir: &Path, name: &str) -> Result<PathBuf> {
    let dest = project_dir.join(DEFAULT_MANIFEST_NAME);
    if dest.exists() {
        bail!("{} already exists", dest.display());
    }

    let manifest = starter_manifest(name);
    let mut out =
        serde_json::to_string_pretty(&manifest).context("failed to serialize manifest")?;
    out.push('\n');

    fs::write(&dest, out.as_bytes())
        .with_context(|| format!("failed to write {}", dest.display()))?;
    Ok(dest)
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
