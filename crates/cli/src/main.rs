mod check;
mod manifest;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use cmdtree_argparse::{Invocation, Parser as CommandParser};
use std::{fs, path::PathBuf};
use tracing_subscriber::{EnvFilter, fmt};

use crate::manifest::{DEFAULT_MANIFEST_NAME, load_manifest, write_starter_manifest};

#[derive(Parser)]
#[command(name = "cmdtree")]
#[command(version, about = "Parse command lines against a declarative command tree", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter cmdtree.json
    Init(InitArgs),

    /// Validate a command tree manifest
    Check(CheckArgs),

    /// Parse tokens against a command tree and print the result
    Run(RunArgs),
}

#[derive(Parser)]
struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Top-level command name
    #[arg(short, long, default_value = "my-tool")]
    name: String,
}

#[derive(Parser)]
struct CheckArgs {
    /// Path to the manifest
    #[arg(short, long, default_value = DEFAULT_MANIFEST_NAME, value_name = "FILE")]
    manifest: PathBuf,

    /// Only output JSON (no human-readable output)
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct RunArgs {
    /// Path to the manifest
    #[arg(short, long, default_value = DEFAULT_MANIFEST_NAME, value_name = "FILE")]
    manifest: PathBuf,

    /// Override the top-level command name from the manifest
    #[arg(long)]
    name: Option<String>,

    /// Print the invocation as JSON
    #[arg(long)]
    json: bool,

    /// Tokens to parse (put them after `--`)
    #[arg(value_name = "TOKENS", trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => init(args),
        Commands::Check(args) => check_command(args),
        Commands::Run(args) => run_command(args),
    }
}

fn init(args: InitArgs) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));

    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;

    let manifest_path = write_starter_manifest(&dir, &args.name)?;

    eprintln!("Created: {}", manifest_path.display());
    eprintln!("\nNext steps:");
    eprintln!("  1. Edit {DEFAULT_MANIFEST_NAME} to describe your commands");
    eprintln!("  2. Run: cmdtree check");
    eprintln!("  3. Run: cmdtree run -- --help");

    Ok(())
}

fn check_command(args: CheckArgs) -> Result<()> {
    tracing::debug!("executing check command");

    let loaded = load_manifest(&args.manifest)?;
    let report = check::check_manifest(&loaded);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        if !report.is_ok() {
            std::process::exit(1);
        }
        return Ok(());
    }

    eprintln!();
    eprintln!("=== Manifest Check Results ===");
    eprintln!("Manifest: {}", report.manifest);
    eprintln!(
        "Commands: {} ({} runnable), options: {}",
        report.commands.len(),
        report.leaf_commands,
        report.options
    );

    match &report.error {
        Some(err) => {
            eprintln!();
            bail!("{err}");
        }
        None => eprintln!("OK: command tree is valid"),
    }

    Ok(())
}

fn run_command(args: RunArgs) -> Result<()> {
    tracing::debug!("executing run command");

    let loaded = load_manifest(&args.manifest)?;
    let name = args.name.unwrap_or(loaded.manifest.name);
    let spec = loaded.manifest.command.to_spec();

    // Help and error text are printed by the parser itself.
    let parser = CommandParser::new(name, &spec).silent(false);
    match parser.parse(args.tokens) {
        Ok(invocation) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&invocation)?);
            } else {
                print_invocation(&invocation)?;
            }
            Ok(())
        }
        Err(err) => {
            if err.is_failure() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn print_invocation(invocation: &Invocation) -> Result<()> {
    let mut chain: Vec<&Invocation> = invocation.ancestors().collect();
    chain.reverse();
    chain.push(invocation);

    let names: Vec<&str> = chain.iter().map(|inv| inv.name()).collect();
    println!("command: {}", names.join(" "));

    for inv in &chain {
        for (key, value) in inv.options() {
            let rendered = serde_json::to_string(value)
                .with_context(|| format!("failed to render option --{key}"))?;
            println!("option: {} --{key} = {rendered}", inv.name());
        }
    }

    for arg in invocation.args() {
        println!("arg: {arg}");
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
