//! Declarative command-tree argument parsing and help rendering.
//!
//! A caller declares a tree of [`CommandSpec`] nodes (subcommands, options and
//! positional argument names). [`parse`] walks a token list against that tree and
//! either runs the matching leaf action or returns a [`ParseError`] carrying a
//! rendered, ready-to-print message.
//!
//! # Example
//!
//! ```
//! use cmdtree_argparse::{CommandSpec, OptionSpec, parse};
//!
//! let spec = CommandSpec::new()
//!     .description("Greeter")
//!     .command(
//!         "greet",
//!         CommandSpec::new()
//!             .option("loud", OptionSpec::new().alias('l').flag())
//!             .args(["who"])
//!             .action(|input| {
//!                 let who = &input.args()[0];
//!                 if input.is_set("loud") {
//!                     format!("HELLO {}", who.to_uppercase())
//!                 } else {
//!                     format!("hello {who}")
//!                 }
//!             }),
//!     );
//!
//! let out = parse("my-tool", &spec, ["greet", "-l", "bob"]).unwrap();
//! assert_eq!(out, "HELLO BOB");
//!
//! let err = parse("my-tool", &spec, ["greet"]).unwrap_err();
//! assert_eq!(err.code(), "bad-args");
//! assert!(err.is_failure());
//! ```

mod error;
pub mod help;
mod invocation;
mod parser;
mod schema;
mod scope;
mod tree;

pub use error::{ErrorKind, ParseError};
pub use invocation::{Invocation, OptionValue};
pub use parser::{ParseResult, Parser, parse, run};
pub use schema::SchemaError;
pub use scope::CommandPath;
pub use tree::{Action, CommandSpec, OptionSpec};
