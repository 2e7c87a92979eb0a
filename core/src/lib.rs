//! Minimal command-line argument parsing with typed queries.
//!
//! This crate splits a raw token list into positional arguments and flags:
//!
//! - [`parse`]: single pass over the tokens, driven by a short-flag table
//!   (`'v'` → `"verbose"`) and a set of long names that take a value.
//!   Supports `--long`, `-s`, and clustered `-xyz` flags.
//! - [`Parser`]: owns the two tables and can parse repeatedly, including
//!   the current process arguments.
//! - [`Arguments`]: the immutable result, with positional access by index
//!   and flag access by name. Every accessor has a `_with` variant that
//!   applies a caller-supplied conversion.
//! - [`FlagConfig`]: the two tables as a YAML/JSON file.
//!
//! # Example
//!
//! ```
//! use tinyopt_core::*;
//!
//! let parser = Parser::new()
//!     .short('v', "verbose")
//!     .short('o', "output")
//!     .takes_value("output");
//!
//! let args = parser.parse(["input.txt", "-vo", "out.txt"])?;
//!
//! assert_eq!(args.at(0)?, "input.txt");
//! assert!(args.has("verbose"));
//! assert_eq!(args.get_optional("output")?, Some("out.txt"));
//! assert_eq!(args.get_optional("missing")?, None);
//!
//! let count: Option<u32> = args.optional_at_with(1, |s| s.parse())?;
//! assert_eq!(count, None);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod arguments;
mod config;
mod error;
mod parse;
mod types;

pub use arguments::Arguments;
pub use config::FlagConfig;
pub use error::{ConfigError, ParseError, QueryError, Result};
pub use parse::{Parser, parse};
pub use types::{FlagLookup, FlagValue};
