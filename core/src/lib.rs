//! Option catalogs and the command-line parser engine.
//!
//! This crate turns a flat argument array into a structured result:
//!
//! - [`OptionSpec`]: one recognised switch, with short and/or long name, arity,
//!   value separator and usage metadata.
//! - [`OptionGroup`]: a set of mutually exclusive options, optionally
//!   required.
//! - [`Options`]: the catalog of specs and groups, looked up by either name.
//! - [`Parser`]: the engine, parameterised by a [`Dialect`]
//!   ([`PosixDialect`] bursts `-abc`, [`GnuDialect`] attaches `-Dkey=value`).
//! - [`CommandLine`]: options in consumption order with their
//!   values, plus positional arguments.
//!
//! Parsing borrows the catalog immutably and keeps all per-parse state
//! (collected values, group selections) in the returned [`CommandLine`], so
//! a catalog can be shared and reparsed freely. Failures are reported as
//! [`ParseError`]; catalog definitions can be checked up front with
//! [`validate_options`].
//!
//! # Example
//!
//! ```
//! use cmdline_options_core::*;
//!
//! let options = Options::new()
//!     .with_option(OptionSpec::short("a").with_long("all"))
//!     .with_option(OptionSpec::short("f").with_long("file").with_arg().required())
//!     .with_option(OptionSpec::short("D").with_args(2).with_value_separator('='))
//!     .with_group(
//!         OptionGroup::new()
//!             .with_option(OptionSpec::short("q").with_long("quiet"))
//!             .with_option(OptionSpec::short("v").with_long("verbose")),
//!     );
//! assert!(validate_options(&options).is_empty());
//!
//! let cmd = Parser::posix()
//!     .parse(&options, &["-af", "out.txt", "-Dlevel=3", "-v", "input"])
//!     .unwrap();
//! assert!(cmd.has_option("all"));
//! assert_eq!(cmd.value("file"), Some("out.txt"));
//! assert_eq!(cmd.values_as_map("D")["level"], "3");
//! assert_eq!(cmd.selected(&options.groups()[0]), Some("v"));
//! assert_eq!(cmd.args(), ["input"]);
//!
//! let err = Parser::posix().parse(&options, &["-q", "-v"]).unwrap_err();
//! assert!(matches!(err, ParseError::AlreadySelected { .. }));
//! ```

mod command_line;
pub mod dialect;
mod error;
mod group;
mod option;
mod options;
mod parser;
mod validate;

pub use command_line::{CommandLine, ParsedOption};
pub use dialect::{Dialect, DialectKind, GnuDialect, PosixDialect, Token};
pub use error::{ParseError, Result};
pub use group::{OptionGroup, Selection};
pub use option::{Arity, OptionSpec, strip_leading_hyphens};
pub use options::Options;
pub use parser::{ParseSettings, Parser};
pub use validate::{DefinitionError, validate_options, validate_specs};
