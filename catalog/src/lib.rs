//! Declarative option catalogs stored as YAML or JSON.
//!
//! This crate owns the file side of option catalogs: a [`CatalogFile`]
//! describes options, groups, the dialect and the parse settings; loading it
//! yields a validated [`Options`](cmdline_options_core::Options) and a
//! configured [`Parser`](cmdline_options_core::Parser). [`CatalogSet`]
//! indexes a directory of catalog files by name.
//!
//! # Quick start
//!
//! ```no_run
//! use cmdline_options_catalog::CatalogFile;
//!
//! let file = CatalogFile::load("tool.yaml").unwrap();
//! let options = file.to_options().unwrap();
//! let args: Vec<String> = std::env::args().skip(1).collect();
//! let cmd = file.parser().parse(&options, &args).unwrap();
//! for arg in cmd.args() {
//!     println!("{arg}");
//! }
//! ```

mod config;
mod error;
mod loader;

pub use config::{CatalogFile, Format};
pub use error::{CatalogError, Result};
pub use loader::CatalogSet;
