//! Catalog files.
//!
//! A [`CatalogFile`] is the serializable form of an option catalog together
//! with the dialect and settings it is meant to be parsed with. The format
//! is picked from the file extension.
//!
//! # Example YAML
//!
//! ```yaml
//! name: tool
//! dialect: posix
//! settings:
//!   stop_at_non_option: false
//! options:
//!   - short: a
//!     long: enable-a
//!     description: turn [a] on or off
//!   - short: b
//!     long: bfile
//!     args: 1
//!     required: true
//! groups:
//!   - required: true
//!     options:
//!       - { short: l, long: left }
//!       - { short: r, long: right }
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use cmdline_options_core::{
    DialectKind, OptionGroup, OptionSpec, Options, ParseSettings, Parser, validate_specs,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CatalogError, Result};

/// On-disk encoding of a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Detects the format from the extension (`.json`, `.yaml`, `.yml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(Format::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Some(Format::Yaml)
            }
            _ => None,
        }
    }
}

/// A declarative option catalog.
///
/// Every field is optional in the file; an empty document is an empty
/// catalog parsed with the POSIX dialect and default settings.
///
/// # Examples
///
/// ```
/// use cmdline_options_catalog::CatalogFile;
///
/// let file = CatalogFile::from_yaml_str(
///     r#"
/// name: tool
/// dialect: gnu
/// options:
///   - { short: D, args: 2, value_separator: "=" }
///   - { short: v, long: verbose }
/// "#,
/// )
/// .unwrap();
///
/// let options = file.to_options().unwrap();
/// let cmd = file.parser().parse(&options, &["-Dlevel=3", "--verbose"]).unwrap();
/// assert_eq!(cmd.values_as_map("D")["level"], "3");
/// assert!(cmd.has_option("v"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    /// Program name the catalog describes.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub dialect: DialectKind,
    pub settings: ParseSettings,
    pub options: Vec<OptionSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<OptionGroup>,
}

impl CatalogFile {
    /// Loads a catalog, choosing the format from the extension.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnsupportedFormat`] for an unknown extension,
    /// [`CatalogError::Io`] if the file cannot be read, or a
    /// [`Json`](CatalogError::Json)/[`Yaml`](CatalogError::Yaml) error if
    /// parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format =
            Format::from_path(path).ok_or_else(|| CatalogError::UnsupportedFormat(path.into()))?;
        debug!(path = %path.display(), format = ?format, "Loading catalog");

        let reader = BufReader::new(std::fs::File::open(path)?);
        let file: CatalogFile = match format {
            Format::Json => serde_json::from_reader(reader)?,
            Format::Yaml => serde_yaml::from_reader(reader)?,
        };
        Ok(file)
    }

    /// Saves the catalog, choosing the format from the extension.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnsupportedFormat`] for an unknown extension,
    /// [`CatalogError::Io`] if the file cannot be written, or a serialization
    /// error.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format =
            Format::from_path(path).ok_or_else(|| CatalogError::UnsupportedFormat(path.into()))?;
        debug!(path = %path.display(), format = ?format, "Saving catalog");

        let writer = BufWriter::new(std::fs::File::create(path)?);
        match format {
            Format::Json => serde_json::to_writer_pretty(writer, self)?,
            Format::Yaml => serde_yaml::to_writer(writer, self)?,
        }
        Ok(())
    }

    /// Parses a catalog from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parses a catalog from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds and validates the option catalog.
    ///
    /// Options are registered in file order, then groups.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidDefinition`] with every problem
    /// [`validate_specs`] reports, including a name used by more than one
    /// option or group member.
    pub fn to_options(&self) -> Result<Options> {
        let specs = self
            .options
            .iter()
            .chain(self.groups.iter().flat_map(|group| group.options()));
        let errors = validate_specs(specs);
        if !errors.is_empty() {
            return Err(CatalogError::InvalidDefinition(errors));
        }

        let mut options = Options::new();
        for option in &self.options {
            options.add_option(option.clone());
        }
        for group in &self.groups {
            options.add_group(group.clone());
        }
        debug!(
            name = %self.name,
            options = options.len(),
            groups = options.groups().len(),
            "Catalog built"
        );
        Ok(options)
    }

    /// A parser configured with the file's dialect and settings.
    pub fn parser(&self) -> Parser {
        Parser::new(self.dialect).with_settings(self.settings)
    }
}
