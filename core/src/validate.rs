//! Catalog definition checks and the post-scan required check.
//!
//! [`validate_options`] catches definitions the parser could never match or
//! that contradict themselves, such as a value separator on a flag, before
//! they cause surprising parses. The required check runs at the end of every
//! parse.
//!
//! # Examples
//!
//! ```
//! use cmdline_options_core::*;
//!
//! let options = Options::new()
//!     .with_option(OptionSpec::short("v").with_long("verbose"))
//!     .with_option(OptionSpec::short("D").with_args(2).with_value_separator('='));
//! assert!(validate_options(&options).is_empty());
//!
//! // Invalid: a flag cannot split values
//! let bad = Options::new().with_option(OptionSpec::short("x").with_value_separator(','));
//! assert!(!validate_options(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::command_line::CommandLine;
use crate::group::Selection;
use crate::option::{Arity, OptionSpec};
use crate::options::Options;

/// Catalog definition errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// An option has neither a short nor a long name.
    #[error("option must define a short or long name")]
    MissingName,
    /// Short name is empty, contains whitespace or control characters, or
    /// starts with `-`.
    #[error("invalid short name: '{0}'")]
    InvalidShortName(String),
    /// Long name is empty, contains whitespace, control characters or `=`,
    /// or starts with `-`.
    #[error("invalid long name: '{0}'")]
    InvalidLongName(String),
    /// A value separator on an option that takes no values.
    #[error("option {0} has a value separator but takes no values")]
    SeparatorWithoutArgs(String),
    /// An optional argument on an option that takes no values.
    #[error("option {0} has an optional argument but takes no values")]
    OptionalWithoutArgs(String),
    /// `AtMost(0)` where a flag (`Zero`) is meant.
    #[error("option {0} takes at most 0 values, declare it as a flag")]
    EmptyArity(String),
    /// A short or long name claimed by more than one definition.
    #[error("option name {0} is defined more than once")]
    DuplicateName(String),
}

/// Validates every option in the catalog.
///
/// Returns all problems found, in catalog order; an empty list means the
/// catalog is sound.
///
/// # Examples
///
/// ```
/// use cmdline_options_core::*;
///
/// let options = Options::new()
///     .with_option(OptionSpec::short("-a"))
///     .with_option(OptionSpec::long_only("two words"));
/// let errors = validate_options(&options);
/// assert!(errors.iter().any(|e| matches!(e, DefinitionError::InvalidShortName(_))));
/// assert!(errors.iter().any(|e| matches!(e, DefinitionError::InvalidLongName(_))));
/// ```
pub fn validate_options(options: &Options) -> Vec<DefinitionError> {
    validate_specs(options.options())
}

/// Validates option definitions before they are registered.
///
/// Besides the per-option checks of [`validate_options`], reports every name
/// used by more than one definition: [`Options`] would silently keep only
/// the last of them.
///
/// # Examples
///
/// ```
/// use cmdline_options_core::*;
///
/// let specs = [
///     OptionSpec::short("v").with_long("verbose"),
///     OptionSpec::short("v").with_long("version"),
/// ];
/// assert_eq!(
///     validate_specs(&specs),
///     vec![DefinitionError::DuplicateName("-v".to_string())]
/// );
/// ```
pub fn validate_specs<'a, I>(specs: I) -> Vec<DefinitionError>
where
    I: IntoIterator<Item = &'a OptionSpec>,
{
    let mut errors = Vec::new();
    let mut shorts = HashSet::new();
    let mut longs = HashSet::new();

    for option in specs {
        errors.extend(validate_option(option));
        if let Some(short) = option.short.as_deref() {
            if !shorts.insert(short) {
                errors.push(DefinitionError::DuplicateName(format!("-{short}")));
            }
        }
        if let Some(long) = option.long.as_deref() {
            if !longs.insert(long) {
                errors.push(DefinitionError::DuplicateName(format!("--{long}")));
            }
        }
    }
    errors
}

fn validate_option(option: &OptionSpec) -> Vec<DefinitionError> {
    let mut errors = Vec::new();

    if option.short.is_none() && option.long.is_none() {
        errors.push(DefinitionError::MissingName);
        return errors;
    }

    if let Some(short) = &option.short {
        if !is_valid_name(short) {
            errors.push(DefinitionError::InvalidShortName(short.clone()));
        }
    }
    if let Some(long) = &option.long {
        if !is_valid_name(long) || long.contains('=') {
            errors.push(DefinitionError::InvalidLongName(long.clone()));
        }
    }

    let name = option.display_name();
    if option.arity == Arity::AtMost(0) {
        errors.push(DefinitionError::EmptyArity(name.clone()));
    }
    if !option.arity.takes_values() {
        if option.value_separator.is_some() {
            errors.push(DefinitionError::SeparatorWithoutArgs(name.clone()));
        }
        if option.optional_arg {
            errors.push(DefinitionError::OptionalWithoutArgs(name));
        }
    }

    errors
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.chars().any(|ch| ch.is_whitespace() || ch.is_control())
}

/// Identities of required options and groups absent from `cmd`.
///
/// Options come first, by key, then groups, by their display form.
pub(crate) fn missing_required(
    options: &Options,
    cmd: &CommandLine,
    selections: &[Selection],
) -> Vec<String> {
    let mut missing: Vec<String> = options
        .required_options()
        .filter(|option| !cmd.has_option(option.key()))
        .map(|option| option.key().to_string())
        .collect();

    for (group, selection) in options.groups().iter().zip(selections) {
        if group.is_required() && selection.selected().is_none() {
            missing.push(group.to_string());
        }
    }

    missing
}
