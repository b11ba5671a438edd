//! Parse failures.
//!
//! Every failure aborts the parse as a whole: no partial
//! [`CommandLine`](crate::CommandLine) is returned and nothing is retried.

use thiserror::Error;

use crate::group::OptionGroup;
use crate::option::OptionSpec;

/// Errors that can occur while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An option-looking token matched no catalog entry.
    #[error("unrecognized option: {token}")]
    UnrecognizedOption { token: String },

    /// An option requiring a value reached the end of input or another
    /// option.
    #[error("missing argument for option: {}", .option.key())]
    MissingArgument { option: Box<OptionSpec> },

    /// Required options or groups were absent after scanning.
    #[error("{}", missing_message(.missing))]
    MissingOption { missing: Vec<String> },

    /// A second member of a mutually exclusive group was specified.
    #[error(
        "option '{}' was specified but an option from this group has already been selected: '{selected}'",
        .option.key()
    )]
    AlreadySelected {
        group: Box<OptionGroup>,
        option: Box<OptionSpec>,
        selected: String,
    },

    /// An abbreviated long option matched more than one catalog entry.
    #[error("ambiguous option: '{token}' (could be: {})", quoted_list(.candidates))]
    AmbiguousOption {
        token: String,
        candidates: Vec<String>,
    },
}

impl ParseError {
    /// The option the failure is about, when there is one.
    pub fn option(&self) -> Option<&OptionSpec> {
        match self {
            ParseError::MissingArgument { option } | ParseError::AlreadySelected { option, .. } => {
                Some(&**option)
            }
            _ => None,
        }
    }
}

fn missing_message(missing: &[String]) -> String {
    let plural = if missing.len() == 1 { "" } else { "s" };
    format!("missing required option{plural}: {}", missing.join(", "))
}

fn quoted_list(candidates: &[String]) -> String {
    candidates
        .iter()
        .map(|candidate| format!("'{candidate}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
