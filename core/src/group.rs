//! Mutually exclusive option groups.
//!
//! An [`OptionGroup`] is part of the catalog and never changes during a
//! parse. Which member was chosen is per-parse state, tracked by a
//! [`Selection`] that the parser engine creates fresh for every call.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::option::OptionSpec;

/// A set of options of which at most one may appear on a command line.
///
/// # Examples
///
/// ```
/// use cmdline_options_core::{OptionGroup, OptionSpec};
///
/// let directions = OptionGroup::new()
///     .with_option(OptionSpec::short("l").with_long("left"))
///     .with_option(OptionSpec::short("r").with_long("right"))
///     .required();
///
/// assert!(directions.is_required());
/// assert_eq!(directions.names(), vec!["l", "r"]);
/// assert_eq!(directions.to_string(), "[-l, -r]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    #[serde(default)]
    options: Vec<OptionSpec>,
    #[serde(default)]
    required: bool,
}

impl OptionGroup {
    /// Creates an empty, optional group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member, replacing a member with the same identity.
    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.add_option(option);
        self
    }

    /// Adds a member, replacing a member with the same identity.
    pub fn add_option(&mut self, option: OptionSpec) -> &mut Self {
        match self.options.iter_mut().find(|member| **member == option) {
            Some(member) => *member = option,
            None => self.options.push(option),
        }
        self
    }

    /// Marks the group as required: one member must be selected.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets whether the group is required.
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Returns whether one member must be selected.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Members in insertion order.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Member keys in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.options.iter().map(OptionSpec::key).collect()
    }

    /// Checks membership by identity.
    pub fn contains(&self, option: &OptionSpec) -> bool {
        self.options.contains(option)
    }

    pub(crate) fn options_mut(&mut self) -> &mut [OptionSpec] {
        &mut self.options
    }

    /// Puts `option` in place of the first member sharing one of its names
    /// and drops any other such member. Returns `false` if none did.
    pub(crate) fn replace_clashing(&mut self, option: &OptionSpec) -> bool {
        let mut replaced = false;
        self.options.retain_mut(|member| {
            if !member.shares_name(option) {
                return true;
            }
            if replaced {
                return false;
            }
            *member = option.clone();
            replaced = true;
            true
        });
        replaced
    }

    /// Drops every member sharing a name with `option`.
    pub(crate) fn remove_clashing(&mut self, option: &OptionSpec) -> bool {
        let before = self.options.len();
        self.options.retain(|member| !member.shares_name(option));
        self.options.len() != before
    }
}

impl fmt::Display for OptionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self
            .options
            .iter()
            .map(OptionSpec::display_name)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{names}]")
    }
}

/// Per-parse selection state of one group.
///
/// `Unselected -> Selected(x)` on the first member seen, re-selecting the
/// same member is a no-op, and selecting a different member fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(String),
}

impl Selection {
    /// Selects `option` within `group`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::AlreadySelected`] if another member was
    /// selected before.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdline_options_core::{OptionGroup, OptionSpec, ParseError, Selection};
    ///
    /// let left = OptionSpec::short("l");
    /// let right = OptionSpec::short("r");
    /// let group = OptionGroup::new()
    ///     .with_option(left.clone())
    ///     .with_option(right.clone());
    ///
    /// let mut selection = Selection::default();
    /// selection.select(&group, &left).unwrap();
    /// selection.select(&group, &left).unwrap();
    /// let err = selection.select(&group, &right).unwrap_err();
    /// assert!(matches!(err, ParseError::AlreadySelected { .. }));
    /// assert_eq!(selection.selected(), Some("l"));
    /// ```
    pub fn select(&mut self, group: &OptionGroup, option: &OptionSpec) -> Result<(), ParseError> {
        if let Selection::Selected(current) = self {
            if current.as_str() != option.key() {
                return Err(ParseError::AlreadySelected {
                    group: Box::new(group.clone()),
                    option: Box::new(option.clone()),
                    selected: current.clone(),
                });
            }
        }
        *self = Selection::Selected(option.key().to_string());
        Ok(())
    }

    /// Returns `true` if selecting `option` would fail.
    pub fn conflicts_with(&self, option: &OptionSpec) -> bool {
        matches!(self, Selection::Selected(current) if current != option.key())
    }

    /// Key of the selected member.
    pub fn selected(&self) -> Option<&str> {
        match self {
            Selection::Unselected => None,
            Selection::Selected(key) => Some(key),
        }
    }
}
