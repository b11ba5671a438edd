//! The option catalog.
//!
//! [`Options`] registers every [`OptionSpec`] and [`OptionGroup`] a parse
//! knows about and answers lookups by short or long name. Parsing borrows the
//! catalog immutably, so one catalog can serve any number of parses, from any
//! number of threads.

use std::collections::HashMap;

use tracing::warn;

use crate::group::OptionGroup;
use crate::option::{OptionSpec, strip_leading_hyphens};

/// Registry of recognised options and groups.
///
/// Names are unique across the catalog: adding an option whose short or long
/// name is already registered replaces the option holding that name.
///
/// # Examples
///
/// ```
/// use cmdline_options_core::{OptionGroup, OptionSpec, Options};
///
/// let options = Options::new()
///     .with_option(OptionSpec::short("a").with_long("enable-a"))
///     .with_option(OptionSpec::short("b").with_long("bfile").with_arg())
///     .with_group(
///         OptionGroup::new()
///             .with_option(OptionSpec::short("l"))
///             .with_option(OptionSpec::short("r"))
///             .required(),
///     );
///
/// assert!(options.has_option("-a"));
/// assert!(options.has_option("bfile"));
/// assert_eq!(options.option("--enable-a").map(|o| o.key()), Some("a"));
/// assert!(options.group_of(options.option("l").unwrap()).is_some());
/// assert_eq!(options.len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Options {
    options: Vec<OptionSpec>,
    short_index: HashMap<String, usize>,
    long_index: HashMap<String, usize>,
    groups: Vec<OptionGroup>,
    group_index: HashMap<String, usize>,
}

impl Options {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option and returns the catalog.
    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.add_option(option);
        self
    }

    /// Adds a group and returns the catalog.
    pub fn with_group(mut self, group: OptionGroup) -> Self {
        self.add_group(group);
        self
    }

    /// Adds an option, replacing any option that shares its identity or one
    /// of its names.
    ///
    /// A replaced group member is replaced inside its group too, and the new
    /// option loses its `required` flag like every other member.
    pub fn add_option(&mut self, mut option: OptionSpec) -> &mut Self {
        let mut owner = None;
        for (idx, group) in self.groups.iter_mut().enumerate() {
            if owner.is_none() {
                if group.replace_clashing(&option) {
                    owner = Some(idx);
                }
            } else if group.remove_clashing(&option) {
                warn!(option = %option.display_name(), group = idx, "Option removed from group");
            }
        }
        if owner.is_some() {
            option.required = false;
        }

        self.insert_option(option);
        self.reindex();
        self
    }

    /// Adds a group. Members are registered as options and lose their own
    /// `required` flag: the group's flag decides instead. An option belongs
    /// to one group at most, so a member already in another group is moved
    /// out of it.
    pub fn add_group(&mut self, mut group: OptionGroup) -> &mut Self {
        for member in group.options_mut() {
            member.required = false;
        }
        for member in group.options() {
            for (idx, existing) in self.groups.iter_mut().enumerate() {
                if existing.remove_clashing(member) {
                    warn!(
                        option = %member.display_name(),
                        previous = idx,
                        "Option moved to a new group"
                    );
                }
            }
            self.insert_option(member.clone());
        }
        self.groups.push(group);
        self.reindex();
        self
    }

    fn insert_option(&mut self, option: OptionSpec) {
        if let Some(existing) = self.options.iter_mut().find(|o| **o == option) {
            *existing = option;
            return;
        }

        let before = self.options.len();
        self.options.retain(|existing| !existing.shares_name(&option));
        if self.options.len() != before {
            warn!(option = %option.display_name(), "Option replaces a previously registered name");
        }
        self.options.push(option);
    }

    /// Looks up an option by short or long name (leading hyphens ignored,
    /// short names checked first).
    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        let name = strip_leading_hyphens(name);
        self.short_option(name).or_else(|| self.long_option(name))
    }

    /// Looks up an option by exact short name.
    pub fn short_option(&self, name: &str) -> Option<&OptionSpec> {
        self.short_index.get(name).map(|&idx| &self.options[idx])
    }

    /// Looks up an option by exact long name.
    pub fn long_option(&self, name: &str) -> Option<&OptionSpec> {
        self.long_index.get(name).map(|&idx| &self.options[idx])
    }

    /// Returns `true` if `name` resolves to an option.
    pub fn has_option(&self, name: &str) -> bool {
        self.option(name).is_some()
    }

    /// Returns `true` if `name` (hyphens ignored) is a short name.
    pub fn has_short_option(&self, name: &str) -> bool {
        self.short_option(strip_leading_hyphens(name)).is_some()
    }

    /// Returns `true` if `name` (hyphens ignored) is a long name.
    pub fn has_long_option(&self, name: &str) -> bool {
        self.long_option(strip_leading_hyphens(name)).is_some()
    }

    /// Long names starting with `prefix`, in catalog order. An exact match
    /// is returned alone.
    pub fn long_names_matching(&self, prefix: &str) -> Vec<&str> {
        if let Some(exact) = self.long_option(prefix) {
            return exact.long.as_deref().into_iter().collect();
        }
        self.options
            .iter()
            .filter_map(|option| option.long.as_deref())
            .filter(|long| long.starts_with(prefix))
            .collect()
    }

    /// All options in insertion order.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Options marked required, in insertion order.
    pub fn required_options(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.iter().filter(|option| option.required)
    }

    /// All groups in insertion order.
    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    /// The group `option` belongs to, if any.
    pub fn group_of(&self, option: &OptionSpec) -> Option<&OptionGroup> {
        self.group_index_of(option).map(|idx| &self.groups[idx])
    }

    pub(crate) fn group_index_of(&self, option: &OptionSpec) -> Option<usize> {
        self.group_index.get(option.key()).copied()
    }

    /// Number of registered options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns `true` if no options are registered.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    fn reindex(&mut self) {
        self.short_index.clear();
        self.long_index.clear();
        self.group_index.clear();
        for (idx, option) in self.options.iter().enumerate() {
            if let Some(short) = &option.short {
                self.short_index.insert(short.clone(), idx);
            }
            if let Some(long) = &option.long {
                self.long_index.insert(long.clone(), idx);
            }
        }
        for (idx, group) in self.groups.iter().enumerate() {
            for member in group.options() {
                self.group_index.insert(member.key().to_string(), idx);
            }
        }
    }
}
