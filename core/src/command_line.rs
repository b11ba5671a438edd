//! Parse results.
//!
//! A [`CommandLine`] is built by the parser engine and frozen when returned.
//! It owns every value it holds, so it outlives the catalog borrow and two
//! parses never share state.

use std::collections::HashMap;

use serde::Serialize;

use crate::group::OptionGroup;
use crate::option::{OptionSpec, strip_leading_hyphens};

/// One recognised occurrence of an option and the values it consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedOption {
    /// Definition of the option, copied from the catalog.
    pub option: OptionSpec,
    /// Values consumed by this occurrence, in order.
    pub values: Vec<String>,
}

impl ParsedOption {
    fn is(&self, name: &str) -> bool {
        self.option.short.as_deref() == Some(name) || self.option.long.as_deref() == Some(name)
    }
}

/// The structured outcome of a successful parse.
///
/// Lookups accept either name of an option, with or without leading
/// hyphens. An option given several times has several entries; value reads
/// concatenate them in order.
///
/// # Examples
///
/// ```
/// use cmdline_options_core::{OptionSpec, Options, Parser};
///
/// let options = Options::new()
///     .with_option(OptionSpec::short("a").with_long("enable-a"))
///     .with_option(OptionSpec::short("b").with_long("bfile").with_arg());
///
/// let cmd = Parser::posix()
///     .parse(&options, &["-a", "--bfile", "toast", "foo", "bar"])
///     .unwrap();
///
/// assert!(cmd.has_option("enable-a"));
/// assert_eq!(cmd.value("b"), Some("toast"));
/// assert_eq!(cmd.value_or("c", "none"), "none");
/// assert_eq!(cmd.args(), ["foo", "bar"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandLine {
    options: Vec<ParsedOption>,
    args: Vec<String>,
}

impl CommandLine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_option(&mut self, option: OptionSpec, values: Vec<String>) {
        self.options.push(ParsedOption { option, values });
    }

    pub(crate) fn push_arg(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }

    fn occurrences<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a ParsedOption> + use<'a> {
        let name = strip_leading_hyphens(name).to_string();
        self.options.iter().filter(move |parsed| parsed.is(&name))
    }

    /// Returns `true` if the option appeared at least once.
    pub fn has_option(&self, name: &str) -> bool {
        self.occurrences(name).next().is_some()
    }

    /// First value of the option.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.value_at(name, 0)
    }

    /// Value at `index` across all occurrences.
    pub fn value_at(&self, name: &str, index: usize) -> Option<&str> {
        self.occurrences(name)
            .flat_map(|parsed| parsed.values.iter())
            .nth(index)
            .map(String::as_str)
    }

    /// First value of the option, or `default`.
    pub fn value_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.value(name).unwrap_or(default)
    }

    /// All values of the option, `None` if it has none.
    pub fn values(&self, name: &str) -> Option<Vec<&str>> {
        let values: Vec<&str> = self
            .occurrences(name)
            .flat_map(|parsed| parsed.values.iter().map(String::as_str))
            .collect();
        (!values.is_empty()).then_some(values)
    }

    /// Values of the option read as key/value pairs.
    ///
    /// Each occurrence contributes its values two at a time; a trailing lone
    /// value maps to `"true"`. Later pairs overwrite earlier keys. Empty when
    /// the option is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdline_options_core::{OptionSpec, Options, Parser};
    ///
    /// let options = Options::new().with_option(
    ///     OptionSpec::short("D").with_args(2).with_value_separator('=').with_optional_arg(),
    /// );
    /// let cmd = Parser::gnu()
    ///     .parse(&options, &["-Dparam1=value1", "-Dparam3", "-Dparam4=value4"])
    ///     .unwrap();
    ///
    /// let props = cmd.values_as_map("D");
    /// assert_eq!(props["param1"], "value1");
    /// assert_eq!(props["param3"], "true");
    /// assert_eq!(props["param4"], "value4");
    /// ```
    pub fn values_as_map(&self, name: &str) -> HashMap<String, String> {
        let mut map = HashMap::new();
        for parsed in self.occurrences(name) {
            for pair in parsed.values.chunks(2) {
                let value = pair.get(1).map_or("true", String::as_str);
                map.insert(pair[0].clone(), value.to_string());
            }
        }
        map
    }

    /// Key of the member of `group` that was given, if any.
    pub fn selected(&self, group: &OptionGroup) -> Option<&str> {
        self.options
            .iter()
            .find(|parsed| group.contains(&parsed.option))
            .map(|parsed| parsed.option.key())
    }

    /// Recognised occurrences in consumption order.
    pub fn options(&self) -> &[ParsedOption] {
        &self.options
    }

    /// Positional arguments in input order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Consumes the result, returning the positional arguments.
    pub fn into_args(self) -> Vec<String> {
        self.args
    }
}
