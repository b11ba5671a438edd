//! Option definitions.
//!
//! An [`OptionSpec`] describes one recognised switch: its short and/or long
//! name, how many argument values each occurrence takes, and the metadata a
//! help renderer reads. Specs are plain values built by chaining consuming
//! methods; parsing never mutates them; collected values live in the
//! [`CommandLine`](crate::CommandLine) a parse returns.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Number of argument values an option takes per occurrence.
///
/// Serialized as a plain number (`0`, `1`, `N`) or the string `"unlimited"`.
///
/// # Examples
///
/// ```
/// use cmdline_options_core::Arity;
///
/// assert!(!Arity::Zero.takes_values());
/// assert!(Arity::AtMost(2).allows_multiple());
/// assert_eq!(Arity::Unlimited.max(), None);
/// assert_eq!(Arity::AtMost(1).max(), Some(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "ArityRepr", into = "ArityRepr")]
pub enum Arity {
    /// A flag: no values, ever.
    #[default]
    Zero,
    /// Up to `n` values per occurrence. `AtMost(0)` behaves like [`Arity::Zero`].
    AtMost(usize),
    /// Any number of values.
    Unlimited,
}

impl Arity {
    /// Returns `true` if an occurrence can carry at least one value.
    pub fn takes_values(self) -> bool {
        match self {
            Arity::Zero => false,
            Arity::AtMost(n) => n > 0,
            Arity::Unlimited => true,
        }
    }

    /// Returns `true` if an occurrence can carry more than one value.
    pub fn allows_multiple(self) -> bool {
        match self {
            Arity::Zero => false,
            Arity::AtMost(n) => n > 1,
            Arity::Unlimited => true,
        }
    }

    /// Maximum number of values per occurrence, `None` when unlimited.
    pub fn max(self) -> Option<usize> {
        match self {
            Arity::Zero => Some(0),
            Arity::AtMost(n) => Some(n),
            Arity::Unlimited => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ArityRepr {
    Count(usize),
    Keyword(String),
}

impl TryFrom<ArityRepr> for Arity {
    type Error = String;

    fn try_from(repr: ArityRepr) -> Result<Self, Self::Error> {
        match repr {
            ArityRepr::Count(0) => Ok(Arity::Zero),
            ArityRepr::Count(n) => Ok(Arity::AtMost(n)),
            ArityRepr::Keyword(word) if word.eq_ignore_ascii_case("unlimited") => {
                Ok(Arity::Unlimited)
            }
            ArityRepr::Keyword(word) => Err(format!(
                "invalid arity '{word}', expected a number or \"unlimited\""
            )),
        }
    }
}

impl From<Arity> for ArityRepr {
    fn from(arity: Arity) -> Self {
        match arity {
            Arity::Zero => ArityRepr::Count(0),
            Arity::AtMost(n) => ArityRepr::Count(n),
            Arity::Unlimited => ArityRepr::Keyword("unlimited".to_string()),
        }
    }
}

/// Definition of one command-line option.
///
/// Identity is the pair of short and long name: two specs are equal when
/// both names match, regardless of arity or description.
///
/// # Examples
///
/// ```
/// use cmdline_options_core::{Arity, OptionSpec};
///
/// let file = OptionSpec::short("b")
///     .with_long("bfile")
///     .with_arg()
///     .required()
///     .with_description("set the value of [b]");
/// assert_eq!(file.key(), "b");
/// assert_eq!(file.arity, Arity::AtMost(1));
/// assert!(file.matches("--bfile"));
///
/// let props = OptionSpec::short("D").with_args(2).with_value_separator('=');
/// assert!(props.arity.allows_multiple());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Short name without the leading dash (e.g. `"b"`; may be multi-character).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    /// Long name without the leading dashes (e.g. `"bfile"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Values taken per occurrence.
    #[serde(default, rename = "args")]
    pub arity: Arity,
    /// The value may be omitted even though the arity is non-zero.
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional_arg: bool,
    /// Must appear on every command line.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Splits a single value into several (e.g. `=` for `-Dkey=value`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_separator: Option<char>,
    /// Display name of the value for usage text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg_name: Option<String>,
    /// Description for usage text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl OptionSpec {
    /// Creates a flag with the given short and/or long name.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdline_options_core::OptionSpec;
    ///
    /// let spec = OptionSpec::new(Some("v"), Some("verbose"));
    /// assert_eq!(spec.display_name(), "-v");
    /// assert!(!spec.arity.takes_values());
    /// ```
    pub fn new(short: Option<&str>, long: Option<&str>) -> Self {
        Self {
            short: short.map(String::from),
            long: long.map(String::from),
            ..Default::default()
        }
    }

    /// Creates a flag known by its short name.
    pub fn short(name: &str) -> Self {
        Self::new(Some(name), None)
    }

    /// Creates a flag known only by its long name.
    pub fn long_only(name: &str) -> Self {
        Self::new(None, Some(name))
    }

    /// Sets the long name.
    pub fn with_long(mut self, name: &str) -> Self {
        self.long = Some(name.to_string());
        self
    }

    /// Takes exactly one value per occurrence.
    pub fn with_arg(self) -> Self {
        self.with_args(1)
    }

    /// Takes up to `count` values per occurrence. Zero makes it a flag.
    pub fn with_args(mut self, count: usize) -> Self {
        self.arity = if count == 0 {
            Arity::Zero
        } else {
            Arity::AtMost(count)
        };
        self
    }

    /// Takes any number of values per occurrence.
    pub fn with_unlimited_args(mut self) -> Self {
        self.arity = Arity::Unlimited;
        self
    }

    /// Allows the value to be omitted. Implies at least one value if the
    /// spec was a flag.
    pub fn with_optional_arg(mut self) -> Self {
        if !self.arity.takes_values() {
            self.arity = Arity::AtMost(1);
        }
        self.optional_arg = true;
        self
    }

    /// Marks the option as mandatory.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the value separator.
    pub fn with_value_separator(mut self, separator: char) -> Self {
        self.value_separator = Some(separator);
        self
    }

    /// Sets the display name of the value.
    pub fn with_arg_name(mut self, name: &str) -> Self {
        self.arg_name = Some(name.to_string());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Returns the identifying name (short name preferred, falls back to long).
    pub fn key(&self) -> &str {
        self.short
            .as_deref()
            .or(self.long.as_deref())
            .unwrap_or_default()
    }

    /// Returns `true` if both options claim the same short or long name.
    pub(crate) fn shares_name(&self, other: &OptionSpec) -> bool {
        let short = self.short.is_some() && self.short == other.short;
        let long = self.long.is_some() && self.long == other.long;
        short || long
    }

    /// Returns the name as typed on a command line (`-b` or `--bfile`).
    pub fn display_name(&self) -> String {
        match (&self.short, &self.long) {
            (Some(short), _) => format!("-{short}"),
            (None, Some(long)) => format!("--{long}"),
            (None, None) => String::new(),
        }
    }

    /// Checks if this option is known by `name` (leading hyphens ignored).
    pub fn matches(&self, name: &str) -> bool {
        let name = strip_leading_hyphens(name);
        self.short.as_deref() == Some(name) || self.long.as_deref() == Some(name)
    }

    /// Appends `value` to `values`, splitting on the value separator.
    ///
    /// Splitting stops once the arity would be exceeded: the remaining text
    /// becomes the last value unsplit. Returns `false` without touching
    /// `values` when the option takes no values or the occurrence is full.
    pub(crate) fn accept_value(&self, values: &mut Vec<String>, value: &str) -> bool {
        if !self.arity.takes_values() {
            return false;
        }
        let max = self.arity.max();
        if max.is_some_and(|max| values.len() >= max) {
            return false;
        }

        let mut rest = value;
        if let Some(separator) = self.value_separator {
            while let Some(idx) = rest.find(separator) {
                if max.is_some_and(|max| values.len() + 1 == max) {
                    break;
                }
                values.push(rest[..idx].to_string());
                rest = &rest[idx + separator.len_utf8()..];
            }
        }
        values.push(rest.to_string());
        true
    }
}

impl PartialEq for OptionSpec {
    fn eq(&self, other: &Self) -> bool {
        self.short == other.short && self.long == other.long
    }
}

impl Eq for OptionSpec {}

impl Hash for OptionSpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.short.hash(state);
        self.long.hash(state);
    }
}

impl fmt::Display for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())?;
        if let (Some(_), Some(long)) = (&self.short, &self.long) {
            write!(f, ", --{long}")?;
        }
        if self.arity.takes_values() {
            let name = self.arg_name.as_deref().unwrap_or("arg");
            let ellipsis = if self.arity.allows_multiple() { "..." } else { "" };
            if self.optional_arg {
                write!(f, " [<{name}>{ellipsis}]")?;
            } else {
                write!(f, " <{name}>{ellipsis}")?;
            }
        }
        Ok(())
    }
}

/// Removes up to two leading hyphens (`--name` and `-n` become `name`, `n`).
pub fn strip_leading_hyphens(name: &str) -> &str {
    name.strip_prefix("--")
        .or_else(|| name.strip_prefix('-'))
        .unwrap_or(name)
}

/// Removes one leading and one trailing double quote.
pub(crate) fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}
