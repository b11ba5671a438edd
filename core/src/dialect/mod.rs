//! Pluggable tokenization dialects.
//!
//! A [`Dialect`] turns one raw argument into the [`Token`]s the parser
//! engine consumes. Dialects only decide syntax: which option a token names
//! and which text is attached to it. Value collection, group selection and
//! validation are shared by every dialect and live in the engine.

pub mod gnu;
pub mod posix;

use serde::{Deserialize, Serialize};

use crate::option::OptionSpec;
use crate::options::Options;

pub use gnu::GnuDialect;
pub use posix::PosixDialect;

/// One decision produced by a dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'o> {
    /// `--`: every later argument is positional.
    Terminator,
    /// A recognised option, possibly with text attached in the same argument.
    Option {
        option: &'o OptionSpec,
        value: Option<String>,
    },
    /// Plain text: a positional argument or an option value.
    Argument(String),
    /// Option syntax that names no catalog entry.
    ///
    /// `rest` is the unpeeled suffix of a partially burst cluster, which
    /// becomes the first positional argument when scanning halts here.
    Unrecognized { raw: String, rest: Option<String> },
    /// An abbreviated long option matching several entries.
    Ambiguous {
        raw: String,
        candidates: Vec<String>,
    },
}

impl Token<'_> {
    /// Text of the token when it is awaited as an option value.
    ///
    /// Hyphen-leading text that names no option is still a value.
    pub(crate) fn as_value(&self) -> Option<&str> {
        match self {
            Token::Argument(text)
            | Token::Unrecognized { raw: text, .. }
            | Token::Ambiguous { raw: text, .. } => Some(text.as_str()),
            Token::Terminator | Token::Option { .. } => None,
        }
    }
}

/// Result of resolving a long option name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'o> {
    Found(&'o OptionSpec),
    Ambiguous(Vec<String>),
    Missing,
}

/// Catalog lookups shared by the dialects.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'o> {
    options: &'o Options,
    partial: bool,
}

impl<'o> Matcher<'o> {
    /// Creates a matcher; `partial` enables unique-prefix long names.
    pub fn new(options: &'o Options, partial: bool) -> Self {
        Self { options, partial }
    }

    /// The catalog being matched against.
    pub fn options(&self) -> &'o Options {
        self.options
    }

    /// Exact lookup by short or long name, leading hyphens ignored.
    pub fn exact(&self, name: &str) -> Option<&'o OptionSpec> {
        self.options.option(name)
    }

    /// Exact lookup of a single-character short name.
    pub fn short(&self, ch: char) -> Option<&'o OptionSpec> {
        let mut buf = [0u8; 4];
        self.options.short_option(ch.encode_utf8(&mut buf))
    }

    /// Resolves the name of a `--` token: exact first, then a unique prefix
    /// of a long name when partial matching is on.
    pub fn lookup_long(&self, name: &str) -> Lookup<'o> {
        if let Some(option) = self.exact(name) {
            return Lookup::Found(option);
        }
        if !self.partial || name.is_empty() {
            return Lookup::Missing;
        }

        let candidates = self.options.long_names_matching(name);
        match candidates.as_slice() {
            [] => Lookup::Missing,
            [only] => self
                .options
                .long_option(only)
                .map_or(Lookup::Missing, Lookup::Found),
            _ => Lookup::Ambiguous(candidates.into_iter().map(String::from).collect()),
        }
    }
}

/// Tokenization policy for one command-line convention.
///
/// Implementations handle one raw argument at a time and never see the
/// arguments around it. `--` and `-` must come back as
/// [`Token::Terminator`] and [`Token::Argument`] respectively.
pub trait Dialect {
    fn name(&self) -> &'static str;
    fn tokenize<'o>(&self, matcher: &Matcher<'o>, arg: &str) -> Vec<Token<'o>>;
}

/// Built-in dialects, selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialectKind {
    /// Short-option bursting (`-abc` is `-a -b -c`).
    #[default]
    Posix,
    /// Long options and attached short values (`-Dkey=value`), no bursting.
    Gnu,
}

impl Dialect for DialectKind {
    fn name(&self) -> &'static str {
        match self {
            DialectKind::Posix => PosixDialect.name(),
            DialectKind::Gnu => GnuDialect.name(),
        }
    }

    fn tokenize<'o>(&self, matcher: &Matcher<'o>, arg: &str) -> Vec<Token<'o>> {
        match self {
            DialectKind::Posix => PosixDialect.tokenize(matcher, arg),
            DialectKind::Gnu => GnuDialect.tokenize(matcher, arg),
        }
    }
}

impl std::fmt::Display for DialectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Splits `text` at the first `=`.
pub(crate) fn split_assignment(text: &str) -> (&str, Option<&str>) {
    match text.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (text, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Options {
        Options::new()
            .with_option(OptionSpec::short("b").with_long("bfile").with_arg())
            .with_option(OptionSpec::long_only("foo"))
            .with_option(OptionSpec::long_only("foobar"))
            .with_option(OptionSpec::long_only("verbose"))
    }

    #[test]
    fn test_lookup_long_exact_only_by_default() {
        let options = catalog();
        let matcher = Matcher::new(&options, false);

        assert!(matches!(matcher.lookup_long("bfile"), Lookup::Found(o) if o.key() == "b"));
        assert!(matches!(matcher.lookup_long("b"), Lookup::Found(o) if o.key() == "b"));
        assert_eq!(matcher.lookup_long("verb"), Lookup::Missing);
    }

    #[test]
    fn test_lookup_long_partial() {
        let options = catalog();
        let matcher = Matcher::new(&options, true);

        assert!(matches!(matcher.lookup_long("verb"), Lookup::Found(o) if o.key() == "verbose"));
        assert!(matches!(matcher.lookup_long("foo"), Lookup::Found(o) if o.key() == "foo"));
        assert_eq!(
            matcher.lookup_long("fo"),
            Lookup::Ambiguous(vec!["foo".to_string(), "foobar".to_string()])
        );
        assert_eq!(matcher.lookup_long("x"), Lookup::Missing);
    }

    #[test]
    fn test_dialect_kind_serde_names() {
        let kind: DialectKind = serde_json::from_str("\"gnu\"").unwrap();
        assert_eq!(kind, DialectKind::Gnu);
        assert_eq!(serde_json::to_string(&DialectKind::Posix).unwrap(), "\"posix\"");
        assert_eq!(DialectKind::default().to_string(), "posix");
    }

    #[test]
    fn test_split_assignment() {
        assert_eq!(split_assignment("name=value"), ("name", Some("value")));
        assert_eq!(split_assignment("zop==1"), ("zop", Some("=1")));
        assert_eq!(split_assignment("name"), ("name", None));
    }
}
