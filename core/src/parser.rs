//! The parser engine.
//!
//! [`Parser`] pulls [`Token`]s from its [`Dialect`] one argument at a time,
//! matches them against a borrowed [`Options`] catalog, collects option
//! values and group selections, and finishes with the required-option
//! check. All state of a parse lives on the stack of [`Parser::parse`].

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::command_line::CommandLine;
use crate::dialect::{Dialect, DialectKind, Matcher, Token};
use crate::error::{ParseError, Result};
use crate::group::Selection;
use crate::option::{OptionSpec, strip_quotes};
use crate::options::Options;
use crate::validate::missing_required;

/// Knobs shared by every dialect.
///
/// # Examples
///
/// ```
/// use cmdline_options_core::ParseSettings;
///
/// let settings = ParseSettings::default().with_stop_at_non_option(true);
/// assert!(settings.stop_at_non_option);
/// assert!(settings.strip_quotes);
/// assert!(!settings.partial_matching);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseSettings {
    /// Halt at the first positional or unrecognised token and keep the rest
    /// of the input as positional arguments.
    pub stop_at_non_option: bool,
    /// Accept unique prefixes of long option names.
    pub partial_matching: bool,
    /// Strip one leading and one trailing `"` from option values.
    pub strip_quotes: bool,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            stop_at_non_option: false,
            partial_matching: false,
            strip_quotes: true,
        }
    }
}

impl ParseSettings {
    pub fn with_stop_at_non_option(mut self, stop: bool) -> Self {
        self.stop_at_non_option = stop;
        self
    }

    pub fn with_partial_matching(mut self, partial: bool) -> Self {
        self.partial_matching = partial;
        self
    }

    pub fn with_strip_quotes(mut self, strip: bool) -> Self {
        self.strip_quotes = strip;
        self
    }
}

/// Parses argument lists against an option catalog.
///
/// The dialect is a type parameter so custom tokenizers plug into the same
/// engine; [`DialectKind`] covers the built-in ones.
///
/// # Examples
///
/// ```
/// use cmdline_options_core::{OptionSpec, Options, Parser};
///
/// let options = Options::new()
///     .with_option(OptionSpec::short("a"))
///     .with_option(OptionSpec::short("c"))
///     .with_option(OptionSpec::short("b").with_arg());
///
/// let burst = Parser::posix().parse(&options, &["-acbtoast"]).unwrap();
/// let split = Parser::posix().parse(&options, &["-a", "-c", "-b", "toast"]).unwrap();
/// assert_eq!(burst, split);
///
/// let cmd = Parser::posix()
///     .stop_at_non_option(true)
///     .parse(&options, &["-z", "-a", "-btoast"])
///     .unwrap();
/// assert!(!cmd.has_option("a"));
/// assert_eq!(cmd.args(), ["-z", "-a", "-btoast"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser<D = DialectKind> {
    dialect: D,
    settings: ParseSettings,
}

impl Parser<DialectKind> {
    /// A parser using the bursting POSIX dialect.
    pub fn posix() -> Self {
        Self::new(DialectKind::Posix)
    }

    /// A parser using the GNU dialect.
    pub fn gnu() -> Self {
        Self::new(DialectKind::Gnu)
    }
}

impl<D: Dialect> Parser<D> {
    /// Creates a parser with default settings.
    pub fn new(dialect: D) -> Self {
        Self {
            dialect,
            settings: ParseSettings::default(),
        }
    }

    /// Replaces all settings.
    pub fn with_settings(mut self, settings: ParseSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets stop-at-first-non-option mode.
    pub fn stop_at_non_option(mut self, stop: bool) -> Self {
        self.settings.stop_at_non_option = stop;
        self
    }

    /// Enables unique-prefix matching of long options.
    pub fn partial_matching(mut self, partial: bool) -> Self {
        self.settings.partial_matching = partial;
        self
    }

    pub fn settings(&self) -> &ParseSettings {
        &self.settings
    }

    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Parses `args` against `options`.
    ///
    /// # Errors
    ///
    /// Any [`ParseError`]; no partial result is returned.
    pub fn parse<S: AsRef<str>>(&self, options: &Options, args: &[S]) -> Result<CommandLine> {
        self.parse_with_properties(options, args, std::iter::empty::<(&str, &str)>())
    }

    /// Parses `args`, then applies `properties` as defaults for options the
    /// arguments did not set.
    ///
    /// A property for an option taking values supplies its value. A property
    /// for a flag sets it when the value is `yes`, `true` or `1`.
    ///
    /// Options set from properties are recorded after the scanned ones, so
    /// they come last in [`CommandLine::options`].
    ///
    /// # Errors
    ///
    /// Any [`ParseError`]. A property key naming no option is an
    /// [`ParseError::UnrecognizedOption`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdline_options_core::{OptionSpec, Options, Parser};
    ///
    /// let options = Options::new()
    ///     .with_option(OptionSpec::short("a"))
    ///     .with_option(OptionSpec::short("b").with_arg().required());
    ///
    /// let cmd = Parser::posix()
    ///     .parse_with_properties(&options, &["-b", "cli"], [("a", "true"), ("b", "default")])
    ///     .unwrap();
    /// assert!(cmd.has_option("a"));
    /// assert_eq!(cmd.value("b"), Some("cli"));
    /// ```
    pub fn parse_with_properties<S, P, K, V>(
        &self,
        options: &Options,
        args: &[S],
        properties: P,
    ) -> Result<CommandLine>
    where
        S: AsRef<str>,
        P: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        debug!(
            dialect = self.dialect.name(),
            args = args.len(),
            options = options.len(),
            "Parsing arguments"
        );

        let mut scan = Scan::new(
            Matcher::new(options, self.settings.partial_matching),
            &self.dialect,
            &self.settings,
            args,
        );
        scan.run()?;
        scan.apply_properties(properties)?;

        let missing = missing_required(options, &scan.cmd, &scan.selections);
        if !missing.is_empty() {
            debug!(missing = ?missing, "Required options absent");
            return Err(ParseError::MissingOption { missing });
        }

        debug!(
            options = scan.cmd.options().len(),
            args = scan.cmd.args().len(),
            "Parse complete"
        );
        Ok(scan.cmd)
    }
}

/// State of one parse.
struct Scan<'a, 'o, D> {
    matcher: Matcher<'o>,
    dialect: &'a D,
    settings: &'a ParseSettings,
    args: Vec<&'a str>,
    cursor: usize,
    pending: VecDeque<Token<'o>>,
    selections: Vec<Selection>,
    cmd: CommandLine,
}

impl<'a, 'o, D: Dialect> Scan<'a, 'o, D> {
    fn new<S: AsRef<str>>(
        matcher: Matcher<'o>,
        dialect: &'a D,
        settings: &'a ParseSettings,
        args: &'a [S],
    ) -> Self {
        Self {
            selections: vec![Selection::default(); matcher.options().groups().len()],
            matcher,
            dialect,
            settings,
            args: args.iter().map(|arg| arg.as_ref()).collect(),
            cursor: 0,
            pending: VecDeque::new(),
            cmd: CommandLine::new(),
        }
    }

    fn fill(&mut self) -> bool {
        while self.pending.is_empty() {
            let Some(&arg) = self.args.get(self.cursor) else {
                return false;
            };
            self.cursor += 1;
            self.pending
                .extend(self.dialect.tokenize(&self.matcher, arg));
        }
        true
    }

    fn next_token(&mut self) -> Option<Token<'o>> {
        if self.fill() {
            self.pending.pop_front()
        } else {
            None
        }
    }

    fn peek_token(&mut self) -> Option<&Token<'o>> {
        if self.fill() {
            self.pending.front()
        } else {
            None
        }
    }

    /// Moves every argument not yet tokenized into the positional list.
    fn flush_rest(&mut self) {
        self.pending.clear();
        let rest = &self.args[self.cursor..];
        debug!(remaining = rest.len(), "Option scanning halted");
        for arg in rest {
            self.cmd.push_arg(*arg);
        }
        self.cursor = self.args.len();
    }

    fn run(&mut self) -> Result<()> {
        let stop = self.settings.stop_at_non_option;

        while let Some(token) = self.next_token() {
            trace!(token = ?token, "Token");
            match token {
                Token::Terminator => self.flush_rest(),
                Token::Argument(text) => {
                    self.cmd.push_arg(text);
                    if stop {
                        self.flush_rest();
                    }
                }
                Token::Option { option, value } => self.consume_option(option, value)?,
                Token::Unrecognized { raw, rest } => {
                    if !stop {
                        return Err(ParseError::UnrecognizedOption { token: raw });
                    }
                    self.cmd.push_arg(rest.unwrap_or(raw));
                    self.flush_rest();
                }
                Token::Ambiguous { raw, candidates } => {
                    if !stop {
                        return Err(ParseError::AmbiguousOption {
                            token: raw,
                            candidates,
                        });
                    }
                    self.cmd.push_arg(raw);
                    self.flush_rest();
                }
            }
        }
        Ok(())
    }

    fn select(&mut self, option: &OptionSpec) -> Result<()> {
        let options = self.matcher.options();
        if let Some(idx) = options.group_index_of(option) {
            self.selections[idx].select(&options.groups()[idx], option)?;
        }
        Ok(())
    }

    fn clean<'v>(&self, value: &'v str) -> &'v str {
        if self.settings.strip_quotes {
            strip_quotes(value)
        } else {
            value
        }
    }

    fn consume_option(&mut self, option: &'o OptionSpec, inline: Option<String>) -> Result<()> {
        self.select(option)?;

        let mut values = Vec::new();
        match inline {
            Some(text) if !option.arity.takes_values() => {
                trace!(option = option.key(), text = %text, "Flag given a value, kept as argument");
                self.pending.push_front(Token::Argument(text));
            }
            Some(text) => {
                let text = self.clean(&text).to_string();
                option.accept_value(&mut values, &text);
            }
            None if option.arity.takes_values() => {
                while let Some(text) = self.peek_token().and_then(Token::as_value).map(String::from) {
                    let text = self.clean(&text).to_string();
                    if !option.accept_value(&mut values, &text) {
                        break;
                    }
                    self.pending.pop_front();
                }
            }
            None => {}
        }

        if option.arity.takes_values() && values.is_empty() && !option.optional_arg {
            return Err(ParseError::MissingArgument {
                option: Box::new(option.clone()),
            });
        }

        trace!(option = option.key(), values = ?values, "Option consumed");
        self.cmd.push_option(option.clone(), values);
        Ok(())
    }

    fn apply_properties<P, K, V>(&mut self, properties: P) -> Result<()>
    where
        P: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let options = self.matcher.options();
        for (key, value) in properties {
            let (key, value) = (key.as_ref(), value.as_ref());
            let Some(option) = options.option(key) else {
                return Err(ParseError::UnrecognizedOption {
                    token: key.to_string(),
                });
            };
            if self.cmd.has_option(option.key()) {
                continue;
            }

            let mut values = Vec::new();
            if option.arity.takes_values() {
                option.accept_value(&mut values, value);
            } else if !is_truthy(value) {
                debug!(option = option.key(), value, "Property does not enable flag");
                continue;
            }

            if let Some(idx) = options.group_index_of(option) {
                if self.selections[idx].conflicts_with(option) {
                    warn!(
                        option = option.key(),
                        group = %options.groups()[idx],
                        "Property ignored, group already has a selection"
                    );
                    continue;
                }
                self.selections[idx].select(&options.groups()[idx], option)?;
            }

            debug!(option = option.key(), values = ?values, "Property applied");
            self.cmd.push_option(option.clone(), values);
        }
        Ok(())
    }
}

fn is_truthy(value: &str) -> bool {
    ["yes", "true", "1"]
        .iter()
        .any(|word| value.eq_ignore_ascii_case(word))
}
