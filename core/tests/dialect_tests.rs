use cmdline_options_core::dialect::Matcher;
use cmdline_options_core::{
    CommandLine, Dialect, DialectKind, OptionSpec, Options, ParseError, Parser, Token,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn basic_options() -> Options {
    Options::new()
        .with_option(OptionSpec::short("a").with_long("enable-a"))
        .with_option(OptionSpec::short("b").with_long("bfile").with_arg())
        .with_option(OptionSpec::short("c").with_long("copt"))
}

fn posix(options: &Options, args: &[&str]) -> Result<CommandLine, ParseError> {
    Parser::posix().parse(options, args)
}

fn gnu(options: &Options, args: &[&str]) -> Result<CommandLine, ParseError> {
    Parser::gnu().parse(options, args)
}

/// A dialect that only knows `--name` and treats everything else as text.
struct LongOnly;

impl Dialect for LongOnly {
    fn name(&self) -> &'static str {
        "long-only"
    }

    fn tokenize<'o>(&self, matcher: &Matcher<'o>, arg: &str) -> Vec<Token<'o>> {
        if arg == "--" {
            return vec![Token::Terminator];
        }
        match arg.strip_prefix("--").map(|name| matcher.options().long_option(name)) {
            Some(Some(option)) => vec![Token::Option {
                option,
                value: None,
            }],
            Some(None) => vec![Token::Unrecognized {
                raw: arg.to_string(),
                rest: None,
            }],
            None => vec![Token::Argument(arg.to_string())],
        }
    }
}

// ---------------------------------------------------------------------------
// POSIX bursting
// ---------------------------------------------------------------------------

#[test]
fn test_posix_bursting() {
    let options = basic_options();
    let cmd = posix(&options, &["-acbtoast", "foo", "bar"]).unwrap();

    assert!(cmd.has_option("a"));
    assert!(cmd.has_option("c"));
    assert_eq!(cmd.value("b"), Some("toast"));
    assert_eq!(cmd.args(), ["foo", "bar"]);
}

#[test]
fn test_posix_bursting_equivalence() {
    let options = basic_options();
    let burst = posix(&options, &["-acbtoast"]).unwrap();
    let split = posix(&options, &["-a", "-c", "-b", "toast"]).unwrap();

    assert_eq!(burst, split);
}

#[test]
fn test_posix_burst_value_from_next_argument() {
    let options = basic_options();
    let cmd = posix(&options, &["-ab", "toast", "foo"]).unwrap();

    assert!(cmd.has_option("a"));
    assert_eq!(cmd.value("b"), Some("toast"));
    assert_eq!(cmd.args(), ["foo"]);
}

#[test]
fn test_posix_missing_arg_with_bursting() {
    let options = basic_options();
    let err = posix(&options, &["-acb"]).unwrap_err();

    assert!(matches!(err, ParseError::MissingArgument { ref option } if option.key() == "b"));
}

#[test]
fn test_posix_unrecognized_option_with_bursting() {
    let options = basic_options();
    let err = posix(&options, &["-adbtoast", "foo", "bar"]).unwrap_err();

    assert_eq!(err.to_string(), "unrecognized option: -adbtoast");
}

#[test]
fn test_posix_stop_bursting() {
    let options = basic_options();
    let cmd = Parser::posix()
        .stop_at_non_option(true)
        .parse(&options, &["-azc"])
        .unwrap();

    assert!(cmd.has_option("a"));
    assert!(!cmd.has_option("c"));
    assert_eq!(cmd.args(), ["zc"]);
}

#[test]
fn test_posix_stop_bursting_on_first_character() {
    let options = basic_options();
    let cmd = Parser::posix()
        .stop_at_non_option(true)
        .parse(&options, &["-zac", "-b", "x"])
        .unwrap();

    assert!(cmd.options().is_empty());
    assert_eq!(cmd.args(), ["-zac", "-b", "x"]);
}

#[test]
fn test_posix_stop_bursting_after_argument() {
    let options = basic_options();
    let cmd = Parser::posix()
        .stop_at_non_option(true)
        .parse(&options, &["-c", "foobar", "-btoast"])
        .unwrap();

    assert!(cmd.has_option("c"));
    assert_eq!(cmd.args(), ["foobar", "-btoast"]);
}

#[test]
fn test_posix_hyphen_value_attached() {
    let options = Options::new()
        .with_option(OptionSpec::short("t").with_arg())
        .with_option(OptionSpec::short("s").with_arg());
    let cmd = posix(&options, &["-t-something"]).unwrap();

    assert_eq!(cmd.value("t"), Some("-something"));
}

#[test]
fn test_posix_exact_match_wins_over_burst() {
    let options = Options::new()
        .with_option(OptionSpec::short("f"))
        .with_option(OptionSpec::short("o"))
        .with_option(OptionSpec::long_only("foo"))
        .with_option(OptionSpec::short("exec").with_arg());

    let cmd = posix(&options, &["-foo"]).unwrap();
    assert!(cmd.has_option("foo"));
    assert!(!cmd.has_option("f"));

    let cmd = posix(&options, &["-fo"]).unwrap();
    assert!(cmd.has_option("f"));
    assert!(cmd.has_option("o"));

    let cmd = posix(&options, &["-exec", "ls"]).unwrap();
    assert_eq!(cmd.value("exec"), Some("ls"));
}

#[test]
fn test_posix_double_dash_resolves_short_name() {
    let options = basic_options();
    let cmd = posix(&options, &["--b", "toast", "--enable-a"]).unwrap();

    assert_eq!(cmd.value("b"), Some("toast"));
    assert!(cmd.has_option("a"));
}

// ---------------------------------------------------------------------------
// GNU attached values
// ---------------------------------------------------------------------------

#[test]
fn test_gnu_attached_short_value() {
    let options = basic_options();

    let cmd = gnu(&options, &["-btoast", "foo"]).unwrap();
    assert_eq!(cmd.value("b"), Some("toast"));
    assert_eq!(cmd.args(), ["foo"]);

    let cmd = gnu(&options, &["-b=toast"]).unwrap();
    assert_eq!(cmd.value("b"), Some("toast"));
}

#[test]
fn test_gnu_short_with_equal() {
    let options = Options::new().with_option(OptionSpec::short("f").with_long("foo").with_arg());

    let cmd = gnu(&options, &["-f=bar"]).unwrap();
    assert_eq!(cmd.value("foo"), Some("bar"));

    let cmd = gnu(&options, &["--foo=bar"]).unwrap();
    assert_eq!(cmd.value("f"), Some("bar"));
}

#[test]
fn test_gnu_does_not_burst() {
    let options = basic_options();
    let cmd = gnu(&options, &["-ac", "x"]).unwrap();

    assert!(cmd.has_option("a"));
    assert!(!cmd.has_option("c"));
    assert_eq!(cmd.args(), ["c", "x"]);
}

#[test]
fn test_gnu_properties_style_option() {
    let options = Options::new().with_option(
        OptionSpec::short("D")
            .with_args(2)
            .with_value_separator('=')
            .with_optional_arg(),
    );
    let cmd = gnu(
        &options,
        &["-Dparam1=value1", "-Dparam3", "-Dparam4=value4", "rest"],
    )
    .unwrap();

    assert_eq!(
        cmd.values("D"),
        Some(vec!["param1", "value1", "param3", "param4", "value4"])
    );
    let map = cmd.values_as_map("D");
    assert_eq!(map["param3"], "true");
    assert_eq!(map["param4"], "value4");
    assert_eq!(cmd.args(), ["rest"]);
}

#[test]
fn test_gnu_multi_character_short_name() {
    let options = Options::new()
        .with_option(OptionSpec::short("e").with_arg())
        .with_option(OptionSpec::short("exec").with_arg());

    let cmd = gnu(&options, &["-exec", "ls", "-efile"]).unwrap();
    assert_eq!(cmd.value("exec"), Some("ls"));
    assert_eq!(cmd.value("e"), Some("file"));
}

#[test]
fn test_gnu_unrecognized_single_dash() {
    let options = basic_options();
    let err = gnu(&options, &["-xyz"]).unwrap_err();

    assert_eq!(err.to_string(), "unrecognized option: -xyz");
}

// ---------------------------------------------------------------------------
// Custom dialects
// ---------------------------------------------------------------------------

#[test]
fn test_custom_dialect_shares_engine() {
    let options = basic_options();
    let parser = Parser::new(LongOnly);

    let cmd = parser
        .parse(&options, &["--bfile", "-a", "--copt", "rest"])
        .unwrap();
    assert_eq!(cmd.value("b"), Some("-a"));
    assert!(cmd.has_option("c"));
    assert_eq!(cmd.args(), ["rest"]);

    let err = parser.parse(&options, &["--nope"]).unwrap_err();
    assert!(matches!(err, ParseError::UnrecognizedOption { .. }));
}

#[test]
fn test_dialect_kind_names() {
    assert_eq!(DialectKind::Posix.name(), "posix");
    assert_eq!(DialectKind::Gnu.name(), "gnu");
    assert_eq!(Parser::gnu().dialect(), &DialectKind::Gnu);
}
