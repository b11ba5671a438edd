//! GNU dialect: long options and attached short values, no bursting.

use super::{Dialect, Lookup, Matcher, Token, split_assignment};

/// Recognises `--name`, `--name=value`, `-n`, `-nvalue` and `-n=value`.
///
/// Only the first character of a single-dash token can be an option; the
/// rest of the token is its attached text.
#[derive(Debug, Clone, Copy, Default)]
pub struct GnuDialect;

impl Dialect for GnuDialect {
    fn name(&self) -> &'static str {
        "gnu"
    }

    fn tokenize<'o>(&self, matcher: &Matcher<'o>, arg: &str) -> Vec<Token<'o>> {
        if arg == "--" {
            return vec![Token::Terminator];
        }
        if arg == "-" || !arg.starts_with('-') {
            return vec![Token::Argument(arg.to_string())];
        }
        vec![option_token(matcher, arg)]
    }
}

fn option_token<'o>(matcher: &Matcher<'o>, arg: &str) -> Token<'o> {
    let double = arg.starts_with("--");
    let body = if double { &arg[2..] } else { &arg[1..] };

    if let Some(option) = matcher.exact(body) {
        return Token::Option {
            option,
            value: None,
        };
    }

    let (name, value) = split_assignment(body);
    if let Some(value) = value {
        if let Some(option) = matcher.exact(name) {
            return Token::Option {
                option,
                value: Some(value.to_string()),
            };
        }
    }

    if !double {
        let mut chars = body.chars();
        if let Some(option) = chars.next().and_then(|ch| matcher.short(ch)) {
            return Token::Option {
                option,
                value: Some(chars.as_str().to_string()),
            };
        }
    } else {
        match matcher.lookup_long(name) {
            Lookup::Found(option) => {
                return Token::Option {
                    option,
                    value: value.map(String::from),
                };
            }
            Lookup::Ambiguous(candidates) => {
                return Token::Ambiguous {
                    raw: arg.to_string(),
                    candidates,
                };
            }
            Lookup::Missing => {}
        }
    }

    Token::Unrecognized {
        raw: arg.to_string(),
        rest: None,
    }
}
