//! POSIX dialect with short-option bursting.

use super::{Dialect, Lookup, Matcher, Token, split_assignment};

/// Bursts clustered short options: `-acbtoast` is `-a -c -b toast` when `a`
/// and `c` are flags and `b` takes a value.
///
/// A single-dash token naming an option as a whole (`-foo`, `-b`) is that
/// option and is never burst.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixDialect;

impl Dialect for PosixDialect {
    fn name(&self) -> &'static str {
        "posix"
    }

    fn tokenize<'o>(&self, matcher: &Matcher<'o>, arg: &str) -> Vec<Token<'o>> {
        if arg == "--" {
            return vec![Token::Terminator];
        }
        if let Some(body) = arg.strip_prefix("--") {
            return vec![long_token(matcher, arg, body)];
        }
        match arg.strip_prefix('-') {
            Some(body) if !body.is_empty() => {
                if let Some(option) = matcher.exact(body) {
                    return vec![Token::Option {
                        option,
                        value: None,
                    }];
                }
                if body.chars().nth(1).is_none() {
                    return vec![unrecognized(arg)];
                }
                burst(matcher, arg, body)
            }
            _ => vec![Token::Argument(arg.to_string())],
        }
    }
}

fn long_token<'o>(matcher: &Matcher<'o>, raw: &str, body: &str) -> Token<'o> {
    let (name, value) = split_assignment(body);
    match matcher.lookup_long(name) {
        Lookup::Found(option) => Token::Option {
            option,
            value: value.map(String::from),
        },
        Lookup::Ambiguous(candidates) => Token::Ambiguous {
            raw: raw.to_string(),
            candidates,
        },
        Lookup::Missing => unrecognized(raw),
    }
}

fn burst<'o>(matcher: &Matcher<'o>, raw: &str, body: &str) -> Vec<Token<'o>> {
    let mut tokens = Vec::new();

    for (idx, ch) in body.char_indices() {
        let tail = &body[idx + ch.len_utf8()..];
        let Some(option) = matcher.short(ch) else {
            let rest = (idx > 0).then(|| body[idx..].to_string());
            tokens.push(Token::Unrecognized {
                raw: raw.to_string(),
                rest,
            });
            break;
        };

        if option.arity.takes_values() && !tail.is_empty() {
            tokens.push(Token::Option {
                option,
                value: Some(tail.to_string()),
            });
            break;
        }
        tokens.push(Token::Option {
            option,
            value: None,
        });
    }

    tokens
}

fn unrecognized<'o>(raw: &str) -> Token<'o> {
    Token::Unrecognized {
        raw: raw.to_string(),
        rest: None,
    }
}
