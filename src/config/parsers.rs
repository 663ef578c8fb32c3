//! Grammar of the `key=value` settings format, following `java.util.Properties`.
//!
//! Natural lines ending in an odd number of backslashes continue on the next
//! line, whose leading whitespace is dropped; [`logical_lines`] joins them.
//! Each logical line is then parsed with [`line`]:
//!
//! ```text
//! line      = blank / comment / entry
//! blank     = *WS
//! comment   = *WS ("#" / "!") *CHAR
//! entry     = *WS key separator value
//! separator = *WS [("=" / ":") *WS]
//! key       = 1*(escape / CHAR except WS, "=", ":" and "\")
//! value     = *(escape / CHAR except "\")
//! escape    = "\" ("u" 4HEXDIG / "t" / "n" / "r" / "f" / CHAR except "u")
//! WS        = SP / HTAB / FF
//! ```

use chumsky::{error::SimpleReason, prelude::*};

const SP: char = 0x20 as char;
const HTAB: char = 0x09 as char;
const FF: char = 0x0C as char;
const BACKSLASH: char = 0x5C as char;

fn is_ws(c: &char) -> bool {
    [SP, HTAB, FF].contains(c)
}

fn is_comment(line: &str) -> bool {
    line.trim_start_matches(|c: char| is_ws(&c))
        .starts_with(|c: char| c == '#' || c == '!')
}

fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == BACKSLASH).count() % 2 == 1
}

/// Joins continued lines. Yields the 1-based number of the first natural line
/// of each logical line together with its text.
pub(super) fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut logical = Vec::new();
    let mut lines = text.lines().enumerate();

    while let Some((number, first)) = lines.next() {
        let mut line = first.to_owned();

        if !is_comment(first) {
            while continues(&line) {
                line.pop();
                match lines.next() {
                    Some((_, next)) => line.push_str(next.trim_start_matches(|c: char| is_ws(&c))),
                    None => break,
                }
            }
        }

        logical.push((number + 1, line));
    }

    logical
}

fn ws() -> impl Parser<char, (), Error = Simple<char>> {
    filter(is_ws).repeated().ignored()
}

fn comment() -> impl Parser<char, (), Error = Simple<char>> {
    ws().then(one_of("#!")).then(any().repeated()).ignored()
}

// \uXXXX
fn unicode() -> impl Parser<char, char, Error = Simple<char>> {
    just('u').ignore_then(
        filter(|c: &char| c.is_ascii_hexdigit())
            .repeated()
            .exactly(4)
            .collect::<String>()
            .try_map(|digits, span| {
                u32::from_str_radix(&digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| Simple::custom(span, format!("invalid escape \\u{digits}")))
            }),
    )
}

fn escape() -> impl Parser<char, char, Error = Simple<char>> {
    just(BACKSLASH).ignore_then(choice((
        unicode(),
        just('t').to(HTAB),
        just('n').to('\n'),
        just('r').to('\r'),
        just('f').to(FF),
        filter(|c: &char| *c != 'u'),
    )))
}

fn key() -> impl Parser<char, String, Error = Simple<char>> {
    escape()
        .or(filter(|c: &char| {
            !is_ws(c) && *c != '=' && *c != ':' && *c != BACKSLASH
        }))
        .repeated()
        .at_least(1)
        .collect::<String>()
}

fn separator() -> impl Parser<char, (), Error = Simple<char>> {
    ws().then(one_of("=:").then(ws()).or_not()).ignored()
}

fn value() -> impl Parser<char, String, Error = Simple<char>> {
    escape()
        .or(filter(|c: &char| *c != BACKSLASH))
        .repeated()
        .collect::<String>()
}

fn entry() -> impl Parser<char, (String, String), Error = Simple<char>> {
    ws().ignore_then(key())
        .then_ignore(separator())
        .then(value())
}

/// A single logical line. Blank and comment lines yield `None`.
pub(super) fn line() -> impl Parser<char, Option<(String, String)>, Error = Simple<char>> {
    choice((comment().to(None), entry().map(Some), ws().to(None))).then_ignore(end())
}

fn quoted(c: Option<&char>) -> String {
    match c {
        Some(c) => format!("'{}'", c.escape_default()),
        None => "end of line".to_owned(),
    }
}

/// Describes a parse error as `column N: ...`
pub(super) fn describe(err: &Simple<char>) -> String {
    let column = err.span().start + 1;

    if let SimpleReason::Custom(message) = err.reason() {
        return format!("column {column}: {message}");
    }

    let mut expected: Vec<String> = err.expected().map(|c| quoted(c.as_ref())).collect();
    expected.sort();
    expected.dedup();

    let found = quoted(err.found());
    if expected.is_empty() {
        format!("column {column}: unexpected {found}")
    } else {
        format!(
            "column {column}: found {found}, expected {}",
            expected.join(" or ")
        )
    }
}
