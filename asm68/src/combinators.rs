//! Hand-built parser combinators.
//!
//! A parser is anything callable as `&str -> ParseResult`: it either
//! consumes a prefix of its input and succeeds, or fails with the input
//! untouched and (possibly) a typed error. The leaf parsers below are
//! plain functions; the combinators are macros so an arbitrary number of
//! parsers can be strung together without boxing.
//!
//! Error discipline: every result starts with the `UnknownError`
//! placeholder, and `set_error!` only ever replaces that placeholder, so
//! the most specific error encountered survives to the caller.

use crate::error::ErrorKind;

/// Outcome of applying a parser to an input window.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseResult<'a> {
    pub ok: bool,
    /// Input left over after the consumed prefix (the untouched input on
    /// failure).
    pub rest: &'a str,
    /// The consumed prefix.
    pub parsed: &'a str,
    pub error: ErrorKind,
}

impl<'a> ParseResult<'a> {
    pub fn success(rest: &'a str, parsed: &'a str) -> ParseResult<'a> {
        ParseResult {
            ok: true,
            rest,
            parsed,
            error: ErrorKind::UnknownError,
        }
    }

    pub fn failure(input: &'a str) -> ParseResult<'a> {
        ParseResult {
            ok: false,
            rest: input,
            parsed: "",
            error: ErrorKind::UnknownError,
        }
    }

    pub fn failure_with(input: &'a str, error: ErrorKind) -> ParseResult<'a> {
        ParseResult {
            ok: false,
            rest: input,
            parsed: "",
            error,
        }
    }
}

/// Runs every parser in order, threading the remainder through
/// regardless of failures; the overall result is the last parser's.
macro_rules! seq {
    ($input:expr, $($parser:expr),+ $(,)?) => {{
        let mut res = $crate::combinators::ParseResult::success($input, "");
        $( res = ($parser)(res.rest); )+
        res
    }};
}

/// Runs parsers in order and stops at the first failure, reporting it.
macro_rules! seq_next {
    ($input:expr, $($parser:expr),+ $(,)?) => {{
        let mut res = $crate::combinators::ParseResult::success($input, "");
        loop {
            $(
                res = ($parser)(res.rest);
                if !res.ok {
                    break;
                }
            )+
            break;
        }
        res
    }};
}

/// Ordered choice: the first parser to succeed on the input wins; if none
/// does, the last parser's failure is reported.
macro_rules! any_of {
    ($input:expr, $($parser:expr),+ $(,)?) => {{
        let input = $input;
        let mut res = $crate::combinators::ParseResult::failure(input);
        loop {
            $(
                res = ($parser)(input);
                if res.ok {
                    break;
                }
            )+
            break;
        }
        res
    }};
}

/// Predicate conjunction: every parser must succeed against the same
/// input. The result is the last parser's (so it advances exactly once),
/// or the first failure.
macro_rules! all_of {
    ($input:expr, $($parser:expr),+ $(,)?) => {{
        let input = $input;
        let mut res = $crate::combinators::ParseResult::failure(input);
        loop {
            $(
                res = ($parser)(input);
                if !res.ok {
                    break;
                }
            )+
            break;
        }
        res
    }};
}

/// Applies the parser one or more times; fails if it never matches.
macro_rules! while1 {
    ($input:expr, $parser:expr) => {{
        let input = $input;
        let mut rest = input;
        let mut matched = false;
        loop {
            let res = ($parser)(rest);
            if !res.ok || res.parsed.is_empty() {
                break;
            }
            matched = true;
            rest = res.rest;
        }
        if matched {
            let consumed = input.len() - rest.len();
            $crate::combinators::ParseResult::success(rest, &input[..consumed])
        } else {
            $crate::combinators::ParseResult::failure(input)
        }
    }};
}

/// `first` then `second`; keeps `first`'s consumed span and `second`'s
/// remainder.
macro_rules! then {
    ($input:expr, $first:expr, $second:expr) => {{
        let input = $input;
        let first = ($first)(input);
        if first.ok {
            let second = ($second)(first.rest);
            if second.ok {
                $crate::combinators::ParseResult {
                    ok: true,
                    rest: second.rest,
                    parsed: first.parsed,
                    error: $crate::error::ErrorKind::UnknownError,
                }
            } else {
                $crate::combinators::ParseResult::failure_with(input, second.error)
            }
        } else {
            first
        }
    }};
}

/// `head`, then `body` delimited by `tail`; the result carries `body`'s
/// consumed span.
macro_rules! between {
    ($input:expr, $head:expr, $body:expr, $tail:expr) => {{
        let head = ($head)($input);
        if head.ok {
            $crate::combinators::then!(head.rest, $body, $tail)
        } else {
            head
        }
    }};
}

/// `primary` optionally followed by `extension`.
macro_rules! optional {
    ($input:expr, $primary:expr, $extension:expr) => {{
        let primary = ($primary)($input);
        if primary.ok {
            let extension = ($extension)(primary.rest);
            if extension.ok {
                extension
            } else {
                primary
            }
        } else {
            primary
        }
    }};
}

/// Runs the parser for its offset and side effects but never fails.
macro_rules! always {
    ($input:expr, $parser:expr) => {{
        let res = ($parser)($input);
        $crate::combinators::ParseResult::success(res.rest, res.parsed)
    }};
}

/// Calls `f` with the consumed span on success.
macro_rules! map {
    ($input:expr, $parser:expr, $f:expr) => {{
        let res = ($parser)($input);
        if res.ok {
            ($f)(res.parsed);
        }
        res
    }};
}

/// Replaces an `UnknownError` placeholder with `error`; a specific error
/// is never overwritten.
macro_rules! set_error {
    ($input:expr, $parser:expr, $error:expr) => {{
        let mut res = ($parser)($input);
        if !res.ok {
            if let $crate::error::ErrorKind::UnknownError = res.error {
                res.error = $error;
            }
        }
        res
    }};
}

pub(crate) use {
    all_of, always, any_of, between, map, optional, seq, seq_next, set_error, then, while1,
};

/// Matches exactly `expected`, reporting `MissingCharacter` otherwise.
pub fn ch(input: &str, expected: char) -> ParseResult<'_> {
    match input.chars().next() {
        Some(c) if c == expected => {
            let len = c.len_utf8();
            ParseResult::success(&input[len..], &input[..len])
        }
        _ => ParseResult::failure_with(input, ErrorKind::MissingCharacter(expected)),
    }
}

/// Matches any single character except `unexpected`.
pub fn not_ch(input: &str, unexpected: char) -> ParseResult<'_> {
    match input.chars().next() {
        Some(c) if c != unexpected => {
            let len = c.len_utf8();
            ParseResult::success(&input[len..], &input[..len])
        }
        _ => ParseResult::failure(input),
    }
}

/// Matches the literal string `expected`.
pub fn literal<'a>(input: &'a str, expected: &str) -> ParseResult<'a> {
    if input.len() >= expected.len() && input.starts_with(expected) {
        ParseResult::success(&input[expected.len()..], &input[..expected.len()])
    } else {
        ParseResult::failure(input)
    }
}

/// Advances over `expected.len()` characters provided they do NOT spell
/// `expected`.
pub fn not_literal<'a>(input: &'a str, expected: &str) -> ParseResult<'a> {
    if input.len() >= expected.len() && !input.starts_with(expected) {
        ParseResult::success(&input[expected.len()..], &input[..expected.len()])
    } else {
        ParseResult::failure(input)
    }
}

/// End of line: `\n`, `\r`, `\r\n`, `\0` or end of input.
pub fn endl(input: &str) -> ParseResult<'_> {
    if input.is_empty() {
        return ParseResult::success(input, "");
    }
    any_of!(
        input,
        |s| ch(s, '\n'),
        |s| ch(s, '\0'),
        |s| optional!(s, |s| ch(s, '\r'), |s| ch(s, '\n'))
    )
}

pub fn not_endl(input: &str) -> ParseResult<'_> {
    if input.is_empty() {
        return ParseResult::failure(input);
    }
    all_of!(
        input,
        |s| not_ch(s, '\n'),
        |s| not_ch(s, '\0'),
        |s| not_ch(s, '\r')
    )
}

/// One or more spaces or tabs.
pub fn whitespace(input: &str) -> ParseResult<'_> {
    while1!(input, |s| any_of!(s, |s| ch(s, ' '), |s| ch(s, '\t')))
}

fn ascii_alphabet(input: &str) -> ParseResult<'_> {
    match input.chars().next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {
            ParseResult::success(&input[1..], &input[..1])
        }
        _ => ParseResult::failure(input),
    }
}

/// One or more of `[A-Za-z0-9_]`.
pub fn word(input: &str) -> ParseResult<'_> {
    while1!(input, ascii_alphabet)
}

pub fn digit(input: &str) -> ParseResult<'_> {
    match input.chars().next() {
        Some(c) if c.is_ascii_digit() => ParseResult::success(&input[1..], &input[..1]),
        _ => ParseResult::failure(input),
    }
}

/// A decimal literal: an optional sign followed by at least one digit.
pub fn dec_number(input: &str) -> ParseResult<'_> {
    let bytes = input.as_bytes();
    let mut idx = 0;
    if idx < bytes.len() && (bytes[idx] == b'+' || bytes[idx] == b'-') {
        idx += 1;
    }
    let digits_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    if idx > digits_start {
        ParseResult::success(&input[idx..], &input[..idx])
    } else {
        ParseResult::failure(input)
    }
}

fn hex_digit(input: &str) -> ParseResult<'_> {
    match input.chars().next() {
        Some(c) if c.is_ascii_hexdigit() => ParseResult::success(&input[1..], &input[..1]),
        _ => ParseResult::failure(input),
    }
}

/// One or more hex digits (without the `$` prefix).
pub fn hex_digits(input: &str) -> ParseResult<'_> {
    while1!(input, hex_digit)
}

/// Consumes the remainder of the current line including its terminator.
pub fn skip_line(input: &str) -> ParseResult<'_> {
    seq!(input, |s| while1!(s, not_endl), endl)
}

/// `;` up to and including the end of the line.
pub fn comment(input: &str) -> ParseResult<'_> {
    seq_next!(input, |s| ch(s, ';'), skip_line)
}

/// A label definition: `word ':'`. The parsed span is the bare name.
pub fn label_def(input: &str) -> ParseResult<'_> {
    then!(input, word, |s| ch(s, ':'))
}
