//! Operand parsers.
//!
//! `any_operand` tries the forms in a fixed order so the ambiguous
//! prefixes sort themselves out: immediates first (`#`), then registers,
//! then the parenthesised indirect forms from most to least specific, and
//! finally a bare absolute address or label.

use crate::combinators::{always, between, ch, digit, seq_next, whitespace, ParseResult};

/// Runs `call` against `s`, storing its captured value into `out` on
/// success; used to thread a mutable capture through a macro-composed
/// parser without the lifetime-inference issues closures hit here.
fn capture<'a, T>(
    s: &'a str,
    call: impl FnOnce(&'a str) -> (ParseResult<'a>, Option<T>),
    out: &mut Option<T>,
) -> ParseResult<'a> {
    let (res, val) = call(s);
    if res.ok {
        *out = val;
    }
    res
}
use crate::error::{ErrorKind, OperandKind};
use crate::expression::{parse_expr, Expr};
use crate::ParserSettings;
use emu68::DataSize;

/// One parsed effective address. Expression payloads stay symbolic until
/// encode time.
#[derive(Clone, PartialEq, Debug)]
pub enum Operand {
    DataRegister(u8),
    AddressRegister(u8),
    /// `(an)`
    Address(u8),
    /// `(an)+`
    AddressPost(u8),
    /// `-(an)`
    AddressPre(u8),
    /// `d(an)`
    AddressOffset { register: u8, offset: Expr },
    /// `(an, xn)` / `(d, an, xn)`; `index` is 0-7 for data registers and
    /// 8-15 for address registers.
    AddressIndex {
        register: u8,
        index: u8,
        offset: Option<Expr>,
    },
    AbsoluteShort(Expr),
    AbsoluteLong(Expr),
    Immediate(Expr),
}

impl Operand {
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::DataRegister(_) => OperandKind::DataRegister,
            Operand::AddressRegister(_) => OperandKind::AddressRegister,
            Operand::Address(_) => OperandKind::Address,
            Operand::AddressPost(_) => OperandKind::AddressPost,
            Operand::AddressPre(_) => OperandKind::AddressPre,
            Operand::AddressOffset { .. } => OperandKind::AddressOffset,
            Operand::AddressIndex { .. } => OperandKind::AddressIndex,
            Operand::AbsoluteShort(_) => OperandKind::AbsoluteShort,
            Operand::AbsoluteLong(_) => OperandKind::AbsoluteLong,
            Operand::Immediate(_) => OperandKind::Immediate,
        }
    }
}

pub(crate) type OperandOutcome<'a> = (ParseResult<'a>, Option<Operand>);

type OperandParser = for<'a> fn(&'a str, DataSize, &ParserSettings) -> OperandOutcome<'a>;

/// `d0`-`d7` or `a0`-`a7`, rejecting anything glued to more word
/// characters so `d0ne` stays available as a label.
fn register_digit(input: &str, prefix: char) -> (ParseResult<'_>, Option<u8>) {
    let res = seq_next!(input, |s| ch(s, prefix), digit);
    if res.ok {
        let number = res.parsed.as_bytes()[0] - b'0';
        let glued = res
            .rest
            .starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_');
        if number <= 7 && !glued {
            return (res, Some(number));
        }
    }
    (ParseResult::failure(input), None)
}

fn data_register(input: &str) -> (ParseResult<'_>, Option<u8>) {
    register_digit(input, 'd')
}

fn address_register(input: &str) -> (ParseResult<'_>, Option<u8>) {
    register_digit(input, 'a')
}

/// Any register as an index: data registers map to 0-7, address
/// registers to 8-15.
fn index_register(input: &str) -> (ParseResult<'_>, Option<u8>) {
    let (res, reg) = data_register(input);
    if res.ok {
        return (res, reg);
    }
    let (res, reg) = address_register(input);
    if res.ok {
        return (res, reg.map(|r| r + 8));
    }
    (ParseResult::failure(input), None)
}

/// The `(an)` core shared by the indirect forms.
fn indirect_register(input: &str) -> (ParseResult<'_>, Option<u8>) {
    let mut register = None;
    let res = between!(
        input,
        |s| ch(s, '('),
        |s| seq_next!(
            s,
            |s| always!(s, whitespace),
            |s| capture(s, address_register, &mut register),
            |s| always!(s, whitespace),
        ),
        |s| ch(s, ')')
    );
    if res.ok {
        (res, register)
    } else {
        (res, None)
    }
}

pub(crate) fn immediate<'a>(
    input: &'a str,
    _size: DataSize,
    settings: &ParserSettings,
) -> OperandOutcome<'a> {
    let mut expr = None;
    let res = seq_next!(
        input,
        |s| ch(s, '#'),
        |s| capture(s, |s| parse_expr(s, settings), &mut expr)
    );
    if res.ok {
        (res, expr.map(Operand::Immediate))
    } else {
        (res, None)
    }
}

pub(crate) fn any_register<'a>(
    input: &'a str,
    _size: DataSize,
    _settings: &ParserSettings,
) -> OperandOutcome<'a> {
    let (res, reg) = data_register(input);
    if res.ok {
        return (res, reg.map(Operand::DataRegister));
    }
    let (res, reg) = address_register(input);
    if res.ok {
        return (res, reg.map(Operand::AddressRegister));
    }
    (ParseResult::failure(input), None)
}

/// `-(an)`
fn pre_decrement<'a>(
    input: &'a str,
    _size: DataSize,
    _settings: &ParserSettings,
) -> OperandOutcome<'a> {
    let mut register = None;
    let res = seq_next!(
        input,
        |s| ch(s, '-'),
        |s| always!(s, whitespace),
        |s| capture(s, indirect_register, &mut register),
    );
    if res.ok {
        (res, register.map(Operand::AddressPre))
    } else {
        (ParseResult::failure(input), None)
    }
}

/// `(an)+`
fn post_increment<'a>(
    input: &'a str,
    _size: DataSize,
    _settings: &ParserSettings,
) -> OperandOutcome<'a> {
    let mut register = None;
    let res = seq_next!(
        input,
        |s| capture(s, indirect_register, &mut register),
        |s| always!(s, whitespace),
        |s| ch(s, '+'),
    );
    if res.ok {
        (res, register.map(Operand::AddressPost))
    } else {
        (ParseResult::failure(input), None)
    }
}

/// `d(an)`
fn with_displacement<'a>(
    input: &'a str,
    _size: DataSize,
    settings: &ParserSettings,
) -> OperandOutcome<'a> {
    let mut offset = None;
    let mut register = None;
    let res = seq_next!(
        input,
        |s| capture(s, |s| parse_expr(s, settings), &mut offset),
        |s| always!(s, whitespace),
        |s| capture(s, indirect_register, &mut register),
    );
    match (res.ok, register, offset) {
        (true, Some(register), Some(offset)) => {
            (res, Some(Operand::AddressOffset { register, offset }))
        }
        _ => (ParseResult::failure(input), None),
    }
}

/// `(an, xn)`
fn indexed<'a>(input: &'a str, _size: DataSize, _settings: &ParserSettings) -> OperandOutcome<'a> {
    let mut register = None;
    let mut index = None;
    let res = between!(
        input,
        |s| ch(s, '('),
        |s| seq_next!(
            s,
            |s| always!(s, whitespace),
            |s| capture(s, address_register, &mut register),
            |s| always!(s, whitespace),
            |s| ch(s, ','),
            |s| always!(s, whitespace),
            |s| capture(s, index_register, &mut index),
            |s| always!(s, whitespace),
        ),
        |s| ch(s, ')')
    );
    match (res.ok, register, index) {
        (true, Some(register), Some(index)) => (
            res,
            Some(Operand::AddressIndex {
                register,
                index,
                offset: None,
            }),
        ),
        _ => (ParseResult::failure(input), None),
    }
}

/// `(d, an, xn)`
fn indexed_with_displacement<'a>(
    input: &'a str,
    _size: DataSize,
    settings: &ParserSettings,
) -> OperandOutcome<'a> {
    let mut offset = None;
    let mut register = None;
    let mut index = None;
    let res = between!(
        input,
        |s| ch(s, '('),
        |s| seq_next!(
            s,
            |s| always!(s, whitespace),
            |s| capture(s, |s| parse_expr(s, settings), &mut offset),
            |s| always!(s, whitespace),
            |s| ch(s, ','),
            |s| always!(s, whitespace),
            |s| capture(s, address_register, &mut register),
            |s| always!(s, whitespace),
            |s| ch(s, ','),
            |s| always!(s, whitespace),
            |s| capture(s, index_register, &mut index),
            |s| always!(s, whitespace),
        ),
        |s| ch(s, ')')
    );
    match (res.ok, register, index, offset) {
        (true, Some(register), Some(index), offset @ Some(_)) => (
            res,
            Some(Operand::AddressIndex {
                register,
                index,
                offset,
            }),
        ),
        _ => (ParseResult::failure(input), None),
    }
}

/// `(an)` on its own.
fn as_address<'a>(
    input: &'a str,
    _size: DataSize,
    _settings: &ParserSettings,
) -> OperandOutcome<'a> {
    let (res, reg) = indirect_register(input);
    if res.ok {
        (res, reg.map(Operand::Address))
    } else {
        (res, None)
    }
}

/// A bare address expression; the instruction's data size picks between
/// the short and long absolute forms.
fn memory_address<'a>(
    input: &'a str,
    size: DataSize,
    settings: &ParserSettings,
) -> OperandOutcome<'a> {
    let (res, expr) = parse_expr(input, settings);
    match (res.ok, expr) {
        (true, Some(expr)) => {
            let operand = match size {
                DataSize::Byte | DataSize::Word => Operand::AbsoluteShort(expr),
                DataSize::Long => Operand::AbsoluteLong(expr),
            };
            (res, Some(operand))
        }
        _ => (ParseResult::failure(input), None),
    }
}

/// Tries every operand form in disambiguation order.
pub(crate) fn any_operand<'a>(
    input: &'a str,
    size: DataSize,
    settings: &ParserSettings,
) -> OperandOutcome<'a> {
    const PARSERS: [OperandParser; 9] = [
        immediate,
        any_register,
        pre_decrement,
        post_increment,
        with_displacement,
        indexed,
        indexed_with_displacement,
        as_address,
        memory_address,
    ];

    let mut last = ParseResult::failure(input);
    for parser in PARSERS.iter() {
        let (res, operand) = parser(input, size, settings);
        if res.ok {
            return (res, operand);
        }
        last = res;
    }

    let error = match last.error {
        ErrorKind::UnknownError => ErrorKind::UnknownOperand,
        specific => specific,
    };
    (ParseResult::failure_with(input, error), None)
}

/// The subset of `any_operand` a branch accepts: an immediate or a bare
/// address/label.
pub(crate) fn branch_target<'a>(
    input: &'a str,
    size: DataSize,
    settings: &ParserSettings,
) -> OperandOutcome<'a> {
    let (res, operand) = immediate(input, size, settings);
    if res.ok {
        return (res, operand);
    }
    memory_address(input, size, settings)
}
