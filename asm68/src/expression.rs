//! The arithmetic expression AST carried by operands.
//!
//! An operand's numeric payload is a small tree over number and label
//! leaves. Labels stay symbolic until encode time, when the tree is
//! evaluated against the label table.

use num::Num;

use crate::combinators::{
    always, ch, dec_number, hex_digits, seq_next, whitespace, word, ParseResult,
};
use crate::error::EncodeError;
use crate::labels::LabelTable;
use crate::ParserSettings;

/// FNV-1a over the label text. Labels are stored and resolved by hash
/// only.
pub fn hash_label(name: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in name.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Expr {
    Number(i32),
    Label(u64),
    BinOp {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn evaluate(&self, labels: &LabelTable) -> Result<i32, EncodeError> {
        match self {
            Expr::Number(value) => Ok(*value),
            Expr::Label(hash) => labels
                .lookup(*hash)
                .map(|offset| offset as i32)
                .ok_or(EncodeError::UnresolvedLabel(*hash)),
            Expr::BinOp { op, lhs, rhs } => {
                let lhs = lhs.evaluate(labels)?;
                let rhs = rhs.evaluate(labels)?;
                match op {
                    BinOp::Add => Ok(lhs.wrapping_add(rhs)),
                    BinOp::Sub => Ok(lhs.wrapping_sub(rhs)),
                    BinOp::Mul => Ok(lhs.wrapping_mul(rhs)),
                    BinOp::Div => {
                        if rhs == 0 {
                            Err(EncodeError::DivisionByZero)
                        } else {
                            Ok(lhs.wrapping_div(rhs))
                        }
                    }
                }
            }
        }
    }

    /// The value of a label-free expression, if it is one.
    pub fn constant(&self) -> Option<i32> {
        self.evaluate(&LabelTable::new()).ok()
    }
}

fn binop(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::BinOp {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

/// A leaf: `$hex`, signed decimal, or a label word.
fn atom<'a>(input: &'a str, settings: &ParserSettings) -> (ParseResult<'a>, Option<Expr>) {
    let hex = seq_next!(input, |s| ch(s, '$'), hex_digits);
    if hex.ok {
        // Truncation matches the 32-bit machine word.
        let value = <i128 as Num>::from_str_radix(hex.parsed, 16).unwrap_or(0) as i32;
        return (hex, Some(Expr::Number(value)));
    }

    let dec = dec_number(input);
    if dec.ok {
        let value = <i128 as Num>::from_str_radix(dec.parsed, 10).unwrap_or(0) as i32;
        return (dec, Some(Expr::Number(value)));
    }

    let label = word(input);
    if label.ok {
        let name = if settings.case_insensitive_labels {
            hash_label(&label.parsed.to_ascii_lowercase())
        } else {
            hash_label(label.parsed)
        };
        return (label, Some(Expr::Label(name)));
    }

    (ParseResult::failure(input), None)
}

fn operator<'a>(input: &'a str, ops: &[(char, BinOp)]) -> (ParseResult<'a>, Option<BinOp>) {
    for &(symbol, op) in ops {
        let res = ch(input, symbol);
        if res.ok {
            return (res, Some(op));
        }
    }
    (ParseResult::failure(input), None)
}

fn level<'a>(
    input: &'a str,
    settings: &ParserSettings,
    ops: &[(char, BinOp)],
    next: fn(&'a str, &ParserSettings) -> (ParseResult<'a>, Option<Expr>),
) -> (ParseResult<'a>, Option<Expr>) {
    let (mut res, first) = next(input, settings);
    let mut expr = match (res.ok, first) {
        (true, Some(expr)) => expr,
        _ => return (res, None),
    };

    loop {
        let gap = always!(res.rest, whitespace);
        let (op_res, op) = operator(gap.rest, ops);
        let op = match (op_res.ok, op) {
            (true, Some(op)) => op,
            _ => break,
        };
        let gap = always!(op_res.rest, whitespace);
        let (rhs_res, rhs) = next(gap.rest, settings);
        match (rhs_res.ok, rhs) {
            (true, Some(rhs)) => {
                expr = binop(op, expr, rhs);
                let consumed = input.len() - rhs_res.rest.len();
                res = ParseResult::success(rhs_res.rest, &input[..consumed]);
            }
            // A dangling operator is not part of the expression.
            _ => break,
        }
    }

    (res, Some(expr))
}

fn term<'a>(input: &'a str, settings: &ParserSettings) -> (ParseResult<'a>, Option<Expr>) {
    level(
        input,
        settings,
        &[('*', BinOp::Mul), ('/', BinOp::Div)],
        atom,
    )
}

/// Parses an expression: terms joined by `+`/`-`, with `*`/`/` binding
/// tighter.
pub(crate) fn parse_expr<'a>(
    input: &'a str,
    settings: &ParserSettings,
) -> (ParseResult<'a>, Option<Expr>) {
    level(
        input,
        settings,
        &[('+', BinOp::Add), ('-', BinOp::Sub)],
        term,
    )
}
