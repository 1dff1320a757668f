//! Instruction-level parsing: mnemonic lookup, the optional size suffix,
//! and one operand-list parser per mnemonic profile.

use std::fmt;
use std::str::FromStr;

use crate::combinators::{always, any_of, ch, seq_next, set_error, whitespace, word, ParseResult};
use crate::error::{ErrorKind, OperandKind, TypeMismatch};
use crate::operands::{any_operand, branch_target, Operand};
use crate::ParserSettings;
use emu68::DataSize;

/// Assembly mnemonics accepted by the parser. Matching is
/// case-insensitive.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mnemonic {
    Move,
    MoveQ,
    Add,
    AddI,
    Sub,
    SubI,
    And,
    AndI,
    Or,
    OrI,
    Xor,
    XorI,
    Cmp,
    CmpI,
    CmpA,
    MulS,
    MulU,
    Lsl,
    Lsr,
    Asl,
    Asr,
    Rol,
    Ror,
    Jmp,
    Jsr,
    Bra,
    Bsr,
    Beq,
    Bne,
    Bge,
    Blt,
    Bgt,
    Ble,
    Clr,
    Neg,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParseMnemonicError {
    pub value: String,
}

impl fmt::Display for ParseMnemonicError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\" is not a mnemonic", self.value)
    }
}

impl std::error::Error for ParseMnemonicError {}

impl FromStr for Mnemonic {
    type Err = ParseMnemonicError;

    fn from_str(s: &str) -> Result<Mnemonic, ParseMnemonicError> {
        let mnemonic = match s.to_ascii_lowercase().as_str() {
            "move" => Mnemonic::Move,
            "moveq" => Mnemonic::MoveQ,
            "add" => Mnemonic::Add,
            "addi" => Mnemonic::AddI,
            "sub" => Mnemonic::Sub,
            "subi" => Mnemonic::SubI,
            "and" => Mnemonic::And,
            "andi" => Mnemonic::AndI,
            "or" => Mnemonic::Or,
            "ori" => Mnemonic::OrI,
            "xor" => Mnemonic::Xor,
            "xori" => Mnemonic::XorI,
            "cmp" => Mnemonic::Cmp,
            "cmpi" => Mnemonic::CmpI,
            "cmpa" => Mnemonic::CmpA,
            "muls" => Mnemonic::MulS,
            "mulu" => Mnemonic::MulU,
            "lsl" => Mnemonic::Lsl,
            "lsr" => Mnemonic::Lsr,
            "asl" => Mnemonic::Asl,
            "asr" => Mnemonic::Asr,
            "rol" => Mnemonic::Rol,
            "ror" => Mnemonic::Ror,
            "jmp" => Mnemonic::Jmp,
            "jsr" => Mnemonic::Jsr,
            "bra" => Mnemonic::Bra,
            "bsr" => Mnemonic::Bsr,
            "beq" => Mnemonic::Beq,
            "bne" => Mnemonic::Bne,
            "bge" => Mnemonic::Bge,
            "blt" => Mnemonic::Blt,
            "bgt" => Mnemonic::Bgt,
            "ble" => Mnemonic::Ble,
            "clr" => Mnemonic::Clr,
            "neg" => Mnemonic::Neg,
            _ => {
                return Err(ParseMnemonicError {
                    value: s.to_owned(),
                })
            }
        };
        Ok(mnemonic)
    }
}

/// Which operand list a mnemonic takes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Profile {
    /// `[size] <any>, <any>`
    Common,
    /// `[size] #imm, <any>`
    Immediate,
    /// `<imm or label>`
    Branch,
    /// `[size] <register>`
    OneOperand,
    /// Two-operand register form or one-operand memory form.
    Shift,
    /// `<control address>`
    Jump,
}

impl Mnemonic {
    pub(crate) fn profile(self) -> Profile {
        match self {
            Mnemonic::Move
            | Mnemonic::MoveQ
            | Mnemonic::Add
            | Mnemonic::Sub
            | Mnemonic::And
            | Mnemonic::Or
            | Mnemonic::Xor
            | Mnemonic::Cmp
            | Mnemonic::CmpA
            | Mnemonic::MulS
            | Mnemonic::MulU => Profile::Common,
            Mnemonic::AddI
            | Mnemonic::SubI
            | Mnemonic::AndI
            | Mnemonic::OrI
            | Mnemonic::XorI
            | Mnemonic::CmpI => Profile::Immediate,
            Mnemonic::Bra
            | Mnemonic::Bsr
            | Mnemonic::Beq
            | Mnemonic::Bne
            | Mnemonic::Bge
            | Mnemonic::Blt
            | Mnemonic::Bgt
            | Mnemonic::Ble => Profile::Branch,
            Mnemonic::Clr | Mnemonic::Neg => Profile::OneOperand,
            Mnemonic::Lsl
            | Mnemonic::Lsr
            | Mnemonic::Asl
            | Mnemonic::Asr
            | Mnemonic::Rol
            | Mnemonic::Ror => Profile::Shift,
            Mnemonic::Jmp | Mnemonic::Jsr => Profile::Jump,
        }
    }
}

/// One parsed source instruction.
#[derive(Clone, PartialEq, Debug)]
pub struct ParsedInstruction {
    pub mnemonic: Mnemonic,
    pub size: DataSize,
    pub operands: Vec<Operand>,
}

/// The optional `.b`/`.w`/`.l` suffix.
fn data_size(input: &str) -> (ParseResult<'_>, Option<DataSize>) {
    let res = seq_next!(input, |s| ch(s, '.'), |s| any_of!(
        s,
        |s| ch(s, 'b'),
        |s| ch(s, 'w'),
        |s| ch(s, 'l'),
        |s| ch(s, 'B'),
        |s| ch(s, 'W'),
        |s| ch(s, 'L'),
    ));
    if !res.ok {
        return (res, None);
    }
    let size = match res.parsed.as_bytes()[0].to_ascii_lowercase() {
        b'b' => DataSize::Byte,
        b'l' => DataSize::Long,
        _ => DataSize::Word,
    };
    (res, Some(size))
}

/// Parses one operand into `operands`. Written as a macro so the slot
/// expression can sit directly inside the sequencing combinators without
/// fighting over the operand vector borrow.
macro_rules! operand_slot {
    ($operands:expr, $size:expr, $settings:expr) => {
        |s: &'a str| {
            let (res, operand) = any_operand(s, $size, $settings);
            if res.ok {
                if let Some(operand) = operand {
                    $operands.push(operand);
                }
            }
            res
        }
    };
}

fn two_operands<'a>(
    input: &'a str,
    size: DataSize,
    settings: &ParserSettings,
) -> (ParseResult<'a>, Vec<Operand>) {
    let mut operands = Vec::new();
    let res = seq_next!(
        input,
        whitespace,
        operand_slot!(operands, size, settings),
        |s| always!(s, whitespace),
        |s| ch(s, ','),
        |s| always!(s, whitespace),
        operand_slot!(operands, size, settings),
    );
    (res, operands)
}

fn immediate_then_any<'a>(
    input: &'a str,
    size: DataSize,
    settings: &ParserSettings,
) -> (ParseResult<'a>, Vec<Operand>) {
    let mut operands = Vec::new();
    let res = seq_next!(
        input,
        whitespace,
        |s: &'a str| {
            let (res, operand) = crate::operands::immediate(s, size, settings);
            if res.ok {
                if let Some(operand) = operand {
                    operands.push(operand);
                }
            }
            res
        },
        |s| always!(s, whitespace),
        |s| ch(s, ','),
        |s| always!(s, whitespace),
        operand_slot!(operands, size, settings),
    );
    (res, operands)
}

fn single_operand<'a>(
    input: &'a str,
    size: DataSize,
    settings: &ParserSettings,
) -> (ParseResult<'a>, Vec<Operand>) {
    let mut operands = Vec::new();
    let res = seq_next!(input, whitespace, operand_slot!(operands, size, settings));
    (res, operands)
}

/// The one-register profile (`clr`, `neg`): anything that is not a bare
/// register is rejected up front.
fn register_operand<'a>(
    input: &'a str,
    size: DataSize,
    settings: &ParserSettings,
) -> (ParseResult<'a>, Vec<Operand>) {
    let mut operands = Vec::new();
    let res = seq_next!(input, whitespace, |s: &'a str| {
        let (res, operand) = crate::operands::any_register(s, size, settings);
        if res.ok {
            if let Some(operand) = operand {
                operands.push(operand);
            }
        }
        res
    });
    (res, operands)
}

fn mismatch(expected: &[OperandKind], got: &Operand, operand: u8) -> ErrorKind {
    ErrorKind::OperandTypeMismatch(TypeMismatch {
        expected: expected.to_vec(),
        got: Some(got.kind()),
        operand,
    })
}

/// The shift profile: the common two-operand form with its operand types
/// checked after the fact, or the one-operand memory form.
fn shift_operands<'a>(
    input: &'a str,
    size: DataSize,
    settings: &ParserSettings,
) -> (ParseResult<'a>, Vec<Operand>) {
    let (mut res, operands) = two_operands(input, size, settings);
    if res.ok {
        match operands[1] {
            Operand::DataRegister(_) => {}
            ref other => {
                res.ok = false;
                res.error = mismatch(&[OperandKind::DataRegister], other, 1);
                return (res, operands);
            }
        }
        match operands[0] {
            Operand::DataRegister(_) | Operand::Immediate(_) => {}
            ref other => {
                res.ok = false;
                res.error = mismatch(
                    &[OperandKind::DataRegister, OperandKind::Immediate],
                    other,
                    0,
                );
                return (res, operands);
            }
        }
        return (res, operands);
    }

    single_operand(input, size, settings)
}

fn branch_operand<'a>(
    input: &'a str,
    size: DataSize,
    settings: &ParserSettings,
) -> (ParseResult<'a>, Vec<Operand>) {
    let mut operands = Vec::new();
    let res = set_error!(
        input,
        |s: &'a str| seq_next!(s, whitespace, |s: &'a str| {
            let (res, operand) = branch_target(s, size, settings);
            if res.ok {
                if let Some(operand) = operand {
                    operands.push(operand);
                }
            }
            res
        }),
        ErrorKind::OperandTypeMismatch(TypeMismatch {
            expected: vec![
                OperandKind::Immediate,
                OperandKind::AbsoluteShort,
                OperandKind::AbsoluteLong,
            ],
            got: None,
            operand: 0,
        })
    );
    (res, operands)
}

/// Parses one instruction starting at the mnemonic word. On success the
/// returned remainder sits after the last operand.
pub(crate) fn parse_instruction<'a>(
    input: &'a str,
    settings: &ParserSettings,
) -> (ParseResult<'a>, Option<ParsedInstruction>) {
    let name = word(input);
    if !name.ok {
        return (name, None);
    }
    let mnemonic = match name.parsed.parse::<Mnemonic>() {
        Ok(mnemonic) => mnemonic,
        Err(_) => {
            return (
                ParseResult::failure_with(input, ErrorKind::UnknownMnemonic),
                None,
            )
        }
    };

    let (size_res, size) = data_size(name.rest);
    let size = size.unwrap_or(DataSize::Word);
    let rest = if size_res.ok { size_res.rest } else { name.rest };

    let (res, operands) = match mnemonic.profile() {
        Profile::Common => two_operands(rest, size, settings),
        Profile::Immediate => immediate_then_any(rest, size, settings),
        Profile::Branch => branch_operand(rest, size, settings),
        Profile::OneOperand => register_operand(rest, size, settings),
        Profile::Jump => single_operand(rest, size, settings),
        Profile::Shift => shift_operands(rest, size, settings),
    };

    if !res.ok {
        return (res, None);
    }

    (
        res,
        Some(ParsedInstruction {
            mnemonic,
            size,
            operands,
        }),
    )
}
