//! Instruction encoding.
//!
//! Every instruction becomes one base opcode word plus up to two
//! extension words per operand side, emitted source side first. The
//! parser asks [`encoded_length`] for layout while it records label
//! offsets, so the length logic here must agree with the word emission
//! below; `compile` double-checks that in debug builds.

use byteorder::ByteOrder;
use matches::debug_assert_matches;

use crate::error::{EncodeError, OperandKind, TypeMismatch};
use crate::expression::Expr;
use crate::instructions::{Mnemonic, ParsedInstruction};
use crate::labels::LabelTable;
use crate::operands::Operand;
use crate::parser::ParsedProgram;
use emu68::{constants, Condition, DataSize, Endian, ExecutableMemory};

/// One encoded opcode word, viewable as its two bytes.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct OpcodeWord(pub u16);

impl OpcodeWord {
    pub fn low(self) -> u8 {
        self.0 as u8
    }

    pub fn high(self) -> u8 {
        (self.0 >> 8) as u8
    }
}

/// Extension words for one operand side.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct AdditionalData {
    pub words: [u16; 2],
    pub count: u8,
}

impl AdditionalData {
    fn none() -> AdditionalData {
        AdditionalData::default()
    }

    fn one(word: u16) -> AdditionalData {
        AdditionalData {
            words: [word, 0],
            count: 1,
        }
    }

    fn two(high: u16, low: u16) -> AdditionalData {
        AdditionalData {
            words: [high, low],
            count: 2,
        }
    }
}

struct Encoded {
    opcode: OpcodeWord,
    data: [AdditionalData; 2],
}

impl Encoded {
    fn new(opcode: u16) -> Encoded {
        Encoded {
            opcode: OpcodeWord(opcode),
            data: [AdditionalData::none(); 2],
        }
    }

    fn byte_length(&self) -> u32 {
        constants::OPCODE_BYTES
            + 2 * (self.data[0].count as u32 + self.data[1].count as u32)
    }
}

fn mismatch(expected: &[OperandKind], got: &Operand, operand: u8) -> EncodeError {
    EncodeError::OperandTypeMismatch(TypeMismatch {
        expected: expected.to_vec(),
        got: Some(got.kind()),
        operand,
    })
}

fn expect_operand(instr: &ParsedInstruction, index: usize) -> Result<&Operand, EncodeError> {
    instr
        .operands
        .get(index)
        .ok_or(EncodeError::OperandTypeMismatch(TypeMismatch {
            expected: Vec::new(),
            got: None,
            operand: index as u8,
        }))
}

/// The (mode, reg) pair of an operand.
fn ea_field(op: &Operand) -> (u16, u16) {
    match op {
        Operand::DataRegister(r) => (0b000, *r as u16),
        Operand::AddressRegister(r) => (0b001, *r as u16),
        Operand::Address(r) => (0b010, *r as u16),
        Operand::AddressPost(r) => (0b011, *r as u16),
        Operand::AddressPre(r) => (0b100, *r as u16),
        Operand::AddressOffset { register, .. } => (0b101, *register as u16),
        Operand::AddressIndex { register, .. } => (0b110, *register as u16),
        Operand::AbsoluteShort(_) => (0b111, 0b000),
        Operand::AbsoluteLong(_) => (0b111, 0b001),
        Operand::Immediate(_) => (0b111, 0b100),
    }
}

/// The six EA bits as they sit in the low bits of an opcode word.
fn ea_bits(op: &Operand) -> u16 {
    let (mode, reg) = ea_field(op);
    mode << constants::EA_MODE_OFFSET | reg
}

fn check_range(value: i32, min: i64, max: i64, operand: u8) -> Result<i32, EncodeError> {
    if (value as i64) < min || (value as i64) > max {
        Err(EncodeError::ValueOutOfRange { operand })
    } else {
        Ok(value)
    }
}

/// Extension words contributed by one operand.
fn ea_extension(
    op: &Operand,
    size: DataSize,
    labels: &LabelTable,
    operand: u8,
) -> Result<AdditionalData, EncodeError> {
    match op {
        Operand::Immediate(expr) => {
            let value = expr.evaluate(labels)?;
            match size {
                DataSize::Byte => {
                    let value = check_range(value, -128, 255, operand)?;
                    Ok(AdditionalData::one(value as u8 as u16))
                }
                DataSize::Word => {
                    let value = check_range(value, -32_768, 65_535, operand)?;
                    Ok(AdditionalData::one(value as u16))
                }
                DataSize::Long => Ok(AdditionalData::two(
                    (value as u32 >> 16) as u16,
                    value as u16,
                )),
            }
        }
        Operand::AbsoluteShort(expr) => {
            let value = check_range(expr.evaluate(labels)?, -32_768, 65_535, operand)?;
            Ok(AdditionalData::one(value as u16))
        }
        Operand::AbsoluteLong(expr) => {
            let value = expr.evaluate(labels)?;
            Ok(AdditionalData::two(
                (value as u32 >> 16) as u16,
                value as u16,
            ))
        }
        Operand::AddressOffset { offset, .. } => {
            let value = check_range(offset.evaluate(labels)?, -32_768, 32_767, operand)?;
            Ok(AdditionalData::one(value as u16))
        }
        Operand::AddressIndex { index, offset, .. } => {
            let displacement = match offset {
                Some(expr) => check_range(expr.evaluate(labels)?, -128, 127, operand)?,
                None => 0,
            };
            let word = (*index as u16) << constants::INDEX_REG_OFFSET
                | constants::INDEX_LONG_BIT
                | (displacement as i8 as u8 as u16);
            Ok(AdditionalData::one(word))
        }
        _ => Ok(AdditionalData::none()),
    }
}

/// Extension words an operand will occupy, without evaluating labels.
fn ea_extension_count(op: &Operand, size: DataSize) -> u32 {
    match op {
        Operand::Immediate(_) => {
            if size == DataSize::Long {
                2
            } else {
                1
            }
        }
        Operand::AbsoluteLong(_) => 2,
        Operand::AbsoluteShort(_)
        | Operand::AddressOffset { .. }
        | Operand::AddressIndex { .. } => 1,
        _ => 0,
    }
}

fn branch_expr(op: &Operand) -> Option<&Expr> {
    match op {
        Operand::Immediate(expr)
        | Operand::AbsoluteShort(expr)
        | Operand::AbsoluteLong(expr) => Some(expr),
        _ => None,
    }
}

/// Whether a branch at `offset` needs the zero-byte plus word form.
///
/// Label targets always take the word form so the layout does not depend
/// on values that resolve later; a literal displacement of zero must
/// take it too, because a zero byte field is the word-form flag.
fn branch_long_form(op: &Operand, offset: u32) -> bool {
    let expr = match branch_expr(op) {
        Some(expr) => expr,
        None => return true,
    };
    match expr.constant() {
        Some(target) => {
            let disp = target as i64 - offset as i64;
            disp == 0 || disp < -128 || disp > 127
        }
        None => true,
    }
}

/// Bytes the instruction occupies at `offset`, matching what
/// `compile` will emit there.
pub fn encoded_length(instr: &ParsedInstruction, offset: u32) -> u32 {
    let opcode = constants::OPCODE_BYTES;
    match instr.mnemonic {
        Mnemonic::MoveQ => opcode,
        Mnemonic::Bra
        | Mnemonic::Bsr
        | Mnemonic::Beq
        | Mnemonic::Bne
        | Mnemonic::Bge
        | Mnemonic::Blt
        | Mnemonic::Bgt
        | Mnemonic::Ble => match instr.operands.first() {
            Some(op) if !branch_long_form(op, offset) => opcode,
            _ => opcode + 2,
        },
        Mnemonic::Lsl
        | Mnemonic::Lsr
        | Mnemonic::Asl
        | Mnemonic::Asr
        | Mnemonic::Rol
        | Mnemonic::Ror => {
            if instr.operands.len() == 2 {
                opcode
            } else {
                match instr.operands.first() {
                    Some(op) => opcode + 2 * ea_extension_count(op, DataSize::Word),
                    None => opcode,
                }
            }
        }
        Mnemonic::MulS | Mnemonic::MulU => match instr.operands.first() {
            Some(op) => opcode + 2 * ea_extension_count(op, DataSize::Word),
            None => opcode,
        },
        _ => {
            opcode
                + instr
                    .operands
                    .iter()
                    .map(|op| 2 * ea_extension_count(op, instr.size))
                    .sum::<u32>()
        }
    }
}

fn encode_move(instr: &ParsedInstruction, labels: &LabelTable) -> Result<Encoded, EncodeError> {
    let src = expect_operand(instr, 0)?;
    let dst = expect_operand(instr, 1)?;
    if let Operand::Immediate(_) = dst {
        return Err(mismatch(
            &[
                OperandKind::DataRegister,
                OperandKind::AddressRegister,
                OperandKind::Address,
                OperandKind::AddressPost,
                OperandKind::AddressPre,
                OperandKind::AddressOffset,
                OperandKind::AddressIndex,
                OperandKind::AbsoluteShort,
                OperandKind::AbsoluteLong,
            ],
            dst,
            1,
        ));
    }
    let (dst_mode, dst_reg) = ea_field(dst);
    let opcode = instr.size.to_move_bits() << constants::MOVE_SIZE_OFFSET
        | dst_reg << constants::DST_REG_OFFSET
        | dst_mode << constants::DST_MODE_OFFSET
        | ea_bits(src);
    let mut encoded = Encoded::new(opcode);
    encoded.data[0] = ea_extension(src, instr.size, labels, 0)?;
    encoded.data[1] = ea_extension(dst, instr.size, labels, 1)?;
    Ok(encoded)
}

fn encode_moveq(instr: &ParsedInstruction, labels: &LabelTable) -> Result<Encoded, EncodeError> {
    let src = expect_operand(instr, 0)?;
    let dst = expect_operand(instr, 1)?;
    let expr = match src {
        Operand::Immediate(expr) => expr,
        other => return Err(mismatch(&[OperandKind::Immediate], other, 0)),
    };
    let reg = match dst {
        Operand::DataRegister(reg) => *reg as u16,
        other => return Err(mismatch(&[OperandKind::DataRegister], other, 1)),
    };
    let value = check_range(expr.evaluate(labels)?, -128, 127, 0)?;
    Ok(Encoded::new(
        0x7000 | reg << constants::DST_REG_OFFSET | (value as i8 as u8 as u16),
    ))
}

fn encode_immediate(
    instr: &ParsedInstruction,
    labels: &LabelTable,
) -> Result<Encoded, EncodeError> {
    let src = expect_operand(instr, 0)?;
    let dst = expect_operand(instr, 1)?;
    debug_assert_matches!(*src, Operand::Immediate(_));

    let family: u16 = match instr.mnemonic {
        Mnemonic::OrI => 0b0000,
        Mnemonic::AndI => 0b0010,
        Mnemonic::SubI => 0b0100,
        Mnemonic::AddI => 0b0110,
        Mnemonic::XorI => 0b1010,
        _ => 0b1100, // cmpi
    };

    match dst {
        Operand::Immediate(_) | Operand::AddressRegister(_) => {
            return Err(mismatch(
                &[
                    OperandKind::DataRegister,
                    OperandKind::Address,
                    OperandKind::AddressPost,
                    OperandKind::AddressPre,
                    OperandKind::AddressOffset,
                    OperandKind::AddressIndex,
                    OperandKind::AbsoluteShort,
                    OperandKind::AbsoluteLong,
                ],
                dst,
                1,
            ))
        }
        _ => {}
    }

    let opcode = family << constants::IMM_FAMILY_OFFSET
        | instr.size.to_size_bits() << constants::SIZE_OFFSET
        | ea_bits(dst);
    let mut encoded = Encoded::new(opcode);
    encoded.data[0] = ea_extension(src, instr.size, labels, 0)?;
    encoded.data[1] = ea_extension(dst, instr.size, labels, 1)?;
    Ok(encoded)
}

fn standard_base(mnemonic: Mnemonic) -> u16 {
    match mnemonic {
        Mnemonic::Or => 0x8000,
        Mnemonic::Sub => 0x9000,
        Mnemonic::Cmp | Mnemonic::Xor => 0xB000,
        Mnemonic::And => 0xC000,
        _ => 0xD000, // add
    }
}

fn encode_standard(
    instr: &ParsedInstruction,
    labels: &LabelTable,
) -> Result<Encoded, EncodeError> {
    let src = expect_operand(instr, 0)?;
    let dst = expect_operand(instr, 1)?;
    let base = standard_base(instr.mnemonic);
    let size_bits = instr.size.to_size_bits();

    // eor only exists as Dn -> <ea>; cmp only as <ea> -> Dn. The rest
    // pick the direction from whichever side is the data register.
    if instr.mnemonic == Mnemonic::Xor {
        let reg = match src {
            Operand::DataRegister(reg) => *reg as u16,
            other => return Err(mismatch(&[OperandKind::DataRegister], other, 0)),
        };
        match dst {
            Operand::AddressRegister(_) | Operand::Immediate(_) => {
                return Err(mismatch(
                    &[
                        OperandKind::DataRegister,
                        OperandKind::Address,
                        OperandKind::AddressPost,
                        OperandKind::AddressPre,
                        OperandKind::AddressOffset,
                        OperandKind::AddressIndex,
                        OperandKind::AbsoluteShort,
                        OperandKind::AbsoluteLong,
                    ],
                    dst,
                    1,
                ))
            }
            _ => {}
        }
        let opcode = base
            | reg << constants::REG_FIELD_OFFSET
            | (constants::OPMODE_DIRECTION | size_bits) << constants::OPMODE_OFFSET
            | ea_bits(dst);
        let mut encoded = Encoded::new(opcode);
        encoded.data[1] = ea_extension(dst, instr.size, labels, 1)?;
        return Ok(encoded);
    }

    if let Operand::DataRegister(reg) = dst {
        let opcode = base
            | (*reg as u16) << constants::REG_FIELD_OFFSET
            | size_bits << constants::OPMODE_OFFSET
            | ea_bits(src);
        let mut encoded = Encoded::new(opcode);
        encoded.data[0] = ea_extension(src, instr.size, labels, 0)?;
        return Ok(encoded);
    }

    if instr.mnemonic == Mnemonic::Cmp {
        return Err(mismatch(&[OperandKind::DataRegister], dst, 1));
    }

    if let Operand::DataRegister(reg) = src {
        match dst {
            Operand::AddressRegister(_) | Operand::Immediate(_) => {
                return Err(mismatch(
                    &[
                        OperandKind::DataRegister,
                        OperandKind::Address,
                        OperandKind::AddressPost,
                        OperandKind::AddressPre,
                        OperandKind::AddressOffset,
                        OperandKind::AddressIndex,
                        OperandKind::AbsoluteShort,
                        OperandKind::AbsoluteLong,
                    ],
                    dst,
                    1,
                ))
            }
            _ => {}
        }
        let opcode = base
            | (*reg as u16) << constants::REG_FIELD_OFFSET
            | (constants::OPMODE_DIRECTION | size_bits) << constants::OPMODE_OFFSET
            | ea_bits(dst);
        let mut encoded = Encoded::new(opcode);
        encoded.data[1] = ea_extension(dst, instr.size, labels, 1)?;
        return Ok(encoded);
    }

    Err(mismatch(&[OperandKind::DataRegister], dst, 1))
}

fn encode_cmpa(instr: &ParsedInstruction, labels: &LabelTable) -> Result<Encoded, EncodeError> {
    let src = expect_operand(instr, 0)?;
    let dst = expect_operand(instr, 1)?;
    let reg = match dst {
        Operand::AddressRegister(reg) => *reg as u16,
        other => return Err(mismatch(&[OperandKind::AddressRegister], other, 1)),
    };
    let opmode: u16 = match instr.size {
        DataSize::Word => 0b011,
        DataSize::Long => 0b111,
        DataSize::Byte => return Err(EncodeError::InvalidSize),
    };
    let opcode = 0xB000
        | reg << constants::REG_FIELD_OFFSET
        | opmode << constants::OPMODE_OFFSET
        | ea_bits(src);
    let mut encoded = Encoded::new(opcode);
    encoded.data[0] = ea_extension(src, instr.size, labels, 0)?;
    Ok(encoded)
}

fn encode_mul(instr: &ParsedInstruction, labels: &LabelTable) -> Result<Encoded, EncodeError> {
    let src = expect_operand(instr, 0)?;
    let dst = expect_operand(instr, 1)?;
    let reg = match dst {
        Operand::DataRegister(reg) => *reg as u16,
        other => return Err(mismatch(&[OperandKind::DataRegister], other, 1)),
    };
    if let Operand::AddressRegister(_) = src {
        return Err(mismatch(
            &[
                OperandKind::DataRegister,
                OperandKind::Address,
                OperandKind::AddressPost,
                OperandKind::AddressPre,
                OperandKind::AddressOffset,
                OperandKind::AddressIndex,
                OperandKind::AbsoluteShort,
                OperandKind::AbsoluteLong,
                OperandKind::Immediate,
            ],
            src,
            0,
        ));
    }
    let opmode: u16 = if instr.mnemonic == Mnemonic::MulU {
        0b011
    } else {
        0b111
    };
    let opcode = 0xC000
        | reg << constants::REG_FIELD_OFFSET
        | opmode << constants::OPMODE_OFFSET
        | ea_bits(src);
    let mut encoded = Encoded::new(opcode);
    // Multiplies always read a word from the source.
    encoded.data[0] = ea_extension(src, DataSize::Word, labels, 0)?;
    Ok(encoded)
}

fn shift_type_bits(mnemonic: Mnemonic) -> (u16, u16) {
    match mnemonic {
        Mnemonic::Asl => (0b00, 1),
        Mnemonic::Asr => (0b00, 0),
        Mnemonic::Lsl => (0b01, 1),
        Mnemonic::Lsr => (0b01, 0),
        Mnemonic::Rol => (0b11, 1),
        _ => (0b11, 0), // ror
    }
}

fn encode_shift(instr: &ParsedInstruction, labels: &LabelTable) -> Result<Encoded, EncodeError> {
    let (type_bits, left) = shift_type_bits(instr.mnemonic);
    let direction = left * constants::SHIFT_DIR_BIT;

    if instr.operands.len() == 2 {
        let reg = match instr.operands[1] {
            Operand::DataRegister(reg) => reg as u16,
            ref other => return Err(mismatch(&[OperandKind::DataRegister], other, 1)),
        };
        let (count_field, ir) = match &instr.operands[0] {
            Operand::Immediate(expr) => {
                let count = check_range(expr.evaluate(labels)?, 1, 8, 0)?;
                // The 3-bit field encodes a count of 8 as 0.
                ((count as u16) & 0b111, 0)
            }
            Operand::DataRegister(count_reg) => (*count_reg as u16, constants::SHIFT_IR_BIT),
            other => {
                return Err(mismatch(
                    &[OperandKind::DataRegister, OperandKind::Immediate],
                    other,
                    0,
                ))
            }
        };
        let opcode = 0xE000
            | count_field << constants::SHIFT_COUNT_OFFSET
            | direction
            | instr.size.to_size_bits() << constants::SIZE_OFFSET
            | ir
            | type_bits << constants::SHIFT_TYPE_OFFSET
            | reg;
        return Ok(Encoded::new(opcode));
    }

    // Memory form: one word-sized operand, shifted by one.
    let dst = expect_operand(instr, 0)?;
    match dst {
        Operand::Address(_)
        | Operand::AddressPost(_)
        | Operand::AddressPre(_)
        | Operand::AddressOffset { .. }
        | Operand::AddressIndex { .. }
        | Operand::AbsoluteShort(_)
        | Operand::AbsoluteLong(_) => {}
        other => {
            return Err(mismatch(
                &[
                    OperandKind::Address,
                    OperandKind::AddressPost,
                    OperandKind::AddressPre,
                    OperandKind::AddressOffset,
                    OperandKind::AddressIndex,
                    OperandKind::AbsoluteShort,
                    OperandKind::AbsoluteLong,
                ],
                other,
                0,
            ))
        }
    }
    if instr.size != DataSize::Word {
        return Err(EncodeError::InvalidSize);
    }
    let opcode = 0xE000
        | type_bits << constants::SHIFT_MEM_TYPE_OFFSET
        | direction
        | constants::SIZE_MASK
        | ea_bits(dst);
    let mut encoded = Encoded::new(opcode);
    encoded.data[0] = ea_extension(dst, DataSize::Word, labels, 0)?;
    Ok(encoded)
}

fn branch_condition(mnemonic: Mnemonic) -> u16 {
    match mnemonic {
        Mnemonic::Bra => Condition::True as u16,
        Mnemonic::Bsr => Condition::Subroutine as u16,
        Mnemonic::Beq => Condition::Equal as u16,
        Mnemonic::Bne => Condition::NotEqual as u16,
        Mnemonic::Bge => Condition::GreaterEqual as u16,
        Mnemonic::Blt => Condition::LessThan as u16,
        Mnemonic::Bgt => Condition::GreaterThan as u16,
        _ => Condition::LessEqual as u16, // ble
    }
}

fn encode_branch(
    instr: &ParsedInstruction,
    labels: &LabelTable,
    offset: u32,
) -> Result<Encoded, EncodeError> {
    let target = expect_operand(instr, 0)?;
    let expr = match branch_expr(target) {
        Some(expr) => expr,
        None => {
            return Err(mismatch(
                &[
                    OperandKind::Immediate,
                    OperandKind::AbsoluteShort,
                    OperandKind::AbsoluteLong,
                ],
                target,
                0,
            ))
        }
    };
    let cond = branch_condition(instr.mnemonic) << constants::COND_OFFSET;
    let displacement = expr.evaluate(labels)? as i64 - offset as i64;

    if !branch_long_form(target, offset) {
        return Ok(Encoded::new(0x6000 | cond | (displacement as i8 as u8 as u16)));
    }

    if displacement < -32_768 || displacement > 32_767 {
        return Err(EncodeError::ValueOutOfRange { operand: 0 });
    }
    let mut encoded = Encoded::new(0x6000 | cond);
    encoded.data[0] = AdditionalData::one(displacement as i16 as u16);
    Ok(encoded)
}

fn encode_jump(instr: &ParsedInstruction, labels: &LabelTable) -> Result<Encoded, EncodeError> {
    let target = expect_operand(instr, 0)?;
    match target {
        Operand::Address(_)
        | Operand::AddressOffset { .. }
        | Operand::AddressIndex { .. }
        | Operand::AbsoluteShort(_)
        | Operand::AbsoluteLong(_) => {}
        other => {
            return Err(mismatch(
                &[
                    OperandKind::Address,
                    OperandKind::AddressOffset,
                    OperandKind::AddressIndex,
                    OperandKind::AbsoluteShort,
                    OperandKind::AbsoluteLong,
                ],
                other,
                0,
            ))
        }
    }
    let base: u16 = if instr.mnemonic == Mnemonic::Jmp {
        0x4EC0
    } else {
        0x4E80
    };
    let mut encoded = Encoded::new(base | ea_bits(target));
    encoded.data[0] = ea_extension(target, instr.size, labels, 0)?;
    Ok(encoded)
}

fn encode_single(instr: &ParsedInstruction, labels: &LabelTable) -> Result<Encoded, EncodeError> {
    let dst = expect_operand(instr, 0)?;
    match dst {
        Operand::DataRegister(_) => {}
        other => return Err(mismatch(&[OperandKind::DataRegister], other, 0)),
    }
    let base: u16 = if instr.mnemonic == Mnemonic::Clr {
        0x4200
    } else {
        0x4400
    };
    let opcode = base | instr.size.to_size_bits() << constants::SIZE_OFFSET | ea_bits(dst);
    let mut encoded = Encoded::new(opcode);
    encoded.data[0] = ea_extension(dst, instr.size, labels, 0)?;
    Ok(encoded)
}

fn encode_instruction(
    instr: &ParsedInstruction,
    labels: &LabelTable,
    offset: u32,
) -> Result<Encoded, EncodeError> {
    match instr.mnemonic {
        Mnemonic::Move => encode_move(instr, labels),
        Mnemonic::MoveQ => encode_moveq(instr, labels),
        Mnemonic::Add
        | Mnemonic::Sub
        | Mnemonic::And
        | Mnemonic::Or
        | Mnemonic::Xor
        | Mnemonic::Cmp => encode_standard(instr, labels),
        Mnemonic::AddI
        | Mnemonic::SubI
        | Mnemonic::AndI
        | Mnemonic::OrI
        | Mnemonic::XorI
        | Mnemonic::CmpI => encode_immediate(instr, labels),
        Mnemonic::CmpA => encode_cmpa(instr, labels),
        Mnemonic::MulS | Mnemonic::MulU => encode_mul(instr, labels),
        Mnemonic::Lsl
        | Mnemonic::Lsr
        | Mnemonic::Asl
        | Mnemonic::Asr
        | Mnemonic::Rol
        | Mnemonic::Ror => encode_shift(instr, labels),
        Mnemonic::Bra
        | Mnemonic::Bsr
        | Mnemonic::Beq
        | Mnemonic::Bne
        | Mnemonic::Bge
        | Mnemonic::Blt
        | Mnemonic::Bgt
        | Mnemonic::Ble => encode_branch(instr, labels, offset),
        Mnemonic::Jmp | Mnemonic::Jsr => encode_jump(instr, labels),
        Mnemonic::Clr | Mnemonic::Neg => encode_single(instr, labels),
    }
}

fn push_word(image: &mut Vec<u8>, word: u16) {
    let mut buffer = [0u8; 2];
    Endian::write_u16(&mut buffer, word);
    image.extend_from_slice(&buffer);
}

/// Lays the program out as a big-endian word stream: for each
/// instruction the base opcode word, then the source side's extension
/// words, then the destination side's.
pub fn compile(program: &ParsedProgram) -> Result<ExecutableMemory, EncodeError> {
    let mut image = Vec::new();
    let mut offset: u32 = 0;

    for instr in &program.instructions {
        let encoded = encode_instruction(instr, &program.labels, offset)?;
        debug_assert_eq!(encoded.byte_length(), encoded_length(instr, offset));

        push_word(&mut image, encoded.opcode.0);
        for side in &encoded.data {
            for index in 0..side.count as usize {
                push_word(&mut image, side.words[index]);
            }
        }
        offset += encoded.byte_length();
    }

    Ok(ExecutableMemory::from_code(image))
}
