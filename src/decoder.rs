//! Opcode-word decoder.
//!
//! `decode` reads one 16-bit word, dispatches on the top nibble and the
//! family bits below it, and extracts the effective-address fields into an
//! [`InstructionData`] paired with the matching executor. Bit patterns the
//! emulator does not understand, and instructions whose extension words
//! would run past the executable region, come back as the `illegal`
//! executor.

use num::FromPrimitive;

use crate::constants;
use crate::enums::{
    AddressingMode, Condition, DataSize, ExtensionMode, InstructionData, Operation,
};
use crate::exec::{self, ExecFn};
use crate::memory::ExecutableMemory;

/// A decoded instruction: operand description plus the executor that
/// applies it to a system snapshot.
#[derive(Clone, Copy)]
pub struct DecodedInstruction {
    pub data: InstructionData,
    pub exec: ExecFn,
}

impl DecodedInstruction {
    fn new(data: InstructionData, exec: ExecFn) -> DecodedInstruction {
        DecodedInstruction { data, exec }
    }

    fn illegal() -> DecodedInstruction {
        DecodedInstruction {
            data: InstructionData::new(Operation::Illegal, DataSize::Word),
            exec: exec::illegal,
        }
    }

    pub fn is_illegal(&self) -> bool {
        self.data.kind == Operation::Illegal
    }
}

fn ea_mode(bits: u16) -> AddressingMode {
    // The field is three bits wide, so every value names a mode.
    AddressingMode::from_u16(bits & 0b111).unwrap_or(AddressingMode::DataDirect)
}

/// Extension words required by one operand side.
fn operand_extension_words(mode: AddressingMode, reg: u8, size: DataSize) -> u32 {
    match mode {
        AddressingMode::Displacement | AddressingMode::Index => 1,
        AddressingMode::Extension => match ExtensionMode::from_u8(reg) {
            Some(ExtensionMode::AbsoluteShort) => 1,
            Some(ExtensionMode::AbsoluteLong) => 2,
            Some(ExtensionMode::Immediate) => {
                if size == DataSize::Long {
                    2
                } else {
                    1
                }
            }
            None => 0,
        },
        _ => 0,
    }
}

/// Total extension words the instruction will consume at execution time.
fn extension_words(data: &InstructionData) -> u32 {
    match data.kind {
        Operation::Branch | Operation::BranchSub | Operation::BranchCond => {
            if data.reg[1] == 0 {
                1
            } else {
                0
            }
        }
        Operation::MoveQuick => 0,
        Operation::Jump | Operation::JumpSub | Operation::Clear | Operation::Negate => {
            operand_extension_words(data.op[0], data.reg[0], data.size)
        }
        Operation::MulUnsigned | Operation::MulSigned => {
            operand_extension_words(data.op[0], data.reg[0], DataSize::Word)
        }
        Operation::LogicalShiftLeft
        | Operation::LogicalShiftRight
        | Operation::ArithmeticShiftLeft
        | Operation::ArithmeticShiftRight
        | Operation::RotateLeft
        | Operation::RotateRight => {
            if data.op[1] == AddressingMode::DataDirect {
                0
            } else {
                operand_extension_words(data.op[1], data.reg[1], DataSize::Word)
            }
        }
        _ => {
            operand_extension_words(data.op[0], data.reg[0], data.size)
                + operand_extension_words(data.op[1], data.reg[1], data.size)
        }
    }
}

/// Checks that an extension-field register byte names something decodable
/// as a source operand.
fn valid_source(mode: AddressingMode, reg: u8) -> bool {
    mode != AddressingMode::Extension || ExtensionMode::from_u8(reg).is_some()
}

/// Destinations additionally exclude immediates.
fn valid_destination(mode: AddressingMode, reg: u8) -> bool {
    match mode {
        AddressingMode::Extension => matches!(
            ExtensionMode::from_u8(reg),
            Some(ExtensionMode::AbsoluteShort) | Some(ExtensionMode::AbsoluteLong)
        ),
        _ => true,
    }
}

fn memory_destination(mode: AddressingMode, reg: u8) -> bool {
    match mode {
        AddressingMode::DataDirect | AddressingMode::AddressDirect => false,
        _ => valid_destination(mode, reg),
    }
}

fn control_mode(mode: AddressingMode, reg: u8) -> bool {
    match mode {
        AddressingMode::AddressIndirect
        | AddressingMode::Displacement
        | AddressingMode::Index => true,
        AddressingMode::Extension => matches!(
            ExtensionMode::from_u8(reg),
            Some(ExtensionMode::AbsoluteShort) | Some(ExtensionMode::AbsoluteLong)
        ),
        _ => false,
    }
}

fn decode_move(word: u16) -> Option<DecodedInstruction> {
    let size = DataSize::from_move_bits(
        (word & constants::MOVE_SIZE_MASK) >> constants::MOVE_SIZE_OFFSET,
    )?;
    let src_mode = ea_mode((word & constants::EA_MODE_MASK) >> constants::EA_MODE_OFFSET);
    let src_reg = (word & constants::EA_REG_MASK) as u8;
    let dst_mode = ea_mode((word & constants::DST_MODE_MASK) >> constants::DST_MODE_OFFSET);
    let dst_reg = ((word & constants::DST_REG_MASK) >> constants::DST_REG_OFFSET) as u8;
    if !valid_source(src_mode, src_reg) || !valid_destination(dst_mode, dst_reg) {
        return None;
    }
    let mut data = InstructionData::new(Operation::Move, size);
    data.op = [src_mode, dst_mode];
    data.reg = [src_reg, dst_reg];
    Some(DecodedInstruction::new(data, exec::data_move::move_op))
}

fn decode_immediate(word: u16) -> Option<DecodedInstruction> {
    let (kind, exec): (Operation, ExecFn) =
        match (word & constants::IMM_FAMILY_MASK) >> constants::IMM_FAMILY_OFFSET {
            0b0000 => (Operation::OrImmediate, exec::logical::or),
            0b0010 => (Operation::AndImmediate, exec::logical::and),
            0b0100 => (Operation::SubImmediate, exec::integer::sub),
            0b0110 => (Operation::AddImmediate, exec::integer::add),
            0b1010 => (Operation::XorImmediate, exec::logical::xor),
            0b1100 => (Operation::CmpImmediate, exec::compare::cmp),
            _ => return None,
        };
    let size = DataSize::from_size_bits((word & constants::SIZE_MASK) >> constants::SIZE_OFFSET)?;
    let dst_mode = ea_mode((word & constants::EA_MODE_MASK) >> constants::EA_MODE_OFFSET);
    let dst_reg = (word & constants::EA_REG_MASK) as u8;
    if dst_mode == AddressingMode::AddressDirect || !valid_destination(dst_mode, dst_reg) {
        return None;
    }
    let mut data = InstructionData::new(kind, size);
    data.op = [AddressingMode::Extension, dst_mode];
    data.reg = [ExtensionMode::Immediate as u8, dst_reg];
    Some(DecodedInstruction::new(data, exec))
}

fn decode_misc(word: u16) -> Option<DecodedInstruction> {
    let mode = ea_mode((word & constants::EA_MODE_MASK) >> constants::EA_MODE_OFFSET);
    let reg = (word & constants::EA_REG_MASK) as u8;

    if word & 0xFFC0 == 0x4E80 || word & 0xFFC0 == 0x4EC0 {
        if !control_mode(mode, reg) {
            return None;
        }
        let (kind, exec): (Operation, ExecFn) = if word & 0xFFC0 == 0x4E80 {
            (Operation::JumpSub, exec::jump::jsr)
        } else {
            (Operation::Jump, exec::jump::jmp)
        };
        let mut data = InstructionData::new(kind, DataSize::Long);
        data.op[0] = mode;
        data.reg[0] = reg;
        return Some(DecodedInstruction::new(data, exec));
    }

    let (kind, exec): (Operation, ExecFn) = match word & 0xFF00 {
        0x4200 => (Operation::Clear, exec::data_move::clr),
        0x4400 => (Operation::Negate, exec::integer::neg),
        _ => return None,
    };
    let size = DataSize::from_size_bits((word & constants::SIZE_MASK) >> constants::SIZE_OFFSET)?;
    if mode == AddressingMode::AddressDirect || !valid_destination(mode, reg) {
        return None;
    }
    let mut data = InstructionData::new(kind, size);
    data.op[0] = mode;
    data.reg[0] = reg;
    Some(DecodedInstruction::new(data, exec))
}

fn decode_branch(word: u16) -> Option<DecodedInstruction> {
    let cond = ((word & constants::COND_MASK) >> constants::COND_OFFSET) as u8;
    let disp = (word & constants::DISP_MASK) as u8;
    let (kind, exec): (Operation, ExecFn) = match Condition::from_u8(cond)? {
        Condition::True => (Operation::Branch, exec::branch::bra),
        Condition::Subroutine => (Operation::BranchSub, exec::branch::bsr),
        _ => (Operation::BranchCond, exec::branch::bcc),
    };
    let mut data = InstructionData::new(kind, DataSize::Word);
    data.reg = [cond, disp];
    Some(DecodedInstruction::new(data, exec))
}

fn decode_move_quick(word: u16) -> Option<DecodedInstruction> {
    if word & constants::QUICK_NO_DATA_BIT != 0 {
        return None;
    }
    let mut data = InstructionData::new(Operation::MoveQuick, DataSize::Long);
    data.reg = [
        ((word & constants::DST_REG_MASK) >> constants::DST_REG_OFFSET) as u8,
        (word & constants::QUICK_DATA_MASK) as u8,
    ];
    Some(DecodedInstruction::new(data, exec::data_move::moveq))
}

/// The dyadic families: `or`, `sub`, `cmp`/`cmpa`/`eor`, `and`/`mul`,
/// `add`. The opmode field selects size and direction, with slots 3 and 7
/// carrying the family's odd members.
fn decode_standard(word: u16) -> Option<DecodedInstruction> {
    let family = word >> constants::NIBBLE_OFFSET;
    let opmode = (word & constants::OPMODE_MASK) >> constants::OPMODE_OFFSET;
    let reg9 = ((word & constants::REG_FIELD_MASK) >> constants::REG_FIELD_OFFSET) as u8;
    let ea = ea_mode((word & constants::EA_MODE_MASK) >> constants::EA_MODE_OFFSET);
    let ea_reg = (word & constants::EA_REG_MASK) as u8;

    // cmpa and the multiplies live in the word-only opmode slots.
    match (family, opmode) {
        (0b1011, 0b011) | (0b1011, 0b111) => {
            if !valid_source(ea, ea_reg) {
                return None;
            }
            let size = if opmode == 0b011 {
                DataSize::Word
            } else {
                DataSize::Long
            };
            let mut data = InstructionData::new(Operation::CmpAddress, size);
            data.op = [ea, AddressingMode::AddressDirect];
            data.reg = [ea_reg, reg9];
            return Some(DecodedInstruction::new(data, exec::compare::cmpa));
        }
        (0b1100, 0b011) | (0b1100, 0b111) => {
            if ea == AddressingMode::AddressDirect || !valid_source(ea, ea_reg) {
                return None;
            }
            let (kind, exec): (Operation, ExecFn) = if opmode == 0b011 {
                (Operation::MulUnsigned, exec::mul::mulu)
            } else {
                (Operation::MulSigned, exec::mul::muls)
            };
            let mut data = InstructionData::new(kind, DataSize::Word);
            data.op = [ea, AddressingMode::DataDirect];
            data.reg = [ea_reg, reg9];
            return Some(DecodedInstruction::new(data, exec));
        }
        _ => {}
    }

    let size = DataSize::from_size_bits(opmode & 0b011)?;
    let to_ea = opmode & constants::OPMODE_DIRECTION != 0;

    let (kind, exec): (Operation, ExecFn) = match (family, to_ea) {
        (0b1000, _) => (Operation::Or, exec::logical::or),
        (0b1001, _) => (Operation::Sub, exec::integer::sub),
        (0b1011, false) => (Operation::Cmp, exec::compare::cmp),
        (0b1011, true) => (Operation::Xor, exec::logical::xor),
        (0b1100, _) => (Operation::And, exec::logical::and),
        (0b1101, _) => (Operation::Add, exec::integer::add),
        _ => return None,
    };

    let mut data = InstructionData::new(kind, size);
    if to_ea {
        // Dn op <ea> -> <ea>; eor is only ever this direction.
        if kind == Operation::Xor {
            if ea == AddressingMode::AddressDirect || !valid_destination(ea, ea_reg) {
                return None;
            }
        } else if !memory_destination(ea, ea_reg) {
            return None;
        }
        data.op = [AddressingMode::DataDirect, ea];
        data.reg = [reg9, ea_reg];
    } else {
        // <ea> op Dn -> Dn.
        if !valid_source(ea, ea_reg) {
            return None;
        }
        data.op = [ea, AddressingMode::DataDirect];
        data.reg = [ea_reg, reg9];
    }
    Some(DecodedInstruction::new(data, exec))
}

fn shift_kind(type_bits: u16, left: bool) -> Option<Operation> {
    match (type_bits, left) {
        (0b00, true) => Some(Operation::ArithmeticShiftLeft),
        (0b00, false) => Some(Operation::ArithmeticShiftRight),
        (0b01, true) => Some(Operation::LogicalShiftLeft),
        (0b01, false) => Some(Operation::LogicalShiftRight),
        (0b11, true) => Some(Operation::RotateLeft),
        (0b11, false) => Some(Operation::RotateRight),
        _ => None,
    }
}

fn decode_shift(word: u16) -> Option<DecodedInstruction> {
    let left = word & constants::SHIFT_DIR_BIT != 0;

    if word & constants::SIZE_MASK == constants::SIZE_MASK {
        // Memory form: shift one word-sized operand by one.
        if word & constants::SHIFT_MEM_BIT != 0 {
            return None;
        }
        let type_bits = (word & constants::SHIFT_MEM_TYPE_MASK) >> constants::SHIFT_MEM_TYPE_OFFSET;
        let kind = shift_kind(type_bits, left)?;
        let mode = ea_mode((word & constants::EA_MODE_MASK) >> constants::EA_MODE_OFFSET);
        let reg = (word & constants::EA_REG_MASK) as u8;
        if !memory_destination(mode, reg) {
            return None;
        }
        let mut data = InstructionData::new(kind, DataSize::Word);
        data.op = [AddressingMode::Extension, mode];
        data.reg = [1, reg];
        return Some(DecodedInstruction::new(data, exec::shift::shift));
    }

    let size = DataSize::from_size_bits((word & constants::SIZE_MASK) >> constants::SIZE_OFFSET)?;
    let type_bits = (word & constants::SHIFT_TYPE_MASK) >> constants::SHIFT_TYPE_OFFSET;
    let kind = shift_kind(type_bits, left)?;
    let count = ((word & constants::SHIFT_COUNT_MASK) >> constants::SHIFT_COUNT_OFFSET) as u8;
    let from_register = word & constants::SHIFT_IR_BIT != 0;

    let mut data = InstructionData::new(kind, size);
    if from_register {
        data.op[0] = AddressingMode::DataDirect;
        data.reg[0] = count;
    } else {
        // The 3-bit immediate count encodes 8 as 0.
        data.op[0] = AddressingMode::Extension;
        data.reg[0] = if count == 0 { 8 } else { count };
    }
    data.op[1] = AddressingMode::DataDirect;
    data.reg[1] = (word & constants::EA_REG_MASK) as u8;
    Some(DecodedInstruction::new(data, exec::shift::shift))
}

/// Decodes the 16-bit word at `offset`, which must lie inside the
/// executable region. Unknown bit patterns yield the `illegal` executor.
pub fn decode(mem: &ExecutableMemory, offset: u32) -> DecodedInstruction {
    let word = match mem.read_u16(offset) {
        Ok(word) => word,
        Err(()) => return DecodedInstruction::illegal(),
    };

    let decoded = match word >> constants::NIBBLE_OFFSET {
        0b0000 => decode_immediate(word),
        0b0001 | 0b0010 | 0b0011 => decode_move(word),
        0b0100 => decode_misc(word),
        0b0110 => decode_branch(word),
        0b0111 => decode_move_quick(word),
        0b1000 | 0b1001 | 0b1011 | 0b1100 | 0b1101 => decode_standard(word),
        0b1110 => decode_shift(word),
        _ => None,
    };

    match decoded {
        Some(instr) => {
            // The opcode and all its extension words must fit inside the
            // executable region.
            let total = constants::OPCODE_BYTES + extension_words(&instr.data) * 2;
            if offset as u64 + total as u64 > mem.executable.end as u64 {
                DecodedInstruction::illegal()
            } else {
                instr
            }
        }
        None => DecodedInstruction::illegal(),
    }
}
