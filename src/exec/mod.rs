//! Instruction executors.
//!
//! Every executor has the same shape: it reads its operands through the
//! effective-address engine below, applies the operation to a scratch
//! [`System`], and advances the program counter past the opcode word and
//! whatever extension words it consumed. Taken branches write the program
//! counter directly instead.

pub(crate) mod branch;
pub(crate) mod compare;
pub(crate) mod data_move;
pub(crate) mod integer;
pub(crate) mod jump;
pub(crate) mod logical;
pub(crate) mod mul;
pub(crate) mod shift;

use crate::constants;
use crate::cpu::{StatusRegister, System};
use crate::enums::{AddressingMode, DataSize, ExtensionMode, InstructionData};
use num::FromPrimitive;

/// Runtime faults an executor can raise. A faulting instruction never
/// half-applies: the emulator discards the scratch state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Fault {
    IllegalInstruction,
    BadAccess(u32),
}

pub type ExecResult = Result<(), Fault>;

/// Executor attached to a decoded instruction.
pub type ExecFn = fn(&mut System, &InstructionData) -> ExecResult;

pub(crate) fn illegal(_sys: &mut System, _data: &InstructionData) -> ExecResult {
    Err(Fault::IllegalInstruction)
}

/// Where an operand lives once its addressing mode is resolved.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Location {
    Data(usize),
    Addr(usize),
    Memory(u32),
    Value(i32),
}

/// Reads the extension word `index` words behind the opcode.
pub(crate) fn ext_word(sys: &System, index: u32) -> Result<u16, Fault> {
    let address = sys
        .cpu
        .program_counter
        .wrapping_add(constants::OPCODE_BYTES + index * 2);
    sys.mem.read_u16(address).map_err(|_| Fault::BadAccess(address))
}

/// Resolves an effective address, consuming extension words starting at
/// `ext_index` and applying post-increment/pre-decrement side effects.
/// Returns the location and the number of extension words consumed.
pub(crate) fn resolve(
    sys: &mut System,
    mode: AddressingMode,
    reg: u8,
    size: DataSize,
    ext_index: u32,
) -> Result<(Location, u32), Fault> {
    let r = reg as usize & 7;
    match mode {
        AddressingMode::DataDirect => Ok((Location::Data(r), 0)),
        AddressingMode::AddressDirect => Ok((Location::Addr(r), 0)),
        AddressingMode::AddressIndirect => Ok((Location::Memory(sys.cpu.addr[r] as u32), 0)),
        AddressingMode::PostIncrement => {
            let address = sys.cpu.addr[r] as u32;
            sys.cpu.addr[r] = sys.cpu.addr[r].wrapping_add(size.byte_count() as i32);
            Ok((Location::Memory(address), 0))
        }
        AddressingMode::PreDecrement => {
            sys.cpu.addr[r] = sys.cpu.addr[r].wrapping_sub(size.byte_count() as i32);
            Ok((Location::Memory(sys.cpu.addr[r] as u32), 0))
        }
        AddressingMode::Displacement => {
            let displacement = ext_word(sys, ext_index)? as i16 as i32;
            let address = (sys.cpu.addr[r] as u32).wrapping_add(displacement as u32);
            Ok((Location::Memory(address), 1))
        }
        AddressingMode::Index => {
            let extension = ext_word(sys, ext_index)?;
            let index_reg =
                ((extension & constants::INDEX_REG_MASK) >> constants::INDEX_REG_OFFSET) as usize;
            let displacement = (extension & constants::INDEX_DISP_MASK) as u8 as i8 as i32;
            let index = if index_reg < 8 {
                sys.cpu.data[index_reg]
            } else {
                sys.cpu.addr[index_reg - 8]
            };
            let address = (sys.cpu.addr[r] as u32)
                .wrapping_add(index as u32)
                .wrapping_add(displacement as u32);
            Ok((Location::Memory(address), 1))
        }
        AddressingMode::Extension => match ExtensionMode::from_u8(reg) {
            Some(ExtensionMode::AbsoluteShort) => {
                let address = ext_word(sys, ext_index)? as i16 as i32;
                Ok((Location::Memory(address as u32), 1))
            }
            Some(ExtensionMode::AbsoluteLong) => {
                let high = ext_word(sys, ext_index)? as u32;
                let low = ext_word(sys, ext_index + 1)? as u32;
                Ok((Location::Memory((high << 16) | low), 2))
            }
            Some(ExtensionMode::Immediate) => match size {
                DataSize::Byte => {
                    let value = ext_word(sys, ext_index)? as u8 as i8 as i32;
                    Ok((Location::Value(value), 1))
                }
                DataSize::Word => {
                    let value = ext_word(sys, ext_index)? as i16 as i32;
                    Ok((Location::Value(value), 1))
                }
                DataSize::Long => {
                    let high = ext_word(sys, ext_index)? as u32;
                    let low = ext_word(sys, ext_index + 1)? as u32;
                    Ok((Location::Value(((high << 16) | low) as i32), 2))
                }
            },
            None => Err(Fault::IllegalInstruction),
        },
    }
}

/// Truncates `value` to `size` and sign-extends it back to 32 bits.
pub(crate) fn truncate_signed(value: i32, size: DataSize) -> i32 {
    match size {
        DataSize::Byte => value as i8 as i32,
        DataSize::Word => value as i16 as i32,
        DataSize::Long => value,
    }
}

/// Replaces the low `size` bits of `old` with those of `value`.
pub(crate) fn merge(old: i32, value: i32, size: DataSize) -> i32 {
    ((old as u32 & !size.mask()) | (value as u32 & size.mask())) as i32
}

pub(crate) fn load(sys: &System, location: Location, size: DataSize) -> Result<i32, Fault> {
    match location {
        Location::Data(r) => Ok(truncate_signed(sys.cpu.data[r], size)),
        Location::Addr(r) => Ok(truncate_signed(sys.cpu.addr[r], size)),
        Location::Value(value) => Ok(truncate_signed(value, size)),
        Location::Memory(address) => {
            let read = match size {
                DataSize::Byte => sys.mem.read_u8(address).map(|v| v as i8 as i32),
                DataSize::Word => sys.mem.read_u16(address).map(|v| v as i16 as i32),
                DataSize::Long => sys.mem.read_u32(address).map(|v| v as i32),
            };
            read.map_err(|_| Fault::BadAccess(address))
        }
    }
}

pub(crate) fn store(
    sys: &mut System,
    location: Location,
    size: DataSize,
    value: i32,
) -> Result<(), Fault> {
    match location {
        Location::Data(r) => {
            sys.cpu.data[r] = merge(sys.cpu.data[r], value, size);
            Ok(())
        }
        // Writes to an address register always replace the whole register,
        // sign-extending word-sized values.
        Location::Addr(r) => {
            sys.cpu.addr[r] = truncate_signed(value, size);
            Ok(())
        }
        Location::Value(_) => Err(Fault::IllegalInstruction),
        Location::Memory(address) => {
            let written = match size {
                DataSize::Byte => sys.mem.write_u8(address, value as u8),
                DataSize::Word => sys.mem.write_u16(address, value as u16),
                DataSize::Long => sys.mem.write_u32(address, value as u32),
            };
            written.map_err(|_| Fault::BadAccess(address))
        }
    }
}

/// Pushes a long word onto the stack through `a7` pre-decrement.
pub(crate) fn push_long(sys: &mut System, value: u32) -> Result<(), Fault> {
    let sp = constants::STACK_POINTER;
    sys.cpu.addr[sp] = sys.cpu.addr[sp].wrapping_sub(constants::LONG_BYTES as i32);
    let address = sys.cpu.addr[sp] as u32;
    sys.mem
        .write_u32(address, value)
        .map_err(|_| Fault::BadAccess(address))
}

/// Advances the program counter past the opcode word and `ext_words`
/// extension words.
pub(crate) fn advance_pc(sys: &mut System, ext_words: u32) {
    sys.cpu.program_counter = sys
        .cpu
        .program_counter
        .wrapping_add(constants::OPCODE_BYTES + ext_words * 2);
}

/// `dst + src` at `size`, with the full N/Z/V/C/X arithmetic flag set.
pub(crate) fn add_with_flags(
    status: &mut StatusRegister,
    dst: i32,
    src: i32,
    size: DataSize,
) -> i32 {
    let mask = size.mask() as u64;
    let a = dst as u32 as u64 & mask;
    let b = src as u32 as u64 & mask;
    let sum = a + b;
    let result = (sum & mask) as u32;
    let sign = size.sign_bit();
    status.carry = sum > mask;
    status.extend = status.carry;
    status.overflow = ((a as u32 ^ result) & (b as u32 ^ result) & sign) != 0;
    status.set_nz(result as i32, size);
    truncate_signed(result as i32, size)
}

/// `dst - src` at `size`. Compares leave the extend flag alone, so X is
/// only mirrored from the borrow when `set_extend` is given.
pub(crate) fn sub_with_flags(
    status: &mut StatusRegister,
    dst: i32,
    src: i32,
    size: DataSize,
    set_extend: bool,
) -> i32 {
    let mask = size.mask();
    let a = dst as u32 & mask;
    let b = src as u32 & mask;
    let result = a.wrapping_sub(b) & mask;
    let sign = size.sign_bit();
    status.carry = b > a;
    if set_extend {
        status.extend = status.carry;
    }
    status.overflow = ((a ^ b) & (a ^ result) & sign) != 0;
    status.set_nz(result as i32, size);
    truncate_signed(result as i32, size)
}
