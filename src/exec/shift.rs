use super::{advance_pc, load, merge, resolve, store, truncate_signed, ExecResult, Fault};
use crate::cpu::{StatusRegister, System};
use crate::enums::{AddressingMode, DataSize, InstructionData, Operation};

#[derive(Clone, Copy, PartialEq, Eq)]
enum ShiftType {
    Arithmetic,
    Logical,
    Rotate,
}

fn classify(kind: Operation) -> Option<(ShiftType, bool)> {
    match kind {
        Operation::ArithmeticShiftLeft => Some((ShiftType::Arithmetic, true)),
        Operation::ArithmeticShiftRight => Some((ShiftType::Arithmetic, false)),
        Operation::LogicalShiftLeft => Some((ShiftType::Logical, true)),
        Operation::LogicalShiftRight => Some((ShiftType::Logical, false)),
        Operation::RotateLeft => Some((ShiftType::Rotate, true)),
        Operation::RotateRight => Some((ShiftType::Rotate, false)),
        _ => None,
    }
}

/// Applies `count` single-bit steps, tracking the last bit shifted out in
/// C (mirrored into X for shifts, not rotates) and accumulating V for
/// `asl` sign changes.
fn apply(
    status: &mut StatusRegister,
    value: i32,
    count: u32,
    size: DataSize,
    ty: ShiftType,
    left: bool,
) -> i32 {
    let mask = size.mask();
    let sign = size.sign_bit();
    let mut bits = value as u32 & mask;
    let mut carry = false;
    let mut overflow = false;

    for _ in 0..count {
        if left {
            carry = bits & sign != 0;
            let shifted = (bits << 1) & mask;
            if (shifted ^ bits) & sign != 0 {
                overflow = true;
            }
            bits = if ty == ShiftType::Rotate {
                shifted | carry as u32
            } else {
                shifted
            };
        } else {
            carry = bits & 1 != 0;
            let fill = match ty {
                ShiftType::Arithmetic => bits & sign,
                ShiftType::Logical => 0,
                ShiftType::Rotate => {
                    if carry {
                        sign
                    } else {
                        0
                    }
                }
            };
            bits = (bits >> 1) | fill;
        }
    }

    status.carry = count > 0 && carry;
    if count > 0 && ty != ShiftType::Rotate {
        status.extend = status.carry;
    }
    status.overflow = ty == ShiftType::Arithmetic && left && overflow;
    status.set_nz(bits as i32, size);
    truncate_signed(bits as i32, size)
}

pub(crate) fn shift(sys: &mut System, data: &InstructionData) -> ExecResult {
    let (ty, left) = match classify(data.kind) {
        Some(c) => c,
        None => return Err(Fault::IllegalInstruction),
    };

    if data.op[1] == AddressingMode::DataDirect {
        // Register form: the count comes from a data register (mod 64) or
        // from the 3-bit immediate field.
        let count = match data.op[0] {
            AddressingMode::DataDirect => sys.cpu.data[data.reg[0] as usize & 7] as u32 & 63,
            AddressingMode::Extension => data.reg[0] as u32,
            _ => return Err(Fault::IllegalInstruction),
        };
        let reg = data.reg[1] as usize & 7;
        let value = sys.cpu.data[reg];
        let result = apply(&mut sys.cpu.status, value, count, data.size, ty, left);
        sys.cpu.data[reg] = merge(sys.cpu.data[reg], result, data.size);
        advance_pc(sys, 0);
    } else {
        // Memory form: a single word shifted by one.
        let (dst, ext) = resolve(sys, data.op[1], data.reg[1], DataSize::Word, 0)?;
        let value = load(sys, dst, DataSize::Word)?;
        let result = apply(&mut sys.cpu.status, value, 1, DataSize::Word, ty, left);
        store(sys, dst, DataSize::Word, result)?;
        advance_pc(sys, ext);
    }
    Ok(())
}
