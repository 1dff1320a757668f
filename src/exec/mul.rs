use super::{advance_pc, load, resolve, ExecResult};
use crate::cpu::System;
use crate::enums::{DataSize, InstructionData};

// Both multiplies take word operands and produce a full long result, so
// the product always fits and V is identically zero.

pub(crate) fn mulu(sys: &mut System, data: &InstructionData) -> ExecResult {
    let (src, src_ext) = resolve(sys, data.op[0], data.reg[0], DataSize::Word, 0)?;
    let a = load(sys, src, DataSize::Word)? as u32 & 0xFFFF;
    let reg = data.reg[1] as usize & 7;
    let b = sys.cpu.data[reg] as u32 & 0xFFFF;
    let result = (a * b) as i32;
    sys.cpu.data[reg] = result;
    sys.cpu.status.set_nz(result, DataSize::Long);
    sys.cpu.status.clear_vc();
    advance_pc(sys, src_ext);
    Ok(())
}

pub(crate) fn muls(sys: &mut System, data: &InstructionData) -> ExecResult {
    let (src, src_ext) = resolve(sys, data.op[0], data.reg[0], DataSize::Word, 0)?;
    let a = load(sys, src, DataSize::Word)? as i64;
    let reg = data.reg[1] as usize & 7;
    let b = sys.cpu.data[reg] as i16 as i64;
    let result = (a * b) as i32;
    sys.cpu.data[reg] = result;
    sys.cpu.status.set_nz(result, DataSize::Long);
    sys.cpu.status.clear_vc();
    advance_pc(sys, src_ext);
    Ok(())
}
