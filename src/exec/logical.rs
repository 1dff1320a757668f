use super::{advance_pc, load, resolve, store, ExecResult};
use crate::cpu::System;
use crate::enums::InstructionData;

fn bit_op(sys: &mut System, data: &InstructionData, op: fn(i32, i32) -> i32) -> ExecResult {
    let (src, src_ext) = resolve(sys, data.op[0], data.reg[0], data.size, 0)?;
    let a = load(sys, src, data.size)?;
    let (dst, dst_ext) = resolve(sys, data.op[1], data.reg[1], data.size, src_ext)?;
    let b = load(sys, dst, data.size)?;
    let result = op(b, a);
    store(sys, dst, data.size, result)?;
    sys.cpu.status.set_nz(result, data.size);
    sys.cpu.status.clear_vc();
    advance_pc(sys, src_ext + dst_ext);
    Ok(())
}

pub(crate) fn and(sys: &mut System, data: &InstructionData) -> ExecResult {
    bit_op(sys, data, |dst, src| dst & src)
}

pub(crate) fn or(sys: &mut System, data: &InstructionData) -> ExecResult {
    bit_op(sys, data, |dst, src| dst | src)
}

pub(crate) fn xor(sys: &mut System, data: &InstructionData) -> ExecResult {
    bit_op(sys, data, |dst, src| dst ^ src)
}
