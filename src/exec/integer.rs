use super::{
    add_with_flags, advance_pc, load, resolve, store, sub_with_flags, ExecResult,
};
use crate::cpu::System;
use crate::enums::InstructionData;

pub(crate) fn add(sys: &mut System, data: &InstructionData) -> ExecResult {
    let (src, src_ext) = resolve(sys, data.op[0], data.reg[0], data.size, 0)?;
    let a = load(sys, src, data.size)?;
    let (dst, dst_ext) = resolve(sys, data.op[1], data.reg[1], data.size, src_ext)?;
    let b = load(sys, dst, data.size)?;
    let result = add_with_flags(&mut sys.cpu.status, b, a, data.size);
    store(sys, dst, data.size, result)?;
    advance_pc(sys, src_ext + dst_ext);
    Ok(())
}

pub(crate) fn sub(sys: &mut System, data: &InstructionData) -> ExecResult {
    let (src, src_ext) = resolve(sys, data.op[0], data.reg[0], data.size, 0)?;
    let a = load(sys, src, data.size)?;
    let (dst, dst_ext) = resolve(sys, data.op[1], data.reg[1], data.size, src_ext)?;
    let b = load(sys, dst, data.size)?;
    let result = sub_with_flags(&mut sys.cpu.status, b, a, data.size, true);
    store(sys, dst, data.size, result)?;
    advance_pc(sys, src_ext + dst_ext);
    Ok(())
}

pub(crate) fn neg(sys: &mut System, data: &InstructionData) -> ExecResult {
    let (dst, ext) = resolve(sys, data.op[0], data.reg[0], data.size, 0)?;
    let value = load(sys, dst, data.size)?;
    let result = sub_with_flags(&mut sys.cpu.status, 0, value, data.size, true);
    store(sys, dst, data.size, result)?;
    advance_pc(sys, ext);
    Ok(())
}
