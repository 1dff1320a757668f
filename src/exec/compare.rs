use super::{advance_pc, load, resolve, sub_with_flags, ExecResult};
use crate::cpu::System;
use crate::enums::{DataSize, InstructionData};

/// `cmp`/`cmpi`: `dst - src` for the flags only. X is untouched.
pub(crate) fn cmp(sys: &mut System, data: &InstructionData) -> ExecResult {
    let (src, src_ext) = resolve(sys, data.op[0], data.reg[0], data.size, 0)?;
    let a = load(sys, src, data.size)?;
    let (dst, dst_ext) = resolve(sys, data.op[1], data.reg[1], data.size, src_ext)?;
    let b = load(sys, dst, data.size)?;
    sub_with_flags(&mut sys.cpu.status, b, a, data.size, false);
    advance_pc(sys, src_ext + dst_ext);
    Ok(())
}

/// `cmpa`: the source is sign-extended to 32 bits and compared against
/// the full address register.
pub(crate) fn cmpa(sys: &mut System, data: &InstructionData) -> ExecResult {
    let (src, src_ext) = resolve(sys, data.op[0], data.reg[0], data.size, 0)?;
    let a = load(sys, src, data.size)?;
    let b = sys.cpu.addr[data.reg[1] as usize & 7];
    sub_with_flags(&mut sys.cpu.status, b, a, DataSize::Long, false);
    advance_pc(sys, src_ext);
    Ok(())
}
