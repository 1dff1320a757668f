use super::{advance_pc, load, resolve, store, ExecResult, Location};
use crate::cpu::System;
use crate::enums::{DataSize, InstructionData};

pub(crate) fn move_op(sys: &mut System, data: &InstructionData) -> ExecResult {
    let (src, src_ext) = resolve(sys, data.op[0], data.reg[0], data.size, 0)?;
    let value = load(sys, src, data.size)?;
    let (dst, dst_ext) = resolve(sys, data.op[1], data.reg[1], data.size, src_ext)?;
    store(sys, dst, data.size, value)?;
    if let Location::Addr(_) = dst {
        // movea form: address register writes never touch the flags
    } else {
        sys.cpu.status.set_nz(value, data.size);
        sys.cpu.status.clear_vc();
    }
    advance_pc(sys, src_ext + dst_ext);
    Ok(())
}

pub(crate) fn moveq(sys: &mut System, data: &InstructionData) -> ExecResult {
    let value = data.reg[1] as i8 as i32;
    sys.cpu.data[data.reg[0] as usize & 7] = value;
    sys.cpu.status.set_nz(value, DataSize::Long);
    sys.cpu.status.clear_vc();
    advance_pc(sys, 0);
    Ok(())
}

pub(crate) fn clr(sys: &mut System, data: &InstructionData) -> ExecResult {
    let (dst, ext) = resolve(sys, data.op[0], data.reg[0], data.size, 0)?;
    store(sys, dst, data.size, 0)?;
    sys.cpu.status.negative = false;
    sys.cpu.status.zero = true;
    sys.cpu.status.clear_vc();
    advance_pc(sys, ext);
    Ok(())
}
