use super::{push_long, resolve, ExecResult, Fault, Location};
use crate::constants;
use crate::cpu::System;
use crate::enums::{DataSize, InstructionData};

fn target(sys: &mut System, data: &InstructionData) -> Result<(u32, u32), Fault> {
    let (location, ext) = resolve(sys, data.op[0], data.reg[0], DataSize::Long, 0)?;
    match location {
        Location::Memory(address) => Ok((address, ext)),
        // Register and immediate operands are not jump targets; the
        // decoder already filters them, so hand-built data is at fault.
        _ => Err(Fault::IllegalInstruction),
    }
}

pub(crate) fn jmp(sys: &mut System, data: &InstructionData) -> ExecResult {
    let (address, _) = target(sys, data)?;
    sys.cpu.program_counter = address;
    Ok(())
}

pub(crate) fn jsr(sys: &mut System, data: &InstructionData) -> ExecResult {
    let (address, ext) = target(sys, data)?;
    let return_address = sys
        .cpu
        .program_counter
        .wrapping_add(constants::OPCODE_BYTES + ext * 2);
    push_long(sys, return_address)?;
    sys.cpu.program_counter = address;
    Ok(())
}
