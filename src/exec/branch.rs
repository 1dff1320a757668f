use num::FromPrimitive;

use super::{ext_word, push_long, ExecResult, Fault};
use crate::cpu::System;
use crate::enums::{Condition, InstructionData};

/// Reads the branch displacement. A zero byte field means the real
/// displacement follows as a 16-bit extension word, which also widens the
/// not-taken advance from 2 to 4 bytes.
fn displacement(sys: &System, data: &InstructionData) -> Result<(i32, bool), Fault> {
    let byte = data.reg[1] as i8;
    if byte == 0 {
        let word = ext_word(sys, 0)? as i16;
        Ok((word as i32, true))
    } else {
        Ok((byte as i32, false))
    }
}

fn take(sys: &mut System, disp: i32) {
    sys.cpu.program_counter = sys.cpu.program_counter.wrapping_add(disp as u32);
}

fn fall_through(sys: &mut System, long_form: bool) {
    let advance = if long_form { 4 } else { 2 };
    sys.cpu.program_counter = sys.cpu.program_counter.wrapping_add(advance);
}

pub(crate) fn bra(sys: &mut System, data: &InstructionData) -> ExecResult {
    let (disp, _) = displacement(sys, data)?;
    take(sys, disp);
    Ok(())
}

pub(crate) fn bsr(sys: &mut System, data: &InstructionData) -> ExecResult {
    let (disp, long_form) = displacement(sys, data)?;
    let return_address = sys
        .cpu
        .program_counter
        .wrapping_add(if long_form { 4 } else { 2 });
    push_long(sys, return_address)?;
    take(sys, disp);
    Ok(())
}

pub(crate) fn bcc(sys: &mut System, data: &InstructionData) -> ExecResult {
    let condition = Condition::from_u8(data.reg[0]).ok_or(Fault::IllegalInstruction)?;
    let (disp, long_form) = displacement(sys, data)?;
    if condition.holds(&sys.cpu.status) {
        take(sys, disp);
    } else {
        fall_through(sys, long_form);
    }
    Ok(())
}
