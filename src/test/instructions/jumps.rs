use crate::test::*;
use crate::*;

#[test]
fn jmp_absolute_short() {
    // 0: jmp $6 / 4: moveq #1, d1 / 6: moveq #2, d2
    let emu = run(&[0x4EF8, 0x0006, 0x7201, 0x7402]);
    assert_eq!(head(&emu).cpu.data[1], 0);
    assert_eq!(head(&emu).cpu.data[2], 2);
}

#[test]
fn jmp_address_indirect() {
    // 0: move.l #8, a0 / 6: jmp (a0) / 8: moveq #2, d2
    let mut emu = boot(&[0x207C, 0x0000, 0x0008, 0x4ED0, 0x7402]);
    step_n(&mut emu, 2);
    assert_eq!(head(&emu).cpu.program_counter, 8);
    step_n(&mut emu, 1);
    assert_eq!(head(&emu).cpu.data[2], 2);
}

#[test]
fn jmp_with_displacement() {
    // 0: move.l #6, a0 / 6: jmp 4(a0) / 10: moveq #2, d2
    let mut emu = boot(&[0x207C, 0x0000, 0x0006, 0x4EE8, 0x0004, 0x7402]);
    step_n(&mut emu, 2);
    assert_eq!(head(&emu).cpu.program_counter, 10);
    step_n(&mut emu, 1);
    assert_eq!(head(&emu).cpu.data[2], 2);
}

#[test]
fn jsr_pushes_the_return_address() {
    // 0: jsr $8 / 4: moveq #1, d1 / 6: moveq #3, d3 / 8: moveq #2, d2
    let mut emu = boot(&[0x4EB8, 0x0008, 0x7201, 0x7603, 0x7402]);
    let sp_before = head(&emu).cpu.stack_pointer();
    step_n(&mut emu, 1);
    let sys = head(&emu);
    assert_eq!(sys.cpu.program_counter, 8);
    assert_eq!(sys.cpu.stack_pointer(), sp_before - 4);
    assert_eq!(sys.mem.read_u32(sys.cpu.stack_pointer() as u32), Ok(4));
}

#[test]
fn jmp_register_direct_is_illegal() {
    // jmp d0 is not a control addressing mode.
    let mut emu = boot(&[0x4EC0]);
    assert!(!emu.step());
}
