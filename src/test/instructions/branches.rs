use crate::test::*;
use crate::*;

#[test]
fn bra_short_skips_ahead() {
    // 0: bra +4 / 2: moveq #1, d1 / 4: moveq #2, d2
    let emu = run(&[0x6004, 0x7201, 0x7402]);
    let sys = head(&emu);
    assert_eq!(sys.cpu.data[1], 0);
    assert_eq!(sys.cpu.data[2], 2);
}

#[test]
fn bra_long_form_reads_word_displacement() {
    // 0: bra (word) +6 / 4: moveq #1, d1 / 6: moveq #2, d2
    let emu = run(&[0x6000, 0x0006, 0x7201, 0x7402]);
    let sys = head(&emu);
    assert_eq!(sys.cpu.data[1], 0);
    assert_eq!(sys.cpu.data[2], 2);
}

#[test]
fn bra_backward() {
    // 0: bra +4 / 2: moveq #2, d2 (reached second) / 4: bra -2
    let mut emu = boot(&[0x6004, 0x7402, 0x60FE]);
    step_n(&mut emu, 1);
    assert_eq!(head(&emu).cpu.program_counter, 4);
    step_n(&mut emu, 1);
    assert_eq!(head(&emu).cpu.program_counter, 2);
    step_n(&mut emu, 1);
    assert_eq!(head(&emu).cpu.data[2], 2);
}

#[test]
fn beq_taken_when_zero() {
    // 0: moveq #0, d0 / 2: beq +4 / 4: moveq #1, d1 / 6: moveq #2, d2
    let emu = run(&[0x7000, 0x6704, 0x7201, 0x7402]);
    let sys = head(&emu);
    assert_eq!(sys.cpu.data[1], 0);
    assert_eq!(sys.cpu.data[2], 2);
}

#[test]
fn beq_not_taken_short_advances_two() {
    // 0: moveq #1, d0 / 2: beq +4 / 4: moveq #7, d1 / 6: moveq #2, d2
    let mut emu = boot(&[0x7001, 0x6704, 0x7207, 0x7402]);
    step_n(&mut emu, 2);
    assert_eq!(head(&emu).cpu.program_counter, 4);
    continue_execution(&mut emu);
    assert_eq!(head(&emu).cpu.data[1], 7);
    assert_eq!(head(&emu).cpu.data[2], 2);
}

#[test]
fn beq_not_taken_long_advances_four() {
    // 0: moveq #1, d0 / 2: beq (word) +6 / 6: moveq #7, d1
    let mut emu = boot(&[0x7001, 0x6700, 0x0006, 0x7207]);
    step_n(&mut emu, 2);
    assert_eq!(head(&emu).cpu.program_counter, 6);
    step_n(&mut emu, 1);
    assert_eq!(head(&emu).cpu.data[1], 7);
}

#[test]
fn bne_taken_when_not_zero() {
    // 0: moveq #1, d0 / 2: bne +4 / 4: moveq #1, d1 / 6: moveq #2, d2
    let emu = run(&[0x7001, 0x6604, 0x7201, 0x7402]);
    assert_eq!(head(&emu).cpu.data[1], 0);
    assert_eq!(head(&emu).cpu.data[2], 2);
}

#[test]
fn signed_conditions_follow_n_and_v() {
    // d0 = 3, cmp.w #5 -> N=1 V=0: blt taken, bge not.
    // 0: moveq #3, d0 / 2: cmp.w #5, d0 / 6: blt +4 / 8: moveq #1, d1 / 10: moveq #2, d2
    let emu = run(&[0x7003, 0xB07C, 0x0005, 0x6D04, 0x7201, 0x7402]);
    assert_eq!(head(&emu).cpu.data[1], 0);
    assert_eq!(head(&emu).cpu.data[2], 2);

    let emu = run(&[0x7003, 0xB07C, 0x0005, 0x6C04, 0x7201, 0x7402]);
    assert_eq!(head(&emu).cpu.data[1], 1, "bge must fall through");
}

#[test]
fn bgt_requires_nonzero() {
    // d0 = 5, cmp.w #5 -> Z=1: bgt falls through, ble takes.
    let emu = run(&[0x7005, 0xB07C, 0x0005, 0x6E04, 0x7201, 0x7402]);
    assert_eq!(head(&emu).cpu.data[1], 1);

    let emu = run(&[0x7005, 0xB07C, 0x0005, 0x6F04, 0x7201, 0x7402]);
    assert_eq!(head(&emu).cpu.data[1], 0);
    assert_eq!(head(&emu).cpu.data[2], 2);
}

#[test]
fn bsr_pushes_the_return_address() {
    // 0: bsr (word) +6 / 4: moveq #1, d1 / 6: moveq #2, d2
    let mut emu = boot(&[0x6100, 0x0006, 0x7201, 0x7402]);
    let sp_before = head(&emu).cpu.stack_pointer();
    continue_execution(&mut emu);
    let sys = head(&emu);
    assert_eq!(sys.cpu.stack_pointer(), sp_before - 4);
    assert_eq!(sys.mem.read_u32(sys.cpu.stack_pointer() as u32), Ok(4));
    assert_eq!(sys.cpu.data[1], 0);
    assert_eq!(sys.cpu.data[2], 2);
}

#[test]
fn bsr_short_return_address_is_after_opcode() {
    // 0: bsr +4 / 2: moveq #1, d1 / 4: moveq #2, d2
    let mut emu = boot(&[0x6104, 0x7201, 0x7402]);
    step_n(&mut emu, 1);
    let sys = head(&emu);
    assert_eq!(sys.mem.read_u32(sys.cpu.stack_pointer() as u32), Ok(2));
    assert_eq!(sys.cpu.program_counter, 4);
}
