use crate::test::*;
use crate::*;

#[test]
fn mulu_produces_long_result() {
    // move.w #$FFFF, d0 / move.w #$FFFF, d1 / mulu d0, d1
    let mut emu = boot(&[0x303C, 0xFFFF, 0x323C, 0xFFFF, 0xC2C0]);
    step_n(&mut emu, 3);
    let sys = head(&emu);
    assert_eq!(sys.cpu.data[1] as u32, 0xFFFE_0001);
    assert!(sys.cpu.status.negative);
    assert!(!sys.cpu.status.overflow);
    assert!(!sys.cpu.status.carry);
}

#[test]
fn mulu_treats_operands_as_unsigned() {
    // move.w #$FFFF, d0 / moveq #2, d1 / mulu d0, d1
    let mut emu = boot(&[0x303C, 0xFFFF, 0x7202, 0xC2C0]);
    step_n(&mut emu, 3);
    assert_eq!(head(&emu).cpu.data[1] as u32, 0x0001_FFFE);
}

#[test]
fn muls_treats_operands_as_signed() {
    // move.w #-1, d0 / moveq #2, d1 / muls d0, d1
    let mut emu = boot(&[0x303C, 0xFFFF, 0x7202, 0xC3C0]);
    step_n(&mut emu, 3);
    assert_eq!(head(&emu).cpu.data[1], -2);
    assert!(head(&emu).cpu.status.negative);
}

#[test]
fn muls_with_immediate_source() {
    // moveq #-3, d2 / muls #4, d2
    let mut emu = boot(&[0x74FD, 0xC5FC, 0x0004]);
    step_n(&mut emu, 2);
    assert_eq!(head(&emu).cpu.data[2], -12);
}

#[test]
fn mul_only_reads_the_low_word() {
    // move.l #$00017FFF, d0 (high word set) / muls #2, d0
    let mut emu = boot(&[0x203C, 0x0001, 0x7FFF, 0xC1FC, 0x0002]);
    step_n(&mut emu, 2);
    assert_eq!(head(&emu).cpu.data[0], 0x7FFF * 2);
}
