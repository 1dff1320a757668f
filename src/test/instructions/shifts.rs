use crate::test::*;
use crate::*;

#[test]
fn lsl_immediate_count() {
    // moveq #1, d1 / lsl.w #3, d1
    let mut emu = boot(&[0x7201, 0xE749]);
    step_n(&mut emu, 2);
    let sys = head(&emu);
    assert_eq!(sys.cpu.data[1], 8);
    assert!(!sys.cpu.status.carry);
}

#[test]
fn lsl_shifts_the_top_bit_into_carry_and_extend() {
    // move.w #$8000, d0 / lsl.w #1, d0
    let mut emu = boot(&[0x303C, 0x8000, 0xE348]);
    step_n(&mut emu, 2);
    let sys = head(&emu);
    assert_eq!(sys.cpu.data[0] as u32 & 0xFFFF, 0);
    assert!(sys.cpu.status.carry);
    assert!(sys.cpu.status.extend);
    assert!(sys.cpu.status.zero);
}

#[test]
fn lsr_inserts_zeros() {
    // move.w #$8001, d2 / lsr.w #1, d2
    let mut emu = boot(&[0x343C, 0x8001, 0xE24A]);
    step_n(&mut emu, 2);
    let sys = head(&emu);
    assert_eq!(sys.cpu.data[2] as u32 & 0xFFFF, 0x4000);
    assert!(sys.cpu.status.carry, "bit 0 fell out");
    assert!(!sys.cpu.status.negative);
}

#[test]
fn asr_keeps_the_sign() {
    // move.w #$8000, d0 / asr.w #1, d0
    let mut emu = boot(&[0x303C, 0x8000, 0xE240]);
    step_n(&mut emu, 2);
    let sys = head(&emu);
    assert_eq!(sys.cpu.data[0] as u32 & 0xFFFF, 0xC000);
    assert!(sys.cpu.status.negative);
    assert!(!sys.cpu.status.overflow);
}

#[test]
fn asl_overflow_on_sign_change() {
    // move.w #$4000, d0 / asl.w #1, d0
    let mut emu = boot(&[0x303C, 0x4000, 0xE340]);
    step_n(&mut emu, 2);
    let sys = head(&emu);
    assert_eq!(sys.cpu.data[0] as u32 & 0xFFFF, 0x8000);
    assert!(sys.cpu.status.overflow);
    assert!(sys.cpu.status.negative);
}

#[test]
fn shift_count_from_register_is_mod_64() {
    // moveq #66, d1 / moveq #1, d2 / lsl.w d1, d2  -- 66 % 64 = 2
    let mut emu = boot(&[0x7242, 0x7401, 0xE36A]);
    step_n(&mut emu, 3);
    assert_eq!(head(&emu).cpu.data[2], 4);
}

#[test]
fn shift_count_zero_clears_carry() {
    // moveq #0, d1 / move.w #$8001, d2 / lsr.w d1, d2
    let mut emu = boot(&[0x7200, 0x343C, 0x8001, 0xE26A]);
    step_n(&mut emu, 3);
    let sys = head(&emu);
    assert_eq!(sys.cpu.data[2] as u32 & 0xFFFF, 0x8001);
    assert!(!sys.cpu.status.carry);
    assert!(sys.cpu.status.negative);
}

#[test]
fn immediate_count_field_zero_means_eight() {
    // moveq #1, d3 / lsl.w #8, d3
    let mut emu = boot(&[0x7601, 0xE14B]);
    step_n(&mut emu, 2);
    assert_eq!(head(&emu).cpu.data[3], 0x100);
}

#[test]
fn rol_wraps_the_top_bit() {
    // move.w #$8001, d0 / rol.w #1, d0
    let mut emu = boot(&[0x303C, 0x8001, 0xE358]);
    step_n(&mut emu, 2);
    let sys = head(&emu);
    assert_eq!(sys.cpu.data[0] as u32 & 0xFFFF, 0x0003);
    assert!(sys.cpu.status.carry);
}

#[test]
fn ror_wraps_the_bottom_bit_without_extend() {
    // move.w #$FFFF, d0 / add.w #1, d0 (X=1) / move.w #1, d0 / ror.w #1, d0
    let mut emu = boot(&[
        0x303C, 0xFFFF, 0xD07C, 0x0001, 0x303C, 0x0001, 0xE258,
    ]);
    step_n(&mut emu, 4);
    let sys = head(&emu);
    assert_eq!(sys.cpu.data[0] as u32 & 0xFFFF, 0x8000);
    assert!(sys.cpu.status.carry);
    assert!(sys.cpu.status.extend, "rotates never touch X");
}

#[test]
fn memory_shift_by_one() {
    // move.w #$0001, $0100 / lsl $0100  (memory form)
    let mut emu = boot(&[0x31FC, 0x0001, 0x0100, 0xE3F8, 0x0100]);
    step_n(&mut emu, 2);
    assert_eq!(head(&emu).mem.read_u16(0x100), Ok(0x0002));
}
