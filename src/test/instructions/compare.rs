use crate::test::*;
use crate::*;

#[test]
fn cmp_equal_sets_z_only() {
    // moveq #7, d0 / moveq #7, d1 / cmp.w d0, d1
    let mut emu = boot(&[0x7007, 0x7207, 0xB240]);
    step_n(&mut emu, 3);
    let sys = head(&emu);
    assert_eq!(sys.cpu.data[1], 7, "cmp must not write its destination");
    assert!(sys.cpu.status.zero);
    assert!(!sys.cpu.status.negative);
    assert!(!sys.cpu.status.carry);
}

#[test]
fn cmp_flag_law() {
    // Z = (src == dst), N = sign of dst - src, C = unsigned borrow.
    let cases: &[(u16, u16, bool, bool, bool)] = &[
        // src     dst     z      n      c
        (0x0005, 0x0005, true, false, false),
        (0x0005, 0x0003, false, true, true),
        (0x0003, 0x0005, false, false, false),
        (0xFFFF, 0x0000, false, false, true),
    ];
    for &(src, dst, z, n, c) in cases {
        // move.w #src, d0 / move.w #dst, d1 / cmp.w d0, d1
        let mut emu = boot(&[0x303C, src, 0x323C, dst, 0xB240]);
        step_n(&mut emu, 3);
        let status = head(&emu).cpu.status;
        assert_eq!(status.zero, z, "Z for {:04x} vs {:04x}", src, dst);
        assert_eq!(status.negative, n, "N for {:04x} vs {:04x}", src, dst);
        assert_eq!(status.carry, c, "C for {:04x} vs {:04x}", src, dst);
    }
}

#[test]
fn cmp_leaves_extend_alone() {
    // move.w #$FFFF, d0 / add.w #1, d0 (X=1) / cmp.w #1, d0
    let mut emu = boot(&[0x303C, 0xFFFF, 0xD07C, 0x0001, 0xB07C, 0x0001]);
    step_n(&mut emu, 3);
    assert!(head(&emu).cpu.status.extend);
}

#[test]
fn cmpi_immediate() {
    // moveq #4, d2 / cmpi.b #4, d2
    let mut emu = boot(&[0x7404, 0x0C02, 0x0004]);
    step_n(&mut emu, 2);
    assert!(head(&emu).cpu.status.zero);
}

#[test]
fn cmpa_sign_extends_word_source() {
    // move.l #-2, a2 / cmpa.w #-2, a2
    let mut emu = boot(&[0x247C, 0xFFFF, 0xFFFE, 0xB4FC, 0xFFFE]);
    step_n(&mut emu, 2);
    let sys = head(&emu);
    assert!(sys.cpu.status.zero, "word source widens before the compare");
    assert_eq!(sys.cpu.addr[2], -2);
}

#[test]
fn cmpa_long() {
    // move.l #$10000, a1 / cmpa.l #$0FFFF, a1
    let mut emu = boot(&[0x227C, 0x0001, 0x0000, 0xB3FC, 0x0000, 0xFFFF]);
    step_n(&mut emu, 2);
    let status = head(&emu).cpu.status;
    assert!(!status.zero);
    assert!(!status.negative);
    assert!(!status.carry);
}
