use crate::test::*;
use crate::*;

fn decodes_illegal(word: u16) -> bool {
    let mut mem = ExecutableMemory::from_code(words(&[word, 0, 0]));
    mem.reserve_stack(64);
    decode(&mem, 0).is_illegal()
}

#[test]
fn unknown_top_nibbles() {
    assert!(decodes_illegal(0x5000)); // addq/subq family, unsupported
    assert!(decodes_illegal(0xA000)); // line-A
    assert!(decodes_illegal(0xF000)); // line-F
}

#[test]
fn move_size_zero_pattern() {
    // 0b00 in the move size field is no size at all; the word falls into
    // the immediate family, where 0b0001 is not a known member either.
    assert!(decodes_illegal(0x0100));
}

#[test]
fn immediate_family_rejects_size_11() {
    assert!(decodes_illegal(0x06C0)); // addi with size bits 0b11
}

#[test]
fn branch_with_unknown_condition() {
    assert!(decodes_illegal(0x6204)); // bhi, outside the subset
    assert!(decodes_illegal(0x6B04)); // bmi, outside the subset
}

#[test]
fn moveq_with_bit8_set() {
    assert!(decodes_illegal(0x7100));
}

#[test]
fn roxd_shift_type() {
    assert!(decodes_illegal(0xE250)); // roxr.w #1, d0
}

#[test]
fn immediate_destination_is_illegal() {
    // move.w d0, #5 has no meaning.
    assert!(decodes_illegal(0x3000 | (7 << 6) | (4 << 9)));
}

#[test]
fn extension_words_must_fit_in_the_executable_region() {
    // move.w #imm, d0 without its immediate word.
    let mut mem = ExecutableMemory::from_code(words(&[0x303C]));
    mem.reserve_stack(64);
    assert!(decode(&mem, 0).is_illegal());
}

#[test]
fn illegal_step_keeps_the_head_byte_for_byte() {
    let mut emu = boot(&[0x7001, 0xFFFF]);
    assert!(emu.step());
    let before = head(&emu).clone();
    assert!(!emu.step());
    assert_eq!(*head(&emu), before);
}
