//! Bit-level layout of the 16-bit opcode words.

pub const BYTE_BYTES: u32 = 1;
pub const WORD_BYTES: u32 = 2;
pub const LONG_BYTES: u32 = 4;

pub const OPCODE_BYTES: u32 = 2;

pub const NIBBLE_OFFSET: u16 = 12;

// Effective-address field: a (mode:3, reg:3) pair in the low six bits.
pub const EA_MODE_MASK: u16 = 0b0000_0000_0011_1000;
pub const EA_MODE_OFFSET: u16 = 3;
pub const EA_REG_MASK: u16 = 0b0000_0000_0000_0111;

// `move` places the destination as a (reg:3, mode:3) pair in bits 11-6.
pub const DST_REG_MASK: u16 = 0b0000_1110_0000_0000;
pub const DST_REG_OFFSET: u16 = 9;
pub const DST_MODE_MASK: u16 = 0b0000_0001_1100_0000;
pub const DST_MODE_OFFSET: u16 = 6;

pub const MOVE_SIZE_MASK: u16 = 0b0011_0000_0000_0000;
pub const MOVE_SIZE_OFFSET: u16 = 12;

// Common size field shared by the immediate, misc and shift families.
pub const SIZE_MASK: u16 = 0b0000_0000_1100_0000;
pub const SIZE_OFFSET: u16 = 6;

// Register/opmode fields of the standard dyadic families.
pub const OPMODE_MASK: u16 = 0b0000_0001_1100_0000;
pub const OPMODE_OFFSET: u16 = 6;
pub const REG_FIELD_MASK: u16 = 0b0000_1110_0000_0000;
pub const REG_FIELD_OFFSET: u16 = 9;
pub const OPMODE_DIRECTION: u16 = 0b100;

// Immediate family selector in bits 11-8.
pub const IMM_FAMILY_MASK: u16 = 0b0000_1111_0000_0000;
pub const IMM_FAMILY_OFFSET: u16 = 8;

// Branches: condition nibble plus an 8-bit displacement.
pub const COND_MASK: u16 = 0b0000_1111_0000_0000;
pub const COND_OFFSET: u16 = 8;
pub const DISP_MASK: u16 = 0b0000_0000_1111_1111;

// `moveq` packs its payload into the low byte.
pub const QUICK_DATA_MASK: u16 = 0b0000_0000_1111_1111;
pub const QUICK_NO_DATA_BIT: u16 = 0b0000_0001_0000_0000;

// Shift and rotate fields (register form).
pub const SHIFT_COUNT_MASK: u16 = 0b0000_1110_0000_0000;
pub const SHIFT_COUNT_OFFSET: u16 = 9;
pub const SHIFT_DIR_BIT: u16 = 0b0000_0001_0000_0000;
pub const SHIFT_IR_BIT: u16 = 0b0000_0000_0010_0000;
pub const SHIFT_TYPE_MASK: u16 = 0b0000_0000_0001_1000;
pub const SHIFT_TYPE_OFFSET: u16 = 3;
// Memory form: the type moves up next to the direction bit.
pub const SHIFT_MEM_TYPE_MASK: u16 = 0b0000_0110_0000_0000;
pub const SHIFT_MEM_TYPE_OFFSET: u16 = 9;
pub const SHIFT_MEM_BIT: u16 = 0b0000_1000_0000_0000;

// Brief extension word used by the indexed addressing mode.
pub const INDEX_REG_MASK: u16 = 0b1111_0000_0000_0000;
pub const INDEX_REG_OFFSET: u16 = 12;
pub const INDEX_LONG_BIT: u16 = 0b0000_1000_0000_0000;
pub const INDEX_DISP_MASK: u16 = 0b0000_0000_1111_1111;

pub const ADDRESS_REGISTER_COUNT: usize = 8;
pub const DATA_REGISTER_COUNT: usize = 8;
pub const STACK_POINTER: usize = 7;
