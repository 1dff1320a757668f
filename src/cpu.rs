use crate::constants;
use crate::enums::DataSize;
use crate::memory::ExecutableMemory;

/// Condition code flags of the status register.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct StatusRegister {
    pub extend: bool,
    pub negative: bool,
    pub zero: bool,
    pub overflow: bool,
    pub carry: bool,
}

impl StatusRegister {
    /// Sets N and Z from `value` truncated to `size`.
    pub fn set_nz(&mut self, value: i32, size: DataSize) {
        let bits = value as u32 & size.mask();
        self.negative = bits & size.sign_bit() != 0;
        self.zero = bits == 0;
    }

    pub fn clear_vc(&mut self) {
        self.overflow = false;
        self.carry = false;
    }
}

/// Register file of the modeled 68000.
///
/// Address register 7 doubles as the stack pointer. The program counter is
/// a byte offset into the executable region of the attached memory image.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Cpu {
    pub data: [i32; constants::DATA_REGISTER_COUNT],
    pub addr: [i32; constants::ADDRESS_REGISTER_COUNT],
    pub program_counter: u32,
    pub status: StatusRegister,
}

impl Cpu {
    pub fn stack_pointer(&self) -> i32 {
        self.addr[constants::STACK_POINTER]
    }
}

/// One snapshot of the whole machine between two instruction steps.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct System {
    pub cpu: Cpu,
    pub mem: ExecutableMemory,
}
