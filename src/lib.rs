//! Educational Motorola 68000 emulator.
//!
//! The crate models the machine as a sequence of [`System`] snapshots: the
//! [`Emulator`] decodes one instruction per [`step`](Emulator::step) and,
//! depending on the configured [`RetainStates`] policy, either appends the
//! resulting snapshot to its history or overwrites the current one. Every
//! intermediate CPU and memory state stays inspectable, which is the whole
//! point of the exercise.
//!
//! Binary images are produced by the companion `asm68` crate, but any
//! big-endian M68k word stream of the supported subset can be loaded
//! directly with [`Emulator::new_state`].

pub mod constants;

mod cpu;
mod decoder;
mod emulator;
mod enums;
mod exec;
mod memory;


pub use crate::cpu::{Cpu, StatusRegister, System};
pub use crate::decoder::{decode, DecodedInstruction};
pub use crate::emulator::{
    continue_execution, continue_execution_until, Emulator, EmulatorSettings, RetainStates,
};
pub use crate::enums::{
    AddressingMode, Condition, DataSize, ExtensionMode, InstructionData, Operation,
};
pub use crate::exec::{ExecFn, ExecResult, Fault};
pub use crate::memory::{ExecutableMemory, Region};

/// Byte order of the emulated bus. The M68k is big-endian on the wire.
pub type Endian = byteorder::BigEndian;
