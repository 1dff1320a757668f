//! Assembler for the [emu68](../emu68/index.html) Motorola 68000 emulator.
//!
//! The main entry points are [`assemble`] and [`load_source`]: the former
//! turns assembly text into an [`ExecutableMemory`] image, the latter
//! additionally pushes the image into an [`Emulator`] as a fresh system
//! state. Parsing is done by a small hand-built combinator layer (see
//! [`combinators`]) so every diagnostic carries a line, a column and a
//! typed reason.
//!
//! # Assembly language
//!
//! One instruction per line. Comments start with `;` and run to the end
//! of the line. A label is a word followed by `:` and may share a line
//! with the instruction it marks; label names are case-sensitive,
//! mnemonics are not.
//!
//! Numeric literals are decimal (`123`, optionally signed) or hex with a
//! `$` prefix (`$1F`). Wherever a number is accepted, a label or a small
//! arithmetic expression over numbers and labels (`+ - * /`) works too.
//!
//! ## Data sizes
//!
//! Mnemonics take an optional size suffix `.b`, `.w` or `.l`; the default
//! is word.
//!
//! ## Operand forms
//!
//! Form            | Example        | Meaning
//! ----------------|----------------|--------------------------------
//! `d0`-`d7`       | `d3`           | data register
//! `a0`-`a7`       | `a6`           | address register (`a7` is SP)
//! `#value`        | `#$FF`         | immediate
//! `(an)`          | `(a0)`         | address register indirect
//! `(an)+`         | `(a0)+`        | indirect with post-increment
//! `-(an)`         | `-(a7)`        | indirect with pre-decrement
//! `d(an)`         | `8(a1)`        | indirect with displacement
//! `(an, xn)`      | `(a1, d2)`     | indirect with index
//! `(d, an, xn)`   | `(4, a1, a2)`  | indexed with displacement
//! `addr`          | `$100`, `loop` | absolute (short for `.b`/`.w`, long for `.l`)
//!
//! ## Mnemonics
//!
//! Mnemonic             | Syntax                  | Notes
//! ---------------------|-------------------------|--------------------------
//! `move`               | `move.s src, dst`       |
//! `moveq`              | `moveq #v, dn`          | v in -128..=127
//! `add` `sub` `and` `or` `xor` `cmp` | `op.s src, dst` | one side a data register
//! `addi` `subi` `andi` `ori` `xori` `cmpi` | `op.s #v, dst` |
//! `cmpa`               | `cmpa.s src, an`        | word or long
//! `muls` `mulu`        | `mul src, dn`           | word operands, long result
//! `lsl` `lsr` `asl` `asr` `rol` `ror` | `op.s count, dn` | count: `#1`-`#8` or a data register
//!                      | `op mem`                | memory form shifts by one
//! `jmp` `jsr`          | `jmp target`            |
//! `bra` `bsr` `beq` `bne` `bge` `blt` `bgt` `ble` | `bcc target` |
//! `clr` `neg`          | `op.s dn`               |

pub mod combinators;
pub mod error;

mod encoder;
mod expression;
mod instructions;
mod labels;
mod operands;
mod parser;

#[cfg(test)]
mod test;

use emu68::{Emulator, ExecutableMemory};

pub use crate::encoder::{compile, encoded_length, AdditionalData, OpcodeWord};
pub use crate::error::{
    AssembleError, EncodeError, ErrorKind, OperandKind, ParserError, TypeMismatch,
};
pub use crate::expression::{hash_label, BinOp, Expr};
pub use crate::instructions::{Mnemonic, ParseMnemonicError, ParsedInstruction};
pub use crate::labels::LabelTable;
pub use crate::operands::Operand;
pub use crate::parser::{parse, ParsedProgram};

/// Settings forwarded from the host into the parser.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct ParserSettings {
    /// Fold label names to lower case before hashing, making label
    /// references case-insensitive like the mnemonics.
    pub case_insensitive_labels: bool,
}

/// Assembles `source` into an executable image with default settings.
pub fn assemble(source: &str) -> Result<ExecutableMemory, AssembleError> {
    assemble_with(source, &ParserSettings::default())
}

pub fn assemble_with(
    source: &str,
    settings: &ParserSettings,
) -> Result<ExecutableMemory, AssembleError> {
    let program = parse(source, settings)?;
    Ok(compile(&program)?)
}

/// Parses and compiles `source`, then loads the image into `emu` as a
/// fresh system state. On failure the error is returned and the history
/// is left untouched; an empty source is a no-op.
pub fn load_source(emu: &mut Emulator, source: &str) -> Option<AssembleError> {
    load_source_with(emu, source, &ParserSettings::default())
}

pub fn load_source_with(
    emu: &mut Emulator,
    source: &str,
    settings: &ParserSettings,
) -> Option<AssembleError> {
    if source.is_empty() {
        return None;
    }
    match assemble_with(source, settings) {
        Ok(mem) => {
            emu.new_state(mem.data());
            None
        }
        Err(err) => Some(err),
    }
}
