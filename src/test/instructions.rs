//! Per-family executor and decoder tests. Programs are written as raw
//! big-endian opcode words with the assembled form noted alongside.

mod arithmetic;
mod branches;
mod compare;
mod data_move;
mod illegal;
mod jumps;
mod logical;
mod multiply;
mod shifts;
