//! Program-level parsing.
//!
//! A program is a sequence of lines, each blank, a comment, a `label:`
//! definition, an instruction, or a label followed by its instruction.
//! Label offsets are byte offsets into the image being laid out, so the
//! parser asks the encoder for each instruction's encoded length as it
//! goes.

use crate::combinators::{always, comment, label_def, whitespace};
use crate::encoder::encoded_length;
use crate::error::{ErrorKind, ParserError};
use crate::expression::hash_label;
use crate::instructions::{parse_instruction, ParsedInstruction};
use crate::labels::LabelTable;
use crate::ParserSettings;

/// A parsed program: the instruction list plus the resolved label table.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ParsedProgram {
    pub instructions: Vec<ParsedInstruction>,
    pub labels: LabelTable,
}

struct Cursor<'a> {
    rest: &'a str,
    line: u32,
    /// The input as it looked at the start of the current line, for
    /// column reporting.
    line_start: &'a str,
}

impl<'a> Cursor<'a> {
    fn column(&self, at: &str) -> u32 {
        (self.line_start.len() - at.len()) as u32 + 1
    }

    fn error(&self, at: &str, kind: ErrorKind) -> ParserError {
        ParserError {
            line: self.line,
            column: self.column(at),
            kind,
        }
    }

    fn newline(&mut self, rest: &'a str) {
        self.rest = rest;
        self.line += 1;
        self.line_start = rest;
    }
}

fn is_line_break(input: &str) -> Option<&str> {
    if let Some(rest) = input.strip_prefix("\r\n") {
        return Some(rest);
    }
    let mut chars = input.chars();
    match chars.next() {
        Some('\n') | Some('\r') | Some('\0') => Some(chars.as_str()),
        _ => None,
    }
}

/// Parses `source` into instructions and labels.
pub fn parse(source: &str, settings: &ParserSettings) -> Result<ParsedProgram, ParserError> {
    let mut cursor = Cursor {
        rest: source,
        line: 1,
        line_start: source,
    };
    let mut program = ParsedProgram::default();
    let mut offset: u32 = 0;

    loop {
        let gap = always!(cursor.rest, whitespace);
        cursor.rest = gap.rest;

        if cursor.rest.is_empty() {
            break;
        }

        if let Some(after) = is_line_break(cursor.rest) {
            cursor.newline(after);
            continue;
        }

        let commented = comment(cursor.rest);
        if commented.ok {
            cursor.newline(commented.rest);
            continue;
        }

        let label = label_def(cursor.rest);
        let name = if label.ok { Some(label.parsed) } else { None };
        if let (true, Some(name)) = (label.ok, name) {
            let hash = if settings.case_insensitive_labels {
                hash_label(&name.to_ascii_lowercase())
            } else {
                hash_label(name)
            };
            if !program.labels.define(hash, offset) {
                return Err(cursor.error(cursor.rest, ErrorKind::DuplicateLabel));
            }
            cursor.rest = label.rest;
            continue;
        }

        let (res, instruction) = parse_instruction(cursor.rest, settings);
        let instruction = match (res.ok, instruction) {
            (true, Some(instruction)) => instruction,
            _ => return Err(cursor.error(res.rest, res.error)),
        };

        // The line must end after the operands, save for trailing
        // whitespace or a comment.
        let tail = always!(res.rest, whitespace);
        let terminated = comment(tail.rest);
        if terminated.ok {
            offset += encoded_length(&instruction, offset);
            program.instructions.push(instruction);
            cursor.newline(terminated.rest);
            continue;
        }
        if tail.rest.is_empty() {
            offset += encoded_length(&instruction, offset);
            program.instructions.push(instruction);
            cursor.rest = tail.rest;
            continue;
        }
        match is_line_break(tail.rest) {
            Some(after) => {
                offset += encoded_length(&instruction, offset);
                program.instructions.push(instruction);
                cursor.newline(after);
            }
            None => {
                return Err(cursor.error(tail.rest, ErrorKind::MissingCharacter('\n')));
            }
        }
    }

    Ok(program)
}
