use std::error::Error as StdError;
use std::fmt;

/// Operand categories used in diagnostics.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OperandKind {
    DataRegister,
    AddressRegister,
    Address,
    AddressPost,
    AddressPre,
    AddressOffset,
    AddressIndex,
    AbsoluteShort,
    AbsoluteLong,
    Immediate,
}

/// An operand that parsed fine but is not allowed where it appeared.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TypeMismatch {
    pub expected: Vec<OperandKind>,
    pub got: Option<OperandKind>,
    pub operand: u8,
}

/// Typed reason attached to a parse failure.
///
/// `UnknownError` is the placeholder the combinators start from; the
/// `set_error!` rule only ever upgrades it, so the first specific error
/// wins.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    MissingCharacter(char),
    UnknownOperand,
    OperandTypeMismatch(TypeMismatch),
    UnknownMnemonic,
    DuplicateLabel,
    UnknownError,
}

impl Default for ErrorKind {
    fn default() -> ErrorKind {
        ErrorKind::UnknownError
    }
}

/// A parse failure, tagged with the source position it happened at.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParserError {
    pub line: u32,
    pub column: u32,
    pub kind: ErrorKind,
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}, column {}: ", self.line, self.column)?;
        match &self.kind {
            ErrorKind::MissingCharacter(c) => write!(f, "expected '{}'", c.escape_default()),
            ErrorKind::UnknownOperand => f.write_str("operand not recognized"),
            ErrorKind::OperandTypeMismatch(mismatch) => write!(
                f,
                "operand {} has the wrong type (got {:?}, expected one of {:?})",
                mismatch.operand, mismatch.got, mismatch.expected
            ),
            ErrorKind::UnknownMnemonic => f.write_str("unknown mnemonic"),
            ErrorKind::DuplicateLabel => f.write_str("label is already defined"),
            ErrorKind::UnknownError => f.write_str("could not parse the line"),
        }
    }
}

impl StdError for ParserError {}

/// Errors raised while laying out a parsed program as opcode words.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EncodeError {
    UnresolvedLabel(u64),
    OperandTypeMismatch(TypeMismatch),
    ValueOutOfRange { operand: u8 },
    InvalidSize,
    DivisionByZero,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncodeError::UnresolvedLabel(hash) => {
                write!(f, "label {:#018x} is not defined", hash)
            }
            EncodeError::OperandTypeMismatch(mismatch) => write!(
                f,
                "operand {} has the wrong type (got {:?}, expected one of {:?})",
                mismatch.operand, mismatch.got, mismatch.expected
            ),
            EncodeError::ValueOutOfRange { operand } => {
                write!(f, "operand {} does not fit its encoding", operand)
            }
            EncodeError::InvalidSize => f.write_str("data size not valid for this instruction"),
            EncodeError::DivisionByZero => f.write_str("division by zero in expression"),
        }
    }
}

impl StdError for EncodeError {}

/// Either side of the assemble pipeline can fail.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AssembleError {
    Parse(ParserError),
    Encode(EncodeError),
}

impl From<ParserError> for AssembleError {
    fn from(err: ParserError) -> AssembleError {
        AssembleError::Parse(err)
    }
}

impl From<EncodeError> for AssembleError {
    fn from(err: EncodeError) -> AssembleError {
        AssembleError::Encode(err)
    }
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AssembleError::Parse(err) => err.fmt(f),
            AssembleError::Encode(err) => err.fmt(f),
        }
    }
}

impl StdError for AssembleError {}
