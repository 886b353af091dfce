use thiserror::Error as ThisError;

///
/// WireError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum WireError {
    #[error("unexpected end of input: need {need} bytes, {remaining} remaining")]
    UnexpectedEof { need: usize, remaining: usize },

    #[error("{remaining} trailing bytes after decoded object")]
    TrailingBytes { remaining: usize },

    #[error("invalid Bool tag {0:#010x}")]
    InvalidBool(u32),

    #[error("string is not valid utf-8")]
    InvalidUtf8,

    #[error("expected tag {expected:#010x}, found {found:#010x}")]
    UnexpectedTag { expected: u32, found: u32 },

    #[error("unknown constructor {0:#010x}")]
    UnknownConstructor(u32),

    #[error("required field '{0}' is not set")]
    MissingField(&'static str),

    #[error("negative length {0}")]
    NegativeLength(i32),

    #[error("length {len} exceeds limit {max}")]
    TooLong { len: usize, max: usize },
}
