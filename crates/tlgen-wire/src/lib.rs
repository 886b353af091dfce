//! Runtime side of the TL wire format.
//!
//! Generated code calls into [`Encoder`] and [`Decoder`]; every generated
//! message type implements [`TlObject`].
//!
//! ```text
//! int      4 bytes LE            long    8 bytes LE        double  8 bytes LE
//! Bool     boolTrue / boolFalse tag (4 bytes)
//! bytes    len < 254: [len:1][data][pad to 4]
//!          otherwise: [0xfe][len:3 LE][data][pad to 4]
//! vector   [count:4][elements...]
//! Vector   [0x1cb5c415][count:4][elements...]
//! ```

mod decode;
mod encode;
mod error;

pub use decode::Decoder;
pub use encode::Encoder;
pub use error::WireError;

///
/// CONSTANTS
///

/// Tag written ahead of a generic (boxed) vector.
pub const VECTOR_TAG: u32 = 0x1cb5_c415;

pub const BOOL_TRUE: u32 = 0x9972_75b5;
pub const BOOL_FALSE: u32 = 0xbc79_9737;

/// Largest payload a length prefix can describe (3 bytes).
pub const MAX_BYTES_LEN: usize = 0x00ff_ffff;

///
/// TlObject
///
/// A self-describing message: its encoding begins with its own constructor tag.
///

pub trait TlObject: Sized {
    fn encode(&self, x: &mut Encoder) -> Result<(), WireError>;

    fn decode(x: &mut Decoder<'_>) -> Result<Self, WireError>;

    fn to_bytes(&self) -> Result<Vec<u8>, WireError> {
        let mut x = Encoder::new();
        self.encode(&mut x)?;

        Ok(x.into_bytes())
    }

    /// Decode one object and require the input to be fully consumed.
    fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        let mut x = Decoder::new(bytes);
        let value = Self::decode(&mut x)?;
        x.finish()?;

        Ok(value)
    }
}
