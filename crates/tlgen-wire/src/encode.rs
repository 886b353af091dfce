use crate::{BOOL_FALSE, BOOL_TRUE, MAX_BYTES_LEN, TlObject, VECTOR_TAG, WireError};

///
/// Encoder
///
/// Append-only output buffer. Scalar writes cannot fail; anything carrying a
/// length prefix checks the length against the format limits.
///

#[derive(Clone, Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    //
    // scalars
    //

    pub fn int(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn uint(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn long(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn double(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn bool(&mut self, v: bool) {
        self.uint(if v { BOOL_TRUE } else { BOOL_FALSE });
    }

    //
    // length-prefixed
    //

    pub fn bytes(&mut self, data: &[u8]) -> Result<(), WireError> {
        let len = data.len();
        if len > MAX_BYTES_LEN {
            return Err(WireError::TooLong {
                len,
                max: MAX_BYTES_LEN,
            });
        }

        let header = if len < 254 {
            self.buf.push(len as u8);
            1
        } else {
            self.buf.push(0xfe);
            self.buf.extend_from_slice(&(len as u32).to_le_bytes()[..3]);
            4
        };
        self.buf.extend_from_slice(data);

        let padding = (4 - (header + len) % 4) % 4;
        self.buf.resize(self.buf.len() + padding, 0);

        Ok(())
    }

    pub fn string(&mut self, s: &str) -> Result<(), WireError> {
        self.bytes(s.as_bytes())
    }

    /// Element count ahead of a vector body.
    pub fn count(&mut self, len: usize) -> Result<(), WireError> {
        let count = i32::try_from(len).map_err(|_| WireError::TooLong {
            len,
            max: i32::MAX as usize,
        })?;
        self.int(count);

        Ok(())
    }

    pub fn vector_tag(&mut self) {
        self.uint(VECTOR_TAG);
    }

    //
    // vectors of primitives
    //

    pub fn vector_int(&mut self, items: &[i32]) -> Result<(), WireError> {
        self.count(items.len())?;
        for v in items {
            self.int(*v);
        }

        Ok(())
    }

    pub fn vector_long(&mut self, items: &[i64]) -> Result<(), WireError> {
        self.count(items.len())?;
        for v in items {
            self.long(*v);
        }

        Ok(())
    }

    pub fn vector_double(&mut self, items: &[f64]) -> Result<(), WireError> {
        self.count(items.len())?;
        for v in items {
            self.double(*v);
        }

        Ok(())
    }

    pub fn vector_bool(&mut self, items: &[bool]) -> Result<(), WireError> {
        self.count(items.len())?;
        for v in items {
            self.bool(*v);
        }

        Ok(())
    }

    pub fn vector_bytes(&mut self, items: &[Vec<u8>]) -> Result<(), WireError> {
        self.count(items.len())?;
        for v in items {
            self.bytes(v)?;
        }

        Ok(())
    }

    pub fn vector_string(&mut self, items: &[String]) -> Result<(), WireError> {
        self.count(items.len())?;
        for v in items {
            self.string(v)?;
        }

        Ok(())
    }

    //
    // nested objects
    //

    pub fn object<T: TlObject>(&mut self, value: &T) -> Result<(), WireError> {
        value.encode(self)
    }

    /// Count followed by each element's own self-describing encoding.
    pub fn objects<T: TlObject>(&mut self, items: &[T]) -> Result<(), WireError> {
        self.count(items.len())?;
        for item in items {
            item.encode(self)?;
        }

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bytes_are_padded_to_four() {
        let mut x = Encoder::new();
        x.bytes(b"abc").unwrap();
        assert_eq!(x.as_bytes(), &[3, b'a', b'b', b'c']);

        let mut x = Encoder::new();
        x.bytes(b"abcd").unwrap();
        assert_eq!(x.as_bytes(), &[4, b'a', b'b', b'c', b'd', 0, 0, 0]);
    }

    #[test]
    fn long_bytes_use_three_byte_length() {
        let data = vec![7u8; 300];
        let mut x = Encoder::new();
        x.bytes(&data).unwrap();

        let out = x.into_bytes();
        assert_eq!(&out[..4], &[0xfe, 0x2c, 0x01, 0x00]);
        assert_eq!(out.len(), 304);
    }

    #[test]
    fn bool_writes_boxed_tags() {
        let mut x = Encoder::new();
        x.bool(true);
        x.bool(false);

        let mut expected = BOOL_TRUE.to_le_bytes().to_vec();
        expected.extend_from_slice(&BOOL_FALSE.to_le_bytes());
        assert_eq!(x.as_bytes(), expected.as_slice());
    }

    #[test]
    fn vector_of_ints_has_count_and_no_tag() {
        let mut x = Encoder::new();
        x.vector_int(&[1, -1]).unwrap();

        assert_eq!(
            x.as_bytes(),
            &[2, 0, 0, 0, 1, 0, 0, 0, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn oversized_bytes_are_rejected() {
        let data = vec![0u8; MAX_BYTES_LEN + 1];
        let err = Encoder::new().bytes(&data).unwrap_err();

        assert_eq!(
            err,
            WireError::TooLong {
                len: MAX_BYTES_LEN + 1,
                max: MAX_BYTES_LEN
            }
        );
    }
}
