use crate::{BOOL_FALSE, BOOL_TRUE, TlObject, VECTOR_TAG, WireError};

///
/// Decoder
///
/// Cursor over a borrowed input buffer. Nested objects share the cursor and
/// nothing else.
///

#[derive(Clone, Debug)]
pub struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Fail if any input is left unread.
    pub const fn finish(&self) -> Result<(), WireError> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(WireError::TrailingBytes { remaining }),
        }
    }

    fn take(&mut self, need: usize) -> Result<&'a [u8], WireError> {
        let remaining = self.remaining();
        if need > remaining {
            return Err(WireError::UnexpectedEof { need, remaining });
        }

        let slice = &self.buf[self.pos..self.pos + need];
        self.pos += need;

        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);

        Ok(out)
    }

    //
    // scalars
    //

    pub fn int(&mut self) -> Result<i32, WireError> {
        Ok(i32::from_le_bytes(self.array()?))
    }

    pub fn uint(&mut self) -> Result<u32, WireError> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    pub fn long(&mut self) -> Result<i64, WireError> {
        Ok(i64::from_le_bytes(self.array()?))
    }

    pub fn double(&mut self) -> Result<f64, WireError> {
        Ok(f64::from_le_bytes(self.array()?))
    }

    pub fn bool(&mut self) -> Result<bool, WireError> {
        match self.uint()? {
            BOOL_TRUE => Ok(true),
            BOOL_FALSE => Ok(false),
            other => Err(WireError::InvalidBool(other)),
        }
    }

    //
    // length-prefixed
    //

    pub fn bytes(&mut self) -> Result<Vec<u8>, WireError> {
        let first = self.take(1)?[0];
        let (header, len) = if first < 254 {
            (1, usize::from(first))
        } else {
            let b = self.take(3)?;
            (4, usize::from(b[0]) | usize::from(b[1]) << 8 | usize::from(b[2]) << 16)
        };

        let data = self.take(len)?.to_vec();
        let padding = (4 - (header + len) % 4) % 4;
        self.take(padding)?;

        Ok(data)
    }

    pub fn string(&mut self) -> Result<String, WireError> {
        String::from_utf8(self.bytes()?).map_err(|_| WireError::InvalidUtf8)
    }

    /// Element count ahead of a vector body.
    ///
    /// Every element occupies at least one byte, so a count larger than the
    /// remaining input is rejected before anything is allocated.
    pub fn count(&mut self) -> Result<usize, WireError> {
        let count = self.int()?;
        let len = usize::try_from(count).map_err(|_| WireError::NegativeLength(count))?;

        let remaining = self.remaining();
        if len > remaining {
            return Err(WireError::UnexpectedEof {
                need: len,
                remaining,
            });
        }

        Ok(len)
    }

    pub fn expect_vector_tag(&mut self) -> Result<(), WireError> {
        self.expect_tag(VECTOR_TAG)
    }

    pub fn expect_tag(&mut self, expected: u32) -> Result<(), WireError> {
        let found = self.uint()?;
        if found == expected {
            Ok(())
        } else {
            Err(WireError::UnexpectedTag { expected, found })
        }
    }

    //
    // vectors of primitives
    //

    fn vector<T>(
        &mut self,
        mut read: impl FnMut(&mut Self) -> Result<T, WireError>,
    ) -> Result<Vec<T>, WireError> {
        let len = self.count()?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(read(&mut *self)?);
        }

        Ok(items)
    }

    pub fn vector_int(&mut self) -> Result<Vec<i32>, WireError> {
        self.vector(Self::int)
    }

    pub fn vector_long(&mut self) -> Result<Vec<i64>, WireError> {
        self.vector(Self::long)
    }

    pub fn vector_double(&mut self) -> Result<Vec<f64>, WireError> {
        self.vector(Self::double)
    }

    pub fn vector_bool(&mut self) -> Result<Vec<bool>, WireError> {
        self.vector(Self::bool)
    }

    pub fn vector_bytes(&mut self) -> Result<Vec<Vec<u8>>, WireError> {
        self.vector(Self::bytes)
    }

    pub fn vector_string(&mut self) -> Result<Vec<String>, WireError> {
        self.vector(Self::string)
    }

    //
    // nested objects
    //

    pub fn object<T: TlObject>(&mut self) -> Result<T, WireError> {
        T::decode(self)
    }

    pub fn objects<T: TlObject>(&mut self) -> Result<Vec<T>, WireError> {
        self.vector(T::decode)
    }
}

///
/// TESTS
///
