//! Bounds-checked little-endian byte reader for the wire format.

use crate::error::{DecodeError, DecodeResult};

/// A cursor over a byte slice; every read is bounds-checked.
#[derive(Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, count: usize) -> DecodeResult<&'a [u8]> {
        if self.remaining() < count {
            return Err(DecodeError::Truncated {
                needed: count - self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    pub fn get_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn get_bool(&mut self, what: &'static str) -> DecodeResult<bool> {
        match self.get_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(DecodeError::MalformedRecord { what }),
        }
    }

    pub fn get_u16(&mut self) -> DecodeResult<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn get_u32(&mut self) -> DecodeResult<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn get_u64(&mut self) -> DecodeResult<u64> {
        let bytes = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(raw))
    }

    pub fn get_i64(&mut self) -> DecodeResult<i64> {
        let bytes = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(i64::from_le_bytes(raw))
    }

    pub fn get_f64(&mut self) -> DecodeResult<f64> {
        Ok(f64::from_bits(self.get_u64()?))
    }

    pub fn get_bytes(&mut self, count: usize) -> DecodeResult<&'a [u8]> {
        self.take(count)
    }

    /// A length-prefixed UTF-8 string.
    pub fn get_str(&mut self) -> DecodeResult<String> {
        let len = self.get_u32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8)
    }

    /// A length-prefixed sub-record as its own reader.
    pub fn get_record(&mut self) -> DecodeResult<ByteReader<'a>> {
        let len = self.get_u32()? as usize;
        Ok(ByteReader::new(self.take(len)?))
    }

    /// Fail if the record has unread bytes left.
    pub fn expect_empty(&self, what: &'static str) -> DecodeResult<()> {
        if self.remaining() == 0 {
            Ok(())
        } else {
            Err(DecodeError::MalformedRecord { what })
        }
    }
}
