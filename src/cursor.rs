use crate::error::{DecodeError, DecodeResult};

/// A read position inside an immutable message buffer.
///
/// The cursor always keeps the whole message so decoders can jump to an
/// absolute offset (compression pointers) while the caller's position is
/// carried separately by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    current: usize,
}

impl<'a> Cursor<'a> {
    pub fn from(buf: &'a [u8]) -> Self {
        Cursor {
            buf,
            current: 0,
        }
    }

    pub fn at(self, index: usize) -> Self {
        Cursor {
            buf: self.buf,
            current: index,
        }
    }

    pub fn get_buffer(&self) -> &'a [u8] {
        self.buf
    }

    pub fn get_current_index(&self) -> usize {
        self.current
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.current)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn peek(&self) -> DecodeResult<u8> {
        self.buf
            .get(self.current)
            .copied()
            .ok_or(DecodeError::Malformed("unexpected end of buffer"))
    }

    pub fn take(&mut self) -> DecodeResult<u8> {
        let result = self.peek()?;
        self.current += 1;
        Ok(result)
    }

    pub fn take_slice(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        if self.current > self.buf.len() || len > self.remaining() {
            return Err(DecodeError::Malformed("unexpected end of buffer"));
        }
        let result = &self.buf[self.current..self.current + len];
        self.current += len;
        Ok(result)
    }

    pub fn take_bytes<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let slice = self.take_slice(N)?;
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(slice);
        Ok(bytes)
    }

    pub fn take_u16(&mut self) -> DecodeResult<u16> {
        Ok(u16::from_be_bytes(self.take_bytes()?))
    }

    pub fn take_u32(&mut self) -> DecodeResult<u32> {
        Ok(u32::from_be_bytes(self.take_bytes()?))
    }
}
