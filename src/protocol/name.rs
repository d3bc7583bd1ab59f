use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};
use crate::protocol::{C_FACTOR, DC_FACTOR};
use std::fmt::{Display, Formatter};

/// One unit of a domain name as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelUnit<'a> {
    Root,
    Pointer([u8; 2]),
    Literal(&'a [u8]),
}

impl<'a> LabelUnit<'a> {
    /// Bytes the unit occupies in the message, length octet included.
    pub fn wire_len(&self) -> usize {
        match self {
            LabelUnit::Root => 1,
            LabelUnit::Pointer(_) => 2,
            LabelUnit::Literal(label) => label.len() + 1,
        }
    }
}

fn is_pointer(byte: u8) -> bool {
    byte & C_FACTOR == C_FACTOR
}

/// Decodes a single label unit at the cursor position.
///
/// Only `11` in the top two bits marks a pointer. A length byte with just one
/// of those bits set is read as a literal length and has to fit in the buffer
/// like any other label.
pub fn decode_label(cursor: Cursor<'_>) -> DecodeResult<(LabelUnit<'_>, Cursor<'_>)> {
    if cursor.is_empty() {
        return Err(DecodeError::NullBuffer);
    }
    let mut cursor = cursor;
    let len = cursor.peek()?;
    if len == 0 {
        cursor.take()?;
        return Ok((LabelUnit::Root, cursor));
    }
    if is_pointer(len) {
        if cursor.remaining() < 2 {
            return Err(DecodeError::Malformed("compression pointer cut short"));
        }
        let pointer = cursor.take_bytes::<2>()?;
        return Ok((LabelUnit::Pointer(pointer), cursor));
    }
    cursor.take()?;
    if len as usize > cursor.remaining() {
        return Err(DecodeError::Malformed("label length exceeds remaining buffer"));
    }
    let label = cursor.take_slice(len as usize)?;
    Ok((LabelUnit::Literal(label), cursor))
}

/// A domain name as a sequence of raw labels.
///
/// The root label is never stored. A compressed name keeps its two pointer
/// bytes as the final label until it is expanded against the message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Name {
    labels: Vec<Vec<u8>>,
    compressed: bool,
}

impl Name {
    pub fn from_labels(labels: Vec<Vec<u8>>) -> Self {
        Name {
            labels,
            compressed: false,
        }
    }

    /// Reads labels until the root label or a compression pointer.
    pub fn decode(cursor: Cursor<'_>) -> DecodeResult<(Name, Cursor<'_>)> {
        let mut cursor = cursor;
        let mut labels = Vec::new();
        loop {
            if cursor.is_empty() {
                return Err(DecodeError::Malformed("name has no terminator before end of buffer"));
            }
            let (unit, next) = decode_label(cursor)?;
            cursor = next;
            match unit {
                LabelUnit::Root => {
                    return Ok((Name { labels, compressed: false }, cursor));
                }
                LabelUnit::Pointer(pointer) => {
                    labels.push(pointer.to_vec());
                    return Ok((Name { labels, compressed: true }, cursor));
                }
                LabelUnit::Literal(label) => labels.push(label.to_vec()),
            }
        }
    }

    pub fn get_labels(&self) -> &Vec<Vec<u8>> {
        &self.labels
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn is_root(&self) -> bool {
        !self.compressed && self.labels.is_empty()
    }

    pub fn get_pointer_offset(&self) -> Option<usize> {
        if !self.compressed {
            return None;
        }
        match self.labels.last() {
            Some(tail) if tail.len() == 2 && is_pointer(tail[0]) => {
                let pointer = u16::from_be_bytes([tail[0], tail[1]]);
                Some((pointer & DC_FACTOR) as usize)
            }
            _ => None,
        }
    }

    /// Replaces the trailing pointer with the labels stored at its target.
    ///
    /// Only one hop is followed: a target that ends in another pointer is
    /// rejected, which also rules out pointer loops.
    pub fn decompress(&self, message: &[u8]) -> DecodeResult<Name> {
        if message.is_empty() {
            return Err(DecodeError::Malformed("no message to resolve compression pointer"));
        }
        let offset = self
            .get_pointer_offset()
            .ok_or(DecodeError::Malformed("name does not end in a compression pointer"))?;
        if offset >= message.len() {
            return Err(DecodeError::Malformed("compression pointer past end of message"));
        }
        let (target, _) = Name::decode(Cursor::from(message).at(offset))?;
        if target.compressed {
            return Err(DecodeError::CompressionPointerChained);
        }
        let prefix = &self.labels[..self.labels.len() - 1];
        let mut labels = Vec::with_capacity(prefix.len() + target.labels.len());
        labels.extend(prefix.iter().cloned());
        labels.extend(target.labels);
        Ok(Name::from_labels(labels))
    }

    pub fn expand(self, message: &[u8]) -> DecodeResult<Name> {
        if self.compressed {
            self.decompress(message)
        } else {
            Ok(self)
        }
    }
}

fn write_label(f: &mut Formatter<'_>, label: &[u8]) -> std::fmt::Result {
    for &byte in label {
        match byte {
            b'.' | b'\\' => write!(f, "\\{}", byte as char)?,
            0x21..=0x7e => write!(f, "{}", byte as char)?,
            _ => write!(f, "\\{:03}", byte)?,
        }
    }
    Ok(())
}

/// Dotted presentation form. Dots and backslashes inside a label are escaped
/// with a backslash, other non-printable octets as `\DDD`. An unexpanded
/// pointer is shown as `@offset`.
impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            return write!(f, ".");
        }
        let (labels, offset) = match self.get_pointer_offset() {
            Some(offset) => (&self.labels[..self.labels.len() - 1], Some(offset)),
            None => (&self.labels[..], None),
        };
        for (i, label) in labels.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write_label(f, label)?;
        }
        if let Some(offset) = offset {
            if !labels.is_empty() {
                write!(f, ".")?;
            }
            write!(f, "@{}", offset)?;
        }
        Ok(())
    }
}
