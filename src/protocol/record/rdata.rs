use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};
use crate::protocol::message::DecodeOptions;
use crate::protocol::name::Name;
use crate::protocol::record::RecordType;

/// Record data, by record type.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RData {
    /// One or more target names filling RDLENGTH exactly.
    Ptr(Vec<Name>),
    /// Raw bytes of a type whose layout is not decoded. Only produced when
    /// `DecodeOptions::strict_rdata` is off.
    Unimplemented(Vec<u8>),
}

impl RData {
    pub fn decode<'a>(
        cursor: Cursor<'a>,
        _type: RecordType,
        data_len: u16,
        options: &DecodeOptions,
    ) -> DecodeResult<(RData, Cursor<'a>)> {
        if data_len == 0 {
            return Err(DecodeError::Malformed("record data is empty"));
        }
        if data_len as usize > cursor.remaining() {
            return Err(DecodeError::Malformed("record data length exceeds remaining buffer"));
        }
        match _type {
            RecordType::Ptr => decode_ptr(cursor, data_len),
            other if options.strict_rdata => Err(DecodeError::UnsupportedRData(other.code())),
            _ => {
                let mut cursor = cursor;
                let raw = cursor.take_slice(data_len as usize)?;
                Ok((RData::Unimplemented(raw.to_vec()), cursor))
            }
        }
    }

    pub fn expand(self, message: &[u8]) -> DecodeResult<RData> {
        match self {
            RData::Ptr(names) => {
                let names = names
                    .into_iter()
                    .map(|name| name.expand(message))
                    .collect::<DecodeResult<Vec<Name>>>()?;
                Ok(RData::Ptr(names))
            }
            unimplemented => Ok(unimplemented),
        }
    }

    pub fn get_ptr_names(&self) -> Option<&Vec<Name>> {
        match self {
            RData::Ptr(names) => Some(names),
            RData::Unimplemented(_) => None,
        }
    }
}

fn decode_ptr(cursor: Cursor<'_>, data_len: u16) -> DecodeResult<(RData, Cursor<'_>)> {
    let start = cursor.get_current_index();
    let end = start + data_len as usize;
    let mut cursor = cursor;
    let mut names = Vec::new();
    while cursor.get_current_index() < end {
        let (name, next) = Name::decode(cursor)?;
        names.push(name);
        cursor = next;
    }
    let consumed = cursor.get_current_index() - start;
    if consumed != data_len as usize {
        return Err(DecodeError::RDataLengthMismatch {
            declared: data_len,
            consumed,
        });
    }
    Ok((RData::Ptr(names), cursor))
}
