mod rdata;

use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};
use crate::protocol::message::DecodeOptions;
use crate::protocol::name::Name;
use crate::protocol::CLASS_FLAG;

pub use rdata::RData;

// Shortest owner name (root) plus type, class, ttl and rdlength.
const MIN_RECORD_LEN: usize = 1 + RECORD_META_LEN;
const RECORD_META_LEN: usize = 2 + 2 + 4 + 2;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum RecordType {
    A,
    Ns,
    Md,
    Mf,
    Cname,
    Soa,
    Mb,
    Mg,
    Mr,
    Null,
    Wks,
    Ptr,
    Hinfo,
    Minfo,
    Mx,
    Txt,
    Unknown(u16),
}

impl From<u16> for RecordType {
    fn from(code: u16) -> Self {
        match code {
            1 => RecordType::A,
            2 => RecordType::Ns,
            3 => RecordType::Md,
            4 => RecordType::Mf,
            5 => RecordType::Cname,
            6 => RecordType::Soa,
            7 => RecordType::Mb,
            8 => RecordType::Mg,
            9 => RecordType::Mr,
            10 => RecordType::Null,
            11 => RecordType::Wks,
            12 => RecordType::Ptr,
            13 => RecordType::Hinfo,
            14 => RecordType::Minfo,
            15 => RecordType::Mx,
            16 => RecordType::Txt,
            other => RecordType::Unknown(other),
        }
    }
}

impl RecordType {
    pub fn code(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::Ns => 2,
            RecordType::Md => 3,
            RecordType::Mf => 4,
            RecordType::Cname => 5,
            RecordType::Soa => 6,
            RecordType::Mb => 7,
            RecordType::Mg => 8,
            RecordType::Mr => 9,
            RecordType::Null => 10,
            RecordType::Wks => 11,
            RecordType::Ptr => 12,
            RecordType::Hinfo => 13,
            RecordType::Minfo => 14,
            RecordType::Mx => 15,
            RecordType::Txt => 16,
            RecordType::Unknown(code) => *code,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, RecordType::Unknown(_))
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ResourceRecord {
    name: Name,
    _type: RecordType,
    class: u16,
    ttl: u32,
    data_len: u16,
    data: RData,
}

impl ResourceRecord {
    pub fn decode<'a>(cursor: Cursor<'a>, options: &DecodeOptions) -> DecodeResult<(ResourceRecord, Cursor<'a>)> {
        if cursor.remaining() < MIN_RECORD_LEN {
            return Err(DecodeError::TooShort {
                needed: MIN_RECORD_LEN,
                available: cursor.remaining(),
            });
        }
        let (name, mut cursor) = Name::decode(cursor)?;
        if cursor.remaining() < RECORD_META_LEN {
            return Err(DecodeError::Malformed("record ends before its fixed fields"));
        }
        let _type = RecordType::from(cursor.take_u16()?);
        let class = cursor.take_u16()?;
        let ttl = cursor.take_u32()?;
        let data_len = cursor.take_u16()?;
        let (data, cursor) = RData::decode(cursor, _type, data_len, options)?;
        let record = ResourceRecord {
            name,
            _type,
            class,
            ttl,
            data_len,
            data,
        };
        Ok((record, cursor))
    }

    pub fn expand(self, message: &[u8]) -> DecodeResult<ResourceRecord> {
        Ok(ResourceRecord {
            name: self.name.expand(message)?,
            _type: self._type,
            class: self.class,
            ttl: self.ttl,
            data_len: self.data_len,
            data: self.data.expand(message)?,
        })
    }

    pub fn get_name(&self) -> &Name {
        &self.name
    }

    pub fn get_type(&self) -> RecordType {
        self._type
    }

    /// Class without the cache-flush bit.
    pub fn get_class(&self) -> u16 {
        self.class & !CLASS_FLAG
    }

    pub fn get_raw_class(&self) -> u16 {
        self.class
    }

    pub fn is_cache_flush(&self) -> bool {
        self.class & CLASS_FLAG != 0
    }

    pub fn get_ttl(&self) -> u32 {
        self.ttl
    }

    pub fn get_data_len(&self) -> u16 {
        self.data_len
    }

    pub fn get_data(&self) -> &RData {
        &self.data
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::cursor::Cursor;
    use crate::error::DecodeError;
    use crate::protocol::message::DecodeOptions;
    use crate::protocol::name::Name;
    use crate::protocol::record::{RData, RecordType, ResourceRecord};

    pub fn record_bytes(name: &[u8], _type: u16, class: u16, ttl: u32, rdata: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(name);
        bytes.extend(&_type.to_be_bytes());
        bytes.extend(&class.to_be_bytes());
        bytes.extend(&ttl.to_be_bytes());
        bytes.extend(&(rdata.len() as u16).to_be_bytes());
        bytes.extend(rdata);
        bytes
    }

    fn decode(bytes: &[u8]) -> Result<ResourceRecord, DecodeError> {
        ResourceRecord::decode(Cursor::from(bytes), &DecodeOptions::default()).map(|(r, _)| r)
    }

    #[test]
    fn should_map_every_code_when_from_given_1_to_16() {
        for code in 1..=16u16 {
            let result = RecordType::from(code);

            assert!(result.is_known());
            assert_eq!(code, result.code())
        }
    }

    #[test]
    fn should_return_unknown_when_from_given_unlisted_code() {
        let result = RecordType::from(33);

        assert_eq!(RecordType::Unknown(33), result);
        assert_eq!(33, result.code())
    }

    #[test]
    fn should_return_too_short_when_decode_given_10_bytes() {
        let bytes = [0u8; 10];

        let result = decode(&bytes);

        assert_eq!(Err(DecodeError::TooShort { needed: 11, available: 10 }), result)
    }

    #[test]
    fn should_return_malformed_when_decode_given_name_eating_fixed_fields() {
        let bytes = [4u8, b'h', b'o', b's', b't', 0, 0, 12, 0, 1, 0, 0];

        let result = decode(&bytes);

        assert!(matches!(result, Err(DecodeError::Malformed(_))))
    }

    #[test]
    fn should_return_ptr_record_when_decode_given_matching_rdlength() {
        let bytes = record_bytes(&[1, b'a', 0], 12, 0x8001, 120, &[3, b'f', b'o', b'o', 0]);

        let (record, cursor) = ResourceRecord::decode(Cursor::from(&bytes), &DecodeOptions::default()).unwrap();

        assert_eq!(&vec![b"a".to_vec()], record.get_name().get_labels());
        assert_eq!(RecordType::Ptr, record.get_type());
        assert_eq!(1, record.get_class());
        assert!(record.is_cache_flush());
        assert_eq!(120, record.get_ttl());
        assert_eq!(5, record.get_data_len());
        assert_eq!(&RData::Ptr(vec![Name::from_labels(vec![b"foo".to_vec()])]), record.get_data());
        assert_eq!(bytes.len(), cursor.get_current_index())
    }

    #[test]
    fn should_return_unsupported_when_decode_given_a_record_in_strict_mode() {
        let bytes = record_bytes(&[0], 1, 1, 120, &[192, 168, 0, 1]);

        let result = decode(&bytes);

        assert_eq!(Err(DecodeError::UnsupportedRData(1)), result)
    }

    #[test]
    fn should_keep_raw_data_when_decode_given_a_record_in_lenient_mode() {
        let bytes = record_bytes(&[0], 1, 1, 120, &[192, 168, 0, 1]);
        let options = DecodeOptions { strict_rdata: false };

        let (record, cursor) = ResourceRecord::decode(Cursor::from(&bytes), &options).unwrap();

        assert_eq!(RecordType::A, record.get_type());
        assert_eq!(&RData::Unimplemented(vec![192, 168, 0, 1]), record.get_data());
        assert_eq!(bytes.len(), cursor.get_current_index())
    }

    #[test]
    fn should_return_unsupported_when_decode_given_unknown_type_in_strict_mode() {
        let bytes = record_bytes(&[0], 33, 1, 120, &[0, 0, 0, 0, 0, 0]);

        let result = decode(&bytes);

        assert_eq!(Err(DecodeError::UnsupportedRData(33)), result)
    }

    #[test]
    fn should_expand_owner_and_ptr_names_when_expand_given_compressed_record() {
        let mut message = vec![5u8, b'l', b'o', b'c', b'a', b'l', 0];
        let start = message.len();
        message.extend(record_bytes(&[0xc0, 0x00], 12, 1, 10, &[3, b'f', b'o', b'o', 0xc0, 0x00]));
        let (record, _) =
            ResourceRecord::decode(Cursor::from(&message).at(start), &DecodeOptions::default()).unwrap();

        let result = record.expand(&message).unwrap();

        assert_eq!(&vec![b"local".to_vec()], result.get_name().get_labels());
        let expected = Name::from_labels(vec![b"foo".to_vec(), b"local".to_vec()]);
        assert_eq!(&RData::Ptr(vec![expected]), result.get_data())
    }
}
