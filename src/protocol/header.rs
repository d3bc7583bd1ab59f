use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};

pub const HEADER_LEN: usize = 12;

const QR_BIT: u8 = 0x80;
const OPCODE_MASK: u8 = 0x0F;
const AA_BIT: u8 = 0x04;
const TC_BIT: u8 = 0x02;
const RD_BIT: u8 = 0x01;
const RA_BIT: u8 = 0x80;
const Z_BIT: u8 = 0x40;
const RCODE_MASK: u8 = 0x0F;

/// The fixed 12-byte message header.
///
/// The id is kept even though RFC 6762 says multicast receivers ignore it.
/// The AD and CD bits are read past and not stored.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Header {
    id: u16,
    qr: bool,
    opcode: u8,
    aa: bool,
    tc: bool,
    rd: bool,
    ra: bool,
    rcode: u8,
    question_count: u16,
    answer_count: u16,
    authority_count: u16,
    additional_count: u16,
}

impl Header {
    pub fn decode(cursor: Cursor<'_>) -> DecodeResult<(Header, Cursor<'_>)> {
        if cursor.remaining() < HEADER_LEN {
            return Err(DecodeError::TooShort {
                needed: HEADER_LEN,
                available: cursor.remaining(),
            });
        }
        let mut cursor = cursor;
        let id = cursor.take_u16()?;
        let flags = cursor.take()?;
        let codes = cursor.take()?;
        if codes & Z_BIT != 0 {
            return Err(DecodeError::ReservedBitSet);
        }
        let rcode = codes & RCODE_MASK;
        if rcode != 0 {
            return Err(DecodeError::NonZeroRCode(rcode));
        }
        let header = Header {
            id,
            qr: flags & QR_BIT != 0,
            opcode: (flags >> 3) & OPCODE_MASK,
            aa: flags & AA_BIT != 0,
            tc: flags & TC_BIT != 0,
            rd: flags & RD_BIT != 0,
            ra: codes & RA_BIT != 0,
            rcode,
            question_count: cursor.take_u16()?,
            answer_count: cursor.take_u16()?,
            authority_count: cursor.take_u16()?,
            additional_count: cursor.take_u16()?,
        };
        Ok((header, cursor))
    }

    pub fn get_id(&self) -> u16 {
        self.id
    }

    pub fn get_opcode(&self) -> u8 {
        self.opcode
    }

    pub fn is_response(&self) -> bool {
        self.qr
    }

    pub fn is_authoritative(&self) -> bool {
        self.aa
    }

    pub fn is_truncated(&self) -> bool {
        self.tc
    }

    pub fn is_recursion_desired(&self) -> bool {
        self.rd
    }

    pub fn is_recursion_available(&self) -> bool {
        self.ra
    }

    pub fn get_rcode(&self) -> u8 {
        self.rcode
    }

    pub fn get_question_count(&self) -> u16 {
        self.question_count
    }

    pub fn get_answer_count(&self) -> u16 {
        self.answer_count
    }

    pub fn get_authority_count(&self) -> u16 {
        self.authority_count
    }

    pub fn get_additional_count(&self) -> u16 {
        self.additional_count
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::Cursor;
    use crate::error::DecodeError;
    use crate::protocol::header::Header;

    fn decode(bytes: &[u8]) -> Result<Header, DecodeError> {
        Header::decode(Cursor::from(bytes)).map(|(header, _)| header)
    }

    #[test]
    fn should_return_too_short_when_decode_given_less_than_12_bytes() {
        for len in 0..12 {
            let bytes = vec![0u8; len];

            let result = decode(&bytes);

            assert_eq!(Err(DecodeError::TooShort { needed: 12, available: len }), result)
        }
    }

    #[test]
    fn should_return_all_zero_header_when_decode_given_12_null_bytes() {
        let bytes = [0u8; 12];

        let (header, cursor) = Header::decode(Cursor::from(&bytes)).unwrap();

        assert_eq!(Header::default(), header);
        assert_eq!(12, cursor.get_current_index())
    }

    #[test]
    fn should_return_reserved_bit_set_when_decode_given_z_bit() {
        let bytes = [0u8, 0, 0, 0x40, 0, 0, 0, 0, 0, 0, 0, 0];

        let result = decode(&bytes);

        assert_eq!(Err(DecodeError::ReservedBitSet), result)
    }

    #[test]
    fn should_return_reserved_bit_set_when_decode_given_all_ff() {
        let bytes = [0xffu8; 12];

        let result = decode(&bytes);

        assert_eq!(Err(DecodeError::ReservedBitSet), result)
    }

    #[test]
    fn should_return_non_zero_rcode_when_decode_given_all_ff_except_z() {
        let bytes = [0xffu8, 0xff, 0xff, 0x8f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];

        let result = decode(&bytes);

        assert_eq!(Err(DecodeError::NonZeroRCode(0x0f)), result)
    }

    #[test]
    fn should_set_every_field_when_decode_given_all_ff_except_z_and_rcode() {
        let bytes = [0xffu8, 0xff, 0xff, 0xb0, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];

        let header = decode(&bytes).unwrap();

        assert_eq!(0xffff, header.get_id());
        assert_eq!(0x0f, header.get_opcode());
        assert!(header.is_response());
        assert!(header.is_authoritative());
        assert!(header.is_truncated());
        assert!(header.is_recursion_desired());
        assert!(header.is_recursion_available());
        assert_eq!(0, header.get_rcode());
        assert_eq!(0xffff, header.get_question_count());
        assert_eq!(0xffff, header.get_answer_count());
        assert_eq!(0xffff, header.get_authority_count());
        assert_eq!(0xffff, header.get_additional_count())
    }

    #[test]
    fn should_read_counts_big_endian_when_decode_given_spotted_ones() {
        let bytes = [1u8, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 1];

        let header = decode(&bytes).unwrap();

        assert_eq!(256, header.get_id());
        assert_eq!(0, header.get_opcode());
        assert!(!header.is_response());
        assert_eq!(1, header.get_question_count());
        assert_eq!(256, header.get_answer_count());
        assert_eq!(0, header.get_authority_count());
        assert_eq!(0, header.get_additional_count())
    }

    #[test]
    fn should_read_qr_and_rd_when_decode_given_mixed_flags() {
        let bytes = [0u8, 4, 0x81, 0, 2, 0, 0, 8, 0, 0, 1, 0];

        let header = decode(&bytes).unwrap();

        assert_eq!(4, header.get_id());
        assert!(header.is_response());
        assert!(!header.is_authoritative());
        assert!(!header.is_truncated());
        assert!(header.is_recursion_desired());
        assert!(!header.is_recursion_available());
        assert_eq!(512, header.get_question_count());
        assert_eq!(8, header.get_answer_count());
        assert_eq!(0, header.get_authority_count());
        assert_eq!(256, header.get_additional_count())
    }
}
