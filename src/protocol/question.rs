use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};
use crate::protocol::name::Name;
use crate::protocol::CLASS_FLAG;

// Root label plus type and class.
const MIN_QUESTION_LEN: usize = 1 + 2 + 2;
const TYPE_AND_CLASS_LEN: usize = 4;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Question {
    name: Name,
    _type: u16,
    class: u16,
}

impl Question {
    /// Decodes one question entry.
    ///
    /// A compressed name is returned as is; resolving it needs the whole
    /// message and is left to the caller.
    pub fn decode(cursor: Cursor<'_>) -> DecodeResult<(Question, Cursor<'_>)> {
        if cursor.remaining() < MIN_QUESTION_LEN {
            return Err(DecodeError::TooShort {
                needed: MIN_QUESTION_LEN,
                available: cursor.remaining(),
            });
        }
        let (name, mut cursor) = Name::decode(cursor)?;
        if cursor.remaining() < TYPE_AND_CLASS_LEN {
            return Err(DecodeError::Malformed("question ends before type and class"));
        }
        let _type = cursor.take_u16()?;
        let class = cursor.take_u16()?;
        Ok((Question { name, _type, class }, cursor))
    }

    pub fn expand(self, message: &[u8]) -> DecodeResult<Question> {
        Ok(Question {
            name: self.name.expand(message)?,
            _type: self._type,
            class: self.class,
        })
    }

    pub fn get_name(&self) -> &Name {
        &self.name
    }

    pub fn get_type(&self) -> u16 {
        self._type
    }

    /// QCLASS without the unicast-response bit.
    pub fn get_class(&self) -> u16 {
        self.class & !CLASS_FLAG
    }

    pub fn get_raw_class(&self) -> u16 {
        self.class
    }

    pub fn is_unicast_response(&self) -> bool {
        self.class & CLASS_FLAG != 0
    }
}
