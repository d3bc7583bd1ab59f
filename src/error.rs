use std::{error, fmt};

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    TooShort { needed: usize, available: usize },
    NullBuffer,
    ReservedBitSet,
    NonZeroRCode(u8),
    Malformed(&'static str),
    RDataLengthMismatch { declared: u16, consumed: usize },
    UnsupportedRData(u16),
    CompressionPointerChained,
}

impl DecodeError {
    /// RFC 6762 asks receivers to silently drop these messages, so they are
    /// not a sign of a broken sender or a broken decoder.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, DecodeError::NonZeroRCode(_) | DecodeError::ReservedBitSet)
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodeError::TooShort { needed, available } => {
                write!(f, "too short: need {} bytes, have {}", needed, available)
            }
            DecodeError::NullBuffer => write!(f, "no bytes to decode"),
            DecodeError::ReservedBitSet => write!(f, "reserved header bit is set"),
            DecodeError::NonZeroRCode(code) => write!(f, "non-zero response code {}", code),
            DecodeError::Malformed(reason) => write!(f, "malformed message: {}", reason),
            DecodeError::RDataLengthMismatch { declared, consumed } => {
                write!(f, "rdata declared {} bytes but {} were consumed", declared, consumed)
            }
            DecodeError::UnsupportedRData(code) => {
                write!(f, "rdata of record type {} is not supported", code)
            }
            DecodeError::CompressionPointerChained => {
                write!(f, "compression pointer resolves to another pointer")
            }
        }
    }
}

impl error::Error for DecodeError {
    fn description(&self) -> &str {
        "mdns decode error"
    }

    fn cause(&self) -> Option<&dyn error::Error> {
        None
    }
}
