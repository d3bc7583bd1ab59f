//! Wire-format decoding of multicast DNS messages (RFC 1035, RFC 6762).

mod header;
mod message;
mod name;
mod question;
mod record;

pub use header::Header;
pub use message::{DecodeOptions, Message};
pub use name::{decode_label, LabelUnit, Name};
pub use question::Question;
pub use record::{RData, RecordType, ResourceRecord};

const C_FACTOR: u8 = 0xC0;
const DC_FACTOR: u16 = 0x3FFF;

// Top bit of QCLASS (unicast response wanted) and of an RR class (cache flush).
const CLASS_FLAG: u16 = 0x8000;
