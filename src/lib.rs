#[macro_use]
extern crate log;

pub mod buffer;
pub mod config;
pub mod cursor;
pub mod error;
pub mod handler;
pub mod protocol;
pub mod socket;
pub mod system;

pub use error::{DecodeError, DecodeResult};
pub use protocol::{DecodeOptions, Message};
