use crate::config::Config;
use crate::error::DecodeError;
use crate::protocol::{DecodeOptions, Message};
use crate::socket::DatagramSource;
use crate::system::Result;
use std::net::SocketAddr;
use std::time::Duration;

/// Consecutive source failures after which `run` gives up.
pub const MAX_CONSECUTIVE_ERRORS: usize = 5;

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Idle,
    Decoded(SocketAddr, Message),
    Ignored(SocketAddr, DecodeError),
    Rejected(SocketAddr, DecodeError),
}

pub struct MessageHandler {
    options: DecodeOptions,
    poll_timeout: Duration,
}

impl MessageHandler {
    pub fn from(config: &Config) -> Self {
        MessageHandler {
            options: config.get_decode_options(),
            poll_timeout: config.get_poll_timeout(),
        }
    }

    /// Waits for one datagram and decodes it. Decode failures become an
    /// outcome; only errors from the source are returned as `Err`.
    pub async fn run_once<S: DatagramSource + ?Sized>(&self, source: &S) -> Result<Outcome> {
        if !source.poll_readable(self.poll_timeout).await? {
            return Ok(Outcome::Idle);
        }
        let (buffer, src) = source.read_datagram().await?;
        let outcome = match Message::decode_with(buffer.as_slice(), &self.options) {
            Ok(message) => {
                debug!(
                    "mdns message from {}: id={} qd={} an={} ns={} ar={}",
                    src,
                    message.get_header().get_id(),
                    message.get_questions().len(),
                    message.get_answers().len(),
                    message.get_authorities().len(),
                    message.get_additionals().len()
                );
                for question in message.get_questions() {
                    trace!(
                        "question {} type={} unicast={}",
                        question.get_name(),
                        question.get_type(),
                        question.is_unicast_response()
                    );
                }
                for record in message.get_answers() {
                    trace!("answer {} type={:?} ttl={}", record.get_name(), record.get_type(), record.get_ttl());
                }
                Outcome::Decoded(src, message)
            }
            Err(e) if e.is_ignorable() => {
                debug!("ignore mdns message from {}: {}", src, e);
                Outcome::Ignored(src, e)
            }
            Err(e) => {
                warn!("drop {} bytes from {}: {}", buffer.len(), src, e);
                Outcome::Rejected(src, e)
            }
        };
        Ok(outcome)
    }

    /// Receives until the source fails `MAX_CONSECUTIVE_ERRORS` times in a row.
    pub async fn run<S: DatagramSource + ?Sized>(&self, source: &S) -> Result<()> {
        let mut failures = 0;
        loop {
            match self.run_once(source).await {
                Ok(_) => failures = 0,
                Err(e) => {
                    failures += 1;
                    error!("receive failed ({}/{}): {:?}", failures, MAX_CONSECUTIVE_ERRORS, e);
                    if failures >= MAX_CONSECUTIVE_ERRORS {
                        return Err(e);
                    }
                }
            }
        }
    }
}
