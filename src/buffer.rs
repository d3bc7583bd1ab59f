/// Largest mDNS message allowed over multicast (RFC 6762 section 17).
pub const MAX_DATAGRAM_LEN: usize = 9000;

pub struct PacketBuffer {
    buf: [u8; MAX_DATAGRAM_LEN],
    len: usize,
}

impl PacketBuffer {
    pub fn new() -> Self {
        PacketBuffer {
            buf: [0u8; MAX_DATAGRAM_LEN],
            len: 0,
        }
    }

    pub fn from(bytes: &[u8]) -> Self {
        let mut buffer = PacketBuffer::new();
        let len = bytes.len().min(MAX_DATAGRAM_LEN);
        buffer.buf[..len].copy_from_slice(&bytes[..len]);
        buffer.len = len;
        buffer
    }

    /// The whole backing array, for a socket to receive into.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    pub fn set_len(&mut self, len: usize) {
        self.len = len.min(MAX_DATAGRAM_LEN);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Only the bytes actually received.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Default for PacketBuffer {
    fn default() -> Self {
        PacketBuffer::new()
    }
}
