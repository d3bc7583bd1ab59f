use crate::buffer::{PacketBuffer, MAX_DATAGRAM_LEN};
use crate::config::Config;
use crate::system::Result;
use async_trait::async_trait;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;

/// Where the receive loop gets its datagrams from.
#[async_trait]
pub trait DatagramSource: Send + Sync {
    /// Waits up to `timeout` for a datagram; false means nothing arrived.
    async fn poll_readable(&self, timeout: Duration) -> Result<bool>;
    async fn read_datagram(&self) -> Result<(PacketBuffer, SocketAddr)>;
}

pub struct MdnsSocket {
    socket: UdpSocket,
    multicast_addr: Ipv4Addr,
    interface: Ipv4Addr,
}

impl MdnsSocket {
    /// Binds the wildcard address on the mDNS port. A socket bound to a
    /// unicast address never sees group traffic, so `interface` only picks
    /// where the group is joined.
    pub async fn create(config: &Config) -> Result<Self> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, config.port)).await?;
        info!("mdns socket bound to {}", socket.local_addr()?);
        Ok(MdnsSocket {
            socket,
            multicast_addr: config.multicast_addr,
            interface: config.interface,
        })
    }

    pub fn disable_multicast_loopback(&self) -> Result<()> {
        self.socket.set_multicast_loop_v4(false)?;
        Ok(())
    }

    pub fn join_multicast_group(&self) -> Result<()> {
        self.socket.join_multicast_v4(self.multicast_addr, self.interface)?;
        info!("joined multicast group {} on {}", self.multicast_addr, self.interface);
        Ok(())
    }
}

#[async_trait]
impl DatagramSource for MdnsSocket {
    async fn poll_readable(&self, timeout: Duration) -> Result<bool> {
        match tokio::time::timeout(timeout, self.socket.readable()).await {
            Ok(ready) => {
                ready?;
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    async fn read_datagram(&self) -> Result<(PacketBuffer, SocketAddr)> {
        let mut buffer = PacketBuffer::new();
        let (len, src) = self.socket.recv_from(buffer.as_mut_slice()).await?;
        if len >= MAX_DATAGRAM_LEN {
            warn!("datagram from {} filled the {} byte buffer and may be truncated", src, len);
        }
        buffer.set_len(len);
        Ok((buffer, src))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::socket::{DatagramSource, MdnsSocket};
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;
    use tokio::net::UdpSocket;

    fn get_loopback_config() -> Config {
        let mut config = Config::default();
        config.interface = Ipv4Addr::LOCALHOST;
        config.port = 0;
        config
    }

    fn get_any_port_config() -> Config {
        let mut config = Config::default();
        config.port = 0;
        config
    }

    #[tokio::test]
    async fn should_return_false_when_poll_readable_given_no_traffic() {
        let socket = MdnsSocket::create(&get_loopback_config()).await.unwrap();

        let result = socket.poll_readable(Duration::from_millis(20)).await.unwrap();

        assert!(!result)
    }

    #[tokio::test]
    async fn should_return_datagram_when_read_datagram_given_sent_bytes() {
        let socket = MdnsSocket::create(&get_loopback_config()).await.unwrap();
        let target = (Ipv4Addr::LOCALHOST, socket.socket.local_addr().unwrap().port());
        let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        sender.send_to(&[0u8; 12], target).await.unwrap();

        let readable = socket.poll_readable(Duration::from_secs(2)).await.unwrap();
        let (buffer, src) = socket.read_datagram().await.unwrap();

        assert!(readable);
        assert_eq!(&[0u8; 12][..], buffer.as_slice());
        assert_eq!(sender.local_addr().unwrap(), src)
    }

    #[tokio::test]
    async fn should_bind_wildcard_address_when_create_given_unicast_interface() {
        let socket = MdnsSocket::create(&get_loopback_config()).await.unwrap();

        let result = socket.socket.local_addr().unwrap();

        assert_eq!(IpAddr::V4(Ipv4Addr::UNSPECIFIED), result.ip())
    }

    #[tokio::test]
    async fn should_turn_off_loopback_when_disable_multicast_loopback() {
        let socket = MdnsSocket::create(&get_any_port_config()).await.unwrap();

        socket.disable_multicast_loopback().unwrap();

        assert!(!socket.socket.multicast_loop_v4().unwrap())
    }

    #[tokio::test]
    async fn should_receive_group_datagram_when_join_multicast_group() {
        let socket = MdnsSocket::create(&get_any_port_config()).await.unwrap();
        socket.join_multicast_group().unwrap();
        let port = socket.socket.local_addr().unwrap().port();
        let sender = UdpSocket::bind("0.0.0.0:0").await.unwrap();
        sender.set_multicast_loop_v4(true).unwrap();
        sender
            .send_to(&[0u8; 12], (Ipv4Addr::new(224, 0, 0, 251), port))
            .await
            .unwrap();

        let readable = socket.poll_readable(Duration::from_secs(2)).await.unwrap();
        let (buffer, _) = socket.read_datagram().await.unwrap();

        assert!(readable);
        assert_eq!(&[0u8; 12][..], buffer.as_slice())
    }
}
