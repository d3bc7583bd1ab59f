use crate::protocol::DecodeOptions;
use crate::system::Result;
use std::net::Ipv4Addr;
use std::path::Path;
use std::time::Duration;
use toml::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub multicast_addr: Ipv4Addr,
    pub interface: Ipv4Addr,
    pub port: u16,
    pub poll_timeout_ms: u64,
    pub log_level: String,
    pub strict_rdata: bool,
}

impl Config {
    fn new() -> Self {
        Config {
            multicast_addr: Ipv4Addr::new(224, 0, 0, 251),
            interface: Ipv4Addr::UNSPECIFIED,
            port: 5353,
            poll_timeout_ms: 1000,
            log_level: "INFO".to_string(),
            strict_rdata: true,
        }
    }

    pub fn get_poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    pub fn get_decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            strict_rdata: self.strict_rdata,
        }
    }

    fn from_toml(content: &str) -> Result<Self> {
        let table: Value = content.parse()?;
        let mut config = Config::new();
        if let Some(v) = table.get("multicast_addr") {
            config.multicast_addr = get_str(v, "multicast_addr")?.parse::<Ipv4Addr>()?;
        }
        if let Some(v) = table.get("interface") {
            config.interface = get_str(v, "interface")?.parse::<Ipv4Addr>()?;
        }
        if let Some(v) = table.get("port") {
            let port = get_integer(v, "port")?;
            if port < 0 || port > u16::MAX as i64 {
                return Err(format!("port out of range: {}", port).into());
            }
            config.port = port as u16;
        }
        if let Some(v) = table.get("poll_timeout_ms") {
            let timeout = get_integer(v, "poll_timeout_ms")?;
            if timeout <= 0 {
                return Err(format!("poll_timeout_ms must be positive: {}", timeout).into());
            }
            config.poll_timeout_ms = timeout as u64;
        }
        if let Some(v) = table.get("log_level") {
            config.log_level = get_str(v, "log_level")?.to_string();
        }
        if let Some(v) = table.get("strict_rdata") {
            config.strict_rdata = v
                .as_bool()
                .ok_or_else(|| format!("strict_rdata must be a boolean, got {}", v))?;
        }
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

fn get_str<'a>(value: &'a Value, key: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| format!("{} must be a string, got {}", key, value).into())
}

fn get_integer(value: &Value, key: &str) -> Result<i64> {
    value
        .as_integer()
        .ok_or_else(|| format!("{} must be an integer, got {}", key, value).into())
}

/// Reads the config file, falling back to defaults when it does not exist.
pub async fn init_from_toml<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::new());
    }
    let content = tokio::fs::read_to_string(path).await?;
    Config::from_toml(&content)
}
