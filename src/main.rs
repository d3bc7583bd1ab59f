#[macro_use]
extern crate log;

use easymdns::config;
use easymdns::handler::MessageHandler;
use easymdns::socket::MdnsSocket;
use easymdns::system::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::str::FromStr;

#[tokio::main]
async fn main() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config = config::init_from_toml(&path).await?;
    let level = LevelFilter::from_str(&config.log_level)
        .map_err(|e| format!("bad log_level {:?}: {}", config.log_level, e))?;
    SimpleLogger::new()
        .with_level(level)
        .init()
        .map_err(|e| e.to_string())?;
    info!("config loaded from {}: {:?}", path, config);

    let socket = MdnsSocket::create(&config).await?;
    socket.disable_multicast_loopback()?;
    socket.join_multicast_group()?;
    let handler = MessageHandler::from(&config);

    tokio::select! {
        result = handler.run(&socket) => {
            if let Err(e) = &result {
                error!("receive loop stopped: {}", e);
            }
            result
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutting down");
            Ok(())
        }
    }
}
