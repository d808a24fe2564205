use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Signaling server for browser peers negotiating direct audio/video calls.
#[derive(Parser, Debug, Clone)]
#[command(name = "huddle-server", version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "HUDDLE_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Capacity of the router's command queue
    #[arg(long, env = "HUDDLE_COMMAND_BUFFER", default_value_t = 256)]
    pub command_buffer: usize,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "HUDDLE_LOG", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3001,
            command_buffer: 256,
            log_level: "info".to_owned(),
        }
    }
}
