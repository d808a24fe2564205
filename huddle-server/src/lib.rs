pub mod config;
pub mod error;
pub mod logger;
pub mod registry;
pub mod room;
pub mod signaling;
pub mod transport;

pub use config::*;
pub use error::*;
pub use registry::*;
pub use room::*;
pub use signaling::*;
pub use transport::*;
