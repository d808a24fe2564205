use huddle_core::ConnectionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("connection {0} is already registered")]
    AlreadyRegistered(ConnectionId),
}

#[derive(Debug, Error)]
pub enum RouterError {
    /// The router task has exited; no further commands can be processed.
    #[error("signaling router has stopped")]
    Stopped,

    /// The command queue is full; waiting would have succeeded.
    #[error("signaling router queue is full")]
    Busy,
}
