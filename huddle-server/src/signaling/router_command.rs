use huddle_core::{ClientMessage, ConnectionId};
use tokio::sync::oneshot;

use crate::registry::ConnectionHandle;

/// Commands the transport layer sends to the signaling router.
#[derive(Debug)]
pub enum RouterCommand {
    /// A transport session was established.
    Connect {
        id: ConnectionId,
        handle: ConnectionHandle,
    },

    /// A decoded message arrived on a connection.
    Inbound {
        id: ConnectionId,
        message: ClientMessage,
    },

    /// The transport session ended, gracefully or not.
    Disconnect { id: ConnectionId },

    Stats { reply: oneshot::Sender<RouterStats> },

    /// Clear all rooms and connections, then stop the router.
    Shutdown { reply: oneshot::Sender<()> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterStats {
    pub rooms: usize,
    pub connections: usize,
}
