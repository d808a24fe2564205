use crate::error::RouterError;
use crate::registry::ConnectionHandle;
use crate::signaling::{RouterCommand, RouterHandle};
use huddle_core::{ClientMessage, ConnectionId, ServerMessage};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::warn;

/// Transport-side view of one connection's lifetime.
///
/// Opening registers the connection with the router; closing (or dropping)
/// sends exactly one disconnect for it.
pub struct Session {
    id: ConnectionId,
    router: RouterHandle,
    closed: bool,
}

impl Session {
    /// Assigns a fresh id, registers it and returns the queue its writer drains.
    pub async fn open(
        router: RouterHandle,
    ) -> Result<(Self, mpsc::UnboundedReceiver<ServerMessage>), RouterError> {
        let id = ConnectionId::new();
        let (handle, outbound) = ConnectionHandle::channel();

        router.send(RouterCommand::Connect { id, handle }).await?;

        let session = Self {
            id,
            router,
            closed: false,
        };
        Ok((session, outbound))
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub async fn forward(&self, message: ClientMessage) -> Result<(), RouterError> {
        self.router
            .send(RouterCommand::Inbound {
                id: self.id,
                message,
            })
            .await
    }

    pub async fn close(mut self) {
        self.closed = true;
        if let Err(e) = self.router.send(RouterCommand::Disconnect { id: self.id }).await {
            warn!("Could not report disconnect of {}: {}", self.id, e);
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        // Task was cancelled before `close` ran.
        let id = self.id;
        match self.router.try_send(RouterCommand::Disconnect { id }) {
            Ok(()) => {}
            Err(RouterError::Busy) => match Handle::try_current() {
                Ok(runtime) => {
                    let router = self.router.clone();
                    runtime.spawn(async move {
                        if let Err(e) = router.send(RouterCommand::Disconnect { id }).await {
                            warn!("Could not report disconnect of {}: {}", id, e);
                        }
                    });
                }
                Err(_) => warn!("Could not report disconnect of {}: no runtime", id),
            },
            Err(e) => warn!("Could not report disconnect of {}: {}", id, e),
        }
    }
}
