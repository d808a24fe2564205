use crate::error::RegistryError;
use crate::registry::ConnectionHandle;
use crate::signaling::SignalingRouter;
use huddle_core::{ConnectionId, ServerMessage};
use tracing::{debug, info};

impl SignalingRouter {
    /// Registers a new transport session as `Unjoined` and tells it its id.
    pub fn establish(&mut self, id: ConnectionId, handle: ConnectionHandle) -> Result<(), RegistryError> {
        self.registry.register(id, handle)?;
        info!("Connection {} established", id);

        self.deliver(&id, ServerMessage::Welcome { id });
        Ok(())
    }

    /// Tears a session down: leave its room, notify the room, unregister.
    ///
    /// Repeated calls for the same id are no-ops.
    pub fn terminate(&mut self, id: &ConnectionId) {
        if !self.registry.contains(id) {
            debug!("Connection {} already terminated", id);
            return;
        }

        if let Some(room) = self.directory.leave(id) {
            info!("Connection {} left room '{}' on disconnect", id, room);
            self.announce_departure(*id, &room);
        }

        self.registry.unregister(id);
        info!("Connection {} terminated", id);
    }
}
