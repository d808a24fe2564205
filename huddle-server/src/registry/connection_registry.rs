use crate::error::RegistryError;
use crate::registry::ConnectionHandle;
use huddle_core::{ConnectionId, RoomId};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Per-connection protocol state. A terminated connection has no entry at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unjoined,
    Joined(RoomId),
}

impl SessionState {
    pub fn room(&self) -> Option<&RoomId> {
        match self {
            SessionState::Unjoined => None,
            SessionState::Joined(room) => Some(room),
        }
    }
}

struct ConnectionEntry {
    handle: ConnectionHandle,
    state: SessionState,
}

/// Live connections and the handle used to reach each of them.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, ConnectionEntry>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a freshly established connection in the `Unjoined` state.
    pub fn register(&mut self, id: ConnectionId, handle: ConnectionHandle) -> Result<(), RegistryError> {
        match self.connections.entry(id) {
            Entry::Occupied(_) => Err(RegistryError::AlreadyRegistered(id)),
            Entry::Vacant(slot) => {
                slot.insert(ConnectionEntry {
                    handle,
                    state: SessionState::Unjoined,
                });
                Ok(())
            }
        }
    }

    /// Removes `id`. Returns `false` when it was not registered, which is not an error.
    pub fn unregister(&mut self, id: &ConnectionId) -> bool {
        self.connections.remove(id).is_some()
    }

    pub fn resolve(&self, id: &ConnectionId) -> Option<ConnectionHandle> {
        self.connections.get(id).map(|entry| entry.handle.clone())
    }

    pub fn state(&self, id: &ConnectionId) -> Option<SessionState> {
        self.connections.get(id).map(|entry| entry.state.clone())
    }

    /// Updates the tracked room of a registered connection. Unknown ids are ignored.
    pub fn set_state(&mut self, id: &ConnectionId, state: SessionState) -> bool {
        match self.connections.get_mut(id) {
            Some(entry) => {
                entry.state = state;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Drops every handle, which ends the writer task of each connection.
    pub fn clear(&mut self) {
        self.connections.clear();
    }
}
