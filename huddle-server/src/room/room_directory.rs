use crate::room::{Directory, JoinOutcome};
use huddle_core::{ConnectionId, RoomId};
use std::collections::HashMap;
use tracing::debug;

/// In-memory rooms. A room exists exactly while it has at least one member.
#[derive(Debug, Default)]
pub struct RoomDirectory {
    rooms: HashMap<RoomId, Vec<ConnectionId>>,
    memberships: HashMap<ConnectionId, RoomId>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn member_count(&self, room: &RoomId) -> usize {
        self.rooms.get(room).map_or(0, Vec::len)
    }

    #[cfg(test)]
    fn contains_room(&self, room: &RoomId) -> bool {
        self.rooms.contains_key(room)
    }

    #[cfg(test)]
    fn room_of(&self, connection: &ConnectionId) -> Option<&RoomId> {
        self.memberships.get(connection)
    }
}

impl Directory for RoomDirectory {
    fn join(&mut self, connection: ConnectionId, room: RoomId) -> JoinOutcome {
        let previous = self.leave(&connection);

        let members = self.rooms.entry(room.clone()).or_insert_with(|| {
            debug!("Creating room '{}'", room);
            Vec::new()
        });
        let existing = members.clone();
        members.push(connection);
        self.memberships.insert(connection, room);

        JoinOutcome { previous, existing }
    }

    fn leave(&mut self, connection: &ConnectionId) -> Option<RoomId> {
        let room = self.memberships.remove(connection)?;

        if let Some(members) = self.rooms.get_mut(&room) {
            members.retain(|member| member != connection);
            if members.is_empty() {
                self.rooms.remove(&room);
                debug!("Room '{}' is empty, removed", room);
            }
        }

        Some(room)
    }

    fn members_of(&self, room: &RoomId, except: Option<&ConnectionId>) -> Vec<ConnectionId> {
        self.rooms
            .get(room)
            .map(|members| {
                members
                    .iter()
                    .filter(|member| Some(*member) != except)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn room_count(&self) -> usize {
        self.rooms.len()
    }

    fn clear(&mut self) {
        self.rooms.clear();
        self.memberships.clear();
    }
}
