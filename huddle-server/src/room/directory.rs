use huddle_core::{ConnectionId, RoomId};

/// Result of [`Directory::join`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JoinOutcome {
    /// Room the connection was implicitly removed from, if it was in one.
    pub previous: Option<RoomId>,
    /// Members of the joined room before the join, in join order.
    pub existing: Vec<ConnectionId>,
}

/// Room membership. The router owns the only instance and is the only caller,
/// so implementations need no internal locking.
pub trait Directory: Send {
    /// Puts `connection` into `room`, creating the room if needed. A connection
    /// that already belongs to a room leaves it first.
    fn join(&mut self, connection: ConnectionId, room: RoomId) -> JoinOutcome;

    /// Removes `connection` from its room and deletes the room once empty.
    fn leave(&mut self, connection: &ConnectionId) -> Option<RoomId>;

    /// Members of `room` in join order, without `except`.
    fn members_of(&self, room: &RoomId, except: Option<&ConnectionId>) -> Vec<ConnectionId>;

    fn room_count(&self) -> usize;

    /// Forgets every room.
    fn clear(&mut self);
}
