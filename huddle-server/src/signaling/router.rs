use crate::registry::{ConnectionRegistry, SessionState};
use crate::room::{Directory, JoinOutcome};
use crate::signaling::{RouterCommand, RouterHandle, RouterStats};
use huddle_core::{ClientMessage, ConnectionId, RoomId, ServerMessage};
use std::ops::ControlFlow;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Protocol state machine and relay.
///
/// Owns the registry and the directory; every command is applied to both
/// before the next one is looked at, which keeps a connection's tracked room
/// and the directory's membership sets in agreement.
pub struct SignalingRouter {
    pub(super) registry: ConnectionRegistry,
    pub(super) directory: Box<dyn Directory>,
}

impl SignalingRouter {
    pub fn new(directory: Box<dyn Directory>) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            directory,
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn directory(&self) -> &dyn Directory {
        self.directory.as_ref()
    }

    /// Moves the router onto its own task and returns the handle to feed it.
    pub fn spawn(self, buffer: usize) -> RouterHandle {
        let (tx, rx) = mpsc::channel(buffer);
        tokio::spawn(self.run(rx));
        RouterHandle::new(tx)
    }

    pub async fn run(mut self, mut commands: mpsc::Receiver<RouterCommand>) {
        info!("Signaling router started");

        while let Some(cmd) = commands.recv().await {
            if self.handle_command(cmd).is_break() {
                break;
            }
        }

        self.shutdown();
        info!("Signaling router stopped");
    }

    pub fn handle_command(&mut self, cmd: RouterCommand) -> ControlFlow<()> {
        match cmd {
            RouterCommand::Connect { id, handle } => {
                if let Err(e) = self.establish(id, handle) {
                    warn!("Rejected connection: {}", e);
                }
            }

            RouterCommand::Inbound { id, message } => self.dispatch(id, message),

            RouterCommand::Disconnect { id } => self.terminate(&id),

            RouterCommand::Stats { reply } => {
                let _ = reply.send(self.stats());
            }

            RouterCommand::Shutdown { reply } => {
                self.shutdown();
                let _ = reply.send(());
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    /// Applies one inbound message from `from`.
    pub fn dispatch(&mut self, from: ConnectionId, message: ClientMessage) {
        if !self.registry.contains(&from) {
            warn!("Dropping '{}' from unknown connection {}", message.event(), from);
            return;
        }

        match message {
            ClientMessage::JoinRoom(room) => self.join(from, room),

            ClientMessage::LeaveRoom => self.leave(from),

            ClientMessage::Offer { offer, to, .. } => {
                self.relay(to, ServerMessage::Offer { offer, from });
            }

            ClientMessage::Answer { answer, to, .. } => {
                self.relay(to, ServerMessage::Answer { answer, from });
            }

            ClientMessage::IceCandidate { candidate, to, .. } => {
                self.relay(to, ServerMessage::IceCandidate { candidate, from });
            }

            ClientMessage::ChatMessage { text, .. } => self.chat(from, text),
        }
    }

    pub fn stats(&self) -> RouterStats {
        RouterStats {
            rooms: self.directory.room_count(),
            connections: self.registry.len(),
        }
    }

    /// Forgets every room and connection. Dropping the handles closes the
    /// writer side of each transport.
    pub fn shutdown(&mut self) {
        if self.registry.is_empty() && self.directory.room_count() == 0 {
            return;
        }

        info!(
            "Clearing {} rooms and {} connections",
            self.directory.room_count(),
            self.registry.len()
        );
        self.directory.clear();
        self.registry.clear();
    }

    fn join(&mut self, id: ConnectionId, room: RoomId) {
        let JoinOutcome { previous, existing } = self.directory.join(id, room.clone());

        if let Some(previous) = previous {
            self.announce_departure(id, &previous);
        }

        info!("Connection {} joined room '{}' ({} already there)", id, room, existing.len());
        self.registry.set_state(&id, SessionState::Joined(room));

        self.deliver(&id, ServerMessage::ExistingUsers(existing.clone()));
        for member in existing {
            self.deliver(&member, ServerMessage::UserConnected(id));
        }
    }

    fn leave(&mut self, id: ConnectionId) {
        let Some(room) = self.directory.leave(&id) else {
            debug!("Connection {} asked to leave but is not in a room", id);
            return;
        };

        info!("Connection {} left room '{}'", id, room);
        self.registry.set_state(&id, SessionState::Unjoined);
        self.announce_departure(id, &room);
    }

    fn relay(&self, to: ConnectionId, message: ServerMessage) {
        if !self.deliver(&to, message) {
            warn!("Relay target {} is gone, dropped", to);
        }
    }

    fn chat(&self, from: ConnectionId, text: String) {
        let Some(SessionState::Joined(room)) = self.registry.state(&from) else {
            warn!("Chat from {} outside any room, dropped", from);
            return;
        };

        for member in self.directory.members_of(&room, Some(&from)) {
            self.deliver(
                &member,
                ServerMessage::ChatMessage {
                    text: text.clone(),
                    sender_id: from,
                },
            );
        }
    }

    /// Tells everyone still in `room` that `id` is gone.
    pub(super) fn announce_departure(&self, id: ConnectionId, room: &RoomId) {
        for member in self.directory.members_of(room, Some(&id)) {
            self.deliver(&member, ServerMessage::UserDisconnected(id));
        }
    }

    /// Queues `message` for `to`. Returns `false` if `to` cannot be reached.
    pub(super) fn deliver(&self, to: &ConnectionId, message: ServerMessage) -> bool {
        match self.registry.resolve(to) {
            Some(handle) => handle.send(message),
            None => false,
        }
    }
}
