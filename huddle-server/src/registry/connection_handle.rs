use huddle_core::ServerMessage;
use tokio::sync::mpsc;

/// Sending half of a connection's outbound queue.
///
/// The queue is unbounded so the router never waits on a slow socket; the
/// transport's writer task drains the other end.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    tx: mpsc::UnboundedSender<ServerMessage>,
}

impl ConnectionHandle {
    pub fn new(tx: mpsc::UnboundedSender<ServerMessage>) -> Self {
        Self { tx }
    }

    /// Creates a handle together with the receiver its writer should drain.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Queues `msg`. Returns `false` if the writer side has already gone away.
    pub fn send(&self, msg: ServerMessage) -> bool {
        self.tx.send(msg).is_ok()
    }
}
