use crate::error::RouterError;
use crate::signaling::{RouterCommand, RouterStats};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};

/// Cloneable entry point into a running [`SignalingRouter`](crate::SignalingRouter).
#[derive(Clone)]
pub struct RouterHandle {
    tx: mpsc::Sender<RouterCommand>,
}

impl RouterHandle {
    pub fn new(tx: mpsc::Sender<RouterCommand>) -> Self {
        Self { tx }
    }

    pub async fn send(&self, cmd: RouterCommand) -> Result<(), RouterError> {
        self.tx.send(cmd).await.map_err(|_| RouterError::Stopped)
    }

    /// Non-waiting variant for contexts that cannot `.await`, such as `Drop`.
    pub fn try_send(&self, cmd: RouterCommand) -> Result<(), RouterError> {
        self.tx.try_send(cmd).map_err(|e| match e {
            TrySendError::Full(_) => RouterError::Busy,
            TrySendError::Closed(_) => RouterError::Stopped,
        })
    }

    pub async fn stats(&self) -> Result<RouterStats, RouterError> {
        let (reply, rx) = oneshot::channel();
        self.send(RouterCommand::Stats { reply }).await?;
        rx.await.map_err(|_| RouterError::Stopped)
    }

    /// Clears all state and stops the router. Waits until that has happened.
    pub async fn shutdown(&self) -> Result<(), RouterError> {
        let (reply, rx) = oneshot::channel();
        self.send(RouterCommand::Shutdown { reply }).await?;
        rx.await.map_err(|_| RouterError::Stopped)
    }
}
