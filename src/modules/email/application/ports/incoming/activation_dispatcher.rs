use crate::modules::email::application::domain::ActivationMail;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Activation queue is full")]
    QueueFull,

    #[error("Activation queue is closed")]
    Closed,
}

/// Hands activation mail off for delivery without waiting on the transport.
pub trait ActivationDispatcher: Send + Sync {
    fn enqueue(&self, mail: ActivationMail) -> Result<(), DispatchError>;
}
