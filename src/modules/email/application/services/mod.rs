pub mod activation_outbox;
pub mod email_service;

pub use activation_outbox::{ActivationOutbox, DeadLetter, OutboxConfig, OutboxStats, OutboxWorker};
pub use email_service::UserEmailService;
