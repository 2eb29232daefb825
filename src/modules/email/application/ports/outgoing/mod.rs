pub mod activation_notifier;
pub mod email_sender;

pub use activation_notifier::{ActivationNotificationError, ActivationNotifier};
pub use email_sender::{EmailSendError, EmailSender};
