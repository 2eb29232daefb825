use crate::modules::email::application::domain::ActivationMail;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActivationNotificationError {
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

#[async_trait::async_trait]
pub trait ActivationNotifier: Send + Sync {
    async fn send_activation_mail(
        &self,
        mail: &ActivationMail,
    ) -> Result<(), ActivationNotificationError>;
}
