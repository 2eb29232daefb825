use crate::modules::email::application::domain::ActivationMail;
use crate::modules::email::application::ports::outgoing::{
    ActivationNotificationError, ActivationNotifier, EmailSendError, EmailSender,
};
use std::fmt;
use std::sync::Arc;

const ACTIVATION_SUBJECT: &str = "Activate your account";

/// Renders user-facing mail and hands it to an [`EmailSender`].
#[derive(Clone)]
pub struct UserEmailService {
    sender: Arc<dyn EmailSender>,
}

impl fmt::Debug for UserEmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEmailService")
            .field("sender", &"<dyn EmailSender>")
            .finish()
    }
}

impl UserEmailService {
    pub fn new(sender: Arc<dyn EmailSender>) -> Self {
        Self { sender }
    }

    fn activation_body(url: &str) -> String {
        format!(
            "<div>\
             <h1>Welcome!</h1>\
             <p>Follow the link below to activate your account:</p>\
             <p><a href=\"{url}\">{url}</a></p>\
             </div>"
        )
    }
}

#[async_trait::async_trait]
impl ActivationNotifier for UserEmailService {
    async fn send_activation_mail(
        &self,
        mail: &ActivationMail,
    ) -> Result<(), ActivationNotificationError> {
        let body = Self::activation_body(&mail.activation_url);

        self.sender
            .send_email(&mail.to, ACTIVATION_SUBJECT, &body)
            .await
            .map_err(|e| match e {
                EmailSendError::InvalidAddress(msg) => {
                    ActivationNotificationError::InvalidRecipient(msg)
                }
                other => ActivationNotificationError::EmailSendingFailed(other.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::{mock, predicate::*};

    mock! {
        pub EmailSenderMock {}
        #[async_trait]
        impl EmailSender for EmailSenderMock {
            async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailSendError>;
        }
    }

    fn mail() -> ActivationMail {
        ActivationMail::new(
            "buyer@example.com",
            "http://localhost:5000/api/user/activate/abc",
        )
    }

    #[test]
    fn test_email_service_debug_format() {
        let service = UserEmailService::new(Arc::new(MockEmailSenderMock::new()));

        assert_eq!(
            format!("{:?}", service),
            "UserEmailService { sender: \"<dyn EmailSender>\" }"
        );
    }

    #[tokio::test]
    async fn test_activation_mail_contains_link() {
        let mut sender = MockEmailSenderMock::new();
        sender
            .expect_send_email()
            .with(
                eq("buyer@example.com"),
                eq(ACTIVATION_SUBJECT),
                function(|body: &str| body.contains("http://localhost:5000/api/user/activate/abc")),
            )
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = UserEmailService::new(Arc::new(sender));

        assert!(service.send_activation_mail(&mail()).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_address_maps_to_invalid_recipient() {
        let mut sender = MockEmailSenderMock::new();
        sender
            .expect_send_email()
            .times(1)
            .returning(|_, _, _| Err(EmailSendError::InvalidAddress("to: bad".to_string())));

        let service = UserEmailService::new(Arc::new(sender));

        assert!(matches!(
            service.send_activation_mail(&mail()).await,
            Err(ActivationNotificationError::InvalidRecipient(_))
        ));
    }

    #[tokio::test]
    async fn test_transport_error_maps_to_sending_failed() {
        let mut sender = MockEmailSenderMock::new();
        sender
            .expect_send_email()
            .times(1)
            .returning(|_, _, _| Err(EmailSendError::Transport("timeout".to_string())));

        let service = UserEmailService::new(Arc::new(sender));

        assert!(matches!(
            service.send_activation_mail(&mail()).await,
            Err(ActivationNotificationError::EmailSendingFailed(_))
        ));
    }
}
