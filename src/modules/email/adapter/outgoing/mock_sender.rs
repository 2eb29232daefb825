use crate::modules::email::application::ports::outgoing::{EmailSendError, EmailSender};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Keeps messages in memory instead of delivering them. Used when no SMTP
/// server is configured and in tests.
#[derive(Debug, Clone, Default)]
pub struct MockEmailSender {
    sent_emails: Arc<Mutex<Vec<SentEmail>>>,
    failures_left: Arc<AtomicUsize>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first `count` sends fail with a transport error.
    pub fn failing_first(count: usize) -> Self {
        let sender = Self::default();
        sender.failures_left.store(count, Ordering::SeqCst);
        sender
    }

    pub fn get_sent_emails(&self) -> Vec<SentEmail> {
        self.sent_emails
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailSendError> {
        let should_fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(EmailSendError::Transport("simulated failure".to_string()));
        }

        tracing::info!(to, subject, "Email captured (no SMTP transport configured)");
        self.sent_emails
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SentEmail {
                to: to.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_sent_emails() {
        let sender = MockEmailSender::new();

        sender.send_email("a@example.com", "Hi", "<p>Body</p>").await.unwrap();

        let sent = sender.get_sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@example.com");
    }

    #[tokio::test]
    async fn test_failing_first_then_succeeds() {
        let sender = MockEmailSender::failing_first(2);

        assert!(sender.send_email("a@example.com", "s", "b").await.is_err());
        assert!(sender.send_email("a@example.com", "s", "b").await.is_err());
        assert!(sender.send_email("a@example.com", "s", "b").await.is_ok());
        assert_eq!(sender.get_sent_emails().len(), 1);
    }
}
