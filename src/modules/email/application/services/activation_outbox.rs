use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError, WeakSender};
use tokio::task::JoinHandle;

use crate::modules::email::application::domain::ActivationMail;
use crate::modules::email::application::ports::incoming::{ActivationDispatcher, DispatchError};
use crate::modules::email::application::ports::outgoing::ActivationNotifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboxConfig {
    pub capacity: usize,
    pub max_attempts: u32,
    pub base_delay: Duration,
    /// How often dead letters are put back on the queue. `None` disables it.
    pub retry_interval: Option<Duration>,
    /// Oldest dead letters are dropped past this size.
    pub dead_letter_capacity: usize,
}

impl Default for OutboxConfig {
    fn default() -> Self {
        Self {
            capacity: 256,
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            retry_interval: Some(Duration::from_secs(300)),
            dead_letter_capacity: 1024,
        }
    }
}

impl OutboxConfig {
    /// Reads `OUTBOX_CAPACITY`, `OUTBOX_MAX_ATTEMPTS`, `OUTBOX_BASE_DELAY_MS`,
    /// `OUTBOX_RETRY_INTERVAL_SECS` (0 disables) and `OUTBOX_DEAD_LETTER_CAPACITY`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let read = |key: &str| std::env::var(key).ok().and_then(|v| v.parse::<u64>().ok());

        Self {
            capacity: read("OUTBOX_CAPACITY")
                .map(|v| v.max(1) as usize)
                .unwrap_or(defaults.capacity),
            max_attempts: read("OUTBOX_MAX_ATTEMPTS")
                .map(|v| v.clamp(1, 10) as u32)
                .unwrap_or(defaults.max_attempts),
            base_delay: read("OUTBOX_BASE_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.base_delay),
            retry_interval: match read("OUTBOX_RETRY_INTERVAL_SECS") {
                Some(0) => None,
                Some(secs) => Some(Duration::from_secs(secs)),
                None => defaults.retry_interval,
            },
            dead_letter_capacity: read("OUTBOX_DEAD_LETTER_CAPACITY")
                .map(|v| v.max(1) as usize)
                .unwrap_or(defaults.dead_letter_capacity),
        }
    }

    /// Delay after the `attempt`-th failure: `base_delay * 2^(attempt - 1)`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OutboxStats {
    pub enqueued: u64,
    pub delivered: u64,
    pub failed: u64,
    pub rejected: u64,
    /// Dead letters evicted because the list was full.
    pub dropped: u64,
}

impl OutboxStats {
    /// Mails accepted but neither delivered nor dead-lettered yet.
    pub fn pending(&self) -> u64 {
        self.enqueued.saturating_sub(self.delivered + self.failed)
    }
}

/// A mail that exhausted its attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadLetter {
    pub mail: ActivationMail,
    pub attempts: u32,
    pub last_error: String,
}

struct Shared {
    enqueued: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
    rejected: AtomicU64,
    dropped: AtomicU64,
    dead_letter_capacity: usize,
    dead_letters: Mutex<VecDeque<DeadLetter>>,
}

impl Shared {
    fn new(dead_letter_capacity: usize) -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            dead_letter_capacity: dead_letter_capacity.max(1),
            dead_letters: Mutex::new(VecDeque::new()),
        }
    }

    fn dead_letters(&self) -> std::sync::MutexGuard<'_, VecDeque<DeadLetter>> {
        self.dead_letters.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push_dead_letter(&self, letter: DeadLetter) {
        let mut letters = self.dead_letters();
        while letters.len() >= self.dead_letter_capacity {
            if let Some(evicted) = letters.pop_front() {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::error!(to = %evicted.mail.to, "Dead-letter list full, oldest mail dropped");
            }
        }
        letters.push_back(letter);
    }
}

/// Bounded queue in front of the activation mail transport.
///
/// `enqueue` never waits: when the queue is full the mail is rejected and
/// counted. A single [`OutboxWorker`] drains the queue, retrying each mail
/// with exponential backoff before moving it to the dead-letter list.
#[derive(Clone)]
pub struct ActivationOutbox {
    sender: mpsc::Sender<ActivationMail>,
    shared: Arc<Shared>,
}

impl fmt::Debug for ActivationOutbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationOutbox")
            .field("stats", &self.stats())
            .finish()
    }
}

pub struct OutboxWorker {
    receiver: mpsc::Receiver<ActivationMail>,
    notifier: Arc<dyn ActivationNotifier>,
    config: OutboxConfig,
    shared: Arc<Shared>,
}

impl ActivationOutbox {
    pub fn new(config: OutboxConfig, notifier: Arc<dyn ActivationNotifier>) -> (Self, OutboxWorker) {
        let (sender, receiver) = mpsc::channel(config.capacity.max(1));
        let shared = Arc::new(Shared::new(config.dead_letter_capacity));

        let outbox = Self {
            sender,
            shared: shared.clone(),
        };
        let worker = OutboxWorker {
            receiver,
            notifier,
            config,
            shared,
        };

        (outbox, worker)
    }

    /// Build the outbox and run its worker on the current runtime.
    pub fn spawn(
        config: OutboxConfig,
        notifier: Arc<dyn ActivationNotifier>,
    ) -> (Self, JoinHandle<()>) {
        let (outbox, worker) = Self::new(config, notifier);
        let handle = tokio::spawn(worker.run());
        (outbox, handle)
    }

    pub fn stats(&self) -> OutboxStats {
        OutboxStats {
            enqueued: self.shared.enqueued.load(Ordering::Relaxed),
            delivered: self.shared.delivered.load(Ordering::Relaxed),
            failed: self.shared.failed.load(Ordering::Relaxed),
            rejected: self.shared.rejected.load(Ordering::Relaxed),
            dropped: self.shared.dropped.load(Ordering::Relaxed),
        }
    }

    pub fn dead_letters(&self) -> Vec<DeadLetter> {
        self.shared.dead_letters().iter().cloned().collect()
    }

    pub fn drain_dead_letters(&self) -> Vec<DeadLetter> {
        self.shared.dead_letters().drain(..).collect()
    }

    /// Put every dead letter back on the queue. Letters that do not fit stay
    /// in the dead-letter list. Returns how many were re-queued.
    pub fn retry_dead_letters(&self) -> usize {
        let letters = self.drain_dead_letters();
        let mut requeued = 0;
        let mut kept = Vec::new();

        for letter in letters {
            match self.enqueue(letter.mail.clone()) {
                Ok(()) => requeued += 1,
                Err(_) => kept.push(letter),
            }
        }

        for letter in kept {
            self.shared.push_dead_letter(letter);
        }
        requeued
    }

    /// Re-queue dead letters every `interval`.
    ///
    /// The task holds only a weak handle on the queue, so it never keeps the
    /// worker alive and ends once every outbox handle is gone.
    pub fn spawn_retry_loop(&self, interval: Duration) -> JoinHandle<()> {
        let weak: WeakSender<ActivationMail> = self.sender.downgrade();
        let shared = self.shared.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(sender) = weak.upgrade() else {
                    break;
                };
                let outbox = ActivationOutbox {
                    sender,
                    shared: shared.clone(),
                };
                if outbox.shared.dead_letters().is_empty() {
                    continue;
                }
                let requeued = outbox.retry_dead_letters();
                tracing::info!(requeued, "Dead activation mails re-queued");
            }
        })
    }

    /// Close this handle and wait up to `grace` for the worker to deliver
    /// what is already queued. Returns `false` if the worker had to be
    /// aborted; the mails still pending are logged.
    pub async fn shutdown(self, mut worker: JoinHandle<()>, grace: Duration) -> bool {
        let shared = self.shared.clone();
        drop(self);

        if tokio::time::timeout(grace, &mut worker).await.is_ok() {
            return true;
        }

        worker.abort();
        let enqueued = shared.enqueued.load(Ordering::Relaxed);
        let settled = shared.delivered.load(Ordering::Relaxed) + shared.failed.load(Ordering::Relaxed);
        tracing::error!(
            pending = enqueued.saturating_sub(settled),
            "Activation outbox worker aborted with mails still queued"
        );
        false
    }
}

impl ActivationDispatcher for ActivationOutbox {
    fn enqueue(&self, mail: ActivationMail) -> Result<(), DispatchError> {
        match self.sender.try_send(mail) {
            Ok(()) => {
                self.shared.enqueued.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(TrySendError::Full(mail)) => {
                self.shared.rejected.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(to = %mail.to, "Activation queue full, mail rejected");
                Err(DispatchError::QueueFull)
            }
            Err(TrySendError::Closed(mail)) => {
                self.shared.rejected.fetch_add(1, Ordering::Relaxed);
                tracing::error!(to = %mail.to, "Activation queue closed, mail rejected");
                Err(DispatchError::Closed)
            }
        }
    }
}

impl OutboxWorker {
    /// Runs until every [`ActivationOutbox`] handle has been dropped and the
    /// queue is empty.
    pub async fn run(mut self) {
        tracing::info!(
            capacity = self.config.capacity,
            max_attempts = self.config.max_attempts,
            "Activation outbox worker started"
        );

        while let Some(mail) = self.receiver.recv().await {
            self.deliver(mail).await;
        }

        tracing::info!("Activation outbox worker stopped");
    }

    async fn deliver(&self, mail: ActivationMail) {
        let max_attempts = self.config.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            match self.notifier.send_activation_mail(&mail).await {
                Ok(()) => {
                    self.shared.delivered.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(to = %mail.to, attempt, "Activation mail delivered");
                    return;
                }
                Err(e) => {
                    last_error = e.to_string();
                    if attempt < max_attempts {
                        let delay = self.config.backoff(attempt);
                        tracing::warn!(
                            to = %mail.to,
                            attempt,
                            max_attempts,
                            retry_in_ms = delay.as_millis() as u64,
                            error = %e,
                            "Activation mail attempt failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        tracing::error!(
            to = %mail.to,
            attempts = max_attempts,
            error = %last_error,
            "Activation mail moved to dead letters"
        );
        self.shared.failed.fetch_add(1, Ordering::Relaxed);
        self.shared.push_dead_letter(DeadLetter {
            mail,
            attempts: max_attempts,
            last_error,
        });
    }
}
