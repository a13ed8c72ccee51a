//! Best-effort notification email delivery.
//!
//! Emails are pushed onto a bounded queue and sent by a single background
//! worker. Enqueueing never blocks a request: when the queue is full or the
//! worker is gone the email is dropped with a warning. There is no retry and
//! no feedback to the requester.

use std::future::Future;
use std::str::FromStr;

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::types::EmailAddress;
use crate::models::config::EmailConfig;

/// Which notification an email carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailKind {
    /// Forwarded submission for the site owner.
    Contact,
    /// Acknowledgement sent back to the submitter.
    ContactReply,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub kind: EmailKind,
    pub to: EmailAddress,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("invalid mailbox: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Delivery backend used by the worker.
pub trait Mailer: Send + Sync + 'static {
    fn send(&self, email: OutgoingEmail) -> impl Future<Output = Result<(), EmailError>> + Send;
}

/// Sends through an SMTP relay with STARTTLS (implicit TLS on port 465).
pub struct SmtpMailer {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(host: &str, config: &EmailConfig) -> Result<Self, EmailError> {
        let from = Mailbox::from_str(&config.from_address)?;
        let builder = if config.smtp_port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
        };
        let builder = builder.port(config.smtp_port);
        let builder = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                builder.credentials(Credentials::new(username.clone(), password.clone()))
            }
            _ => builder,
        };

        Ok(Self {
            from,
            transport: builder.build(),
        })
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(Mailbox::from_str(email.to.as_str())?)
            .subject(email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.body)?;
        self.transport.send(message).await?;
        Ok(())
    }
}

/// Records emails in the log instead of sending them.
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        log::info!(
            "Email ({:?}) to {}: {}\n{}",
            email.kind,
            email.to,
            email.subject,
            email.body
        );
        Ok(())
    }
}

/// Handle for submitting emails to the background worker.
#[derive(Clone)]
pub struct EmailQueue {
    sender: mpsc::Sender<OutgoingEmail>,
}

impl EmailQueue {
    /// Create a queue holding at most `capacity` pending emails, returning the
    /// receiving end for [`run_worker`].
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<OutgoingEmail>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Create a queue and spawn its worker on the current actix runtime.
    pub fn start<M: Mailer>(mailer: M, capacity: usize) -> Self {
        let (queue, receiver) = Self::new(capacity);
        actix_web::rt::spawn(run_worker(receiver, mailer));
        queue
    }

    /// Hand `email` to the worker. Returns `false` when it was dropped.
    pub fn enqueue(&self, email: OutgoingEmail) -> bool {
        match self.sender.try_send(email) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(email)) => {
                log::warn!(
                    "Email queue full, dropping {:?} email to {}",
                    email.kind,
                    email.to
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(email)) => {
                log::warn!(
                    "Email worker stopped, dropping {:?} email to {}",
                    email.kind,
                    email.to
                );
                false
            }
        }
    }
}

/// Drain `receiver`, sending each email once. Ends when every queue handle
/// has been dropped.
pub async fn run_worker<M: Mailer>(mut receiver: mpsc::Receiver<OutgoingEmail>, mailer: M) {
    while let Some(email) = receiver.recv().await {
        let kind = email.kind;
        let to = email.to.clone();
        match mailer.send(email).await {
            Ok(()) => log::info!("Sent {kind:?} email to {to}"),
            Err(e) => log::error!("Failed to send {kind:?} email to {to}: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingMailer {
        sent: Arc<Mutex<Vec<OutgoingEmail>>>,
        fail: bool,
    }

    impl Mailer for RecordingMailer {
        async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError> {
            if self.fail {
                return Err(EmailError::Address(
                    "broken".parse::<Mailbox>().unwrap_err(),
                ));
            }
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }

    fn email(to: &str) -> OutgoingEmail {
        OutgoingEmail {
            kind: EmailKind::Contact,
            to: EmailAddress::new(to).unwrap(),
            subject: "Hello".into(),
            body: "Body".into(),
        }
    }

    #[actix_web::test]
    async fn worker_sends_queued_emails_in_order() {
        let mailer = RecordingMailer::default();
        let (queue, receiver) = EmailQueue::new(4);

        assert!(queue.enqueue(email("a@example.com")));
        assert!(queue.enqueue(email("b@example.com")));
        drop(queue);
        run_worker(receiver, mailer.clone()).await;

        let sent = mailer.sent.lock().unwrap();
        let recipients: Vec<&str> = sent.iter().map(|e| e.to.as_str()).collect();
        assert_eq!(recipients, vec!["a@example.com", "b@example.com"]);
    }

    #[actix_web::test]
    async fn worker_survives_delivery_failures() {
        let mailer = RecordingMailer {
            fail: true,
            ..RecordingMailer::default()
        };
        let (queue, receiver) = EmailQueue::new(4);

        assert!(queue.enqueue(email("a@example.com")));
        drop(queue);
        run_worker(receiver, mailer.clone()).await;

        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn full_queue_drops_instead_of_blocking() {
        let (queue, _receiver) = EmailQueue::new(1);

        assert!(queue.enqueue(email("a@example.com")));
        assert!(!queue.enqueue(email("b@example.com")));
    }

    #[test]
    fn closed_queue_drops() {
        let (queue, receiver) = EmailQueue::new(1);
        drop(receiver);

        assert!(!queue.enqueue(email("a@example.com")));
    }
}
