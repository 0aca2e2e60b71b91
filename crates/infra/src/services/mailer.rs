use lettre::message::header::ContentType;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Mutex;
use tracing::info;
use tripline_domain::EmailMessage;

/// The outbound mail transport used by the reminder sweep. Implementations
/// report success only when the transport accepted the message; the sweep
/// relies on that to decide whether an itinerary may be flagged as notified.
#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()>;
}

/// Mailer backed by an SMTP relay
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: String,
}

impl SmtpMailer {
    /// Connects without TLS, which is what local relays and sidecar mail
    /// daemons expect. The relay is responsible for upstream security.
    pub fn new(host: &str, port: u16, sender: String) -> Self {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self { transport, sender }
    }
}

#[async_trait::async_trait]
impl IMailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        let email = Message::builder()
            .from(self.sender.parse()?)
            .to(message.to.parse()?)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())?;

        self.transport.send(email).await?;

        Ok(())
    }
}

/// Mailer used when SMTP is not configured. Messages are logged and
/// dropped so that environments without a mail relay can still boot.
pub struct NoopMailer {}

#[async_trait::async_trait]
impl IMailer for NoopMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        info!(
            "SMTP is not configured. Dropping email to: {} with subject: {}",
            message.to, message.subject
        );
        Ok(())
    }
}

/// Recording mailer for tests. Sends succeed and are captured unless the
/// recipient was registered as rejected.
pub struct InMemoryMailer {
    pub sent: Mutex<Vec<EmailMessage>>,
    rejects: Mutex<Vec<String>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            rejects: Mutex::new(Vec::new()),
        }
    }

    /// All sends to this address will fail until `clear_rejects` is called
    pub fn reject_recipient(&self, address: &str) {
        self.rejects.lock().unwrap().push(address.to_string());
    }

    pub fn clear_rejects(&self) {
        self.rejects.lock().unwrap().clear();
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl IMailer for InMemoryMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        if self.rejects.lock().unwrap().contains(&message.to) {
            anyhow::bail!("Mail transport rejected recipient: {}", message.to);
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &str) -> EmailMessage {
        EmailMessage {
            to: to.into(),
            subject: "Your trip starts soon".into(),
            body: "Pack your bags".into(),
        }
    }

    #[tokio::test]
    async fn inmemory_mailer_records_sends() {
        let mailer = InMemoryMailer::new();
        mailer.send(&email("a@example.com")).await.unwrap();
        assert_eq!(mailer.sent_count(), 1);
        assert_eq!(mailer.sent.lock().unwrap()[0].to, "a@example.com");
    }

    #[tokio::test]
    async fn inmemory_mailer_rejects_configured_recipients() {
        let mailer = InMemoryMailer::new();
        mailer.reject_recipient("a@example.com");
        assert!(mailer.send(&email("a@example.com")).await.is_err());
        assert!(mailer.send(&email("b@example.com")).await.is_ok());
        assert_eq!(mailer.sent_count(), 1);

        mailer.clear_rejects();
        assert!(mailer.send(&email("a@example.com")).await.is_ok());
    }
}
