use crate::config::SmtpSettings;
use crate::error::Result;
use crate::sender::{EmailSender, OutboundEmail, SendReport};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use uuid::Uuid;

/// SMTP sender over lettre's async transport. STARTTLS against a relay in
/// production; plain connection for local relays such as Mailpit.
pub struct SmtpSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    host: String,
}

impl SmtpSender {
    pub fn new(settings: &SmtpSettings) -> Result<Self> {
        let mut builder = if settings.use_starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
        };

        builder = builder
            .port(settings.port)
            .timeout(Some(Duration::from_secs(settings.timeout_secs)));

        if !settings.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from: settings.from.parse()?,
            host: settings.host.clone(),
        })
    }
}

#[async_trait]
impl EmailSender for SmtpSender {
    async fn send(&self, email: OutboundEmail) -> Result<SendReport> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(email.to.parse()?)
            .subject(email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.body)?;

        let response = self.transport.send(message).await?;

        if response.is_positive() {
            // SMTP reports no message id; synthesize one for the caller.
            Ok(SendReport::delivered(format!(
                "<{}@{}>",
                Uuid::new_v4(),
                self.host
            )))
        } else {
            Ok(SendReport::rejected(
                "smtp_rejected",
                format!("smtp reply {:?}", response.code()),
            ))
        }
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
