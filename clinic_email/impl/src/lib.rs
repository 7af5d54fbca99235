use anyhow::{anyhow, Context};
use clinic_email_contracts::{Email, EmailService};
use clinic_models::email_address::EmailAddressWithName;
use clinic_utils::Apply;
use lettre::{
    message::{header::ContentType, MessageBuilder},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

/// Login for the SMTP relay, kept out of the connection url.
#[derive(Clone)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl EmailServiceImpl {
    pub fn new(
        url: &str,
        from: EmailAddressWithName,
        credentials: Option<SmtpCredentials>,
    ) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)
            .context("Invalid smtp url")?
            .apply_map(credentials, |builder, SmtpCredentials { username, password }| {
                builder.credentials(Credentials::new(username, password))
            })
            .build();

        Ok(Self { from, transport })
    }

    fn message(&self, email: Email) -> anyhow::Result<Message> {
        Message::builder()
            .from(self.from.0.clone())
            .to(email.recipient.0)
            .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
            .subject(email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.body)
            .map_err(Into::into)
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let message = self.message(email)?;

        let response = self.transport.send(message).await?;
        debug!(code = %response.code(), "smtp server accepted message");

        Ok(response.is_positive())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email {
            recipient: "Front Desk <frontdesk@example.com>".parse().unwrap(),
            subject: "New contact form submission from Jane Doe".into(),
            body: "Name: Jane Doe\r\nPhone: 0821234567\r\n".into(),
            reply_to: Some("Jane Doe <jane@example.com>".parse().unwrap()),
        }
    }

    async fn sut() -> EmailServiceImpl {
        EmailServiceImpl::new(
            "smtp://localhost:2525",
            "Clinic Website <noreply@example.com>".parse().unwrap(),
            Some(SmtpCredentials {
                username: "clinic".into(),
                password: "hunter2".into(),
            }),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn message_headers() {
        // Arrange
        let sut = sut().await;

        // Act
        let message = sut.message(email()).unwrap();

        // Assert
        let formatted = String::from_utf8(message.formatted()).unwrap();
        let header = |name: &str| {
            formatted
                .lines()
                .find(|line| line.starts_with(name))
                .unwrap_or_else(|| panic!("missing {name} header"))
                .to_owned()
        };
        assert!(header("From: ").contains("<noreply@example.com>"));
        assert!(header("To: ").contains("<frontdesk@example.com>"));
        assert!(header("Reply-To: ").contains("<jane@example.com>"));
        assert_eq!(
            header("Subject: "),
            "Subject: New contact form submission from Jane Doe"
        );
        assert!(header("Content-Type: ").contains("text/plain"));
        assert!(formatted.contains("Name: Jane Doe\r\nPhone: 0821234567"));
    }

    #[tokio::test]
    async fn message_without_reply_to() {
        let sut = sut().await;

        let message = sut
            .message(Email {
                reply_to: None,
                ..email()
            })
            .unwrap();

        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(!formatted.contains("Reply-To:"));
    }

    #[test]
    fn credentials_are_redacted() {
        let credentials = SmtpCredentials {
            username: "clinic".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{credentials:?}").contains("hunter2"));
    }

    #[tokio::test]
    async fn invalid_url() {
        let result = EmailServiceImpl::new(
            "http://localhost",
            "noreply@example.com".parse().unwrap(),
            None,
        );
        assert!(result.is_err());
    }
}
