use anyhow::Context;
use clinic_config::EmailConfig;
use clinic_email_impl::{EmailServiceImpl, SmtpCredentials};

/// Set up the SMTP transport. No connection is opened until the first message
/// or ping.
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    let credentials = match (&config.username, &config.password) {
        (Some(username), Some(password)) => Some(SmtpCredentials {
            username: username.clone(),
            password: password.clone(),
        }),
        (None, None) => None,
        _ => anyhow::bail!("SMTP username and password must be set together"),
    };

    EmailServiceImpl::new(&config.smtp_url, config.from.clone(), credentials)
        .context("Failed to set up SMTP transport")
}
