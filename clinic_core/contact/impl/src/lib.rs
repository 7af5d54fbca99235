use std::{panic::AssertUnwindSafe, sync::Arc};

use clinic_core_contact_contracts::{
    failure_message, ContactFeatureService, INVALID_MESSAGE, SPAM_SUCCESS_MESSAGE, SUCCESS_MESSAGE,
};
use clinic_email_contracts::{Email, EmailService};
use clinic_models::{
    contact::{self, ContactSubmission, RawContactSubmission, SubmissionResult},
    email_address::EmailAddressWithName,
};
use futures::FutureExt;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Email> {
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Inbox receiving the contact form notifications
    pub recipient: Arc<EmailAddressWithName>,
    /// Phone number offered to visitors when a message cannot be delivered
    pub fallback_phone: Arc<str>,
}

#[derive(Debug, Error)]
pub enum ContactSendError {
    #[error("The email provider rejected the message.")]
    Rejected,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl<EmailS> ContactFeatureServiceImpl<EmailS> {
    pub fn new(email: EmailS, config: ContactFeatureConfig) -> Self {
        Self { email, config }
    }
}

impl<EmailS> ContactFeatureService for ContactFeatureServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn submit(&self, submission: RawContactSubmission) -> SubmissionResult {
        AssertUnwindSafe(self.process(submission))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                error!("Contact submission handler panicked");
                SubmissionResult::failure(failure_message(&self.config.fallback_phone))
            })
    }
}

impl<EmailS> ContactFeatureServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn process(&self, submission: RawContactSubmission) -> SubmissionResult {
        if submission.honeypot_filled() {
            debug!("discarding contact submission with filled honeypot");
            return SubmissionResult::success(SPAM_SUCCESS_MESSAGE);
        }

        let submission = match contact::validate(&submission) {
            Ok(submission) => submission,
            Err(errors) => {
                let fields = errors.fields().collect::<Vec<_>>();
                debug!(?fields, "rejecting invalid contact submission");
                return SubmissionResult::invalid(INVALID_MESSAGE, errors);
            }
        };

        match self.send(&submission).await {
            Ok(()) => {
                info!("forwarded contact submission");
                SubmissionResult::success(SUCCESS_MESSAGE)
            }
            Err(err) => {
                error!("Failed to send contact submission: {err:#}");
                SubmissionResult::failure(failure_message(&self.config.fallback_phone))
            }
        }
    }

    async fn send(&self, submission: &ContactSubmission) -> Result<(), ContactSendError> {
        let email = self.notification(submission);

        if !self.email.send(email).await? {
            return Err(ContactSendError::Rejected);
        }

        Ok(())
    }

    fn notification(&self, submission: &ContactSubmission) -> Email {
        let ContactSubmission {
            name,
            email,
            phone,
            preferred_time,
            message,
        } = submission;

        Email {
            recipient: (*self.config.recipient).clone(),
            subject: format!("New contact form submission from {name}"),
            body: format!(
                "You received a new message through the contact form.\n\nName: {name}\nEmail: \
                 {email}\nPhone: {phone}\nPreferred contact time: {}\n\nMessage:\n{message}\n",
                preferred_time.label()
            ),
            reply_to: Some(email.clone().with_name(name.to_string())),
        }
    }
}
