use std::future::Future;

use clinic_models::contact::{RawContactSubmission, SubmissionResult};

/// Shown to bots that filled in the honeypot field.
pub const SPAM_SUCCESS_MESSAGE: &str = "Thank you for your message!";
pub const SUCCESS_MESSAGE: &str = "Thank you for your message! We'll be in touch soon.";
pub const INVALID_MESSAGE: &str = "Please correct the errors below.";
/// Shown when a submission could not be processed at all.
pub const UNEXPECTED_FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";

pub fn failure_message(phone: &str) -> String {
    format!("Something went wrong. Please try again or call us directly at {phone}.")
}

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate a contact form submission and forward it to the clinic.
    ///
    /// Every outcome, including spam, invalid input and delivery failures, is
    /// reported through the returned [`SubmissionResult`].
    fn submit(
        &self,
        submission: RawContactSubmission,
    ) -> impl Future<Output = SubmissionResult> + Send;
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        submission: RawContactSubmission,
        result: SubmissionResult,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
