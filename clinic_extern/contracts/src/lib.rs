use std::future::Future;

use clinic_models::contact::{RawContactSubmission, SubmissionResult};

/// Client side of the contact form transport.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactApiService: Send + Sync + 'static {
    /// Send the form fields to the submission endpoint.
    ///
    /// Fails only if the endpoint could not be reached or did not answer with
    /// a submission result.
    fn submit(
        &self,
        submission: RawContactSubmission,
    ) -> impl Future<Output = anyhow::Result<SubmissionResult>> + Send;
}

#[cfg(feature = "mock")]
impl MockContactApiService {
    pub fn with_submit(
        mut self,
        submission: RawContactSubmission,
        result: SubmissionResult,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_submit_error(mut self, submission: RawContactSubmission) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(|_| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "connection reset by peer"
                ))))
            });
        self
    }
}
