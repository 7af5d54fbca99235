use std::collections::BTreeMap;

use clinic_extern_contracts::ContactApiService;
use clinic_models::contact::{self, ContactField, RawContactSubmission, SubmissionResult};
use tracing::{debug, warn};

use crate::{display::FieldDisplay, field::FieldValidationState};

/// Banner shown when the submission endpoint could not be reached.
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Something went wrong. Please check your connection and try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    Editing { banner: Option<String> },
    Submitting,
    /// Terminal, the form is replaced by the message.
    Success { message: String },
}

/// State machine driving the contact form.
///
/// Fields are validated on blur against the shared schema. A submit attempt
/// only reaches the network if every visible field passes, and the result of
/// the attempt is merged back into the field states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    fields: BTreeMap<ContactField, FieldValidationState>,
    phase: FormPhase,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            fields: ContactField::ALL
                .into_iter()
                .map(|field| (field, FieldValidationState::default()))
                .collect(),
            phase: FormPhase::Editing { banner: None },
        }
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn state(&self, field: ContactField) -> &FieldValidationState {
        &self.fields[&field]
    }

    pub fn submit_disabled(&self) -> bool {
        !matches!(self.phase, FormPhase::Editing { .. })
    }

    pub fn field(&self, field: ContactField) -> FieldDisplay<'_> {
        let state = self.state(field);
        let error = state.error.as_deref().filter(|_| state.show_error());

        FieldDisplay {
            name: field.as_str(),
            value: &state.value,
            error,
            show_success: state.show_success(),
            invalid: error.is_some(),
            disabled: self.submit_disabled(),
        }
    }

    /// Current values of all fields, honeypot included.
    pub fn payload(&self) -> RawContactSubmission {
        let mut raw = RawContactSubmission::default();
        for (&field, state) in &self.fields {
            raw.set(field, state.value.clone());
        }
        raw
    }

    pub fn set_value(&mut self, field: ContactField, value: impl Into<String>) {
        if self.submit_disabled() {
            return;
        }

        self.state_mut(field).value = value.into();
    }

    pub fn blur(&mut self, field: ContactField) {
        if self.submit_disabled() {
            return;
        }

        let error = self.first_error(field);
        let state = self.state_mut(field);
        state.touched = true;
        state.error = error;
    }

    /// Start a submit attempt.
    ///
    /// Returns the payload to send, or `None` if the form is not editable or
    /// one of the visible fields is invalid. The honeypot is not checked here.
    pub fn begin_submit(&mut self) -> Option<RawContactSubmission> {
        if self.submit_disabled() {
            return None;
        }

        let mut valid = true;
        for field in ContactField::VISIBLE {
            let error = self.first_error(field);
            valid &= error.is_none();

            let state = self.state_mut(field);
            state.touched = true;
            state.error = error;
        }

        if !valid {
            debug!("contact form has invalid fields, not submitting");
            return None;
        }

        self.phase = FormPhase::Submitting;
        Some(self.payload())
    }

    pub fn finish_submit(&mut self, result: SubmissionResult) {
        if self.phase != FormPhase::Submitting {
            return;
        }

        if result.success {
            self.phase = FormPhase::Success {
                message: result.message,
            };
            return;
        }

        for (field, messages) in result.errors.into_iter().flatten() {
            let Some(message) = messages.into_iter().next() else {
                continue;
            };
            let state = self.state_mut(field);
            state.touched = true;
            state.error = Some(message);
        }

        self.phase = FormPhase::Editing {
            banner: Some(result.message),
        };
    }

    pub fn fail_submit(&mut self) {
        if self.phase != FormPhase::Submitting {
            return;
        }

        self.phase = FormPhase::Editing {
            banner: Some(TRANSPORT_FAILURE_MESSAGE.into()),
        };
    }

    /// Run a complete submit attempt against `api`.
    ///
    /// Returns whether a request was sent.
    pub async fn submit(&mut self, api: &impl ContactApiService) -> bool {
        let Some(payload) = self.begin_submit() else {
            return false;
        };

        match api.submit(payload).await {
            Ok(result) => self.finish_submit(result),
            Err(err) => {
                warn!("Failed to submit contact form: {err:#}");
                self.fail_submit();
            }
        }

        true
    }

    fn first_error(&self, field: ContactField) -> Option<String> {
        contact::validate_field(&self.payload(), field)
            .into_iter()
            .next()
    }

    fn state_mut(&mut self, field: ContactField) -> &mut FieldValidationState {
        self.fields.entry(field).or_default()
    }
}

#[cfg(test)]
mod tests {
    use clinic_demo::contact::{JANE, JANE_RAW};
    use clinic_extern_contracts::MockContactApiService;
    use clinic_models::contact::{messages, ContactValidationErrors};
    use clinic_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        for field in ContactField::ALL {
            form.set_value(field, JANE_RAW.get(field));
        }
        form
    }

    #[test]
    fn initial_state() {
        let form = ContactForm::new();

        assert_eq!(form.phase(), &FormPhase::Editing { banner: None });
        assert!(!form.submit_disabled());
        for field in ContactField::ALL {
            assert_eq!(form.state(field), &FieldValidationState::default());
        }
    }

    #[test]
    fn blur_validates_single_field() {
        // Arrange
        let mut form = ContactForm::new();
        form.set_value(ContactField::Email, "not-an-email");

        // Act
        form.blur(ContactField::Email);

        // Assert
        assert_eq!(
            form.state(ContactField::Email),
            &FieldValidationState {
                value: "not-an-email".into(),
                touched: true,
                error: Some(messages::EMAIL_INVALID.into()),
            }
        );
        assert!(!form.state(ContactField::Name).touched);
        assert_eq!(form.state(ContactField::Name).error, None);
    }

    #[test]
    fn blur_valid_field_shows_success() {
        // Arrange
        let mut form = ContactForm::new();
        form.set_value(ContactField::Name, "Jane Doe");

        // Act
        form.blur(ContactField::Name);

        // Assert
        let display = form.field(ContactField::Name);
        assert!(display.show_success);
        assert!(!display.invalid);
        assert_eq!(display.error, None);
    }

    #[test]
    fn field_hides_untouched_error() {
        // Arrange
        let mut form = ContactForm::new();
        form.state_mut(ContactField::Name).error = Some(messages::NAME_REQUIRED.into());

        // Act
        let display = form.field(ContactField::Name);

        // Assert
        assert_eq!(display.error, None);
        assert!(!display.invalid);
    }

    #[test]
    fn blur_keeps_first_message() {
        // Arrange
        let mut form = ContactForm::new();
        form.set_value(ContactField::Phone, "12ab");

        // Act
        form.blur(ContactField::Phone);

        // Assert
        assert_eq!(
            form.state(ContactField::Phone).error.as_deref(),
            Some(messages::PHONE_TOO_SHORT)
        );
    }

    #[test]
    fn begin_submit_invalid_stays_editing() {
        // Arrange
        let mut form = filled();
        form.set_value(ContactField::Message, "hi");

        // Act
        let payload = form.begin_submit();

        // Assert
        assert_eq!(payload, None);
        assert_eq!(form.phase(), &FormPhase::Editing { banner: None });
        assert_eq!(
            form.field(ContactField::Message).error,
            Some(messages::MESSAGE_TOO_SHORT)
        );
        for field in ContactField::VISIBLE {
            assert!(form.state(field).touched);
        }
        assert!(!form.state(ContactField::Honeypot).touched);
    }

    #[test]
    fn begin_submit_valid() {
        // Arrange
        let mut form = filled();

        // Act
        let payload = form.begin_submit();

        // Assert
        assert_eq!(payload.as_ref(), Some(&*JANE_RAW));
        assert_eq!(form.phase(), &FormPhase::Submitting);
        assert!(form.submit_disabled());
        assert!(form.field(ContactField::Name).disabled);
    }

    #[test]
    fn begin_submit_ignores_honeypot() {
        // Arrange
        let mut form = filled();
        form.set_value(ContactField::Honeypot, "spam");

        // Act
        let payload = form.begin_submit().unwrap();

        // Assert
        assert_eq!(payload.honeypot.as_deref(), Some("spam"));
    }

    #[test]
    fn duplicate_submit_is_blocked() {
        // Arrange
        let mut form = filled();
        form.begin_submit().unwrap();

        // Act
        let second = form.begin_submit();

        // Assert
        assert_eq!(second, None);
        assert_eq!(form.phase(), &FormPhase::Submitting);
    }

    #[test]
    fn edits_are_ignored_while_submitting() {
        // Arrange
        let mut form = filled();
        form.begin_submit().unwrap();

        // Act
        form.set_value(ContactField::Name, "John");
        form.blur(ContactField::Name);

        // Assert
        assert_eq!(form.state(ContactField::Name).value, "Jane Doe");
    }

    #[test]
    fn finish_submit_success_is_terminal() {
        // Arrange
        let mut form = filled();
        form.begin_submit().unwrap();

        // Act
        form.finish_submit(SubmissionResult::success("Thanks!"));

        // Assert
        assert_eq!(
            form.phase(),
            &FormPhase::Success {
                message: "Thanks!".into()
            }
        );
        assert_eq!(form.begin_submit(), None);
        form.fail_submit();
        assert_matches!(form.phase(), FormPhase::Success { .. });
    }

    #[test]
    fn finish_submit_merges_server_errors() {
        // Arrange
        let mut form = filled();
        form.begin_submit().unwrap();
        // a client error the server does not report stays in place
        form.state_mut(ContactField::Phone).error = Some("client".into());

        let errors = ContactValidationErrors::from_iter([
            (ContactField::Email, vec!["server email".into(), "second".into()]),
            (ContactField::Name, vec![]),
        ]);

        // Act
        form.finish_submit(SubmissionResult::invalid("Please fix", errors));

        // Assert
        assert_eq!(
            form.phase(),
            &FormPhase::Editing {
                banner: Some("Please fix".into())
            }
        );
        assert_eq!(form.field(ContactField::Email).error, Some("server email"));
        assert_eq!(form.field(ContactField::Phone).error, Some("client"));
        assert_eq!(form.field(ContactField::Name).error, None);
        assert!(form.field(ContactField::Name).show_success);
    }

    #[test]
    fn finish_submit_failure_allows_retry() {
        // Arrange
        let mut form = filled();
        form.begin_submit().unwrap();

        // Act
        form.finish_submit(SubmissionResult::failure("call us"));

        // Assert
        assert_eq!(
            form.phase(),
            &FormPhase::Editing {
                banner: Some("call us".into())
            }
        );
        assert_eq!(form.begin_submit().as_ref(), Some(&*JANE_RAW));
    }

    #[test]
    fn finish_submit_outside_submitting_is_ignored() {
        let mut form = filled();

        form.finish_submit(SubmissionResult::success("Thanks!"));

        assert_eq!(form.phase(), &FormPhase::Editing { banner: None });
    }

    #[test]
    fn fail_submit() {
        // Arrange
        let mut form = filled();
        form.begin_submit().unwrap();

        // Act
        form.fail_submit();

        // Assert
        assert_eq!(
            form.phase(),
            &FormPhase::Editing {
                banner: Some(TRANSPORT_FAILURE_MESSAGE.into())
            }
        );
        assert!(!form.submit_disabled());
    }

    #[tokio::test]
    async fn submit_ok() {
        // Arrange
        let api = MockContactApiService::new().with_submit(
            RawContactSubmission::from(&*JANE),
            SubmissionResult::success("Thank you for your message! We'll be in touch soon."),
        );
        let mut form = filled();

        // Act
        let sent = form.submit(&api).await;

        // Assert
        assert!(sent);
        assert_eq!(
            form.phase(),
            &FormPhase::Success {
                message: "Thank you for your message! We'll be in touch soon.".into()
            }
        );
    }

    #[tokio::test]
    async fn submit_invalid_does_not_send() {
        // Arrange
        let api = MockContactApiService::new();
        let mut form = ContactForm::new();

        // Act
        let sent = form.submit(&api).await;

        // Assert
        assert!(!sent);
        assert_eq!(
            form.field(ContactField::Name).error,
            Some(messages::NAME_REQUIRED)
        );
    }

    #[tokio::test]
    async fn submit_transport_error() {
        // Arrange
        let api = MockContactApiService::new().with_submit_error(JANE_RAW.clone());
        let mut form = filled();

        // Act
        let sent = form.submit(&api).await;

        // Assert
        assert!(sent);
        assert_eq!(
            form.phase(),
            &FormPhase::Editing {
                banner: Some(TRANSPORT_FAILURE_MESSAGE.into())
            }
        );
    }
}
