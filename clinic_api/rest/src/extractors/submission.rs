use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use tracing::debug;

use crate::models::contact::{ApiContactSubmission, ApiSubmissionResult};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub const UNREADABLE_MESSAGE: &str = "The submitted form could not be read. Please try again.";

/// Contact form payload sent either as JSON or as a url-encoded form.
pub struct ContactPayload(pub ApiContactSubmission);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for ContactPayload {
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE));

        let payload = if is_form {
            Form::<ApiContactSubmission>::from_request(request, state)
                .await
                .map(|Form(payload)| payload)
                .map_err(|err| err.body_text())
        } else {
            Json::<ApiContactSubmission>::from_request(request, state)
                .await
                .map(|Json(payload)| payload)
                .map_err(|err| err.body_text())
        };

        payload.map(Self).map_err(|err| {
            debug!("rejecting unreadable contact submission: {err}");
            let result = ApiSubmissionResult {
                success: false,
                message: UNREADABLE_MESSAGE.into(),
                errors: None,
            };
            (StatusCode::BAD_REQUEST, Json(result)).into_response()
        })
    }
}
