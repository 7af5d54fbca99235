use std::{panic::AssertUnwindSafe, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use clinic_core_contact_contracts::{ContactFeatureService, UNEXPECTED_FAILURE_MESSAGE};
use clinic_models::contact::SubmissionResult;
use futures::FutureExt;
use tracing::error;

use crate::{extractors::submission::ContactPayload, models::contact::ApiSubmissionResult};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/contact", routing::post(submit))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    ContactPayload(submission): ContactPayload,
) -> Response {
    let result = AssertUnwindSafe(service.submit(submission.into()))
        .catch_unwind()
        .await
        .unwrap_or_else(|_| {
            error!("contact service panicked");
            SubmissionResult::failure(UNEXPECTED_FAILURE_MESSAGE)
        });

    submission_result(result)
}

fn submission_result(result: SubmissionResult) -> Response {
    let code = match (&result.success, &result.errors) {
        (true, _) => StatusCode::OK,
        (false, Some(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        (false, None) => StatusCode::SERVICE_UNAVAILABLE,
    };

    (code, Json(ApiSubmissionResult::from(result))).into_response()
}
