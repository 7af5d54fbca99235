use std::collections::BTreeMap;

use clinic_models::contact::{RawContactSubmission, SubmissionResult};
use serde::{Deserialize, Serialize};

/// Form payload as posted by the browser. Every field is optional, missing
/// fields are reported by validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub preferred_time: Option<String>,
    pub message: Option<String>,
    pub honeypot: Option<String>,
}

impl From<ApiContactSubmission> for RawContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            preferred_time: value.preferred_time,
            message: value.message,
            honeypot: value.honeypot,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiSubmissionResult {
    pub success: bool,
    pub message: String,
    /// Messages per invalid field, keyed by the field's wire name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<&'static str, Vec<String>>>,
}

impl From<SubmissionResult> for ApiSubmissionResult {
    fn from(value: SubmissionResult) -> Self {
        Self {
            success: value.success,
            message: value.message,
            errors: value.errors.map(|errors| {
                errors
                    .into_iter()
                    .map(|(field, messages)| (field.as_str(), messages))
                    .collect()
            }),
        }
    }
}
