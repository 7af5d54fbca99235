use std::{collections::BTreeMap, sync::Arc};

use anyhow::Context;
use clinic_extern_contracts::ContactApiService;
use clinic_models::contact::{
    ContactField, ContactValidationErrors, RawContactSubmission, SubmissionResult,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct ContactApiServiceImpl {
    config: ContactApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ContactApiServiceConfig {
    /// Url of the `POST /contact` endpoint
    pub endpoint: Arc<Url>,
}

impl ContactApiServiceConfig {
    pub fn new(base_url: &Url) -> anyhow::Result<Self> {
        let endpoint = base_url
            .join("contact")
            .with_context(|| format!("Invalid base url {base_url}"))?;

        Ok(Self {
            endpoint: endpoint.into(),
        })
    }
}

impl ContactApiServiceImpl {
    pub fn new(config: ContactApiServiceConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            client: HttpClient::new()?,
        })
    }
}

impl ContactApiService for ContactApiServiceImpl {
    async fn submit(&self, submission: RawContactSubmission) -> anyhow::Result<SubmissionResult> {
        let response = self
            .client
            .post((*self.config.endpoint).clone())
            .json(&SubmitRequest::from(&submission))
            .send()
            .await?;

        // the endpoint answers with a submission result for every outcome
        let status = response.status();
        debug!(%status, "contact submission answered");

        response
            .json::<SubmitResponse>()
            .await
            .map(Into::into)
            .with_context(|| format!("Unexpected response to contact submission ({status})"))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitRequest<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    preferred_time: &'a str,
    message: &'a str,
    honeypot: &'a str,
}

impl<'a> From<&'a RawContactSubmission> for SubmitRequest<'a> {
    fn from(value: &'a RawContactSubmission) -> Self {
        Self {
            name: value.get(ContactField::Name),
            email: value.get(ContactField::Email),
            phone: value.get(ContactField::Phone),
            preferred_time: value.get(ContactField::PreferredTime),
            message: value.get(ContactField::Message),
            honeypot: value.get(ContactField::Honeypot),
        }
    }
}

#[derive(Deserialize)]
struct SubmitResponse {
    success: bool,
    message: String,
    #[serde(default)]
    errors: Option<BTreeMap<String, Vec<String>>>,
}

impl From<SubmitResponse> for SubmissionResult {
    fn from(value: SubmitResponse) -> Self {
        Self {
            success: value.success,
            message: value.message,
            errors: value.errors.map(|errors| {
                errors
                    .into_iter()
                    .filter_map(|(field, messages)| Some((field.parse().ok()?, messages)))
                    .collect::<ContactValidationErrors>()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn config_endpoint() {
        let base = "http://127.0.0.1:8000/api/".parse().unwrap();
        let config = ContactApiServiceConfig::new(&base).unwrap();
        assert_eq!(config.endpoint.as_str(), "http://127.0.0.1:8000/api/contact");
    }

    #[test]
    fn request_field_names() {
        let raw = RawContactSubmission {
            preferred_time: Some("evening".into()),
            ..Default::default()
        };

        let json = serde_json::to_value(SubmitRequest::from(&raw)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "",
                "email": "",
                "phone": "",
                "preferredTime": "evening",
                "message": "",
                "honeypot": "",
            })
        );
    }

    #[test]
    fn unknown_error_fields_are_ignored() {
        let response = serde_json::from_value::<SubmitResponse>(serde_json::json!({
            "success": false,
            "message": "Please correct the errors below.",
            "errors": {
                "preferredTime": ["Please select a preferred contact time"],
                "captcha": ["Wrong answer"],
            },
        }))
        .unwrap();

        let result = SubmissionResult::from(response);

        assert_eq!(
            result.errors.unwrap().fields().collect::<Vec<_>>(),
            [ContactField::PreferredTime]
        );
    }
}
