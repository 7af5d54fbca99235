use serde::Serialize;

pub mod config;
pub mod contact;

#[derive(Serialize)]
pub struct ApiError {
    pub detail: &'static str,
}
