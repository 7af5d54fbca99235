use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use clinic_core_config_contracts::ConfigFeatureService;

use super::error;
use crate::models::config::{ApiBookingEmbed, ApiBookingQuery, ApiSiteConfig};

pub fn router(service: Arc<impl ConfigFeatureService>) -> Router<()> {
    Router::new()
        .route("/config", routing::get(get_site_config))
        .route("/config/booking", routing::get(get_booking_url))
        .with_state(service)
}

async fn get_site_config(service: State<Arc<impl ConfigFeatureService>>) -> Response {
    Json(ApiSiteConfig::from(service.get_site_config())).into_response()
}

async fn get_booking_url(
    service: State<Arc<impl ConfigFeatureService>>,
    Query(query): Query<ApiBookingQuery>,
) -> Response {
    match service.get_booking_url(query.service) {
        Some(url) => Json(ApiBookingEmbed { url }).into_response(),
        None => error(StatusCode::NOT_FOUND, "Booking widget not configured"),
    }
}
