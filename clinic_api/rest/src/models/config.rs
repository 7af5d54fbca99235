use clinic_core_config_contracts::{BookingScript, SiteConfig};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Serialize)]
pub struct ApiSiteConfig {
    /// Phone number shown to visitors
    pub phone: String,
    pub booking: Option<ApiBookingScript>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBookingScript {
    pub business_id: String,
    pub script_url: Url,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiBookingEmbed {
    pub url: Url,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiBookingQuery {
    pub service: Option<String>,
}

impl From<SiteConfig> for ApiSiteConfig {
    fn from(value: SiteConfig) -> Self {
        Self {
            phone: value.phone,
            booking: value.booking.map(Into::into),
        }
    }
}

impl From<BookingScript> for ApiBookingScript {
    fn from(value: BookingScript) -> Self {
        Self {
            business_id: value.business_id,
            script_url: value.script_url,
        }
    }
}
