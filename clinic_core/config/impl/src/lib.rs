use std::sync::Arc;

use clinic_core_config_contracts::{BookingScript, ConfigFeatureService, SiteConfig};
use clinic_models::booking::BookingWidget;
use url::Url;

#[derive(Debug, Clone)]
pub struct ConfigFeatureServiceImpl {
    config: ConfigFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ConfigFeatureConfig {
    pub phone: Arc<str>,
    pub booking: Option<Arc<BookingWidget>>,
}

impl ConfigFeatureServiceImpl {
    pub fn new(config: ConfigFeatureConfig) -> Self {
        Self { config }
    }
}

impl ConfigFeatureService for ConfigFeatureServiceImpl {
    fn get_site_config(&self) -> SiteConfig {
        SiteConfig {
            phone: self.config.phone.to_string(),
            booking: self.config.booking.as_deref().map(|widget| BookingScript {
                business_id: widget.business_id.clone(),
                script_url: widget.script_url.clone(),
            }),
        }
    }

    fn get_booking_url(&self, service: Option<String>) -> Option<Url> {
        self.config
            .booking
            .as_deref()
            .map(|widget| widget.embed_url_for(service.as_deref()))
    }
}
