use std::sync::Arc;

use clinic_config::Config;
use clinic_core_config_impl::{ConfigFeatureConfig, ConfigFeatureServiceImpl};
use clinic_core_contact_impl::{ContactFeatureConfig, ContactFeatureServiceImpl};
use clinic_core_health_impl::{HealthFeatureConfig, HealthFeatureServiceImpl};
use clinic_models::booking::BookingWidget;
use types::{Email, RestServer};

pub mod types;

/// Service configurations derived from the loaded [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    pub config_feature_config: ConfigFeatureConfig,
    pub contact_feature_config: ContactFeatureConfig,
    pub health_feature_config: HealthFeatureConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        let phone: Arc<str> = config.contact.phone.as_str().into();

        let config_feature_config = ConfigFeatureConfig {
            phone: Arc::clone(&phone),
            booking: config.booking.as_ref().map(|booking| {
                Arc::new(BookingWidget {
                    business_id: booking.business_id.clone(),
                    script_url: booking.script_url.clone(),
                    embed_url: booking.embed_url.clone(),
                })
            }),
        };

        let contact_feature_config = ContactFeatureConfig {
            recipient: config.contact.recipient.clone().into(),
            fallback_phone: phone,
        };

        let health_feature_config = HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        Self {
            config_feature_config,
            contact_feature_config,
            health_feature_config,
        }
    }
}

/// Wire all services of the REST server around a single email transport.
pub fn rest_server(config: ConfigProvider, email: Email) -> RestServer {
    let health = HealthFeatureServiceImpl::new(email.clone(), config.health_feature_config);
    let site_config = ConfigFeatureServiceImpl::new(config.config_feature_config);
    let contact = ContactFeatureServiceImpl::new(email, config.contact_feature_config);

    RestServer::new(health, site_config, contact)
}
