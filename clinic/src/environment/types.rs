use clinic_core_config_impl::ConfigFeatureServiceImpl;
use clinic_core_contact_impl::ContactFeatureServiceImpl;
use clinic_core_health_impl::HealthFeatureServiceImpl;
use clinic_email_impl::EmailServiceImpl;

// API
pub type RestServer = clinic_api_rest::RestServer<HealthFeature, ConfigFeature, ContactFeature>;

// Email
pub type Email = EmailServiceImpl;

// Core
pub type ConfigFeature = ConfigFeatureServiceImpl;
pub type ContactFeature = ContactFeatureServiceImpl<Email>;
pub type HealthFeature = HealthFeatureServiceImpl<Email>;
