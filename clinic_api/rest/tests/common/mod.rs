#![allow(dead_code, reason = "shared by several test binaries")]

use clinic_api_rest::RestServer;
use clinic_core_config_contracts::{ConfigFeatureService, MockConfigFeatureService};
use clinic_core_contact_contracts::{ContactFeatureService, MockContactFeatureService};
use clinic_core_health_contracts::{HealthFeatureService, MockHealthFeatureService};
use tokio::net::TcpListener;

pub struct Services<Health, Config, Contact> {
    pub health: Health,
    pub config: Config,
    pub contact: Contact,
}

impl Services<MockHealthFeatureService, MockConfigFeatureService, MockContactFeatureService> {
    pub fn mocks() -> Self {
        Self {
            health: MockHealthFeatureService::new(),
            config: MockConfigFeatureService::new(),
            contact: MockContactFeatureService::new(),
        }
    }

    pub fn health(health: MockHealthFeatureService) -> Self {
        Self {
            health,
            ..Self::mocks()
        }
    }

    pub fn config(config: MockConfigFeatureService) -> Self {
        Self {
            config,
            ..Self::mocks()
        }
    }
}

impl<Contact> Services<MockHealthFeatureService, MockConfigFeatureService, Contact> {
    pub fn contact(contact: Contact) -> Self {
        Self {
            health: MockHealthFeatureService::new(),
            config: MockConfigFeatureService::new(),
            contact,
        }
    }
}

/// Start a server on an ephemeral port and return its base url.
pub async fn serve<Health, Config, Contact>(services: Services<Health, Config, Contact>) -> String
where
    Health: HealthFeatureService,
    Config: ConfigFeatureService,
    Contact: ContactFeatureService,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = RestServer::new(services.health, services.config, services.contact);
    tokio::spawn(server.serve_with_listener(listener));

    format!("http://{addr}")
}
