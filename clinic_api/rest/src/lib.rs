use std::net::IpAddr;

use anyhow::Context;
use axum::Router;
use clinic_core_config_contracts::ConfigFeatureService;
use clinic_core_contact_contracts::ContactFeatureService;
use clinic_core_health_contracts::HealthFeatureService;
use tokio::net::TcpListener;
use tracing::info;

mod extractors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Config, Contact> {
    health: Health,
    config: Config,
    contact: Contact,
}

impl<Health, Config, Contact> RestServer<Health, Config, Contact>
where
    Health: HealthFeatureService,
    Config: ConfigFeatureService,
    Contact: ContactFeatureService,
{
    pub fn new(health: Health, config: Config, contact: Contact) -> Self {
        Self {
            health,
            config,
            contact,
        }
    }

    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        self.serve_with_listener(listener).await
    }

    pub async fn serve_with_listener(self, listener: TcpListener) -> anyhow::Result<()> {
        let addr = listener.local_addr()?;
        info!("Starting REST API server on {addr}");

        let router = self.router();
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::config::router(self.config.into()))
            .merge(routes::contact::router(self.contact.into()));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
