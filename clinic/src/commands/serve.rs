use clinic_config::Config;
use clinic_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{
    email,
    environment::{self, ConfigProvider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to smtp server");
    let email = email::connect(&config.email)?;
    if let Err(err) = email.ping().await {
        // submissions fall back to the phone number until the relay is back
        warn!("SMTP server is not reachable: {err:#}");
    }

    let server = environment::rest_server(ConfigProvider::new(&config), email);
    server.serve(config.http.host, config.http.port).await
}
