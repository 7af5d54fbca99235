use std::{sync::Arc, time::Duration};

use clinic_core_health_contracts::{HealthFeatureService, HealthStatus};
use clinic_email_contracts::EmailService;
use tokio::{sync::RwLock, time::Instant};
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl<Email> {
    email: Email,
    config: HealthFeatureConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: Instant,
}

impl<Email> HealthFeatureServiceImpl<Email> {
    pub fn new(email: Email, config: HealthFeatureConfig) -> Self {
        Self {
            email,
            config,
            state: Default::default(),
        }
    }
}

impl<Email> HealthFeatureService for HealthFeatureServiceImpl<Email>
where
    Email: EmailService,
{
    async fn get_status(&self) -> HealthStatus {
        let fresh = |cached: &&CachedStatus| cached.timestamp.elapsed() < self.config.cache_ttl;

        if let Some(cached) = self.state.cache.read().await.as_ref().filter(fresh) {
            return cached.status;
        }

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard.as_ref().filter(fresh) {
            return cached.status;
        }

        let email = self
            .email
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping smtp server: {err}"))
            .is_ok();

        let status = HealthStatus { email };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: Instant::now(),
            })
            .status
    }
}

#[cfg(test)]
mod tests {
    use clinic_email_contracts::MockEmailService;

    use super::*;

    fn config() -> HealthFeatureConfig {
        HealthFeatureConfig {
            cache_ttl: Duration::from_secs(10),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn healthy() {
        // Arrange
        let email = MockEmailService::new().with_ping(true);

        let sut = HealthFeatureServiceImpl::new(email, config());

        // Act
        let result = sut.get_status().await;

        // Assert
        assert_eq!(result, HealthStatus { email: true });
        assert!(result.ok());
    }

    #[tokio::test(start_paused = true)]
    async fn unhealthy() {
        // Arrange
        let email = MockEmailService::new().with_ping(false);

        let sut = HealthFeatureServiceImpl::new(email, config());

        // Act
        let result = sut.get_status().await;

        // Assert
        assert_eq!(result, HealthStatus { email: false });
        assert!(!result.ok());
    }

    #[tokio::test(start_paused = true)]
    async fn cached_until_ttl_expires() {
        // Arrange
        let mut email = MockEmailService::new();
        let mut seq = mockall::Sequence::new();
        email
            .expect_ping()
            .once()
            .in_sequence(&mut seq)
            .return_once(|| Box::pin(std::future::ready(Ok(()))));
        email
            .expect_ping()
            .once()
            .in_sequence(&mut seq)
            .return_once(|| Box::pin(std::future::ready(Err(anyhow::anyhow!("down")))));

        let sut = HealthFeatureServiceImpl::new(email, config());

        // Act
        let first = sut.get_status().await;
        tokio::time::advance(Duration::from_secs(9)).await;
        let cached = sut.get_status().await;
        tokio::time::advance(Duration::from_secs(2)).await;
        let refreshed = sut.get_status().await;

        // Assert
        assert!(first.email);
        assert!(cached.email);
        assert!(!refreshed.email);
    }
}
