use crate::config::{AppConfig, JwtConfig};
use crate::session::ShipmentPoller;
use crate::store::{Latency, MockStore, Seed};
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MockStore>,
    pub config: Arc<AppConfig>,
    pub poller: ShipmentPoller,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let seed = if config.seed_demo_data {
            Seed::demo(OffsetDateTime::now_utc())
        } else {
            Seed::empty()
        };
        let latency = if config.simulate_latency {
            Latency::simulated()
        } else {
            Latency::none()
        };
        info!(
            users = seed.users.len(),
            shipments = seed.shipments.len(),
            simulate_latency = config.simulate_latency,
            "mock store ready"
        );
        let store = Arc::new(MockStore::new(seed, latency)?);

        Ok(Self::from_parts(store, config))
    }

    pub fn from_parts(store: Arc<MockStore>, config: Arc<AppConfig>) -> Self {
        let poller = ShipmentPoller::new(store.clone(), config.poll_interval);
        Self {
            store,
            config,
            poller,
        }
    }

    /// Demo data, no latency, fixed JWT settings.
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 60,
            },
            simulate_latency: false,
            seed_demo_data: true,
            poll_interval: crate::session::polling::DEFAULT_POLL_INTERVAL,
        });
        let store = MockStore::new(Seed::demo(OffsetDateTime::now_utc()), Latency::none())
            .expect("demo seed ok");
        let store = Arc::new(store);
        Self::from_parts(store, config)
    }
}
