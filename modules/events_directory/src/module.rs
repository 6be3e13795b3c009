use std::sync::Arc;

use runtime::AppConfig;
use tracing::{debug, info};

use crate::config::DirectoryConfig;
use crate::contract::client::EventsDirectoryApi;
use crate::domain::events::DirectoryEvent;
use crate::domain::ports::EventPublisher;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::EventsDirectoryLocalClient;
use crate::infra::publisher::TracingEventPublisher;
use crate::infra::storage::{InMemoryEventsRepository, InMemoryUsersRepository};

/// Key of this module's section in the application config bag.
pub const MODULE_NAME: &str = "events_directory";

/// Assembled directory: in-memory registries wired to the domain service.
#[derive(Clone)]
pub struct EventsDirectory {
    service: Arc<Service>,
}

impl EventsDirectory {
    pub fn new(cfg: &DirectoryConfig) -> Self {
        Self::with_publisher(cfg, Arc::new(TracingEventPublisher))
    }

    /// Same as `new`, with a caller-provided sink for domain events.
    pub fn with_publisher(
        cfg: &DirectoryConfig,
        publisher: Arc<dyn EventPublisher<DirectoryEvent>>,
    ) -> Self {
        debug!(
            "Loaded events_directory config: max_rating={}, enforce_capacity={}",
            cfg.max_rating, cfg.enforce_capacity
        );

        // Wire repositories (infra) to domain service (ports)
        let service = Service::new(
            Arc::new(InMemoryUsersRepository::new()),
            Arc::new(InMemoryEventsRepository::new()),
            publisher,
            ServiceConfig::from(cfg),
        );

        info!("Events directory initialized");
        Self {
            service: Arc::new(service),
        }
    }

    /// Build from the `events_directory` section of the application config.
    pub fn from_app_config(app: &AppConfig) -> anyhow::Result<Self> {
        let cfg: DirectoryConfig = app.module_config(MODULE_NAME)?;
        Ok(Self::new(&cfg))
    }

    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// In-process client for UI-facing callers.
    pub fn client(&self) -> Arc<dyn EventsDirectoryApi> {
        Arc::new(EventsDirectoryLocalClient::new(self.service()))
    }
}
