use std::sync::Arc;

use crate::config::server::ServerConfig;
use crate::ws::hub::Hub;

/// Shared resources handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub hub: Arc<Hub>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            hub: Hub::from_config(&config),
            config,
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(ServerConfig::default())
    }
}
