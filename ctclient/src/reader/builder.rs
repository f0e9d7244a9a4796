// ctclient-rs/ctclient/src/reader/builder.rs

use crate::config::ClientConfig;
use crate::reader::ReaderHandle;
use crate::registry::ReaderRegistry;
use crate::transport::Connector;
use crate::Result;

/// Helper to connect readers with optional configuration. Without explicit
/// registry or connector the builder falls back to the status file and the
/// socket directory named by its `ClientConfig`.
pub struct ReaderBuilder {
    config: ClientConfig,
    registry: Option<Box<dyn ReaderRegistry>>,
    connector: Option<Box<dyn Connector>>,
}

impl Default for ReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderBuilder {
    /// Builder on `ClientConfig::default()`
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            registry: None,
            connector: None,
        }
    }

    /// Start from `ClientConfig::from_env()`.
    pub fn from_env() -> Self {
        Self::new().with_config(ClientConfig::from_env())
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Enumerate readers through `registry`.
    pub fn with_registry(mut self, registry: Box<dyn ReaderRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Provide an already-created connector (e.g. MockConnector)
    pub fn with_connector(mut self, connector: Box<dyn Connector>) -> Self {
        self.connector = Some(connector);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Read the current reader list through the configured registry.
    pub fn readers(&self) -> Result<Vec<crate::types::ReaderInfo>> {
        self.with_parts(|registry, _| registry.readers())
    }

    /// Connect to reader `reader`. The builder can be reused for further
    /// connections.
    pub fn connect(&self, reader: usize) -> Result<ReaderHandle> {
        self.config.validate()?;
        self.with_parts(|registry, connector| ReaderHandle::connect(reader, registry, connector))
    }

    fn with_parts<T>(
        &self,
        f: impl FnOnce(&dyn ReaderRegistry, &dyn Connector) -> Result<T>,
    ) -> Result<T> {
        #[cfg(feature = "socket")]
        let default_registry;
        let registry: &dyn ReaderRegistry = match &self.registry {
            Some(r) => r.as_ref(),
            None => {
                #[cfg(feature = "socket")]
                {
                    default_registry =
                        crate::registry::StatusFileRegistry::new(self.config.status_path());
                    &default_registry
                }
                #[cfg(not(feature = "socket"))]
                {
                    return Err(crate::Error::InvalidArgument(
                        "no reader registry configured".into(),
                    ));
                }
            }
        };

        #[cfg(all(unix, feature = "socket"))]
        let default_connector;
        let connector: &dyn Connector = match &self.connector {
            Some(c) => c.as_ref(),
            None => {
                #[cfg(all(unix, feature = "socket"))]
                {
                    default_connector =
                        crate::transport::SocketConnector::new(self.config.clone());
                    &default_connector
                }
                #[cfg(not(all(unix, feature = "socket")))]
                {
                    return Err(crate::Error::InvalidArgument(
                        "no connector configured".into(),
                    ));
                }
            }
        };

        f(registry, connector)
    }
}
