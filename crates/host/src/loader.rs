//! Host service assembly

use std::sync::Arc;

use crate::error::HostError;
use crate::globals::HostServices;
use crate::{GameRegistry, PermissionStore};

/// Namespace assumed for identifiers entered without one
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Collects the collaborators the host provides before building [`HostServices`]
#[derive(Default)]
pub struct HostServicesBuilder {
    store: Option<Arc<dyn PermissionStore>>,
    registry: Option<Arc<dyn GameRegistry>>,
    namespace: Option<String>,
}

impl HostServicesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Permission store backing all flag reads and writes (required)
    pub fn store(mut self, store: Arc<dyn PermissionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Game registries used for target validation (required)
    pub fn registry(mut self, registry: Arc<dyn GameRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Namespace of the host game (optional, defaults to `minecraft`)
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Build the service bundle
    ///
    /// Fails if a required collaborator is missing.
    #[tracing::instrument(skip_all)]
    pub fn build(self) -> Result<HostServices, HostError> {
        // Required services - fail if any are missing
        let store = self.store.ok_or(HostError::MissingService("permission store"))?;
        let registry = self.registry.ok_or(HostError::MissingService("game registry"))?;

        // Optional settings - log the fallback
        let namespace = match self.namespace {
            Some(ns) => ns,
            None => {
                tracing::debug!("No host namespace given, using '{}'", DEFAULT_NAMESPACE);
                DEFAULT_NAMESPACE.to_string()
            }
        };

        Ok(HostServices::new(store, registry, namespace))
    }
}
