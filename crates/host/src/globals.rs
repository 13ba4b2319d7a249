//! Global host service storage
//!
//! Host collaborators are assembled once during plugin load and stored here.
//! Access is thread-safe via OnceLock.

use std::sync::{Arc, OnceLock};
use std::thread::ThreadId;

use crate::error::HostError;
use crate::loader::HostServicesBuilder;
use crate::{GameRegistry, PermissionStore};

/// Collaborators the flag engine calls into
#[derive(Clone)]
pub struct HostServices {
    /// Permission store holding all flag values
    pub store: Arc<dyn PermissionStore>,

    /// Block/item/entity/command registries
    pub registry: Arc<dyn GameRegistry>,

    /// Namespace assumed for identifiers without one
    pub namespace: String,

    /// Main server thread ID for thread safety checks
    pub main_thread_id: ThreadId,
}

/// Global host service storage
static HOST: OnceLock<HostServices> = OnceLock::new();

/// Install host services
///
/// Called once during plugin load. Returns error if already initialized.
pub fn init_host(services: HostServices) -> Result<(), HostError> {
    HOST.set(services).map_err(|_| HostError::AlreadyInitialized)
}

/// Get host services
pub fn host() -> Result<&'static HostServices, HostError> {
    HOST.get().ok_or(HostError::NotInitialized)
}

/// Try to get host services
pub fn try_host() -> Option<&'static HostServices> {
    HOST.get()
}

/// Check if host services are installed
pub fn is_host_initialized() -> bool {
    HOST.get().is_some()
}

/// Check if current thread is the main server thread
pub fn is_main_thread() -> bool {
    HOST.get()
        .map(|h| std::thread::current().id() == h.main_thread_id)
        .unwrap_or(false)
}

impl HostServices {
    /// Create a new service bundle owned by the current thread
    pub fn new(
        store: Arc<dyn PermissionStore>,
        registry: Arc<dyn GameRegistry>,
        namespace: String,
    ) -> Self {
        Self {
            store,
            registry,
            namespace,
            main_thread_id: std::thread::current().id(),
        }
    }

    pub fn builder() -> HostServicesBuilder {
        HostServicesBuilder::new()
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("namespace", &self.namespace)
            .field("main_thread_id", &self.main_thread_id)
            .finish_non_exhaustive()
    }
}
