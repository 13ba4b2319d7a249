//! Error types for host service assembly

/// Error type for host service operations
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// A required collaborator was not supplied to the builder
    #[error("Required host service missing: {0}")]
    MissingService(&'static str),

    /// Host services were already installed
    #[error("Host services already initialized")]
    AlreadyInitialized,

    /// Host services were requested before `init_host`
    #[error("Host services not initialized")]
    NotInitialized,
}
