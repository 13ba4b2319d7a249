//! GriefPrevention Host - Collaborator Interfaces and Global Storage
//!
//! This crate defines everything the flag engine needs from the server it
//! runs in:
//! - The permission store that holds flag values
//! - Claims, with their inheritance chain and edit checks
//! - Command callers and their permission nodes
//! - Block/item/entity/command registries for target validation
//!
//! # Architecture
//!
//! Collaborators are assembled once during plugin load via
//! [`HostServicesBuilder`] and may be installed process-wide with
//! [`init_host`]. The flag engine can also be given a [`HostServices`]
//! bundle directly, which is what tests do.
//!
//! # Thread Safety
//!
//! The main server thread ID is stored for runtime checks via
//! [`is_main_thread()`]. Flag mutations are expected to run there.

pub mod caller;
pub mod claim;
pub mod error;
pub mod globals;
pub mod loader;
pub mod registry;
pub mod store;

pub use caller::Caller;
pub use claim::Claim;
pub use error::HostError;
pub use globals::{host, init_host, is_host_initialized, is_main_thread, try_host, HostServices};
pub use loader::{HostServicesBuilder, DEFAULT_NAMESPACE};
pub use registry::{GameRegistry, StaticRegistry};
pub use store::{DataLayer, PermissionStore};
