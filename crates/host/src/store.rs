//! Permission store interface
//!
//! The store is an opaque key-value mapping of
//! `(subject, context set, permission key) -> bool`, split into a transient
//! (session-only) and a persisted data layer. The flag engine never assumes
//! anything beyond "the next get reflects the last set".

use std::collections::HashMap;

use griefprevention_api::{ContextSet, Subject, Tristate};

/// Which half of a subject's data a call addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataLayer {
    /// Session-only data, rebuilt on every startup
    Transient,
    /// Data saved by the host permission service
    Persisted,
}

/// Abstract permission store provided by the host
///
/// Context sets are matched exactly: a value written under `{a}` is not
/// visible when reading `{a, b}`.
pub trait PermissionStore: Send + Sync {
    /// All permissions a subject holds under exactly `contexts`
    fn get_permissions(
        &self,
        subject: &Subject,
        contexts: &ContextSet,
        layer: DataLayer,
    ) -> HashMap<String, bool>;

    /// Set one permission. `Tristate::Undefined` removes the entry.
    ///
    /// Returns `false` if the store rejected the write.
    fn set_permission(
        &self,
        subject: &Subject,
        contexts: &ContextSet,
        key: &str,
        value: Tristate,
        layer: DataLayer,
    ) -> bool;

    /// Remove every entry stored under exactly `contexts`, for all subjects
    /// and both layers. Returns the number of entries removed.
    fn clear_permissions(&self, contexts: &ContextSet) -> usize;

    /// Remove one subject's entries stored under exactly `contexts` in `layer`
    fn clear_subject_permissions(
        &self,
        subject: &Subject,
        contexts: &ContextSet,
        layer: DataLayer,
    ) -> usize;
}
