//! In-memory permission store
//!
//! A [`PermissionStore`] backed by a concurrent map, keyed by
//! `(layer, subject, context set)`. Used when no host permission service is
//! available, and by tests.

use std::collections::HashMap;

use dashmap::DashMap;
use griefprevention_api::{ContextSet, Subject, Tristate};
use griefprevention_host::{DataLayer, PermissionStore};

type BucketKey = (DataLayer, Subject, ContextSet);

/// Permission store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryPermissionStore {
    buckets: DashMap<BucketKey, HashMap<String, bool>>,
}

impl MemoryPermissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored entries across all buckets
    pub fn entry_count(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.value().len()).sum()
    }
}

impl PermissionStore for MemoryPermissionStore {
    fn get_permissions(
        &self,
        subject: &Subject,
        contexts: &ContextSet,
        layer: DataLayer,
    ) -> HashMap<String, bool> {
        self.buckets
            .get(&(layer, subject.clone(), contexts.clone()))
            .map(|bucket| bucket.value().clone())
            .unwrap_or_default()
    }

    fn set_permission(
        &self,
        subject: &Subject,
        contexts: &ContextSet,
        key: &str,
        value: Tristate,
        layer: DataLayer,
    ) -> bool {
        let bucket_key = (layer, subject.clone(), contexts.clone());
        match value.as_option() {
            Some(value) => {
                self.buckets
                    .entry(bucket_key)
                    .or_default()
                    .insert(key.to_string(), value);
            }
            None => {
                let now_empty = match self.buckets.get_mut(&bucket_key) {
                    Some(mut bucket) => {
                        bucket.remove(key);
                        bucket.is_empty()
                    }
                    None => false,
                };
                if now_empty {
                    self.buckets.remove_if(&bucket_key, |_, bucket| bucket.is_empty());
                }
            }
        }
        true
    }

    fn clear_permissions(&self, contexts: &ContextSet) -> usize {
        let mut removed = 0;
        self.buckets.retain(|(_, _, bucket_contexts), bucket| {
            if bucket_contexts == contexts {
                removed += bucket.len();
                false
            } else {
                true
            }
        });
        removed
    }

    fn clear_subject_permissions(
        &self,
        subject: &Subject,
        contexts: &ContextSet,
        layer: DataLayer,
    ) -> usize {
        self.buckets
            .remove(&(layer, subject.clone(), contexts.clone()))
            .map(|(_, bucket)| bucket.len())
            .unwrap_or(0)
    }
}
