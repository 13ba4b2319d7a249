//! Flag event bus - registration and dispatch

use std::sync::Arc;

use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};
use tracing::debug;

use super::types::{FlagChangeEvent, HookResult, PostChangeCallback, PreChangeCallback};

new_key_type! {
    /// Key for registered listeners, used for removal
    pub struct ListenerKey;
}

enum Listener {
    Pre(PreChangeCallback),
    Post(PostChangeCallback),
}

/// Registry of claim flag change listeners
///
/// Pre-change listeners run in registration order and may veto the change.
/// Post-change listeners run after the store write.
#[derive(Default)]
pub struct FlagEventBus {
    listeners: RwLock<SlotMap<ListenerKey, Listener>>,
}

impl FlagEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener called before a flag change commits
    ///
    /// # Returns
    /// A key that can be used to unregister the listener via [`remove`](Self::remove).
    pub fn on_pre_change<F>(&self, callback: F) -> ListenerKey
    where
        F: Fn(&FlagChangeEvent) -> HookResult + Send + Sync + 'static,
    {
        self.listeners.write().insert(Listener::Pre(Arc::new(callback)))
    }

    /// Register a listener called after a flag change committed
    pub fn on_post_change<F>(&self, callback: F) -> ListenerKey
    where
        F: Fn(&FlagChangeEvent) + Send + Sync + 'static,
    {
        self.listeners.write().insert(Listener::Post(Arc::new(callback)))
    }

    /// Remove a listener by its key
    ///
    /// Returns `true` if the listener was found and removed.
    pub fn remove(&self, key: ListenerKey) -> bool {
        self.listeners.write().remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    /// Run pre-change listeners
    ///
    /// Returns the strongest result seen. `Stop` ends dispatch immediately.
    /// Listeners registered or removed during dispatch take effect on the next fire.
    pub fn fire_pre(&self, event: &FlagChangeEvent) -> HookResult {
        let mut result = HookResult::Continue;

        for callback in self.pre_listeners() {
            let hook_result = callback(event);
            if hook_result > result {
                result = hook_result;
            }
            if hook_result == HookResult::Stop {
                debug!("Flag change to {} stopped by listener", event.key);
                break;
            }
        }
        result
    }

    /// Run post-change listeners
    pub fn fire_post(&self, event: &FlagChangeEvent) {
        for callback in self.post_listeners() {
            callback(event);
        }
    }

    // No lock is held while listeners run
    fn pre_listeners(&self) -> Vec<PreChangeCallback> {
        self.listeners
            .read()
            .values()
            .filter_map(|listener| match listener {
                Listener::Pre(callback) => Some(callback.clone()),
                Listener::Post(_) => None,
            })
            .collect()
    }

    fn post_listeners(&self) -> Vec<PostChangeCallback> {
        self.listeners
            .read()
            .values()
            .filter_map(|listener| match listener {
                Listener::Post(callback) => Some(callback.clone()),
                Listener::Pre(_) => None,
            })
            .collect()
    }
}

impl std::fmt::Debug for FlagEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagEventBus")
            .field("listeners", &self.len())
            .finish()
    }
}
