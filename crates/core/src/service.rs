//! Flag service
//!
//! Ties the host collaborators, configuration and flag engine together. One
//! instance lives for the lifetime of the plugin.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use griefprevention_api::{ClaimType, Context, FlagType, Subject, Tristate};
use griefprevention_host::{
    host, Caller, Claim, DataLayer, GameRegistry, HostError, HostServices, PermissionStore,
};
use tracing::{debug, info};

use crate::apply::FlagRequest;
use crate::bans::BanReasons;
use crate::config::GriefPreventionConfig;
use crate::context::resolve_context;
use crate::error::{FlagError, FlagOpResult, FlagResult};
use crate::events::FlagEventBus;
use crate::flags::{encode, key_for, ClaimFlag, DefaultsTable, FlagKey};
use crate::resolve::{FlagLayers, ResolvedEntry};
use crate::session::FlagSession;

/// Claim flag query and mutation entry point
pub struct FlagService {
    store: Arc<dyn PermissionStore>,
    registry: Arc<dyn GameRegistry>,
    namespace: String,
    user_editable: BTreeSet<ClaimFlag>,
    defaults: DefaultsTable,
    events: FlagEventBus,
    bans: BanReasons,
}

impl FlagService {
    /// Build a service from a host bundle and config.
    ///
    /// Ban reasons are kept in memory; see [`with_bans`](Self::with_bans).
    pub fn new(services: &HostServices, config: &GriefPreventionConfig) -> Self {
        Self::with_collaborators(
            services.store.clone(),
            services.registry.clone(),
            services.namespace.clone(),
            config,
        )
    }

    /// Build a service from the globally installed host services
    pub fn from_host(config: &GriefPreventionConfig) -> Result<Self, HostError> {
        Ok(Self::new(host()?, config))
    }

    pub fn with_collaborators(
        store: Arc<dyn PermissionStore>,
        registry: Arc<dyn GameRegistry>,
        namespace: impl Into<String>,
        config: &GriefPreventionConfig,
    ) -> Self {
        config.warn_unknown_flags();
        Self {
            store,
            registry,
            namespace: namespace.into(),
            user_editable: config.user_editable_flags(),
            defaults: config.defaults_table(),
            events: FlagEventBus::new(),
            bans: BanReasons::new(),
        }
    }

    /// Use a file-backed ban reason registry
    pub fn with_bans(mut self, bans: BanReasons) -> Self {
        self.bans = bans;
        self
    }

    pub fn store(&self) -> &dyn PermissionStore {
        &*self.store
    }

    pub fn registry(&self) -> &dyn GameRegistry {
        &*self.registry
    }

    /// Namespace assumed for identifiers without one
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn user_editable(&self) -> &BTreeSet<ClaimFlag> {
        &self.user_editable
    }

    pub fn defaults(&self) -> &DefaultsTable {
        &self.defaults
    }

    pub fn events(&self) -> &FlagEventBus {
        &self.events
    }

    pub fn bans(&self) -> &BanReasons {
        &self.bans
    }

    /// Build a request from command input.
    ///
    /// `flag` is a flag name, `source` and `target` use the encoder syntax and
    /// `scope` is `default`, `override`, `ban` or `None` for the claim itself.
    /// The value starts undefined.
    pub fn request(
        &self,
        claim: &dyn Claim,
        flag: &str,
        source: &str,
        target: &str,
        scope: Option<&str>,
    ) -> FlagOpResult<FlagRequest> {
        let flag =
            ClaimFlag::from_name(flag).ok_or_else(|| FlagError::InvalidFlag(flag.to_string()))?;
        let key = encode(flag, source, target, self.registry(), &self.namespace)?;

        let mut request = FlagRequest::new(key, Tristate::Undefined);
        if let Some(scope) = scope {
            request = request.with_context(resolve_context(claim, scope)?);
        }
        Ok(request)
    }

    /// Fresh snapshot of the layers of `claim` for `subject`
    pub fn layers(&self, subject: &Subject, claim: &dyn Claim) -> FlagLayers {
        FlagLayers::load(self.store(), subject, claim)
    }

    /// Effective value of exactly `key` at `claim`
    pub fn effective_value(
        &self,
        subject: &Subject,
        claim: &dyn Claim,
        key: &FlagKey,
    ) -> ResolvedEntry {
        self.layers(subject, claim).compute_effective(key)
    }

    /// Merged listing of `claim` for `subject`, filtered by layer
    pub fn list_by_type(
        &self,
        subject: &Subject,
        claim: &dyn Claim,
        flag_type: FlagType,
    ) -> BTreeMap<FlagKey, ResolvedEntry> {
        self.layers(subject, claim).list_by_type(flag_type)
    }

    /// Listing for a player's session, switching tab when one is requested
    pub fn list_for_session(
        &self,
        session: &mut FlagSession,
        claim: &dyn Claim,
        flag_type: Option<FlagType>,
    ) -> BTreeMap<FlagKey, ResolvedEntry> {
        if let Some(flag_type) = flag_type {
            session.set_flag_type(flag_type);
        }
        self.list_by_type(session.subject(), claim, session.flag_type())
    }

    /// Whether an action is allowed, as asked by the host's event handlers.
    ///
    /// Resolves the most specific key for the action and falls back through
    /// its parent keys. A subject without a value of its own falls back to
    /// the global subject.
    pub fn query_flag(
        &self,
        subject: &Subject,
        claim: &dyn Claim,
        flag: ClaimFlag,
        source: &str,
        target: &str,
    ) -> FlagOpResult<Tristate> {
        let key = key_for(flag, source, target, &self.namespace)?;

        let entry = self.layers(subject, claim).resolve(&key);
        if entry.is_defined() || *subject == Subject::Global {
            return Ok(entry.value);
        }
        Ok(self.layers(&Subject::Global, claim).resolve(&key).value)
    }

    /// Write the defaults table into the transient DEFAULT layer of the
    /// global subject, returning the number of values written
    pub fn seed_default_permissions(&self) -> usize {
        let mut written = 0;
        for claim_type in ClaimType::ALL {
            let contexts = Context::claim_default(claim_type).into_set();
            for (flag, value) in self.defaults.iter(claim_type) {
                if self.store.set_permission(
                    &Subject::Global,
                    &contexts,
                    &flag.permission(),
                    Tristate::from_bool(value),
                    DataLayer::Transient,
                ) {
                    written += 1;
                }
            }
        }
        info!("Seeded {} default flag permissions", written);
        written
    }

    /// Remove every value scoped to a deleted claim
    pub fn clear_claim_permissions(&self, claim: &dyn Claim) -> usize {
        let removed = self.store.clear_permissions(&claim.context().into_set());
        debug!("Cleared {} flag permissions of claim {}", removed, claim.id());
        removed
    }

    /// Clear the claim's own values for one subject
    pub fn reset_claim_flags(
        &self,
        caller: &dyn Caller,
        subject: &Subject,
        claim: &dyn Claim,
    ) -> FlagResult {
        if caller.is_player() {
            if let Some(reason) = claim.allow_edit(caller) {
                debug!("Flag reset by {} rejected: {}", caller.name(), reason);
                return FlagResult::NoPermission;
            }
        }

        let removed = self.store.clear_subject_permissions(
            subject,
            &claim.context().into_set(),
            DataLayer::Persisted,
        );
        debug!("{} reset {} flags of claim {} for {}", caller.name(), removed, claim.id(), subject);
        FlagResult::Success
    }
}

impl std::fmt::Debug for FlagService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagService")
            .field("namespace", &self.namespace)
            .field("user_editable", &self.user_editable)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
