//! Flag mutation pipeline
//!
//! ```text
//! source normalization ──► authorize ──► classify context ──► inherit guard
//!   ──► UI toggle ──► pre-change veto ──► store write ──► ban reason
//!   ──► post-change
//! ```
//!
//! Every failure aborts before the store write and is reported as a
//! [`FlagResult`].

use std::collections::BTreeSet;

use griefprevention_api::{ClaimType, Context, ContextSet, FlagType, Subject, Tristate};
use griefprevention_host::{is_host_initialized, is_main_thread, Caller, Claim, DataLayer};
use tracing::{debug, warn};

use crate::context::{ban_context, ContextKind};
use crate::error::{FlagError, FlagOpResult, FlagResult};
use crate::events::FlagChangeEvent;
use crate::flags::{ClaimFlag, DefaultsTable, FlagKey};
use crate::permissions::nodes;
use crate::resolve::FlagLayers;
use crate::FlagService;

/// A single flag change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagRequest {
    pub key: FlagKey,
    /// Raw source input; `any` and `ns:any` are normalized
    pub source: Option<String>,
    pub value: Tristate,
    /// DEFAULT or OVERRIDE context to write under; the claim's own otherwise
    pub context: Option<Context>,
    /// Layer being edited, classified from the context when absent
    pub flag_type: Option<FlagType>,
    /// Ban reason, recorded for global bans
    pub reason: Option<String>,
    /// Compute the value by toggling the current one
    pub ui_click: bool,
}

impl FlagRequest {
    pub fn new(key: FlagKey, value: Tristate) -> Self {
        Self {
            key,
            source: None,
            value,
            context: None,
            flag_type: None,
            reason: None,
            ui_click: false,
        }
    }

    /// A toggle of the current value, as sent by a listing click
    pub fn toggle(key: FlagKey) -> Self {
        Self {
            ui_click: true,
            ..Self::new(key, Tristate::Undefined)
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_flag_type(mut self, flag_type: FlagType) -> Self {
        self.flag_type = Some(flag_type);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Check that `caller` may change `flag` on `claim` under `context`.
///
/// Three independent gates, all of which must pass:
/// - players must be allowed to edit the claim
/// - the admin or user node for the flag, chosen by admin capability
/// - the defaults or overrides node when writing those contexts
pub fn authorize(
    caller: &dyn Caller,
    claim: &dyn Claim,
    flag: ClaimFlag,
    context: Option<&Context>,
    user_editable: &BTreeSet<ClaimFlag>,
) -> FlagOpResult<()> {
    if caller.is_player() {
        if let Some(reason) = claim.allow_edit(caller) {
            return Err(FlagError::NoPermission(reason));
        }
    }

    if caller.has_permission(nodes::ADMIN_CLAIMS) {
        require(caller, &nodes::admin_flag(flag.name()))?;
    } else if user_editable.contains(&flag) {
        require(caller, &nodes::user_flag(flag.name()))?;
    } else {
        return Err(FlagError::NoPermission(nodes::user_flag(flag.name())));
    }

    match context.and_then(ContextKind::of) {
        Some(ContextKind::Default(_)) => require(caller, nodes::MANAGE_FLAG_DEFAULTS),
        Some(ContextKind::Override(_)) => require(caller, nodes::MANAGE_FLAG_OVERRIDES),
        None => Ok(()),
    }
}

fn require(caller: &dyn Caller, node: &str) -> FlagOpResult<()> {
    if caller.has_permission(node) {
        Ok(())
    } else {
        Err(FlagError::NoPermission(node.to_string()))
    }
}

/// Next value when toggling from a listing.
///
/// CLAIM and OVERRIDE cycle `UNDEFINED -> TRUE -> FALSE -> UNDEFINED`.
/// DEFAULT flips `TRUE -> FALSE` and anything else to `TRUE`, then collapses
/// to `UNDEFINED` when the result equals the built-in default of the bare
/// flag. Other types leave the value unchanged.
pub fn compute_toggle(
    current: Tristate,
    flag_type: FlagType,
    claim_type: ClaimType,
    key: &FlagKey,
    defaults: &DefaultsTable,
) -> Tristate {
    match flag_type {
        FlagType::Claim | FlagType::Override => match current {
            Tristate::Undefined => Tristate::True,
            Tristate::True => Tristate::False,
            Tristate::False => Tristate::Undefined,
        },
        FlagType::Default => {
            let next = current != Tristate::True;
            let builtin = if key.is_bare() {
                defaults.get(claim_type, key.flag())
            } else {
                None
            };
            if builtin == Some(next) {
                Tristate::Undefined
            } else {
                Tristate::from_bool(next)
            }
        }
        FlagType::All | FlagType::Inherit | FlagType::Group | FlagType::Player => current,
    }
}

impl FlagService {
    /// Validate, authorize and commit a flag change
    pub fn apply(
        &self,
        caller: &dyn Caller,
        subject: &Subject,
        claim: &dyn Claim,
        request: FlagRequest,
    ) -> FlagResult {
        match self.try_apply(caller, subject, claim, request) {
            Ok(_) => FlagResult::Success,
            Err(e) => {
                debug!("Flag change by {} rejected: {}", caller.name(), e);
                FlagResult::from(e)
            }
        }
    }

    /// [`apply`](Self::apply), returning the value written
    pub fn try_apply(
        &self,
        caller: &dyn Caller,
        subject: &Subject,
        claim: &dyn Claim,
        request: FlagRequest,
    ) -> FlagOpResult<Tristate> {
        debug_assert!(
            !is_host_initialized() || is_main_thread(),
            "flag changes must run on the main server thread"
        );

        let mut key = request.key;
        if let Some(source) = &request.source {
            key.apply_source(source, self.namespace());
        }

        authorize(
            caller,
            claim,
            key.flag(),
            request.context.as_ref(),
            self.user_editable(),
        )?;

        let kind = request.context.as_ref().and_then(ContextKind::of);
        let (write_context, classified) = match (kind, request.context) {
            (Some(ContextKind::Default(_)), Some(context)) => (context, FlagType::Default),
            (Some(ContextKind::Override(_)), Some(context)) => (context, FlagType::Override),
            _ => (claim.context(), FlagType::Claim),
        };
        let flag_type = request.flag_type.unwrap_or(classified);

        if flag_type == FlagType::Inherit {
            let provenance = FlagLayers::load(self.store(), subject, claim)
                .compute_effective(&key)
                .provenance
                .unwrap_or_else(|| claim.id());
            return Err(FlagError::InheritedEntry(provenance));
        }

        let contexts = write_context.clone().into_set();
        let permission = key.to_permission();

        let value = if request.ui_click {
            let claim_type = match kind {
                Some(ContextKind::Default(claim_type)) => claim_type,
                _ => claim.claim_type(),
            };
            let current = self.stored_value(subject, &contexts, &permission, flag_type);
            compute_toggle(current, flag_type, claim_type, &key, self.defaults())
        } else {
            request.value
        };

        let reason = request.reason.filter(|r| !r.trim().is_empty());
        let event = FlagChangeEvent {
            caller: caller.name().to_string(),
            subject: subject.clone(),
            claim_id: claim.id(),
            claim_type: claim.claim_type(),
            flag_type,
            contexts: contexts.clone(),
            key,
            value,
            reason,
        };
        if self.events().fire_pre(&event).is_veto() {
            return Err(FlagError::EventCancelled);
        }

        if !self
            .store()
            .set_permission(subject, &contexts, &permission, value, DataLayer::Persisted)
        {
            warn!("Permission store rejected {} = {} for {}", permission, value, subject);
            return Err(FlagError::StoreWriteFailed(permission));
        }

        if write_context == ban_context() {
            let ban_key = event.key.stripped();
            match (&event.reason, value) {
                (_, Tristate::Undefined) => {
                    self.bans().remove(claim.world(), &ban_key);
                }
                (Some(reason), _) => self.bans().record(claim.world(), &ban_key, reason),
                (None, _) => {}
            }
        }

        self.events().fire_post(&event);
        debug!(
            "{} set {} = {} ({}) for {} in {}",
            caller.name(),
            permission,
            value,
            flag_type.name(),
            subject,
            write_context
        );
        Ok(value)
    }

    /// Value stored for `permission` in the layer being edited.
    ///
    /// DEFAULT falls back from the persisted to the transient layer.
    fn stored_value(
        &self,
        subject: &Subject,
        contexts: &ContextSet,
        permission: &str,
        flag_type: FlagType,
    ) -> Tristate {
        let persisted = self
            .store()
            .get_permissions(subject, contexts, DataLayer::Persisted)
            .get(permission)
            .copied();
        let value = match (persisted, flag_type) {
            (None, FlagType::Default) => self
                .store()
                .get_permissions(subject, contexts, DataLayer::Transient)
                .get(permission)
                .copied(),
            (value, _) => value,
        };
        Tristate::from_option(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use griefprevention_api::ClaimType;

    use super::*;
    use crate::config::GriefPreventionConfig;
    use crate::events::HookResult;
    use crate::testing::{self, MockClaim, RecordingStore, WORLD};

    fn service(store: Arc<RecordingStore>) -> FlagService {
        FlagService::with_collaborators(
            store,
            Arc::new(testing::registry()),
            "minecraft",
            &GriefPreventionConfig::default(),
        )
    }

    fn dirt() -> FlagKey {
        FlagKey::new(ClaimFlag::BlockBreak).with_target("minecraft.dirt")
    }

    #[test]
    fn test_claim_write_under_own_context_only() {
        let store = RecordingStore::new();
        let service = service(store.clone());
        let claim = MockClaim::new(ClaimType::Basic);
        let key = service
            .request(&*claim, "block-break", "any", "minecraft:dirt", None)
            .unwrap()
            .key;

        let result = service.apply(
            &testing::console(),
            &Subject::Global,
            &*claim,
            FlagRequest::new(key, Tristate::False).with_source("any"),
        );

        assert_eq!(result, FlagResult::Success);
        assert_eq!(store.writes(), 1);
        assert_eq!(
            store.value(
                &Subject::Global,
                &claim.context().into_set(),
                "griefprevention.flags.block-break.minecraft.dirt",
                DataLayer::Persisted
            ),
            Some(false)
        );
        let mut with_world = claim.context().into_set();
        with_world.insert(Context::world(WORLD));
        assert_eq!(
            store.value(
                &Subject::Global,
                &with_world,
                "griefprevention.flags.block-break.minecraft.dirt",
                DataLayer::Persisted
            ),
            None
        );
    }

    #[test]
    fn test_missing_flag_node_denied() {
        let store = RecordingStore::new();
        let service = service(store.clone());
        let claim = MockClaim::new(ClaimType::Basic);
        let caller = testing::player(&["griefprevention.user-claim-flags.block-place"]);

        let result = service.apply(
            &caller,
            &Subject::Global,
            &*claim,
            FlagRequest::new(dirt(), Tristate::False),
        );

        assert_eq!(result, FlagResult::NoPermission);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_user_node_allows_user_editable_flag() {
        let store = RecordingStore::new();
        let service = service(store.clone());
        let claim = MockClaim::new(ClaimType::Basic);
        let caller = testing::player(&["griefprevention.user-claim-flags.block-break"]);

        let request = FlagRequest::new(dirt(), Tristate::True);
        let result = service.apply(&caller, &Subject::Global, &*claim, request);
        assert_eq!(result, FlagResult::Success);
    }

    #[test]
    fn test_apply_from_worker_thread_without_installed_host() {
        let store = RecordingStore::new();
        let service = service(store.clone());
        let claim = MockClaim::new(ClaimType::Basic);
        assert!(!is_host_initialized());

        let result = std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let request = FlagRequest::new(dirt(), Tristate::False);
                    service.apply(&testing::console(), &Subject::Global, &*claim, request)
                })
                .join()
        });

        assert_eq!(result.ok(), Some(FlagResult::Success));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_user_node_ignored_for_non_editable_flag() {
        let store = RecordingStore::new();
        let service = service(store.clone());
        let claim = MockClaim::new(ClaimType::Basic);
        let caller = testing::player(&["griefprevention.user-claim-flags.*"]);
        let key = FlagKey::new(ClaimFlag::Explosion);

        let result = service.apply(
            &caller,
            &Subject::Global,
            &*claim,
            FlagRequest::new(key, Tristate::True),
        );
        assert_eq!(result, FlagResult::NoPermission);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_admin_needs_admin_node_not_user_node() {
        let store = RecordingStore::new();
        let service = service(store.clone());
        let claim = MockClaim::new(ClaimType::Basic);
        let caller = testing::player(&[
            nodes::ADMIN_CLAIMS,
            "griefprevention.user-claim-flags.block-break",
        ]);

        let result = service.apply(
            &caller,
            &Subject::Global,
            &*claim,
            FlagRequest::new(dirt(), Tristate::True),
        );
        assert_eq!(result, FlagResult::NoPermission);

        let caller = testing::player(&[
            nodes::ADMIN_CLAIMS,
            "griefprevention.admin-claim-flags.block-break",
        ]);
        let result = service.apply(
            &caller,
            &Subject::Global,
            &*claim,
            FlagRequest::new(dirt(), Tristate::True),
        );
        assert_eq!(result, FlagResult::Success);
    }

    #[test]
    fn test_claim_edit_denied_short_circuits() {
        let store = RecordingStore::new();
        let service = service(store.clone());
        let claim = MockClaim::denying(ClaimType::Basic, "not your claim");
        let caller = testing::player(&["*"]);

        let result = service.apply(
            &caller,
            &Subject::Global,
            &*claim,
            FlagRequest::new(dirt(), Tristate::False),
        );
        assert_eq!(result, FlagResult::NoPermission);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_defaults_and_overrides_gates() {
        let store = RecordingStore::new();
        let service = service(store.clone());
        let claim = MockClaim::new(ClaimType::Basic);
        let caller = testing::player(&[nodes::ADMIN_CLAIMS, "griefprevention.admin-claim-flags.*"]);

        for context in [
            Context::claim_default(ClaimType::Basic),
            Context::claim_override(ClaimType::Basic),
        ] {
            let request = FlagRequest::new(dirt(), Tristate::False).with_context(context);
            assert_eq!(
                service.apply(&caller, &Subject::Global, &*claim, request),
                FlagResult::NoPermission
            );
        }
        assert_eq!(store.writes(), 0);

        let caller = testing::player(&[
            nodes::ADMIN_CLAIMS,
            "griefprevention.admin-claim-flags.*",
            nodes::MANAGE_FLAG_DEFAULTS,
        ]);
        let request = FlagRequest::new(dirt(), Tristate::False)
            .with_context(Context::claim_default(ClaimType::Basic));
        assert_eq!(service.apply(&caller, &Subject::Global, &*claim, request), FlagResult::Success);
        assert_eq!(
            store.value(
                &Subject::Global,
                &Context::claim_default(ClaimType::Basic).into_set(),
                &dirt().to_permission(),
                DataLayer::Persisted
            ),
            Some(false)
        );
    }

    #[test]
    fn test_source_normalization() {
        let store = RecordingStore::new();
        let service = service(store.clone());
        let claim = MockClaim::new(ClaimType::Basic);
        let contexts = claim.context().into_set();

        let request =
            FlagRequest::new(dirt().with_meta(3), Tristate::True).with_source("minecraft:player");
        assert_eq!(
            service.apply(&testing::console(), &Subject::Global, &*claim, request),
            FlagResult::Success,
        );
        assert_eq!(
            store.value(
                &Subject::Global,
                &contexts,
                "griefprevention.flags.block-break.minecraft.dirt.source.minecraft.player.3",
                DataLayer::Persisted
            ),
            Some(true)
        );

        let request = FlagRequest::new(FlagKey::new(ClaimFlag::EntityDamage), Tristate::False)
            .with_source("pixelmon:any");
        assert_eq!(
            service.apply(&testing::console(), &Subject::Global, &*claim, request),
            FlagResult::Success,
        );
        assert_eq!(
            store.value(
                &Subject::Global,
                &contexts,
                "griefprevention.flags.entity-damage.minecraft.source.pixelmon",
                DataLayer::Persisted
            ),
            Some(false)
        );
    }

    #[test]
    fn test_wilderness_ban_records_reason() {
        let store = RecordingStore::new();
        let service = service(store.clone());
        let wilderness = MockClaim::new(ClaimType::Wilderness);
        let request = service
            .request(&*wilderness, "portal-use", "any", "any", Some("override"))
            .unwrap()
            .with_reason("exploit prevention");
        let request = FlagRequest { value: Tristate::False, ..request };

        let result = service.apply(&testing::console(), &Subject::Global, &*wilderness, request);
        assert_eq!(result, FlagResult::Success);
        assert_eq!(
            service.bans().get(WORLD, "portal-use").as_deref(),
            Some("exploit prevention")
        );
        assert_eq!(
            store.value(
                &Subject::Global,
                &ban_context().into_set(),
                "griefprevention.flags.portal-use",
                DataLayer::Persisted
            ),
            Some(false)
        );

        let clear = FlagRequest::new(FlagKey::new(ClaimFlag::PortalUse), Tristate::Undefined)
            .with_context(ban_context());
        assert_eq!(
            service.apply(&testing::console(), &Subject::Global, &*wilderness, clear),
            FlagResult::Success,
        );
        assert_eq!(service.bans().get(WORLD, "portal-use"), None);
    }

    #[test]
    fn test_reason_ignored_outside_ban_list() {
        let store = RecordingStore::new();
        let service = service(store.clone());
        let claim = MockClaim::new(ClaimType::Basic);
        let request = FlagRequest::new(FlagKey::new(ClaimFlag::PortalUse), Tristate::False)
            .with_context(Context::claim_override(ClaimType::Basic))
            .with_reason("no");

        assert_eq!(
            service.apply(&testing::console(), &Subject::Global, &*claim, request),
            FlagResult::Success,
        );
        assert!(service.bans().entries(WORLD).is_empty());
    }

    #[test]
    fn test_inherit_is_read_only() {
        let store = RecordingStore::new();
        let service = service(store.clone());
        let parent = MockClaim::new(ClaimType::Basic);
        let child = MockClaim::child_of(ClaimType::Subdivision, &parent);
        let key = FlagKey::new(ClaimFlag::EntityDamage);
        store.seed(
            &Subject::Global,
            &parent.context().into_set(),
            &key.to_permission(),
            false,
            DataLayer::Persisted,
        );

        let request =
            FlagRequest::new(key.clone(), Tristate::True).with_flag_type(FlagType::Inherit);
        assert_eq!(
            service.try_apply(&testing::console(), &Subject::Global, &*child, request),
            Err(FlagError::InheritedEntry(parent.id()))
        );
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_listener_veto() {
        let store = RecordingStore::new();
        let service = service(store.clone());
        let claim = MockClaim::new(ClaimType::Basic);
        let posts = Arc::new(AtomicUsize::new(0));

        let veto = service.events().on_pre_change(|event| {
            if event.key.flag() == ClaimFlag::BlockBreak {
                HookResult::Cancel
            } else {
                HookResult::Continue
            }
        });
        let counter = posts.clone();
        service.events().on_post_change(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let result = service.apply(
            &testing::console(),
            &Subject::Global,
            &*claim,
            FlagRequest::new(dirt(), Tristate::True),
        );
        assert_eq!(result, FlagResult::EventCancelled);
        assert_eq!(store.writes(), 0);
        assert_eq!(posts.load(Ordering::SeqCst), 0);

        service.events().remove(veto);
        let result = service.apply(
            &testing::console(),
            &Subject::Global,
            &*claim,
            FlagRequest::new(dirt(), Tristate::True),
        );
        assert_eq!(result, FlagResult::Success);
        assert_eq!(posts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_store_failure_reported() {
        let store = RecordingStore::new();
        store.reject_writes();
        let service = service(store.clone());
        let claim = MockClaim::new(ClaimType::Basic);

        let result = service.apply(
            &testing::console(),
            &Subject::Global,
            &*claim,
            FlagRequest::new(dirt(), Tristate::True),
        );
        assert_eq!(result, FlagResult::StoreFailure);
    }

    #[test]
    fn test_ui_click_cycles_claim_value() {
        let store = RecordingStore::new();
        let service = service(store.clone());
        let claim = MockClaim::new(ClaimType::Basic);
        let caller = testing::console();

        let mut seen = Vec::new();
        for _ in 0..3 {
            let value = service
                .try_apply(&caller, &Subject::Global, &*claim, FlagRequest::toggle(dirt()))
                .unwrap();
            seen.push(value);
        }
        assert_eq!(seen, vec![Tristate::True, Tristate::False, Tristate::Undefined]);
    }

    #[test]
    fn test_ui_click_default_collapses_to_builtin() {
        let store = RecordingStore::new();
        let service = service(store.clone());
        service.seed_default_permissions();
        let claim = MockClaim::new(ClaimType::Basic);
        let caller = testing::console();
        let key = FlagKey::new(ClaimFlag::ItemDrop);
        let request = || {
            FlagRequest::toggle(key.clone()).with_context(Context::claim_default(ClaimType::Basic))
        };

        // built-in default is true, so the first click flips it to false
        let first = service.try_apply(&caller, &Subject::Global, &*claim, request()).unwrap();
        assert_eq!(first, Tristate::False);
        let second = service.try_apply(&caller, &Subject::Global, &*claim, request()).unwrap();
        assert_eq!(second, Tristate::Undefined);
    }

    #[test]
    fn test_toggle_claim_and_override() {
        let defaults = DefaultsTable::builtin();
        for flag_type in [FlagType::Claim, FlagType::Override] {
            let toggle = |current| {
                compute_toggle(current, flag_type, ClaimType::Basic, &dirt(), &defaults)
            };
            assert_eq!(toggle(Tristate::Undefined), Tristate::True);
            assert_eq!(toggle(Tristate::True), Tristate::False);
            assert_eq!(toggle(Tristate::False), Tristate::Undefined);
        }
    }

    #[test]
    fn test_toggle_default_round_trip() {
        let defaults = DefaultsTable::builtin();
        // block-break defaults to false in basic claims
        let toggle = |current, key: &FlagKey| {
            compute_toggle(current, FlagType::Default, ClaimType::Basic, key, &defaults)
        };
        let block_break = FlagKey::new(ClaimFlag::BlockBreak);

        let once = toggle(Tristate::Undefined, &block_break);
        assert_eq!(once, Tristate::True);
        assert_eq!(toggle(once, &block_break), Tristate::Undefined);

        // item-drop defaults to true: toggling to true is already the default
        let item_drop = FlagKey::new(ClaimFlag::ItemDrop);
        assert_eq!(toggle(Tristate::Undefined, &item_drop), Tristate::Undefined);
        assert_eq!(toggle(Tristate::True, &item_drop), Tristate::False);

        // targeted keys have no built-in default to collapse onto
        assert_eq!(toggle(Tristate::True, &dirt()), Tristate::False);
    }

    #[test]
    fn test_toggle_leaves_other_types() {
        let defaults = DefaultsTable::builtin();
        for flag_type in [FlagType::All, FlagType::Inherit, FlagType::Group, FlagType::Player] {
            assert_eq!(
                compute_toggle(Tristate::False, flag_type, ClaimType::Basic, &dirt(), &defaults),
                Tristate::False
            );
        }
    }
}
