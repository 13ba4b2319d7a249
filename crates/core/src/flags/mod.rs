//! Claim flags
//!
//! A flag is a named rule category governing whether some gameplay action is
//! permitted inside a claim. Flag values are stored in the permission store
//! under keys of the form
//! `griefprevention.flags.<flag>[.<target>][.source.<source>][.<meta>]`.
//!
//! - [`ClaimFlag`] is the closed set of known flags
//! - [`FlagKey`] is the structured form of a stored key
//! - [`encode`] / [`decode`] translate user input to and from keys
//! - [`DefaultsTable`] holds the built-in per-claim-type defaults

mod defaults;
mod encoder;
mod key;

use bitflags::bitflags;
use griefprevention_macros::FlagEnum;

pub use defaults::DefaultsTable;
pub use encoder::{decode, encode, key_for, DecodedFlag};
pub use key::FlagKey;

/// Prefix of every flag permission key
pub const FLAG_PERMISSION_PREFIX: &str = "griefprevention.flags.";

/// Target and source value meaning "unscoped"
pub const ANY: &str = "any";

bitflags! {
    /// Kinds of target identifiers a flag accepts
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TargetKinds: u8 {
        /// Block types and block states
        const BLOCK = 0x01;
        /// Item types (and block items with state metadata)
        const ITEM = 0x02;
        /// Entity types
        const ENTITY = 0x04;
        /// `plugin:command[args]` targets
        const COMMAND = 0x08;
    }
}

impl TargetKinds {
    /// Whether targets may carry a numeric block-state suffix
    pub const fn accepts_meta(self) -> bool {
        self.intersects(Self::BLOCK.union(Self::ITEM))
    }
}

/// Known claim flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FlagEnum)]
pub enum ClaimFlag {
    #[flag(name = "block-break", description = "Breaking blocks", block)]
    BlockBreak,
    #[flag(name = "block-place", description = "Placing blocks", block)]
    BlockPlace,
    #[flag(name = "command-execute", description = "Running commands", command)]
    CommandExecute,
    #[flag(
        name = "command-execute-pvp",
        description = "Running commands while in PvP combat",
        command
    )]
    CommandExecutePvp,
    #[flag(name = "enter-claim", description = "Entering the claim", entity)]
    EnterClaim,
    #[flag(
        name = "entity-collide-block",
        description = "Entities colliding with blocks",
        block
    )]
    EntityCollideBlock,
    #[flag(
        name = "entity-collide-entity",
        description = "Entities colliding with entities",
        entity
    )]
    EntityCollideEntity,
    #[flag(name = "entity-damage", description = "Damaging entities", entity)]
    EntityDamage,
    #[flag(name = "entity-riding", description = "Riding entities", entity)]
    EntityRiding,
    #[flag(name = "entity-spawn", description = "Spawning entities", entity, item)]
    EntitySpawn,
    #[flag(
        name = "entity-teleport-from",
        description = "Teleporting out of the claim",
        entity
    )]
    EntityTeleportFrom,
    #[flag(
        name = "entity-teleport-to",
        description = "Teleporting into the claim",
        entity
    )]
    EntityTeleportTo,
    #[flag(name = "exit-claim", description = "Leaving the claim", entity)]
    ExitClaim,
    #[flag(name = "explosion", description = "Explosions", block, entity)]
    Explosion,
    #[flag(
        name = "explosion-surface",
        description = "Explosions above sea level",
        block,
        entity
    )]
    ExplosionSurface,
    #[flag(name = "fire-spread", description = "Fire spreading", block)]
    FireSpread,
    #[flag(
        name = "interact-block-primary",
        description = "Left-clicking blocks",
        block
    )]
    InteractBlockPrimary,
    #[flag(
        name = "interact-block-secondary",
        description = "Right-clicking blocks",
        block
    )]
    InteractBlockSecondary,
    #[flag(
        name = "interact-entity-primary",
        description = "Left-clicking entities",
        entity
    )]
    InteractEntityPrimary,
    #[flag(
        name = "interact-entity-secondary",
        description = "Right-clicking entities",
        entity
    )]
    InteractEntitySecondary,
    #[flag(
        name = "interact-inventory",
        description = "Opening containers",
        block,
        entity
    )]
    InteractInventory,
    #[flag(
        name = "interact-inventory-click",
        description = "Clicking items in inventories",
        item
    )]
    InteractInventoryClick,
    #[flag(
        name = "interact-item-primary",
        description = "Left-clicking with an item",
        item
    )]
    InteractItemPrimary,
    #[flag(
        name = "interact-item-secondary",
        description = "Right-clicking with an item",
        item
    )]
    InteractItemSecondary,
    #[flag(name = "item-drop", description = "Dropping items", item)]
    ItemDrop,
    #[flag(name = "item-pickup", description = "Picking up items", item)]
    ItemPickup,
    #[flag(name = "item-spawn", description = "Spawning item drops", item)]
    ItemSpawn,
    #[flag(name = "item-use", description = "Using items", item)]
    ItemUse,
    #[flag(name = "leaf-decay", description = "Leaves decaying", block)]
    LeafDecay,
    #[flag(name = "liquid-flow", description = "Liquids flowing", block)]
    LiquidFlow,
    #[flag(name = "portal-use", description = "Using portals", block)]
    PortalUse,
    #[flag(
        name = "projectile-impact-block",
        description = "Projectiles hitting blocks",
        block
    )]
    ProjectileImpactBlock,
    #[flag(
        name = "projectile-impact-entity",
        description = "Projectiles hitting entities",
        entity
    )]
    ProjectileImpactEntity,
}

impl ClaimFlag {
    /// Whether targets are `plugin:command[args]` rather than registry ids
    pub const fn is_command(&self) -> bool {
        matches!(self, Self::CommandExecute | Self::CommandExecutePvp)
    }

    /// Bare permission key of this flag (no target, no source)
    pub fn permission(&self) -> String {
        format!("{}{}", FLAG_PERMISSION_PREFIX, self.name())
    }
}
