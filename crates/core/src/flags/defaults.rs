//! Built-in per-claim-type flag defaults

use std::collections::{BTreeMap, HashMap};

use griefprevention_api::ClaimType;

use super::ClaimFlag;

/// Default flag values per claim type.
///
/// These are the values players see when neither a claim owner nor an
/// administrator has set anything. They are seeded into the transient
/// DEFAULT layer on startup and consulted when toggling a DEFAULT value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultsTable {
    values: HashMap<ClaimType, BTreeMap<ClaimFlag, bool>>,
}

impl DefaultsTable {
    /// The compiled-in table
    pub fn builtin() -> Self {
        let values = ClaimType::ALL
            .into_iter()
            .map(|claim_type| {
                let flags = ClaimFlag::ALL
                    .into_iter()
                    .map(|flag| (flag, builtin_value(claim_type, flag)))
                    .collect();
                (claim_type, flags)
            })
            .collect();
        Self { values }
    }

    /// An empty table (no defaults anywhere)
    pub fn empty() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Apply config overrides keyed by claim type name, then flag name.
    ///
    /// Returns the unrecognised `claim-type` or `claim-type.flag` names.
    pub fn apply_overrides(
        &mut self,
        overrides: &BTreeMap<String, BTreeMap<String, bool>>,
    ) -> Vec<String> {
        let mut unknown = Vec::new();
        for (type_name, flags) in overrides {
            let Ok(claim_type) = type_name.parse::<ClaimType>() else {
                unknown.push(type_name.clone());
                continue;
            };
            for (flag_name, value) in flags {
                match ClaimFlag::from_name(flag_name) {
                    Some(flag) => {
                        self.set(claim_type, flag, *value);
                    }
                    None => unknown.push(format!("{}.{}", type_name, flag_name)),
                }
            }
        }
        unknown
    }

    pub fn set(&mut self, claim_type: ClaimType, flag: ClaimFlag, value: bool) {
        self.values.entry(claim_type).or_default().insert(flag, value);
    }

    /// Default value of a flag for a claim type, if one exists
    pub fn get(&self, claim_type: ClaimType, flag: ClaimFlag) -> Option<bool> {
        self.values.get(&claim_type)?.get(&flag).copied()
    }

    /// All defaults of a claim type
    pub fn iter(&self, claim_type: ClaimType) -> impl Iterator<Item = (ClaimFlag, bool)> + '_ {
        self.values
            .get(&claim_type)
            .into_iter()
            .flat_map(|flags| flags.iter().map(|(flag, value)| (*flag, *value)))
    }
}

impl Default for DefaultsTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Compiled-in default for one flag
fn builtin_value(claim_type: ClaimType, flag: ClaimFlag) -> bool {
    use ClaimFlag::*;

    if claim_type.is_wilderness() {
        return !matches!(flag, FireSpread);
    }

    !matches!(
        flag,
        BlockBreak
            | BlockPlace
            | EntityDamage
            | EntityRiding
            | Explosion
            | ExplosionSurface
            | FireSpread
            | InteractBlockSecondary
            | InteractEntitySecondary
            | InteractInventory
            | ProjectileImpactBlock
            | ProjectileImpactEntity
    )
}
