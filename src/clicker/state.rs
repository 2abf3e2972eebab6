//! Progression state: everything that is persisted between sessions.

use std::collections::{BTreeMap, BTreeSet};

use crate::number::Num;

/// The free skin every player owns from the start.
pub const DEFAULT_SKIN: &str = "default";

/// Tiered-bonus id → owned level numbers.
pub type TierOwnership = BTreeMap<String, BTreeSet<u32>>;

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressionState {
    /// Spendable currency.
    pub score: Num,
    /// Production-upgrade id → owned units.
    pub upgrades: BTreeMap<String, u64>,
    /// Purchased skin ids in purchase order. Always contains `DEFAULT_SKIN`.
    pub purchased_skins: Vec<String>,
    /// The equipped skin's `value`.
    pub equipped_skin: String,
    pub single_upgrades: TierOwnership,
}

impl ProgressionState {
    pub fn new() -> Self {
        Self {
            score: Num::ZERO,
            upgrades: BTreeMap::new(),
            purchased_skins: vec![DEFAULT_SKIN.to_string()],
            equipped_skin: DEFAULT_SKIN.to_string(),
            single_upgrades: BTreeMap::new(),
        }
    }

    /// Owned units of a production upgrade (0 if never bought).
    pub fn owned(&self, upgrade_id: &str) -> u64 {
        self.upgrades.get(upgrade_id).copied().unwrap_or(0)
    }

    pub fn owns_skin(&self, skin_id: &str) -> bool {
        self.purchased_skins.iter().any(|s| s == skin_id)
    }

    pub fn owns_level(&self, bonus_id: &str, level: u32) -> bool {
        self.single_upgrades
            .get(bonus_id)
            .is_some_and(|levels| levels.contains(&level))
    }
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self::new()
    }
}
