//! Multiplier composition across tiered bonuses.

use crate::number::Num;

use super::catalog::{Channel, TieredBonus};
use super::state::TierOwnership;

/// Net multiplier for `channel`: the product of the multiplier of every
/// owned level of every bonus that targets it. 1 when nothing applies.
///
/// Levels of the same bonus compound: owning levels 1 and 2 applies both.
pub fn channel_multiplier(channel: &Channel, owned: &TierOwnership, tiers: &[TieredBonus]) -> Num {
    tiers
        .iter()
        .filter(|bonus| bonus.channel == *channel)
        .filter_map(|bonus| owned.get(&bonus.id).map(|levels| (bonus, levels)))
        .flat_map(|(bonus, levels)| {
            bonus
                .levels
                .iter()
                .filter(move |l| levels.contains(&l.level))
        })
        .map(|l| Num::from_f64(l.multiplier))
        .product()
}
