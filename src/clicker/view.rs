//! Read-only projections of the game for a presentation layer.
//!
//! Nothing here mutates state; every value is recomputed from the current
//! [`ProgressionState`] and [`Catalog`] on demand.

use crate::number::Num;

use super::catalog::{Catalog, Channel, TieredBonus};
use super::logic::{is_level_unlocked, upgrade_price};
use super::multiplier::channel_multiplier;
use super::state::ProgressionState;

/// One row of the upgrade shop.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeView {
    pub id: String,
    pub name: String,
    pub owned: u64,
    /// Price of the next single unit.
    pub price: Num,
    pub affordable: bool,
    /// Product of owned per-upgrade bonuses (1 when none).
    pub multiplier: Num,
    /// `base_cps × multiplier`.
    pub unit_rate: Num,
    /// `unit_rate × owned`, before the global bonus.
    pub production: Num,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkinView {
    pub id: String,
    pub name: String,
    pub price: Num,
    pub purchased: bool,
    pub equipped: bool,
    /// Not yet purchased and the score covers the price.
    pub affordable: bool,
}

/// The next buyable level of one tiered bonus.
#[derive(Clone, Debug, PartialEq)]
pub struct TierOffer {
    pub bonus_id: String,
    pub name: String,
    pub level: u32,
    pub price: Num,
    pub multiplier: f64,
    pub affordable: bool,
    /// Buying this completes the game.
    pub terminal: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierLevelStatus {
    pub owned: bool,
    pub unlocked: bool,
    pub affordable: bool,
}

pub fn upgrade_views(state: &ProgressionState, catalog: &Catalog) -> Vec<UpgradeView> {
    catalog
        .upgrades
        .iter()
        .map(|upgrade| {
            let owned = state.owned(&upgrade.id);
            let price = upgrade_price(state, catalog, &upgrade.id, 1).unwrap_or_default();
            let channel = Channel::Upgrade(upgrade.id.clone());
            let multiplier = channel_multiplier(&channel, &state.single_upgrades, &catalog.tiers);
            let unit_rate = upgrade.base_cps * multiplier;
            UpgradeView {
                id: upgrade.id.clone(),
                name: upgrade.name.clone(),
                owned,
                price,
                affordable: state.score >= price,
                multiplier,
                unit_rate,
                production: unit_rate * Num::from(owned),
            }
        })
        .collect()
}

pub fn skin_views(state: &ProgressionState, catalog: &Catalog) -> Vec<SkinView> {
    catalog
        .skins
        .iter()
        .map(|skin| {
            let purchased = state.owns_skin(&skin.id);
            SkinView {
                id: skin.id.clone(),
                name: skin.name.clone(),
                price: skin.price,
                purchased,
                equipped: state.equipped_skin == skin.value,
                affordable: !purchased && state.score >= skin.price,
            }
        })
        .collect()
}

/// Ownership, unlock and affordability of one tier level, or `None` if the
/// bonus or level does not exist.
pub fn tier_level_status(
    state: &ProgressionState,
    catalog: &Catalog,
    bonus_id: &str,
    level: u32,
) -> Option<TierLevelStatus> {
    let bonus = catalog.tier(bonus_id)?;
    let tier = bonus.level(level)?;
    Some(TierLevelStatus {
        owned: state.owns_level(bonus_id, level),
        unlocked: is_level_unlocked(state, bonus, tier),
        affordable: state.score >= tier.price,
    })
}

/// Tier levels to show in the upgrade popup, in catalog order.
///
/// Manual and global bonuses are always visible, per-upgrade bonuses once one
/// unit of their upgrade is owned, and the terminal bonus once every other
/// bonus is maxed. Each visible bonus offers its first unowned level, and
/// only if that level is unlocked.
pub fn tier_offers(state: &ProgressionState, catalog: &Catalog) -> Vec<TierOffer> {
    let others_maxed = catalog
        .tiers
        .iter()
        .filter(|bonus| bonus.channel != Channel::Terminal)
        .all(|bonus| is_maxed(state, bonus));

    catalog
        .tiers
        .iter()
        .filter(|bonus| match &bonus.channel {
            Channel::Terminal => others_maxed,
            Channel::Manual | Channel::Global => true,
            Channel::Upgrade(id) => state.owned(id) > 0,
        })
        .filter_map(|bonus| {
            let next = bonus
                .levels
                .iter()
                .find(|l| !state.owns_level(&bonus.id, l.level))?;
            if !is_level_unlocked(state, bonus, next) {
                return None;
            }
            Some(TierOffer {
                bonus_id: bonus.id.clone(),
                name: bonus.name.clone(),
                level: next.level,
                price: next.price,
                multiplier: next.multiplier,
                affordable: state.score >= next.price,
                terminal: bonus.channel == Channel::Terminal,
            })
        })
        .collect()
}

fn is_maxed(state: &ProgressionState, bonus: &TieredBonus) -> bool {
    bonus
        .levels
        .iter()
        .all(|l| state.owns_level(&bonus.id, l.level))
}
