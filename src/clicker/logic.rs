//! Button Clicker transaction engine: pure functions, fully testable.
//!
//! Every mutating function either applies completely and returns `true`, or
//! leaves the state untouched and returns `false`.

use crate::number::Num;

use super::catalog::{Catalog, Channel, TierLevel, TieredBonus};
use super::pricing::{bulk_price, next_unit_price};
use super::production::{effective_manual_value, total_passive_production};
use super::state::{ProgressionState, DEFAULT_SKIN};

/// Passive ticks per second.
pub const TICKS_PER_SECOND: u32 = 10;

/// Seconds of passive production paid by an accepted ad bonus.
pub const AD_BONUS_SECONDS: f64 = 15.0;
/// Smallest ad bonus ever paid.
pub const AD_BONUS_MINIMUM: f64 = 10.0;

/// Total passive production per second.
pub fn passive_rate(state: &ProgressionState, catalog: &Catalog) -> Num {
    total_passive_production(
        &state.upgrades,
        &catalog.upgrades,
        &state.single_upgrades,
        &catalog.tiers,
    )
}

/// Currency awarded per click.
pub fn manual_value(state: &ProgressionState, catalog: &Catalog) -> Num {
    effective_manual_value(&state.single_upgrades, &catalog.tiers)
}

/// Advance passive income by `delta_ticks` ticks (at 10 ticks/sec).
pub fn tick(state: &mut ProgressionState, catalog: &Catalog, delta_ticks: u32) {
    if delta_ticks == 0 {
        return;
    }
    let rate = passive_rate(state, catalog);
    if rate.is_zero() {
        return;
    }
    let earned = rate * Num::from(u64::from(delta_ticks)) / Num::from(u64::from(TICKS_PER_SECOND));
    state.score += earned;
}

/// Manual click. Always succeeds; returns the amount awarded.
pub fn click(state: &mut ProgressionState, catalog: &Catalog) -> Num {
    let value = manual_value(state, catalog);
    state.score += value;
    value
}

/// Price of the next `quantity` units of an upgrade, or `None` if the
/// upgrade is unknown.
pub fn upgrade_price(state: &ProgressionState, catalog: &Catalog, id: &str, quantity: u64) -> Option<Num> {
    let upgrade = catalog.upgrade(id)?;
    let owned = state.owned(id);
    Some(if quantity == 1 {
        next_unit_price(upgrade.base_price, owned)
    } else {
        bulk_price(upgrade.base_price, owned, quantity)
    })
}

/// Try to buy `quantity` units of a production upgrade. Returns true if successful.
pub fn buy_upgrade(state: &mut ProgressionState, catalog: &Catalog, id: &str, quantity: u64) -> bool {
    if quantity == 0 {
        return false;
    }
    let price = match upgrade_price(state, catalog, id, quantity) {
        Some(p) => p,
        None => return false,
    };
    if state.score < price {
        return false;
    }

    state.score -= price;
    let count = state.upgrades.entry(id.to_string()).or_insert(0);
    *count = count.saturating_add(quantity);
    true
}

/// Try to buy a skin; a successful purchase also equips it.
pub fn buy_skin(state: &mut ProgressionState, catalog: &Catalog, id: &str) -> bool {
    if state.owns_skin(id) {
        return false;
    }
    let skin = match catalog.skin(id) {
        Some(s) => s,
        None => return false,
    };
    if state.score < skin.price {
        return false;
    }

    state.score -= skin.price;
    state.purchased_skins.push(id.to_string());
    state.equipped_skin = skin.value.clone();
    true
}

/// Equip an owned skin by id.
pub fn equip_skin(state: &mut ProgressionState, catalog: &Catalog, id: &str) -> bool {
    if !state.owns_skin(id) {
        return false;
    }
    let value = match catalog.skin(id) {
        Some(skin) => skin.value.clone(),
        // The default skin is owned even when the catalog omits it.
        None if id == DEFAULT_SKIN => DEFAULT_SKIN.to_string(),
        None => return false,
    };
    state.equipped_skin = value;
    true
}

/// Whether `level` of `bonus` meets its unlock requirement right now.
///
/// Only per-upgrade channels are gated; ownership of lower levels of the
/// same bonus is not required.
pub fn is_level_unlocked(state: &ProgressionState, bonus: &TieredBonus, level: &TierLevel) -> bool {
    match &bonus.channel {
        Channel::Upgrade(id) => state.owned(id) >= level.unlock_requirement,
        Channel::Manual | Channel::Global | Channel::Terminal => true,
    }
}

/// Try to buy one level of a tiered bonus. Returns true if successful.
pub fn buy_tier(state: &mut ProgressionState, catalog: &Catalog, bonus_id: &str, level: u32) -> bool {
    let bonus = match catalog.tier(bonus_id) {
        Some(b) => b,
        None => return false,
    };
    let tier = match bonus.level(level) {
        Some(t) => t,
        None => return false,
    };
    if state.owns_level(bonus_id, level) {
        return false;
    }
    if state.score < tier.price {
        return false;
    }
    if !is_level_unlocked(state, bonus, tier) {
        return false;
    }

    state.score -= tier.price;
    state
        .single_upgrades
        .entry(bonus_id.to_string())
        .or_default()
        .insert(level);
    true
}

/// What accepting an ad bonus would pay right now.
pub fn ad_bonus_amount(state: &ProgressionState, catalog: &Catalog) -> Num {
    let bonus = passive_rate(state, catalog) * Num::from_f64(AD_BONUS_SECONDS);
    bonus.max(Num::from_f64(AD_BONUS_MINIMUM))
}

/// Accept an ad bonus. Returns the amount awarded.
pub fn claim_ad_bonus(state: &mut ProgressionState, catalog: &Catalog) -> Num {
    let amount = ad_bonus_amount(state, catalog);
    state.score += amount;
    amount
}

/// Replace all progress with a fresh state.
pub fn reset(state: &mut ProgressionState) {
    *state = ProgressionState::new();
}

/// True once any level of a terminal bonus is owned.
pub fn is_complete(state: &ProgressionState, catalog: &Catalog) -> bool {
    catalog
        .tiers
        .iter()
        .filter(|bonus| bonus.channel == Channel::Terminal)
        .any(|bonus| bonus.levels.iter().any(|l| state.owns_level(&bonus.id, l.level)))
}
