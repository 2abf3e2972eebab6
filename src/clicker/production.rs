//! Production aggregator: passive rate and click value.

use std::collections::BTreeMap;

use crate::number::Num;

use super::catalog::{Channel, ProductionUpgrade, TieredBonus};
use super::multiplier::channel_multiplier;
use super::state::TierOwnership;

/// Rate of one unit of `upgrade` after its own bonuses (global excluded).
pub fn unit_rate(upgrade: &ProductionUpgrade, owned: &TierOwnership, tiers: &[TieredBonus]) -> Num {
    let channel = Channel::Upgrade(upgrade.id.clone());
    upgrade.base_cps * channel_multiplier(&channel, owned, tiers)
}

/// Total currency per second from every owned upgrade, with per-upgrade
/// bonuses applied first and the global bonus applied to the sum.
pub fn total_passive_production(
    counts: &BTreeMap<String, u64>,
    upgrades: &[ProductionUpgrade],
    owned: &TierOwnership,
    tiers: &[TieredBonus],
) -> Num {
    let sum: Num = upgrades
        .iter()
        .filter_map(|upgrade| {
            let count = counts.get(&upgrade.id).copied().unwrap_or(0);
            (count > 0).then(|| unit_rate(upgrade, owned, tiers) * Num::from(count))
        })
        .sum();
    sum * channel_multiplier(&Channel::Global, owned, tiers)
}

/// Currency awarded per direct click: base 1, scaled by manual bonuses.
pub fn effective_manual_value(owned: &TierOwnership, tiers: &[TieredBonus]) -> Num {
    channel_multiplier(&Channel::Manual, owned, tiers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clicker::catalog::TierLevel;

    fn upgrade(id: &str, cps: f64) -> ProductionUpgrade {
        ProductionUpgrade {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            base_price: Num::from_f64(10.0),
            base_cps: Num::from_f64(cps),
            icon: String::new(),
        }
    }

    fn single_level(id: &str, channel: Channel, multiplier: f64) -> TieredBonus {
        TieredBonus {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            icon: String::new(),
            channel,
            levels: vec![TierLevel {
                level: 1,
                price: Num::ONE,
                multiplier,
                unlock_requirement: 0,
            }],
        }
    }

    fn counts(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
        pairs.iter().map(|(id, n)| (id.to_string(), *n)).collect()
    }

    #[test]
    fn no_units_no_production() {
        let upgrades = vec![upgrade("a", 1.0)];
        let total = total_passive_production(&counts(&[]), &upgrades, &TierOwnership::new(), &[]);
        assert!(total.is_zero());
    }

    #[test]
    fn sums_rate_times_count() {
        let upgrades = vec![upgrade("a", 0.5), upgrade("b", 8.0)];
        let total = total_passive_production(
            &counts(&[("a", 4), ("b", 2)]),
            &upgrades,
            &TierOwnership::new(),
            &[],
        );
        assert_eq!(total, Num::from_f64(18.0));
    }

    #[test]
    fn per_upgrade_then_global_multipliers() {
        let upgrades = vec![upgrade("a", 1.0), upgrade("b", 10.0)];
        let tiers = vec![
            single_level("a_boost", Channel::Upgrade("a".into()), 2.0),
            single_level("syn", Channel::Global, 1.5),
        ];
        let mut owned = TierOwnership::new();
        owned.entry("a_boost".into()).or_default().insert(1);
        owned.entry("syn".into()).or_default().insert(1);
        // (1×2×3 + 10×1) × 1.5
        let total = total_passive_production(&counts(&[("a", 3), ("b", 1)]), &upgrades, &owned, &tiers);
        assert_eq!(total, Num::from_f64(24.0));
    }

    #[test]
    fn counts_for_unknown_upgrades_are_ignored() {
        let upgrades = vec![upgrade("a", 1.0)];
        let total = total_passive_production(
            &counts(&[("a", 1), ("retired", 50)]),
            &upgrades,
            &TierOwnership::new(),
            &[],
        );
        assert_eq!(total, Num::ONE);
    }

    #[test]
    fn manual_value_defaults_to_one() {
        assert_eq!(effective_manual_value(&TierOwnership::new(), &[]), Num::ONE);
    }

    #[test]
    fn manual_value_uses_manual_channel_only() {
        let tiers = vec![
            single_level("click", Channel::Manual, 2.0),
            single_level("syn", Channel::Global, 5.0),
        ];
        let mut owned = TierOwnership::new();
        owned.entry("click".into()).or_default().insert(1);
        owned.entry("syn".into()).or_default().insert(1);
        assert_eq!(effective_manual_value(&owned, &tiers), Num::from_f64(2.0));
    }

    #[test]
    fn unit_rate_includes_upgrade_bonus() {
        let a = upgrade("a", 0.1);
        let tiers = vec![single_level("a_boost", Channel::Upgrade("a".into()), 2.0)];
        let mut owned = TierOwnership::new();
        owned.entry("a_boost".into()).or_default().insert(1);
        assert_eq!(unit_rate(&a, &owned, &tiers), Num::from_f64(0.2));
    }
}
