//! Exponential cost curve for production upgrades.
//!
//! Every owned unit raises the price of the next one by 15%.

use crate::number::Num;

/// Price growth per owned unit.
pub const PRICE_GROWTH: f64 = 1.15;

/// How far below an integer, in units of `f64::EPSILON` relative to the
/// price, a product may land and still settle on that integer. Covers
/// `100 × 1.15 = 114.99999999999999`.
const FLOOR_SLACK_ULPS: f64 = 4.0;

/// Absolute cap on the slack. Above about 1e13 it is smaller than the
/// spacing between representable prices, so only exact integers survive.
const FLOOR_SLACK_MAX: f64 = 1e-3;

/// `floor(base_price × 1.15^owned)`.
pub fn next_unit_price(base_price: Num, owned: u64) -> Num {
    settle(base_price * growth().pow(owned as f64))
}

/// Total price of `quantity` units bought one after another starting at
/// `owned`, via the geometric series
/// `base × 1.15^owned × (1.15^quantity − 1) / 0.15`. Zero for `quantity == 0`.
pub fn bulk_price(base_price: Num, owned: u64, quantity: u64) -> Num {
    if quantity == 0 {
        return Num::ZERO;
    }
    let first = base_price * growth().pow(owned as f64);
    let series = (growth().pow(quantity as f64) - Num::ONE) / Num::from_f64(PRICE_GROWTH - 1.0);
    settle(first * series)
}

fn growth() -> Num {
    Num::from_f64(PRICE_GROWTH)
}

/// Floor, except that a value within float noise below an integer becomes
/// that integer. Scientific values are already whole.
fn settle(raw: Num) -> Num {
    let value = raw.to_f64();
    if value >= 1e300 {
        return raw.floor();
    }
    let nearest = value.round();
    let slack = (value * FLOOR_SLACK_ULPS * f64::EPSILON).min(FLOOR_SLACK_MAX);
    if nearest >= value && nearest - value <= slack {
        Num::from_f64(nearest)
    } else {
        Num::from_f64(value.floor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: f64) -> Num {
        Num::from_f64(v)
    }

    #[test]
    fn first_unit_costs_base_price() {
        assert_eq!(next_unit_price(n(10.0), 0), n(10.0));
        assert_eq!(next_unit_price(n(15.0), 0), n(15.0));
    }

    #[test]
    fn second_unit_costs_fifteen_percent_more() {
        // floor(10 × 1.15) = floor(11.5)
        assert_eq!(next_unit_price(n(10.0), 1), n(11.0));
        assert_eq!(next_unit_price(n(100.0), 1), n(115.0));
    }

    #[test]
    fn price_grows_geometrically() {
        let expected = (15.0 * 1.15f64.powi(10)).floor();
        assert_eq!(next_unit_price(n(15.0), 10), n(expected));
    }

    #[test]
    fn bulk_zero_is_free() {
        assert!(bulk_price(n(10.0), 0, 0).is_zero());
        assert!(bulk_price(n(1e9), 500, 0).is_zero());
    }

    #[test]
    fn bulk_of_one_matches_next_unit() {
        assert_eq!(bulk_price(n(10.0), 0, 1), n(10.0));
        assert_eq!(bulk_price(n(100.0), 3, 1), next_unit_price(n(100.0), 3));
    }

    #[test]
    fn bulk_of_two_from_zero() {
        // 10 + 11.5 = 21.5
        assert_eq!(bulk_price(n(10.0), 0, 2), n(21.0));
    }

    #[test]
    fn large_base_prices_are_exact() {
        for base in [1e12, 1e13, 1e15] {
            assert_eq!(next_unit_price(n(base), 0), n(base));
            assert_eq!(bulk_price(n(base), 0, 1), n(base));
        }
    }

    #[test]
    fn late_game_price_is_not_overcharged() {
        // quantum_clicker with 150 owned
        let raw = 1_400_000.0 * 1.15f64.powf(150.0);
        assert!(raw > 1e15);
        assert_eq!(next_unit_price(n(1_400_000.0), 150), n(raw.floor()));
    }

    #[test]
    fn bulk_near_scientific_switch_matches_naive_sum() {
        // 15 × 1.15^4900 is about 4e298; the run crosses 1e300
        for (base, owned, quantity) in [(15.0, 4_900, 10), (9_000.0, 4_900, 8), (15.0, 4_930, 5)] {
            let base = n(base);
            let naive: Num = (0..quantity).map(|k| next_unit_price(base, owned + k)).sum();
            let bulk = bulk_price(base, owned, quantity);
            assert!(
                (bulk.log10() - naive.log10()).abs() < 1e-9,
                "bulk {bulk} vs naive {naive}"
            );
        }
    }

    #[test]
    fn prices_beyond_f64_stay_finite() {
        let price = next_unit_price(n(1_400_000.0), 5_000);
        assert!(price.to_f64().is_infinite());
        assert!(price.log10() > 300.0);
        assert!(next_unit_price(n(1_400_000.0), 5_001) > price);
    }
}
