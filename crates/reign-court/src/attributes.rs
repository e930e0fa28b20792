//! Attribute updates for the ruler.
//!
//! Every write to [`Attributes`] goes through this module. Traits are
//! clamped to `0.0..=1.0` and stamina to `0..=MAX_STAMINA`; out-of-range
//! input is clamped rather than rejected.

use rand::Rng;
use rust_decimal::Decimal;

use reign_types::{AttributeDelta, AttributeKind, Attributes, MAX_STAMINA};

use crate::config::CourtConfig;

/// Predecessor values at or above this (in thousandths) count as high.
const TENDENCY_HIGH_PERMILLE: i64 = 650;

/// Predecessor values at or below this (in thousandths) count as low.
const TENDENCY_LOW_PERMILLE: i64 = 350;

/// Clamp a trait to `0.0..=1.0`.
pub fn clamp_trait(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE)
}

/// Add `delta` to `attrs`, clamping every component.
pub fn apply_delta(attrs: &Attributes, delta: &AttributeDelta) -> Attributes {
    let mut next = attrs.clone();
    for kind in AttributeKind::ALL {
        let raw = attrs.trait_value(kind).saturating_add(delta.trait_delta(kind));
        *next.trait_mut(kind) = clamp_trait(raw);
    }
    next.stamina = clamp_stamina(i64::from(attrs.stamina).saturating_add(i64::from(delta.stamina)));
    next
}

/// Spend stamina, flooring at zero.
pub fn deduct_stamina(attrs: &Attributes, cost: u32) -> Attributes {
    let mut next = attrs.clone();
    next.stamina = attrs.stamina.saturating_sub(cost).min(MAX_STAMINA);
    next
}

/// Refill stamina to [`MAX_STAMINA`].
pub fn restore_stamina(attrs: &Attributes) -> Attributes {
    let mut next = attrs.clone();
    next.stamina = MAX_STAMINA;
    next
}

fn clamp_stamina(raw: i64) -> u32 {
    u32::try_from(raw.clamp(0, i64::from(MAX_STAMINA))).unwrap_or(0)
}

/// Roll a fresh set of attributes for a newly confirmed ruler.
///
/// Each trait is drawn uniformly from the configured permille band; stamina
/// starts full.
pub fn roll_attributes(config: &CourtConfig, rng: &mut impl Rng) -> Attributes {
    let low = config.initial_min_permille.min(config.initial_max_permille);
    let high = config.initial_max_permille.max(low);
    let mut attrs = Attributes::default();
    for kind in AttributeKind::ALL {
        let roll = rng.random_range(low..=high);
        *attrs.trait_mut(kind) = clamp_trait(Decimal::new(i64::from(roll), 3));
    }
    attrs
}

/// Re-roll one trait for a successor, anchored on the predecessor's value.
///
/// A high predecessor value lands the successor in `0.55..=0.75`, a low one
/// in `0.25..=0.45`, anything else in `0.40..=0.60`. Exact values are never
/// carried across reigns.
pub fn inherit_tendency(previous: Decimal, rng: &mut impl Rng) -> Decimal {
    let high = Decimal::new(TENDENCY_HIGH_PERMILLE, 3);
    let low = Decimal::new(TENDENCY_LOW_PERMILLE, 3);
    let (from, to) = if previous >= high {
        (550, 750)
    } else if previous <= low {
        (250, 450)
    } else {
        (400, 600)
    };
    let roll: i64 = rng.random_range(from..=to);
    clamp_trait(Decimal::new(roll, 3))
}

/// Successor attributes: full stamina, every trait via [`inherit_tendency`].
pub fn inherit_attributes(previous: &Attributes, rng: &mut impl Rng) -> Attributes {
    let mut attrs = Attributes::default();
    for kind in AttributeKind::ALL {
        *attrs.trait_mut(kind) = inherit_tendency(previous.trait_value(kind), rng);
    }
    attrs
}

/// Number of traits strictly below `threshold`.
pub fn count_below(attrs: &Attributes, threshold: Decimal) -> u32 {
    let mut count: u32 = 0;
    for kind in AttributeKind::ALL {
        if attrs.trait_value(kind) < threshold {
            count = count.saturating_add(1);
        }
    }
    count
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn in_range(attrs: &Attributes) -> bool {
        attrs.stamina <= MAX_STAMINA
            && AttributeKind::ALL.iter().all(|k| {
                let v = attrs.trait_value(*k);
                v >= Decimal::ZERO && v <= Decimal::ONE
            })
    }

    #[test]
    fn popularity_clamps_at_one() {
        let delta = AttributeDelta::single(AttributeKind::Popularity, Decimal::new(2, 1));
        let mut attrs = Attributes::default();
        for _ in 0..3 {
            attrs = apply_delta(&attrs, &delta);
        }
        assert_eq!(attrs.popularity, Decimal::ONE);
    }

    #[test]
    fn large_deltas_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut attrs = Attributes::default();
        for _ in 0..200 {
            let delta = AttributeDelta {
                stamina: rng.random_range(-300..=300),
                mood: Decimal::new(rng.random_range(-3000..=3000), 3),
                intelligence: Decimal::new(rng.random_range(-3000..=3000), 3),
                charm: Decimal::new(rng.random_range(-3000..=3000), 3),
                reputation: Decimal::new(rng.random_range(-3000..=3000), 3),
                popularity: Decimal::new(rng.random_range(-3000..=3000), 3),
                morality: Decimal::new(rng.random_range(-3000..=3000), 3),
            };
            attrs = apply_delta(&attrs, &delta);
            assert!(in_range(&attrs));
        }
    }

    #[test]
    fn stamina_floors_at_zero() {
        let attrs = Attributes {
            stamina: 5,
            ..Attributes::default()
        };
        assert_eq!(deduct_stamina(&attrs, 10).stamina, 0);
        assert_eq!(restore_stamina(&attrs).stamina, MAX_STAMINA);
    }

    #[test]
    fn rolled_traits_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = CourtConfig::default();
        for _ in 0..50 {
            let attrs = roll_attributes(&config, &mut rng);
            for kind in AttributeKind::ALL {
                let v = attrs.trait_value(kind);
                assert!(v >= Decimal::new(3, 1) && v <= Decimal::new(8, 1));
            }
            assert_eq!(attrs.stamina, MAX_STAMINA);
        }
    }

    #[test]
    fn tendencies_follow_predecessor() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..50 {
            let high = inherit_tendency(Decimal::new(9, 1), &mut rng);
            assert!(high >= Decimal::new(55, 2) && high <= Decimal::new(75, 2));
            let low = inherit_tendency(Decimal::new(2, 1), &mut rng);
            assert!(low >= Decimal::new(25, 2) && low <= Decimal::new(45, 2));
            let mid = inherit_tendency(Decimal::new(5, 1), &mut rng);
            assert!(mid >= Decimal::new(4, 1) && mid <= Decimal::new(6, 1));
        }
    }

    #[test]
    fn counts_low_traits() {
        let attrs = Attributes {
            mood: Decimal::new(1, 1),
            charm: Decimal::new(29, 2),
            ..Attributes::default()
        };
        assert_eq!(count_below(&attrs, Decimal::new(3, 1)), 2);
    }
}
