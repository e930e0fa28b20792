//! Critical-event gate.
//!
//! One uniform draw per check. The chance grows with national turmoil and
//! with the number of weak traits, and is capped.

use rand::Rng;
use tracing::debug;

use reign_court::attributes::count_below;
use reign_types::{Attributes, NationalStatus};

use crate::config::{CriticalConfig, pct_to_decimal};

/// Chance of a critical event, as a whole percentage.
pub fn probability_pct(
    attrs: &Attributes,
    national: NationalStatus,
    config: &CriticalConfig,
) -> u32 {
    let mut pct = config.base_pct;
    if national == NationalStatus::Turbulent {
        pct = pct.saturating_add(config.turbulent_bonus_pct);
    }
    let weak = count_below(attrs, pct_to_decimal(config.low_attribute_threshold_pct));
    let low_bonus = config
        .low_attribute_bonus_pct
        .saturating_mul(weak)
        .min(config.max_low_attribute_bonus_pct);
    pct.saturating_add(low_bonus).min(config.cap_pct)
}

/// Roll once against `pct`.
pub fn roll(rng: &mut impl Rng, pct: u32) -> bool {
    if pct == 0 {
        return false;
    }
    let draw = rng.random_range(1..=100_u32);
    let hit = draw <= pct;
    debug!(pct, draw, hit, "critical gate");
    hit
}
