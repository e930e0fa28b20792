//! Tunables for the court subsystems.
//!
//! [`CourtConfig`] bundles every number the harem, heir, and succession
//! functions use. The core crate builds it from `reign-config.yaml`; tests
//! override individual fields.

/// Configuration for attribute rolls, harem interactions, pregnancy, and
/// succession.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourtConfig {
    /// Lower bound of an initial trait roll, in thousandths (default: 300).
    pub initial_min_permille: u32,

    /// Upper bound of an initial trait roll, in thousandths (default: 800).
    pub initial_max_permille: u32,

    /// Stamina spent on a chat or a night visit (default: 10).
    pub interaction_stamina_cost: u32,

    /// Affection gained from a chat, capped at 100 (default: 10).
    pub chat_affection_gain: u32,

    /// Chance a night visit results in a pregnancy, 0-100 (default: 40).
    pub pregnancy_chance_pct: u32,

    /// Months from conception to birth (default: 9).
    pub pregnancy_months: u32,

    /// Minimum age of a ruler taking the throne (default: 16).
    pub adulthood_age: u32,

    /// Per-cycle chance a healthy member falls ill, 0-100 (default: 5).
    pub sickness_chance_pct: u32,

    /// Per-cycle chance a sick member recovers, 0-100 (default: 50).
    pub recovery_chance_pct: u32,

    /// Chance each maternal trait is passed to a newborn, 0-100 (default: 50).
    pub trait_inheritance_pct: u32,
}

impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            initial_min_permille: 300,
            initial_max_permille: 800,
            interaction_stamina_cost: 10,
            chat_affection_gain: 10,
            pregnancy_chance_pct: 40,
            pregnancy_months: 9,
            adulthood_age: 16,
            sickness_chance_pct: 5,
            recovery_chance_pct: 50,
            trait_inheritance_pct: 50,
        }
    }
}
