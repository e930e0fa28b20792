//! Reign clock: rounds, years, months, seasons, and stages.
//!
//! The round counter is the single source of truth. Year, month of year,
//! season, and stage are derived from it and the cycle mode, never stored.
//! All derivations use checked or saturating arithmetic.

use reign_types::{ClockView, CycleMode, ReignStage, Season};

use crate::config::ClockConfig;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Round counter would overflow.
    #[error("round counter overflow: cannot advance beyond u32::MAX")]
    RoundOverflow,

    /// Invalid clock configuration.
    #[error("invalid clock configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// What changed when the clock advanced one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    /// The new round.
    pub round: u32,
    /// Whether the new round opens a new year.
    pub new_year: bool,
    /// Whether the new round is past the ceiling.
    pub past_ceiling: bool,
}

/// Round-based clock for one reign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReignClock {
    /// Current round, 1-based.
    round: u32,

    /// Seasonal or monthly cycles.
    mode: CycleMode,

    /// Last playable round.
    max_rounds: u32,

    /// Stage boundary between early reign and stable, in elapsed months.
    early_reign_months: u32,

    /// Stage boundary between stable and mid-late, in elapsed months.
    stable_until_months: u32,
}

impl ReignClock {
    /// Create a clock at round 1.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `max_rounds` is zero or the
    /// stage boundaries are out of order.
    pub fn new(config: &ClockConfig, mode: CycleMode) -> Result<Self, ClockError> {
        if config.max_rounds == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "max_rounds must be at least 1".to_owned(),
            });
        }
        if config.early_reign_months > config.stable_until_months {
            return Err(ClockError::InvalidConfig {
                reason: "early_reign_months must not exceed stable_until_months".to_owned(),
            });
        }
        Ok(Self {
            round: 1,
            mode,
            max_rounds: config.max_rounds,
            early_reign_months: config.early_reign_months,
            stable_until_months: config.stable_until_months,
        })
    }

    /// Move back to round 1.
    pub const fn reset(&mut self) {
        self.round = 1;
    }

    /// Current round.
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Cycle mode.
    pub const fn mode(&self) -> CycleMode {
        self.mode
    }

    /// Cycles in one year.
    pub const fn cycles_per_year(&self) -> u32 {
        self.mode.cycles_per_year()
    }

    /// Zero-based position of the current cycle within its year.
    pub const fn cycle_in_year(&self) -> u32 {
        self.round.saturating_sub(1) % self.mode.cycles_per_year()
    }

    /// Year of the reign: `(round - 1) / cycles_per_year + 1`.
    pub const fn year(&self) -> u32 {
        (self.round.saturating_sub(1) / self.mode.cycles_per_year()).saturating_add(1)
    }

    /// First month of the year covered by the current cycle, 1-based.
    pub const fn month_of_year(&self) -> u32 {
        self.cycle_in_year()
            .saturating_mul(self.mode.months_per_cycle())
            .saturating_add(1)
    }

    /// Current season.
    pub const fn season(&self) -> Season {
        Season::from_month(self.month_of_year())
    }

    /// Months elapsed since the reign began.
    pub const fn elapsed_months(&self) -> u32 {
        self.round
            .saturating_sub(1)
            .saturating_mul(self.mode.months_per_cycle())
    }

    /// Reign stage derived from elapsed months.
    pub const fn stage(&self) -> ReignStage {
        let months = self.elapsed_months();
        if months < self.early_reign_months {
            ReignStage::EarlyReign
        } else if months < self.stable_until_months {
            ReignStage::Stable
        } else {
            ReignStage::MidLate
        }
    }

    /// Whether the round has gone past the ceiling.
    pub const fn is_past_ceiling(&self) -> bool {
        self.round > self.max_rounds
    }

    /// Advance one cycle.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::RoundOverflow`] if the round counter would wrap.
    pub fn advance(&mut self) -> Result<Advance, ClockError> {
        self.round = self.round.checked_add(1).ok_or(ClockError::RoundOverflow)?;
        Ok(Advance {
            round: self.round,
            new_year: self.cycle_in_year() == 0,
            past_ceiling: self.is_past_ceiling(),
        })
    }

    /// Read-only view for the snapshot.
    pub const fn view(&self) -> ClockView {
        ClockView {
            round: self.round,
            year: self.year(),
            month_of_year: self.month_of_year(),
            season: self.season(),
            stage: self.stage(),
            cycle_mode: self.mode,
            max_rounds: self.max_rounds,
        }
    }
}
