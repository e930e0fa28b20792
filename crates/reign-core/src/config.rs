//! Configuration loading and typed config structures for the reign
//! simulation.
//!
//! The canonical configuration lives in `reign-config.yaml` at the project
//! root. Every field has a default, so an empty file (or no file) yields a
//! playable session. Thresholds are whole percentages so that they convert
//! to exact decimals.

use std::path::Path;

use reign_court::CourtConfig;
use reign_types::CycleMode;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level reign configuration. Mirrors `reign-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReignConfig {
    /// Seed and cycle length.
    #[serde(default)]
    pub session: SessionConfig,

    /// Round ceiling and stage boundaries.
    #[serde(default)]
    pub clock: ClockConfig,

    /// Event draw sizes.
    #[serde(default)]
    pub pool: PoolConfig,

    /// Attribute rolls and costs.
    #[serde(default)]
    pub attributes: AttributeConfig,

    /// Ending thresholds and policy.
    #[serde(default)]
    pub ending: EndingConfig,

    /// Critical-event odds.
    #[serde(default)]
    pub critical: CriticalConfig,

    /// Harem, pregnancy, and succession.
    #[serde(default)]
    pub court: CourtSection,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReignConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Plain court configuration for the `reign-court` functions.
    pub const fn court_config(&self) -> CourtConfig {
        CourtConfig {
            initial_min_permille: self.attributes.initial_min_permille,
            initial_max_permille: self.attributes.initial_max_permille,
            interaction_stamina_cost: self.court.interaction_stamina_cost,
            chat_affection_gain: self.court.chat_affection_gain,
            pregnancy_chance_pct: self.court.pregnancy_chance_pct,
            pregnancy_months: self.court.pregnancy_months,
            adulthood_age: self.court.adulthood_age,
            sickness_chance_pct: self.court.sickness_chance_pct,
            recovery_chance_pct: self.court.recovery_chance_pct,
            trait_inheritance_pct: self.court.trait_inheritance_pct,
        }
    }
}

/// Convert a whole percentage into an exact fraction (`10` -> `0.10`).
pub fn pct_to_decimal(pct: u32) -> Decimal {
    Decimal::new(i64::from(pct), 2)
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Session-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Seasonal (3 months per cycle) or monthly play.
    #[serde(default)]
    pub cycle_mode: CycleMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            cycle_mode: CycleMode::default(),
        }
    }
}

/// Clock settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClockConfig {
    /// Last playable round; advancing past it ends the reign naturally.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    /// Elapsed months below which the reign is in its early stage.
    #[serde(default = "default_early_reign_months")]
    pub early_reign_months: u32,

    /// Elapsed months below which the reign is stable; mid-late after.
    #[serde(default = "default_stable_until_months")]
    pub stable_until_months: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
            early_reign_months: default_early_reign_months(),
            stable_until_months: default_stable_until_months(),
        }
    }
}

/// Event draw sizes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PoolConfig {
    /// Fewest events per category per seasonal cycle.
    #[serde(default = "default_seasonal_min")]
    pub seasonal_min_per_category: u32,

    /// Most events per category per seasonal cycle.
    #[serde(default = "default_seasonal_max")]
    pub seasonal_max_per_category: u32,

    /// Fewest events in a monthly cycle, across all categories.
    #[serde(default = "default_monthly_min")]
    pub monthly_min_total: u32,

    /// Most events in a monthly cycle, across all categories.
    #[serde(default = "default_monthly_max")]
    pub monthly_max_total: u32,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            seasonal_min_per_category: default_seasonal_min(),
            seasonal_max_per_category: default_seasonal_max(),
            monthly_min_total: default_monthly_min(),
            monthly_max_total: default_monthly_max(),
        }
    }
}

/// Attribute rolls and costs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttributeConfig {
    /// Lower bound of an initial trait roll, in thousandths.
    #[serde(default = "default_initial_min_permille")]
    pub initial_min_permille: u32,

    /// Upper bound of an initial trait roll, in thousandths.
    #[serde(default = "default_initial_max_permille")]
    pub initial_max_permille: u32,

    /// Stamina spent per resolved non-system event.
    #[serde(default = "default_stamina_cost")]
    pub stamina_cost_per_event: u32,
}

impl Default for AttributeConfig {
    fn default() -> Self {
        Self {
            initial_min_permille: default_initial_min_permille(),
            initial_max_permille: default_initial_max_permille(),
            stamina_cost_per_event: default_stamina_cost(),
        }
    }
}

/// Which extremes of a trait end the reign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdPolicy {
    /// Only falling below the low threshold collapses the reign.
    LowOnly,
    /// Falling below the low threshold or rising above the high one.
    #[default]
    LowAndHigh,
}

/// Ending rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EndingConfig {
    /// A trait strictly below this percentage collapses the reign.
    #[serde(default = "default_low_threshold_pct")]
    pub low_threshold_pct: u32,

    /// A trait strictly above this percentage collapses the reign under
    /// [`ThresholdPolicy::LowAndHigh`].
    #[serde(default = "default_high_threshold_pct")]
    pub high_threshold_pct: u32,

    /// Which extremes count.
    #[serde(default)]
    pub threshold_policy: ThresholdPolicy,

    /// Fall back to text markers when a critical option has no typed outcome.
    #[serde(default = "default_true")]
    pub keyword_shim: bool,

    /// Markers of the ruler's death.
    #[serde(default = "default_assassination_keywords")]
    pub assassination_keywords: Vec<String>,

    /// Markers of the dynasty's fall, checked in the log text.
    #[serde(default = "default_rebellion_keywords")]
    pub rebellion_keywords: Vec<String>,

    /// Markers of the dynasty's fall, checked in the option text.
    #[serde(default = "default_rebellion_option_keywords")]
    pub rebellion_option_keywords: Vec<String>,

    /// First round in which the ruler may abdicate.
    #[serde(default = "default_abdication_min_round")]
    pub abdication_min_round: u32,
}

impl Default for EndingConfig {
    fn default() -> Self {
        Self {
            low_threshold_pct: default_low_threshold_pct(),
            high_threshold_pct: default_high_threshold_pct(),
            threshold_policy: ThresholdPolicy::default(),
            keyword_shim: true,
            assassination_keywords: default_assassination_keywords(),
            rebellion_keywords: default_rebellion_keywords(),
            rebellion_option_keywords: default_rebellion_option_keywords(),
            abdication_min_round: default_abdication_min_round(),
        }
    }
}

/// Critical-event odds, all in whole percentages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CriticalConfig {
    /// Base chance per check.
    #[serde(default = "default_critical_base_pct")]
    pub base_pct: u32,

    /// Added when the realm is turbulent.
    #[serde(default = "default_turbulent_bonus_pct")]
    pub turbulent_bonus_pct: u32,

    /// Added per trait below `low_attribute_threshold_pct`.
    #[serde(default = "default_low_attribute_bonus_pct")]
    pub low_attribute_bonus_pct: u32,

    /// Trait level counted as low for the bonus above.
    #[serde(default = "default_low_attribute_threshold_pct")]
    pub low_attribute_threshold_pct: u32,

    /// Cap on the total low-trait contribution.
    #[serde(default = "default_max_low_attribute_bonus_pct")]
    pub max_low_attribute_bonus_pct: u32,

    /// Cap on the final chance.
    #[serde(default = "default_critical_cap_pct")]
    pub cap_pct: u32,

    /// Also check after every resolved ordinary event while events remain.
    #[serde(default = "default_true")]
    pub recheck_after_choice: bool,
}

impl Default for CriticalConfig {
    fn default() -> Self {
        Self {
            base_pct: default_critical_base_pct(),
            turbulent_bonus_pct: default_turbulent_bonus_pct(),
            low_attribute_bonus_pct: default_low_attribute_bonus_pct(),
            low_attribute_threshold_pct: default_low_attribute_threshold_pct(),
            max_low_attribute_bonus_pct: default_max_low_attribute_bonus_pct(),
            cap_pct: default_critical_cap_pct(),
            recheck_after_choice: true,
        }
    }
}

/// Harem, pregnancy, and succession tunables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CourtSection {
    /// Stamina per chat or night visit.
    #[serde(default = "default_interaction_cost")]
    pub interaction_stamina_cost: u32,

    /// Affection gained per chat.
    #[serde(default = "default_chat_affection_gain")]
    pub chat_affection_gain: u32,

    /// Conception chance per night visit.
    #[serde(default = "default_pregnancy_chance_pct")]
    pub pregnancy_chance_pct: u32,

    /// Months to term.
    #[serde(default = "default_pregnancy_months")]
    pub pregnancy_months: u32,

    /// Youngest age at which a successor reigns.
    #[serde(default = "default_adulthood_age")]
    pub adulthood_age: u32,

    /// Per-cycle sickness chance.
    #[serde(default = "default_sickness_chance_pct")]
    pub sickness_chance_pct: u32,

    /// Per-cycle recovery chance.
    #[serde(default = "default_recovery_chance_pct")]
    pub recovery_chance_pct: u32,

    /// Chance each maternal trait passes to a newborn.
    #[serde(default = "default_trait_inheritance_pct")]
    pub trait_inheritance_pct: u32,
}

impl Default for CourtSection {
    fn default() -> Self {
        Self {
            interaction_stamina_cost: default_interaction_cost(),
            chat_affection_gain: default_chat_affection_gain(),
            pregnancy_chance_pct: default_pregnancy_chance_pct(),
            pregnancy_months: default_pregnancy_months(),
            adulthood_age: default_adulthood_age(),
            sickness_chance_pct: default_sickness_chance_pct(),
            recovery_chance_pct: default_recovery_chance_pct(),
            trait_inheritance_pct: default_trait_inheritance_pct(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_seed() -> u64 {
    42
}

const fn default_true() -> bool {
    true
}

const fn default_max_rounds() -> u32 {
    50
}

const fn default_early_reign_months() -> u32 {
    12
}

const fn default_stable_until_months() -> u32 {
    60
}

const fn default_seasonal_min() -> u32 {
    3
}

const fn default_seasonal_max() -> u32 {
    5
}

const fn default_monthly_min() -> u32 {
    4
}

const fn default_monthly_max() -> u32 {
    6
}

const fn default_initial_min_permille() -> u32 {
    300
}

const fn default_initial_max_permille() -> u32 {
    800
}

const fn default_stamina_cost() -> u32 {
    10
}

const fn default_low_threshold_pct() -> u32 {
    10
}

const fn default_high_threshold_pct() -> u32 {
    90
}

fn default_assassination_keywords() -> Vec<String> {
    vec!["身亡".to_owned()]
}

fn default_rebellion_keywords() -> Vec<String> {
    vec!["覆灭".to_owned(), "谋反成功".to_owned()]
}

fn default_rebellion_option_keywords() -> Vec<String> {
    vec!["成功".to_owned(), "覆灭".to_owned()]
}

const fn default_abdication_min_round() -> u32 {
    1
}

const fn default_critical_base_pct() -> u32 {
    5
}

const fn default_turbulent_bonus_pct() -> u32 {
    20
}

const fn default_low_attribute_bonus_pct() -> u32 {
    10
}

const fn default_low_attribute_threshold_pct() -> u32 {
    30
}

const fn default_max_low_attribute_bonus_pct() -> u32 {
    40
}

const fn default_critical_cap_pct() -> u32 {
    80
}

const fn default_interaction_cost() -> u32 {
    10
}

const fn default_chat_affection_gain() -> u32 {
    10
}

const fn default_pregnancy_chance_pct() -> u32 {
    40
}

const fn default_pregnancy_months() -> u32 {
    9
}

const fn default_adulthood_age() -> u32 {
    16
}

const fn default_sickness_chance_pct() -> u32 {
    5
}

const fn default_recovery_chance_pct() -> u32 {
    50
}

const fn default_trait_inheritance_pct() -> u32 {
    50
}

fn default_log_level() -> String {
    "info".to_owned()
}
