//! Enumeration types for the reign simulation.
//!
//! Each enum that is shown to the player carries a `label()` with its
//! display text; serialized names are `snake_case` so that catalog and
//! configuration YAML can refer to them directly.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Dynasty status tags
// ---------------------------------------------------------------------------

/// Overall standing of the dynasty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum DynastyStatus {
    /// A golden age.
    Prosperity,
    /// Nothing remarkable.
    Stable,
    /// The dynasty is wavering.
    Unstable,
}

impl DynastyStatus {
    /// All variants.
    pub const ALL: [Self; 3] = [Self::Prosperity, Self::Stable, Self::Unstable];

    /// Display text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Prosperity => "盛世",
            Self::Stable => "稳定",
            Self::Unstable => "飘摇",
        }
    }
}

/// Condition of the realm at large.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum NationalStatus {
    /// Peace and plenty.
    Prosperous,
    /// The situation could go either way.
    Uncertain,
    /// Unrest everywhere. Raises the odds of a critical event.
    Turbulent,
}

impl NationalStatus {
    /// All variants.
    pub const ALL: [Self; 3] = [Self::Prosperous, Self::Uncertain, Self::Turbulent];

    /// Display text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Prosperous => "国泰民安",
            Self::Uncertain => "风云未定",
            Self::Turbulent => "风雨飘摇",
        }
    }

    /// The dynasty status a new reign opens with under this national status.
    pub const fn dynasty_status(self) -> DynastyStatus {
        match self {
            Self::Prosperous => DynastyStatus::Prosperity,
            Self::Uncertain => DynastyStatus::Stable,
            Self::Turbulent => DynastyStatus::Unstable,
        }
    }
}

/// State of the treasury.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ResourceStatus {
    /// Full coffers.
    Abundant,
    /// Income matches spending.
    Balanced,
    /// Running a deficit.
    Deficit,
}

impl ResourceStatus {
    /// All variants.
    pub const ALL: [Self; 3] = [Self::Abundant, Self::Balanced, Self::Deficit];

    /// Display text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Abundant => "国库充盈",
            Self::Balanced => "收支平衡",
            Self::Deficit => "国库亏空",
        }
    }
}

/// Mood of the court officials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CourtStatus {
    /// Officials cooperate.
    Harmonious,
    /// Minor friction.
    Ripple,
    /// Open factional strife.
    Turmoil,
}

impl CourtStatus {
    /// All variants.
    pub const ALL: [Self; 3] = [Self::Harmonious, Self::Ripple, Self::Turmoil];

    /// Display text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Harmonious => "和睦",
            Self::Ripple => "微澜",
            Self::Turmoil => "风波",
        }
    }
}

/// Quality of the line of succession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum HeirStatus {
    /// At least one heir of outstanding ability.
    Excellent,
    /// Heirs exist.
    Adequate,
    /// No heirs yet.
    None,
}

impl HeirStatus {
    /// Display text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "优秀",
            Self::Adequate => "尚可",
            Self::None => "无",
        }
    }
}

/// Attitude an event option expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AttitudeType {
    /// Firm hand.
    Strong,
    /// Weighing both sides.
    Balanced,
    /// Leniency.
    Lenient,
    /// Self-interest.
    Selfish,
}

impl AttitudeType {
    /// Display text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Strong => "强硬",
            Self::Balanced => "权衡",
            Self::Lenient => "宽纵",
            Self::Selfish => "私心",
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A pool that ordinary events are drawn from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EventCategory {
    /// Affairs of state raised in the front court.
    FrontCourt,
    /// Appointments, eunuchs, palace staff.
    CourtPersonnel,
    /// Affairs of the inner palace.
    Harem,
    /// What the streets are saying.
    PublicOpinion,
}

impl EventCategory {
    /// All categories in pool order.
    pub const ALL: [Self; 4] = [
        Self::FrontCourt,
        Self::CourtPersonnel,
        Self::Harem,
        Self::PublicOpinion,
    ];

    /// Display text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::FrontCourt => "前朝政务",
            Self::CourtPersonnel => "宫廷人事",
            Self::Harem => "后宫事务",
            Self::PublicOpinion => "世情风向",
        }
    }

    /// The event kind instances drawn from this category carry.
    pub const fn kind(self) -> EventKind {
        match self {
            Self::FrontCourt => EventKind::FrontCourt,
            Self::CourtPersonnel | Self::PublicOpinion => EventKind::Palace,
            Self::Harem => EventKind::Harem,
        }
    }
}

/// Kind of an event instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EventKind {
    /// Front-court business.
    FrontCourt,
    /// Palace business.
    Palace,
    /// Harem business.
    Harem,
    /// Life-or-death event. Cannot be dismissed.
    Critical,
    /// Injected by the engine itself (coronation, naming). Cannot be dismissed.
    System,
}

impl EventKind {
    /// Display text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::FrontCourt => "前朝事件",
            Self::Palace => "宫廷事件",
            Self::Harem => "后宫事件",
            Self::Critical => "危急事件",
            Self::System => "宫中要事",
        }
    }

    /// Whether instances of this kind live in a category pool.
    pub const fn is_pooled(self) -> bool {
        !matches!(self, Self::Critical | Self::System)
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Season of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Season {
    /// Months 1-3.
    Spring,
    /// Months 4-6.
    Summer,
    /// Months 7-9.
    Autumn,
    /// Months 10-12.
    Winter,
}

impl Season {
    /// Season containing the given 1-based month of the year.
    pub const fn from_month(month_of_year: u32) -> Self {
        match month_of_year {
            0..=3 => Self::Spring,
            4..=6 => Self::Summer,
            7..=9 => Self::Autumn,
            _ => Self::Winter,
        }
    }

    /// Display text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Spring => "春",
            Self::Summer => "夏",
            Self::Autumn => "秋",
            Self::Winter => "冬",
        }
    }
}

/// Coarse phase of a reign, used to bias event selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ReignStage {
    /// The first year on the throne.
    EarlyReign,
    /// The settled middle years.
    Stable,
    /// Late reign.
    MidLate,
}

/// How long one cycle of play lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CycleMode {
    /// One season (three months) per cycle. The cycle rolls over when every
    /// category pool is empty.
    #[default]
    Seasonal,
    /// One month per cycle. The player picks from a shared list and ends the
    /// month explicitly; leftovers are logged as ignored.
    Monthly,
}

impl CycleMode {
    /// Cycles that make up one year.
    pub const fn cycles_per_year(self) -> u32 {
        match self {
            Self::Seasonal => 4,
            Self::Monthly => 12,
        }
    }

    /// Months covered by one cycle.
    pub const fn months_per_cycle(self) -> u32 {
        match self {
            Self::Seasonal => 3,
            Self::Monthly => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Game state and endings
// ---------------------------------------------------------------------------

/// Top-level state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GameState {
    /// A candidate ruler is on offer and may be rerolled or confirmed.
    EmperorConfirm,
    /// The reign is under way.
    Playing,
    /// The reign is over. Terminal.
    Ended,
}

/// The way a reign ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EndingKind {
    /// The round ceiling was reached.
    NaturalEnd,
    /// A trait left its safe range.
    Collapse,
    /// Killed or overthrown by a critical event.
    Sudden,
    /// The ruler stepped down.
    Abdication,
}

impl EndingKind {
    /// Display text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::NaturalEnd => "自然终点",
            Self::Collapse => "状态坍塌",
            Self::Sudden => "突发终结",
            Self::Abdication => "退位",
        }
    }
}

/// One of the six bounded ruler traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AttributeKind {
    /// Mood.
    Mood,
    /// Intelligence.
    Intelligence,
    /// Charm.
    Charm,
    /// Reputation.
    Reputation,
    /// Popularity with the people.
    Popularity,
    /// Morality.
    Morality,
}

impl AttributeKind {
    /// Collapse scan order. The first violated trait in this order is the
    /// recorded reason.
    pub const ALL: [Self; 6] = [
        Self::Mood,
        Self::Intelligence,
        Self::Charm,
        Self::Reputation,
        Self::Popularity,
        Self::Morality,
    ];

    /// Display text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mood => "心情",
            Self::Intelligence => "才智",
            Self::Charm => "魅力",
            Self::Reputation => "声望",
            Self::Popularity => "民心",
            Self::Morality => "道德",
        }
    }
}

/// Cause of a sudden ending. Also used as the typed outcome tag on options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SuddenReason {
    /// The ruler was killed.
    Assassination,
    /// The dynasty was overthrown.
    Rebellion,
}

impl SuddenReason {
    /// Display text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Assassination => "遇刺",
            Self::Rebellion => "谋反",
        }
    }
}

// ---------------------------------------------------------------------------
// Harem and heirs
// ---------------------------------------------------------------------------

/// Harem rank. Declaration order is precedence: `Empress` outranks all.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum HaremRank {
    /// Empress. Exactly one at a time.
    Empress,
    /// Noble consort.
    NobleConsort,
    /// Consort.
    Consort,
    /// Concubine.
    Concubine,
    /// Noble lady.
    NobleLady,
}

impl HaremRank {
    /// Display text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Empress => "皇后",
            Self::NobleConsort => "贵妃",
            Self::Consort => "妃",
            Self::Concubine => "嫔",
            Self::NobleLady => "贵人",
        }
    }
}

/// Health condition of a harem member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum HealthStatus {
    /// Expecting a child.
    Pregnant {
        /// Months elapsed since conception.
        month: u32,
    },
    /// Unwell.
    Sick,
}

/// Gender of an heir.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Gender {
    /// A prince.
    Male,
    /// A princess.
    Female,
}

impl Gender {
    /// Display text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "皇子",
            Self::Female => "公主",
        }
    }
}

/// Personality trait of a harem member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum HaremTrait {
    /// Gentle and mild.
    Gentle,
    /// Talented in the arts.
    Talented,
    /// Ambitious.
    Ambitious,
    /// Virtuous.
    Virtuous,
    /// Jealous.
    Jealous,
    /// Scheming.
    Scheming,
}

impl HaremTrait {
    /// All variants.
    pub const ALL: [Self; 6] = [
        Self::Gentle,
        Self::Talented,
        Self::Ambitious,
        Self::Virtuous,
        Self::Jealous,
        Self::Scheming,
    ];

    /// Display text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gentle => "温婉",
            Self::Talented => "才情",
            Self::Ambitious => "野心",
            Self::Virtuous => "贤德",
            Self::Jealous => "善妒",
            Self::Scheming => "心机",
        }
    }
}

/// Personality trait of an heir.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum HeirTrait {
    /// Quick-witted.
    Clever,
    /// Hard-working.
    Diligent,
    /// Brave.
    Brave,
    /// Kind-hearted.
    Kind,
    /// Headstrong.
    Willful,
    /// Sickly.
    Frail,
}

impl HeirTrait {
    /// All variants.
    pub const ALL: [Self; 6] = [
        Self::Clever,
        Self::Diligent,
        Self::Brave,
        Self::Kind,
        Self::Willful,
        Self::Frail,
    ];

    /// Display text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clever => "聪慧",
            Self::Diligent => "勤勉",
            Self::Brave => "勇武",
            Self::Kind => "仁厚",
            Self::Willful => "任性",
            Self::Frail => "体弱",
        }
    }
}

/// Personality trait of a ruler. Fixed for the length of a reign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RulerTrait {
    /// Wise.
    Wise,
    /// Diligent in government.
    Diligent,
    /// Benevolent.
    Benevolent,
    /// Martial.
    Martial,
    /// Decisive.
    Decisive,
    /// Suspicious.
    Suspicious,
    /// Pleasure-seeking.
    Indulgent,
}

impl RulerTrait {
    /// All variants.
    pub const ALL: [Self; 7] = [
        Self::Wise,
        Self::Diligent,
        Self::Benevolent,
        Self::Martial,
        Self::Decisive,
        Self::Suspicious,
        Self::Indulgent,
    ];

    /// Display text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wise => "英明",
            Self::Diligent => "勤政",
            Self::Benevolent => "仁德",
            Self::Martial => "尚武",
            Self::Decisive => "果决",
            Self::Suspicious => "多疑",
            Self::Indulgent => "耽乐",
        }
    }
}

/// Something the ruler can do with a harem member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(tag = "action", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum HaremAction {
    /// Keep her company. Raises affection.
    Chat,
    /// Stay the night. May result in a pregnancy.
    SpendNight,
    /// Change her rank.
    Promote {
        /// The rank to assign.
        rank: HaremRank,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_kinds_follow_pool_mapping() {
        assert_eq!(EventCategory::FrontCourt.kind(), EventKind::FrontCourt);
        assert_eq!(EventCategory::CourtPersonnel.kind(), EventKind::Palace);
        assert_eq!(EventCategory::PublicOpinion.kind(), EventKind::Palace);
        assert_eq!(EventCategory::Harem.kind(), EventKind::Harem);
    }

    #[test]
    fn critical_and_system_are_not_pooled() {
        assert!(!EventKind::Critical.is_pooled());
        assert!(!EventKind::System.is_pooled());
        assert!(EventKind::Palace.is_pooled());
    }

    #[test]
    fn seasons_from_month() {
        assert_eq!(Season::from_month(1), Season::Spring);
        assert_eq!(Season::from_month(6), Season::Summer);
        assert_eq!(Season::from_month(7), Season::Autumn);
        assert_eq!(Season::from_month(12), Season::Winter);
    }

    #[test]
    fn empress_outranks_everyone() {
        assert!(HaremRank::Empress < HaremRank::NobleConsort);
        assert!(HaremRank::Concubine < HaremRank::NobleLady);
    }

    #[test]
    fn health_status_is_tagged() {
        let json = serde_json::to_string(&HealthStatus::Pregnant { month: 3 });
        assert_eq!(
            json.ok().as_deref(),
            Some(r#"{"status":"pregnant","month":3}"#)
        );
    }
}
