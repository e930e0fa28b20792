//! Core entity structs: the ruler and their attributes, event templates and
//! instances, the harem, heirs, and the chronicle records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    AttitudeType, AttributeKind, CourtStatus, DynastyStatus, EndingKind, EventCategory, EventKind,
    Gender, HaremRank, HaremTrait, HealthStatus, HeirStatus, HeirTrait, NationalStatus, ReignStage,
    ResourceStatus, RulerTrait, SuddenReason,
};
use crate::ids::{EventId, FragmentId, HeirId, LogId, MemberId, OptionId, RulerId};

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// Full stamina, restored at every cycle rollover.
pub const MAX_STAMINA: u32 = 100;

/// The ruler's bounded numeric state.
///
/// Stamina lives in `0..=100`; the six traits are [`Decimal`] values in
/// `0.0..=1.0`. Writes go through the clamping helpers in `reign-court`, so
/// no sequence of deltas can leave a value out of range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Attributes {
    /// Energy for events and harem visits this cycle.
    pub stamina: u32,
    /// Mood.
    #[ts(as = "String")]
    pub mood: Decimal,
    /// Intelligence.
    #[ts(as = "String")]
    pub intelligence: Decimal,
    /// Charm.
    #[ts(as = "String")]
    pub charm: Decimal,
    /// Reputation.
    #[ts(as = "String")]
    pub reputation: Decimal,
    /// Popularity with the people.
    #[ts(as = "String")]
    pub popularity: Decimal,
    /// Morality.
    #[ts(as = "String")]
    pub morality: Decimal,
}

impl Attributes {
    /// Read one trait.
    pub const fn trait_value(&self, kind: AttributeKind) -> Decimal {
        match kind {
            AttributeKind::Mood => self.mood,
            AttributeKind::Intelligence => self.intelligence,
            AttributeKind::Charm => self.charm,
            AttributeKind::Reputation => self.reputation,
            AttributeKind::Popularity => self.popularity,
            AttributeKind::Morality => self.morality,
        }
    }

    /// Mutable access to one trait.
    pub const fn trait_mut(&mut self, kind: AttributeKind) -> &mut Decimal {
        match kind {
            AttributeKind::Mood => &mut self.mood,
            AttributeKind::Intelligence => &mut self.intelligence,
            AttributeKind::Charm => &mut self.charm,
            AttributeKind::Reputation => &mut self.reputation,
            AttributeKind::Popularity => &mut self.popularity,
            AttributeKind::Morality => &mut self.morality,
        }
    }
}

impl Default for Attributes {
    /// Full stamina and every trait at 0.5.
    fn default() -> Self {
        let half = Decimal::new(5, 1);
        Self {
            stamina: MAX_STAMINA,
            mood: half,
            intelligence: half,
            charm: half,
            reputation: half,
            popularity: half,
            morality: half,
        }
    }
}

/// A change to apply to [`Attributes`]. Missing fields are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct AttributeDelta {
    /// Stamina change.
    pub stamina: i32,
    /// Mood change.
    #[ts(as = "String")]
    pub mood: Decimal,
    /// Intelligence change.
    #[ts(as = "String")]
    pub intelligence: Decimal,
    /// Charm change.
    #[ts(as = "String")]
    pub charm: Decimal,
    /// Reputation change.
    #[ts(as = "String")]
    pub reputation: Decimal,
    /// Popularity change.
    #[ts(as = "String")]
    pub popularity: Decimal,
    /// Morality change.
    #[ts(as = "String")]
    pub morality: Decimal,
}

impl AttributeDelta {
    /// Read the change for one trait.
    pub const fn trait_delta(&self, kind: AttributeKind) -> Decimal {
        match kind {
            AttributeKind::Mood => self.mood,
            AttributeKind::Intelligence => self.intelligence,
            AttributeKind::Charm => self.charm,
            AttributeKind::Reputation => self.reputation,
            AttributeKind::Popularity => self.popularity,
            AttributeKind::Morality => self.morality,
        }
    }

    /// A delta touching a single trait.
    pub fn single(kind: AttributeKind, amount: Decimal) -> Self {
        let mut delta = Self::default();
        match kind {
            AttributeKind::Mood => delta.mood = amount,
            AttributeKind::Intelligence => delta.intelligence = amount,
            AttributeKind::Charm => delta.charm = amount,
            AttributeKind::Reputation => delta.reputation = amount,
            AttributeKind::Popularity => delta.popularity = amount,
            AttributeKind::Morality => delta.morality = amount,
        }
        delta
    }
}

// ---------------------------------------------------------------------------
// Ruler
// ---------------------------------------------------------------------------

/// The monarch of the current reign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Ruler {
    /// Unique identifier.
    pub id: RulerId,
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Era name proclaimed at accession.
    pub reign_title: String,
    /// Years on the throne, starting at 1.
    pub years_in_power: u32,
    /// Dynasty standing.
    pub dynasty_status: DynastyStatus,
    /// State of the realm.
    pub national_status: NationalStatus,
    /// State of the treasury.
    pub resource_status: ResourceStatus,
    /// State of the court.
    pub court_status: CourtStatus,
    /// State of the succession.
    pub heir_status: HeirStatus,
    /// Two or three personality traits, fixed for the reign.
    pub traits: Vec<RulerTrait>,
    /// Numeric state.
    pub attributes: Attributes,
    /// Position in the dynasty, starting at 1.
    pub generation: u32,
}

// ---------------------------------------------------------------------------
// Event templates
// ---------------------------------------------------------------------------

/// A choice within an [`EventTemplate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OptionTemplate {
    /// Button text.
    pub text: String,
    /// Toast shown immediately after choosing.
    pub feedback: String,
    /// Permanent chronicle entry, if any.
    #[serde(default)]
    pub log_text: Option<String>,
    /// Attitude the choice expresses.
    #[serde(default)]
    pub attitude: Option<AttitudeType>,
    /// Attribute changes.
    #[serde(default)]
    pub delta: AttributeDelta,
    /// Typed life-or-death outcome. Only meaningful on critical events.
    #[serde(default)]
    pub outcome: Option<SuddenReason>,
}

/// Immutable event content from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventTemplate {
    /// Heading.
    pub title: String,
    /// Body text.
    pub description: String,
    /// One or more choices.
    pub options: Vec<OptionTemplate>,
    /// Stages this template favours. Empty means every stage, unweighted.
    #[serde(default)]
    pub stages: Vec<ReignStage>,
}

// ---------------------------------------------------------------------------
// Event instances
// ---------------------------------------------------------------------------

/// Side effect an engine-generated option performs when chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "effect", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum OptionEffect {
    /// Make this member the empress.
    ElevateToEmpress {
        /// Member to elevate.
        member_id: MemberId,
    },
    /// Give an heir this name.
    NameHeir {
        /// Heir to name.
        heir_id: HeirId,
        /// Chosen name.
        name: String,
    },
}

/// A choice within an [`EventInstance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventOption {
    /// Unique identifier.
    pub id: OptionId,
    /// Button text.
    pub text: String,
    /// Toast shown immediately after choosing.
    pub feedback: String,
    /// Permanent chronicle entry, if any.
    pub log_text: Option<String>,
    /// Attitude the choice expresses.
    pub attitude: Option<AttitudeType>,
    /// Attribute changes.
    pub delta: AttributeDelta,
    /// Typed life-or-death outcome.
    pub outcome: Option<SuddenReason>,
    /// Engine-side effect, for system events.
    pub effect: Option<OptionEffect>,
}

/// A template bound to an identity and per-cycle processing state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventInstance {
    /// Unique identifier.
    pub id: EventId,
    /// Heading.
    pub title: String,
    /// Kind of event.
    pub kind: EventKind,
    /// Source pool. `None` for critical and system events.
    pub category: Option<EventCategory>,
    /// Body text.
    pub description: String,
    /// Choices.
    pub options: Vec<EventOption>,
    /// Set once the player has chosen an option.
    pub is_processed: bool,
    /// Feedback of the chosen option.
    pub chosen_feedback: Option<String>,
    /// Stage the instance was drawn in.
    pub stage: ReignStage,
}

impl EventInstance {
    /// Look up an option by ID.
    pub fn option(&self, id: OptionId) -> Option<&EventOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Whether the player may close this event without choosing.
    pub const fn is_dismissible(&self) -> bool {
        self.kind.is_pooled()
    }
}

// ---------------------------------------------------------------------------
// Harem and heirs
// ---------------------------------------------------------------------------

/// A consort in the inner palace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HaremMember {
    /// Unique identifier.
    pub id: MemberId,
    /// Name.
    pub name: String,
    /// Rank.
    pub rank: HaremRank,
    /// Age in years.
    pub age: u32,
    /// Family and court backing, 0-100.
    pub influence: u32,
    /// Affection for the ruler, 0-100.
    pub affection: u32,
    /// Children borne.
    pub children: u32,
    /// One or two traits.
    pub traits: Vec<HaremTrait>,
    /// Current condition, if notable.
    pub health: Option<HealthStatus>,
}

impl HaremMember {
    /// Whether she is currently expecting.
    pub const fn is_pregnant(&self) -> bool {
        matches!(self.health, Some(HealthStatus::Pregnant { .. }))
    }
}

/// A child of the ruler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Heir {
    /// Unique identifier.
    pub id: HeirId,
    /// Name.
    pub name: String,
    /// Gender.
    pub gender: Gender,
    /// Age in years.
    pub age: u32,
    /// Looks, 0-100.
    pub looks: u32,
    /// Ability, 0-100.
    pub ability: u32,
    /// Influence, 0-100.
    pub influence: u32,
    /// Name of the mother.
    pub mother_name: String,
    /// Traits.
    pub traits: Vec<HeirTrait>,
    /// Whether this heir is the designated successor.
    pub is_crown_prince: bool,
}

// ---------------------------------------------------------------------------
// Chronicle
// ---------------------------------------------------------------------------

/// A permanent entry in the reign's chronicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameLog {
    /// Unique identifier.
    pub id: LogId,
    /// Round the entry was written in.
    pub round: u32,
    /// Entry text.
    pub text: String,
}

/// Something a subject remembers about the reign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MemoryFragment {
    /// Unique identifier.
    pub id: FragmentId,
    /// Who is remembering.
    pub speaker: String,
    /// What they say.
    pub content: String,
}

/// Transient feedback shown after a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Toast {
    /// Text to show.
    pub text: String,
}

/// How a reign ended, with its reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Ending {
    /// The round ceiling was reached.
    NaturalEnd,
    /// A trait left its safe range.
    Collapse {
        /// The first violated trait in scan order.
        reason: AttributeKind,
    },
    /// Killed or overthrown.
    Sudden {
        /// What happened.
        reason: SuddenReason,
    },
    /// The ruler stepped down.
    Abdication,
}

impl Ending {
    /// The ending's kind without its reason.
    pub const fn kind(self) -> EndingKind {
        match self {
            Self::NaturalEnd => EndingKind::NaturalEnd,
            Self::Collapse { .. } => EndingKind::Collapse,
            Self::Sudden { .. } => EndingKind::Sudden,
            Self::Abdication => EndingKind::Abdication,
        }
    }
}

/// Pools of names used when generating people.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NameLists {
    /// Ruler surnames.
    pub surnames: Vec<String>,
    /// Ruler given names.
    pub given_names: Vec<String>,
    /// Harem member names.
    pub consort_names: Vec<String>,
    /// Given names for heirs.
    pub heir_names: Vec<String>,
    /// Era names.
    pub reign_titles: Vec<String>,
}
