//! Read-only projection of a session, published after every transition.
//!
//! The presentation layer renders from a [`ReignSnapshot`] and never reaches
//! into engine state directly.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{CycleMode, EventCategory, GameState, ReignStage, Season};
use crate::structs::{
    Ending, EventInstance, GameLog, HaremMember, Heir, MemoryFragment, Ruler, Toast,
};

/// Derived clock readings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ClockView {
    /// 1-based cycle counter.
    pub round: u32,
    /// 1-based year of the reign.
    pub year: u32,
    /// 1-based month of the current year at the start of the cycle.
    pub month_of_year: u32,
    /// Current season.
    pub season: Season,
    /// Current reign stage.
    pub stage: ReignStage,
    /// Cycle length.
    pub cycle_mode: CycleMode,
    /// Last playable round.
    pub max_rounds: u32,
}

/// Number of unresolved events in one category pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CategoryCount {
    /// Category.
    pub category: EventCategory,
    /// Events still waiting.
    pub pending: u32,
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ReignSnapshot {
    /// Session state.
    pub state: GameState,
    /// Current ruler, or the candidate while confirming.
    pub ruler: Option<Ruler>,
    /// Display form of the current year, e.g. "永泰三年".
    pub reign_year: Option<String>,
    /// Clock readings.
    pub clock: ClockView,
    /// Pending events per category.
    pub pool_counts: Vec<CategoryCount>,
    /// Every ordinary event drawn this cycle, processed or not.
    pub cycle_events: Vec<EventInstance>,
    /// Events resolved this cycle.
    pub processed_this_cycle: u32,
    /// The event in the foreground.
    pub current_event: Option<EventInstance>,
    /// System events waiting their turn.
    pub queued_system_events: u32,
    /// Active toast.
    pub toast: Option<Toast>,
    /// Chronicle, newest first.
    pub logs: Vec<GameLog>,
    /// Memory fragments with duplicates removed.
    pub memory_fragments: Vec<MemoryFragment>,
    /// Latest front-court narrative line.
    pub court_narrative: String,
    /// Latest palace narrative line.
    pub palace_narrative: String,
    /// Harem, highest rank first.
    pub harem: Vec<HaremMember>,
    /// Heirs in order of birth.
    pub heirs: Vec<Heir>,
    /// How the reign ended, once it has.
    pub ending: Option<Ending>,
    /// Closing text for the ending screen.
    pub ending_text: Option<String>,
}

impl ReignSnapshot {
    /// Pending count for one category.
    pub fn pending(&self, category: EventCategory) -> u32 {
        self.pool_counts
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.pending)
    }

    /// The designated crown prince, if any.
    pub fn crown_prince(&self) -> Option<&Heir> {
        self.heirs.iter().find(|h| h.is_crown_prince)
    }
}
