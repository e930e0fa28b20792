//! Mutable session state and its read-only projection.
//!
//! [`ReignState`] bundles everything one session owns. The controller is the
//! only writer; hosts read [`ReignSnapshot`]s.

use std::collections::VecDeque;

use reign_court::harem::sorted_by_rank;
use reign_types::{
    Ending, EventInstance, GameState, HaremMember, Heir, ReignSnapshot, Ruler, Toast,
};

use crate::chronicle::Chronicle;
use crate::clock::ReignClock;
use crate::pool::EventPool;
use crate::text::reign_year_label;

/// Everything one session owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReignState {
    /// Session state.
    pub game_state: GameState,
    /// The ruler, or the candidate while confirming.
    pub ruler: Ruler,
    /// Round clock.
    pub clock: ReignClock,
    /// Ordinary events for the current cycle.
    pub pool: EventPool,
    /// The event in the foreground, if any.
    pub current: Option<EventInstance>,
    /// Mandatory engine events waiting for the foreground.
    pub system_queue: VecDeque<EventInstance>,
    /// Feedback from the last choice, until acknowledged.
    pub toast: Option<Toast>,
    /// Log, narrative, and memories.
    pub chronicle: Chronicle,
    /// Harem members.
    pub harem: Vec<HaremMember>,
    /// Heirs in order of birth.
    pub heirs: Vec<Heir>,
    /// How the reign ended.
    pub ending: Option<Ending>,
    /// Closing text for the ending.
    pub ending_text: Option<String>,
}

impl ReignState {
    /// A session offering `candidate` for confirmation.
    pub fn new(candidate: Ruler, clock: ReignClock) -> Self {
        Self {
            game_state: GameState::EmperorConfirm,
            ruler: candidate,
            clock,
            pool: EventPool::new(),
            current: None,
            system_queue: VecDeque::new(),
            toast: None,
            chronicle: Chronicle::default(),
            harem: Vec::new(),
            heirs: Vec::new(),
            ending: None,
            ending_text: None,
        }
    }

    /// Whether the reign is under way.
    pub fn is_playing(&self) -> bool {
        self.game_state == GameState::Playing
    }

    /// Whether something already occupies the foreground.
    pub const fn is_interruption_active(&self) -> bool {
        self.current.is_some() || self.toast.is_some()
    }

    /// Read-only projection for the host.
    pub fn snapshot(&self) -> ReignSnapshot {
        let reign_year = (self.game_state != GameState::EmperorConfirm)
            .then(|| reign_year_label(&self.ruler.reign_title, self.clock.year()));
        ReignSnapshot {
            state: self.game_state,
            ruler: Some(self.ruler.clone()),
            reign_year,
            clock: self.clock.view(),
            pool_counts: self.pool.counts(),
            cycle_events: self.pool.cycle_events(),
            processed_this_cycle: self.pool.processed_count(),
            current_event: self.current.clone(),
            queued_system_events: u32::try_from(self.system_queue.len()).unwrap_or(u32::MAX),
            toast: self.toast.clone(),
            logs: self.chronicle.logs.clone(),
            memory_fragments: self.chronicle.unique_fragments(),
            court_narrative: self.chronicle.court_narrative.clone(),
            palace_narrative: self.chronicle.palace_narrative.clone(),
            harem: sorted_by_rank(&self.harem),
            heirs: self.heirs.clone(),
            ending: self.ending,
            ending_text: self.ending_text.clone(),
        }
    }
}
