//! Scripted play for headless runs.
//!
//! A [`Chooser`] picks an option for whatever event is in the foreground;
//! [`play_reign`] drives one reign until it ends or the step budget runs
//! out.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, info};

use reign_core::{ContentCatalog, ReignController};
use reign_types::{EventCategory, EventInstance, GameState, HaremAction, OptionId};

/// Picks an option for an event.
pub trait Chooser {
    /// The option to choose, or `None` to leave the event alone.
    fn choose(&mut self, event: &EventInstance) -> Option<OptionId>;
}

/// Always takes the first option.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChooser;

impl Chooser for FirstChooser {
    fn choose(&mut self, event: &EventInstance) -> Option<OptionId> {
        event.options.first().map(|o| o.id)
    }
}

/// Takes a uniformly random option.
#[derive(Debug)]
pub struct RandomChooser {
    rng: StdRng,
}

impl RandomChooser {
    /// Create a chooser drawing from `rng`.
    pub const fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Chooser for RandomChooser {
    fn choose(&mut self, event: &EventInstance) -> Option<OptionId> {
        event.options.choose(&mut self.rng).map(|o| o.id)
    }
}

/// How a scripted reign went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaySummary {
    /// Commands issued.
    pub steps: u32,
    /// Whether the reign reached an ending within the budget.
    pub ended: bool,
}

/// Drive the current reign with `chooser` for at most `max_steps` commands.
///
/// Each step clears a toast, resolves the foreground event, opens the next
/// pending event, or ends the cycle. At the start of every cycle the ruler
/// visits one harem member, and the first heir is made crown prince.
pub fn play_reign<C: ContentCatalog>(
    controller: &mut ReignController<C>,
    chooser: &mut dyn Chooser,
    rng: &mut impl Rng,
    max_steps: u32,
) -> PlaySummary {
    let mut last_round = 0;
    for step in 0..max_steps {
        let state = controller.state();
        if state.game_state == GameState::Ended {
            return PlaySummary { steps: step, ended: true };
        }

        if state.toast.is_some() {
            controller.acknowledge_toast();
            continue;
        }

        if let Some(event) = state.current.clone() {
            if let Some(option_id) = chooser.choose(&event) {
                debug!(event = %event.title, "choosing");
                controller.choose_option(event.id, option_id);
            } else if event.is_dismissible() {
                controller.dismiss_event();
            } else {
                // A mandatory event with no options cannot be resolved.
                return PlaySummary { steps: step, ended: false };
            }
            continue;
        }

        let round = state.clock.round();
        if round != last_round {
            last_round = round;
            visit_harem(controller, rng);
            designate_heir(controller);
            continue;
        }

        let pending = EventCategory::ALL
            .into_iter()
            .find(|c| controller.state().pool.pending(*c) > 0);
        if let Some(category) = pending {
            controller.open_next(category);
            continue;
        }
        controller.advance_cycle();
    }
    info!(max_steps, "step budget exhausted");
    PlaySummary {
        steps: max_steps,
        ended: controller.state().game_state == GameState::Ended,
    }
}

/// Spend the night with a random member who is not already expecting.
fn visit_harem<C: ContentCatalog>(controller: &mut ReignController<C>, rng: &mut impl Rng) {
    let candidates: Vec<_> = controller
        .state()
        .harem
        .iter()
        .filter(|m| !m.is_pregnant())
        .map(|m| m.id)
        .collect();
    if let Some(member_id) = candidates.choose(rng).copied() {
        controller.interact_with_harem_member(member_id, HaremAction::SpendNight);
    }
}

/// Make the eldest heir crown prince if nobody holds the title.
fn designate_heir<C: ContentCatalog>(controller: &mut ReignController<C>) {
    let heirs = &controller.state().heirs;
    if heirs.iter().any(|h| h.is_crown_prince) {
        return;
    }
    if let Some(eldest) = heirs.first().map(|h| h.id) {
        controller.set_crown_prince(eldest);
    }
}
