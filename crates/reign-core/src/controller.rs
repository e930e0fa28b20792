//! Session controller: the single entry point for every transition.
//!
//! [`ReignController::apply`] takes one [`Command`], mutates the session
//! synchronously, and returns the [`Effect`]s it produced. Commands that do
//! not apply to the current state change nothing and return no effects.
//!
//! # Cycle
//!
//! 1. **Refill** -- draw ordinary events into the category pools.
//! 2. **Critical gate** -- one roll that may force a critical event into the
//!    foreground.
//! 3. **Play** -- the host opens events, chooses options, and clears toasts.
//!    Each choice is checked for an ending.
//! 4. **Rollover** -- leftover events are written off, the clock advances,
//!    pregnancies and sickness progress, and at a year boundary everyone
//!    ages and stamina is restored.
//!
//! In the seasonal mode the rollover happens by itself once every pool is
//! empty; in the monthly mode the host ends each month.

use minijinja::context;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use reign_court::attributes::{apply_delta, deduct_stamina, restore_stamina};
use reign_court::dice::{draw_id, pick_name};
use reign_court::{CourtConfig, CourtError, harem, heirs, ruler, succession};
use reign_types::{
    AttributeDelta, CycleMode, Ending, EventCategory, EventId, EventInstance, EventKind,
    EventOption, GameState, HaremAction, HaremMember, HaremRank, Heir, HeirId, MemberId,
    OptionEffect, OptionId, ReignSnapshot, ReignStage, Ruler, Toast,
};

use crate::catalog::{ContentCatalog, SystemTexts, ending_text, pick_critical};
use crate::chronicle::Chronicle;
use crate::clock::{ClockError, ReignClock};
use crate::command::{Command, Effect};
use crate::config::ReignConfig;
use crate::critical;
use crate::ending;
use crate::pool::instantiate;
use crate::state::ReignState;
use crate::text::TextRenderer;

/// Errors that can occur while setting up a controller.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The clock configuration is invalid.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// The catalog could not produce a candidate.
    #[error("court error: {source}")]
    Court {
        /// The underlying court error.
        #[from]
        source: CourtError,
    },
}

/// Drives one session against a content catalog.
#[derive(Debug)]
pub struct ReignController<C: ContentCatalog> {
    /// Engine configuration.
    config: ReignConfig,
    /// Court rules derived from `config`.
    court: CourtConfig,
    /// Event and text source.
    catalog: C,
    /// Placeholder renderer for catalog text.
    text: TextRenderer,
    /// Single source of randomness, seeded from the config.
    rng: StdRng,
    /// Session state.
    state: ReignState,
}

impl<C: ContentCatalog> ReignController<C> {
    /// Create a controller with a candidate on offer.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError`] if the clock configuration is invalid or
    /// the catalog's name lists are empty.
    pub fn new(config: ReignConfig, catalog: C) -> Result<Self, ControllerError> {
        let mut rng = StdRng::seed_from_u64(config.session.seed);
        let clock = ReignClock::new(&config.clock, config.session.cycle_mode)?;
        let candidate = ruler::new_candidate(catalog.names(), &mut rng)?;
        info!(
            seed = config.session.seed,
            mode = ?config.session.cycle_mode,
            candidate = %candidate.name,
            "reign controller ready"
        );
        Ok(Self {
            court: config.court_config(),
            config,
            catalog,
            text: TextRenderer::new(),
            rng,
            state: ReignState::new(candidate, clock),
        })
    }

    /// Engine configuration.
    pub const fn config(&self) -> &ReignConfig {
        &self.config
    }

    /// Session state.
    pub const fn state(&self) -> &ReignState {
        &self.state
    }

    /// Read-only projection for the host.
    pub fn snapshot(&self) -> ReignSnapshot {
        self.state.snapshot()
    }

    /// The event in the foreground, if any.
    pub const fn current_event(&self) -> Option<&EventInstance> {
        self.state.current.as_ref()
    }

    /// Apply one command.
    pub fn apply(&mut self, command: Command) -> Vec<Effect> {
        let mut effects = Vec::new();
        match command {
            Command::StartNewGame | Command::Restart => self.handle_start_new_game(&mut effects),
            Command::RegenerateCandidate => self.handle_regenerate_candidate(&mut effects),
            Command::ConfirmAndStart => self.handle_confirm_and_start(&mut effects),
            Command::OpenNext(category) => self.handle_open_next(category, &mut effects),
            Command::SelectEvent(event_id) => self.handle_select_event(event_id, &mut effects),
            Command::ChooseOption {
                event_id,
                option_id,
            } => self.handle_choose_option(event_id, option_id, &mut effects),
            Command::DismissEvent => self.handle_dismiss_event(&mut effects),
            Command::AcknowledgeToast => self.handle_acknowledge_toast(&mut effects),
            Command::AdvanceCycle | Command::EndCurrentMonth => {
                self.handle_advance(1, &mut effects);
            }
            Command::AdvanceOneYear => {
                let cycles = self.state.clock.cycles_per_year();
                self.handle_advance(cycles, &mut effects);
            }
            Command::Abdicate => self.handle_abdicate(&mut effects),
            Command::SetCrownPrince(heir_id) => self.handle_set_crown_prince(heir_id, &mut effects),
            Command::InteractWithHaremMember { member_id, action } => {
                self.handle_interaction(member_id, action, &mut effects);
            }
            Command::NameHeir { heir_id, name } => {
                self.handle_name_heir(heir_id, &name, &mut effects);
            }
            Command::SucceedWithHeir(heir_id) => self.handle_succession(heir_id, &mut effects),
        }
        effects
    }

    // -----------------------------------------------------------------------
    // Convenience wrappers
    // -----------------------------------------------------------------------

    /// Discard the session and offer a fresh candidate.
    pub fn start_new_game(&mut self) -> Vec<Effect> {
        self.apply(Command::StartNewGame)
    }

    /// Reroll the candidate.
    pub fn regenerate_candidate(&mut self) -> Vec<Effect> {
        self.apply(Command::RegenerateCandidate)
    }

    /// Crown the candidate and begin the reign.
    pub fn confirm_and_start(&mut self) -> Vec<Effect> {
        self.apply(Command::ConfirmAndStart)
    }

    /// Bring the head of a category queue to the foreground.
    pub fn open_next(&mut self, category: EventCategory) -> Vec<Effect> {
        self.apply(Command::OpenNext(category))
    }

    /// Bring a specific pending event to the foreground.
    pub fn select_event(&mut self, event_id: EventId) -> Vec<Effect> {
        self.apply(Command::SelectEvent(event_id))
    }

    /// Resolve the foreground event.
    pub fn choose_option(&mut self, event_id: EventId, option_id: OptionId) -> Vec<Effect> {
        self.apply(Command::ChooseOption {
            event_id,
            option_id,
        })
    }

    /// Close the foreground event unresolved.
    pub fn dismiss_event(&mut self) -> Vec<Effect> {
        self.apply(Command::DismissEvent)
    }

    /// Clear the toast.
    pub fn acknowledge_toast(&mut self) -> Vec<Effect> {
        self.apply(Command::AcknowledgeToast)
    }

    /// End the current cycle.
    pub fn advance_cycle(&mut self) -> Vec<Effect> {
        self.apply(Command::AdvanceCycle)
    }

    /// End the current month.
    pub fn end_current_month(&mut self) -> Vec<Effect> {
        self.apply(Command::EndCurrentMonth)
    }

    /// Skip ahead one year.
    pub fn advance_one_year(&mut self) -> Vec<Effect> {
        self.apply(Command::AdvanceOneYear)
    }

    /// Step down from the throne.
    pub fn abdicate(&mut self) -> Vec<Effect> {
        self.apply(Command::Abdicate)
    }

    /// Designate the crown prince.
    pub fn set_crown_prince(&mut self, heir_id: HeirId) -> Vec<Effect> {
        self.apply(Command::SetCrownPrince(heir_id))
    }

    /// Spend time with a harem member.
    pub fn interact_with_harem_member(
        &mut self,
        member_id: MemberId,
        action: HaremAction,
    ) -> Vec<Effect> {
        self.apply(Command::InteractWithHaremMember { member_id, action })
    }

    /// Name an heir.
    pub fn name_heir(&mut self, heir_id: HeirId, name: impl Into<String>) -> Vec<Effect> {
        self.apply(Command::NameHeir {
            heir_id,
            name: name.into(),
        })
    }

    /// Same as [`Self::start_new_game`].
    pub fn restart(&mut self) -> Vec<Effect> {
        self.apply(Command::Restart)
    }

    /// Start the next reign with an heir on the throne.
    pub fn succeed_with_heir(&mut self, heir_id: HeirId) -> Vec<Effect> {
        self.apply(Command::SucceedWithHeir(heir_id))
    }

    // -----------------------------------------------------------------------
    // Session lifecycle
    // -----------------------------------------------------------------------

    fn handle_start_new_game(&mut self, effects: &mut Vec<Effect>) {
        let candidate = match ruler::new_candidate(self.catalog.names(), &mut self.rng) {
            Ok(candidate) => candidate,
            Err(e) => {
                warn!(error = %e, "cannot generate candidate");
                return;
            }
        };
        let mut clock = self.state.clock.clone();
        clock.reset();
        info!(candidate = %candidate.name, "new game");
        effects.push(Effect::CandidateGenerated {
            ruler_id: candidate.id,
        });
        self.state = ReignState::new(candidate, clock);
    }

    fn handle_regenerate_candidate(&mut self, effects: &mut Vec<Effect>) {
        if self.state.game_state != GameState::EmperorConfirm {
            debug!(state = ?self.state.game_state, "regenerate ignored outside confirmation");
            return;
        }
        match ruler::new_candidate(self.catalog.names(), &mut self.rng) {
            Ok(candidate) => {
                debug!(candidate = %candidate.name, "candidate rerolled");
                effects.push(Effect::CandidateGenerated {
                    ruler_id: candidate.id,
                });
                self.state.ruler = candidate;
            }
            Err(e) => warn!(error = %e, "cannot generate candidate"),
        }
    }

    fn handle_confirm_and_start(&mut self, effects: &mut Vec<Effect>) {
        if self.state.game_state != GameState::EmperorConfirm {
            debug!(state = ?self.state.game_state, "confirm ignored outside confirmation");
            return;
        }
        let crowned = ruler::crown(&self.state.ruler, &self.court, &mut self.rng);
        let court = match harem::initial_harem(&self.catalog.names().consort_names, &mut self.rng)
        {
            Ok(court) => court,
            Err(e) => {
                warn!(error = %e, "cannot assemble harem");
                return;
            }
        };
        let opening = self.render_for(&crowned, &self.catalog.system_texts().opening_log);
        info!(
            ruler = %crowned.name,
            title = %crowned.reign_title,
            national = ?crowned.national_status,
            "reign begins"
        );
        effects.push(Effect::GameStarted {
            ruler_id: crowned.id,
        });
        self.begin_reign(crowned, court, &opening, effects);
    }

    fn handle_succession(&mut self, heir_id: HeirId, effects: &mut Vec<Effect>) {
        if self.state.game_state != GameState::Ended {
            debug!(state = ?self.state.game_state, "succession only follows an ending");
            return;
        }
        let Some(heir) = self.state.heirs.iter().find(|h| h.id == heir_id).cloned() else {
            debug!(%heir_id, "succession ignored: no such heir");
            return;
        };
        let court = match harem::initial_harem(&self.catalog.names().consort_names, &mut self.rng)
        {
            Ok(court) => court,
            Err(e) => {
                warn!(error = %e, "cannot assemble harem");
                return;
            }
        };
        let title = self.next_reign_title();
        let successor =
            succession::succeed(&self.state.ruler, &heir, title, &self.court, &mut self.rng);
        let opening = self.render_for(&successor, &self.catalog.system_texts().succession_log);
        effects.push(Effect::SuccessionStarted {
            ruler_id: successor.id,
            generation: successor.generation,
        });
        self.begin_reign(successor, court, &opening, effects);
    }

    /// A reign title different from the current one when the catalog
    /// offers another.
    fn next_reign_title(&mut self) -> String {
        let current = self.state.ruler.reign_title.clone();
        let others: Vec<String> = self
            .catalog
            .names()
            .reign_titles
            .iter()
            .filter(|t| **t != current)
            .cloned()
            .collect();
        pick_name(&mut self.rng, &others).unwrap_or(current)
    }

    /// Common start of every reign: reset the clock and the session, open
    /// the chronicle, fill the pools, and queue the coronation.
    fn begin_reign(
        &mut self,
        ruler: Ruler,
        court: Vec<HaremMember>,
        opening: &str,
        effects: &mut Vec<Effect>,
    ) {
        let mut clock = self.state.clock.clone();
        clock.reset();
        let mut state = ReignState::new(ruler, clock);
        let texts = self.catalog.system_texts();
        state.chronicle = Chronicle::open(
            1,
            opening,
            &texts.court_narrative,
            &texts.palace_narrative,
            &mut self.rng,
        );
        state.harem = court;
        state.game_state = GameState::Playing;
        self.state = state;

        self.refill_pool(effects);
        self.queue_coronation(effects);
        self.critical_gate(effects);
        self.promote_system_event(effects);
    }

    fn queue_coronation(&mut self, effects: &mut Vec<Effect>) {
        let texts = self.catalog.system_texts();
        let stage = self.state.clock.stage();
        let ruler = &self.state.ruler;

        let congratulation = system_event(
            texts.congratulation_title.clone(),
            self.text.render(
                &texts.congratulation_description,
                context! { ruler => ruler.name, title => ruler.reign_title },
            ),
            vec![system_option(
                texts.congratulation_option.clone(),
                texts.congratulation_feedback.clone(),
                None,
                None,
                &mut self.rng,
            )],
            stage,
            &mut self.rng,
        );

        let empress_name = harem::empress(&self.state.harem)
            .map(|m| m.name.clone())
            .unwrap_or_default();
        let mut options = vec![system_option(
            self.text.render(
                &texts.keep_empress_option,
                context! { empress => empress_name },
            ),
            texts.keep_empress_feedback.clone(),
            None,
            None,
            &mut self.rng,
        )];
        for member in self
            .state
            .harem
            .iter()
            .filter(|m| m.rank != HaremRank::Empress)
        {
            let ctx = context! { member => member.name };
            options.push(system_option(
                self.text.render(&texts.elevate_option, ctx.clone()),
                self.text.render(&texts.elevate_feedback, ctx.clone()),
                Some(self.text.render(&texts.elevate_log, ctx)),
                Some(OptionEffect::ElevateToEmpress {
                    member_id: member.id,
                }),
                &mut self.rng,
            ));
        }
        let elevation = system_event(
            texts.elevation_title.clone(),
            self.text.render(
                &texts.elevation_description,
                context! { empress => empress_name },
            ),
            options,
            stage,
            &mut self.rng,
        );

        self.enqueue_system(congratulation, effects);
        self.enqueue_system(elevation, effects);
    }

    // -----------------------------------------------------------------------
    // Foreground
    // -----------------------------------------------------------------------

    fn handle_open_next(&mut self, category: EventCategory, effects: &mut Vec<Effect>) {
        if !self.state.is_playing() || self.state.is_interruption_active() {
            debug!(?category, "open ignored: foreground busy or not playing");
            return;
        }
        if let Some(event) = self.state.pool.peek(category).cloned() {
            self.show(event, effects);
        }
    }

    fn handle_select_event(&mut self, event_id: EventId, effects: &mut Vec<Effect>) {
        if !self.state.is_playing() || self.state.is_interruption_active() {
            debug!(%event_id, "select ignored: foreground busy or not playing");
            return;
        }
        if self.state.clock.mode() == CycleMode::Seasonal && !self.state.pool.is_head(event_id) {
            debug!(%event_id, "select ignored: seasonal queues open in order");
            return;
        }
        if let Some(event) = self.state.pool.find(event_id).cloned() {
            self.show(event, effects);
        }
    }

    fn show(&mut self, event: EventInstance, effects: &mut Vec<Effect>) {
        debug!(event = %event.title, kind = ?event.kind, "event opened");
        effects.push(Effect::EventOpened {
            event_id: event.id,
            kind: event.kind,
        });
        self.state.current = Some(event);
    }

    fn handle_dismiss_event(&mut self, effects: &mut Vec<Effect>) {
        if !self.state.is_playing() {
            return;
        }
        let dismissible = self
            .state
            .current
            .as_ref()
            .is_some_and(EventInstance::is_dismissible);
        if !dismissible {
            debug!("dismiss ignored: nothing dismissible in the foreground");
            return;
        }
        if let Some(event) = self.state.current.take() {
            effects.push(Effect::EventDismissed { event_id: event.id });
        }
        self.promote_system_event(effects);
    }

    fn handle_acknowledge_toast(&mut self, effects: &mut Vec<Effect>) {
        if self.state.toast.take().is_some() {
            effects.push(Effect::ToastCleared);
            self.promote_system_event(effects);
        }
    }

    fn handle_choose_option(
        &mut self,
        event_id: EventId,
        option_id: OptionId,
        effects: &mut Vec<Effect>,
    ) {
        if !self.state.is_playing() {
            debug!(%event_id, "choice ignored: not playing");
            return;
        }
        let Some(option) = self
            .state
            .current
            .as_ref()
            .filter(|e| e.id == event_id)
            .and_then(|e| e.option(option_id))
            .cloned()
        else {
            debug!(%event_id, %option_id, "choice ignored: not the foreground event");
            return;
        };
        let Some(event) = self.state.current.take() else {
            return;
        };

        let pooled = event.kind.is_pooled();
        if pooled && self.state.pool.resolve(event.id, &option.feedback).is_none() {
            debug!(%event_id, "event was no longer pending");
        }

        let mut attrs = self.state.ruler.attributes.clone();
        if event.kind != EventKind::System {
            attrs = deduct_stamina(&attrs, self.config.attributes.stamina_cost_per_event);
        }
        attrs = apply_delta(&attrs, &option.delta);
        self.state.ruler.attributes = attrs;

        if let Some(effect) = &option.effect {
            self.apply_option_effect(effect, effects);
        }
        self.record_resolution(&event, &option);
        self.state.toast = Some(Toast {
            text: option.feedback.clone(),
        });
        debug!(event = %event.title, option = %option.text, "option chosen");
        effects.push(Effect::OptionChosen {
            event_id,
            option_id,
        });

        if let Some(ending) = ending::resolve_after_choice(
            &self.state.ruler.attributes,
            &event,
            &option,
            &self.config.ending,
        ) {
            self.end_game(ending, effects);
            return;
        }

        self.after_choice(pooled, effects);
    }

    /// What follows a resolved event: seasonal rollover once every pool is
    /// empty, otherwise another critical roll and the next system event.
    fn after_choice(&mut self, pooled: bool, effects: &mut Vec<Effect>) {
        if pooled {
            if self.state.pool.is_exhausted() {
                if self.state.clock.mode() == CycleMode::Seasonal {
                    debug!("every pool empty, rolling over");
                    self.advance(1, effects);
                    return;
                }
            } else if self.config.critical.recheck_after_choice {
                self.critical_gate(effects);
            }
        }
        self.promote_system_event(effects);
    }

    /// Write the option's log line into the chronicle and the narrative.
    fn record_resolution(&mut self, event: &EventInstance, option: &EventOption) {
        let Some(log) = option.log_text.as_deref() else {
            return;
        };
        let rendered = self.render_for(&self.state.ruler, log);
        let round = self.state.clock.round();
        self.state.chronicle.record(round, &rendered, &mut self.rng);
        self.state.chronicle.note_resolution(
            event.kind,
            event.category,
            &rendered,
            self.catalog.memories(),
            &mut self.rng,
        );
    }

    fn apply_option_effect(&mut self, effect: &OptionEffect, effects: &mut Vec<Effect>) {
        match *effect {
            OptionEffect::ElevateToEmpress { member_id } => {
                match harem::set_rank(&mut self.state.harem, member_id, HaremRank::Empress) {
                    Ok(demoted) => {
                        info!(%member_id, ?demoted, "empress elevated");
                        effects.push(Effect::EmpressChanged { member_id });
                    }
                    Err(e) => debug!(error = %e, "elevation ignored"),
                }
            }
            OptionEffect::NameHeir { heir_id, ref name } => {
                match heirs::rename(&mut self.state.heirs, heir_id, name) {
                    Ok(()) => effects.push(Effect::HeirNamed { heir_id }),
                    Err(e) => debug!(error = %e, "naming ignored"),
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Clock
    // -----------------------------------------------------------------------

    fn handle_advance(&mut self, cycles: u32, effects: &mut Vec<Effect>) {
        if !self.state.is_playing() {
            debug!("advance ignored: not playing");
            return;
        }
        if self
            .state
            .current
            .as_ref()
            .is_some_and(|e| !e.is_dismissible())
        {
            debug!("advance blocked by a mandatory event");
            return;
        }
        self.state.current = None;
        self.advance(cycles, effects);
    }

    /// Roll over `cycles` cycles, then open the new cycle once.
    fn advance(&mut self, cycles: u32, effects: &mut Vec<Effect>) {
        for _ in 0..cycles {
            if !self.roll_over(effects) {
                return;
            }
        }
        self.refill_pool(effects);
        self.critical_gate(effects);
        self.promote_system_event(effects);
    }

    /// One cycle rollover. Returns `false` once the reign has ended.
    fn roll_over(&mut self, effects: &mut Vec<Effect>) -> bool {
        self.write_off_leftovers(effects);

        let step = match self.state.clock.advance() {
            Ok(step) => step,
            Err(e) => {
                warn!(error = %e, "clock cannot advance");
                return false;
            }
        };
        effects.push(Effect::CycleAdvanced {
            round: step.round,
            year: self.state.clock.year(),
        });
        info!(
            round = step.round,
            year = self.state.clock.year(),
            season = ?self.state.clock.season(),
            stage = ?self.state.clock.stage(),
            "cycle advanced"
        );
        if step.past_ceiling {
            self.end_game(Ending::NaturalEnd, effects);
            return false;
        }

        if step.new_year {
            let ruler = &mut self.state.ruler;
            ruler.age = ruler.age.saturating_add(1);
            ruler.years_in_power = ruler.years_in_power.saturating_add(1);
            ruler.attributes = restore_stamina(&ruler.attributes);
            harem::age_members(&mut self.state.harem);
            heirs::age_heirs(&mut self.state.heirs);
        }

        for mother_id in harem::progress_pregnancies(&mut self.state.harem, &self.court) {
            self.deliver(mother_id, effects);
        }
        for member_id in harem::roll_health(&mut self.state.harem, &self.court, &mut self.rng) {
            debug!(%member_id, "harem member fell ill");
            effects.push(Effect::FellIll { member_id });
        }
        true
    }

    /// Log every unresolved event of the closing cycle as neglected.
    fn write_off_leftovers(&mut self, effects: &mut Vec<Effect>) {
        let leftovers = self.state.pool.drain_unprocessed();
        if leftovers.is_empty() {
            return;
        }
        let round = self.state.clock.round();
        let template = &self.catalog.system_texts().ignored_log;
        for event in &leftovers {
            let line = self
                .text
                .render(template, context! { title => event.title });
            self.state.chronicle.record(round, &line, &mut self.rng);
        }
        let count = u32::try_from(leftovers.len()).unwrap_or(u32::MAX);
        debug!(count, "unresolved events written off");
        effects.push(Effect::EventsIgnored { count });
    }

    fn refill_pool(&mut self, effects: &mut Vec<Effect>) {
        let stage = self.state.clock.stage();
        self.state.pool.refill_for_cycle(
            &self.catalog,
            self.state.clock.mode(),
            stage,
            &self.config.pool,
            &mut self.rng,
        );
        effects.push(Effect::PoolRefilled {
            pending: self.state.pool.total_pending(),
        });
    }

    // -----------------------------------------------------------------------
    // Critical and system events
    // -----------------------------------------------------------------------

    /// Roll for a critical event. A hit takes the foreground immediately:
    /// a displaced system event returns to the front of its queue and a
    /// displaced ordinary event stays in its pool. A pending toast stays up
    /// over it.
    fn critical_gate(&mut self, effects: &mut Vec<Effect>) {
        if !self.state.is_playing() {
            return;
        }
        if self
            .state
            .current
            .as_ref()
            .is_some_and(|e| e.kind == EventKind::Critical)
        {
            return;
        }
        let pct = critical::probability_pct(
            &self.state.ruler.attributes,
            self.state.ruler.national_status,
            &self.config.critical,
        );
        if !critical::roll(&mut self.rng, pct) {
            return;
        }
        let stage = self.state.clock.stage();
        let Some(template) = pick_critical(&self.catalog, stage, &mut self.rng) else {
            debug!(?stage, "critical roll hit but the catalog has none");
            return;
        };
        let event = instantiate(&template, EventKind::Critical, None, stage, &mut self.rng);

        if let Some(displaced) = self
            .state
            .current
            .take()
            .filter(|e| e.kind == EventKind::System)
        {
            self.state.system_queue.push_front(displaced);
        }
        info!(pct, event = %event.title, "critical event triggered");
        effects.push(Effect::CriticalTriggered { event_id: event.id });
        self.show(event, effects);
    }

    fn enqueue_system(&mut self, event: EventInstance, effects: &mut Vec<Effect>) {
        debug!(event = %event.title, "system event queued");
        effects.push(Effect::SystemEventQueued { event_id: event.id });
        self.state.system_queue.push_back(event);
    }

    /// Move the next system event into an empty foreground.
    fn promote_system_event(&mut self, effects: &mut Vec<Effect>) {
        if !self.state.is_playing() || self.state.is_interruption_active() {
            return;
        }
        if let Some(event) = self.state.system_queue.pop_front() {
            self.show(event, effects);
        }
    }

    // -----------------------------------------------------------------------
    // Harem and heirs
    // -----------------------------------------------------------------------

    fn handle_interaction(
        &mut self,
        member_id: MemberId,
        action: HaremAction,
        effects: &mut Vec<Effect>,
    ) {
        if !self.state.is_playing() {
            debug!(%member_id, "interaction ignored: not playing");
            return;
        }
        let crowning = action
            == (HaremAction::Promote {
                rank: HaremRank::Empress,
            });
        if crowning && harem::empress(&self.state.harem).is_some_and(|m| m.id == member_id) {
            debug!(%member_id, "promotion ignored: already empress");
            return;
        }
        let outcome = match harem::interact(
            &mut self.state.harem,
            &self.state.ruler.attributes,
            member_id,
            action,
            &self.court,
            &mut self.rng,
        ) {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!(error = %e, "interaction ignored");
                return;
            }
        };
        self.state.ruler.attributes = outcome.attributes;
        effects.push(Effect::InteractionPerformed { member_id, action });

        let name = self
            .state
            .harem
            .iter()
            .find(|m| m.id == member_id)
            .map(|m| m.name.clone())
            .unwrap_or_default();
        let round = self.state.clock.round();
        let texts = self.catalog.system_texts();

        if crowning {
            let line = self
                .text
                .render(&texts.elevate_log, context! { member => name });
            self.state.chronicle.record(round, &line, &mut self.rng);
            effects.push(Effect::EmpressChanged { member_id });
        }

        if outcome.conceived {
            let ctx = context! { member => name };
            let line = self.text.render(&texts.pregnancy_log, ctx.clone());
            self.state.chronicle.record(round, &line, &mut self.rng);
            info!(member = %name, "conceived");
            effects.push(Effect::Conceived { member_id });

            let option = system_option(
                texts.pregnancy_option.clone(),
                self.text.render(&texts.pregnancy_feedback, ctx.clone()),
                None,
                None,
                &mut self.rng,
            );
            let announcement = system_event(
                texts.pregnancy_title.clone(),
                self.text.render(&texts.pregnancy_description, ctx),
                vec![option],
                self.state.clock.stage(),
                &mut self.rng,
            );
            self.enqueue_system(announcement, effects);
        }
        self.promote_system_event(effects);
    }

    /// A member reached term: add the heir, log the birth, and queue the
    /// naming ceremony.
    fn deliver(&mut self, mother_id: MemberId, effects: &mut Vec<Effect>) {
        let Some(mother) = self
            .state
            .harem
            .iter()
            .find(|m| m.id == mother_id)
            .cloned()
        else {
            return;
        };
        let surname = heirs::surname_of(&self.state.ruler.name);
        let given_names = &self.catalog.names().heir_names;
        let heir = match heirs::generate_heir(
            &mother,
            &surname,
            given_names,
            &self.court,
            &mut self.rng,
        ) {
            Ok(heir) => heir,
            Err(e) => {
                warn!(error = %e, "cannot generate heir");
                return;
            }
        };
        let alternative = heirs::alternative_name(&surname, &heir.name, given_names, &mut self.rng);

        let texts = self.catalog.system_texts();
        let gender = heir.gender.label();
        let line = self.text.render(
            &texts.birth_log,
            context! { member => mother.name, gender => gender },
        );
        let round = self.state.clock.round();
        self.state.chronicle.record(round, &line, &mut self.rng);
        effects.push(Effect::HeirBorn {
            heir_id: heir.id,
            mother_id,
        });

        let mut options = vec![naming_option(
            texts,
            &self.text,
            &heir,
            heir.name.clone(),
            &mut self.rng,
        )];
        if let Some(name) = alternative {
            options.push(naming_option(texts, &self.text, &heir, name, &mut self.rng));
        }
        let ceremony = system_event(
            texts.naming_title.clone(),
            self.text.render(
                &texts.naming_description,
                context! { member => mother.name, gender => gender },
            ),
            options,
            self.state.clock.stage(),
            &mut self.rng,
        );

        self.state.heirs.push(heir);
        self.state.ruler.heir_status = heirs::heir_status(&self.state.heirs);
        self.enqueue_system(ceremony, effects);
    }

    fn handle_name_heir(&mut self, heir_id: HeirId, name: &str, effects: &mut Vec<Effect>) {
        if !self.state.is_playing() || name.is_empty() {
            debug!(%heir_id, "naming ignored");
            return;
        }
        if let Err(e) = heirs::rename(&mut self.state.heirs, heir_id, name) {
            debug!(error = %e, "naming ignored");
            return;
        }
        let names_heir = |event: &EventInstance| {
            event.options.iter().any(|o| {
                matches!(
                    &o.effect,
                    Some(OptionEffect::NameHeir { heir_id: id, .. }) if *id == heir_id
                )
            })
        };
        self.state.system_queue.retain(|e| !names_heir(e));
        if self.state.current.as_ref().is_some_and(names_heir) {
            self.state.current = None;
        }

        let gender = self
            .state
            .heirs
            .iter()
            .find(|h| h.id == heir_id)
            .map_or("", |h| h.gender.label());
        let line = self.text.render(
            &self.catalog.system_texts().naming_log,
            context! { name => name, gender => gender },
        );
        let round = self.state.clock.round();
        self.state.chronicle.record(round, &line, &mut self.rng);
        effects.push(Effect::HeirNamed { heir_id });
        self.promote_system_event(effects);
    }

    fn handle_set_crown_prince(&mut self, heir_id: HeirId, effects: &mut Vec<Effect>) {
        if !self.state.is_playing() {
            debug!(%heir_id, "designation ignored: not playing");
            return;
        }
        match heirs::set_crown_prince(&mut self.state.heirs, heir_id) {
            Ok(previous) => {
                let name = heirs::crown_prince(&self.state.heirs)
                    .map(|h| h.name.clone())
                    .unwrap_or_default();
                let line = self.text.render(
                    &self.catalog.system_texts().crown_prince_log,
                    context! { name => name },
                );
                let round = self.state.clock.round();
                self.state.chronicle.record(round, &line, &mut self.rng);
                info!(%heir_id, ?previous, "crown prince designated");
                effects.push(Effect::CrownPrinceSet { heir_id });
            }
            Err(e) => debug!(error = %e, "designation ignored"),
        }
    }

    // -----------------------------------------------------------------------
    // Endings
    // -----------------------------------------------------------------------

    fn handle_abdicate(&mut self, effects: &mut Vec<Effect>) {
        if !self.state.is_playing() {
            debug!("abdication ignored: not playing");
            return;
        }
        let round = self.state.clock.round();
        if round < self.config.ending.abdication_min_round {
            debug!(round, "abdication not yet available");
            return;
        }
        let line = self.catalog.system_texts().abdication_log.clone();
        self.state.chronicle.record(round, &line, &mut self.rng);
        self.end_game(Ending::Abdication, effects);
    }

    fn end_game(&mut self, ending: Ending, effects: &mut Vec<Effect>) {
        let text = ending_text(
            self.catalog.endings(),
            ending,
            &self.state.ruler.attributes,
            &mut self.rng,
        );
        let rendered = self.render_for(&self.state.ruler, &text);
        let state = &mut self.state;
        state.game_state = GameState::Ended;
        state.ending = Some(ending);
        state.ending_text = Some(rendered);
        state.current = None;
        state.system_queue.clear();
        state.toast = None;
        info!(
            ending = ?ending.kind(),
            round = state.clock.round(),
            ruler = %state.ruler.name,
            "reign ended"
        );
        effects.push(Effect::Ended(ending));
    }

    /// Render catalog text with the ruler's name and reign title.
    fn render_for(&self, ruler: &Ruler, source: &str) -> String {
        self.text.render(
            source,
            context! { ruler => ruler.name, title => ruler.reign_title },
        )
    }
}

// ---------------------------------------------------------------------------
// Engine-generated events
// ---------------------------------------------------------------------------

fn system_event(
    title: String,
    description: String,
    options: Vec<EventOption>,
    stage: ReignStage,
    rng: &mut impl Rng,
) -> EventInstance {
    EventInstance {
        id: draw_id(rng),
        title,
        kind: EventKind::System,
        category: None,
        description,
        options,
        is_processed: false,
        chosen_feedback: None,
        stage,
    }
}

fn system_option(
    text: String,
    feedback: String,
    log_text: Option<String>,
    effect: Option<OptionEffect>,
    rng: &mut impl Rng,
) -> EventOption {
    EventOption {
        id: draw_id(rng),
        text,
        feedback,
        log_text,
        attitude: None,
        delta: AttributeDelta::default(),
        outcome: None,
        effect,
    }
}

/// One naming-ceremony choice: accepting `name` for `heir`.
fn naming_option(
    texts: &SystemTexts,
    renderer: &TextRenderer,
    heir: &Heir,
    name: String,
    rng: &mut impl Rng,
) -> EventOption {
    let ctx = context! { name => name, gender => heir.gender.label() };
    system_option(
        renderer.render(&texts.naming_option, ctx.clone()),
        renderer.render(&texts.naming_feedback, ctx.clone()),
        Some(renderer.render(&texts.naming_log, ctx)),
        Some(OptionEffect::NameHeir {
            heir_id: heir.id,
            name,
        }),
        rng,
    )
}
