//! Player inputs and the effects each transition reports.
//!
//! Every state change goes through [`Command`]; the controller answers with
//! a list of [`Effect`]s describing what happened. An empty list means the
//! command was not applicable and nothing changed.

use reign_types::{
    Ending, EventCategory, EventId, EventKind, HaremAction, HeirId, MemberId, OptionId, RulerId,
};

/// One player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Discard the session and offer a fresh candidate.
    StartNewGame,
    /// Reroll the candidate while confirming.
    RegenerateCandidate,
    /// Crown the candidate and begin the reign.
    ConfirmAndStart,
    /// Bring the head of a category queue to the foreground.
    OpenNext(EventCategory),
    /// Bring a specific pending event to the foreground.
    SelectEvent(EventId),
    /// Resolve the foreground event with one of its options.
    ChooseOption {
        /// Event being resolved.
        event_id: EventId,
        /// Chosen option.
        option_id: OptionId,
    },
    /// Close the foreground event without resolving it.
    DismissEvent,
    /// Clear the active toast.
    AcknowledgeToast,
    /// End the current cycle.
    AdvanceCycle,
    /// End the current month; same rollover as [`Command::AdvanceCycle`].
    EndCurrentMonth,
    /// Skip ahead one full year.
    AdvanceOneYear,
    /// Step down from the throne.
    Abdicate,
    /// Designate the crown prince.
    SetCrownPrince(HeirId),
    /// Spend time with a harem member.
    InteractWithHaremMember {
        /// Member to visit.
        member_id: MemberId,
        /// What to do.
        action: HaremAction,
    },
    /// Give an heir a name of the player's choosing.
    NameHeir {
        /// Heir to name.
        heir_id: HeirId,
        /// The name.
        name: String,
    },
    /// Same as [`Command::StartNewGame`].
    Restart,
    /// Start the next reign with an heir on the throne.
    SucceedWithHeir(HeirId),
}

/// Something that happened during a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A new candidate is on offer.
    CandidateGenerated {
        /// Candidate ID.
        ruler_id: RulerId,
    },
    /// The reign began.
    GameStarted {
        /// The crowned ruler.
        ruler_id: RulerId,
    },
    /// An event moved to the foreground.
    EventOpened {
        /// Event ID.
        event_id: EventId,
        /// Its kind.
        kind: EventKind,
    },
    /// The foreground event was resolved.
    OptionChosen {
        /// Event ID.
        event_id: EventId,
        /// Chosen option.
        option_id: OptionId,
    },
    /// The foreground event was closed unresolved.
    EventDismissed {
        /// Event ID.
        event_id: EventId,
    },
    /// The toast was cleared.
    ToastCleared,
    /// The clock moved forward one cycle.
    CycleAdvanced {
        /// The new round.
        round: u32,
        /// The year it falls in.
        year: u32,
    },
    /// The event pools were refilled.
    PoolRefilled {
        /// Events now pending.
        pending: u32,
    },
    /// A critical event was forced into the foreground.
    CriticalTriggered {
        /// Event ID.
        event_id: EventId,
    },
    /// A system event joined the queue.
    SystemEventQueued {
        /// Event ID.
        event_id: EventId,
    },
    /// Unresolved events were written off at rollover.
    EventsIgnored {
        /// How many.
        count: u32,
    },
    /// A harem interaction took place.
    InteractionPerformed {
        /// Member visited.
        member_id: MemberId,
        /// What was done.
        action: HaremAction,
    },
    /// A harem member conceived.
    Conceived {
        /// Mother-to-be.
        member_id: MemberId,
    },
    /// A harem member fell ill.
    FellIll {
        /// The member.
        member_id: MemberId,
    },
    /// An heir was born.
    HeirBorn {
        /// The newborn.
        heir_id: HeirId,
        /// The mother.
        mother_id: MemberId,
    },
    /// A new empress holds the rank.
    EmpressChanged {
        /// The new empress.
        member_id: MemberId,
    },
    /// A crown prince was designated.
    CrownPrinceSet {
        /// The heir.
        heir_id: HeirId,
    },
    /// An heir received a name.
    HeirNamed {
        /// The heir.
        heir_id: HeirId,
    },
    /// A successor took the throne.
    SuccessionStarted {
        /// The new ruler.
        ruler_id: RulerId,
        /// Dynasty generation.
        generation: u32,
    },
    /// The reign ended.
    Ended(Ending),
}
