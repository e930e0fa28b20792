//! Error types for the reign-court crate.
//!
//! Court operations return typed errors rather than panicking. The
//! controller turns every one of them into a silent no-op for the player;
//! the variants exist so that the reason shows up in the debug log.

use reign_types::{HeirId, MemberId};

/// Errors that can occur during harem, heir, or succession operations.
#[derive(Debug, thiserror::Error)]
pub enum CourtError {
    /// No harem member has the given ID.
    #[error("harem member not found: {0}")]
    MemberNotFound(MemberId),

    /// No heir has the given ID.
    #[error("heir not found: {0}")]
    HeirNotFound(HeirId),

    /// The ruler does not have enough stamina for the action.
    #[error("insufficient stamina: need {required}, have {available}")]
    InsufficientStamina {
        /// Stamina the action costs.
        required: u32,
        /// Stamina the ruler has left.
        available: u32,
    },

    /// The member is already expecting.
    #[error("harem member already pregnant: {0}")]
    AlreadyPregnant(MemberId),

    /// The only empress cannot be demoted directly; elevate someone else.
    #[error("cannot demote the empress {0} without elevating a successor")]
    EmpressDemotion(MemberId),

    /// A name list needed for generation is empty.
    #[error("name list is empty: {list}")]
    EmptyNameList {
        /// Which list.
        list: &'static str,
    },
}
