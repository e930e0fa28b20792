//! Shared type definitions for the reign simulation.
//!
//! This crate is the single source of truth for the data model used across
//! the workspace. Types defined here flow downstream to `TypeScript` via
//! `ts-rs` for the presentation layer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`enums`] -- Status tags, event kinds, ranks, traits, endings
//! - [`structs`] -- Ruler, attributes, events, harem, heirs, chronicle
//! - [`snapshot`] -- The read-only projection published to the host

pub mod enums;
pub mod ids;
pub mod snapshot;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    AttitudeType, AttributeKind, CourtStatus, CycleMode, DynastyStatus, EndingKind,
    EventCategory, EventKind, GameState, Gender, HaremAction, HaremRank, HaremTrait,
    HealthStatus, HeirStatus, HeirTrait, NationalStatus, ReignStage, ResourceStatus, RulerTrait,
    Season, SuddenReason,
};
pub use ids::{EventId, FragmentId, HeirId, LogId, MemberId, OptionId, RulerId};
pub use snapshot::{CategoryCount, ClockView, ReignSnapshot};
pub use structs::{
    AttributeDelta, Attributes, Ending, EventInstance, EventOption, EventTemplate, GameLog,
    HaremMember, Heir, MAX_STAMINA, MemoryFragment, NameLists, OptionEffect, OptionTemplate, Ruler,
    Toast,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs writes bindings for every #[ts(export)] type reachable from
        // these roots into `bindings/` relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::RulerId::export_all();
        let _ = crate::ids::EventId::export_all();
        let _ = crate::ids::OptionId::export_all();
        let _ = crate::ids::MemberId::export_all();
        let _ = crate::ids::HeirId::export_all();
        let _ = crate::ids::LogId::export_all();
        let _ = crate::ids::FragmentId::export_all();

        // Enums not reachable from the snapshot
        let _ = crate::enums::HaremAction::export_all();
        let _ = crate::enums::EndingKind::export_all();
        let _ = crate::enums::DynastyStatus::export_all();

        // Structs
        let _ = crate::structs::EventTemplate::export_all();
        let _ = crate::structs::NameLists::export_all();
        let _ = crate::snapshot::ReignSnapshot::export_all();
    }
}
