//! The ruler and the dynasty around them.
//!
//! This crate owns every rule about the ruler's bounded attributes and the
//! succession subsystem: the harem, pregnancy, heirs, crown-prince
//! designation, and the hand-over to a new reign. Functions are pure over
//! their inputs plus an injected RNG, so every roll is reproducible from a
//! seed.
//!
//! # Modules
//!
//! - [`attributes`] -- Clamped attribute updates, rolls, and tendencies
//! - [`config`] -- Court tunables
//! - [`dice`] -- RNG helpers (IDs, percentage rolls, distinct picks)
//! - [`error`] -- Court error type
//! - [`harem`] -- Harem ranks, interactions, pregnancy, sickness
//! - [`heirs`] -- Heir birth, naming, crown prince
//! - [`ruler`] -- Candidates and coronation
//! - [`succession`] -- Successor construction

pub mod attributes;
pub mod config;
pub mod dice;
pub mod error;
pub mod harem;
pub mod heirs;
pub mod ruler;
pub mod succession;

pub use config::CourtConfig;
pub use error::CourtError;
