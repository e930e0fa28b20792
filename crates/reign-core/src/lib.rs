//! Reign clock, event pools, ending resolution, and orchestration for the
//! reign simulation.
//!
//! This crate owns the per-cycle loop that drives a reign: refill the
//! category pools, roll the critical gate, let the host resolve events, and
//! roll over to the next cycle. Every transition goes through
//! [`ReignController::apply`].
//!
//! # Modules
//!
//! - [`catalog`] -- [`ContentCatalog`] trait and the YAML-backed
//!   [`TableCatalog`].
//! - [`chronicle`] -- Log, narrative lines, and memory fragments.
//! - [`clock`] -- Round counter with year, month, season, and stage
//!   derivation.
//! - [`command`] -- Player commands and the effects they produce.
//! - [`config`] -- Configuration loading from `reign-config.yaml` into
//!   strongly-typed structs.
//! - [`controller`] -- The session state machine.
//! - [`critical`] -- Critical-event probability and roll.
//! - [`ending`] -- Collapse and sudden-ending checks.
//! - [`pool`] -- Per-category event queues.
//! - [`state`] -- Session state and its snapshot.
//! - [`text`] -- Placeholder rendering and reign-year display.

pub mod catalog;
pub mod chronicle;
pub mod clock;
pub mod command;
pub mod config;
pub mod controller;
pub mod critical;
pub mod ending;
pub mod pool;
pub mod state;
pub mod text;

pub use catalog::{ContentCatalog, TableCatalog};
pub use command::{Command, Effect};
pub use config::ReignConfig;
pub use controller::{ControllerError, ReignController};
