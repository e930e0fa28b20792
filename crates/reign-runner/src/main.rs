//! Headless runner for the reign simulation.
//!
//! Plays one dynasty from coronation to its last ending without a UI and
//! prints the final snapshot as JSON on stdout. Useful for balancing the
//! content tables and for smoke-testing configuration files.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `REIGN_CONFIG` or `reign-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Load the content catalog (`REIGN_CATALOG` or the built-in tables)
//! 4. Crown the first candidate and play each reign with the chooser
//! 5. Hand the throne to an heir until the generation budget is spent
//! 6. Print the final snapshot
//!
//! # Environment
//!
//! - `REIGN_CONFIG`: path to a YAML config file
//! - `REIGN_CATALOG`: path to a YAML content catalog
//! - `REIGN_CHOOSER`: `first` or `random` (default `random`)
//! - `REIGN_MAX_STEPS`: command budget per reign (default 2000)
//! - `REIGN_GENERATIONS`: how many rulers to play (default 2)

mod autoplay;
mod error;

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use reign_core::{ContentCatalog, ReignConfig, ReignController, TableCatalog};

use crate::autoplay::{Chooser, FirstChooser, RandomChooser, play_reign};
use crate::error::RunnerError;

const DEFAULT_MAX_STEPS: u32 = 2000;
const DEFAULT_GENERATIONS: u32 = 2;

/// Runner entry point.
///
/// # Errors
///
/// Returns an error if configuration, catalog, or controller setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    let fallback = config.logging.level.clone();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_target(true)
        .init();

    info!(
        seed = config.session.seed,
        cycle_mode = ?config.session.cycle_mode,
        max_rounds = config.clock.max_rounds,
        "reign-runner starting"
    );

    let catalog = load_catalog()?;
    let max_steps = env_u32("REIGN_MAX_STEPS", DEFAULT_MAX_STEPS)?;
    let generations = env_u32("REIGN_GENERATIONS", DEFAULT_GENERATIONS)?;

    // Separate streams keep the controller's draws reproducible regardless
    // of what the scripted player does.
    let seed = config.session.seed;
    let mut script_rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    let mut chooser = build_chooser(seed.wrapping_add(2))?;

    let mut controller = ReignController::new(config, catalog)?;
    controller.confirm_and_start();

    for generation in 1..=generations {
        let summary = play_reign(
            &mut controller,
            chooser.as_mut(),
            &mut script_rng,
            max_steps,
        );
        if !summary.ended {
            info!(generation, steps = summary.steps, "abdicating at step budget");
            controller.abdicate();
        }
        log_reign(&controller);

        if generation == generations || !hand_over(&mut controller) {
            break;
        }
    }

    let json = serde_json::to_string_pretty(&controller.snapshot()).map_err(RunnerError::from)?;
    println!("{json}");
    Ok(())
}

/// Load configuration from `REIGN_CONFIG`, then `reign-config.yaml`, then
/// defaults.
fn load_config() -> Result<ReignConfig, RunnerError> {
    let path = std::env::var_os("REIGN_CONFIG")
        .map_or_else(|| PathBuf::from("reign-config.yaml"), PathBuf::from);
    if path.exists() {
        Ok(ReignConfig::from_file(&path)?)
    } else {
        Ok(ReignConfig::default())
    }
}

/// Load the content catalog from `REIGN_CATALOG`, or the built-in tables.
fn load_catalog() -> Result<TableCatalog, RunnerError> {
    match std::env::var_os("REIGN_CATALOG") {
        Some(path) => {
            let catalog = TableCatalog::from_file(Path::new(&path))?;
            info!(path = %Path::new(&path).display(), "catalog loaded");
            Ok(catalog)
        }
        None => Ok(TableCatalog::builtin()?),
    }
}

/// Parse a numeric environment variable, falling back to `default`.
fn env_u32(name: &'static str, default: u32) -> Result<u32, RunnerError> {
    let Ok(value) = std::env::var(name) else {
        return Ok(default);
    };
    match value.parse() {
        Ok(parsed) => Ok(parsed),
        Err(_) => Err(RunnerError::InvalidEnv { name, value }),
    }
}

fn build_chooser(seed: u64) -> Result<Box<dyn Chooser>, RunnerError> {
    let kind = std::env::var("REIGN_CHOOSER").unwrap_or_else(|_| "random".to_owned());
    match kind.as_str() {
        "first" => Ok(Box::new(FirstChooser)),
        "random" => Ok(Box::new(RandomChooser::new(StdRng::seed_from_u64(seed)))),
        _ => Err(RunnerError::InvalidEnv {
            name: "REIGN_CHOOSER",
            value: kind,
        }),
    }
}

fn log_reign<C: ContentCatalog>(controller: &ReignController<C>) {
    let snapshot = controller.snapshot();
    let Some(ruler) = snapshot.ruler.as_ref() else {
        return;
    };
    info!(
        ruler = %ruler.name,
        reign_title = %ruler.reign_title,
        generation = ruler.generation,
        round = snapshot.clock.round,
        ending = ?snapshot.ending,
        heirs = snapshot.heirs.len(),
        chronicle = snapshot.logs.len(),
        "reign over"
    );
}

/// Pass the throne to the crown prince, or the eldest heir. Returns false
/// when the dynasty has nobody left.
fn hand_over<C: ContentCatalog>(controller: &mut ReignController<C>) -> bool {
    let heirs = &controller.state().heirs;
    let successor = heirs
        .iter()
        .find(|h| h.is_crown_prince)
        .or_else(|| heirs.first())
        .map(|h| h.id);
    let Some(heir_id) = successor else {
        info!("no heir, the dynasty ends");
        return false;
    };
    controller.succeed_with_heir(heir_id);
    true
}
