//! Heirs: birth, naming, crown-prince designation, and ageing.
//!
//! At most one heir carries the crown-prince flag. [`set_crown_prince`]
//! clears every other holder before setting the new one.

use rand::Rng;
use tracing::info;

use reign_types::{Gender, HaremMember, HaremTrait, Heir, HeirId, HeirStatus, HeirTrait};

use crate::config::CourtConfig;
use crate::dice::{draw_id, pick_distinct, pick_name, roll_pct};
use crate::error::CourtError;

/// Ability at which an heir lifts the dynasty's heir status to excellent.
const EXCELLENT_ABILITY: u32 = 70;

/// Upper bound for heir stats.
const MAX_STAT: u32 = 100;

/// Most traits an heir is born with.
const MAX_HEIR_TRAITS: usize = 2;

/// The heir trait a maternal trait tends to produce.
const fn inherited_trait(maternal: HaremTrait) -> HeirTrait {
    match maternal {
        HaremTrait::Gentle | HaremTrait::Virtuous => HeirTrait::Kind,
        HaremTrait::Talented | HaremTrait::Scheming => HeirTrait::Clever,
        HaremTrait::Ambitious | HaremTrait::Jealous => HeirTrait::Willful,
    }
}

/// The family name of a ruler: the first character of their name.
pub fn surname_of(name: &str) -> String {
    name.chars().next().map(String::from).unwrap_or_default()
}

/// Generate a newborn heir of `mother`.
///
/// Gender is a coin flip; looks, ability, and influence are rolled, with a
/// talented or virtuous mother adding to ability and her influence carrying
/// half over. Each maternal trait passes on with `trait_inheritance_pct`
/// chance; an heir who inherits nothing gets one random trait.
pub fn generate_heir(
    mother: &HaremMember,
    surname: &str,
    given_names: &[String],
    config: &CourtConfig,
    rng: &mut impl Rng,
) -> Result<Heir, CourtError> {
    let given = pick_name(rng, given_names).ok_or(CourtError::EmptyNameList {
        list: "heir_names",
    })?;

    let gender = if rng.random_range(0..2_u8) == 0 {
        Gender::Male
    } else {
        Gender::Female
    };

    let gifted = mother
        .traits
        .iter()
        .any(|t| matches!(t, HaremTrait::Talented | HaremTrait::Virtuous));
    let ability_bonus: u32 = if gifted { 10 } else { 0 };
    let ability = rng
        .random_range(20..=80_u32)
        .saturating_add(ability_bonus)
        .min(MAX_STAT);
    let influence = (mother.influence / 2)
        .saturating_add(rng.random_range(0..=40_u32))
        .min(MAX_STAT);

    let mut traits: Vec<HeirTrait> = Vec::new();
    for maternal in &mother.traits {
        let candidate = inherited_trait(*maternal);
        if !traits.contains(&candidate) && roll_pct(rng, config.trait_inheritance_pct) {
            traits.push(candidate);
        }
    }
    if traits.is_empty() {
        traits = pick_distinct(rng, &HeirTrait::ALL, 1);
    }
    traits.truncate(MAX_HEIR_TRAITS);

    let heir = Heir {
        id: draw_id(rng),
        name: format!("{surname}{given}"),
        gender,
        age: 0,
        looks: rng.random_range(30..=90),
        ability,
        influence,
        mother_name: mother.name.clone(),
        traits,
        is_crown_prince: false,
    };
    info!(heir = %heir.name, mother = %heir.mother_name, gender = ?heir.gender, "heir born");
    Ok(heir)
}

/// A second name to offer at the naming ceremony, different from `current`
/// when the list allows.
pub fn alternative_name(
    surname: &str,
    current: &str,
    given_names: &[String],
    rng: &mut impl Rng,
) -> Option<String> {
    let candidates: Vec<String> = given_names
        .iter()
        .map(|given| format!("{surname}{given}"))
        .filter(|full| full != current)
        .collect();
    pick_name(rng, &candidates)
}

/// Designate the crown prince. Returns the previous holder, if any.
pub fn set_crown_prince(heirs: &mut [Heir], heir_id: HeirId) -> Result<Option<HeirId>, CourtError> {
    if !heirs.iter().any(|h| h.id == heir_id) {
        return Err(CourtError::HeirNotFound(heir_id));
    }
    let mut previous = None;
    for heir in heirs.iter_mut() {
        if heir.is_crown_prince && heir.id != heir_id {
            previous = Some(heir.id);
        }
        heir.is_crown_prince = heir.id == heir_id;
    }
    Ok(previous)
}

/// The designated crown prince, if any.
pub fn crown_prince(heirs: &[Heir]) -> Option<&Heir> {
    heirs.iter().find(|h| h.is_crown_prince)
}

/// Give an heir a new name.
pub fn rename(heirs: &mut [Heir], heir_id: HeirId, name: &str) -> Result<(), CourtError> {
    let heir = heirs
        .iter_mut()
        .find(|h| h.id == heir_id)
        .ok_or(CourtError::HeirNotFound(heir_id))?;
    name.clone_into(&mut heir.name);
    Ok(())
}

/// Age every heir by one year.
pub fn age_heirs(heirs: &mut [Heir]) {
    for heir in heirs.iter_mut() {
        heir.age = heir.age.saturating_add(1);
    }
}

/// Heir status tag implied by the current heirs.
pub fn heir_status(heirs: &[Heir]) -> HeirStatus {
    if heirs.is_empty() {
        HeirStatus::None
    } else if heirs.iter().any(|h| h.ability >= EXCELLENT_ABILITY) {
        HeirStatus::Excellent
    } else {
        HeirStatus::Adequate
    }
}
