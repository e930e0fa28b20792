//! Ruler candidates and coronation.

use rand::Rng;
use rand::seq::IndexedRandom;

use reign_types::{
    Attributes, CourtStatus, DynastyStatus, HeirStatus, NameLists, NationalStatus,
    ResourceStatus, Ruler, RulerTrait,
};

use crate::attributes::roll_attributes;
use crate::config::CourtConfig;
use crate::dice::{draw_id, pick_distinct, pick_name};
use crate::error::CourtError;

/// Roll how many traits a ruler carries: two or three.
pub fn roll_trait_count(rng: &mut impl Rng) -> usize {
    rng.random_range(2..=3)
}

/// Roll a fresh set of two or three distinct ruler traits.
pub fn roll_ruler_traits(rng: &mut impl Rng) -> Vec<RulerTrait> {
    let count = roll_trait_count(rng);
    pick_distinct(rng, &RulerTrait::ALL, count)
}

/// A candidate for the throne, offered before the reign is confirmed.
///
/// Identity, age, era name, and dynasty status are rolled here; attributes
/// and the remaining status tags are only rolled by [`crown`].
pub fn new_candidate(names: &NameLists, rng: &mut impl Rng) -> Result<Ruler, CourtError> {
    let surname = pick_name(rng, &names.surnames).ok_or(CourtError::EmptyNameList {
        list: "surnames",
    })?;
    let given = pick_name(rng, &names.given_names).ok_or(CourtError::EmptyNameList {
        list: "given_names",
    })?;
    let reign_title = pick_name(rng, &names.reign_titles).ok_or(CourtError::EmptyNameList {
        list: "reign_titles",
    })?;

    Ok(Ruler {
        id: draw_id(rng),
        name: format!("{surname}{given}"),
        age: rng.random_range(18..=40),
        reign_title,
        years_in_power: 1,
        dynasty_status: *DynastyStatus::ALL.choose(rng).unwrap_or(&DynastyStatus::Stable),
        national_status: NationalStatus::Prosperous,
        resource_status: ResourceStatus::Balanced,
        court_status: CourtStatus::Harmonious,
        heir_status: HeirStatus::None,
        traits: Vec::new(),
        attributes: Attributes::default(),
        generation: 1,
    })
}

/// Finalize a candidate: roll attributes, status tags, and traits.
pub fn crown(candidate: &Ruler, config: &CourtConfig, rng: &mut impl Rng) -> Ruler {
    let mut ruler = candidate.clone();
    ruler.attributes = roll_attributes(config, rng);
    ruler.national_status = *NationalStatus::ALL
        .choose(rng)
        .unwrap_or(&NationalStatus::Prosperous);
    ruler.resource_status = *ResourceStatus::ALL
        .choose(rng)
        .unwrap_or(&ResourceStatus::Balanced);
    ruler.court_status = *CourtStatus::ALL
        .choose(rng)
        .unwrap_or(&CourtStatus::Harmonious);
    ruler.heir_status = HeirStatus::None;
    ruler.traits = roll_ruler_traits(rng);
    ruler
}
