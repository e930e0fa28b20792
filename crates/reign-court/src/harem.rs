//! The inner palace: initial harem, rank changes, interactions, pregnancy,
//! sickness, and ageing.
//!
//! Rank uniqueness is structural: [`set_rank`] is the only way to change a
//! rank, and elevating a member to [`HaremRank::Empress`] demotes every
//! other holder in the same call.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use reign_types::{
    Attributes, HaremAction, HaremMember, HaremRank, HaremTrait, HealthStatus, MemberId,
};

use crate::attributes::deduct_stamina;
use crate::config::CourtConfig;
use crate::dice::{draw_id, pick_distinct, roll_pct};
use crate::error::CourtError;

/// Affection ceiling.
const MAX_AFFECTION: u32 = 100;

/// Ranks filled at the start of every reign, in order.
const OPENING_RANKS: [HaremRank; 3] = [
    HaremRank::Empress,
    HaremRank::NobleConsort,
    HaremRank::Consort,
];

// ---------------------------------------------------------------------------
// Initialization
// ---------------------------------------------------------------------------

/// Create the opening harem: exactly one empress, one noble consort, and one
/// consort, with distinct names where the list allows.
pub fn initial_harem(names: &[String], rng: &mut impl Rng) -> Result<Vec<HaremMember>, CourtError> {
    if names.is_empty() {
        return Err(CourtError::EmptyNameList {
            list: "consort_names",
        });
    }
    let mut picked: Vec<String> = names
        .choose_multiple(rng, OPENING_RANKS.len())
        .cloned()
        .collect();
    while picked.len() < OPENING_RANKS.len() {
        if let Some(name) = names.choose(rng) {
            picked.push(name.clone());
        }
    }

    let members = OPENING_RANKS
        .iter()
        .zip(picked)
        .map(|(rank, name)| new_member(name, *rank, rng))
        .collect();
    Ok(members)
}

fn new_member(name: String, rank: HaremRank, rng: &mut impl Rng) -> HaremMember {
    let influence = if rank == HaremRank::Empress {
        rng.random_range(60..=90)
    } else {
        rng.random_range(30..=80)
    };
    let trait_count = rng.random_range(1..=2_usize);
    HaremMember {
        id: draw_id(rng),
        name,
        rank,
        age: rng.random_range(16..=24),
        influence,
        affection: rng.random_range(40..=70),
        children: 0,
        traits: pick_distinct(rng, &HaremTrait::ALL, trait_count),
        health: None,
    }
}

// ---------------------------------------------------------------------------
// Rank
// ---------------------------------------------------------------------------

/// Assign a rank. Elevating to empress demotes any prior empress to noble
/// consort and returns her ID.
///
/// The reigning empress cannot be moved to a lower rank directly; the
/// court always keeps its empress until another member takes the title.
pub fn set_rank(
    members: &mut [HaremMember],
    member_id: MemberId,
    rank: HaremRank,
) -> Result<Option<MemberId>, CourtError> {
    let current = members
        .iter()
        .find(|m| m.id == member_id)
        .map(|m| m.rank)
        .ok_or(CourtError::MemberNotFound(member_id))?;

    if current == HaremRank::Empress && rank != HaremRank::Empress {
        return Err(CourtError::EmpressDemotion(member_id));
    }

    let mut demoted = None;
    for member in members.iter_mut() {
        if member.id == member_id {
            member.rank = rank;
        } else if rank == HaremRank::Empress && member.rank == HaremRank::Empress {
            member.rank = HaremRank::NobleConsort;
            demoted = Some(member.id);
        }
    }
    Ok(demoted)
}

/// The reigning empress, if any.
pub fn empress(members: &[HaremMember]) -> Option<&HaremMember> {
    members.iter().find(|m| m.rank == HaremRank::Empress)
}

/// Members ordered by rank, highest first. Ties keep their order.
pub fn sorted_by_rank(members: &[HaremMember]) -> Vec<HaremMember> {
    let mut sorted = members.to_vec();
    sorted.sort_by_key(|m| m.rank);
    sorted
}

// ---------------------------------------------------------------------------
// Interactions
// ---------------------------------------------------------------------------

/// Result of a successful interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    /// Ruler attributes after paying the stamina cost.
    pub attributes: Attributes,
    /// Whether a pregnancy began.
    pub conceived: bool,
    /// Empress demoted by a promotion, if any.
    pub demoted: Option<MemberId>,
}

/// Perform a harem interaction.
///
/// Chats and night visits cost stamina and fail without it. A night visit
/// with a healthy member may start a pregnancy; a member already expecting
/// cannot be visited for that purpose.
pub fn interact(
    members: &mut [HaremMember],
    attrs: &Attributes,
    member_id: MemberId,
    action: HaremAction,
    config: &CourtConfig,
    rng: &mut impl Rng,
) -> Result<Interaction, CourtError> {
    if let HaremAction::Promote { rank } = action {
        let demoted = set_rank(members, member_id, rank)?;
        return Ok(Interaction {
            attributes: attrs.clone(),
            conceived: false,
            demoted,
        });
    }

    let member = members
        .iter_mut()
        .find(|m| m.id == member_id)
        .ok_or(CourtError::MemberNotFound(member_id))?;

    let cost = config.interaction_stamina_cost;
    if attrs.stamina < cost {
        return Err(CourtError::InsufficientStamina {
            required: cost,
            available: attrs.stamina,
        });
    }

    let mut conceived = false;
    match action {
        HaremAction::Chat => {
            member.affection = member
                .affection
                .saturating_add(config.chat_affection_gain)
                .min(MAX_AFFECTION);
        }
        HaremAction::SpendNight => {
            if member.is_pregnant() {
                return Err(CourtError::AlreadyPregnant(member_id));
            }
            if member.health.is_none() && roll_pct(rng, config.pregnancy_chance_pct) {
                member.health = Some(HealthStatus::Pregnant { month: 0 });
                conceived = true;
            }
        }
        HaremAction::Promote { .. } => {}
    }

    debug!(member = %member.name, ?action, conceived, "harem interaction");
    Ok(Interaction {
        attributes: deduct_stamina(attrs, cost),
        conceived,
        demoted: None,
    })
}

// ---------------------------------------------------------------------------
// Cycle bookkeeping
// ---------------------------------------------------------------------------

/// Advance every pregnancy by one month. Members who reach term give birth:
/// their health clears, their child count rises, and their IDs are returned
/// in harem order.
pub fn progress_pregnancies(members: &mut [HaremMember], config: &CourtConfig) -> Vec<MemberId> {
    let mut births = Vec::new();
    for member in members.iter_mut() {
        let Some(HealthStatus::Pregnant { month }) = member.health else {
            continue;
        };
        let month = month.saturating_add(1);
        if month >= config.pregnancy_months {
            member.health = None;
            member.children = member.children.saturating_add(1);
            births.push(member.id);
        } else {
            member.health = Some(HealthStatus::Pregnant { month });
        }
    }
    births
}

/// Roll sickness and recovery for one cycle. Returns members who fell ill.
pub fn roll_health(
    members: &mut [HaremMember],
    config: &CourtConfig,
    rng: &mut impl Rng,
) -> Vec<MemberId> {
    let mut fell_ill = Vec::new();
    for member in members.iter_mut() {
        match member.health {
            None => {
                if roll_pct(rng, config.sickness_chance_pct) {
                    member.health = Some(HealthStatus::Sick);
                    fell_ill.push(member.id);
                }
            }
            Some(HealthStatus::Sick) => {
                if roll_pct(rng, config.recovery_chance_pct) {
                    member.health = None;
                }
            }
            Some(HealthStatus::Pregnant { .. }) => {}
        }
    }
    fell_ill
}

/// Age every member by one year.
pub fn age_members(members: &mut [HaremMember]) {
    for member in members.iter_mut() {
        member.age = member.age.saturating_add(1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn names() -> Vec<String> {
        ["婉清", "如月", "芷若", "静姝"]
            .iter()
            .map(|s| (*s).to_owned())
            .collect()
    }

    fn empress_count(members: &[HaremMember]) -> usize {
        members
            .iter()
            .filter(|m| m.rank == HaremRank::Empress)
            .count()
    }

    #[test]
    fn opening_harem_has_one_of_each() {
        let mut rng = StdRng::seed_from_u64(1);
        let members = initial_harem(&names(), &mut rng).unwrap();
        let ranks: Vec<HaremRank> = members.iter().map(|m| m.rank).collect();
        assert_eq!(ranks, OPENING_RANKS.to_vec());
        assert!(members.iter().all(|m| (1..=2).contains(&m.traits.len())));
    }

    #[test]
    fn opening_harem_needs_names() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(initial_harem(&[], &mut rng).is_err());
    }

    #[test]
    fn short_name_list_still_fills_ranks() {
        let mut rng = StdRng::seed_from_u64(1);
        let members = initial_harem(&["婉清".to_owned()], &mut rng).unwrap();
        assert_eq!(members.len(), 3);
    }

    #[test]
    fn elevation_demotes_prior_empress() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut members = initial_harem(&names(), &mut rng).unwrap();
        let old = members.first().unwrap().id;
        let consort = members.get(2).unwrap().id;

        let demoted = set_rank(&mut members, consort, HaremRank::Empress).unwrap();
        assert_eq!(demoted, Some(old));
        assert_eq!(empress_count(&members), 1);
        assert_eq!(empress(&members).unwrap().id, consort);
    }

    #[test]
    fn elevation_repairs_multiple_empresses() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut members = initial_harem(&names(), &mut rng).unwrap();
        for m in &mut members {
            m.rank = HaremRank::Empress;
        }
        let target = members.get(1).unwrap().id;
        set_rank(&mut members, target, HaremRank::Empress).unwrap();
        assert_eq!(empress_count(&members), 1);
    }

    #[test]
    fn empress_cannot_be_demoted_directly() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut members = initial_harem(&names(), &mut rng).unwrap();
        let empress_id = members.first().unwrap().id;
        let result = set_rank(&mut members, empress_id, HaremRank::Concubine);
        assert!(matches!(result, Err(CourtError::EmpressDemotion(_))));
        assert_eq!(empress_count(&members), 1);
    }

    #[test]
    fn chat_raises_affection_with_cap() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut members = initial_harem(&names(), &mut rng).unwrap();
        let id = members.first().unwrap().id;
        members.first_mut().unwrap().affection = 95;
        let config = CourtConfig::default();

        let out = interact(
            &mut members,
            &Attributes::default(),
            id,
            HaremAction::Chat,
            &config,
            &mut rng,
        )
        .unwrap();
        assert_eq!(members.first().unwrap().affection, 100);
        assert_eq!(out.attributes.stamina, 90);
    }

    #[test]
    fn interactions_need_stamina() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut members = initial_harem(&names(), &mut rng).unwrap();
        let id = members.first().unwrap().id;
        let tired = Attributes {
            stamina: 5,
            ..Attributes::default()
        };
        let result = interact(
            &mut members,
            &tired,
            id,
            HaremAction::SpendNight,
            &CourtConfig::default(),
            &mut rng,
        );
        assert!(matches!(result, Err(CourtError::InsufficientStamina { .. })));
    }

    #[test]
    fn certain_conception_then_birth_at_term() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut members = initial_harem(&names(), &mut rng).unwrap();
        for m in &mut members {
            m.health = None;
        }
        let id = members.first().unwrap().id;
        let config = CourtConfig {
            pregnancy_chance_pct: 100,
            ..CourtConfig::default()
        };
        let out = interact(
            &mut members,
            &Attributes::default(),
            id,
            HaremAction::SpendNight,
            &config,
            &mut rng,
        )
        .unwrap();
        assert!(out.conceived);

        let again = interact(
            &mut members,
            &out.attributes,
            id,
            HaremAction::SpendNight,
            &config,
            &mut rng,
        );
        assert!(matches!(again, Err(CourtError::AlreadyPregnant(_))));

        for _ in 0..8 {
            assert!(progress_pregnancies(&mut members, &config).is_empty());
        }
        let births = progress_pregnancies(&mut members, &config);
        assert_eq!(births, vec![id]);
        let mother = members.first().unwrap();
        assert_eq!(mother.health, None);
        assert_eq!(mother.children, 1);
    }

    #[test]
    fn sickness_and_recovery() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut members = initial_harem(&names(), &mut rng).unwrap();
        let always = CourtConfig {
            sickness_chance_pct: 100,
            recovery_chance_pct: 100,
            ..CourtConfig::default()
        };
        let ill = roll_health(&mut members, &always, &mut rng);
        assert_eq!(ill.len(), 3);
        roll_health(&mut members, &always, &mut rng);
        assert!(members.iter().all(|m| m.health.is_none()));
    }

    #[test]
    fn sorting_puts_empress_first() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut members = initial_harem(&names(), &mut rng).unwrap();
        members.reverse();
        let sorted = sorted_by_rank(&members);
        assert_eq!(sorted.first().unwrap().rank, HaremRank::Empress);
    }
}
