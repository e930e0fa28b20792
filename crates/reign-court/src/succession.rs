//! Succession: turning an heir into the next ruler.
//!
//! The successor inherits the realm's national, resource, and court tags
//! and attribute *tendencies* from the predecessor, never exact values.
//! Heir traits map onto ruler traits through a bounded table with a random
//! top-up to two or three traits.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::info;

use reign_types::{HeirStatus, Heir, HeirTrait, Ruler, RulerTrait};

use crate::attributes::inherit_attributes;
use crate::config::CourtConfig;
use crate::dice::draw_id;
use crate::ruler::roll_trait_count;

/// Most traits a ruler can carry.
const MAX_RULER_TRAITS: usize = 3;

/// The ruler trait an heir trait matures into, if any.
const fn mapped_trait(heir_trait: HeirTrait) -> Option<RulerTrait> {
    match heir_trait {
        HeirTrait::Clever => Some(RulerTrait::Wise),
        HeirTrait::Diligent => Some(RulerTrait::Diligent),
        HeirTrait::Brave => Some(RulerTrait::Martial),
        HeirTrait::Kind => Some(RulerTrait::Benevolent),
        HeirTrait::Willful => Some(RulerTrait::Decisive),
        HeirTrait::Frail => None,
    }
}

/// Convert heir traits into two or three ruler traits.
pub fn ruler_traits_from_heir(heir_traits: &[HeirTrait], rng: &mut impl Rng) -> Vec<RulerTrait> {
    let mut traits: Vec<RulerTrait> = Vec::new();
    for mapped in heir_traits.iter().filter_map(|t| mapped_trait(*t)) {
        if !traits.contains(&mapped) {
            traits.push(mapped);
        }
    }
    traits.truncate(MAX_RULER_TRAITS);

    let target = roll_trait_count(rng).max(traits.len());
    while traits.len() < target {
        let remaining: Vec<RulerTrait> = RulerTrait::ALL
            .iter()
            .copied()
            .filter(|t| !traits.contains(t))
            .collect();
        match remaining.choose(rng) {
            Some(extra) => traits.push(*extra),
            None => break,
        }
    }
    traits
}

/// Age at which an heir takes the throne.
pub fn accession_age(heir: &Heir, config: &CourtConfig) -> u32 {
    heir.age.max(config.adulthood_age)
}

/// Build the successor ruler from `heir`.
pub fn succeed(
    previous: &Ruler,
    heir: &Heir,
    reign_title: String,
    config: &CourtConfig,
    rng: &mut impl Rng,
) -> Ruler {
    let ruler = Ruler {
        id: draw_id(rng),
        name: heir.name.clone(),
        age: accession_age(heir, config),
        reign_title,
        years_in_power: 1,
        dynasty_status: previous.national_status.dynasty_status(),
        national_status: previous.national_status,
        resource_status: previous.resource_status,
        court_status: previous.court_status,
        heir_status: HeirStatus::None,
        traits: ruler_traits_from_heir(&heir.traits, rng),
        attributes: inherit_attributes(&previous.attributes, rng),
        generation: previous.generation.saturating_add(1),
    };
    info!(
        successor = %ruler.name,
        predecessor = %previous.name,
        generation = ruler.generation,
        "succession"
    );
    ruler
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal::Decimal;
    use reign_types::{
        Attributes, CourtStatus, DynastyStatus, Gender, HeirId, NationalStatus, ResourceStatus,
        RulerId,
    };

    use super::*;

    fn predecessor() -> Ruler {
        Ruler {
            id: RulerId::new(),
            name: "李世民".to_owned(),
            age: 50,
            reign_title: "永泰".to_owned(),
            years_in_power: 12,
            dynasty_status: DynastyStatus::Prosperity,
            national_status: NationalStatus::Turbulent,
            resource_status: ResourceStatus::Deficit,
            court_status: CourtStatus::Ripple,
            heir_status: HeirStatus::Excellent,
            traits: vec![RulerTrait::Wise, RulerTrait::Martial],
            attributes: Attributes {
                mood: Decimal::new(9, 1),
                popularity: Decimal::new(1, 1),
                ..Attributes::default()
            },
            generation: 1,
        }
    }

    fn heir(age: u32, traits: Vec<HeirTrait>) -> Heir {
        Heir {
            id: HeirId::new(),
            name: "李承乾".to_owned(),
            gender: Gender::Male,
            age,
            looks: 50,
            ability: 60,
            influence: 40,
            mother_name: "婉清".to_owned(),
            traits,
            is_crown_prince: true,
        }
    }

    #[test]
    fn young_heir_starts_at_adulthood() {
        let config = CourtConfig::default();
        assert_eq!(accession_age(&heir(3, vec![]), &config), 16);
        assert_eq!(accession_age(&heir(22, vec![]), &config), 22);
    }

    #[test]
    fn traits_are_mapped_then_topped_up() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..30 {
            let traits = ruler_traits_from_heir(&[HeirTrait::Frail], &mut rng);
            assert!((2..=3).contains(&traits.len()));
            let mapped = ruler_traits_from_heir(&[HeirTrait::Clever, HeirTrait::Kind], &mut rng);
            assert!(mapped.contains(&RulerTrait::Wise));
            assert!(mapped.contains(&RulerTrait::Benevolent));
            assert!((2..=3).contains(&mapped.len()));
        }
    }

    #[test]
    fn successor_inherits_tags_and_tendencies() {
        let mut rng = StdRng::seed_from_u64(2);
        let prev = predecessor();
        let next = succeed(
            &prev,
            &heir(10, vec![HeirTrait::Brave]),
            "元启".to_owned(),
            &CourtConfig::default(),
            &mut rng,
        );
        assert_eq!(next.name, "李承乾");
        assert_eq!(next.age, 16);
        assert_eq!(next.generation, 2);
        assert_eq!(next.national_status, NationalStatus::Turbulent);
        assert_eq!(next.dynasty_status, DynastyStatus::Unstable);
        assert_eq!(next.resource_status, ResourceStatus::Deficit);
        assert_eq!(next.court_status, CourtStatus::Ripple);
        assert_eq!(next.heir_status, HeirStatus::None);
        assert!(next.traits.contains(&RulerTrait::Martial));
        assert!(next.attributes.mood >= Decimal::new(55, 2));
        assert!(next.attributes.popularity <= Decimal::new(45, 2));
        assert_ne!(next.id, prev.id);
    }
}
