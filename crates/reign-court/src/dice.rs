//! Small helpers over the session RNG.

use rand::Rng;
use rand::seq::IndexedRandom;
use uuid::Uuid;

/// Draw a typed identifier from the RNG.
pub fn draw_id<T: From<Uuid>>(rng: &mut impl Rng) -> T {
    let mut bytes = [0_u8; 16];
    rng.fill_bytes(&mut bytes);
    T::from(uuid::Builder::from_random_bytes(bytes).into_uuid())
}

/// Roll against a percentage. `0` never passes, `100` always does.
pub fn roll_pct(rng: &mut impl Rng, pct: u32) -> bool {
    rng.random_range(0..100_u32) < pct
}

/// Pick up to `count` distinct items.
pub fn pick_distinct<T: Copy>(rng: &mut impl Rng, pool: &[T], count: usize) -> Vec<T> {
    pool.choose_multiple(rng, count).copied().collect()
}

/// Pick one name, or `None` if the list is empty.
pub fn pick_name(rng: &mut impl Rng, names: &[String]) -> Option<String> {
    names.choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use reign_types::EventId;

    use super::*;

    #[test]
    fn same_seed_same_ids() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        let first: EventId = draw_id(&mut a);
        let second: EventId = draw_id(&mut b);
        assert_eq!(first, second);
    }

    #[test]
    fn pct_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert!(!roll_pct(&mut rng, 0));
            assert!(roll_pct(&mut rng, 100));
        }
    }

    #[test]
    fn distinct_picks_do_not_repeat() {
        let mut rng = StdRng::seed_from_u64(3);
        let picked = pick_distinct(&mut rng, &[1, 2, 3, 4], 3);
        assert_eq!(picked.len(), 3);
        for (i, a) in picked.iter().enumerate() {
            assert!(!picked.iter().skip(i.saturating_add(1)).any(|b| b == a));
        }
    }
}
