use rand::Rng;
use rand::seq::SliceRandom;

/// Returns a uniformly random permutation of `items` (Fisher–Yates).
///
/// The input is left untouched; callers replace their ordering wholesale.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.as_mut_slice().shuffle(rng);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn shuffled_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let items: Vec<u32> = (0..50).collect();
        let mut out = shuffled(&items, &mut rng);
        assert_eq!(out.len(), items.len());
        out.sort_unstable();
        assert_eq!(out, items);
    }

    #[test]
    fn shuffled_handles_empty_and_single() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(shuffled::<u8, _>(&[], &mut rng).is_empty());
        assert_eq!(shuffled(&[9], &mut rng), vec![9]);
    }

    #[test]
    fn every_position_is_reachable() {
        // Each element should land in first position at least once over many draws.
        let mut rng = StdRng::seed_from_u64(42);
        let items = [0_usize, 1, 2, 3];
        let mut seen_first = [0_u32; 4];
        for _ in 0..2_000 {
            let out = shuffled(&items, &mut rng);
            seen_first[out[0]] += 1;
        }
        for count in seen_first {
            assert!(count > 300, "skewed distribution: {seen_first:?}");
        }
    }
}
