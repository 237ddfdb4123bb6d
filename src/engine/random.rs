use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Seeded generator when a seed is given, entropy otherwise.
pub fn seeded_rng(seed: Option<u64>) -> SmallRng {
    if let Some(seed) = seed {
        SmallRng::seed_from_u64(seed)
    } else {
        SmallRng::from_entropy()
    }
}

/// Uniform pick from a finite set. `None` only for an empty slice.
pub fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> Option<T> {
    items.choose(rng).copied()
}

/// Uniform integer in `[lo, hi]`, both ends inclusive.
pub fn rand_int<R: Rng + ?Sized>(rng: &mut R, lo: i32, hi: i32) -> i32 {
    rng.gen_range(lo..=hi)
}

pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen_bool(p.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_covers_every_item() {
        let mut rng = seeded_rng(Some(7));
        let items = [125, 156, 188];
        let mut seen = [false; 3];
        for _ in 0..200 {
            let v = pick(&mut rng, &items).unwrap();
            let idx = items.iter().position(|&i| i == v).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_pick_empty_is_none() {
        let mut rng = seeded_rng(Some(1));
        let empty: [u8; 0] = [];
        assert_eq!(pick(&mut rng, &empty), None);
    }

    #[test]
    fn test_rand_int_stays_in_range() {
        let mut rng = seeded_rng(Some(3));
        for _ in 0..500 {
            let v = rand_int(&mut rng, -8, 8);
            assert!((-8..=8).contains(&v));
        }
        assert_eq!(rand_int(&mut rng, 4, 4), 4);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = seeded_rng(Some(42));
        let mut b = seeded_rng(Some(42));
        let xs: Vec<i32> = (0..16).map(|_| rand_int(&mut a, 0, 1000)).collect();
        let ys: Vec<i32> = (0..16).map(|_| rand_int(&mut b, 0, 1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = seeded_rng(Some(9));
        assert!(!chance(&mut rng, 0.0));
        assert!(chance(&mut rng, 1.0));
    }
}
