use rand::Rng;

/// Source of uniform choices for maze carving and the random walks.
///
/// Every [Rng] is a source, so a seeded [rand::rngs::StdRng] gives reproducible mazes.
/// Tests can script the choices with their own implementation.
pub trait RandomSource {
    /// Returns an index in `0..n`. Callers never pass `n == 0`.
    fn pick(&mut self, n: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn pick(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }
}

/// Picks a uniformly random element of `items`, or [None] if it is empty.
pub fn choose<'a, T, R>(rng: &mut R, items: &'a [T]) -> Option<&'a T>
where
    R: RandomSource + ?Sized,
{
    if items.is_empty() {
        None
    } else {
        items.get(rng.pick(items.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn rng_picks_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..20 {
            for _ in 0..50 {
                assert!(rng.pick(n) < n);
            }
        }
    }

    #[test]
    fn choose_from_empty_is_none() {
        let mut rng = StdRng::seed_from_u64(0);
        let empty: [u8; 0] = [];
        assert!(choose(&mut rng, &empty).is_none());
        assert_eq!(choose(&mut rng, &[42]), Some(&42));
    }
}
