use rand::Rng;

use crate::errors::PlinthError;

/// Draws indices at random with probability proportional to a fixed
/// set of integer weights.
///
/// The weights are accumulated into a prefix-sum array once, at
/// construction; each draw is then a uniform pick in `0..total`
/// resolved by binary search, so sampling is O(log n).
pub struct WeightedSampler {
    accum: Vec<u64>,
}

impl WeightedSampler {
    pub fn new(weights: &[u64]) -> Result<WeightedSampler, PlinthError> {
        if weights.is_empty() {
            return Err(PlinthError::EmptyWeights);
        }
        let mut accum = Vec::with_capacity(weights.len() + 1);
        let mut total = 0u64;
        for w in weights {
            accum.push(total);
            total += w;
        }
        accum.push(total);
        if total == 0 {
            return Err(PlinthError::ZeroWeightTotal);
        }
        Ok(WeightedSampler { accum })
    }

    pub fn num(&self) -> usize {
        self.accum.len() - 1
    }

    /// The weight item `pos` was constructed with.
    pub fn weight(&self, pos: usize) -> Option<u64> {
        if pos < self.num() {
            Some(self.accum[pos + 1] - self.accum[pos])
        } else {
            None
        }
    }

    pub fn total_weight(&self) -> u64 {
        self.accum[self.num()]
    }

    /// Draw one index; item `i` comes up with probability
    /// `weight(i) / total_weight()`. Zero-weight items never come up.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        let val = rng.random_range(0..self.total_weight());
        // find i with accum[i] <= val < accum[i + 1]; the bisection
        // keeps accum[left] <= val < accum[right] throughout
        let mut left = 0;
        let mut right = self.num();
        while left + 1 < right {
            let mid = (left + right) / 2;
            if self.accum[mid] <= val {
                left = mid;
            } else {
                right = mid;
            }
        }
        left
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn rejects_degenerate_weights() {
        assert!(matches!(
            WeightedSampler::new(&[]),
            Err(PlinthError::EmptyWeights)
        ));
        assert!(matches!(
            WeightedSampler::new(&[0, 0, 0]),
            Err(PlinthError::ZeroWeightTotal)
        ));
    }

    #[test]
    fn recovers_the_weights() {
        let s = WeightedSampler::new(&[1, 2, 3]).unwrap();
        assert_eq!(s.num(), 3);
        assert_eq!(s.total_weight(), 6);
        assert_eq!(s.weight(0), Some(1));
        assert_eq!(s.weight(1), Some(2));
        assert_eq!(s.weight(2), Some(3));
        assert_eq!(s.weight(3), None);
    }

    #[test]
    fn a_single_item_always_comes_up() {
        let s = WeightedSampler::new(&[5]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(s.sample(&mut rng), 0);
        }
    }

    #[test]
    fn zero_weight_items_never_come_up() {
        let s = WeightedSampler::new(&[1, 0, 3, 0, 2]).unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..10000 {
            let i = s.sample(&mut rng);
            assert_ne!(i, 1);
            assert_ne!(i, 3);
        }
    }

    #[test]
    fn frequencies_follow_the_weights() {
        let s = WeightedSampler::new(&[1, 2, 7]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 3];
        for _ in 0..10000 {
            counts[s.sample(&mut rng)] += 1;
        }
        assert!((800..1200).contains(&counts[0]), "counts = {:?}", counts);
        assert!((1700..2300).contains(&counts[1]), "counts = {:?}", counts);
        assert!((6600..7400).contains(&counts[2]), "counts = {:?}", counts);
    }
}
