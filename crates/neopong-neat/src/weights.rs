//! Weight vector operators used by evolution.
//!
//! Network weights are signed, so every operator works on the symmetric
//! range `[-max_weight, max_weight]`. Crossover is BLX-α (blend crossover
//! sampling uniformly from an expanded range around the parents) and
//! mutation is Gaussian, both applied gene-wise.

use rand::Rng;
use rand_distr::Normal;

/// Creates a weight vector by applying a function to each index.
pub fn from_fn<F>(mut f: F, len: usize) -> Vec<f32>
where
    F: FnMut(usize) -> f32,
{
    let mut values = Vec::with_capacity(len);
    for i in 0..len {
        values.push(f(i));
    }
    values
}

/// Generates a random weight vector, uniform in `[-max_weight, max_weight]`.
pub fn random<R>(rng: &mut R, max_weight: f32, len: usize) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    from_fn(|_| rng.random_range(-max_weight..=max_weight), len)
}

/// Performs BLX-α crossover between two parent weight vectors.
///
/// For each gene, the offspring is sampled uniformly from the parents'
/// range expanded by `alpha` times the parent distance, then clamped to
/// `[-max_weight, max_weight]`.
///
/// # Panics
///
/// Panics if the parent vectors have different lengths.
pub fn blx_alpha<R>(p1: &[f32], p2: &[f32], alpha: f32, max_weight: f32, rng: &mut R) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    assert_eq!(p1.len(), p2.len());
    from_fn(
        |i| {
            let x1 = p1[i];
            let x2 = p2[i];
            let min = f32::min(x1, x2);
            let max = f32::max(x1, x2);
            let d = max - min;
            let lower = min - alpha * d;
            let upper = max + alpha * d;
            rng.random_range(lower..=upper).clamp(-max_weight, max_weight)
        },
        p1.len(),
    )
}

/// Mean absolute difference between two weight vectors.
///
/// Used as the compatibility distance for speciation: genomes whose weight
/// vectors are close in this metric are grouped into the same species.
///
/// # Panics
///
/// Panics if the vectors have different lengths.
#[must_use]
pub fn mean_abs_distance(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len());
    #[expect(clippy::cast_precision_loss)]
    let len = a.len() as f32;
    let total: f32 = a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum();
    total / len
}

/// Applies Gaussian mutation to a weight vector in-place.
///
/// Each gene is perturbed by `N(0, sigma)` with probability `rate` and
/// clamped to `[-max_weight, max_weight]`.
pub fn mutate<R>(weights: &mut [f32], sigma: f32, max_weight: f32, rate: f32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let normal = Normal::new(0.0, sigma).unwrap();
    for w in weights {
        if rng.random_bool(rate.into()) {
            *w = (*w + rng.sample(normal)).clamp(-max_weight, max_weight);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(1234)
    }

    #[test]
    fn random_stays_in_symmetric_range() {
        let mut rng = rng();
        let weights = random(&mut rng, 2.0, 64);
        assert_eq!(weights.len(), 64);
        assert!(weights.iter().all(|w| (-2.0..=2.0).contains(w)));
        // A symmetric sample of this size should hit both signs.
        assert!(weights.iter().any(|w| *w < 0.0));
        assert!(weights.iter().any(|w| *w > 0.0));
    }

    #[test]
    fn blx_alpha_zero_stays_between_parents() {
        let mut rng = rng();
        let p1 = vec![-1.0, 0.0, 2.0];
        let p2 = vec![1.0, 0.5, 3.0];
        for _ in 0..50 {
            let child = blx_alpha(&p1, &p2, 0.0, 8.0, &mut rng);
            for (i, c) in child.iter().enumerate() {
                let lo = f32::min(p1[i], p2[i]);
                let hi = f32::max(p1[i], p2[i]);
                assert!(*c >= lo && *c <= hi);
            }
        }
    }

    #[test]
    fn blx_alpha_clamps_to_max_weight() {
        let mut rng = rng();
        let p1 = vec![-8.0; 8];
        let p2 = vec![8.0; 8];
        for _ in 0..50 {
            let child = blx_alpha(&p1, &p2, 1.0, 8.0, &mut rng);
            assert!(child.iter().all(|w| (-8.0..=8.0).contains(w)));
        }
    }

    #[test]
    fn mutate_with_zero_rate_is_identity() {
        let mut rng = rng();
        let mut weights = vec![0.5, -0.5, 1.0];
        let original = weights.clone();
        mutate(&mut weights, 1.0, 8.0, 0.0, &mut rng);
        assert_eq!(weights, original);
    }

    #[test]
    fn mutate_keeps_weights_in_range() {
        let mut rng = rng();
        let mut weights = vec![7.9; 32];
        for _ in 0..20 {
            mutate(&mut weights, 3.0, 8.0, 1.0, &mut rng);
        }
        assert!(weights.iter().all(|w| (-8.0..=8.0).contains(w)));
    }
}
