//! Gaussian sampling via inverse-CDF transform of uniform draws.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Creates a fast deterministic RNG for a given seed.
///
/// Two runs with the same seed draw identical sample sequences on the same
/// platform.
pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Derives an independent RNG stream for a grid cell or scenario index.
///
/// SplitMix64 finalizer over `(seed, stream)` so neighbouring indices do not
/// share low-bit structure.
pub(crate) fn stream_rng(seed: u64, stream: u64) -> SmallRng {
    let mut z = seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    SmallRng::seed_from_u64(z ^ (z >> 31))
}

/// Inverse standard normal CDF (quantile function).
///
/// Given `p` in (0, 1), returns `z` with `Φ(z) = p`. Rational approximation
/// from Abramowitz & Stegun, formula 26.2.23; maximum absolute error below
/// 4.5e-4, which is well inside Monte Carlo noise at the sample counts used
/// here.
///
/// Returns negative/positive infinity at `p == 0` / `p == 1` and NaN outside
/// [0, 1].
pub fn inverse_normal_cdf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    // Symmetry: compute on the lower tail and flip the sign.
    let (q, sign) = if p > 0.5 { (1.0 - p, 1.0) } else { (p, -1.0) };

    let t = (-2.0 * q.ln()).sqrt();

    const C0: f64 = 2.515517;
    const C1: f64 = 0.802853;
    const C2: f64 = 0.010328;
    const D1: f64 = 1.432788;
    const D2: f64 = 0.189269;
    const D3: f64 = 0.001308;

    let z = t - (C0 + C1 * t + C2 * t * t) / (1.0 + D1 * t + D2 * t * t + D3 * t * t * t);
    sign * z
}

/// One Gaussian draw: `mean + std * Φ⁻¹(u)` for `u ~ U(0, 1)` from the RNG.
#[inline]
pub fn draw_normal<R: Rng>(rng: &mut R, mean: f64, std: f64) -> f64 {
    mean + std * inverse_normal_cdf(rng.random::<f64>())
}
