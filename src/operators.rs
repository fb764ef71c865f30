//! Real-coded variation operators.
//!
//! - [`binomial_crossover`]: DE-style uniform crossover with a forced index
//! - [`sbx_crossover`]: bounded simulated binary crossover
//! - [`polynomial_mutation`]: bounded polynomial mutation
//!
//! Every operator leaves its output inside the bounds.
//!
//! # References
//!
//! - Storn & Price (1997), "Differential Evolution"
//! - Deb & Agrawal (1995), "Simulated Binary Crossover for Continuous Search Space"
//! - Deb & Goyal (1996), "A Combined Genetic Adaptive Search (GeneAS)"

use crate::core::Bounds;
use rand::Rng;

/// Takes each coordinate from `mutant` with probability `cr`, and always at
/// one random index, otherwise keeps `target`.
pub fn binomial_crossover<R: Rng + ?Sized>(
    target: &[f64],
    mutant: &[f64],
    cr: f64,
    rng: &mut R,
) -> Vec<f64> {
    let n = target.len();
    let jrand = rng.random_range(0..n);
    let mut trial = target.to_vec();
    for j in 0..n {
        if j == jrand || rng.random::<f64>() < cr {
            trial[j] = mutant[j];
        }
    }
    trial
}

/// Bounded SBX on two parents, returning two children.
///
/// With probability `1 - p_cr` the parents are returned unchanged; otherwise
/// each coordinate is recombined with probability 0.5. `eta` is the
/// distribution index (larger keeps children closer to the parents).
pub fn sbx_crossover<R: Rng + ?Sized>(
    p1: &[f64],
    p2: &[f64],
    eta: f64,
    p_cr: f64,
    bounds: &Bounds,
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>) {
    let mut c1 = p1.to_vec();
    let mut c2 = p2.to_vec();
    if rng.random::<f64>() > p_cr {
        return (c1, c2);
    }

    let exponent = 1.0 / (eta + 1.0);
    for j in 0..p1.len() {
        if rng.random::<f64>() > 0.5 || (p1[j] - p2[j]).abs() <= 1e-14 {
            continue;
        }
        let (lo, hi) = (bounds.lower()[j], bounds.upper()[j]);
        let (y1, y2) = if p1[j] < p2[j] { (p1[j], p2[j]) } else { (p2[j], p1[j]) };
        let span = y2 - y1;
        let u: f64 = rng.random();

        let betaq = |beta: f64| {
            let alpha = 2.0 - beta.powf(-(eta + 1.0));
            if u <= 1.0 / alpha {
                (u * alpha).powf(exponent)
            } else {
                (1.0 / (2.0 - u * alpha)).powf(exponent)
            }
        };

        let low = 0.5 * ((y1 + y2) - betaq(1.0 + 2.0 * (y1 - lo) / span) * span);
        let high = 0.5 * ((y1 + y2) + betaq(1.0 + 2.0 * (hi - y2) / span) * span);
        let low = low.clamp(lo, hi);
        let high = high.clamp(lo, hi);

        if rng.random::<f64>() < 0.5 {
            c1[j] = high;
            c2[j] = low;
        } else {
            c1[j] = low;
            c2[j] = high;
        }
    }
    bounds.clamp(&mut c1);
    bounds.clamp(&mut c2);
    (c1, c2)
}

/// Bounded polynomial mutation, applied per coordinate with probability `p_m`.
pub fn polynomial_mutation<R: Rng + ?Sized>(
    x: &mut [f64],
    eta: f64,
    p_m: f64,
    bounds: &Bounds,
    rng: &mut R,
) {
    let exponent = 1.0 / (eta + 1.0);
    for (j, v) in x.iter_mut().enumerate() {
        if rng.random::<f64>() >= p_m {
            continue;
        }
        let (lo, hi) = (bounds.lower()[j], bounds.upper()[j]);
        let width = hi - lo;
        if width <= 0.0 {
            continue;
        }
        let y = v.clamp(lo, hi);
        let u: f64 = rng.random();
        let deltaq = if u < 0.5 {
            let xy = 1.0 - (y - lo) / width;
            let val = 2.0 * u + (1.0 - 2.0 * u) * xy.powf(eta + 1.0);
            val.powf(exponent) - 1.0
        } else {
            let xy = 1.0 - (hi - y) / width;
            let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * xy.powf(eta + 1.0);
            1.0 - val.powf(exponent)
        };
        *v = (y + deltaq * width).clamp(lo, hi);
    }
}
