//! Gauss-Hermite nodes and weights.

use crate::types::QuadratureError;

/// pi^(-1/4), the leading coefficient of the orthonormal Hermite recursion.
const PI_M4: f64 = 0.751_125_544_464_942_5;

const NEWTON_TOLERANCE: f64 = 1e-14;
const NEWTON_MAX_ITERATIONS: usize = 100;

/// Relative accuracy required of the weight sum against `sqrt(pi)`.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-10;

/// Largest supported rule.
///
/// Beyond roughly 200 nodes the asymptotic root guesses stop separating
/// the roots and Newton collapses several of them onto one another.
pub const MAX_GAUSS_HERMITE_NODES: usize = 180;

/// Orthonormal Hermite polynomial `h_n(z)` and `h_{n-1}(z)`.
#[inline]
fn orthonormal_hermite(n: usize, z: f64) -> (f64, f64) {
    let mut p1 = PI_M4;
    let mut p2 = 0.0;
    for j in 0..n {
        let p3 = p2;
        p2 = p1;
        let jf = j as f64;
        p1 = z * (2.0 / (jf + 1.0)).sqrt() * p2 - (jf / (jf + 1.0)).sqrt() * p3;
    }
    (p1, p2)
}

/// Compute the `n`-point Gauss-Hermite rule for `int f(x) exp(-x^2) dx`.
///
/// Roots of the Hermite polynomial are located by Newton iteration on the
/// orthonormal three-term recursion, starting from asymptotic guesses
/// (Press et al., *Numerical Recipes*, 3rd ed., section 4.6).
///
/// # Returns
///
/// `(nodes, weights)` with nodes in ascending order. The weights sum to
/// `sqrt(pi)`.
///
/// # Errors
///
/// * `QuadratureError::InvalidNodeCount` - `n == 0` or `n > MAX_GAUSS_HERMITE_NODES`
/// * `QuadratureError::RootNotConverged` - Newton refinement failed
/// * `QuadratureError::InaccurateRule` - repeated nodes, or weights that do
///   not sum to `sqrt(pi)`
///
/// # Example
///
/// ```
/// use lucas_core::math::quadrature::gauss_hermite_nodes_weights;
///
/// let (x, w) = gauss_hermite_nodes_weights(2).unwrap();
/// assert!((x[1] - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-14);
/// assert!((w.iter().sum::<f64>() - std::f64::consts::PI.sqrt()).abs() < 1e-14);
/// ```
pub fn gauss_hermite_nodes_weights(n: usize) -> Result<(Vec<f64>, Vec<f64>), QuadratureError> {
    if n == 0 || n > MAX_GAUSS_HERMITE_NODES {
        return Err(QuadratureError::InvalidNodeCount { n });
    }

    // Filled largest root first, mirrored into the upper half.
    let mut x = vec![0.0_f64; n];
    let mut w = vec![0.0_f64; n];
    let nf = n as f64;
    let m = n.div_ceil(2);
    let mut z = 0.0_f64;

    for i in 0..m {
        z = match i {
            0 => (2.0 * nf + 1.0).sqrt() - 1.855_75 * (2.0 * nf + 1.0).powf(-0.166_67),
            1 => z - 1.14 * nf.powf(0.426) / z,
            2 => 1.86 * z - 0.86 * x[0],
            3 => 1.91 * z - 0.91 * x[1],
            _ => 2.0 * z - x[i - 2],
        };

        let mut converged = false;
        let mut pp = 0.0;
        for _ in 0..NEWTON_MAX_ITERATIONS {
            let (p1, p2) = orthonormal_hermite(n, z);
            pp = (2.0 * nf).sqrt() * p2;
            let z1 = z;
            z = z1 - p1 / pp;
            if (z - z1).abs() <= NEWTON_TOLERANCE {
                converged = true;
                break;
            }
        }

        if !converged || !z.is_finite() {
            return Err(QuadratureError::RootNotConverged { n, index: i });
        }

        x[i] = z;
        x[n - 1 - i] = -z;
        w[i] = 2.0 / (pp * pp);
        w[n - 1 - i] = w[i];
    }

    // Odd rules carry an exact zero in the middle.
    if n % 2 == 1 {
        x[n / 2] = 0.0;
    }

    x.reverse();
    w.reverse();

    let weight_sum: f64 = w.iter().sum();
    let sqrt_pi = std::f64::consts::PI.sqrt();
    if !x.windows(2).all(|p| p[0] < p[1])
        || !weight_sum.is_finite()
        || (weight_sum - sqrt_pi).abs() > WEIGHT_SUM_TOLERANCE * sqrt_pi
    {
        return Err(QuadratureError::InaccurateRule { n });
    }
    Ok((x, w))
}
