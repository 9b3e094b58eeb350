//! # Combined-Stress Failure Criteria
//!
//! Converts a plane stress state made of one normal stress `σ` and one shear
//! stress `τ` into the yield strength a material would need to resist it.
//!
//! ## Principal stresses
//!
//! ```text
//! σ1,2 = σ/2 ± √((σ/2)² + τ²)
//! ```
//!
//! ## References
//!
//! - Shigley's Mechanical Engineering Design, 10th Edition, Section 5.4–5.5

/// Principal stresses (σ1, σ2) for a normal stress and a shear stress, σ1 ≥ σ2
///
/// # Example
/// ```rust
/// use beam_core::equations::failure::principal_stresses;
///
/// let (s1, s2) = principal_stresses(0.0, 5.0);
/// assert_eq!((s1, s2), (5.0, -5.0));
/// ```
#[inline]
pub fn principal_stresses(sigma: f64, tau: f64) -> (f64, f64) {
    let center = sigma / 2.0;
    let radius = center.hypot(tau);
    (center + radius, center - radius)
}

/// Required yield strength by the maximum-shear-stress (Tresca) criterion
///
/// # Formula
/// σ_req = max(|σ1 − σ2|, σ1)
///
/// Uniaxial tension or compression gives |σ|; pure shear gives 2|τ|.
#[inline]
pub fn tresca_required_yield(sigma: f64, tau: f64) -> f64 {
    let (s1, s2) = principal_stresses(sigma, tau);
    (s1 - s2).abs().max(s1)
}

/// Required yield strength by the distortion-energy (Von Mises) criterion
///
/// # Formula
/// σ_req = √((σ1² + (σ1 − σ2)² + σ2²) / 2)
///
/// which for this stress state equals √(σ² + 3τ²).
#[inline]
pub fn von_mises_required_yield(sigma: f64, tau: f64) -> f64 {
    let (s1, s2) = principal_stresses(sigma, tau);
    ((s1.powi(2) + (s1 - s2).powi(2) + s2.powi(2)) / 2.0).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1.0)
    }

    #[test]
    fn test_uniaxial_gives_magnitude() {
        assert_eq!(tresca_required_yield(30.0e6, 0.0), 30.0e6);
        assert_eq!(tresca_required_yield(-30.0e6, 0.0), 30.0e6);
        assert!(approx_eq(von_mises_required_yield(30.0e6, 0.0), 30.0e6, 1e-12));
        assert!(approx_eq(von_mises_required_yield(-30.0e6, 0.0), 30.0e6, 1e-12));
    }

    #[test]
    fn test_pure_shear() {
        let tau = 10.0e6;
        assert!(approx_eq(tresca_required_yield(0.0, tau), 2.0 * tau, 1e-12));
        assert!(approx_eq(von_mises_required_yield(0.0, tau), 3.0_f64.sqrt() * tau, 1e-12));
    }

    #[test]
    fn test_combined_closed_forms() {
        let (sigma, tau): (f64, f64) = (40.0e6, 15.0e6);
        let tresca = (sigma * sigma + 4.0 * tau * tau).sqrt();
        let mises = (sigma * sigma + 3.0 * tau * tau).sqrt();
        assert!(approx_eq(tresca_required_yield(sigma, tau), tresca, 1e-12));
        assert!(approx_eq(von_mises_required_yield(sigma, tau), mises, 1e-12));
    }

    #[test]
    fn test_tresca_never_below_von_mises() {
        for &(sigma, tau) in &[(1.0, 0.0), (0.0, 1.0), (-3.0, 2.0), (5.0, -7.0)] {
            assert!(tresca_required_yield(sigma, tau) >= von_mises_required_yield(sigma, tau) - 1e-12);
            assert!(von_mises_required_yield(sigma, tau) >= 0.0);
        }
    }
}
