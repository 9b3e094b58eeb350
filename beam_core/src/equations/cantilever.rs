//! # Cantilever Segment Formulas
//!
//! Euler–Bernoulli response of one uniform segment of length `L`, clamped at
//! its proximal end and loaded at its distal end. Each function covers one
//! load type; the section solver adds them together.
//!
//! ## Notation
//!
//! - `L` = Segment length
//! - `M` = End moment, `F` = End transverse force
//! - `T` = Torque, `N` = Axial tension
//! - `E`, `G` = Shell Young's and shear moduli
//! - `I`, `J`, `A` = Composite (transformed) section properties
//! - `θ` = End rotation, `δ` = End displacement, `φ` = Twist
//!
//! ## Sign Conventions
//!
//! - A positive moment and a positive force bend the segment the same way
//! - Stresses are returned for the top fiber; the bottom fiber is the negative
//! - Positive axial force is tension

/// End moment response
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MomentResponse {
    /// θ = ML/(EI)
    pub rotation: f64,
    /// δ = ML²/(2EI)
    pub displacement: f64,
    /// σ = M(h/2)/I at the top fiber
    pub surface_stress: f64,
}

/// End transverse force response
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ForceResponse {
    /// θ = FL²/(2EI)
    pub rotation: f64,
    /// δ = FL³/(3EI)
    pub displacement: f64,
    /// σ = (FL)(h/2)/I at the top fiber of the proximal end
    pub surface_stress: f64,
    /// τ = 1.5F/A at the neutral axis
    pub neutral_shear: f64,
}

/// Torque response
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TorsionResponse {
    /// φ = TL/(GJ)
    pub twist: f64,
    /// τ = T·r/J with r = max(b, h)/2
    pub surface_shear: f64,
}

/// Segment response to an end moment
///
/// ```text
///   ▌━━━━━━━━━━━━━━━━━━━━ ↺ M
///   ▌←──────── L ───────→
/// ```
///
/// # Example
/// ```rust
/// use beam_core::equations::cantilever::moment_response;
///
/// let r = moment_response(10.0, 0.1, 0.01, 2.0e9, 1.0e-9);
/// assert!((r.rotation - 0.5).abs() < 1e-12);
/// assert!((r.displacement - 0.025).abs() < 1e-12);
/// ```
#[inline]
pub fn moment_response(m: f64, l: f64, h: f64, e: f64, i: f64) -> MomentResponse {
    let ei = e * i;
    MomentResponse {
        rotation: m * l / ei,
        displacement: m * l.powi(2) / (2.0 * ei),
        surface_stress: m * (h / 2.0) / i,
    }
}

/// Segment response to an end transverse force
///
/// ```text
///                        ↓ F
///   ▌━━━━━━━━━━━━━━━━━━━━
///   ▌←──────── L ───────→
/// ```
///
/// The surface stress is taken where the force's moment peaks, at the
/// proximal end (M = FL).
#[inline]
pub fn force_response(f: f64, l: f64, h: f64, e: f64, i: f64, a: f64) -> ForceResponse {
    let ei = e * i;
    ForceResponse {
        rotation: f * l.powi(2) / (2.0 * ei),
        displacement: f * l.powi(3) / (3.0 * ei),
        surface_stress: (f * l) * (h / 2.0) / i,
        neutral_shear: 1.5 * f / a,
    }
}

/// Segment response to a torque about the beam axis
#[inline]
pub fn torsion_response(t: f64, l: f64, b: f64, h: f64, g: f64, j: f64) -> TorsionResponse {
    let r = b.max(h) / 2.0;
    TorsionResponse {
        twist: t * l / (g * j),
        surface_shear: t * r / j,
    }
}

/// Uniform axial stress from an end tension
///
/// # Formula
/// σ = N/A
#[inline]
pub fn axial_stress(n: f64, a: f64) -> f64 {
    n / a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_loads_give_zero_response() {
        assert_eq!(moment_response(0.0, 0.1, 0.01, 2.0e9, 1.0e-9), MomentResponse::default());
        assert_eq!(
            force_response(0.0, 0.1, 0.01, 2.0e9, 1.0e-9, 1.0e-4),
            ForceResponse::default()
        );
        assert_eq!(
            torsion_response(0.0, 0.1, 0.02, 0.01, 0.8e9, 1.0e-9),
            TorsionResponse::default()
        );
        assert_eq!(axial_stress(0.0, 1.0e-4), 0.0);
    }

    #[test]
    fn test_force_response_values() {
        // F = 6, L = 1, EI = 1
        let r = force_response(6.0, 1.0, 2.0, 1.0, 1.0, 4.0);
        assert!((r.rotation - 3.0).abs() < 1e-12);
        assert!((r.displacement - 2.0).abs() < 1e-12);
        assert!((r.surface_stress - 6.0).abs() < 1e-12);
        assert!((r.neutral_shear - 2.25).abs() < 1e-12);
    }

    #[test]
    fn test_torsion_uses_larger_dimension() {
        let wide = torsion_response(1.0, 1.0, 4.0, 2.0, 1.0, 1.0);
        let tall = torsion_response(1.0, 1.0, 2.0, 4.0, 1.0, 1.0);
        assert_eq!(wide.surface_shear, 2.0);
        assert_eq!(tall.surface_shear, 2.0);
        assert_eq!(wide.twist, 1.0);
    }

    #[test]
    fn test_responses_are_linear() {
        let one = moment_response(1.0, 0.2, 0.01, 3.5e9, 2.0e-9);
        let three = moment_response(3.0, 0.2, 0.01, 3.5e9, 2.0e-9);
        assert!((three.displacement - 3.0 * one.displacement).abs() < 1e-15);
        assert!((three.surface_stress - 3.0 * one.surface_stress).abs() < 1e-6);
    }
}
