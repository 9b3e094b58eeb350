//! # Cross-Section Property Formulas
//!
//! Geometric properties of the rectangular shell-and-core cross-section and
//! the transformed-section combination used to turn a two-material section
//! into one equivalent shell-material section.
//!
//! ## Notation
//!
//! - `b` = Width of section
//! - `h` = Height of section (bending is about the horizontal axis)
//! - `t` = Shell (wall) thickness
//! - `A` = Cross-sectional area
//! - `I` = Second moment of area
//! - `J` = Torsional constant
//! - `n` = Modulus ratio core/shell
//!
//! ```text
//!     ┌───────────────┐
//!     │ ┌───────────┐ │
//!   h │ │   core    │ │ ← shell of thickness t all round
//!     │ └───────────┘ │
//!     └───────────────┘
//!             b
//! ```

// =============================================================================
// RECTANGLE PROPERTIES
// =============================================================================

/// Cross-sectional area of a solid rectangle
///
/// # Formula
/// A = b × h
///
/// # Example
/// ```rust
/// use beam_core::equations::section::rectangular_area;
///
/// let area = rectangular_area(0.02, 0.01);
/// assert!((area - 2.0e-4).abs() < 1e-15);
/// ```
#[inline]
pub fn rectangular_area(b: f64, h: f64) -> f64 {
    b * h
}

/// Second moment of area of a solid rectangle about its horizontal centroidal axis
///
/// # Formula
/// I = bh³/12
///
/// # Example
/// ```rust
/// use beam_core::equations::section::rectangular_moment_of_inertia;
///
/// let i = rectangular_moment_of_inertia(0.02, 0.01);
/// assert!((i - 1.6667e-9).abs() < 1e-12);
/// ```
#[inline]
pub fn rectangular_moment_of_inertia(b: f64, h: f64) -> f64 {
    b * h.powi(3) / 12.0
}

/// Approximate torsional constant of a solid rectangle
///
/// # Formula
/// J = bh³ · (16/3) / (1.8b + h)
///
/// This closed-form approximation is applied to both the outer rectangle and
/// the core cavity; the shell contribution is their difference.
#[inline]
pub fn rectangular_torsion_constant(b: f64, h: f64) -> f64 {
    b * h.powi(3) * (16.0 / 3.0) / (1.8 * b + h)
}

// =============================================================================
// SHELL / CORE SPLIT
// =============================================================================

/// Core cavity dimensions (b − 2t, h − 2t)
#[inline]
pub fn core_dimensions(b: f64, h: f64, t: f64) -> (f64, f64) {
    (b - 2.0 * t, h - 2.0 * t)
}

/// Transformed-section combination of a shell and core property
///
/// The core is converted to an equivalent area of shell material by scaling
/// it with the modulus ratio `n`.
///
/// # Formula
/// P_composite = (P_outer − P_core) + n × P_core
///
/// # Arguments
/// * `outer` - Property of the full outer rectangle
/// * `core` - Property of the core rectangle
/// * `n` - Core/shell modulus ratio
///
/// # Example
/// ```rust
/// use beam_core::equations::section::transformed;
///
/// // Hollow section: core contributes nothing
/// assert_eq!(transformed(10.0, 4.0, 0.0), 6.0);
/// // Solid section: core is the same material
/// assert_eq!(transformed(10.0, 4.0, 1.0), 10.0);
/// ```
#[inline]
pub fn transformed(outer: f64, core: f64, n: f64) -> f64 {
    (outer - core) + n * core
}
