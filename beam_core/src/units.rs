//! # Unit Types
//!
//! Type-safe wrappers for the units that cross the engine boundary. The
//! engine itself works in plain SI `f64` values (meters, newtons,
//! newton-meters, pascals, radians); these newtypes are used where values
//! enter or leave it in other units.
//!
//! ## Design Philosophy
//!
//! Simple newtype wrappers rather than a full units library:
//! - JSON serialization stays clean (just numbers)
//! - Minimal runtime overhead
//! - Conversions are explicit `From` impls
//!
//! ## Where they are used
//!
//! - Material tables list moduli in GPa and strengths in MPa
//! - Slicer line widths are entered in millimeters
//! - Rotations are reported in degrees alongside radians
//!
//! ## Example
//!
//! ```rust
//! use beam_core::units::{Gigapascals, Meters, Millimeters, Pascals};
//!
//! let line_width: Meters = Millimeters(0.4).into();
//! assert!((line_width.0 - 0.0004).abs() < 1e-12);
//!
//! let e: Pascals = Gigapascals(3.5).into();
//! assert_eq!(e.0, 3.5e9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl Add for Meters {
    type Output = Meters;

    fn add(self, rhs: Meters) -> Meters {
        Meters(self.0 + rhs.0)
    }
}

impl Mul<f64> for Meters {
    type Output = Meters;

    fn mul(self, rhs: f64) -> Meters {
        Meters(self.0 * rhs)
    }
}

// ============================================================================
// Stress / Modulus Units
// ============================================================================

/// Stress in pascals (N/m²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

/// Stress in megapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

/// Modulus in gigapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gigapascals(pub f64);

impl From<Megapascals> for Pascals {
    fn from(mpa: Megapascals) -> Self {
        Pascals(mpa.0 * 1.0e6)
    }
}

impl From<Pascals> for Megapascals {
    fn from(pa: Pascals) -> Self {
        Megapascals(pa.0 / 1.0e6)
    }
}

impl From<Gigapascals> for Pascals {
    fn from(gpa: Gigapascals) -> Self {
        Pascals(gpa.0 * 1.0e9)
    }
}

impl From<Pascals> for Gigapascals {
    fn from(pa: Pascals) -> Self {
        Gigapascals(pa.0 / 1.0e9)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

// ============================================================================
// Display
// ============================================================================

impl std::fmt::Display for Meters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4e} m", self.0)
    }
}

impl std::fmt::Display for Megapascals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} MPa", self.0)
    }
}

impl std::fmt::Display for Degrees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}°", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversions() {
        let m: Meters = Millimeters(400.0).into();
        assert!((m.0 - 0.4).abs() < 1e-12);

        let mm: Millimeters = Meters(0.025).into();
        assert!((mm.0 - 25.0).abs() < 1e-9);

        let total = Meters(0.1) + Meters(0.05) * 2.0;
        assert!((total.0 - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_stress_conversions() {
        let pa: Pascals = Megapascals(50.0).into();
        assert_eq!(pa.0, 50.0e6);

        let gpa: Gigapascals = Pascals(2.1e9).into();
        assert!((gpa.0 - 2.1).abs() < 1e-12);
    }

    #[test]
    fn test_angle_conversions() {
        let deg: Degrees = Radians(std::f64::consts::PI).into();
        assert!((deg.0 - 180.0).abs() < 1e-9);

        let rad: Radians = Degrees(90.0).into();
        assert!((rad.0 - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_serialization_is_transparent() {
        let json = serde_json::to_string(&Megapascals(48.5)).unwrap();
        assert_eq!(json, "48.5");
    }

    #[test]
    fn test_display() {
        assert_eq!(Megapascals(12.3456).to_string(), "12.346 MPa");
        assert_eq!(Degrees(1.5).to_string(), "1.5000°");
    }
}
