//! # Section Solver
//!
//! Evaluates one [`Section`] under the loads it sees locally: the moment at
//! its distal end plus the end force, torque and tension carried through
//! from the free end of the beam.
//!
//! ## Procedure
//!
//! 1. Per-load response from [`crate::equations::cantilever`]; a zero load
//!    contributes exactly zero.
//! 2. Combined stress at two locations:
//!    - **Surface** (±h/2): normal = ±(σ_M + σ_F) + σ_axial, the larger of the
//!      top and bottom fibers; shear = σ_axial
//!    - **Neutral axis**: normal = σ_axial; shear = |τ_F| + |τ_T|
//! 3. Tresca and Von Mises required yield at both locations; the section's
//!    required yield stress is the largest of the four.
//!
//! The result is an immutable [`SectionResponse`]; nothing is stored on the
//! section itself.

use serde::{Deserialize, Serialize};

use super::section::Section;
use crate::equations::cantilever::{axial_stress, force_response, moment_response, torsion_response};
use crate::equations::failure::{tresca_required_yield, von_mises_required_yield};
use crate::errors::{require_finite, CalcError, CalcResult};

/// Loads acting on one section, at its distal end.
///
/// Every field defaults to zero, so an absent load contributes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionLoads {
    /// Bending moment at the distal end (N·m)
    #[serde(default)]
    pub moment: f64,
    /// Transverse force (N)
    #[serde(default)]
    pub force: f64,
    /// Torque about the beam axis (N·m)
    #[serde(default)]
    pub torque: f64,
    /// Axial tension (N)
    #[serde(default)]
    pub tension: f64,
}

/// Stresses at the two evaluated locations (Pa).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressState {
    /// Bending stress at the top fiber from the end moment
    pub moment_bending: f64,
    /// Bending stress at the top fiber from the end force (at the proximal end)
    pub force_bending: f64,
    /// Uniform axial stress
    pub axial: f64,
    /// Transverse shear at the neutral axis
    pub transverse_shear: f64,
    /// Torsional shear at the outer surface
    pub torsional_shear: f64,

    /// Top fiber: σ_M + σ_F + σ_axial
    pub top_fiber: f64,
    /// Bottom fiber: −σ_M − σ_F + σ_axial
    pub bottom_fiber: f64,
    /// max(top, bottom)
    pub surface_normal: f64,
    /// Shear paired with the surface normal stress
    pub surface_shear: f64,
    /// Normal stress at the neutral axis
    pub neutral_axis_normal: f64,
    /// |τ_F| + |τ_T|
    pub neutral_axis_shear: f64,
}

/// Required yield strength at each location and criterion (Pa).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldCheck {
    pub surface_tresca: f64,
    pub surface_von_mises: f64,
    pub neutral_axis_tresca: f64,
    pub neutral_axis_von_mises: f64,
    /// Largest of the four
    pub required_yield_stress: f64,
}

impl YieldCheck {
    fn from_stresses(stresses: &StressState) -> Self {
        let surface_tresca = tresca_required_yield(stresses.surface_normal, stresses.surface_shear);
        let surface_von_mises =
            von_mises_required_yield(stresses.surface_normal, stresses.surface_shear);
        let neutral_axis_tresca =
            tresca_required_yield(stresses.neutral_axis_normal, stresses.neutral_axis_shear);
        let neutral_axis_von_mises =
            von_mises_required_yield(stresses.neutral_axis_normal, stresses.neutral_axis_shear);

        YieldCheck {
            surface_tresca,
            surface_von_mises,
            neutral_axis_tresca,
            neutral_axis_von_mises,
            required_yield_stress: surface_tresca
                .max(surface_von_mises)
                .max(neutral_axis_tresca)
                .max(neutral_axis_von_mises),
        }
    }

    /// Location and criterion that produced the required yield stress
    pub fn governing(&self) -> &'static str {
        let candidates = [
            (self.surface_tresca, "Surface (Tresca)"),
            (self.surface_von_mises, "Surface (Von Mises)"),
            (self.neutral_axis_tresca, "Neutral axis (Tresca)"),
            (self.neutral_axis_von_mises, "Neutral axis (Von Mises)"),
        ];
        candidates
            .iter()
            .find(|(value, _)| *value >= self.required_yield_stress)
            .map(|(_, name)| *name)
            .unwrap_or("Surface (Tresca)")
    }
}

/// Response of one section to its local loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionResponse {
    /// Loads this response was computed for
    pub loads: SectionLoads,
    /// Rotation of the distal end relative to the proximal end (rad)
    pub rotation: f64,
    /// Transverse displacement of the distal end relative to the proximal end (m)
    pub displacement: f64,
    /// Twist over the section length (rad)
    pub twist: f64,
    pub stresses: StressState,
    pub yield_check: YieldCheck,
    /// Shell tensile strength / required yield stress; `None` when unstressed
    pub safety_factor: Option<f64>,
}

impl SectionResponse {
    /// Required yield stress (Pa)
    pub fn required_yield_stress(&self) -> f64 {
        self.yield_check.required_yield_stress
    }
}

/// Analyze one section.
///
/// `index` is the section's position in its beam and is only used to label
/// errors.
///
/// # Errors
///
/// `NonFiniteResult` naming the section and quantity when a stiffness is
/// not positive or any result is not finite.
///
/// # Example
///
/// ```rust
/// use beam_core::calculations::section::{Section, SectionGeometry};
/// use beam_core::calculations::section_analysis::{analyze_section, SectionLoads};
/// use beam_core::materials::{InfillPattern, MaterialDb, PrintSettings};
///
/// let settings = PrintSettings {
///     material: "PETG".to_string(),
///     infill_pattern: InfillPattern::Grid,
///     infill_density: 15.0,
///     wall_count: 2,
///     line_width: 0.0004,
/// };
/// let section = Section::from_settings(
///     SectionGeometry::new(0.04, 0.015, 0.015),
///     settings,
///     MaterialDb::builtin().unwrap(),
/// ).unwrap();
///
/// let loads = SectionLoads { force: 5.0, ..SectionLoads::default() };
/// let response = analyze_section(0, &section, loads).unwrap();
/// assert!(response.displacement > 0.0);
/// assert_eq!(response.twist, 0.0);
/// ```
pub fn analyze_section(
    index: usize,
    section: &Section,
    loads: SectionLoads,
) -> CalcResult<SectionResponse> {
    let geometry = section.geometry();
    let props = section.properties();
    let (l, b, h) = (geometry.length, geometry.width, geometry.height);
    let (e, g) = (section.e_shell(), section.g_shell());

    for (quantity, value) in [
        ("bending_stiffness", section.bending_stiffness()),
        ("torsional_stiffness", section.torsional_stiffness()),
        ("axial_stiffness", section.axial_stiffness()),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(CalcError::non_finite(index, quantity, value));
        }
    }

    let m = moment_response(loads.moment, l, h, e, props.i_composite);
    let f = force_response(loads.force, l, h, e, props.i_composite, props.a_composite);
    let t = torsion_response(loads.torque, l, b, h, g, props.j_composite);
    let axial = axial_stress(loads.tension, props.a_composite);

    let rotation = require_finite(index, "rotation", m.rotation + f.rotation)?;
    let displacement = require_finite(index, "displacement", m.displacement + f.displacement)?;
    let twist = require_finite(index, "twist", t.twist)?;

    let bending = m.surface_stress + f.surface_stress;
    let top_fiber = bending + axial;
    let bottom_fiber = -bending + axial;

    let stresses = StressState {
        moment_bending: m.surface_stress,
        force_bending: f.surface_stress,
        axial,
        transverse_shear: f.neutral_shear,
        torsional_shear: t.surface_shear,
        top_fiber,
        bottom_fiber,
        surface_normal: top_fiber.max(bottom_fiber),
        surface_shear: axial,
        neutral_axis_normal: axial,
        neutral_axis_shear: f.neutral_shear.abs() + t.surface_shear.abs(),
    };
    for (quantity, value) in [
        ("surface_normal_stress", stresses.surface_normal),
        ("neutral_axis_shear_stress", stresses.neutral_axis_shear),
        ("axial_stress", stresses.axial),
    ] {
        require_finite(index, quantity, value)?;
    }

    let yield_check = YieldCheck::from_stresses(&stresses);
    let required = require_finite(index, "required_yield_stress", yield_check.required_yield_stress)?;
    let safety_factor = if required > 0.0 {
        Some(section.material().tensile_strength_pa / required)
    } else {
        None
    };

    Ok(SectionResponse {
        loads,
        rotation,
        displacement,
        twist,
        stresses,
        yield_check,
        safety_factor,
    })
}
