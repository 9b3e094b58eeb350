//! # Composite Cantilever Beam
//!
//! A beam is an ordered list of [`Section`]s. Index 0 is clamped to the
//! support; the last section carries the free end where the loads act.
//!
//! ## Load Propagation
//!
//! ```text
//!   clamp                                   free end
//!     ▌━━━━━━━━━━┳━━━━━━━━━━┳━━━━━━━━━━━━┓  ← M, F, T, TF
//!     ▌   [0]    ┃   [1]    ┃   [N-1]    ┃
//!     ▌←─ L0 ───→←─ L1 ───→←─ LN-1 ────→
//! ```
//!
//! Sections are solved from the free end toward the clamp. Each section sees
//! the end moment plus `F × (total length of the more distal sections)`;
//! force, torque and tension pass through unchanged.
//!
//! ## Aggregation
//!
//! With `d_i` the distance from section `i`'s distal end to the free end:
//!
//! - Tip displacement: `Σ(δ_i + θ_i·d_i)`
//! - Tip rotation: `Σθ_i`
//! - Tip twist: `Σφ_i`
//! - Maximum stress: the largest required yield stress over all sections
//!
//! ## Example
//!
//! ```rust
//! use beam_core::calculations::beam::{analyze, Beam, EndLoads};
//! use beam_core::calculations::section::SectionGeometry;
//! use beam_core::materials::{MaterialDb, PrintOverrides};
//!
//! let db = MaterialDb::builtin().unwrap();
//! let defaults = PrintOverrides {
//!     material: Some("PLA".to_string()),
//!     infill_density: Some(20.0),
//!     wall_count: Some(3),
//!     line_width: Some(0.0004),
//!     ..PrintOverrides::default()
//! };
//!
//! let mut beam = Beam::new(defaults);
//! for _ in 0..3 {
//!     beam.add_section_from(SectionGeometry::new(0.05, 0.02, 0.01), &PrintOverrides::default(), db)
//!         .unwrap();
//! }
//!
//! let result = analyze(&beam, &EndLoads::new(0.0, 2.0, 0.0, 0.0)).unwrap();
//! assert_eq!(result.sections.len(), 3);
//! assert_eq!(result.max_stress_section, 0);
//! ```

use serde::{Deserialize, Serialize};

use super::section::{Section, SectionGeometry};
use super::section_analysis::{analyze_section, SectionLoads, SectionResponse};
use crate::errors::{require_finite, CalcError, CalcResult};
use crate::materials::{MaterialProvider, PrintOverrides};

/// Loads applied at the free end of the beam.
///
/// Unspecified loads are zero.
///
/// ## JSON Example
///
/// ```json
/// { "moment": 0.0, "force": 5.0, "torque": 0.1 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EndLoads {
    /// Bending moment M (N·m)
    #[serde(default)]
    pub moment: f64,
    /// Transverse force F (N)
    #[serde(default)]
    pub force: f64,
    /// Torque T about the beam axis (N·m)
    #[serde(default)]
    pub torque: f64,
    /// Axial tension TF (N)
    #[serde(default)]
    pub tension: f64,
}

impl EndLoads {
    pub fn new(moment: f64, force: f64, torque: f64, tension: f64) -> Self {
        EndLoads {
            moment,
            force,
            torque,
            tension,
        }
    }

    /// Reject non-finite loads.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("moment", self.moment),
            ("force", self.force),
            ("torque", self.torque),
            ("tension", self.tension),
        ] {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Load must be a finite number",
                ));
            }
        }
        Ok(())
    }

    /// True when every load is zero
    pub fn is_zero(&self) -> bool {
        self == &EndLoads::default()
    }
}

/// Position of a section relative to the beam ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndRole {
    /// Attached to the support
    Clamped,
    /// Between two other sections
    Interior,
    /// Carries the applied loads
    Free,
    /// The only section of the beam
    ClampedAndFree,
}

impl EndRole {
    pub fn label(&self) -> &'static str {
        match self {
            EndRole::Clamped => "clamped",
            EndRole::Interior => "",
            EndRole::Free => "free",
            EndRole::ClampedAndFree => "clamped/free",
        }
    }
}

/// A cantilever built from composite sections.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Beam {
    defaults: PrintOverrides,
    sections: Vec<Section>,
}

impl Beam {
    /// Create an empty beam with global print defaults.
    pub fn new(defaults: PrintOverrides) -> Self {
        Beam {
            defaults,
            sections: Vec::new(),
        }
    }

    /// Append a section at the free end and return its index.
    pub fn add_section(&mut self, section: Section) -> usize {
        self.sections.push(section);
        self.sections.len() - 1
    }

    /// Resolve `overrides` against the beam defaults, look up the material,
    /// and append the resulting section at the free end.
    ///
    /// # Errors
    ///
    /// Configuration errors from resolution, lookup or section validation,
    /// tagged with the index the section would have taken.
    pub fn add_section_from<P: MaterialProvider>(
        &mut self,
        geometry: SectionGeometry,
        overrides: &PrintOverrides,
        provider: P,
    ) -> CalcResult<usize> {
        let index = self.sections.len();
        let section = overrides
            .resolve(&self.defaults)
            .and_then(|settings| Section::from_settings(geometry, settings, provider))
            .map_err(|e| e.in_section(index))?;
        Ok(self.add_section(section))
    }

    pub fn defaults(&self) -> &PrintOverrides {
        &self.defaults
    }

    /// Sections ordered from the clamp to the free end
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sum of section lengths (m)
    pub fn total_length(&self) -> f64 {
        self.sections.iter().map(Section::length).sum()
    }

    /// Role of the section at `index`, or `None` past the end.
    pub fn end_role(&self, index: usize) -> Option<EndRole> {
        let last = self.sections.len().checked_sub(1)?;
        let role = match (index == 0, index == last) {
            _ if index > last => return None,
            (true, true) => EndRole::ClampedAndFree,
            (true, false) => EndRole::Clamped,
            (false, true) => EndRole::Free,
            (false, false) => EndRole::Interior,
        };
        Some(role)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.sections.is_empty() {
            return Err(CalcError::EmptyBeam);
        }
        Ok(())
    }
}

/// Result for one section of the beam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionResult {
    pub index: usize,
    pub role: EndRole,
    /// Distance from this section's distal end to the free end (m)
    pub distance_to_tip: f64,
    #[serde(flatten)]
    pub response: SectionResponse,
}

/// Beam analysis results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamResult {
    /// Applied end loads
    pub loads: EndLoads,

    /// Transverse displacement of the free end (m)
    pub displacement: f64,
    /// Rotation of the free end (rad)
    pub rotation: f64,
    /// Twist of the free end (rad)
    pub twist: f64,

    /// Largest required yield stress over all sections (Pa)
    pub max_stress: f64,
    /// Section where `max_stress` occurs; the lowest index wins ties
    pub max_stress_section: usize,

    /// Smallest tensile strength / required yield ratio; `None` when no
    /// section is stressed
    pub min_safety_factor: Option<f64>,
    /// Section with the smallest safety factor
    pub critical_section: Option<usize>,

    /// Per-section results ordered from the clamp to the free end
    pub sections: Vec<SectionResult>,
}

impl BeamResult {
    /// True when every section's tensile strength covers its required
    /// yield stress.
    pub fn passes(&self) -> bool {
        self.min_safety_factor.map_or(true, |sf| sf >= 1.0)
    }

    /// Section that governs the design: the critical section when one is
    /// stressed, otherwise the maximum-stress section.
    pub fn governing_section(&self) -> Option<&SectionResult> {
        let index = self.critical_section.unwrap_or(self.max_stress_section);
        self.sections.get(index)
    }

    /// Location and criterion governing the governing section
    pub fn governing_condition(&self) -> &'static str {
        match self.governing_section() {
            Some(section) if self.critical_section.is_some() => {
                section.response.yield_check.governing()
            }
            _ => "Unloaded",
        }
    }
}

/// Local loads for every section, ordered from the clamp to the free end.
///
/// Section `i` sees `M + F × (length of sections i+1..N)`.
pub fn section_loads(beam: &Beam, loads: &EndLoads) -> Vec<SectionLoads> {
    let mut moment = loads.moment;
    let mut local: Vec<SectionLoads> = beam
        .sections()
        .iter()
        .rev()
        .map(|section| {
            let at_section = SectionLoads {
                moment,
                force: loads.force,
                torque: loads.torque,
                tension: loads.tension,
            };
            moment += loads.force * section.length();
            at_section
        })
        .collect();
    local.reverse();
    local
}

/// Analyze a beam under end loads.
///
/// # Errors
///
/// - `EmptyBeam` when the beam has no sections
/// - `InvalidInput` when a load is not finite
/// - `NonFiniteResult` naming the section and quantity when any derived
///   value is not finite
///
/// No partial result is returned.
pub fn analyze(beam: &Beam, loads: &EndLoads) -> CalcResult<BeamResult> {
    beam.validate()?;
    loads.validate()?;

    let n = beam.section_count();
    let local = section_loads(beam, loads);

    let mut displacement = 0.0;
    let mut rotation = 0.0;
    let mut twist = 0.0;
    let mut distance = 0.0;
    let mut results = Vec::with_capacity(n);

    for (index, (section, at_section)) in beam.sections().iter().zip(local).enumerate().rev() {
        let response = analyze_section(index, section, at_section)?;

        displacement += response.displacement + response.rotation * distance;
        rotation += response.rotation;
        twist += response.twist;
        require_finite(index, "tip_displacement", displacement)?;
        require_finite(index, "tip_rotation", rotation)?;
        require_finite(index, "tip_twist", twist)?;

        results.push(SectionResult {
            index,
            role: beam.end_role(index).unwrap_or(EndRole::Interior),
            distance_to_tip: distance,
            response,
        });
        distance += section.length();
    }
    results.reverse();

    let mut max_stress = 0.0;
    let mut max_stress_section = 0;
    let mut min_safety_factor: Option<f64> = None;
    let mut critical_section = None;
    for result in &results {
        let required = result.response.required_yield_stress();
        if required > max_stress {
            max_stress = required;
            max_stress_section = result.index;
        }
        if let Some(sf) = result.response.safety_factor {
            if min_safety_factor.map_or(true, |current| sf < current) {
                min_safety_factor = Some(sf);
                critical_section = Some(result.index);
            }
        }
    }

    Ok(BeamResult {
        loads: *loads,
        displacement,
        rotation,
        twist,
        max_stress,
        max_stress_section,
        min_safety_factor,
        critical_section,
        sections: results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::section::tests::{pla, section, settings};
    use crate::materials::{MaterialDb, MaterialProperties};

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(f64::MIN_POSITIVE)
    }

    fn weak() -> MaterialProperties {
        MaterialProperties::new("Weak", 1.0e9, 0.4e9, 5.0e6).unwrap()
    }

    fn uniform_beam(count: usize, length: f64) -> Beam {
        let mut beam = Beam::default();
        for _ in 0..count {
            beam.add_section(section(length, 20.0));
        }
        beam
    }

    #[test]
    fn test_two_sections_match_single_cantilever() {
        let l = 0.05;
        let f = 4.0;
        let beam = uniform_beam(2, l);
        let result = analyze(&beam, &EndLoads::new(0.0, f, 0.0, 0.0)).unwrap();

        let ei = beam.sections()[0].bending_stiffness();
        let expected_delta = f * (2.0 * l).powi(3) / (3.0 * ei);
        let expected_theta = f * (2.0 * l).powi(2) / (2.0 * ei);
        assert!(approx_eq(result.displacement, expected_delta, 1e-12));
        assert!(approx_eq(result.rotation, expected_theta, 1e-12));
        assert_eq!(result.twist, 0.0);
    }

    #[test]
    fn test_moment_grows_toward_clamp() {
        let beam = uniform_beam(3, 0.04);
        let loads = section_loads(&beam, &EndLoads::new(0.5, 10.0, 0.2, 30.0));

        assert!(approx_eq(loads[2].moment, 0.5, 1e-12));
        assert!(approx_eq(loads[1].moment, 0.9, 1e-12));
        assert!(approx_eq(loads[0].moment, 1.3, 1e-12));
        for l in &loads {
            assert_eq!(l.force, 10.0);
            assert_eq!(l.torque, 0.2);
            assert_eq!(l.tension, 30.0);
        }
    }

    #[test]
    fn test_pure_moment_over_uniform_beam() {
        let beam = uniform_beam(4, 0.025);
        let m = 0.3;
        let result = analyze(&beam, &EndLoads::new(m, 0.0, 0.0, 0.0)).unwrap();

        let ei = beam.sections()[0].bending_stiffness();
        assert!(approx_eq(result.displacement, m * 0.1_f64.powi(2) / (2.0 * ei), 1e-12));
        assert!(approx_eq(result.rotation, m * 0.1 / ei, 1e-12));
    }

    #[test]
    fn test_twist_is_sum_over_sections() {
        let beam = uniform_beam(3, 0.05);
        let result = analyze(&beam, &EndLoads::new(0.0, 0.0, 0.15, 0.0)).unwrap();
        let gj = beam.sections()[0].torsional_stiffness();
        assert!(approx_eq(result.twist, 0.15 * 0.15 / gj, 1e-12));
        assert_eq!(result.displacement, 0.0);
    }

    #[test]
    fn test_weak_midpoint_governs() {
        let geometry = SectionGeometry::new(0.03, 0.02, 0.01);
        let narrow = SectionGeometry::new(0.03, 0.02, 0.006);
        let mut beam = Beam::default();
        beam.add_section(Section::new(geometry, settings(100.0, 3), pla()).unwrap());
        beam.add_section(Section::new(narrow, settings(100.0, 3), weak()).unwrap());
        beam.add_section(Section::new(geometry, settings(100.0, 3), pla()).unwrap());

        let result = analyze(&beam, &EndLoads::new(0.2, 3.0, 0.0, 0.0)).unwrap();
        assert_eq!(result.max_stress_section, 1);
        assert_eq!(result.critical_section, Some(1));
        assert_eq!(result.max_stress, result.sections[1].response.required_yield_stress());
        assert!(result
            .sections
            .iter()
            .all(|s| s.response.required_yield_stress() <= result.max_stress));
    }

    #[test]
    fn test_critical_section_follows_strength() {
        // Identical geometry under pure moment: equal stress everywhere
        let geometry = SectionGeometry::new(0.03, 0.02, 0.01);
        let mut beam = Beam::default();
        beam.add_section(Section::new(geometry, settings(20.0, 3), pla()).unwrap());
        beam.add_section(Section::new(geometry, settings(20.0, 3), weak()).unwrap());
        beam.add_section(Section::new(geometry, settings(20.0, 3), pla()).unwrap());

        let result = analyze(&beam, &EndLoads::new(0.4, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(result.max_stress_section, 0);
        assert_eq!(result.critical_section, Some(1));
        assert_eq!(result.governing_section().map(|s| s.index), Some(1));
    }

    #[test]
    fn test_weak_section_critical_below_peak_stress() {
        // Deeper weak section carries less stress than its neighbours
        let geometry = SectionGeometry::new(0.03, 0.02, 0.01);
        let deep = SectionGeometry::new(0.03, 0.02, 0.012);
        let mut beam = Beam::default();
        beam.add_section(Section::new(geometry, settings(20.0, 3), pla()).unwrap());
        beam.add_section(Section::new(deep, settings(20.0, 3), weak()).unwrap());
        beam.add_section(Section::new(geometry, settings(20.0, 3), pla()).unwrap());

        let result = analyze(&beam, &EndLoads::new(0.4, 0.0, 0.0, 0.0)).unwrap();
        let required: Vec<f64> = result
            .sections
            .iter()
            .map(|s| s.response.required_yield_stress())
            .collect();
        assert!(required[1] < required[0]);
        assert!(required[1] < required[2]);

        assert_eq!(result.max_stress_section, 0);
        assert_eq!(result.critical_section, Some(1));
        assert_eq!(result.governing_section().map(|s| s.index), Some(1));
        assert!(result.sections[1].response.safety_factor < result.sections[0].response.safety_factor);
    }

    #[test]
    fn test_passes_and_fails() {
        let beam = uniform_beam(2, 0.05);
        let light = analyze(&beam, &EndLoads::new(0.0, 1.0, 0.0, 0.0)).unwrap();
        assert!(light.passes());

        let heavy = analyze(&beam, &EndLoads::new(0.0, 5000.0, 0.0, 0.0)).unwrap();
        assert!(!heavy.passes());
        assert!(heavy.min_safety_factor.unwrap() < 1.0);
    }

    #[test]
    fn test_unloaded_beam() {
        let beam = uniform_beam(2, 0.05);
        let result = analyze(&beam, &EndLoads::default()).unwrap();
        assert!(result.loads.is_zero());
        assert_eq!(result.displacement, 0.0);
        assert_eq!(result.max_stress, 0.0);
        assert_eq!(result.max_stress_section, 0);
        assert_eq!(result.critical_section, None);
        assert!(result.passes());
        assert_eq!(result.governing_condition(), "Unloaded");
    }

    #[test]
    fn test_empty_beam_is_rejected() {
        let err = analyze(&Beam::default(), &EndLoads::new(1.0, 0.0, 0.0, 0.0)).unwrap_err();
        assert_eq!(err, CalcError::EmptyBeam);
    }

    #[test]
    fn test_non_finite_load_is_rejected() {
        let beam = uniform_beam(1, 0.05);
        let err = analyze(&beam, &EndLoads::new(f64::NAN, 0.0, 0.0, 0.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_end_roles() {
        let single = uniform_beam(1, 0.05);
        assert_eq!(single.end_role(0), Some(EndRole::ClampedAndFree));
        assert_eq!(single.end_role(1), None);

        let beam = uniform_beam(3, 0.05);
        assert_eq!(beam.end_role(0), Some(EndRole::Clamped));
        assert_eq!(beam.end_role(1), Some(EndRole::Interior));
        assert_eq!(beam.end_role(2), Some(EndRole::Free));
        assert_eq!(Beam::default().end_role(0), None);
    }

    #[test]
    fn test_distance_to_tip() {
        let beam = uniform_beam(3, 0.05);
        let result = analyze(&beam, &EndLoads::new(0.0, 1.0, 0.0, 0.0)).unwrap();
        assert_eq!(result.sections[2].distance_to_tip, 0.0);
        assert!(approx_eq(result.sections[1].distance_to_tip, 0.05, 1e-12));
        assert!(approx_eq(result.sections[0].distance_to_tip, 0.10, 1e-12));
        assert!(approx_eq(beam.total_length(), 0.15, 1e-12));
    }

    #[test]
    fn test_add_section_from_defaults_and_overrides() {
        let db = MaterialDb::builtin().unwrap();
        let defaults = PrintOverrides {
            material: Some("PLA".to_string()),
            infill_density: Some(20.0),
            wall_count: Some(3),
            line_width: Some(0.0004),
            ..PrintOverrides::default()
        };
        let mut beam = Beam::new(defaults);
        let geometry = SectionGeometry::new(0.05, 0.02, 0.01);

        assert_eq!(beam.add_section_from(geometry, &PrintOverrides::default(), db).unwrap(), 0);
        let petg = PrintOverrides {
            material: Some("petg".to_string()),
            ..PrintOverrides::default()
        };
        assert_eq!(beam.add_section_from(geometry, &petg, db).unwrap(), 1);
        assert_eq!(beam.sections()[1].material().name, "PETG");
        assert_eq!(beam.sections()[1].settings().wall_count, 3);

        let too_many_walls = PrintOverrides {
            wall_count: Some(20),
            ..PrintOverrides::default()
        };
        let err = beam.add_section_from(geometry, &too_many_walls, db).unwrap_err();
        match err {
            CalcError::InvalidSection { section, field, .. } => {
                assert_eq!(section, 2);
                assert_eq!(field, "shell_thickness");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(beam.section_count(), 2);
    }

    #[test]
    fn test_missing_default_names_section() {
        let db = MaterialDb::builtin().unwrap();
        let mut beam = Beam::new(PrintOverrides::default());
        let err = beam
            .add_section_from(SectionGeometry::new(0.05, 0.02, 0.01), &PrintOverrides::default(), db)
            .unwrap_err();
        assert_eq!(err, CalcError::missing_field("material", Some(0)));
    }

    #[test]
    fn test_result_serialization() {
        let beam = uniform_beam(2, 0.05);
        let result = analyze(&beam, &EndLoads::new(0.1, 2.0, 0.05, 10.0)).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"max_stress_section\""));
        assert!(json.contains("\"role\":\"Clamped\""));
        let roundtrip: BeamResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.sections.len(), 2);
        assert_eq!(roundtrip.max_stress_section, result.max_stress_section);
    }
}
