//! # Composite Section
//!
//! One uniform segment of the beam: a rectangular shell of printed
//! perimeter walls around an infill core. The two materials are combined
//! into one equivalent section by the transformed-section method, with the
//! core scaled by the modulus ratio `n`.
//!
//! A [`Section`] is immutable. Its composite properties are computed once,
//! at construction, from its geometry and material; building a section with
//! different inputs means building a new one.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::calculations::section::{Section, SectionGeometry};
//! use beam_core::materials::{InfillPattern, MaterialDb, PrintSettings};
//!
//! let db = MaterialDb::builtin().unwrap();
//! let settings = PrintSettings {
//!     material: "PLA".to_string(),
//!     infill_pattern: InfillPattern::Gyroid,
//!     infill_density: 20.0,
//!     wall_count: 3,
//!     line_width: 0.0004,
//! };
//! let geometry = SectionGeometry::new(0.05, 0.02, 0.01);
//! let section = Section::from_settings(geometry, settings, db).unwrap();
//!
//! let props = section.properties();
//! assert!(props.i_composite > props.i_shell);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::section::{
    core_dimensions, rectangular_area, rectangular_moment_of_inertia,
    rectangular_torsion_constant, transformed,
};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::materials::{MaterialProperties, MaterialProvider, PrintSettings};

/// Outer dimensions of a section (meters).
///
/// ## JSON Example
///
/// ```json
/// { "length": 0.05, "width": 0.02, "height": 0.01 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    /// Segment length along the beam axis
    pub length: f64,
    /// Cross-section width b
    pub width: f64,
    /// Cross-section height h (bending is about the width axis)
    pub height: f64,
}

impl SectionGeometry {
    /// Create geometry from length, width and height
    pub const fn new(length: f64, width: f64, height: f64) -> Self {
        SectionGeometry {
            length,
            width,
            height,
        }
    }

    /// Validate that every dimension is finite and positive.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("length", self.length)?;
        require_positive("width", self.width)?;
        require_positive("height", self.height)?;
        Ok(())
    }

    /// Smaller of width and height
    pub fn min_dimension(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// Derived composite properties of a section.
///
/// Areas in m², second moments and torsional constants in m⁴. The
/// `*_composite` values are expressed in shell material, so stiffness is
/// shell modulus × composite property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Shell thickness t (m)
    pub shell_thickness: f64,
    /// Core width b − 2t (m)
    pub core_width: f64,
    /// Core height h − 2t (m)
    pub core_height: f64,

    /// n = E_core / E_shell
    pub modulus_ratio: f64,
    /// n = G_core / G_shell
    pub shear_modulus_ratio: f64,

    /// I of the full outer rectangle
    pub i_outer: f64,
    /// I of the core rectangle
    pub i_core: f64,
    /// I_outer − I_core
    pub i_shell: f64,
    /// I_shell + n·I_core
    pub i_composite: f64,

    /// J of the full outer rectangle
    pub j_outer: f64,
    /// J of the core rectangle
    pub j_core: f64,
    /// J_outer − J_core
    pub j_shell: f64,
    /// J_shell + n·J_core
    pub j_composite: f64,

    /// b·h − b_core·h_core
    pub a_shell: f64,
    /// b_core·h_core
    pub a_core: f64,
    /// A_shell + n·A_core
    pub a_composite: f64,
}

impl SectionProperties {
    /// Compute composite properties.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Outer dimensions
    /// * `t` - Shell thickness
    /// * `n_e` - Core/shell Young's modulus ratio
    /// * `n_g` - Core/shell shear modulus ratio
    pub fn compute(geometry: &SectionGeometry, t: f64, n_e: f64, n_g: f64) -> Self {
        let (b, h) = (geometry.width, geometry.height);
        let (bc, hc) = core_dimensions(b, h, t);

        let i_outer = rectangular_moment_of_inertia(b, h);
        let i_core = rectangular_moment_of_inertia(bc, hc);

        let j_outer = rectangular_torsion_constant(b, h);
        let j_core = rectangular_torsion_constant(bc, hc);

        let a_outer = rectangular_area(b, h);
        let a_core = rectangular_area(bc, hc);

        SectionProperties {
            shell_thickness: t,
            core_width: bc,
            core_height: hc,
            modulus_ratio: n_e,
            shear_modulus_ratio: n_g,
            i_outer,
            i_core,
            i_shell: i_outer - i_core,
            i_composite: transformed(i_outer, i_core, n_e),
            j_outer,
            j_core,
            j_shell: j_outer - j_core,
            j_composite: transformed(j_outer, j_core, n_g),
            a_shell: a_outer - a_core,
            a_core,
            a_composite: transformed(a_outer, a_core, n_e),
        }
    }
}

/// One uniform segment of a composite beam.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    geometry: SectionGeometry,
    settings: PrintSettings,
    material: MaterialProperties,
    properties: SectionProperties,
}

impl Section {
    /// Build a section from geometry, settings, and an already resolved
    /// shell material.
    ///
    /// # Errors
    ///
    /// `InvalidMaterial` when a shell modulus or the strength is not
    /// positive. `InvalidInput` when a dimension is not positive, a setting
    /// is out of range, or the shell thickness `wall_count × line_width` leaves no core
    /// (`t ≥ min(width, height) / 2`).
    pub fn new(
        geometry: SectionGeometry,
        settings: PrintSettings,
        material: MaterialProperties,
    ) -> CalcResult<Self> {
        geometry.validate()?;
        settings.validate()?;
        material.validate()?;

        let t = settings.shell_thickness();
        let limit = geometry.min_dimension() / 2.0;
        if t >= limit {
            return Err(CalcError::invalid_input(
                "shell_thickness",
                t.to_string(),
                format!(
                    "wall_count × line_width must be less than half the smallest dimension ({})",
                    limit
                ),
            ));
        }

        let n = settings.core_modulus_ratio();
        let properties = SectionProperties::compute(&geometry, t, n, n);

        for (field, value) in [
            ("i_composite", properties.i_composite),
            ("j_composite", properties.j_composite),
            ("a_composite", properties.a_composite),
        ] {
            require_positive(field, value)?;
        }

        Ok(Section {
            geometry,
            settings,
            material,
            properties,
        })
    }

    /// Build a section, looking its material up by name.
    pub fn from_settings<P: MaterialProvider>(
        geometry: SectionGeometry,
        settings: PrintSettings,
        provider: P,
    ) -> CalcResult<Self> {
        let material = provider.lookup(&settings.material)?;
        Section::new(geometry, settings, material)
    }

    pub fn geometry(&self) -> &SectionGeometry {
        &self.geometry
    }

    pub fn settings(&self) -> &PrintSettings {
        &self.settings
    }

    pub fn material(&self) -> &MaterialProperties {
        &self.material
    }

    pub fn properties(&self) -> &SectionProperties {
        &self.properties
    }

    /// Segment length (m)
    pub fn length(&self) -> f64 {
        self.geometry.length
    }

    /// Shell Young's modulus (Pa)
    pub fn e_shell(&self) -> f64 {
        self.material.youngs_modulus_pa
    }

    /// Shell shear modulus (Pa)
    pub fn g_shell(&self) -> f64 {
        self.material.shear_modulus_pa
    }

    /// Core Young's modulus E_shell × density / 100 (Pa)
    pub fn e_core(&self) -> f64 {
        self.e_shell() * self.properties.modulus_ratio
    }

    /// Core shear modulus G_shell × density / 100 (Pa)
    pub fn g_core(&self) -> f64 {
        self.g_shell() * self.properties.shear_modulus_ratio
    }

    /// Composite bending stiffness E·I (N·m²)
    pub fn bending_stiffness(&self) -> f64 {
        self.e_shell() * self.properties.i_composite
    }

    /// Composite torsional stiffness G·J (N·m²)
    pub fn torsional_stiffness(&self) -> f64 {
        self.g_shell() * self.properties.j_composite
    }

    /// Composite axial stiffness E·A (N)
    pub fn axial_stiffness(&self) -> f64 {
        self.e_shell() * self.properties.a_composite
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::materials::InfillPattern;

    pub(crate) fn pla() -> MaterialProperties {
        MaterialProperties::new("PLA", 3.5e9, 1.29e9, 50.0e6).unwrap()
    }

    pub(crate) fn settings(density: f64, wall_count: u32) -> PrintSettings {
        PrintSettings {
            material: "PLA".to_string(),
            infill_pattern: InfillPattern::Grid,
            infill_density: density,
            wall_count,
            line_width: 0.0004,
        }
    }

    pub(crate) fn section(length: f64, density: f64) -> Section {
        Section::new(
            SectionGeometry::new(length, 0.02, 0.01),
            settings(density, 3),
            pla(),
        )
        .unwrap()
    }

    #[test]
    fn test_hollow_core_equals_shell_only() {
        let s = section(0.05, 0.0);
        let p = s.properties();
        assert_eq!(p.i_composite, p.i_shell);
        assert_eq!(p.j_composite, p.j_shell);
        assert_eq!(p.a_composite, p.a_shell);
        assert_eq!(s.e_core(), 0.0);
    }

    #[test]
    fn test_solid_core_equals_outer_rectangle() {
        let s = section(0.05, 100.0);
        let p = s.properties();
        assert!((p.i_composite - p.i_outer).abs() < 1e-20);
        assert!((p.a_composite - 0.02 * 0.01).abs() < 1e-15);
        assert_eq!(s.g_core(), s.g_shell());
    }

    #[test]
    fn test_shell_dimensions() {
        let s = section(0.05, 20.0);
        let p = s.properties();
        assert!((p.shell_thickness - 0.0012).abs() < 1e-15);
        assert!((p.core_width - 0.0176).abs() < 1e-15);
        assert!((p.core_height - 0.0076).abs() < 1e-15);
        assert!((p.a_shell - (0.02 * 0.01 - 0.0176 * 0.0076)).abs() < 1e-15);
    }

    #[test]
    fn test_more_walls_stiffer() {
        let geometry = SectionGeometry::new(0.05, 0.02, 0.01);
        let mut previous: Option<Section> = None;
        for walls in 1..=5 {
            let s = Section::new(geometry, settings(20.0, walls), pla()).unwrap();
            if let Some(prev) = &previous {
                assert!(s.bending_stiffness() > prev.bending_stiffness());
                assert!(s.torsional_stiffness() > prev.torsional_stiffness());
                assert!(s.axial_stiffness() > prev.axial_stiffness());
            }
            previous = Some(s);
        }
    }

    #[test]
    fn test_rejects_wall_consuming_section() {
        // 13 walls × 0.4 mm = 5.2 mm ≥ 10 mm / 2
        let geometry = SectionGeometry::new(0.05, 0.02, 0.01);
        let err = Section::new(geometry, settings(20.0, 13), pla()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        // Exactly half is also rejected
        let mut exact = settings(20.0, 1);
        exact.line_width = 0.005;
        assert!(Section::new(geometry, exact, pla()).is_err());
    }

    #[test]
    fn test_rejects_non_positive_geometry() {
        for geometry in [
            SectionGeometry::new(0.0, 0.02, 0.01),
            SectionGeometry::new(0.05, -0.02, 0.01),
            SectionGeometry::new(0.05, 0.02, f64::NAN),
        ] {
            assert!(Section::new(geometry, settings(20.0, 3), pla()).is_err());
        }
    }

    #[test]
    fn test_rejects_zero_modulus_material() {
        let geometry = SectionGeometry::new(0.05, 0.02, 0.01);
        for (e, g) in [(0.0, 1.29e9), (3.5e9, 0.0), (-3.5e9, 1.29e9)] {
            let material = MaterialProperties {
                name: "Broken".to_string(),
                youngs_modulus_pa: e,
                shear_modulus_pa: g,
                tensile_strength_pa: 50.0e6,
            };
            let err = Section::new(geometry, settings(20.0, 3), material).unwrap_err();
            assert!(matches!(err, CalcError::InvalidMaterial { .. }));
            assert_eq!(err.category(), crate::errors::ErrorCategory::Configuration);
        }
    }

    #[test]
    fn test_from_settings_unknown_material() {
        let db = crate::materials::MaterialDb::new();
        let err = Section::from_settings(
            SectionGeometry::new(0.05, 0.02, 0.01),
            settings(20.0, 3),
            &db,
        )
        .unwrap_err();
        assert_eq!(err, CalcError::material_not_found("PLA"));
    }
}
