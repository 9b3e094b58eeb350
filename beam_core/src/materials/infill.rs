//! Infill and Shell Settings
//!
//! Slicer settings that define a section's composite cross-section: the
//! shell material, the number and width of perimeter walls, and the infill
//! pattern and density of the core.
//!
//! Settings come in two shapes:
//!
//! - [`PrintOverrides`]: every field optional. Used for beam-wide defaults
//!   and for per-section overrides, exactly as they appear in a beam file.
//! - [`PrintSettings`]: fully resolved and validated.
//!
//! ## Core stiffness rule
//!
//! The core is modelled as the shell material scaled by infill density:
//! `E_core = E_shell × density / 100` and `G_core = G_shell × density / 100`.
//! The infill pattern is recorded but does not change this rule.

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};

/// Infill pattern of the section core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InfillPattern {
    /// Crossed lines, both directions in every layer
    #[default]
    Grid,
    /// Parallel lines alternating direction per layer
    Lines,
    /// Triangular grid
    Triangles,
    /// Cubic lattice
    Cubic,
    /// Gyroid minimal surface
    Gyroid,
    /// Hexagonal cells
    Honeycomb,
    /// Concentric copies of the perimeter
    Concentric,
}

impl InfillPattern {
    /// All patterns for UI selection
    pub const ALL: [InfillPattern; 7] = [
        InfillPattern::Grid,
        InfillPattern::Lines,
        InfillPattern::Triangles,
        InfillPattern::Cubic,
        InfillPattern::Gyroid,
        InfillPattern::Honeycomb,
        InfillPattern::Concentric,
    ];

    /// Short code used in files
    pub fn code(&self) -> &'static str {
        match self {
            InfillPattern::Grid => "grid",
            InfillPattern::Lines => "lines",
            InfillPattern::Triangles => "triangles",
            InfillPattern::Cubic => "cubic",
            InfillPattern::Gyroid => "gyroid",
            InfillPattern::Honeycomb => "honeycomb",
            InfillPattern::Concentric => "concentric",
        }
    }

    /// Parse from common slicer spellings
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "grid" | "rectilineargrid" => Ok(InfillPattern::Grid),
            "lines" | "line" | "rectilinear" | "zigzag" => Ok(InfillPattern::Lines),
            "triangles" | "triangle" | "triangular" => Ok(InfillPattern::Triangles),
            "cubic" | "cubicsubdivision" => Ok(InfillPattern::Cubic),
            "gyroid" => Ok(InfillPattern::Gyroid),
            "honeycomb" | "hexagonal" | "hex" => Ok(InfillPattern::Honeycomb),
            "concentric" => Ok(InfillPattern::Concentric),
            _ => Err(CalcError::invalid_input(
                "infill_pattern",
                s,
                "Unknown infill pattern",
            )),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            InfillPattern::Grid => "Grid",
            InfillPattern::Lines => "Lines",
            InfillPattern::Triangles => "Triangles",
            InfillPattern::Cubic => "Cubic",
            InfillPattern::Gyroid => "Gyroid",
            InfillPattern::Honeycomb => "Honeycomb",
            InfillPattern::Concentric => "Concentric",
        }
    }
}

impl std::fmt::Display for InfillPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl TryFrom<String> for InfillPattern {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        InfillPattern::from_str_flexible(&value)
    }
}

impl From<InfillPattern> for String {
    fn from(pattern: InfillPattern) -> Self {
        pattern.code().to_string()
    }
}

/// Fully resolved print settings for one section.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material": "PLA",
///   "infill_pattern": "gyroid",
///   "infill_density": 20.0,
///   "wall_count": 3,
///   "line_width": 0.0004
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintSettings {
    /// Shell material name, resolved through a material provider
    pub material: String,

    /// Core infill pattern
    pub infill_pattern: InfillPattern,

    /// Infill density in percent (0 = hollow, 100 = solid)
    pub infill_density: f64,

    /// Number of perimeter walls
    pub wall_count: u32,

    /// Extrusion line width in meters
    pub line_width: f64,
}

impl PrintSettings {
    /// Validate ranges.
    pub fn validate(&self) -> CalcResult<()> {
        if self.material.trim().is_empty() {
            return Err(CalcError::invalid_input(
                "material",
                "\"\"",
                "Material name is empty",
            ));
        }
        if !self.infill_density.is_finite()
            || self.infill_density < 0.0
            || self.infill_density > 100.0
        {
            return Err(CalcError::invalid_input(
                "infill_density",
                self.infill_density.to_string(),
                "Infill density must be between 0 and 100 percent",
            ));
        }
        if self.wall_count == 0 {
            return Err(CalcError::invalid_input(
                "wall_count",
                "0",
                "At least one wall is required",
            ));
        }
        require_positive("line_width", self.line_width)?;
        Ok(())
    }

    /// Shell thickness t = wall_count × line_width (m)
    pub fn shell_thickness(&self) -> f64 {
        f64::from(self.wall_count) * self.line_width
    }

    /// Core-to-shell modulus ratio n = density / 100
    pub fn core_modulus_ratio(&self) -> f64 {
        self.infill_density / 100.0
    }
}

/// Partially specified print settings.
///
/// Serves both as the beam's global defaults and as a section's overrides.
/// Unset fields are omitted from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrintOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infill_pattern: Option<InfillPattern>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infill_density: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_count: Option<u32>,

    /// Line width in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

impl PrintOverrides {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self == &PrintOverrides::default()
    }

    /// Layer `self` over `defaults`: fields set here win.
    pub fn or(&self, defaults: &PrintOverrides) -> PrintOverrides {
        PrintOverrides {
            material: self.material.clone().or_else(|| defaults.material.clone()),
            infill_pattern: self.infill_pattern.or(defaults.infill_pattern),
            infill_density: self.infill_density.or(defaults.infill_density),
            wall_count: self.wall_count.or(defaults.wall_count),
            line_width: self.line_width.or(defaults.line_width),
        }
    }

    /// Resolve against `defaults` into validated settings.
    ///
    /// `infill_pattern` falls back to [`InfillPattern::Grid`]; every other
    /// field must come from one side or the other.
    ///
    /// # Errors
    ///
    /// - `MissingField` when neither side sets a required field
    /// - `InvalidInput` when a resolved value is out of range
    pub fn resolve(&self, defaults: &PrintOverrides) -> CalcResult<PrintSettings> {
        let merged = self.or(defaults);
        let settings = PrintSettings {
            material: merged
                .material
                .ok_or_else(|| CalcError::missing_field("material", None))?,
            infill_pattern: merged.infill_pattern.unwrap_or_default(),
            infill_density: merged
                .infill_density
                .ok_or_else(|| CalcError::missing_field("infill_density", None))?,
            wall_count: merged
                .wall_count
                .ok_or_else(|| CalcError::missing_field("wall_count", None))?,
            line_width: merged
                .line_width
                .ok_or_else(|| CalcError::missing_field("line_width", None))?,
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl From<PrintSettings> for PrintOverrides {
    fn from(settings: PrintSettings) -> Self {
        PrintOverrides {
            material: Some(settings.material),
            infill_pattern: Some(settings.infill_pattern),
            infill_density: Some(settings.infill_density),
            wall_count: Some(settings.wall_count),
            line_width: Some(settings.line_width),
        }
    }
}
