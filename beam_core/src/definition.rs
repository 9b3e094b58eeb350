//! # Beam Definition Files
//!
//! A [`BeamDefinition`] is the serializable description of a beam: global
//! print defaults plus a list of section records, each with its geometry and
//! any settings it overrides. It holds names, not resolved materials, so a
//! definition can be saved, edited by hand, and rebuilt against any
//! [`MaterialProvider`].
//!
//! ## Structure
//!
//! ```text
//! BeamDefinition
//! ├── version, name, created, modified
//! ├── defaults: PrintOverrides
//! └── sections: Vec<SectionRecord>
//!     └── length, width, height + PrintOverrides (flattened)
//! ```
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "name": "bracket",
//!   "defaults": { "material": "PLA", "infill_density": 20.0,
//!                 "wall_count": 3, "line_width": 0.0004 },
//!   "sections": [
//!     { "length": 0.05, "width": 0.02, "height": 0.01 },
//!     { "length": 0.05, "width": 0.02, "height": 0.008, "infill_density": 40.0 }
//!   ]
//! }
//! ```
//!
//! `version`, `name`, the timestamps and `defaults` may all be omitted;
//! files written by earlier tools carry only `defaults` and `sections`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::beam::Beam;
use crate::calculations::section::SectionGeometry;
use crate::errors::{CalcError, CalcResult};
use crate::materials::{MaterialProvider, PrintOverrides};

/// Current schema version for definition files
pub const SCHEMA_VERSION: &str = "0.1.0";

fn current_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// `(major, minor)` of a `major[.minor[.patch]]` schema version.
fn schema_release(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = match parts.next() {
        Some(minor) => minor.parse().ok()?,
        None => 0,
    };
    Some((major, minor))
}

/// One section as stored in a definition file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Length along the beam axis (m)
    pub length: f64,
    /// Width b (m)
    pub width: f64,
    /// Height h (m)
    pub height: f64,
    /// Settings that differ from the beam defaults
    #[serde(flatten)]
    pub overrides: PrintOverrides,
}

impl SectionRecord {
    /// A record that uses the beam defaults for every setting
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        SectionRecord {
            length,
            width,
            height,
            overrides: PrintOverrides::default(),
        }
    }

    pub fn geometry(&self) -> SectionGeometry {
        SectionGeometry::new(self.length, self.width, self.height)
    }
}

/// Serializable beam description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamDefinition {
    /// Schema version
    #[serde(default = "current_version")]
    pub version: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,

    /// Global print settings; sections fall back to these
    #[serde(default)]
    pub defaults: PrintOverrides,

    /// Section records ordered from the clamp to the free end
    #[serde(default)]
    pub sections: Vec<SectionRecord>,
}

impl BeamDefinition {
    /// Create an empty definition stamped with the current time.
    ///
    /// # Example
    ///
    /// ```rust
    /// use beam_core::definition::{BeamDefinition, SectionRecord};
    /// use beam_core::materials::{MaterialDb, PrintOverrides};
    ///
    /// let mut def = BeamDefinition::new("bracket", PrintOverrides {
    ///     material: Some("PETG".to_string()),
    ///     infill_density: Some(25.0),
    ///     wall_count: Some(2),
    ///     line_width: Some(0.00045),
    ///     ..PrintOverrides::default()
    /// });
    /// def.sections.push(SectionRecord::new(0.06, 0.02, 0.012));
    ///
    /// let beam = def.build(MaterialDb::builtin().unwrap()).unwrap();
    /// assert_eq!(beam.section_count(), 1);
    /// ```
    pub fn new(name: impl Into<String>, defaults: PrintOverrides) -> Self {
        let now = Utc::now();
        BeamDefinition {
            version: current_version(),
            name: name.into(),
            created: Some(now),
            modified: Some(now),
            defaults,
            sections: Vec::new(),
        }
    }

    /// Append a section record
    pub fn add_section(&mut self, record: SectionRecord) {
        self.sections.push(record);
        self.touch();
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.created.get_or_insert(now);
        self.modified = Some(now);
    }

    /// Parse a definition and check that this build can read its schema.
    ///
    /// # Errors
    ///
    /// `SerializationError` for malformed JSON, `VersionMismatch` for an
    /// unreadable schema version.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let definition: BeamDefinition =
            serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
                reason: e.to_string(),
            })?;
        definition.check_version()?;
        Ok(definition)
    }

    /// Pretty-printed JSON as written to definition files
    pub fn to_json(&self) -> CalcResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })
    }

    /// Check the stored schema version against [`SCHEMA_VERSION`].
    ///
    /// The major release must match. While the schema is still at major 0,
    /// a file from a newer minor release is also refused.
    pub fn check_version(&self) -> CalcResult<()> {
        let readable = match (schema_release(&self.version), schema_release(SCHEMA_VERSION)) {
            (Some((file_major, file_minor)), Some((major, minor))) => {
                file_major == major && (major > 0 || file_minor <= minor)
            }
            _ => false,
        };
        if readable {
            Ok(())
        } else {
            Err(CalcError::VersionMismatch {
                file_version: self.version.clone(),
                expected_version: SCHEMA_VERSION.to_string(),
            })
        }
    }

    /// Resolve every record into a [`Beam`].
    ///
    /// # Errors
    ///
    /// The first configuration error encountered, tagged with its section
    /// index.
    pub fn build<P: MaterialProvider>(&self, provider: P) -> CalcResult<Beam> {
        let mut beam = Beam::new(self.defaults.clone());
        for record in &self.sections {
            beam.add_section_from(record.geometry(), &record.overrides, &provider)?;
        }
        Ok(beam)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{InfillPattern, MaterialDb};

    fn defaults() -> PrintOverrides {
        PrintOverrides {
            material: Some("PLA".to_string()),
            infill_pattern: Some(InfillPattern::Gyroid),
            infill_density: Some(20.0),
            wall_count: Some(3),
            line_width: Some(0.0004),
        }
    }

    #[test]
    fn test_build_applies_overrides() {
        let mut def = BeamDefinition::new("bracket", defaults());
        def.add_section(SectionRecord::new(0.05, 0.02, 0.01));
        let mut stiff = SectionRecord::new(0.05, 0.02, 0.01);
        stiff.overrides.infill_density = Some(80.0);
        def.add_section(stiff);

        let beam = def.build(MaterialDb::builtin().unwrap()).unwrap();
        assert_eq!(beam.section_count(), 2);
        assert_eq!(beam.sections()[0].settings().infill_density, 20.0);
        assert_eq!(beam.sections()[1].settings().infill_density, 80.0);
        assert!(beam.sections()[1].bending_stiffness() > beam.sections()[0].bending_stiffness());
    }

    #[test]
    fn test_build_reports_section_index() {
        let mut def = BeamDefinition::new("bad", defaults());
        def.add_section(SectionRecord::new(0.05, 0.02, 0.01));
        let mut unknown = SectionRecord::new(0.05, 0.02, 0.01);
        unknown.overrides.material = Some("Unobtainium".to_string());
        def.add_section(unknown);
        def.add_section(SectionRecord::new(0.05, 0.0, 0.01));

        let err = def.build(MaterialDb::builtin().unwrap()).unwrap_err();
        assert_eq!(err, CalcError::material_not_found("Unobtainium"));

        def.sections.remove(1);
        let err = def.build(MaterialDb::builtin().unwrap()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SECTION");
    }

    #[test]
    fn test_legacy_format_without_version() {
        let json = r#"{
            "defaults": { "material": "PLA", "infill_pattern": "grid",
                          "infill_density": 15, "wall_count": 2, "line_width": 0.0004 },
            "sections": [
                { "length": 0.1, "width": 0.02, "height": 0.01 },
                { "length": 0.1, "width": 0.02, "height": 0.01, "wall_count": 4 }
            ]
        }"#;
        let def: BeamDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.version, SCHEMA_VERSION);
        assert!(def.name.is_empty());
        assert_eq!(def.created, None);
        assert_eq!(def.sections[1].overrides.wall_count, Some(4));

        let beam = def.build(MaterialDb::builtin().unwrap()).unwrap();
        assert_eq!(beam.sections()[1].settings().wall_count, 4);
        assert_eq!(beam.sections()[0].settings().infill_pattern, InfillPattern::Grid);
    }

    #[test]
    fn test_serialization_omits_unset_overrides() {
        let mut def = BeamDefinition::new("plain", defaults());
        def.add_section(SectionRecord::new(0.05, 0.02, 0.01));
        let json = serde_json::to_string(&def).unwrap();
        assert!(json.contains("\"sections\":[{\"length\":0.05,\"width\":0.02,\"height\":0.01}]"));

        let roundtrip: BeamDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, def);
    }

    fn with_version(version: &str) -> BeamDefinition {
        BeamDefinition {
            version: version.to_string(),
            ..BeamDefinition::new("v", PrintOverrides::default())
        }
    }

    #[test]
    fn test_check_version() {
        assert!(with_version(SCHEMA_VERSION).check_version().is_ok());
        assert!(with_version("0.1.5").check_version().is_ok());
        assert!(with_version("0.0.9").check_version().is_ok());
        assert!(with_version("0.1").check_version().is_ok());

        for version in ["1.0.0", "0.2.0", "latest", "", "0.x"] {
            let err = with_version(version).check_version().unwrap_err();
            assert_eq!(
                err,
                CalcError::VersionMismatch {
                    file_version: version.to_string(),
                    expected_version: SCHEMA_VERSION.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_from_json_checks_version() {
        let def = BeamDefinition::from_json(r#"{ "sections": [] }"#).unwrap();
        assert_eq!(def.version, SCHEMA_VERSION);

        let err = BeamDefinition::from_json(r#"{ "version": "0.3.1", "sections": [] }"#).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let err = BeamDefinition::from_json("[1, 2]").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_touch_keeps_created() {
        let mut def = BeamDefinition::new("t", PrintOverrides::default());
        let created = def.created;
        def.touch();
        assert_eq!(def.created, created);
        assert!(def.modified >= created);
    }
}
