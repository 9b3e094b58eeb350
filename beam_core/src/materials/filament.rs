//! Filament Material Table
//!
//! Shell material properties for common FFF filaments, loaded from TOML.
//!
//! ## Data Source
//!
//! The built-in table lives in `assets/materials.toml` and is embedded at
//! compile time. It is parsed and validated once, on first use, and shared
//! for the rest of the process. A different table can be loaded from a file
//! with [`MaterialDb::load_from_file`].
//!
//! ## Format
//!
//! ```toml
//! version = "1.0"
//!
//! [[material]]
//! name = "PLA"
//! youngs_modulus_gpa = 3.5
//! shear_modulus_gpa = 1.29
//! tensile_strength_mpa = 50.0
//!
//! [[material]]
//! name = "PA12"
//! aliases = ["Nylon"]
//! youngs_modulus_gpa = 1.8
//! poisson_ratio = 0.39        # G derived as E / (2(1 + nu))
//! tensile_strength_mpa = 48.0
//! ```

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{MaterialProperties, MaterialProvider};
use crate::errors::{CalcError, CalcResult};
use crate::units::{Gigapascals, Megapascals, Pascals};

const BUILTIN_TABLE: &str = include_str!("../../assets/materials.toml");

static BUILTIN: Lazy<CalcResult<MaterialDb>> = Lazy::new(|| MaterialDb::from_toml_str(BUILTIN_TABLE));

/// One `[[material]]` entry as written in the TOML table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Canonical name
    pub name: String,

    /// Alternative names accepted by lookup
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Young's modulus
    pub youngs_modulus_gpa: Gigapascals,

    /// Shear modulus; derived from `poisson_ratio` when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shear_modulus_gpa: Option<Gigapascals>,

    /// Poisson's ratio, only used when `shear_modulus_gpa` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poisson_ratio: Option<f64>,

    /// Ultimate tensile strength
    pub tensile_strength_mpa: Megapascals,
}

impl MaterialRecord {
    /// Convert to SI and check every value.
    pub fn validate(&self) -> CalcResult<MaterialProperties> {
        if self.name.trim().is_empty() {
            return Err(CalcError::invalid_material("", "Material name is empty"));
        }

        let e = Pascals::from(self.youngs_modulus_gpa).0;
        let g = match (self.shear_modulus_gpa, self.poisson_ratio) {
            (Some(g), _) => Pascals::from(g).0,
            (None, Some(nu)) => {
                if !nu.is_finite() || nu <= -1.0 || nu >= 0.5 {
                    return Err(CalcError::invalid_material(
                        &self.name,
                        format!("poisson_ratio must be in (-1, 0.5) (received {})", nu),
                    ));
                }
                e / (2.0 * (1.0 + nu))
            }
            (None, None) => {
                return Err(CalcError::invalid_material(
                    &self.name,
                    "Either shear_modulus_gpa or poisson_ratio is required",
                ));
            }
        };
        let fu = Pascals::from(self.tensile_strength_mpa).0;

        MaterialProperties::new(self.name.trim(), e, g, fu)
    }
}

/// Raw layout of a table file
#[derive(Debug, Deserialize)]
struct MaterialTable {
    version: Option<String>,
    #[serde(default)]
    material: Vec<MaterialRecord>,
}

/// In-memory material table.
///
/// Materials are indexed by uppercase name and alias for case-insensitive
/// lookup.
#[derive(Debug, Clone, Default)]
pub struct MaterialDb {
    /// Properties keyed by canonical uppercase name
    materials: HashMap<String, MaterialProperties>,

    /// Uppercase alias -> uppercase canonical name
    aliases: HashMap<String, String>,

    /// Table version (e.g., "1.0")
    pub version: Option<String>,
}

impl MaterialDb {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table, parsed once per process.
    ///
    /// # Example
    ///
    /// ```rust
    /// use beam_core::materials::{MaterialDb, MaterialProvider};
    ///
    /// let db = MaterialDb::builtin().unwrap();
    /// assert!(db.lookup("PETG").is_ok());
    /// assert!(db.lookup("nylon").is_ok()); // alias of PA12
    /// ```
    pub fn builtin() -> CalcResult<&'static MaterialDb> {
        let table: &'static CalcResult<MaterialDb> = &BUILTIN;
        table.as_ref().map_err(|e| e.clone())
    }

    /// Parse and validate a TOML table.
    ///
    /// Every record is validated here, so lookups never hand out a material
    /// with a zero or negative modulus.
    pub fn from_toml_str(contents: &str) -> CalcResult<Self> {
        let table: MaterialTable =
            toml::from_str(contents).map_err(|e| CalcError::SerializationError {
                reason: format!("Invalid material table: {}", e),
            })?;

        let mut db = MaterialDb::new();
        db.version = table.version;

        for record in &table.material {
            let props = record.validate()?;
            let key = props.name.to_uppercase();
            if db.materials.contains_key(&key) || db.aliases.contains_key(&key) {
                return Err(CalcError::invalid_material(&props.name, "Duplicate material name"));
            }
            for alias in &record.aliases {
                let alias_key = alias.trim().to_uppercase();
                if db.materials.contains_key(&alias_key) || db.aliases.contains_key(&alias_key) {
                    return Err(CalcError::invalid_material(
                        &props.name,
                        format!("Alias '{}' is already in use", alias),
                    ));
                }
                db.aliases.insert(alias_key, key.clone());
            }
            db.materials.insert(key, props);
        }

        Ok(db)
    }

    /// Load a table from a TOML file
    pub fn load_from_file(path: &Path) -> CalcResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CalcError::file_error("read", path.display().to_string(), e.to_string())
        })?;
        Self::from_toml_str(&contents)
    }

    /// Insert or replace a material
    pub fn insert(&mut self, props: MaterialProperties) {
        let key = props.name.to_uppercase();
        self.aliases.remove(&key);
        self.materials.insert(key, props);
    }

    /// Canonical names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.materials.values().map(|m| m.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Number of materials (aliases not counted)
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// True when the table holds no materials
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl MaterialProvider for MaterialDb {
    fn lookup(&self, name: &str) -> CalcResult<MaterialProperties> {
        let key = name.trim().to_uppercase();
        let canonical = self.aliases.get(&key).unwrap_or(&key);
        self.materials
            .get(canonical)
            .cloned()
            .ok_or_else(|| CalcError::material_not_found(name))
    }
}
