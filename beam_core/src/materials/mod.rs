//! # Materials Database
//!
//! Material definitions and property lookups for printed beam sections.
//!
//! ## Contents
//!
//! - **Filament table**: shell material properties (E, G, tensile strength)
//!   keyed by material name, loaded from TOML
//! - **Infill settings**: pattern, density, wall count and line width, with
//!   beam-level defaults and per-section overrides
//!
//! ## Example
//!
//! ```rust
//! use beam_core::materials::{MaterialDb, MaterialProvider};
//!
//! let db = MaterialDb::builtin().unwrap();
//! let pla = db.lookup("pla").unwrap();
//! println!("E = {} Pa, Fu = {} Pa", pla.youngs_modulus_pa, pla.tensile_strength_pa);
//! ```

pub mod filament;
pub mod infill;

pub use filament::{MaterialDb, MaterialRecord};
pub use infill::{InfillPattern, PrintOverrides, PrintSettings};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Properties of a shell material (SI units).
///
/// [`MaterialProperties::new`] and deserialization both validate, so a value
/// from either has finite, strictly positive moduli and strength. Values
/// assembled field by field are checked again by
/// [`Section::new`](crate::calculations::section::Section::new).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedMaterial")]
pub struct MaterialProperties {
    /// Canonical material name (e.g., "PLA")
    pub name: String,
    /// Young's modulus E (Pa)
    pub youngs_modulus_pa: f64,
    /// Shear modulus G (Pa)
    pub shear_modulus_pa: f64,
    /// Ultimate tensile strength (Pa)
    pub tensile_strength_pa: f64,
}

impl MaterialProperties {
    /// Create validated material properties.
    ///
    /// # Errors
    ///
    /// `InvalidMaterial` when any value is zero, negative or non-finite.
    pub fn new(
        name: impl Into<String>,
        youngs_modulus_pa: f64,
        shear_modulus_pa: f64,
        tensile_strength_pa: f64,
    ) -> CalcResult<Self> {
        let props = MaterialProperties {
            name: name.into(),
            youngs_modulus_pa,
            shear_modulus_pa,
            tensile_strength_pa,
        };
        props.validate()?;
        Ok(props)
    }

    /// Check that every modulus and the strength are finite and positive.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("youngs_modulus", self.youngs_modulus_pa),
            ("shear_modulus", self.shear_modulus_pa),
            ("tensile_strength", self.tensile_strength_pa),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_material(
                    &self.name,
                    format!("{} must be a finite positive number (received {})", field, value),
                ));
            }
        }
        Ok(())
    }
}

/// Wire form of [`MaterialProperties`] before validation
#[derive(Deserialize)]
struct UncheckedMaterial {
    name: String,
    youngs_modulus_pa: f64,
    shear_modulus_pa: f64,
    tensile_strength_pa: f64,
}

impl TryFrom<UncheckedMaterial> for MaterialProperties {
    type Error = CalcError;

    fn try_from(raw: UncheckedMaterial) -> CalcResult<Self> {
        MaterialProperties::new(
            raw.name,
            raw.youngs_modulus_pa,
            raw.shear_modulus_pa,
            raw.tensile_strength_pa,
        )
    }
}

/// Source of material properties by name.
///
/// The engine only ever reads from a provider; implementations are expected
/// to be immutable once loaded so one provider can serve many beams.
pub trait MaterialProvider {
    /// Look up a material by name.
    ///
    /// # Errors
    ///
    /// `MaterialNotFound` when the name is absent.
    fn lookup(&self, name: &str) -> CalcResult<MaterialProperties>;
}

impl<P: MaterialProvider + ?Sized> MaterialProvider for &P {
    fn lookup(&self, name: &str) -> CalcResult<MaterialProperties> {
        (**self).lookup(name)
    }
}
