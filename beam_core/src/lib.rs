//! # beam_core - Composite Cantilever Beam Engine
//!
//! `beam_core` computes the response of a 3D-printed cantilever beam built
//! from a sequence of rectangular sections. Each section is a composite of a
//! solid shell (the printed perimeter walls) around a partially filled
//! infill core. Loads act at the free end: a bending moment, a transverse
//! force, a torque and an axial tension.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: Inputs, results and errors implement Serialize
//! - **Rich Errors**: Structured error types that name the failing section
//! - **SI Units**: Meters, newtons and pascals throughout the engine
//!
//! ## Quick Start
//!
//! ```rust
//! use beam_core::calculations::{analyze, EndLoads};
//! use beam_core::definition::{BeamDefinition, SectionRecord};
//! use beam_core::materials::{MaterialDb, PrintOverrides};
//!
//! let mut def = BeamDefinition::new("arm", PrintOverrides {
//!     material: Some("PLA".to_string()),
//!     infill_density: Some(20.0),
//!     wall_count: Some(3),
//!     line_width: Some(0.0004),
//!     ..PrintOverrides::default()
//! });
//! def.add_section(SectionRecord::new(0.05, 0.02, 0.01));
//! def.add_section(SectionRecord::new(0.05, 0.015, 0.01));
//!
//! let beam = def.build(MaterialDb::builtin().unwrap()).unwrap();
//! let result = analyze(&beam, &EndLoads { force: 2.0, ..EndLoads::default() }).unwrap();
//!
//! assert!(result.displacement > 0.0);
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! # let _ = json;
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Sections, the section solver and beam analysis
//! - [`equations`] - Closed-form mechanics formulas
//! - [`materials`] - Filament table and print settings
//! - [`definition`] - Serializable beam descriptions
//! - [`file_io`] - Definition files with atomic saves
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod definition;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{analyze, Beam, BeamResult, EndLoads, Section, SectionGeometry};
pub use definition::{BeamDefinition, SectionRecord, SCHEMA_VERSION};
pub use errors::{CalcError, CalcResult};
pub use file_io::{definition_path, load_definition, save_definition};
pub use materials::{MaterialDb, MaterialProvider, PrintOverrides};
