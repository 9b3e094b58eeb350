//! # Beam Calculations
//!
//! The engine is split into three layers, each with plain serializable
//! inputs and results:
//!
//! - [`section`] - `Section` construction and composite properties
//! - [`section_analysis`] - `analyze_section(section, loads) -> SectionResponse`
//! - [`beam`] - `Beam` and `analyze(beam, loads) -> BeamResult`
//!
//! Calculations are pure: they never mutate a section or a beam, and they
//! either return a complete result or a [`CalcError`](crate::errors::CalcError).

pub mod beam;
pub mod section;
pub mod section_analysis;

// Re-export commonly used types
pub use beam::{analyze, Beam, BeamResult, EndLoads, EndRole, SectionResult};
pub use section::{Section, SectionGeometry, SectionProperties};
pub use section_analysis::{analyze_section, SectionLoads, SectionResponse, StressState, YieldCheck};
