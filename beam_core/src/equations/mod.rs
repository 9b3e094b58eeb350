//! # Structural Mechanics Equations
//!
//! Every closed-form formula the engine uses lives here, as small pure
//! functions, so each can be checked against a textbook on its own.
//!
//! ## Modules
//!
//! - [`section`] - Rectangle properties and the transformed-section combination
//! - [`cantilever`] - Per-load-type response of one cantilever segment
//! - [`failure`] - Tresca and Von Mises required yield strength
//!
//! ## Sign Conventions
//!
//! - **Moment / force**: positive values bend the beam the same way; the top
//!   fiber is in tension
//! - **Axial**: positive is tension
//! - **Rotation / displacement**: positive in the direction of the applied
//!   force
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Tables 8.1 and 10.7
//! - Gere & Goodno, Mechanics of Materials, Chapter 6 (composite beams)
//! - Shigley's Mechanical Engineering Design, 10th Edition, Chapter 5

pub mod cantilever;
pub mod failure;
pub mod section;

pub use cantilever::{
    axial_stress,
    force_response,
    moment_response,
    torsion_response,
    ForceResponse,
    MomentResponse,
    TorsionResponse,
};

pub use failure::{principal_stresses, tresca_required_yield, von_mises_required_yield};

pub use section::{
    core_dimensions,
    rectangular_area,
    rectangular_moment_of_inertia,
    rectangular_torsion_constant,
    transformed,
};
