//! Core types for plantation carbon stock projections.
//!
//! Downstream crates build the model components on top of
//! [`parameters::ModelParameters`] and [`species::SpeciesTraits`], and report
//! results as [`projection::ProjectionRow`]s.

pub mod errors;
pub mod parameters;
pub mod planting;
pub mod projection;
pub mod species;

/// Floating point type used throughout the model.
pub type FloatValue = f64;
