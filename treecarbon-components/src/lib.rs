//! Model components for plantation carbon projections
//!
//! Each component is a pure calculation over [`SpeciesTraits`] and the shared
//! [`ModelParameters`]:
//!
//! - `GrowthModel`: diameter from age (Chapman-Richards) and height from
//!   diameter (T-model)
//! - `MortalityModel`: cumulative survival with a wood-density modifier
//! - `BiomassEstimator`: per-tree above- and below-ground biomass
//! - `CarbonConverter`: biomass to carbon and CO2-equivalent
//!
//! [`SpeciesTraits`]: treecarbon_core::species::SpeciesTraits
//! [`ModelParameters`]: treecarbon_core::parameters::ModelParameters

pub mod components;
