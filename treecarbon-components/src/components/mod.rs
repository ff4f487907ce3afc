mod biomass;
mod carbon;
mod growth;
mod mortality;

pub use biomass::{BiomassEstimator, TreeBiomass};
pub use carbon::{CarbonConverter, CarbonStock};
pub use growth::{GrowthModel, TreeDimensions};
pub use mortality::MortalityModel;
