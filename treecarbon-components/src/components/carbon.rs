//! Carbon component
//!
//! Converts stand biomass to carbon stock and CO2-equivalent.

use serde::{Deserialize, Serialize};
use treecarbon_core::parameters::ModelParameters;
use treecarbon_core::FloatValue;

/// Carbon held by a stand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarbonStock {
    /// unit: t C
    pub carbon_tonnes: FloatValue,
    /// unit: t CO2
    pub co2_equivalent_tonnes: FloatValue,
}

/// Linear biomass to carbon conversion.
///
/// $$ C = (AGB + BGB) \times f_C $$
/// $$ CO_2e = C \times \frac{44}{12} $$
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarbonConverter {
    parameters: ModelParameters,
}

impl Default for CarbonConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl CarbonConverter {
    pub fn new() -> Self {
        Self::from_parameters(ModelParameters::default())
    }

    pub fn from_parameters(parameters: ModelParameters) -> Self {
        Self { parameters }
    }

    /// Carbon (t C) in a stand's dry biomass (t).
    pub fn carbon_tonnes(&self, agb_tonnes: FloatValue, bgb_tonnes: FloatValue) -> FloatValue {
        (agb_tonnes + bgb_tonnes) * self.parameters.carbon_fraction
    }

    /// CO2 mass (t) corresponding to a carbon mass (t C).
    pub fn co2_equivalent(&self, carbon_tonnes: FloatValue) -> FloatValue {
        carbon_tonnes * self.parameters.co2_per_carbon
    }

    pub fn convert(&self, agb_tonnes: FloatValue, bgb_tonnes: FloatValue) -> CarbonStock {
        let carbon_tonnes = self.carbon_tonnes(agb_tonnes, bgb_tonnes);
        CarbonStock {
            carbon_tonnes,
            co2_equivalent_tonnes: self.co2_equivalent(carbon_tonnes),
        }
    }
}
