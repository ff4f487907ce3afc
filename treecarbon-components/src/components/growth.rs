//! Growth component
//!
//! Projects stem diameter from stand age with a Chapman-Richards curve, and
//! tree height from diameter with the T-model height-diameter scaling.

use serde::{Deserialize, Serialize};
use treecarbon_core::parameters::{ModelParameters, SlendernessSource};
use treecarbon_core::species::SpeciesTraits;
use treecarbon_core::FloatValue;

/// Diameter and height of an average tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeDimensions {
    /// unit: m
    pub diameter_m: FloatValue,
    /// unit: m
    pub height_m: FloatValue,
}

/// Diameter and height growth.
///
/// Diameter follows a Chapman-Richards saturation curve:
/// $$ D(t) = D_{max} \left(1 - e^{-k t}\right)^{p} $$
///
/// Height follows the T-model:
/// $$ H(D) = \max\left(H_{bh},\ H_m \left(1 - e^{-a D / H_m}\right)\right) $$
///
/// Where:
/// - $D_{max}$ is the species' asymptotic diameter (m)
/// - $k$ is the species' growth-rate coefficient
/// - $p$ is the fixed shape exponent
/// - $H_m$ is the species' asymptotic height (m)
/// - $a$ is the stem slenderness
/// - $H_{bh}$ is breast height (m)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthModel {
    parameters: ModelParameters,
}

impl Default for GrowthModel {
    fn default() -> Self {
        Self::new()
    }
}

impl GrowthModel {
    /// Create a new growth model with default parameters.
    pub fn new() -> Self {
        Self::from_parameters(ModelParameters::default())
    }

    pub fn from_parameters(parameters: ModelParameters) -> Self {
        Self { parameters }
    }

    /// Diameter at breast height for a stand age.
    ///
    /// # Arguments
    ///
    /// * `age` - Stand age (years)
    /// * `traits` - Species traits
    ///
    /// # Returns
    ///
    /// Diameter in metres; 0 for `age <= 0`, never above `D_max`
    pub fn diameter(&self, age: FloatValue, traits: &SpeciesTraits) -> FloatValue {
        if age <= 0.0 {
            return 0.0;
        }
        let saturation = 1.0 - (-traits.k_growth * age).exp();
        traits.max_diameter * saturation.powf(self.parameters.shape_exponent)
    }

    /// Stem slenderness used for a species.
    pub fn slenderness(&self, traits: &SpeciesTraits) -> FloatValue {
        match self.parameters.slenderness_source {
            SlendernessSource::Fixed => self.parameters.slenderness,
            SlendernessSource::Species => {
                traits.slenderness.unwrap_or(self.parameters.slenderness)
            }
        }
    }

    /// Tree height from diameter.
    ///
    /// Below breast height a DBH-based height is meaningless, so the height is
    /// clamped up to breast height. Species whose asymptotic height is itself
    /// below breast height are clamped to `Hm` instead.
    ///
    /// # Arguments
    ///
    /// * `diameter` - Diameter at breast height (m)
    /// * `traits` - Species traits
    ///
    /// # Returns
    ///
    /// Height in metres
    pub fn height(&self, diameter: FloatValue, traits: &SpeciesTraits) -> FloatValue {
        let hm = traits.max_height;
        let a = self.slenderness(traits);
        let height = hm * (1.0 - (-a * diameter.max(0.0) / hm).exp());
        height.max(self.parameters.breast_height.min(hm))
    }

    /// Diameter and height at a stand age.
    pub fn dimensions(&self, age: FloatValue, traits: &SpeciesTraits) -> TreeDimensions {
        let diameter_m = self.diameter(age, traits);
        TreeDimensions {
            diameter_m,
            height_m: self.height(diameter_m, traits),
        }
    }
}
