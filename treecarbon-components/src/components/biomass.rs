//! Biomass component
//!
//! Per-tree above-ground biomass (AGB) from diameter and height, averaged over
//! two independent estimators, and below-ground biomass (BGB) from the
//! species' root:shoot ratio.
//!
//! # Estimators
//!
//! 1. **Volume based**: stem volume from a tapered cylinder, converted to
//!    mass with wood density and expanded to the whole tree with the BEF.
//! 2. **Allometric**: the Chave et al. (2014) pantropical equation using
//!    wood density in g/cm³ and diameter in cm.
//!
//! Averaging the two hedges the bias of either method on its own.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use treecarbon_core::parameters::ModelParameters;
use treecarbon_core::species::SpeciesTraits;
use treecarbon_core::FloatValue;

/// Dry biomass of one tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeBiomass {
    /// unit: kg
    pub agb_kg: FloatValue,
    /// unit: kg
    pub bgb_kg: FloatValue,
}

impl TreeBiomass {
    pub fn total_kg(&self) -> FloatValue {
        self.agb_kg + self.bgb_kg
    }
}

/// Per-tree biomass estimation.
///
/// $$ V = \frac{\pi}{4} D^2 H f $$
/// $$ AGB_{vol} = V \rho \cdot BEF $$
/// $$ AGB_{chave} = c \left(\frac{\rho}{1000} D_{cm}^2 H\right)^{e} $$
/// $$ AGB = \frac{AGB_{vol} + AGB_{chave}}{2}, \quad BGB = \zeta \cdot AGB $$
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiomassEstimator {
    parameters: ModelParameters,
}

impl Default for BiomassEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl BiomassEstimator {
    pub fn new() -> Self {
        Self::from_parameters(ModelParameters::default())
    }

    pub fn from_parameters(parameters: ModelParameters) -> Self {
        Self { parameters }
    }

    /// Stem volume (m³) for diameter and height in metres.
    pub fn stem_volume(&self, diameter: FloatValue, height: FloatValue) -> FloatValue {
        (PI / 4.0) * diameter.powi(2) * height * self.parameters.form_factor
    }

    /// Volume-based AGB (kg).
    pub fn volume_agb(
        &self,
        diameter: FloatValue,
        height: FloatValue,
        traits: &SpeciesTraits,
    ) -> FloatValue {
        self.stem_volume(diameter, height) * traits.wood_density * traits.bef
    }

    /// Chave et al. pantropical AGB (kg).
    pub fn chave_agb(
        &self,
        diameter: FloatValue,
        height: FloatValue,
        traits: &SpeciesTraits,
    ) -> FloatValue {
        let density_g_cm3 = traits.wood_density / 1000.0;
        let diameter_cm = diameter * 100.0;
        let product = density_g_cm3 * diameter_cm.powi(2) * height;
        self.parameters.chave_coefficient * product.max(0.0).powf(self.parameters.chave_exponent)
    }

    /// AGB of one tree (kg), the mean of both estimators.
    pub fn agb_per_tree(
        &self,
        diameter: FloatValue,
        height: FloatValue,
        traits: &SpeciesTraits,
    ) -> FloatValue {
        (self.volume_agb(diameter, height, traits) + self.chave_agb(diameter, height, traits)) / 2.0
    }

    /// BGB of one tree (kg) from its AGB.
    pub fn bgb_per_tree(&self, agb: FloatValue, traits: &SpeciesTraits) -> FloatValue {
        agb * traits.root_shoot_ratio
    }

    pub fn estimate(
        &self,
        diameter: FloatValue,
        height: FloatValue,
        traits: &SpeciesTraits,
    ) -> TreeBiomass {
        let agb_kg = self.agb_per_tree(diameter, height, traits);
        TreeBiomass {
            agb_kg,
            bgb_kg: self.bgb_per_tree(agb_kg, traits),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn teak() -> SpeciesTraits {
        SpeciesTraits::new("Tectona grandis", "Teak", 35.0, 550.0, 0.06, 0.9, 0.21, 1.46)
    }

    #[test]
    fn test_stem_volume_of_unit_cylinder() {
        let estimator = BiomassEstimator::new();
        // 1 m diameter, 1 m tall cylinder reduced by the form factor
        assert_relative_eq!(estimator.stem_volume(1.0, 1.0), PI / 4.0 * 0.42);
    }

    #[test]
    fn test_teak_seedling_biomass() {
        let estimator = BiomassEstimator::new();
        let traits = teak();
        let d = 0.02234;
        let h = 1.3;

        assert_abs_diff_eq!(estimator.volume_agb(d, h, &traits), 0.172, epsilon = 0.002);
        assert_abs_diff_eq!(estimator.chave_agb(d, h, &traits), 0.233, epsilon = 0.002);

        let biomass = estimator.estimate(d, h, &traits);
        assert_abs_diff_eq!(biomass.agb_kg, 0.2025, epsilon = 0.002);
        assert_relative_eq!(biomass.bgb_kg, biomass.agb_kg * 0.21);
        assert_relative_eq!(biomass.total_kg(), biomass.agb_kg * 1.21);
    }

    #[test]
    fn test_zero_diameter_has_no_biomass() {
        let estimator = BiomassEstimator::new();
        let biomass = estimator.estimate(0.0, 1.3, &teak());
        assert_eq!(biomass.agb_kg, 0.0);
        assert_eq!(biomass.bgb_kg, 0.0);
    }

    #[test]
    fn test_biomass_increases_with_size() {
        let estimator = BiomassEstimator::new();
        let traits = teak();
        let small = estimator.agb_per_tree(0.1, 8.0, &traits);
        let wider = estimator.agb_per_tree(0.2, 8.0, &traits);
        let taller = estimator.agb_per_tree(0.1, 16.0, &traits);
        assert!(wider > small);
        assert!(taller > small);
    }

    #[test]
    fn test_form_factor_only_affects_volume_estimator() {
        let default = BiomassEstimator::new();
        let tapered = BiomassEstimator::from_parameters(ModelParameters {
            form_factor: 0.84,
            ..Default::default()
        });
        let traits = teak();
        assert_relative_eq!(
            tapered.volume_agb(0.3, 20.0, &traits),
            2.0 * default.volume_agb(0.3, 20.0, &traits)
        );
        assert_relative_eq!(
            tapered.chave_agb(0.3, 20.0, &traits),
            default.chave_agb(0.3, 20.0, &traits)
        );
    }
}
