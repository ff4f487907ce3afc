//! Mortality component
//!
//! Cumulative survival of a planted cohort, with denser wood lowering the
//! annual mortality rate.

use serde::{Deserialize, Serialize};
use treecarbon_core::parameters::ModelParameters;
use treecarbon_core::species::SpeciesTraits;
use treecarbon_core::FloatValue;

/// Exponential survival with a wood-density modifier and a hard floor.
///
/// $$ m = m_0 \sqrt{\rho_{ref} / \rho} $$
/// $$ S(t) = \max\left(S_{floor},\ e^{-m t}\right) $$
///
/// The floor models a fraction of every cohort persisting indefinitely. It
/// is a modelling simplification rather than a biological law.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortalityModel {
    parameters: ModelParameters,
}

impl Default for MortalityModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MortalityModel {
    pub fn new() -> Self {
        Self::from_parameters(ModelParameters::default())
    }

    pub fn from_parameters(parameters: ModelParameters) -> Self {
        Self { parameters }
    }

    /// Annual mortality rate for a species (yr⁻¹).
    pub fn annual_mortality(&self, traits: &SpeciesTraits) -> FloatValue {
        let modifier = (self.parameters.reference_density / traits.wood_density).sqrt();
        self.parameters.base_mortality * modifier
    }

    /// Fraction of the planted trees alive at `age`.
    ///
    /// 1 at or before planting, never below the survival floor.
    pub fn survival_fraction(&self, age: FloatValue, traits: &SpeciesTraits) -> FloatValue {
        if age <= 0.0 {
            return 1.0;
        }
        let survival = (-self.annual_mortality(traits) * age).exp();
        survival.max(self.parameters.survival_floor)
    }

    /// Whole trees alive at `age`. Fractions of a tree are truncated.
    pub fn surviving_trees(&self, quantity: u64, age: FloatValue, traits: &SpeciesTraits) -> u64 {
        let exact = quantity as FloatValue * self.survival_fraction(age, traits);
        exact.floor() as u64
    }
}
