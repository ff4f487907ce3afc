//! Model Parameters
//!
//! Every fixed constant used by the growth, mortality, biomass and carbon
//! components lives in [`ModelParameters`], so recalibrating the model is a
//! one-place edit. Species-specific values live in
//! [`SpeciesTraits`](crate::species::SpeciesTraits) instead.
//!
//! # Reference
//!
//! - Chapman-Richards diameter growth with a fixed shape exponent
//! - T-model height scaling (Li et al. 2014, Plant-FATE)
//! - Chave et al. (2014) pantropical allometry
//! - IPCC default carbon fraction of dry biomass

use crate::errors::{TreeCarbonError, TreeCarbonResult};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Where the T-model stem slenderness `a` comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SlendernessSource {
    /// Always use [`ModelParameters::slenderness`].
    #[default]
    Fixed,
    /// Use the species' own `slenderness` trait when it has one,
    /// falling back to [`ModelParameters::slenderness`].
    Species,
}

/// Fixed constants of the projection model.
///
/// # Formulas
///
/// Diameter (Chapman-Richards):
/// $$D(t) = D_{max} (1 - e^{-k t})^{p}$$
///
/// Height (T-model):
/// $$H(D) = \max(H_{bh}, H_m (1 - e^{-a D / H_m}))$$
///
/// Survival:
/// $$S(t) = \max(S_{floor}, e^{-m_0 \sqrt{\rho_{ref}/\rho}\, t})$$
///
/// Carbon:
/// $$C = (AGB + BGB) \times f_C, \quad CO_2e = C \times r_{CO_2}$$
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    /// Chapman-Richards shape exponent (p)
    /// unit: dimensionless
    /// default: 1.3
    pub shape_exponent: FloatValue,

    /// T-model stem slenderness (a)
    /// unit: dimensionless
    /// default: 50.0
    pub slenderness: FloatValue,

    /// Whether species may override the stem slenderness
    /// default: fixed
    pub slenderness_source: SlendernessSource,

    /// Breast height, the lower clamp on modelled tree height
    /// unit: m
    /// default: 1.3
    pub breast_height: FloatValue,

    /// Base annual mortality rate at the reference wood density (m0)
    /// unit: yr⁻¹
    /// default: 0.02
    pub base_mortality: FloatValue,

    /// Reference wood density for the mortality modifier
    /// unit: kg/m³
    /// default: 600.0
    pub reference_density: FloatValue,

    /// Fraction of a cohort that always survives
    /// unit: dimensionless
    /// default: 0.10
    pub survival_floor: FloatValue,

    /// Stem form (taper) factor applied to the cylinder volume
    /// unit: dimensionless
    /// default: 0.42
    pub form_factor: FloatValue,

    /// Coefficient of the Chave et al. pantropical equation
    /// unit: kg
    /// default: 0.0673
    pub chave_coefficient: FloatValue,

    /// Exponent of the Chave et al. pantropical equation
    /// unit: dimensionless
    /// default: 0.976
    pub chave_exponent: FloatValue,

    /// Carbon content of dry biomass
    /// unit: dimensionless
    /// default: 0.47
    pub carbon_fraction: FloatValue,

    /// Mass ratio of CO2 to C (44/12)
    /// unit: dimensionless
    /// default: 3.67
    pub co2_per_carbon: FloatValue,

    /// Shortest projection horizon
    /// unit: yr
    /// default: 1
    pub min_horizon_years: u32,

    /// Longest projection horizon
    /// unit: yr
    /// default: 100
    pub max_horizon_years: u32,

    /// Horizon used when the caller does not ask for one
    /// unit: yr
    /// default: 40
    pub default_horizon_years: u32,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            // Growth
            shape_exponent: 1.3,
            slenderness: 50.0,
            slenderness_source: SlendernessSource::Fixed,
            breast_height: 1.3,

            // Mortality
            base_mortality: 0.02,
            reference_density: 600.0,
            survival_floor: 0.10,

            // Biomass
            form_factor: 0.42,
            chave_coefficient: 0.0673,
            chave_exponent: 0.976,

            // Carbon
            carbon_fraction: 0.47,
            co2_per_carbon: 3.67,

            // Horizon
            min_horizon_years: 1,
            max_horizon_years: 100,
            default_horizon_years: 40,
        }
    }
}

impl ModelParameters {
    /// Parse parameters from a TOML document.
    ///
    /// Keys that are absent keep their default values. The result is validated.
    pub fn from_toml_str(document: &str) -> TreeCarbonResult<Self> {
        let parameters: Self = toml::from_str(document)
            .map_err(|e| TreeCarbonError::Configuration(format!("model parameters: {e}")))?;
        parameters.validate()?;
        Ok(parameters)
    }

    /// Check that every constant lies inside its domain.
    pub fn validate(&self) -> TreeCarbonResult<()> {
        let positive = [
            ("shape_exponent", self.shape_exponent),
            ("slenderness", self.slenderness),
            ("breast_height", self.breast_height),
            ("reference_density", self.reference_density),
            ("form_factor", self.form_factor),
            ("chave_coefficient", self.chave_coefficient),
            ("chave_exponent", self.chave_exponent),
            ("co2_per_carbon", self.co2_per_carbon),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TreeCarbonError::Configuration(format!(
                    "{name} must be a positive finite number, got {value}"
                )));
            }
        }

        if !(self.base_mortality.is_finite() && self.base_mortality >= 0.0) {
            return Err(TreeCarbonError::Configuration(format!(
                "base_mortality must be non-negative, got {}",
                self.base_mortality
            )));
        }
        if !(0.0..1.0).contains(&self.survival_floor) {
            return Err(TreeCarbonError::Configuration(format!(
                "survival_floor must be in [0, 1), got {}",
                self.survival_floor
            )));
        }
        if !(self.carbon_fraction > 0.0 && self.carbon_fraction <= 1.0) {
            return Err(TreeCarbonError::Configuration(format!(
                "carbon_fraction must be in (0, 1], got {}",
                self.carbon_fraction
            )));
        }
        if self.min_horizon_years == 0 || self.min_horizon_years > self.max_horizon_years {
            return Err(TreeCarbonError::Configuration(format!(
                "horizon bounds must satisfy 1 <= min <= max, got [{}, {}]",
                self.min_horizon_years, self.max_horizon_years
            )));
        }
        if !(self.min_horizon_years..=self.max_horizon_years)
            .contains(&self.default_horizon_years)
        {
            return Err(TreeCarbonError::Configuration(format!(
                "default_horizon_years {} outside [{}, {}]",
                self.default_horizon_years, self.min_horizon_years, self.max_horizon_years
            )));
        }
        Ok(())
    }

    /// Clamp a requested horizon into `[min_horizon_years, max_horizon_years]`.
    ///
    /// Returns the clamped value and whether clamping changed it.
    pub fn clamp_horizon(&self, requested: i64) -> (u32, bool) {
        let min = i64::from(self.min_horizon_years);
        let max = i64::from(self.max_horizon_years);
        let clamped = requested.clamp(min, max);
        // Lies within the u32 bounds above
        (clamped as u32, clamped != requested)
    }
}
