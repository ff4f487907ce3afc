//! Species traits and the species registry.
//!
//! [`SpeciesTraits`] holds the biological parameters of one species;
//! [`SpeciesRegistry`] maps scientific names to traits and validates every
//! entry on insertion.

mod builtin;
mod registry;

pub use registry::SpeciesRegistry;

use crate::errors::{TreeCarbonError, TreeCarbonResult};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Biological parameters for one tree species.
///
/// Values are immutable once registered; replacing a species means
/// registering a new `SpeciesTraits` under the same name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesTraits {
    /// Scientific name, the registry key
    pub species_name: String,

    /// Common name, display only
    pub common_name: String,

    /// Asymptotic maximum height (Hm)
    /// unit: m
    #[serde(rename = "Hm")]
    pub max_height: FloatValue,

    /// Wood density (rho)
    /// unit: kg/m³
    #[serde(rename = "rho")]
    pub wood_density: FloatValue,

    /// Chapman-Richards growth-rate coefficient
    /// unit: yr⁻¹
    pub k_growth: FloatValue,

    /// Asymptotic maximum diameter at breast height
    /// unit: m
    #[serde(rename = "D_max")]
    pub max_diameter: FloatValue,

    /// Root:shoot biomass ratio (zeta), in (0, 1)
    #[serde(rename = "zeta")]
    pub root_shoot_ratio: FloatValue,

    /// Biomass expansion factor, at least 1
    pub bef: FloatValue,

    /// Species-specific T-model stem slenderness (a).
    /// Only used under `SlendernessSource::Species`.
    #[serde(default, rename = "a", skip_serializing_if = "Option::is_none")]
    pub slenderness: Option<FloatValue>,

    /// T-model crown area to sapwood area ratio (c), display only
    #[serde(default, rename = "c", skip_serializing_if = "Option::is_none")]
    pub crown_sapwood_ratio: Option<FloatValue>,

    /// Forest type or planting category, display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Native region, display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_region: Option<String>,

    /// Typical rotation age, display only
    /// unit: yr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_age: Option<u32>,
}

impl SpeciesTraits {
    /// Create traits with the six model parameters and no metadata.
    ///
    /// Argument order follows the conventional `Hm, rho, k, D_max, zeta, bef`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        species_name: impl Into<String>,
        common_name: impl Into<String>,
        max_height: FloatValue,
        wood_density: FloatValue,
        k_growth: FloatValue,
        max_diameter: FloatValue,
        root_shoot_ratio: FloatValue,
        bef: FloatValue,
    ) -> Self {
        Self {
            species_name: species_name.into(),
            common_name: common_name.into(),
            max_height,
            wood_density,
            k_growth,
            max_diameter,
            root_shoot_ratio,
            bef,
            slenderness: None,
            crown_sapwood_ratio: None,
            category: None,
            native_region: None,
            rotation_age: None,
        }
    }

    /// Attach T-model crown parameters `a` and `c`.
    pub fn with_crown(mut self, slenderness: FloatValue, crown_sapwood_ratio: FloatValue) -> Self {
        self.slenderness = Some(slenderness);
        self.crown_sapwood_ratio = Some(crown_sapwood_ratio);
        self
    }

    /// Attach display metadata.
    pub fn with_metadata(mut self, category: impl Into<String>, rotation_age: u32) -> Self {
        self.category = Some(category.into());
        self.rotation_age = Some(rotation_age);
        self
    }

    /// Attach the native region.
    pub fn with_native_region(mut self, region: impl Into<String>) -> Self {
        self.native_region = Some(region.into());
        self
    }

    /// Check the domain constraints on every model parameter.
    ///
    /// `Hm > 0`, `rho > 0`, `k_growth > 0`, `D_max > 0`, `0 < zeta < 1`, `bef >= 1`,
    /// and `a > 0` when present.
    pub fn validate(&self) -> TreeCarbonResult<()> {
        let fail = |detail: String| {
            Err(TreeCarbonError::Configuration(format!(
                "species '{}': {detail}",
                self.species_name
            )))
        };

        if self.species_name.trim().is_empty() {
            return Err(TreeCarbonError::Configuration(
                "species name must not be empty".to_string(),
            ));
        }

        let positive = [
            ("Hm", self.max_height),
            ("rho", self.wood_density),
            ("k_growth", self.k_growth),
            ("D_max", self.max_diameter),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return fail(format!("{name} must be > 0, got {value}"));
            }
        }

        if !(self.root_shoot_ratio > 0.0 && self.root_shoot_ratio < 1.0) {
            return fail(format!(
                "zeta must be in (0, 1), got {}",
                self.root_shoot_ratio
            ));
        }
        if !(self.bef.is_finite() && self.bef >= 1.0) {
            return fail(format!("bef must be >= 1, got {}", self.bef));
        }
        if let Some(a) = self.slenderness {
            if !(a.is_finite() && a > 0.0) {
                return fail(format!("a must be > 0, got {a}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teak() -> SpeciesTraits {
        SpeciesTraits::new("Tectona grandis", "Teak", 35.0, 550.0, 0.06, 0.9, 0.21, 1.46)
    }

    #[test]
    fn test_valid_traits() {
        assert!(teak().validate().is_ok());
        assert!(teak().with_crown(45.0, 280.0).validate().is_ok());
    }

    #[test]
    fn test_domain_violations() {
        let cases = [
            SpeciesTraits {
                max_height: 0.0,
                ..teak()
            },
            SpeciesTraits {
                wood_density: -550.0,
                ..teak()
            },
            SpeciesTraits {
                k_growth: 0.0,
                ..teak()
            },
            SpeciesTraits {
                max_diameter: FloatValue::NAN,
                ..teak()
            },
            SpeciesTraits {
                root_shoot_ratio: 1.0,
                ..teak()
            },
            SpeciesTraits {
                root_shoot_ratio: 0.0,
                ..teak()
            },
            SpeciesTraits {
                bef: 0.9,
                ..teak()
            },
            teak().with_crown(0.0, 280.0),
            SpeciesTraits {
                species_name: "  ".to_string(),
                ..teak()
            },
        ];

        for traits in cases {
            let result = traits.validate();
            assert!(
                matches!(result, Err(TreeCarbonError::Configuration(_))),
                "expected configuration error for {:?}",
                traits
            );
        }
    }

    #[test]
    fn test_bef_of_one_is_allowed() {
        let traits = SpeciesTraits { bef: 1.0, ..teak() };
        assert!(traits.validate().is_ok());
    }

    #[test]
    fn test_serialised_field_names() {
        let value = serde_json::to_value(teak().with_metadata("Plantation", 50)).unwrap();
        assert_eq!(value["Hm"], 35.0);
        assert_eq!(value["rho"], 550.0);
        assert_eq!(value["D_max"], 0.9);
        assert_eq!(value["zeta"], 0.21);
        assert_eq!(value["rotation_age"], 50);
        assert!(value.get("a").is_none());
    }
}
