//! Planting records.

use crate::errors::{TreeCarbonError, TreeCarbonResult};
use crate::FloatValue;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Date format accepted by [`PlantingRecord::parse`].
pub const PLANTING_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default spacing between trees when none is recorded
/// unit: m
pub const DEFAULT_SPACING_M: FloatValue = 3.0;

/// One planting event: a number of trees of one species planted on one date.
///
/// Site metadata is carried through to outputs but never used in the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantingRecord {
    /// Scientific name; must resolve in the species registry
    pub species_name: String,
    /// Number of trees planted. Signed so that bad input can be represented
    /// and rejected by [`PlantingRecord::validate`].
    pub quantity: i64,
    pub planting_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<FloatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<FloatValue>,
    /// unit: m
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing_m: Option<FloatValue>,
}

impl PlantingRecord {
    pub fn new(species_name: impl Into<String>, quantity: i64, planting_date: NaiveDate) -> Self {
        Self {
            species_name: species_name.into(),
            quantity,
            planting_date,
            location: None,
            latitude: None,
            longitude: None,
            spacing_m: None,
        }
    }

    /// Build a record from a `YYYY-MM-DD` date string.
    ///
    /// Fails with a validation error if the date is malformed. The quantity
    /// is checked later, by [`PlantingRecord::validate`].
    pub fn parse(
        species_name: impl Into<String>,
        quantity: i64,
        planting_date: &str,
    ) -> TreeCarbonResult<Self> {
        let date = NaiveDate::parse_from_str(planting_date.trim(), PLANTING_DATE_FORMAT)
            .map_err(|e| {
                TreeCarbonError::Validation(format!(
                    "malformed planting date '{planting_date}' (expected YYYY-MM-DD): {e}"
                ))
            })?;
        Ok(Self::new(species_name, quantity, date))
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_coordinates(mut self, latitude: FloatValue, longitude: FloatValue) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_spacing(mut self, spacing_m: FloatValue) -> Self {
        self.spacing_m = Some(spacing_m);
        self
    }

    /// Check the record before any projection work is done.
    ///
    /// Returns the quantity as an unsigned tree count.
    pub fn validate(&self) -> TreeCarbonResult<u64> {
        if self.species_name.trim().is_empty() {
            return Err(TreeCarbonError::Validation(
                "planting record has an empty species name".to_string(),
            ));
        }
        if self.quantity <= 0 {
            return Err(TreeCarbonError::Validation(format!(
                "quantity for '{}' must be > 0, got {}",
                self.species_name, self.quantity
            )));
        }
        Ok(self.quantity as u64)
    }

    pub fn planting_year(&self) -> i32 {
        self.planting_date.year()
    }

    /// Stand age in a calendar year; negative before the planting year.
    pub fn age_in(&self, calendar_year: i32) -> i32 {
        calendar_year - self.planting_year()
    }

    /// Spacing, falling back to [`DEFAULT_SPACING_M`].
    pub fn spacing_or_default(&self) -> FloatValue {
        self.spacing_m.unwrap_or(DEFAULT_SPACING_M)
    }
}
