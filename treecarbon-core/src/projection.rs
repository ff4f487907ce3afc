//! Projection outputs.
//!
//! A [`ProjectionRow`] is the state of one planting (or of a whole portfolio)
//! in one year. A [`ProjectionSeries`] is the ordered run of rows for a single
//! planting record. Both are immutable once built; a changed input means a
//! fresh projection.

use crate::planting::PlantingRecord;
use crate::FloatValue;
use chrono::{Duration, NaiveDate};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Days per projection year when stamping anniversary dates.
const DAYS_PER_YEAR: i64 = 365;

/// One year of a projection.
///
/// Field names are the column names used by file exporters and charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    /// Stand age (single-record series) or calendar year (portfolio rows)
    pub year: i32,
    /// Stand age in whole years; 0 for a planting that is not yet active
    pub age_years: u32,
    /// unit: cm
    pub dbh_cm: FloatValue,
    /// unit: m
    pub height_m: FloatValue,
    pub surviving_trees: u64,
    /// Surviving fraction of the planted trees
    pub survival_rate: FloatValue,
    /// unit: kg
    pub agb_kg_per_tree: FloatValue,
    /// unit: kg
    pub bgb_kg_per_tree: FloatValue,
    /// unit: t
    pub total_agb_tonnes: FloatValue,
    /// unit: t
    pub total_bgb_tonnes: FloatValue,
    /// AGB + BGB
    /// unit: t
    pub total_biomass_tonnes: FloatValue,
    /// unit: t C
    pub total_carbon_tonnes: FloatValue,
    /// unit: t CO2
    pub co2_equivalent_tonnes: FloatValue,
}

impl ProjectionRow {
    /// A row with nothing in it, used for plantings that are not active yet.
    pub fn zero(year: i32) -> Self {
        Self {
            year,
            age_years: 0,
            dbh_cm: 0.0,
            height_m: 0.0,
            surviving_trees: 0,
            survival_rate: 0.0,
            agb_kg_per_tree: 0.0,
            bgb_kg_per_tree: 0.0,
            total_agb_tonnes: 0.0,
            total_bgb_tonnes: 0.0,
            total_biomass_tonnes: 0.0,
            total_carbon_tonnes: 0.0,
            co2_equivalent_tonnes: 0.0,
        }
    }

    /// Whether the row describes a planting that has reached age 1.
    pub fn is_active(&self) -> bool {
        self.age_years >= 1
    }

    /// Read a numeric field by name.
    pub fn get(&self, field: ProjectionField) -> FloatValue {
        match field {
            ProjectionField::Year => self.year as FloatValue,
            ProjectionField::AgeYears => self.age_years as FloatValue,
            ProjectionField::DbhCm => self.dbh_cm,
            ProjectionField::HeightM => self.height_m,
            ProjectionField::SurvivingTrees => self.surviving_trees as FloatValue,
            ProjectionField::SurvivalRate => self.survival_rate,
            ProjectionField::AgbKgPerTree => self.agb_kg_per_tree,
            ProjectionField::BgbKgPerTree => self.bgb_kg_per_tree,
            ProjectionField::TotalAgbTonnes => self.total_agb_tonnes,
            ProjectionField::TotalBgbTonnes => self.total_bgb_tonnes,
            ProjectionField::TotalBiomassTonnes => self.total_biomass_tonnes,
            ProjectionField::TotalCarbonTonnes => self.total_carbon_tonnes,
            ProjectionField::Co2EquivalentTonnes => self.co2_equivalent_tonnes,
        }
    }
}

/// Selector for one column of a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionField {
    Year,
    AgeYears,
    DbhCm,
    HeightM,
    SurvivingTrees,
    SurvivalRate,
    AgbKgPerTree,
    BgbKgPerTree,
    TotalAgbTonnes,
    TotalBgbTonnes,
    TotalBiomassTonnes,
    TotalCarbonTonnes,
    Co2EquivalentTonnes,
}

impl ProjectionField {
    pub const ALL: [ProjectionField; 13] = [
        ProjectionField::Year,
        ProjectionField::AgeYears,
        ProjectionField::DbhCm,
        ProjectionField::HeightM,
        ProjectionField::SurvivingTrees,
        ProjectionField::SurvivalRate,
        ProjectionField::AgbKgPerTree,
        ProjectionField::BgbKgPerTree,
        ProjectionField::TotalAgbTonnes,
        ProjectionField::TotalBgbTonnes,
        ProjectionField::TotalBiomassTonnes,
        ProjectionField::TotalCarbonTonnes,
        ProjectionField::Co2EquivalentTonnes,
    ];

    /// Column name as written by exporters.
    pub fn column_name(&self) -> &'static str {
        match self {
            ProjectionField::Year => "year",
            ProjectionField::AgeYears => "age_years",
            ProjectionField::DbhCm => "dbh_cm",
            ProjectionField::HeightM => "height_m",
            ProjectionField::SurvivingTrees => "surviving_trees",
            ProjectionField::SurvivalRate => "survival_rate",
            ProjectionField::AgbKgPerTree => "agb_kg_per_tree",
            ProjectionField::BgbKgPerTree => "bgb_kg_per_tree",
            ProjectionField::TotalAgbTonnes => "total_agb_tonnes",
            ProjectionField::TotalBgbTonnes => "total_bgb_tonnes",
            ProjectionField::TotalBiomassTonnes => "total_biomass_tonnes",
            ProjectionField::TotalCarbonTonnes => "total_carbon_tonnes",
            ProjectionField::Co2EquivalentTonnes => "co2_equivalent_tonnes",
        }
    }
}

/// Totals at the last year of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub final_year: i32,
    pub surviving_trees: u64,
    pub survival_rate: FloatValue,
    pub dbh_cm: FloatValue,
    pub height_m: FloatValue,
    /// AGB + BGB of one tree
    /// unit: kg
    pub biomass_kg_per_tree: FloatValue,
    pub total_biomass_tonnes: FloatValue,
    pub total_carbon_tonnes: FloatValue,
    pub co2_equivalent_tonnes: FloatValue,
}

/// Ordered rows for one planting record, one per year of the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSeries {
    record: PlantingRecord,
    rows: Vec<ProjectionRow>,
}

impl ProjectionSeries {
    /// Wrap rows produced for `record`.
    ///
    /// Rows must be in strictly increasing `year` order with no gaps.
    pub fn new(record: PlantingRecord, rows: Vec<ProjectionRow>) -> Self {
        debug_assert!(
            rows.windows(2).all(|w| w[1].year == w[0].year + 1),
            "projection rows must be consecutive years"
        );
        Self { record, rows }
    }

    pub fn record(&self) -> &PlantingRecord {
        &self.record
    }

    pub fn rows(&self) -> &[ProjectionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&ProjectionRow> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&ProjectionRow> {
        self.rows.last()
    }

    /// Row for a given `year` value.
    pub fn row(&self, year: i32) -> Option<&ProjectionRow> {
        let first = self.rows.first()?.year;
        let index = usize::try_from(year - first).ok()?;
        self.rows.get(index)
    }

    /// Anniversary date of a stand age, counted as 365-day years from planting.
    pub fn anniversary_date(&self, age_years: u32) -> Option<NaiveDate> {
        self.record
            .planting_date
            .checked_add_signed(Duration::days(DAYS_PER_YEAR * i64::from(age_years)))
    }

    /// One field across all rows, in year order.
    pub fn column(&self, field: ProjectionField) -> Array1<FloatValue> {
        self.rows.iter().map(|row| row.get(field)).collect()
    }

    pub fn summary(&self) -> Option<SeriesSummary> {
        self.last().map(|row| SeriesSummary {
            final_year: row.year,
            surviving_trees: row.surviving_trees,
            survival_rate: row.survival_rate,
            dbh_cm: row.dbh_cm,
            height_m: row.height_m,
            biomass_kg_per_tree: row.agb_kg_per_tree + row.bgb_kg_per_tree,
            total_biomass_tonnes: row.total_biomass_tonnes,
            total_carbon_tonnes: row.total_carbon_tonnes,
            co2_equivalent_tonnes: row.co2_equivalent_tonnes,
        })
    }
}

impl<'a> IntoIterator for &'a ProjectionSeries {
    type Item = &'a ProjectionRow;
    type IntoIter = std::slice::Iter<'a, ProjectionRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    fn row(year: i32, carbon: FloatValue) -> ProjectionRow {
        ProjectionRow {
            age_years: year as u32,
            dbh_cm: 2.0 * year as FloatValue,
            surviving_trees: 100 - year as u64,
            survival_rate: 1.0 - 0.01 * year as FloatValue,
            agb_kg_per_tree: 10.0,
            bgb_kg_per_tree: 2.5,
            total_biomass_tonnes: carbon / 0.47,
            total_carbon_tonnes: carbon,
            co2_equivalent_tonnes: carbon * 3.67,
            ..ProjectionRow::zero(year)
        }
    }

    fn series() -> ProjectionSeries {
        let record = PlantingRecord::parse("Tectona grandis", 100, "2025-01-01").unwrap();
        ProjectionSeries::new(record, (1..=5).map(|y| row(y, y as FloatValue)).collect())
    }

    #[test]
    fn test_zero_row_is_inactive() {
        let zero = ProjectionRow::zero(2030);
        assert_eq!(zero.year, 2030);
        assert!(!zero.is_active());
        assert_eq!(zero.surviving_trees, 0);
        assert!(row(1, 1.0).is_active());
    }

    #[test]
    fn test_row_lookup() {
        let series = series();
        assert_eq!(series.len(), 5);
        assert_eq!(series.row(3).map(|r| r.year), Some(3));
        assert!(series.row(0).is_none());
        assert!(series.row(6).is_none());
    }

    #[test]
    fn test_column() {
        let carbon = series().column(ProjectionField::TotalCarbonTonnes);
        assert_eq!(carbon.len(), 5);
        assert!(is_close!(carbon[4], 5.0));
        assert!(is_close!(carbon.sum(), 15.0));

        let trees = series().column(ProjectionField::SurvivingTrees);
        assert!(is_close!(trees[0], 99.0));
    }

    #[test]
    fn test_anniversary_date() {
        let series = series();
        assert_eq!(
            series.anniversary_date(1),
            NaiveDate::from_ymd_opt(2026, 1, 1)
        );
        // 2028 is a leap year so 365-day steps drift by a day
        assert_eq!(
            series.anniversary_date(4),
            NaiveDate::from_ymd_opt(2028, 12, 31)
        );
    }

    #[test]
    fn test_summary() {
        let summary = series().summary().unwrap();
        assert_eq!(summary.final_year, 5);
        assert_eq!(summary.surviving_trees, 95);
        assert!(is_close!(summary.biomass_kg_per_tree, 12.5));
        assert!(is_close!(summary.co2_equivalent_tonnes, 5.0 * 3.67));
    }

    #[test]
    fn test_column_names_match_serialised_fields() {
        let value = serde_json::to_value(row(1, 1.0)).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), ProjectionField::ALL.len());
        for field in ProjectionField::ALL {
            assert!(
                object.contains_key(field.column_name()),
                "missing column {}",
                field.column_name()
            );
        }
    }
}
