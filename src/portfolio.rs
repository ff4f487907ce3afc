//! Portfolio aggregation
//!
//! Combines plantings of different species, sizes and planting dates into
//! one calendar-year series. Each record's stand age is derived fresh for
//! every calendar year as `calendar_year - planting_year`; a record that has
//! not reached age 1 contributes a zero row.
//!
//! Aggregation is best-effort: a record that fails validation or species
//! lookup is reported in [`Portfolio::failures`] and the rest of the
//! portfolio is still projected.

use crate::engine::ProjectionEngine;
use log::warn;
use rayon::prelude::*;
use serde::Serialize;
use treecarbon_core::errors::{TreeCarbonError, TreeCarbonResult};
use treecarbon_core::parameters::ModelParameters;
use treecarbon_core::planting::PlantingRecord;
use treecarbon_core::projection::{ProjectionRow, ProjectionSeries};
use treecarbon_core::species::{SpeciesRegistry, SpeciesTraits};
use treecarbon_core::FloatValue;

/// Calendar-year rows for one planting record within a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSeries {
    /// Position of the record in the input list
    pub record_index: usize,
    /// Rows indexed by calendar year
    pub series: ProjectionSeries,
}

/// A record that could not be projected.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFailure {
    /// Position of the record in the input list
    pub record_index: usize,
    pub species_name: String,
    pub error: TreeCarbonError,
}

/// Time-aligned projection of several plantings.
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    calendar_years: Vec<i32>,
    aggregate: Vec<ProjectionRow>,
    breakdown: Vec<RecordSeries>,
    failures: Vec<RecordFailure>,
}

impl Portfolio {
    pub fn calendar_years(&self) -> &[i32] {
        &self.calendar_years
    }

    /// Summed rows, one per calendar year.
    pub fn aggregate(&self) -> &[ProjectionRow] {
        &self.aggregate
    }

    /// Per-record rows for every record that was projected, in input order.
    pub fn breakdown(&self) -> &[RecordSeries] {
        &self.breakdown
    }

    pub fn failures(&self) -> &[RecordFailure] {
        &self.failures
    }

    /// Whether every input record was projected.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fail with the first record error if the portfolio is partial.
    pub fn require_complete(self) -> TreeCarbonResult<Self> {
        match self.failures.first() {
            Some(failure) => Err(failure.error.clone()),
            None => Ok(self),
        }
    }

    fn year_index(&self, calendar_year: i32) -> Option<usize> {
        let first = *self.calendar_years.first()?;
        let index = usize::try_from(calendar_year - first).ok()?;
        (index < self.calendar_years.len()).then_some(index)
    }

    /// Aggregate row for a calendar year.
    pub fn row_for_year(&self, calendar_year: i32) -> Option<&ProjectionRow> {
        self.aggregate.get(self.year_index(calendar_year)?)
    }

    /// Per-record rows for a calendar year, keyed by input index.
    pub fn record_rows_for_year(&self, calendar_year: i32) -> Vec<(usize, &ProjectionRow)> {
        match self.year_index(calendar_year) {
            Some(index) => self
                .breakdown
                .iter()
                .map(|entry| (entry.record_index, &entry.series.rows()[index]))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Trees planted across every projected record.
    pub fn total_planted(&self) -> u64 {
        self.breakdown
            .iter()
            .map(|entry| entry.series.record().quantity.max(0) as u64)
            .sum()
    }
}

/// Running totals for one calendar year.
struct RowAccumulator {
    year: i32,
    oldest_age: u32,
    planted: u64,
    surviving: u64,
    // Tree-weighted sums for the non-additive per-tree fields
    dbh_weighted: FloatValue,
    height_weighted: FloatValue,
    agb_tonnes: FloatValue,
    bgb_tonnes: FloatValue,
    carbon_tonnes: FloatValue,
    co2_tonnes: FloatValue,
}

impl RowAccumulator {
    fn new(year: i32) -> Self {
        Self {
            year,
            oldest_age: 0,
            planted: 0,
            surviving: 0,
            dbh_weighted: 0.0,
            height_weighted: 0.0,
            agb_tonnes: 0.0,
            bgb_tonnes: 0.0,
            carbon_tonnes: 0.0,
            co2_tonnes: 0.0,
        }
    }

    fn add(&mut self, row: &ProjectionRow, planted: u64) {
        if !row.is_active() {
            return;
        }
        let trees = row.surviving_trees as FloatValue;
        self.oldest_age = self.oldest_age.max(row.age_years);
        self.planted += planted;
        self.surviving += row.surviving_trees;
        self.dbh_weighted += row.dbh_cm * trees;
        self.height_weighted += row.height_m * trees;
        self.agb_tonnes += row.total_agb_tonnes;
        self.bgb_tonnes += row.total_bgb_tonnes;
        self.carbon_tonnes += row.total_carbon_tonnes;
        self.co2_tonnes += row.co2_equivalent_tonnes;
    }

    fn finish(self) -> ProjectionRow {
        let trees = self.surviving as FloatValue;
        let per_tree = |total: FloatValue| {
            if self.surviving > 0 {
                total / trees
            } else {
                0.0
            }
        };
        let survival_rate = if self.planted > 0 {
            trees / self.planted as FloatValue
        } else {
            0.0
        };

        ProjectionRow {
            year: self.year,
            age_years: self.oldest_age,
            dbh_cm: per_tree(self.dbh_weighted),
            height_m: per_tree(self.height_weighted),
            surviving_trees: self.surviving,
            survival_rate,
            agb_kg_per_tree: per_tree(self.agb_tonnes * 1000.0),
            bgb_kg_per_tree: per_tree(self.bgb_tonnes * 1000.0),
            total_agb_tonnes: self.agb_tonnes,
            total_bgb_tonnes: self.bgb_tonnes,
            total_biomass_tonnes: self.agb_tonnes + self.bgb_tonnes,
            total_carbon_tonnes: self.carbon_tonnes,
            co2_equivalent_tonnes: self.co2_tonnes,
        }
    }
}

/// Projects many planting records onto a shared calendar.
#[derive(Debug, Clone)]
pub struct PortfolioAggregator<'a> {
    engine: ProjectionEngine<'a>,
}

impl<'a> PortfolioAggregator<'a> {
    /// Create an aggregator with default model parameters.
    pub fn new(registry: &'a SpeciesRegistry) -> Self {
        Self::from_engine(ProjectionEngine::new(registry))
    }

    pub fn with_parameters(
        registry: &'a SpeciesRegistry,
        parameters: ModelParameters,
    ) -> TreeCarbonResult<Self> {
        Ok(Self::from_engine(ProjectionEngine::with_parameters(
            registry, parameters,
        )?))
    }

    pub fn from_engine(engine: ProjectionEngine<'a>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ProjectionEngine<'a> {
        &self.engine
    }

    /// Project `records` over `horizon_years` calendar years.
    ///
    /// The calendar starts at `start_calendar_year`, or by default the year
    /// after the earliest planting. The horizon is clamped like a single
    /// projection. Fails only when there is no way to anchor the calendar;
    /// per-record problems are collected in [`Portfolio::failures`].
    pub fn aggregate(
        &self,
        records: &[PlantingRecord],
        horizon_years: i64,
        start_calendar_year: Option<i32>,
    ) -> TreeCarbonResult<Portfolio> {
        let horizon = self.engine.clamp_horizon(horizon_years);
        let start = match start_calendar_year {
            Some(year) => year,
            None => default_start_year(records)?,
        };
        let calendar_years: Vec<i32> = (0..horizon as i32).map(|offset| start + offset).collect();

        let outcomes: Vec<Result<RecordSeries, RecordFailure>> = records
            .par_iter()
            .enumerate()
            .map(|(record_index, record)| {
                self.project_record(record, &calendar_years)
                    .map(|series| RecordSeries {
                        record_index,
                        series,
                    })
                    .map_err(|error| RecordFailure {
                        record_index,
                        species_name: record.species_name.clone(),
                        error,
                    })
            })
            .collect();

        let mut breakdown = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(entry) => breakdown.push(entry),
                Err(failure) => {
                    warn!(
                        "Skipping planting record {} ('{}'): {}",
                        failure.record_index, failure.species_name, failure.error
                    );
                    failures.push(failure);
                }
            }
        }

        let aggregate = calendar_years
            .iter()
            .enumerate()
            .map(|(index, &year)| {
                let mut totals = RowAccumulator::new(year);
                for entry in &breakdown {
                    let planted = entry.series.record().quantity.max(0) as u64;
                    totals.add(&entry.series.rows()[index], planted);
                }
                totals.finish()
            })
            .collect();

        Ok(Portfolio {
            calendar_years,
            aggregate,
            breakdown,
            failures,
        })
    }

    fn project_record(
        &self,
        record: &PlantingRecord,
        calendar_years: &[i32],
    ) -> TreeCarbonResult<ProjectionSeries> {
        let (quantity, traits) = self.engine.resolve(record)?;
        let rows = calendar_years
            .iter()
            .map(|&year| self.record_row(record, traits, quantity, year))
            .collect();
        Ok(ProjectionSeries::new(record.clone(), rows))
    }

    fn record_row(
        &self,
        record: &PlantingRecord,
        traits: &SpeciesTraits,
        quantity: u64,
        calendar_year: i32,
    ) -> ProjectionRow {
        let age = record.age_in(calendar_year);
        if age < 1 {
            return ProjectionRow::zero(calendar_year);
        }
        self.engine
            .row_at_age(traits, quantity, age as u32, calendar_year)
    }
}

fn default_start_year(records: &[PlantingRecord]) -> TreeCarbonResult<i32> {
    records
        .iter()
        .map(PlantingRecord::planting_year)
        .min()
        .map(|year| year + 1)
        .ok_or_else(|| {
            TreeCarbonError::Validation(
                "cannot anchor a portfolio calendar without planting records".to_string(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    fn record(species: &str, quantity: i64, date: &str) -> PlantingRecord {
        PlantingRecord::parse(species, quantity, date).unwrap()
    }

    #[test]
    fn test_default_start_is_year_after_earliest_planting() {
        let registry = SpeciesRegistry::builtin();
        let aggregator = PortfolioAggregator::new(&registry);
        let records = vec![
            record("Tectona grandis", 100, "2022-03-01"),
            record("Populus deltoides", 100, "2020-11-15"),
        ];
        let portfolio = aggregator.aggregate(&records, 10, None).unwrap();
        assert_eq!(portfolio.calendar_years().first(), Some(&2021));
        assert_eq!(portfolio.calendar_years().last(), Some(&2030));
        assert_eq!(portfolio.aggregate().len(), 10);
    }

    #[test]
    fn test_inactive_records_contribute_zero_rows() {
        let registry = SpeciesRegistry::builtin();
        let aggregator = PortfolioAggregator::new(&registry);
        let records = vec![
            record("Tectona grandis", 100, "2020-01-01"),
            record("Tectona grandis", 100, "2025-06-30"),
        ];
        let portfolio = aggregator.aggregate(&records, 10, Some(2021)).unwrap();

        let late = &portfolio.breakdown()[1].series;
        for year in 2021..=2025 {
            assert_eq!(late.row(year), Some(&ProjectionRow::zero(year)));
        }
        assert_eq!(late.row(2026).unwrap().age_years, 1);

        // Before the second planting is active, the aggregate is the first record
        let first = portfolio.breakdown()[0].series.row(2023).unwrap();
        let aggregate = portfolio.row_for_year(2023).unwrap();
        assert_eq!(aggregate.surviving_trees, first.surviving_trees);
        assert_eq!(aggregate.age_years, 3);
        assert!(is_close!(aggregate.total_carbon_tonnes, first.total_carbon_tonnes));
        assert!(is_close!(aggregate.dbh_cm, first.dbh_cm));
        assert!(is_close!(aggregate.agb_kg_per_tree, first.agb_kg_per_tree));
        assert!(is_close!(
            aggregate.survival_rate,
            first.surviving_trees as FloatValue / 100.0
        ));
    }

    #[test]
    fn test_survival_rate_is_ratio_of_totals() {
        let registry = SpeciesRegistry::builtin();
        let aggregator = PortfolioAggregator::new(&registry);
        let records = vec![
            record("Populus deltoides", 10, "2020-01-01"),
            record("Tamarindus indica", 10_000, "2020-01-01"),
        ];
        let portfolio = aggregator.aggregate(&records, 30, None).unwrap();

        for row in portfolio.aggregate() {
            let expected = row.surviving_trees as FloatValue / 10_010.0;
            assert!(is_close!(row.survival_rate, expected));
        }
    }

    #[test]
    fn test_empty_portfolio_needs_anchor() {
        let registry = SpeciesRegistry::builtin();
        let aggregator = PortfolioAggregator::new(&registry);

        let err = aggregator.aggregate(&[], 40, None).unwrap_err();
        assert!(matches!(err, TreeCarbonError::Validation(_)));

        let portfolio = aggregator.aggregate(&[], 5, Some(2030)).unwrap();
        assert_eq!(portfolio.aggregate().len(), 5);
        assert!(portfolio
            .aggregate()
            .iter()
            .all(|row| row.surviving_trees == 0 && row.survival_rate == 0.0));
    }

    #[test]
    fn test_require_complete() {
        let registry = SpeciesRegistry::builtin();
        let aggregator = PortfolioAggregator::new(&registry);
        let records = vec![
            record("Tectona grandis", 100, "2020-01-01"),
            record("Quercus nonexistent", 100, "2020-01-01"),
        ];
        let portfolio = aggregator.aggregate(&records, 5, None).unwrap();
        assert!(!portfolio.is_complete());
        assert_eq!(
            portfolio.require_complete().unwrap_err(),
            TreeCarbonError::not_found("Quercus nonexistent")
        );
    }

    #[test]
    fn test_year_lookup_out_of_range() {
        let registry = SpeciesRegistry::builtin();
        let aggregator = PortfolioAggregator::new(&registry);
        let records = vec![record("Tectona grandis", 100, "2020-01-01")];
        let portfolio = aggregator.aggregate(&records, 5, None).unwrap();

        assert!(portfolio.row_for_year(2020).is_none());
        assert!(portfolio.row_for_year(2026).is_none());
        assert!(portfolio.record_rows_for_year(2030).is_empty());
        assert_eq!(portfolio.record_rows_for_year(2021).len(), 1);
        assert_eq!(portfolio.total_planted(), 100);
    }
}
