//! Projection engine
//!
//! Runs the growth, mortality, biomass and carbon components in sequence for
//! each year of a planting's life, producing a [`ProjectionSeries`].

use log::{debug, warn};
use rayon::prelude::*;
use treecarbon_components::components::{
    BiomassEstimator, CarbonConverter, GrowthModel, MortalityModel,
};
use treecarbon_core::errors::TreeCarbonResult;
use treecarbon_core::parameters::ModelParameters;
use treecarbon_core::planting::PlantingRecord;
use treecarbon_core::projection::{ProjectionRow, ProjectionSeries};
use treecarbon_core::species::{SpeciesRegistry, SpeciesTraits};
use treecarbon_core::FloatValue;

/// Projects planting records year by year.
///
/// The engine borrows its species registry, so the registry cannot be
/// changed while projections are in flight.
#[derive(Debug, Clone)]
pub struct ProjectionEngine<'a> {
    registry: &'a SpeciesRegistry,
    parameters: ModelParameters,
    growth: GrowthModel,
    mortality: MortalityModel,
    biomass: BiomassEstimator,
    carbon: CarbonConverter,
}

impl<'a> ProjectionEngine<'a> {
    /// Create an engine with default model parameters.
    pub fn new(registry: &'a SpeciesRegistry) -> Self {
        Self::build(registry, ModelParameters::default())
    }

    /// Create an engine with custom model parameters.
    ///
    /// Fails with a configuration error if the parameters are out of domain.
    pub fn with_parameters(
        registry: &'a SpeciesRegistry,
        parameters: ModelParameters,
    ) -> TreeCarbonResult<Self> {
        parameters.validate()?;
        Ok(Self::build(registry, parameters))
    }

    fn build(registry: &'a SpeciesRegistry, parameters: ModelParameters) -> Self {
        Self {
            registry,
            parameters,
            growth: GrowthModel::from_parameters(parameters),
            mortality: MortalityModel::from_parameters(parameters),
            biomass: BiomassEstimator::from_parameters(parameters),
            carbon: CarbonConverter::from_parameters(parameters),
        }
    }

    pub fn registry(&self) -> &'a SpeciesRegistry {
        self.registry
    }

    pub fn parameters(&self) -> &ModelParameters {
        &self.parameters
    }

    /// Clamp a requested horizon to the allowed range, warning if it moved.
    pub fn clamp_horizon(&self, requested: i64) -> u32 {
        let (years, clamped) = self.parameters.clamp_horizon(requested);
        if clamped {
            warn!(
                "Projection horizon of {} years is outside [{}, {}]; using {} years",
                requested,
                self.parameters.min_horizon_years,
                self.parameters.max_horizon_years,
                years
            );
        }
        years
    }

    /// Validate a record and resolve its species.
    ///
    /// The quantity is checked before the species lookup, so a bad quantity is
    /// reported even for an unknown species.
    pub fn resolve(&self, record: &PlantingRecord) -> TreeCarbonResult<(u64, &'a SpeciesTraits)> {
        let quantity = record.validate()?;
        let traits = self.registry.lookup(&record.species_name)?;
        Ok((quantity, traits))
    }

    /// Project a single record for `horizon_years` years of stand age.
    ///
    /// Rows are indexed by stand age, `1..=horizon`. The horizon is clamped
    /// rather than rejected.
    pub fn project(
        &self,
        record: &PlantingRecord,
        horizon_years: i64,
    ) -> TreeCarbonResult<ProjectionSeries> {
        let (quantity, traits) = self.resolve(record)?;
        let horizon = self.clamp_horizon(horizon_years);

        debug!(
            "Projecting {} x '{}' planted {} for {} years",
            quantity, record.species_name, record.planting_date, horizon
        );

        let rows = (1..=horizon)
            .map(|age| self.row_at_age(traits, quantity, age, age as i32))
            .collect();
        Ok(ProjectionSeries::new(record.clone(), rows))
    }

    /// Project with the default horizon.
    pub fn project_default(&self, record: &PlantingRecord) -> TreeCarbonResult<ProjectionSeries> {
        self.project(record, i64::from(self.parameters.default_horizon_years))
    }

    /// Project several independent records in parallel.
    ///
    /// Results are returned in input order, one per record.
    pub fn project_many(
        &self,
        records: &[PlantingRecord],
        horizon_years: i64,
    ) -> Vec<TreeCarbonResult<ProjectionSeries>> {
        records
            .par_iter()
            .map(|record| self.project(record, horizon_years))
            .collect()
    }

    /// State of `quantity` trees of one species at stand age `age`.
    ///
    /// `year` is copied into the row unchanged, so callers choose whether rows
    /// are indexed by age or by calendar year.
    pub fn row_at_age(
        &self,
        traits: &SpeciesTraits,
        quantity: u64,
        age: u32,
        year: i32,
    ) -> ProjectionRow {
        let t = age as FloatValue;

        let dimensions = self.growth.dimensions(t, traits);
        let survival_rate = self.mortality.survival_fraction(t, traits);
        let surviving_trees = self.mortality.surviving_trees(quantity, t, traits);

        let biomass = self
            .biomass
            .estimate(dimensions.diameter_m, dimensions.height_m, traits);
        let trees = surviving_trees as FloatValue;
        let total_agb_tonnes = biomass.agb_kg * trees / 1000.0;
        let total_bgb_tonnes = biomass.bgb_kg * trees / 1000.0;

        let stock = self.carbon.convert(total_agb_tonnes, total_bgb_tonnes);

        ProjectionRow {
            year,
            age_years: age,
            dbh_cm: dimensions.diameter_m * 100.0,
            height_m: dimensions.height_m,
            surviving_trees,
            survival_rate,
            agb_kg_per_tree: biomass.agb_kg,
            bgb_kg_per_tree: biomass.bgb_kg,
            total_agb_tonnes,
            total_bgb_tonnes,
            total_biomass_tonnes: total_agb_tonnes + total_bgb_tonnes,
            total_carbon_tonnes: stock.carbon_tonnes,
            co2_equivalent_tonnes: stock.co2_equivalent_tonnes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use treecarbon_core::errors::TreeCarbonError;

    fn teak_record(quantity: i64) -> PlantingRecord {
        PlantingRecord::parse("Tectona grandis", quantity, "2025-01-01").unwrap()
    }

    #[test]
    fn test_rows_indexed_by_age() {
        let registry = SpeciesRegistry::builtin();
        let engine = ProjectionEngine::new(&registry);
        let series = engine.project(&teak_record(1000), 40).unwrap();

        assert_eq!(series.len(), 40);
        for (i, row) in series.rows().iter().enumerate() {
            assert_eq!(row.year, i as i32 + 1);
            assert_eq!(row.age_years, i as u32 + 1);
        }
    }

    #[test]
    fn test_default_horizon() {
        let registry = SpeciesRegistry::builtin();
        let engine = ProjectionEngine::new(&registry);
        let series = engine.project_default(&teak_record(10)).unwrap();
        assert_eq!(series.len(), 40);
    }

    #[test]
    fn test_horizon_clamped() {
        let registry = SpeciesRegistry::builtin();
        let engine = ProjectionEngine::new(&registry);
        assert_eq!(engine.clamp_horizon(500), 100);
        assert_eq!(engine.clamp_horizon(0), 1);
        assert_eq!(engine.project(&teak_record(10), -5).unwrap().len(), 1);
    }

    #[test]
    fn test_quantity_checked_before_lookup() {
        let registry = SpeciesRegistry::builtin();
        let engine = ProjectionEngine::new(&registry);
        let record = PlantingRecord::parse("Quercus nonexistent", 0, "2025-01-01").unwrap();
        assert!(matches!(
            engine.project(&record, 40),
            Err(TreeCarbonError::Validation(_))
        ));
    }

    #[test]
    fn test_totals_consistent_with_per_tree_values() {
        let registry = SpeciesRegistry::builtin();
        let engine = ProjectionEngine::new(&registry);
        let series = engine.project(&teak_record(2500), 60).unwrap();

        for row in series.rows() {
            let trees = row.surviving_trees as FloatValue;
            assert_abs_diff_eq!(
                row.total_agb_tonnes,
                row.agb_kg_per_tree * trees / 1000.0,
                epsilon = 1e-9
            );
            assert_abs_diff_eq!(
                row.total_biomass_tonnes,
                row.total_agb_tonnes + row.total_bgb_tonnes,
                epsilon = 1e-9
            );
            assert_abs_diff_eq!(
                row.co2_equivalent_tonnes,
                row.total_carbon_tonnes * 3.67,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_custom_parameters_validated() {
        let registry = SpeciesRegistry::builtin();
        let invalid = ModelParameters {
            carbon_fraction: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            ProjectionEngine::with_parameters(&registry, invalid),
            Err(TreeCarbonError::Configuration(_))
        ));
    }

    #[test]
    fn test_project_many_preserves_order() {
        let registry = SpeciesRegistry::builtin();
        let engine = ProjectionEngine::new(&registry);
        let records = vec![
            teak_record(100),
            PlantingRecord::parse("Quercus nonexistent", 10, "2025-01-01").unwrap(),
            PlantingRecord::parse("Populus deltoides", 50, "2024-07-01").unwrap(),
        ];

        let results = engine.project_many(&records, 10);
        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].as_ref().unwrap().record().species_name,
            "Tectona grandis"
        );
        assert_eq!(
            results[1].as_ref().unwrap_err(),
            &TreeCarbonError::not_found("Quercus nonexistent")
        );
        assert_eq!(
            results[2].as_ref().unwrap().record().species_name,
            "Populus deltoides"
        );
    }
}
