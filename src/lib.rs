//! Carbon stock projections for tree plantations.
//!
//! Projects, for plantings of known species, quantity and date, the
//! trajectory of diameter, height, survival, above- and below-ground biomass,
//! carbon stock and CO2-equivalent over a multi-decade horizon.
//!
//! # Crate Organisation
//!
//! - [`errors`], [`parameters`], [`species`], [`planting`], [`projection`]:
//!   core types re-exported from `treecarbon-core`
//! - [`components`]: growth, mortality, biomass and carbon components
//! - [`engine`]: year-by-year projection of a single planting record
//! - [`portfolio`]: calendar-aligned aggregation of many records
//!
//! # Example
//!
//! ```
//! use treecarbon::planting::PlantingRecord;
//! use treecarbon::species::SpeciesRegistry;
//! use treecarbon::engine::ProjectionEngine;
//!
//! let registry = SpeciesRegistry::builtin();
//! let engine = ProjectionEngine::new(&registry);
//! let record = PlantingRecord::parse("Tectona grandis", 1000, "2025-01-01").unwrap();
//! let series = engine.project(&record, 40).unwrap();
//! assert_eq!(series.len(), 40);
//! ```

pub mod engine;
pub mod portfolio;

pub use treecarbon_components::components;
pub use treecarbon_core::{errors, parameters, planting, projection, species, FloatValue};
