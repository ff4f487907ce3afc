use super::builtin::builtin_species;
use super::SpeciesTraits;
use crate::errors::{TreeCarbonError, TreeCarbonResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A TOML document holding a list of species under `[[species]]`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SpeciesDocument {
    #[serde(default)]
    species: Vec<SpeciesTraits>,
}

/// Mapping from scientific name to [`SpeciesTraits`].
///
/// Lookups are exact-key matches: no case folding, no fuzzy matching.
/// Every entry is validated when it is inserted, so anything that can be
/// looked up is safe to project with.
///
/// The registry is an explicit value rather than global state. Projections
/// borrow it immutably, so registering a species while a projection is
/// running is rejected at compile time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesRegistry {
    species: BTreeMap<String, SpeciesTraits>,
}

impl SpeciesRegistry {
    /// An empty registry, useful for isolated calibrations and test fixtures.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry seeded with the built-in species table.
    pub fn builtin() -> Self {
        let species = builtin_species()
            .into_iter()
            .map(|traits| (traits.species_name.clone(), traits))
            .collect();
        Self { species }
    }

    /// Build a registry from a TOML document with a `[[species]]` array.
    pub fn from_toml_str(document: &str) -> TreeCarbonResult<Self> {
        let mut registry = Self::empty();
        registry.extend_from_toml(document)?;
        Ok(registry)
    }

    /// Look up a species by its exact scientific name.
    pub fn lookup(&self, name: &str) -> TreeCarbonResult<&SpeciesTraits> {
        self.species
            .get(name)
            .ok_or_else(|| TreeCarbonError::not_found(name))
    }

    /// Insert or replace a species.
    ///
    /// The traits are validated first; on failure the registry is unchanged.
    /// Returns the entry that was replaced, if any.
    pub fn register(&mut self, traits: SpeciesTraits) -> TreeCarbonResult<Option<SpeciesTraits>> {
        traits.validate()?;
        let replaced = self.species.insert(traits.species_name.clone(), traits);
        if let Some(previous) = &replaced {
            debug!("Replaced traits for species '{}'", previous.species_name);
        }
        Ok(replaced)
    }

    /// Register every species in a TOML document.
    ///
    /// All entries are validated before any is inserted, so a document with
    /// one bad entry leaves the registry untouched. Returns the number of
    /// species registered.
    pub fn extend_from_toml(&mut self, document: &str) -> TreeCarbonResult<usize> {
        let parsed: SpeciesDocument = toml::from_str(document)
            .map_err(|e| TreeCarbonError::Configuration(format!("species table: {e}")))?;

        for traits in &parsed.species {
            traits.validate()?;
        }

        let count = parsed.species.len();
        for traits in parsed.species {
            self.register(traits)?;
        }
        debug!("Registered {} species from TOML", count);
        Ok(count)
    }

    /// Serialise every species to a TOML document readable by [`Self::from_toml_str`].
    pub fn to_toml_string(&self) -> TreeCarbonResult<String> {
        let document = SpeciesDocument {
            species: self.species.values().cloned().collect(),
        };
        toml::to_string(&document)
            .map_err(|e| TreeCarbonError::Configuration(format!("species table: {e}")))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.species.contains_key(name)
    }

    /// Registered scientific names in sorted order.
    pub fn species_names(&self) -> Vec<&str> {
        self.species.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeciesTraits> {
        self.species.values()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}
