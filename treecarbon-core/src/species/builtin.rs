//! Built-in species table.
//!
//! Traits for common plantation, native forest, agroforestry and Himalayan
//! species of the Indian subcontinent. Compiled from the Plant-FATE and
//! P-hydro parameter sets, FSI volume equations and the ICFRE carbon stock
//! assessment manual.

use super::SpeciesTraits;

pub(super) fn builtin_species() -> Vec<SpeciesTraits> {
    let species = vec![
        // Plantation species
        SpeciesTraits::new(
            "Tectona grandis",
            "Teak",
            35.0,
            550.0,
            0.06,
            0.9,
            0.21,
            1.46,
        )
        .with_crown(45.0, 280.0)
        .with_metadata("Tropical Moist Deciduous", 50),
        SpeciesTraits::new(
            "Eucalyptus tereticornis",
            "Mysore Gum / Eucalyptus",
            45.0,
            640.0,
            0.15,
            0.7,
            0.17,
            1.31,
        )
        .with_crown(55.0, 250.0)
        .with_metadata("Plantation", 8),
        SpeciesTraits::new(
            "Eucalyptus globulus",
            "Blue Gum",
            40.0,
            650.0,
            0.14,
            0.65,
            0.16,
            1.28,
        )
        .with_crown(52.0, 240.0)
        .with_metadata("Plantation", 10),
        SpeciesTraits::new(
            "Populus deltoides",
            "Poplar",
            30.0,
            380.0,
            0.18,
            0.6,
            0.20,
            1.35,
        )
        .with_crown(60.0, 320.0)
        .with_metadata("Agroforestry", 7),
        SpeciesTraits::new(
            "Casuarina equisetifolia",
            "Casuarina / She-oak",
            25.0,
            830.0,
            0.12,
            0.45,
            0.22,
            1.25,
        )
        .with_crown(65.0, 200.0)
        .with_metadata("Coastal Plantation", 10),
        SpeciesTraits::new(
            "Acacia auriculiformis",
            "Acacia / Australian Wattle",
            25.0,
            550.0,
            0.13,
            0.5,
            0.24,
            1.32,
        )
        .with_crown(48.0, 280.0)
        .with_metadata("Plantation", 12),
        SpeciesTraits::new(
            "Acacia mangium",
            "Mangium",
            30.0,
            500.0,
            0.14,
            0.55,
            0.23,
            1.30,
        )
        .with_crown(50.0, 290.0)
        .with_metadata("Plantation", 10),
        SpeciesTraits::new(
            "Gmelina arborea",
            "Gamhar / White Teak",
            30.0,
            430.0,
            0.12,
            0.7,
            0.22,
            1.38,
        )
        .with_crown(45.0, 300.0)
        .with_metadata("Tropical Moist Deciduous", 15),
        SpeciesTraits::new(
            "Dalbergia sissoo",
            "Shisham / Indian Rosewood",
            25.0,
            770.0,
            0.07,
            0.8,
            0.33,
            1.70,
        )
        .with_crown(42.0, 260.0)
        .with_metadata("Tropical Dry Deciduous", 40),
        // Native forest species
        SpeciesTraits::new(
            "Shorea robusta",
            "Sal",
            35.0,
            720.0,
            0.05,
            1.0,
            0.27,
            1.30,
        )
        .with_crown(40.0, 250.0)
        .with_metadata("Tropical Moist Deciduous", 80),
        SpeciesTraits::new(
            "Terminalia arjuna",
            "Arjun",
            25.0,
            680.0,
            0.08,
            0.7,
            0.25,
            1.35,
        )
        .with_crown(44.0, 270.0)
        .with_metadata("Riparian", 30),
        SpeciesTraits::new(
            "Terminalia tomentosa",
            "Ain / Laurel",
            30.0,
            750.0,
            0.06,
            0.8,
            0.26,
            1.32,
        )
        .with_crown(43.0, 260.0)
        .with_metadata("Tropical Dry Deciduous", 50),
        SpeciesTraits::new(
            "Adina cordifolia",
            "Haldu",
            25.0,
            640.0,
            0.07,
            0.65,
            0.24,
            1.36,
        )
        .with_crown(46.0, 280.0)
        .with_metadata("Tropical Moist Deciduous", 40),
        SpeciesTraits::new(
            "Lagerstroemia speciosa",
            "Pride of India / Jarul",
            20.0,
            560.0,
            0.09,
            0.5,
            0.23,
            1.40,
        )
        .with_crown(48.0, 290.0)
        .with_metadata("Tropical Moist Deciduous", 25),
        // Agroforestry and multipurpose species
        SpeciesTraits::new(
            "Azadirachta indica",
            "Neem",
            20.0,
            690.0,
            0.08,
            0.6,
            0.25,
            1.45,
        )
        .with_crown(40.0, 300.0)
        .with_metadata("Agroforestry", 30),
        SpeciesTraits::new(
            "Mangifera indica",
            "Mango",
            25.0,
            550.0,
            0.07,
            0.8,
            0.29,
            1.55,
        )
        .with_crown(35.0, 350.0)
        .with_metadata("Agroforestry", 50),
        SpeciesTraits::new(
            "Tamarindus indica",
            "Tamarind",
            25.0,
            880.0,
            0.05,
            0.9,
            0.28,
            1.50,
        )
        .with_crown(38.0, 320.0)
        .with_metadata("Agroforestry", 60),
        SpeciesTraits::new(
            "Moringa oleifera",
            "Drumstick / Moringa",
            12.0,
            350.0,
            0.25,
            0.35,
            0.20,
            1.60,
        )
        .with_crown(55.0, 280.0)
        .with_metadata("Agroforestry", 10),
        SpeciesTraits::new(
            "Pongamia pinnata",
            "Karanj / Pongam",
            18.0,
            620.0,
            0.09,
            0.5,
            0.26,
            1.42,
        )
        .with_crown(42.0, 300.0)
        .with_metadata("Agroforestry", 25),
        SpeciesTraits::new(
            "Leucaena leucocephala",
            "Subabul",
            15.0,
            520.0,
            0.20,
            0.4,
            0.30,
            1.35,
        )
        .with_crown(55.0, 260.0)
        .with_metadata("Agroforestry", 8),
        SpeciesTraits::new(
            "Syzygium cumini",
            "Jamun / Java Plum",
            25.0,
            680.0,
            0.08,
            0.7,
            0.24,
            1.38,
        )
        .with_crown(44.0, 280.0)
        .with_metadata("Agroforestry", 40),
        SpeciesTraits::new(
            "Albizia lebbeck",
            "Siris",
            25.0,
            560.0,
            0.10,
            0.6,
            0.28,
            1.40,
        )
        .with_crown(48.0, 310.0)
        .with_metadata("Agroforestry", 20),
        SpeciesTraits::new(
            "Albizia procera",
            "White Siris / Safed Siris",
            30.0,
            510.0,
            0.11,
            0.65,
            0.27,
            1.38,
        )
        .with_crown(50.0, 300.0)
        .with_metadata("Plantation", 18),
        SpeciesTraits::new(
            "Melia azedarach",
            "Bakain / Persian Lilac",
            18.0,
            480.0,
            0.14,
            0.5,
            0.22,
            1.42,
        )
        .with_crown(50.0, 290.0)
        .with_metadata("Agroforestry", 15),
        // Bamboos (diameter is culm diameter)
        SpeciesTraits::new(
            "Bambusa bambos",
            "Bamboo (Giant Thorny)",
            25.0,
            600.0,
            0.30,
            0.15,
            0.35,
            1.20,
        )
        .with_crown(80.0, 150.0)
        .with_metadata("Plantation", 5),
        SpeciesTraits::new(
            "Dendrocalamus strictus",
            "Bamboo (Male/Solid)",
            15.0,
            700.0,
            0.28,
            0.10,
            0.40,
            1.18,
        )
        .with_crown(85.0, 140.0)
        .with_metadata("Dry Deciduous", 4),
        // Himalayan and temperate species
        SpeciesTraits::new(
            "Cedrus deodara",
            "Deodar Cedar",
            50.0,
            550.0,
            0.04,
            1.2,
            0.20,
            1.25,
        )
        .with_crown(35.0, 220.0)
        .with_metadata("Himalayan Conifer", 100),
        SpeciesTraits::new(
            "Pinus roxburghii",
            "Chir Pine",
            35.0,
            510.0,
            0.06,
            0.9,
            0.18,
            1.22,
        )
        .with_crown(40.0, 200.0)
        .with_metadata("Himalayan Conifer", 60),
        SpeciesTraits::new(
            "Quercus leucotrichophora",
            "Banj Oak",
            25.0,
            720.0,
            0.04,
            0.8,
            0.30,
            1.35,
        )
        .with_crown(38.0, 280.0)
        .with_metadata("Himalayan Broadleaf", 80),
    ];

    species
        .into_iter()
        .map(|traits| traits.with_native_region("India"))
        .collect()
}
