//! Shared test fixtures: a data store stocked with common lab substances
//! and the esterification rule.

use crate::molecules::{
    DataStore, Estimator, Molecule, MoleculeProperties, MoleculeSpec, Polarity, ReactionSpec,
};
use std::rc::Rc;

fn spec(
    smiles: &str,
    name: &str,
    polarity: Polarity,
    properties: MoleculeProperties,
) -> MoleculeSpec {
    MoleculeSpec {
        smiles: smiles.to_string(),
        name: name.to_string(),
        polarity,
        color: Default::default(),
        properties,
    }
}

fn constant_properties(
    melting_point: f64,
    boiling_point: f64,
    liquid_density: f64,
    liquid_heat_capacity: f64,
    fusion_heat: f64,
    vaporization_heat: f64,
) -> MoleculeProperties {
    MoleculeProperties {
        melting_point: Estimator::Constant(melting_point),
        boiling_point: Estimator::Constant(boiling_point),
        liquid_density: Estimator::Constant(liquid_density),
        solid_density: Estimator::Constant(liquid_density * 1.1),
        liquid_heat_capacity: Estimator::Constant(liquid_heat_capacity),
        solid_heat_capacity: Estimator::Constant(liquid_heat_capacity * 0.7),
        fusion_heat: Estimator::Constant(fusion_heat),
        vaporization_heat: Estimator::Constant(vaporization_heat),
        sublimation_heat: Estimator::Constant(fusion_heat + vaporization_heat),
        henry_constant: Estimator::Constant(1.0),
        relative_solubility: Estimator::Constant(1.0),
    }
}

/// A store with water, air gases, acetic acid, ethanol, ethyl acetate and
/// the generic esterification rule.
pub fn test_store() -> Rc<DataStore> {
    let mut store = DataStore::new();

    store
        .register_molecule(&spec(
            "O",
            "water",
            Polarity::new(1.0, 0.0),
            constant_properties(0.0, 100.0, 1.0, 75.3, 6020.0, 40650.0),
        ))
        .unwrap();
    store
        .register_molecule(&spec(
            "N#N",
            "nitrogen",
            Polarity::new(0.1, 0.9),
            constant_properties(-210.0, -195.8, 0.808, 28.0, 710.0, 5560.0),
        ))
        .unwrap();
    store
        .register_molecule(&spec(
            "O=O",
            "oxygen",
            Polarity::new(0.1, 0.9),
            constant_properties(-218.8, -183.0, 1.141, 28.0, 444.0, 6820.0),
        ))
        .unwrap();
    store
        .register_molecule(&spec(
            "CC(=O)O",
            "acetic acid",
            Polarity::new(0.65, 0.35),
            constant_properties(16.6, 117.9, 1.049, 123.0, 11730.0, 23700.0),
        ))
        .unwrap();
    store
        .register_molecule(&spec(
            "CCO",
            "ethanol",
            Polarity::new(0.6, 0.4),
            constant_properties(-114.1, 78.2, 0.789, 112.0, 4900.0, 38600.0),
        ))
        .unwrap();
    store
        .register_molecule(&spec(
            "CCOC(=O)C",
            "ethyl acetate",
            Polarity::new(0.4, 0.6),
            constant_properties(-83.6, 77.1, 0.902, 170.0, 10500.0, 31900.0),
        ))
        .unwrap();

    store
        .register_reaction(&ReactionSpec {
            name: "esterification".to_string(),
            reactants: vec![("[R]C(=O)O".to_string(), 1), ("[R]O".to_string(), 1)],
            products: vec![("[R]C(=O)O[R]".to_string(), 1), ("O".to_string(), 1)],
            catalysts: vec![],
            reaction_energy: 0.0,
            activation_energy: 50_000.0,
            temperature_speed: Estimator::Constant(0.002),
            concentration_speed: Estimator::Constant(1.0),
            is_cut: false,
            component_map: None,
        })
        .unwrap();

    Rc::new(store)
}

pub fn molecule(store: &DataStore, smiles: &str) -> Molecule {
    store.molecule_from_smiles(smiles).unwrap()
}
