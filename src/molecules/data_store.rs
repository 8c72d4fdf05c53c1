//! The data store: the process-wide read-only context handle
//!
//! Holds the atom table, the molecule registry and the reaction network.
//! It is fully initialised before the first reactor exists and passed
//! around as an `Rc<DataStore>`; only the molecule registry is interior-
//! mutable, so that reaction products can be registered mid-tick through
//! `find_or_add`.

use crate::error::{SimulationError, SimulationResult};
use crate::molecules::atoms::{AtomData, AtomTable};
use crate::molecules::estimator::Estimator;
use crate::molecules::molecule::{
    Color, Molecule, MoleculeData, MoleculeId, MoleculeProperties, Polarity,
};
use crate::molecules::structure::MolecularStructure;
use crate::quantities::Quantity;
use crate::reactions::{Catalyst, ComponentMap, ReactionData, ReactionNetwork};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::trace;

/// Declarative molecule definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoleculeSpec {
    pub smiles: String,
    pub name: String,
    #[serde(default)]
    pub polarity: Polarity,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub properties: MoleculeProperties,
}

/// Declarative catalyst definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalystSpec {
    pub smiles: String,
    pub ideal_amount: f64,
}

/// Declarative reaction definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionSpec {
    pub name: String,
    /// `(pattern, stoichiometric coefficient)` pairs
    pub reactants: Vec<(String, u8)>,
    pub products: Vec<(String, u8)>,
    #[serde(default)]
    pub catalysts: Vec<CatalystSpec>,
    /// J/mol released (positive) or absorbed (negative) per unit of reaction
    #[serde(default)]
    pub reaction_energy: f64,
    #[serde(default)]
    pub activation_energy: f64,
    pub temperature_speed: Estimator,
    pub concentration_speed: Estimator,
    #[serde(default)]
    pub is_cut: bool,
    /// Optional explicit radical mapping over the flattened pattern lists;
    /// omitted maps are paired positionally
    #[serde(default)]
    pub component_map: Option<Vec<((usize, usize), (usize, usize))>>,
}

/// Top-level definition document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefinitionDocument {
    #[serde(default)]
    pub atoms: Vec<AtomData>,
    #[serde(default)]
    pub molecules: Vec<MoleculeSpec>,
    #[serde(default)]
    pub reactions: Vec<ReactionSpec>,
}

#[derive(Debug, Default)]
struct MoleculeRegistry {
    by_fingerprint: HashMap<u64, Molecule>,
    next_id: MoleculeId,
}

#[derive(Debug, Default)]
pub struct DataStore {
    atoms: AtomTable,
    molecules: RefCell<MoleculeRegistry>,
    reactions: ReactionNetwork,
    default_properties: MoleculeProperties,
    next_reaction_id: u32,
}

impl DataStore {
    /// An empty store with the built-in atom table
    pub fn new() -> Self {
        Self {
            atoms: AtomTable::with_defaults(),
            ..Default::default()
        }
    }

    /// Build a store from a JSON definition document
    pub fn from_json(json: &str) -> SimulationResult<Self> {
        let document: DefinitionDocument = serde_json::from_str(json)
            .map_err(|e| SimulationError::InvalidDefinition(e.to_string()))?;
        let mut store = Self::new();
        for atom in document.atoms {
            store.register_atom(atom);
        }
        for molecule in &document.molecules {
            store.register_molecule(molecule)?;
        }
        for reaction in &document.reactions {
            store.register_reaction(reaction)?;
        }
        Ok(store)
    }

    pub fn atoms(&self) -> &AtomTable {
        &self.atoms
    }

    pub fn reactions(&self) -> &ReactionNetwork {
        &self.reactions
    }

    pub fn register_atom(&mut self, atom: AtomData) {
        self.atoms.register(atom);
    }

    /// Properties given to molecules first seen as reaction products
    pub fn set_default_properties(&mut self, properties: MoleculeProperties) {
        self.default_properties = properties;
    }

    pub fn register_molecule(&mut self, spec: &MoleculeSpec) -> SimulationResult<Molecule> {
        let structure = MolecularStructure::from_smiles(&spec.smiles, &self.atoms)?;
        let fingerprint = structure.fingerprint();
        let mut registry = self.molecules.borrow_mut();
        if let Some(existing) = registry.by_fingerprint.get(&fingerprint) {
            return Ok(existing.clone());
        }

        let id = registry.next_id;
        registry.next_id += 1;
        let molecule = Molecule::new(Rc::new(MoleculeData {
            id,
            name: spec.name.clone(),
            structure,
            polarity: spec.polarity,
            color: spec.color,
            properties: spec.properties.clone(),
        }));
        registry.by_fingerprint.insert(fingerprint, molecule.clone());
        Ok(molecule)
    }

    /// Look a structure up by fingerprint, registering it with the default
    /// property template when unseen.
    pub fn find_or_add(&self, structure: MolecularStructure) -> Molecule {
        let fingerprint = structure.fingerprint();
        let mut registry = self.molecules.borrow_mut();
        if let Some(existing) = registry.by_fingerprint.get(&fingerprint) {
            return existing.clone();
        }

        let id = registry.next_id;
        registry.next_id += 1;
        trace!("Registered unknown molecule {id} with default properties.");
        let molecule = Molecule::new(Rc::new(MoleculeData {
            id,
            name: format!("molecule-{id}"),
            structure,
            polarity: Polarity::default(),
            color: Color::default(),
            properties: self.default_properties.clone(),
        }));
        registry.by_fingerprint.insert(fingerprint, molecule.clone());
        molecule
    }

    /// Parse a structure and resolve it through the registry
    pub fn molecule_from_smiles(&self, smiles: &str) -> SimulationResult<Molecule> {
        let structure = MolecularStructure::from_smiles(smiles, &self.atoms)?;
        Ok(self.find_or_add(structure))
    }

    pub fn molecule_count(&self) -> usize {
        self.molecules.borrow().by_fingerprint.len()
    }

    pub fn register_reaction(&mut self, spec: &ReactionSpec) -> SimulationResult<()> {
        fn flatten(
            patterns: &[(String, u8)],
            atoms: &AtomTable,
        ) -> SimulationResult<Vec<MolecularStructure>> {
            let mut result = Vec::new();
            for (smiles, coefficient) in patterns {
                let structure = MolecularStructure::from_smiles(smiles, atoms)?;
                for _ in 0..(*coefficient).max(1) {
                    result.push(structure.clone());
                }
            }
            Ok(result)
        }

        let reactants = flatten(&spec.reactants, &self.atoms)?;
        let products = flatten(&spec.products, &self.atoms)?;
        let mut catalysts = Vec::with_capacity(spec.catalysts.len());
        for catalyst in &spec.catalysts {
            catalysts.push(Catalyst::new(
                MolecularStructure::from_smiles(&catalyst.smiles, &self.atoms)?,
                Quantity::new(catalyst.ideal_amount),
            ));
        }

        let component_map: Option<ComponentMap> = spec
            .component_map
            .as_ref()
            .map(|entries| entries.iter().copied().collect());

        let id = self.next_reaction_id;
        self.next_reaction_id += 1;
        let data = ReactionData::new(
            id,
            &spec.name,
            reactants,
            products,
            catalysts,
            Quantity::new(spec.reaction_energy),
            Quantity::new(spec.activation_energy),
            spec.temperature_speed.clone(),
            spec.concentration_speed.clone(),
            spec.is_cut,
            component_map,
        )?;

        if !self.reactions.insert(Rc::new(data)) {
            return Err(SimulationError::DuplicateReaction(spec.name.clone()));
        }
        Ok(())
    }
}
