//! Atom definitions: symbols, weights and valences
//!
//! The set of legal atom symbols is data, not code. A default table covering
//! the common organic elements is built in; hosts may register more.

use crate::error::{SimulationError, SimulationResult};
use crate::quantities::{GramPerMole, Quantity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single atom definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomData {
    pub symbol: String,
    pub name: String,
    /// Atomic weight in g/mol
    pub weight: f64,
    /// Legal valences, smallest first
    pub valences: Vec<u8>,
}

/// Lookup table of legal atom symbols
#[derive(Debug, Clone, Default)]
pub struct AtomTable {
    atoms: BTreeMap<String, AtomData>,
}

impl AtomTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table of common elements
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        let defaults: &[(&str, &str, f64, &[u8])] = &[
            ("H", "Hydrogen", 1.008, &[1]),
            ("B", "Boron", 10.811, &[3]),
            ("C", "Carbon", 12.011, &[4]),
            ("N", "Nitrogen", 14.007, &[3]),
            ("O", "Oxygen", 15.999, &[2]),
            ("F", "Fluorine", 18.998, &[1]),
            ("Na", "Sodium", 22.990, &[1]),
            ("Mg", "Magnesium", 24.305, &[2]),
            ("P", "Phosphorus", 30.974, &[3, 5]),
            ("S", "Sulfur", 32.065, &[2, 4, 6]),
            ("Cl", "Chlorine", 35.453, &[1]),
            ("K", "Potassium", 39.098, &[1]),
            ("Ca", "Calcium", 40.078, &[2]),
            ("Br", "Bromine", 79.904, &[1]),
            ("I", "Iodine", 126.904, &[1]),
        ];
        for (symbol, name, weight, valences) in defaults {
            table.register(AtomData {
                symbol: (*symbol).into(),
                name: (*name).into(),
                weight: *weight,
                valences: valences.to_vec(),
            });
        }
        table
    }

    pub fn register(&mut self, atom: AtomData) {
        self.atoms.insert(atom.symbol.clone(), atom);
    }

    pub fn get(&self, symbol: &str) -> SimulationResult<&AtomData> {
        self.atoms
            .get(symbol)
            .ok_or_else(|| SimulationError::UnknownAtom(symbol.to_string()))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.atoms.contains_key(symbol)
    }

    pub fn weight_of(&self, symbol: &str) -> SimulationResult<Quantity<GramPerMole>> {
        Ok(Quantity::new(self.get(symbol)?.weight))
    }

    /// Smallest legal valence that can host `bond_order_sum` bonds, or the
    /// largest one when every valence is exceeded.
    pub fn fitting_valence(&self, symbol: &str, bond_order_sum: u8) -> SimulationResult<u8> {
        let data = self.get(symbol)?;
        Ok(data
            .valences
            .iter()
            .copied()
            .find(|v| *v >= bond_order_sum)
            .unwrap_or_else(|| data.valences.last().copied().unwrap_or(0)))
    }
}
