//! Catalysts: structural patterns with an ideal amount
//!
//! A catalyst must be present for a reaction to proceed but is not consumed
//! by it.

use crate::molecules::MolecularStructure;
use crate::quantities::{MoleRatio, Quantity};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Catalyst {
    pattern: MolecularStructure,
    ideal_amount: Quantity<MoleRatio>,
}

impl Catalyst {
    pub fn new(pattern: MolecularStructure, ideal_amount: Quantity<MoleRatio>) -> Self {
        Self {
            pattern,
            ideal_amount,
        }
    }

    pub fn pattern(&self) -> &MolecularStructure {
        &self.pattern
    }

    pub fn ideal_amount(&self) -> Quantity<MoleRatio> {
        self.ideal_amount
    }

    /// Whether a concrete structure satisfies this catalyst
    pub fn matches_structure(&self, structure: &MolecularStructure) -> bool {
        structure.matches_with(&self.pattern)
    }

    /// Whether this catalyst, taken as the more general one, is satisfied by
    /// `other` (the more specialised one)
    pub fn matches_catalyst(&self, other: &Catalyst) -> bool {
        self.ideal_amount == other.ideal_amount && other.pattern.matches_with(&self.pattern)
    }
}

impl PartialEq for Catalyst {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl fmt::Display for Catalyst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<catalyst, {}>", self.ideal_amount)
    }
}
