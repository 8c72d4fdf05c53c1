//! Reactant sets: the content of a mixture
//!
//! A map from `ReactantId` to `Reactant` with at most one entry per key and
//! non-negative stored amounts. Iteration order is the id order, which keeps
//! every per-tick walk deterministic.

use crate::constants::MOLAR_EXISTENCE_THRESHOLD;
use crate::mixtures::reactant::{Reactant, ReactantId};
use crate::quantities::{Mole, Quantity};
use crate::reactions::Catalyst;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct ReactantSet {
    reactants: BTreeMap<ReactantId, Reactant>,
}

impl ReactantSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reactants(reactants: &[Reactant]) -> Self {
        let mut set = Self::new();
        for reactant in reactants {
            set.add(reactant.with_amount(Quantity::new(1.0)));
        }
        set
    }

    pub fn len(&self) -> usize {
        self.reactants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactants.is_empty()
    }

    pub fn contains(&self, id: &ReactantId) -> bool {
        self.reactants.contains_key(id)
    }

    pub fn get(&self, id: &ReactantId) -> Option<&Reactant> {
        self.reactants.get(id)
    }

    /// Accumulate a signed amount into the set and return the delta that was
    /// actually applied. Negative deltas may only reduce an existing entry;
    /// stored amounts never go below zero.
    pub fn add(&mut self, reactant: Reactant) -> Quantity<Mole> {
        if let Some(existing) = self.reactants.get_mut(&reactant.id()) {
            let before = existing.amount;
            let mut after = before + reactant.amount;
            if after.value() < 0.0 {
                if -after > MOLAR_EXISTENCE_THRESHOLD {
                    warn!(
                        "Tried to remove more {} than present; clamping to zero.",
                        existing.molecule.name()
                    );
                }
                after = Quantity::ZERO;
            }
            existing.amount = after;
            return after - before;
        }

        if reactant.amount.value() < 0.0 {
            warn!(
                "Tried to add a negative amount of {}.",
                reactant.molecule.name()
            );
            return Quantity::ZERO;
        }

        let amount = reactant.amount;
        self.reactants.insert(reactant.id(), reactant);
        amount
    }

    /// Some reactant of the set, the first in id order
    pub fn any(&self) -> Option<&Reactant> {
        self.reactants.values().next()
    }

    pub fn amount_of(&self, id: &ReactantId) -> Quantity<Mole> {
        self.reactants
            .get(id)
            .map_or(Quantity::ZERO, |r| r.amount)
    }

    /// Sum of amounts over the keys of another set
    pub fn amount_of_set(&self, other: &ReactantSet) -> Quantity<Mole> {
        let mut sum = Quantity::ZERO;
        for id in other.reactants.keys() {
            sum += self.amount_of(id);
        }
        sum
    }

    /// Sum of amounts over entries whose structure satisfies the catalyst
    pub fn amount_of_catalyst(&self, catalyst: &Catalyst) -> Quantity<Mole> {
        let mut sum = Quantity::ZERO;
        for reactant in self.reactants.values() {
            if catalyst.matches_structure(reactant.molecule.structure()) {
                sum += reactant.amount;
            }
        }
        sum
    }

    pub fn erase_if(&mut self, mut predicate: impl FnMut(&Reactant) -> bool) {
        self.reactants.retain(|_, r| !predicate(r));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reactant> {
        self.reactants.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Reactant> {
        self.reactants.values_mut()
    }

    /// Snapshot of the current entries
    pub fn to_vec(&self) -> Vec<Reactant> {
        self.reactants.values().cloned().collect()
    }

    /// Epsilon-equality: for every key in either set the amounts must agree
    pub fn equals(&self, other: &ReactantSet, epsilon: f64) -> bool {
        for (id, reactant) in &self.reactants {
            if !reactant.amount.equals(other.amount_of(id), epsilon) {
                return false;
            }
        }
        for (id, reactant) in &other.reactants {
            if !reactant.amount.equals(self.amount_of(id), epsilon) {
                return false;
            }
        }
        true
    }
}
