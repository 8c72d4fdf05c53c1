//! Concrete and retrosynthetic reaction instances

use crate::mixtures::{LayerType, Reactant, ReactantSet};
use crate::molecules::{MolecularStructure, Molecule};
use crate::reactions::ReactionData;
use std::rc::Rc;

/// A reaction rule with every radical atom resolved to actual molecules of
/// the current mixture. Reactant and product amounts hold the
/// stoichiometric multiplicity of each species.
#[derive(Debug, Clone)]
pub struct ConcreteReaction {
    data: Rc<ReactionData>,
    reactants: ReactantSet,
    products: ReactantSet,
}

impl ConcreteReaction {
    pub fn new(data: Rc<ReactionData>, reactants: &[Reactant], products: Vec<Molecule>) -> Self {
        let mut reactant_set = ReactantSet::new();
        for reactant in reactants {
            reactant_set.add(reactant.with_amount(crate::quantities::Quantity::new(1.0)));
        }
        let mut product_set = ReactantSet::new();
        for product in products {
            product_set.add(Reactant::new(
                product,
                LayerType::None,
                crate::quantities::Quantity::new(1.0),
            ));
        }
        Self {
            data,
            reactants: reactant_set,
            products: product_set,
        }
    }

    pub fn data(&self) -> &Rc<ReactionData> {
        &self.data
    }

    pub fn reactants(&self) -> &ReactantSet {
        &self.reactants
    }

    pub fn products(&self) -> &ReactantSet {
        &self.products
    }

    /// Two concrete reactions are equivalent when they involve the same
    /// reactant and product species in the same amounts.
    pub fn is_equivalent(&self, other: &ConcreteReaction) -> bool {
        self.reactants.equals(&other.reactants, f64::EPSILON)
            && self.products.equals(&other.products, f64::EPSILON)
    }
}

impl PartialEq for ConcreteReaction {
    fn eq(&self, other: &Self) -> bool {
        self.is_equivalent(other)
    }
}

/// A rule applied in reverse: given a target product structure, the
/// substituted reactant structures that would produce it. Used by synthesis
/// tooling, not by the forward tick engine.
#[derive(Debug, Clone)]
pub struct RetrosynthReaction {
    data: Rc<ReactionData>,
    reactants: Vec<MolecularStructure>,
    products: Vec<MolecularStructure>,
}

impl RetrosynthReaction {
    pub fn new(
        data: Rc<ReactionData>,
        reactants: Vec<MolecularStructure>,
        products: Vec<MolecularStructure>,
    ) -> Self {
        Self {
            data,
            reactants,
            products,
        }
    }

    pub fn data(&self) -> &Rc<ReactionData> {
        &self.data
    }

    pub fn reactants(&self) -> &[MolecularStructure] {
        &self.reactants
    }

    pub fn products(&self) -> &[MolecularStructure] {
        &self.products
    }
}

impl PartialEq for RetrosynthReaction {
    fn eq(&self, other: &Self) -> bool {
        self.data.id == other.data.id
            && self.reactants == other.reactants
            && self.products == other.products
    }
}
