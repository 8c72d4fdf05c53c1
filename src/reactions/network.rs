//! The reaction rule network
//!
//! A DAG whose edges run from generalisations to specialisations, rooted in
//! a `top_layer` of mutually unrelated rules. Matching walks top-down and
//! prefers the most specialised rule that still matches the concrete
//! reactants.

use crate::mixtures::Reactant;
use crate::molecules::{DataStore, MolecularStructure};
use crate::reactions::{ConcreteReaction, ReactionData, RetrosynthReaction};
use std::rc::Rc;
use tracing::warn;

#[derive(Debug, Default)]
pub struct ReactionNetwork {
    nodes: Vec<Rc<ReactionData>>,
    children: Vec<Vec<usize>>,
    top_layer: Vec<usize>,
    max_reactant_count: usize,
}

impl ReactionNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The largest declared reactant count over all rules
    pub fn max_reactant_count(&self) -> usize {
        self.max_reactant_count
    }

    fn add_node(&mut self, data: &Rc<ReactionData>) -> usize {
        self.nodes.push(data.clone());
        self.children.push(Vec::new());
        self.nodes.len() - 1
    }

    /// Insert a rule below its most specific existing generalisations,
    /// re-parenting existing specialisations underneath it. Equivalent
    /// duplicates are rejected with a warning.
    pub fn insert(&mut self, data: Rc<ReactionData>) -> bool {
        let mut first_insert: Option<usize> = None;
        let mut match_found = false;

        for i in 0..self.top_layer.len() {
            let top = self.top_layer[i];
            if data.is_specialization_of(&self.nodes[top]) {
                if data.is_equivalent_to(&self.nodes[top]) {
                    warn!("Discarded duplicate reaction with id {}.", data.id);
                    return false;
                }
                if !self.insert_below(top, &data, &mut first_insert) {
                    return false;
                }
                match_found = true;
            } else if self.nodes[top].is_specialization_of(&data) {
                let new = *first_insert.get_or_insert_with(|| {
                    self.nodes.push(data.clone());
                    self.children.push(Vec::new());
                    self.nodes.len() - 1
                });
                self.children[new].push(top);
                self.top_layer[i] = new;
                match_found = true;
            }
        }

        if !match_found {
            let new = match first_insert {
                Some(idx) => idx,
                None => self.add_node(&data),
            };
            self.top_layer.push(new);
        }

        self.max_reactant_count = self.max_reactant_count.max(data.reactants().len());
        true
    }

    fn insert_below(
        &mut self,
        current: usize,
        data: &Rc<ReactionData>,
        first_insert: &mut Option<usize>,
    ) -> bool {
        let mut match_found = false;
        let child_snapshot = self.children[current].clone();

        for child in child_snapshot {
            if self.nodes[child].id == data.id {
                continue;
            }

            if data.is_specialization_of(&self.nodes[child]) {
                if data.is_equivalent_to(&self.nodes[child]) {
                    warn!("Discarded duplicate reaction with id {}.", data.id);
                    return false;
                }
                if !self.insert_below(child, data, first_insert) {
                    return false;
                }
                match_found = true;
            } else if self.nodes[child].is_specialization_of(data) {
                let new = match *first_insert {
                    Some(idx) => idx,
                    None => {
                        let idx = self.add_node(data);
                        *first_insert = Some(idx);
                        idx
                    }
                };
                if !self.children[current].contains(&new) {
                    self.children[current].push(new);
                }
                if !self.children[new].contains(&child) {
                    self.children[new].push(child);
                }
                self.children[current].retain(|&c| c != child);
                match_found = true;
            }
        }

        if !match_found {
            let new = match *first_insert {
                Some(idx) => idx,
                None => {
                    let idx = self.add_node(data);
                    *first_insert = Some(idx);
                    idx
                }
            };
            if !self.children[current].contains(&new) {
                self.children[current].push(new);
            }
        }
        true
    }

    /// Produce the concrete reactions occurring for an ordered vector of
    /// reactants: top-down walk, preferring matching children over their
    /// generalisations.
    pub fn get_occurring_reactions(
        &self,
        reactants: &[Reactant],
        store: &DataStore,
    ) -> Vec<ConcreteReaction> {
        let mut result = Vec::new();
        for &top in &self.top_layer {
            self.try_node(top, reactants, store, &mut result);
        }
        result
    }

    /// Attempt a single node; returns whether this node or any of its
    /// specialisations matched.
    fn try_node(
        &self,
        current: usize,
        reactants: &[Reactant],
        store: &DataStore,
        result: &mut Vec<ConcreteReaction>,
    ) -> bool {
        let data = &self.nodes[current];
        let Some(matches) = data.generate_concrete_reactant_matches(reactants) else {
            return false;
        };

        let mut child_matched = false;
        for &child in &self.children[current] {
            if self.try_node(child, reactants, store, result) {
                child_matched = true;
            }
        }
        if child_matched {
            return true;
        }

        let products = data.generate_concrete_products(reactants, &matches, store);
        if products.is_empty() {
            return false;
        }
        let reaction = ConcreteReaction::new(data.clone(), reactants, products);
        if !result.contains(&reaction) {
            result.push(reaction);
        }
        true
    }

    /// Produce the reversed rule applications for a target product.
    pub fn get_retrosynth_reactions(
        &self,
        target: &MolecularStructure,
        store: &DataStore,
    ) -> Vec<RetrosynthReaction> {
        let mut result = Vec::new();
        for &top in &self.top_layer {
            self.try_retrosynth_node(top, target, store, &mut result);
        }
        result
    }

    fn try_retrosynth_node(
        &self,
        current: usize,
        target: &MolecularStructure,
        store: &DataStore,
        result: &mut Vec<RetrosynthReaction>,
    ) -> bool {
        let data = &self.nodes[current];
        let Some(product_match) = data.generate_retrosynth_product_match(target) else {
            return false;
        };

        let mut child_matched = false;
        for &child in &self.children[current] {
            if self.try_retrosynth_node(child, target, store, result) {
                child_matched = true;
            }
        }
        if child_matched {
            return true;
        }

        let reactants = data.generate_retrosynth_reactants(target, &product_match, store);
        let mut products = vec![target.clone()];
        for (i, pattern) in data.products().iter().enumerate() {
            if i != product_match.0 {
                products.push(pattern.clone());
            }
        }
        let reaction = RetrosynthReaction::new(data.clone(), reactants, products);
        if !result.contains(&reaction) {
            result.push(reaction);
        }
        true
    }
}
