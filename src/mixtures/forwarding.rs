//! The forwarding container: a reactant dispatcher
//!
//! Incoming reactants are offered to an ordered rule list; every matching
//! rule's target receives the full amount. Unmatched reactants fall through
//! to the default sink. Energy is split equally across the rule targets.

use crate::mixtures::container::{Container, ContainerRef};
use crate::mixtures::reactant::Reactant;
use crate::quantities::{Gram, Joule, Quantity};

pub struct ForwardingRule {
    pub predicate: fn(&Reactant) -> bool,
    pub target: ContainerRef,
}

pub struct ForwardingContainer {
    rules: Vec<ForwardingRule>,
    default_target: ContainerRef,
}

impl ForwardingContainer {
    pub fn new(rules: Vec<ForwardingRule>, default_target: ContainerRef) -> Self {
        Self {
            rules,
            default_target,
        }
    }

    pub fn add_rule(&mut self, rule: ForwardingRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[ForwardingRule] {
        &self.rules
    }
}

impl Container for ForwardingContainer {
    fn add_reactant(&mut self, reactant: Reactant) {
        let mut matched = false;
        for rule in &self.rules {
            if (rule.predicate)(&reactant) {
                rule.target.borrow_mut().add_reactant(reactant.clone());
                matched = true;
            }
        }
        if !matched {
            self.default_target.borrow_mut().add_reactant(reactant);
        }
    }

    fn add_energy(&mut self, energy: Quantity<Joule>) {
        if self.rules.is_empty() {
            self.default_target.borrow_mut().add_energy(energy);
            return;
        }
        let share = energy / self.rules.len() as f64;
        for rule in &self.rules {
            rule.target.borrow_mut().add_energy(share);
        }
    }

    fn total_mass(&self) -> Quantity<Gram> {
        Quantity::ZERO
    }
}
