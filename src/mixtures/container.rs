//! The common container surface
//!
//! Every vessel variant accepts reactants and energy; routing handles such
//! as overflow, incompatibility and forwarding targets address containers
//! through `ContainerRef` trait objects.

use crate::mixtures::reactant::Reactant;
use crate::quantities::{Gram, Joule, Quantity};
use crate::types::Shared;

pub trait Container {
    fn add_reactant(&mut self, reactant: Reactant);

    fn add_energy(&mut self, energy: Quantity<Joule>);

    /// Total mass held, used by conservation checks
    fn total_mass(&self) -> Quantity<Gram>;
}

/// Shared handle to any container variant
pub type ContainerRef = Shared<dyn Container>;
