//! Virtual chemistry mixture simulation kernel
//!
//! A tick-driven engine for the thermodynamic and reactive evolution of
//! multi-phase molecular mixtures in laboratory-style vessels: layered
//! mixtures, a hierarchical reaction rule network, per-layer phase
//! transitions and deterministic per-tick scheduling.

pub mod constants;
pub mod error;
pub mod mixtures;
pub mod molecules;
pub mod quantities;
pub mod reactions;
pub mod types;

#[cfg(test)]
pub mod tests;

pub use error::{SimulationError, SimulationResult};
pub use mixtures::{
    Atmosphere, Container, ContainerRef, DumpContainer, ForwardingContainer, ForwardingRule,
    Layer, LayerType, MultiLayerMixture, Reactant, ReactantId, ReactantSet, Reactor,
    SingleLayerMixture, TickMode,
};
pub use molecules::{DataStore, Estimator, MolecularStructure, Molecule};
pub use quantities::Quantity;
pub use reactions::{Catalyst, ConcreteReaction, ReactionData, ReactionNetwork};
