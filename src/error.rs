//! Error types for the mixture simulation

use crate::mixtures::LayerType;
use thiserror::Error;

/// Simulation error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Failed to parse structure '{input}': {message}")]
    StructureParse { input: String, message: String },

    #[error("Unknown atom symbol: {0}")]
    UnknownAtom(String),

    #[error("Reaction '{name}' has unmappable radical atoms between reactants and products")]
    ComponentMapping { name: String },

    #[error("Duplicate reaction '{0}' was rejected")]
    DuplicateReaction(String),

    #[error("Cannot tick: layer {0:?} has an unknown temperature")]
    UnknownTemperature(LayerType),

    #[error("Unknown molecule id {0}")]
    UnknownMolecule(u32),

    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
