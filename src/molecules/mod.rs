//! Molecules: structures, estimators and the data store
//!
//! The mixture kernel treats molecular structures opaquely; this module
//! carries the compact in-tree realization of that contract together with
//! the registry that assigns molecule ids.

mod atoms;
mod data_store;
mod estimator;
mod molecule;
mod structure;

pub use atoms::{AtomData, AtomTable};
pub use data_store::{
    CatalystSpec, DataStore, DefinitionDocument, MoleculeSpec, ReactionSpec,
};
pub use estimator::Estimator;
pub use molecule::{
    Aggregation, Color, Molecule, MoleculeData, MoleculeId, MoleculeProperties, Polarity,
};
pub use structure::{Atom, Bond, MolecularStructure};
