//! Reaction rules, concrete reactions and the specialization network

mod catalyst;
mod concrete_reaction;
mod network;
mod reaction_data;

pub use catalyst::Catalyst;
pub use concrete_reaction::{ConcreteReaction, RetrosynthReaction};
pub use network::ReactionNetwork;
pub use reaction_data::{ComponentMap, ReactionData, ReactionId};
