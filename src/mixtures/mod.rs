//! Mixtures: layered vessels, containers and the reactor tick engine

mod atmosphere;
mod container;
mod dump;
mod forwarding;
mod layer;
mod layer_type;
mod multi_layer;
mod nucleator;
mod reactant;
mod reactant_set;
mod reactor;
mod single_layer;

pub use atmosphere::Atmosphere;
pub use container::{Container, ContainerRef};
pub use dump::DumpContainer;
pub use forwarding::{ForwardingContainer, ForwardingRule};
pub use layer::Layer;
pub use layer_type::LayerType;
pub use multi_layer::MultiLayerMixture;
pub use nucleator::{StateNucleator, Transition};
pub use reactant::{Reactant, ReactantId};
pub use reactant_set::ReactantSet;
pub use reactor::{Reactor, TickMode};
pub use single_layer::SingleLayerMixture;
