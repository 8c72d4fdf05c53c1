//! Atmospheres: gaseous single-layer mixtures
//!
//! The default atmosphere is 1 °C air at 760 torr scaled to 10 000 L; its
//! overflow runs into the global dump. Sub-atmospheres inherit composition
//! and state and overflow back into their parent.

use crate::constants::{STANDARD_PRESSURE, STANDARD_TEMPERATURE};
use crate::error::SimulationResult;
use crate::mixtures::container::{Container, ContainerRef};
use crate::mixtures::dump::DumpContainer;
use crate::mixtures::layer::Layer;
use crate::mixtures::layer_type::LayerType;
use crate::mixtures::reactant::{Reactant, ReactantId};
use crate::mixtures::reactant_set::ReactantSet;
use crate::mixtures::single_layer::SingleLayerMixture;
use crate::molecules::{DataStore, Molecule};
use crate::quantities::{Celsius, Gram, Joule, Liter, Mole, Quantity, Second, Torr};
use crate::types::{Shared, shared};

pub struct Atmosphere {
    mixture: SingleLayerMixture,
}

impl Atmosphere {
    pub fn new(
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
        init_content: &[(Molecule, Quantity<Mole>)],
        max_volume: Quantity<Liter>,
        overflow_target: Option<ContainerRef>,
    ) -> Shared<Atmosphere> {
        shared(Atmosphere {
            mixture: SingleLayerMixture::new(
                LayerType::Gaseous,
                temperature,
                pressure,
                init_content,
                max_volume,
                overflow_target,
            ),
        })
    }

    /// 1 °C, 760 torr, 78.084 mol N₂ and 20.946 mol O₂ scaled to 10 000 L,
    /// overflowing into the global dump
    pub fn create_default(store: &DataStore) -> SimulationResult<Shared<Atmosphere>> {
        let nitrogen = store.molecule_from_smiles("N#N")?;
        let oxygen = store.molecule_from_smiles("O=O")?;
        Ok(Self::new(
            STANDARD_TEMPERATURE,
            STANDARD_PRESSURE,
            &[
                (nitrogen, Quantity::new(78.084)),
                (oxygen, Quantity::new(20.946)),
            ],
            Quantity::new(10_000.0),
            Some(DumpContainer::global() as ContainerRef),
        ))
    }

    /// A smaller atmosphere of the same composition and state, overflowing
    /// into its parent
    pub fn create_subatmosphere(
        this: &Shared<Atmosphere>,
        max_volume: Quantity<Liter>,
    ) -> Shared<Atmosphere> {
        let parent = this.borrow();
        let content: Vec<(Molecule, Quantity<Mole>)> = parent
            .mixture
            .content()
            .iter()
            .map(|r| (r.molecule.clone(), r.amount))
            .collect();
        let sub = Self::new(
            parent.temperature(),
            parent.pressure(),
            &content,
            max_volume,
            Some(this.clone() as ContainerRef),
        );
        sub
    }

    /// One atmospheric timestep: shed any overflow
    pub fn tick(&mut self, _timespan: Quantity<Second>) {
        self.mixture.check_overflow();
    }

    pub fn layer(&self) -> &Layer {
        self.mixture.layer()
    }

    pub fn content(&self) -> &ReactantSet {
        self.mixture.content()
    }

    pub fn temperature(&self) -> Quantity<Celsius> {
        self.mixture.temperature()
    }

    pub fn pressure(&self) -> Quantity<Torr> {
        self.mixture.pressure()
    }

    pub fn total_moles(&self) -> Quantity<Mole> {
        self.mixture.total_moles()
    }

    pub fn total_volume(&self) -> Quantity<Liter> {
        self.mixture.total_volume()
    }

    pub fn max_volume(&self) -> Quantity<Liter> {
        self.mixture.max_volume()
    }

    pub fn amount_of(&self, id: &ReactantId) -> Quantity<Mole> {
        self.mixture.amount_of(id)
    }

    pub fn set_overflow_target(&mut self, target: Option<ContainerRef>) {
        self.mixture.set_overflow_target(target);
    }

    pub fn set_incompatibility_target(&mut self, layer_type: LayerType, target: ContainerRef) {
        self.mixture.set_incompatibility_target(layer_type, target);
    }

    pub fn copy_content_to_container(
        &self,
        destination: &mut dyn Container,
        volume: Quantity<Liter>,
    ) {
        self.mixture.copy_content_to_container(destination, volume);
    }

    pub fn move_content_to(
        &mut self,
        destination: Option<&ContainerRef>,
        volume: Quantity<Liter>,
    ) {
        self.mixture.move_content_to(destination, volume);
    }
}

impl Container for Atmosphere {
    fn add_reactant(&mut self, reactant: Reactant) {
        self.mixture.add_reactant(reactant);
    }

    fn add_energy(&mut self, energy: Quantity<Joule>) {
        self.mixture.add_energy(energy);
    }

    fn total_mass(&self) -> Quantity<Gram> {
        self.mixture.total_mass()
    }
}
