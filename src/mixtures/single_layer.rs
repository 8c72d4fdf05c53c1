//! Single-layer mixtures
//!
//! A vessel holding exactly one aggregation phase, fixed at construction.
//! Reactants of any other layer are not stored but forwarded to the
//! per-layer incompatibility targets.

use crate::constants::MOLAR_EXISTENCE_THRESHOLD;
use crate::mixtures::container::{Container, ContainerRef};
use crate::mixtures::layer::Layer;
use crate::mixtures::layer_type::LayerType;
use crate::mixtures::reactant::{Reactant, ReactantId};
use crate::mixtures::reactant_set::ReactantSet;
use crate::molecules::Molecule;
use crate::quantities::{
    Celsius, Gram, Joule, JoulePerMole, JoulePerMoleCelsius, Liter, Mole, Quantity, Torr,
};
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Clone)]
pub struct SingleLayerMixture {
    layer_type: LayerType,
    content: ReactantSet,
    layer: Layer,
    pressure: Quantity<Torr>,
    max_volume: Quantity<Liter>,
    overflow_target: Option<ContainerRef>,
    incompatibility_targets: BTreeMap<LayerType, ContainerRef>,
}

impl SingleLayerMixture {
    pub fn new(
        layer_type: LayerType,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
        init_content: &[(Molecule, Quantity<Mole>)],
        max_volume: Quantity<Liter>,
        overflow_target: Option<ContainerRef>,
    ) -> Self {
        let mut mixture = Self {
            layer_type,
            content: ReactantSet::new(),
            layer: Layer::new(layer_type, temperature),
            pressure,
            max_volume,
            overflow_target,
            incompatibility_targets: BTreeMap::new(),
        };
        for (molecule, amount) in init_content {
            mixture.add_reactant(Reactant::new(molecule.clone(), layer_type, *amount));
        }
        mixture.scale_to_volume(max_volume);
        mixture
    }

    pub fn layer_type(&self) -> LayerType {
        self.layer_type
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    pub fn content(&self) -> &ReactantSet {
        &self.content
    }

    pub fn pressure(&self) -> Quantity<Torr> {
        self.pressure
    }

    pub fn temperature(&self) -> Quantity<Celsius> {
        self.layer.temperature()
    }

    pub fn max_volume(&self) -> Quantity<Liter> {
        self.max_volume
    }

    pub fn total_moles(&self) -> Quantity<Mole> {
        self.layer.moles()
    }

    pub fn total_mass(&self) -> Quantity<Gram> {
        self.layer.mass()
    }

    pub fn total_volume(&self) -> Quantity<Liter> {
        self.layer.volume()
    }

    pub fn amount_of(&self, id: &ReactantId) -> Quantity<Mole> {
        self.content.amount_of(id)
    }

    pub fn set_overflow_target(&mut self, target: Option<ContainerRef>) {
        self.overflow_target = target;
    }

    pub fn overflow_target(&self) -> Option<&ContainerRef> {
        self.overflow_target.as_ref()
    }

    /// Route reactants of a foreign layer to a container that accepts them
    pub fn set_incompatibility_target(&mut self, layer_type: LayerType, target: ContainerRef) {
        self.incompatibility_targets.insert(layer_type, target);
    }

    pub fn layer_heat_capacity(&self) -> Quantity<JoulePerMoleCelsius> {
        self.layer.heat_capacity(&self.content, self.pressure)
    }

    pub fn layer_kinetic_energy(&self) -> Quantity<JoulePerMole> {
        self.layer.kinetic_energy(&self.content, self.pressure)
    }

    fn apply_to_layer(&mut self, reactant: &Reactant) {
        self.layer.moles += reactant.amount;
        self.layer.mass += reactant.mass();
        self.layer.volume +=
            reactant.volume(self.layer.temperature(), self.pressure);
    }

    /// Add a matching reactant; foreign-layer matter is forwarded to its
    /// incompatibility target or dropped with a warning.
    pub fn add_reactant(&mut self, reactant: Reactant) {
        if reactant.layer != self.layer_type {
            if let Some(target) = self.incompatibility_targets.get(&reactant.layer) {
                target.borrow_mut().add_reactant(reactant);
            } else {
                warn!(
                    "Dropped incompatible {} reactant {}.",
                    reactant.layer,
                    reactant.molecule.name()
                );
            }
            return;
        }

        let applied = self.content.add(reactant.clone());
        if applied == Quantity::ZERO && reactant.amount != Quantity::ZERO {
            return;
        }
        self.apply_to_layer(&reactant.with_amount(applied));

        let pressure = self.pressure;
        if applied.value() > 0.0 {
            self.layer.set_if_nucleator(&reactant, pressure);
        } else if self.content.amount_of(&reactant.id()) < MOLAR_EXISTENCE_THRESHOLD {
            let content = &self.content;
            if self.layer.unset_if_nucleator(&reactant) {
                self.layer.find_new_low_nucleator(content, pressure);
                self.layer.find_new_high_nucleator(content, pressure);
            }
        }
    }

    /// Pending energy; a single-layer vessel never drains it on its own
    pub fn add_energy(&mut self, energy: Quantity<Joule>) {
        self.layer.potential_energy += energy;
    }

    pub fn remove_negligibles(&mut self) {
        let removals: Vec<Reactant> = self
            .content
            .iter()
            .filter(|r| r.amount < MOLAR_EXISTENCE_THRESHOLD)
            .cloned()
            .collect();
        for reactant in &removals {
            self.apply_to_layer(&reactant.with_amount(-reactant.amount));
        }
        self.content
            .erase_if(|r| r.amount < MOLAR_EXISTENCE_THRESHOLD);

        let pressure = self.pressure;
        for reactant in &removals {
            let content = &self.content;
            if self.layer.unset_if_nucleator(reactant) {
                self.layer.find_new_low_nucleator(content, pressure);
                self.layer.find_new_high_nucleator(content, pressure);
            }
        }
    }

    pub fn check_overflow(&mut self) {
        if self.max_volume.is_infinity() {
            return;
        }
        let overflow = self.layer.volume() - self.max_volume;
        if overflow <= Quantity::ZERO {
            return;
        }
        let target = self.overflow_target.clone();
        self.move_content_to(target.as_ref(), overflow);
    }

    /// Scale the content proportionally so the layer occupies `volume`
    pub fn scale_to_volume(&mut self, volume: Quantity<Liter>) {
        if volume.is_infinity() || self.layer.volume() <= Quantity::ZERO {
            return;
        }
        let factor = (volume - self.layer.volume()).value() / self.layer.volume().value();
        if factor == 0.0 {
            return;
        }
        for reactant in self.content.to_vec() {
            self.add_reactant(reactant.with_amount(reactant.amount * factor));
        }
    }

    /// Copy a volume's worth of the layer into a destination container
    pub fn copy_content_to(&self, destination: &ContainerRef, volume: Quantity<Liter>) {
        self.copy_content_to_container(&mut *destination.borrow_mut(), volume);
    }

    /// As `copy_content_to`, addressed without a shared handle
    pub fn copy_content_to_container(&self, destination: &mut dyn Container, volume: Quantity<Liter>) {
        if self.layer.volume() <= Quantity::ZERO {
            return;
        }
        let source_volume = self.layer.volume();
        for reactant in self.content.iter() {
            let moles = reactant.amount * (volume.value() / source_volume.value());
            destination.add_reactant(reactant.with_amount(moles));
        }
    }

    /// Move a volume's worth of the layer into a destination container
    pub fn move_content_to(&mut self, destination: Option<&ContainerRef>, volume: Quantity<Liter>) {
        if self.layer.volume() <= Quantity::ZERO {
            return;
        }
        let source_volume = self.layer.volume();
        let volume = volume.min(source_volume);

        for reactant in self.content.to_vec() {
            let moles = reactant.amount * (volume.value() / source_volume.value());
            if let Some(target) = destination {
                target.borrow_mut().add_reactant(reactant.with_amount(moles));
            }
            self.add_reactant(reactant.with_amount(-moles));
        }
    }
}

impl Container for SingleLayerMixture {
    fn add_reactant(&mut self, reactant: Reactant) {
        SingleLayerMixture::add_reactant(self, reactant);
    }

    fn add_energy(&mut self, energy: Quantity<Joule>) {
        SingleLayerMixture::add_energy(self, energy);
    }

    fn total_mass(&self) -> Quantity<Gram> {
        self.layer.mass()
    }
}
