//! Reactants: a molecule amount bound to an aggregation layer
//!
//! Every temperature- or pressure-dependent property getter takes the
//! thermodynamic environment of the owning layer explicitly; reactants hold
//! no reference back to their container.

use crate::mixtures::LayerType;
use crate::molecules::{Aggregation, Molecule, MoleculeId, Polarity};
use crate::quantities::{
    Celsius, Gram, GramPerMilliliter, JoulePerMole, JoulePerMoleCelsius, Liter, Mole, MoleRatio,
    Quantity, Torr,
};

/// Identity of a reactant inside a mixture: one entry per molecule per layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReactantId {
    pub layer: LayerType,
    pub molecule_id: MoleculeId,
}

impl ReactantId {
    pub fn new(molecule_id: MoleculeId, layer: LayerType) -> Self {
        Self { layer, molecule_id }
    }
}

#[derive(Debug, Clone)]
pub struct Reactant {
    pub molecule: Molecule,
    pub layer: LayerType,
    pub amount: Quantity<Mole>,
    /// Not yet considered by reaction discovery
    pub is_new: bool,
}

impl Reactant {
    pub fn new(molecule: Molecule, layer: LayerType, amount: Quantity<Mole>) -> Self {
        Self {
            molecule,
            layer,
            amount,
            is_new: true,
        }
    }

    pub fn id(&self) -> ReactantId {
        ReactantId::new(self.molecule.id(), self.layer)
    }

    /// A copy with a different amount
    pub fn with_amount(&self, amount: Quantity<Mole>) -> Reactant {
        Reactant::new(self.molecule.clone(), self.layer, amount)
    }

    /// A copy with a different layer
    pub fn with_layer(&self, layer: LayerType) -> Reactant {
        Reactant::new(self.molecule.clone(), layer, self.amount)
    }

    /// A copy with a different amount and layer
    pub fn with_amount_and_layer(&self, amount: Quantity<Mole>, layer: LayerType) -> Reactant {
        Reactant::new(self.molecule.clone(), layer, amount)
    }

    pub fn mass(&self) -> Quantity<Gram> {
        self.amount.to_mass(self.molecule.molar_mass())
    }

    pub fn density(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<GramPerMilliliter> {
        self.molecule.density_at(temperature, pressure)
    }

    pub fn volume(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<Liter> {
        self.mass().to_volume(self.density(temperature, pressure))
    }

    pub fn melting_point(&self, pressure: Quantity<Torr>) -> Quantity<Celsius> {
        self.molecule.melting_point_at(pressure)
    }

    pub fn boiling_point(&self, pressure: Quantity<Torr>) -> Quantity<Celsius> {
        self.molecule.boiling_point_at(pressure)
    }

    pub fn heat_capacity(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMoleCelsius> {
        self.molecule.heat_capacity_at(temperature, pressure)
    }

    pub fn fusion_heat(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMole> {
        self.molecule.fusion_heat_at(temperature, pressure)
    }

    pub fn vaporization_heat(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMole> {
        self.molecule.vaporization_heat_at(temperature, pressure)
    }

    pub fn condensation_heat(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMole> {
        self.molecule.condensation_heat_at(temperature, pressure)
    }

    pub fn solidification_heat(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMole> {
        self.molecule.solidification_heat_at(temperature, pressure)
    }

    pub fn sublimation_heat(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMole> {
        self.molecule.sublimation_heat_at(temperature, pressure)
    }

    pub fn deposition_heat(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMole> {
        self.molecule.deposition_heat_at(temperature, pressure)
    }

    pub fn aggregation_at(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Aggregation {
        self.molecule.aggregation_at(temperature, pressure)
    }

    pub fn solubility_in(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
        solvent_polarity: Polarity,
    ) -> Quantity<MoleRatio> {
        self.molecule
            .solubility_at(temperature, pressure, solvent_polarity)
    }
}
