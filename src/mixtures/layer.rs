//! Per-phase physical aggregates
//!
//! A `Layer` carries the cached totals, the pending potential energy and
//! the two nucleator slots of one aggregation phase. The algorithms that
//! move matter between layers live on `MultiLayerMixture`; everything here
//! reads the layer plus the shared content.

use crate::constants::MOLAR_EXISTENCE_THRESHOLD;
use crate::mixtures::layer_type::LayerType;
use crate::mixtures::nucleator::{StateNucleator, Transition};
use crate::mixtures::reactant::Reactant;
use crate::mixtures::reactant_set::ReactantSet;
use crate::molecules::{Color, Polarity};
use crate::quantities::{
    Celsius, Gram, Joule, JoulePerCelsius, JoulePerMole, JoulePerMoleCelsius, Liter, Mole,
    Quantity, Torr,
};

#[derive(Debug, Clone)]
pub struct Layer {
    layer_type: LayerType,
    pub(crate) temperature: Quantity<Celsius>,
    pub(crate) moles: Quantity<Mole>,
    pub(crate) mass: Quantity<Gram>,
    pub(crate) volume: Quantity<Liter>,
    pub(crate) potential_energy: Quantity<Joule>,
    pub(crate) polarity: Polarity,
    pub(crate) low_nucleator: StateNucleator,
    pub(crate) high_nucleator: StateNucleator,
}

impl Layer {
    pub fn new(layer_type: LayerType, temperature: Quantity<Celsius>) -> Self {
        let (low_nucleator, high_nucleator) = if layer_type.is_liquid_layer() {
            (
                StateNucleator::new(Transition::Solidification),
                StateNucleator::new(Transition::Vaporization),
            )
        } else if layer_type.is_gas_layer() {
            (StateNucleator::new(Transition::Condensation), StateNucleator::none())
        } else if layer_type.is_solid_layer() {
            (StateNucleator::none(), StateNucleator::new(Transition::Fusion))
        } else {
            (StateNucleator::none(), StateNucleator::none())
        };

        Self {
            layer_type,
            temperature,
            moles: Quantity::ZERO,
            mass: Quantity::ZERO,
            volume: Quantity::ZERO,
            potential_energy: Quantity::ZERO,
            polarity: Polarity::new(0.0, 0.0),
            low_nucleator,
            high_nucleator,
        }
    }

    pub fn layer_type(&self) -> LayerType {
        self.layer_type
    }

    pub fn temperature(&self) -> Quantity<Celsius> {
        self.temperature
    }

    pub fn moles(&self) -> Quantity<Mole> {
        self.moles
    }

    pub fn mass(&self) -> Quantity<Gram> {
        self.mass
    }

    pub fn volume(&self) -> Quantity<Liter> {
        self.volume
    }

    pub fn potential_energy(&self) -> Quantity<Joule> {
        self.potential_energy
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Holds nothing above the existence threshold
    pub fn is_empty(&self) -> bool {
        self.moles < MOLAR_EXISTENCE_THRESHOLD
    }

    pub fn has_low_nucleator(&self) -> bool {
        self.low_nucleator.is_valid()
    }

    pub fn has_high_nucleator(&self) -> bool {
        self.high_nucleator.is_valid()
    }

    pub fn low_nucleator(&self) -> &StateNucleator {
        &self.low_nucleator
    }

    pub fn high_nucleator(&self) -> &StateNucleator {
        &self.high_nucleator
    }

    pub fn min_allowed_temperature(&self, pressure: Quantity<Torr>) -> Quantity<Celsius> {
        if self.low_nucleator.is_valid() {
            self.low_nucleator.transition_point(pressure)
        } else {
            -Quantity::INFINITY
        }
    }

    pub fn max_allowed_temperature(&self, pressure: Quantity<Torr>) -> Quantity<Celsius> {
        if self.high_nucleator.is_valid() {
            self.high_nucleator.transition_point(pressure)
        } else {
            Quantity::INFINITY
        }
    }

    /// Whether a reactant of this layer is in the wrong phase for the
    /// layer's current temperature.
    pub fn has_temporary_state(&self, reactant: &Reactant, pressure: Quantity<Torr>) -> bool {
        if self.layer_type.is_liquid_layer() {
            reactant.boiling_point(pressure) < self.temperature
                || reactant.melting_point(pressure) > self.temperature
        } else if self.layer_type.is_gas_layer() {
            reactant.boiling_point(pressure) > self.temperature
        } else {
            reactant.melting_point(pressure) < self.temperature
        }
    }

    /// Mass-weighted molar heat capacity over the layer's reactants,
    /// skipping temporary-state ones.
    pub fn heat_capacity(
        &self,
        content: &ReactantSet,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMoleCelsius> {
        let mut weighted: Quantity<JoulePerMoleCelsius> = Quantity::ZERO;
        let mut mass: Quantity<Gram> = Quantity::ZERO;
        for reactant in content.iter() {
            if reactant.layer == self.layer_type && !self.has_temporary_state(reactant, pressure) {
                weighted += reactant.heat_capacity(self.temperature, pressure)
                    * reactant.mass().value();
                mass += reactant.mass();
            }
        }
        if mass == Quantity::ZERO {
            return Quantity::ZERO;
        }
        weighted / mass.value()
    }

    /// Heat capacity of the whole layer in J/°C, over non-temporary moles
    pub fn total_heat_capacity(
        &self,
        content: &ReactantSet,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerCelsius> {
        let mut moles: Quantity<Mole> = Quantity::ZERO;
        for reactant in content.iter() {
            if reactant.layer == self.layer_type && !self.has_temporary_state(reactant, pressure) {
                moles += reactant.amount;
            }
        }
        self.heat_capacity(content, pressure).to_total(moles)
    }

    pub fn kinetic_energy(
        &self,
        content: &ReactantSet,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMole> {
        self.heat_capacity(content, pressure)
            .to_molar_energy(self.temperature)
    }

    /// The least energy that moves this layer's temperature to `target`.
    /// At a transition plateau the latent budget of the nucleator applies;
    /// more energy might be needed past it.
    pub fn least_energy_diff(
        &self,
        target: Quantity<Celsius>,
        content: &ReactantSet,
        pressure: Quantity<Torr>,
    ) -> Quantity<Joule> {
        if target > self.temperature {
            let transition_point = self.max_allowed_temperature(pressure);
            if self.temperature == transition_point && !transition_point.is_infinity() {
                if let Some(nucleator) = self.high_nucleator.reactant() {
                    let moles = content.amount_of(&nucleator.id());
                    return self
                        .high_nucleator
                        .transition_heat(self.temperature, pressure)
                        .to_energy(moles);
                }
            }
            return self
                .total_heat_capacity(content, pressure)
                .to_energy(target.min(transition_point) - self.temperature);
        }

        let transition_point = self.min_allowed_temperature(pressure);
        if self.temperature == transition_point && !(-transition_point).is_infinity() {
            if let Some(nucleator) = self.low_nucleator.reactant() {
                let moles = content.amount_of(&nucleator.id());
                return self
                    .low_nucleator
                    .transition_heat(self.temperature, pressure)
                    .to_energy(moles);
            }
        }
        self.total_heat_capacity(content, pressure)
            .to_energy(target.max(transition_point) - self.temperature)
    }

    /// Offer a reactant to both nucleator slots
    pub fn set_if_nucleator(&mut self, reactant: &Reactant, pressure: Quantity<Torr>) {
        self.low_nucleator.set_if_lower(reactant, pressure);
        self.high_nucleator.set_if_higher(reactant, pressure);
    }

    /// Invalidate any nucleator slot tracking this molecule. Returns whether
    /// a slot was invalidated and a rescan is needed.
    pub fn unset_if_nucleator(&mut self, reactant: &Reactant) -> bool {
        let mut unset = false;
        let tracks_low = self
            .low_nucleator
            .reactant()
            .is_some_and(|r| r.molecule == reactant.molecule);
        if tracks_low {
            self.low_nucleator.unset();
            unset = true;
        }
        let tracks_high = self
            .high_nucleator
            .reactant()
            .is_some_and(|r| r.molecule == reactant.molecule);
        if tracks_high {
            self.high_nucleator.unset();
            unset = true;
        }
        unset
    }

    /// Rescan the content for the lowest transition point above the
    /// existence threshold.
    pub fn find_new_low_nucleator(&mut self, content: &ReactantSet, pressure: Quantity<Torr>) {
        self.low_nucleator.unset();
        for reactant in content.iter() {
            if reactant.layer == self.layer_type && reactant.amount >= MOLAR_EXISTENCE_THRESHOLD {
                self.low_nucleator.set_if_lower(reactant, pressure);
            }
        }
    }

    /// Rescan the content for the highest transition point above the
    /// existence threshold.
    pub fn find_new_high_nucleator(&mut self, content: &ReactantSet, pressure: Quantity<Torr>) {
        self.high_nucleator.unset();
        for reactant in content.iter() {
            if reactant.layer == self.layer_type && reactant.amount >= MOLAR_EXISTENCE_THRESHOLD {
                self.high_nucleator.set_if_higher(reactant, pressure);
            }
        }
    }

    /// Amount-weighted additive blend of the constituent colours
    pub fn color(&self, content: &ReactantSet) -> Color {
        if self.is_empty() {
            return Color::default();
        }

        let mut div = 0.0;
        let (mut red, mut green, mut blue, mut alpha) = (0.0, 0.0, 0.0, 0.0);
        for reactant in content.iter() {
            if reactant.layer != self.layer_type {
                continue;
            }
            let color = reactant.molecule.color();
            let amount = reactant.amount.value();
            let a = color.a as f64;
            red += color.r as f64 * a * amount;
            green += color.g as f64 * a * amount;
            blue += color.b as f64 * a * amount;
            alpha += a * a * amount;
            div += a * amount;
        }
        if div == 0.0 {
            return Color::default();
        }

        alpha /= div;
        alpha = if self.layer_type.is_gas_layer() {
            alpha * 50.0 / 255.0
        } else if self.layer_type.is_liquid_layer() {
            alpha * 150.0 / 255.0
        } else {
            alpha
        };

        Color {
            r: (red / div) as u8,
            g: (green / div) as u8,
            b: (blue / div) as u8,
            a: alpha as u8,
        }
    }

    pub fn equals(&self, other: &Layer, epsilon: f64) -> bool {
        self.temperature.equals(other.temperature, epsilon)
            && self.potential_energy.equals(other.potential_energy, epsilon)
            && self.moles.equals(other.moles, epsilon)
            && self.mass.equals(other.mass, epsilon)
            && self.volume.equals(other.volume, epsilon)
    }
}
