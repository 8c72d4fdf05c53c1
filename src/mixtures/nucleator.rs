//! State nucleators
//!
//! A nucleator tracks the reactant whose phase-transition point bounds the
//! permissible temperature of a layer in one direction. The tracked
//! transition is a small enum dispatched against the `Reactant` API.
//! Upward transitions carry positive latent heats (energy absorbed),
//! downward transitions negative ones (energy released), which keeps the
//! heating and cooling drains of `consume_potential_energy` exact mirrors.

use crate::mixtures::reactant::Reactant;
use crate::quantities::{Celsius, JoulePerMole, Quantity, Torr};

/// Which phase transition a nucleator tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Solid melting into liquid; positive heat at the melting point
    Fusion,
    /// Liquid boiling into gas; positive heat at the boiling point
    Vaporization,
    /// Gas condensing into liquid; negative heat at the boiling point
    Condensation,
    /// Liquid freezing into solid; negative heat at the melting point
    Solidification,
}

impl Transition {
    pub fn point(self, reactant: &Reactant, pressure: Quantity<Torr>) -> Quantity<Celsius> {
        match self {
            Transition::Fusion | Transition::Solidification => reactant.melting_point(pressure),
            Transition::Vaporization | Transition::Condensation => reactant.boiling_point(pressure),
        }
    }

    pub fn heat(
        self,
        reactant: &Reactant,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMole> {
        match self {
            Transition::Fusion => reactant.fusion_heat(temperature, pressure),
            Transition::Vaporization => reactant.vaporization_heat(temperature, pressure),
            Transition::Condensation => reactant.condensation_heat(temperature, pressure),
            Transition::Solidification => reactant.solidification_heat(temperature, pressure),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StateNucleator {
    transition: Option<Transition>,
    reactant: Option<Reactant>,
}

impl StateNucleator {
    pub fn new(transition: Transition) -> Self {
        Self {
            transition: Some(transition),
            reactant: None,
        }
    }

    /// A nucleator slot that tracks no transition at all
    pub fn none() -> Self {
        Self::default()
    }

    pub fn set_reactant(&mut self, reactant: Reactant) {
        self.reactant = Some(reactant);
    }

    pub fn unset(&mut self) {
        self.reactant = None;
    }

    /// No transition is tracked in this slot
    pub fn is_null(&self) -> bool {
        self.transition.is_none()
    }

    pub fn is_set(&self) -> bool {
        self.reactant.is_some()
    }

    pub fn is_valid(&self) -> bool {
        !self.is_null() && self.is_set()
    }

    pub fn reactant(&self) -> Option<&Reactant> {
        self.reactant.as_ref()
    }

    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    pub fn transition_point(&self, pressure: Quantity<Torr>) -> Quantity<Celsius> {
        match (&self.transition, &self.reactant) {
            (Some(transition), Some(reactant)) => transition.point(reactant, pressure),
            _ => Quantity::UNKNOWN,
        }
    }

    pub fn transition_heat(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMole> {
        match (&self.transition, &self.reactant) {
            (Some(transition), Some(reactant)) => transition.heat(reactant, temperature, pressure),
            _ => Quantity::UNKNOWN,
        }
    }

    /// Track `other` when its transition point is below the current one
    pub fn set_if_lower(&mut self, other: &Reactant, pressure: Quantity<Torr>) -> bool {
        let Some(transition) = self.transition else {
            return false;
        };
        let replace = match &self.reactant {
            None => true,
            Some(current) => {
                transition.point(other, pressure) < transition.point(current, pressure)
            }
        };
        if replace {
            self.set_reactant(other.clone());
        }
        replace
    }

    /// Track `other` when its transition point is above the current one
    pub fn set_if_higher(&mut self, other: &Reactant, pressure: Quantity<Torr>) -> bool {
        let Some(transition) = self.transition else {
            return false;
        };
        let replace = match &self.reactant {
            None => true,
            Some(current) => {
                transition.point(other, pressure) > transition.point(current, pressure)
            }
        };
        if replace {
            self.set_reactant(other.clone());
        }
        replace
    }
}
