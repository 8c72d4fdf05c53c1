//! Molecule handles and their thermophysical data
//!
//! A `Molecule` is a cheap immutable handle to registered `MoleculeData`:
//! the structure plus the estimators answering every temperature- and
//! pressure-dependent property query the mixture kernel makes.

use crate::constants;
use crate::molecules::estimator::Estimator;
use crate::molecules::structure::MolecularStructure;
use crate::quantities::{
    Celsius, GramPerMilliliter, GramPerMole, JoulePerMole, JoulePerMoleCelsius, MoleRatio,
    Quantity, Torr,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

pub type MoleculeId = u32;

/// Physical phase of a substance at some temperature and pressure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Gas,
    Liquid,
    Solid,
}

/// Hydrophilic/lipophilic affinity pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Polarity {
    pub hydrophilicity: f64,
    pub lipophilicity: f64,
}

impl Polarity {
    pub fn new(hydrophilicity: f64, lipophilicity: f64) -> Self {
        Self {
            hydrophilicity,
            lipophilicity,
        }
    }

    pub fn is_polar(&self) -> bool {
        self.hydrophilicity >= self.lipophilicity
    }
}

impl Default for Polarity {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

/// RGBA colour of a pure substance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self {
            r: 255,
            g: 255,
            b: 255,
            a: 0,
        }
    }
}

/// Estimator slots for every property the kernel queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeProperties {
    /// Melting point (°C) at pressure (torr)
    pub melting_point: Estimator,
    /// Boiling point (°C) at pressure (torr)
    pub boiling_point: Estimator,
    /// Liquid density (g/mL) at temperature (°C)
    pub liquid_density: Estimator,
    /// Solid density (g/mL) at temperature (°C)
    pub solid_density: Estimator,
    /// Liquid heat capacity (J/(mol·°C)) at pressure (torr)
    pub liquid_heat_capacity: Estimator,
    /// Solid heat capacity (J/(mol·°C)) at pressure (torr)
    pub solid_heat_capacity: Estimator,
    /// Fusion latent heat (J/mol) at (temperature, pressure)
    pub fusion_heat: Estimator,
    /// Vaporization latent heat (J/mol) at (temperature, pressure)
    pub vaporization_heat: Estimator,
    /// Sublimation latent heat (J/mol) at (temperature, pressure)
    pub sublimation_heat: Estimator,
    /// Henry-law constant at temperature (°C)
    pub henry_constant: Estimator,
    /// Relative solubility scale at temperature (°C)
    pub relative_solubility: Estimator,
}

impl Default for MoleculeProperties {
    fn default() -> Self {
        Self {
            melting_point: Estimator::Constant(0.0),
            boiling_point: Estimator::Constant(100.0),
            liquid_density: Estimator::Constant(1.0),
            solid_density: Estimator::Constant(1.2),
            liquid_heat_capacity: Estimator::Constant(75.0),
            solid_heat_capacity: Estimator::Constant(40.0),
            fusion_heat: Estimator::Constant(6000.0),
            vaporization_heat: Estimator::Constant(40000.0),
            sublimation_heat: Estimator::Constant(46000.0),
            henry_constant: Estimator::Constant(1.0),
            relative_solubility: Estimator::Constant(1.0),
        }
    }
}

/// Immutable data of a registered molecule
#[derive(Debug, Clone)]
pub struct MoleculeData {
    pub id: MoleculeId,
    pub name: String,
    pub structure: MolecularStructure,
    pub polarity: Polarity,
    pub color: Color,
    pub properties: MoleculeProperties,
}

/// Cheap immutable handle to a registered molecule; equality is by id
#[derive(Debug, Clone)]
pub struct Molecule {
    data: Rc<MoleculeData>,
}

impl Molecule {
    pub fn new(data: Rc<MoleculeData>) -> Self {
        Self { data }
    }

    pub fn id(&self) -> MoleculeId {
        self.data.id
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn structure(&self) -> &MolecularStructure {
        &self.data.structure
    }

    pub fn polarity(&self) -> Polarity {
        self.data.polarity
    }

    pub fn color(&self) -> Color {
        self.data.color
    }

    pub fn molar_mass(&self) -> Quantity<GramPerMole> {
        self.data.structure.molar_mass()
    }

    pub fn melting_point_at(&self, pressure: Quantity<Torr>) -> Quantity<Celsius> {
        Quantity::new(self.data.properties.melting_point.get(pressure.value()))
    }

    pub fn boiling_point_at(&self, pressure: Quantity<Torr>) -> Quantity<Celsius> {
        Quantity::new(self.data.properties.boiling_point.get(pressure.value()))
    }

    pub fn aggregation_at(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Aggregation {
        if temperature > self.boiling_point_at(pressure) {
            Aggregation::Gas
        } else if temperature > self.melting_point_at(pressure) {
            Aggregation::Liquid
        } else {
            Aggregation::Solid
        }
    }

    pub fn density_at(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<GramPerMilliliter> {
        match self.aggregation_at(temperature, pressure) {
            Aggregation::Gas => constants::ideal_gas_density(temperature, pressure, self.molar_mass()),
            Aggregation::Liquid => {
                Quantity::new(self.data.properties.liquid_density.get(temperature.value()))
            }
            Aggregation::Solid => {
                Quantity::new(self.data.properties.solid_density.get(temperature.value()))
            }
        }
    }

    pub fn heat_capacity_at(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMoleCelsius> {
        match self.aggregation_at(temperature, pressure) {
            Aggregation::Gas => {
                constants::isobaric_heat_capacity(self.data.structure.degrees_of_freedom())
            }
            Aggregation::Liquid => Quantity::new(
                self.data.properties.liquid_heat_capacity.get(pressure.value()),
            ),
            Aggregation::Solid => Quantity::new(
                self.data.properties.solid_heat_capacity.get(pressure.value()),
            ),
        }
    }

    pub fn fusion_heat_at(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMole> {
        Quantity::new(
            self.data
                .properties
                .fusion_heat
                .get2(temperature.value(), pressure.value()),
        )
    }

    pub fn vaporization_heat_at(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMole> {
        Quantity::new(
            self.data
                .properties
                .vaporization_heat
                .get2(temperature.value(), pressure.value()),
        )
    }

    pub fn sublimation_heat_at(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMole> {
        Quantity::new(
            self.data
                .properties
                .sublimation_heat
                .get2(temperature.value(), pressure.value()),
        )
    }

    /// Heat released when condensing: the negated vaporization heat
    pub fn condensation_heat_at(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMole> {
        -self.vaporization_heat_at(temperature, pressure)
    }

    /// Heat released when freezing: the negated fusion heat
    pub fn solidification_heat_at(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMole> {
        -self.fusion_heat_at(temperature, pressure)
    }

    /// Heat released when depositing: the negated sublimation heat
    pub fn deposition_heat_at(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
    ) -> Quantity<JoulePerMole> {
        -self.sublimation_heat_at(temperature, pressure)
    }

    /// Relative solubility in a solvent of the given polarity
    pub fn solubility_at(
        &self,
        temperature: Quantity<Celsius>,
        pressure: Quantity<Torr>,
        solvent_polarity: Polarity,
    ) -> Quantity<MoleRatio> {
        if self.aggregation_at(temperature, pressure) == Aggregation::Gas {
            let henry = self.data.properties.henry_constant.get(temperature.value());
            return Quantity::new(pressure.value() / henry);
        }

        let polarity = self.data.polarity;
        let base = (polarity.hydrophilicity * solvent_polarity.hydrophilicity
            + polarity.lipophilicity * solvent_polarity.lipophilicity)
            / (solvent_polarity.hydrophilicity + solvent_polarity.lipophilicity);
        let scale = self
            .data
            .properties
            .relative_solubility
            .get(temperature.value());
        Quantity::new(base * scale)
    }
}

impl PartialEq for Molecule {
    fn eq(&self, other: &Self) -> bool {
        self.data.id == other.data.id
    }
}

impl Eq for Molecule {}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data.name)
    }
}
