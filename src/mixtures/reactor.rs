//! The reactor: a ticking multi-layer vessel
//!
//! Each tick runs the five phases strictly in order behind their flags:
//! overflow, negligible removal, reaction discovery + application,
//! inter-layer heat conduction, and the potential-energy drain.

use crate::constants::{FAVOURABLE_CONDUCTIVITY, UNFAVOURABLE_CONDUCTIVITY};
use crate::error::{SimulationError, SimulationResult};
use crate::mixtures::atmosphere::Atmosphere;
use crate::mixtures::container::{Container, ContainerRef};
use crate::mixtures::layer::Layer;
use crate::mixtures::layer_type::LayerType;
use crate::mixtures::multi_layer::MultiLayerMixture;
use crate::mixtures::reactant::{Reactant, ReactantId};
use crate::molecules::{DataStore, Molecule};
use crate::quantities::{Gram, Joule, Liter, Mole, Quantity, Second, Torr};
use crate::reactions::ConcreteReaction;
use crate::types::{Shared, shared};
use std::ops::{BitOr, Sub};
use std::rc::Rc;
use tracing::trace;

/// Which tick phases run; a bit-flag set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickMode(u8);

impl TickMode {
    pub const NONE: TickMode = TickMode(0);
    pub const OVERFLOW: TickMode = TickMode(1 << 0);
    pub const NEGLIGIBLES: TickMode = TickMode(1 << 1);
    pub const REACTIONS: TickMode = TickMode(1 << 2);
    pub const CONDUCTION: TickMode = TickMode(1 << 3);
    pub const ENERGY: TickMode = TickMode(1 << 4);
    pub const ALL: TickMode = TickMode(0b1_1111);

    pub fn has(self, flags: TickMode) -> bool {
        self.0 & flags.0 != 0
    }

    pub fn raise(&mut self, flags: TickMode) {
        self.0 |= flags.0;
    }

    pub fn remove(&mut self, flags: TickMode) {
        self.0 &= !flags.0;
    }
}

impl BitOr for TickMode {
    type Output = TickMode;

    fn bitor(self, other: TickMode) -> TickMode {
        TickMode(self.0 | other.0)
    }
}

impl Sub for TickMode {
    type Output = TickMode;

    fn sub(self, other: TickMode) -> TickMode {
        TickMode(self.0 & !other.0)
    }
}

pub struct Reactor {
    store: Rc<DataStore>,
    mixture: MultiLayerMixture,
    stir_speed: f64,
    tick_mode: TickMode,
    /// Concrete reactions discovered so far; grown incrementally, never
    /// shrunk within a lifetime
    cached_reactions: Vec<ConcreteReaction>,
}

impl Reactor {
    pub fn new(
        store: Rc<DataStore>,
        atmosphere: &Shared<Atmosphere>,
        max_volume: Quantity<Liter>,
        overflow_target: Option<ContainerRef>,
    ) -> Shared<Reactor> {
        let mixture = MultiLayerMixture::new(&atmosphere.borrow(), max_volume, overflow_target);
        shared(Reactor {
            store,
            mixture,
            stir_speed: 0.0,
            tick_mode: TickMode::ALL,
            cached_reactions: Vec::new(),
        })
    }

    /// A reactor overflowing back into its atmosphere
    pub fn new_in_atmosphere(
        store: Rc<DataStore>,
        atmosphere: &Shared<Atmosphere>,
        max_volume: Quantity<Liter>,
    ) -> Shared<Reactor> {
        let target = atmosphere.clone() as ContainerRef;
        Self::new(store, atmosphere, max_volume, Some(target))
    }

    pub fn add(&mut self, molecule: Molecule, amount: Quantity<Mole>) {
        self.mixture
            .add_reactant(Reactant::new(molecule, LayerType::None, amount));
    }

    pub fn add_energy(&mut self, energy: Quantity<Joule>) {
        self.mixture.add_energy(energy);
    }

    /// Target pending energy at a single layer, the way a heat source
    /// touching that phase would
    pub fn add_energy_to_layer(&mut self, energy: Quantity<Joule>, layer_type: LayerType) {
        self.mixture.add_energy_to_layer(energy, layer_type);
    }

    pub fn tick_mode(&self) -> TickMode {
        self.tick_mode
    }

    pub fn set_tick_mode(&mut self, mode: TickMode) {
        self.tick_mode = mode;
    }

    pub fn stir_speed(&self) -> f64 {
        self.stir_speed
    }

    pub fn set_stir_speed(&mut self, speed: f64) {
        self.stir_speed = speed;
    }

    pub fn pressure(&self) -> Quantity<Torr> {
        self.mixture.pressure()
    }

    pub fn total_moles(&self) -> Quantity<Mole> {
        self.mixture.total_moles()
    }

    pub fn total_mass(&self) -> Quantity<Gram> {
        self.mixture.total_mass()
    }

    pub fn total_volume(&self) -> Quantity<Liter> {
        self.mixture.total_volume()
    }

    pub fn max_volume(&self) -> Quantity<Liter> {
        self.mixture.max_volume()
    }

    pub fn layer(&self, layer_type: LayerType) -> Option<&Layer> {
        self.mixture.layer(layer_type)
    }

    pub fn has_layer(&self, layer_type: LayerType) -> bool {
        self.mixture.has_layer(layer_type)
    }

    pub fn amount_of(&self, id: &ReactantId) -> Quantity<Mole> {
        self.mixture.amount_of(id)
    }

    pub fn mixture(&self) -> &MultiLayerMixture {
        &self.mixture
    }

    pub fn cached_reaction_count(&self) -> usize {
        self.cached_reactions.len()
    }

    /// Advance the simulation by one timestep. Fails fast when any layer
    /// temperature is unknown; no phase runs in that case.
    pub fn tick(&mut self, timespan: Quantity<Second>) -> SimulationResult<()> {
        for layer_type in LayerType::all() {
            if let Some(layer) = self.mixture.layer(layer_type)
                && layer.temperature().is_unknown()
            {
                return Err(SimulationError::UnknownTemperature(layer_type));
            }
        }

        if self.tick_mode.has(TickMode::OVERFLOW) {
            self.mixture.check_overflow();
        }

        if self.tick_mode.has(TickMode::NEGLIGIBLES) {
            self.mixture.remove_negligibles();
        }

        if self.tick_mode.has(TickMode::REACTIONS) {
            self.find_new_reactions();
            self.run_reactions(timespan);
        }

        if self.tick_mode.has(TickMode::CONDUCTION) {
            self.run_layer_energy_conduction(timespan);
        }

        if self.tick_mode.has(TickMode::ENERGY) {
            self.mixture.consume_potential_energy();
        }

        Ok(())
    }

    fn inter_layer_coefficient(first: &Reactant, second: &Reactant) -> f64 {
        if first.layer == second.layer {
            if first.layer.is_solid_layer() {
                return 1e-4;
            }
            return 1.0;
        }

        if !first.layer.is_adjacent_to(second.layer) {
            return 0.0;
        }

        if first.layer.is_solid_layer() {
            if second.layer.is_liquid_layer() {
                return 0.5; // S-L
            }
            return 0.01; // S-G
        }
        if first.layer.is_liquid_layer() {
            if second.layer.is_solid_layer() {
                return 0.5; // L-S
            }
            return 0.1; // L-G
        }
        if second.layer.is_liquid_layer() {
            return 0.1; // G-L
        }
        0.01 // G-S
    }

    fn inter_layer_reactivity(reaction: &ConcreteReaction) -> f64 {
        let mut result: f64 = 1.0;
        for first in reaction.reactants().iter() {
            for second in reaction.reactants().iter() {
                result = result.min(Self::inter_layer_coefficient(first, second));
                if result == 0.0 {
                    return 0.0;
                }
            }
        }
        result
    }

    fn catalytic_reactivity(&self, reaction: &ConcreteReaction) -> f64 {
        for catalyst in reaction.data().catalysts() {
            if self.mixture.content().amount_of_catalyst(catalyst) == Quantity::ZERO {
                return 0.0;
            }
        }
        1.0
    }

    /// Enumerate arrangements-with-repetition of the current reactants up to
    /// the largest rule size, query the network for those containing a new
    /// reactant and grow the cache.
    fn find_new_reactions(&mut self) {
        let max_len = self.store.reactions().max_reactant_count();
        if max_len == 0 {
            for reactant in self.mixture.content_mut().iter_mut() {
                reactant.is_new = false;
            }
            return;
        }

        let reactants = self.mixture.content().to_vec();
        if !reactants.is_empty() {
            let count = reactants.len();
            for length in 1..=max_len {
                let Some(total) = count.checked_pow(length as u32) else {
                    continue;
                };
                for ordinal in 0..total {
                    let mut remainder = ordinal;
                    let arrangement: Vec<Reactant> = (0..length)
                        .map(|_| {
                            let reactant = reactants[remainder % count].clone();
                            remainder /= count;
                            reactant
                        })
                        .collect();
                    if !arrangement.iter().any(|r| r.is_new) {
                        continue;
                    }
                    let found = self
                        .store
                        .reactions()
                        .get_occurring_reactions(&arrangement, &self.store);
                    for reaction in found {
                        if !self.cached_reactions.contains(&reaction) {
                            self.cached_reactions.push(reaction);
                        }
                    }
                }
            }
        }

        for reactant in self.mixture.content_mut().iter_mut() {
            reactant.is_new = false;
        }
    }

    /// Apply every cached reaction at its current rate, clamped so no
    /// reactant amount goes negative.
    fn run_reactions(&mut self, timespan: Quantity<Second>) {
        let reactions = self.cached_reactions.clone();
        for reaction in &reactions {
            let Some(first) = reaction.reactants().any() else {
                continue;
            };
            let Some(layer) = self.mixture.layer(first.layer) else {
                continue;
            };
            if layer.is_empty() {
                continue;
            }
            let temperature = layer.temperature();

            let concentration = self
                .mixture
                .content()
                .amount_of_set(reaction.reactants())
                .to_ratio_of(self.mixture.total_moles());
            let mut extent = reaction
                .data()
                .speed_at(temperature, concentration)
                .to_moles(timespan)
                * self.mixture.total_volume().value()
                * Self::inter_layer_reactivity(reaction)
                * self.catalytic_reactivity(reaction);

            if extent <= Quantity::ZERO {
                continue;
            }

            // clamp to what the reactants can supply
            for reactant in reaction.reactants().iter() {
                let available = self.mixture.amount_of(&reactant.id());
                if available < reactant.amount * extent.value() {
                    extent = available / reactant.amount.value();
                }
            }
            if extent <= Quantity::ZERO {
                continue;
            }

            trace!(
                "Applying reaction {} with extent {extent}.",
                reaction.data().name
            );

            for reactant in reaction.reactants().iter() {
                self.mixture.add_reactant(
                    reactant.with_amount(-(reactant.amount * extent.value())),
                );
            }
            for product in reaction.products().iter() {
                let amount = product.amount * extent.value();
                let layer = self
                    .mixture
                    .find_layer_for(&product.with_amount(amount));
                self.mixture
                    .add_reactant(product.with_amount_and_layer(amount, layer));
            }

            let energy = reaction.data().reaction_energy.to_energy(extent);
            self.mixture.add_energy_to_layer(energy, first.layer);
        }
    }

    /// Conduct heat between adjacent layers: warm layers shed energy
    /// upward readily and downward reluctantly.
    fn run_layer_energy_conduction(&mut self, timespan: Quantity<Second>) {
        let favourable = FAVOURABLE_CONDUCTIVITY.to_energy(timespan).value();
        let unfavourable = UNFAVOURABLE_CONDUCTIVITY.to_energy(timespan).value();

        let layer_types: Vec<LayerType> = LayerType::all()
            .filter(|&l| self.mixture.has_layer(l))
            .collect();

        for &layer_type in &layer_types {
            let (temperature, moles) = {
                let layer = self.mixture.layer(layer_type).expect("layer exists");
                (layer.temperature(), layer.moles())
            };
            let heat_capacity = self.mixture.layer_heat_capacity(layer_type);

            if let Some(above) = self.mixture.layer_above(layer_type) {
                let above_layer = self.mixture.layer(above).expect("layer exists");
                let difference = temperature - above_layer.temperature();
                if difference != Quantity::ZERO {
                    // molecules near the top of a warm layer exceed its
                    // average energy, favouring upward conversion
                    let conducted = if difference > Quantity::ZERO {
                        heat_capacity
                            .to_total(moles)
                            .to_energy(difference)
                            * favourable
                    } else {
                        heat_capacity
                            .to_total(above_layer.moles())
                            .to_energy(difference)
                            * unfavourable
                    };
                    self.mixture.add_energy_to_layer(conducted, above);
                    self.mixture.add_energy_to_layer(-conducted, layer_type);
                }
            }

            if let Some(below) = self.mixture.layer_below(layer_type) {
                let below_layer = self.mixture.layer(below).expect("layer exists");
                let difference = temperature - below_layer.temperature();
                if difference != Quantity::ZERO {
                    let conducted = if difference > Quantity::ZERO {
                        heat_capacity
                            .to_total(moles)
                            .to_energy(difference)
                            * unfavourable
                    } else {
                        heat_capacity
                            .to_total(below_layer.moles())
                            .to_energy(difference)
                            * favourable
                    };
                    self.mixture.add_energy_to_layer(conducted, below);
                    self.mixture.add_energy_to_layer(-conducted, layer_type);
                }
            }
        }
    }

    pub fn has_same_state(&self, other: &Reactor, epsilon: f64) -> bool {
        self.mixture.has_same_state(&other.mixture, epsilon)
    }

    pub fn has_same_content(&self, other: &Reactor, epsilon: f64) -> bool {
        self.mixture.has_same_content(&other.mixture, epsilon)
    }

    pub fn has_same_layers(&self, other: &Reactor, epsilon: f64) -> bool {
        self.mixture.has_same_layers(&other.mixture, epsilon)
    }

    pub fn is_same(&self, other: &Reactor, epsilon: f64) -> bool {
        self.mixture.is_same(&other.mixture, epsilon)
    }

    /// Deep copy: layers, content and the reaction cache are cloned
    pub fn make_copy(&self) -> Shared<Reactor> {
        shared(Reactor {
            store: self.store.clone(),
            mixture: self.mixture.clone(),
            stir_speed: self.stir_speed,
            tick_mode: self.tick_mode,
            cached_reactions: self.cached_reactions.clone(),
        })
    }
}

impl Container for Reactor {
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
