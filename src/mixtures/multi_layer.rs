//! Multi-layer mixtures
//!
//! Owns the reactant content and a lazily-populated map of aggregation
//! layers, keeps the cached totals in step, and implements the per-layer
//! algorithms that move matter and energy between layers: negligible
//! removal, overflow, temporary-state conversion and the potential-energy
//! drains.

use crate::constants::{MOLAR_EXISTENCE_THRESHOLD, STANDARD_TEMPERATURE};
use crate::mixtures::atmosphere::Atmosphere;
use crate::mixtures::container::{Container, ContainerRef};
use crate::mixtures::layer::Layer;
use crate::mixtures::layer_type::LayerType;
use crate::mixtures::reactant::{Reactant, ReactantId};
use crate::mixtures::reactant_set::ReactantSet;
use crate::molecules::Aggregation;
use crate::quantities::{
    Gram, Joule, JoulePerMole, JoulePerMoleCelsius, Liter, Mole, Quantity, Torr,
};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Clone)]
pub struct MultiLayerMixture {
    content: ReactantSet,
    layers: BTreeMap<LayerType, Layer>,
    pressure: Quantity<Torr>,
    total_moles: Quantity<Mole>,
    total_mass: Quantity<Gram>,
    total_volume: Quantity<Liter>,
    max_volume: Quantity<Liter>,
    overflow_target: Option<ContainerRef>,
}

impl MultiLayerMixture {
    /// A mixture filled with `max_volume` worth of the given atmosphere,
    /// inheriting its temperature and pressure.
    pub fn new(
        atmosphere: &Atmosphere,
        max_volume: Quantity<Liter>,
        overflow_target: Option<ContainerRef>,
    ) -> Self {
        let mut layers = BTreeMap::new();
        layers.insert(
            LayerType::Gaseous,
            Layer::new(LayerType::Gaseous, atmosphere.temperature()),
        );

        let mut mixture = Self {
            content: ReactantSet::new(),
            layers,
            pressure: atmosphere.pressure(),
            total_moles: Quantity::ZERO,
            total_mass: Quantity::ZERO,
            total_volume: Quantity::ZERO,
            max_volume,
            overflow_target,
        };

        if !max_volume.is_infinity() {
            atmosphere.copy_content_to_container(&mut mixture, max_volume);
        }
        mixture
    }

    pub fn pressure(&self) -> Quantity<Torr> {
        self.pressure
    }

    pub fn total_moles(&self) -> Quantity<Mole> {
        self.total_moles
    }

    pub fn total_mass(&self) -> Quantity<Gram> {
        self.total_mass
    }

    pub fn total_volume(&self) -> Quantity<Liter> {
        self.total_volume
    }

    pub fn max_volume(&self) -> Quantity<Liter> {
        self.max_volume
    }

    pub fn set_overflow_target(&mut self, target: Option<ContainerRef>) {
        self.overflow_target = target;
    }

    pub fn content(&self) -> &ReactantSet {
        &self.content
    }

    pub(crate) fn content_mut(&mut self) -> &mut ReactantSet {
        &mut self.content
    }

    pub fn amount_of(&self, id: &ReactantId) -> Quantity<Mole> {
        self.content.amount_of(id)
    }

    pub fn layer(&self, layer_type: LayerType) -> Option<&Layer> {
        self.layers.get(&layer_type)
    }

    /// A layer exists once it holds matter
    pub fn has_layer(&self, layer_type: LayerType) -> bool {
        self.layers
            .get(&layer_type)
            .is_some_and(|layer| !layer.is_empty())
    }

    pub fn layer_heat_capacity(&self, layer_type: LayerType) -> Quantity<JoulePerMoleCelsius> {
        self.layers
            .get(&layer_type)
            .map_or(Quantity::ZERO, |layer| {
                layer.heat_capacity(&self.content, self.pressure)
            })
    }

    pub fn layer_kinetic_energy(&self, layer_type: LayerType) -> Quantity<JoulePerMole> {
        self.layers
            .get(&layer_type)
            .map_or(Quantity::ZERO, |layer| {
                layer.kinetic_energy(&self.content, self.pressure)
            })
    }

    /// Topmost non-empty layer
    pub fn top_layer(&self) -> Option<LayerType> {
        LayerType::all().find(|&l| self.has_layer(l))
    }

    /// Bottommost non-empty layer
    pub fn bottom_layer(&self) -> Option<LayerType> {
        let mut found = None;
        for layer in LayerType::all() {
            if self.has_layer(layer) {
                found = Some(layer);
            }
        }
        found
    }

    /// Nearest non-empty layer above the given one
    pub fn layer_above(&self, layer_type: LayerType) -> Option<LayerType> {
        let mut current = layer_type.above();
        while let Some(layer) = current {
            if self.has_layer(layer) {
                return Some(layer);
            }
            current = layer.above();
        }
        None
    }

    /// Nearest non-empty layer below the given one
    pub fn layer_below(&self, layer_type: LayerType) -> Option<LayerType> {
        let mut current = layer_type.below();
        while let Some(layer) = current {
            if self.has_layer(layer) {
                return Some(layer);
            }
            current = layer.below();
        }
        None
    }

    /// Non-empty layer closest in depth to the given one, preferring the
    /// denser side on ties
    pub fn closest_layer(&self, layer_type: LayerType) -> Option<LayerType> {
        self.layers
            .iter()
            .filter(|(_, layer)| !layer.is_empty())
            .map(|(&l, _)| l)
            .min_by_key(|l| (l.distance(layer_type), Reverse(l.index())))
    }

    /// Choose the layer a reactant belongs to from its aggregation at the
    /// reference temperature plus a polarity check for liquids.
    pub fn find_layer_for(&self, reactant: &Reactant) -> LayerType {
        let reference = self
            .closest_layer(LayerType::Polar)
            .and_then(|l| self.layers.get(&l))
            .map_or(STANDARD_TEMPERATURE, |layer| layer.temperature());

        let mut aggregation = reactant.aggregation_at(reference, self.pressure);
        let mut candidate = self.layer_for_aggregation(aggregation, reactant);

        // one refinement pass against the candidate layer's own temperature
        if let Some(layer) = self.layers.get(&candidate)
            && !layer.is_empty()
        {
            let refined = reactant.aggregation_at(layer.temperature(), self.pressure);
            if refined != aggregation {
                aggregation = refined;
                candidate = self.layer_for_aggregation(aggregation, reactant);
            }
        }
        candidate
    }

    fn layer_for_aggregation(&self, aggregation: Aggregation, reactant: &Reactant) -> LayerType {
        match aggregation {
            Aggregation::Gas => LayerType::Gaseous,
            Aggregation::Solid => LayerType::Solid,
            Aggregation::Liquid => {
                if reactant.molecule.polarity().is_polar() {
                    LayerType::Polar
                } else {
                    LayerType::Nonpolar
                }
            }
        }
    }

    /// Create the layer if missing, inheriting the temperature of the
    /// closest existing layer. A layer emptied to `INFINITY` is re-seeded
    /// the same way when matter returns to it.
    fn ensure_layer(&mut self, layer_type: LayerType) {
        let inherited = self
            .closest_layer(layer_type)
            .and_then(|l| self.layers.get(&l))
            .map_or(STANDARD_TEMPERATURE, |layer| layer.temperature());

        match self.layers.get_mut(&layer_type) {
            Some(layer) => {
                if layer.is_empty() && layer.temperature().is_infinity() {
                    layer.temperature = inherited;
                }
            }
            None => {
                self.layers
                    .insert(layer_type, Layer::new(layer_type, inherited));
            }
        }
    }

    /// Apply a signed reactant delta to the cached layer and total
    /// aggregates.
    fn apply_to_layer(&mut self, reactant: &Reactant) {
        let mass = reactant.mass();
        let volume = {
            let layer = &self.layers[&reactant.layer];
            reactant.volume(layer.temperature(), self.pressure)
        };

        let layer = self.layers.get_mut(&reactant.layer).expect("layer exists");
        layer.moles += reactant.amount;
        layer.mass += mass;
        layer.volume += volume;

        self.total_moles += reactant.amount;
        self.total_mass += mass;
        self.total_volume += volume;
    }

    /// Add a reactant, choosing a layer when none is given, and keep the
    /// aggregates and nucleator slots in step.
    pub fn add_reactant(&mut self, mut reactant: Reactant) {
        if reactant.layer == LayerType::None {
            reactant.layer = self.find_layer_for(&reactant);
        }
        if !reactant.layer.is_real_layer() {
            warn!("Dropped reactant {} without a real layer.", reactant.molecule.name());
            return;
        }

        self.ensure_layer(reactant.layer);
        let applied = self.content.add(reactant.clone());
        if applied == Quantity::ZERO && reactant.amount != Quantity::ZERO {
            return;
        }
        self.apply_to_layer(&reactant.with_amount(applied));

        let pressure = self.pressure;
        if applied.value() > 0.0 {
            let layer = self.layers.get_mut(&reactant.layer).expect("layer exists");
            layer.set_if_nucleator(&reactant, pressure);
        } else if self.content.amount_of(&reactant.id()) < MOLAR_EXISTENCE_THRESHOLD {
            let content = &self.content;
            let layer = self.layers.get_mut(&reactant.layer).expect("layer exists");
            if layer.unset_if_nucleator(&reactant) {
                layer.find_new_low_nucleator(content, pressure);
                layer.find_new_high_nucleator(content, pressure);
            }
        }
    }

    /// Add pending energy to a layer; no temperature change yet
    pub fn add_energy_to_layer(&mut self, energy: Quantity<Joule>, layer_type: LayerType) {
        if !layer_type.is_real_layer() {
            warn!("Dropped {energy} addressed to no layer.");
            return;
        }
        self.ensure_layer(layer_type);
        let layer = self.layers.get_mut(&layer_type).expect("layer exists");
        layer.potential_energy += energy;
    }

    /// Distribute energy across non-empty layers by heat-capacity share
    pub fn add_energy(&mut self, energy: Quantity<Joule>) {
        let shares: Vec<(LayerType, f64)> = self
            .layers
            .iter()
            .filter(|(_, layer)| !layer.is_empty())
            .map(|(&l, layer)| {
                (l, layer.total_heat_capacity(&self.content, self.pressure).value())
            })
            .collect();
        let total: f64 = shares.iter().map(|(_, hc)| hc).sum();
        if total <= 0.0 {
            warn!("Dropped {energy}: mixture has no heat capacity.");
            return;
        }
        for (layer_type, hc) in shares {
            self.add_energy_to_layer(energy * (hc / total), layer_type);
        }
    }

    /// Drop every reactant below the existence threshold, subtracting its
    /// share from the aggregates.
    pub fn remove_negligibles(&mut self) {
        let removals: Vec<Reactant> = self
            .content
            .iter()
            .filter(|r| r.layer.is_real_layer() && r.amount < MOLAR_EXISTENCE_THRESHOLD)
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
            if let Some(layer) = self.layers.get_mut(&reactant.layer)
                && layer.unset_if_nucleator(reactant)
            {
                layer.find_new_low_nucleator(content, pressure);
                layer.find_new_high_nucleator(content, pressure);
            }
        }
    }

    /// Spill matter from the topmost layers into the overflow target until
    /// the content fits the vessel again.
    pub fn check_overflow(&mut self) {
        if self.max_volume.is_infinity() {
            return;
        }
        let mut overflow = self.total_volume - self.max_volume;
        if overflow <= Quantity::ZERO {
            return;
        }

        let target = self.overflow_target.clone();
        loop {
            let Some(top) = self.top_layer() else { break };
            let top_volume = self.layers[&top].volume();
            if top_volume <= Quantity::ZERO {
                break;
            }
            if overflow > top_volume {
                overflow -= top_volume;
                self.move_content_to(target.as_ref(), top_volume, top);
            } else {
                self.move_content_to(target.as_ref(), overflow, top);
                break;
            }
        }
    }

    /// Copy a volume's worth of a layer, proportionally across its
    /// reactants, into a destination container.
    pub fn copy_content_to(
        &self,
        destination: &ContainerRef,
        volume: Quantity<Liter>,
        source_layer: LayerType,
    ) {
        let Some(layer) = self.layers.get(&source_layer) else {
            return;
        };
        if layer.is_empty() {
            return;
        }
        let source_volume = layer.volume();

        for reactant in self.content.iter() {
            if reactant.layer != source_layer {
                continue;
            }
            let moles = reactant.amount * (volume.value() / source_volume.value());
            destination
                .borrow_mut()
                .add_reactant(reactant.with_amount(moles));
        }
    }

    /// As `copy_content_to`, but the moved moles are also subtracted here.
    /// The destination may be absent, in which case matter is discarded.
    pub fn move_content_to(
        &mut self,
        destination: Option<&ContainerRef>,
        volume: Quantity<Liter>,
        source_layer: LayerType,
    ) {
        let Some(layer) = self.layers.get(&source_layer) else {
            return;
        };
        if layer.is_empty() {
            return;
        }
        let source_volume = layer.volume();
        let volume = volume.min(source_volume);

        let snapshot: Vec<Reactant> = self
            .content
            .iter()
            .filter(|r| r.layer == source_layer)
            .cloned()
            .collect();
        for reactant in snapshot {
            let moles = reactant.amount * (volume.value() / source_volume.value());
            if let Some(target) = destination {
                target.borrow_mut().add_reactant(reactant.with_amount(moles));
            }
            self.add_reactant(reactant.with_amount(-moles));
        }
    }

    /// Convert reactants sitting in the wrong phase for their layer's
    /// temperature, moving them to the adjacent aggregation layer and
    /// exchanging the latent heat with this layer. Reactants are handled one
    /// by one in id order; each conversion is bounded by the least energy
    /// needed to bring the layer to the reactant's transition point.
    pub fn convert_temporary_state_reactants(&mut self, layer_type: LayerType) {
        if !self.layers.contains_key(&layer_type) {
            return;
        }
        let pressure = self.pressure;
        let snapshot: Vec<Reactant> = self
            .content
            .iter()
            .filter(|r| r.layer == layer_type)
            .cloned()
            .collect();

        for reactant in snapshot {
            let current = self.content.amount_of(&reactant.id());
            if current <= Quantity::ZERO {
                continue;
            }
            let layer = &self.layers[&layer_type];
            let temperature = layer.temperature();

            if layer_type.is_liquid_layer() {
                let boiling_point = reactant.boiling_point(pressure);
                if boiling_point < temperature {
                    // evaporate: latent heat leaves this layer with the vapour
                    let heat = reactant.vaporization_heat(temperature, pressure);
                    let available =
                        -layer.least_energy_diff(boiling_point, &self.content, pressure);
                    let converted = current.min(available.to_moles(heat));
                    if converted > Quantity::ZERO {
                        self.add_reactant(
                            reactant.with_amount_and_layer(converted, LayerType::Gaseous),
                        );
                        self.add_reactant(reactant.with_amount(-converted));
                        self.add_energy_to_layer(-heat.to_energy(converted), layer_type);
                    }
                    continue;
                }

                let melting_point = reactant.melting_point(pressure);
                if melting_point > temperature {
                    // freeze: released fusion heat warms this layer
                    let heat = reactant.fusion_heat(temperature, pressure);
                    let budget = layer.least_energy_diff(melting_point, &self.content, pressure);
                    let converted = current.min(budget.to_moles(heat));
                    if converted > Quantity::ZERO {
                        self.add_reactant(
                            reactant.with_amount_and_layer(converted, LayerType::Solid),
                        );
                        self.add_reactant(reactant.with_amount(-converted));
                        self.add_energy_to_layer(heat.to_energy(converted), layer_type);
                    }
                }
            } else if layer_type.is_gas_layer() {
                let boiling_point = reactant.boiling_point(pressure);
                if boiling_point > temperature {
                    // condense: released latent heat warms this layer
                    let heat = reactant.vaporization_heat(temperature, pressure);
                    let budget = layer.least_energy_diff(boiling_point, &self.content, pressure);
                    let converted = current.min(budget.to_moles(heat));
                    if converted > Quantity::ZERO {
                        let destination = layer_type.lower_aggregation_layer();
                        self.add_reactant(
                            reactant.with_amount_and_layer(converted, destination),
                        );
                        self.add_reactant(reactant.with_amount(-converted));
                        self.add_energy_to_layer(heat.to_energy(converted), layer_type);
                    }
                }
            } else if layer_type.is_solid_layer() {
                let melting_point = reactant.melting_point(pressure);
                if melting_point < temperature {
                    // melt: fusion heat is drawn from this layer
                    let heat = reactant.fusion_heat(temperature, pressure);
                    let available =
                        -layer.least_energy_diff(melting_point, &self.content, pressure);
                    let converted = current.min(available.to_moles(heat));
                    if converted > Quantity::ZERO {
                        let destination = layer_type.higher_aggregation_layer();
                        self.add_reactant(
                            reactant.with_amount_and_layer(converted, destination),
                        );
                        self.add_reactant(reactant.with_amount(-converted));
                        self.add_energy_to_layer(-heat.to_energy(converted), layer_type);
                    }
                }
            }
        }
    }

    /// Drain a layer's pending potential energy into temperature changes
    /// and nucleator phase transitions.
    pub fn consume_layer_potential_energy(&mut self, layer_type: LayerType) {
        let Some(layer) = self.layers.get(&layer_type) else {
            return;
        };
        let energy = layer.potential_energy();
        if energy.value() > 0.0 {
            self.consume_positive_potential_energy(layer_type);
        } else if energy.value() < 0.0 {
            self.consume_negative_potential_energy(layer_type);
        }
    }

    fn consume_positive_potential_energy(&mut self, layer_type: LayerType) {
        let pressure = self.pressure;
        let higher = layer_type.higher_aggregation_layer();

        while !self.layers[&layer_type].is_empty() {
            let layer = &self.layers[&layer_type];
            let heat_capacity = layer.total_heat_capacity(&self.content, pressure);
            if heat_capacity <= Quantity::ZERO {
                return;
            }
            let energy = layer.potential_energy();
            let temperature = layer.temperature();

            // no transition point above
            if !layer.high_nucleator().is_valid() {
                let layer = self.layers.get_mut(&layer_type).expect("layer exists");
                layer.temperature += energy.to_temperature_change(heat_capacity);
                layer.potential_energy = Quantity::ZERO;
                return;
            }

            // reach the transition point
            let max_temperature = layer.max_allowed_temperature(pressure);
            let required = heat_capacity.to_energy(max_temperature - temperature);
            if required >= energy {
                let layer = self.layers.get_mut(&layer_type).expect("layer exists");
                layer.temperature += energy.to_temperature_change(heat_capacity);
                layer.potential_energy = Quantity::ZERO;
                return;
            }
            {
                let layer = self.layers.get_mut(&layer_type).expect("layer exists");
                layer.temperature = max_temperature;
                layer.potential_energy -= required;
            }

            // convert the nucleator's state
            let layer = &self.layers[&layer_type];
            let nucleator = layer
                .high_nucleator()
                .reactant()
                .expect("valid nucleator")
                .clone();
            let latent_heat = layer
                .high_nucleator()
                .transition_heat(max_temperature, pressure);
            let max_moles = self.content.amount_of(&nucleator.id());
            let remaining = layer.potential_energy();
            let converted = remaining.to_moles(latent_heat);

            if max_moles >= converted {
                self.add_reactant(nucleator.with_amount_and_layer(converted, higher));
                self.add_reactant(nucleator.with_amount(-converted));
                self.layers
                    .get_mut(&layer_type)
                    .expect("layer exists")
                    .potential_energy = Quantity::ZERO;
                return;
            }
            self.add_reactant(nucleator.with_amount_and_layer(max_moles, higher));
            self.add_reactant(nucleator.with_amount(-max_moles));
            self.layers
                .get_mut(&layer_type)
                .expect("layer exists")
                .potential_energy -= latent_heat.to_energy(max_moles);

            // find the new nucleator, repeat
            let content = &self.content;
            let layer = self.layers.get_mut(&layer_type).expect("layer exists");
            layer.find_new_high_nucleator(content, pressure);
        }

        // the layer boiled dry: forward what's left upward
        let residual = self.layers[&layer_type].potential_energy();
        if residual != Quantity::ZERO {
            if higher.is_real_layer() {
                self.add_energy_to_layer(residual, higher);
            } else {
                warn!("Dropped {residual} from an emptied {layer_type} layer.");
            }
        }
        let layer = self.layers.get_mut(&layer_type).expect("layer exists");
        layer.potential_energy = Quantity::ZERO;
        layer.temperature = Quantity::INFINITY;
    }

    fn consume_negative_potential_energy(&mut self, layer_type: LayerType) {
        let pressure = self.pressure;
        let lower = layer_type.lower_aggregation_layer();

        while !self.layers[&layer_type].is_empty() {
            let layer = &self.layers[&layer_type];
            let heat_capacity = layer.total_heat_capacity(&self.content, pressure);
            if heat_capacity <= Quantity::ZERO {
                return;
            }
            let energy = layer.potential_energy();
            let temperature = layer.temperature();

            // no transition point below
            if !layer.low_nucleator().is_valid() {
                let layer = self.layers.get_mut(&layer_type).expect("layer exists");
                layer.temperature += energy.to_temperature_change(heat_capacity);
                layer.potential_energy = Quantity::ZERO;
                return;
            }

            // reach the transition point
            let min_temperature = layer.min_allowed_temperature(pressure);
            let required = heat_capacity.to_energy(min_temperature - temperature);
            if required <= energy {
                let layer = self.layers.get_mut(&layer_type).expect("layer exists");
                layer.temperature += energy.to_temperature_change(heat_capacity);
                layer.potential_energy = Quantity::ZERO;
                return;
            }
            {
                let layer = self.layers.get_mut(&layer_type).expect("layer exists");
                layer.temperature = min_temperature;
                layer.potential_energy -= required;
            }

            // convert the nucleator's state; downward heats are negative
            let layer = &self.layers[&layer_type];
            let nucleator = layer
                .low_nucleator()
                .reactant()
                .expect("valid nucleator")
                .clone();
            let latent_heat = layer
                .low_nucleator()
                .transition_heat(min_temperature, pressure);
            let max_moles = self.content.amount_of(&nucleator.id());
            let remaining = layer.potential_energy();
            let converted = remaining.to_moles(latent_heat);

            if max_moles >= converted {
                self.add_reactant(nucleator.with_amount_and_layer(converted, lower));
                self.add_reactant(nucleator.with_amount(-converted));
                self.layers
                    .get_mut(&layer_type)
                    .expect("layer exists")
                    .potential_energy = Quantity::ZERO;
                return;
            }
            self.add_reactant(nucleator.with_amount_and_layer(max_moles, lower));
            self.add_reactant(nucleator.with_amount(-max_moles));
            self.layers
                .get_mut(&layer_type)
                .expect("layer exists")
                .potential_energy -= latent_heat.to_energy(max_moles);

            // find the new nucleator, repeat
            let content = &self.content;
            let layer = self.layers.get_mut(&layer_type).expect("layer exists");
            layer.find_new_low_nucleator(content, pressure);
        }

        // the layer froze out completely: forward what's left downward
        let residual = self.layers[&layer_type].potential_energy();
        if residual != Quantity::ZERO {
            if lower.is_real_layer() {
                self.add_energy_to_layer(residual, lower);
            } else {
                warn!("Dropped {residual} from an emptied {layer_type} layer.");
            }
        }
        let layer = self.layers.get_mut(&layer_type).expect("layer exists");
        layer.potential_energy = Quantity::ZERO;
        layer.temperature = Quantity::INFINITY;
    }

    /// Run temporary-state conversion and the potential-energy drain over
    /// every layer.
    pub fn consume_potential_energy(&mut self) {
        let layer_types: Vec<LayerType> = self.layers.keys().copied().collect();
        for layer_type in layer_types {
            self.convert_temporary_state_reactants(layer_type);
            self.consume_layer_potential_energy(layer_type);
        }
    }

    pub fn has_same_state(&self, other: &MultiLayerMixture, epsilon: f64) -> bool {
        self.pressure.equals(other.pressure, epsilon)
            && self.total_moles.equals(other.total_moles, epsilon)
            && self.total_mass.equals(other.total_mass, epsilon)
            && self.total_volume.equals(other.total_volume, epsilon)
    }

    pub fn has_same_content(&self, other: &MultiLayerMixture, epsilon: f64) -> bool {
        self.content.equals(&other.content, epsilon)
    }

    pub fn has_same_layers(&self, other: &MultiLayerMixture, epsilon: f64) -> bool {
        for layer_type in LayerType::all() {
            let here = self.has_layer(layer_type);
            if here != other.has_layer(layer_type) {
                return false;
            }
            if here
                && !self.layers[&layer_type].equals(&other.layers[&layer_type], epsilon)
            {
                return false;
            }
        }
        true
    }

    pub fn is_same(&self, other: &MultiLayerMixture, epsilon: f64) -> bool {
        self.has_same_state(other, epsilon)
            && self.has_same_content(other, epsilon)
            && self.has_same_layers(other, epsilon)
    }
}

impl Container for MultiLayerMixture {
    fn add_reactant(&mut self, reactant: Reactant) {
        MultiLayerMixture::add_reactant(self, reactant);
    }

    fn add_energy(&mut self, energy: Quantity<Joule>) {
        MultiLayerMixture::add_energy(self, energy);
    }

    fn total_mass(&self) -> Quantity<Gram> {
        self.total_mass
    }
}
