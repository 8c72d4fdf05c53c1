//! Reaction rules
//!
//! A `ReactionData` is an immutable rule: structural reactant and product
//! patterns (flattened by stoichiometric coefficient), catalysts, energies
//! and speed estimators, plus the component map resolving radical atoms of
//! products to radical atoms of reactants.

use crate::constants::MAX_PRODUCT_ATOM_COUNT;
use crate::error::{SimulationError, SimulationResult};
use crate::mixtures::Reactant;
use crate::molecules::{DataStore, Estimator, MolecularStructure, Molecule};
use crate::quantities::{Celsius, JoulePerMole, MolePerSecond, MoleRatio, Quantity};
use crate::reactions::Catalyst;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

pub type ReactionId = u32;

/// `(reactant index, atom index) -> (product index, atom index)` over the
/// flattened pattern lists, defined for radical atoms only.
pub type ComponentMap = BTreeMap<(usize, usize), (usize, usize)>;

#[derive(Debug, Clone)]
pub struct ReactionData {
    pub id: ReactionId,
    pub name: String,
    pub is_cut: bool,
    reactants: Vec<MolecularStructure>,
    products: Vec<MolecularStructure>,
    catalysts: Vec<Catalyst>,
    pub reaction_energy: Quantity<JoulePerMole>,
    pub activation_energy: Quantity<JoulePerMole>,
    temperature_speed: Estimator,
    concentration_speed: Estimator,
    component_map: ComponentMap,
}

impl ReactionData {
    /// Build a rule from already-flattened pattern lists. When no explicit
    /// component map is given, radical atoms are paired positionally in
    /// order of appearance across reactants and products.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ReactionId,
        name: &str,
        reactants: Vec<MolecularStructure>,
        products: Vec<MolecularStructure>,
        catalysts: Vec<Catalyst>,
        reaction_energy: Quantity<JoulePerMole>,
        activation_energy: Quantity<JoulePerMole>,
        temperature_speed: Estimator,
        concentration_speed: Estimator,
        is_cut: bool,
        component_map: Option<ComponentMap>,
    ) -> SimulationResult<Self> {
        let component_map = match component_map {
            Some(map) => map,
            None => Self::map_radicals_positionally(&name.to_string(), &reactants, &products)?,
        };

        Ok(Self {
            id,
            name: name.to_string(),
            is_cut,
            reactants,
            products,
            catalysts,
            reaction_energy,
            activation_energy,
            temperature_speed,
            concentration_speed,
            component_map,
        })
    }

    fn map_radicals_positionally(
        name: &String,
        reactants: &[MolecularStructure],
        products: &[MolecularStructure],
    ) -> SimulationResult<ComponentMap> {
        let reactant_radicals: Vec<(usize, usize)> = reactants
            .iter()
            .enumerate()
            .flat_map(|(i, s)| s.radical_atoms().into_iter().map(move |a| (i, a)))
            .collect();
        let product_radicals: Vec<(usize, usize)> = products
            .iter()
            .enumerate()
            .flat_map(|(j, s)| s.radical_atoms().into_iter().map(move |a| (j, a)))
            .collect();

        if reactant_radicals.len() != product_radicals.len() {
            return Err(SimulationError::ComponentMapping { name: name.clone() });
        }

        Ok(reactant_radicals
            .into_iter()
            .zip(product_radicals)
            .collect())
    }

    pub fn reactants(&self) -> &[MolecularStructure] {
        &self.reactants
    }

    pub fn products(&self) -> &[MolecularStructure] {
        &self.products
    }

    pub fn catalysts(&self) -> &[Catalyst] {
        &self.catalysts
    }

    pub fn component_map(&self) -> &ComponentMap {
        &self.component_map
    }

    /// Phenomenological rate: `speed_t(T) * speed_c(c)`
    pub fn speed_at(
        &self,
        temperature: Quantity<Celsius>,
        concentration: Quantity<MoleRatio>,
    ) -> Quantity<MolePerSecond> {
        Quantity::new(
            self.temperature_speed.get(temperature.value())
                * self.concentration_speed.get(concentration.value()),
        )
    }

    /// For each declared reactant pattern, match the aligned concrete
    /// reactant: a virtual-hydrogen pair matches trivially, otherwise the
    /// pattern must map into the concrete structure. Any failure fails the
    /// whole attempt.
    pub fn generate_concrete_reactant_matches(
        &self,
        concretes: &[Reactant],
    ) -> Option<Vec<BTreeMap<usize, usize>>> {
        if self.reactants.len() != concretes.len() {
            return None;
        }

        let mut matches = Vec::with_capacity(self.reactants.len());
        for (pattern, concrete) in self.reactants.iter().zip(concretes) {
            let structure = concrete.molecule.structure();
            if pattern.is_virtual_hydrogen() && structure.is_virtual_hydrogen() {
                matches.push(BTreeMap::new());
                continue;
            }
            matches.push(structure.match_with(pattern)?);
        }
        Some(matches)
    }

    /// Resolve every radical atom of every product to the matched atom of
    /// the concrete reactant and graft the hanging branches onto the product
    /// skeleton. Oversized products are filtered out.
    pub fn generate_concrete_products(
        &self,
        concretes: &[Reactant],
        matches: &[BTreeMap<usize, usize>],
        store: &DataStore,
    ) -> Vec<Molecule> {
        if matches.len() != self.reactants.len() {
            return Vec::new();
        }

        let mut structures: Vec<MolecularStructure> = self.products.clone();
        for (&(r_idx, r_atom), &(p_idx, p_atom)) in &self.component_map {
            let Some(&root) = matches[r_idx].get(&r_atom) else {
                return Vec::new();
            };
            let excluded: BTreeSet<usize> = matches[r_idx].values().copied().collect();
            structures[p_idx].graft_branch(
                p_atom,
                concretes[r_idx].molecule.structure(),
                root,
                &excluded,
            );
        }

        let mut result = Vec::with_capacity(structures.len());
        for mut structure in structures {
            if structure.non_implied_atom_count() > MAX_PRODUCT_ATOM_COUNT {
                continue;
            }
            if let Err(e) = structure.recount_implied_hydrogens(store.atoms()) {
                warn!("Discarded product of '{}': {e}", self.name);
                continue;
            }
            result.push(store.find_or_add(structure));
        }
        result
    }

    /// Find the product pattern matching a retrosynthesis target.
    pub fn generate_retrosynth_product_match(
        &self,
        target: &MolecularStructure,
    ) -> Option<(usize, BTreeMap<usize, usize>)> {
        for (i, pattern) in self.products.iter().enumerate() {
            if pattern.is_virtual_hydrogen() && target.is_virtual_hydrogen() {
                return Some((i, BTreeMap::new()));
            }
            if let Some(map) = target.match_with(pattern) {
                return Some((i, map));
            }
        }
        None
    }

    /// Apply the rule in reverse: substitute the target's branches into the
    /// reactant patterns through the reversed component map.
    pub fn generate_retrosynth_reactants(
        &self,
        target: &MolecularStructure,
        product_match: &(usize, BTreeMap<usize, usize>),
        store: &DataStore,
    ) -> Vec<MolecularStructure> {
        let (matched_product, map) = product_match;
        let mut reactants: Vec<MolecularStructure> = self.reactants.clone();
        let excluded: BTreeSet<usize> = map.values().copied().collect();

        for (&(r_idx, r_atom), &(p_idx, p_atom)) in &self.component_map {
            if p_idx != *matched_product {
                continue;
            }
            let Some(&root) = map.get(&p_atom) else {
                continue;
            };
            reactants[r_idx].graft_branch(r_atom, target, root, &excluded);
        }

        for structure in &mut reactants {
            if let Err(e) = structure.recount_implied_hydrogens(store.atoms()) {
                warn!("Retrosynth reactant of '{}' dropped hydrogens: {e}", self.name);
            }
        }
        reactants
    }

    /// `self` is a specialization of `other` when every reactant and product
    /// pattern of `self` is matched by a distinct pattern of `other`, and
    /// every catalyst of `other` is matched by a distinct catalyst of `self`
    /// (a specialised rule may require additional catalysts).
    pub fn is_specialization_of(&self, other: &ReactionData) -> bool {
        fn covered<T>(
            items: &[T],
            candidates: &[T],
            matches: impl Fn(&T, &T) -> bool,
        ) -> bool {
            let mut used = vec![false; candidates.len()];
            'outer: for item in items {
                for (j, candidate) in candidates.iter().enumerate() {
                    if !used[j] && matches(item, candidate) {
                        used[j] = true;
                        continue 'outer;
                    }
                }
                return false;
            }
            true
        }

        covered(&self.reactants, &other.reactants, |s, general| {
            s.matches_with(general)
        }) && covered(&self.products, &other.products, |s, general| {
            s.matches_with(general)
        }) && covered(&other.catalysts, &self.catalysts, |general, s| {
            general.matches_catalyst(s)
        })
    }

    pub fn is_generalization_of(&self, other: &ReactionData) -> bool {
        other.is_specialization_of(self)
    }

    pub fn is_equivalent_to(&self, other: &ReactionData) -> bool {
        self.reactants.len() == other.reactants.len()
            && self.products.len() == other.products.len()
            && self.catalysts.len() == other.catalysts.len()
            && self.is_specialization_of(other)
            && other.is_specialization_of(self)
    }
}
